//! Call debouncing.
//!
//! A [`Debouncer`] wraps a callback so that a burst of calls arriving closer
//! together than the wait window results in a single invocation, made once the
//! window has elapsed after the *last* call, with that call's arguments.
//!
//! With [`Debouncer::immediate`] enabled, the first call of a fresh burst (no
//! timer pending) also runs the callback synchronously. The trailing
//! invocation then only happens if more calls arrive before the window
//! closes.
//!
//! Each debouncer keeps at most one pending timer, so invocations never
//! overlap for a given instance.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::error::{Result, RuntimeError};

type Callback<A> = Arc<dyn Fn(A) + Send + Sync>;

struct DebounceState<A> {
    /// Bumped on every call and cancel; a timer only fires if its epoch is current.
    epoch: u64,
    pending: Option<JoinHandle<()>>,
    trailing: Option<A>,
}

struct Shared<A> {
    callback: Callback<A>,
    state: Mutex<DebounceState<A>>,
}

/// Collapses repeated calls within a wait window into one callback invocation.
///
/// The timer runs on the Tokio runtime captured at construction time.
/// Dropping the debouncer cancels any pending invocation.
pub struct Debouncer<A> {
    wait: Duration,
    immediate: bool,
    handle: Handle,
    shared: Arc<Shared<A>>,
}

impl<A> fmt::Debug for Debouncer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("wait", &self.wait)
            .field("immediate", &self.immediate)
            .field("pending", &self.is_pending())
            .finish()
    }
}

impl<A> Debouncer<A>
where
    A: Send + 'static,
{
    /// Create a trailing-edge debouncer on the current Tokio runtime.
    ///
    /// Fails with [`RuntimeError::NoRuntime`] when called outside a runtime.
    pub fn new<F>(wait: Duration, callback: F) -> Result<Self>
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        let handle = Handle::try_current().map_err(|_| RuntimeError::no_runtime("Debouncer"))?;
        Ok(Self::with_handle(handle, wait, callback))
    }

    /// Create a debouncer whose timers run on the given runtime handle.
    pub fn with_handle<F>(handle: Handle, wait: Duration, callback: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            wait,
            immediate: false,
            handle,
            shared: Arc::new(Shared {
                callback: Arc::new(callback),
                state: Mutex::new(DebounceState {
                    epoch: 0,
                    pending: None,
                    trailing: None,
                }),
            }),
        }
    }

    /// Also invoke the callback synchronously on the first call of each burst.
    #[must_use = "builder methods must be chained or built"]
    pub fn immediate(mut self, immediate: bool) -> Self {
        self.immediate = immediate;
        self
    }

    /// The wait window.
    #[must_use]
    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Register a call.
    ///
    /// Resets the pending timer. The arguments of the last call in a burst
    /// are the ones the trailing invocation receives.
    pub fn call(&self, args: A) {
        let mut state = self.shared.state.lock();
        let fresh_burst = state.pending.is_none();
        if let Some(pending) = state.pending.take() {
            pending.abort();
        }
        state.epoch = state.epoch.wrapping_add(1);
        let epoch = state.epoch;

        let leading = if fresh_burst && self.immediate {
            state.trailing = None;
            Some(args)
        } else {
            state.trailing = Some(args);
            None
        };

        let shared = Arc::clone(&self.shared);
        let wait = self.wait;
        let deadline = Instant::now() + wait;
        state.pending = Some(self.handle.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let trailing = {
                let mut state = shared.state.lock();
                if state.epoch != epoch {
                    return;
                }
                state.pending = None;
                state.trailing.take()
            };
            if let Some(args) = trailing {
                tracing::trace!(wait_ms = wait.as_millis() as u64, "debounce window elapsed");
                (shared.callback)(args);
            }
        }));
        tracing::trace!(
            epoch,
            fresh_burst,
            wait_ms = self.wait.as_millis() as u64,
            "debounce timer scheduled"
        );
        drop(state);

        if let Some(args) = leading {
            (self.shared.callback)(args);
        }
    }

    /// Drop any pending invocation without running the callback.
    ///
    /// A no-op when nothing is pending.
    pub fn cancel(&self) {
        let mut state = self.shared.state.lock();
        state.epoch = state.epoch.wrapping_add(1);
        state.trailing = None;
        if let Some(pending) = state.pending.take() {
            pending.abort();
            tracing::trace!("debounce timer cancelled");
        }
    }
}

impl<A> Debouncer<A> {
    /// Whether a timer is currently pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.shared.state.lock().pending.is_some()
    }
}

impl<A> Drop for Debouncer<A> {
    fn drop(&mut self) {
        let mut state = self.shared.state.lock();
        state.epoch = state.epoch.wrapping_add(1);
        state.trailing = None;
        if let Some(pending) = state.pending.take() {
            pending.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Log<T> = Arc<Mutex<Vec<(Duration, T)>>>;

    fn recorder<T: Send + 'static>(start: Instant) -> (Log<T>, impl Fn(T) + Send + Sync + 'static) {
        let log: Log<T> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        (log, move |value| sink.lock().push((start.elapsed(), value)))
    }

    async fn advance(ms: u64) {
        tokio::time::advance(Duration::from_millis(ms)).await;
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn burst_collapses_to_last_call() {
        let start = Instant::now();
        let (log, sink) = recorder::<u32>(start);
        let debouncer = Debouncer::new(Duration::from_millis(50), sink).unwrap();

        debouncer.call(0);
        advance(10).await;
        debouncer.call(10);
        advance(10).await;
        debouncer.call(20);

        advance(49).await;
        assert!(log.lock().is_empty(), "window has not elapsed yet");

        advance(2).await;
        let calls = log.lock().clone();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, 20);
        assert!(calls[0].0 >= Duration::from_millis(70));
        assert!(calls[0].0 <= Duration::from_millis(71));
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn immediate_fires_leading_and_trailing() {
        let start = Instant::now();
        let (log, sink) = recorder::<u32>(start);
        let debouncer = Debouncer::new(Duration::from_millis(50), sink)
            .unwrap()
            .immediate(true);

        debouncer.call(0);
        assert_eq!(log.lock().len(), 1, "leading call runs synchronously");
        assert_eq!(log.lock()[0], (Duration::ZERO, 0));

        advance(10).await;
        debouncer.call(10);
        advance(10).await;
        debouncer.call(20);
        advance(60).await;

        let values: Vec<u32> = log.lock().iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![0, 20]);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn immediate_single_call_fires_once() {
        let (log, sink) = recorder::<&'static str>(Instant::now());
        let debouncer = Debouncer::new(Duration::from_millis(50), sink)
            .unwrap()
            .immediate(true);

        debouncer.call("only");
        advance(100).await;

        assert_eq!(log.lock().len(), 1);
        assert!(!debouncer.is_pending());

        // A new burst after the window leads again.
        debouncer.call("again");
        assert_eq!(log.lock().len(), 2);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn cancel_drops_pending_call() {
        let (log, sink) = recorder::<u32>(Instant::now());
        let debouncer = Debouncer::new(Duration::from_millis(50), sink).unwrap();

        debouncer.cancel();
        debouncer.call(1);
        assert!(debouncer.is_pending());
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        advance(100).await;
        assert!(log.lock().is_empty());
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn drop_cancels_pending_call() {
        let (log, sink) = recorder::<u32>(Instant::now());
        let debouncer = Debouncer::new(Duration::from_millis(50), sink).unwrap();
        debouncer.call(1);
        drop(debouncer);

        advance(100).await;
        assert!(log.lock().is_empty());
    }

    #[test]
    fn new_outside_runtime_fails() {
        let err = Debouncer::new(Duration::from_millis(5), |(): ()| {}).unwrap_err();
        assert_eq!(err, RuntimeError::no_runtime("Debouncer"));
    }
}
