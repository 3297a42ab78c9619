//! Explicit "translations updated" subscriptions.
//!
//! Uses [`tokio::sync::broadcast`] for fan-out delivery. The owning
//! application creates one [`TranslationBus`] and hands a
//! [`TranslationSubscription`] to each control that renders translated text.
//! Notifications are fire-and-forget: with no subscribers they are dropped.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

/// Notification that the active translation table changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationsUpdated {
    /// Language tag of the new translation table.
    pub language: String,
}

impl TranslationsUpdated {
    /// Create a notification for the given language.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }
}

/// Broadcast-based bus for translation updates.
///
/// # Examples
///
/// ```
/// use settings_ui_runtime::{TranslationBus, TranslationsUpdated};
///
/// let bus = TranslationBus::new(16);
/// let mut sub = bus.subscribe();
///
/// bus.emit(TranslationsUpdated::new("de"));
///
/// assert_eq!(sub.try_recv(), Some(TranslationsUpdated::new("de")));
/// assert_eq!(bus.total_emitted(), 1);
/// ```
#[derive(Debug)]
pub struct TranslationBus {
    sender: broadcast::Sender<TranslationsUpdated>,
    emitted: AtomicU64,
}

impl TranslationBus {
    /// Create a bus with the given channel capacity.
    ///
    /// Slow subscribers that fall more than `capacity` notifications behind
    /// skip the oldest ones.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            emitted: AtomicU64::new(0),
        }
    }

    /// Notify all subscribers.
    pub fn emit(&self, update: TranslationsUpdated) {
        self.emitted.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(language = %update.language, "translations updated");
        // No receivers is fine.
        let _ = self.sender.send(update);
    }

    /// Subscribe to future notifications.
    pub fn subscribe(&self) -> TranslationSubscription {
        TranslationSubscription {
            receiver: self.sender.subscribe(),
        }
    }

    /// Total number of notifications emitted since creation.
    #[must_use]
    pub fn total_emitted(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for TranslationBus {
    fn default() -> Self {
        Self::new(16)
    }
}

/// Receiving end handed to a control by its owner.
#[derive(Debug)]
pub struct TranslationSubscription {
    receiver: broadcast::Receiver<TranslationsUpdated>,
}

impl TranslationSubscription {
    /// Wait for the next notification.
    ///
    /// Returns `None` once the bus has been dropped. Lagged gaps are skipped.
    pub async fn recv(&mut self) -> Option<TranslationsUpdated> {
        loop {
            match self.receiver.recv().await {
                Ok(update) => return Some(update),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "translation subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Take the next queued notification without waiting.
    pub fn try_recv(&mut self) -> Option<TranslationsUpdated> {
        loop {
            match self.receiver.try_recv() {
                Ok(update) => return Some(update),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "translation subscriber lagged");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }

    /// Drain every queued notification, returning the most recent one.
    pub fn drain_latest(&mut self) -> Option<TranslationsUpdated> {
        let mut latest = None;
        while let Some(update) = self.try_recv() {
            latest = Some(update);
        }
        latest
    }
}
