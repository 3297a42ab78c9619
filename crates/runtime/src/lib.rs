//! Runtime helpers shared by settings UI controls.
//!
//! This crate holds the small pieces of timing and signalling machinery
//! that more than one control needs:
//!
//! - **[`Debouncer`]**: collapses bursts of calls into a single trailing
//!   invocation, optionally firing once at the leading edge as well.
//! - **[`TranslationBus`]**: an explicit, owner-provided subscription for
//!   "translations updated" notifications. Controls receive a
//!   [`TranslationSubscription`] from whoever owns them instead of listening
//!   on a process-wide event target.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use settings_ui_runtime::Debouncer;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), settings_ui_runtime::RuntimeError> {
//! let save = Debouncer::new(Duration::from_millis(300), |value: String| {
//!     println!("saving {value}");
//! })?;
//!
//! save.call("a".to_string());
//! save.call("ab".to_string()); // only "ab" is saved, 300ms from now
//! # Ok(())
//! # }
//! ```

pub mod debounce;
pub mod error;
pub mod signal;

pub use debounce::Debouncer;
pub use error::{Result, RuntimeError};
pub use signal::{TranslationBus, TranslationSubscription, TranslationsUpdated};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::debounce::Debouncer;
    pub use crate::error::{Result, RuntimeError};
    pub use crate::signal::{TranslationBus, TranslationSubscription, TranslationsUpdated};
}
