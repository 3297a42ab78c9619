//! Locale-aware time entry core for settings UIs.
//!
//! This crate holds everything a time-entry control needs except drawing:
//!
//! - **[`format`]**: decides between 12- and 24-hour display for a
//!   [`LocaleConfig`], by asking an injected [`HourFormatter`] how the locale
//!   renders 22:00.
//! - **[`codec`]**: converts canonical `HH:MM:SS` values to display
//!   sub-fields and back.
//! - **[`sanitize`]**: clamps raw field input into range and zero-pads it.
//! - **[`controller`]**: ties the above together for one input and reports
//!   canonical value changes to the owner.
//!
//! # Example
//!
//! ```
//! use settings_ui_time::prelude::*;
//!
//! let detector = FormatDetector::new(|_locale: &str| -> settings_ui_time::Result<String> {
//!     Ok("10:00:00 PM".to_string())
//! });
//! let config = LocaleConfig::new(TimeFormat::Language, "en-US");
//!
//! let mut input =
//!     TimeInputController::from_config(TimeInputOptions::default(), &config, &detector)?;
//! input.set_value(Some("00:05:00"));
//! assert_eq!(input.rendered().hours, "12");
//!
//! let change = input.handle_raw_edit("minutes", "75");
//! assert_eq!(change, Some(TimeChange::Set("00:59:00".to_string())));
//! # Ok::<(), TimeInputError>(())
//! ```

pub mod codec;
pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod sanitize;

pub use codec::{CanonicalTime, DisplayTime, Meridiem, decode, encode};
pub use config::{LocaleConfig, TimeFormat, TimeInputOptions};
pub use controller::{FieldRenderer, RenderedFields, TimeChange, TimeInputController};
pub use error::{Result, TimeInputError};
pub use format::{FormatDetector, FormatMode, HourFormatter, detect_format};
pub use sanitize::{FieldRange, FieldSanitizer, TimeField, pad};

#[cfg(feature = "chrono-locales")]
pub use format::ChronoHourFormatter;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::codec::{CanonicalTime, DisplayTime, Meridiem};
    pub use crate::config::{LocaleConfig, TimeFormat, TimeInputOptions};
    pub use crate::controller::{FieldRenderer, RenderedFields, TimeChange, TimeInputController};
    pub use crate::error::TimeInputError;
    pub use crate::format::{FormatDetector, FormatMode, HourFormatter};
    pub use crate::sanitize::{FieldSanitizer, TimeField};
}
