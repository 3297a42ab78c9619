//! Host-supplied configuration for time inputs.

use std::fmt;

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How the host wants times displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFormat {
    /// Follow the convention of the configured language.
    #[default]
    Language,
    /// Follow the convention of the system locale.
    System,
    /// Always use 12-hour display with AM/PM.
    AmPm,
    /// Always use 24-hour display.
    TwentyFour,
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Language => "language",
            Self::System => "system",
            Self::AmPm => "am_pm",
            Self::TwentyFour => "twenty_four",
        };
        f.write_str(name)
    }
}

/// Locale descriptor supplied by the hosting application.
///
/// Compared and hashed by value so format detection can be memoized per
/// distinct descriptor.
///
/// # Examples
///
/// ```
/// use settings_ui_time::config::{LocaleConfig, TimeFormat};
///
/// let config = LocaleConfig::from_json(r#"{ "time_format": "am_pm", "language": "en-GB" }"#)?;
/// assert_eq!(config.time_format, TimeFormat::AmPm);
/// assert_eq!(config.language, "en-GB");
/// # Ok::<(), settings_ui_time::TimeInputError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// Requested display convention
    #[serde(default)]
    pub time_format: TimeFormat,

    /// Locale tag of the user's language, e.g. `en-US`
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            time_format: TimeFormat::default(),
            language: default_language(),
        }
    }
}

impl LocaleConfig {
    /// Create a descriptor
    pub fn new(time_format: TimeFormat, language: impl Into<String>) -> Self {
        Self {
            time_format,
            language: language.into(),
        }
    }

    /// Parse a descriptor from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Which sub-fields a time input shows and how it may be edited.
///
/// # Examples
///
/// ```
/// use settings_ui_time::config::TimeInputOptions;
///
/// let options = TimeInputOptions::builder()
///     .enable_second(true)
///     .required(true)
///     .build();
/// assert!(options.enable_second);
/// assert!(!options.enable_day);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeInputOptions {
    /// Show the seconds field
    #[builder(default)]
    pub enable_second: bool,

    /// Show the milliseconds field
    #[builder(default)]
    pub enable_millisecond: bool,

    /// Show the days field
    #[builder(default)]
    pub enable_day: bool,

    /// Drop the upper bound on hours, for elapsed-duration entry
    #[builder(default)]
    pub no_hours_limit: bool,

    /// A value must be present; clearing is not offered
    #[builder(default)]
    pub required: bool,

    /// The control is read-only
    #[builder(default)]
    pub disabled: bool,
}

impl TimeInputOptions {
    /// Parse options from a JSON document; missing keys default to `false`
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether the clear action is available
    #[must_use]
    pub fn clearable(&self) -> bool {
        !self.required && !self.disabled
    }
}
