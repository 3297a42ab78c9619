//! Time input error types
//!
//! Malformed user input is never an error here: the sanitizer and the codec
//! normalize it. Errors are reserved for the host-facing boundaries: locale
//! formatting, strict canonical parsing and configuration documents.

use thiserror::Error;

/// Result type for time input operations
pub type Result<T> = std::result::Result<T, TimeInputError>;

/// Time input errors
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TimeInputError {
    /// The locale formatting capability does not know this tag
    #[error("Unknown locale: '{tag}'")]
    UnknownLocale {
        /// The locale tag as supplied by the host
        tag: String,
    },

    /// The locale formatting capability failed for this tag
    #[error("Failed to format reference time for locale '{tag}': {reason}")]
    LocaleFormat {
        /// The locale tag as supplied by the host
        tag: String,
        /// Why formatting failed
        reason: String,
    },

    /// A canonical `HH:MM:SS` value could not be parsed
    #[error("Invalid canonical time '{input}': {reason}")]
    InvalidCanonical {
        /// The rejected input
        input: String,
        /// Why it was rejected
        reason: String,
    },

    /// A configuration document could not be parsed
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl TimeInputError {
    /// Create an "unknown locale" error
    pub fn unknown_locale(tag: impl Into<String>) -> Self {
        Self::UnknownLocale { tag: tag.into() }
    }

    /// Create a "locale format" error
    pub fn locale_format(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::LocaleFormat {
            tag: tag.into(),
            reason: reason.into(),
        }
    }

    /// Create an "invalid canonical time" error
    pub fn invalid_canonical(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCanonical {
            input: input.into(),
            reason: reason.into(),
        }
    }
}
