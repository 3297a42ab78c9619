//! Sub-field range checking and zero padding.
//!
//! Live editing is best effort: the sanitizer never fails. Empty input
//! clears a field, non-numeric input keeps the previous value, fractional
//! input is truncated and out-of-range input snaps to the nearest bound.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::format::FormatMode;

/// Numeric sub-fields of a time input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeField {
    /// Whole days
    Days,
    /// Hours
    Hours,
    /// Minutes
    Minutes,
    /// Seconds
    Seconds,
    /// Milliseconds
    Milliseconds,
}

impl TimeField {
    /// All fields in display order
    pub const ALL: [Self; 5] = [
        Self::Days,
        Self::Hours,
        Self::Minutes,
        Self::Seconds,
        Self::Milliseconds,
    ];

    /// Raw field name used by edit events
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Days => "days",
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
            Self::Milliseconds => "milliseconds",
        }
    }

    /// Display width; days are not padded
    #[must_use]
    pub fn width(self) -> usize {
        match self {
            Self::Days => 1,
            Self::Hours | Self::Minutes | Self::Seconds => 2,
            Self::Milliseconds => 3,
        }
    }
}

impl fmt::Display for TimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TimeField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "days" | "day" => Ok(Self::Days),
            "hours" | "hour" => Ok(Self::Hours),
            "minutes" | "minute" => Ok(Self::Minutes),
            "seconds" | "second" => Ok(Self::Seconds),
            "milliseconds" | "millisecond" => Ok(Self::Milliseconds),
            _ => Err(()),
        }
    }
}

/// Inclusive range of a field; `max` is `None` when unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRange {
    /// Smallest accepted value
    pub min: u32,
    /// Largest accepted value
    pub max: Option<u32>,
}

impl FieldRange {
    const fn bounded(min: u32, max: u32) -> Self {
        Self { min, max: Some(max) }
    }

    const fn at_least(min: u32) -> Self {
        Self { min, max: None }
    }

    /// Whether `value` lies in the range
    #[must_use]
    pub fn contains(&self, value: u32) -> bool {
        value >= self.min && self.max.is_none_or(|max| value <= max)
    }

    /// Nearest value inside the range
    #[must_use]
    pub fn clamp(&self, value: i64) -> u32 {
        let value = value.max(i64::from(self.min));
        let value = match self.max {
            Some(max) => value.min(i64::from(max)),
            None => value,
        };
        u32::try_from(value).unwrap_or(u32::MAX)
    }
}

/// Range checks for one time input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSanitizer {
    mode: FormatMode,
    no_hours_limit: bool,
}

impl FieldSanitizer {
    /// Create a sanitizer for the given hour convention.
    ///
    /// With `no_hours_limit` the hour field has no upper bound, for
    /// elapsed-duration entry.
    #[must_use]
    pub fn new(mode: FormatMode, no_hours_limit: bool) -> Self {
        Self {
            mode,
            no_hours_limit,
        }
    }

    /// Valid range of `field`
    #[must_use]
    pub fn range(&self, field: TimeField) -> FieldRange {
        match field {
            TimeField::Days => FieldRange::at_least(0),
            TimeField::Hours => match (self.mode, self.no_hours_limit) {
                (FormatMode::TwelveHour, true) => FieldRange::at_least(1),
                (FormatMode::TwelveHour, false) => FieldRange::bounded(1, 12),
                (FormatMode::TwentyFourHour, true) => FieldRange::at_least(0),
                (FormatMode::TwentyFourHour, false) => FieldRange::bounded(0, 23),
            },
            TimeField::Minutes | TimeField::Seconds => FieldRange::bounded(0, 59),
            TimeField::Milliseconds => FieldRange::bounded(0, 999),
        }
    }

    /// Snap a numeric value into the range of `field`
    #[must_use]
    pub fn clamp(&self, field: TimeField, value: i64) -> u32 {
        self.range(field).clamp(value)
    }

    /// Turn raw field text into a field value.
    ///
    /// Empty text clears the field. Text that is not a finite number keeps
    /// `previous`.
    #[must_use]
    pub fn sanitize(&self, field: TimeField, raw: &str, previous: Option<u32>) -> Option<u32> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.parse::<f64>() {
            Ok(number) if number.is_finite() => {
                // `as` saturates on overflow.
                let value = self.clamp(field, number.trunc() as i64);
                if value as f64 != number {
                    tracing::trace!(%field, raw, value, "field input adjusted");
                }
                Some(value)
            }
            _ => {
                tracing::debug!(%field, raw, "non-numeric field input ignored");
                previous
            }
        }
    }
}

/// Render `value` zero-padded to at least `width` digits.
///
/// Values wider than `width` are never truncated.
#[must_use]
pub fn pad(value: u32, width: usize) -> String {
    format!("{value:0width$}")
}

/// Render `value` at the display width of `field`.
#[must_use]
pub fn pad_field(field: TimeField, value: u32) -> String {
    pad(value, field.width())
}
