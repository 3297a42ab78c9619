//! Conversion between canonical `HH:MM:SS` values and display sub-fields.
//!
//! The canonical form is always 24-hour and zero-padded. The display form
//! follows the active [`FormatMode`]: in 12-hour mode midnight shows as
//! `12 AM` and noon as `12 PM`.
//!
//! ```
//! use settings_ui_time::codec::{decode, encode, Meridiem};
//! use settings_ui_time::format::FormatMode;
//!
//! let display = decode(Some("00:30:00"), FormatMode::TwelveHour);
//! assert_eq!(display.hours, Some(12));
//! assert_eq!(display.meridiem, Meridiem::Am);
//! assert_eq!(encode(&display, FormatMode::TwelveHour).as_deref(), Some("00:30:00"));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimeInputError};
use crate::format::FormatMode;
use crate::sanitize::TimeField;

/// AM/PM indicator shown in 12-hour mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Meridiem {
    /// Before noon
    #[default]
    #[serde(rename = "AM")]
    Am,
    /// Noon and after
    #[serde(rename = "PM")]
    Pm,
}

impl Meridiem {
    /// The meridiem a 24-hour clock hour falls in
    #[must_use]
    pub fn of_hour(hour: u32) -> Self {
        if hour >= 12 { Self::Pm } else { Self::Am }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Am => f.write_str("AM"),
            Self::Pm => f.write_str("PM"),
        }
    }
}

impl FromStr for Meridiem {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("am") {
            Ok(Self::Am)
        } else if s.eq_ignore_ascii_case("pm") {
            Ok(Self::Pm)
        } else {
            Err(())
        }
    }
}

/// Sub-field values shown to the user.
///
/// `None` means the field is empty. Hours are 1-12 in 12-hour mode and
/// 0-23 in 24-hour mode (or unbounded for duration entry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayTime {
    /// Whole days, only used when the day field is enabled
    pub days: Option<u32>,
    /// Display hour
    pub hours: Option<u32>,
    /// Minutes
    pub minutes: Option<u32>,
    /// Seconds
    pub seconds: Option<u32>,
    /// Milliseconds
    pub milliseconds: Option<u32>,
    /// Only meaningful in 12-hour mode
    pub meridiem: Meridiem,
}

impl DisplayTime {
    /// Value of a sub-field, `None` when empty
    #[must_use]
    pub fn field(&self, field: TimeField) -> Option<u32> {
        match field {
            TimeField::Days => self.days,
            TimeField::Hours => self.hours,
            TimeField::Minutes => self.minutes,
            TimeField::Seconds => self.seconds,
            TimeField::Milliseconds => self.milliseconds,
        }
    }

    /// Value of a sub-field, 0 when empty
    #[must_use]
    pub fn field_or_zero(&self, field: TimeField) -> u32 {
        self.field(field).unwrap_or(0)
    }

    /// Replace a sub-field
    pub fn set_field(&mut self, field: TimeField, value: Option<u32>) {
        let slot = match field {
            TimeField::Days => &mut self.days,
            TimeField::Hours => &mut self.hours,
            TimeField::Minutes => &mut self.minutes,
            TimeField::Seconds => &mut self.seconds,
            TimeField::Milliseconds => &mut self.milliseconds,
        };
        *slot = value;
    }

    /// Hours, minutes and seconds are all empty
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.hours.is_none() && self.minutes.is_none() && self.seconds.is_none()
    }
}

/// Split a canonical value into display sub-fields.
///
/// Missing or non-numeric components become empty fields; this never fails.
pub fn decode(canonical: Option<&str>, mode: FormatMode) -> DisplayTime {
    let mut parts = canonical.unwrap_or_default().split(':');
    let mut next = || parts.next().and_then(parse_component);
    let hours = next();
    let minutes = next();
    let seconds = next();

    let (hours, meridiem) = match (mode, hours) {
        (FormatMode::TwentyFourHour, hours) => (hours, Meridiem::Am),
        (FormatMode::TwelveHour, None) => (None, Meridiem::Am),
        (FormatMode::TwelveHour, Some(0)) => (Some(12), Meridiem::Am),
        (FormatMode::TwelveHour, Some(hour)) if hour > 12 && hour < 24 => {
            (Some(hour - 12), Meridiem::Pm)
        }
        (FormatMode::TwelveHour, Some(hour)) => (Some(hour), Meridiem::of_hour(hour)),
    };

    DisplayTime {
        hours,
        minutes,
        seconds,
        meridiem,
        ..DisplayTime::default()
    }
}

/// Join display sub-fields back into a canonical value.
///
/// Returns `None` when hours, minutes and seconds are all empty. Empty
/// fields otherwise count as 0. The meridiem is only consulted in 12-hour
/// mode.
pub fn encode(display: &DisplayTime, mode: FormatMode) -> Option<String> {
    if display.is_cleared() {
        return None;
    }
    let hours = canonical_hour(display.field_or_zero(TimeField::Hours), display.meridiem, mode);
    Some(format!(
        "{hours:02}:{:02}:{:02}",
        display.field_or_zero(TimeField::Minutes),
        display.field_or_zero(TimeField::Seconds)
    ))
}

fn canonical_hour(hour: u32, meridiem: Meridiem, mode: FormatMode) -> u32 {
    match (mode, meridiem) {
        (FormatMode::TwelveHour, Meridiem::Pm) if hour < 12 => hour + 12,
        (FormatMode::TwelveHour, Meridiem::Am) if hour == 12 => 0,
        _ => hour,
    }
}

fn parse_component(part: &str) -> Option<u32> {
    part.trim().parse().ok()
}

/// A validated canonical time of day.
///
/// Serializes as its `HH:MM:SS` string.
///
/// ```
/// use settings_ui_time::codec::CanonicalTime;
///
/// let time: CanonicalTime = "7:05".parse()?;
/// assert_eq!(time.to_string(), "07:05:00");
/// assert!("24:00:00".parse::<CanonicalTime>().is_err());
/// assert_eq!(CanonicalTime::parse_unbounded("30:00:00")?.hours, 30);
/// # Ok::<(), settings_ui_time::TimeInputError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CanonicalTime {
    /// Hour, 0-23 unless parsed as a duration
    pub hours: u32,
    /// Minute, 0-59
    pub minutes: u32,
    /// Second, 0-59
    pub seconds: u32,
}

impl CanonicalTime {
    /// Create a time of day, checking ranges.
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Result<Self> {
        let time = Self {
            hours,
            minutes,
            seconds,
        };
        time.check(false)?;
        Ok(time)
    }

    /// Parse an elapsed duration where hours may exceed 23.
    pub fn parse_unbounded(input: &str) -> Result<Self> {
        Self::parse(input, true)
    }

    /// Display sub-fields for this value
    #[must_use]
    pub fn to_display(&self, mode: FormatMode) -> DisplayTime {
        decode(Some(&self.to_string()), mode)
    }

    /// Build from display sub-fields; `None` when they are cleared.
    pub fn from_display(display: &DisplayTime, mode: FormatMode) -> Option<Self> {
        encode(display, mode).and_then(|canonical| Self::parse_unbounded(&canonical).ok())
    }

    fn parse(input: &str, unbounded: bool) -> Result<Self> {
        let parts: Vec<&str> = input.trim().split(':').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(TimeInputError::invalid_canonical(input, "expected HH:MM or HH:MM:SS"));
        }

        let mut values = [0_u32; 3];
        for (slot, part) in values.iter_mut().zip(&parts) {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(TimeInputError::invalid_canonical(
                    input,
                    format!("component '{part}' is not a number"),
                ));
            }
            *slot = part.parse().map_err(|_| {
                TimeInputError::invalid_canonical(input, format!("component '{part}' is too large"))
            })?;
        }

        let [hours, minutes, seconds] = values;
        let time = Self {
            hours,
            minutes,
            seconds,
        };
        time.check(unbounded)
            .map_err(|_| TimeInputError::invalid_canonical(input, "component out of range"))?;
        Ok(time)
    }

    fn check(&self, unbounded: bool) -> Result<()> {
        if !unbounded && self.hours > 23 {
            return Err(TimeInputError::invalid_canonical(self.to_string(), "hour must be 0-23"));
        }
        if self.minutes > 59 {
            return Err(TimeInputError::invalid_canonical(self.to_string(), "minute must be 0-59"));
        }
        if self.seconds > 59 {
            return Err(TimeInputError::invalid_canonical(self.to_string(), "second must be 0-59"));
        }
        Ok(())
    }
}

impl FromStr for CanonicalTime {
    type Err = TimeInputError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s, false)
    }
}

impl TryFrom<String> for CanonicalTime {
    type Error = TimeInputError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value, false)
    }
}

impl From<CanonicalTime> for String {
    fn from(time: CanonicalTime) -> Self {
        time.to_string()
    }
}

impl fmt::Display for CanonicalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    const TWELVE: FormatMode = FormatMode::TwelveHour;
    const TWENTY_FOUR: FormatMode = FormatMode::TwentyFourHour;

    fn shown(hours: u32, meridiem: Meridiem) -> DisplayTime {
        DisplayTime {
            hours: Some(hours),
            minutes: Some(0),
            seconds: Some(0),
            meridiem,
            ..DisplayTime::default()
        }
    }

    #[rstest]
    #[case("00:00:00", 12, Meridiem::Am)]
    #[case("01:00:00", 1, Meridiem::Am)]
    #[case("11:00:00", 11, Meridiem::Am)]
    #[case("12:00:00", 12, Meridiem::Pm)]
    #[case("13:00:00", 1, Meridiem::Pm)]
    #[case("23:00:00", 11, Meridiem::Pm)]
    fn decode_twelve_hour(#[case] canonical: &str, #[case] hours: u32, #[case] meridiem: Meridiem) {
        assert_eq!(decode(Some(canonical), TWELVE), shown(hours, meridiem));
    }

    #[rstest]
    #[case(12, Meridiem::Am, "00:00:00")]
    #[case(12, Meridiem::Pm, "12:00:00")]
    #[case(1, Meridiem::Pm, "13:00:00")]
    #[case(11, Meridiem::Am, "11:00:00")]
    fn encode_twelve_hour(#[case] hours: u32, #[case] meridiem: Meridiem, #[case] expected: &str) {
        assert_eq!(encode(&shown(hours, meridiem), TWELVE).as_deref(), Some(expected));
    }

    #[test]
    fn twenty_four_hour_ignores_meridiem() {
        let display = decode(Some("18:45:07"), TWENTY_FOUR);
        assert_eq!(display.hours, Some(18));
        let with_pm = DisplayTime {
            meridiem: Meridiem::Pm,
            ..display
        };
        assert_eq!(encode(&with_pm, TWENTY_FOUR).as_deref(), Some("18:45:07"));
    }

    #[test]
    fn missing_components_decode_as_empty() {
        let display = decode(Some("09:15"), TWENTY_FOUR);
        assert_eq!(display.hours, Some(9));
        assert_eq!(display.minutes, Some(15));
        assert_eq!(display.seconds, None);
        assert_eq!(encode(&display, TWENTY_FOUR).as_deref(), Some("09:15:00"));

        assert_eq!(decode(None, TWELVE), DisplayTime::default());
        assert_eq!(decode(Some("ab:cd"), TWENTY_FOUR), DisplayTime::default());
    }

    #[test]
    fn cleared_fields_encode_to_none() {
        assert_eq!(encode(&DisplayTime::default(), TWELVE), None);

        // Days and milliseconds alone do not make a value.
        let display = DisplayTime {
            days: Some(2),
            milliseconds: Some(500),
            ..DisplayTime::default()
        };
        assert_eq!(encode(&display, TWENTY_FOUR), None);
    }

    #[test]
    fn partial_entry_fills_zeros() {
        let display = DisplayTime {
            minutes: Some(5),
            meridiem: Meridiem::Pm,
            ..DisplayTime::default()
        };
        assert_eq!(encode(&display, TWELVE).as_deref(), Some("12:05:00"));
        assert_eq!(encode(&display, TWENTY_FOUR).as_deref(), Some("00:05:00"));
    }

    #[test]
    fn unbounded_hours_pass_through() {
        let display = DisplayTime {
            hours: Some(30),
            ..DisplayTime::default()
        };
        assert_eq!(encode(&display, TWENTY_FOUR).as_deref(), Some("30:00:00"));
        assert_eq!(decode(Some("30:00:00"), TWENTY_FOUR).hours, Some(30));
    }

    #[rstest]
    #[case("7:05", CanonicalTime { hours: 7, minutes: 5, seconds: 0 })]
    #[case(" 23:59:59 ", CanonicalTime { hours: 23, minutes: 59, seconds: 59 })]
    fn canonical_parses(#[case] input: &str, #[case] expected: CanonicalTime) {
        assert_eq!(input.parse::<CanonicalTime>().unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("12")]
    #[case("12:00:00:00")]
    #[case("24:00")]
    #[case("12:60")]
    #[case("12:00:60")]
    #[case("-1:00")]
    #[case("1.5:00")]
    #[case("aa:bb")]
    fn canonical_rejects(#[case] input: &str) {
        let err = input.parse::<CanonicalTime>().unwrap_err();
        assert!(matches!(err, TimeInputError::InvalidCanonical { .. }));
    }

    #[test]
    fn canonical_serializes_as_string() {
        let time = CanonicalTime::new(8, 30, 0).unwrap();
        assert_eq!(serde_json::to_string(&time).unwrap(), "\"08:30:00\"");
        let back: CanonicalTime = serde_json::from_str("\"08:30:00\"").unwrap();
        assert_eq!(back, time);
        assert!(serde_json::from_str::<CanonicalTime>("\"08:75:00\"").is_err());
        assert!(serde_json::from_str::<CanonicalTime>("\"24:00:00\"").is_err());
        assert!(serde_json::from_str::<CanonicalTime>("\"25:00:00\"").is_err());
        assert!(CanonicalTime::parse_unbounded("25:00:00").is_ok());
    }

    #[test]
    fn canonical_display_bridge() {
        let time = CanonicalTime::new(0, 15, 0).unwrap();
        let display = time.to_display(TWELVE);
        assert_eq!((display.hours, display.meridiem), (Some(12), Meridiem::Am));
        assert_eq!(CanonicalTime::from_display(&display, TWELVE), Some(time));
        assert_eq!(CanonicalTime::from_display(&DisplayTime::default(), TWELVE), None);
    }

    #[rstest]
    #[case("am", Ok(Meridiem::Am))]
    #[case(" PM ", Ok(Meridiem::Pm))]
    #[case("noon", Err(()))]
    fn meridiem_parses(#[case] input: &str, #[case] expected: std::result::Result<Meridiem, ()>) {
        assert_eq!(input.parse::<Meridiem>(), expected);
    }

    fn mode_strategy() -> impl Strategy<Value = FormatMode> {
        prop_oneof![Just(TWELVE), Just(TWENTY_FOUR)]
    }

    proptest! {
        #[test]
        fn encode_inverts_decode(
            h in 0u32..24,
            m in 0u32..60,
            s in 0u32..60,
            mode in mode_strategy(),
        ) {
            let canonical = format!("{h:02}:{m:02}:{s:02}");
            let display = decode(Some(&canonical), mode);
            prop_assert_eq!(encode(&display, mode), Some(canonical.clone()));
            prop_assert_eq!(decode(encode(&display, mode).as_deref(), mode), display);
        }

        #[test]
        fn twelve_hour_display_stays_in_range(h in 0u32..24, m in 0u32..60) {
            let display = decode(Some(&format!("{h:02}:{m:02}:00")), TWELVE);
            let shown_hour = display.hours.unwrap();
            prop_assert!((1..=12).contains(&shown_hour));
            prop_assert_eq!(display.meridiem, Meridiem::of_hour(h));
        }
    }
}
