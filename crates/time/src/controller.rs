//! State of one time input.
//!
//! [`TimeInputController`] owns the displayed sub-fields and the active
//! [`FormatMode`]. Field edits coming from the rendering layer are sanitized,
//! re-encoded and, when the canonical value actually changes, reported back
//! as a [`TimeChange`]. Values and locale changes pushed by the owner update
//! the fields without reporting anything, so the owner never sees its own
//! writes echoed back.
//!
//! ```
//! use settings_ui_time::config::TimeInputOptions;
//! use settings_ui_time::controller::{TimeChange, TimeInputController};
//! use settings_ui_time::format::FormatMode;
//!
//! let mut input = TimeInputController::new(TimeInputOptions::default(), FormatMode::TwelveHour);
//! input.set_value(Some("13:30:00"));
//! assert_eq!(input.display().hours, Some(1));
//!
//! let change = input.handle_raw_edit("am_pm", "AM");
//! assert_eq!(change, Some(TimeChange::Set("01:30:00".to_string())));
//! ```

use serde::{Deserialize, Serialize};

use crate::codec::{DisplayTime, Meridiem, decode, encode};
use crate::config::{LocaleConfig, TimeInputOptions};
use crate::error::Result;
use crate::format::{FormatDetector, FormatMode, HourFormatter};
use crate::sanitize::{FieldSanitizer, TimeField, pad_field};

/// Change notification for the owning application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TimeChange {
    /// A new canonical `HH:MM:SS` value
    Set(String),
    /// The value was removed
    Cleared,
}

impl TimeChange {
    /// The new canonical value, `None` when cleared
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Set(value) => Some(value),
            Self::Cleared => None,
        }
    }
}

impl From<Option<String>> for TimeChange {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Cleared, Self::Set)
    }
}

/// What the rendering layer should show.
///
/// Numeric fields are zero-padded; an empty field renders as `""`. Fields
/// the input does not enable are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedFields {
    /// Days, when enabled
    pub days: Option<String>,
    /// Hours
    pub hours: String,
    /// Minutes
    pub minutes: String,
    /// Seconds, when enabled
    pub seconds: Option<String>,
    /// Milliseconds, when enabled
    pub milliseconds: Option<String>,
    /// AM/PM selector, only in 12-hour mode
    pub meridiem: Option<Meridiem>,
    /// Whether a value must be present
    pub required: bool,
    /// Whether editing is disabled
    pub disabled: bool,
    /// Whether the clear action should be offered
    pub clearable: bool,
}

/// Rendering collaborator.
///
/// The controller never draws anything itself; it hands the current field
/// strings to whatever renders them.
pub trait FieldRenderer {
    /// Show the given fields.
    fn render(&mut self, fields: &RenderedFields);
}

/// Sub-field state of one time input.
#[derive(Debug, Clone)]
pub struct TimeInputController {
    options: TimeInputOptions,
    mode: FormatMode,
    sanitizer: FieldSanitizer,
    display: DisplayTime,
    value: Option<String>,
}

impl TimeInputController {
    /// Create an empty input using `mode`.
    #[must_use]
    pub fn new(options: TimeInputOptions, mode: FormatMode) -> Self {
        Self {
            options,
            mode,
            sanitizer: FieldSanitizer::new(mode, options.no_hours_limit),
            display: DisplayTime::default(),
            value: None,
        }
    }

    /// Create an empty input whose mode is detected from `config`.
    pub fn from_config<F: HourFormatter>(
        options: TimeInputOptions,
        config: &LocaleConfig,
        detector: &FormatDetector<F>,
    ) -> Result<Self> {
        Ok(Self::new(options, detector.detect(config)?))
    }

    /// Active hour convention
    #[must_use]
    pub fn mode(&self) -> FormatMode {
        self.mode
    }

    /// Field options
    #[must_use]
    pub fn options(&self) -> &TimeInputOptions {
        &self.options
    }

    /// Current sub-field values
    #[must_use]
    pub fn display(&self) -> &DisplayTime {
        &self.display
    }

    /// Last canonical value known to both sides
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Whether `field` is shown by this input
    #[must_use]
    pub fn is_enabled(&self, field: TimeField) -> bool {
        match field {
            TimeField::Days => self.options.enable_day,
            TimeField::Hours | TimeField::Minutes => true,
            TimeField::Seconds => self.options.enable_second,
            TimeField::Milliseconds => self.options.enable_millisecond,
        }
    }

    /// Accept a value pushed by the owner. Never reports a change.
    ///
    /// Days and milliseconds are not part of the canonical value and are
    /// kept, unless the owner removes the value altogether.
    pub fn set_value(&mut self, canonical: Option<&str>) {
        let decoded = decode(canonical, self.mode);
        self.display = if canonical.is_some() {
            DisplayTime {
                days: self.display.days,
                milliseconds: self.display.milliseconds,
                ..decoded
            }
        } else {
            decoded
        };
        self.value = encode(&self.display, self.mode);
        tracing::trace!(value = ?self.value, "time input value set by owner");
    }

    /// Switch the hour convention and re-derive the fields. Never reports a
    /// change.
    pub fn set_mode(&mut self, mode: FormatMode) {
        if mode == self.mode {
            return;
        }
        let DisplayTime {
            days, milliseconds, ..
        } = self.display;
        self.mode = mode;
        self.sanitizer = FieldSanitizer::new(mode, self.options.no_hours_limit);
        self.display = DisplayTime {
            days,
            milliseconds,
            ..decode(self.value.as_deref(), mode)
        };
        tracing::debug!(%mode, "time input format changed");
    }

    /// Re-detect the hour convention for a new locale descriptor.
    ///
    /// Locale formatting failures are returned unchanged and leave the
    /// input as it was.
    pub fn apply_config<F: HourFormatter>(
        &mut self,
        config: &LocaleConfig,
        detector: &FormatDetector<F>,
    ) -> Result<()> {
        let mode = detector.detect(config)?;
        self.set_mode(mode);
        Ok(())
    }

    /// Apply a raw edit event from the rendering layer.
    ///
    /// `name` is a field name (`hours`, `minutes`, ...) or `am_pm`. Unknown
    /// names are ignored.
    pub fn handle_raw_edit(&mut self, name: &str, raw: &str) -> Option<TimeChange> {
        match name {
            "am_pm" | "meridiem" => match raw.parse::<Meridiem>() {
                Ok(meridiem) => self.set_meridiem(meridiem),
                Err(()) => {
                    tracing::debug!(raw, "unrecognised meridiem ignored");
                    None
                }
            },
            _ => match name.parse::<TimeField>() {
                Ok(field) => self.handle_edit(field, raw),
                Err(()) => {
                    tracing::debug!(name, "edit for unknown field ignored");
                    None
                }
            },
        }
    }

    /// Apply an edit to one numeric sub-field.
    pub fn handle_edit(&mut self, field: TimeField, raw: &str) -> Option<TimeChange> {
        if self.options.disabled {
            tracing::debug!(%field, "edit on disabled time input ignored");
            return None;
        }
        if !self.is_enabled(field) {
            tracing::debug!(%field, "edit for hidden field ignored");
            return None;
        }
        let previous = self.display.field(field);
        let next = self.sanitizer.sanitize(field, raw, previous);
        self.display.set_field(field, next);
        self.commit()
    }

    /// Switch between AM and PM. Ignored in 24-hour mode.
    pub fn set_meridiem(&mut self, meridiem: Meridiem) -> Option<TimeChange> {
        if self.options.disabled || !self.mode.is_twelve_hour() {
            tracing::debug!(%meridiem, "meridiem edit ignored");
            return None;
        }
        self.display.meridiem = meridiem;
        self.commit()
    }

    /// Empty every field and report the value as cleared.
    ///
    /// Does nothing on a required or disabled input.
    pub fn clear(&mut self) -> Option<TimeChange> {
        if !self.options.clearable() {
            tracing::debug!(
                required = self.options.required,
                disabled = self.options.disabled,
                "clear refused"
            );
            return None;
        }
        self.display = DisplayTime::default();
        self.value = None;
        tracing::debug!("time input cleared");
        Some(TimeChange::Cleared)
    }

    /// Current fields as strings for the renderer.
    #[must_use]
    pub fn rendered(&self) -> RenderedFields {
        let text = |field: TimeField| {
            self.display
                .field(field)
                .map(|value| pad_field(field, value))
                .unwrap_or_default()
        };
        let optional = |field: TimeField| self.is_enabled(field).then(|| text(field));

        RenderedFields {
            days: optional(TimeField::Days),
            hours: text(TimeField::Hours),
            minutes: text(TimeField::Minutes),
            seconds: optional(TimeField::Seconds),
            milliseconds: optional(TimeField::Milliseconds),
            meridiem: self.mode.is_twelve_hour().then_some(self.display.meridiem),
            required: self.options.required,
            disabled: self.options.disabled,
            clearable: self.options.clearable(),
        }
    }

    /// Hand the current fields to `renderer`.
    pub fn render_into<R: FieldRenderer + ?Sized>(&self, renderer: &mut R) {
        renderer.render(&self.rendered());
    }

    fn commit(&mut self) -> Option<TimeChange> {
        let next = encode(&self.display, self.mode);
        if next == self.value {
            tracing::trace!(value = ?next, "time input unchanged");
            return None;
        }
        self.value.clone_from(&next);
        tracing::debug!(value = ?next, "time input changed");
        Some(TimeChange::from(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn twelve_hour() -> TimeInputController {
        TimeInputController::new(
            TimeInputOptions::builder().enable_second(true).build(),
            FormatMode::TwelveHour,
        )
    }

    #[test]
    fn owner_value_updates_fields_silently() {
        let mut input = twelve_hour();
        input.set_value(Some("00:15:30"));
        assert_eq!(input.display().hours, Some(12));
        assert_eq!(input.display().meridiem, Meridiem::Am);
        assert_eq!(input.value(), Some("00:15:30"));
    }

    #[test]
    fn edits_emit_canonical_value() {
        let mut input = twelve_hour();
        assert_eq!(
            input.handle_edit(TimeField::Hours, "7"),
            Some(TimeChange::Set("07:00:00".into()))
        );
        assert_eq!(
            input.handle_edit(TimeField::Minutes, "45"),
            Some(TimeChange::Set("07:45:00".into()))
        );
        assert_eq!(
            input.set_meridiem(Meridiem::Pm),
            Some(TimeChange::Set("19:45:00".into()))
        );
    }

    #[test]
    fn unchanged_value_is_not_reported_twice() {
        let mut input = twelve_hour();
        assert!(input.handle_edit(TimeField::Hours, "9").is_some());
        assert_eq!(input.handle_edit(TimeField::Hours, "9"), None);
        assert_eq!(input.handle_edit(TimeField::Hours, "09.4"), None);
    }

    #[test]
    fn non_numeric_edit_keeps_previous_value() {
        let mut input = twelve_hour();
        input.set_value(Some("08:30:00"));
        assert_eq!(input.handle_edit(TimeField::Minutes, "half"), None);
        assert_eq!(input.display().minutes, Some(30));
    }

    #[test]
    fn owner_value_keeps_days_and_milliseconds() {
        let options = TimeInputOptions::builder()
            .enable_day(true)
            .enable_millisecond(true)
            .no_hours_limit(true)
            .build();
        let mut input = TimeInputController::new(options, FormatMode::TwentyFourHour);
        input.handle_edit(TimeField::Days, "3");
        input.handle_edit(TimeField::Milliseconds, "250");

        input.set_value(Some("30:15:00"));
        assert_eq!(input.display().days, Some(3));
        assert_eq!(input.display().milliseconds, Some(250));
        assert_eq!(input.display().hours, Some(30));

        input.set_value(None);
        assert_eq!(input.display(), &DisplayTime::default());
    }

    #[test]
    fn clear_resets_and_reports() {
        let mut input = twelve_hour();
        input.set_value(Some("08:30:00"));
        assert_eq!(input.clear(), Some(TimeChange::Cleared));
        assert_eq!(input.display(), &DisplayTime::default());
        assert_eq!(input.value(), None);
    }

    #[test]
    fn emptying_all_fields_reports_cleared() {
        let mut input = twelve_hour();
        input.set_value(Some("08:30:00"));
        assert!(input.handle_edit(TimeField::Hours, "").is_some());
        assert!(input.handle_edit(TimeField::Minutes, "").is_some());
        assert_eq!(input.handle_edit(TimeField::Seconds, ""), Some(TimeChange::Cleared));
    }

    #[test]
    fn change_serializes_with_kind_tag() {
        let json = serde_json::to_string(&TimeChange::Set("01:02:03".into())).unwrap();
        assert_eq!(json, r#"{"kind":"set","value":"01:02:03"}"#);
        let json = serde_json::to_string(&TimeChange::Cleared).unwrap();
        assert_eq!(json, r#"{"kind":"cleared"}"#);
    }
}
