//! Select (dropdown) control state.
//!
//! Option labels are resolved through a [`Translator`]. When the owner
//! reports that translations changed, labels are resolved again and the
//! menu width recomputed. [`spawn_translation_listener`] wires this to a
//! [`TranslationSubscription`], debouncing bursts of updates so the options
//! are laid out once per burst.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use settings_ui_runtime::{Debouncer, TranslationSubscription, TranslationsUpdated};
use tokio::task::JoinHandle;

/// Default window for collapsing translation updates.
pub const RELAYOUT_DEBOUNCE: Duration = Duration::from_millis(500);

/// One selectable entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Value reported when the option is chosen
    pub value: String,
    /// Translation key of the visible label
    pub label_key: String,
}

impl SelectOption {
    /// Create an option
    pub fn new(value: impl Into<String>, label_key: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label_key: label_key.into(),
        }
    }
}

/// Resolves translation keys to labels.
pub trait Translator {
    /// The label for `key`, or `None` when there is no translation.
    fn translate(&self, key: &str) -> Option<String>;
}

impl<F> Translator for F
where
    F: Fn(&str) -> Option<String>,
{
    fn translate(&self, key: &str) -> Option<String> {
        self(key)
    }
}

/// Change notification for the owning application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SelectChange {
    /// An option was chosen
    Selected(String),
    /// The selection was removed
    Cleared,
}

/// State of one select control.
///
/// # Examples
///
/// ```
/// use settings_ui_controls::select::{SelectChange, SelectController, SelectOption};
///
/// let mut select = SelectController::new(
///     vec![SelectOption::new("c", "unit.celsius"), SelectOption::new("f", "unit.fahrenheit")],
///     false,
/// );
/// select.relayout(&|key: &str| (key == "unit.celsius").then(|| "Celsius".to_string()));
///
/// assert_eq!(select.labels(), ["Celsius", "unit.fahrenheit"]);
/// assert_eq!(select.select("c"), Some(SelectChange::Selected("c".into())));
/// assert_eq!(select.select("c"), None);
/// ```
#[derive(Debug, Clone)]
pub struct SelectController {
    options: Vec<SelectOption>,
    labels: Vec<String>,
    value: Option<String>,
    required: bool,
    layouts: u64,
}

impl SelectController {
    /// Create a select; labels start out as the raw keys.
    #[must_use]
    pub fn new(options: Vec<SelectOption>, required: bool) -> Self {
        let labels = options.iter().map(|option| option.label_key.clone()).collect();
        Self {
            options,
            labels,
            value: None,
            required,
            layouts: 0,
        }
    }

    /// Available options
    #[must_use]
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Resolved labels, parallel to [`options`](Self::options)
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Currently selected value
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Label of the selected option
    #[must_use]
    pub fn selected_label(&self) -> Option<&str> {
        let value = self.value.as_deref()?;
        self.position(value).map(|index| self.labels[index].as_str())
    }

    /// Width of the widest label in characters
    #[must_use]
    pub fn menu_width(&self) -> usize {
        self.labels
            .iter()
            .map(|label| label.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// How many times the options have been laid out
    #[must_use]
    pub fn layout_count(&self) -> u64 {
        self.layouts
    }

    /// Accept a value pushed by the owner. Never reports a change.
    pub fn set_value(&mut self, value: Option<&str>) {
        self.value = value.map(str::to_string);
    }

    /// Choose an option. Unknown values and re-selecting the current value
    /// report nothing.
    pub fn select(&mut self, value: &str) -> Option<SelectChange> {
        if self.position(value).is_none() {
            tracing::debug!(value, "selection of unknown option ignored");
            return None;
        }
        if self.value.as_deref() == Some(value) {
            return None;
        }
        self.value = Some(value.to_string());
        tracing::debug!(value, "select changed");
        Some(SelectChange::Selected(value.to_string()))
    }

    /// Remove the selection. Does nothing when required or already empty.
    pub fn clear(&mut self) -> Option<SelectChange> {
        if self.required || self.value.is_none() {
            return None;
        }
        self.value = None;
        Some(SelectChange::Cleared)
    }

    /// Resolve every label again; returns how many labels changed.
    pub fn relayout<T: Translator + ?Sized>(&mut self, translator: &T) -> usize {
        let mut changed = 0;
        for (option, label) in self.options.iter().zip(self.labels.iter_mut()) {
            let next = translator
                .translate(&option.label_key)
                .unwrap_or_else(|| option.label_key.clone());
            if *label != next {
                *label = next;
                changed += 1;
            }
        }
        self.layouts += 1;
        tracing::trace!(changed, width = self.menu_width(), "select options laid out");
        changed
    }

    fn position(&self, value: &str) -> Option<usize> {
        self.options.iter().position(|option| option.value == value)
    }
}

/// Re-lay-out `controller` whenever `subscription` reports new translations.
///
/// Updates arriving within `window` of each other collapse into one
/// relayout. The task ends when the translation bus is dropped; a relayout
/// still pending at that point is discarded.
pub fn spawn_translation_listener<T>(
    controller: Arc<Mutex<SelectController>>,
    mut subscription: TranslationSubscription,
    translator: T,
    window: Duration,
) -> settings_ui_runtime::Result<JoinHandle<()>>
where
    T: Translator + Send + Sync + 'static,
{
    let relayout = Debouncer::new(window, move |update: TranslationsUpdated| {
        let changed = controller.lock().relayout(&translator);
        tracing::debug!(language = %update.language, changed, "select relabelled");
    })?;

    Ok(tokio::spawn(async move {
        while let Some(update) = subscription.recv().await {
            relayout.call(update);
        }
    }))
}
