//! 12/24-hour format detection.
//!
//! Detection is anchored to how a locale actually renders a known hour: the
//! injected [`HourFormatter`] formats 22:00:00 on a fixed reference date, and
//! if the result contains `"10"` the locale uses the 12-hour clock.
//!
//! [`FormatDetector`] memoizes the result per distinct [`LocaleConfig`] so the
//! formatter is consulted once per descriptor.

use std::collections::HashMap;
use std::fmt;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::config::{LocaleConfig, TimeFormat};
use crate::error::Result;

/// Locale used when neither an override nor the environment names one.
pub const FALLBACK_LOCALE: &str = "en-US";

/// Most descriptors a [`FormatDetector`] remembers before starting over.
pub const MAX_CACHED_CONFIGS: usize = 64;

/// Hour convention used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatMode {
    /// Hours 1-12 with an AM/PM indicator
    TwelveHour,
    /// Hours 0-23
    TwentyFourHour,
}

impl FormatMode {
    /// Whether the meridiem indicator is shown
    #[must_use]
    pub fn is_twelve_hour(self) -> bool {
        matches!(self, Self::TwelveHour)
    }
}

impl fmt::Display for FormatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TwelveHour => f.write_str("twelve_hour"),
            Self::TwentyFourHour => f.write_str("twenty_four_hour"),
        }
    }
}

/// Capability to render the reference instant (22:00:00) in a locale.
///
/// Unknown or unsupported tags should be reported as errors; detection does
/// not mask them.
pub trait HourFormatter {
    /// Format 22:00:00 on a fixed reference date using `locale`'s time format.
    fn format_reference_hour(&self, locale: &str) -> Result<String>;
}

impl<F> HourFormatter for F
where
    F: Fn(&str) -> Result<String>,
{
    fn format_reference_hour(&self, locale: &str) -> Result<String> {
        self(locale)
    }
}

/// Decide the format mode for `config` without caching.
///
/// `system_locale` is only consulted for [`TimeFormat::System`].
pub fn detect_format<F>(
    config: &LocaleConfig,
    formatter: &F,
    system_locale: &str,
) -> Result<FormatMode>
where
    F: HourFormatter + ?Sized,
{
    match config.time_format {
        TimeFormat::Language => probe_locale(formatter, &config.language),
        TimeFormat::System => probe_locale(formatter, system_locale),
        TimeFormat::AmPm => Ok(FormatMode::TwelveHour),
        TimeFormat::TwentyFour => Ok(FormatMode::TwentyFourHour),
    }
}

fn probe_locale<F>(formatter: &F, locale: &str) -> Result<FormatMode>
where
    F: HourFormatter + ?Sized,
{
    let rendered = formatter.format_reference_hour(locale)?;
    let mode = if rendered.contains("10") {
        FormatMode::TwelveHour
    } else {
        FormatMode::TwentyFourHour
    };
    tracing::debug!(locale, rendered = %rendered, %mode, "probed locale hour format");
    Ok(mode)
}

/// Memoizing format detector.
///
/// Results are kept per distinct [`LocaleConfig`]. Once
/// [`MAX_CACHED_CONFIGS`] descriptors are held the cache is emptied before
/// the next insert.
///
/// # Examples
///
/// ```
/// use settings_ui_time::config::{LocaleConfig, TimeFormat};
/// use settings_ui_time::format::{FormatDetector, FormatMode};
///
/// let detector = FormatDetector::new(|locale: &str| -> settings_ui_time::Result<String> {
///     Ok(if locale.starts_with("en") { "10:00 PM" } else { "22:00" }.to_string())
/// });
///
/// let config = LocaleConfig::new(TimeFormat::Language, "de-DE");
/// assert_eq!(detector.detect(&config)?, FormatMode::TwentyFourHour);
/// # Ok::<(), settings_ui_time::TimeInputError>(())
/// ```
pub struct FormatDetector<F> {
    formatter: F,
    system_locale: String,
    cache: Mutex<HashMap<LocaleConfig, FormatMode>>,
}

impl<F> fmt::Debug for FormatDetector<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatDetector")
            .field("system_locale", &self.system_locale)
            .field("cached", &self.cached_len())
            .finish()
    }
}

impl<F: HourFormatter> FormatDetector<F> {
    /// Create a detector; the system locale is read from the environment.
    pub fn new(formatter: F) -> Self {
        Self {
            formatter,
            system_locale: system_locale_from_env(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Override the system locale. Clears the cache.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_system_locale(mut self, locale: impl Into<String>) -> Self {
        self.system_locale = locale.into();
        self.cache.get_mut().clear();
        self
    }

    /// The locale used for [`TimeFormat::System`].
    #[must_use]
    pub fn system_locale(&self) -> &str {
        &self.system_locale
    }

    /// Decide the format mode for `config`, reusing earlier results.
    ///
    /// Formatting errors are returned and not cached.
    pub fn detect(&self, config: &LocaleConfig) -> Result<FormatMode> {
        let cached = self.cache.lock().get(config).copied();
        if let Some(mode) = cached {
            tracing::trace!(
                format = %config.time_format,
                language = %config.language,
                "format cache hit"
            );
            return Ok(mode);
        }

        let mode = detect_format(config, &self.formatter, &self.system_locale)?;
        {
            let mut cache = self.cache.lock();
            if cache.len() >= MAX_CACHED_CONFIGS {
                tracing::debug!(evicted = cache.len(), "format cache full, starting over");
                cache.clear();
            }
            cache.insert(config.clone(), mode);
        }
        tracing::debug!(
            format = %config.time_format,
            language = %config.language,
            %mode,
            "detected time format"
        );
        Ok(mode)
    }
}

impl<F> FormatDetector<F> {
    /// Number of memoized descriptors
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache.lock().len()
    }

    /// Forget all memoized results
    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }
}

/// Resolve the system locale from `LC_ALL`, `LC_TIME` and `LANG`.
pub fn system_locale_from_env() -> String {
    let read = |key: &str| std::env::var(key).ok();
    locale_from_env_values(
        read("LC_ALL").as_deref(),
        read("LC_TIME").as_deref(),
        read("LANG").as_deref(),
    )
}

/// Pick the first non-empty POSIX locale value and turn it into a tag.
///
/// `de_DE.UTF-8@euro` becomes `de-DE`; `C` and `POSIX` map to
/// [`FALLBACK_LOCALE`].
pub fn locale_from_env_values(
    lc_all: Option<&str>,
    lc_time: Option<&str>,
    lang: Option<&str>,
) -> String {
    let raw = [lc_all, lc_time, lang]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty());

    let Some(raw) = raw else {
        return FALLBACK_LOCALE.to_string();
    };

    let base = raw
        .split(['.', '@'])
        .next()
        .unwrap_or_default();
    if base.is_empty() || base == "C" || base == "POSIX" {
        return FALLBACK_LOCALE.to_string();
    }
    base.replace('_', "-")
}

#[cfg(feature = "chrono-locales")]
pub use chrono_backend::ChronoHourFormatter;

#[cfg(feature = "chrono-locales")]
mod chrono_backend {
    use std::fmt::Write as _;

    use chrono::{Locale, NaiveDate};

    use super::HourFormatter;
    use crate::error::{Result, TimeInputError};

    /// [`HourFormatter`] backed by chrono's locale tables.
    ///
    /// Accepts `en-US`, `en_US` or a bare language such as `de`, which is
    /// expanded to its most common region.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct ChronoHourFormatter;

    impl HourFormatter for ChronoHourFormatter {
        fn format_reference_hour(&self, locale: &str) -> Result<String> {
            let resolved =
                resolve_locale(locale).ok_or_else(|| TimeInputError::unknown_locale(locale))?;
            let reference = NaiveDate::from_ymd_opt(2020, 1, 1)
                .and_then(|date| date.and_hms_opt(22, 0, 0))
                .ok_or_else(|| TimeInputError::locale_format(locale, "invalid reference instant"))?
                .and_utc();

            let mut rendered = String::new();
            write!(rendered, "{}", reference.format_localized("%X", resolved)).map_err(|_| {
                TimeInputError::locale_format(locale, "locale time pattern is invalid")
            })?;
            Ok(rendered)
        }
    }

    fn resolve_locale(tag: &str) -> Option<Locale> {
        let normalized = tag.trim().replace('-', "_");
        let mut segments = normalized.split('_');
        let language = segments.next()?.to_ascii_lowercase();
        if language.is_empty() {
            return None;
        }
        let region = segments
            .rfind(|segment| segment.len() == 2)
            .map(str::to_ascii_uppercase);

        let candidates = match region {
            Some(region) => vec![format!("{language}_{region}")],
            None => vec![
                language.clone(),
                format!("{language}_{}", default_region(&language)),
                format!("{language}_{}", language.to_ascii_uppercase()),
            ],
        };
        candidates
            .iter()
            .find_map(|candidate| Locale::try_from(candidate.as_str()).ok())
    }

    fn default_region(language: &str) -> &'static str {
        match language {
            "en" => "US",
            "ar" => "SA",
            "ca" => "ES",
            "cs" => "CZ",
            "da" => "DK",
            "el" => "GR",
            "et" => "EE",
            "fa" => "IR",
            "he" => "IL",
            "hi" => "IN",
            "ja" => "JP",
            "ko" => "KR",
            "nb" => "NO",
            "sl" => "SI",
            "sv" => "SE",
            "uk" => "UA",
            "vi" => "VN",
            "zh" => "CN",
            _ => "",
        }
    }
}
