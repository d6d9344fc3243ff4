//! Settings model for the analyzer.
//!
//! The editor host sends a configuration section as JSON; this module
//! deserializes it with per-field defaults so a partially-filled or
//! malformed section never disables the analyzer outright.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default debounce interval between the last keystroke and validation.
pub const DEFAULT_DEBOUNCE_MS: i64 = 500;

/// Default file-size cap in bytes. `0` means uncapped.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_000_000;

/// When validation runs relative to editing activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RunMode {
    /// Validate after edits, debounced.
    #[default]
    OnType,
    /// Validate only on save.
    OnSave,
}

/// Rule-engine selection overrides, under the `axe` settings key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxeSettings {
    /// Explicit rule-id allow-list. Takes precedence over tags.
    #[serde(default)]
    pub rules: Option<Vec<String>>,
    /// Guideline tag allow-list. When absent, a fixed WCAG/best-practice
    /// tag set applies.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Process-wide analyzer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinterSettings {
    /// Global enable flag.
    #[serde(default = "default_enable")]
    pub enable: bool,
    /// Validation trigger mode.
    #[serde(default)]
    pub run: RunMode,
    /// Debounce interval in milliseconds. Negative values fall back to
    /// [`DEFAULT_DEBOUNCE_MS`] during [`LinterSettings::normalize`].
    #[serde(default = "default_debounce_delay")]
    pub debounce_delay: i64,
    /// File-size cap in bytes; `0` disables the cap.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Editor language ids eligible for validation.
    #[serde(default = "default_included_languages")]
    pub included_languages: Vec<String>,
    /// Rule selection overrides.
    #[serde(default)]
    pub axe: AxeSettings,
}

const fn default_enable() -> bool {
    true
}

const fn default_debounce_delay() -> i64 {
    DEFAULT_DEBOUNCE_MS
}

const fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

fn default_included_languages() -> Vec<String> {
    vec!["html".to_string(), "php".to_string()]
}

impl Default for LinterSettings {
    fn default() -> Self {
        Self {
            enable: default_enable(),
            run: RunMode::default(),
            debounce_delay: default_debounce_delay(),
            max_file_size: default_max_file_size(),
            included_languages: default_included_languages(),
            axe: AxeSettings::default(),
        }
    }
}

impl LinterSettings {
    /// Clamp out-of-range values to their defaults.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.debounce_delay < 0 {
            tracing::warn!(
                debounce_delay = self.debounce_delay,
                "negative debounceDelay, using default"
            );
            self.debounce_delay = DEFAULT_DEBOUNCE_MS;
        }
        self
    }

    /// The debounce interval as a [`Duration`].
    ///
    /// Normalized settings are non-negative; a stray negative value still
    /// resolves to [`DEFAULT_DEBOUNCE_MS`] rather than panicking.
    #[must_use]
    pub fn debounce_duration(&self) -> Duration {
        let millis =
            u64::try_from(self.debounce_delay).unwrap_or(DEFAULT_DEBOUNCE_MS.unsigned_abs());
        Duration::from_millis(millis)
    }

    /// Whether a document with this editor language id may be validated.
    #[must_use]
    pub fn includes_language(&self, language_id: &str) -> bool {
        self.included_languages.iter().any(|id| id == language_id)
    }

    /// Whether a document of `byte_len` bytes passes the size gate.
    #[must_use]
    pub const fn within_size_cap(&self, byte_len: u64) -> bool {
        self.max_file_size == 0 || byte_len <= self.max_file_size
    }
}

/// Rule selection resolved once per analysis request.
///
/// Immutable for the lifetime of that request; later settings changes only
/// affect subsequent requests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleConfiguration {
    /// Explicit rule-id allow-list, when the configuration supplies one.
    pub rules: Option<Vec<String>>,
    /// Guideline tag allow-list, when the configuration supplies one.
    pub tags: Option<Vec<String>>,
}

impl RuleConfiguration {
    /// Snapshot the rule selection out of the current settings.
    #[must_use]
    pub fn from_settings(settings: &LinterSettings) -> Self {
        Self {
            rules: settings.axe.rules.clone(),
            tags: settings.axe.tags.clone(),
        }
    }
}
