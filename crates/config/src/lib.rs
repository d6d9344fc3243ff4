//! Settings model and store for the accessibility analyzer.
//!
//! Configuration arrives from the editor host as a JSON section. The
//! [`SettingsStore`] holds the current [`LinterSettings`] value and swaps it
//! on change notifications; each analysis request resolves an immutable
//! [`RuleConfiguration`] snapshot from it.

mod settings;
mod store;

pub use settings::{
    AxeSettings, LinterSettings, RuleConfiguration, RunMode, DEFAULT_DEBOUNCE_MS,
    DEFAULT_MAX_FILE_SIZE,
};
pub use store::{SettingsError, SettingsStore};
