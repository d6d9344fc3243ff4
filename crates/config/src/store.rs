//! Process-wide settings store.
//!
//! The store is an explicit object handed to the scheduler at construction
//! time, replacing any notion of ambient global configuration. Readers take
//! cheap `Arc` snapshots; configuration-change notifications swap the whole
//! settings value at once.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::settings::LinterSettings;

/// Error produced when a configuration section cannot be parsed.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid configuration section: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Shared, swappable settings.
#[derive(Debug)]
pub struct SettingsStore {
    current: RwLock<Arc<LinterSettings>>,
}

impl SettingsStore {
    /// Create a store with explicit initial settings.
    #[must_use]
    pub fn new(settings: LinterSettings) -> Self {
        Self {
            current: RwLock::new(Arc::new(settings.normalize())),
        }
    }

    /// Snapshot the current settings.
    ///
    /// The snapshot stays valid across later [`SettingsStore::replace`]
    /// calls, which is what gives each analysis request an immutable view.
    #[must_use]
    pub fn current(&self) -> Arc<LinterSettings> {
        Arc::clone(&self.current.read())
    }

    /// Swap in new settings wholesale.
    pub fn replace(&self, settings: LinterSettings) {
        *self.current.write() = Arc::new(settings.normalize());
    }

    /// Apply a configuration-change notification from the editor host.
    ///
    /// A malformed section is logged and leaves the previous settings in
    /// place; validation keeps running with what it had.
    pub fn update_from_json(&self, section: serde_json::Value) -> Result<(), SettingsError> {
        match serde_json::from_value::<LinterSettings>(section) {
            Ok(settings) => {
                self.replace(settings);
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%error, "ignoring malformed configuration section");
                Err(SettingsError::Invalid(error))
            }
        }
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(LinterSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::RunMode;

    #[test]
    fn test_snapshot_survives_replace() {
        let store = SettingsStore::default();
        let before = store.current();
        store.replace(LinterSettings {
            enable: false,
            ..LinterSettings::default()
        });
        assert!(before.enable);
        assert!(!store.current().enable);
    }

    #[test]
    fn test_update_from_json() {
        let store = SettingsStore::default();
        store
            .update_from_json(serde_json::json!({ "run": "onSave" }))
            .ok();
        assert_eq!(store.current().run, RunMode::OnSave);
    }

    #[test]
    fn test_malformed_json_keeps_previous_settings() {
        let store = SettingsStore::default();
        store
            .update_from_json(serde_json::json!({ "run": "onType" }))
            .ok();
        let result = store.update_from_json(serde_json::json!({ "run": 42 }));
        assert!(result.is_err());
        assert_eq!(store.current().run, RunMode::OnType);
    }

    #[test]
    fn test_replace_normalizes() {
        let store = SettingsStore::default();
        store.replace(LinterSettings {
            debounce_delay: -1,
            ..LinterSettings::default()
        });
        assert_eq!(store.current().debounce_delay, 500);
    }
}
