//! Settings persistence
//!
//! Loads, saves and resets the single serialized settings blob stored
//! under [`SETTINGS_KEY`].

use super::PreferenceStore;
use crate::error::{SettingsError, SettingsResult};
use crate::state::Settings;

/// Key of the persisted settings blob
pub const SETTINGS_KEY: &str = "scpSettings";

/// Owns the preference backend and the settings blob format
pub struct SettingsStore {
    backend: Box<dyn PreferenceStore>,
}

impl SettingsStore {
    pub fn new(backend: impl PreferenceStore + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Hard-coded default settings
    pub fn defaults() -> Settings {
        Settings::defaults()
    }

    /// Read the persisted settings.
    ///
    /// Returns `Ok(None)` when nothing was saved. Missing fields are taken
    /// from the defaults and unknown fields are ignored; anything else that
    /// does not fit the settings shape is a `LoadError`.
    pub fn load(&self) -> SettingsResult<Option<Settings>> {
        let Some(raw) = self.backend.get(SETTINGS_KEY)? else {
            return Ok(None);
        };

        serde_json::from_str::<Settings>(&raw)
            .map(Some)
            .map_err(|e| SettingsError::LoadError(e.to_string()))
    }

    /// Overwrite the persisted blob
    pub fn save(&mut self, settings: &Settings) -> SettingsResult<()> {
        let content =
            serde_json::to_string(settings).map_err(|e| SettingsError::StorageUnavailable {
                reason: e.to_string(),
            })?;
        self.backend.set(SETTINGS_KEY, &content)?;
        log::debug!("Saved settings: {}", content);
        Ok(())
    }

    /// Delete the persisted blob and return fresh defaults.
    ///
    /// A failed delete is logged; the defaults are returned regardless.
    pub fn reset(&mut self) -> Settings {
        if let Err(e) = self.backend.remove(SETTINGS_KEY) {
            log::warn!("Could not remove stored settings: {}", e);
        }
        Self::defaults()
    }
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore").finish_non_exhaustive()
    }
}
