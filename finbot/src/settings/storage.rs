use std::path::{Path, PathBuf};

use super::errors::SettingsError;
use super::Settings;
use crate::paths::config_path;

/// Return the default path of the settings file.
pub(crate) fn default_settings_path() -> PathBuf {
    config_path("settings.json")
}

/// Load settings from disk; a missing file yields defaults.
pub(crate) fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(Settings::default());
        },
        Err(err) => return Err(err.into()),
    };
    parse_settings(&content)
}

/// Parse and validate settings JSON.
pub(crate) fn parse_settings(content: &str) -> Result<Settings, SettingsError> {
    let settings: Settings = serde_json::from_str(content)?;
    settings.validate()
}

/// Load settings, falling back to defaults on error.
pub(crate) fn load_initial_settings(path: &Path) -> Settings {
    match load_settings(path) {
        Ok(settings) => settings,
        Err(err) => {
            log::warn!(
                "Failed to load settings from {}, using defaults: {err}",
                path.display()
            );
            Settings::default()
        },
    }
}
