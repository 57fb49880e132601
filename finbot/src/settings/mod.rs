mod errors;
mod storage;

use serde::{Deserialize, Serialize};

use errors::SettingsError;
pub(crate) use storage::{default_settings_path, load_initial_settings};

pub(crate) const MIN_INDENT: usize = 1;
pub(crate) const MAX_INDENT: usize = 8;

/// How siblings are ordered in the holdings grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum SortMode {
    /// Largest value first.
    #[default]
    #[serde(rename = "value")]
    Value,
    /// Keep the order of the snapshot file.
    #[serde(rename = "none")]
    Unsorted,
}

/// Dashboard settings persisted in `settings.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub(crate) expand_all: bool,
    pub(crate) sort: SortMode,
    pub(crate) indent: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            expand_all: false,
            sort: SortMode::Value,
            indent: 2,
        }
    }
}

impl Settings {
    /// Reject values the grid renderer cannot honour.
    pub(crate) fn validate(self) -> Result<Self, SettingsError> {
        if !(MIN_INDENT..=MAX_INDENT).contains(&self.indent) {
            return Err(SettingsError::Validation {
                message: format!(
                    "indent must be between {MIN_INDENT} and {MAX_INDENT}, \
                     got {}",
                    self.indent
                ),
            });
        }
        Ok(self)
    }
}
