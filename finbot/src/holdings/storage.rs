use std::path::{Path, PathBuf};

use super::errors::HoldingsError;
use super::model::HoldingsFile;
use crate::paths::config_path;

/// Return the default path of the holdings snapshot.
pub(crate) fn default_holdings_path() -> PathBuf {
    config_path("holdings.json")
}

/// Load a holdings snapshot from disk.
pub(crate) fn load_holdings(
    path: &Path,
) -> Result<HoldingsFile, HoldingsError> {
    let content = std::fs::read_to_string(path)?;
    parse_holdings(&content)
}

/// Parse a holdings snapshot.
pub(crate) fn parse_holdings(
    content: &str,
) -> Result<HoldingsFile, HoldingsError> {
    let file: HoldingsFile = serde_json::from_str(content)?;
    Ok(file)
}
