use finbot_ui_tree::TreeError;
use thiserror::Error;

/// Errors emitted while loading holdings or building the grid.
#[derive(Debug, Error)]
pub(crate) enum HoldingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("tree error: {0}")]
    Tree(#[from] TreeError),
}
