use thiserror::Error;

use crate::model::RowId;

/// Errors emitted while flattening a tree or toggling a row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// No root node was supplied to [`crate::flatten_tree`].
    #[error("tree root is missing")]
    MissingRoot,
    /// A toggle referenced a row id outside the current snapshot.
    #[error("unknown row {id} (snapshot has {len} rows)")]
    UnknownRow { id: RowId, len: usize },
}
