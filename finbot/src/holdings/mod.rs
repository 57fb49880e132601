mod errors;
mod model;
mod render;
mod storage;

use finbot_ui_tree::{FlattenOptions, RowId, TreeRows, flatten_tree};

pub(crate) use errors::HoldingsError;
pub(crate) use model::{HoldingNode, HoldingsFile};
pub(crate) use render::{json_rows, text_lines};
pub(crate) use storage::{default_holdings_path, load_holdings};

use crate::settings::{Settings, SortMode};

/// Flatten options derived from dashboard settings.
pub(crate) fn flatten_options(
    settings: &Settings,
) -> FlattenOptions<HoldingNode> {
    let options = match settings.sort {
        SortMode::Value => {
            FlattenOptions::new().sort_key(|node: &HoldingNode| node.value)
        },
        SortMode::Unsorted => FlattenOptions::new(),
    };
    options.expand_all(settings.expand_all)
}

/// Flatten the snapshot and apply `toggles` in order.
pub(crate) fn build_rows<'a>(
    file: &'a HoldingsFile,
    settings: &Settings,
    toggles: &[RowId],
) -> Result<TreeRows<'a, HoldingNode>, HoldingsError> {
    let options = flatten_options(settings);
    let mut rows = flatten_tree(file.root.as_ref(), &options)?;
    for id in toggles {
        rows = rows.toggle_expansion(*id)?;
    }
    log::debug!(
        "holdings grid ready: {} rows, {} toggles applied",
        rows.len(),
        rows.version()
    );
    Ok(rows)
}
