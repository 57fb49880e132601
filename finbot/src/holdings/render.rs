use finbot_ui_tree::{Caret, RowContext, RowId, TreeGrid, TreeRows};
use serde::Serialize;

use super::model::{HoldingKind, HoldingNode};

const ID_HEADER: &str = "ID";
const NAME_HEADER: &str = "NAME";
const VALUE_HEADER: &str = "VALUE";
const COLUMN_GAP: &str = "  ";

/// Visible row as emitted by `--json`.
#[derive(Debug, PartialEq, Serialize)]
pub(crate) struct VisibleRow<'a> {
    pub(crate) id: RowId,
    pub(crate) level: usize,
    pub(crate) order: usize,
    pub(crate) expanded: bool,
    pub(crate) leaf: bool,
    pub(crate) name: &'a str,
    pub(crate) kind: HoldingKind,
    pub(crate) value: f64,
}

/// Collect the visible rows for JSON output.
pub(crate) fn json_rows<'a>(
    rows: &TreeRows<'a, HoldingNode>,
) -> Vec<VisibleRow<'a>> {
    TreeGrid::new(rows).render(|ctx| {
        let node = ctx.node();
        VisibleRow {
            id: ctx.id(),
            level: ctx.level(),
            order: ctx.row().order,
            expanded: ctx.is_expanded(),
            leaf: ctx.is_leaf(),
            name: &node.name,
            kind: node.kind,
            value: node.value,
        }
    })
}

struct Cells {
    id: String,
    label: String,
    value: String,
}

/// Render the header and visible rows as aligned text lines.
pub(crate) fn text_lines(
    rows: &TreeRows<'_, HoldingNode>,
    indent: usize,
) -> Vec<String> {
    let cells = TreeGrid::new(rows)
        .header(|| Cells {
            id: ID_HEADER.to_owned(),
            label: NAME_HEADER.to_owned(),
            value: VALUE_HEADER.to_owned(),
        })
        .render(|ctx| Cells {
            id: ctx.id().to_string(),
            label: row_label(ctx, indent),
            value: format!("{:.2}", ctx.node().value),
        });

    let width = |cell: fn(&Cells) -> &str| {
        cells
            .iter()
            .map(|entry| cell(entry).chars().count())
            .max()
            .unwrap_or(0)
    };
    let id_width = width(|entry| entry.id.as_str());
    let label_width = width(|entry| entry.label.as_str());
    let value_width = width(|entry| entry.value.as_str());

    cells
        .iter()
        .map(|entry| {
            let id = format!("{:>id_width$}", entry.id);
            let label = format!("{:<label_width$}", entry.label);
            let value = format!("{:>value_width$}", entry.value);
            [id, label, value].join(COLUMN_GAP)
        })
        .collect()
}

fn row_label(ctx: &RowContext<'_, '_, HoldingNode>, indent: usize) -> String {
    let caret = match ctx.caret() {
        Caret::Blank => " ",
        caret => caret.glyph(),
    };
    format!(
        "{}{caret} {}",
        " ".repeat(ctx.level() * indent),
        ctx.node().name
    )
}
