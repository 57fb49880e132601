//! Collapsible tree-grid rows for Finbot dashboards.
//!
//! This crate is split into three layers:
//! - the row model ([`TreeNode`], [`flatten_tree`], [`TreeRows`]) that turns
//!   an account/holding hierarchy into pre-order rows and recomputes row
//!   visibility when a row is expanded or collapsed;
//! - a UI-agnostic presenter ([`TreeGrid`], [`RowContext`]) that invokes a
//!   header callback once and a row callback per visible row;
//! - an [`iced`] view ([`TreeGridView`]) built on top of the presenter.
//!
//! Snapshots are immutable: [`TreeRows::toggle_expansion`] returns the next
//! snapshot and the host swaps it in. Rebuild with [`flatten_tree`] whenever
//! the source tree or the "expand all" flag changes.
//!
//! See `examples/holdings_grid.rs` for a complete runnable example.
//!
//! # Quick Example
//!
//! ```
//! use finbot_ui_tree::{FlattenOptions, TreeGrid, TreeNode, flatten_tree};
//!
//! struct Holding {
//!     name: String,
//!     value: f64,
//!     children: Vec<Holding>,
//! }
//!
//! impl TreeNode for Holding {
//!     fn children(&self) -> Option<&[Self]> {
//!         Some(self.children.as_slice())
//!     }
//! }
//!
//! let leaf = |name: &str, value: f64| Holding {
//!     name: name.to_owned(),
//!     value,
//!     children: Vec::new(),
//! };
//! let tree = Holding {
//!     name: String::from("Brokerage"),
//!     value: 300.0,
//!     children: vec![leaf("BND", 100.0), leaf("VTI", 200.0)],
//! };
//!
//! let options =
//!     FlattenOptions::new().sort_key(|holding: &Holding| holding.value);
//! let rows = flatten_tree(Some(&tree), &options)?;
//! let lines = TreeGrid::new(&rows).render(|row| {
//!     format!("{}{}", "  ".repeat(row.level()), row.node().name)
//! });
//!
//! assert_eq!(lines, ["Brokerage", "  VTI", "  BND"]);
//! # Ok::<(), finbot_ui_tree::TreeError>(())
//! ```

mod errors;
mod grid;
mod model;
mod view;

pub use errors::TreeError;
pub use grid::{RowContext, TreeGrid};
pub use model::{
    Caret, FlattenOptions, RowId, TreeNode, TreeRow, TreeRows, flatten_tree,
};
pub use view::TreeGridView;
