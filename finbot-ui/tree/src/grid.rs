use crate::model::{Caret, RowId, TreeNode, TreeRow, TreeRows};

/// Rendering context handed to row callbacks for one visible row.
pub struct RowContext<'r, 'a, T> {
    row: &'r TreeRow<'a, T>,
    rows: &'r TreeRows<'a, T>,
}

impl<'r, 'a, T: TreeNode> RowContext<'r, 'a, T> {
    /// Borrowed source node.
    pub fn node(&self) -> &'a T {
        self.row.node
    }

    pub fn id(&self) -> RowId {
        self.row.id
    }

    /// Indentation level (`0` for the root).
    pub fn level(&self) -> usize {
        self.row.level
    }

    pub fn is_leaf(&self) -> bool {
        self.row.is_leaf()
    }

    pub fn is_expanded(&self) -> bool {
        self.row.expanded
    }

    pub fn caret(&self) -> Caret {
        self.row.caret()
    }

    /// Underlying row.
    pub fn row(&self) -> &'r TreeRow<'a, T> {
        self.row
    }

    /// Toggle this row on the snapshot being rendered and return the next
    /// snapshot for the host to re-render with.
    pub fn toggle(&self) -> TreeRows<'a, T> {
        self.rows.toggled(self.row.id)
    }
}

type HeaderRenderer<'r, R> = dyn Fn() -> R + 'r;

/// Drives header and row callbacks over the visible rows of a snapshot.
pub struct TreeGrid<'r, 'a, T, R> {
    rows: &'r TreeRows<'a, T>,
    header: Option<Box<HeaderRenderer<'r, R>>>,
}

impl<'r, 'a, T: TreeNode, R> TreeGrid<'r, 'a, T, R> {
    pub fn new(rows: &'r TreeRows<'a, T>) -> Self {
        Self { rows, header: None }
    }

    /// Render a header once before the first row.
    pub fn header(mut self, header: impl Fn() -> R + 'r) -> Self {
        self.header = Some(Box::new(header));
        self
    }

    /// Contexts for the visible rows, in pre-order.
    pub fn contexts(&self) -> impl Iterator<Item = RowContext<'r, 'a, T>> {
        let rows = self.rows;
        rows.visible_rows().map(move |row| RowContext { row, rows })
    }

    /// Invoke the header callback (if any) and then `render_row` once per
    /// visible row.
    pub fn render(
        &self,
        mut render_row: impl FnMut(&RowContext<'r, 'a, T>) -> R,
    ) -> Vec<R> {
        let mut rendered = Vec::new();
        if let Some(header) = self.header.as_ref() {
            rendered.push(header());
        }
        for context in self.contexts() {
            rendered.push(render_row(&context));
        }
        rendered
    }
}
