use iced::alignment;
use iced::widget::{Column, Row, Space, container, mouse_area, text};
use iced::{Element, Length, mouse};

use crate::grid::{RowContext, TreeGrid};
use crate::model::{RowId, TreeNode, TreeRows};

type RowRenderer<'a, T, Message> =
    dyn Fn(&RowContext<'a, 'a, T>) -> Element<'a, Message> + 'a;
type RowStyle<'a, T> = dyn Fn(&RowContext<'a, 'a, T>) -> container::Style + 'a;
type HeaderRenderer<'a, Message> = dyn Fn() -> Element<'a, Message> + 'a;
type ToggleAction<'a, Message> = dyn Fn(RowId) -> Message + 'a;

/// `iced` rendering of a [`TreeRows`] snapshot as an indented grid.
///
/// The view never mutates the snapshot: caret presses emit the message built
/// by [`TreeGridView::on_toggle`] and the host answers it with
/// [`TreeRows::toggle_expansion`].
pub struct TreeGridView<'a, T: TreeNode, Message: Clone + 'a> {
    rows: &'a TreeRows<'a, T>,
    render_row: Box<RowRenderer<'a, T, Message>>,
    header: Option<Box<HeaderRenderer<'a, Message>>>,
    on_toggle: Option<Box<ToggleAction<'a, Message>>>,
    row_style: Option<Box<RowStyle<'a, T>>>,
    spacing: f32,
    indent_width: f32,
    toggle_width: f32,
}

impl<'a, T, Message> TreeGridView<'a, T, Message>
where
    T: TreeNode + 'a,
    Message: Clone + 'a,
{
    /// Create a grid view that renders each visible row using `render_row`.
    pub fn new(
        rows: &'a TreeRows<'a, T>,
        render_row: impl Fn(&RowContext<'a, 'a, T>) -> Element<'a, Message>
        + 'a,
    ) -> Self {
        Self {
            rows,
            render_row: Box::new(render_row),
            header: None,
            on_toggle: None,
            row_style: None,
            spacing: 0.0,
            indent_width: 16.0,
            toggle_width: 16.0,
        }
    }

    /// Insert a header above all rows.
    pub fn header(
        mut self,
        header: impl Fn() -> Element<'a, Message> + 'a,
    ) -> Self {
        self.header = Some(Box::new(header));
        self
    }

    /// Emit a message when the caret of a non-leaf row is pressed.
    pub fn on_toggle(
        mut self,
        on_toggle: impl Fn(RowId) -> Message + 'a,
    ) -> Self {
        self.on_toggle = Some(Box::new(on_toggle));
        self
    }

    /// Provide a row style callback for background/text styling.
    pub fn row_style(
        mut self,
        row_style: impl Fn(&RowContext<'a, 'a, T>) -> container::Style + 'a,
    ) -> Self {
        self.row_style = Some(Box::new(row_style));
        self
    }

    /// Set indentation width per tree level.
    pub fn indent_width(mut self, width: f32) -> Self {
        self.indent_width = width.max(0.0);
        self
    }

    /// Set the width reserved for the caret.
    pub fn toggle_width(mut self, width: f32) -> Self {
        self.toggle_width = width.max(0.0);
        self
    }

    /// Vertical spacing between rows.
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Build the `Element` for the grid.
    pub fn view(self) -> Element<'a, Message> {
        let mut column = Column::new().spacing(self.spacing);

        if let Some(ref header) = self.header {
            column = column.push(header());
        }

        let grid = TreeGrid::<'a, 'a, T, ()>::new(self.rows);
        for context in grid.contexts() {
            let mut row = Row::new().spacing(0.0);

            let indent = context.level() as f32 * self.indent_width;
            if indent > 0.0 {
                row = row.push(Space::new().width(Length::Fixed(indent)));
            }

            row = row.push(self.caret_slot(&context));
            row = row.push((self.render_row)(&context));

            let mut row_element: Element<'a, Message> = row.into();

            if let Some(ref row_style) = self.row_style {
                let style = row_style(&context);
                row_element =
                    container(row_element).style(move |_| style).into();
            }

            column = column.push(row_element);
        }

        column.into()
    }

    fn caret_slot(
        &self,
        context: &RowContext<'a, 'a, T>,
    ) -> Element<'a, Message> {
        let content = container(text(context.caret().glyph()))
            .width(Length::Fixed(self.toggle_width))
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center);

        match self.on_toggle.as_ref() {
            Some(on_toggle) if !context.is_leaf() => mouse_area(content)
                .on_press(on_toggle(context.id()))
                .interaction(mouse::Interaction::Pointer)
                .into(),
            _ => content.into(),
        }
    }
}
