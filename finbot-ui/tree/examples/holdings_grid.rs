use std::sync::LazyLock;

use iced::widget::{button, column, container, row, text};
use iced::{Color, Element, Length};
use finbot_ui_tree::{
    FlattenOptions, RowContext, RowId, TreeGridView, TreeNode, TreeRows,
    flatten_tree,
};

#[derive(Debug, Clone)]
enum Message {
    Toggle(RowId),
    SetExpandAll(bool),
}

struct Holding {
    name: &'static str,
    value: f64,
    children: Vec<Holding>,
}

impl Holding {
    fn leaf(name: &'static str, value: f64) -> Self {
        Self {
            name,
            value,
            children: Vec::new(),
        }
    }

    fn group(name: &'static str, children: Vec<Holding>) -> Self {
        let value = children.iter().map(|child| child.value).sum();
        Self {
            name,
            value,
            children,
        }
    }
}

impl TreeNode for Holding {
    fn children(&self) -> Option<&[Self]> {
        Some(self.children.as_slice())
    }
}

static PORTFOLIO: LazyLock<Holding> = LazyLock::new(|| {
    Holding::group(
        "Net worth",
        vec![
            Holding::group(
                "Brokerage",
                vec![
                    Holding::leaf("VTI", 18_250.0),
                    Holding::leaf("BND", 6_400.0),
                    Holding::group(
                        "Options",
                        vec![Holding::leaf("SPY 450C", 820.0)],
                    ),
                ],
            ),
            Holding::group(
                "Banking",
                vec![
                    Holding::leaf("Checking", 3_100.0),
                    Holding::leaf("Savings", 12_000.0),
                ],
            ),
            Holding::leaf("Cash", 240.0),
        ],
    )
});

struct AppState {
    expand_all: bool,
    rows: TreeRows<'static, Holding>,
}

impl AppState {
    fn flatten(expand_all: bool) -> TreeRows<'static, Holding> {
        let options = FlattenOptions::new()
            .sort_key(|holding: &Holding| holding.value)
            .expand_all(expand_all);
        flatten_tree(Some(&*PORTFOLIO), &options)
            .expect("portfolio has a root")
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            expand_all: false,
            rows: Self::flatten(false),
        }
    }
}

fn update(state: &mut AppState, message: Message) {
    match message {
        Message::Toggle(id) => match state.rows.toggle_expansion(id) {
            Ok(rows) => state.rows = rows,
            Err(err) => eprintln!("toggle failed: {err}"),
        },
        Message::SetExpandAll(expand_all) => {
            state.expand_all = expand_all;
            state.rows = AppState::flatten(expand_all);
        },
    }
}

fn view(state: &AppState) -> Element<'_, Message> {
    let label = if state.expand_all {
        "Collapse to defaults"
    } else {
        "Expand all"
    };
    let controls =
        button(text(label)).on_press(Message::SetExpandAll(!state.expand_all));

    let grid = TreeGridView::new(&state.rows, render_row)
        .header(render_header)
        .on_toggle(Message::Toggle)
        .row_style(row_style)
        .indent_width(14.0)
        .toggle_width(16.0)
        .view();

    container(column![controls, grid].spacing(12))
        .padding(16)
        .width(Length::Fill)
        .into()
}

fn render_header<'a>() -> Element<'a, Message> {
    row![
        text("Account").width(Length::Fill),
        text("Value").width(Length::Fixed(120.0)),
    ]
    .padding([4, 8])
    .into()
}

fn render_row<'a>(
    context: &RowContext<'a, 'a, Holding>,
) -> Element<'a, Message> {
    let holding = context.node();
    row![
        text(holding.name).width(Length::Fill),
        text(format!("{:.2}", holding.value)).width(Length::Fixed(120.0)),
    ]
    .padding([4, 8])
    .width(Length::Fill)
    .into()
}

fn row_style(context: &RowContext<'_, '_, Holding>) -> container::Style {
    let background = if context.level() == 0 {
        Some(Color::from_rgb(0.12, 0.26, 0.46).into())
    } else {
        None
    };

    container::Style {
        background,
        text_color: Some(Color::from_rgb(0.9, 0.9, 0.9)),
        ..Default::default()
    }
}

fn main() -> iced::Result {
    iced::run(update, view)
}
