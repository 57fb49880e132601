mod holdings;
mod paths;
mod settings;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use finbot_ui_tree::RowId;

#[derive(Parser, Debug)]
#[command(name = "finbot")]
#[command(about = "Show the Finbot holdings tree grid")]
#[command(version)]
struct Args {
    /// Holdings snapshot (defaults to ~/.config/finbot/holdings.json)
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Settings file (defaults to ~/.config/finbot/settings.json)
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Start with every row expanded
    #[arg(short = 'a', long = "expand-all")]
    expand_all: bool,

    /// Toggle a row by id; can be repeated and is applied in order
    #[arg(short, long = "toggle", value_name = "ID")]
    toggle: Vec<RowId>,

    /// Print visible rows as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = Args::parse();

    let settings_path = args
        .settings
        .clone()
        .unwrap_or_else(settings::default_settings_path);
    let mut settings = settings::load_initial_settings(&settings_path);
    if args.expand_all {
        settings.expand_all = true;
    }

    let holdings_path = args
        .file
        .clone()
        .unwrap_or_else(holdings::default_holdings_path);
    let file = holdings::load_holdings(&holdings_path).with_context(|| {
        format!("failed to load holdings from {}", holdings_path.display())
    })?;
    let rows = holdings::build_rows(&file, &settings, &args.toggle)
        .context("failed to build holdings grid")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &holdings::json_rows(&rows))?;
        writeln!(out)?;
    } else {
        for line in holdings::text_lines(&rows, settings.indent) {
            writeln!(out, "{line}")?;
        }
    }

    Ok(())
}
