//! Zingsheet - A terminal spreadsheet with single-step formulas

mod batch;
mod config;
mod logging;
#[cfg(feature = "tui")]
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use zingsheet_core::Document;

use batch::{Assignment, BatchRequest, parse_assignment};

#[derive(Parser, Debug)]
#[command(name = "zingsheet", version, about = "Terminal spreadsheet with single-step formulas")]
struct Cli {
    /// Number of rows (overrides config)
    #[arg(long)]
    rows: Option<usize>,

    /// Number of columns, at most 26 (overrides config)
    #[arg(long)]
    cols: Option<usize>,

    /// Configuration file (default: <config dir>/zingsheet/config.toml)
    #[arg(long, value_name = "PATH", conflicts_with = "no_config")]
    config: Option<PathBuf>,

    /// Ignore the user configuration file
    #[arg(long)]
    no_config: bool,

    /// Commit TEXT into CELL before anything else (repeatable), e.g. `C1==A1+B1`
    #[arg(short, long = "set", value_name = "CELL=TEXT", value_parser = parse_assignment)]
    set: Vec<Assignment>,

    /// Evaluate a formula against the sheet and print the result
    #[arg(short = 'c', long = "command", value_name = "FORMULA")]
    command: Option<String>,

    /// Print the sheet as a markdown table
    #[arg(long)]
    print: bool,

    /// Print every stored cell as `row-col<TAB>value`
    #[arg(long)]
    dump: bool,

    /// Write log output to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn is_batch(&self) -> bool {
        !self.set.is_empty() || self.command.is_some() || self.print || self.dump
    }
}

fn main() {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    logging::init(cli.log_file.as_deref(), !cli.is_batch())?;

    let (config, warnings) = if cli.no_config {
        (config::SheetConfig::default(), Vec::new())
    } else {
        config::load_config(cli.config.as_deref())
    };
    for warning in warnings {
        tracing::warn!("{}", warning);
        eprintln!("Warning: {}", warning);
    }

    let rows = cli.rows.unwrap_or(config.rows);
    let cols = cli.cols.unwrap_or(config.cols);
    let mut doc = Document::with_size(rows, cols).context("invalid sheet size")?;

    if cli.is_batch() {
        let request = BatchRequest {
            assignments: &cli.set,
            command: cli.command.as_deref(),
            print: cli.print,
            dump: cli.dump,
        };
        let mut stdout = std::io::stdout().lock();
        return batch::run(&mut doc, &request, &mut stdout);
    }

    run_interactive(doc, config.column_width)
}

#[cfg(feature = "tui")]
fn run_interactive(doc: Document, column_width: usize) -> Result<i32> {
    let mut app = tui::App::new(doc, column_width);
    tui::run(&mut app).context("terminal UI failed")?;
    Ok(0)
}

#[cfg(not(feature = "tui"))]
fn run_interactive(_doc: Document, _column_width: usize) -> Result<i32> {
    anyhow::bail!("built without the `tui` feature; use --set/--command/--print/--dump")
}
