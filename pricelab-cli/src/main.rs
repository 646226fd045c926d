//! PriceLab CLI - enrich a daily OHLCV file and save the result.
//!
//! One command, four stages:
//! - load the CSV and put it in date order
//! - compute daily return, MA50, MA200 and volatility
//! - show the price and return charts (skipped with `--no-charts` or
//!   when stdout is not a terminal)
//! - write the enriched CSV

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, LeaveAlternateScreen};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pricelab_runner::{
    run_pipeline, NoopPresenter, PipelineOptions, PipelineReport, Presenter, DEFAULT_INPUT,
    DEFAULT_OUTPUT,
};
use pricelab_tui::TerminalPresenter;

#[derive(Parser)]
#[command(
    name = "pricelab",
    about = "PriceLab - daily return, moving averages and volatility for an OHLCV file"
)]
struct Cli {
    /// Input CSV with Date, Open, High, Low, Close and Volume columns.
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Where to write the enriched CSV.
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Skip the interactive charts.
    #[arg(long, default_value_t = false)]
    no_charts: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    // Restore the terminal before printing a panic raised mid-chart.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let options = PipelineOptions {
        input: cli.input,
        output: cli.output,
    };

    let mut presenter = select_presenter(cli.no_charts);
    info!(presenter = presenter.name(), "starting analysis");

    let report = run_pipeline(&options, presenter.as_mut())?;
    print_summary(&report);
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
}

fn select_presenter(no_charts: bool) -> Box<dyn Presenter> {
    if no_charts {
        Box::new(NoopPresenter)
    } else if !io::stdout().is_terminal() {
        info!("stdout is not a terminal; skipping charts");
        Box::new(NoopPresenter)
    } else {
        Box::new(TerminalPresenter::default())
    }
}

fn print_summary(report: &PipelineReport) {
    info!(
        input_rows = report.input_rows,
        output_rows = report.output_rows,
        bytes = report.export.bytes,
        digest = %report.export.digest,
        "export written"
    );
    println!(
        "Analysis complete. '{}' has been saved.",
        report.export.path.display()
    );
}
