mod replay;
mod trace;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use toolbar_logging::{progress_info, LogDestination};
use toolbar_progress_core::ProgressSettings;

use replay::{replay, OutputFormat};
use trace::Trace;

/// Replays a trace of browser tab operations through the toolbar
/// load-progress engine and prints the resulting progress-bar calls.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// RON trace to replay.
    trace: PathBuf,
    /// RON settings file; overrides settings embedded in the trace.
    #[arg(short, long)]
    settings: Option<PathBuf>,
    /// Output format for widget calls.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Also write logs to this file.
    #[arg(long)]
    log: Option<PathBuf>,
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let destination = match cli.log.clone() {
        Some(path) => LogDestination::Both(path),
        None => LogDestination::Terminal,
    };
    toolbar_logging::initialize(destination, level);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let trace = Trace::load(&cli.trace)?;
    let settings = match &cli.settings {
        Some(path) => ProgressSettings::load(path)
            .with_context(|| format!("failed to load settings {}", path.display()))?,
        None => trace.settings.clone().unwrap_or_default(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let count = replay(&trace, settings, &mut out, cli.format)?;
    out.flush()?;
    progress_info!("replayed {} steps, {} widget calls", trace.steps.len(), count);
    Ok(())
}
