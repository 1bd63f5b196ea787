extern crate clap;

mod analysis;
mod console;
mod errors;
mod ingest;
mod results;
mod runner;
mod select;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use log::debug;

use crate::console::{ConsoleController, DisplayMode};
use crate::errors::{exit_codes, SeqStatError};
use crate::ingest::InputSource;

/// Report min, max, mean, median and the longest strictly increasing and
/// decreasing runs of a list of integers (one per line).
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File with one integer per line. Reads stdin when omitted or `-`.
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Do not show the elapsed-time line while analyzing.
    #[arg(long)]
    no_progress: bool,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    debug!(
        "seqstat {} ({})",
        env!("CARGO_PKG_VERSION"),
        option_env!("SEQSTAT_BUILD_GIT_HASH").unwrap_or("unknown revision")
    );

    let mode = DisplayMode::detect(
        cli.json,
        cli.no_progress,
        std::io::stderr().is_terminal(),
    );
    let controller = ConsoleController::new(mode);
    debug!("Display mode: {:?}", controller.mode());

    let source = InputSource::from_arg(cli.input);

    match execute(source, &controller) {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(error) => {
            controller.print_error(&error);
            std::process::exit(error.exit_code());
        }
    }
}

fn execute(
    source: InputSource,
    controller: &ConsoleController,
) -> Result<(), SeqStatError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| {
            SeqStatError::config("Failed to start async runtime").with_source(e)
        })?;

    let report = runner::block_on_detached(
        runtime,
        runner::run(source, controller),
    )?;
    controller.print_report(&report)
}
