//! The scanner's entrypoint file.
mod args;
mod config;
mod consts;
mod coords;
mod logging;
mod rect;
mod region_parser;
mod report;
mod scan;
mod world;

use std::io;

use log::{debug, error, info, warn};

use config::Settings;
use consts::messages;
use report::ConsoleProgress;
use scan::{ScanError, Scanner};

fn main() {
    let args = args::init();

    // This must execute as early as possible
    logging::init(config::log_level(args.verbose));

    // Adds custom behavior to CTRL + C signal
    if let Err(e) = init_ctrlc_handler() {
        warn!("Failed to install the Ctrl+C handler: {e}");
    }

    let settings = match Settings::from_args(args) {
        Ok(settings) => settings,
        Err(e) => {
            // Configuration problems are reported on stdout, like the results.
            println!("{e}");
            debug!("{e:?}");
            gracefully_exit(ExitCode::Failure);
        }
    };

    if let Err(e) = run(&settings) {
        error!("Scan of {} failed: {e}", settings.world_path.display());
        gracefully_exit(ExitCode::Failure);
    }

    gracefully_exit(ExitCode::Success);
}

/// Scans the world, then prints every match.
fn run(settings: &Settings) -> Result<(), ScanError> {
    info!("Scanning world at {}", settings.world_path.display());

    let stdout = io::stdout();
    let mut progress = ConsoleProgress::new(stdout.lock());
    let report = Scanner::new(&settings.world, settings.block, settings.rect).run(&mut progress)?;

    let mut out = progress.into_inner();
    report::write_matches(&mut out, settings.block, &report.matches)?;

    if report.matches.is_empty() {
        info!(
            "Block #{} was not found in {} of {} columns",
            settings.block, report.columns_processed, report.columns_total
        );
    }
    Ok(())
}

/// Sets up a behavior when the user executes CTRL + C.
///
/// The handler runs on its own thread while stdout is locked by the scan, so it only logs.
fn init_ctrlc_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        gracefully_exit(ExitCode::CtrlC);
    })
}

/// Enum representing standardized exit codes.
pub enum ExitCode {
    Success,
    Failure,
    CtrlC,
}

/// Exits the process with an exit code.
pub fn gracefully_exit(exit_code: ExitCode) -> ! {
    let numerical_exit_code: i32 = match exit_code {
        ExitCode::Success => {
            debug!("Exiting");
            0
        }
        ExitCode::Failure => {
            warn!("{}", *messages::SCAN_FAILED);
            // 1 mean general error
            1
        }
        ExitCode::CtrlC => {
            warn!("{}", *messages::SCAN_INTERRUPTED);
            // 130 mean script terminated by Ctrl+C
            130
        }
    };

    std::process::exit(numerical_exit_code);
}
