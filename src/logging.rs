//! Logger setup. Logs go to stderr so stdout only carries progress and results.

use std::io::Write;

use chrono::Local;
use colored::Colorize;
use env_logger::{Builder, Target};
use log::{Level, LevelFilter};

/// Initializes the global logger at `level`. `RUST_LOG` still overrides it.
pub fn init(level: LevelFilter) {
    Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                Local::now().format("%H:%M:%S"),
                colored_level(record.level()),
                record.args()
            )
        })
        .init();
}

fn colored_level(level: Level) -> colored::ColoredString {
    let name = level.as_str();
    match level {
        Level::Error => name.bright_red().bold(),
        Level::Warn => name.yellow().bold(),
        Level::Info => name.green(),
        Level::Debug => name.blue(),
        Level::Trace => name.dimmed(),
    }
}
