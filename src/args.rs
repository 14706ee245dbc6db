use std::path::PathBuf;

use clap::Parser;

use crate::world::BlockId;

/// Finds every block of a given type in a world save.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the world
    pub path: PathBuf,

    /// Block ID
    #[arg(value_name = "ID", value_parser = clap::value_parser!(u16).range(0..=4095))]
    pub id: BlockId,

    /// Look for blocks in the specified rectangle only, in column coordinates.
    /// Format: -r="xmin,xmax,zmin,zmax"
    #[arg(short, long, allow_hyphen_values = true)]
    pub rect: Option<String>,

    /// Log more details to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parses the process arguments. Usage errors exit with code 1, help and version with 0.
pub fn init() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    }
}
