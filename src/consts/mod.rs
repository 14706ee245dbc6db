//! This module is where we store constants, like the dimensions of the world format or the
//! messages shown to the user.

/// Dimensions of the column/section/block layout.
pub mod world {
    /// Side of a section, and width of a column, in blocks.
    pub const SECTION_SIDE: i64 = 16;

    /// Number of blocks in one horizontal layer of a section.
    pub const SECTION_LAYER: usize = 16 * 16;

    /// Number of blocks stored in a section's block array.
    pub const SECTION_VOLUME: usize = 16 * 16 * 16;
}

/// Layout of the region (`.mca`) container.
pub mod region {
    /// Columns per region along one axis.
    pub const REGION_SIDE: i32 = 32;

    /// Column slots in a region.
    pub const REGION_COLUMNS: usize = 1024;

    /// Size of one sector in bytes.
    pub const SECTOR_BYTES: u64 = 4096;

    /// Location table followed by the timestamp table.
    pub const HEADER_BYTES: u64 = 2 * SECTOR_BYTES;

    pub const FILE_EXTENSION: &str = "mca";
}

/// Module used to store paths relative to the world root.
pub mod directory_paths {
    /// Overworld region files live here; its presence is what makes a directory a world.
    pub const REGION: &str = "region";
}

/// User-facing messages.
pub mod messages {
    use std::path::Path;

    use colored::*;
    use once_cell::sync::Lazy;

    pub static SCAN_INTERRUPTED: Lazy<String> =
        Lazy::new(|| "[ SCAN INTERRUPTED WITH CTRL+C ]".bright_red().bold().to_string());

    pub static SCAN_FAILED: Lazy<String> =
        Lazy::new(|| "[ SCAN ABORTED ]".bright_red().bold().to_string());

    /// Printed when the rectangle option is malformed.
    pub const RECT_HINT: &str = r#"Incorrect rectangle format. Hint: -r="xmin,xmax,zmin,zmax""#;

    /// Printed when the given path has no region directory.
    pub fn not_a_world(path: &Path) -> String {
        format!("\"{}\" doesn't look like a world", path.display())
    }

    /// Used for a single line of the final report.
    pub fn block_found(id: u16, x: i64, y: i64, z: i64) -> String {
        format!("Block #{id} found at {x}, {y}, {z}")
    }
}
