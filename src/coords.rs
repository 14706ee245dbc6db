//! Block index to world coordinate transform.

use std::fmt;

use crate::consts::world::{SECTION_LAYER, SECTION_SIDE};

/// Absolute position of a block in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockPos {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl BlockPos {
    pub fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.x, self.y, self.z)
    }
}

/// Maps index `i` of a section's block array to absolute coordinates.
///
/// Blocks are stored X fastest, then Z, then Y, so `i` is local
/// `(i % 16, i / 256, (i / 16) % 16)`. Coordinates are computed in `i64`, so any
/// `i32` column or section position maps without overflow.
pub fn block_pos(i: usize, section_y: i32, column_x: i32, column_z: i32) -> BlockPos {
    let side = SECTION_SIDE as usize;
    let local_x = (i % side) as i64;
    let local_y = (i / SECTION_LAYER) as i64;
    let local_z = ((i / side) % side) as i64;

    BlockPos::new(
        column_x as i64 * SECTION_SIDE + local_x,
        section_y as i64 * SECTION_SIDE + local_y,
        column_z as i64 * SECTION_SIDE + local_z,
    )
}
