//! The boundary between the scanner and whatever decodes the world save.
//!
//! A world is seen as an ordered sequence of [`Column`]s, each holding its [`Section`]s in file
//! order. The scanner only depends on [`ColumnSource`], so region files, test fixtures or any
//! other decoder can feed it.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::consts::world::SECTION_VOLUME;

/// Numeric block-type identifier.
pub type BlockId = u16;

/// Lazy sequence of decoded columns.
pub type ColumnIter<'a> = Box<dyn Iterator<Item = Result<Column, WorldError>> + 'a>;

/// Lazy sequence of column positions.
pub type PositionIter<'a> = Box<dyn Iterator<Item = Result<ColumnPos, WorldError>> + 'a>;

#[derive(Error, Debug)]
pub enum WorldError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode column {0}: {1}")]
    Nbt(ColumnPos, #[source] nbt::Error),

    #[error("{path}: region header is truncated ({len} bytes)")]
    TruncatedHeader { path: PathBuf, len: u64 },

    #[error("Column {0}: unsupported compression scheme {1}")]
    UnsupportedCompression(ColumnPos, u8),

    #[error("Column {pos}: chunk length {len} does not fit in {max} bytes")]
    BadChunkLength { pos: ColumnPos, len: u32, max: u64 },

    #[error("Column {0}: missing tag '{1}'")]
    MissingTag(ColumnPos, &'static str),

    #[error("Column {0}: tag '{1}' has an unexpected type")]
    UnexpectedTag(ColumnPos, &'static str),

    #[error("Section {y} has {len} blocks, expected {expected}", expected = SECTION_VOLUME)]
    BadSectionLength { y: i32, len: usize },

    #[error("Column stored in slot {slot} claims to be at {found}")]
    PositionMismatch { slot: ColumnPos, found: ColumnPos },
}

/// Horizontal position of a column, in column units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnPos {
    pub x: i32,
    pub z: i32,
}

impl ColumnPos {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

impl fmt::Display for ColumnPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// A 16x16x16 cube of blocks at vertical index `y` of its column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    y: i32,
    blocks: Vec<BlockId>,
}

impl Section {
    /// Fails unless `blocks` holds exactly one identifier per block of the cube.
    pub fn new(y: i32, blocks: Vec<BlockId>) -> Result<Self, WorldError> {
        if blocks.len() != SECTION_VOLUME {
            return Err(WorldError::BadSectionLength {
                y,
                len: blocks.len(),
            });
        }
        Ok(Self { y, blocks })
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// Identifiers in storage order: X fastest, then Z, then Y.
    pub fn blocks(&self) -> &[BlockId] {
        &self.blocks
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pos: ColumnPos,
    sections: Vec<Section>,
}

impl Column {
    pub fn new(pos: ColumnPos, sections: Vec<Section>) -> Self {
        Self { pos, sections }
    }

    pub fn pos(&self) -> ColumnPos {
        self.pos
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }
}

/// Something that can enumerate the columns of a world, from the start, as many times as asked.
pub trait ColumnSource {
    /// Starts a fresh pass over every column, in a stable order.
    fn columns(&self) -> Result<ColumnIter<'_>, WorldError>;

    /// Positions of the columns [`ColumnSource::columns`] yields, in the same order.
    ///
    /// Sources that can list positions without decoding block data should override this.
    fn positions(&self) -> Result<PositionIter<'_>, WorldError> {
        Ok(Box::new(
            self.columns()?.map(|column| column.map(|c| c.pos())),
        ))
    }
}
