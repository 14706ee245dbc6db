//! Console output: the single overwritten progress line and the final list of matches.

use std::io::{self, Write};

use crate::consts::messages;
use crate::coords::BlockPos;
use crate::scan::Progress;
use crate::world::BlockId;

/// Renders progress on one line, rewritten in place with a carriage return.
pub struct ConsoleProgress<W: Write> {
    out: W,
}

impl<W: Write> ConsoleProgress<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn overwrite(&mut self, line: &str) -> io::Result<()> {
        write!(self.out, "{line}\r")?;
        self.out.flush()
    }
}

impl<W: Write> Progress for ConsoleProgress<W> {
    fn counted(&mut self, total: u64) -> io::Result<()> {
        self.overwrite(&format!("{total} columns total"))
    }

    fn processing(&mut self, processed: u64, total: u64) -> io::Result<()> {
        self.overwrite(&format!("Processing column {processed} of {total}"))
    }

    fn finish_phase(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        self.out.flush()
    }
}

/// Writes one line per match, in the order given. Writes nothing when there are none.
pub fn write_matches<W: Write>(
    out: &mut W,
    block: BlockId,
    matches: &[BlockPos],
) -> io::Result<()> {
    for pos in matches {
        writeln!(out, "{}", messages::block_found(block, pos.x, pos.y, pos.z))?;
    }
    out.flush()
}
