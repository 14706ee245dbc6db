//! Turns a decompressed chunk payload into a [`Column`].

use log::debug;
use nbt::{Blob, Value};

use super::tags;
use crate::world::{BlockId, Column, ColumnPos, Section, WorldError};

/// Decodes the chunk stored in the region slot at `slot`.
///
/// The chunk's own `xPos`/`zPos` must agree with the slot it was read from.
pub fn parse_column(data: &[u8], slot: ColumnPos) -> Result<Column, WorldError> {
    let mut reader = data;
    let blob = Blob::from_reader(&mut reader).map_err(|e| WorldError::Nbt(slot, e))?;

    let level = blob
        .get("Level")
        .ok_or(WorldError::MissingTag(slot, "Level"))?;
    let level = tags::as_compound(level, "Level", slot)?;

    let x = tags::as_int(tags::require(level, "xPos", slot)?, "xPos", slot)?;
    let z = tags::as_int(tags::require(level, "zPos", slot)?, "zPos", slot)?;
    let pos = ColumnPos::new(x, z);
    if pos != slot {
        return Err(WorldError::PositionMismatch { slot, found: pos });
    }

    let mut sections = Vec::new();
    if let Some(list) = tags::find(level, "Sections") {
        for value in tags::as_list(list, "Sections", pos)? {
            if let Some(section) = parse_section(value, pos)? {
                sections.push(section);
            }
        }
    }

    Ok(Column::new(pos, sections))
}

/// `None` for sections without a numeric block array.
fn parse_section(value: &Value, pos: ColumnPos) -> Result<Option<Section>, WorldError> {
    let section = tags::as_compound(value, "Sections", pos)?;
    let y = tags::as_int(tags::require(section, "Y", pos)?, "Y", pos)?;

    let blocks = match tags::find(section, "Blocks") {
        Some(blocks) => tags::as_byte_array(blocks, "Blocks", pos)?,
        None => {
            debug!("Column {pos}: section {y} has no Blocks, skipping");
            return Ok(None);
        }
    };

    let add = match tags::find(section, "Add") {
        Some(add) => {
            let add = tags::as_byte_array(add, "Add", pos)?;
            if add.len() * 2 != blocks.len() {
                return Err(WorldError::UnexpectedTag(pos, "Add"));
            }
            Some(add)
        }
        None => None,
    };

    Section::new(y, block_ids(blocks, add)).map(Some)
}

/// Combines the low byte from `Blocks` with the high nibble from `Add`.
///
/// `Add` packs two nibbles per byte, the even index in the low half.
fn block_ids(blocks: &[i8], add: Option<&[i8]>) -> Vec<BlockId> {
    blocks
        .iter()
        .enumerate()
        .map(|(i, &low)| {
            let high = add.map_or(0, |add| {
                let byte = add[i / 2] as u8;
                if i % 2 == 0 {
                    byte & 0x0F
                } else {
                    byte >> 4
                }
            });
            ((high as BlockId) << 8) | low as u8 as BlockId
        })
        .collect()
}
