use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use byteorder::{BigEndian, ReadBytesExt};
use log::trace;

use super::compression::{self, Scheme};
use crate::consts::region::{
    FILE_EXTENSION, HEADER_BYTES, REGION_COLUMNS, REGION_SIDE, SECTOR_BYTES,
};
use crate::world::{ColumnPos, WorldError};

/// Region coordinates, parsed from a file name like `r.0.-1.mca`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionPos {
    pub x: i32,
    pub z: i32,
}

impl RegionPos {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    pub fn from_filename(name: &str) -> Option<Self> {
        let parts: Vec<&str> = name.split('.').collect();
        if parts.len() == 4 && parts[0] == "r" && parts[3] == FILE_EXTENSION {
            let x = parts[1].parse().ok()?;
            let z = parts[2].parse().ok()?;
            Some(Self::new(x, z))
        } else {
            None
        }
    }

    /// Position of the column stored in `slot` of this region.
    pub fn slot_pos(&self, slot: usize) -> ColumnPos {
        let local_x = (slot % REGION_SIDE as usize) as i32;
        let local_z = (slot / REGION_SIDE as usize) as i32;
        ColumnPos::new(
            self.x * REGION_SIDE + local_x,
            self.z * REGION_SIDE + local_z,
        )
    }
}

/// Where a column's payload lives, from the region's location table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Location {
    /// First sector of the payload.
    sector: u32,
    /// Number of sectors allotted to it.
    sectors: u8,
}

impl Location {
    fn from_entry(entry: u32) -> Self {
        Self {
            sector: entry >> 8,
            sectors: (entry & 0xFF) as u8,
        }
    }

    fn is_empty(&self) -> bool {
        self.sectors == 0
    }
}

/// An open region file: a 32x32 grid of column slots.
pub struct Region {
    path: PathBuf,
    pos: RegionPos,
    file: Option<File>,
    locations: Vec<Location>,
}

impl Region {
    /// Opens the file and reads its location table. A zero-byte file is an empty region.
    pub fn open(path: &Path, pos: RegionPos) -> Result<Self, WorldError> {
        let file = File::open(path).map_err(io_error(path))?;
        let len = file.metadata().map_err(io_error(path))?.len();

        if len == 0 {
            return Ok(Self {
                path: path.to_path_buf(),
                pos,
                file: None,
                locations: vec![Location::default(); REGION_COLUMNS],
            });
        }

        if len < HEADER_BYTES {
            return Err(WorldError::TruncatedHeader {
                path: path.to_path_buf(),
                len,
            });
        }

        // Only the location table matters here, timestamps are skipped.
        let mut reader = BufReader::new(&file);
        let mut locations = Vec::with_capacity(REGION_COLUMNS);
        for _ in 0..REGION_COLUMNS {
            let entry = reader.read_u32::<BigEndian>().map_err(io_error(path))?;
            locations.push(Location::from_entry(entry));
        }

        Ok(Self {
            path: path.to_path_buf(),
            pos,
            file: Some(file),
            locations,
        })
    }

    pub fn pos(&self) -> RegionPos {
        self.pos
    }

    /// Slots holding a column, in header order.
    pub fn present_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.locations
            .iter()
            .enumerate()
            .filter(|(_, location)| !location.is_empty())
            .map(|(slot, _)| slot)
    }

    /// Reads and decompresses the payload in `slot`. Returns `None` for an empty slot.
    pub fn read_chunk(&mut self, slot: usize) -> Result<Option<Vec<u8>>, WorldError> {
        let location = self.locations[slot];
        let file = match &mut self.file {
            Some(file) if !location.is_empty() => file,
            _ => return Ok(None),
        };
        let column = self.pos.slot_pos(slot);
        let path = self.path.as_path();

        file.seek(SeekFrom::Start(location.sector as u64 * SECTOR_BYTES))
            .map_err(io_error(path))?;

        // The length counts the scheme byte but not itself.
        let max = location.sectors as u64 * SECTOR_BYTES - 4;
        let length = file.read_u32::<BigEndian>().map_err(io_error(path))?;
        if length == 0 || length as u64 > max {
            return Err(WorldError::BadChunkLength {
                pos: column,
                len: length,
                max,
            });
        }

        let scheme_byte = file.read_u8().map_err(io_error(path))?;
        let scheme = Scheme::from_byte(scheme_byte)
            .ok_or(WorldError::UnsupportedCompression(column, scheme_byte))?;

        let mut compressed = vec![0u8; (length - 1) as usize];
        file.read_exact(&mut compressed).map_err(io_error(path))?;
        trace!(
            "Read column {column} from {}: {length} bytes, {scheme:?}",
            path.display()
        );

        compression::decompress(scheme, &compressed)
            .map(Some)
            .map_err(io_error(path))
    }
}

pub(super) fn io_error(path: &Path) -> impl FnOnce(io::Error) -> WorldError + '_ {
    move |source| WorldError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Writes a region file holding `chunks` as `(slot, uncompressed payload)`, zlib-compressed.
#[cfg(test)]
pub fn save_to_file(path: &Path, chunks: &[(usize, Vec<u8>)]) -> io::Result<()> {
    use byteorder::WriteBytesExt;
    use std::io::Write;

    let mut locations = vec![0u32; REGION_COLUMNS];
    let mut body = Vec::new();
    let mut next_sector = (HEADER_BYTES / SECTOR_BYTES) as u32;

    for (slot, payload) in chunks {
        let compressed = compression::compress(payload)?;
        let mut sector_data = Vec::new();
        sector_data.write_u32::<BigEndian>(compressed.len() as u32 + 1)?;
        sector_data.write_u8(2)?;
        sector_data.extend_from_slice(&compressed);

        let sectors = sector_data.len().div_ceil(SECTOR_BYTES as usize);
        sector_data.resize(sectors * SECTOR_BYTES as usize, 0);

        locations[*slot] = (next_sector << 8) | sectors as u32;
        next_sector += sectors as u32;
        body.extend_from_slice(&sector_data);
    }

    let mut file = File::create(path)?;
    for entry in &locations {
        file.write_u32::<BigEndian>(*entry)?;
    }
    // Timestamps
    file.write_all(&vec![0u8; REGION_COLUMNS * 4])?;
    file.write_all(&body)
}
