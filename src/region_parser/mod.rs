//! Reads columns out of a world's `region/r.<x>.<z>.mca` files.
//!
//! Region files are visited in ascending `(x, z)` order and the columns of each region in
//! location-table order, so every pass over the same world yields the same sequence.

pub mod chunk;
pub mod compression;
pub mod region;
pub mod tags;

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::consts::directory_paths;
use crate::consts::region::REGION_COLUMNS;
use crate::world::{Column, ColumnIter, ColumnPos, ColumnSource, PositionIter, WorldError};
use region::{io_error, Region, RegionPos};

/// A region file found in the world's region directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionFile {
    pub pos: RegionPos,
    pub path: PathBuf,
}

/// A world save on disk.
pub struct RegionWorld {
    region_dir: PathBuf,
}

impl RegionWorld {
    /// Returns `None` when `world` has no region directory.
    pub fn open(world: &Path) -> Option<Self> {
        let region_dir = world.join(directory_paths::REGION);
        region_dir.is_dir().then_some(Self { region_dir })
    }

    /// Lists region files sorted by position. Files not named like a region are ignored.
    pub fn region_files(&self) -> Result<Vec<RegionFile>, WorldError> {
        let entries = fs::read_dir(&self.region_dir).map_err(io_error(&self.region_dir))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(io_error(&self.region_dir))?;
            let name = entry.file_name();
            match name.to_str().and_then(RegionPos::from_filename) {
                Some(pos) => files.push(RegionFile {
                    pos,
                    path: entry.path(),
                }),
                None => debug!("Ignoring {}", entry.path().display()),
            }
        }

        files.sort_by_key(|file| file.pos);
        debug!(
            "Found {} region files in {}",
            files.len(),
            self.region_dir.display()
        );
        Ok(files)
    }
}

impl ColumnSource for RegionWorld {
    fn columns(&self) -> Result<ColumnIter<'_>, WorldError> {
        Ok(Box::new(Columns {
            files: self.region_files()?.into_iter(),
            current: None,
            slot: 0,
        }))
    }

    /// Positions come from the location tables alone, no chunk is decompressed.
    fn positions(&self) -> Result<PositionIter<'_>, WorldError> {
        let files = self.region_files()?;
        Ok(Box::new(files.into_iter().flat_map(|file| {
            match Region::open(&file.path, file.pos) {
                Ok(region) => region
                    .present_slots()
                    .map(|slot| Ok(file.pos.slot_pos(slot)))
                    .collect::<Vec<Result<ColumnPos, WorldError>>>(),
                Err(e) => vec![Err(e)],
            }
        })))
    }
}

/// Lazily walks every present slot of every region file.
struct Columns {
    files: std::vec::IntoIter<RegionFile>,
    current: Option<Region>,
    slot: usize,
}

impl Iterator for Columns {
    type Item = Result<Column, WorldError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current.is_none() {
                let file = self.files.next()?;
                match Region::open(&file.path, file.pos) {
                    Ok(region) => {
                        self.current = Some(region);
                        self.slot = 0;
                    }
                    Err(e) => return Some(Err(e)),
                }
            }

            let region = self.current.as_mut()?;
            while self.slot < REGION_COLUMNS {
                let slot = self.slot;
                self.slot += 1;

                match region.read_chunk(slot) {
                    Ok(Some(data)) => {
                        return Some(chunk::parse_column(&data, region.pos().slot_pos(slot)))
                    }
                    Ok(None) => continue,
                    Err(e) => return Some(Err(e)),
                }
            }

            debug!("Done with region {:?}", region.pos());
            self.current = None;
        }
    }
}
