//! Run settings, validated from the command line before any scanning starts.

use std::path::PathBuf;

use log::LevelFilter;
use thiserror::Error;

use crate::args::Args;
use crate::consts::messages;
use crate::rect::{Rect, RectError};
use crate::region_parser::RegionWorld;
use crate::world::BlockId;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{}", messages::not_a_world(.0))]
    NotAWorld(PathBuf),

    #[error("{}", messages::RECT_HINT)]
    Rect(#[from] RectError),
}

pub struct Settings {
    pub world: RegionWorld,
    pub world_path: PathBuf,
    pub block: BlockId,
    pub rect: Option<Rect>,
}

impl Settings {
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let world = RegionWorld::open(&args.path)
            .ok_or_else(|| ConfigError::NotAWorld(args.path.clone()))?;
        let rect = args.rect.as_deref().map(Rect::parse).transpose()?;

        Ok(Self {
            world,
            world_path: args.path,
            block: args.id,
            rect,
        })
    }
}

/// Warnings by default, each `-v` one level more.
pub fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
