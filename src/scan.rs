//! The two-pass block scan.
//!
//! The first pass counts the columns the rectangle lets through, so the second pass, which reads
//! every block of those columns, can report progress as "column P of T". Both passes go through
//! [`Scanner::accepts`], so they select the same columns as long as the world does not change
//! in between.

use std::io;

use log::{debug, info};
use thiserror::Error;

use crate::coords::{block_pos, BlockPos};
use crate::rect::Rect;
use crate::world::{BlockId, ColumnPos, ColumnSource, WorldError};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("World error: {0}")]
    World(#[from] WorldError),

    #[error("Failed to report progress: {0}")]
    Output(#[from] io::Error),
}

/// Receives progress events from a running scan.
pub trait Progress {
    /// A column passed the filter during counting; `total` is the count so far.
    fn counted(&mut self, total: u64) -> io::Result<()>;

    /// Column `processed` of `total` is about to be scanned.
    fn processing(&mut self, processed: u64, total: u64) -> io::Result<()>;

    /// The current pass is over.
    fn finish_phase(&mut self) -> io::Result<()>;
}

/// Outcome of a completed scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub columns_total: u64,
    pub columns_processed: u64,
    /// In encounter order: column, then section, then block index.
    pub matches: Vec<BlockPos>,
}

pub struct Scanner<'a, S: ColumnSource + ?Sized> {
    source: &'a S,
    block: BlockId,
    rect: Option<Rect>,
}

impl<'a, S: ColumnSource + ?Sized> Scanner<'a, S> {
    pub fn new(source: &'a S, block: BlockId, rect: Option<Rect>) -> Self {
        Self {
            source,
            block,
            rect,
        }
    }

    /// Whether the column at `pos` is part of the scan. Without a rectangle, every column is.
    pub fn accepts(&self, pos: ColumnPos) -> bool {
        self.rect.map_or(true, |rect| rect.contains_column(pos))
    }

    /// Runs both passes and returns every match.
    ///
    /// Any error from the source aborts the scan; no partial result is returned.
    pub fn run(&self, progress: &mut dyn Progress) -> Result<ScanReport, ScanError> {
        match self.rect {
            Some(rect) => info!("Scanning for block #{} in {}", self.block, rect),
            None => info!("Scanning for block #{} in the whole world", self.block),
        }

        let columns_total = self.count(progress)?;
        let (columns_processed, matches) = self.collect(columns_total, progress)?;

        info!(
            "Found {} matches in {} columns",
            matches.len(),
            columns_processed
        );
        if columns_processed != columns_total {
            debug!("Counted {columns_total} columns but scanned {columns_processed}");
        }

        Ok(ScanReport {
            columns_total,
            columns_processed,
            matches,
        })
    }

    /// First pass: counts accepted columns without touching their blocks.
    pub fn count(&self, progress: &mut dyn Progress) -> Result<u64, ScanError> {
        let mut total = 0;
        for pos in self.source.positions()? {
            if !self.accepts(pos?) {
                continue;
            }
            total += 1;
            progress.counted(total)?;
        }
        progress.finish_phase()?;

        debug!("{total} columns to scan");
        Ok(total)
    }

    /// Second pass: walks every block of every accepted column.
    ///
    /// Returns how many columns were scanned along with the matches.
    pub fn collect(
        &self,
        total: u64,
        progress: &mut dyn Progress,
    ) -> Result<(u64, Vec<BlockPos>), ScanError> {
        let mut processed = 0;
        let mut matches = Vec::new();

        for column in self.source.columns()? {
            let column = column?;
            let pos = column.pos();
            if !self.accepts(pos) {
                continue;
            }

            processed += 1;
            progress.processing(processed, total)?;

            for section in column.sections() {
                for (i, &id) in section.blocks().iter().enumerate() {
                    if id == self.block {
                        matches.push(block_pos(i, section.y(), pos.x, pos.z));
                    }
                }
            }
        }
        progress.finish_phase()?;

        Ok((processed, matches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::world::SECTION_VOLUME;
    use crate::world::{Column, ColumnIter, Section};
    use rand::Rng;
    use std::cell::Cell;

    /// In-memory world that also counts how often each pass was requested.
    struct MemoryWorld {
        columns: Vec<Column>,
        passes: Cell<u32>,
    }

    impl MemoryWorld {
        fn new(columns: Vec<Column>) -> Self {
            Self {
                columns,
                passes: Cell::new(0),
            }
        }
    }

    impl ColumnSource for MemoryWorld {
        fn columns(&self) -> Result<ColumnIter<'_>, WorldError> {
            self.passes.set(self.passes.get() + 1);
            Ok(Box::new(self.columns.iter().cloned().map(Ok)))
        }
    }

    /// Fails on the column at `fail_at`.
    struct BrokenWorld {
        columns: Vec<Column>,
        fail_at: usize,
    }

    impl ColumnSource for BrokenWorld {
        fn columns(&self) -> Result<ColumnIter<'_>, WorldError> {
            let fail_at = self.fail_at;
            Ok(Box::new(self.columns.iter().enumerate().map(
                move |(i, column)| {
                    if i == fail_at {
                        Err(WorldError::MissingTag(column.pos(), "Level"))
                    } else {
                        Ok(column.clone())
                    }
                },
            )))
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Counted(u64),
        Processing(u64, u64),
        FinishPhase,
    }

    #[derive(Default)]
    struct Recorder(Vec<Event>);

    impl Progress for Recorder {
        fn counted(&mut self, total: u64) -> io::Result<()> {
            self.0.push(Event::Counted(total));
            Ok(())
        }

        fn processing(&mut self, processed: u64, total: u64) -> io::Result<()> {
            self.0.push(Event::Processing(processed, total));
            Ok(())
        }

        fn finish_phase(&mut self) -> io::Result<()> {
            self.0.push(Event::FinishPhase);
            Ok(())
        }
    }

    fn section(y: i32, entries: &[(usize, BlockId)]) -> Section {
        let mut blocks = vec![0; SECTION_VOLUME];
        for &(i, id) in entries {
            blocks[i] = id;
        }
        Section::new(y, blocks).unwrap()
    }

    fn column(x: i32, z: i32, sections: Vec<Section>) -> Column {
        Column::new(ColumnPos::new(x, z), sections)
    }

    #[test]
    fn test_rectangle_excludes_columns() {
        let world = MemoryWorld::new(vec![
            column(0, 0, vec![section(0, &[(0, 56)])]),
            column(5, 5, vec![section(0, &[(0, 56)])]),
        ]);
        let scanner = Scanner::new(&world, 56, Some(Rect::new(0, 0, 0, 0)));

        let mut recorder = Recorder::default();
        let report = scanner.run(&mut recorder).unwrap();

        assert_eq!(report.matches, vec![BlockPos::new(0, 0, 0)]);
        assert_eq!(report.columns_total, 1);
        assert_eq!(report.columns_processed, 1);
        assert_eq!(
            recorder.0,
            vec![
                Event::Counted(1),
                Event::FinishPhase,
                Event::Processing(1, 1),
                Event::FinishPhase
            ]
        );
    }

    #[test]
    fn test_no_matches_still_reports_progress() {
        let world = MemoryWorld::new(vec![
            column(0, 0, vec![section(0, &[(10, 3)])]),
            column(1, 0, vec![section(1, &[])]),
            column(2, 0, Vec::new()),
        ]);
        let scanner = Scanner::new(&world, 56, None);

        let mut recorder = Recorder::default();
        let report = scanner.run(&mut recorder).unwrap();

        assert!(report.matches.is_empty());
        assert_eq!(report.columns_total, 3);
        assert_eq!(
            recorder.0,
            vec![
                Event::Counted(1),
                Event::Counted(2),
                Event::Counted(3),
                Event::FinishPhase,
                Event::Processing(1, 3),
                Event::Processing(2, 3),
                Event::Processing(3, 3),
                Event::FinishPhase
            ]
        );
    }

    #[test]
    fn test_source_is_enumerated_twice() {
        let world = MemoryWorld::new(vec![column(0, 0, Vec::new())]);
        Scanner::new(&world, 1, None)
            .run(&mut Recorder::default())
            .unwrap();
        assert_eq!(world.passes.get(), 2);
    }

    #[test]
    fn test_match_order_is_encounter_order() {
        // Deliberately not sorted by coordinate.
        let world = MemoryWorld::new(vec![
            column(3, 0, vec![section(2, &[(5, 9), (1, 9)]), section(0, &[(4095, 9)])]),
            column(-1, 0, vec![section(0, &[(16, 9)])]),
        ]);
        let report = Scanner::new(&world, 9, None)
            .run(&mut Recorder::default())
            .unwrap();

        assert_eq!(
            report.matches,
            vec![
                BlockPos::new(49, 32, 0),
                BlockPos::new(53, 32, 0),
                BlockPos::new(63, 15, 15),
                BlockPos::new(-16, 0, 1),
            ]
        );
    }

    #[test]
    fn test_every_block_of_a_full_section_matches() {
        let world = MemoryWorld::new(vec![column(
            -2,
            7,
            vec![Section::new(-1, vec![1; SECTION_VOLUME]).unwrap()],
        )]);
        let report = Scanner::new(&world, 1, None)
            .run(&mut Recorder::default())
            .unwrap();

        assert_eq!(report.matches.len(), SECTION_VOLUME);
        assert_eq!(report.matches[0], BlockPos::new(-32, -16, 112));
        assert_eq!(report.matches[SECTION_VOLUME - 1], BlockPos::new(-17, -1, 127));
    }

    #[test]
    fn test_filter_decision_is_stable() {
        let mut rng = rand::thread_rng();
        let world = MemoryWorld::new(Vec::new());
        let scanner = Scanner::new(&world, 0, Some(Rect::new(-10, 10, 5, -5)));

        for _ in 0..10_000 {
            let pos = ColumnPos::new(rng.gen_range(-20..20), rng.gen_range(-20..20));
            let first = scanner.accepts(pos);
            let second = scanner.accepts(pos);
            assert_eq!(first, second);
            assert_eq!(first, (-10..=10).contains(&pos.x) && (-5..=5).contains(&pos.z));
        }
    }

    #[test]
    fn test_without_rect_everything_is_accepted() {
        let world = MemoryWorld::new(Vec::new());
        let scanner = Scanner::new(&world, 0, None);
        assert!(scanner.accepts(ColumnPos::new(i32::MIN, i32::MAX)));
        assert!(scanner.accepts(ColumnPos::new(0, 0)));
    }

    #[test]
    fn test_data_error_aborts_scan() {
        let world = BrokenWorld {
            columns: vec![
                column(0, 0, vec![section(0, &[(0, 1)])]),
                column(1, 0, Vec::new()),
            ],
            fail_at: 1,
        };
        let result = Scanner::new(&world, 1, None).run(&mut Recorder::default());
        assert!(matches!(
            result,
            Err(ScanError::World(WorldError::MissingTag(_, "Level")))
        ));
    }

    #[test]
    fn test_rejected_columns_are_not_processed() {
        let world = MemoryWorld::new(vec![
            column(100, 100, vec![section(0, &[(0, 1)])]),
            column(0, 0, vec![section(0, &[(0, 1)])]),
            column(-100, 0, vec![section(0, &[(0, 1)])]),
        ]);
        let scanner = Scanner::new(&world, 1, Some(Rect::new(-1, 1, -1, 1)));

        let mut recorder = Recorder::default();
        let (processed, matches) = scanner.collect(1, &mut recorder).unwrap();
        assert_eq!(processed, 1);
        assert_eq!(matches, vec![BlockPos::new(0, 0, 0)]);
        assert_eq!(
            recorder.0,
            vec![Event::Processing(1, 1), Event::FinishPhase]
        );
    }
}
