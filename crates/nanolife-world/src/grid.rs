//! The world grid: a row-major occupancy buffer with linear adjacency.
//!
//! Cells are addressed by a single linear [`CellIndex`] into a
//! `width * height` buffer. Adjacency is linear over that buffer:
//! north/south step a full row, east/west step one cell, and an east or
//! west step taken at a row edge continues into the adjacent row. Steps
//! are rejected only when they leave the buffer entirely.
//!
//! The grid stores population slots (indices into the engine's bot
//! vector), not bots themselves. It is rebuilt from the live population
//! at the start of every tick, so mid-tick reads reflect start-of-tick
//! positions except where an explicit update has been applied.

use nanolife_types::{CellIndex, Direction};
use tracing::debug;

use crate::error::WorldError;

/// Row-major occupancy grid.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Option<usize>>,
}

impl Grid {
    /// Create an empty grid of `width * height` cells.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ZeroArea`] when either dimension is zero or
    /// the area overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, WorldError> {
        let count = width
            .checked_mul(height)
            .filter(|&c| c > 0)
            .ok_or(WorldError::ZeroArea { width, height })?;
        debug!(width, height, cells = count, "grid created");
        Ok(Self {
            width,
            height,
            cells: vec![None; count],
        })
    }

    /// Grid width in cells.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub const fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Population slot registered at `cell`, if any. Out-of-bounds cells
    /// read as empty.
    pub fn occupant(&self, cell: CellIndex) -> Option<usize> {
        self.cells.get(cell.0).copied().flatten()
    }

    /// Whether `cell` currently holds a bot.
    pub fn is_occupied(&self, cell: CellIndex) -> bool {
        self.occupant(cell).is_some()
    }

    /// Register population slot `slot` at `cell`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] for cells outside the grid and
    /// [`WorldError::CellOccupied`] when the cell already holds a bot.
    pub fn place(&mut self, cell: CellIndex, slot: usize) -> Result<(), WorldError> {
        let entry = self
            .cells
            .get_mut(cell.0)
            .ok_or(WorldError::OutOfBounds(cell))?;
        if entry.is_some() {
            return Err(WorldError::CellOccupied(cell));
        }
        *entry = Some(slot);
        Ok(())
    }

    /// Remove any registration at `cell`. Out-of-bounds cells are ignored.
    pub fn clear(&mut self, cell: CellIndex) {
        if let Some(entry) = self.cells.get_mut(cell.0) {
            *entry = None;
        }
    }

    /// Empty every cell, ahead of a rebuild from the live population.
    pub fn clear_all(&mut self) {
        self.cells.fill(None);
    }

    /// The cell one step from `cell` in `direction`, or `None` when the
    /// step leaves the buffer. East/west steps at a row edge land in the
    /// adjacent row rather than being rejected.
    pub fn neighbor(&self, cell: CellIndex, direction: Direction) -> Option<CellIndex> {
        let index = match direction {
            Direction::East => cell.0.checked_add(1),
            Direction::North => cell.0.checked_sub(self.width),
            Direction::West => cell.0.checked_sub(1),
            Direction::South => cell.0.checked_add(self.width),
        }?;
        (index < self.cells.len()).then_some(CellIndex(index))
    }

    /// Column and row of `cell`, or `None` when out of bounds.
    pub fn coords(&self, cell: CellIndex) -> Option<(usize, usize)> {
        (cell.0 < self.cells.len()).then(|| (cell.0 % self.width, cell.0 / self.width))
    }
}
