//! The heritable program of a bot and the display color derived from it.
//!
//! A genome is a fixed-length sequence of small integer cells. There is no
//! type tag separating opcodes from data: a cell read through the program
//! counter is an instruction, the same cell read through the data pointer
//! is a value. All bots in one world share a single genome length.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Exclusive upper bound for generated gene values: random genomes and
/// mutations draw uniformly from `[0, 20)`, which covers the whole opcode
/// table plus the 0 no-op.
pub const GENE_VALUE_BOUND: i16 = 20;

/// Number of trailing cells that carry identity: the compatibility sample
/// and the display color are both derived from the last nine cells.
pub const IDENTITY_TAIL: usize = 9;

/// A bot's heritable program: an ordered, fixed-length cell sequence.
///
/// Immutable after creation; inheritance copies and (for most
/// reproduction paths) mutates a fresh buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genome {
    cells: Box<[i16]>,
}

impl Genome {
    /// Wrap an explicit cell sequence.
    pub fn from_cells(cells: Vec<i16>) -> Self {
        Self {
            cells: cells.into_boxed_slice(),
        }
    }

    /// Generate `length` uniformly random cells in `[0, GENE_VALUE_BOUND)`.
    pub fn random<R: Rng>(length: usize, rng: &mut R) -> Self {
        let cells = (0..length)
            .map(|_| rng.random_range(0..GENE_VALUE_BOUND))
            .collect();
        Self { cells }
    }

    /// Number of cells.
    pub const fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the genome has no cells. Valid worlds never produce one;
    /// the constructor exists for serde and tests.
    pub const fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cell at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<i16> {
        self.cells.get(index).copied()
    }

    /// The cell `back` positions from the end (`back = 1` is the last
    /// cell). `None` when `back` is 0 or exceeds the length.
    pub fn tail_cell(&self, back: usize) -> Option<i16> {
        let index = self.len().checked_sub(back)?;
        self.cells.get(index).copied()
    }

    /// Read-only view of all cells.
    pub const fn cells(&self) -> &[i16] {
        &self.cells
    }

    /// Single-point crossover: cells `[0, split)` from `self`, the rest
    /// from `other`. Returns `None` when the lengths differ.
    pub fn splice(&self, other: &Self, split: usize) -> Option<Self> {
        if self.len() != other.len() {
            return None;
        }
        let cells = self
            .cells
            .iter()
            .take(split)
            .chain(other.cells.iter().skip(split))
            .copied()
            .collect();
        Some(Self { cells })
    }
}

/// Display color of a bot, fixed at creation.
///
/// Each channel is derived from a triple of the genome's trailing identity
/// cells: `sum * 255 / 57`, clamped to the channel range (57 is the
/// maximum triple sum for generated genomes, so fully "hot" tails map to
/// pure channels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel, from cells at tail offsets 9..=7.
    pub r: u8,
    /// Green channel, from cells at tail offsets 6..=4.
    pub g: u8,
    /// Blue channel, from cells at tail offsets 3..=1.
    pub b: u8,
}

impl Color {
    /// Derive the color from a genome's identity tail. Missing tail cells
    /// (genomes shorter than nine cells) count as zero.
    pub fn from_genome(genome: &Genome) -> Self {
        Self {
            r: Self::channel(genome, 9),
            g: Self::channel(genome, 6),
            b: Self::channel(genome, 3),
        }
    }

    /// Scale the sum of the tail triple starting `back` cells from the
    /// end into a color channel.
    fn channel(genome: &Genome, back: usize) -> u8 {
        let total: i32 = (0..3_usize)
            .filter_map(|offset| back.checked_sub(offset))
            .filter_map(|b| genome.tail_cell(b))
            .map(i32::from)
            .sum();
        let scaled = total
            .saturating_mul(255)
            .checked_div(57)
            .unwrap_or(0)
            .clamp(0, 255);
        u8::try_from(scaled).unwrap_or(u8::MAX)
    }
}
