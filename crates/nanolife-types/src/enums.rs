//! Enumeration types for the Nanolife simulation.
//!
//! [`Direction`] is the four-way heading used for sensing, movement, and
//! the neighbor-targeting instructions. [`Opcode`] is the interpreter's
//! instruction table: genome cells holding 1 through 19 dispatch to an
//! operation; every other value is a no-op that still consumes one fetch
//! cycle.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Headings
// ---------------------------------------------------------------------------

/// One of the four cardinal headings a bot can face.
///
/// The numeric codes (`East = 0` through `South = 3`) are part of the
/// genome encoding: the record-heading instruction writes them into
/// working memory, so they must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward increasing x (linear index + 1).
    East,
    /// Toward decreasing y (linear index - width).
    North,
    /// Toward decreasing x (linear index - 1).
    West,
    /// Toward increasing y (linear index + width).
    South,
}

impl Direction {
    /// All headings in rotation order.
    pub const ALL: [Self; 4] = [Self::East, Self::North, Self::West, Self::South];

    /// The numeric heading code written by the record-heading instruction.
    pub const fn code(self) -> i16 {
        match self {
            Self::East => 0,
            Self::North => 1,
            Self::West => 2,
            Self::South => 3,
        }
    }

    /// Decode a heading code; values outside 0..=3 yield `None`.
    pub const fn from_code(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::East),
            1 => Some(Self::North),
            2 => Some(Self::West),
            3 => Some(Self::South),
            _ => None,
        }
    }

    /// Advance one step along the rotation cycle (the rotate-cw opcode).
    pub const fn rotate_cw(self) -> Self {
        match self {
            Self::East => Self::North,
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
        }
    }

    /// Retreat one step along the rotation cycle (the rotate-ccw opcode).
    pub const fn rotate_ccw(self) -> Self {
        match self {
            Self::East => Self::South,
            Self::North => Self::East,
            Self::West => Self::North,
            Self::South => Self::West,
        }
    }

    /// The opposing heading, used by backward movement and crossover
    /// placement. Each heading maps through a fixed table rather than
    /// arithmetic negation so the pairing stays explicit.
    pub const fn opposite(self) -> Self {
        match self {
            Self::East => Self::West,
            Self::North => Self::South,
            Self::West => Self::East,
            Self::South => Self::North,
        }
    }
}

// ---------------------------------------------------------------------------
// Instruction table
// ---------------------------------------------------------------------------

/// An interpreter instruction, decoded from a genome cell.
///
/// The discriminants are the wire encoding: genome cells holding these
/// exact values dispatch to the corresponding operation. The mapping is
/// load-bearing for any persisted diagnostic record, so it is fixed:
///
/// | value | operation |
/// |---|---|
/// | 1 | data pointer + 1 |
/// | 2 | data pointer - 1 |
/// | 3 | memory cell + 1 |
/// | 4 | memory cell - 1 |
/// | 5 | loop open |
/// | 6 | loop close |
/// | 7 | sense the cell ahead |
/// | 8 | record heading into memory |
/// | 9 | copy memory cell to offspring draft |
/// | 10 | copy code cell to offspring draft |
/// | 11 | rotate cw |
/// | 12 | rotate ccw |
/// | 13 | move forward |
/// | 14 | move backward |
/// | 15 | reproduce (asexual) |
/// | 16 | reproduce (crossover) |
/// | 17 | instantiate offspring from draft |
/// | 18 | attack the bot ahead |
/// | 19 | divide energy with the bot ahead |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    /// Increment the data pointer.
    PointerInc = 1,
    /// Decrement the data pointer.
    PointerDec = 2,
    /// Increment the memory cell under the data pointer.
    MemoryInc = 3,
    /// Decrement the memory cell under the data pointer.
    MemoryDec = 4,
    /// Open a loop frame, testing the cell under the data pointer.
    LoopOpen = 5,
    /// Close the innermost loop frame, re-testing its recorded cell.
    LoopClose = 6,
    /// Write 0 (empty or out of bounds), 1 (incompatible neighbor), or
    /// 2 (compatible neighbor) for the cell ahead into memory.
    Sense = 7,
    /// Write the current heading code into memory.
    RecordHeading = 8,
    /// Append the memory cell under the data pointer to the offspring
    /// draft buffer.
    CopyDraftFromMemory = 9,
    /// Append the genome cell at the current program position to the
    /// offspring draft, consuming an extra fetch step.
    CopyDraftFromCode = 10,
    /// Rotate the heading one step along the cycle.
    RotateCw = 11,
    /// Rotate the heading one step against the cycle.
    RotateCcw = 12,
    /// Move into the cell ahead if it is free.
    MoveForward = 13,
    /// Move into the cell behind if it is free.
    MoveBackward = 14,
    /// Spawn a mutated copy of the genome into the cell ahead.
    Reproduce = 15,
    /// Cross the genome with the bot ahead, placing the child behind.
    Crossover = 16,
    /// Spawn a child built from the offspring draft, unmutated.
    InstantiateDraft = 17,
    /// Siphon a tenth of the energy of the bot ahead.
    Attack = 18,
    /// Average energy with a compatible bot ahead.
    DivideEnergy = 19,
}

impl Opcode {
    /// Decode a genome cell into an opcode.
    ///
    /// Returns `None` for 0, negative values, and anything past the
    /// table; those cells still consume a fetch cycle but do nothing.
    pub const fn from_cell(cell: i16) -> Option<Self> {
        match cell {
            1 => Some(Self::PointerInc),
            2 => Some(Self::PointerDec),
            3 => Some(Self::MemoryInc),
            4 => Some(Self::MemoryDec),
            5 => Some(Self::LoopOpen),
            6 => Some(Self::LoopClose),
            7 => Some(Self::Sense),
            8 => Some(Self::RecordHeading),
            9 => Some(Self::CopyDraftFromMemory),
            10 => Some(Self::CopyDraftFromCode),
            11 => Some(Self::RotateCw),
            12 => Some(Self::RotateCcw),
            13 => Some(Self::MoveForward),
            14 => Some(Self::MoveBackward),
            15 => Some(Self::Reproduce),
            16 => Some(Self::Crossover),
            17 => Some(Self::InstantiateDraft),
            18 => Some(Self::Attack),
            19 => Some(Self::DivideEnergy),
            _ => None,
        }
    }

    /// The genome cell value that encodes this opcode.
    pub const fn cell(self) -> i16 {
        match self {
            Self::PointerInc => 1,
            Self::PointerDec => 2,
            Self::MemoryInc => 3,
            Self::MemoryDec => 4,
            Self::LoopOpen => 5,
            Self::LoopClose => 6,
            Self::Sense => 7,
            Self::RecordHeading => 8,
            Self::CopyDraftFromMemory => 9,
            Self::CopyDraftFromCode => 10,
            Self::RotateCw => 11,
            Self::RotateCcw => 12,
            Self::MoveForward => 13,
            Self::MoveBackward => 14,
            Self::Reproduce => 15,
            Self::Crossover => 16,
            Self::InstantiateDraft => 17,
            Self::Attack => 18,
            Self::DivideEnergy => 19,
        }
    }
}
