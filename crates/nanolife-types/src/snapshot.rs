//! Read-only views of simulation state for reporting and inspection.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::enums::Direction;
use crate::genome::{Color, Genome};
use crate::ids::{BotId, CellIndex};

/// Point-in-time view of a single bot, detached from world internals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotSnapshot {
    /// Stable identifier of the bot.
    pub id: BotId,
    /// Grid cell the bot occupies.
    pub position: CellIndex,
    /// Facing direction.
    pub heading: Direction,
    /// Remaining energy.
    pub energy: Decimal,
    /// Remaining lifespan, in ticks.
    pub age: u32,
    /// Reproductive depth: 0 for spawned bots, parent + 1 otherwise.
    pub generation: u32,
    /// Display color derived from the genome tail.
    pub color: Color,
    /// Copy of the bot's program.
    pub genome: Genome,
}

/// The current best-fit bot: the highest-energy bot whose generation
/// clears the reporting floor. Absent when no bot qualifies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestBot {
    /// Identifier of the selected bot.
    pub id: BotId,
    /// Energy at selection time.
    pub energy: Decimal,
    /// Generation at selection time.
    pub generation: u32,
    /// Copy of the selected bot's genome, as written to the report.
    pub genome: Genome,
}

/// One ancestor in a bot's lineage, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineageEntry {
    /// Identifier the ancestor held while alive.
    pub id: BotId,
    /// The ancestor's generation.
    pub generation: u32,
    /// The ancestor's genome at birth.
    pub genome: Genome,
}

/// Aggregate outcome of one completed tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickSummary {
    /// Tick number, starting at 1 for the first completed tick.
    pub tick: u64,
    /// Live population after sweep and spawning.
    pub population: usize,
    /// Bots removed this tick.
    pub deaths: usize,
    /// Bots added this tick, both born and spawned.
    pub spawned: usize,
    /// Sum of energy across the live population.
    pub total_energy: Decimal,
    /// Best-fit bot after this tick, when one qualifies.
    pub best: Option<BestBot>,
}
