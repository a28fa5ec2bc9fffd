//! Runtime state of a single bot.

use std::sync::Arc;

use nanolife_types::{BotId, BotSnapshot, CellIndex, Color, Direction, Genome};
use rand::Rng;
use rust_decimal::Decimal;

use crate::lineage::LineageRecord;

/// Everything needed to bring a new bot into the world, short of its
/// identifier and the loop-stack sizing that comes from configuration.
#[derive(Debug)]
pub struct BotSeed {
    /// The bot's heritable program.
    pub genome: Genome,
    /// Grid cell the bot starts on.
    pub position: CellIndex,
    /// Initial facing direction.
    pub heading: Direction,
    /// Starting energy.
    pub energy: Decimal,
    /// Reproductive depth: 0 for spawns, max(parents) + 1 for births.
    pub generation: u32,
    /// Lifespan in ticks.
    pub age: u32,
    /// The parent's lineage record; `None` for spawned bots.
    pub parent: Option<Arc<LineageRecord>>,
}

/// One simulated organism: genome, interpreter registers, working
/// buffers, and physical state.
///
/// Fields are public: the interpreter and the tick cycle manipulate bots
/// directly, and there are no internal invariants beyond the buffer
/// lengths fixed at construction.
#[derive(Debug, Clone)]
pub struct Bot {
    /// Stable identifier, unique for the lifetime of a world.
    pub id: BotId,
    /// The heritable program, immutable after creation.
    pub genome: Genome,
    /// Working scratch, same length as the genome, zero-initialized.
    pub memory: Vec<i16>,
    /// Offspring draft buffer, same length as the genome.
    pub draft: Vec<i16>,
    /// Next free slot in the draft buffer.
    pub draft_cursor: usize,
    /// Program counter. May leave `[0, genome length)` through normal
    /// execution; the bot then idles rather than erroring.
    pub program_counter: i32,
    /// Data pointer, with the same out-of-range idling behavior.
    pub data_pointer: i32,
    /// Loop-frame return targets, indexed by frame depth.
    pub loop_returns: Vec<i32>,
    /// Loop-frame tested addresses, parallel to `loop_returns`.
    pub loop_addrs: Vec<i32>,
    /// Current loop nesting depth. Exceeding [`Self::max_loop_depth`]
    /// permanently stalls the bot.
    pub loop_depth: usize,
    /// Loop nesting bound, fixed at construction together with the stack
    /// sizing so the two can never disagree.
    pub max_loop_depth: usize,
    /// Grid cell the bot occupies.
    pub position: CellIndex,
    /// Facing direction for sensing, movement, and all neighbor ops.
    pub heading: Direction,
    /// Remaining energy; the bot dies at or below zero.
    pub energy: Decimal,
    /// Remaining lifespan in ticks; the bot dies at zero.
    pub age: u32,
    /// Reproductive depth.
    pub generation: u32,
    /// Display color, derived from the genome tail at creation.
    pub color: Color,
    /// This bot's own lineage record, linked to its parent's.
    pub lineage: Arc<LineageRecord>,
}

impl Bot {
    /// Construct a bot from a seed. Buffers are sized from the genome;
    /// the loop stacks get `max_loop_depth + 1` slots so the frame that
    /// overflows the bound still has somewhere to land before the stall
    /// gate catches it.
    pub fn new(id: BotId, seed: BotSeed, max_loop_depth: usize) -> Self {
        let length = seed.genome.len();
        let stack_slots = max_loop_depth.saturating_add(1);
        let color = Color::from_genome(&seed.genome);
        let lineage = seed.parent.as_ref().map_or_else(
            || LineageRecord::root(id, seed.generation, seed.genome.clone()),
            |parent| LineageRecord::child(parent, id, seed.generation, seed.genome.clone()),
        );
        Self {
            id,
            genome: seed.genome,
            memory: vec![0; length],
            draft: vec![0; length],
            draft_cursor: 0,
            program_counter: 0,
            data_pointer: 0,
            loop_returns: vec![0; stack_slots],
            loop_addrs: vec![0; stack_slots],
            loop_depth: 0,
            max_loop_depth,
            position: seed.position,
            heading: seed.heading,
            energy: seed.energy,
            age: seed.age,
            generation: seed.generation,
            color,
            lineage,
        }
    }

    /// A uniformly random cardinal direction.
    pub fn random_heading<R: Rng>(rng: &mut R) -> Direction {
        Direction::from_code(rng.random_range(0..4)).unwrap_or(Direction::East)
    }

    /// Liveness test applied by the lifecycle sweep: positive energy and
    /// remaining lifespan.
    pub fn is_alive(&self) -> bool {
        self.energy > Decimal::ZERO && self.age > 0
    }

    /// The memory cell under the data pointer, or 0 when the pointer is
    /// out of range.
    pub fn mem_read(&self) -> i16 {
        usize::try_from(self.data_pointer)
            .ok()
            .and_then(|i| self.memory.get(i).copied())
            .unwrap_or(0)
    }

    /// The memory cell at an arbitrary address, or 0 when out of range.
    pub fn mem_at(&self, address: i32) -> i16 {
        usize::try_from(address)
            .ok()
            .and_then(|i| self.memory.get(i).copied())
            .unwrap_or(0)
    }

    /// Write the memory cell under the data pointer; out-of-range
    /// pointers make this a no-op.
    pub fn mem_write(&mut self, value: i16) {
        if let Some(cell) = usize::try_from(self.data_pointer)
            .ok()
            .and_then(|i| self.memory.get_mut(i))
        {
            *cell = value;
        }
    }

    /// Whether the draft buffer has no free slots left.
    pub const fn draft_is_full(&self) -> bool {
        self.draft_cursor >= self.draft.len()
    }

    /// Append a cell to the draft buffer; a full buffer makes this a
    /// no-op.
    pub fn draft_push(&mut self, value: i16) {
        if let Some(slot) = self.draft.get_mut(self.draft_cursor) {
            *slot = value;
            self.draft_cursor = self.draft_cursor.saturating_add(1);
        }
    }

    /// Point-in-time read-only view for callbacks and reporting.
    pub fn snapshot(&self) -> BotSnapshot {
        BotSnapshot {
            id: self.id,
            position: self.position,
            heading: self.heading,
            energy: self.energy,
            age: self.age,
            generation: self.generation,
            color: self.color,
            genome: self.genome.clone(),
        }
    }
}
