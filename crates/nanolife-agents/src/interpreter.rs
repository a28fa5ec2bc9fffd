//! One-instruction-per-tick genome interpreter.
//!
//! [`step`] executes exactly one instruction for one bot. It mutates only
//! the bot itself; every world side effect (grid registration, a second
//! bot's energy) is returned as a [`StepEffect`] for the tick cycle to
//! apply. Neighbor state is delivered read-only through a [`StepContext`]
//! built by the caller from the grid as it stands mid-tick, so a bot may
//! observe a neighbor that already acted earlier in the same pass.
//!
//! Every precondition failure is a silent no-op for the tick; nothing in
//! here errors or panics.

use std::sync::Arc;

use nanolife_types::{CellIndex, Genome, Opcode};
use rand::Rng;
use rust_decimal::Decimal;

use crate::bot::Bot;
use crate::config::BotParams;
use crate::genetics::{compatible, mutate};
use crate::lineage::LineageRecord;

/// Read-only view of one bot adjacent to the acting bot.
#[derive(Debug, Clone)]
pub struct NeighborInfo {
    /// Grid cell the neighbor occupies.
    pub cell: CellIndex,
    /// The neighbor's population slot, for applying returned effects.
    pub slot: usize,
    /// Copy of the neighbor's genome.
    pub genome: Genome,
    /// The neighbor's energy at context-build time.
    pub energy: Decimal,
    /// The neighbor's generation.
    pub generation: u32,
}

/// What the acting bot can see in one adjacent cell.
#[derive(Debug, Clone)]
pub enum CellView {
    /// The step in that direction leaves the grid.
    OutOfBounds,
    /// An in-bounds, unoccupied cell.
    Empty(CellIndex),
    /// An occupied cell and its occupant.
    Occupied(NeighborInfo),
}

/// Per-step context assembled by the tick cycle before each instruction.
#[derive(Debug, Clone)]
pub struct StepContext {
    /// The cell one step ahead, in the bot's heading.
    pub forward: CellView,
    /// The cell one step behind, via the heading's opposite.
    pub behind: CellView,
    /// Whether the population has reached capacity, blocking reproduction.
    pub at_capacity: bool,
}

/// A reproduction effect: everything the tick cycle needs to create the
/// child bot.
#[derive(Debug)]
pub struct SpawnChild {
    /// Cell to place the child on.
    pub cell: CellIndex,
    /// The child's genome.
    pub genome: Genome,
    /// Energy transferred to the child.
    pub energy: Decimal,
    /// The child's generation.
    pub generation: u32,
    /// The reproducing bot's lineage record.
    pub parent: Arc<LineageRecord>,
}

/// World side effect of one instruction, applied by the tick cycle after
/// the step returns.
#[derive(Debug)]
pub enum StepEffect {
    /// No world state changes.
    None,
    /// The bot moved; register the new cell. The origin cell is left
    /// registered until the next grid rebuild.
    Move {
        /// Cell the bot left.
        from: CellIndex,
        /// Cell the bot now occupies.
        to: CellIndex,
    },
    /// A child bot must be created.
    Spawn(SpawnChild),
    /// An attack: debit the victim by exactly `transfer`.
    Drain {
        /// Population slot of the attacked neighbor.
        victim: usize,
        /// Energy already credited to the attacker.
        transfer: Decimal,
    },
    /// Energy sharing: set the partner's energy to `mean`. The acting
    /// bot's energy is already set.
    Share {
        /// Population slot of the sharing partner.
        partner: usize,
        /// The arithmetic mean of both energies.
        mean: Decimal,
    },
}

/// Execute one instruction for `bot`.
///
/// Order: energy and age tick down unconditionally; a bot whose loop
/// stack has overflowed, or whose program counter or data pointer is out
/// of range, idles without fetching; otherwise the instruction under the
/// program counter is fetched, the counter advances, and the instruction
/// dispatches. Cell values outside the opcode table are no-ops that still
/// consume the fetch cycle.
#[allow(clippy::too_many_lines)]
pub fn step<R: Rng>(
    bot: &mut Bot,
    ctx: &StepContext,
    params: &BotParams,
    rng: &mut R,
) -> StepEffect {
    bot.energy = bot.energy.saturating_sub(Decimal::ONE);
    bot.age = bot.age.saturating_sub(1);

    if bot.loop_depth > bot.max_loop_depth {
        return StepEffect::None;
    }
    let length = i32::try_from(bot.genome.len()).unwrap_or(i32::MAX);
    if bot.program_counter < 0
        || bot.program_counter >= length
        || bot.data_pointer < 0
        || bot.data_pointer >= length
    {
        return StepEffect::None;
    }

    let cell = usize::try_from(bot.program_counter)
        .ok()
        .and_then(|i| bot.genome.get(i))
        .unwrap_or(0);
    bot.program_counter = bot.program_counter.saturating_add(1);
    let Some(opcode) = Opcode::from_cell(cell) else {
        return StepEffect::None;
    };

    match opcode {
        Opcode::PointerInc => {
            bot.data_pointer = bot.data_pointer.saturating_add(1);
            StepEffect::None
        }
        Opcode::PointerDec => {
            bot.data_pointer = bot.data_pointer.saturating_sub(1);
            StepEffect::None
        }
        Opcode::MemoryInc => {
            bot.mem_write(bot.mem_read().saturating_add(1));
            StepEffect::None
        }
        Opcode::MemoryDec => {
            bot.mem_write(bot.mem_read().saturating_sub(1));
            StepEffect::None
        }
        Opcode::LoopOpen => loop_open(bot),
        Opcode::LoopClose => loop_close(bot),
        Opcode::Sense => {
            let value = match &ctx.forward {
                CellView::Occupied(neighbor) => {
                    if compatible(Some(&bot.genome), Some(&neighbor.genome), rng) {
                        2
                    } else {
                        1
                    }
                }
                CellView::OutOfBounds | CellView::Empty(_) => 0,
            };
            bot.mem_write(value);
            StepEffect::None
        }
        Opcode::RecordHeading => {
            bot.mem_write(bot.heading.code());
            StepEffect::None
        }
        Opcode::CopyDraftFromMemory => {
            bot.draft_push(bot.mem_read());
            StepEffect::None
        }
        Opcode::CopyDraftFromCode => copy_draft_from_code(bot),
        Opcode::RotateCw => {
            bot.heading = bot.heading.rotate_cw();
            StepEffect::None
        }
        Opcode::RotateCcw => {
            bot.heading = bot.heading.rotate_ccw();
            StepEffect::None
        }
        Opcode::MoveForward => try_move(bot, &ctx.forward),
        Opcode::MoveBackward => try_move(bot, &ctx.behind),
        Opcode::Reproduce => reproduce_asexual(bot, ctx, params, rng),
        Opcode::Crossover => reproduce_crossover(bot, ctx, params, rng),
        Opcode::InstantiateDraft => instantiate_draft(bot, ctx),
        Opcode::Attack => attack(bot, ctx),
        Opcode::DivideEnergy => divide_energy(bot, ctx, rng),
    }
}

/// Open a loop frame. The tested address is recorded whether or not the
/// cell is nonzero; the return target is written only for a nonzero cell,
/// so a frame opened on zero carries a stale target. Depth always
/// increments.
fn loop_open(bot: &mut Bot) -> StepEffect {
    let depth = bot.loop_depth;
    if let Some(slot) = bot.loop_addrs.get_mut(depth) {
        *slot = bot.data_pointer;
    }
    if bot.mem_read() != 0
        && let Some(slot) = bot.loop_returns.get_mut(depth)
    {
        *slot = bot.program_counter;
    }
    bot.loop_depth = depth.saturating_add(1);
    StepEffect::None
}

/// Close the innermost loop frame: re-read the cell at the frame's tested
/// address; nonzero jumps back to the stored return target (the frame
/// stays), zero pops the frame. With no open frame this is a no-op.
fn loop_close(bot: &mut Bot) -> StepEffect {
    let Some(frame) = bot.loop_depth.checked_sub(1) else {
        return StepEffect::None;
    };
    let address = bot.loop_addrs.get(frame).copied().unwrap_or(0);
    if bot.mem_at(address) != 0 {
        bot.program_counter = bot.loop_returns.get(frame).copied().unwrap_or(0);
    } else {
        bot.loop_depth = frame;
    }
    StepEffect::None
}

/// Append the genome cell under the already-advanced program counter to
/// the draft, then advance the counter one extra step. A full draft makes
/// the whole instruction a no-op, extra advance included.
fn copy_draft_from_code(bot: &mut Bot) -> StepEffect {
    if bot.draft_is_full() {
        return StepEffect::None;
    }
    let cell = usize::try_from(bot.program_counter)
        .ok()
        .and_then(|i| bot.genome.get(i))
        .unwrap_or(0);
    bot.draft_push(cell);
    bot.program_counter = bot.program_counter.saturating_add(1);
    StepEffect::None
}

/// Move into `target` when it is an empty in-bounds cell.
fn try_move(bot: &mut Bot, target: &CellView) -> StepEffect {
    let CellView::Empty(to) = *target else {
        return StepEffect::None;
    };
    let from = bot.position;
    bot.position = to;
    StepEffect::Move { from, to }
}

/// One fifth of the bot's current energy.
fn fifth(energy: Decimal) -> Decimal {
    energy
        .checked_div(Decimal::from(5))
        .unwrap_or(Decimal::ZERO)
}

fn reproduce_asexual<R: Rng>(
    bot: &mut Bot,
    ctx: &StepContext,
    params: &BotParams,
    rng: &mut R,
) -> StepEffect {
    let share = fifth(bot.energy);
    if share <= Decimal::ZERO || ctx.at_capacity {
        return StepEffect::None;
    }
    let CellView::Empty(cell) = ctx.forward else {
        return StepEffect::None;
    };
    let genome = mutate(&bot.genome, params.mutation_rate, rng);
    bot.energy = bot.energy.saturating_sub(share);
    StepEffect::Spawn(SpawnChild {
        cell,
        genome,
        energy: share,
        generation: bot.generation.saturating_add(1),
        parent: Arc::clone(&bot.lineage),
    })
}

/// Crossover: requires an occupied forward cell and an empty cell behind,
/// where the child is placed. The split index is uniformly random; only
/// the acting bot pays the one-fifth energy cost, and unlike the asexual
/// path the cost is not checked for positivity first.
fn reproduce_crossover<R: Rng>(
    bot: &mut Bot,
    ctx: &StepContext,
    params: &BotParams,
    rng: &mut R,
) -> StepEffect {
    if ctx.at_capacity || bot.genome.is_empty() {
        return StepEffect::None;
    }
    let CellView::Occupied(mate) = &ctx.forward else {
        return StepEffect::None;
    };
    let CellView::Empty(cell) = ctx.behind else {
        return StepEffect::None;
    };
    let split = rng.random_range(0..bot.genome.len());
    let Some(spliced) = bot.genome.splice(&mate.genome, split) else {
        return StepEffect::None;
    };
    let genome = mutate(&spliced, params.mutation_rate, rng);
    let share = fifth(bot.energy);
    bot.energy = bot.energy.saturating_sub(share);
    StepEffect::Spawn(SpawnChild {
        cell,
        genome,
        energy: share,
        generation: bot.generation.max(mate.generation).saturating_add(1),
        parent: Arc::clone(&bot.lineage),
    })
}

/// Like the asexual path, but the child's genome is the draft buffer as
/// it stands (unfilled slots are zero) and no mutation is applied.
fn instantiate_draft(bot: &mut Bot, ctx: &StepContext) -> StepEffect {
    let share = fifth(bot.energy);
    if share <= Decimal::ZERO || ctx.at_capacity {
        return StepEffect::None;
    }
    let CellView::Empty(cell) = ctx.forward else {
        return StepEffect::None;
    };
    let genome = Genome::from_cells(bot.draft.clone());
    bot.energy = bot.energy.saturating_sub(share);
    StepEffect::Spawn(SpawnChild {
        cell,
        genome,
        energy: share,
        generation: bot.generation.saturating_add(1),
        parent: Arc::clone(&bot.lineage),
    })
}

/// Transfer one tenth of the forward neighbor's energy to the attacker.
/// The same amount is credited and debited, so the pair's total energy is
/// conserved exactly.
fn attack(bot: &mut Bot, ctx: &StepContext) -> StepEffect {
    let CellView::Occupied(victim) = &ctx.forward else {
        return StepEffect::None;
    };
    let transfer = victim
        .energy
        .checked_div(Decimal::TEN)
        .unwrap_or(Decimal::ZERO);
    bot.energy = bot.energy.saturating_add(transfer);
    StepEffect::Drain {
        victim: victim.slot,
        transfer,
    }
}

/// Set both bots' energy to their arithmetic mean, gated on one fresh
/// compatibility sample against the forward neighbor.
fn divide_energy<R: Rng>(bot: &mut Bot, ctx: &StepContext, rng: &mut R) -> StepEffect {
    let CellView::Occupied(partner) = &ctx.forward else {
        return StepEffect::None;
    };
    if !compatible(Some(&bot.genome), Some(&partner.genome), rng) {
        return StepEffect::None;
    }
    let mean = bot
        .energy
        .saturating_add(partner.energy)
        .checked_div(Decimal::TWO)
        .unwrap_or(bot.energy);
    bot.energy = mean;
    StepEffect::Share {
        partner: partner.slot,
        mean,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use nanolife_types::{BotId, Direction};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use rust_decimal_macros::dec;

    use crate::bot::BotSeed;

    use super::*;

    fn make_bot(genome: Vec<i16>, energy: Decimal, max_loop_depth: usize) -> Bot {
        Bot::new(
            BotId::from_raw(1),
            BotSeed {
                genome: Genome::from_cells(genome),
                position: CellIndex(0),
                heading: Direction::East,
                energy,
                generation: 0,
                age: 2000,
                parent: None,
            },
            max_loop_depth,
        )
    }

    fn params() -> BotParams {
        BotParams {
            mutation_rate: 0,
            ..BotParams::default()
        }
    }

    fn idle_ctx() -> StepContext {
        StepContext {
            forward: CellView::OutOfBounds,
            behind: CellView::OutOfBounds,
            at_capacity: false,
        }
    }

    fn forward_empty(cell: usize) -> StepContext {
        StepContext {
            forward: CellView::Empty(CellIndex(cell)),
            behind: CellView::OutOfBounds,
            at_capacity: false,
        }
    }

    fn occupied(genome: Vec<i16>, energy: Decimal, generation: u32) -> CellView {
        CellView::Occupied(NeighborInfo {
            cell: CellIndex(1),
            slot: 3,
            genome: Genome::from_cells(genome),
            energy,
            generation,
        })
    }

    #[test]
    fn idling_still_costs_energy_and_age() {
        let mut bot = make_bot(vec![1; 10], dec!(100), 4);
        bot.program_counter = -1;
        let mut rng = SmallRng::seed_from_u64(0);
        let effect = step(&mut bot, &idle_ctx(), &params(), &mut rng);
        assert!(matches!(effect, StepEffect::None));
        assert_eq!(bot.energy, dec!(99));
        assert_eq!(bot.age, 1999);
        assert_eq!(bot.program_counter, -1);
    }

    #[test]
    fn values_outside_the_table_consume_the_fetch() {
        let mut bot = make_bot(vec![0, 20, 1, 0, 0, 0, 0, 0, 0, 0], dec!(100), 4);
        let mut rng = SmallRng::seed_from_u64(0);
        step(&mut bot, &idle_ctx(), &params(), &mut rng);
        assert_eq!(bot.program_counter, 1);
        step(&mut bot, &idle_ctx(), &params(), &mut rng);
        assert_eq!(bot.program_counter, 2);
        assert_eq!(bot.data_pointer, 0);
    }

    #[test]
    fn pointer_and_memory_instructions() {
        // ptr-inc, mem-inc, mem-inc, ptr-dec, mem-dec
        let mut bot = make_bot(vec![1, 3, 3, 2, 4, 0, 0, 0, 0, 0], dec!(100), 4);
        let mut rng = SmallRng::seed_from_u64(0);
        for _ in 0..5 {
            step(&mut bot, &idle_ctx(), &params(), &mut rng);
        }
        assert_eq!(bot.memory.first().copied(), Some(-1));
        assert_eq!(bot.memory.get(1).copied(), Some(2));
        assert_eq!(bot.data_pointer, 0);
    }

    #[test]
    fn loop_runs_while_the_tested_cell_is_nonzero() {
        // open, mem-dec, close; cell 0 pre-set to 3.
        let mut bot = make_bot(vec![5, 4, 6, 0, 0, 0, 0, 0, 0, 0], dec!(100), 4);
        *bot.memory.get_mut(0).unwrap() = 3;
        let mut rng = SmallRng::seed_from_u64(0);
        for _ in 0..7 {
            step(&mut bot, &idle_ctx(), &params(), &mut rng);
        }
        // Three decrement iterations, then the close pops the frame.
        assert_eq!(bot.memory.first().copied(), Some(0));
        assert_eq!(bot.loop_depth, 0);
        assert_eq!(bot.program_counter, 3);
    }

    #[test]
    fn open_on_zero_cell_still_pushes_a_frame() {
        let mut bot = make_bot(vec![5, 0, 0, 0, 0, 0, 0, 0, 0, 0], dec!(100), 4);
        let mut rng = SmallRng::seed_from_u64(0);
        step(&mut bot, &idle_ctx(), &params(), &mut rng);
        assert_eq!(bot.loop_depth, 1);
        assert_eq!(bot.loop_addrs.first().copied(), Some(0));
        // Return target slot untouched: the cell was zero at open time.
        assert_eq!(bot.loop_returns.first().copied(), Some(0));
    }

    #[test]
    fn close_without_a_frame_is_a_noop() {
        let mut bot = make_bot(vec![6, 0, 0, 0, 0, 0, 0, 0, 0, 0], dec!(100), 4);
        let mut rng = SmallRng::seed_from_u64(0);
        step(&mut bot, &idle_ctx(), &params(), &mut rng);
        assert_eq!(bot.loop_depth, 0);
        assert_eq!(bot.program_counter, 1);
    }

    #[test]
    fn loop_overflow_stalls_permanently() {
        let mut bot = make_bot(vec![5; 10], dec!(100), 2);
        let mut rng = SmallRng::seed_from_u64(0);
        for _ in 0..3 {
            step(&mut bot, &idle_ctx(), &params(), &mut rng);
        }
        assert_eq!(bot.loop_depth, 3);
        assert_eq!(bot.program_counter, 3);
        // Stalled: the counter never advances again, energy still drains.
        for _ in 0..5 {
            step(&mut bot, &idle_ctx(), &params(), &mut rng);
        }
        assert_eq!(bot.program_counter, 3);
        assert_eq!(bot.energy, dec!(92));
    }

    #[test]
    fn stall_bound_is_fixed_at_construction() {
        // The nesting bound travels with the bot, not with the per-step
        // parameters, so a looser bound at step time changes nothing.
        let mut bot = make_bot(vec![5; 10], dec!(100), 2);
        let loose = BotParams {
            max_loop_depth: 1000,
            ..params()
        };
        let mut rng = SmallRng::seed_from_u64(0);
        for _ in 0..4 {
            step(&mut bot, &idle_ctx(), &loose, &mut rng);
        }
        assert_eq!(bot.loop_depth, 3);
        assert_eq!(bot.program_counter, 3);
    }

    #[test]
    fn sense_writes_zero_one_two() {
        let genome = vec![7, 7, 7, 0, 0, 0, 0, 0, 0, 0];
        let mut rng = SmallRng::seed_from_u64(0);

        let mut bot = make_bot(genome.clone(), dec!(100), 4);
        step(&mut bot, &forward_empty(1), &params(), &mut rng);
        assert_eq!(bot.memory.first().copied(), Some(0));

        let incompatible = StepContext {
            forward: occupied(vec![9; 10], dec!(10), 0),
            behind: CellView::OutOfBounds,
            at_capacity: false,
        };
        let mut bot = make_bot(genome.clone(), dec!(100), 4);
        step(&mut bot, &incompatible, &params(), &mut rng);
        assert_eq!(bot.memory.first().copied(), Some(1));

        let twin = StepContext {
            forward: occupied(genome.clone(), dec!(10), 0),
            behind: CellView::OutOfBounds,
            at_capacity: false,
        };
        let mut bot = make_bot(genome, dec!(100), 4);
        step(&mut bot, &twin, &params(), &mut rng);
        assert_eq!(bot.memory.first().copied(), Some(2));
    }

    #[test]
    fn record_heading_writes_the_direction_code() {
        let mut bot = make_bot(vec![8, 0, 0, 0, 0, 0, 0, 0, 0, 0], dec!(100), 4);
        bot.heading = Direction::South;
        let mut rng = SmallRng::seed_from_u64(0);
        step(&mut bot, &idle_ctx(), &params(), &mut rng);
        assert_eq!(bot.memory.first().copied(), Some(Direction::South.code()));
    }

    #[test]
    fn copy_from_code_takes_the_next_cell_and_skips_it() {
        let mut bot = make_bot(vec![10, 7, 1, 0, 0, 0, 0, 0, 0, 0], dec!(100), 4);
        let mut rng = SmallRng::seed_from_u64(0);
        step(&mut bot, &idle_ctx(), &params(), &mut rng);
        assert_eq!(bot.draft.first().copied(), Some(7));
        assert_eq!(bot.draft_cursor, 1);
        // The copied cell is skipped, not executed.
        assert_eq!(bot.program_counter, 2);
    }

    #[test]
    fn copy_from_code_with_a_full_draft_does_nothing() {
        let mut bot = make_bot(vec![10, 7, 0, 0, 0, 0, 0, 0, 0, 0], dec!(100), 4);
        bot.draft_cursor = bot.draft.len();
        let mut rng = SmallRng::seed_from_u64(0);
        step(&mut bot, &idle_ctx(), &params(), &mut rng);
        // Only the normal fetch advance, no extra skip.
        assert_eq!(bot.program_counter, 1);
    }

    #[test]
    fn move_forward_updates_position_and_reports_both_cells() {
        let mut bot = make_bot(vec![13, 0, 0, 0, 0, 0, 0, 0, 0, 0], dec!(100), 4);
        let mut rng = SmallRng::seed_from_u64(0);
        let effect = step(&mut bot, &forward_empty(1), &params(), &mut rng);
        match effect {
            StepEffect::Move { from, to } => {
                assert_eq!(from, CellIndex(0));
                assert_eq!(to, CellIndex(1));
            }
            other => panic!("expected move, got {other:?}"),
        }
        assert_eq!(bot.position, CellIndex(1));
    }

    #[test]
    fn blocked_moves_are_silent() {
        let blocked = StepContext {
            forward: occupied(vec![0; 10], dec!(10), 0),
            behind: CellView::OutOfBounds,
            at_capacity: false,
        };
        let mut bot = make_bot(vec![13, 14, 0, 0, 0, 0, 0, 0, 0, 0], dec!(100), 4);
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(matches!(
            step(&mut bot, &blocked, &params(), &mut rng),
            StepEffect::None
        ));
        assert!(matches!(
            step(&mut bot, &blocked, &params(), &mut rng),
            StepEffect::None
        ));
        assert_eq!(bot.position, CellIndex(0));
    }

    #[test]
    fn move_backward_uses_the_behind_cell() {
        let mut bot = make_bot(vec![14, 0, 0, 0, 0, 0, 0, 0, 0, 0], dec!(100), 4);
        let ctx = StepContext {
            forward: CellView::OutOfBounds,
            behind: CellView::Empty(CellIndex(9)),
            at_capacity: false,
        };
        let mut rng = SmallRng::seed_from_u64(0);
        let effect = step(&mut bot, &ctx, &params(), &mut rng);
        assert!(matches!(effect, StepEffect::Move { to: CellIndex(9), .. }));
        assert_eq!(bot.position, CellIndex(9));
    }

    #[test]
    fn asexual_reproduction_shares_exactly_one_fifth() {
        let mut bot = make_bot(vec![15; 10], dec!(101), 4);
        let mut rng = SmallRng::seed_from_u64(0);
        let effect = step(&mut bot, &forward_empty(1), &params(), &mut rng);
        match effect {
            StepEffect::Spawn(child) => {
                assert_eq!(child.energy, dec!(20));
                assert_eq!(child.generation, 1);
                assert_eq!(child.cell, CellIndex(1));
                // Mutation rate 0: the child genome is an exact copy.
                assert_eq!(child.genome, bot.genome);
            }
            other => panic!("expected spawn, got {other:?}"),
        }
        assert_eq!(bot.energy, dec!(80));
    }

    #[test]
    fn asexual_reproduction_requires_positive_share_and_room() {
        let mut rng = SmallRng::seed_from_u64(0);

        let mut broke = make_bot(vec![15; 10], dec!(1), 4);
        assert!(matches!(
            step(&mut broke, &forward_empty(1), &params(), &mut rng),
            StepEffect::None
        ));

        let full = StepContext {
            at_capacity: true,
            ..forward_empty(1)
        };
        let mut bot = make_bot(vec![15; 10], dec!(101), 4);
        assert!(matches!(
            step(&mut bot, &full, &params(), &mut rng),
            StepEffect::None
        ));
        assert_eq!(bot.energy, dec!(100));
    }

    #[test]
    fn crossover_debits_only_the_acting_parent() {
        let own = vec![16, 1, 1, 1, 1, 1, 1, 1, 1, 1];
        let mut bot = make_bot(own.clone(), dec!(101), 4);
        let ctx = StepContext {
            forward: occupied(vec![2; 10], dec!(50), 7),
            behind: CellView::Empty(CellIndex(5)),
            at_capacity: false,
        };
        let mut rng = SmallRng::seed_from_u64(0);
        let effect = step(&mut bot, &ctx, &params(), &mut rng);
        match effect {
            StepEffect::Spawn(child) => {
                assert_eq!(child.energy, dec!(20));
                assert_eq!(child.generation, 8);
                assert_eq!(child.cell, CellIndex(5));
                // Single-point splice: prefix from self, suffix from the
                // mate, at some split index.
                let own_genome = Genome::from_cells(own);
                let mate_genome = Genome::from_cells(vec![2; 10]);
                assert!(
                    (0..=10)
                        .any(|k| own_genome.splice(&mate_genome, k).unwrap() == child.genome)
                );
            }
            other => panic!("expected spawn, got {other:?}"),
        }
        assert_eq!(bot.energy, dec!(80));
    }

    #[test]
    fn crossover_needs_a_mate_ahead_and_space_behind() {
        let mut rng = SmallRng::seed_from_u64(0);
        let mut bot = make_bot(vec![16; 10], dec!(101), 4);

        // Forward empty: no mate.
        assert!(matches!(
            step(&mut bot, &forward_empty(1), &params(), &mut rng),
            StepEffect::None
        ));

        // Mate ahead but nowhere to place the child.
        let ctx = StepContext {
            forward: occupied(vec![2; 10], dec!(50), 0),
            behind: CellView::OutOfBounds,
            at_capacity: false,
        };
        bot.program_counter = 0;
        assert!(matches!(
            step(&mut bot, &ctx, &params(), &mut rng),
            StepEffect::None
        ));
    }

    #[test]
    fn instantiate_uses_the_draft_without_mutation() {
        let mut bot = make_bot(vec![17; 10], dec!(101), 4);
        for v in [9, 8, 7] {
            bot.draft_push(v);
        }
        // Mutation rate 1000 would scramble any genome that passes
        // through the mutation path; the draft must not.
        let hot = BotParams {
            mutation_rate: 1000,
            ..BotParams::default()
        };
        let mut rng = SmallRng::seed_from_u64(0);
        let effect = step(&mut bot, &forward_empty(1), &hot, &mut rng);
        match effect {
            StepEffect::Spawn(child) => {
                assert_eq!(child.genome.cells(), &[9, 8, 7, 0, 0, 0, 0, 0, 0, 0]);
                assert_eq!(child.energy, dec!(20));
                assert_eq!(child.generation, 1);
            }
            other => panic!("expected spawn, got {other:?}"),
        }
        assert_eq!(bot.energy, dec!(80));
    }

    #[test]
    fn attack_conserves_total_energy() {
        let mut bot = make_bot(vec![18; 10], dec!(100), 4);
        let ctx = StepContext {
            forward: occupied(vec![0; 10], dec!(37), 0),
            behind: CellView::OutOfBounds,
            at_capacity: false,
        };
        let mut rng = SmallRng::seed_from_u64(0);
        let effect = step(&mut bot, &ctx, &params(), &mut rng);
        match effect {
            StepEffect::Drain { victim, transfer } => {
                assert_eq!(victim, 3);
                assert_eq!(transfer, dec!(3.7));
                // 99 + 3.7 credited here; 37 - 3.7 debited by the caller.
                let victim_after = dec!(37) - transfer;
                assert_eq!(bot.energy + victim_after, dec!(99) + dec!(37));
            }
            other => panic!("expected drain, got {other:?}"),
        }
        assert_eq!(bot.energy, dec!(102.7));
    }

    #[test]
    fn divide_energy_sets_both_to_the_mean() {
        let genome = vec![19, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        let mut bot = make_bot(genome.clone(), dec!(101), 4);
        let ctx = StepContext {
            forward: occupied(genome, dec!(50), 0),
            behind: CellView::OutOfBounds,
            at_capacity: false,
        };
        let mut rng = SmallRng::seed_from_u64(0);
        let effect = step(&mut bot, &ctx, &params(), &mut rng);
        match effect {
            StepEffect::Share { partner, mean } => {
                assert_eq!(partner, 3);
                assert_eq!(mean, dec!(75));
            }
            other => panic!("expected share, got {other:?}"),
        }
        assert_eq!(bot.energy, dec!(75));
    }

    #[test]
    fn divide_energy_rejects_incompatible_partners() {
        let mut bot = make_bot(vec![19, 1, 1, 1, 1, 1, 1, 1, 1, 1], dec!(101), 4);
        let ctx = StepContext {
            forward: occupied(vec![2; 10], dec!(50), 0),
            behind: CellView::OutOfBounds,
            at_capacity: false,
        };
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(matches!(
            step(&mut bot, &ctx, &params(), &mut rng),
            StepEffect::None
        ));
        assert_eq!(bot.energy, dec!(100));
    }
}
