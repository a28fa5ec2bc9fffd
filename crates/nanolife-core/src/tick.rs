//! The tick cycle: execute, sweep, spawn, summarize.
//!
//! Bots are visited strictly sequentially in container order, one
//! instruction each. A bot born mid-pass is appended to the container and
//! executes its first instruction in the same tick. Sensing and movement
//! read the grid as it stands mid-pass: a cell vacated by an earlier move
//! is still registered to the mover until the sweep rebuilds the grid, so
//! later bots act on partially stale occupancy. That hazard is part of
//! the simulation's dynamics, not an artifact to repair.

use nanolife_agents::{Bot, BotSeed, SpawnChild, StepContext, StepEffect, interpreter};
use nanolife_agents::interpreter::{CellView, NeighborInfo};
use nanolife_types::{CellIndex, TickSummary};
use tracing::{debug, warn};

use crate::population;
use crate::world::World;

/// Run one full tick and describe the outcome.
pub fn run_tick(world: &mut World) -> TickSummary {
    world.tick = world.tick.saturating_add(1);

    let births = phase_execute(world);
    let deaths = population::sweep(world);
    let spawned = population::spawn_wave(world);

    let summary = TickSummary {
        tick: world.tick,
        population: world.bots.len(),
        deaths,
        spawned: births.saturating_add(spawned),
        total_energy: world.total_energy(),
        best: world.best_bot(),
    };
    debug!(
        tick = summary.tick,
        population = summary.population,
        deaths = summary.deaths,
        spawned = summary.spawned,
        "tick complete"
    );
    summary
}

/// Execute one instruction per bot, newborns included, applying each
/// returned effect before the next bot acts. Returns the number of bots
/// born during the pass.
fn phase_execute(world: &mut World) -> usize {
    let mut births: usize = 0;
    let mut slot = 0;
    while slot < world.bots.len() {
        let ctx = build_context(world, slot);
        let Some(bot) = world.bots.get_mut(slot) else {
            break;
        };
        let effect = interpreter::step(bot, &ctx, &world.params, &mut world.rng);
        apply_effect(world, slot, effect, &mut births);
        slot = slot.saturating_add(1);
    }
    births
}

/// Assemble the acting bot's view of its forward and behind cells from
/// the grid as it currently stands.
fn build_context(world: &World, slot: usize) -> StepContext {
    let at_capacity = world.at_capacity();
    let Some(bot) = world.bots.get(slot) else {
        return StepContext {
            forward: CellView::OutOfBounds,
            behind: CellView::OutOfBounds,
            at_capacity,
        };
    };
    let forward = view_cell(world, world.grid.neighbor(bot.position, bot.heading));
    let behind = view_cell(
        world,
        world.grid.neighbor(bot.position, bot.heading.opposite()),
    );
    StepContext {
        forward,
        behind,
        at_capacity,
    }
}

fn view_cell(world: &World, cell: Option<CellIndex>) -> CellView {
    let Some(cell) = cell else {
        return CellView::OutOfBounds;
    };
    world
        .grid
        .occupant(cell)
        .and_then(|slot| world.bots.get(slot).map(|bot| (slot, bot)))
        .map_or(CellView::Empty(cell), |(slot, bot)| {
            CellView::Occupied(NeighborInfo {
                cell,
                slot,
                genome: bot.genome.clone(),
                energy: bot.energy,
                generation: bot.generation,
            })
        })
}

/// Apply one instruction's world side effect.
fn apply_effect(world: &mut World, slot: usize, effect: StepEffect, births: &mut usize) {
    match effect {
        StepEffect::None => {}
        StepEffect::Move { from, to } => {
            // The origin stays registered until the next sweep.
            if let Err(err) = world.grid.place(to, slot) {
                warn!(%from, %to, slot, %err, "move registration conflict");
            }
        }
        StepEffect::Spawn(child) => {
            if apply_spawn(world, child) {
                *births = births.saturating_add(1);
            }
        }
        StepEffect::Drain { victim, transfer } => {
            if let Some(bot) = world.bots.get_mut(victim) {
                bot.energy = bot.energy.saturating_sub(transfer);
            }
        }
        StepEffect::Share { partner, mean } => {
            if let Some(bot) = world.bots.get_mut(partner) {
                bot.energy = mean;
            }
        }
    }
}

/// Bring a reproduction effect's child into the world. Returns whether
/// the child was actually placed.
fn apply_spawn(world: &mut World, child: SpawnChild) -> bool {
    if world.at_capacity() {
        debug!(capacity = world.capacity, "birth rejected at capacity");
        return false;
    }
    let heading = Bot::random_heading(&mut world.rng);
    let id = world.allocate_id();
    let slot = world.bots.len();
    if let Err(err) = world.grid.place(child.cell, slot) {
        warn!(cell = %child.cell, %err, "birth placement conflict");
        return false;
    }
    let bot = Bot::new(
        id,
        BotSeed {
            genome: child.genome,
            position: child.cell,
            heading,
            energy: child.energy,
            generation: child.generation,
            age: world.params.max_age,
            parent: Some(child.parent),
        },
        world.params.max_loop_depth,
    );
    world.bots.push(bot);
    true
}
