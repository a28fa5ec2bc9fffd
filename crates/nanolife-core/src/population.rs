//! Population lifecycle: the death sweep and spontaneous spawning.

use nanolife_agents::{Bot, BotSeed};
use nanolife_types::{CellIndex, Genome};
use rand::Rng;
use tracing::{debug, warn};

use crate::world::World;

/// Rebuild the grid from the live population and compact the dead out of
/// the population vector. Returns the number of bots removed.
///
/// Removal is swap-with-last: the slot of a dead bot is overwritten by
/// the final bot, which is then re-examined in place so its grid
/// registration lands on the slot it now occupies. Survivor order is
/// unstable across sweeps.
pub fn sweep(world: &mut World) -> usize {
    world.grid.clear_all();
    let mut deaths: usize = 0;
    let mut slot = 0;
    while slot < world.bots.len() {
        let Some(bot) = world.bots.get(slot) else {
            break;
        };
        if bot.is_alive() {
            let position = bot.position;
            if let Err(err) = world.grid.place(position, slot) {
                warn!(%position, slot, %err, "grid registration conflict during sweep");
            }
            slot = slot.saturating_add(1);
        } else {
            world.bots.swap_remove(slot);
            deaths = deaths.saturating_add(1);
        }
    }
    deaths
}

/// Spontaneous spawning: repeated Bernoulli trials at `food_rate`
/// percent, stopping at the first failure. Each success samples one cell
/// uniformly and, when it is free and the population has room, places a
/// fresh random-genome bot there with the configured spawn energy at
/// generation 0. An occupied sample is skipped without ending the wave.
///
/// Trials are capped at the grid's cell count so a 100-percent food rate
/// still terminates. Returns the number of bots spawned.
pub fn spawn_wave(world: &mut World) -> usize {
    let mut spawned: usize = 0;
    let cells = world.grid.cell_count();
    for _ in 0..cells {
        if world.rng.random_range(0_u32..100) >= world.food_rate {
            break;
        }
        if world.at_capacity() {
            warn!(
                capacity = world.capacity,
                "population at capacity, spawn wave cut short"
            );
            break;
        }
        let cell = CellIndex(world.rng.random_range(0..cells));
        if world.grid.is_occupied(cell) {
            continue;
        }
        let genome = Genome::random(world.params.genome_length, &mut world.rng);
        let heading = Bot::random_heading(&mut world.rng);
        let id = world.allocate_id();
        let bot = Bot::new(
            id,
            BotSeed {
                genome,
                position: cell,
                heading,
                energy: world.params.spawn_energy,
                generation: 0,
                age: world.params.max_age,
                parent: None,
            },
            world.params.max_loop_depth,
        );
        let slot = world.bots.len();
        if let Err(err) = world.grid.place(cell, slot) {
            warn!(%cell, %err, "spawn placement conflict");
            continue;
        }
        world.bots.push(bot);
        spawned = spawned.saturating_add(1);
    }
    if spawned > 0 {
        debug!(spawned, "spawn wave complete");
    }
    spawned
}
