//! The full simulation state: population, grid, parameters, and RNG.

use nanolife_agents::{Bot, BotParams};
use nanolife_types::{BestBot, BotId};
use nanolife_world::Grid;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rust_decimal::Decimal;
use tracing::info;

use crate::config::{ConfigError, SimulationConfig};

/// Everything the tick cycle operates on.
///
/// The population vector is dense and compacted with swap-remove; array
/// positions are not stable across ticks. Anything that must survive
/// compaction refers to bots by [`BotId`] or through their lineage
/// records, never by slot.
#[derive(Debug)]
pub struct World {
    /// Per-bot parameters derived from configuration.
    pub params: BotParams,
    /// Maximum live population.
    pub capacity: usize,
    /// Per-trial spontaneous spawn probability, as a percentage.
    pub food_rate: u32,
    /// Best-fit selection considers only generations above this floor.
    pub best_min_generation: u32,
    /// The occupancy grid.
    pub grid: Grid,
    /// The live population. Dense; order is not meaningful.
    pub bots: Vec<Bot>,
    /// Next bot identifier to allocate.
    pub next_id: u64,
    /// The simulation's RNG.
    pub rng: SmallRng,
    /// Completed tick count.
    pub tick: u64,
}

impl World {
    /// Build an empty world from a validated configuration. The RNG is
    /// seeded from `run.seed` when set, otherwise from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configuration fails validation.
    pub fn new(config: &SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.grid.width, config.grid.height).map_err(|_| {
            ConfigError::ZeroGridArea {
                width: config.grid.width,
                height: config.grid.height,
            }
        })?;
        let rng = config
            .run
            .seed
            .map_or_else(SmallRng::from_os_rng, SmallRng::seed_from_u64);
        info!(
            width = config.grid.width,
            height = config.grid.height,
            capacity = config.population.capacity,
            seeded = config.run.seed.is_some(),
            "world created"
        );
        Ok(Self {
            params: config.bot_params(),
            capacity: config.population.capacity,
            food_rate: config.population.food_rate,
            best_min_generation: config.reporting.best_min_generation,
            grid,
            bots: Vec::new(),
            next_id: 0,
            rng,
            tick: 0,
        })
    }

    /// Allocate the next bot identifier.
    pub fn allocate_id(&mut self) -> BotId {
        let id = BotId::from_raw(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    /// Whether the population has reached its configured capacity.
    pub const fn at_capacity(&self) -> bool {
        self.bots.len() >= self.capacity
    }

    /// Sum of energy across the live population.
    pub fn total_energy(&self) -> Decimal {
        self.bots
            .iter()
            .fold(Decimal::ZERO, |acc, bot| acc.saturating_add(bot.energy))
    }

    /// The highest-energy bot whose generation clears the configured
    /// floor, or `None` when no bot qualifies.
    pub fn best_bot(&self) -> Option<BestBot> {
        self.bots
            .iter()
            .filter(|bot| bot.generation > self.best_min_generation)
            .max_by(|a, b| a.energy.cmp(&b.energy))
            .map(|bot| BestBot {
                id: bot.id,
                energy: bot.energy,
                generation: bot.generation,
                genome: bot.genome.clone(),
            })
    }
}
