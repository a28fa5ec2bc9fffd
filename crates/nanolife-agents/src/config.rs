//! Per-bot simulation parameters.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AgentError, MIN_GENOME_LENGTH};

/// Parameters governing individual bots: genome shape, lifespan, loop
/// nesting, mutation pressure, and starting energy for spawned bots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotParams {
    /// Number of cells in every genome, memory buffer, and draft buffer.
    pub genome_length: usize,
    /// Starting lifespan in ticks; bots die when it reaches zero.
    pub max_age: u32,
    /// Loop-stack capacity; nesting deeper than this stalls the bot
    /// permanently.
    pub max_loop_depth: usize,
    /// Mutation probability numerator out of 1000, applied per draw.
    pub mutation_rate: u32,
    /// Energy granted to spontaneously spawned bots.
    pub spawn_energy: Decimal,
}

impl Default for BotParams {
    fn default() -> Self {
        Self {
            genome_length: 50,
            max_age: 2000,
            max_loop_depth: 1000,
            mutation_rate: 20,
            spawn_energy: Decimal::from(100_000),
        }
    }
}

impl BotParams {
    /// Check the parameters for values the simulation cannot run with.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint: genome shorter than the
    /// identity tail, mutation rate above 1000, or non-positive spawn
    /// energy.
    pub fn validate(&self) -> Result<(), AgentError> {
        if self.genome_length < MIN_GENOME_LENGTH {
            return Err(AgentError::GenomeTooShort(self.genome_length));
        }
        if self.mutation_rate > 1000 {
            return Err(AgentError::MutationRateTooHigh(self.mutation_rate));
        }
        if self.spawn_energy <= Decimal::ZERO {
            return Err(AgentError::NonPositiveSpawnEnergy(self.spawn_energy));
        }
        Ok(())
    }
}
