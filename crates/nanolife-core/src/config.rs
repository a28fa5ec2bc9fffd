//! Configuration loading and typed config structures for the Nanolife
//! simulation.
//!
//! The canonical configuration lives in `nanolife-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror
//! the YAML structure, and provides a loader that reads and validates
//! the file.

use std::path::{Path, PathBuf};

use nanolife_agents::{AgentError, BotParams};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The grid dimensions describe an empty or overflowing area.
    #[error("grid must have a non-zero area, got {width}x{height}")]
    ZeroGridArea {
        /// Configured width.
        width: usize,
        /// Configured height.
        height: usize,
    },

    /// The population capacity is zero.
    #[error("population capacity must be positive")]
    ZeroCapacity,

    /// The food spawn rate exceeds its percentage range.
    #[error("food rate {0} exceeds the maximum of 100")]
    FoodRateTooHigh(u32),

    /// A per-bot parameter is out of range.
    #[error("invalid bot parameters: {source}")]
    Agent {
        /// The underlying validation error.
        #[from]
        source: AgentError,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `nanolife-config.yaml`. All fields have
/// defaults matching the canonical world: a 1200x1000 grid of 50-cell
/// genomes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Grid dimensions.
    #[serde(default)]
    pub grid: GridConfig,

    /// Genome shape and mutation pressure.
    #[serde(default)]
    pub genome: GenomeConfig,

    /// Population limits and spontaneous spawning.
    #[serde(default)]
    pub population: PopulationConfig,

    /// Diagnostic reporting.
    #[serde(default)]
    pub reporting: ReportingConfig,

    /// Run boundaries and pacing.
    #[serde(default)]
    pub run: RunConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_yml::from_str(&contents)?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// Check the configuration for values the simulation cannot start
    /// with.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint: empty grid, zero capacity,
    /// food rate above 100, or invalid per-bot parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self
            .grid
            .width
            .checked_mul(self.grid.height)
            .is_none_or(|area| area == 0)
        {
            return Err(ConfigError::ZeroGridArea {
                width: self.grid.width,
                height: self.grid.height,
            });
        }
        if self.population.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.population.food_rate > 100 {
            return Err(ConfigError::FoodRateTooHigh(self.population.food_rate));
        }
        self.bot_params().validate()?;
        Ok(())
    }

    /// The per-bot parameter bundle derived from this configuration.
    pub const fn bot_params(&self) -> BotParams {
        BotParams {
            genome_length: self.genome.length,
            max_age: self.population.max_age,
            max_loop_depth: self.population.max_loop_depth,
            mutation_rate: self.genome.mutation_rate,
            spawn_energy: self.population.spawn_energy,
        }
    }
}

/// Grid dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GridConfig {
    /// Grid width in cells.
    #[serde(default = "default_grid_width")]
    pub width: usize,

    /// Grid height in cells.
    #[serde(default = "default_grid_height")]
    pub height: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: default_grid_width(),
            height: default_grid_height(),
        }
    }
}

/// Genome shape and mutation pressure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenomeConfig {
    /// Cells per genome; also the size of each bot's memory and draft
    /// buffers.
    #[serde(default = "default_genome_length")]
    pub length: usize,

    /// Mutation probability numerator out of 1000, per draw.
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: u32,
}

impl Default for GenomeConfig {
    fn default() -> Self {
        Self {
            length: default_genome_length(),
            mutation_rate: default_mutation_rate(),
        }
    }
}

/// Population limits and spontaneous spawning.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PopulationConfig {
    /// Maximum live bots; reproduction and spawning are rejected beyond
    /// this.
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Energy granted to each spontaneously spawned bot.
    #[serde(default = "default_spawn_energy")]
    pub spawn_energy: Decimal,

    /// Per-trial spawn probability as a percentage (0-100).
    #[serde(default = "default_food_rate")]
    pub food_rate: u32,

    /// Lifespan of every bot, in ticks.
    #[serde(default = "default_max_age")]
    pub max_age: u32,

    /// Loop-stack depth bound; deeper nesting stalls a bot permanently.
    #[serde(default = "default_max_loop_depth")]
    pub max_loop_depth: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            spawn_energy: default_spawn_energy(),
            food_rate: default_food_rate(),
            max_age: default_max_age(),
            max_loop_depth: default_max_loop_depth(),
        }
    }
}

/// Diagnostic reporting.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportingConfig {
    /// Path of the append-only diagnostic record file.
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    /// Emit one record every this many ticks.
    #[serde(default = "default_report_interval")]
    pub report_interval: u64,

    /// Best-fit selection considers only bots with a generation above
    /// this floor.
    #[serde(default = "default_best_min_generation")]
    pub best_min_generation: u32,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            report_interval: default_report_interval(),
            best_min_generation: default_best_min_generation(),
        }
    }
}

/// Run boundaries and pacing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RunConfig {
    /// Stop after this many ticks; 0 runs unbounded.
    #[serde(default)]
    pub max_ticks: u64,

    /// Real-time milliseconds to sleep between ticks; 0 runs flat out.
    #[serde(default)]
    pub tick_interval_ms: u64,

    /// Fixed RNG seed for experiments. Unset seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

const fn default_grid_width() -> usize {
    1200
}

const fn default_grid_height() -> usize {
    1000
}

const fn default_genome_length() -> usize {
    50
}

const fn default_mutation_rate() -> u32 {
    20
}

const fn default_capacity() -> usize {
    1_200_000
}

fn default_spawn_energy() -> Decimal {
    Decimal::from(100_000)
}

const fn default_food_rate() -> u32 {
    40
}

const fn default_max_age() -> u32 {
    2000
}

const fn default_max_loop_depth() -> usize {
    1000
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data.txt")
}

const fn default_report_interval() -> u64 {
    10
}

const fn default_best_min_generation() -> u32 {
    20
}
