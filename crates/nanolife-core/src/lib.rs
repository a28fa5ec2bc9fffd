//! Tick orchestration, population lifecycle, and configuration for the
//! Nanolife simulation.
//!
//! # Modules
//!
//! - [`world`] -- The full simulation state
//! - [`tick`] -- The per-tick cycle: execute, sweep, spawn, summarize
//! - [`population`] -- Death sweep and spontaneous spawning
//! - [`runner`] -- Bounded async simulation loop
//! - [`config`] -- YAML configuration and startup validation

pub mod config;
pub mod population;
pub mod runner;
pub mod tick;
pub mod world;

pub use config::{ConfigError, RunConfig, SimulationConfig};
pub use runner::{
    EndReason, NoOpCallback, SimulationResult, StopHandle, TickCallback, run_simulation,
};
pub use tick::run_tick;
pub use world::World;
