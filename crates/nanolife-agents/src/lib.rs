//! Bot state, genome interpreter, and genetics for the Nanolife
//! simulation.
//!
//! # Modules
//!
//! - [`bot`] -- Runtime state of a single bot
//! - [`interpreter`] -- One-instruction step execution and its effects
//! - [`genetics`] -- Mutation and similarity primitives
//! - [`lineage`] -- Append-only ancestry records
//! - [`config`] -- Per-bot parameters and their validation
//! - [`error`] -- Error types

pub mod bot;
pub mod config;
pub mod error;
pub mod genetics;
pub mod interpreter;
pub mod lineage;

pub use bot::{Bot, BotSeed};
pub use config::BotParams;
pub use error::{AgentError, MIN_GENOME_LENGTH};
pub use genetics::{MAX_MUTATION_DRAWS, compatibility, compatible, mutate};
pub use interpreter::{CellView, NeighborInfo, SpawnChild, StepContext, StepEffect, step};
pub use lineage::{LineageRecord, MAX_LINEAGE_DEPTH, ancestry_chain};
