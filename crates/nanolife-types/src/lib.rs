//! Shared type definitions for the Nanolife simulation.
//!
//! This crate is the single source of truth for types used across the
//! Nanolife workspace: identifiers, the genome representation, the opcode
//! and direction enumerations, and the read-only snapshot views emitted
//! by the engine.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe wrappers for bot and grid-cell identifiers
//! - [`enums`] -- Direction and opcode enumerations
//! - [`genome`] -- The heritable program and its derived display color
//! - [`snapshot`] -- Read-only views for reporting and inspection

pub mod enums;
pub mod genome;
pub mod ids;
pub mod snapshot;

// Re-export all public types at crate root for convenience.
pub use enums::{Direction, Opcode};
pub use genome::{Color, GENE_VALUE_BOUND, Genome, IDENTITY_TAIL};
pub use ids::{BotId, CellIndex};
pub use snapshot::{BestBot, BotSnapshot, LineageEntry, TickSummary};
