//! Error types for the `nanolife-agents` crate.
//!
//! Instruction execution itself is fail-soft and never errors; the only
//! fallible surface here is parameter validation at startup.

/// Minimum genome length: the compatibility sample and the color
/// derivation both read the last nine cells.
pub const MIN_GENOME_LENGTH: usize = 10;

/// Errors raised by bot parameter validation.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// The configured genome length is too short for the identity tail.
    #[error("genome length {0} is below the minimum of {MIN_GENOME_LENGTH}")]
    GenomeTooShort(usize),

    /// The mutation rate numerator exceeds its denominator of 1000.
    #[error("mutation rate {0} exceeds the maximum of 1000")]
    MutationRateTooHigh(u32),

    /// Spawn energy must be positive for spawned bots to be viable.
    #[error("spawn energy must be positive, got {0}")]
    NonPositiveSpawnEnergy(rust_decimal::Decimal),
}
