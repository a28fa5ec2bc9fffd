//! Error types for the engine binary.

use nanolife_core::ConfigError;

/// Errors that end the engine before or during startup.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration could not be loaded or validated.
    #[error("configuration error: {source}")]
    Config {
        /// The underlying configuration error.
        #[from]
        source: ConfigError,
    },

    /// The diagnostic report file could not be opened.
    #[error("failed to open report file: {source}")]
    Report {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
