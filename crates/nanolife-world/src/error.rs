//! Error types for the `nanolife-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`] through the
//! standard [`Result`] type alias.

use nanolife_types::CellIndex;

/// Errors that can occur during grid operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The grid was constructed with a zero-area extent.
    #[error("grid must have a non-zero area, got {width}x{height}")]
    ZeroArea {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// A cell index lies outside the grid.
    #[error("cell {0} is out of bounds")]
    OutOfBounds(CellIndex),

    /// A placement targeted a cell that already holds a bot.
    #[error("cell {0} is already occupied")]
    CellOccupied(CellIndex),
}
