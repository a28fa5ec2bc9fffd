//! Grid geometry and occupancy for the Nanolife simulation.
//!
//! # Modules
//!
//! - [`grid`] -- The row-major occupancy grid and its linear adjacency
//! - [`error`] -- Error types for grid operations

pub mod error;
pub mod grid;

pub use error::WorldError;
pub use grid::Grid;
