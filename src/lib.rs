//! samg: smoothed-aggregation algebraic multigrid
//!
//! This crate builds a hierarchy of progressively coarser operators from a
//! sparse symmetric (positive-definite-like) matrix and uses it to
//! approximately invert the matrix via recursive V-cycles, either as a
//! one-shot preconditioner application or as a standalone stationary solver
//! with convergence monitoring.

pub mod config;
pub mod core;
pub mod error;
pub mod hierarchy;
pub mod matrix;
pub mod relaxation;
pub mod solver;
pub mod utils;

// Re-exports for convenience
pub use config::*;
pub use self::core::*;
pub use error::*;
pub use hierarchy::*;
pub use matrix::*;
pub use relaxation::*;
pub use solver::*;
pub use utils::*;

// Re-export SolveStats at the crate root for convenience
pub use utils::convergence::SolveStats;
