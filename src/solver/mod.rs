//! Coarse direct solve and the recursive V-cycle engine.

pub mod coarse;
pub mod vcycle;

pub use coarse::CoarseSolver;
