//! The multigrid hierarchy: levels, construction, and diagnostics.

pub mod aggregate;
pub mod builder;
pub mod smooth;
pub mod strength;
pub mod tentative;

pub use aggregate::standard_aggregation;
pub use smooth::smooth_prolongator;
pub use strength::symmetric_strength;
pub use tentative::fit_candidates;

use crate::matrix::CsrMatrix;
use crate::relaxation::LevelSmoother;
use crate::solver::coarse::CoarseSolver;
use num_traits::Float;

/// One rung of the hierarchy.
///
/// Non-terminal levels carry `p`/`r`/`smoother`; the last level has none and
/// is handled by the dense coarse factorization. The `x`/`rhs`/`residual`
/// vectors are scratch reused across V-cycles, overwritten on every call.
pub struct Level<T> {
    /// Operator at this level.
    pub a: CsrMatrix<T>,
    /// Near-kernel candidate the prolongator reproduces per aggregate.
    pub candidate: Vec<T>,
    /// Prolongation to this level from the next-coarser one.
    pub p: Option<CsrMatrix<T>>,
    /// Restriction, exact transpose of `p`.
    pub r: Option<CsrMatrix<T>>,
    /// Aggregate id per fine row (construction-time data).
    pub aggregates: Vec<usize>,
    /// Relaxation bound to `a`.
    pub smoother: Option<LevelSmoother<T>>,
    pub(crate) residual: Vec<T>,
    pub(crate) x: Vec<T>,
    pub(crate) rhs: Vec<T>,
}

impl<T: Float> Level<T> {
    pub(crate) fn new(a: CsrMatrix<T>, candidate: Vec<T>) -> Self {
        let n = a.nrows();
        Self {
            a,
            candidate,
            p: None,
            r: None,
            aggregates: Vec::new(),
            smoother: None,
            residual: Vec::new(),
            x: vec![T::zero(); n],
            rhs: vec![T::zero(); n],
        }
    }
}

/// A smoothed-aggregation AMG hierarchy: Galerkin coarse operators bridged
/// by smoothed prolongators, with a dense LU at the coarsest level.
///
/// Built once, immutable afterwards except for per-level scratch buffers.
pub struct SmoothedAggregation<T> {
    pub(crate) levels: Vec<Level<T>>,
    pub(crate) coarse: CoarseSolver<T>,
}

impl<T> SmoothedAggregation<T> {
    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    /// Access to the level chain (read-only).
    pub fn levels(&self) -> &[Level<T>] {
        &self.levels
    }

    /// Sum of stored entries over all levels relative to the finest level.
    pub fn operator_complexity(&self) -> f64 {
        let nnz: usize = self.levels.iter().map(|l| l.a.nnz()).sum();
        nnz as f64 / self.levels[0].a.nnz() as f64
    }

    /// Sum of row counts over all levels relative to the finest level.
    pub fn grid_complexity(&self) -> f64 {
        let rows: usize = self.levels.iter().map(|l| l.a.nrows()).sum();
        rows as f64 / self.levels[0].a.nrows() as f64
    }

    /// Human-readable level table.
    pub fn print_summary(&self) {
        println!("\tNumber of Levels:\t{}", self.num_levels());
        println!("\tOperator Complexity:\t{:.3}", self.operator_complexity());
        println!("\tGrid Complexity:\t{:.3}", self.grid_complexity());
        println!("\tlevel\tunknowns\tnonzeros:");
        let nnz: usize = self.levels.iter().map(|l| l.a.nnz()).sum();
        for (index, level) in self.levels.iter().enumerate() {
            let percent = 100.0 * level.a.nnz() as f64 / nnz as f64;
            println!(
                "\t{}\t{}\t\t{} \t[{:.1}%]",
                index,
                level.a.nrows(),
                level.a.nnz(),
                percent
            );
        }
    }
}
