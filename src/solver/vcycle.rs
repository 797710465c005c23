//! Recursive V-cycle application and the monitored stationary solve.

use crate::core::traits::Preconditioner;
use crate::error::AmgError;
use crate::hierarchy::{Level, SmoothedAggregation};
use crate::relaxation::Relaxation;
use crate::solver::coarse::CoarseSolver;
use crate::utils::convergence::{DefaultMonitor, Monitor, SolveStats};
use faer::traits::{ComplexField, RealField};
use num_traits::Float;
use std::mem;

impl<T> SmoothedAggregation<T>
where
    T: Float + Send + Sync + ComplexField + RealField,
{
    /// One V-cycle from the finest level: z ≈ A⁻¹·b, overwriting `z`.
    ///
    /// This is the preconditioner entry point for an outer Krylov method.
    pub fn apply(&mut self, b: &[T], z: &mut [T]) -> Result<(), AmgError> {
        let n = self.levels[0].a.nrows();
        if b.len() != n || z.len() != n {
            return Err(AmgError::InvalidInput(format!(
                "apply expects vectors of length {n}, got b: {}, z: {}",
                b.len(),
                z.len()
            )));
        }
        cycle(&mut self.levels, &self.coarse, b, z);
        Ok(())
    }

    /// Stationary iteration with the default relative-residual monitor
    /// (tol 1e-8, at most 100 V-cycles).
    pub fn solve(&mut self, b: &[T], x: &mut [T]) -> Result<SolveStats<T>, AmgError> {
        let mut monitor = DefaultMonitor::from_rhs(b);
        self.solve_with_monitor(b, x, &mut monitor)
    }

    /// Stationary iteration: each pass applies one V-cycle to the current
    /// residual and accumulates the update into `x`, until the monitor stops
    /// it. Exhausting the iteration budget is reported through the returned
    /// stats (`converged: false`), not as an error.
    pub fn solve_with_monitor(
        &mut self,
        b: &[T],
        x: &mut [T],
        monitor: &mut dyn Monitor<T>,
    ) -> Result<SolveStats<T>, AmgError> {
        let n = self.levels[0].a.nrows();
        if b.len() != n || x.len() != n {
            return Err(AmgError::InvalidInput(format!(
                "solve expects vectors of length {n}, got b: {}, x: {}",
                b.len(),
                x.len()
            )));
        }

        let mut update = vec![T::zero(); n];
        let mut residual = vec![T::zero(); n];
        let compute_residual = |levels: &[Level<T>], x: &[T], residual: &mut [T]| {
            levels[0].a.spmv(x, residual);
            for (ri, &bi) in residual.iter_mut().zip(b) {
                *ri = bi - *ri;
            }
        };

        compute_residual(&self.levels, x, &mut residual);
        while !monitor.finished(&residual) {
            cycle(&mut self.levels, &self.coarse, &residual, &mut update);
            for (xi, &ui) in x.iter_mut().zip(&update) {
                *xi = *xi + ui;
            }
            compute_residual(&self.levels, x, &mut residual);
            monitor.advance();
        }
        Ok(monitor.stats())
    }
}

impl<T> Preconditioner<T> for SmoothedAggregation<T>
where
    T: Float + Send + Sync + ComplexField + RealField,
{
    fn apply(&mut self, r: &[T], z: &mut [T]) -> Result<(), AmgError> {
        SmoothedAggregation::apply(self, r, z)
    }
}

/// Two-grid correction over the leading level of `levels`, recursing on the
/// tail. A slice of length one is the terminal level, solved directly.
///
/// The coarse level's scratch is moved out for the recursive call and moved
/// back afterwards, so every buffer stays owned by exactly one level.
fn cycle<T>(levels: &mut [Level<T>], coarse: &CoarseSolver<T>, b: &[T], x: &mut [T])
where
    T: Float + Send + Sync + ComplexField + RealField,
{
    if levels.len() == 1 {
        coarse.solve(b, x);
        return;
    }

    let (fine, rest) = levels.split_at_mut(1);
    let level = &mut fine[0];
    let a = &level.a;
    let p = level.p.as_ref().expect("non-terminal level has P");
    let r = level.r.as_ref().expect("non-terminal level has R");
    let smoother = level.smoother.as_ref().expect("non-terminal level has a smoother");
    let residual = &mut level.residual;

    // presmooth (overwrites x: the scratch may hold a stale correction)
    smoother.presmooth(a, b, x);

    // residual ← b − A·x
    a.spmv(x, residual);
    for (ri, &bi) in residual.iter_mut().zip(b) {
        *ri = bi - *ri;
    }

    // restrict and recurse
    let mut coarse_b = mem::take(&mut rest[0].rhs);
    let mut coarse_x = mem::take(&mut rest[0].x);
    r.spmv(residual, &mut coarse_b);
    cycle(rest, coarse, &coarse_b, &mut coarse_x);

    // prolong the correction
    p.spmv(&coarse_x, residual);
    for (xi, &ci) in x.iter_mut().zip(residual.iter()) {
        *xi = *xi + ci;
    }
    rest[0].rhs = coarse_b;
    rest[0].x = coarse_x;

    smoother.postsmooth(a, b, x);
}
