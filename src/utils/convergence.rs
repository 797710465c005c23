//! Convergence tracking & tolerance checks for the monitored solve loop.

use num_traits::Float;

/// Stopping criteria & stats.
pub struct Convergence<T> {
    pub tol: T,
    pub max_iters: usize,
}

#[derive(Clone, Debug)]
pub struct SolveStats<T> {
    pub iterations: usize,
    pub final_residual: T,
    pub converged: bool,
}

impl<T: Copy + Float> Convergence<T> {
    /// Returns (should_stop, stats) given current `res_norm` and iteration `i`.
    ///
    /// `converged` is true only when the relative residual meets `tol`;
    /// exhausting the iteration budget stops the loop with `converged: false`.
    pub fn check(&self, res_norm: T, res0_norm: T, i: usize) -> (bool, SolveStats<T>) {
        let rel = res_norm / res0_norm;
        let converged = rel <= self.tol;
        (
            converged || i >= self.max_iters,
            SolveStats {
                iterations: i,
                final_residual: res_norm,
                converged,
            },
        )
    }
}

/// Observes the residual once per outer iteration and decides when to stop.
pub trait Monitor<T> {
    /// Inspect the current residual; true means stop iterating.
    fn finished(&mut self, residual: &[T]) -> bool;
    /// Advance the iteration count. Called once per V-cycle.
    fn advance(&mut self);
    /// Stats as of the last `finished` call.
    fn stats(&self) -> SolveStats<T>;
}

/// Relative-residual monitor: stop when ‖r‖/‖b‖ ≤ tol or the iteration
/// budget is exhausted (the latter leaves `converged` false).
pub struct DefaultMonitor<T> {
    conv: Convergence<T>,
    b_norm: T,
    iteration: usize,
    last: SolveStats<T>,
}

impl<T: Float> DefaultMonitor<T> {
    /// Monitor relative to `b` with explicit tolerance and iteration cap.
    pub fn new(b: &[T], tol: T, max_iters: usize) -> Self {
        let b_norm = norm2(b);
        // an all-zero rhs would make every relative residual undefined
        let b_norm = if b_norm > T::zero() { b_norm } else { T::one() };
        Self {
            conv: Convergence { tol, max_iters },
            b_norm,
            iteration: 0,
            last: SolveStats {
                iterations: 0,
                final_residual: T::infinity(),
                converged: false,
            },
        }
    }

    /// Defaults: tol = 1e-8, at most 100 iterations.
    pub fn from_rhs(b: &[T]) -> Self {
        Self::new(b, T::from(1e-8).unwrap(), 100)
    }
}

impl<T: Float> Monitor<T> for DefaultMonitor<T> {
    fn finished(&mut self, residual: &[T]) -> bool {
        let res_norm = norm2(residual);
        let (stop, stats) = self.conv.check(res_norm, self.b_norm, self.iteration);
        self.last = stats;
        stop
    }

    fn advance(&mut self) {
        self.iteration += 1;
    }

    fn stats(&self) -> SolveStats<T> {
        self.last.clone()
    }
}

/// Euclidean norm.
pub fn norm2<T: Float>(x: &[T]) -> T {
    x.iter().fold(T::zero(), |acc, &v| acc + v * v).sqrt()
}
