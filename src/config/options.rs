//! Options controlling hierarchy construction.
//!
//! Defaults follow the usual smoothed-aggregation choices: a prolongator
//! smoothing weight of 4/3 (scaled by the spectral radius of D⁻¹A at each
//! level), coarsening down to at most 100 rows, and weighted Jacobi
//! relaxation on every non-terminal level.

use num_traits::Float;

/// Per-level relaxation scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SmootherType {
    /// Weighted Jacobi with ω = (4/3)/ρ(D⁻¹A).
    Jacobi,
    /// Jacobi-preconditioned Chebyshev recurrence on [ρ/30, 1.1ρ].
    Chebyshev,
}

/// Construction parameters for [`crate::SmoothedAggregation`].
#[derive(Clone, Debug)]
pub struct AmgOptions<T> {
    /// Strength-of-connection threshold θ ≥ 0.
    pub theta: T,
    /// Prolongator smoothing weight ω.
    pub omega: T,
    /// Stop coarsening once an operator has at most this many rows.
    pub coarse_size: usize,
    /// Hard cap on the number of levels.
    pub max_levels: usize,
    /// Relaxation scheme bound to each non-terminal level.
    pub smoother: SmootherType,
    /// Polynomial degree of the Chebyshev smoother.
    pub cheby_degree: usize,
}

impl<T: Float> AmgOptions<T> {
    pub fn new(theta: T) -> Self {
        Self { theta, ..Self::default() }
    }
}

impl<T: Float> Default for AmgOptions<T> {
    fn default() -> Self {
        Self {
            theta: T::zero(),
            omega: T::from(4.0 / 3.0).unwrap(),
            coarse_size: 100,
            max_levels: 20,
            smoother: SmootherType::Jacobi,
            cheby_degree: 3,
        }
    }
}
