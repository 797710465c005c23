//! Relaxation smoothers applied before and after each coarse-grid correction.
//!
//! A smoother is bound to one level's operator at construction time. The
//! variant is chosen per hierarchy instance through
//! [`crate::config::SmootherType`], not at compile time.

pub mod chebyshev;
pub mod jacobi;

pub use chebyshev::ChebyshevSmoother;
pub use jacobi::JacobiSmoother;

use crate::matrix::CsrMatrix;
use num_traits::Float;

/// In-place relaxation around the coarse-grid correction.
pub trait Relaxation<T> {
    /// Smooth `x` assuming it is zero-initialized scratch; overwrites `x`.
    fn presmooth(&self, a: &CsrMatrix<T>, b: &[T], x: &mut [T]);
    /// Smooth `x` starting from its current value.
    fn postsmooth(&self, a: &CsrMatrix<T>, b: &[T], x: &mut [T]);
}

/// The relaxation bound to one level.
pub enum LevelSmoother<T> {
    Jacobi(JacobiSmoother<T>),
    Chebyshev(ChebyshevSmoother<T>),
}

impl<T: Float + Send + Sync> Relaxation<T> for LevelSmoother<T> {
    fn presmooth(&self, a: &CsrMatrix<T>, b: &[T], x: &mut [T]) {
        match self {
            LevelSmoother::Jacobi(s) => s.presmooth(a, b, x),
            LevelSmoother::Chebyshev(s) => s.presmooth(a, b, x),
        }
    }

    fn postsmooth(&self, a: &CsrMatrix<T>, b: &[T], x: &mut [T]) {
        match self {
            LevelSmoother::Jacobi(s) => s.postsmooth(a, b, x),
            LevelSmoother::Chebyshev(s) => s.postsmooth(a, b, x),
        }
    }
}
