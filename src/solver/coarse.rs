//! Dense direct solve for the coarsest operator, using Faer's full-pivot LU.

use crate::error::AmgError;
use crate::matrix::CsrMatrix;
use faer::linalg::solvers::{FullPivLu, SolveCore};
use faer::traits::{ComplexField, RealField};
use faer::{Conj, MatMut};

/// Cached LU factorization of the coarsest-level operator.
pub struct CoarseSolver<T> {
    factor: FullPivLu<T>,
    n: usize,
}

impl<T: ComplexField + RealField + Copy + num_traits::Float> CoarseSolver<T> {
    /// Densify and factor `a`. A factorization that cannot reproduce finite
    /// solutions (singular or badly conditioned coarse operator) is a
    /// construction failure.
    pub fn factor(a: &CsrMatrix<T>) -> Result<Self, AmgError> {
        let dense = a.to_dense();
        let factor = FullPivLu::new(dense.as_ref());
        let solver = Self { factor, n: a.nrows() };

        let probe = vec![num_traits::One::one(); solver.n];
        let mut out = vec![num_traits::Zero::zero(); solver.n];
        solver.solve(&probe, &mut out);
        if out.iter().any(|v| !num_traits::Float::is_finite(*v)) {
            return Err(AmgError::CoarseFactorization(format!(
                "{}x{} coarse operator is singular",
                solver.n, solver.n
            )));
        }
        Ok(solver)
    }

    /// Exact (to floating point) solve of the coarse system; overwrites `x`.
    pub fn solve(&self, b: &[T], x: &mut [T]) {
        assert_eq!(b.len(), self.n);
        assert_eq!(x.len(), self.n);
        x.copy_from_slice(b);
        let x_mat = MatMut::from_column_major_slice_mut(x, self.n, 1);
        self.factor.solve_in_place_with_conj(Conj::No, x_mat);
    }
}
