//! Ritz-style spectral radius estimation for D⁻¹A.
//!
//! The smoothing weights of the hierarchy are scaled by ρ(D⁻¹A), estimated
//! with a few Arnoldi steps followed by power iteration on the resulting
//! small Hessenberg matrix.

use crate::core::traits::{Indexing, MatVec};
use crate::error::AmgError;
use crate::matrix::CsrMatrix;
use num_traits::Float;

/// The operator x ↦ D⁻¹(Ax), never formed explicitly.
pub struct DinvA<'a, M, T> {
    a: &'a M,
    inv_diag: &'a [T],
}

impl<'a, M, T> DinvA<'a, M, T> {
    pub fn new(a: &'a M, inv_diag: &'a [T]) -> Self {
        Self { a, inv_diag }
    }
}

impl<M: MatVec<T>, T: Float> MatVec<T> for DinvA<'_, M, T> {
    fn matvec(&self, x: &[T], y: &mut [T]) {
        self.a.matvec(x, y);
        for (yi, &di) in y.iter_mut().zip(self.inv_diag) {
            *yi = *yi * di;
        }
    }
}

impl<M: Indexing, T> Indexing for DinvA<'_, M, T> {
    fn nrows(&self) -> usize {
        self.a.nrows()
    }
}

/// Estimate ρ(D⁻¹A) for a square operator with nonzero diagonal.
pub fn estimate_rho_dinv_a<T: Float + Send + Sync>(a: &CsrMatrix<T>) -> Result<T, AmgError> {
    let diag = a.diagonal();
    let mut inv_diag = vec![T::zero(); diag.len()];
    for (i, &d) in diag.iter().enumerate() {
        if d.abs() <= T::epsilon() {
            return Err(AmgError::SingularDiagonal(i));
        }
        inv_diag[i] = T::one() / d;
    }
    let op = DinvA::new(a, &inv_diag);
    Ok(ritz_spectral_radius(&op, 10))
}

/// Approximate the largest-magnitude eigenvalue of `op` with at most `k`
/// Arnoldi steps.
pub fn ritz_spectral_radius<M, T>(op: &M, k: usize) -> T
where
    M: MatVec<T> + Indexing,
    T: Float,
{
    let n = op.nrows();
    if n == 0 {
        return T::zero();
    }
    let k = k.min(n);

    // deterministic pseudo-random start vector, overlaps every mode
    let mut v = seed_vector(n);
    normalize(&mut v);

    let mut basis: Vec<Vec<T>> = vec![v];
    let mut h = vec![vec![T::zero(); k]; k + 1];
    let mut m = k;

    for j in 0..k {
        let mut w = vec![T::zero(); n];
        op.matvec(&basis[j], &mut w);
        // modified Gram-Schmidt against the current basis
        for (i, q) in basis.iter().enumerate() {
            let hij = dot(q, &w);
            h[i][j] = hij;
            for (wi, &qi) in w.iter_mut().zip(q) {
                *wi = *wi - hij * qi;
            }
        }
        let hnext = crate::utils::convergence::norm2(&w);
        h[j + 1][j] = hnext;
        if hnext <= T::epsilon() {
            m = j + 1;
            break;
        }
        for wi in w.iter_mut() {
            *wi = *wi / hnext;
        }
        basis.push(w);
    }

    hessenberg_spectral_radius(&h, m)
}

/// Power iteration on the leading m×m block of the Hessenberg matrix.
fn hessenberg_spectral_radius<T: Float>(h: &[Vec<T>], m: usize) -> T {
    let mut v = vec![T::one(); m];
    normalize(&mut v);
    let mut lambda = T::zero();
    for _ in 0..100 {
        let mut w = vec![T::zero(); m];
        for (i, wi) in w.iter_mut().enumerate() {
            for j in 0..m {
                *wi = *wi + h[i][j] * v[j];
            }
        }
        let nrm = crate::utils::convergence::norm2(&w);
        if nrm <= T::epsilon() {
            return T::zero();
        }
        lambda = nrm;
        for (vi, &wi) in v.iter_mut().zip(&w) {
            *vi = wi / nrm;
        }
    }
    lambda
}

fn seed_vector<T: Float>(n: usize) -> Vec<T> {
    let mut state: u64 = 0x9e3779b97f4a7c15;
    (0..n)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            // map to (-1, 1)
            let u = (state >> 11) as f64 / (1u64 << 53) as f64;
            T::from(2.0 * u - 1.0).unwrap()
        })
        .collect()
}

fn dot<T: Float>(x: &[T], y: &[T]) -> T {
    x.iter().zip(y).fold(T::zero(), |acc, (&a, &b)| acc + a * b)
}

fn normalize<T: Float>(v: &mut [T]) {
    let nrm = crate::utils::convergence::norm2(v);
    if nrm > T::zero() {
        for vi in v.iter_mut() {
            *vi = *vi / nrm;
        }
    }
}
