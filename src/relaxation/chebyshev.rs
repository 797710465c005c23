//! Jacobi-preconditioned Chebyshev relaxation.
//!
//! A three-term recurrence targets the upper part of the spectrum of D⁻¹A on
//! the interval [ρ/30, 1.1ρ], with ρ the same spectral-radius estimate used
//! to weight the prolongator smoothing at this level.

use crate::error::AmgError;
use crate::matrix::CsrMatrix;
use crate::relaxation::Relaxation;
use num_traits::Float;

pub struct ChebyshevSmoother<T> {
    inv_diag: Vec<T>,
    lower: T,
    upper: T,
    degree: usize,
}

impl<T: Float> ChebyshevSmoother<T> {
    /// Bind to `a`'s diagonal, targeting the interval derived from `rho`.
    pub fn new(a: &CsrMatrix<T>, rho: T, degree: usize) -> Result<Self, AmgError> {
        let diag = a.diagonal();
        let mut inv_diag = vec![T::zero(); diag.len()];
        for (i, &d) in diag.iter().enumerate() {
            if d.abs() <= T::epsilon() {
                return Err(AmgError::SingularDiagonal(i));
            }
            inv_diag[i] = T::one() / d;
        }
        let lower = rho / T::from(30.0).unwrap();
        let upper = rho * T::from(1.1).unwrap();
        Ok(Self { inv_diag, lower, upper, degree })
    }

    fn sweep(&self, a: &CsrMatrix<T>, b: &[T], x: &mut [T])
    where
        T: Send + Sync,
    {
        if self.degree == 0 {
            return;
        }
        let n = b.len();
        let two = T::from(2.0).unwrap();
        let theta = (self.upper + self.lower) / two;
        let delta = (self.upper - self.lower) / two;
        debug_assert!(delta > T::zero());
        let sigma = theta / delta;
        let mut rho_k = T::one() / sigma;

        let mut r = vec![T::zero(); n];
        let mut d = vec![T::zero(); n];
        let residual = |x: &[T], r: &mut [T]| {
            a.spmv(x, r);
            for (ri, &bi) in r.iter_mut().zip(b) {
                *ri = bi - *ri;
            }
        };

        residual(x, &mut r);
        for (di, (&ri, &inv)) in d.iter_mut().zip(r.iter().zip(&self.inv_diag)) {
            *di = inv * ri / theta;
        }
        for step in 0..self.degree {
            for (xi, &di) in x.iter_mut().zip(&d) {
                *xi = *xi + di;
            }
            if step + 1 == self.degree {
                break;
            }
            residual(x, &mut r);
            let rho_next = T::one() / (two * sigma - rho_k);
            let dscale = rho_next * rho_k;
            let zscale = two * rho_next / delta;
            for (di, (&ri, &inv)) in d.iter_mut().zip(r.iter().zip(&self.inv_diag)) {
                *di = dscale * *di + zscale * inv * ri;
            }
            rho_k = rho_next;
        }
    }
}

impl<T: Float + Send + Sync> Relaxation<T> for ChebyshevSmoother<T> {
    fn presmooth(&self, a: &CsrMatrix<T>, b: &[T], x: &mut [T]) {
        // scratch may hold a stale correction; the polynomial starts from zero
        for xi in x.iter_mut() {
            *xi = T::zero();
        }
        self.sweep(a, b, x);
    }

    fn postsmooth(&self, a: &CsrMatrix<T>, b: &[T], x: &mut [T]) {
        self.sweep(a, b, x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::convergence::norm2;

    fn laplacian_1d(n: usize) -> CsrMatrix<f64> {
        let mut row_ptr = vec![0usize];
        let mut col_idx = Vec::new();
        let mut values = Vec::new();
        for i in 0..n {
            if i > 0 {
                col_idx.push(i - 1);
                values.push(-1.0);
            }
            col_idx.push(i);
            values.push(2.0);
            if i + 1 < n {
                col_idx.push(i + 1);
                values.push(-1.0);
            }
            row_ptr.push(col_idx.len());
        }
        CsrMatrix::from_csr(n, n, row_ptr, col_idx, values).unwrap()
    }

    #[test]
    fn sweep_reduces_residual() {
        let a = laplacian_1d(32);
        let s = ChebyshevSmoother::new(&a, 2.0, 3).unwrap();
        let b = vec![1.0; 32];
        let mut x = vec![0.0; 32];
        s.presmooth(&a, &b, &mut x);
        let mut r = vec![0.0; 32];
        a.spmv(&x, &mut r);
        for (ri, &bi) in r.iter_mut().zip(&b) {
            *ri = bi - *ri;
        }
        assert!(norm2(&r) < norm2(&b), "Chebyshev sweep did not reduce the residual");
    }

    #[test]
    fn presmooth_ignores_stale_scratch() {
        let a = laplacian_1d(8);
        let s = ChebyshevSmoother::new(&a, 2.0, 2).unwrap();
        let b = vec![1.0; 8];
        let mut from_zero = vec![0.0; 8];
        let mut from_garbage = vec![1e6; 8];
        s.presmooth(&a, &b, &mut from_zero);
        s.presmooth(&a, &b, &mut from_garbage);
        assert_eq!(from_zero, from_garbage);
    }

    #[test]
    fn degree_zero_is_identity() {
        let a = laplacian_1d(4);
        let s = ChebyshevSmoother::new(&a, 2.0, 0).unwrap();
        let b = vec![1.0; 4];
        let mut x = vec![3.0; 4];
        s.postsmooth(&a, &b, &mut x);
        assert_eq!(x, vec![3.0; 4]);
    }
}
