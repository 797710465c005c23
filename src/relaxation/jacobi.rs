//! Weighted Jacobi relaxation: x ← x + ω·D⁻¹·(b − A·x).

use crate::error::AmgError;
use crate::matrix::CsrMatrix;
use crate::relaxation::Relaxation;
use num_traits::Float;

pub struct JacobiSmoother<T> {
    pub(crate) inv_diag: Vec<T>,
    pub(crate) omega: T,
}

impl<T: Float> JacobiSmoother<T> {
    /// Bind to `a`'s diagonal with damping factor `omega`.
    pub fn new(a: &CsrMatrix<T>, omega: T) -> Result<Self, AmgError> {
        let diag = a.diagonal();
        let mut inv_diag = vec![T::zero(); diag.len()];
        for (i, &d) in diag.iter().enumerate() {
            if d.abs() <= T::epsilon() {
                return Err(AmgError::SingularDiagonal(i));
            }
            inv_diag[i] = T::one() / d;
        }
        Ok(Self { inv_diag, omega })
    }
}

impl<T: Float + Send + Sync> Relaxation<T> for JacobiSmoother<T> {
    // The zero-initial-guess form: one weighted sweep from x = 0 reduces to
    // x = ω·D⁻¹·b. Overwriting here is what makes reusing the coarse-level
    // scratch across V-cycles safe.
    fn presmooth(&self, _a: &CsrMatrix<T>, b: &[T], x: &mut [T]) {
        for ((xi, &bi), &di) in x.iter_mut().zip(b).zip(&self.inv_diag) {
            *xi = self.omega * di * bi;
        }
    }

    fn postsmooth(&self, a: &CsrMatrix<T>, b: &[T], x: &mut [T]) {
        let mut r = vec![T::zero(); b.len()];
        a.spmv(x, &mut r);
        for ((xi, (&bi, &ri)), &di) in x.iter_mut().zip(b.iter().zip(&r)).zip(&self.inv_diag) {
            *xi = *xi + self.omega * di * (bi - ri);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn spd_2x2() -> CsrMatrix<f64> {
        CsrMatrix::from_csr(2, 2, vec![0, 2, 4], vec![0, 1, 0, 1], vec![4.0, 1.0, 1.0, 3.0])
            .unwrap()
    }

    #[test]
    fn presmooth_is_scaled_rhs() {
        let a = spd_2x2();
        let s = JacobiSmoother::new(&a, 0.5).unwrap();
        let b = vec![8.0, 6.0];
        let mut x = vec![123.0, -7.0]; // stale scratch must be overwritten
        s.presmooth(&a, &b, &mut x);
        assert_relative_eq!(x[0], 0.5 * 8.0 / 4.0);
        assert_relative_eq!(x[1], 0.5 * 6.0 / 3.0);
    }

    #[test]
    fn postsmooth_reduces_residual() {
        let a = spd_2x2();
        let s = JacobiSmoother::new(&a, 2.0 / 3.0).unwrap();
        let b = vec![1.0, 2.0];
        let mut x = vec![0.0, 0.0];
        let norm = |v: &[f64]| v.iter().map(|&t| t * t).sum::<f64>().sqrt();
        let mut r = vec![0.0; 2];
        for _ in 0..5 {
            s.postsmooth(&a, &b, &mut x);
        }
        a.spmv(&x, &mut r);
        let res = norm(&[b[0] - r[0], b[1] - r[1]]);
        assert!(res < 0.2 * norm(&b), "residual {res} not reduced");
    }

    #[test]
    fn zero_diagonal_is_rejected() {
        let a = CsrMatrix::from_csr(2, 2, vec![0, 1, 2], vec![1, 0], vec![1.0, 1.0]).unwrap();
        assert!(matches!(
            JacobiSmoother::new(&a, 1.0),
            Err(AmgError::SingularDiagonal(0))
        ));
    }
}
