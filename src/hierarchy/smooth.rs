//! Prolongator smoothing: P = (I − (ω/ρ)·D⁻¹A)·T.

use crate::error::AmgError;
use crate::matrix::{CooMatrix, CsrMatrix};
use num_traits::Float;

/// Apply one damped-Jacobi step to the tentative prolongator `t`.
///
/// `D⁻¹A` is never formed. Because `t` has exactly one entry per fine row,
/// the pattern of `A·T` is `A`'s pattern with columns remapped through the
/// aggregate assignment: each nonzero `A[i,j]` contributes
/// `−(ω/ρ)/D[i] · A[i,j] · T[j, agg(j)]` at `(i, agg(j))`. The entries of
/// `t` itself are appended with coefficient one, then coordinates are
/// sorted and duplicates summed.
pub fn smooth_prolongator<T: Float>(
    a: &CsrMatrix<T>,
    t: &CooMatrix<T>,
    omega: T,
    rho: T,
) -> Result<CsrMatrix<T>, AmgError> {
    assert_eq!(t.nnz(), t.nrows(), "tentative prolongator must have one entry per row");
    assert_eq!(a.nrows(), t.nrows());
    debug_assert!(t.rows.iter().enumerate().all(|(k, &r)| k == r));

    let lambda = omega / rho;
    let diag = a.diagonal();
    for (i, &d) in diag.iter().enumerate() {
        if d.abs() <= T::epsilon() {
            return Err(AmgError::SingularDiagonal(i));
        }
    }

    let mut staged = CooMatrix::with_capacity(a.nrows(), t.ncols(), a.nnz() + t.nnz());
    for i in 0..a.nrows() {
        let scale = -lambda / diag[i];
        let (cols, vals) = a.row(i);
        for (&j, &aij) in cols.iter().zip(vals) {
            staged.push(i, t.cols[j], scale * aij * t.vals[j]);
        }
    }
    for ((&row, &col), &val) in t.rows.iter().zip(&t.cols).zip(&t.vals) {
        staged.push(row, col, val);
    }

    Ok(staged.to_csr())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::tentative::fit_candidates;
    use approx::assert_relative_eq;

    #[test]
    fn identity_operator_scales_tentative() {
        // With A = I: P = (1 − λ)·T, λ = ω/ρ
        let a = CsrMatrix::<f64>::identity(4);
        let aggregates = vec![0, 0, 1, 1];
        let b = vec![1.0; 4];
        let (t, _) = fit_candidates(&aggregates, &b).unwrap();
        let p = smooth_prolongator(&a, &t, 4.0 / 3.0, 1.0).unwrap();
        let expect = (1.0 - 4.0 / 3.0) / 2.0f64.sqrt();
        for i in 0..4 {
            let (cols, vals) = p.row(i);
            assert_eq!(cols, &[aggregates[i]]);
            assert_relative_eq!(vals[0], expect, max_relative = 1e-14);
        }
    }

    #[test]
    fn overlapping_contributions_are_summed() {
        // 2×2 coupled system, both rows in one aggregate: the smoothing term
        // and the tentative entry land on the same coordinate.
        let a = CsrMatrix::from_csr(
            2,
            2,
            vec![0, 2, 4],
            vec![0, 1, 0, 1],
            vec![2.0, -1.0, -1.0, 2.0],
        )
        .unwrap();
        let aggregates = vec![0, 0];
        let b = vec![1.0, 1.0];
        let (t, _) = fit_candidates(&aggregates, &b).unwrap();
        let p = smooth_prolongator(&a, &t, 1.0, 1.0).unwrap();
        assert_eq!(p.nnz(), 2);
        // row 0: t00 − λ/2·(2·t00 − 1·t10) with t00 = t10 = 1/√2
        let tval = 1.0 / 2.0f64.sqrt();
        let expect = tval - 0.5 * (2.0 * tval - tval);
        let (_, vals) = p.row(0);
        assert_relative_eq!(vals[0], expect, max_relative = 1e-14);
    }

    #[test]
    fn zero_diagonal_is_rejected() {
        let a = CsrMatrix::from_csr(2, 2, vec![0, 1, 2], vec![1, 0], vec![1.0, 1.0]).unwrap();
        let (t, _) = fit_candidates(&[0, 0], &[1.0, 1.0]).unwrap();
        assert!(matches!(
            smooth_prolongator(&a, &t, 4.0 / 3.0, 1.0),
            Err(AmgError::SingularDiagonal(0))
        ));
    }
}
