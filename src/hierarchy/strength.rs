//! Symmetric strength-of-connection.

use crate::matrix::CsrMatrix;
use num_traits::Float;

/// Keep `A[i,j]` when `i == j` or `|A_ij| ≥ θ·sqrt(|A_ii|·|A_jj|)`.
///
/// θ = 0 keeps the full pattern; larger θ drops weak couplings so that
/// aggregation only follows numerically significant edges.
pub fn symmetric_strength<T: Float>(a: &CsrMatrix<T>, theta: T) -> CsrMatrix<T> {
    let n = a.nrows();
    let diag = a.diagonal();

    let mut row_ptr = Vec::with_capacity(n + 1);
    let mut col_idx = Vec::new();
    let mut values = Vec::new();
    row_ptr.push(0);

    for i in 0..n {
        let (cols, vals) = a.row(i);
        for (&j, &v) in cols.iter().zip(vals) {
            let keep = i == j
                || v.abs() * v.abs() >= theta * theta * (diag[i].abs() * diag[j].abs());
            if keep {
                col_idx.push(j);
                values.push(v);
            }
        }
        row_ptr.push(col_idx.len());
    }

    CsrMatrix::from_csr(n, n, row_ptr, col_idx, values)
        .expect("filtered pattern is a valid CSR")
}

/// Number of stored off-diagonal entries.
pub(crate) fn offdiag_count<T: Float>(m: &CsrMatrix<T>) -> usize {
    (0..m.nrows())
        .map(|i| m.row(i).0.iter().filter(|&&j| j != i).count())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CsrMatrix<f64> {
        // [[4, -0.1, -2], [-0.1, 4, 0], [-2, 0, 4]]
        CsrMatrix::from_csr(
            3,
            3,
            vec![0, 3, 5, 7],
            vec![0, 1, 2, 0, 1, 0, 2],
            vec![4.0, -0.1, -2.0, -0.1, 4.0, -2.0, 4.0],
        )
        .unwrap()
    }

    #[test]
    fn zero_theta_keeps_everything() {
        let a = sample();
        let c = symmetric_strength(&a, 0.0);
        assert_eq!(c.nnz(), a.nnz());
    }

    #[test]
    fn threshold_drops_weak_couplings() {
        let a = sample();
        // |−0.1| < 0.25·4, |−2| ≥ 0.25·4
        let c = symmetric_strength(&a, 0.25);
        assert_eq!(offdiag_count(&c), 2);
        let (cols, _) = c.row(0);
        assert_eq!(cols, &[0, 2]);
    }

    #[test]
    fn diagonal_always_survives() {
        let a = sample();
        let c = symmetric_strength(&a, 1e9);
        assert_eq!(offdiag_count(&c), 0);
        assert_eq!(c.diagonal(), a.diagonal());
    }
}
