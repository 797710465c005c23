//! Sparse × sparse product.

use crate::matrix::CsrMatrix;
use num_traits::Float;

/// Compute C = A · B with Gustavson's row-wise algorithm: a dense accumulator
/// per output row, scattered into and gathered from in column order.
pub fn spgemm<T: Float>(a: &CsrMatrix<T>, b: &CsrMatrix<T>) -> CsrMatrix<T> {
    assert_eq!(a.ncols(), b.nrows(), "spgemm: inner dimensions differ");

    let nrows = a.nrows();
    let ncols = b.ncols();
    let mut accum = vec![T::zero(); ncols];
    let mut marker = vec![usize::MAX; ncols];

    let mut row_ptr = Vec::with_capacity(nrows + 1);
    let mut col_idx = Vec::new();
    let mut values = Vec::new();
    row_ptr.push(0);

    let mut touched = Vec::new();
    for i in 0..nrows {
        touched.clear();
        let (a_cols, a_vals) = a.row(i);
        for (&k, &a_ik) in a_cols.iter().zip(a_vals) {
            let (b_cols, b_vals) = b.row(k);
            for (&j, &b_kj) in b_cols.iter().zip(b_vals) {
                if marker[j] != i {
                    marker[j] = i;
                    accum[j] = T::zero();
                    touched.push(j);
                }
                accum[j] = accum[j] + a_ik * b_kj;
            }
        }
        touched.sort_unstable();
        for &j in &touched {
            col_idx.push(j);
            values.push(accum[j]);
        }
        row_ptr.push(col_idx.len());
    }

    CsrMatrix::from_csr(nrows, ncols, row_ptr, col_idx, values)
        .expect("spgemm produces a valid CSR")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dense(m: &CsrMatrix<f64>) -> Vec<Vec<f64>> {
        let d = m.to_dense();
        (0..m.nrows())
            .map(|i| (0..m.ncols()).map(|j| d[(i, j)]).collect())
            .collect()
    }

    #[test]
    fn multiplies_small_matrices() {
        // A = [[1,2],[0,3]], B = [[4,0,1],[0,5,0]]
        let a = CsrMatrix::from_csr(2, 2, vec![0, 2, 3], vec![0, 1, 1], vec![1.0, 2.0, 3.0])
            .unwrap();
        let b = CsrMatrix::from_csr(
            2,
            3,
            vec![0, 2, 3],
            vec![0, 2, 1],
            vec![4.0, 1.0, 5.0],
        )
        .unwrap();
        let c = spgemm(&a, &b);
        assert_eq!(dense(&c), vec![vec![4.0, 10.0, 1.0], vec![0.0, 15.0, 0.0]]);
    }

    #[test]
    fn identity_is_neutral() {
        let a = CsrMatrix::from_csr(2, 2, vec![0, 2, 3], vec![0, 1, 1], vec![1.0, 2.0, 3.0])
            .unwrap();
        let i = CsrMatrix::identity(2);
        let c = spgemm(&i, &a);
        assert_eq!(dense(&c), dense(&a));
        let c = spgemm(&a, &i);
        assert_eq!(dense(&c), dense(&a));
    }
}
