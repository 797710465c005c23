//! Compressed sparse row storage.

use crate::core::traits::{Indexing, MatVec};
use crate::error::AmgError;
use num_traits::Float;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// A sparse matrix in CSR layout: `row_ptr` has `nrows + 1` offsets into
/// `col_idx`/`values`, columns sorted and unique within each row.
#[derive(Clone, Debug)]
pub struct CsrMatrix<T> {
    nrows: usize,
    ncols: usize,
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    values: Vec<T>,
}

impl<T> CsrMatrix<T> {
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    pub fn row_ptr(&self) -> &[usize] {
        &self.row_ptr
    }

    pub fn col_idx(&self) -> &[usize] {
        &self.col_idx
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Column indices and values of row `i`.
    pub fn row(&self, i: usize) -> (&[usize], &[T]) {
        let span = self.row_ptr[i]..self.row_ptr[i + 1];
        (&self.col_idx[span.clone()], &self.values[span])
    }
}

impl<T: Float> CsrMatrix<T> {
    /// Build a CSR from raw row-ptr, col-idx, and values, validating shape.
    pub fn from_csr(
        nrows: usize,
        ncols: usize,
        row_ptr: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self, AmgError> {
        if row_ptr.len() != nrows + 1 {
            return Err(AmgError::InvalidInput(format!(
                "row_ptr length {} does not match nrows {} + 1",
                row_ptr.len(),
                nrows
            )));
        }
        if col_idx.len() != values.len() || row_ptr[nrows] != col_idx.len() {
            return Err(AmgError::InvalidInput(
                "row_ptr, col_idx and values are inconsistent".into(),
            ));
        }
        if row_ptr.windows(2).any(|w| w[0] > w[1]) {
            return Err(AmgError::InvalidInput("row_ptr is not monotone".into()));
        }
        if col_idx.iter().any(|&j| j >= ncols) {
            return Err(AmgError::InvalidInput("column index out of bounds".into()));
        }
        Ok(Self { nrows, ncols, row_ptr, col_idx, values })
    }

    /// Identity matrix of size `n`.
    pub fn identity(n: usize) -> Self {
        Self {
            nrows: n,
            ncols: n,
            row_ptr: (0..=n).collect(),
            col_idx: (0..n).collect(),
            values: vec![T::one(); n],
        }
    }

    /// Extract the main diagonal; entries absent from the pattern are zero.
    pub fn diagonal(&self) -> Vec<T> {
        let mut diag = vec![T::zero(); self.nrows.min(self.ncols)];
        for i in 0..diag.len() {
            let (cols, vals) = self.row(i);
            for (&j, &v) in cols.iter().zip(vals) {
                if j == i {
                    diag[i] = v;
                }
            }
        }
        diag
    }

    /// Transpose via counting sort on column indices (deterministic order).
    pub fn transpose(&self) -> Self {
        let mut row_ptr = vec![0usize; self.ncols + 1];
        for &j in &self.col_idx {
            row_ptr[j + 1] += 1;
        }
        for j in 0..self.ncols {
            row_ptr[j + 1] += row_ptr[j];
        }
        let mut col_idx = vec![0usize; self.nnz()];
        let mut values = vec![T::zero(); self.nnz()];
        let mut next = row_ptr.clone();
        for i in 0..self.nrows {
            let (cols, vals) = self.row(i);
            for (&j, &v) in cols.iter().zip(vals) {
                let dst = next[j];
                col_idx[dst] = i;
                values[dst] = v;
                next[j] += 1;
            }
        }
        Self { nrows: self.ncols, ncols: self.nrows, row_ptr, col_idx, values }
    }

    /// Dense copy, used for the coarse-level factorization and in tests.
    pub fn to_dense(&self) -> faer::Mat<T>
    where
        T: faer::traits::ComplexField,
    {
        let mut dense = faer::Mat::zeros(self.nrows, self.ncols);
        for i in 0..self.nrows {
            let (cols, vals) = self.row(i);
            for (&j, &v) in cols.iter().zip(vals) {
                dense[(i, j)] = v;
            }
        }
        dense
    }
}

impl<T: Float + Send + Sync> CsrMatrix<T> {
    /// Compute y = A · x. Row-parallel when the `rayon` feature is enabled.
    pub fn spmv(&self, x: &[T], y: &mut [T]) {
        assert_eq!(x.len(), self.ncols());
        assert_eq!(y.len(), self.nrows());
        #[cfg(feature = "rayon")]
        {
            y.par_iter_mut().enumerate().for_each(|(i, yi)| {
                let (cols, vals) = self.row(i);
                let mut sum = T::zero();
                for (&j, &v) in cols.iter().zip(vals) {
                    sum = sum + v * x[j];
                }
                *yi = sum;
            });
        }
        #[cfg(not(feature = "rayon"))]
        {
            for (i, yi) in y.iter_mut().enumerate() {
                let (cols, vals) = self.row(i);
                let mut sum = T::zero();
                for (&j, &v) in cols.iter().zip(vals) {
                    sum = sum + v * x[j];
                }
                *yi = sum;
            }
        }
    }
}

impl<T: Float + Send + Sync> MatVec<T> for CsrMatrix<T> {
    fn matvec(&self, x: &[T], y: &mut [T]) {
        self.spmv(x, y)
    }
}

impl<T> Indexing for CsrMatrix<T> {
    fn nrows(&self) -> usize {
        self.nrows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Size accessors must stay usable from code that is generic over any
    // scalar, not just floating-point ones.
    fn shape_of<T>(m: &CsrMatrix<T>) -> (usize, usize, usize) {
        (m.nrows(), m.ncols(), m.nnz())
    }

    #[test]
    fn size_accessors_without_numeric_bounds() {
        let m = CsrMatrix::<f64>::identity(4);
        assert_eq!(shape_of(&m), (4, 4, 4));
    }

    #[test]
    fn identity_spmv() {
        let m = CsrMatrix::<f64>::identity(3);
        let x = vec![2.0, 3.0, 5.0];
        let mut y = vec![0.0; 3];
        m.spmv(&x, &mut y);
        assert_eq!(y, x);
    }

    #[test]
    fn simple_pattern() {
        // 2×3 matrix [[1,2,0],[0,3,4]]
        let m = CsrMatrix::from_csr(
            2,
            3,
            vec![0, 2, 4],
            vec![0, 1, 1, 2],
            vec![1.0, 2.0, 3.0, 4.0],
        )
        .unwrap();
        let x = vec![1.0, 1.0, 1.0];
        let mut y = vec![0.0; 2];
        m.spmv(&x, &mut y);
        assert_eq!(y, vec![3.0, 7.0]);
    }

    #[test]
    fn transpose_round_trip() {
        let m = CsrMatrix::from_csr(
            2,
            3,
            vec![0, 2, 4],
            vec![0, 1, 1, 2],
            vec![1.0, 2.0, 3.0, 4.0],
        )
        .unwrap();
        let t = m.transpose();
        assert_eq!(t.nrows(), 3);
        assert_eq!(t.ncols(), 2);
        // (Aᵀ)ᵀ = A entrywise
        let tt = t.transpose();
        assert_eq!(tt.row_ptr(), m.row_ptr());
        assert_eq!(tt.col_idx(), m.col_idx());
        assert_eq!(tt.values(), m.values());
    }

    #[test]
    fn diagonal_with_missing_entry() {
        // [[2,1],[0,0]] — second diagonal entry absent from the pattern
        let m = CsrMatrix::from_csr(2, 2, vec![0, 2, 2], vec![0, 1], vec![2.0, 1.0]).unwrap();
        assert_eq!(m.diagonal(), vec![2.0, 0.0]);
    }

    #[test]
    fn from_csr_rejects_bad_offsets() {
        let err = CsrMatrix::<f64>::from_csr(2, 2, vec![0, 1], vec![0], vec![1.0]);
        assert!(err.is_err());
    }
}
