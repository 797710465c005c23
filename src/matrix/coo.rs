//! Coordinate (triplet) storage, used while assembling operators.

use crate::matrix::CsrMatrix;
use num_traits::Float;

/// A sparse matrix as (row, col, value) triplets. Duplicates are allowed
/// until [`CooMatrix::sort_and_combine`] runs.
#[derive(Clone, Debug)]
pub struct CooMatrix<T> {
    nrows: usize,
    ncols: usize,
    pub(crate) rows: Vec<usize>,
    pub(crate) cols: Vec<usize>,
    pub(crate) vals: Vec<T>,
}

impl<T: Float> CooMatrix<T> {
    pub fn with_capacity(nrows: usize, ncols: usize, cap: usize) -> Self {
        Self {
            nrows,
            ncols,
            rows: Vec::with_capacity(cap),
            cols: Vec::with_capacity(cap),
            vals: Vec::with_capacity(cap),
        }
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn nnz(&self) -> usize {
        self.vals.len()
    }

    pub fn push(&mut self, row: usize, col: usize, val: T) {
        debug_assert!(row < self.nrows && col < self.ncols);
        self.rows.push(row);
        self.cols.push(col);
        self.vals.push(val);
    }

    /// Sort triplets by (row, col) and sum entries sharing a coordinate.
    ///
    /// This is the dedup step of prolongator smoothing: a fine row can
    /// receive both a smoothing contribution and a direct tentative entry at
    /// the same coordinate.
    pub fn sort_and_combine(&mut self) {
        let mut order: Vec<usize> = (0..self.nnz()).collect();
        order.sort_unstable_by_key(|&k| (self.rows[k], self.cols[k]));

        let mut rows = Vec::with_capacity(self.nnz());
        let mut cols = Vec::with_capacity(self.nnz());
        let mut vals: Vec<T> = Vec::with_capacity(self.nnz());
        for &k in &order {
            let (r, c, v) = (self.rows[k], self.cols[k], self.vals[k]);
            match (rows.last(), cols.last()) {
                (Some(&lr), Some(&lc)) if lr == r && lc == c => {
                    let last = vals.last_mut().unwrap();
                    *last = *last + v;
                }
                _ => {
                    rows.push(r);
                    cols.push(c);
                    vals.push(v);
                }
            }
        }
        self.rows = rows;
        self.cols = cols;
        self.vals = vals;
    }

    /// Convert to CSR. Combines duplicates first, so the result always has
    /// sorted, unique columns per row.
    pub fn to_csr(mut self) -> CsrMatrix<T> {
        self.sort_and_combine();
        let mut row_ptr = vec![0usize; self.nrows + 1];
        for &r in &self.rows {
            row_ptr[r + 1] += 1;
        }
        for i in 0..self.nrows {
            row_ptr[i + 1] += row_ptr[i];
        }
        CsrMatrix::from_csr(self.nrows, self.ncols, row_ptr, self.cols, self.vals)
            .expect("triplets form a valid CSR")
    }
}
