//! Core linear-algebra traits for samg.

use crate::error::AmgError;

/// Matrix–vector product: y ← A x.
pub trait MatVec<T> {
    /// Compute y = A · x.
    fn matvec(&self, x: &[T], y: &mut [T]);
}

/// Uniform indexing into operators (number of rows).
pub trait Indexing {
    /// Number of rows.
    fn nrows(&self) -> usize;
}

/// A preconditioner M ≈ A⁻¹.
///
/// `apply` takes `&mut self` because one application reuses the per-level
/// scratch buffers owned by the hierarchy; the borrow checker thereby rules
/// out two concurrent applications sharing one set of buffers.
pub trait Preconditioner<T> {
    /// Apply M⁻¹ to r, writing z = M⁻¹ r.
    fn apply(&mut self, r: &[T], z: &mut [T]) -> Result<(), AmgError>;
}
