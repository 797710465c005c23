//! Sparse matrix storage and the bulk primitives the hierarchy is built from:
//! CSR/COO formats, transpose, sparse×sparse multiply, diagonal extraction,
//! and deduplicate-and-sum-by-(row,col).

pub mod coo;
pub mod csr;
pub mod ops;

pub use coo::CooMatrix;
pub use csr::CsrMatrix;
pub use ops::spgemm;
