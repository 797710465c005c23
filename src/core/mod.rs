pub mod traits;

pub use traits::{Indexing, MatVec, Preconditioner};
