use thiserror::Error;

// Unified error type for samg

#[derive(Error, Debug)]
pub enum AmgError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("degenerate aggregation: {0}")]
    DegenerateAggregation(String),
    #[error("zero or near-zero diagonal at row {0}")]
    SingularDiagonal(usize),
    #[error("coarse factorization failed: {0}")]
    CoarseFactorization(String),
}
