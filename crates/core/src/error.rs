use thiserror::Error;

#[derive(Error, Debug)]
pub enum GateError {
    #[error("embedding dimension mismatch: query has {expected}, chunk {index} has {actual}")]
    DimensionMismatch {
        expected: usize,
        actual: usize,
        index: usize,
    },
}

pub type Result<T> = std::result::Result<T, GateError>;
