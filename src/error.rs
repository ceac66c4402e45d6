//! Error type shared by every multiplication entry point.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatmulError {
    #[error("matmul dimension mismatch: [{m}x{k}] @ [{k2}x{n}]")]
    DimensionMismatch {
        m: usize,
        k: usize,
        k2: usize,
        n: usize,
    },
    #[error(
        "invalid shape for recursion: {rows}x{cols} must be square and halve evenly down to threshold {threshold}"
    )]
    InvalidShapeForRecursion {
        rows: usize,
        cols: usize,
        threshold: usize,
    },
    #[error("shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },
    #[error("data length {len} does not match {rows}x{cols}")]
    DataLength {
        rows: usize,
        cols: usize,
        len: usize,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("thread pool: {0}")]
    ThreadPool(String),
}

pub type Result<T> = std::result::Result<T, MatmulError>;
