//! Recursive integer matrix multiplication in Rust.
//!
//! Three interchangeable algorithms over square `i64` matrices:
//! the i-k-j iterative kernel, classic divide-and-conquer (8 products per
//! level) and Strassen (7 products per level). Both recursive algorithms
//! come in a sequential and a fork-join parallel form, and both fall back
//! to the iterative kernel once blocks are small.
//!
//! ## Usage
//!
//! ```
//! use recmatmul::{Matrix, RecursiveConfig, multiply_iterative, multiply_strassen};
//!
//! let a = Matrix::from_fn(256, 256, |r, c| ((r + c) % 7) as i64);
//! let b = Matrix::from_fn(256, 256, |r, c| ((r * c) % 5) as i64);
//!
//! let expected = multiply_iterative(&a, &b).unwrap();
//! let c = multiply_strassen(&a, &b, &RecursiveConfig::parallel().with_threshold(32)).unwrap();
//! assert_eq!(c, expected);
//! ```
//!
//! To bound the number of worker threads, run inside a pool:
//!
//! ```
//! use recmatmul::{Matrix, RecursiveConfig, ForkJoinPool, multiply_divide_conquer};
//!
//! let pool = ForkJoinPool::new(2).unwrap();
//! let a = Matrix::identity(64);
//! let config = RecursiveConfig::parallel().with_threshold(8).with_parallel_threshold(16);
//! let c = pool.install(|| multiply_divide_conquer(&a, &a, &config)).unwrap();
//! assert_eq!(c, a);
//! ```
//!
//! ## What's inside
//!
//! - Zero-copy quadrant views with disjoint mutable splits
//! - Cache-friendly i-k-j base case
//! - Fork-join recursion on a bounded rayon pool
//! - Wrapping arithmetic, so every algorithm agrees bit-for-bit

pub mod config;
pub mod error;
pub mod matrix;
pub mod recursive;
pub mod threaded;

use std::fmt;
use std::str::FromStr;

pub use config::RecursiveConfig;
pub use error::{MatmulError, Result};
pub use matrix::iterative::multiply_iterative;
pub use matrix::{Element, Matrix, MatrixView, MatrixViewMut};
pub use recursive::divide_conquer::multiply_divide_conquer;
pub use recursive::strassen::multiply_strassen;
pub use threaded::ForkJoinPool;

/// Multiplication algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Iterative,
    DivideConquer,
    Strassen,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Iterative,
        Algorithm::DivideConquer,
        Algorithm::Strassen,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Iterative => "iterative",
            Algorithm::DivideConquer => "divide-conquer",
            Algorithm::Strassen => "strassen",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = MatmulError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "iterative" | "naive" => Ok(Algorithm::Iterative),
            "divide-conquer" | "divide_conquer" | "dc" => Ok(Algorithm::DivideConquer),
            "strassen" => Ok(Algorithm::Strassen),
            other => Err(MatmulError::InvalidConfig(format!(
                "unknown algorithm '{other}'"
            ))),
        }
    }
}

/// Matrix multiply: C = A * B with the chosen algorithm.
///
/// `config` is ignored by [`Algorithm::Iterative`], which also accepts
/// rectangular operands.
pub fn multiply(
    a: &Matrix,
    b: &Matrix,
    algorithm: Algorithm,
    config: &RecursiveConfig,
) -> Result<Matrix> {
    match algorithm {
        Algorithm::Iterative => multiply_iterative(a, b),
        Algorithm::DivideConquer => multiply_divide_conquer(a, b, config),
        Algorithm::Strassen => multiply_strassen(a, b, config),
    }
}
