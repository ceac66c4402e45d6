//! Block-recursive multipliers.
//!
//! Both algorithms split square operands into quadrants until the block
//! side is at or below `threshold`, then finish with the iterative kernel.
//! Shapes are validated once at the public entry point; the recursion
//! itself trusts them.
//!
//! Available implementations:
//! - `divide_conquer`: 8 half-size products per level
//! - `strassen`: 7 half-size products plus 18 additions per level

pub mod divide_conquer;
pub mod strassen;

use crate::config::RecursiveConfig;
use crate::error::{MatmulError, Result};
use crate::matrix::Matrix;

/// True when `n` halves evenly at every level until it is `<= threshold`.
///
/// Every power of two qualifies for every positive threshold.
pub fn splits_evenly(n: usize, threshold: usize) -> bool {
    let mut n = n;
    while n > threshold {
        if n % 2 != 0 {
            return false;
        }
        n /= 2;
    }
    true
}

/// Checks config and operands for a recursive multiply and returns the
/// common side length. Runs before anything is allocated.
pub(crate) fn check_operands(a: &Matrix, b: &Matrix, config: &RecursiveConfig) -> Result<usize> {
    config.validate()?;
    if a.cols() != b.rows() {
        return Err(MatmulError::DimensionMismatch {
            m: a.rows(),
            k: a.cols(),
            k2: b.rows(),
            n: b.cols(),
        });
    }
    for m in [a, b] {
        if !m.is_square() || !splits_evenly(m.rows(), config.threshold) {
            return Err(MatmulError::InvalidShapeForRecursion {
                rows: m.rows(),
                cols: m.cols(),
                threshold: config.threshold,
            });
        }
    }
    Ok(a.rows())
}
