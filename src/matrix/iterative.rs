//! Cache-friendly iterative multiplication using i-k-j loop order.
//!
//! With `k` in the middle, the innermost loop walks row `k` of B and row `i`
//! of C sequentially (stride 1) while `a[i][k]` stays in a register. This
//! is the standalone O(n³) algorithm and the base case every recursive
//! multiplier bottoms out in.

use super::{Matrix, MatrixView, MatrixViewMut};
use crate::error::{MatmulError, Result};

/// `c += a * b` without shape checks. Callers guarantee
/// `a.cols == b.rows`, `c.rows == a.rows` and `c.cols == b.cols`.
pub(crate) fn accumulate(a: MatrixView<'_>, b: MatrixView<'_>, c: &mut MatrixViewMut<'_>) {
    debug_assert_eq!(a.cols(), b.rows());
    debug_assert_eq!((c.rows(), c.cols()), (a.rows(), b.cols()));
    for i in 0..a.rows() {
        let a_row = a.row(i);
        let c_row = c.row_mut(i);
        for (k, &a_ik) in a_row.iter().enumerate() {
            for (c_ij, &b_kj) in c_row.iter_mut().zip(b.row(k)) {
                *c_ij = c_ij.wrapping_add(a_ik.wrapping_mul(b_kj));
            }
        }
    }
}

/// `c = a * b`, discarding whatever `c` held. Base case of the recursive
/// multipliers, which reuse scratch buffers between sub-products.
pub(crate) fn overwrite(a: MatrixView<'_>, b: MatrixView<'_>, mut c: MatrixViewMut<'_>) {
    c.fill(0);
    accumulate(a, b, &mut c);
}

fn check_inner(a: &MatrixView<'_>, b: &MatrixView<'_>) -> Result<()> {
    if a.cols() != b.rows() {
        return Err(MatmulError::DimensionMismatch {
            m: a.rows(),
            k: a.cols(),
            k2: b.rows(),
            n: b.cols(),
        });
    }
    Ok(())
}

/// Accumulating multiply: `C[i][j] += Σ_k A[i][k] * B[k][j]`.
///
/// Works on any rectangular shapes. Nothing is written when the shapes
/// don't line up.
///
/// # Arguments
///
/// * `a` - Matrix A (m × k)
/// * `b` - Matrix B (k × n)
/// * `c` - Matrix C (m × n), accumulated into
pub fn multiply_into(
    a: MatrixView<'_>,
    b: MatrixView<'_>,
    c: &mut MatrixViewMut<'_>,
) -> Result<()> {
    check_inner(&a, &b)?;
    if (c.rows(), c.cols()) != (a.rows(), b.cols()) {
        return Err(MatmulError::ShapeMismatch {
            expected: (a.rows(), b.cols()),
            got: (c.rows(), c.cols()),
        });
    }
    accumulate(a, b, c);
    Ok(())
}

/// `A * B` into a new matrix.
///
/// ```
/// use recmatmul::{Matrix, multiply_iterative};
///
/// let a = Matrix::from_vec(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
/// let b = Matrix::from_vec(3, 2, vec![7, 8, 9, 10, 11, 12]).unwrap();
/// let c = multiply_iterative(&a, &b).unwrap();
/// assert_eq!(c.as_slice(), &[58, 64, 139, 154]);
/// ```
#[tracing::instrument(level = "debug", skip_all, fields(a = ?a.shape(), b = ?b.shape()))]
pub fn multiply_iterative(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    check_inner(&a.view(), &b.view()).inspect_err(|err| tracing::debug!(%err, "rejected"))?;
    let mut c = Matrix::new(a.rows(), b.cols());
    accumulate(a.view(), b.view(), &mut c.view_mut());
    Ok(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Element;
    use crate::matrix::naive_ijk::multiply_ijk;

    #[test]
    fn test_2x2() {
        let a = Matrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        let b = Matrix::from_vec(2, 2, vec![5, 6, 7, 8]).unwrap();
        let c = multiply_iterative(&a, &b).unwrap();
        assert_eq!(c.as_slice(), &[19, 22, 43, 50]);
    }

    #[test]
    fn test_matches_ijk_on_rectangles() {
        for (m, n, k) in [(1, 1, 1), (3, 5, 7), (7, 3, 5), (11, 13, 17), (16, 1, 9)] {
            let a = Matrix::from_fn(m, k, |r, c| ((r * 7 + c * 3) % 11) as Element - 5);
            let b = Matrix::from_fn(k, n, |r, c| ((r * 5 + c) % 13) as Element - 6);
            assert_eq!(
                multiply_iterative(&a, &b).unwrap(),
                multiply_ijk(a.view(), b.view()),
                "{m}x{k} @ {k}x{n}"
            );
        }
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = Matrix::new(2, 3);
        let b = Matrix::new(2, 3);
        assert_eq!(
            multiply_iterative(&a, &b),
            Err(MatmulError::DimensionMismatch {
                m: 2,
                k: 3,
                k2: 2,
                n: 3
            })
        );
    }

    #[test]
    fn test_multiply_into_accumulates() {
        let a = Matrix::identity(3);
        let b = Matrix::from_fn(3, 3, |r, c| (r + c) as Element);
        let mut c = Matrix::from_vec(3, 3, vec![5; 9]).unwrap();

        multiply_into(a.view(), b.view(), &mut c.view_mut()).unwrap();

        assert_eq!(c, Matrix::from_fn(3, 3, |r, c| (r + c) as Element + 5));
    }

    #[test]
    fn test_multiply_into_rejects_bad_output_untouched() {
        let a = Matrix::new(2, 2);
        let b = Matrix::new(2, 2);
        let mut c = Matrix::from_vec(2, 3, vec![9; 6]).unwrap();
        let err = multiply_into(a.view(), b.view(), &mut c.view_mut()).unwrap_err();
        assert!(matches!(err, MatmulError::ShapeMismatch { .. }));
        assert!(c.as_slice().iter().all(|&v| v == 9));
    }

    #[test]
    fn test_overwrite_clears_destination() {
        let a = Matrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        let mut c = Matrix::from_vec(2, 2, vec![100; 4]).unwrap();
        overwrite(a.view(), Matrix::identity(2).view(), c.view_mut());
        assert_eq!(c, a);
    }

    #[test]
    fn test_empty_inner_dimension() {
        let a = Matrix::new(3, 0);
        let b = Matrix::new(0, 2);
        assert_eq!(multiply_iterative(&a, &b).unwrap(), Matrix::new(3, 2));
    }
}
