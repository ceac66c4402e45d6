use super::{Matrix, MatrixView};

/// Naive matrix multiplication using i-j-k loop order.
///
/// This is the textbook triple-loop implementation: one dot product per
/// output element. The innermost loop walks a column of B, so it misses
/// cache on every step for large matrices.
///
/// Kept as an independent correctness baseline for the i-k-j kernel, not
/// for performance. Shapes are asserted.
pub fn multiply_ijk(a: MatrixView<'_>, b: MatrixView<'_>) -> Matrix {
    assert_eq!(a.cols(), b.rows(), "inner dimensions differ");
    Matrix::from_fn(a.rows(), b.cols(), |i, j| {
        (0..a.cols()).fold(0i64, |acc, p| {
            acc.wrapping_add(a.get(i, p).wrapping_mul(b.get(p, j)))
        })
    })
}
