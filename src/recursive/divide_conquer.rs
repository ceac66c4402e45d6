//! Classic block recursion: eight half-size products per level.
//!
//! ```text
//! C11 = A11·B11 + A12·B21    C12 = A11·B12 + A12·B22
//! C21 = A21·B11 + A22·B21    C22 = A21·B12 + A22·B22
//! ```
//!
//! Each output quadrant is the sum of two products computed into scratch
//! buffers owned by the current frame. The parallel form forks the four
//! quadrants, and inside each quadrant the two products, joining before
//! the add that consumes them.

use crate::config::RecursiveConfig;
use crate::error::Result;
use crate::matrix::{Matrix, MatrixView, MatrixViewMut, elementwise, iterative};
use crate::recursive::check_operands;
use crate::threaded::fork_join::{fork_each, join};

/// One output quadrant: `out = lhs[0]·rhs[0] + lhs[1]·rhs[1]`.
struct QuadrantTask<'a> {
    lhs: [MatrixView<'a>; 2],
    rhs: [MatrixView<'a>; 2],
    out: MatrixViewMut<'a>,
}

fn quadrant_tasks<'a>(
    a: MatrixView<'a>,
    b: MatrixView<'a>,
    c: MatrixViewMut<'a>,
) -> [QuadrantTask<'a>; 4] {
    let (a11, a12, a21, a22) = a.split();
    let (b11, b12, b21, b22) = b.split();
    let (c11, c12, c21, c22) = c.split();
    [
        QuadrantTask {
            lhs: [a11, a12],
            rhs: [b11, b21],
            out: c11,
        },
        QuadrantTask {
            lhs: [a11, a12],
            rhs: [b12, b22],
            out: c12,
        },
        QuadrantTask {
            lhs: [a21, a22],
            rhs: [b11, b21],
            out: c21,
        },
        QuadrantTask {
            lhs: [a21, a22],
            rhs: [b12, b22],
            out: c22,
        },
    ]
}

/// `c = a * b`, one product at a time. Two scratch buffers per frame are
/// reused for all four quadrants.
fn multiply_sequential(
    a: MatrixView<'_>,
    b: MatrixView<'_>,
    c: MatrixViewMut<'_>,
    threshold: usize,
) {
    let n = a.rows();
    if n <= threshold {
        iterative::overwrite(a, b, c);
        return;
    }

    let half = n / 2;
    let mut t1 = Matrix::new(half, half);
    let mut t2 = Matrix::new(half, half);

    for QuadrantTask { lhs, rhs, out } in quadrant_tasks(a, b, c) {
        multiply_sequential(lhs[0], rhs[0], t1.view_mut(), threshold);
        multiply_sequential(lhs[1], rhs[1], t2.view_mut(), threshold);
        elementwise::add(t1.view(), t2.view(), out);
    }
}

/// `c = a * b` with 4-way quadrant fan-out and a 2-way fork per quadrant.
/// Blocks at or below `parallel_threshold` go sequential.
fn multiply_parallel(
    a: MatrixView<'_>,
    b: MatrixView<'_>,
    c: MatrixViewMut<'_>,
    config: &RecursiveConfig,
) {
    let n = a.rows();
    if n <= config.threshold {
        iterative::overwrite(a, b, c);
        return;
    }
    if n <= config.parallel_threshold {
        multiply_sequential(a, b, c, config.threshold);
        return;
    }

    fork_each(quadrant_tasks(a, b, c), |QuadrantTask { lhs, rhs, out }| {
        let half = out.rows();
        let mut t1 = Matrix::new(half, half);
        let mut t2 = Matrix::new(half, half);
        join(
            || multiply_parallel(lhs[0], rhs[0], t1.view_mut(), config),
            || multiply_parallel(lhs[1], rhs[1], t2.view_mut(), config),
        );
        elementwise::add(t1.view(), t2.view(), out);
    });
}

/// Divide-and-conquer product of two square matrices.
///
/// The side must halve evenly down to `config.threshold` (any power of two
/// does). `config.parallel` picks the fork-join variant; both produce
/// identical results.
///
/// ```
/// use recmatmul::{Matrix, RecursiveConfig, multiply_divide_conquer};
///
/// let a = Matrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
/// let b = Matrix::from_vec(2, 2, vec![5, 6, 7, 8]).unwrap();
/// let config = RecursiveConfig::default().with_threshold(1);
/// let c = multiply_divide_conquer(&a, &b, &config).unwrap();
/// assert_eq!(c.as_slice(), &[19, 22, 43, 50]);
/// ```
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(
        n = a.rows(),
        threshold = config.threshold,
        parallel_threshold = config.parallel_threshold,
        parallel = config.parallel,
    )
)]
pub fn multiply_divide_conquer(
    a: &Matrix,
    b: &Matrix,
    config: &RecursiveConfig,
) -> Result<Matrix> {
    let n = check_operands(a, b, config).inspect_err(|err| tracing::debug!(%err, "rejected"))?;
    let mut c = Matrix::new(n, n);
    if config.parallel {
        multiply_parallel(a.view(), b.view(), c.view_mut(), config);
    } else {
        multiply_sequential(a.view(), b.view(), c.view_mut(), config.threshold);
    }
    Ok(c)
}
