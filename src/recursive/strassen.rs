//! Strassen's seven-product recursion.
//!
//! Per level, ten half-size sums/differences of the quadrants feed seven
//! recursive products:
//!
//! ```text
//! S1 = B12 - B22   S2 = A11 + A12   S3 = A21 + A22   S4 = B21 - B11
//! S5 = A11 + A22   S6 = B11 + B22   S7 = A12 - A22   S8 = B21 + B22
//! S9 = A11 - A21   S10 = B11 + B12
//!
//! M1 = A11·S1   M2 = S2·B22   M3 = S3·B11   M4 = A22·S4
//! M5 = S5·S6    M6 = S7·S8    M7 = S9·S10
//!
//! C11 = M5 + M4 - M2 + M6    C12 = M1 + M2
//! C21 = M3 + M4              C22 = M5 + M1 - M3 - M7
//! ```
//!
//! The S and M buffers belong to the frame that allocates them. The seven
//! products read disjoint inputs and write disjoint buffers, so the parallel
//! form forks all seven and joins once before combining.

use crate::config::RecursiveConfig;
use crate::error::Result;
use crate::matrix::elementwise::{add, add_assign, sub, sub_assign};
use crate::matrix::{Matrix, MatrixView, MatrixViewMut, iterative};
use crate::recursive::check_operands;
use crate::threaded::fork_join::fork_each;

type Quadrants<'a> = (MatrixView<'a>, MatrixView<'a>, MatrixView<'a>, MatrixView<'a>);

/// Operands of one recursive product.
type Product<'a> = (MatrixView<'a>, MatrixView<'a>);

fn square(n: usize) -> Matrix {
    Matrix::new(n, n)
}

/// Computes S1..S10.
fn sums(a: Quadrants<'_>, b: Quadrants<'_>) -> [Matrix; 10] {
    let (a11, a12, a21, a22) = a;
    let (b11, b12, b21, b22) = b;
    let half = a11.rows();
    let mut s: [Matrix; 10] = std::array::from_fn(|_| square(half));

    sub(b12, b22, s[0].view_mut());
    add(a11, a12, s[1].view_mut());
    add(a21, a22, s[2].view_mut());
    sub(b21, b11, s[3].view_mut());
    add(a11, a22, s[4].view_mut());
    add(b11, b22, s[5].view_mut());
    sub(a12, a22, s[6].view_mut());
    add(b21, b22, s[7].view_mut());
    sub(a11, a21, s[8].view_mut());
    add(b11, b12, s[9].view_mut());
    s
}

/// Operand pairs of M1..M7.
fn products<'a>(a: Quadrants<'a>, b: Quadrants<'a>, s: &'a [Matrix; 10]) -> [Product<'a>; 7] {
    let (a11, _, _, a22) = a;
    let (b11, _, _, b22) = b;
    [
        (a11, s[0].view()),
        (s[1].view(), b22),
        (s[2].view(), b11),
        (a22, s[3].view()),
        (s[4].view(), s[5].view()),
        (s[6].view(), s[7].view()),
        (s[8].view(), s[9].view()),
    ]
}

/// Writes the four quadrants of `c` from M1..M7.
fn combine(m: &[Matrix; 7], c: MatrixViewMut<'_>) {
    let [m1, m2, m3, m4, m5, m6, m7] = m.each_ref().map(Matrix::view);
    let (mut c11, c12, c21, mut c22) = c.split();

    add(m5, m4, c11.reborrow());
    sub_assign(c11.reborrow(), m2);
    add_assign(c11, m6);

    add(m1, m2, c12);

    add(m3, m4, c21);

    add(m5, m1, c22.reborrow());
    sub_assign(c22.reborrow(), m3);
    sub_assign(c22, m7);
}

/// Allocates the frame's S and M buffers, runs `run_products` to fill M,
/// then combines into `c`.
fn step<F>(a: MatrixView<'_>, b: MatrixView<'_>, c: MatrixViewMut<'_>, run_products: F)
where
    F: FnOnce([Product<'_>; 7], &mut [Matrix; 7]),
{
    let half = a.rows() / 2;
    let (qa, qb) = (a.split(), b.split());
    let s = sums(qa, qb);
    let mut m: [Matrix; 7] = std::array::from_fn(|_| square(half));
    run_products(products(qa, qb, &s), &mut m);
    combine(&m, c);
}

fn multiply_sequential(
    a: MatrixView<'_>,
    b: MatrixView<'_>,
    c: MatrixViewMut<'_>,
    threshold: usize,
) {
    if a.rows() <= threshold {
        iterative::overwrite(a, b, c);
        return;
    }
    step(a, b, c, |operands, m| {
        for ((lhs, rhs), out) in operands.into_iter().zip(m.iter_mut()) {
            multiply_sequential(lhs, rhs, out.view_mut(), threshold);
        }
    });
}

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
    step(a, b, c, |operands, m| {
        fork_each(operands.into_iter().zip(m.iter_mut()), |((lhs, rhs), out)| {
            multiply_parallel(lhs, rhs, out.view_mut(), config);
        });
    });
}

/// Strassen product of two square matrices.
///
/// The side must halve evenly down to `config.threshold` (any power of two
/// does). Blocks at or below the threshold use the iterative kernel. In
/// parallel mode the seven products of each level are forked until the block
/// side drops to `config.parallel_threshold`, below which the sequential
/// recursion takes over.
///
/// ```
/// use recmatmul::{Matrix, RecursiveConfig, multiply_strassen};
///
/// let a = Matrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
/// let b = Matrix::from_vec(2, 2, vec![5, 6, 7, 8]).unwrap();
/// let config = RecursiveConfig::parallel().with_threshold(1).with_parallel_threshold(1);
/// let c = multiply_strassen(&a, &b, &config).unwrap();
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
pub fn multiply_strassen(a: &Matrix, b: &Matrix, config: &RecursiveConfig) -> Result<Matrix> {
    let n = check_operands(a, b, config).inspect_err(|err| tracing::debug!(%err, "rejected"))?;
    let mut c = Matrix::new(n, n);
    if config.parallel {
        multiply_parallel(a.view(), b.view(), c.view_mut(), config);
    } else {
        multiply_sequential(a.view(), b.view(), c.view_mut(), config.threshold);
    }
    Ok(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatmulError;
    use crate::matrix::Element;
    use crate::matrix::iterative::multiply_iterative;

    fn pattern(n: usize, seed: usize) -> Matrix {
        Matrix::from_fn(n, n, |r, c| ((r * 13 + c * 29 + seed) % 21) as Element - 10)
    }

    #[test]
    fn test_2x2_forced_split() {
        let a = Matrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        let b = Matrix::from_vec(2, 2, vec![5, 6, 7, 8]).unwrap();
        let config = RecursiveConfig::default().with_threshold(1);
        let c = multiply_strassen(&a, &b, &config).unwrap();
        assert_eq!(c.as_slice(), &[19, 22, 43, 50]);
    }

    #[test]
    fn test_sums_and_combine_one_level() {
        // With 1x1 quadrants the S values are plain integers.
        let a = Matrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        let b = Matrix::from_vec(2, 2, vec![5, 6, 7, 8]).unwrap();
        let s = sums(a.view().split(), b.view().split());
        let got: Vec<Element> = s.iter().map(|m| m.get(0, 0)).collect();
        assert_eq!(got, vec![-2, 3, 7, 2, 5, 13, -2, 15, -2, 11]);

        // M = [1*-2, 3*8, 7*5, 4*2, 5*13, -2*15, -2*11]
        let m: [Matrix; 7] = [-2, 24, 35, 8, 65, -30, -22]
            .map(|v| Matrix::from_vec(1, 1, vec![v]).unwrap());
        let mut c = Matrix::new(2, 2);
        combine(&m, c.view_mut());
        assert_eq!(c.as_slice(), &[19, 22, 43, 50]);
    }

    #[test]
    fn test_sequential_matches_iterative() {
        for n in [1, 2, 4, 8, 16, 32, 64] {
            let (a, b) = (pattern(n, 0), pattern(n, 7));
            let expected = multiply_iterative(&a, &b).unwrap();
            for threshold in [1, 2, 8, 128] {
                let config = RecursiveConfig::default().with_threshold(threshold);
                assert_eq!(
                    multiply_strassen(&a, &b, &config).unwrap(),
                    expected,
                    "n={n} threshold={threshold}"
                );
            }
        }
    }

    #[test]
    fn test_parallel_matches_iterative() {
        let n = 64;
        let (a, b) = (pattern(n, 4), pattern(n, 9));
        let expected = multiply_iterative(&a, &b).unwrap();
        for (threshold, parallel_threshold) in [(1, 1), (2, 16), (8, 4), (16, 128)] {
            let config = RecursiveConfig::parallel()
                .with_threshold(threshold)
                .with_parallel_threshold(parallel_threshold);
            assert_eq!(
                multiply_strassen(&a, &b, &config).unwrap(),
                expected,
                "threshold={threshold} parallel_threshold={parallel_threshold}"
            );
        }
    }

    #[test]
    fn test_overflow_wraps_like_iterative() {
        let big = Element::MAX / 3;
        let a = Matrix::from_fn(4, 4, |r, c| if (r + c) % 2 == 0 { big } else { -big });
        let b = Matrix::from_fn(4, 4, |r, c| (r as Element + 2) * (c as Element + 3));
        let config = RecursiveConfig::default().with_threshold(1);
        assert_eq!(
            multiply_strassen(&a, &b, &config).unwrap(),
            multiply_iterative(&a, &b).unwrap()
        );
    }

    #[test]
    fn test_dimension_mismatch_first() {
        let a = Matrix::new(4, 4);
        let b = Matrix::new(2, 2);
        assert!(matches!(
            multiply_strassen(&a, &b, &RecursiveConfig::default()),
            Err(MatmulError::DimensionMismatch {
                m: 4,
                k: 4,
                k2: 2,
                n: 2
            })
        ));
    }
}
