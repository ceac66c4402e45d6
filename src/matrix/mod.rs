//! Owned matrices, views into them, and the kernels that work on views.
//!
//! Everything here is row-major over signed 64-bit integers. Arithmetic
//! wraps on overflow, so every algorithm in the crate computes the same
//! result modulo 2^64 no matter how it groups the partial products.

pub mod elementwise;
pub mod iterative;
pub mod naive_ijk;
pub mod view;

pub use view::{MatrixView, MatrixViewMut};

use crate::error::{MatmulError, Result};

/// Element type of every matrix in the crate.
pub type Element = i64;

/// Dense row-major matrix that owns its storage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Element>,
}

/// Element count of a `rows x cols` matrix, or `None` if it overflows `usize`.
fn checked_len(rows: usize, cols: usize) -> Option<usize> {
    rows.checked_mul(cols)
}

/// Element count of a `rows x cols` matrix.
///
/// # Panics
///
/// Panics if `rows * cols` overflows `usize`.
fn len_or_panic(rows: usize, cols: usize) -> usize {
    match checked_len(rows, cols) {
        Some(len) => len,
        None => panic!("matrix size {rows}x{cols} overflows usize"),
    }
}

impl Matrix {
    /// Zero-filled `rows x cols` matrix.
    ///
    /// # Panics
    ///
    /// Panics if `rows * cols` overflows `usize`.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0; len_or_panic(rows, cols)],
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::new(n, n);
        for i in 0..n {
            m.data[i * n + i] = 1;
        }
        m
    }

    /// Wraps row-major `data` as a `rows x cols` matrix.
    ///
    /// ```
    /// use recmatmul::Matrix;
    ///
    /// let m = Matrix::from_vec(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
    /// assert_eq!(m.get(1, 0), 4);
    /// assert!(Matrix::from_vec(2, 2, vec![1, 2, 3]).is_err());
    /// ```
    ///
    /// Fails with [`MatmulError::DataLength`] when `data.len()` is not
    /// `rows * cols`, including when that product overflows.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<Element>) -> Result<Self> {
        if checked_len(rows, cols) != Some(data.len()) {
            return Err(MatmulError::DataLength {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// # Panics
    ///
    /// Panics if `rows * cols` overflows `usize`.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> Element,
    {
        let mut data = Vec::with_capacity(len_or_panic(rows, cols));
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { rows, cols, data }
    }

    pub(crate) fn from_parts(rows: usize, cols: usize, data: Vec<Element>) -> Self {
        debug_assert_eq!(checked_len(rows, cols), Some(data.len()));
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn get(&self, r: usize, c: usize) -> Element {
        assert!(r < self.rows && c < self.cols, "({r}, {c}) out of bounds");
        self.data[r * self.cols + c]
    }

    #[inline]
    pub fn set(&mut self, r: usize, c: usize, value: Element) {
        assert!(r < self.rows && c < self.cols, "({r}, {c}) out of bounds");
        self.data[r * self.cols + c] = value;
    }

    pub fn as_slice(&self) -> &[Element] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [Element] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<Element> {
        self.data
    }

    pub fn view(&self) -> MatrixView<'_> {
        MatrixView::from_matrix(self)
    }

    pub fn view_mut(&mut self) -> MatrixViewMut<'_> {
        MatrixViewMut::from_matrix(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let i = Matrix::identity(3);
        assert_eq!(i.as_slice(), &[1, 0, 0, 0, 1, 0, 0, 0, 1]);
        assert!(i.is_square());
    }

    #[test]
    fn test_from_vec_length_checked() {
        assert_eq!(
            Matrix::from_vec(2, 2, vec![1, 2, 3]),
            Err(MatmulError::DataLength {
                rows: 2,
                cols: 2,
                len: 3
            })
        );
        let m = Matrix::from_vec(1, 3, vec![7, 8, 9]).unwrap();
        assert_eq!(m.shape(), (1, 3));
        assert_eq!(m.into_vec(), vec![7, 8, 9]);
    }

    #[test]
    fn test_from_vec_rejects_overflowing_shape() {
        let side = 1usize << (usize::BITS / 2);
        assert_eq!(
            Matrix::from_vec(side, side, vec![]),
            Err(MatmulError::DataLength {
                rows: side,
                cols: side,
                len: 0
            })
        );
        assert!(Matrix::from_vec(usize::MAX, 2, vec![0; 2]).is_err());
    }

    #[test]
    #[should_panic(expected = "overflows usize")]
    fn test_new_overflowing_shape_panics() {
        let _ = Matrix::new(usize::MAX, 2);
    }

    #[test]
    #[should_panic(expected = "overflows usize")]
    fn test_from_fn_overflowing_shape_panics() {
        let _ = Matrix::from_fn(usize::MAX, 3, |_, _| 0);
    }

    #[test]
    fn test_get_set() {
        let mut m = Matrix::new(2, 3);
        m.set(1, 2, -5);
        assert_eq!(m.get(1, 2), -5);
        assert_eq!(m.as_slice()[5], -5);
    }

    #[test]
    fn test_equality_includes_shape() {
        let a = Matrix::from_vec(1, 4, vec![1, 2, 3, 4]).unwrap();
        let b = Matrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_view_round_trip() {
        let m = Matrix::from_fn(3, 2, |r, c| (r * 10 + c) as Element);
        assert_eq!(m.view().to_matrix(), m);
    }
}
