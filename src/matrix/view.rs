//! Non-owning rectangular windows into a row-major buffer.
//!
//! A view is a base pointer plus `rows`, `cols` and the `stride` (row pitch)
//! of the buffer it was cut from. Quadrants of a view share that buffer, so
//! splitting costs nothing. Rows are only ever handed out as slices of exactly
//! `cols` elements, which keeps the four quadrants of a mutable view disjoint
//! even though their rows interleave in memory.

use std::fmt;
use std::marker::PhantomData;
use std::slice;

use super::{Element, Matrix};

/// Read-only window into a matrix.
#[derive(Clone, Copy)]
pub struct MatrixView<'a> {
    ptr: *const Element,
    rows: usize,
    cols: usize,
    stride: usize,
    _marker: PhantomData<&'a [Element]>,
}

// SAFETY: a `MatrixView` is a shared borrow of `Element`s, which are `Sync`.
unsafe impl Send for MatrixView<'_> {}
unsafe impl Sync for MatrixView<'_> {}

impl<'a> MatrixView<'a> {
    pub(crate) fn from_matrix(matrix: &'a Matrix) -> Self {
        Self {
            ptr: matrix.as_slice().as_ptr(),
            rows: matrix.rows(),
            cols: matrix.cols(),
            stride: matrix.cols(),
            _marker: PhantomData,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Distance in elements between the starts of consecutive rows.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Row `r` as a slice of `cols` elements.
    ///
    /// # Panics
    ///
    /// Panics if `r >= rows`.
    #[inline]
    pub fn row(&self, r: usize) -> &'a [Element] {
        assert!(r < self.rows, "row {} out of bounds ({} rows)", r, self.rows);
        // SAFETY: the view was cut from a live buffer of at least
        // `(rows - 1) * stride + cols` elements starting at `ptr`.
        unsafe { slice::from_raw_parts(self.ptr.wrapping_add(r * self.stride), self.cols) }
    }

    #[inline]
    pub fn get(&self, r: usize, c: usize) -> Element {
        self.row(r)[c]
    }

    /// Window of `rows x cols` starting at (`row`, `col`) of this view.
    ///
    /// # Panics
    ///
    /// Panics if the window does not fit inside this view.
    pub fn sub_view(&self, row: usize, col: usize, rows: usize, cols: usize) -> MatrixView<'a> {
        assert!(
            row <= self.rows
                && rows <= self.rows - row
                && col <= self.cols
                && cols <= self.cols - col,
            "sub_view {}x{} at ({}, {}) exceeds {}x{}",
            rows,
            cols,
            row,
            col,
            self.rows,
            self.cols
        );
        MatrixView {
            ptr: self.ptr.wrapping_add(row * self.stride + col),
            rows,
            cols,
            stride: self.stride,
            _marker: PhantomData,
        }
    }

    /// Splits into `(top_left, top_right, bottom_left, bottom_right)`.
    ///
    /// Both extents must be even; recursive callers guarantee this up front,
    /// so it is only checked in debug builds.
    pub fn split(self) -> (MatrixView<'a>, MatrixView<'a>, MatrixView<'a>, MatrixView<'a>) {
        debug_assert!(
            self.rows % 2 == 0 && self.cols % 2 == 0,
            "cannot split odd extent {}x{}",
            self.rows,
            self.cols
        );
        let (r2, c2) = (self.rows / 2, self.cols / 2);
        (
            self.sub_view(0, 0, r2, c2),
            self.sub_view(0, c2, r2, c2),
            self.sub_view(r2, 0, r2, c2),
            self.sub_view(r2, c2, r2, c2),
        )
    }

    /// Copies the window into a freshly allocated matrix.
    pub fn to_matrix(&self) -> Matrix {
        let mut data = Vec::with_capacity(self.rows * self.cols);
        for r in 0..self.rows {
            data.extend_from_slice(self.row(r));
        }
        Matrix::from_parts(self.rows, self.cols, data)
    }
}

impl fmt::Debug for MatrixView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatrixView")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("stride", &self.stride)
            .finish()
    }
}

/// Exclusive window into a matrix.
///
/// Unlike [`MatrixView`] this is not `Copy`; [`MatrixViewMut::split`] consumes
/// the view so the four quadrants it returns are the only handles to their
/// regions and can be written from different threads.
pub struct MatrixViewMut<'a> {
    ptr: *mut Element,
    rows: usize,
    cols: usize,
    stride: usize,
    _marker: PhantomData<&'a mut [Element]>,
}

// SAFETY: a `MatrixViewMut` is a unique borrow of a region no other live
// view can reach; moving it between threads is like moving `&mut [Element]`.
unsafe impl Send for MatrixViewMut<'_> {}
unsafe impl Sync for MatrixViewMut<'_> {}

impl<'a> MatrixViewMut<'a> {
    pub(crate) fn from_matrix(matrix: &'a mut Matrix) -> Self {
        let (rows, cols) = (matrix.rows(), matrix.cols());
        Self {
            ptr: matrix.as_mut_slice().as_mut_ptr(),
            rows,
            cols,
            stride: cols,
            _marker: PhantomData,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn row(&self, r: usize) -> &[Element] {
        assert!(r < self.rows, "row {} out of bounds ({} rows)", r, self.rows);
        // SAFETY: see `MatrixView::row`; `&self` keeps writers out.
        unsafe { slice::from_raw_parts(self.ptr.wrapping_add(r * self.stride), self.cols) }
    }

    #[inline]
    pub fn row_mut(&mut self, r: usize) -> &mut [Element] {
        assert!(r < self.rows, "row {} out of bounds ({} rows)", r, self.rows);
        // SAFETY: in bounds as above, and `&mut self` makes the slice unique.
        unsafe { slice::from_raw_parts_mut(self.ptr.wrapping_add(r * self.stride), self.cols) }
    }

    #[inline]
    pub fn get(&self, r: usize, c: usize) -> Element {
        self.row(r)[c]
    }

    #[inline]
    pub fn set(&mut self, r: usize, c: usize, value: Element) {
        self.row_mut(r)[c] = value;
    }

    pub fn fill(&mut self, value: Element) {
        for r in 0..self.rows {
            self.row_mut(r).fill(value);
        }
    }

    /// Read-only view of the same region, valid while `self` is borrowed.
    pub fn as_view(&self) -> MatrixView<'_> {
        MatrixView {
            ptr: self.ptr,
            rows: self.rows,
            cols: self.cols,
            stride: self.stride,
            _marker: PhantomData,
        }
    }

    /// Shorter-lived mutable view of the same region.
    pub fn reborrow(&mut self) -> MatrixViewMut<'_> {
        MatrixViewMut {
            ptr: self.ptr,
            rows: self.rows,
            cols: self.cols,
            stride: self.stride,
            _marker: PhantomData,
        }
    }

    /// Consumes the view, returning four disjoint mutable quadrants
    /// `(top_left, top_right, bottom_left, bottom_right)`.
    pub fn split(
        self,
    ) -> (
        MatrixViewMut<'a>,
        MatrixViewMut<'a>,
        MatrixViewMut<'a>,
        MatrixViewMut<'a>,
    ) {
        debug_assert!(
            self.rows % 2 == 0 && self.cols % 2 == 0,
            "cannot split odd extent {}x{}",
            self.rows,
            self.cols
        );
        let (r2, c2) = (self.rows / 2, self.cols / 2);
        let quadrant = |row: usize, col: usize| MatrixViewMut {
            ptr: self.ptr.wrapping_add(row * self.stride + col),
            rows: r2,
            cols: c2,
            stride: self.stride,
            _marker: PhantomData,
        };
        (
            quadrant(0, 0),
            quadrant(0, c2),
            quadrant(r2, 0),
            quadrant(r2, c2),
        )
    }
}

impl fmt::Debug for MatrixViewMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatrixViewMut")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("stride", &self.stride)
            .finish()
    }
}
