//! Element-wise addition and subtraction over views.
//!
//! Extents are checked once per call (debug builds), never per element.
//! Accumulating into one of the operands is spelled `add_assign` /
//! `sub_assign`, since a region cannot be borrowed as both input and output.

use super::{Element, Matrix, MatrixView, MatrixViewMut};
use crate::error::{MatmulError, Result};

#[inline]
fn zip_rows<F>(a: MatrixView<'_>, b: MatrixView<'_>, out: &mut MatrixViewMut<'_>, op: F)
where
    F: Fn(Element, Element) -> Element,
{
    debug_assert_eq!((a.rows(), a.cols()), (b.rows(), b.cols()));
    debug_assert_eq!((a.rows(), a.cols()), (out.rows(), out.cols()));
    for r in 0..out.rows() {
        let (ar, br) = (a.row(r), b.row(r));
        for ((o, &x), &y) in out.row_mut(r).iter_mut().zip(ar).zip(br) {
            *o = op(x, y);
        }
    }
}

#[inline]
fn update_rows<F>(out: &mut MatrixViewMut<'_>, b: MatrixView<'_>, op: F)
where
    F: Fn(Element, Element) -> Element,
{
    debug_assert_eq!((out.rows(), out.cols()), (b.rows(), b.cols()));
    for r in 0..out.rows() {
        for (o, &y) in out.row_mut(r).iter_mut().zip(b.row(r)) {
            *o = op(*o, y);
        }
    }
}

/// `out = a + b`
pub fn add(a: MatrixView<'_>, b: MatrixView<'_>, mut out: MatrixViewMut<'_>) {
    zip_rows(a, b, &mut out, Element::wrapping_add);
}

/// `out = a - b`
pub fn sub(a: MatrixView<'_>, b: MatrixView<'_>, mut out: MatrixViewMut<'_>) {
    zip_rows(a, b, &mut out, Element::wrapping_sub);
}

/// `out += b`
pub fn add_assign(mut out: MatrixViewMut<'_>, b: MatrixView<'_>) {
    update_rows(&mut out, b, Element::wrapping_add);
}

/// `out -= b`
pub fn sub_assign(mut out: MatrixViewMut<'_>, b: MatrixView<'_>) {
    update_rows(&mut out, b, Element::wrapping_sub);
}

impl Matrix {
    fn check_same_shape(&self, other: &Matrix) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(MatmulError::ShapeMismatch {
                expected: self.shape(),
                got: other.shape(),
            });
        }
        Ok(())
    }

    /// Element-wise sum of two equally shaped matrices.
    pub fn checked_add(&self, other: &Matrix) -> Result<Matrix> {
        self.check_same_shape(other)?;
        let mut out = Matrix::new(self.rows(), self.cols());
        add(self.view(), other.view(), out.view_mut());
        Ok(out)
    }

    /// Element-wise difference of two equally shaped matrices.
    pub fn checked_sub(&self, other: &Matrix) -> Result<Matrix> {
        self.check_same_shape(other)?;
        let mut out = Matrix::new(self.rows(), self.cols());
        sub(self.view(), other.view(), out.view_mut());
        Ok(out)
    }
}
