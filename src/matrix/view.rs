//! Zero-copy rectangular windows over a [`DenseMatrix`].
//!
//! A view borrows its base mutably for `'a`, so it can never outlive the
//! storage it points into. Internally the base buffer is reborrowed as
//! `&[Cell<f64>]`, which lets several `Copy` views alias the same cells:
//! overlapping block assembly writes through one view and reads the result
//! through another. `Cell` makes views `!Sync`.

use std::cell::Cell;

use crate::core::traits::Matrix;
use crate::error::{MatError, Result};
use crate::matrix::dense::DenseMatrix;
use crate::matrix::policy::NumericPolicy;

#[derive(Debug, Clone, Copy)]
pub struct MatrixView<'a> {
    cells: &'a [Cell<f64>],
    base_cols: usize,
    policy: NumericPolicy,
    row_offset: usize,
    col_offset: usize,
    height: usize,
    width: usize,
}

fn window_fits(offset: usize, extent: usize, limit: usize) -> bool {
    offset.checked_add(extent).is_some_and(|end| end <= limit)
}

impl<'a> MatrixView<'a> {
    pub(crate) fn new(
        base: &'a mut DenseMatrix,
        row_offset: usize,
        col_offset: usize,
        height: usize,
        width: usize,
    ) -> Result<Self> {
        let (rows, cols) = base.shape();
        if !window_fits(row_offset, height, rows) || !window_fits(col_offset, width, cols) {
            return Err(MatError::WindowOutOfBounds {
                row_offset,
                col_offset,
                height,
                width,
                rows,
                cols,
            });
        }
        let policy = base.policy();
        let cells = Cell::from_mut(base.as_mut_slice()).as_slice_of_cells();
        Ok(Self {
            cells,
            base_cols: cols,
            policy,
            row_offset,
            col_offset,
            height,
            width,
        })
    }

    pub fn rows(&self) -> usize {
        self.height
    }

    pub fn cols(&self) -> usize {
        self.width
    }

    /// Offset of the window's top-left corner in the base.
    pub fn origin(&self) -> (usize, usize) {
        (self.row_offset, self.col_offset)
    }

    pub fn policy(&self) -> NumericPolicy {
        self.policy
    }

    fn cell(&self, i: usize, j: usize) -> Result<&'a Cell<f64>> {
        if i < self.height && j < self.width {
            Ok(&self.cells[(self.row_offset + i) * self.base_cols + self.col_offset + j])
        } else {
            Err(MatError::IndexOutOfBounds {
                row: i,
                col: j,
                rows: self.height,
                cols: self.width,
            })
        }
    }

    pub fn at(&self, i: usize, j: usize) -> Result<f64> {
        Ok(self.cell(i, j)?.get())
    }

    /// Write through to the base. Policy failures report base coordinates.
    pub fn set(&self, i: usize, j: usize, v: f64) -> Result<()> {
        let cell = self.cell(i, j)?;
        self.policy
            .check(self.row_offset + i, self.col_offset + j, v)?;
        cell.set(v);
        Ok(())
    }

    /// `self[i, j] += delta`, checked against the base policy.
    pub fn add_at(&self, i: usize, j: usize, delta: f64) -> Result<()> {
        let cell = self.cell(i, j)?;
        let v = cell.get() + delta;
        self.policy
            .check(self.row_offset + i, self.col_offset + j, v)?;
        cell.set(v);
        Ok(())
    }

    /// Nested window, in this view's coordinates, over the same base.
    pub fn subview(
        &self,
        row_offset: usize,
        col_offset: usize,
        height: usize,
        width: usize,
    ) -> Result<MatrixView<'a>> {
        if !window_fits(row_offset, height, self.height) || !window_fits(col_offset, width, self.width) {
            return Err(MatError::WindowOutOfBounds {
                row_offset,
                col_offset,
                height,
                width,
                rows: self.height,
                cols: self.width,
            });
        }
        Ok(MatrixView {
            row_offset: self.row_offset + row_offset,
            col_offset: self.col_offset + col_offset,
            height,
            width,
            ..*self
        })
    }

    /// Owned copy of the window, carrying the base policy.
    pub fn to_dense(&self) -> DenseMatrix {
        let mut data = Vec::with_capacity(self.height * self.width);
        for i in 0..self.height {
            let start = (self.row_offset + i) * self.base_cols + self.col_offset;
            data.extend(self.cells[start..start + self.width].iter().map(Cell::get));
        }
        DenseMatrix::from_parts(self.height, self.width, data, self.policy)
    }
}

impl Matrix for MatrixView<'_> {
    fn rows(&self) -> usize {
        self.height
    }
    fn cols(&self) -> usize {
        self.width
    }
    fn at(&self, i: usize, j: usize) -> Result<f64> {
        MatrixView::at(self, i, j)
    }
    fn set(&mut self, i: usize, j: usize, v: f64) -> Result<()> {
        MatrixView::set(self, i, j, v)
    }
    fn to_dense(&self) -> DenseMatrix {
        MatrixView::to_dense(self)
    }
    fn policy(&self) -> NumericPolicy {
        self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::MatrixOptions;
    use crate::error::ErrorKind;

    #[test]
    fn writes_are_visible_in_base() {
        let mut m = DenseMatrix::new(3, 3).unwrap();
        {
            let v = m.view(1, 1, 2, 2).unwrap();
            v.set(0, 0, 5.0).unwrap();
            v.set(1, 1, 7.0).unwrap();
            assert_eq!(v.at(0, 0).unwrap(), 5.0);
        }
        assert_eq!(m.at(1, 1).unwrap(), 5.0);
        assert_eq!(m.at(2, 2).unwrap(), 7.0);
    }

    #[test]
    fn overlapping_views_accumulate() {
        // two 2x2 element blocks sharing node 1 of a 3-node chain
        let mut k = DenseMatrix::new(3, 3).unwrap();
        let whole = k.view(0, 0, 3, 3).unwrap();
        let first = whole.subview(0, 0, 2, 2).unwrap();
        let second = whole.subview(1, 1, 2, 2).unwrap();
        for (i, j, v) in [(0, 0, 1.0), (0, 1, -1.0), (1, 0, -1.0), (1, 1, 1.0)] {
            first.add_at(i, j, v).unwrap();
            second.add_at(i, j, v).unwrap();
        }
        assert_eq!(first.at(1, 1).unwrap(), 2.0);
        assert_eq!(
            k.as_slice(),
            &[1.0, -1.0, 0.0, -1.0, 2.0, -1.0, 0.0, -1.0, 1.0]
        );
    }

    #[test]
    fn window_bounds() {
        let mut m = DenseMatrix::new(2, 3).unwrap();
        assert_eq!(m.view(1, 1, 2, 1).unwrap_err().kind(), ErrorKind::Shape);
        assert_eq!(m.view(0, 0, 1, usize::MAX).unwrap_err().kind(), ErrorKind::Shape);
        let empty = m.view(2, 3, 0, 0).unwrap();
        assert_eq!((empty.rows(), empty.cols()), (0, 0));
        assert_eq!(empty.at(0, 0).unwrap_err().kind(), ErrorKind::Index);
    }

    #[test]
    fn view_enforces_base_policy_with_base_coordinates() {
        let mut m = DenseMatrix::with_options(3, 3, MatrixOptions::distance()).unwrap();
        let v = m.view(1, 2, 2, 1).unwrap();
        v.set(0, 0, f64::INFINITY).unwrap();
        let err = v.set(1, 0, f64::NAN).unwrap_err();
        assert!(matches!(err, MatError::PolicyViolation { row: 2, col: 2, .. }));
        assert_eq!(m.at(1, 2).unwrap(), f64::INFINITY);
    }

    #[test]
    fn to_dense_copies_window() {
        let mut m = DenseMatrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let v = m.view(0, 1, 2, 2).unwrap();
        let d = v.to_dense();
        assert_eq!(d.as_slice(), &[2.0, 3.0, 5.0, 6.0]);
        assert_eq!(d.policy(), NumericPolicy::default());
    }
}
