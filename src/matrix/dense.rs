//! Row-major dense storage.
//!
//! `DenseMatrix` owns a flat `Vec<f64>` with element `(i, j)` at `i * cols + j`
//! and the [`NumericPolicy`] that every write is checked against. Zero-sized
//! matrices are legal and hold no allocation.

use std::fmt;

use crate::config::options::MatrixOptions;
use crate::core::traits::Matrix;
use crate::error::{Axis, MatError, Result};
use crate::matrix::policy::NumericPolicy;
use crate::matrix::view::MatrixView;

/// Dense matrix stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
    policy: NumericPolicy,
}

fn checked_len(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols).ok_or(MatError::InvalidShape {
        rows,
        cols,
        reason: "element count overflows usize",
    })
}

impl DenseMatrix {
    /// Zero-filled `rows x cols` matrix with the default policy.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        Self::with_policy(rows, cols, NumericPolicy::default())
    }

    /// Zero-filled matrix whose policy is resolved from `opts`.
    pub fn with_options(rows: usize, cols: usize, opts: MatrixOptions) -> Result<Self> {
        Self::with_policy(rows, cols, opts.policy())
    }

    pub fn with_policy(rows: usize, cols: usize, policy: NumericPolicy) -> Result<Self> {
        let len = checked_len(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            data: vec![0.0; len],
            policy,
        })
    }

    /// Take ownership of a row-major buffer, validated against the default policy.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        Self::from_vec_with_policy(rows, cols, data, NumericPolicy::default())
    }

    pub fn from_vec_with_policy(
        rows: usize,
        cols: usize,
        data: Vec<f64>,
        policy: NumericPolicy,
    ) -> Result<Self> {
        let expected = checked_len(rows, cols)?;
        if data.len() != expected {
            return Err(MatError::LengthMismatch {
                op: "from_vec",
                rows,
                cols,
                expected,
                got: data.len(),
            });
        }
        policy.check_row_major(cols, &data)?;
        Ok(Self {
            rows,
            cols,
            data,
            policy,
        })
    }

    /// Build from a slice of equally long rows.
    pub fn from_rows(rows: &[&[f64]]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.len());
        let mut data = Vec::with_capacity(checked_len(rows.len(), cols)?);
        for row in rows {
            if row.len() != cols {
                return Err(MatError::LengthMismatch {
                    op: "from_rows",
                    rows: rows.len(),
                    cols,
                    expected: cols,
                    got: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Self::from_vec(rows.len(), cols, data)
    }

    pub fn identity(n: usize) -> Result<Self> {
        let mut m = Self::new(n, n)?;
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        Ok(m)
    }

    /// Square matrix with `values` on the diagonal.
    pub fn diag(values: &[f64]) -> Result<Self> {
        let n = values.len();
        let mut m = Self::new(n, n)?;
        for (i, &v) in values.iter().enumerate() {
            m.set(i, i, v)?;
        }
        Ok(m)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn policy(&self) -> NumericPolicy {
        self.policy
    }

    /// Row-major backing buffer.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Raw mutable buffer for in-crate kernels that revalidate what they write.
    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Assemble from a buffer already known to satisfy `policy`.
    pub(crate) fn from_parts(rows: usize, cols: usize, data: Vec<f64>, policy: NumericPolicy) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self {
            rows,
            cols,
            data,
            policy,
        }
    }

    fn offset(&self, i: usize, j: usize) -> Result<usize> {
        if i < self.rows && j < self.cols {
            Ok(i * self.cols + j)
        } else {
            Err(MatError::IndexOutOfBounds {
                row: i,
                col: j,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    pub fn at(&self, i: usize, j: usize) -> Result<f64> {
        Ok(self.data[self.offset(i, j)?])
    }

    /// Bounds check, then policy check, then write.
    pub fn set(&mut self, i: usize, j: usize, v: f64) -> Result<()> {
        let k = self.offset(i, j)?;
        self.policy.check(i, j, v)?;
        self.data[k] = v;
        Ok(())
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> Result<&[f64]> {
        if i >= self.rows {
            return Err(MatError::AxisOutOfBounds {
                axis: Axis::Row,
                index: i,
                extent: self.rows,
            });
        }
        Ok(&self.data[i * self.cols..(i + 1) * self.cols])
    }

    /// Overwrite every element from a row-major slice.
    ///
    /// All values are validated before anything is copied, so a failure
    /// leaves the matrix unchanged and names the first offending cell.
    pub fn fill(&mut self, values: &[f64]) -> Result<()> {
        if values.len() != self.data.len() {
            return Err(MatError::LengthMismatch {
                op: "fill",
                rows: self.rows,
                cols: self.cols,
                expected: self.data.len(),
                got: values.len(),
            });
        }
        self.policy.check_row_major(self.cols, values)?;
        self.data.copy_from_slice(values);
        Ok(())
    }

    /// Row-major read-only traversal; stops as soon as `visit` returns `false`.
    pub fn visit<F>(&self, mut visit: F)
    where
        F: FnMut(usize, usize, f64) -> bool,
    {
        for (k, &v) in self.data.iter().enumerate() {
            if !visit(k / self.cols, k % self.cols, v) {
                return;
            }
        }
    }

    /// In-place row-major transform.
    ///
    /// The first result rejected by the policy aborts the pass with that
    /// cell's coordinates. Cells already transformed stay written.
    pub fn apply<F>(&mut self, mut transform: F) -> Result<()>
    where
        F: FnMut(usize, usize, f64) -> f64,
    {
        let cols = self.cols;
        for (k, slot) in self.data.iter_mut().enumerate() {
            let (i, j) = (k / cols, k % cols);
            let v = transform(i, j, *slot);
            self.policy.check(i, j, v)?;
            *slot = v;
        }
        Ok(())
    }

    /// Zero-copy window over `height x width` elements starting at
    /// `(row_offset, col_offset)`. The base stays mutably borrowed while the
    /// view (or any copy of it) is alive.
    pub fn view(
        &mut self,
        row_offset: usize,
        col_offset: usize,
        height: usize,
        width: usize,
    ) -> Result<MatrixView<'_>> {
        MatrixView::new(self, row_offset, col_offset, height, width)
    }

    /// Owned copy gathering `row_idx x col_idx` in the given order.
    /// Indices may repeat.
    pub fn induced(&self, row_idx: &[usize], col_idx: &[usize]) -> Result<DenseMatrix> {
        if let Some(&r) = row_idx.iter().find(|&&r| r >= self.rows) {
            return Err(MatError::AxisOutOfBounds {
                axis: Axis::Row,
                index: r,
                extent: self.rows,
            });
        }
        if let Some(&c) = col_idx.iter().find(|&&c| c >= self.cols) {
            return Err(MatError::AxisOutOfBounds {
                axis: Axis::Col,
                index: c,
                extent: self.cols,
            });
        }
        let mut data = Vec::with_capacity(checked_len(row_idx.len(), col_idx.len())?);
        for &r in row_idx {
            let src = &self.data[r * self.cols..(r + 1) * self.cols];
            data.extend(col_idx.iter().map(|&c| src[c]));
        }
        Ok(DenseMatrix {
            rows: row_idx.len(),
            cols: col_idx.len(),
            data,
            policy: self.policy,
        })
    }

    /// `|a[i,j] - a[j,i]| <= tol` for every pair; false for non-square input.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.rows;
        (0..n).all(|i| ((i + 1)..n).all(|j| (self.data[i * n + j] - self.data[j * n + i]).abs() <= tol))
    }
}

impl Matrix for DenseMatrix {
    fn rows(&self) -> usize {
        self.rows
    }
    fn cols(&self) -> usize {
        self.cols
    }
    fn at(&self, i: usize, j: usize) -> Result<f64> {
        DenseMatrix::at(self, i, j)
    }
    fn set(&mut self, i: usize, j: usize, v: f64) -> Result<()> {
        DenseMatrix::set(self, i, j, v)
    }
    fn to_dense(&self) -> DenseMatrix {
        self.clone()
    }
    fn policy(&self) -> NumericPolicy {
        self.policy
    }
    fn as_dense(&self) -> Option<&DenseMatrix> {
        Some(self)
    }
}

impl fmt::Display for DenseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cols == 0 {
            return write!(f, "[{}x{}]", self.rows, self.cols);
        }
        for (i, row) in self.data.chunks(self.cols).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[")?;
            for (j, v) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{v}")?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}
