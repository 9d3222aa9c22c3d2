//! Capability implementation and conversions for `faer` dense matrices.
//!
//! `faer::Mat<f64>` is the reference "foreign" implementer of [`Matrix`]: it
//! has no contiguous row-major buffer, so every kernel takes the generic path
//! for it. That makes it the natural counterpart when checking that the
//! `DenseMatrix` fast path and the fallback agree bit for bit.
//!
//! # References
//! - [faer crate documentation](https://docs.rs/faer)

use faer::Mat;

use crate::core::traits::Matrix;
use crate::error::{MatError, Result};
use crate::matrix::dense::DenseMatrix;
use crate::matrix::policy::NumericPolicy;

fn faer_bounds(m: &Mat<f64>, i: usize, j: usize) -> Result<()> {
    if i < m.nrows() && j < m.ncols() {
        Ok(())
    } else {
        Err(MatError::IndexOutOfBounds {
            row: i,
            col: j,
            rows: m.nrows(),
            cols: m.ncols(),
        })
    }
}

/// `faer` matrices store anything, so they report an unrestricted policy.
impl Matrix for Mat<f64> {
    fn rows(&self) -> usize {
        self.nrows()
    }
    fn cols(&self) -> usize {
        self.ncols()
    }
    fn at(&self, i: usize, j: usize) -> Result<f64> {
        faer_bounds(self, i, j)?;
        Ok(self[(i, j)])
    }
    fn set(&mut self, i: usize, j: usize, v: f64) -> Result<()> {
        faer_bounds(self, i, j)?;
        self[(i, j)] = v;
        Ok(())
    }
    fn to_dense(&self) -> DenseMatrix {
        let (rows, cols) = (self.nrows(), self.ncols());
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            data.extend((0..cols).map(|j| self[(i, j)]));
        }
        DenseMatrix::from_parts(rows, cols, data, NumericPolicy::UNRESTRICTED)
    }
    fn policy(&self) -> NumericPolicy {
        NumericPolicy::UNRESTRICTED
    }
}

impl From<&DenseMatrix> for Mat<f64> {
    fn from(m: &DenseMatrix) -> Self {
        let (cols, data) = (m.cols(), m.as_slice());
        Mat::from_fn(m.rows(), cols, |i, j| data[i * cols + j])
    }
}

impl DenseMatrix {
    /// Copy a `faer` matrix into row-major storage, validating against `policy`.
    pub fn from_faer(m: &Mat<f64>, policy: NumericPolicy) -> Result<Self> {
        let (rows, cols) = (m.nrows(), m.ncols());
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            data.extend((0..cols).map(|j| m[(i, j)]));
        }
        DenseMatrix::from_vec_with_policy(rows, cols, data, policy)
    }
}
