//! Core matrix capability for denso.

use crate::error::Result;
use crate::matrix::dense::DenseMatrix;
use crate::matrix::policy::NumericPolicy;

/// The capability every kernel and decomposition consumes.
///
/// `DenseMatrix` overrides [`Matrix::as_dense`] so kernels can take the
/// contiguous-buffer path; any other implementer goes through `at`. Both
/// paths must produce bit-identical results.
pub trait Matrix {
    /// Number of rows.
    fn rows(&self) -> usize;
    /// Number of columns.
    fn cols(&self) -> usize;
    /// Bounds-checked read.
    fn at(&self, i: usize, j: usize) -> Result<f64>;
    /// Bounds- and policy-checked write.
    fn set(&mut self, i: usize, j: usize, v: f64) -> Result<()>;
    /// Owned deep copy.
    fn to_dense(&self) -> DenseMatrix;
    /// Policy applied to writes, and inherited by kernel results.
    fn policy(&self) -> NumericPolicy;
    /// Concrete row-major storage, when there is one.
    fn as_dense(&self) -> Option<&DenseMatrix> {
        None
    }
}
