//! Canonical kernels over the [`Matrix`](crate::core::traits::Matrix) capability.
//!
//! Every kernel validates shapes before allocating, allocates exactly one
//! result, and never mutates its inputs. Results inherit the left operand's
//! numeric policy and are validated against it.
//!
//! Each kernel checks [`Matrix::as_dense`](crate::core::traits::Matrix::as_dense)
//! once per call: contiguous `DenseMatrix` operands run over slices, anything
//! else goes through `at`. The two paths perform the same floating-point
//! operations in the same order and therefore return identical bits.

use crate::core::traits::Matrix;
use crate::error::{MatError, Result};

pub mod elementwise;
pub mod product;

pub use elementwise::{add, hadamard, scale, sub, transpose};
pub use product::{mat_vec, mul};

pub(crate) fn ensure_same_shape<A, B>(op: &'static str, a: &A, b: &B) -> Result<()>
where
    A: Matrix + ?Sized,
    B: Matrix + ?Sized,
{
    if a.rows() == b.rows() && a.cols() == b.cols() {
        Ok(())
    } else {
        Err(MatError::ShapeMismatch {
            op,
            lhs: (a.rows(), a.cols()),
            rhs: (b.rows(), b.cols()),
        })
    }
}
