//! Dense decompositions: unpivoted LU (and inversion built on it),
//! Householder QR and classical Jacobi for symmetric matrices.
//!
//! Inputs are read through the [`Matrix`] capability exactly once: a
//! `DenseMatrix` lends its buffer, any other implementer is gathered row by
//! row. Every algorithm then runs one loop over that row-major snapshot, so
//! the concrete and generic paths cannot drift apart.
//!
//! # References
//! - Golub & Van Loan, Matrix Computations, §3.2, §5.1, §8.5

use std::borrow::Cow;

use num_traits::Float;

use crate::core::traits::Matrix;
use crate::error::{MatError, Result};

pub mod eigen;
pub mod lu;
pub mod qr;

pub use eigen::{Eigen, symmetric_eigen};
pub use lu::{LuFactors, inverse, lu};
pub use qr::{QrFactors, qr};

/// Row-major snapshot of a square matrix plus its order.
pub(crate) fn square_snapshot<'m, M>(op: &'static str, m: &'m M) -> Result<(usize, Cow<'m, [f64]>)>
where
    M: Matrix + ?Sized,
{
    let (rows, cols) = (m.rows(), m.cols());
    if rows != cols {
        return Err(MatError::NotSquare { op, rows, cols });
    }
    if let Some(d) = m.as_dense() {
        return Ok((rows, Cow::Borrowed(d.as_slice())));
    }
    let mut data = Vec::with_capacity(rows * cols);
    for i in 0..rows {
        for j in 0..cols {
            data.push(m.at(i, j)?);
        }
    }
    Ok((rows, Cow::Owned(data)))
}

/// `-1` for negative input, `+1` otherwise (zero included).
pub(crate) fn sign<T: Float>(x: T) -> T {
    if x < T::zero() { -T::one() } else { T::one() }
}

pub(crate) fn identity_buffer(n: usize) -> Vec<f64> {
    let mut q = vec![0.0; n * n];
    for i in 0..n {
        q[i * n + i] = 1.0;
    }
    q
}
