//! Householder QR of a square matrix.
//!
//! Reflectors are accumulated by left-multiplication, so the returned factors
//! satisfy `A ≈ transpose(Q) * R`, not `A ≈ Q * R`. Callers who want the
//! conventional orientation use `transpose(Q)` as their `Q`. No sign
//! normalization of `R`'s diagonal is performed; callers wanting a
//! non-negative diagonal flip matching rows of `R` and `Q` themselves.

use tracing::debug;

use crate::core::traits::Matrix;
use crate::decomp::{identity_buffer, sign, square_snapshot};
use crate::error::Result;
use crate::matrix::dense::DenseMatrix;

/// `q` is orthogonal, `r` upper triangular, and `transpose(q) * r ≈ a`.
#[derive(Debug, Clone, PartialEq)]
pub struct QrFactors {
    pub q: DenseMatrix,
    pub r: DenseMatrix,
}

/// `x[k.., ..] -= tau * v * (vᵀ x[k.., ..])`, column by column.
fn reflect(n: usize, k: usize, v: &[f64], tau: f64, x: &mut [f64]) {
    for j in 0..n {
        let mut s = 0.0;
        for i in k..n {
            s += v[i] * x[i * n + j];
        }
        for i in k..n {
            x[i * n + j] -= tau * v[i] * s;
        }
    }
}

/// Householder QR.
///
/// Columns are processed left to right. A column whose sub-diagonal part is
/// already zero, or whose reflector degenerates to zero, is skipped.
pub fn qr<M>(a: &M) -> Result<QrFactors>
where
    M: Matrix + ?Sized,
{
    let (n, data) = square_snapshot("qr", a)?;
    let mut r = data.into_owned();
    let mut q = identity_buffer(n);
    let mut v = vec![0.0; n];
    let mut reflectors = 0usize;
    for k in 0..n {
        let norm = (k..n).fold(0.0, |acc, i| acc + r[i * n + k] * r[i * n + k]).sqrt();
        if norm == 0.0 {
            continue;
        }
        for i in k..n {
            v[i] = r[i * n + k];
        }
        v[k] -= sign(r[k * n + k]) * norm;
        let beta = (k..n).fold(0.0, |acc, i| acc + v[i] * v[i]);
        if beta == 0.0 {
            continue;
        }
        let tau = 2.0 / beta;
        reflect(n, k, &v, tau, &mut r);
        reflect(n, k, &v, tau, &mut q);
        reflectors += 1;
    }
    debug!(n, reflectors, "householder qr complete");
    let policy = a.policy();
    Ok(QrFactors {
        q: DenseMatrix::from_vec_with_policy(n, n, q, policy)?,
        r: DenseMatrix::from_vec_with_policy(n, n, r, policy)?,
    })
}
