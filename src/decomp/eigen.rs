//! Classical Jacobi eigendecomposition for symmetric matrices.
//!
//! Each iteration picks the largest off-diagonal magnitude in the strict
//! upper triangle (row-major scan, first maximum wins) and annihilates it
//! with a plane rotation, accumulating the rotations into `Q`. The scan order
//! is fixed, so the sequence of rotations, and the result, is deterministic.

use tracing::{debug, trace, warn};

use crate::core::traits::Matrix;
use crate::decomp::{identity_buffer, sign, square_snapshot};
use crate::error::{MatError, Result};
use crate::matrix::dense::DenseMatrix;
use crate::utils::convergence::{Convergence, IterStats};

/// Eigenpairs of a symmetric matrix.
///
/// `values[k]` belongs to column `k` of `vectors`. Values are left in the
/// order they appear on the rotated diagonal; they are not sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct Eigen {
    pub values: Vec<f64>,
    pub vectors: DenseMatrix,
    /// `iterations` counts rotations; `final_residual` is the largest
    /// remaining off-diagonal magnitude.
    pub stats: IterStats<f64>,
}

fn check_symmetric(n: usize, a: &[f64], tol: f64) -> Result<()> {
    for i in 0..n {
        for j in (i + 1)..n {
            let delta = (a[i * n + j] - a[j * n + i]).abs();
            // written so that NaN fails the check
            if !(delta <= tol) {
                return Err(MatError::Asymmetric {
                    row: i,
                    col: j,
                    delta,
                    tol,
                });
            }
        }
    }
    Ok(())
}

/// Largest `|a[p,q]|` over `p < q`, with its position.
fn pivot(n: usize, a: &[f64]) -> (usize, usize, f64) {
    let (mut p, mut q, mut max) = (0, 0, 0.0);
    for i in 0..n {
        for j in (i + 1)..n {
            let v = a[i * n + j].abs();
            if v > max {
                (p, q, max) = (i, j, v);
            }
        }
    }
    (p, q, max)
}

/// Zero `a[p,q]` and accumulate the rotation into `v`.
fn rotate(n: usize, a: &mut [f64], v: &mut [f64], p: usize, q: usize, tol: f64) {
    let apq = a[p * n + q];
    if apq.abs() < tol {
        return;
    }
    let (app, aqq) = (a[p * n + p], a[q * n + q]);
    let theta = (aqq - app) / (2.0 * apq);
    let t = sign(theta) / (theta.abs() + (theta * theta + 1.0).sqrt());
    let c = 1.0 / (t * t + 1.0).sqrt();
    let s = t * c;

    a[p * n + p] = app - t * apq;
    a[q * n + q] = aqq + t * apq;
    a[p * n + q] = 0.0;
    a[q * n + p] = 0.0;
    for r in 0..n {
        if r == p || r == q {
            continue;
        }
        let (g, h) = (a[r * n + p], a[r * n + q]);
        let rp = c * g - s * h;
        let rq = s * g + c * h;
        a[r * n + p] = rp;
        a[p * n + r] = rp;
        a[r * n + q] = rq;
        a[q * n + r] = rq;
    }
    for r in 0..n {
        let (g, h) = (v[r * n + p], v[r * n + q]);
        v[r * n + p] = c * g - s * h;
        v[r * n + q] = s * g + c * h;
    }
}

/// Eigenvalues and orthonormal eigenvectors of a symmetric matrix.
///
/// # Arguments
/// * `a` - square matrix with `|a[i,j] - a[j,i]| <= tol`
/// * `tol` - symmetry tolerance and convergence threshold on the largest
///   off-diagonal magnitude; finite and positive
/// * `max_iter` - rotation budget
///
/// # Returns
/// * `Ok(Eigen)` with `a * vectors ≈ vectors * diag(values)`
/// * `Err(MatError::Asymmetric)` before any rotation if symmetry fails
/// * `Err(MatError::EigenNonConvergence)` if the off-diagonal is still
///   `>= tol` once the budget is spent; no partial result is returned
pub fn symmetric_eigen<M>(a: &M, tol: f64, max_iter: usize) -> Result<Eigen>
where
    M: Matrix + ?Sized,
{
    let conv = Convergence::new(tol, max_iter)?;
    let (n, data) = square_snapshot("symmetric_eigen", a)?;
    check_symmetric(n, &data, tol)?;

    let mut w = data.into_owned();
    let mut q = identity_buffer(n);
    let mut rotations = 0;
    while rotations < conv.max_iters {
        let (p, qi, max) = pivot(n, &w);
        if conv.is_converged(max) {
            break;
        }
        trace!(rotation = rotations, p, q = qi, off_diagonal = max, "jacobi pivot");
        rotate(n, &mut w, &mut q, p, qi, conv.tol);
        rotations += 1;
    }

    let (_, _, residual) = pivot(n, &w);
    let stats = conv.stats(rotations, residual);
    if !stats.converged {
        warn!(n, rotations, off_diagonal = residual, tol, "jacobi did not converge");
        return Err(MatError::EigenNonConvergence {
            iterations: rotations,
            off_diagonal: residual,
            tol,
        });
    }
    debug!(n, rotations, off_diagonal = residual, "jacobi converged");

    let values = (0..n).map(|i| w[i * n + i]).collect();
    Ok(Eigen {
        values,
        vectors: DenseMatrix::from_vec_with_policy(n, n, q, a.policy())?,
        stats,
    })
}
