//! Doolittle LU factorization without pivoting, and inversion built on it.
//!
//! `A = L U` with `L` unit lower triangular and `U` upper triangular. No row
//! exchanges are ever performed, so the factors depend only on the input
//! values and are bit-reproducible. The price is stability: a zero pivot is
//! reported as singular even when a permuted factorization would exist, and
//! ill-conditioned inputs need preconditioning by the caller.
//!
//! # Usage
//! - `lu` for the factors themselves.
//! - `LuFactors::solve` to reuse a factorization across right-hand sides.
//! - `inverse` for the explicit inverse (`n` forward/backward solve pairs).

use tracing::debug;

use crate::core::traits::Matrix;
use crate::decomp::square_snapshot;
use crate::error::{MatError, Result};
use crate::matrix::dense::DenseMatrix;

/// Unit-lower `l` and upper `u` with `l * u == a`.
#[derive(Debug, Clone, PartialEq)]
pub struct LuFactors {
    pub l: DenseMatrix,
    pub u: DenseMatrix,
}

/// Doolittle elimination over a row-major `n x n` buffer.
fn doolittle(n: usize, a: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
    let mut l = vec![0.0; n * n];
    let mut u = vec![0.0; n * n];
    for i in 0..n {
        for j in i..n {
            let mut sum = 0.0;
            for k in 0..i {
                sum += l[i * n + k] * u[k * n + j];
            }
            u[i * n + j] = a[i * n + j] - sum;
        }
        let pivot = u[i * n + i];
        if pivot == 0.0 {
            return Err(MatError::ZeroPivot(i));
        }
        l[i * n + i] = 1.0;
        for j in (i + 1)..n {
            let mut sum = 0.0;
            for k in 0..i {
                sum += l[j * n + k] * u[k * n + i];
            }
            l[j * n + i] = (a[j * n + i] - sum) / pivot;
        }
    }
    Ok((l, u))
}

// L y = b in place; L has an implicit unit diagonal.
fn forward_substitute(n: usize, l: &[f64], b: &mut [f64]) {
    for i in 0..n {
        let mut sum = 0.0;
        for k in 0..i {
            sum += l[i * n + k] * b[k];
        }
        b[i] -= sum;
    }
}

// U x = y in place.
fn backward_substitute(n: usize, u: &[f64], y: &mut [f64]) {
    for i in (0..n).rev() {
        let mut sum = 0.0;
        for k in (i + 1)..n {
            sum += u[i * n + k] * y[k];
        }
        y[i] = (y[i] - sum) / u[i * n + i];
    }
}

/// Factor a square matrix as `L U`.
///
/// # Returns
/// * `Ok(LuFactors)`, both factors carrying the input's policy
/// * `Err(MatError::NotSquare)` for rectangular input
/// * `Err(MatError::ZeroPivot(i))` when `U[i][i]` comes out exactly zero
pub fn lu<M>(a: &M) -> Result<LuFactors>
where
    M: Matrix + ?Sized,
{
    let (n, data) = square_snapshot("lu", a)?;
    let (l, u) = doolittle(n, &data)?;
    debug!(n, "lu factorization complete");
    let policy = a.policy();
    Ok(LuFactors {
        l: DenseMatrix::from_vec_with_policy(n, n, l, policy)?,
        u: DenseMatrix::from_vec_with_policy(n, n, u, policy)?,
    })
}

/// Explicit inverse via `L y = e_col`, `U x = y` for each basis column.
///
/// Fails with the same `ZeroPivot` as [`lu`] on singular (or
/// pivot-deficient) input.
pub fn inverse<M>(a: &M) -> Result<DenseMatrix>
where
    M: Matrix + ?Sized,
{
    let (n, data) = square_snapshot("inverse", a)?;
    let (l, u) = doolittle(n, &data)?;
    let mut inv = vec![0.0; n * n];
    let mut col = vec![0.0; n];
    for c in 0..n {
        col.iter_mut().for_each(|x| *x = 0.0);
        col[c] = 1.0;
        forward_substitute(n, &l, &mut col);
        backward_substitute(n, &u, &mut col);
        for (i, &x) in col.iter().enumerate() {
            inv[i * n + c] = x;
        }
    }
    debug!(n, "inverse complete");
    DenseMatrix::from_vec_with_policy(n, n, inv, a.policy())
}

impl LuFactors {
    /// Order of the factored matrix.
    pub fn order(&self) -> usize {
        self.l.rows()
    }

    /// Solve `A x = b` with the cached factors.
    pub fn solve(&self, b: &[f64]) -> Result<Vec<f64>> {
        let n = self.order();
        if b.len() != n {
            return Err(MatError::ShapeMismatch {
                op: "lu_solve",
                lhs: (n, n),
                rhs: (b.len(), 1),
            });
        }
        let mut x = b.to_vec();
        forward_substitute(n, self.l.as_slice(), &mut x);
        backward_substitute(n, self.u.as_slice(), &mut x);
        Ok(x)
    }

    /// `det(A)`, the product of `U`'s diagonal.
    pub fn determinant(&self) -> f64 {
        let n = self.order();
        let u = self.u.as_slice();
        (0..n).fold(1.0, |acc, i| acc * u[i * n + i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::kernels::mul;
    use approx::assert_abs_diff_eq;

    #[test]
    fn recovers_known_factors_exactly() {
        let l = DenseMatrix::from_rows(&[&[1.0, 0.0, 0.0], &[2.0, 1.0, 0.0], &[3.0, 4.0, 1.0]]).unwrap();
        let u = DenseMatrix::from_rows(&[&[5.0, 6.0, 7.0], &[0.0, 8.0, 9.0], &[0.0, 0.0, 10.0]]).unwrap();
        let a = mul(&l, &u).unwrap();
        let f = lu(&a).unwrap();
        assert_eq!(f.l, l);
        assert_eq!(f.u, u);
        assert_eq!(f.determinant(), 400.0);
    }

    #[test]
    fn zero_pivot_is_singular() {
        // leading zero: a permuted factorization exists but is never attempted
        let a = DenseMatrix::from_rows(&[&[0.0, 1.0], &[1.0, 0.0]]).unwrap();
        assert_eq!(lu(&a).unwrap_err(), MatError::ZeroPivot(0));
        let b = DenseMatrix::from_rows(&[&[1.0, 2.0], &[2.0, 4.0]]).unwrap();
        assert_eq!(inverse(&b).unwrap_err(), MatError::ZeroPivot(1));
        assert_eq!(inverse(&b).unwrap_err().kind(), ErrorKind::Singular);
    }

    #[test]
    fn rectangular_rejected() {
        let a = DenseMatrix::new(2, 3).unwrap();
        assert!(matches!(lu(&a).unwrap_err(), MatError::NotSquare { op: "lu", .. }));
    }

    #[test]
    fn inverse_three_by_three() {
        let a = DenseMatrix::from_rows(&[&[4.0, 7.0, 2.0], &[3.0, 6.0, 1.0], &[2.0, 5.0, 3.0]]).unwrap();
        let inv = inverse(&a).unwrap();
        let id = mul(&a, &inv).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(id.at(i, j).unwrap(), expected, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn solve_reuses_factors() {
        // 3x3 system: [[2,1,1],[1,3,2],[1,0,0]] x = [4,5,6]
        // True solution: [6,15,-23]
        let a = DenseMatrix::from_rows(&[&[2.0, 1.0, 1.0], &[1.0, 3.0, 2.0], &[1.0, 0.0, 0.0]]).unwrap();
        let f = lu(&a).unwrap();
        let x = f.solve(&[4.0, 5.0, 6.0]).unwrap();
        let expected = [6.0, 15.0, -23.0];
        for (xi, ei) in x.iter().zip(expected.iter()) {
            assert_abs_diff_eq!(*xi, *ei, epsilon = 1e-10);
        }
        assert_eq!(f.solve(&[1.0]).unwrap_err().kind(), ErrorKind::Shape);
    }

    #[test]
    fn empty_matrix_factors_trivially() {
        let a = DenseMatrix::new(0, 0).unwrap();
        let f = lu(&a).unwrap();
        assert_eq!(f.order(), 0);
        assert_eq!(f.determinant(), 1.0);
        assert_eq!(inverse(&a).unwrap().shape(), (0, 0));
    }
}
