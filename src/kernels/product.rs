//! Matrix-vector and matrix-matrix products.
//!
//! The accumulation order is fixed: `mat_vec` sums each row left to right
//! starting from `0.0`; `mul` walks output row `i`, then shared index `k`,
//! then output column `j`, adding `a[i,k] * b[k,j]` into `c[i,j]`. With the
//! `rayon` feature the dense path hands whole output rows to worker threads,
//! which leaves every row's order, and so its rounding, unchanged.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::core::traits::Matrix;
use crate::error::{MatError, Result};
use crate::matrix::dense::DenseMatrix;

#[inline]
fn dot(row: &[f64], x: &[f64]) -> f64 {
    row.iter().zip(x).fold(0.0, |acc, (&a, &b)| acc + a * b)
}

#[inline]
fn mul_row(a_row: &[f64], b: &[f64], b_cols: usize, out_row: &mut [f64]) {
    for (k, &aik) in a_row.iter().enumerate() {
        let b_row = &b[k * b_cols..(k + 1) * b_cols];
        for (o, &bkj) in out_row.iter_mut().zip(b_row) {
            *o += aik * bkj;
        }
    }
}

/// `y = m x`. Requires `x.len() == m.cols()`.
pub fn mat_vec<M>(m: &M, x: &[f64]) -> Result<Vec<f64>>
where
    M: Matrix + ?Sized,
{
    let (rows, cols) = (m.rows(), m.cols());
    if x.len() != cols {
        return Err(MatError::ShapeMismatch {
            op: "mat_vec",
            lhs: (rows, cols),
            rhs: (x.len(), 1),
        });
    }
    match m.as_dense() {
        Some(d) => {
            let data = d.as_slice();
            let mut y = vec![0.0; rows];
            #[cfg(feature = "rayon")]
            y.par_iter_mut()
                .enumerate()
                .for_each(|(i, yi)| *yi = dot(&data[i * cols..(i + 1) * cols], x));
            #[cfg(not(feature = "rayon"))]
            for (i, yi) in y.iter_mut().enumerate() {
                *yi = dot(&data[i * cols..(i + 1) * cols], x);
            }
            Ok(y)
        }
        None => {
            let mut y = Vec::with_capacity(rows);
            for i in 0..rows {
                let mut acc = 0.0;
                for (j, &xj) in x.iter().enumerate() {
                    acc = acc + m.at(i, j)? * xj;
                }
                y.push(acc);
            }
            Ok(y)
        }
    }
}

/// `a * b`. Requires `a.cols() == b.rows()`.
pub fn mul<A, B>(a: &A, b: &B) -> Result<DenseMatrix>
where
    A: Matrix + ?Sized,
    B: Matrix + ?Sized,
{
    let (rows, inner, cols) = (a.rows(), a.cols(), b.cols());
    if inner != b.rows() {
        return Err(MatError::ShapeMismatch {
            op: "mul",
            lhs: (rows, inner),
            rhs: (b.rows(), cols),
        });
    }
    let len = rows.checked_mul(cols).ok_or(MatError::InvalidShape {
        rows,
        cols,
        reason: "element count overflows usize",
    })?;
    let mut out = vec![0.0; len];
    if len > 0 {
        match (a.as_dense(), b.as_dense()) {
            (Some(da), Some(db)) => {
                let (ad, bd) = (da.as_slice(), db.as_slice());
                #[cfg(feature = "rayon")]
                out.par_chunks_mut(cols)
                    .enumerate()
                    .for_each(|(i, o)| mul_row(&ad[i * inner..(i + 1) * inner], bd, cols, o));
                #[cfg(not(feature = "rayon"))]
                for (i, o) in out.chunks_mut(cols).enumerate() {
                    mul_row(&ad[i * inner..(i + 1) * inner], bd, cols, o);
                }
            }
            _ => {
                for i in 0..rows {
                    for k in 0..inner {
                        let aik = a.at(i, k)?;
                        for j in 0..cols {
                            let o = &mut out[i * cols + j];
                            *o += aik * b.at(k, j)?;
                        }
                    }
                }
            }
        }
    }
    DenseMatrix::from_vec_with_policy(rows, cols, out, a.policy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn mat_vec_rows() {
        let m = DenseMatrix::from_rows(&[&[1.0, 2.0], &[3.0, 4.0], &[0.0, -1.0]]).unwrap();
        assert_eq!(mat_vec(&m, &[1.0, 1.0]).unwrap(), vec![3.0, 7.0, -1.0]);
        assert_eq!(mat_vec(&m, &[1.0]).unwrap_err().kind(), ErrorKind::Shape);
    }

    #[test]
    fn mul_rectangular() {
        let a = DenseMatrix::from_rows(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]).unwrap();
        let b = DenseMatrix::from_rows(&[&[7.0, 8.0], &[9.0, 10.0], &[11.0, 12.0]]).unwrap();
        let c = mul(&a, &b).unwrap();
        assert_eq!(c.shape(), (2, 2));
        assert_eq!(c.as_slice(), &[58.0, 64.0, 139.0, 154.0]);
        assert_eq!(mul(&a, &a).unwrap_err().kind(), ErrorKind::Shape);
    }

    #[test]
    fn mul_with_empty_inner_dimension_is_zero() {
        let a = DenseMatrix::new(2, 0).unwrap();
        let b = DenseMatrix::new(0, 3).unwrap();
        let c = mul(&a, &b).unwrap();
        assert_eq!(c.shape(), (2, 3));
        assert!(c.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn identity_is_neutral() {
        let a = DenseMatrix::from_rows(&[&[0.5, -2.0], &[3.25, 1e-3]]).unwrap();
        let i = DenseMatrix::identity(2).unwrap();
        assert_eq!(mul(&a, &i).unwrap(), a);
        assert_eq!(mul(&i, &a).unwrap(), a);
    }
}
