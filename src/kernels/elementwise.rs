//! Element-wise kernels and transpose.

use crate::core::traits::Matrix;
use crate::error::Result;
use crate::kernels::ensure_same_shape;
use crate::matrix::dense::DenseMatrix;

fn zip_with<A, B, F>(op: &'static str, a: &A, b: &B, f: F) -> Result<DenseMatrix>
where
    A: Matrix + ?Sized,
    B: Matrix + ?Sized,
    F: Fn(f64, f64) -> f64,
{
    ensure_same_shape(op, a, b)?;
    let (rows, cols) = (a.rows(), a.cols());
    let data = match (a.as_dense(), b.as_dense()) {
        (Some(da), Some(db)) => da
            .as_slice()
            .iter()
            .zip(db.as_slice())
            .map(|(&x, &y)| f(x, y))
            .collect(),
        _ => {
            let mut out = Vec::with_capacity(rows * cols);
            for i in 0..rows {
                for j in 0..cols {
                    out.push(f(a.at(i, j)?, b.at(i, j)?));
                }
            }
            out
        }
    };
    DenseMatrix::from_vec_with_policy(rows, cols, data, a.policy())
}

/// `a + b`, element-wise. Shapes must match.
pub fn add<A, B>(a: &A, b: &B) -> Result<DenseMatrix>
where
    A: Matrix + ?Sized,
    B: Matrix + ?Sized,
{
    zip_with("add", a, b, |x, y| x + y)
}

/// `a - b`, element-wise. Shapes must match.
pub fn sub<A, B>(a: &A, b: &B) -> Result<DenseMatrix>
where
    A: Matrix + ?Sized,
    B: Matrix + ?Sized,
{
    zip_with("sub", a, b, |x, y| x - y)
}

/// Hadamard (element-wise) product. Shapes must match.
pub fn hadamard<A, B>(a: &A, b: &B) -> Result<DenseMatrix>
where
    A: Matrix + ?Sized,
    B: Matrix + ?Sized,
{
    zip_with("hadamard", a, b, |x, y| x * y)
}

/// `alpha * m`.
pub fn scale<M>(m: &M, alpha: f64) -> Result<DenseMatrix>
where
    M: Matrix + ?Sized,
{
    let (rows, cols) = (m.rows(), m.cols());
    let data = match m.as_dense() {
        Some(d) => d.as_slice().iter().map(|&x| x * alpha).collect(),
        None => {
            let mut out = Vec::with_capacity(rows * cols);
            for i in 0..rows {
                for j in 0..cols {
                    out.push(m.at(i, j)? * alpha);
                }
            }
            out
        }
    };
    DenseMatrix::from_vec_with_policy(rows, cols, data, m.policy())
}

/// Transpose; the result is `cols x rows`.
pub fn transpose<M>(m: &M) -> Result<DenseMatrix>
where
    M: Matrix + ?Sized,
{
    let (rows, cols) = (m.rows(), m.cols());
    let mut out = Vec::with_capacity(rows * cols);
    match m.as_dense() {
        Some(d) => {
            let src = d.as_slice();
            for j in 0..cols {
                out.extend((0..rows).map(|i| src[i * cols + j]));
            }
        }
        None => {
            for j in 0..cols {
                for i in 0..rows {
                    out.push(m.at(i, j)?);
                }
            }
        }
    }
    DenseMatrix::from_vec_with_policy(cols, rows, out, m.policy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::MatrixOptions;
    use crate::error::ErrorKind;

    fn m2(a: f64, b: f64, c: f64, d: f64) -> DenseMatrix {
        DenseMatrix::from_vec(2, 2, vec![a, b, c, d]).unwrap()
    }

    #[test]
    fn add_two_by_two() {
        let s = add(&m2(1.0, 2.0, 3.0, 4.0), &m2(5.0, 6.0, 7.0, 8.0)).unwrap();
        assert_eq!(s.at(1, 1).unwrap(), 12.0);
        assert_eq!(s.as_slice(), &[6.0, 8.0, 10.0, 12.0]);
    }

    #[test]
    fn sub_and_hadamard() {
        let a = m2(1.0, 2.0, 3.0, 4.0);
        let b = m2(4.0, 3.0, 2.0, 1.0);
        assert_eq!(sub(&a, &b).unwrap().as_slice(), &[-3.0, -1.0, 1.0, 3.0]);
        assert_eq!(hadamard(&a, &b).unwrap().as_slice(), &[4.0, 6.0, 6.0, 4.0]);
    }

    #[test]
    fn mismatched_shapes_rejected() {
        let a = DenseMatrix::new(2, 3).unwrap();
        let b = DenseMatrix::new(3, 2).unwrap();
        assert_eq!(add(&a, &b).unwrap_err().kind(), ErrorKind::Shape);
        assert_eq!(hadamard(&a, &b).unwrap_err().kind(), ErrorKind::Shape);
    }

    #[test]
    fn transpose_shape_and_values() {
        let m = DenseMatrix::from_rows(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]).unwrap();
        let t = transpose(&m).unwrap();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.as_slice(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        assert_eq!(transpose(&t).unwrap(), m);
    }

    #[test]
    fn overflow_reported_through_result_policy() {
        let a = m2(f64::MAX, 0.0, 0.0, 0.0);
        let err = scale(&a, 4.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Policy);
    }

    #[test]
    fn result_inherits_left_policy() {
        let mut a = DenseMatrix::with_options(1, 2, MatrixOptions::distance()).unwrap();
        a.set(0, 0, f64::INFINITY).unwrap();
        let t = transpose(&a).unwrap();
        assert_eq!(t.at(0, 0).unwrap(), f64::INFINITY);
        assert_eq!(t.policy(), a.policy());
    }

    #[test]
    fn kernels_accept_views() {
        let mut m = DenseMatrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let doubled = {
            let v = m.view(0, 0, 2, 1).unwrap();
            scale(&v, 2.0).unwrap()
        };
        assert_eq!(doubled.as_slice(), &[2.0, 6.0]);
    }
}
