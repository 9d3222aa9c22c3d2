//! Algebraic identities of the elementwise kernels.
//!
//! Entries are small integers and scalars are powers of two, so every
//! identity below holds exactly in floating point.

use denso::{DenseMatrix, add, scale, transpose};
use proptest::collection::vec;
use proptest::prelude::*;

fn matrix() -> impl Strategy<Value = DenseMatrix> {
    (1usize..7, 1usize..7).prop_flat_map(|(rows, cols)| {
        vec(-64i32..64, rows * cols).prop_map(move |data| {
            let data = data.into_iter().map(|v| v as f64).collect();
            DenseMatrix::from_vec(rows, cols, data).unwrap()
        })
    })
}

fn square() -> impl Strategy<Value = DenseMatrix> {
    (1usize..7).prop_flat_map(|n| {
        vec(-64i32..64, n * n).prop_map(move |data| {
            let data = data.into_iter().map(|v| v as f64).collect();
            DenseMatrix::from_vec(n, n, data).unwrap()
        })
    })
}

fn same_shape_pair() -> impl Strategy<Value = (DenseMatrix, DenseMatrix)> {
    (1usize..7, 1usize..7).prop_flat_map(|(rows, cols)| {
        (vec(-64i32..64, rows * cols), vec(-64i32..64, rows * cols)).prop_map(move |(a, b)| {
            let a = a.into_iter().map(|v| v as f64).collect();
            let b = b.into_iter().map(|v| v as f64).collect();
            (
                DenseMatrix::from_vec(rows, cols, a).unwrap(),
                DenseMatrix::from_vec(rows, cols, b).unwrap(),
            )
        })
    })
}

fn power_of_two() -> impl Strategy<Value = f64> {
    (-4i32..5, any::<bool>()).prop_map(|(e, neg)| {
        let v = 2f64.powi(e);
        if neg { -v } else { v }
    })
}

proptest! {
    #[test]
    fn scale_distributes_over_add((a, b) in same_shape_pair(), alpha in power_of_two()) {
        let lhs = scale(&add(&a, &b).unwrap(), alpha).unwrap();
        let rhs = add(&scale(&a, alpha).unwrap(), &scale(&b, alpha).unwrap()).unwrap();
        prop_assert_eq!(lhs, rhs);
    }

    #[test]
    fn scale_composes(m in matrix(), alpha in power_of_two(), beta in power_of_two()) {
        let twice = scale(&scale(&m, alpha).unwrap(), beta).unwrap();
        prop_assert_eq!(twice, scale(&m, alpha * beta).unwrap());
    }

    #[test]
    fn scale_by_zero_and_minus_one(m in matrix()) {
        let zero = scale(&m, 0.0).unwrap();
        prop_assert!(zero.as_slice().iter().all(|&v| v == 0.0));
        let neg = scale(&m, -1.0).unwrap();
        prop_assert!(neg.as_slice().iter().zip(m.as_slice()).all(|(n, v)| *n == -*v));
        prop_assert_eq!(add(&m, &neg).unwrap(), DenseMatrix::new(m.rows(), m.cols()).unwrap());
    }

    #[test]
    fn transpose_is_an_involution(m in matrix()) {
        let t = transpose(&m).unwrap();
        prop_assert_eq!(t.shape(), (m.cols(), m.rows()));
        prop_assert_eq!(transpose(&t).unwrap(), m);
    }

    #[test]
    fn symmetrized_matrix_equals_its_transpose(m in square()) {
        let s = add(&m, &transpose(&m).unwrap()).unwrap();
        prop_assert!(s.is_symmetric(0.0));
        prop_assert_eq!(transpose(&s).unwrap(), s);
    }
}
