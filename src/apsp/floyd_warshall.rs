//! Floyd–Warshall all-pairs shortest paths over a dense distance buffer.
//!
//! Distances live in a square [`DenseMatrix`] whose policy admits `+∞`, the
//! "no path" sentinel (see [`MatrixOptions::distance`]). Relaxation runs
//! `k → i → j` and only replaces a distance on strict improvement, so ties
//! keep the earlier value and the loop order is part of the result.
//!
//! [`MatrixOptions::distance`]: crate::config::options::MatrixOptions::distance

use tracing::debug;

use crate::core::traits::Matrix;
use crate::error::{MatError, Result};
use crate::matrix::dense::DenseMatrix;
use crate::matrix::policy::NumericPolicy;

fn ensure_square(op: &'static str, m: &DenseMatrix) -> Result<usize> {
    if m.is_square() {
        Ok(m.rows())
    } else {
        Err(MatError::NotSquare {
            op,
            rows: m.rows(),
            cols: m.cols(),
        })
    }
}

/// Distance a 0/weight adjacency entry turns into.
fn initial_distance(i: usize, j: usize, w: f64) -> Result<f64> {
    if w.is_nan() || w == f64::NEG_INFINITY {
        return Err(MatError::InvalidWeight { row: i, col: j, weight: w });
    }
    Ok(if i == j {
        // negative self-loop is a length-1 negative cycle; keep it
        if w < 0.0 { w } else { 0.0 }
    } else if w == 0.0 {
        f64::INFINITY
    } else {
        w
    })
}

/// Turn a 0/weight adjacency matrix into a distance matrix, in place.
///
/// Diagonal entries become `0` unless negative; off-diagonal zeros become
/// `+∞`; everything else is kept. Every cell is validated, both as a weight
/// and against the matrix policy, before the first write, so on error the
/// matrix is untouched.
pub fn init_distances(m: &mut DenseMatrix) -> Result<()> {
    let n = ensure_square("init_distances", m)?;
    let next = initial_distances(n, m.as_slice(), m.policy())?;
    m.as_mut_slice().copy_from_slice(&next);
    debug!(n, "distance matrix initialized");
    Ok(())
}

fn initial_distances(n: usize, data: &[f64], policy: NumericPolicy) -> Result<Vec<f64>> {
    let mut next = Vec::with_capacity(data.len());
    for (k, &w) in data.iter().enumerate() {
        let (i, j) = (k / n, k % n);
        let d = initial_distance(i, j, w)?;
        policy.check(i, j, d)?;
        next.push(d);
    }
    Ok(next)
}

/// Finite legs whose sum overflows past `-f64::MAX`.
#[inline]
fn path_length(dik: f64, dkj: f64) -> f64 {
    let sum = dik + dkj;
    if sum == f64::NEG_INFINITY && dik.is_finite() && dkj.is_finite() {
        -f64::MAX
    } else {
        sum
    }
}

/// Floyd–Warshall relaxation in place.
///
/// Paths through `k` are skipped when either leg is `+∞`. Reachable negative
/// cycles show up as negative diagonal entries; they are not an error. A
/// cycle whose length overflows saturates at `-f64::MAX` instead of reaching
/// `-∞`, so every written value is one the matrix policy already admits. On a
/// matrix free of negative cycles a second pass changes nothing.
///
/// The only failure is a non-square matrix, reported before any write; a
/// pass that starts always runs to completion.
pub fn relax(m: &mut DenseMatrix) -> Result<()> {
    let n = ensure_square("relax", m)?;
    let policy = m.policy();
    let d = m.as_mut_slice();
    let mut improved = 0usize;
    for k in 0..n {
        for i in 0..n {
            let dik = d[i * n + k];
            if dik == f64::INFINITY {
                continue;
            }
            for j in 0..n {
                let dkj = d[k * n + j];
                if dkj == f64::INFINITY {
                    continue;
                }
                let candidate = path_length(dik, dkj);
                if candidate < d[i * n + j] {
                    debug_assert!(policy.admits(candidate));
                    d[i * n + j] = candidate;
                    improved += 1;
                }
            }
        }
    }
    debug!(n, improved, "floyd-warshall relaxation complete");
    Ok(())
}

/// Shortest-path distances for a 0/weight adjacency matrix.
///
/// Applies the [`init_distances`] conversion to a copy of `adjacency`
/// carrying [`NumericPolicy::DISTANCE`], then [`relax`]es it. The input is
/// not modified.
pub fn all_pairs_shortest_paths<M>(adjacency: &M) -> Result<DenseMatrix>
where
    M: Matrix + ?Sized,
{
    let src = adjacency.to_dense();
    let n = ensure_square("all_pairs_shortest_paths", &src)?;
    let next = initial_distances(n, src.as_slice(), NumericPolicy::DISTANCE)?;
    let mut dist = DenseMatrix::from_vec_with_policy(n, n, next, NumericPolicy::DISTANCE)?;
    relax(&mut dist)?;
    Ok(dist)
}
