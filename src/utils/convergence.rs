//! Convergence tracking & tolerance checks for iterative decompositions.

use num_traits::Float;

use crate::error::{MatError, Result};

/// Stopping criteria.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Convergence<T> {
    pub tol: T,
    pub max_iters: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IterStats<T> {
    pub iterations: usize,
    pub final_residual: T,
    pub converged: bool,
}

impl<T: Copy + Float> Convergence<T> {
    /// `tol` must be finite and strictly positive.
    pub fn new(tol: T, max_iters: usize) -> Result<Self> {
        if !tol.is_finite() || tol <= T::zero() {
            return Err(MatError::InvalidArgument {
                arg: "tol",
                reason: "tolerance must be finite and positive".to_string(),
            });
        }
        Ok(Self { tol, max_iters })
    }

    /// Whether `residual` is strictly below the tolerance.
    pub fn is_converged(&self, residual: T) -> bool {
        residual < self.tol
    }

    /// Stats after `iterations` steps with the given residual.
    pub fn stats(&self, iterations: usize, residual: T) -> IterStats<T> {
        IterStats {
            iterations,
            final_residual: residual,
            converged: self.is_converged(residual),
        }
    }
}
