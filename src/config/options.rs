//! Construction-time options for dense matrices.
//!
//! `MatrixOptions` is resolved once, when a matrix is created, into the
//! [`NumericPolicy`] the matrix carries for the rest of its life. Clones,
//! views and induced submatrices inherit that policy unchanged.

use crate::matrix::policy::NumericPolicy;

/// Numeric options for a new matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixOptions {
    /// Reject NaN and infinities on write.
    pub reject_non_finite: bool,

    /// Permit +Infinity even when non-finite values are rejected.
    pub allow_positive_infinity: bool,
}

impl Default for MatrixOptions {
    fn default() -> Self {
        Self {
            reject_non_finite: true,
            allow_positive_infinity: false,
        }
    }
}

impl MatrixOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for shortest-path distance buffers: finite values plus +Infinity.
    pub fn distance() -> Self {
        Self::default().with_allow_positive_infinity(true)
    }

    pub fn with_reject_non_finite(mut self, reject: bool) -> Self {
        self.reject_non_finite = reject;
        self
    }

    pub fn with_allow_positive_infinity(mut self, allow: bool) -> Self {
        self.allow_positive_infinity = allow;
        self
    }

    /// Resolve into the policy flags stored in the matrix.
    pub fn policy(&self) -> NumericPolicy {
        let mut p = NumericPolicy::UNRESTRICTED;
        p.set(NumericPolicy::REJECT_NON_FINITE, self.reject_non_finite);
        p.set(NumericPolicy::ALLOW_POS_INF, self.allow_positive_infinity);
        p
    }
}

impl From<MatrixOptions> for NumericPolicy {
    fn from(opts: MatrixOptions) -> Self {
        opts.policy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_to_default_policy() {
        assert_eq!(MatrixOptions::default().policy(), NumericPolicy::default());
    }

    #[test]
    fn distance_options() {
        assert_eq!(MatrixOptions::distance().policy(), NumericPolicy::DISTANCE);
        let p: NumericPolicy = MatrixOptions::new().with_reject_non_finite(false).into();
        assert_eq!(p, NumericPolicy::UNRESTRICTED);
    }
}
