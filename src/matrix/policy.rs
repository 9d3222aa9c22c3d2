//! Per-matrix numeric policy.
//!
//! Every mutating entry point (`set`, `fill`, `apply`, view writes, kernel
//! results) consults the policy carried by the destination matrix. Two matrices
//! may hold different policies at the same time; nothing here is global.

use bitflags::bitflags;
use num_traits::Float;

use crate::error::{MatError, Result};

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct NumericPolicy: u8 {
        const REJECT_NON_FINITE = 0b01;
        const ALLOW_POS_INF     = 0b10; // "no path" sentinel for distance buffers
        const DISTANCE          = Self::REJECT_NON_FINITE.bits() | Self::ALLOW_POS_INF.bits();
    }
}

impl Default for NumericPolicy {
    fn default() -> Self {
        NumericPolicy::REJECT_NON_FINITE
    }
}

impl NumericPolicy {
    /// Accept every value, NaN included.
    pub const UNRESTRICTED: NumericPolicy = NumericPolicy::empty();

    /// Whether `v` may be stored under this policy.
    ///
    /// NaN and -Inf are rejected whenever `REJECT_NON_FINITE` is set;
    /// +Inf additionally requires `ALLOW_POS_INF`.
    pub fn admits<T: Float>(self, v: T) -> bool {
        if !self.contains(NumericPolicy::REJECT_NON_FINITE) || v.is_finite() {
            return true;
        }
        v.is_infinite() && v > T::zero() && self.contains(NumericPolicy::ALLOW_POS_INF)
    }

    /// Policy check reporting the offending cell.
    pub fn check(self, row: usize, col: usize, value: f64) -> Result<()> {
        if self.admits(value) {
            Ok(())
        } else {
            Err(MatError::PolicyViolation { row, col, value })
        }
    }

    /// Validate a row-major buffer, reporting the first rejected cell.
    pub(crate) fn check_row_major(self, cols: usize, data: &[f64]) -> Result<()> {
        if !self.contains(NumericPolicy::REJECT_NON_FINITE) {
            return Ok(());
        }
        match data.iter().position(|&v| !self.admits(v)) {
            Some(k) => Err(MatError::PolicyViolation {
                row: k / cols,
                col: k % cols,
                value: data[k],
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rejects_all_non_finite() {
        let p = NumericPolicy::default();
        assert!(p.admits(1.5f64));
        assert!(!p.admits(f64::NAN));
        assert!(!p.admits(f64::INFINITY));
        assert!(!p.admits(f64::NEG_INFINITY));
    }

    #[test]
    fn distance_policy_admits_only_positive_infinity() {
        let p = NumericPolicy::DISTANCE;
        assert!(p.admits(f64::INFINITY));
        assert!(!p.admits(f64::NEG_INFINITY));
        assert!(!p.admits(f64::NAN));
        assert!(p.admits(f32::INFINITY));
    }

    #[test]
    fn unrestricted_admits_everything() {
        let p = NumericPolicy::UNRESTRICTED;
        assert!(p.admits(f64::NAN));
        assert!(p.admits(f64::NEG_INFINITY));
        // ALLOW_POS_INF alone changes nothing
        assert!(NumericPolicy::ALLOW_POS_INF.admits(f64::NAN));
    }

    #[test]
    fn row_major_check_reports_first_failure() {
        let data = [1.0, 2.0, 3.0, f64::NAN, f64::INFINITY, 6.0];
        let err = NumericPolicy::default().check_row_major(3, &data).unwrap_err();
        assert!(matches!(err, MatError::PolicyViolation { row: 1, col: 0, .. }));
    }
}
