use std::fmt;

use thiserror::Error;

/// Result alias used throughout denso.
pub type Result<T> = std::result::Result<T, MatError>;

/// Matrix axis, used when an index list refers to a single dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Col,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Col => f.write_str("column"),
        }
    }
}

/// Coarse classification of a [`MatError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Shape,
    Index,
    Policy,
    Singular,
    Asymmetry,
    NonConvergence,
    InvalidWeight,
    InvalidArgument,
}

// Unified error type for denso

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatError {
    #[error("invalid dimensions {rows}x{cols}: {reason}")]
    InvalidShape {
        rows: usize,
        cols: usize,
        reason: &'static str,
    },
    #[error("{op}: expected {expected} values for a {rows}x{cols} matrix, got {got}")]
    LengthMismatch {
        op: &'static str,
        rows: usize,
        cols: usize,
        expected: usize,
        got: usize,
    },
    #[error("{op}: shape mismatch {}x{} vs {}x{}", .lhs.0, .lhs.1, .rhs.0, .rhs.1)]
    ShapeMismatch {
        op: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },
    #[error("{op} requires a square matrix, got {rows}x{cols}")]
    NotSquare {
        op: &'static str,
        rows: usize,
        cols: usize,
    },
    #[error("window at ({row_offset}, {col_offset}) of size {height}x{width} exceeds {rows}x{cols}")]
    WindowOutOfBounds {
        row_offset: usize,
        col_offset: usize,
        height: usize,
        width: usize,
        rows: usize,
        cols: usize,
    },
    #[error("index ({row}, {col}) out of bounds for {rows}x{cols} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("{axis} index {index} out of bounds for extent {extent}")]
    AxisOutOfBounds {
        axis: Axis,
        index: usize,
        extent: usize,
    },
    #[error("value {value} at ({row}, {col}) rejected by numeric policy")]
    PolicyViolation { row: usize, col: usize, value: f64 },
    #[error("zero pivot at row {0}")]
    ZeroPivot(usize),
    #[error("matrix is not symmetric: |a[{row},{col}] - a[{col},{row}]| = {delta} exceeds {tol}")]
    Asymmetric {
        row: usize,
        col: usize,
        delta: f64,
        tol: f64,
    },
    #[error("eigendecomposition did not converge after {iterations} rotations (off-diagonal {off_diagonal} >= {tol})")]
    EigenNonConvergence {
        iterations: usize,
        off_diagonal: f64,
        tol: f64,
    },
    #[error("invalid edge weight {weight} at ({row}, {col})")]
    InvalidWeight { row: usize, col: usize, weight: f64 },
    #[error("invalid argument '{arg}': {reason}")]
    InvalidArgument { arg: &'static str, reason: String },
}

impl MatError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MatError::InvalidShape { .. }
            | MatError::LengthMismatch { .. }
            | MatError::ShapeMismatch { .. }
            | MatError::NotSquare { .. }
            | MatError::WindowOutOfBounds { .. } => ErrorKind::Shape,
            MatError::IndexOutOfBounds { .. } | MatError::AxisOutOfBounds { .. } => ErrorKind::Index,
            MatError::PolicyViolation { .. } => ErrorKind::Policy,
            MatError::ZeroPivot(_) => ErrorKind::Singular,
            MatError::Asymmetric { .. } => ErrorKind::Asymmetry,
            MatError::EigenNonConvergence { .. } => ErrorKind::NonConvergence,
            MatError::InvalidWeight { .. } => ErrorKind::InvalidWeight,
            MatError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
        }
    }
}
