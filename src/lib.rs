//! denso: row-major dense matrices with a numeric policy, deterministic kernels,
//! unpivoted decompositions and Floyd–Warshall relaxation.
//!
//! Every kernel and decomposition accepts any [`Matrix`] implementer and gives
//! bit-identical results whether it is handed a [`DenseMatrix`] (contiguous
//! fast path) or something else, such as a [`MatrixView`] or a `faer::Mat<f64>`.

pub mod apsp;
pub mod config;
pub mod core;
pub mod decomp;
pub mod error;
pub mod kernels;
pub mod matrix;
pub mod utils;

// Re-exports for convenience
pub use apsp::*;
pub use config::*;
pub use self::core::*;
pub use decomp::*;
pub use error::*;
pub use kernels::*;
pub use matrix::*;
pub use utils::*;
