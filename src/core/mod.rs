//! Capability trait and its implementations for foreign matrix types.

pub mod traits;
pub mod wrappers;

pub use traits::Matrix;
