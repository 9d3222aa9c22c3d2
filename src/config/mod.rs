//! Matrix construction options.

pub mod options;
pub use options::MatrixOptions;
