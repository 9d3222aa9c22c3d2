//! Matrix module: dense storage, windows and numeric policy.

pub mod dense;
pub mod policy;
pub mod view;

pub use dense::DenseMatrix;
pub use policy::NumericPolicy;
pub use view::MatrixView;
