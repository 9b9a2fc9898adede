//! Linear algebra algorithm trait definitions
//!
//! Methods without a backend implementation return
//! [`Error::NotImplemented`](crate::error::Error::NotImplemented).

pub mod linear_algebra;
pub mod tensor_decompose;

pub use linear_algebra::LinearAlgebraAlgorithms;
pub use tensor_decompose::TensorDecomposeAlgorithms;
