//! Linear algebra and tensor decomposition contracts
//!
//! # Module Structure
//!
//! - `decompositions`: Result and option types (SvdDecomposition, CpDecomposition, ...)
//! - `traits`: LinearAlgebraAlgorithms and TensorDecomposeAlgorithms
//! - `helpers`: Validation utilities
//! - `tensor_decompose_core`: Generic CP/PARAFAC implementation shared by backends

pub mod decompositions;
pub mod helpers;
pub mod tensor_decompose_core;
pub mod traits;

pub use decompositions::*;
pub use helpers::*;
pub use traits::*;
