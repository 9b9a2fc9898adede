//! Algorithm contracts and their shared implementations
//!
//! Each backend implements the traits in [`linalg`]; the numerical work for
//! tensor decompositions lives in generic functions so every backend runs
//! exactly the same algorithm.

pub mod linalg;

pub use linalg::{
    CpDecomposition, CpInit, CpOptions, LinearAlgebraAlgorithms, SvdDecomposition,
    TensorDecomposeAlgorithms,
};
