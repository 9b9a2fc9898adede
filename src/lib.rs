//! # cpals
//!
//! **CP/PARAFAC tensor decomposition by alternating least squares.**
//!
//! cpals carries a compact tensor runtime (dense n-dimensional arrays with
//! strided views and broadcasting), the dense linear algebra the decomposition
//! needs (matmul, LU solve, Jacobi SVD, Khatri-Rao), and the CP-ALS algorithm
//! itself. The `cpals` binary decomposes the 2x2x2 index-sum tensor
//! `T[i, j, k] = i + j + k + 3` at rank 2 and prints the result.
//!
//! ## Quick Start
//!
//! ```
//! use cpals::prelude::*;
//!
//! let device = CpuDevice::new();
//! let client = CpuRuntime::default_client(&device);
//!
//! let tensor = build_index_sum_tensor(&device);
//! let cp = client.cp_decompose(&tensor, CP_RANK, &CpOptions::default())?;
//!
//! assert_eq!(cp.weights.shape(), &[CP_RANK]);
//! assert_eq!(cp.factors.len(), 3);
//! assert!(cp.reconstruction_error < 0.05);
//! # Ok::<(), cpals::error::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cpu` (default): CPU backend
//! - `rayon` (default): Multi-threaded matmul for large row counts

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod algorithm;
pub mod dtype;
pub mod error;
pub mod index_sum;
pub mod ops;
pub mod runtime;
pub mod tensor;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithm::{
        CpDecomposition, CpInit, CpOptions, LinearAlgebraAlgorithms, SvdDecomposition,
        TensorDecomposeAlgorithms,
    };
    pub use crate::dtype::DType;
    pub use crate::error::{Error, Result};
    pub use crate::index_sum::{CP_RANK, INDEX_SUM_SHAPE, build_index_sum_tensor, index_sum};
    pub use crate::ops::{BinaryOps, MatmulOps, RandomOps, ReduceOps, UnaryOps};
    pub use crate::runtime::{Device, Runtime, RuntimeClient};
    pub use crate::tensor::{Layout, Tensor};

    #[cfg(feature = "cpu")]
    pub use crate::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};
}

/// Default runtime based on enabled features
#[cfg(feature = "cpu")]
pub type DefaultRuntime = runtime::cpu::CpuRuntime;
