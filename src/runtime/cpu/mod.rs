//! CPU runtime implementation
//!
//! The CPU runtime keeps tensor data in host memory and is the reference
//! implementation for every operation and algorithm in the crate.
//!
//! # Broadcasting
//!
//! NumPy-style broadcasting is supported for binary arithmetic (add, sub,
//! mul, div): shapes are right-aligned and size-1 dimensions expand.
//!
//! # Non-contiguous Tensors
//!
//! Kernels read through the tensor layout, so transposed, narrowed and
//! broadcast views are handled without an explicit copy by the caller.

mod client;
mod device;
pub(crate) mod helpers;
pub mod jacobi;
pub(crate) mod kernels;
mod linalg;
mod runtime;

pub use crate::tensor::Tensor;
pub use client::CpuClient;
pub use device::CpuDevice;
pub use runtime::CpuRuntime;
