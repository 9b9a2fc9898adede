//! CPU kernel implementations
//!
//! Kernels work on plain slices and are generic over `T: Element`. Layout
//! handling (broadcasting, strided views) happens in the helpers before a
//! kernel is called.

mod binary;
mod matmul;
mod random;
mod reduce;
mod unary;

pub use binary::{binary_op_gather_kernel, binary_op_kernel};
pub use matmul::matmul_kernel;
pub use random::rand_normal_kernel;
pub use reduce::sum_kernel;
pub use unary::unary_op_kernel;
