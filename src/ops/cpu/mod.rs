//! CPU implementations of the operation traits

mod binary;
mod matmul;
mod random;
mod reduce;
mod unary;
