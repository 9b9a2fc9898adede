//! Tensor type and its memory description
//!
//! A [`Tensor`] pairs shared [`Storage`] with a [`Layout`]. Most shape
//! manipulations only produce a new layout and never touch the data.

mod core;
mod layout;
mod storage;

pub use core::Tensor;
pub(crate) use core::strided_offsets;
pub use layout::{Layout, Shape, Strides, broadcast_shapes};
pub use storage::Storage;
