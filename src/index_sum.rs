//! The index-sum demonstration tensor
//!
//! A fixed 2x2x2 tensor whose entries depend only on their coordinates, used
//! by the `cpals` binary as the input to a rank-2 CP decomposition.

use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Shape of the index-sum tensor
pub const INDEX_SUM_SHAPE: [usize; 3] = [2, 2, 2];

/// Number of CP components the binary extracts
pub const CP_RANK: usize = 2;

/// Element value at coordinates `(i, j, k)`: `i + j + k + 3`
#[inline]
pub fn index_sum(i: usize, j: usize, k: usize) -> f64 {
    (i + j + k + 3) as f64
}

/// Build the `F64` index-sum tensor of shape [`INDEX_SUM_SHAPE`]
pub fn build_index_sum_tensor<R: Runtime>(device: &R::Device) -> Tensor<R> {
    Tensor::from_fn(&INDEX_SUM_SHAPE, device, |idx| {
        index_sum(idx[0], idx[1], idx[2])
    })
}
