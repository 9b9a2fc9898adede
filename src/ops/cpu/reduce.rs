//! CPU implementation of reductions.

use crate::error::Result;
use crate::ops::ReduceOps;
use crate::runtime::cpu::{CpuClient, CpuRuntime, helpers::sum_impl};
use crate::tensor::Tensor;

impl ReduceOps<CpuRuntime> for CpuClient {
    fn sum(
        &self,
        a: &Tensor<CpuRuntime>,
        dims: &[usize],
        keepdim: bool,
    ) -> Result<Tensor<CpuRuntime>> {
        sum_impl(self, a, dims, keepdim)
    }
}
