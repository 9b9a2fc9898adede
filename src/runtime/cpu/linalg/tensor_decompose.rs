//! CPU implementation of tensor decomposition algorithms

use super::super::{CpuClient, CpuRuntime};
use crate::algorithm::linalg::tensor_decompose_core::{
    cp_decompose_impl, cp_reconstruct_impl, fold_impl, unfold_impl,
};
use crate::algorithm::linalg::{CpDecomposition, CpOptions, TensorDecomposeAlgorithms};
use crate::error::Result;
use crate::tensor::Tensor;

impl TensorDecomposeAlgorithms<CpuRuntime> for CpuClient {
    fn unfold(&self, tensor: &Tensor<CpuRuntime>, mode: usize) -> Result<Tensor<CpuRuntime>> {
        unfold_impl(tensor, mode)
    }

    fn fold(
        &self,
        matrix: &Tensor<CpuRuntime>,
        mode: usize,
        shape: &[usize],
    ) -> Result<Tensor<CpuRuntime>> {
        fold_impl(matrix, mode, shape)
    }

    fn cp_decompose(
        &self,
        tensor: &Tensor<CpuRuntime>,
        rank: usize,
        options: &CpOptions,
    ) -> Result<CpDecomposition<CpuRuntime>> {
        cp_decompose_impl(self, tensor, rank, options)
    }

    fn cp_reconstruct(
        &self,
        decomp: &CpDecomposition<CpuRuntime>,
        shape: &[usize],
    ) -> Result<Tensor<CpuRuntime>> {
        cp_reconstruct_impl(self, decomp, shape)
    }
}
