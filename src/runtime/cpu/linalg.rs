//! CPU implementation of linear algebra and tensor decomposition algorithms
//!
//! Dense kernels (LU solve, one-sided Jacobi SVD, Khatri-Rao) are written
//! here for the CPU; the tensor decompositions forward to the generic code in
//! [`crate::algorithm::linalg::tensor_decompose_core`].

mod matrix_ops;
mod solvers;
mod svd;
mod tensor_decompose;

use super::{CpuClient, CpuRuntime};
use crate::algorithm::linalg::{
    LinearAlgebraAlgorithms, SvdDecomposition, validate_linalg_dtype, validate_matrix_2d,
};
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::tensor::Tensor;

impl LinearAlgebraAlgorithms<CpuRuntime> for CpuClient {
    fn solve(&self, a: &Tensor<CpuRuntime>, b: &Tensor<CpuRuntime>) -> Result<Tensor<CpuRuntime>> {
        solvers::solve_impl(self, a, b)
    }

    fn khatri_rao(
        &self,
        a: &Tensor<CpuRuntime>,
        b: &Tensor<CpuRuntime>,
    ) -> Result<Tensor<CpuRuntime>> {
        matrix_ops::khatri_rao_impl(self, a, b)
    }

    fn svd_decompose(&self, a: &Tensor<CpuRuntime>) -> Result<SvdDecomposition<CpuRuntime>> {
        validate_linalg_dtype(a.dtype())?;
        let (m, n) = validate_matrix_2d(a.shape())?;

        match a.dtype() {
            DType::F32 => svd::svd_decompose_impl::<f32>(self, a, m, n),
            DType::F64 => svd::svd_decompose_impl::<f64>(self, a, m, n),
            _ => Err(Error::UnsupportedDType {
                dtype: a.dtype(),
                op: "svd_decompose",
            }),
        }
    }
}
