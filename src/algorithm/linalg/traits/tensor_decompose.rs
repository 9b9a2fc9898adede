//! Tensor decomposition algorithms for higher-order tensors

use super::super::decompositions::{CpDecomposition, CpOptions};
use crate::error::{Error, Result};
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// CP/PARAFAC decomposition and the matricization operations it builds on
///
/// # Unfolding Convention
///
/// The mode-n unfolding of `T: [I₀, ..., Iₙ₋₁]` is the `[Iₙ, ∏ⱼ≠ₙ Iⱼ]`
/// matrix whose rows are the mode-n fibers. Columns enumerate the remaining
/// modes in increasing order with the last mode varying fastest, which
/// matches the Khatri-Rao ordering `A₀ ⊙ ... ⊙ Aₙ₋₁` (mode n skipped):
///
/// ```text
/// T₍ₙ₎ = Aₙ · diag(λ) · (⊙ⱼ≠ₙ Aⱼ)ᵀ
/// ```
pub trait TensorDecomposeAlgorithms<R: Runtime> {
    /// Mode-n unfolding (matricization) of a tensor with at least 2 dims
    ///
    /// # Example
    ///
    /// ```
    /// use cpals::prelude::*;
    ///
    /// let device = CpuDevice::new();
    /// let client = CpuRuntime::default_client(&device);
    /// let t = Tensor::<CpuRuntime>::from_fn(&[2, 3, 4], &device, |i| (i[0] + i[1] + i[2]) as f64);
    /// let unfolded = client.unfold(&t, 1)?;
    /// assert_eq!(unfolded.shape(), &[3, 8]);
    /// # Ok::<(), cpals::error::Error>(())
    /// ```
    fn unfold(&self, tensor: &Tensor<R>, mode: usize) -> Result<Tensor<R>> {
        let _ = (tensor, mode);
        Err(Error::NotImplemented {
            feature: "TensorDecomposeAlgorithms::unfold",
        })
    }

    /// Mode-n folding, the inverse of [`unfold`](Self::unfold)
    ///
    /// `matrix` must have shape `[shape[mode], ∏ⱼ≠mode shape[j]]`.
    fn fold(&self, matrix: &Tensor<R>, mode: usize, shape: &[usize]) -> Result<Tensor<R>> {
        let _ = (matrix, mode, shape);
        Err(Error::NotImplemented {
            feature: "TensorDecomposeAlgorithms::fold",
        })
    }

    /// CP/PARAFAC decomposition via Alternating Least Squares (ALS)
    ///
    /// # Algorithm
    ///
    /// 1. Initialize factor matrices via SVD of each unfolding or randomly
    /// 2. Repeat until the relative error stops changing or `max_iter`:
    ///    - For each mode `n`, with all other factors fixed:
    ///      `Aₙ = T₍ₙ₎ @ (⊙ⱼ≠ₙ Aⱼ) @ (⊛ⱼ≠ₙ AⱼᵀAⱼ)⁻¹`
    /// 3. Weights are ones, or the column norms when `options.normalize`
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for `rank == 0`, `max_iter == 0`, a negative or
    ///   non-finite tolerance, or a tensor with fewer than 2 dimensions
    /// - `UnsupportedDType` for non-float tensors
    /// - `SingularMatrix` if a normal-equation system cannot be solved
    fn cp_decompose(
        &self,
        tensor: &Tensor<R>,
        rank: usize,
        options: &CpOptions,
    ) -> Result<CpDecomposition<R>> {
        let _ = (tensor, rank, options);
        Err(Error::NotImplemented {
            feature: "TensorDecomposeAlgorithms::cp_decompose",
        })
    }

    /// Reconstruct the full tensor `Σᵣ λᵣ (a₀ʳ ⊗ ... ⊗ aₙ₋₁ʳ)` of `shape`
    fn cp_reconstruct(&self, decomp: &CpDecomposition<R>, shape: &[usize]) -> Result<Tensor<R>> {
        let _ = (decomp, shape);
        Err(Error::NotImplemented {
            feature: "TensorDecomposeAlgorithms::cp_reconstruct",
        })
    }
}
