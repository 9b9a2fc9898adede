//! Dense linear algebra algorithms

use super::super::decompositions::SvdDecomposition;
use crate::error::{Error, Result};
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Dense linear algebra algorithms
///
/// The CP-ALS update needs three of them: a linear solve for the normal
/// equations, the Khatri-Rao product that forms the design matrix, and an SVD
/// for initialization. Backends must implement them with the algorithms
/// documented here so results agree across backends.
pub trait LinearAlgebraAlgorithms<R: Runtime> {
    /// Solve the linear system `A X = B` using LU with partial pivoting
    ///
    /// # Arguments
    ///
    /// * `a` - Square coefficient matrix `[n, n]`
    /// * `b` - Right-hand side, vector `[n]` or matrix `[n, nrhs]`
    ///
    /// # Returns
    ///
    /// `X` with the same shape as `b`
    ///
    /// # Errors
    ///
    /// `SingularMatrix` when a pivot is negligible relative to the largest
    /// entry of `a`.
    fn solve(&self, a: &Tensor<R>, b: &Tensor<R>) -> Result<Tensor<R>> {
        let _ = (a, b);
        Err(Error::NotImplemented {
            feature: "LinearAlgebraAlgorithms::solve",
        })
    }

    /// Khatri-Rao product (column-wise Kronecker product): A ⊙ B
    ///
    /// For A of shape `[m, k]` and B of shape `[n, k]` the result has shape
    /// `[m*n, k]`:
    ///
    /// ```text
    /// (A ⊙ B)[i*n + j, r] = A[i, r] * B[j, r]
    /// ```
    ///
    /// so the row index of `A` varies slowest. It satisfies
    /// `(A ⊙ B)ᵀ(A ⊙ B) = (AᵀA) * (BᵀB)`, which is what makes the CP-ALS
    /// normal equations cheap to form.
    fn khatri_rao(&self, a: &Tensor<R>, b: &Tensor<R>) -> Result<Tensor<R>> {
        let _ = (a, b);
        Err(Error::NotImplemented {
            feature: "LinearAlgebraAlgorithms::khatri_rao",
        })
    }

    /// Thin Singular Value Decomposition: A = U @ diag(S) @ V^T
    ///
    /// One-sided Jacobi. For `A: [m, n]` and `k = min(m, n)`, returns
    /// `U: [m, k]`, `S: [k]` sorted descending, `V^T: [k, n]`.
    fn svd_decompose(&self, a: &Tensor<R>) -> Result<SvdDecomposition<R>> {
        let _ = a;
        Err(Error::NotImplemented {
            feature: "LinearAlgebraAlgorithms::svd_decompose",
        })
    }
}
