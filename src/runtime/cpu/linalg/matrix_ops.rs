//! Matrix products used by the decomposition algorithms

use super::super::helpers::dispatch_dtype;
use super::super::{CpuClient, CpuRuntime};
use crate::algorithm::linalg::{validate_linalg_dtype, validate_matrix_2d};
use crate::error::{Error, Result};
use crate::runtime::RuntimeClient;
use crate::tensor::Tensor;

/// Khatri-Rao product `(A ⊙ B)[i*n + j, r] = A[i, r] * B[j, r]`
pub fn khatri_rao_impl(
    client: &CpuClient,
    a: &Tensor<CpuRuntime>,
    b: &Tensor<CpuRuntime>,
) -> Result<Tensor<CpuRuntime>> {
    validate_linalg_dtype(a.dtype())?;
    if a.dtype() != b.dtype() {
        return Err(Error::DTypeMismatch {
            lhs: a.dtype(),
            rhs: b.dtype(),
        });
    }
    let (m, k) = validate_matrix_2d(a.shape())?;
    let (n, k_b) = validate_matrix_2d(b.shape())?;
    if k != k_b {
        return Err(Error::ShapeMismatch {
            expected: vec![n, k],
            got: vec![n, k_b],
        });
    }

    dispatch_dtype!(a.dtype(), T => {
        let a_data: Vec<T> = a.to_vec();
        let b_data: Vec<T> = b.to_vec();
        let mut out = Vec::with_capacity(m * n * k);
        for a_row in a_data.chunks_exact(k.max(1)).take(m) {
            for b_row in b_data.chunks_exact(k.max(1)).take(n) {
                out.extend(a_row.iter().zip(b_row).map(|(&x, &y)| x * y));
            }
        }
        Tensor::try_from_slice(&out, &[m * n, k], client.device())
    })
}
