//! Thin SVD via one-sided Jacobi rotations

use super::super::jacobi::{
    JacobiRotation, LinalgElement, apply_rotation_to_columns, argsort_desc, compute_gram_elements,
    identity_matrix, normalize_columns, permute_columns,
};
use super::super::{CpuClient, CpuRuntime};
use crate::algorithm::linalg::SvdDecomposition;
use crate::error::Result;
use crate::runtime::RuntimeClient;
use crate::tensor::Tensor;

const MAX_SWEEPS: usize = 30;

/// Thin SVD `A = U diag(S) Vᵀ` of a row-major `[m, n]` matrix
///
/// Works on the taller of `A` and `Aᵀ`:
/// 1. `B = A`, `V = I`
/// 2. Sweep all column pairs `(p, q)`, rotating `B` and `V` until the
///    off-diagonal Gram mass drops below `n · ε`
/// 3. `S[j] = ‖B[:, j]‖`, `U[:, j] = B[:, j] / S[j]`
/// 4. Sort by descending `S` and keep the leading `min(m, n)` triplets
///
/// When `A` was transposed, the roles of `U` and `V` swap on the way out.
pub fn svd_decompose_impl<T: LinalgElement>(
    client: &CpuClient,
    a: &Tensor<CpuRuntime>,
    m: usize,
    n: usize,
) -> Result<SvdDecomposition<CpuRuntime>> {
    let device = client.device();
    let k = m.min(n);

    if k == 0 {
        return Ok(SvdDecomposition {
            u: Tensor::try_from_slice::<T>(&[], &[m, k], device)?,
            s: Tensor::try_from_slice::<T>(&[], &[k], device)?,
            vt: Tensor::try_from_slice::<T>(&[], &[k, n], device)?,
        });
    }

    let transpose = m < n;
    let (rows, cols) = if transpose { (n, m) } else { (m, n) };
    let mut b: Vec<T> = if transpose {
        a.t()?.to_vec()
    } else {
        a.to_vec()
    };
    let mut v: Vec<T> = identity_matrix(cols);

    let eps = T::epsilon_val();
    let tol = cols as f64 * eps;

    for _ in 0..MAX_SWEEPS {
        let mut off_diag = 0.0f64;

        for p in 0..cols {
            for q in (p + 1)..cols {
                let (a_pp, a_qq, a_pq) = compute_gram_elements(&b, cols, p, q);
                off_diag += a_pq * a_pq;

                if a_pq.abs() < tol * (a_pp * a_qq).sqrt() {
                    continue;
                }

                let rot = JacobiRotation::compute(a_pp, a_qq, a_pq);
                apply_rotation_to_columns(&mut b, cols, p, q, &rot);
                apply_rotation_to_columns(&mut v, cols, p, q, &rot);
            }
        }

        if off_diag.sqrt() < tol {
            break;
        }
    }

    let singular_values = normalize_columns(&mut b, cols, eps);
    let order = argsort_desc(&singular_values);
    let kept = &order[..k];

    let s: Vec<T> = kept.iter().map(|&j| singular_values[j]).collect();
    // [rows, k]
    let left = permute_columns(&b, cols, kept);
    // [cols, k]
    let right = permute_columns(&v, cols, kept);

    let left = Tensor::try_from_slice(&left, &[rows, k], device)?;
    let right = Tensor::try_from_slice(&right, &[cols, k], device)?;
    let s = Tensor::try_from_slice(&s, &[k], device)?;

    // A = L S Rᵀ, or Aᵀ = L S Rᵀ when transposed, so A = R S Lᵀ
    let (u, vt) = if transpose {
        (right, left.t()?.contiguous())
    } else {
        (left, right.t()?.contiguous())
    };

    Ok(SvdDecomposition { u, s, vt })
}
