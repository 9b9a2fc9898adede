//! Linear system solver (LU with partial pivoting)

use super::super::jacobi::LinalgElement;
use super::super::{CpuClient, CpuRuntime};
use crate::algorithm::linalg::{validate_linalg_dtype, validate_square_matrix};
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::runtime::RuntimeClient;
use crate::tensor::Tensor;

/// Solve `A X = B` for square `A`; `B` is `[n]` or `[n, nrhs]`
pub fn solve_impl(
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
    let n = validate_square_matrix(a.shape())?;

    let (b_rows, num_rhs) = match *b.shape() {
        [rows] => (rows, 1),
        [rows, cols] => (rows, cols),
        _ => {
            return Err(Error::invalid_argument(
                "b",
                format!("expected a vector or matrix, got shape {:?}", b.shape()),
            ));
        }
    };
    if b_rows != n {
        return Err(Error::ShapeMismatch {
            expected: vec![n],
            got: vec![b_rows],
        });
    }

    match a.dtype() {
        DType::F32 => solve_typed::<f32>(client, a, b, n, num_rhs),
        DType::F64 => solve_typed::<f64>(client, a, b, n, num_rhs),
        _ => Err(Error::UnsupportedDType {
            dtype: a.dtype(),
            op: "solve",
        }),
    }
}

fn solve_typed<T: LinalgElement>(
    client: &CpuClient,
    a: &Tensor<CpuRuntime>,
    b: &Tensor<CpuRuntime>,
    n: usize,
    num_rhs: usize,
) -> Result<Tensor<CpuRuntime>> {
    let mut lu: Vec<T> = a.to_vec();
    let mut x: Vec<T> = b.to_vec();

    lu_factor_in_place(&mut lu, &mut x, n, num_rhs)?;

    // Forward substitution with the unit lower factor: L y = P b
    for i in 0..n {
        for j in 0..i {
            let l_ij = lu[i * n + j];
            for r in 0..num_rhs {
                x[i * num_rhs + r] = x[i * num_rhs + r] - l_ij * x[j * num_rhs + r];
            }
        }
    }

    // Back substitution: U x = y
    for i in (0..n).rev() {
        for j in (i + 1)..n {
            let u_ij = lu[i * n + j];
            for r in 0..num_rhs {
                x[i * num_rhs + r] = x[i * num_rhs + r] - u_ij * x[j * num_rhs + r];
            }
        }
        let u_ii = lu[i * n + i];
        for r in 0..num_rhs {
            x[i * num_rhs + r] = x[i * num_rhs + r] / u_ii;
        }
    }

    Tensor::try_from_slice(&x, b.shape(), client.device())
}

/// Doolittle LU with partial pivoting, applying the row swaps to `rhs` too
///
/// On return `lu` holds `L` (unit diagonal, strictly below) and `U` (on and
/// above the diagonal). A pivot whose magnitude is at most
/// `n · ε · max|A|` is treated as zero.
fn lu_factor_in_place<T: LinalgElement>(
    lu: &mut [T],
    rhs: &mut [T],
    n: usize,
    num_rhs: usize,
) -> Result<()> {
    let scale = lu.iter().map(|v| v.abs_val().to_f64()).fold(0.0, f64::max);
    let threshold = n as f64 * T::epsilon_val() * scale;

    for k in 0..n {
        let (pivot_row, pivot_abs) = (k..n)
            .map(|i| (i, lu[i * n + k].abs_val().to_f64()))
            .fold((k, -1.0), |best, cur| if cur.1 > best.1 { cur } else { best });

        if scale == 0.0 || pivot_abs <= threshold {
            return Err(Error::SingularMatrix {
                op: "solve",
                column: k,
            });
        }

        if pivot_row != k {
            for j in 0..n {
                lu.swap(k * n + j, pivot_row * n + j);
            }
            for r in 0..num_rhs {
                rhs.swap(k * num_rhs + r, pivot_row * num_rhs + r);
            }
        }

        let pivot = lu[k * n + k];
        for i in (k + 1)..n {
            let factor = lu[i * n + k] / pivot;
            lu[i * n + k] = factor;
            for j in (k + 1)..n {
                lu[i * n + j] = lu[i * n + j] - factor * lu[k * n + j];
            }
        }
    }
    Ok(())
}
