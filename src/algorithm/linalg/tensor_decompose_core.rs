//! Tensor decomposition algorithms (generic)
//!
//! Shared implementations of the [`TensorDecomposeAlgorithms`] methods.
//! Backends forward to these functions so that every backend runs the same
//! sequence of operations and produces the same numbers.
//!
//! # Algorithm Overview
//!
//! - **Unfold/Fold**: Tensor matricization and tensorization
//! - **CP/PARAFAC (ALS)**: Alternating least squares for CP decomposition
//! - **CP reconstruction**: Weighted sum of rank-one outer products
//!
//! [`TensorDecomposeAlgorithms`]: super::TensorDecomposeAlgorithms

use super::LinearAlgebraAlgorithms;
use super::decompositions::{CpDecomposition, CpInit, CpOptions};
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::ops::{BinaryOps, MatmulOps, RandomOps, ReduceOps, UnaryOps};
use crate::runtime::Runtime;
use crate::tensor::Tensor;
use tracing::{debug, info};

// ============================================================================
// Validation Helpers
// ============================================================================

fn validate_tensor_nd(shape: &[usize]) -> Result<()> {
    if shape.len() < 2 {
        return Err(Error::invalid_argument(
            "tensor",
            format!(
                "tensor decomposition requires at least 2 dimensions, got shape {:?}",
                shape
            ),
        ));
    }
    Ok(())
}

fn validate_mode(mode: usize, ndim: usize) -> Result<()> {
    if mode >= ndim {
        return Err(Error::InvalidDimension {
            dim: mode as isize,
            ndim,
        });
    }
    Ok(())
}

fn validate_decompose_dtype(dtype: DType) -> Result<()> {
    if dtype.is_float() {
        Ok(())
    } else {
        Err(Error::UnsupportedDType {
            dtype,
            op: "tensor_decompose",
        })
    }
}

fn validate_cp_options(rank: usize, options: &CpOptions) -> Result<()> {
    if rank == 0 {
        return Err(Error::invalid_argument("rank", "CP rank must be positive"));
    }
    if options.max_iter == 0 {
        return Err(Error::invalid_argument(
            "max_iter",
            "at least one ALS sweep is required",
        ));
    }
    if !options.tolerance.is_finite() || options.tolerance < 0.0 {
        return Err(Error::invalid_argument(
            "tolerance",
            format!("must be finite and non-negative, got {}", options.tolerance),
        ));
    }
    Ok(())
}

// ============================================================================
// Mode-n Unfolding (Matricization)
// ============================================================================

/// Permutation that brings `mode` to the front: `[mode, 0, .., mode-1, mode+1, ..]`
fn unfold_permutation(mode: usize, ndim: usize) -> Vec<usize> {
    std::iter::once(mode)
        .chain((0..ndim).filter(|&i| i != mode))
        .collect()
}

/// Product of every dimension except `mode`
fn other_modes_size(shape: &[usize], mode: usize) -> usize {
    shape
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != mode)
        .map(|(_, &d)| d)
        .product()
}

/// Mode-n unfolding: `[I₀, ..., Iₙ₋₁]` to `[I_mode, ∏ⱼ≠mode Iⱼ]`
pub fn unfold_impl<R: Runtime>(tensor: &Tensor<R>, mode: usize) -> Result<Tensor<R>> {
    let shape = tensor.shape();
    validate_tensor_nd(shape)?;
    validate_mode(mode, shape.len())?;

    let rows = shape[mode];
    let cols = other_modes_size(shape, mode);

    // The permuted view is strided; reshape copies it into row-major order
    tensor
        .permute(&unfold_permutation(mode, shape.len()))?
        .reshape(&[rows, cols])
}

/// Mode-n folding, the inverse of [`unfold_impl`]
pub fn fold_impl<R: Runtime>(matrix: &Tensor<R>, mode: usize, shape: &[usize]) -> Result<Tensor<R>> {
    let ndim = shape.len();
    validate_tensor_nd(shape)?;
    validate_mode(mode, ndim)?;

    let expected = [shape[mode], other_modes_size(shape, mode)];
    if matrix.shape() != expected {
        return Err(Error::shape_mismatch(&expected, matrix.shape()));
    }

    let perm = unfold_permutation(mode, ndim);
    let permuted_shape: Vec<usize> = perm.iter().map(|&i| shape[i]).collect();

    let mut inv_perm = vec![0; ndim];
    for (i, &p) in perm.iter().enumerate() {
        inv_perm[p] = i;
    }

    Ok(matrix
        .reshape(&permuted_shape)?
        .permute(&inv_perm)?
        .contiguous())
}

// ============================================================================
// CP Building Blocks
// ============================================================================

/// Khatri-Rao product of every factor except `skip_mode`
///
/// Built from the highest mode down as `A_lo ⊙ (... ⊙ A_hi)`, so the lowest
/// remaining mode varies slowest, the same column order as the unfolding.
fn compute_khatri_rao_except<R, C>(
    client: &C,
    factors: &[Tensor<R>],
    skip_mode: usize,
) -> Result<Tensor<R>>
where
    R: Runtime,
    C: LinearAlgebraAlgorithms<R>,
{
    let mut result: Option<Tensor<R>> = None;
    for mode in (0..factors.len()).rev().filter(|&m| m != skip_mode) {
        result = Some(match result {
            None => factors[mode].clone(),
            Some(acc) => client.khatri_rao(&factors[mode], &acc)?,
        });
    }
    result.ok_or_else(|| Error::Internal("Khatri-Rao product needs at least one factor".into()))
}

/// Hadamard product of the Gram matrices `AⱼᵀAⱼ` for every `j != skip_mode`
fn compute_gram_hadamard_except<R, C>(
    client: &C,
    factors: &[Tensor<R>],
    skip_mode: usize,
    rank: usize,
) -> Result<Tensor<R>>
where
    R: Runtime,
    C: MatmulOps<R> + BinaryOps<R>,
{
    let first = &factors[0];
    let mut result = Tensor::<R>::ones(&[rank, rank], first.dtype(), first.device());
    for (mode, factor) in factors.iter().enumerate() {
        if mode == skip_mode {
            continue;
        }
        let gram = client.matmul(&factor.t()?, factor)?;
        result = client.mul(&result, &gram)?;
    }
    Ok(result)
}

/// Euclidean norm of every column, shape `[cols]`
fn compute_factor_norms<R, C>(client: &C, factor: &Tensor<R>) -> Result<Tensor<R>>
where
    R: Runtime,
    C: ReduceOps<R> + BinaryOps<R> + UnaryOps<R>,
{
    let sq = client.mul(factor, factor)?;
    let sum = client.sum(&sq, &[0], false)?;
    client.sqrt(&sum)
}

/// Scale columns to unit norm, returning `(normalized, norms)`
///
/// Zero columns are left as they are and report a norm of 0.
fn normalize_factor_columns<R, C>(client: &C, factor: &Tensor<R>) -> Result<(Tensor<R>, Tensor<R>)>
where
    R: Runtime,
    C: ReduceOps<R> + BinaryOps<R> + UnaryOps<R>,
{
    let norms = compute_factor_norms(client, factor)?;
    let divisors: Vec<f64> = norms
        .to_f64_vec()
        .into_iter()
        .map(|n| if n == 0.0 { 1.0 } else { n })
        .collect();
    let divisors =
        Tensor::<R>::from_f64_slice(&divisors, &[1, divisors.len()], factor.dtype(), factor.device())?;
    let normalized = client.div(factor, &divisors)?;
    Ok((normalized, norms))
}

/// Frobenius norm `sqrt(Σ t²)` as a host scalar
fn frobenius_norm<R, C>(client: &C, tensor: &Tensor<R>) -> Result<f64>
where
    R: Runtime,
    C: ReduceOps<R> + BinaryOps<R>,
{
    let sq = client.mul(tensor, tensor)?;
    let total = client.sum(&sq, &[], false)?;
    Ok(total.get(&[])?.sqrt())
}

/// `T₍₀₎ = (A₀ · diag(λ)) @ (Aₙ₋₁ ⊙ ... ⊙ A₁)ᵀ`, folded back to `shape`
fn reconstruct_from_factors<R, C>(
    client: &C,
    weights: &Tensor<R>,
    factors: &[Tensor<R>],
    shape: &[usize],
) -> Result<Tensor<R>>
where
    R: Runtime,
    C: LinearAlgebraAlgorithms<R> + MatmulOps<R> + BinaryOps<R>,
{
    let kr = compute_khatri_rao_except(client, factors, 0)?;
    let a0_scaled = client.mul(&factors[0], &weights.unsqueeze(0)?)?;
    let t_unfolded = client.matmul(&a0_scaled, &kr.t()?)?;
    fold_impl(&t_unfolded, 0, shape)
}

/// Standard-normal `[rows, cols]` block; seeded per mode when a seed is given
fn random_block<R, C>(
    client: &C,
    rows: usize,
    cols: usize,
    dtype: DType,
    seed: Option<u64>,
    mode: usize,
) -> Result<Tensor<R>>
where
    R: Runtime,
    C: RandomOps<R>,
{
    match seed {
        Some(s) => client.randn_seeded(&[rows, cols], dtype, s.wrapping_add(mode as u64)),
        None => client.randn(&[rows, cols], dtype),
    }
}

/// Leading left singular vectors of the mode-n unfolding
///
/// Each column is sign-fixed so its largest-magnitude entry is positive,
/// which makes the result independent of the SVD's sign choices. Columns
/// beyond the number of singular vectors are filled with normal samples.
fn svd_factor<R, C>(
    client: &C,
    unfolded: &Tensor<R>,
    rank: usize,
    seed: Option<u64>,
    mode: usize,
) -> Result<Tensor<R>>
where
    R: Runtime,
    C: LinearAlgebraAlgorithms<R> + RandomOps<R>,
{
    let rows = unfolded.shape()[0];
    let dtype = unfolded.dtype();
    let svd = client.svd_decompose(unfolded)?;
    let available = svd.u.shape()[1].min(rank);

    let u = svd.u.narrow(1, 0, available)?.to_f64_vec();
    let padding = if available < rank {
        random_block(client, rows, rank - available, dtype, seed, mode)?.to_f64_vec()
    } else {
        Vec::new()
    };

    let mut values = vec![0.0; rows * rank];
    for r in 0..available {
        let column: Vec<f64> = (0..rows).map(|i| u[i * available + r]).collect();
        let pivot = column
            .iter()
            .copied()
            .fold(0.0f64, |best, v| if v.abs() > best.abs() { v } else { best });
        let sign = if pivot < 0.0 { -1.0 } else { 1.0 };
        for (i, v) in column.into_iter().enumerate() {
            values[i * rank + r] = sign * v;
        }
    }
    let extra = rank - available;
    for i in 0..rows {
        for c in 0..extra {
            values[i * rank + available + c] = padding[i * extra + c];
        }
    }

    Tensor::<R>::from_f64_slice(&values, &[rows, rank], dtype, unfolded.device())
}

fn initialize_cp_factors<R, C>(
    client: &C,
    tensor: &Tensor<R>,
    unfoldings: &[Tensor<R>],
    rank: usize,
    options: &CpOptions,
) -> Result<Vec<Tensor<R>>>
where
    R: Runtime,
    C: LinearAlgebraAlgorithms<R> + RandomOps<R>,
{
    let dtype = tensor.dtype();
    match options.init {
        CpInit::Random => tensor
            .shape()
            .iter()
            .enumerate()
            .map(|(mode, &dim)| random_block(client, dim, rank, dtype, options.seed, mode))
            .collect(),
        CpInit::Svd => unfoldings
            .iter()
            .enumerate()
            .map(|(mode, unfolded)| svd_factor(client, unfolded, rank, options.seed, mode))
            .collect(),
    }
}

// ============================================================================
// CP/PARAFAC Decomposition (ALS)
// ============================================================================

/// CP/PARAFAC decomposition via Alternating Least Squares
///
/// Each sweep updates every factor in mode order by solving the normal
/// equations `Aₙ · G = T₍ₙ₎ · KR` with `G = ⊛ⱼ≠ₙ AⱼᵀAⱼ` (solved as
/// `Gᵀ Aₙᵀ = (T₍ₙ₎ · KR)ᵀ`). After the sweep the relative reconstruction
/// error is measured; iteration stops when it changes by less than
/// `options.tolerance` (checked from the second sweep on) or after
/// `options.max_iter` sweeps.
pub fn cp_decompose_impl<R, C>(
    client: &C,
    tensor: &Tensor<R>,
    rank: usize,
    options: &CpOptions,
) -> Result<CpDecomposition<R>>
where
    R: Runtime,
    C: LinearAlgebraAlgorithms<R>
        + MatmulOps<R>
        + ReduceOps<R>
        + BinaryOps<R>
        + UnaryOps<R>
        + RandomOps<R>,
{
    let shape = tensor.shape().to_vec();
    validate_tensor_nd(&shape)?;
    validate_decompose_dtype(tensor.dtype())?;
    validate_cp_options(rank, options)?;

    let ndim = shape.len();
    let dtype = tensor.dtype();
    let device = tensor.device();

    let unfoldings = (0..ndim)
        .map(|mode| unfold_impl(tensor, mode))
        .collect::<Result<Vec<_>>>()?;

    let norm = frobenius_norm(client, tensor)?;
    // An all-zero tensor has no relative scale; report the absolute error
    let scale = if norm > 0.0 { norm } else { 1.0 };

    let mut factors = initialize_cp_factors(client, tensor, &unfoldings, rank, options)?;
    let ones = Tensor::<R>::ones(&[rank], dtype, device);

    let mut error = f64::INFINITY;
    let mut previous: Option<f64> = None;
    let mut iterations = 0;
    let mut converged = false;

    for iteration in 1..=options.max_iter {
        for mode in 0..ndim {
            let kr = compute_khatri_rao_except(client, &factors, mode)?;
            let gram = compute_gram_hadamard_except(client, &factors, mode, rank)?;
            let rhs = client.matmul(&unfoldings[mode], &kr)?;
            let solved = client.solve(&gram.t()?, &rhs.t()?)?;
            factors[mode] = solved.t()?.contiguous();
        }

        let reconstruction = reconstruct_from_factors(client, &ones, &factors, &shape)?;
        let residual = client.sub(tensor, &reconstruction)?;
        error = frobenius_norm(client, &residual)? / scale;
        iterations = iteration;

        debug!(iteration, error, "cp-als sweep");

        // The first sweep has no previous error to compare against
        if let Some(prev) = previous {
            if (prev - error).abs() < options.tolerance {
                converged = true;
                break;
            }
        }
        previous = Some(error);
    }

    info!(
        rank,
        iterations,
        converged,
        error,
        "cp-als finished"
    );

    let weights = if options.normalize {
        let mut weights = ones;
        for factor in factors.iter_mut() {
            let (normalized, norms) = normalize_factor_columns(client, factor)?;
            *factor = normalized;
            weights = client.mul(&weights, &norms)?;
        }
        weights
    } else {
        ones
    };

    Ok(CpDecomposition {
        weights,
        factors,
        iterations,
        reconstruction_error: error,
    })
}

/// Reconstruct the full tensor from a CP decomposition
pub fn cp_reconstruct_impl<R, C>(
    client: &C,
    decomp: &CpDecomposition<R>,
    shape: &[usize],
) -> Result<Tensor<R>>
where
    R: Runtime,
    C: LinearAlgebraAlgorithms<R> + MatmulOps<R> + BinaryOps<R>,
{
    validate_tensor_nd(shape)?;
    if decomp.factors.len() != shape.len() {
        return Err(Error::invalid_argument(
            "shape",
            format!(
                "{} dimensions given for a decomposition with {} factors",
                shape.len(),
                decomp.factors.len()
            ),
        ));
    }
    let rank = decomp.rank();
    for (mode, factor) in decomp.factors.iter().enumerate() {
        if factor.shape() != [shape[mode], rank] {
            return Err(Error::shape_mismatch(&[shape[mode], rank], factor.shape()));
        }
    }

    reconstruct_from_factors(client, &decomp.weights, &decomp.factors, shape)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unfold_permutation() {
        assert_eq!(unfold_permutation(0, 3), vec![0, 1, 2]);
        assert_eq!(unfold_permutation(1, 3), vec![1, 0, 2]);
        assert_eq!(unfold_permutation(2, 3), vec![2, 0, 1]);
        assert_eq!(unfold_permutation(1, 4), vec![1, 0, 2, 3]);
    }

    #[test]
    fn test_other_modes_size() {
        assert_eq!(other_modes_size(&[2, 3, 4], 0), 12);
        assert_eq!(other_modes_size(&[2, 3, 4], 2), 6);
    }

    #[test]
    fn test_validate_cp_options() {
        let opts = CpOptions::default();
        assert!(validate_cp_options(2, &opts).is_ok());
        assert!(validate_cp_options(0, &opts).is_err());
        assert!(validate_cp_options(2, &opts.clone().with_max_iter(0)).is_err());
        assert!(validate_cp_options(2, &opts.clone().with_tolerance(-1.0)).is_err());
        assert!(validate_cp_options(2, &opts.with_tolerance(f64::NAN)).is_err());
    }
}
