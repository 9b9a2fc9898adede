//! Helper functions for CPU tensor operations
//!
//! Shared by the operation trait implementations in `crate::ops::cpu`: they
//! validate inputs, resolve layouts and call the typed kernels.

use super::{CpuClient, CpuRuntime, kernels};
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::ops::{BinaryOp, UnaryOp, reduce_output_shape, validate_matmul_shapes};
use crate::tensor::{Tensor, broadcast_shapes, strided_offsets};

// ============================================================================
// DType Dispatch Macro
// ============================================================================

/// Macro for dtype dispatch to typed kernel calls
///
/// Matches on `dtype` and runs the block with `$T` aliased to the element
/// type. Usage: `dispatch_dtype!(dtype, T => { code using T })`.
macro_rules! dispatch_dtype {
    ($dtype:expr, $T:ident => $body:block) => {
        match $dtype {
            $crate::dtype::DType::F64 => {
                type $T = f64;
                $body
            }
            $crate::dtype::DType::F32 => {
                type $T = f32;
                $body
            }
            $crate::dtype::DType::I64 => {
                type $T = i64;
                $body
            }
        }
    };
}

pub(crate) use dispatch_dtype;

/// Both operands must share a dtype; returns it
pub fn validate_binary_dtypes(a: &Tensor<CpuRuntime>, b: &Tensor<CpuRuntime>) -> Result<DType> {
    if a.dtype() != b.dtype() {
        return Err(Error::DTypeMismatch {
            lhs: a.dtype(),
            rhs: b.dtype(),
        });
    }
    Ok(a.dtype())
}

/// Reject non-float inputs for operations that only make sense on floats
pub fn ensure_float(dtype: DType, op: &'static str) -> Result<()> {
    if dtype.is_float() {
        Ok(())
    } else {
        Err(Error::unsupported_dtype(dtype, op))
    }
}

/// Helper for binary operations (add, sub, mul, div)
pub fn binary_op_impl(
    client: &CpuClient,
    op: BinaryOp,
    a: &Tensor<CpuRuntime>,
    b: &Tensor<CpuRuntime>,
) -> Result<Tensor<CpuRuntime>> {
    let dtype = validate_binary_dtypes(a, b)?;
    let out_shape =
        broadcast_shapes(a.shape(), b.shape()).ok_or_else(|| Error::broadcast(a.shape(), b.shape()))?;

    let same_shapes = a.shape() == b.shape();
    let both_contiguous = a.is_contiguous() && b.is_contiguous();

    dispatch_dtype!(dtype, T => {
        let a_data = a.storage().typed::<T>();
        let b_data = b.storage().typed::<T>();

        let out: Vec<T> = if same_shapes && both_contiguous {
            // Fast path: no broadcasting, no strides
            let mut out = vec![T::zero(); a.numel()];
            kernels::binary_op_kernel(op, &a_data[..a.numel()], &b_data[..b.numel()], &mut out);
            out
        } else {
            // Broadcast views have stride 0 on expanded dimensions
            let a_offsets = strided_offsets(a.broadcast_to(&out_shape)?.layout());
            let b_offsets = strided_offsets(b.broadcast_to(&out_shape)?.layout());
            kernels::binary_op_gather_kernel(op, a_data, b_data, &a_offsets, &b_offsets)
        };

        Tensor::try_from_slice(&out, &out_shape, &client.device)
    })
}

/// Helper for unary element-wise operations
pub fn unary_op_impl(
    client: &CpuClient,
    op: UnaryOp,
    a: &Tensor<CpuRuntime>,
) -> Result<Tensor<CpuRuntime>> {
    let a = a.contiguous();
    dispatch_dtype!(a.dtype(), T => {
        let src = &a.storage().typed::<T>()[..a.numel()];
        let mut out = vec![T::zero(); src.len()];
        kernels::unary_op_kernel(op, src, &mut out);
        Tensor::try_from_slice(&out, a.shape(), &client.device)
    })
}

/// Sum over a set of dimensions
///
/// Reduces one dimension at a time, highest index first, so each step is a
/// single `[outer, reduce, inner]` pass over contiguous data.
pub fn sum_impl(
    client: &CpuClient,
    a: &Tensor<CpuRuntime>,
    dims: &[usize],
    keepdim: bool,
) -> Result<Tensor<CpuRuntime>> {
    let ndim = a.ndim();
    let mut dims: Vec<usize> = if dims.is_empty() {
        (0..ndim).collect()
    } else {
        dims.to_vec()
    };
    if let Some(&bad) = dims.iter().find(|&&d| d >= ndim) {
        return Err(Error::InvalidDimension {
            dim: bad as isize,
            ndim,
        });
    }
    dims.sort_unstable();
    dims.dedup();

    let mut current = a.contiguous();
    for &dim in dims.iter().rev() {
        let shape = current.shape().to_vec();
        let outer: usize = shape[..dim].iter().product();
        let inner: usize = shape[dim + 1..].iter().product();
        let reduce = shape[dim];
        let mut out_shape = shape.clone();
        out_shape[dim] = 1;

        current = dispatch_dtype!(current.dtype(), T => {
            let src = &current.storage().typed::<T>()[..current.numel()];
            let mut out = vec![T::zero(); outer * inner];
            kernels::sum_kernel(src, &mut out, outer, reduce, inner);
            Tensor::try_from_slice(&out, &out_shape, &client.device)?
        });
    }

    let final_shape = reduce_output_shape(a.shape(), &dims, keepdim);
    current.reshape(&final_shape)
}

/// Helper for 2-D matrix multiplication
pub fn matmul_impl(
    client: &CpuClient,
    a: &Tensor<CpuRuntime>,
    b: &Tensor<CpuRuntime>,
) -> Result<Tensor<CpuRuntime>> {
    let dtype = validate_binary_dtypes(a, b)?;
    let (m, k, n) = validate_matmul_shapes(a.shape(), b.shape()).ok_or_else(|| {
        Error::invalid_argument(
            "b",
            format!(
                "matmul expects [m, k] @ [k, n], got {:?} @ {:?}",
                a.shape(),
                b.shape()
            ),
        )
    })?;

    let a = a.contiguous();
    let b = b.contiguous();

    dispatch_dtype!(dtype, T => {
        let a_data = &a.storage().typed::<T>()[..m * k];
        let b_data = &b.storage().typed::<T>()[..k * n];
        let mut out = vec![T::zero(); m * n];
        kernels::matmul_kernel(a_data, b_data, &mut out, m, k, n);
        Tensor::try_from_slice(&out, &[m, n], &client.device)
    })
}

/// Helper for standard-normal sampling
pub fn randn_impl(
    client: &CpuClient,
    shape: &[usize],
    dtype: DType,
    seed: Option<u64>,
    op_name: &'static str,
) -> Result<Tensor<CpuRuntime>> {
    ensure_float(dtype, op_name)?;
    let numel: usize = shape.iter().product();

    dispatch_dtype!(dtype, T => {
        let mut out = vec![T::zero(); numel];
        kernels::rand_normal_kernel(&mut out, seed);
        Tensor::try_from_slice(&out, shape, &client.device)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Runtime;
    use crate::runtime::cpu::CpuDevice;

    #[test]
    fn test_binary_dispatch_every_dtype() {
        let device = CpuDevice::new();
        let client = CpuRuntime::default_client(&device);

        let a = Tensor::<CpuRuntime>::from_slice(&[6.0f64, 8.0], &[2], &device);
        let out = binary_op_impl(&client, BinaryOp::Div, &a, &a).unwrap();
        assert_eq!(out.to_vec::<f64>(), vec![1.0, 1.0]);

        let a = Tensor::<CpuRuntime>::from_slice(&[1.5f32, 2.5], &[2], &device);
        let out = binary_op_impl(&client, BinaryOp::Add, &a, &a).unwrap();
        assert_eq!(out.to_vec::<f32>(), vec![3.0, 5.0]);

        let a = Tensor::<CpuRuntime>::from_slice(&[3i64, -4], &[2], &device);
        let out = binary_op_impl(&client, BinaryOp::Mul, &a, &a).unwrap();
        assert_eq!(out.to_vec::<i64>(), vec![9, 16]);
    }

    #[test]
    fn test_unary_dispatch_every_dtype() {
        let device = CpuDevice::new();
        let client = CpuRuntime::default_client(&device);

        let a = Tensor::<CpuRuntime>::from_slice(&[-2i64, 5], &[2], &device);
        let out = unary_op_impl(&client, UnaryOp::Abs, &a).unwrap();
        assert_eq!(out.to_vec::<i64>(), vec![2, 5]);

        let a = Tensor::<CpuRuntime>::from_slice(&[16.0f32, 0.25], &[2], &device);
        let out = unary_op_impl(&client, UnaryOp::Sqrt, &a).unwrap();
        assert_eq!(out.to_vec::<f32>(), vec![4.0, 0.5]);
    }

    #[test]
    fn test_randn_rejects_integers_by_name() {
        let device = CpuDevice::new();
        let client = CpuRuntime::default_client(&device);
        assert!(matches!(
            randn_impl(&client, &[2], DType::I64, Some(1), "randn_seeded"),
            Err(Error::UnsupportedDType { op: "randn_seeded", .. })
        ));
    }
}
