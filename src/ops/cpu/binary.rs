//! CPU implementation of binary operations.

use crate::error::Result;
use crate::ops::{BinaryOp, BinaryOps};
use crate::runtime::cpu::{CpuClient, CpuRuntime, helpers::binary_op_impl};
use crate::tensor::Tensor;

impl BinaryOps<CpuRuntime> for CpuClient {
    fn add(&self, a: &Tensor<CpuRuntime>, b: &Tensor<CpuRuntime>) -> Result<Tensor<CpuRuntime>> {
        binary_op_impl(self, BinaryOp::Add, a, b)
    }

    fn sub(&self, a: &Tensor<CpuRuntime>, b: &Tensor<CpuRuntime>) -> Result<Tensor<CpuRuntime>> {
        binary_op_impl(self, BinaryOp::Sub, a, b)
    }

    fn mul(&self, a: &Tensor<CpuRuntime>, b: &Tensor<CpuRuntime>) -> Result<Tensor<CpuRuntime>> {
        binary_op_impl(self, BinaryOp::Mul, a, b)
    }

    fn div(&self, a: &Tensor<CpuRuntime>, b: &Tensor<CpuRuntime>) -> Result<Tensor<CpuRuntime>> {
        binary_op_impl(self, BinaryOp::Div, a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::runtime::Runtime;
    use crate::runtime::cpu::CpuDevice;

    #[test]
    fn test_broadcast_column_times_row() {
        let device = CpuDevice::new();
        let client = CpuRuntime::default_client(&device);
        let col = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0, 3.0], &[3, 1], &device);
        let row = Tensor::<CpuRuntime>::from_slice(&[10.0f64, 20.0], &[1, 2], &device);
        let out = client.mul(&col, &row).unwrap();
        assert_eq!(out.shape(), &[3, 2]);
        assert_eq!(out.to_vec::<f64>(), vec![10.0, 20.0, 20.0, 40.0, 30.0, 60.0]);
    }

    #[test]
    fn test_transposed_operand() {
        let device = CpuDevice::new();
        let client = CpuRuntime::default_client(&device);
        let a = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0, 4.0], &[2, 2], &device);
        let diff = client.sub(&a, &a.t().unwrap()).unwrap();
        assert_eq!(diff.to_vec::<f32>(), vec![0.0, -1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_dtype_and_shape_errors() {
        let device = CpuDevice::new();
        let client = CpuRuntime::default_client(&device);
        let a = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0, 3.0], &[3], &device);
        let b = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0], &[3], &device);
        let c = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0], &[2], &device);
        assert!(matches!(client.add(&a, &b), Err(Error::DTypeMismatch { .. })));
        assert!(matches!(client.add(&a, &c), Err(Error::BroadcastError { .. })));
    }
}
