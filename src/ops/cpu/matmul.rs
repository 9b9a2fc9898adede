//! CPU implementation of matrix multiplication.

use crate::error::Result;
use crate::ops::MatmulOps;
use crate::runtime::cpu::{CpuClient, CpuRuntime, helpers::matmul_impl};
use crate::tensor::Tensor;

impl MatmulOps<CpuRuntime> for CpuClient {
    fn matmul(&self, a: &Tensor<CpuRuntime>, b: &Tensor<CpuRuntime>) -> Result<Tensor<CpuRuntime>> {
        matmul_impl(self, a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Runtime;
    use crate::runtime::cpu::CpuDevice;

    #[test]
    fn test_gram_via_transpose() {
        let device = CpuDevice::new();
        let client = CpuRuntime::default_client(&device);
        let a = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0], &[3, 2], &device);
        let gram = client.matmul(&a.t().unwrap(), &a).unwrap();
        assert_eq!(gram.shape(), &[2, 2]);
        assert_eq!(gram.to_vec::<f64>(), vec![35.0, 44.0, 44.0, 56.0]);
    }

    #[test]
    fn test_inner_dimension_mismatch() {
        let device = CpuDevice::new();
        let client = CpuRuntime::default_client(&device);
        let a = Tensor::<CpuRuntime>::zeros(&[2, 3], crate::dtype::DType::F64, &device);
        assert!(client.matmul(&a, &a).is_err());
    }
}
