//! CPU implementation of random operations.

use crate::dtype::DType;
use crate::error::Result;
use crate::ops::RandomOps;
use crate::runtime::cpu::{CpuClient, CpuRuntime, helpers::randn_impl};
use crate::tensor::Tensor;

impl RandomOps<CpuRuntime> for CpuClient {
    fn randn(&self, shape: &[usize], dtype: DType) -> Result<Tensor<CpuRuntime>> {
        randn_impl(self, shape, dtype, None, "randn")
    }

    fn randn_seeded(&self, shape: &[usize], dtype: DType, seed: u64) -> Result<Tensor<CpuRuntime>> {
        randn_impl(self, shape, dtype, Some(seed), "randn_seeded")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Runtime;
    use crate::runtime::cpu::CpuDevice;

    #[test]
    fn test_randn_seeded_reproducible() {
        let device = CpuDevice::new();
        let client = CpuRuntime::default_client(&device);
        let a = client.randn_seeded(&[3, 2], DType::F64, 42).unwrap();
        let b = client.randn_seeded(&[3, 2], DType::F64, 42).unwrap();
        let c = client.randn_seeded(&[3, 2], DType::F64, 43).unwrap();
        assert_eq!(a.shape(), &[3, 2]);
        assert_eq!(a.to_vec::<f64>(), b.to_vec::<f64>());
        assert_ne!(a.to_vec::<f64>(), c.to_vec::<f64>());
    }

    #[test]
    fn test_randn_rejects_integer_dtype() {
        let device = CpuDevice::new();
        let client = CpuRuntime::default_client(&device);
        assert!(client.randn(&[4], DType::I64).is_err());
        assert_eq!(client.randn(&[4], DType::F32).unwrap().numel(), 4);
    }
}
