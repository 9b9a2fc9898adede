//! Random number generation operations.

use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Random tensor generation
pub trait RandomOps<R: Runtime> {
    /// Standard normal samples N(0, 1) from a fresh entropy-seeded generator
    ///
    /// `dtype` must be floating point.
    fn randn(&self, shape: &[usize], dtype: DType) -> Result<Tensor<R>> {
        let _ = (shape, dtype);
        Err(Error::NotImplemented {
            feature: "RandomOps::randn",
        })
    }

    /// Standard normal samples from a generator seeded with `seed`
    ///
    /// The same `(shape, dtype, seed)` always produces the same tensor.
    fn randn_seeded(&self, shape: &[usize], dtype: DType, seed: u64) -> Result<Tensor<R>> {
        let _ = (shape, dtype, seed);
        Err(Error::NotImplemented {
            feature: "RandomOps::randn_seeded",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::cpu::CpuRuntime;

    /// Backend without random number generation
    struct NoRng;

    impl RandomOps<CpuRuntime> for NoRng {}

    #[test]
    fn test_defaults_report_not_implemented() {
        assert!(matches!(
            NoRng.randn(&[2], DType::F64),
            Err(Error::NotImplemented { feature: "RandomOps::randn" })
        ));
        assert!(matches!(
            NoRng.randn_seeded(&[2], DType::F64, 1),
            Err(Error::NotImplemented { feature: "RandomOps::randn_seeded" })
        ));
    }
}
