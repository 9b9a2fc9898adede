//! Unary operations trait.

use crate::error::Result;
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Element-wise unary operations on tensors.
pub trait UnaryOps<R: Runtime> {
    /// Absolute value: |a|
    fn abs(&self, a: &Tensor<R>) -> Result<Tensor<R>>;

    /// Square root: sqrt(a)
    ///
    /// Float dtypes only.
    fn sqrt(&self, a: &Tensor<R>) -> Result<Tensor<R>>;
}
