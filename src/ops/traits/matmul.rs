//! Matrix multiplication trait.

use crate::error::Result;
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Matrix multiplication.
pub trait MatmulOps<R: Runtime> {
    /// Matrix product `a @ b` for `a: [m, k]` and `b: [k, n]`
    ///
    /// Inputs may be non-contiguous views (e.g. a transpose); the result is
    /// a contiguous `[m, n]` tensor.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` unless both inputs are 2-D with matching inner
    /// dimension, `DTypeMismatch` if dtypes differ.
    fn matmul(&self, a: &Tensor<R>, b: &Tensor<R>) -> Result<Tensor<R>>;
}
