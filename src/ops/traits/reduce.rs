//! Reduction operations trait.

use crate::error::Result;
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Reductions over tensor dimensions.
pub trait ReduceOps<R: Runtime> {
    /// Sum over `dims`
    ///
    /// An empty `dims` reduces over every dimension. With `keepdim` the
    /// reduced dimensions are kept with size 1.
    ///
    /// # Errors
    ///
    /// `InvalidDimension` if any entry of `dims` is out of range.
    fn sum(&self, a: &Tensor<R>, dims: &[usize], keepdim: bool) -> Result<Tensor<R>>;
}
