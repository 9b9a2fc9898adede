//! Binary operations trait.

use crate::error::Result;
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Element-wise binary operations on tensors.
///
/// # Broadcasting
///
/// Binary operations follow NumPy-style broadcasting rules:
/// - Dimensions are compared from the trailing dimension backward
/// - Two dimensions are compatible when they are equal, or when one of them is 1
/// - The output has shape equal to the pairwise maximum of the input shapes
///
/// Both operands must have the same dtype.
///
/// # Example
///
/// ```
/// use cpals::prelude::*;
///
/// let device = CpuDevice::new();
/// let client = CpuRuntime::default_client(&device);
///
/// let a = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0, 3.0, 4.0], &[2, 2], &device);
/// let w = Tensor::<CpuRuntime>::from_slice(&[10.0f64, 100.0], &[2], &device);
///
/// let c = client.mul(&a, &w)?;
/// assert_eq!(c.to_vec::<f64>(), vec![10.0, 200.0, 30.0, 400.0]);
/// # Ok::<(), cpals::error::Error>(())
/// ```
pub trait BinaryOps<R: Runtime> {
    /// Element-wise addition: a + b
    fn add(&self, a: &Tensor<R>, b: &Tensor<R>) -> Result<Tensor<R>>;

    /// Element-wise subtraction: a - b
    fn sub(&self, a: &Tensor<R>, b: &Tensor<R>) -> Result<Tensor<R>>;

    /// Element-wise multiplication: a * b
    ///
    /// Used as the Hadamard product when combining Gram matrices.
    fn mul(&self, a: &Tensor<R>, b: &Tensor<R>) -> Result<Tensor<R>>;

    /// Element-wise division: a / b
    fn div(&self, a: &Tensor<R>, b: &Tensor<R>) -> Result<Tensor<R>>;
}
