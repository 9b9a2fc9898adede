//! Tensor operations
//!
//! Operations are traits implemented by a runtime's client, which gives them
//! access to the device when creating output tensors.
//!
//! ```text
//! RuntimeClient<R>
//!   ├── BinaryOps   add, sub, mul, div (broadcasting)
//!   ├── UnaryOps    sqrt, abs
//!   ├── ReduceOps   sum
//!   ├── MatmulOps   matmul
//!   └── RandomOps   randn, randn_seeded
//! ```
//!
//! This is the subset of element-wise and linear algebra primitives the CP
//! decomposition is built from. The operation enums and shape helpers below
//! are shared between the trait definitions and the CPU kernels.

#[cfg(feature = "cpu")]
mod cpu;
pub mod traits;

pub use traits::{BinaryOps, MatmulOps, RandomOps, ReduceOps, UnaryOps};

/// Binary element-wise operation kind
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    /// a + b
    Add,
    /// a - b
    Sub,
    /// a * b
    Mul,
    /// a / b
    Div,
}

/// Unary element-wise operation kind
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    /// |a|
    Abs,
    /// sqrt(a)
    Sqrt,
}

/// Output shape of a reduction over `dims`
///
/// With `keepdim` the reduced dimensions stay as size 1, otherwise they are
/// removed.
pub fn reduce_output_shape(input_shape: &[usize], dims: &[usize], keepdim: bool) -> Vec<usize> {
    input_shape
        .iter()
        .enumerate()
        .filter_map(|(i, &s)| match (dims.contains(&i), keepdim) {
            (false, _) => Some(s),
            (true, true) => Some(1),
            (true, false) => None,
        })
        .collect()
}

/// Validate a 2-D matmul and return `(m, k, n)`
///
/// Returns `None` unless `a` is `[m, k]` and `b` is `[k, n]`.
pub fn validate_matmul_shapes(a_shape: &[usize], b_shape: &[usize]) -> Option<(usize, usize, usize)> {
    match (a_shape, b_shape) {
        (&[m, k], &[k2, n]) if k == k2 => Some((m, k, n)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_output_shape() {
        assert_eq!(reduce_output_shape(&[2, 3, 4], &[1], false), vec![2, 4]);
        assert_eq!(reduce_output_shape(&[2, 3, 4], &[0, 2], true), vec![1, 3, 1]);
        assert_eq!(reduce_output_shape(&[5], &[0], false), Vec::<usize>::new());
    }

    #[test]
    fn test_validate_matmul_shapes() {
        assert_eq!(validate_matmul_shapes(&[2, 3], &[3, 4]), Some((2, 3, 4)));
        assert_eq!(validate_matmul_shapes(&[2, 3], &[2, 4]), None);
        assert_eq!(validate_matmul_shapes(&[2, 3, 4], &[4, 1]), None);
    }
}
