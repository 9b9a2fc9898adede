//! Unary operations kernels

use crate::dtype::Element;
use crate::ops::UnaryOp;

/// Element-wise unary operation
///
/// Math functions go through f64 so the kernel stays generic over every
/// float width.
#[inline]
pub fn unary_op_kernel<T: Element>(op: UnaryOp, a: &[T], out: &mut [T]) {
    match op {
        UnaryOp::Abs => {
            for (o, &x) in out.iter_mut().zip(a) {
                *o = if x < T::zero() { T::zero() - x } else { x };
            }
        }
        UnaryOp::Sqrt => {
            for (o, &x) in out.iter_mut().zip(a) {
                *o = T::from_f64(x.to_f64().sqrt());
            }
        }
    }
}
