//! Binary operations kernels

use crate::dtype::Element;
use crate::ops::BinaryOp;

#[inline(always)]
fn apply<T: Element>(op: BinaryOp, x: T, y: T) -> T {
    match op {
        BinaryOp::Add => x + y,
        BinaryOp::Sub => x - y,
        BinaryOp::Mul => x * y,
        BinaryOp::Div => x / y,
    }
}

/// Element-wise `out[i] = a[i] op b[i]` over equally sized slices
#[inline]
pub fn binary_op_kernel<T: Element>(op: BinaryOp, a: &[T], b: &[T], out: &mut [T]) {
    debug_assert!(a.len() == out.len() && b.len() == out.len());
    for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
        *o = apply(op, x, y);
    }
}

/// Binary operation through precomputed storage offsets
///
/// `a_offsets[i]` and `b_offsets[i]` locate the operands of output element `i`,
/// which is how broadcast (stride-0) and transposed inputs are read.
#[inline]
pub fn binary_op_gather_kernel<T: Element>(
    op: BinaryOp,
    a: &[T],
    b: &[T],
    a_offsets: &[usize],
    b_offsets: &[usize],
) -> Vec<T> {
    a_offsets
        .iter()
        .zip(b_offsets)
        .map(|(&ia, &ib)| apply(op, a[ia], b[ib]))
        .collect()
}
