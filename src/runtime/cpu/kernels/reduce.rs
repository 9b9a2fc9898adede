//! Reduction kernels

use crate::dtype::Element;

/// Sum a contiguous `[outer, reduce, inner]` view over its middle axis
///
/// Accumulates in f64 and writes `outer * inner` results.
#[inline]
pub fn sum_kernel<T: Element>(
    a: &[T],
    out: &mut [T],
    outer_size: usize,
    reduce_size: usize,
    inner_size: usize,
) {
    for outer in 0..outer_size {
        let block = &a[outer * reduce_size * inner_size..(outer + 1) * reduce_size * inner_size];
        for inner in 0..inner_size {
            let acc: f64 = (0..reduce_size)
                .map(|r| block[r * inner_size + inner].to_f64())
                .sum();
            out[outer * inner_size + inner] = T::from_f64(acc);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_middle_axis() {
        // shape [2, 2, 2] summed over axis 1
        let a = [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let mut out = [0.0; 4];
        sum_kernel(&a, &mut out, 2, 2, 2);
        assert_eq!(out, [4.0, 6.0, 12.0, 14.0]);
    }
}
