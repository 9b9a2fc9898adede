//! Matrix multiplication kernel

use crate::dtype::Element;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Rows of output below which the parallel path is not worth the dispatch
#[cfg(feature = "rayon")]
const PARALLEL_MIN_ROWS: usize = 64;

/// `out[m, n] = a[m, k] @ b[k, n]`, all row-major and contiguous
///
/// Uses an i-k-j loop order so the inner loop streams through rows of `b`.
/// With the `rayon` feature, large outputs are split by row across the pool;
/// each row is computed by the same sequential code, so results match the
/// single-threaded path bit for bit.
pub fn matmul_kernel<T: Element>(a: &[T], b: &[T], out: &mut [T], m: usize, k: usize, n: usize) {
    debug_assert_eq!(a.len(), m * k);
    debug_assert_eq!(b.len(), k * n);
    debug_assert_eq!(out.len(), m * n);

    if n == 0 {
        return;
    }

    #[cfg(feature = "rayon")]
    {
        if m >= PARALLEL_MIN_ROWS {
            out.par_chunks_mut(n)
                .enumerate()
                .for_each(|(i, row)| matmul_row(&a[i * k..(i + 1) * k], b, row, n));
            return;
        }
    }

    for (i, row) in out.chunks_mut(n).enumerate() {
        matmul_row(&a[i * k..(i + 1) * k], b, row, n);
    }
}

#[inline]
fn matmul_row<T: Element>(a_row: &[T], b: &[T], out_row: &mut [T], n: usize) {
    out_row.fill(T::zero());
    for (p, &a_ip) in a_row.iter().enumerate() {
        let b_row = &b[p * n..(p + 1) * n];
        for (o, &b_pj) in out_row.iter_mut().zip(b_row) {
            *o = *o + a_ip * b_pj;
        }
    }
}
