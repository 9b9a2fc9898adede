//! Jacobi rotation utilities for the one-sided Jacobi SVD
//!
//! The rotation parameters use the LAPACK formulation, which avoids
//! cancellation when the two diagonal entries are close.

use crate::dtype::Element;

/// Float element with the extra operations numerical linear algebra needs
pub trait LinalgElement: Element + Sized {
    /// Machine epsilon for this type
    fn epsilon_val() -> f64;
    /// Absolute value
    fn abs_val(&self) -> Self;
    /// Square root
    fn sqrt_val(&self) -> Self;
}

impl LinalgElement for f32 {
    #[inline]
    fn epsilon_val() -> f64 {
        f32::EPSILON as f64
    }
    #[inline]
    fn abs_val(&self) -> Self {
        self.abs()
    }
    #[inline]
    fn sqrt_val(&self) -> Self {
        self.sqrt()
    }
}

impl LinalgElement for f64 {
    #[inline]
    fn epsilon_val() -> f64 {
        f64::EPSILON
    }
    #[inline]
    fn abs_val(&self) -> Self {
        self.abs()
    }
    #[inline]
    fn sqrt_val(&self) -> Self {
        self.sqrt()
    }
}

/// Givens rotation `[[c, -s], [s, c]]`
#[derive(Debug, Clone, Copy)]
pub struct JacobiRotation {
    /// Cosine of rotation angle
    pub c: f64,
    /// Sine of rotation angle
    pub s: f64,
}

impl JacobiRotation {
    /// Rotation that zeroes the off-diagonal of the 2x2 symmetric block
    /// `[[a_pp, a_pq], [a_pq, a_qq]]`
    ///
    /// ```text
    /// τ = (a_qq - a_pp) / (2 * a_pq)
    /// t = sign(τ) / (|τ| + sqrt(1 + τ²))
    /// c = 1 / sqrt(1 + t²),  s = t * c
    /// ```
    #[inline]
    pub fn compute(a_pp: f64, a_qq: f64, a_pq: f64) -> Self {
        if a_pq.abs() < 1e-300 {
            return Self { c: 1.0, s: 0.0 };
        }

        let tau = (a_qq - a_pp) / (2.0 * a_pq);
        let t = tau.signum() / (tau.abs() + (1.0 + tau * tau).sqrt());
        let c = 1.0 / (1.0 + t * t).sqrt();

        Self { c, s: t * c }
    }

    #[inline]
    fn typed<T: LinalgElement>(&self) -> (T, T) {
        (T::from_f64(self.c), T::from_f64(self.s))
    }
}

/// Rotate columns `p` and `q` of a row-major `[rows, cols]` matrix in place:
/// `[col_p, col_q] <- [col_p, col_q] @ [[c, s], [-s, c]]`
#[inline]
pub fn apply_rotation_to_columns<T: LinalgElement>(
    data: &mut [T],
    cols: usize,
    p: usize,
    q: usize,
    rot: &JacobiRotation,
) {
    let (c, s): (T, T) = rot.typed();

    for row in data.chunks_exact_mut(cols) {
        let (vp, vq) = (row[p], row[q]);
        row[p] = c * vp - s * vq;
        row[q] = s * vp + c * vq;
    }
}

/// Dot products of columns `p` and `q`: `(‖b_p‖², ‖b_q‖², b_p · b_q)`
#[inline]
pub fn compute_gram_elements<T: LinalgElement>(
    b: &[T],
    cols: usize,
    p: usize,
    q: usize,
) -> (f64, f64, f64) {
    b.chunks_exact(cols)
        .fold((0.0, 0.0, 0.0), |(pp, qq, pq), row| {
            let (bp, bq) = (row[p].to_f64(), row[q].to_f64());
            (pp + bp * bp, qq + bq * bq, pq + bp * bq)
        })
}

/// Indices that sort `values` in descending order
#[inline]
pub fn argsort_desc<T: LinalgElement>(values: &[T]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..values.len()).collect();
    indices.sort_by(|&i, &j| {
        values[j]
            .partial_cmp(&values[i])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    indices
}

/// Select and reorder columns: output column `k` is input column `indices[k]`
#[inline]
pub fn permute_columns<T: LinalgElement>(data: &[T], cols: usize, indices: &[usize]) -> Vec<T> {
    data.chunks_exact(cols)
        .flat_map(|row| indices.iter().map(move |&j| row[j]))
        .collect()
}

/// Row-major `n x n` identity
#[inline]
pub fn identity_matrix<T: LinalgElement>(n: usize) -> Vec<T> {
    let mut out = vec![T::zero(); n * n];
    for i in 0..n {
        out[i * n + i] = T::one();
    }
    out
}

/// Scale every column to unit norm and return the norms
///
/// Columns with norm at or below `eps` are zeroed.
#[inline]
pub fn normalize_columns<T: LinalgElement>(data: &mut [T], cols: usize, eps: f64) -> Vec<T> {
    let mut norms = vec![T::zero(); cols];
    for row in data.chunks_exact(cols) {
        for (norm, &v) in norms.iter_mut().zip(row) {
            *norm = *norm + v * v;
        }
    }
    for norm in norms.iter_mut() {
        *norm = norm.sqrt_val();
    }

    for row in data.chunks_exact_mut(cols) {
        for (v, norm) in row.iter_mut().zip(&norms) {
            *v = if norm.to_f64() > eps {
                *v / *norm
            } else {
                T::zero()
            };
        }
    }
    norms
}
