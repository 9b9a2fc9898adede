//! Decomposition result and option types

use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Singular Value Decomposition result: A = U @ diag(S) @ V^T
pub struct SvdDecomposition<R: Runtime> {
    /// Left singular vectors U [m, k] where k = min(m, n)
    pub u: Tensor<R>,

    /// Singular values S [k] (sorted in descending order)
    pub s: Tensor<R>,

    /// Right singular vectors V^T [k, n]
    pub vt: Tensor<R>,
}

/// CP/PARAFAC decomposition result
///
/// ```text
/// T ≈ Σᵣ λᵣ · (a₀ʳ ⊗ a₁ʳ ⊗ ... ⊗ aₙ₋₁ʳ)
/// ```
///
/// where `λ` is `weights` and `aₙʳ` is column `r` of `factors[n]`.
#[derive(Debug, Clone)]
pub struct CpDecomposition<R: Runtime> {
    /// Component weights λ, shape `[rank]`
    pub weights: Tensor<R>,

    /// One factor matrix per mode, `factors[n]` has shape `[I_n, rank]`
    pub factors: Vec<Tensor<R>>,

    /// Number of ALS sweeps performed
    pub iterations: usize,

    /// Final relative error `‖T − T̂‖ / ‖T‖`
    pub reconstruction_error: f64,
}

impl<R: Runtime> CpDecomposition<R> {
    /// Number of rank-one components
    pub fn rank(&self) -> usize {
        self.weights.numel()
    }
}

/// Factor initialization strategy for CP-ALS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CpInit {
    /// Leading left singular vectors of each mode unfolding
    #[default]
    Svd,
    /// Standard-normal entries
    Random,
}

/// Options for CP-ALS
#[derive(Debug, Clone, PartialEq)]
pub struct CpOptions {
    /// Maximum number of ALS sweeps
    pub max_iter: usize,

    /// Stop once the relative error changes by less than this between sweeps
    pub tolerance: f64,

    /// Factor initialization
    pub init: CpInit,

    /// Scale factor columns to unit norm and collect the scale in the weights
    ///
    /// When false the weights are all ones and the scale stays in the factors.
    pub normalize: bool,

    /// Seed for every random draw made during initialization
    pub seed: Option<u64>,
}

impl Default for CpOptions {
    fn default() -> Self {
        Self {
            max_iter: 100,
            tolerance: 1e-8,
            init: CpInit::Svd,
            normalize: false,
            seed: None,
        }
    }
}

impl CpOptions {
    /// Set the maximum number of sweeps
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the convergence tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the initialization strategy
    pub fn with_init(mut self, init: CpInit) -> Self {
        self.init = init;
        self
    }

    /// Enable or disable weight extraction by column normalization
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Make random initialization reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
