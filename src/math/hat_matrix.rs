//! Hat matrix statistics for in-sample LOESS fits.
//!
//! ## Purpose
//!
//! When the curve is evaluated at the training x values, the fitted values
//! can be written as ŷ = L·y where L is the smoother ("hat") matrix. This
//! module derives model-complexity quantities from the diagonal of L:
//! - Trace of L (Equivalent Number of Parameters)
//! - delta1 and delta2 for residual scale estimation
//!
//! ## Background
//!
//! - delta1 = tr((I-L)(I-L)') = n - 2·tr(L) + tr(L·L')
//! - delta2 = tr(((I-L)(I-L)')²)
//!
//! Only the diagonal is available, so tr(L·L') is approximated by Σ lᵢᵢ² and
//! delta2 by delta1² / n (Cleveland et al. 1988).
//!
//! The residual scale is estimated as: sigma = sqrt(RSS / delta1)

// External dependencies
use num_traits::Float;

// ============================================================================
// Hat Matrix Statistics
// ============================================================================

/// Statistics derived from the hat (smoother) matrix diagonal.
#[derive(Debug, Clone, PartialEq)]
pub struct HatMatrixStats<T> {
    /// Trace of L over the finite leverage values (ENP).
    pub trace: T,

    /// Delta1 = tr((I-L)(I-L)') for residual scale estimation.
    pub delta1: T,

    /// Delta2 = tr(((I-L)(I-L)')²).
    pub delta2: T,

    /// Number of finite leverage values used.
    pub n_used: usize,
}

impl<T: Float> HatMatrixStats<T> {
    /// Create stats from leverage values, skipping degenerate (NaN) entries.
    pub fn from_leverage(leverage: &[T]) -> Self {
        let (n_used, trace, trace_l_sq) = leverage
            .iter()
            .filter(|l| l.is_finite())
            .fold((0usize, T::zero(), T::zero()), |(c, s, s2), &l| {
                (c + 1, s + l, s2 + l * l)
            });

        let n = T::from(n_used).unwrap_or_else(T::zero);
        let two = T::one() + T::one();
        let delta1 = n - two * trace + trace_l_sq;
        let delta2 = if n_used > 0 {
            delta1 * delta1 / n
        } else {
            T::zero()
        };

        Self {
            trace,
            delta1,
            delta2,
            n_used,
        }
    }

    /// Compute residual scale estimate.
    ///
    /// sigma = sqrt(RSS / delta1)
    pub fn compute_residual_scale(&self, rss: T) -> T {
        if self.delta1 > T::zero() {
            (rss / self.delta1).sqrt()
        } else {
            T::zero()
        }
    }
}
