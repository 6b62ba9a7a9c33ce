//! Robustness weight computation for outlier downweighting.
//!
//! ## Purpose
//!
//! This module turns in-sample residuals into robustness weights for
//! iteratively reweighted LOESS. Each robustness iteration multiplies the
//! kernel weights of every neighbor by its robustness weight.
//!
//! ## Design notes
//!
//! * **Estimation**: Residual scale is the MAD of the finite residuals, with a
//!   mean absolute residual fallback when the MAD collapses towards zero.
//! * **Methods**: Bisquare (default), Huber and Talwar.
//! * **Degenerate points**: A NaN residual (the in-sample fit degenerated)
//!   keeps weight 1 and does not enter the scale estimate.
//!
//! ## Invariants
//!
//! * Robustness weights are in [0, 1].
//! * Tuning constants are positive.
//!
//! ## Non-goals
//!
//! * This module does not perform the regression itself.
//! * This module does not decide the number of robustness iterations.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::mad::compute_mad;

// ============================================================================
// Robustness Method
// ============================================================================

/// Robustness weighting method for outlier downweighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RobustnessMethod {
    /// Bisquare (Tukey's biweight) - default and most common.
    #[default]
    Bisquare,

    /// Huber weights - less aggressive downweighting.
    Huber,

    /// Talwar (hard threshold) - most aggressive.
    Talwar,
}

impl RobustnessMethod {
    // ========================================================================
    // Constants
    // ========================================================================

    /// Tuning constant for bisquare weights, applied to the raw MAD (Cleveland 1979).
    const BISQUARE_C: f64 = 6.0;

    /// Tuning constant for Huber weights.
    const HUBER_C: f64 = 1.345;

    /// Tuning constant for Talwar weights.
    const TALWAR_C: f64 = 2.5;

    /// If MAD < SCALE_THRESHOLD × MAR, the mean absolute residual is used.
    const SCALE_THRESHOLD: f64 = 1e-7;

    /// Absolute floor for the tuned scale.
    const MIN_TUNED_SCALE: f64 = 1e-12;

    /// Get the name of the method.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bisquare => "Bisquare",
            Self::Huber => "Huber",
            Self::Talwar => "Talwar",
        }
    }

    // ========================================================================
    // Main API
    // ========================================================================

    /// Compute robustness weights from residuals into `weights`.
    ///
    /// `scratch` is reused for the scale estimate.
    pub fn compute_weights<T: Float>(&self, residuals: &[T], weights: &mut [T], scratch: &mut Vec<T>) {
        debug_assert_eq!(residuals.len(), weights.len());

        let scale = Self::compute_scale(residuals, scratch);
        let c = T::from(match self {
            Self::Bisquare => Self::BISQUARE_C,
            Self::Huber => Self::HUBER_C,
            Self::Talwar => Self::TALWAR_C,
        })
        .unwrap_or_else(T::one);

        for (w, &r) in weights.iter_mut().zip(residuals) {
            *w = if !r.is_finite() {
                T::one()
            } else {
                match self {
                    Self::Bisquare => Self::bisquare_weight(r, scale, c),
                    Self::Huber => Self::huber_weight(r, scale, c),
                    Self::Talwar => Self::talwar_weight(r, scale, c),
                }
            };
        }
    }

    // ========================================================================
    // Scale Estimation
    // ========================================================================

    /// Robust residual scale over finite residuals with a MAR fallback.
    pub fn compute_scale<T: Float>(residuals: &[T], scratch: &mut Vec<T>) -> T {
        scratch.clear();
        scratch.extend(residuals.iter().copied().filter(|r| r.is_finite()));
        if scratch.is_empty() {
            return T::zero();
        }

        let n = T::from(scratch.len()).unwrap_or_else(T::one);
        let mar = scratch.iter().fold(T::zero(), |acc, r| acc + r.abs()) / n;
        if mar.is_zero() {
            return T::zero();
        }

        let threshold = (T::from(Self::SCALE_THRESHOLD).unwrap_or_else(T::zero) * mar)
            .max(T::from(Self::MIN_TUNED_SCALE).unwrap_or_else(T::zero));

        let mad = compute_mad(scratch);
        if mad <= threshold { mar.max(mad) } else { mad }
    }

    // ========================================================================
    // Weight Functions
    // ========================================================================

    /// Bisquare weight.
    ///
    /// # Formula
    ///
    /// u = |r| / (c * s)
    ///
    /// w(u) = (1 - u^2)^2 if 0.001 < u < 0.999, 1 if u <= 0.001, 0 if u >= 0.999
    #[inline]
    pub fn bisquare_weight<T: Float>(residual: T, scale: T, c: T) -> T {
        if scale <= T::zero() {
            return T::one();
        }

        let min_eps = T::from(Self::MIN_TUNED_SCALE).unwrap_or_else(T::zero);
        let tuned_scale = (scale * c.max(min_eps)).max(min_eps);
        let u = (residual / tuned_scale).abs();

        if u >= T::from(0.999).unwrap_or_else(T::one) {
            T::zero()
        } else if u <= T::from(0.001).unwrap_or_else(T::zero) {
            T::one()
        } else {
            let tmp = T::one() - u * u;
            tmp * tmp
        }
    }

    /// Huber weight: 1 if |r|/s <= c, otherwise c / (|r|/s).
    #[inline]
    pub fn huber_weight<T: Float>(residual: T, scale: T, c: T) -> T {
        if scale <= T::zero() {
            return T::one();
        }

        let u = (residual / scale).abs();
        if u <= c { T::one() } else { c / u }
    }

    /// Talwar weight: 1 if |r|/s <= c, otherwise 0.
    #[inline]
    pub fn talwar_weight<T: Float>(residual: T, scale: T, c: T) -> T {
        if scale <= T::zero() {
            return T::one();
        }

        let u = (residual / scale).abs();
        if u <= c { T::one() } else { T::zero() }
    }
}
