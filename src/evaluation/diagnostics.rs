//! Fit quality diagnostics for in-sample LOESS fits.
//!
//! ## Purpose
//!
//! This module summarizes a smoothing-mode fit (curve evaluated at the
//! training x values): error metrics, goodness of fit, a robust residual
//! scale and, when leverage is available, the complexity measures derived
//! from the hat-matrix diagonal.
//!
//! ## Design notes
//!
//! * **Degenerate points**: Points whose fit degenerated (NaN) are excluded
//!   from every metric.
//! * **Robustness**: Residual SD is MAD × 1.4826.
//!
//! ## Invariants
//!
//! * RMSE, MAE and residual SD are non-negative.
//! * R² <= 1.
//!
//! ## Non-goals
//!
//! * This module does not provide p-values or formal hypothesis tests.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Display, Formatter, Result};
use num_traits::Float;

// Internal dependencies
use crate::math::hat_matrix::HatMatrixStats;
use crate::math::mad::compute_mad;

// ============================================================================
// Diagnostics Structure
// ============================================================================

/// Diagnostic metrics for assessing LOESS fit quality.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostics<T> {
    /// Root Mean Squared Error (RMSE).
    pub rmse: T,

    /// Mean Absolute Error (MAE).
    pub mae: T,

    /// Coefficient of determination (R²).
    pub r_squared: T,

    /// Robust residual standard deviation estimated from MAD.
    pub residual_sd: T,

    /// Equivalent number of parameters (trace of the hat matrix).
    pub enp: Option<T>,

    /// delta1 = tr((I-L)(I-L)').
    pub delta1: Option<T>,

    /// Residual scale sqrt(RSS / delta1).
    pub residual_scale: Option<T>,

    /// Akaike Information Criterion using ENP as model complexity.
    pub aic: Option<T>,

    /// Number of points that entered the metrics.
    pub n_used: usize,
}

impl<T: Float> Diagnostics<T> {
    /// Constant to convert MAD to a standard deviation for normal data.
    const MAD_TO_STD_FACTOR: f64 = 1.4826;

    /// Compute diagnostics from observed and fitted values.
    ///
    /// `leverage`, when given, is aligned with `y`.
    pub fn compute(y: &[T], fitted: &[T], leverage: Option<&[T]>) -> Self {
        let residuals: Vec<T> = y
            .iter()
            .zip(fitted)
            .filter(|(_, f)| f.is_finite())
            .map(|(&yi, &fi)| yi - fi)
            .collect();
        let observed: Vec<T> = y
            .iter()
            .zip(fitted)
            .filter(|(_, f)| f.is_finite())
            .map(|(&yi, _)| yi)
            .collect();

        let n_used = residuals.len();
        let n_t = T::from(n_used.max(1)).unwrap_or_else(T::one);
        let rss = residuals.iter().fold(T::zero(), |acc, &r| acc + r * r);
        let rmse = (rss / n_t).sqrt();
        let mae = residuals.iter().fold(T::zero(), |acc, &r| acc + r.abs()) / n_t;
        let r_squared = Self::calculate_r_squared(&observed, rss);
        let residual_sd = Self::calculate_residual_sd(&residuals);

        let stats = leverage.map(HatMatrixStats::from_leverage);
        let enp = stats.as_ref().map(|s| s.trace);
        let delta1 = stats.as_ref().map(|s| s.delta1);
        let residual_scale = stats.as_ref().map(|s| s.compute_residual_scale(rss));
        let aic = enp.and_then(|df| Self::calculate_aic(rss, n_used, df));

        Self {
            rmse,
            mae,
            r_squared,
            residual_sd,
            enp,
            delta1,
            residual_scale,
            aic,
            n_used,
        }
    }

    /// R² = 1 - SS_res / SS_tot.
    fn calculate_r_squared(y: &[T], ss_res: T) -> T {
        let n = y.len();
        if n <= 1 {
            return T::one();
        }

        let n_t = T::from(n).unwrap_or_else(T::one);
        let mean = y.iter().fold(T::zero(), |acc, &v| acc + v) / n_t;
        let ss_tot = y.iter().fold(T::zero(), |acc, &v| {
            let d = v - mean;
            acc + d * d
        });

        if ss_tot == T::zero() {
            if ss_res == T::zero() {
                T::one()
            } else {
                T::zero()
            }
        } else {
            T::one() - ss_res / ss_tot
        }
    }

    /// sigma_hat = 1.4826 · MAD(residuals).
    pub fn calculate_residual_sd(residuals: &[T]) -> T {
        let factor = T::from(Self::MAD_TO_STD_FACTOR).unwrap_or_else(T::one);
        match residuals.len() {
            0 => T::zero(),
            1 => residuals[0].abs() * factor,
            _ => {
                let mut scratch = residuals.to_vec();
                compute_mad(&mut scratch) * factor
            }
        }
    }

    /// AIC = n · ln(RSS / n) + 2 · ENP.
    fn calculate_aic(rss: T, n: usize, enp: T) -> Option<T> {
        let n_t = T::from(n)?;
        if rss <= T::zero() || n == 0 {
            return None;
        }
        Some(n_t * (rss / n_t).ln() + (enp + enp))
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display> Display for Diagnostics<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "LOESS Diagnostics:")?;
        writeln!(f, "  RMSE:         {:.6}", self.rmse)?;
        writeln!(f, "  MAE:          {:.6}", self.mae)?;
        writeln!(f, "  R^2:          {:.6}", self.r_squared)?;
        writeln!(f, "  Residual SD:  {:.6}", self.residual_sd)?;
        if let Some(enp) = self.enp {
            writeln!(f, "  ENP:          {:.4}", enp)?;
        }
        if let Some(scale) = self.residual_scale {
            writeln!(f, "  Resid. scale: {:.6}", scale)?;
        }
        if let Some(aic) = self.aic {
            writeln!(f, "  AIC:          {:.4}", aic)?;
        }
        Ok(())
    }
}
