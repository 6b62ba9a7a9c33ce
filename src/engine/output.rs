//! Output types and result structures for LOESS evaluation.
//!
//! ## Purpose
//!
//! This module defines `LoessResult`, which carries the fitted values at the
//! evaluation points together with their per-point status, and the optional
//! extras (local coefficients, leverage, residuals, robustness weights,
//! diagnostics).
//!
//! ## Design notes
//!
//! * **Memory Efficiency**: All optional outputs use `Option<Vec<T>>`.
//! * **Order**: Every vector is aligned with the evaluation points as given;
//!   nothing is sorted.
//! * **Ergonomics**: Implements `Display` for human-readable output.
//!
//! ## Invariants
//!
//! * `y[i]` is NaN exactly when `status[i]` is `Degenerate`.
//! * Coefficients are stored flat, `n_coefficients` per evaluation point.
//!
//! ## Non-goals
//!
//! * This module does not perform calculations; it only stores results.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::cmp::Ordering;
use core::fmt::{Debug, Display, Formatter, Result};
use num_traits::Float;

// Internal dependencies
use crate::algorithms::regression::{PolynomialDegree, derivative_from_coefficients};
use crate::evaluation::diagnostics::Diagnostics;
use crate::math::kernel::WeightFunction;
use crate::primitives::errors::FitFailure;

// ============================================================================
// Point Status
// ============================================================================

/// Outcome of the local fit at one evaluation point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointStatus {
    /// The local polynomial was fitted.
    #[default]
    Fitted,

    /// The local fit degenerated; the value slot holds NaN.
    Degenerate(FitFailure),
}

impl PointStatus {
    /// Whether the point was fitted.
    #[inline]
    pub fn is_fitted(&self) -> bool {
        matches!(self, PointStatus::Fitted)
    }
}

// ============================================================================
// Result Structure
// ============================================================================

/// LOESS output at a set of evaluation points.
#[derive(Debug, Clone, PartialEq)]
pub struct LoessResult<T> {
    /// Evaluation points, in the order given.
    pub x: Vec<T>,

    /// Fitted values (NaN where the fit degenerated).
    pub y: Vec<T>,

    /// Status of each evaluation point.
    pub status: Vec<PointStatus>,

    /// Flattened local coefficients, `n_coefficients` per point.
    pub coefficients: Option<Vec<T>>,

    /// `(XᵀWX)⁻¹₀₀` per point.
    ///
    /// In smoothing mode each value is scaled by the point's final robustness
    /// weight, which makes it the hat-matrix diagonal `L_ii`.
    pub leverage: Option<Vec<T>>,

    /// Residuals `y_i - ŷ_i` (smoothing mode only).
    pub residuals: Option<Vec<T>>,

    /// Final robustness weights of the training points.
    pub robustness_weights: Option<Vec<T>>,

    /// Fit diagnostics (smoothing mode only).
    pub diagnostics: Option<Diagnostics<T>>,

    /// Span used for the fit (optimal if selected by CV).
    pub span_used: T,

    /// Polynomial degree of the local fits.
    pub degree: PolynomialDegree,

    /// Kernel of the local fits.
    pub weight_function: WeightFunction,

    /// Number of neighbors per local fit.
    pub window_size: usize,

    /// Number of robustness iterations performed.
    pub iterations_used: usize,

    /// CV scores (RMSE) for each candidate span.
    pub cv_scores: Option<Vec<T>>,
}

impl<T: Float> LoessResult<T> {
    // ========================================================================
    // Query Methods
    // ========================================================================

    /// Number of coefficients stored per point.
    #[inline]
    pub fn n_coefficients(&self) -> usize {
        self.degree.num_coefficients()
    }

    /// Number of degenerate evaluation points.
    pub fn degenerate_count(&self) -> usize {
        self.status.iter().filter(|s| !s.is_fitted()).count()
    }

    /// Local coefficients of evaluation point `i`.
    pub fn coefficients_at(&self, i: usize) -> Option<&[T]> {
        let p = self.n_coefficients();
        self.coefficients
            .as_ref()
            .and_then(|c| c.get(i * p..(i + 1) * p))
    }

    /// Derivative of order `order` at evaluation point `i`: `order! · β_order`.
    pub fn derivative(&self, i: usize, order: usize) -> Option<T> {
        self.coefficients_at(i)
            .map(|c| derivative_from_coefficients(c, order))
    }

    /// All derivatives of the given order, aligned with `x`.
    pub fn derivatives(&self, order: usize) -> Option<Vec<T>> {
        let p = self.n_coefficients();
        self.coefficients.as_ref().map(|c| {
            c.chunks_exact(p)
                .map(|beta| derivative_from_coefficients(beta, order))
                .collect()
        })
    }

    /// Check if cross-validation was performed.
    pub fn has_cv_scores(&self) -> bool {
        self.cv_scores.is_some()
    }

    /// Get the best (minimum) CV score.
    pub fn best_cv_score(&self) -> Option<T> {
        self.cv_scores.as_ref().and_then(|scores| {
            scores
                .iter()
                .copied()
                .min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
        })
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display + Debug> Display for LoessResult<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Data points: {}", self.x.len())?;
        writeln!(f, "  Span:        {}", self.span_used)?;
        writeln!(f, "  Degree:      {}", self.degree.value())?;
        writeln!(f, "  Kernel:      {}", self.weight_function)?;
        writeln!(f, "  Window size: {}", self.window_size)?;
        if self.iterations_used > 0 {
            writeln!(f, "  Iterations:  {}", self.iterations_used)?;
        }
        let degenerate = self.degenerate_count();
        if degenerate > 0 {
            writeln!(f, "  Degenerate:  {}", degenerate)?;
        }
        if let Some(best_score) = self.best_cv_score() {
            writeln!(f, "  Best CV score: {}", best_score)?;
        }
        writeln!(f)?;

        if let Some(diag) = &self.diagnostics {
            writeln!(f, "{}", diag)?;
        }

        writeln!(f, "Fitted Data:")?;

        let has_lev = self.leverage.is_some();
        let has_resid = self.residuals.is_some();

        write!(f, "{:>10} {:>12}", "X", "Y_fit")?;
        if has_lev {
            write!(f, " {:>12}", "Leverage")?;
        }
        if has_resid {
            write!(f, " {:>12}", "Residual")?;
        }
        writeln!(f)?;

        let line_width = 23 + if has_lev { 13 } else { 0 } + if has_resid { 13 } else { 0 };
        writeln!(f, "{:-<width$}", "", width = line_width)?;

        // Show first 10 and last 10 if more than 20 points
        let n = self.x.len();
        let rows_to_show: Vec<usize> = if n <= 20 {
            (0..n).collect()
        } else {
            (0..10).chain(n - 10..n).collect()
        };

        let mut prev_idx = 0;
        for (i, &idx) in rows_to_show.iter().enumerate() {
            if i > 0 && idx != prev_idx + 1 {
                writeln!(f, "{:>10}", "...")?;
            }
            prev_idx = idx;

            write!(f, "{:>10.4} {:>12.6}", self.x[idx], self.y[idx])?;
            if let Some(lev) = &self.leverage {
                write!(f, " {:>12.6}", lev[idx])?;
            }
            if let Some(resid) = &self.residuals {
                write!(f, " {:>12.6}", resid[idx])?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
