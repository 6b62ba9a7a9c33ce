//! Regression Context and Fitting Logic
//!
//! ## Purpose
//!
//! This module defines the `RegressionContext` which captures all state needed
//! for a single local fit, and implements the per-point orchestration of the
//! solver: support check, constant fast path, least-squares solve.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(feature = "std")]
use std::vec;

// Internal dependencies
use crate::math::linalg::FloatLinalg;
use crate::primitives::errors::FitFailure;

// Module dependencies
use super::types::{LocalFit, PolynomialDegree};

/// Largest number of coefficients any supported degree needs.
const MAX_COEFFICIENTS: usize = 5;

/// Context containing all data needed to fit a single query point.
#[derive(Debug, Clone, Copy)]
pub struct RegressionContext<'a, T> {
    /// Training x values.
    pub x: &'a [T],
    /// Training y values.
    pub y: &'a [T],
    /// Window indices into `x`/`y`.
    pub indices: &'a [usize],
    /// Neighbor weights, aligned with `indices`.
    pub weights: &'a [T],
    /// √w-scaled design block (column-major, `indices.len()` rows).
    pub design: &'a [T],
    /// √w-scaled responses.
    pub rhs: &'a [T],
    /// Degree of polynomial to fit.
    pub polynomial_degree: PolynomialDegree,
}

impl<'a, T: FloatLinalg> RegressionContext<'a, T> {
    /// Fit the local polynomial.
    pub fn fit(&self) -> Result<LocalFit<T>, FitFailure> {
        let required = self.polynomial_degree.num_coefficients();

        let distinct = self.distinct_support(required);
        if distinct < required {
            return Err(FitFailure::InsufficientSupport { distinct, required });
        }

        if self.polynomial_degree == PolynomialDegree::Constant {
            return self.weighted_mean();
        }

        let rows = self.indices.len();
        let solution = T::solve_weighted_design(self.design, self.rhs, rows, required)?;
        Ok(LocalFit {
            value: solution.coefficients[0],
            coefficients: solution.coefficients,
            leverage: solution.leverage,
        })
    }

    /// Count distinct x values with positive weight, stopping at `cap`.
    fn distinct_support(&self, cap: usize) -> usize {
        let mut seen = [T::zero(); MAX_COEFFICIENTS];
        let mut count = 0;

        for (&i, &w) in self.indices.iter().zip(self.weights) {
            if !(w > T::zero()) {
                continue;
            }
            let xi = self.x[i];
            if !seen[..count].contains(&xi) {
                seen[count] = xi;
                count += 1;
                if count >= cap.min(MAX_COEFFICIENTS) {
                    break;
                }
            }
        }
        count
    }

    /// Degree 0: the weighted average of the window responses.
    fn weighted_mean(&self) -> Result<LocalFit<T>, FitFailure> {
        let (sum_wy, sum_w) = self
            .indices
            .iter()
            .zip(self.weights)
            .fold((T::zero(), T::zero()), |(swy, sw), (&i, &w)| {
                (swy + w * self.y[i], sw + w)
            });

        let value = sum_wy / sum_w;
        if !value.is_finite() {
            return Err(FitFailure::NonFinite);
        }

        Ok(LocalFit {
            value,
            coefficients: vec![value],
            leverage: sum_w.recip(),
        })
    }
}
