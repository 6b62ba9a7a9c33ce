//! Regression Types
//!
//! ## Purpose
//!
//! This module defines the core data types used in local regression fitting:
//! the `PolynomialDegree` enum and the per-point `LocalFit` result.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// Internal dependencies
use crate::primitives::errors::LoessError;

// External dependencies
use num_traits::Float;

// ============================================================================
// Polynomial Degree
// ============================================================================

/// Polynomial degree for local regression fitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PolynomialDegree {
    /// Degree 0: Local constant (weighted mean)
    Constant,

    /// Degree 1: Local linear regression
    Linear,

    /// Degree 2: Local quadratic regression (default)
    #[default]
    Quadratic,

    /// Degree 3: Local cubic regression
    Cubic,

    /// Degree 4: Local quartic regression
    Quartic,
}

impl PolynomialDegree {
    /// Get the numeric degree value.
    #[inline]
    pub const fn value(&self) -> usize {
        match self {
            PolynomialDegree::Constant => 0,
            PolynomialDegree::Linear => 1,
            PolynomialDegree::Quadratic => 2,
            PolynomialDegree::Cubic => 3,
            PolynomialDegree::Quartic => 4,
        }
    }

    /// Number of polynomial coefficients (`degree + 1`).
    #[inline]
    pub const fn num_coefficients(&self) -> usize {
        self.value() + 1
    }
}

impl TryFrom<i64> for PolynomialDegree {
    type Error = LoessError;

    fn try_from(degree: i64) -> Result<Self, Self::Error> {
        match degree {
            0 => Ok(PolynomialDegree::Constant),
            1 => Ok(PolynomialDegree::Linear),
            2 => Ok(PolynomialDegree::Quadratic),
            3 => Ok(PolynomialDegree::Cubic),
            4 => Ok(PolynomialDegree::Quartic),
            _ => Err(LoessError::InvalidDegree(degree)),
        }
    }
}

impl TryFrom<usize> for PolynomialDegree {
    type Error = LoessError;

    fn try_from(degree: usize) -> Result<Self, Self::Error> {
        i64::try_from(degree)
            .map_err(|_| LoessError::InvalidDegree(i64::MAX))
            .and_then(PolynomialDegree::try_from)
    }
}

// ============================================================================
// Local Fit
// ============================================================================

/// Result of a successful local polynomial fit at one query point.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalFit<T> {
    /// Fitted value at the query point (`β₀`).
    pub value: T,
    /// Coefficients of `(x - x_q)^j`, `j = 0..=degree`.
    pub coefficients: Vec<T>,
    /// `(XᵀWX)⁻¹₀₀`.
    pub leverage: T,
}

impl<T: Float> LocalFit<T> {
    /// Derivative of order `order` at the query point: `order! · β_order`.
    ///
    /// Orders above the fitted degree are zero.
    pub fn derivative(&self, order: usize) -> T {
        derivative_from_coefficients(&self.coefficients, order)
    }
}

/// `order! · coefficients[order]`, or zero when `order` exceeds the degree.
#[inline]
pub fn derivative_from_coefficients<T: Float>(coefficients: &[T], order: usize) -> T {
    match coefficients.get(order) {
        Some(&beta) => {
            let factorial = (1..=order).fold(T::one(), |acc, j| {
                acc * T::from(j).unwrap_or_else(T::one)
            });
            factorial * beta
        }
        None => T::zero(),
    }
}
