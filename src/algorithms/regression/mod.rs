//! Regression Module
//!
//! ## Purpose
//!
//! This module provides the local polynomial fitter: batched construction of
//! weighted design blocks and the per-point `RegressionContext` solve.
//!
//! ## Features
//!
//! - Local polynomial fits of degree 0 through 4 in the centered basis.
//! - Explicit degeneracy reporting (no silent degree reduction).
//! - Derivatives from the fitted coefficients.

/// Regression Context
mod context;

/// Batched design construction
mod design;

/// Regression Types
mod types;

/// Re-exports
pub use context::RegressionContext;
pub use design::build_weighted_designs;
pub use types::{LocalFit, PolynomialDegree, derivative_from_coefficients};
