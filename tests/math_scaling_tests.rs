#![cfg(feature = "dev")]
//! Tests for robust scale statistics and quantiles.
//!
//! These tests verify the statistics used by LOESS for:
//! - Robust scale estimation in robustness iterations
//! - Bootstrap quantile intervals
//! - Hat-matrix summaries of in-sample fits
//!
//! ## Test Organization
//!
//! 1. **MAD** - Median absolute deviation
//! 2. **Quantiles** - Interpolated order statistics
//! 3. **Hat Matrix** - Trace, delta1, residual scale

use approx::assert_relative_eq;

use vloess::internals::math::hat_matrix::HatMatrixStats;
use vloess::internals::math::mad::{compute_mad, median_inplace, quantile_sorted};

// ============================================================================
// MAD Tests
// ============================================================================

#[test]
fn test_median_odd_and_even() {
    let mut odd = [5.0f64, 1.0, 3.0];
    assert_relative_eq!(median_inplace(&mut odd), 3.0);

    let mut even = [4.0f64, 1.0, 3.0, 2.0];
    assert_relative_eq!(median_inplace(&mut even), 2.5);

    let mut empty: [f64; 0] = [];
    assert!(median_inplace(&mut empty).is_nan());
}

/// Test MAD computation with even-length input.
#[test]
fn test_mad_even_length() {
    // Median = 2.5, deviations [1.5, 0.5, 0.5, 1.5], MAD = 1.0
    let mut vals = [1.0f64, 2.0, 3.0, 4.0];
    assert_relative_eq!(compute_mad(&mut vals), 1.0);
}

#[test]
fn test_mad_odd_length() {
    // Median = 3, deviations [2, 1, 0, 1, 2], MAD = 1
    let mut vals = [1.0f64, 2.0, 3.0, 4.0, 5.0];
    assert_relative_eq!(compute_mad(&mut vals), 1.0);
}

#[test]
fn test_mad_robust_to_outlier() {
    let mut clean = [1.0f64, 2.0, 3.0, 4.0, 5.0];
    let mut dirty = [1.0f64, 2.0, 3.0, 4.0, 500.0];
    assert_relative_eq!(compute_mad(&mut clean), compute_mad(&mut dirty));
}

#[test]
fn test_mad_edge_cases() {
    let mut empty: [f64; 0] = [];
    assert_eq!(compute_mad(&mut empty), 0.0);

    let mut single = [7.0f64];
    assert_eq!(compute_mad(&mut single), 0.0);

    let mut constant = [2.0f64; 6];
    assert_eq!(compute_mad(&mut constant), 0.0);
}

// ============================================================================
// Quantile Tests
// ============================================================================

#[test]
fn test_quantile_interpolation() {
    let sorted = [1.0f64, 2.0, 3.0, 4.0, 5.0];
    assert_relative_eq!(quantile_sorted(&sorted, 0.0), 1.0);
    assert_relative_eq!(quantile_sorted(&sorted, 0.5), 3.0);
    assert_relative_eq!(quantile_sorted(&sorted, 1.0), 5.0);
    assert_relative_eq!(quantile_sorted(&sorted, 0.1), 1.4);
    assert_relative_eq!(quantile_sorted(&sorted, 0.875), 4.5);
}

#[test]
fn test_quantile_edge_cases() {
    let empty: [f64; 0] = [];
    assert!(quantile_sorted(&empty, 0.5).is_nan());
    assert_eq!(quantile_sorted(&[3.0f64], 0.9), 3.0);

    // p is clamped to [0, 1]
    let sorted = [1.0f64, 2.0];
    assert_eq!(quantile_sorted(&sorted, -0.5), 1.0);
    assert_eq!(quantile_sorted(&sorted, 1.5), 2.0);
}

// ============================================================================
// Hat Matrix Tests
// ============================================================================

#[test]
fn test_hat_matrix_stats() {
    let leverage = [0.5f64, 0.25, 0.25, 0.5];
    let stats = HatMatrixStats::from_leverage(&leverage);

    // trace = 1.5, sum l^2 = 0.625, delta1 = 4 - 3 + 0.625
    assert_eq!(stats.n_used, 4);
    assert_relative_eq!(stats.trace, 1.5);
    assert_relative_eq!(stats.delta1, 1.625);
    assert_relative_eq!(stats.delta2, 1.625 * 1.625 / 4.0);
    assert_relative_eq!(stats.compute_residual_scale(6.5), 2.0);
}

#[test]
fn test_hat_matrix_skips_degenerate_points() {
    let leverage = [0.5f64, f64::NAN, 0.5];
    let stats = HatMatrixStats::from_leverage(&leverage);

    assert_eq!(stats.n_used, 2);
    assert_relative_eq!(stats.trace, 1.0);
    assert_relative_eq!(stats.delta1, 2.0 - 2.0 + 0.5);
}

#[test]
fn test_hat_matrix_interpolating_fit() {
    // Every leverage 1: delta1 = 0, residual scale falls back to zero
    let stats = HatMatrixStats::from_leverage(&[1.0f64, 1.0, 1.0]);
    assert_relative_eq!(stats.delta1, 0.0);
    assert_eq!(stats.compute_residual_scale(1.0), 0.0);
}
