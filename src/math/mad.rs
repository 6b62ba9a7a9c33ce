//! Median, MAD and empirical quantiles.
//!
//! ## Purpose
//!
//! This module provides the order statistics used across the crate: the
//! Median Absolute Deviation for robust residual scale, and type-7 empirical
//! quantiles for bootstrap intervals.
//!
//! ## Design notes
//!
//! * **Algorithm**: Uses Quickselect for O(n) median finding.
//! * **Memory**: Operates in place on caller-provided scratch.
//! * **Formula**: MAD = median(|r_i - median(r)|).
//!
//! ## Invariants
//!
//! * MAD >= 0 for any input.
//! * Handles even and odd population sizes correctly.
//!
//! ## Non-goals
//!
//! * This module does not provide weighted MAD variants.
//! * Callers filter non-finite values before calling.

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

// ============================================================================
// MAD Computation
// ============================================================================

/// Compute the Median Absolute Deviation (MAD) in place.
///
/// # Formula
///
/// ```text
/// MAD = median(|r_i - median(r)|)
/// ```
///
/// The contents of `vals` are overwritten.
#[inline]
pub fn compute_mad<T: Float>(vals: &mut [T]) -> T {
    if vals.is_empty() {
        return T::zero();
    }

    let median = median_inplace(vals);
    for val in vals.iter_mut() {
        *val = (*val - median).abs();
    }
    median_inplace(vals)
}

/// Median of `vals`, reordering the slice.
#[inline]
pub fn median_inplace<T: Float>(vals: &mut [T]) -> T {
    let n = vals.len();
    if n == 0 {
        return T::nan();
    }

    let mid = n / 2;
    vals.select_nth_unstable_by(mid, |a, b| a.partial_cmp(b).unwrap_or(Equal));
    let upper = vals[mid];

    if n % 2 == 0 {
        let lower = vals[..mid].iter().copied().fold(T::neg_infinity(), T::max);
        (lower + upper) / (T::one() + T::one())
    } else {
        upper
    }
}

// ============================================================================
// Quantiles
// ============================================================================

/// Empirical quantile of already sorted values (linear interpolation, type 7).
///
/// Returns NaN for an empty slice. `p` is clamped to [0, 1].
pub fn quantile_sorted<T: Float>(sorted: &[T], p: T) -> T {
    let n = sorted.len();
    match n {
        0 => T::nan(),
        1 => sorted[0],
        _ => {
            let p = p.max(T::zero()).min(T::one());
            let h = p * T::from(n - 1).unwrap_or_else(T::zero);
            let lo = h.floor();
            let lo_idx = lo.to_usize().unwrap_or(0).min(n - 1);
            let hi_idx = (lo_idx + 1).min(n - 1);
            let frac = h - lo;
            sorted[lo_idx] + frac * (sorted[hi_idx] - sorted[lo_idx])
        }
    }
}
