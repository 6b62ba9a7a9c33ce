//! Vectorized absolute distances for batched neighborhood search.
//!
//! ## Purpose
//!
//! This module fills rows of the chunk × n distance matrix: for one query
//! point `q` it writes `|x_i - q|` for every training point. It is the only
//! O(chunk · n) pass of the evaluator, so it runs on SIMD lanes for `f64`
//! and `f32`.
//!
//! ## Design notes
//!
//! * **Bridge trait**: `DistanceLinalg` dispatches generic `Float` code to the
//!   `wide` implementation of the concrete type.
//! * **Tail handling**: Elements that do not fill a full lane group use the
//!   scalar path; both paths produce identical values.
//!
//! ## Invariants
//!
//! * Output length equals input length.
//! * Every distance is non-negative (NaN only if an input is NaN).

// External dependencies
use num_traits::Float;
use wide::{f32x8, f64x4};

// ============================================================================
// DistanceLinalg Trait
// ============================================================================

/// Helper trait to bridge generic Float types to SIMD distance kernels.
pub trait DistanceLinalg: Float + 'static {
    /// Write `|x[i] - query|` into `out[i]`.
    fn abs_distances(x: &[Self], query: Self, out: &mut [Self]) {
        debug_assert_eq!(x.len(), out.len());
        for (o, &xi) in out.iter_mut().zip(x) {
            *o = (xi - query).abs();
        }
    }
}

impl DistanceLinalg for f64 {
    #[inline]
    fn abs_distances(x: &[Self], query: Self, out: &mut [Self]) {
        debug_assert_eq!(x.len(), out.len());
        let q = f64x4::splat(query);

        let mut x_chunks = x.chunks_exact(4);
        let mut out_chunks = out.chunks_exact_mut(4);
        for (xs, os) in (&mut x_chunks).zip(&mut out_chunks) {
            let d = (f64x4::new([xs[0], xs[1], xs[2], xs[3]]) - q).abs();
            os.copy_from_slice(&d.to_array());
        }

        for (o, &xi) in out_chunks
            .into_remainder()
            .iter_mut()
            .zip(x_chunks.remainder())
        {
            *o = (xi - query).abs();
        }
    }
}

impl DistanceLinalg for f32 {
    #[inline]
    fn abs_distances(x: &[Self], query: Self, out: &mut [Self]) {
        debug_assert_eq!(x.len(), out.len());
        let q = f32x8::splat(query);

        let mut x_chunks = x.chunks_exact(8);
        let mut out_chunks = out.chunks_exact_mut(8);
        for (xs, os) in (&mut x_chunks).zip(&mut out_chunks) {
            let lanes = f32x8::new([xs[0], xs[1], xs[2], xs[3], xs[4], xs[5], xs[6], xs[7]]);
            os.copy_from_slice(&(lanes - q).abs().to_array());
        }

        for (o, &xi) in out_chunks
            .into_remainder()
            .iter_mut()
            .zip(x_chunks.remainder())
        {
            *o = (xi - query).abs();
        }
    }
}
