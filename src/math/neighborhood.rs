//! Batched k-nearest-neighbor selection on the real line.
//!
//! ## Purpose
//!
//! This module selects, for every query point of a chunk, the `k` training
//! points closest in x, their distances and the bandwidth (the k-th smallest
//! distance). It then turns those distances into kernel weights.
//!
//! ## Design notes
//!
//! * **Distance Matrix**: A chunk × n matrix is filled row by row with SIMD
//!   absolute differences, bounding memory at `chunk_size · n`.
//! * **Partition, then Sort**: Each row is partitioned with an O(n) selection
//!   and only the `k` selected entries are sorted.
//! * **Total Order**: Neighbors are ordered by `(distance, index)`, so ties at
//!   the window boundary always keep the smaller training index.
//!
//! ## Key concepts
//!
//! * **Window size**: `k = max(degree + 1, ceil(span · n))`, clamped to `n`.
//! * **Bandwidth**: `h` = the distance of the k-th neighbor. The k-th
//!   neighbor itself sits at `u = 1` and receives zero weight.
//! * **Zero bandwidth**: When `h = 0` every selected neighbor gets weight 1.
//!
//! ## Invariants
//!
//! * Each window contains exactly `k` distinct training indices.
//! * Windows are stored sorted by `(distance, index)`.
//!
//! ## Non-goals
//!
//! * This module does not support multivariate predictors.
//! * This module does not build spatial indices.

// External dependencies
use core::cmp::Ordering;
use num_traits::Float;

// Internal dependencies
use crate::math::distance::DistanceLinalg;
use crate::math::kernel::{KernelLinalg, WeightFunction};
use crate::primitives::buffer::ChunkBuffer;

// ============================================================================
// Window Size
// ============================================================================

/// Number of neighbors used per local fit.
///
/// `n_coefficients` is `degree + 1`; the result never exceeds `n`.
///
/// The k-th neighbor defines the bandwidth and so gets zero kernel weight.
/// A window at the `degree + 1` floor therefore has at most `degree`
/// weighted points, and its fit degenerates. Small spans need
/// `ceil(span·n) > degree + 1` to produce values.
#[inline]
pub fn window_size<T: Float>(n: usize, span: T, n_coefficients: usize) -> usize {
    let target = (span.to_f64().unwrap_or(1.0) * n as f64).ceil();
    let k = if target.is_finite() && target > 0.0 {
        target as usize
    } else {
        n
    };
    k.max(n_coefficients).min(n)
}

// ============================================================================
// Row Selection
// ============================================================================

/// Select the `k` smallest entries of one distance row.
///
/// Writes the selected indices and distances (sorted by `(distance, index)`)
/// and returns the bandwidth. `order` is scratch of length `distances.len()`.
pub fn select_row<T: Float>(
    distances: &[T],
    k: usize,
    order: &mut [usize],
    out_indices: &mut [usize],
    out_distances: &mut [T],
) -> T {
    let n = distances.len();
    debug_assert!(k >= 1 && k <= n);
    debug_assert_eq!(order.len(), n);

    for (i, slot) in order.iter_mut().enumerate() {
        *slot = i;
    }

    let by_distance_then_index = |a: &usize, b: &usize| -> Ordering {
        distances[*a]
            .partial_cmp(&distances[*b])
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(b))
    };

    if k < n {
        order.select_nth_unstable_by(k - 1, by_distance_then_index);
    }
    let selected = &mut order[..k];
    selected.sort_unstable_by(by_distance_then_index);

    for ((idx, dist), &i) in out_indices
        .iter_mut()
        .zip(out_distances.iter_mut())
        .zip(selected.iter())
    {
        *idx = i;
        *dist = distances[i];
    }

    out_distances[k - 1]
}

// ============================================================================
// Window View
// ============================================================================

/// Neighborhood of a single query point, borrowed from a chunk buffer.
#[derive(Debug, Clone, Copy)]
pub struct Window<'a, T> {
    /// Training indices, sorted by `(distance, index)`.
    pub indices: &'a [usize],
    /// Distances to the query point.
    pub distances: &'a [T],
    /// Neighbor weights (kernel times robustness).
    pub weights: &'a [T],
    /// Bandwidth (k-th smallest distance).
    pub bandwidth: T,
}

// ============================================================================
// Selector
// ============================================================================

/// Neighborhood selector for a fixed window size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborhoodSelector {
    k: usize,
}

impl NeighborhoodSelector {
    /// Create a selector returning `k` neighbors per query.
    #[inline]
    pub fn new(k: usize) -> Self {
        Self { k }
    }

    /// Window size.
    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Fill the distance matrix of a chunk and select every row's window.
    ///
    /// `buffer` must have been prepared for `queries.len()` rows, `x.len()`
    /// training points and window size `k`.
    pub fn select_chunk<T: DistanceLinalg>(
        &self,
        x: &[T],
        queries: &[T],
        buffer: &mut ChunkBuffer<T>,
    ) {
        let n = x.len();
        let k = self.k;

        for (row, &q) in buffer
            .distance_matrix
            .chunks_exact_mut(n)
            .zip(queries.iter())
        {
            T::abs_distances(x, q, row);
        }

        let ChunkBuffer {
            distance_matrix,
            order,
            indices,
            distances,
            bandwidths,
            ..
        } = buffer;

        for (r, row) in distance_matrix.chunks_exact(n).enumerate() {
            let span = r * k..(r + 1) * k;
            bandwidths[r] = select_row(
                row,
                k,
                &mut order[..],
                &mut indices[span.clone()],
                &mut distances[span],
            );
        }
    }

    /// Convert the selected distances of a chunk into neighbor weights.
    ///
    /// Distances are normalized by the row bandwidth and passed through the
    /// kernel in one flat pass. Rows with zero bandwidth get unit weights.
    /// Optional robustness weights (indexed by training point) multiply in.
    pub fn compute_weights<T: KernelLinalg>(
        &self,
        kernel: WeightFunction,
        robustness: Option<&[T]>,
        buffer: &mut ChunkBuffer<T>,
    ) {
        let k = self.k;
        let ChunkBuffer {
            indices,
            distances,
            bandwidths,
            normalized,
            weights,
            ..
        } = buffer;

        for ((u_row, d_row), &h) in normalized
            .chunks_exact_mut(k)
            .zip(distances.chunks_exact(k))
            .zip(bandwidths.iter())
        {
            if h > T::zero() {
                // Division keeps u exactly 1 at the k-th neighbor
                for (u, &d) in u_row.iter_mut().zip(d_row) {
                    *u = d / h;
                }
            } else {
                u_row.fill(T::zero());
            }
        }

        kernel.apply(&normalized[..], &mut weights[..]);

        // Uniform weights for zero bandwidth regardless of kernel
        for (w_row, &h) in weights.chunks_exact_mut(k).zip(bandwidths.iter()) {
            if !(h > T::zero()) {
                w_row.fill(T::one());
            }
        }

        if let Some(rw) = robustness {
            for (w, &i) in weights.iter_mut().zip(indices.iter()) {
                *w = *w * rw[i];
            }
        }
    }

    /// Borrow the window of chunk row `row`.
    #[inline]
    pub fn window<'a, T: Float>(&self, buffer: &'a ChunkBuffer<T>, row: usize) -> Window<'a, T> {
        let span = row * self.k..(row + 1) * self.k;
        Window {
            indices: &buffer.indices[span.clone()],
            distances: &buffer.distances[span.clone()],
            weights: &buffer.weights[span],
            bandwidth: buffer.bandwidths[row],
        }
    }
}
