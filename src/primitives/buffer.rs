//! Scratch buffers for chunked LOESS evaluation.
//!
//! ## Purpose
//!
//! This module provides the reusable workspace (`ChunkBuffer`) that holds all
//! temporary arrays of one chunk of query points: the chunk × n distance
//! matrix, the flattened windows, kernel weights and weighted design matrices.
//! One buffer is allocated per worker and recycled across chunks.
//!
//! ## Design notes
//!
//! * **Lazy Expansion**: Slots grow on demand and never shrink, so a buffer
//!   stabilizes at the size of the largest chunk it has processed.
//! * **Per-worker Ownership**: Buffers are passed explicitly; parallel execution
//!   uses one buffer per thread and never shares one.
//!
//! ## Invariants
//!
//! * Slots are logically cleared, not deallocated, between chunks.
//! * After `prepare`, every slot has exactly the length required by the chunk.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::ops::{Deref, DerefMut};
use num_traits::Float;

// ============================================================================
// Slot
// ============================================================================

/// A reusable vector whose capacity only grows.
#[derive(Debug, Clone)]
pub struct Slot<T>(Vec<T>);

impl<T: Copy> Slot<T> {
    /// Create an empty slot with the given initial capacity.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Reset the slot to `len` copies of `value`, reusing the allocation.
    #[inline]
    pub fn reset(&mut self, len: usize, value: T) {
        self.0.clear();
        self.0.resize(len, value);
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> Deref for Slot<T> {
    type Target = Vec<T>;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Slot<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

// ============================================================================
// Chunk Workspace
// ============================================================================

/// Temporary arrays for evaluating one chunk of query points.
///
/// Row `r` of the chunk owns `indices[r*k..(r+1)*k]`, the same range of
/// `distances` and `weights`, `rhs[r*k..(r+1)*k]` and the column-major
/// `k × p` block `design[r*k*p..(r+1)*k*p]`.
#[derive(Debug, Clone)]
pub struct ChunkBuffer<T> {
    /// Row-major chunk × n distance matrix.
    pub distance_matrix: Slot<T>,
    /// Candidate ordering scratch for row partitioning (length n).
    pub order: Slot<usize>,
    /// Selected training indices per row.
    pub indices: Slot<usize>,
    /// Distances of the selected neighbors.
    pub distances: Slot<T>,
    /// Bandwidth of each row.
    pub bandwidths: Slot<T>,
    /// Neighbor distances divided by the row bandwidth.
    pub normalized: Slot<T>,
    /// Kernel (times robustness) weights of the selected neighbors.
    pub weights: Slot<T>,
    /// Weighted design blocks.
    pub design: Slot<T>,
    /// Weighted responses.
    pub rhs: Slot<T>,
}

impl<T: Float> ChunkBuffer<T> {
    /// Create a workspace sized for `rows` query points, `n` training points,
    /// window size `k` and `n_coeffs` polynomial coefficients.
    pub fn new(rows: usize, n: usize, k: usize, n_coeffs: usize) -> Self {
        Self {
            distance_matrix: Slot::new(rows * n),
            order: Slot::new(n),
            indices: Slot::new(rows * k),
            distances: Slot::new(rows * k),
            bandwidths: Slot::new(rows),
            normalized: Slot::new(rows * k),
            weights: Slot::new(rows * k),
            design: Slot::new(rows * k * n_coeffs),
            rhs: Slot::new(rows * k),
        }
    }

    /// Size every slot for a chunk of `rows` query points.
    pub fn prepare(&mut self, rows: usize, n: usize, k: usize, n_coeffs: usize) {
        self.distance_matrix.reset(rows * n, T::zero());
        self.order.reset(n, 0);
        self.indices.reset(rows * k, 0);
        self.distances.reset(rows * k, T::zero());
        self.bandwidths.reset(rows, T::zero());
        self.normalized.reset(rows * k, T::zero());
        self.weights.reset(rows * k, T::zero());
        self.design.reset(rows * k * n_coeffs, T::zero());
        self.rhs.reset(rows * k, T::zero());
    }
}
