//! Batched weighted design construction.
//!
//! ## Purpose
//!
//! This module builds, in one flat pass over a chunk, the √w-scaled design
//! blocks `√wᵢ·(xᵢ - x_q)^c` and right-hand sides `√wᵢ·yᵢ` of every query row.
//! Only the solve afterwards iterates per point.
//!
//! ## Invariants
//!
//! * Row `r` writes `design[r·k·p..(r+1)·k·p]` (column-major, column `c` at
//!   offset `c·k`) and `rhs[r·k..(r+1)·k]`; rows never overlap.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::buffer::ChunkBuffer;

/// Fill `buffer.design` and `buffer.rhs` for every row of a chunk.
///
/// Expects `indices` and `weights` of the chunk to be populated.
pub fn build_weighted_designs<T: Float>(
    x: &[T],
    y: &[T],
    queries: &[T],
    k: usize,
    n_coefficients: usize,
    buffer: &mut ChunkBuffer<T>,
) {
    let block = k * n_coefficients;
    let ChunkBuffer {
        indices,
        weights,
        design,
        rhs,
        ..
    } = buffer;

    for (r, &q) in queries.iter().enumerate() {
        let row = r * k..(r + 1) * k;
        let design_block = &mut design[r * block..(r + 1) * block];
        let rhs_row = &mut rhs[row.clone()];

        for (j, (&i, &w)) in indices[row.clone()]
            .iter()
            .zip(weights[row.clone()].iter())
            .enumerate()
        {
            let sw = w.max(T::zero()).sqrt();
            let dx = x[i] - q;
            rhs_row[j] = sw * y[i];

            let mut term = sw;
            for c in 0..n_coefficients {
                design_block[c * k + j] = term;
                term = term * dx;
            }
        }
    }
}
