//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions used throughout LOESS:
//! - Kernel functions for distance-based weighting
//! - Vectorized distances and batched neighbor selection
//! - The least-squares backend (nalgebra)
//! - Robust statistics (MAD, quantiles) and hat-matrix statistics
//!
//! These are reusable mathematical building blocks with no algorithm-specific logic.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Evaluation
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Kernel (weight) functions for distance-based weighting.
pub mod kernel;

/// SIMD absolute distances.
pub mod distance;

/// Batched k-nearest-neighbor selection.
pub mod neighborhood;

/// Linear algebra backend.
pub mod linalg;

/// Median Absolute Deviation (MAD) and quantiles.
pub mod mad;

/// Hat matrix statistics.
pub mod hat_matrix;
