//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer implements the core LOESS algorithms:
//! - Batched weighted design construction and local polynomial fits
//! - Robustness weights for iterative outlier downweighting
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
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Local polynomial regression.
pub mod regression;

/// Robustness weight computation.
pub mod robustness;
