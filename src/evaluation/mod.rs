//! Layer 5: Evaluation
//!
//! # Purpose
//!
//! This layer builds on the engine to assess and select fits:
//! - Fit diagnostics (RMSE, MAE, R², ENP, residual scale)
//! - Cross-validation for span selection
//! - Bootstrap resampling intervals
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Evaluation ← You are here
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Fit diagnostics.
pub mod diagnostics;

/// Cross-validation.
pub mod cv;

/// Bootstrap resampling.
pub mod bootstrap;
