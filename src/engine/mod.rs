//! Layer 4: Engine
//!
//! # Purpose
//!
//! This layer orchestrates a LOESS call: chunked neighborhood selection,
//! kernel weighting and local fits over all query points, the robustness
//! loop, and result assembly. It also owns parameter validation.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Evaluation
//!   ↓
//! Layer 4: Engine ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Batch evaluator.
pub mod executor;

/// Result types.
pub mod output;

/// Input and parameter validation.
pub mod validator;
