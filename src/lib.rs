//! # vloess — Vectorized LOESS evaluation for Rust
//!
//! A batch LOESS engine built to be called thousands of times: fit a locally
//! weighted polynomial around every query point, evaluate the curve anywhere,
//! and drive bootstrap resampling for empirical intervals.
//!
//! ## What is LOESS?
//!
//! LOESS (Locally Estimated Scatterplot Smoothing) is a nonparametric regression
//! method. For each query point it selects the `k` nearest training points,
//! weights them with a kernel that decays to zero at the k-th neighbor, and
//! fits a low-degree polynomial by weighted least squares. The constant term
//! of that polynomial is the fitted value; the higher terms give derivatives.
//!
//! **How vloess evaluates a batch:**
//!
//! 1. Query points are split into chunks (default 256 rows).
//! 2. Each chunk gets a `chunk × n` distance matrix and an O(n) partition per
//!    row to find its `k = max(degree + 1, ceil(span · n))` neighbors.
//! 3. Kernel weights are computed in one flat vectorized pass.
//! 4. Weighted design matrices for the whole chunk are built in one pass and
//!    solved per point with an equilibrated QR (SVD when rank is in doubt).
//! 5. Degenerate fits are reported per point; they never abort the call.
//!
//! ## Quick Start
//!
//! ### One call
//!
//! ```rust
//! use vloess::prelude::*;
//!
//! let x: Vec<f64> = (0..10).map(f64::from).collect();
//! let y = x.clone();
//!
//! let fitted = vloess::evaluate(&x, &y, &[-1.0, 4.5, 12.0], 0.5, 1, Tricube)?;
//! assert!((fitted[0] + 1.0).abs() < 1e-10);
//! assert!((fitted[2] - 12.0).abs() < 1e-10);
//! # Result::<(), LoessError>::Ok(())
//! ```
//!
//! ### Reusable model
//!
//! ```rust
//! use vloess::prelude::*;
//!
//! let x = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
//! let y = vec![2.1, 3.8, 6.2, 7.9, 10.3, 11.8, 14.1, 15.7];
//!
//! let model = Loess::new()
//!     .span(0.6)                   // Fraction of points per local fit
//!     .degree(Linear)              // Local polynomial degree
//!     .weight_function(Tricube)    // Kernel
//!     .return_coefficients()       // Keep local slopes
//!     .build()?;
//!
//! let result = model.evaluate(&x, &y, &[2.5, 4.5, 6.5])?;
//! let slopes = result.derivatives(1).unwrap_or_default();
//! assert_eq!(slopes.len(), 3);
//! # Result::<(), LoessError>::Ok(())
//! ```
//!
//! ### Smoothing mode
//!
//! `fit` evaluates at the training x values and can return residuals,
//! robustness weights and diagnostics:
//!
//! ```rust
//! use vloess::prelude::*;
//!
//! let x = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
//! let y = vec![2.0, 4.1, 5.9, 8.2, 30.0, 12.1, 13.8, 16.2, 18.0, 19.9];
//!
//! let model = Loess::new()
//!     .span(0.5)
//!     .degree(Linear)
//!     .iterations(3)               // Robustness iterations
//!     .robustness_method(Bisquare) // Outlier handling
//!     .return_residuals()
//!     .return_robustness_weights()
//!     .return_diagnostics()
//!     .build()?;
//!
//! let result = model.fit(&x, &y)?;
//! println!("{}", result);
//! # Result::<(), LoessError>::Ok(())
//! ```
//!
//! ### Bootstrap intervals
//!
//! ```rust
//! use vloess::prelude::*;
//!
//! let x: Vec<f64> = (0..40).map(|i| i as f64 * 0.25).collect();
//! let y: Vec<f64> = x.iter().map(|&v| v.sin() + 0.1 * (v * 7.0).cos()).collect();
//!
//! let model = Loess::new()
//!     .span(0.4)
//!     .bootstrap(BootstrapConfig::new(200, 0.9).seed(42))
//!     .build()?;
//!
//! let boot = model.bootstrap(&x, &y, &[2.0, 5.0, 8.0])?;
//! for j in 0..3 {
//!     assert!(boot.lower[j] <= boot.median[j] && boot.median[j] <= boot.upper[j]);
//! }
//! # Result::<(), LoessError>::Ok(())
//! ```
//!
//! ## Result and Error Handling
//!
//! Configuration and input problems are reported as a [`LoessError`] before
//! any computation starts. A local fit that cannot be computed (too few
//! distinct x values in the window, a rank-deficient design, a non-finite
//! solution) only affects its own query point: the value is NaN and the
//! status is `PointStatus::Degenerate(reason)`.
//!
//! ```rust
//! use vloess::prelude::*;
//!
//! // Three copies of the same x cannot support a line.
//! let x: Vec<f64> = vec![1.0, 1.0, 1.0, 5.0];
//! let y: Vec<f64> = vec![1.0, 2.0, 3.0, 4.0];
//!
//! let model = Loess::new().span(0.75).degree(Linear).build()?;
//! let result = model.evaluate(&x, &y, &[0.5, 4.0])?;
//! assert!(result.y[0].is_nan());
//! assert!(!result.status[0].is_fitted());
//!
//! match Loess::<f64>::new().span(1.5).build() {
//!     Err(LoessError::InvalidSpan(_)) => {}
//!     other => panic!("unexpected: {:?}", other),
//! }
//! # Result::<(), LoessError>::Ok(())
//! ```
//!
//! ## Parameters
//!
//! | Parameter                     | Default      | Range/Options              | Description                                 |
//! |-------------------------------|--------------|----------------------------|---------------------------------------------|
//! | **span**                      | 0.75         | (0, 1]                     | Fraction of training points per local fit   |
//! | **degree**                    | `Quadratic`  | 0, 1, 2, 3, 4              | Local polynomial degree                     |
//! | **weight_function**           | `Tricube`    | 6 kernels                  | Distance weighting kernel                   |
//! | **iterations**                | 0            | [0, 1000]                  | Robustness iterations                       |
//! | **robustness_method**         | `Bisquare`   | 3 methods                  | Outlier downweighting method                |
//! | **chunk_size**                | 256          | [1, ∞)                     | Query points per chunk                      |
//! | **return_coefficients**       | false        |                            | Local coefficients (derivatives)            |
//! | **return_leverage**           | false        |                            | `(XᵀWX)⁻¹₀₀` per point                      |
//! | **return_residuals**          | false        |                            | Residuals (smoothing mode)                  |
//! | **return_robustness_weights** | false        |                            | Final robustness weights                    |
//! | **return_diagnostics**        | false        |                            | RMSE, MAE, R², ENP (smoothing mode)         |
//! | **cross_validate**            | None         | `KFold`, `LOOCV`           | Span selection                              |
//! | **bootstrap**                 | 1000 @ 0.95  | replicates ≥ 2, (0, 1)     | Resampling intervals                        |
//! | **parallel**                  | false        | `parallel` feature         | Rayon over chunks and replicates            |
//!
//! | Parameter             | Available Options                                                      |
//! |-----------------------|------------------------------------------------------------------------|
//! | **weight_function**   | `Tricube`, `Epanechnikov`, `Biweight`, `Triangle`, `Cosine`, `Uniform` |
//! | **robustness_method** | `Bisquare`, `Huber`, `Talwar`                                          |
//! | **degree**            | `Constant`, `Linear`, `Quadratic`, `Cubic`, `Quartic`                  |
//!
//! ## Minimal Usage (no_std)
//!
//! Disable default features to build on `alloc` only:
//!
//! ```toml
//! [dependencies]
//! vloess = { version = "0.1", default-features = false }
//! ```
//!
//! ## Parallel Execution
//!
//! With the `parallel` feature and `.parallel(true)`, query chunks and
//! bootstrap replicates run on rayon. Every query point is computed
//! independently and replicate streams are seeded per replicate, so results
//! are identical to the sequential path.
//!
//! ## References
//!
//! - Cleveland, W. S. (1979). "Robust Locally Weighted Regression and Smoothing Scatterplots"
//! - Cleveland, W. S. & Devlin, S. J. (1988). "Locally Weighted Regression: An Approach to Regression Analysis by Local Fitting"
//! - Efron, B. & Tibshirani, R. J. (1993). "An Introduction to the Bootstrap"

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - data structures and basic utilities.
//
// Contains the error types and the reusable chunk workspace.
mod primitives;

// Layer 2: Math - pure mathematical functions.
//
// Contains kernel functions, SIMD distances, batched neighbor selection,
// the nalgebra least-squares backend, and robust statistics (MAD).
mod math;

// Layer 3: Algorithms - core LOESS algorithms.
//
// Contains the batched local polynomial fitter (via `RegressionContext`)
// and robustness weighting (`Bisquare`, `Huber`, `Talwar`).
mod algorithms;

// Layer 4: Engine - orchestration and execution control.
//
// Contains the chunked batch evaluator, the robustness loop, validation,
// and result assembly.
mod engine;

// Layer 5: Evaluation - post-processing and resampling.
//
// Contains diagnostics (RMSE, R^2, ENP), cross-validation for span
// selection, and the bootstrap driver.
mod evaluation;

// High-level fluent API for LOESS evaluation.
//
// Provides the `Loess` builder and the free `evaluate` function.
mod api;

pub use api::evaluate;

// ============================================================================
// Prelude
// ============================================================================

/// Standard vloess prelude.
///
/// This module is intended to be wildcard-imported for convenient access
/// to the most commonly used types:
///
/// ```
/// use vloess::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        BootstrapConfig, BootstrapResult, FitFailure, KFold, LOOCV, LoessBuilder as Loess,
        LoessDiagnostics, LoessError, LoessModel, LoessResult, PointStatus,
        PolynomialDegree::{self, Constant, Cubic, Linear, Quadratic, Quartic},
        RobustnessMethod::{self, Bisquare, Huber, Talwar},
        WeightFunction::{self, Biweight, Cosine, Epanechnikov, Triangle, Tricube, Uniform},
        evaluate,
    };
}

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// This module re-exports internal modules for development and testing purposes.
/// It is only available with the `dev` feature enabled.
///
/// **Warning**: These are internal implementation details and may change without notice.
/// Do not use in production code.
#[cfg(feature = "dev")]
pub mod internals {
    /// Internal primitive types and utilities.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal math functions.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal core algorithms.
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    /// Internal execution engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal evaluation and diagnostics.
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
