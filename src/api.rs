//! High-level API for LOESS evaluation.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry points: a fluent
//! builder that validates the configuration once and yields an immutable,
//! reusable model, and the single free function [`evaluate`] for the plain
//! "fit here, evaluate there" call.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Validated**: Parameters are validated when `.build()` is called; data
//!   is validated on every call.
//! * **Deferred errors**: Duplicate parameters and unparsable kernel names or
//!   degrees are stored and reported by `.build()`.
//! * **Reusable**: The built model holds no per-call state and is `Send + Sync`.
//!
//! ## Key concepts
//!
//! ### Configuration Flow
//!
//! 1. Create a [`LoessBuilder`] via `Loess::new()`.
//! 2. Chain configuration methods (`.span()`, `.degree()`, etc.).
//! 3. Call `.build()` to get a [`LoessModel`].
//! 4. Call `.evaluate()`, `.fit()` or `.bootstrap()` as often as needed.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};
#[cfg(feature = "std")]
use std::{vec, vec::Vec};

// External dependencies
use core::fmt::Debug;
use num_traits::Float;

// Internal dependencies
use crate::engine::executor::{DEFAULT_CHUNK_SIZE, LoessConfig, LoessExecutor, PassOptions};
use crate::engine::validator::Validator;
use crate::evaluation::cv::{CVConfig, CVKind};
use crate::evaluation::diagnostics::Diagnostics;
use crate::math::distance::DistanceLinalg;
use crate::math::kernel::KernelLinalg;
use crate::math::linalg::FloatLinalg;

// Publicly re-exported types
pub use crate::algorithms::regression::PolynomialDegree;
pub use crate::algorithms::robustness::RobustnessMethod;
pub use crate::engine::output::{LoessResult, PointStatus};
pub use crate::evaluation::bootstrap::{BootstrapConfig, BootstrapResult};
pub use crate::evaluation::cv::{KFold, LOOCV};
pub use crate::evaluation::diagnostics::Diagnostics as LoessDiagnostics;
pub use crate::math::kernel::WeightFunction;
pub use crate::primitives::errors::{FitFailure, LoessError};

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for configuring LOESS parameters.
#[derive(Debug, Clone)]
pub struct LoessBuilder<T> {
    /// Fraction of training points in each local window (0..1].
    pub span: Option<T>,

    /// Polynomial degree for local regression (default: Quadratic).
    pub polynomial_degree: Option<PolynomialDegree>,

    /// Kernel weight function.
    pub weight_function: Option<WeightFunction>,

    /// Robustness iterations.
    pub iterations: Option<usize>,

    /// Outlier downweighting method.
    pub robustness_method: Option<RobustnessMethod>,

    /// Query points per chunk.
    pub chunk_size: Option<usize>,

    /// Return the local polynomial coefficients.
    pub return_coefficients: bool,

    /// Return `(XᵀWX)⁻¹₀₀` per point.
    pub return_leverage: bool,

    /// Return residuals (smoothing mode).
    pub return_residuals: bool,

    /// Return final robustness weights.
    pub return_robustness_weights: bool,

    /// Return fit diagnostics (smoothing mode).
    pub return_diagnostics: bool,

    /// Cross-validation configuration for span selection.
    pub(crate) cross_validation: Option<CVConfig<T>>,

    /// Bootstrap configuration.
    pub(crate) bootstrap: Option<BootstrapConfig<T>>,

    /// Parallel execution hint.
    #[doc(hidden)]
    pub parallel: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,

    /// First parse error of a string or integer setter.
    #[doc(hidden)]
    pub deferred_error: Option<LoessError>,
}

impl<T: Float> Default for LoessBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> LoessBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            span: None,
            polynomial_degree: None,
            weight_function: None,
            iterations: None,
            robustness_method: None,
            chunk_size: None,
            return_coefficients: false,
            return_leverage: false,
            return_residuals: false,
            return_robustness_weights: false,
            return_diagnostics: false,
            cross_validation: None,
            bootstrap: None,
            parallel: None,
            duplicate_param: None,
            deferred_error: None,
        }
    }

    /// Set the span (fraction of training points per local fit).
    pub fn span(mut self, span: T) -> Self {
        if self.span.is_some() {
            self.duplicate_param = Some("span");
        }
        self.span = Some(span);
        self
    }

    /// Set the polynomial degree for local regression.
    ///
    /// - `Constant` (degree 0): Weighted mean
    /// - `Linear` (degree 1): Local line
    /// - `Quadratic` (degree 2, default): Better for curved regions
    /// - `Cubic`, `Quartic`: Higher orders, more neighbors needed
    pub fn degree(mut self, degree: PolynomialDegree) -> Self {
        if self.polynomial_degree.is_some() {
            self.duplicate_param = Some("degree");
        }
        self.polynomial_degree = Some(degree);
        self
    }

    /// Set the polynomial degree from an integer order in [0, 4].
    pub fn degree_order(self, order: i64) -> Self {
        match PolynomialDegree::try_from(order) {
            Ok(degree) => self.degree(degree),
            Err(err) => self.defer(err),
        }
    }

    /// Set the kernel weight function.
    pub fn weight_function(mut self, wf: WeightFunction) -> Self {
        if self.weight_function.is_some() {
            self.duplicate_param = Some("weight_function");
        }
        self.weight_function = Some(wf);
        self
    }

    /// Set the kernel by name (e.g. `"tricube"`), case-insensitive.
    pub fn kernel(self, name: &str) -> Self {
        match name.parse::<WeightFunction>() {
            Ok(wf) => self.weight_function(wf),
            Err(err) => self.defer(err),
        }
    }

    /// Set the number of robustness iterations (typically 0-4).
    pub fn iterations(mut self, iterations: usize) -> Self {
        if self.iterations.is_some() {
            self.duplicate_param = Some("iterations");
        }
        self.iterations = Some(iterations);
        self
    }

    /// Set the robustness weighting method.
    pub fn robustness_method(mut self, rm: RobustnessMethod) -> Self {
        if self.robustness_method.is_some() {
            self.duplicate_param = Some("robustness_method");
        }
        self.robustness_method = Some(rm);
        self
    }

    /// Set the number of query points per chunk (default: 256).
    pub fn chunk_size(mut self, size: usize) -> Self {
        if self.chunk_size.is_some() {
            self.duplicate_param = Some("chunk_size");
        }
        self.chunk_size = Some(size);
        self
    }

    /// Enable automatic span selection via cross-validation.
    pub fn cross_validate(mut self, config: CVConfig<T>) -> Self {
        if self.cross_validation.is_some() {
            self.duplicate_param = Some("cross_validate");
        }
        self.cross_validation = Some(config);
        self
    }

    /// Configure the bootstrap driver.
    pub fn bootstrap(mut self, config: BootstrapConfig<T>) -> Self {
        if self.bootstrap.is_some() {
            self.duplicate_param = Some("bootstrap");
        }
        self.bootstrap = Some(config);
        self
    }

    /// Include the local polynomial coefficients in output.
    pub fn return_coefficients(mut self) -> Self {
        self.return_coefficients = true;
        self
    }

    /// Include `(XᵀWX)⁻¹₀₀` per point in output.
    pub fn return_leverage(mut self) -> Self {
        self.return_leverage = true;
        self
    }

    /// Include residuals in output (smoothing mode).
    pub fn return_residuals(mut self) -> Self {
        self.return_residuals = true;
        self
    }

    /// Include final robustness weights in output.
    pub fn return_robustness_weights(mut self) -> Self {
        self.return_robustness_weights = true;
        self
    }

    /// Include fit diagnostics in output (smoothing mode).
    pub fn return_diagnostics(mut self) -> Self {
        self.return_diagnostics = true;
        self
    }

    /// Set parallel execution (requires the `parallel` feature).
    pub fn parallel(mut self, parallel: bool) -> Self {
        if self.parallel.is_some() {
            self.duplicate_param = Some("parallel");
        }
        self.parallel = Some(parallel);
        self
    }

    fn defer(mut self, err: LoessError) -> Self {
        if self.deferred_error.is_none() {
            self.deferred_error = Some(err);
        }
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Validate the configuration and build the model.
    pub fn build(self) -> Result<LoessModel<T>, LoessError> {
        if let Some(err) = self.deferred_error {
            return Err(err);
        }

        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let defaults = LoessConfig::<T>::default();
        let config = LoessConfig {
            span: self.span.unwrap_or(defaults.span),
            polynomial_degree: self.polynomial_degree.unwrap_or_default(),
            weight_function: self.weight_function.unwrap_or_default(),
            iterations: self.iterations.unwrap_or(0),
            robustness_method: self.robustness_method.unwrap_or_default(),
            chunk_size: self.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE),
            parallel: self.parallel.unwrap_or(false),
        };

        Validator::validate_span(config.span)?;
        Validator::validate_iterations(config.iterations)?;
        Validator::validate_chunk_size(config.chunk_size)?;

        if let Some(cv) = &self.cross_validation {
            Validator::validate_candidates(cv.spans())?;
            if let CVKind::KFold(k) = cv.kind() {
                // The upper bound depends on n and is checked per call.
                Validator::validate_folds(k, usize::MAX)?;
            }
        }

        if let Some(boot) = &self.bootstrap {
            Validator::validate_replicates(boot.replicates())?;
            Validator::validate_interval_level(boot.level())?;
        }

        Ok(LoessModel {
            config,
            return_coefficients: self.return_coefficients,
            return_leverage: self.return_leverage,
            return_residuals: self.return_residuals,
            return_robustness_weights: self.return_robustness_weights,
            return_diagnostics: self.return_diagnostics,
            cross_validation: self.cross_validation,
            bootstrap: self.bootstrap,
        })
    }
}

// ============================================================================
// Model
// ============================================================================

/// Validated, immutable LOESS configuration.
///
/// A model can be reused for any number of calls and shared across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct LoessModel<T> {
    config: LoessConfig<T>,
    return_coefficients: bool,
    return_leverage: bool,
    return_residuals: bool,
    return_robustness_weights: bool,
    return_diagnostics: bool,
    cross_validation: Option<CVConfig<T>>,
    bootstrap: Option<BootstrapConfig<T>>,
}

impl<T: FloatLinalg + DistanceLinalg + KernelLinalg + Debug + Send + Sync> LoessModel<T> {
    /// Engine configuration of this model.
    pub fn config(&self) -> &LoessConfig<T> {
        &self.config
    }

    /// Evaluate the curve fitted on `(x, y)` at `eval_x`.
    ///
    /// Query points may lie anywhere, including outside the training range.
    /// An empty `eval_x` gives an empty result.
    pub fn evaluate(&self, x: &[T], y: &[T], eval_x: &[T]) -> Result<LoessResult<T>, LoessError> {
        self.validate(x, y)?;
        Validator::validate_eval_points(eval_x)?;

        let (executor, cv_scores) = self.prepare(x, y)?;
        let options = PassOptions {
            coefficients: self.return_coefficients,
            leverage: self.return_leverage,
        };
        let output = executor.run(x, y, eval_x, options);

        Ok(LoessResult {
            x: eval_x.to_vec(),
            y: output.pass.values,
            status: output.pass.status,
            coefficients: output.pass.coefficients,
            leverage: output.pass.leverage,
            residuals: None,
            robustness_weights: self.robustness_output(output.robustness_weights, x.len()),
            diagnostics: None,
            span_used: executor.span,
            degree: executor.polynomial_degree,
            weight_function: executor.weight_function,
            window_size: output.window_size,
            iterations_used: output.iterations_used,
            cv_scores,
        })
    }

    /// Smooth `(x, y)`: evaluate at the training x values themselves.
    ///
    /// Residuals and diagnostics are available only in this mode.
    pub fn fit(&self, x: &[T], y: &[T]) -> Result<LoessResult<T>, LoessError> {
        self.validate(x, y)?;

        let (executor, cv_scores) = self.prepare(x, y)?;
        let options = PassOptions {
            coefficients: self.return_coefficients,
            leverage: self.return_leverage || self.return_diagnostics,
        };
        let output = executor.run(x, y, x, options);
        let fitted = output.pass.values;

        // L_ii = K(0) * rw_i * (XᵀWX)⁻¹₀₀ with K(0) = 1
        let leverage = match (output.pass.leverage, output.robustness_weights.as_deref()) {
            (Some(mut lev), Some(rw)) => {
                lev.iter_mut().zip(rw).for_each(|(l, &w)| *l = *l * w);
                Some(lev)
            }
            (lev, _) => lev,
        };

        let diagnostics = self
            .return_diagnostics
            .then(|| Diagnostics::compute(y, &fitted, leverage.as_deref()));

        let residuals = self.return_residuals.then(|| {
            y.iter()
                .zip(&fitted)
                .map(|(&yi, &fi)| yi - fi)
                .collect::<Vec<T>>()
        });

        Ok(LoessResult {
            x: x.to_vec(),
            y: fitted,
            status: output.pass.status,
            coefficients: output.pass.coefficients,
            leverage: if self.return_leverage { leverage } else { None },
            residuals,
            robustness_weights: self.robustness_output(output.robustness_weights, x.len()),
            diagnostics,
            span_used: executor.span,
            degree: executor.polynomial_degree,
            weight_function: executor.weight_function,
            window_size: output.window_size,
            iterations_used: output.iterations_used,
            cv_scores,
        })
    }

    /// Bootstrap intervals of the curve fitted on `(x, y)` at `eval_x`.
    ///
    /// Uses the configured [`BootstrapConfig`], or 1000 replicates at the
    /// 0.95 level with seed 0 when none was set.
    pub fn bootstrap(
        &self,
        x: &[T],
        y: &[T],
        eval_x: &[T],
    ) -> Result<BootstrapResult<T>, LoessError> {
        self.validate(x, y)?;
        Validator::validate_eval_points(eval_x)?;

        let (executor, _) = self.prepare(x, y)?;
        let config = self.bootstrap.unwrap_or_default();
        Ok(config.run(&executor, x, y, eval_x))
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn validate(&self, x: &[T], y: &[T]) -> Result<(), LoessError> {
        Validator::validate_inputs(x, y)?;
        if let Some(CVKind::KFold(k)) = self.cross_validation.as_ref().map(|cv| cv.kind()) {
            Validator::validate_folds(k, x.len())?;
        }
        Ok(())
    }

    /// Executor for this call, with the span chosen by cross-validation if configured.
    fn prepare(&self, x: &[T], y: &[T]) -> Result<(LoessExecutor<T>, Option<Vec<T>>), LoessError> {
        let executor = LoessExecutor::from_config(&self.config);
        let Some(cv) = &self.cross_validation else {
            return Ok((executor, None));
        };

        let (best_span, scores) = cv.kind().run(x, y, cv.spans(), cv.seed, |tx, ty, qx, span| {
            executor
                .clone()
                .span(span)
                .run(tx, ty, qx, PassOptions::default())
                .pass
                .values
        });
        log::debug!("cross-validation selected span {:?}", best_span);

        Ok((executor.span(best_span), Some(scores)))
    }

    fn robustness_output(&self, weights: Option<Vec<T>>, n: usize) -> Option<Vec<T>> {
        self.return_robustness_weights
            .then(|| weights.unwrap_or_else(|| vec![T::one(); n]))
    }
}

// ============================================================================
// Free Function
// ============================================================================

/// Evaluate a LOESS curve fitted on `(train_x, train_y)` at `eval_x`.
///
/// `degree` must be in [0, 4]. Degenerate local fits are NaN in the output,
/// including every point when the training set has fewer than `degree + 1`
/// distinct x values.
///
/// # Example
///
/// ```
/// use vloess::prelude::*;
///
/// let x: Vec<f64> = (0..10).map(f64::from).collect();
/// let fitted = vloess::evaluate(&x, &x, &[-1.0, 4.5, 12.0], 0.5, 1, Tricube)?;
/// assert!((fitted[1] - 4.5).abs() < 1e-10);
/// # Result::<(), LoessError>::Ok(())
/// ```
pub fn evaluate<T>(
    train_x: &[T],
    train_y: &[T],
    eval_x: &[T],
    span: T,
    degree: i64,
    kernel: WeightFunction,
) -> Result<Vec<T>, LoessError>
where
    T: FloatLinalg + DistanceLinalg + KernelLinalg + Debug + Send + Sync,
{
    let model = LoessBuilder::new()
        .span(span)
        .degree(PolynomialDegree::try_from(degree)?)
        .weight_function(kernel)
        .build()?;
    Ok(model.evaluate(train_x, train_y, eval_x)?.y)
}
