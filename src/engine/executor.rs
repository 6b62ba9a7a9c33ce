//! Execution engine for batched LOESS evaluation.
//!
//! ## Purpose
//!
//! This module provides the batch evaluator that orchestrates one LOESS call:
//! neighborhoods for a chunk of query points, kernel weights on the flat
//! normalized distances, the batched design build, per-point solves, and the
//! ordered assembly of values and statuses. It also runs the robustness
//! loop (fit in-sample, compute residuals, reweight, repeat) when requested.
//!
//! ## Design notes
//!
//! * **Chunking**: Query points are processed `chunk_size` at a time so the
//!   distance matrix stays at `chunk_size × n`.
//! * **Workspaces**: One `ChunkBuffer` per worker, reused across chunks.
//! * **Parallelism**: With the `parallel` feature, chunks run on rayon with
//!   one buffer per thread (`map_init`); results are concatenated in chunk
//!   order, so output is identical to the sequential path.
//! * **Isolation**: A degenerate point only affects its own output slot.
//!
//! ## Key concepts
//!
//! * **Pass**: One evaluation of the curve at a set of query points with fixed
//!   robustness weights.
//! * **Execution Loop**: Fit -> Residuals -> Weights, repeated `iterations`
//!   times before the final pass at the evaluation points.
//!
//! ## Invariants
//!
//! * Output vectors are aligned with the query points.
//! * Robustness weights are always in [0, 1].
//! * Window size is at least `degree + 1` and at most n.
//!
//! ## Non-goals
//!
//! * This module does not validate input data (handled by `validator`).
//! * This module does not sort input data.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};
#[cfg(feature = "std")]
use std::{vec, vec::Vec};

// External dependencies
use core::fmt::Debug;
use num_traits::Float;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

// Internal dependencies
use crate::algorithms::regression::{
    LocalFit, PolynomialDegree, RegressionContext, build_weighted_designs,
};
use crate::algorithms::robustness::RobustnessMethod;
use crate::engine::output::PointStatus;
use crate::math::distance::DistanceLinalg;
use crate::math::kernel::{KernelLinalg, WeightFunction};
use crate::math::linalg::FloatLinalg;
use crate::math::neighborhood::{NeighborhoodSelector, window_size};
use crate::primitives::buffer::ChunkBuffer;
use crate::primitives::errors::FitFailure;

/// Default number of query points per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 256;

// ============================================================================
// Configuration
// ============================================================================

/// Engine-level configuration of a LOESS evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct LoessConfig<T> {
    /// Fraction of training points in each local window, in (0, 1].
    pub span: T,

    /// Polynomial degree of the local fits.
    pub polynomial_degree: PolynomialDegree,

    /// Kernel weight function.
    pub weight_function: WeightFunction,

    /// Number of robustness iterations (0 = plain LOESS).
    pub iterations: usize,

    /// Robustness method for iterative refinement.
    pub robustness_method: RobustnessMethod,

    /// Query points per chunk.
    pub chunk_size: usize,

    /// Whether to use parallel execution.
    pub parallel: bool,
}

impl<T: Float> Default for LoessConfig<T> {
    fn default() -> Self {
        Self {
            span: T::from(0.75).unwrap_or_else(T::one),
            polynomial_degree: PolynomialDegree::default(),
            weight_function: WeightFunction::default(),
            iterations: 0,
            robustness_method: RobustnessMethod::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            parallel: false,
        }
    }
}

/// Per-point extras collected during a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PassOptions {
    /// Collect the local polynomial coefficients.
    pub coefficients: bool,
    /// Collect `(XᵀWX)⁻¹₀₀`.
    pub leverage: bool,
}

// ============================================================================
// Pass Output
// ============================================================================

/// Values and statuses of one pass, aligned with its query points.
#[derive(Debug, Clone, PartialEq)]
pub struct PassOutput<T> {
    /// Fitted values (NaN where degenerate).
    pub values: Vec<T>,
    /// Per-point status.
    pub status: Vec<PointStatus>,
    /// Flattened coefficients, if requested.
    pub coefficients: Option<Vec<T>>,
    /// Leverage terms, if requested.
    pub leverage: Option<Vec<T>>,
}

impl<T: Float> PassOutput<T> {
    fn with_capacity(m: usize, n_coefficients: usize, options: PassOptions) -> Self {
        Self {
            values: Vec::with_capacity(m),
            status: Vec::with_capacity(m),
            coefficients: options
                .coefficients
                .then(|| Vec::with_capacity(m * n_coefficients)),
            leverage: options.leverage.then(|| Vec::with_capacity(m)),
        }
    }

    fn push_fit(&mut self, fit: LocalFit<T>) {
        self.values.push(fit.value);
        self.status.push(PointStatus::Fitted);
        if let Some(c) = self.coefficients.as_mut() {
            c.extend_from_slice(&fit.coefficients);
        }
        if let Some(l) = self.leverage.as_mut() {
            l.push(fit.leverage);
        }
    }

    fn push_failure(&mut self, reason: FitFailure, n_coefficients: usize) {
        self.values.push(T::nan());
        self.status.push(PointStatus::Degenerate(reason));
        if let Some(c) = self.coefficients.as_mut() {
            c.extend(core::iter::repeat_n(T::nan(), n_coefficients));
        }
        if let Some(l) = self.leverage.as_mut() {
            l.push(T::nan());
        }
    }

    #[cfg(feature = "parallel")]
    fn append(&mut self, mut other: Self) {
        self.values.append(&mut other.values);
        self.status.append(&mut other.status);
        if let (Some(c), Some(oc)) = (self.coefficients.as_mut(), other.coefficients.as_mut()) {
            c.append(oc);
        }
        if let (Some(l), Some(ol)) = (self.leverage.as_mut(), other.leverage.as_mut()) {
            l.append(ol);
        }
    }

    /// Number of degenerate points.
    pub fn degenerate_count(&self) -> usize {
        self.status.iter().filter(|s| !s.is_fitted()).count()
    }
}

/// Output of a full run: the final pass plus robustness metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutorOutput<T> {
    /// Final pass at the evaluation points.
    pub pass: PassOutput<T>,
    /// Final robustness weights of the training points, if iterations ran.
    pub robustness_weights: Option<Vec<T>>,
    /// Neighbors per local fit.
    pub window_size: usize,
    /// Robustness iterations performed.
    pub iterations_used: usize,
}

// ============================================================================
// Executor
// ============================================================================

/// Unified executor for LOESS evaluation.
#[derive(Debug, Clone)]
pub struct LoessExecutor<T> {
    /// Span (0, 1].
    pub span: T,

    /// Number of robustness iterations.
    pub iterations: usize,

    /// Kernel weight function.
    pub weight_function: WeightFunction,

    /// Robustness method for iterative refinement.
    pub robustness_method: RobustnessMethod,

    /// Polynomial degree for local regression.
    pub polynomial_degree: PolynomialDegree,

    /// Query points per chunk.
    pub chunk_size: usize,

    /// Whether to use parallel execution.
    pub parallel: bool,
}

impl<T: FloatLinalg + DistanceLinalg + KernelLinalg + Debug + Send + Sync> Default
    for LoessExecutor<T>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FloatLinalg + DistanceLinalg + KernelLinalg + Debug + Send + Sync> LoessExecutor<T> {
    // ========================================================================
    // Constructor and Builder Methods
    // ========================================================================

    /// Create a new executor with default parameters.
    pub fn new() -> Self {
        Self::from_config(&LoessConfig::default())
    }

    /// Create a new executor from a `LoessConfig`.
    pub fn from_config(config: &LoessConfig<T>) -> Self {
        Self {
            span: config.span,
            iterations: config.iterations,
            weight_function: config.weight_function,
            robustness_method: config.robustness_method,
            polynomial_degree: config.polynomial_degree,
            chunk_size: config.chunk_size,
            parallel: config.parallel,
        }
    }

    /// Set the span.
    pub fn span(mut self, span: T) -> Self {
        self.span = span;
        self
    }

    /// Set the number of robustness iterations.
    pub fn iterations(mut self, niter: usize) -> Self {
        self.iterations = niter;
        self
    }

    /// Set the kernel weight function.
    pub fn weight_function(mut self, wf: WeightFunction) -> Self {
        self.weight_function = wf;
        self
    }

    /// Set the robustness method.
    pub fn robustness_method(mut self, method: RobustnessMethod) -> Self {
        self.robustness_method = method;
        self
    }

    /// Set the polynomial degree.
    pub fn polynomial_degree(mut self, degree: PolynomialDegree) -> Self {
        self.polynomial_degree = degree;
        self
    }

    /// Set the number of query points per chunk.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set whether to use parallel execution.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Neighbors per local fit for `n` training points.
    #[inline]
    pub fn window_size(&self, n: usize) -> usize {
        window_size(n, self.span, self.polynomial_degree.num_coefficients())
    }

    // ========================================================================
    // Main Entry Points
    // ========================================================================

    /// Evaluate the curve at `eval_x`, running robustness iterations first.
    pub fn run(&self, x: &[T], y: &[T], eval_x: &[T], options: PassOptions) -> ExecutorOutput<T> {
        let robustness_weights = self.robustness_weights(x, y);
        let pass = self.pass(x, y, eval_x, robustness_weights.as_deref(), options);
        let window_size = self.window_size(x.len());

        log::debug!(
            "loess pass: n={}, m={}, k={}, degree={}, kernel={}, iterations={}",
            x.len(),
            eval_x.len(),
            window_size,
            self.polynomial_degree.value(),
            self.weight_function,
            self.iterations
        );
        let degenerate = pass.degenerate_count();
        if degenerate > 0 {
            log::warn!(
                "{} of {} evaluation points have degenerate local fits",
                degenerate,
                eval_x.len()
            );
        }

        ExecutorOutput {
            pass,
            robustness_weights,
            window_size,
            iterations_used: self.iterations,
        }
    }

    /// Final robustness weights after `iterations` in-sample refits.
    ///
    /// Returns `None` when no iterations are configured.
    pub fn robustness_weights(&self, x: &[T], y: &[T]) -> Option<Vec<T>> {
        if self.iterations == 0 {
            return None;
        }

        let n = x.len();
        let mut weights = vec![T::one(); n];
        let mut residuals = vec![T::zero(); n];
        let mut scratch = Vec::with_capacity(n);

        for iter in 0..self.iterations {
            let robustness = (iter > 0).then_some(weights.as_slice());
            let fit = self.pass(x, y, x, robustness, PassOptions::default());
            for ((r, &yi), &fi) in residuals.iter_mut().zip(y).zip(&fit.values) {
                *r = yi - fi;
            }
            self.robustness_method
                .compute_weights(&residuals, &mut weights, &mut scratch);
        }

        Some(weights)
    }

    /// Evaluate the curve at `queries` with fixed robustness weights.
    pub fn pass(
        &self,
        x: &[T],
        y: &[T],
        queries: &[T],
        robustness: Option<&[T]>,
        options: PassOptions,
    ) -> PassOutput<T> {
        let n = x.len();
        let m = queries.len();
        let p = self.polynomial_degree.num_coefficients();
        let selector = NeighborhoodSelector::new(self.window_size(n));
        let chunk = self.chunk_size.max(1);

        #[cfg(feature = "parallel")]
        if self.parallel && m > chunk {
            let parts: Vec<PassOutput<T>> = queries
                .par_chunks(chunk)
                .map_init(
                    || ChunkBuffer::new(chunk, n, selector.k(), p),
                    |buffer, q| {
                        let mut part = PassOutput::with_capacity(q.len(), p, options);
                        self.fit_chunk(x, y, q, &selector, robustness, buffer, &mut part);
                        part
                    },
                )
                .collect();

            let mut out = PassOutput::with_capacity(m, p, options);
            for part in parts {
                out.append(part);
            }
            return out;
        }

        let mut buffer = ChunkBuffer::new(chunk.min(m), n, selector.k(), p);
        let mut out = PassOutput::with_capacity(m, p, options);
        for q in queries.chunks(chunk) {
            self.fit_chunk(x, y, q, &selector, robustness, &mut buffer, &mut out);
        }
        out
    }

    /// Run the full pipeline on one chunk of query points.
    #[allow(clippy::too_many_arguments)]
    fn fit_chunk(
        &self,
        x: &[T],
        y: &[T],
        queries: &[T],
        selector: &NeighborhoodSelector,
        robustness: Option<&[T]>,
        buffer: &mut ChunkBuffer<T>,
        out: &mut PassOutput<T>,
    ) {
        let n = x.len();
        let k = selector.k();
        let p = self.polynomial_degree.num_coefficients();

        buffer.prepare(queries.len(), n, k, p);
        selector.select_chunk(x, queries, buffer);
        selector.compute_weights(self.weight_function, robustness, buffer);
        build_weighted_designs(x, y, queries, k, p, buffer);

        let block = k * p;
        for r in 0..queries.len() {
            let window = selector.window(buffer, r);
            let context = RegressionContext {
                x,
                y,
                indices: window.indices,
                weights: window.weights,
                design: &buffer.design[r * block..(r + 1) * block],
                rhs: &buffer.rhs[r * k..(r + 1) * k],
                polynomial_degree: self.polynomial_degree,
            };

            match context.fit() {
                Ok(fit) => out.push_fit(fit),
                Err(reason) => out.push_failure(reason, p),
            }
        }
    }
}
