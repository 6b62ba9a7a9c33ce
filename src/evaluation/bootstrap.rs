//! Bootstrap resampling driver for empirical LOESS intervals.
//!
//! ## Purpose
//!
//! This module repeatedly refits the curve on with-replacement resamples of
//! the training set, evaluates every refit at the same query points, and
//! summarizes the replicate values per query point as lower/median/upper
//! quantiles.
//!
//! ## Design notes
//!
//! * **Seeding**: Each replicate owns a `StdRng` seeded from the base seed
//!   and its replicate index, so replicate `r` draws the same resample in
//!   sequential and parallel runs.
//! * **Parallelism**: With the `parallel` feature, replicates run on rayon;
//!   each replicate's own evaluation is then sequential.
//! * **Degenerate values**: NaN replicate values are excluded from the
//!   quantiles and counted per query point.
//!
//! ## Key concepts
//!
//! * **Replicate**: One resample of size n drawn with replacement and one
//!   full evaluation (robustness iterations included) at the query points.
//! * **Quantiles**: Linear interpolation between order statistics at
//!   `(1 - level) / 2`, `0.5` and `(1 + level) / 2`.
//!
//! ## Invariants
//!
//! * `lower[j] <= median[j] <= upper[j]` whenever `valid_counts[j] > 0`.
//! * Results are a deterministic function of the data, parameters and seed.
//!
//! ## Non-goals
//!
//! * This module does not validate its configuration (handled by `validator`).
//! * This module does not provide parametric (t-based) intervals.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::cmp::Ordering;
use core::fmt::{Debug, Display, Formatter, Result};
use num_traits::Float;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

// Internal dependencies
use crate::engine::executor::{LoessExecutor, PassOptions};
use crate::math::distance::DistanceLinalg;
use crate::math::kernel::KernelLinalg;
use crate::math::linalg::FloatLinalg;
use crate::math::mad::quantile_sorted;

/// Default seed of the resampling streams.
pub const DEFAULT_SEED: u64 = 0;

/// Default number of resamples.
pub const DEFAULT_REPLICATES: usize = 1000;

/// Default central interval level.
pub const DEFAULT_LEVEL: f64 = 0.95;

/// Odd constant spreading replicate indices over the seed space.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

// ============================================================================
// Configuration
// ============================================================================

/// Bootstrap configuration: replicate count, interval level and seed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BootstrapConfig<T> {
    /// Number of resamples.
    pub(crate) replicates: usize,
    /// Central interval level in (0, 1).
    pub(crate) level: T,
    /// Base seed of the resampling streams.
    pub(crate) seed: u64,
    /// Keep the full replicate matrix in the result.
    pub(crate) keep_replicates: bool,
}

impl<T: Copy> BootstrapConfig<T> {
    /// Create a configuration with `replicates` resamples and a central
    /// interval at `level` (e.g. 0.95).
    pub fn new(replicates: usize, level: T) -> Self {
        Self {
            replicates,
            level,
            seed: DEFAULT_SEED,
            keep_replicates: false,
        }
    }

    /// Set the base seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Keep every replicate's fitted values in the result.
    pub fn return_replicates(mut self) -> Self {
        self.keep_replicates = true;
        self
    }

    /// Number of resamples.
    pub fn replicates(&self) -> usize {
        self.replicates
    }

    /// Interval level.
    pub fn level(&self) -> T {
        self.level
    }
}

impl<T: Float> Default for BootstrapConfig<T> {
    fn default() -> Self {
        Self::new(
            DEFAULT_REPLICATES,
            T::from(DEFAULT_LEVEL).unwrap_or_else(T::zero),
        )
    }
}

/// Seed of replicate `r`'s resampling stream.
#[inline]
pub fn replicate_seed(seed: u64, r: usize) -> u64 {
    seed.wrapping_add((r as u64).wrapping_mul(SEED_STRIDE))
}

// ============================================================================
// Result
// ============================================================================

/// Per-query-point bootstrap summary.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapResult<T> {
    /// Evaluation points, in the order given.
    pub x: Vec<T>,

    /// Fit on the full (non-resampled) training set.
    pub fitted: Vec<T>,

    /// Lower quantile at `(1 - level) / 2`.
    pub lower: Vec<T>,

    /// Median of the replicate values.
    pub median: Vec<T>,

    /// Upper quantile at `(1 + level) / 2`.
    pub upper: Vec<T>,

    /// Number of finite replicate values per query point.
    pub valid_counts: Vec<usize>,

    /// Replicate values, one row per replicate (if requested).
    pub replicates: Option<Vec<Vec<T>>>,

    /// Interval level.
    pub level: T,

    /// Number of replicates drawn.
    pub n_replicates: usize,
}

impl<T: Float> BootstrapResult<T> {
    /// Interval widths `upper - lower`.
    pub fn widths(&self) -> Vec<T> {
        self.upper
            .iter()
            .zip(&self.lower)
            .map(|(&u, &l)| u - l)
            .collect()
    }
}

impl<T: Float + Display + Debug> Display for BootstrapResult<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Bootstrap:")?;
        writeln!(f, "  Replicates: {}", self.n_replicates)?;
        writeln!(f, "  Level:      {}", self.level)?;
        writeln!(f)?;
        writeln!(
            f,
            "{:>10} {:>12} {:>12} {:>12} {:>12}",
            "X", "Y_fit", "Lower", "Median", "Upper"
        )?;
        writeln!(f, "{:-<62}", "")?;
        for j in 0..self.x.len() {
            writeln!(
                f,
                "{:>10.4} {:>12.6} {:>12.6} {:>12.6} {:>12.6}",
                self.x[j], self.fitted[j], self.lower[j], self.median[j], self.upper[j]
            )?;
        }
        Ok(())
    }
}

// ============================================================================
// Driver
// ============================================================================

impl<T: FloatLinalg + DistanceLinalg + KernelLinalg + Debug + Send + Sync> BootstrapConfig<T> {
    /// Run the bootstrap with `executor` and summarize at `eval_x`.
    pub fn run(
        &self,
        executor: &LoessExecutor<T>,
        x: &[T],
        y: &[T],
        eval_x: &[T],
    ) -> BootstrapResult<T> {
        let fitted = executor.run(x, y, eval_x, PassOptions::default()).pass.values;
        let samples = self.draw_replicates(executor, x, y, eval_x);

        let half = T::from(0.5).unwrap_or_else(T::one);
        let lower_p = (T::one() - self.level) * half;
        let upper_p = (T::one() + self.level) * half;

        let m = eval_x.len();
        let mut lower = Vec::with_capacity(m);
        let mut median = Vec::with_capacity(m);
        let mut upper = Vec::with_capacity(m);
        let mut valid_counts = Vec::with_capacity(m);
        let mut column = Vec::with_capacity(self.replicates);

        for j in 0..m {
            column.clear();
            column.extend(samples.iter().map(|row| row[j]).filter(|v| v.is_finite()));
            column.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

            lower.push(quantile_sorted(&column, lower_p));
            median.push(quantile_sorted(&column, half));
            upper.push(quantile_sorted(&column, upper_p));
            valid_counts.push(column.len());
        }

        let empty = valid_counts.iter().filter(|&&c| c == 0).count();
        if empty > 0 {
            log::warn!(
                "{} of {} evaluation points have no finite bootstrap replicate",
                empty,
                m
            );
        }
        log::debug!(
            "bootstrap: replicates={}, n={}, m={}, seed={}",
            self.replicates,
            x.len(),
            m,
            self.seed
        );

        BootstrapResult {
            x: eval_x.to_vec(),
            fitted,
            lower,
            median,
            upper,
            valid_counts,
            replicates: self.keep_replicates.then_some(samples),
            level: self.level,
            n_replicates: self.replicates,
        }
    }

    /// Fitted values of every replicate, in replicate order.
    fn draw_replicates(
        &self,
        executor: &LoessExecutor<T>,
        x: &[T],
        y: &[T],
        eval_x: &[T],
    ) -> Vec<Vec<T>> {
        #[cfg(feature = "parallel")]
        if executor.parallel {
            let inner = executor.clone().parallel(false);
            return (0..self.replicates)
                .into_par_iter()
                .map(|r| self.replicate(&inner, x, y, eval_x, r))
                .collect();
        }

        (0..self.replicates)
            .map(|r| self.replicate(executor, x, y, eval_x, r))
            .collect()
    }

    /// Resample the training set with replacement and evaluate at `eval_x`.
    fn replicate(
        &self,
        executor: &LoessExecutor<T>,
        x: &[T],
        y: &[T],
        eval_x: &[T],
        r: usize,
    ) -> Vec<T> {
        let n = x.len();
        let mut rng = StdRng::seed_from_u64(replicate_seed(self.seed, r));
        let mut rx = Vec::with_capacity(n);
        let mut ry = Vec::with_capacity(n);
        for _ in 0..n {
            let i = rng.random_range(0..n);
            rx.push(x[i]);
            ry.push(y[i]);
        }

        executor
            .run(&rx, &ry, eval_x, PassOptions::default())
            .pass
            .values
    }
}
