//! Cross-validation for LOESS span selection.
//!
//! ## Purpose
//!
//! This module selects the span that minimizes out-of-sample prediction
//! error, with k-fold and leave-one-out cross-validation. Held-out points are
//! evaluated directly by the engine at their own x values.
//!
//! ## Design notes
//!
//! * **Generic Strategy**: Supports both k-fold and leave-one-out (LOOCV).
//! * **Direct Prediction**: The predictor callback evaluates the curve fitted
//!   on the training folds at the test x values; no interpolation is needed.
//! * **Shuffling**: K-fold indices are optionally shuffled with a seeded `StdRng`.
//!
//! ## Key concepts
//!
//! * **K-Fold**: Partitions data into k contiguous blocks of the (shuffled)
//!   index order; the last fold takes the remainder.
//! * **LOOCV**: Each point is held out once; the score is the RMSE over all
//!   held-out predictions.
//! * **K-Fold Score**: Mean of the fold RMSEs; degenerate predictions (NaN)
//!   are skipped.
//!
//! ## Invariants
//!
//! * Training and test sets are disjoint in each fold.
//! * The best span minimizes the score; ties keep the earlier candidate.
//!
//! ## Non-goals
//!
//! * This module does not perform the actual smoothing (done via callback).
//! * This module does not provide confidence intervals for CV scores.

// Feature-gated dependencies
#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};
#[cfg(feature = "std")]
use std::{vec, vec::Vec};

// External dependencies
use core::cmp::Ordering;
use num_traits::Float;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

// ============================================================================
// CV Kind
// ============================================================================

/// Cross-validation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CVKind {
    /// K-fold cross-validation with k folds.
    KFold(usize),
    /// Leave-one-out cross-validation.
    #[allow(clippy::upper_case_acronyms)]
    LOOCV,
}

// ============================================================================
// Cross-Validation Configuration
// ============================================================================

/// Cross-validation configuration combining strategy, spans, and seed.
#[derive(Debug, Clone, PartialEq)]
pub struct CVConfig<T> {
    /// The CV strategy kind.
    pub(crate) kind: CVKind,
    /// Candidate spans to evaluate.
    pub(crate) spans: Vec<T>,
    /// Random seed for reproducible fold shuffling (K-Fold only).
    pub(crate) seed: Option<u64>,
}

impl<T> CVConfig<T> {
    /// Set the random seed for reproducible K-Fold cross-validation.
    ///
    /// Without a seed folds are contiguous blocks of the input order.
    /// LOOCV is deterministic and ignores the seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Candidate spans.
    pub fn spans(&self) -> &[T] {
        &self.spans
    }

    /// Strategy kind.
    pub fn kind(&self) -> CVKind {
        self.kind
    }
}

/// Create a K-fold cross-validation configuration.
#[allow(non_snake_case)]
pub fn KFold<T: Copy>(k: usize, spans: &[T]) -> CVConfig<T> {
    CVConfig {
        kind: CVKind::KFold(k),
        spans: spans.to_vec(),
        seed: None,
    }
}

/// Create a leave-one-out cross-validation configuration.
#[allow(non_snake_case)]
pub fn LOOCV<T: Copy>(spans: &[T]) -> CVConfig<T> {
    CVConfig {
        kind: CVKind::LOOCV,
        spans: spans.to_vec(),
        seed: None,
    }
}

// ============================================================================
// Cross-Validation Execution
// ============================================================================

impl CVKind {
    /// Run cross-validation and return `(best span, scores)`.
    ///
    /// `predictor(train_x, train_y, test_x, span)` returns predictions at `test_x`.
    pub fn run<T, F>(
        self,
        x: &[T],
        y: &[T],
        spans: &[T],
        seed: Option<u64>,
        predictor: F,
    ) -> (T, Vec<T>)
    where
        T: Float,
        F: Fn(&[T], &[T], &[T], T) -> Vec<T>,
    {
        match self {
            CVKind::KFold(k) => Self::kfold_cross_validation(x, y, spans, k, seed, predictor),
            CVKind::LOOCV => Self::leave_one_out_cross_validation(x, y, spans, predictor),
        }
    }

    /// Build a data subset from a list of indices into provided scratch buffers.
    pub fn build_subset_inplace<T: Float>(
        x: &[T],
        y: &[T],
        indices: &[usize],
        tx: &mut Vec<T>,
        ty: &mut Vec<T>,
    ) {
        tx.clear();
        ty.clear();
        for &i in indices {
            tx.push(x[i]);
            ty.push(y[i]);
        }
    }

    /// Select the best span based on cross-validation scores.
    fn select_best_span<T: Float>(spans: &[T], scores: Vec<T>) -> (T, Vec<T>) {
        let best_idx = scores
            .iter()
            .enumerate()
            .min_by(|(i, a), (j, b)| {
                a.partial_cmp(b)
                    .unwrap_or(Ordering::Equal)
                    .then(i.cmp(j))
            })
            .map(|(i, _)| i)
            .unwrap_or(0);

        (
            spans.get(best_idx).copied().unwrap_or_else(T::one),
            scores,
        )
    }

    /// RMSE over the finite predictions, or `None` if there are none.
    fn fold_rmse<T: Float>(actual: &[T], predicted: &[T]) -> Option<T> {
        let (sum_sq, count) = actual
            .iter()
            .zip(predicted)
            .filter(|(_, p)| p.is_finite())
            .fold((T::zero(), 0usize), |(s, c), (&a, &p)| {
                let e = a - p;
                (s + e * e, c + 1)
            });
        (count > 0).then(|| (sum_sq / T::from(count).unwrap_or_else(T::one)).sqrt())
    }

    /// Perform k-fold cross-validation.
    fn kfold_cross_validation<T, F>(
        x: &[T],
        y: &[T],
        spans: &[T],
        k: usize,
        seed: Option<u64>,
        predictor: F,
    ) -> (T, Vec<T>)
    where
        T: Float,
        F: Fn(&[T], &[T], &[T], T) -> Vec<T>,
    {
        let n = x.len();
        let mut cv_scores = vec![T::infinity(); spans.len()];
        if n < k || k < 2 {
            return Self::select_best_span(spans, cv_scores);
        }

        let fold_size = n / k;

        let mut indices: Vec<usize> = (0..n).collect();
        if let Some(s) = seed {
            indices.shuffle(&mut StdRng::seed_from_u64(s));
        }

        let mut train_x = Vec::with_capacity(n);
        let mut train_y = Vec::with_capacity(n);
        let mut test_x = Vec::with_capacity(n - fold_size * (k - 1));
        let mut test_y = Vec::with_capacity(n - fold_size * (k - 1));
        let mut fold_rmses = Vec::with_capacity(k);

        for (span_idx, &span) in spans.iter().enumerate() {
            fold_rmses.clear();

            for fold in 0..k {
                let test_start = fold * fold_size;
                let test_end = if fold == k - 1 {
                    n
                } else {
                    (fold + 1) * fold_size
                };

                Self::build_subset_inplace(x, y, &indices[..test_start], &mut train_x, &mut train_y);
                for &idx in &indices[test_end..] {
                    train_x.push(x[idx]);
                    train_y.push(y[idx]);
                }
                Self::build_subset_inplace(
                    x,
                    y,
                    &indices[test_start..test_end],
                    &mut test_x,
                    &mut test_y,
                );

                let predictions = predictor(&train_x, &train_y, &test_x, span);
                if let Some(rmse) = Self::fold_rmse(&test_y, &predictions) {
                    fold_rmses.push(rmse);
                }
            }

            if !fold_rmses.is_empty() {
                let sum = fold_rmses.iter().fold(T::zero(), |a, &b| a + b);
                cv_scores[span_idx] = sum / T::from(fold_rmses.len()).unwrap_or_else(T::one);
            }
        }

        Self::select_best_span(spans, cv_scores)
    }

    /// Perform leave-one-out cross-validation (LOOCV).
    ///
    /// The score is the RMSE over all finite held-out predictions.
    fn leave_one_out_cross_validation<T, F>(
        x: &[T],
        y: &[T],
        spans: &[T],
        predictor: F,
    ) -> (T, Vec<T>)
    where
        T: Float,
        F: Fn(&[T], &[T], &[T], T) -> Vec<T>,
    {
        let n = x.len();
        let mut cv_scores = vec![T::infinity(); spans.len()];
        if n < 2 {
            return Self::select_best_span(spans, cv_scores);
        }

        let mut train_x = Vec::with_capacity(n - 1);
        let mut train_y = Vec::with_capacity(n - 1);
        let mut predictions = Vec::with_capacity(n);

        for (span_idx, &span) in spans.iter().enumerate() {
            predictions.clear();
            for i in 0..n {
                train_x.clear();
                train_y.clear();
                train_x.extend_from_slice(&x[..i]);
                train_x.extend_from_slice(&x[i + 1..]);
                train_y.extend_from_slice(&y[..i]);
                train_y.extend_from_slice(&y[i + 1..]);

                let predicted = predictor(&train_x, &train_y, &x[i..=i], span);
                predictions.push(predicted.first().copied().unwrap_or_else(T::nan));
            }

            if let Some(rmse) = Self::fold_rmse(y, &predictions) {
                cv_scores[span_idx] = rmse;
            }
        }

        Self::select_best_span(spans, cv_scores)
    }
}
