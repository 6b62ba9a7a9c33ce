//! Input validation for LOESS configuration and data.
//!
//! ## Purpose
//!
//! This module checks training data, evaluation points and every tunable
//! parameter before any computation starts.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Parameter Bounds**: Enforces constraints like span in (0, 1].
//! * **Finite Checks**: Ensures all inputs are finite (no NaN/Inf).
//! * **Regression Requirements**: At least `degree + 1` training points.
//!
//! ## Invariants
//!
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not sort, transform, or filter input data.
//! * This module does not provide automatic correction of invalid inputs.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::LoessError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for LOESS configuration and input data.
///
/// All methods return `Result<(), LoessError>` and fail fast upon
/// identifying the first violation.
pub struct Validator;

impl Validator {
    /// Maximum number of robustness iterations.
    pub const MAX_ITERATIONS: usize = 1000;

    // ========================================================================
    // Core Input Validation
    // ========================================================================

    /// Validate training arrays: non-empty, equal length and finite.
    ///
    /// A single point is accepted; windows too small for the polynomial
    /// degenerate per query.
    pub fn validate_inputs<T: Float>(x: &[T], y: &[T]) -> Result<(), LoessError> {
        if x.is_empty() || y.is_empty() {
            return Err(LoessError::EmptyInput);
        }

        if x.len() != y.len() {
            return Err(LoessError::MismatchedInputs {
                x_len: x.len(),
                y_len: y.len(),
            });
        }

        Self::validate_finite(x, "x")?;
        Self::validate_finite(y, "y")
    }

    /// Validate evaluation points: finite. An empty set is allowed.
    pub fn validate_eval_points<T: Float>(eval_x: &[T]) -> Result<(), LoessError> {
        Self::validate_finite(eval_x, "eval_x")
    }

    fn validate_finite<T: Float>(values: &[T], name: &str) -> Result<(), LoessError> {
        match values.iter().position(|v| !v.is_finite()) {
            Some(i) => Err(LoessError::InvalidNumericValue(format!(
                "{}[{}]={}",
                name,
                i,
                values[i].to_f64().unwrap_or(f64::NAN)
            ))),
            None => Ok(()),
        }
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the span (fraction of points per window).
    pub fn validate_span<T: Float>(span: T) -> Result<(), LoessError> {
        if !span.is_finite() || span <= T::zero() || span > T::one() {
            return Err(LoessError::InvalidSpan(span.to_f64().unwrap_or(f64::NAN)));
        }
        Ok(())
    }

    /// Validate the number of robustness iterations.
    pub fn validate_iterations(iterations: usize) -> Result<(), LoessError> {
        if iterations > Self::MAX_ITERATIONS {
            return Err(LoessError::InvalidIterations(iterations));
        }
        Ok(())
    }

    /// Validate the number of query rows per chunk.
    pub fn validate_chunk_size(chunk_size: usize) -> Result<(), LoessError> {
        if chunk_size == 0 {
            return Err(LoessError::InvalidChunkSize(chunk_size));
        }
        Ok(())
    }

    /// Validate the number of bootstrap replicates.
    pub fn validate_replicates(replicates: usize) -> Result<(), LoessError> {
        if replicates < 2 {
            return Err(LoessError::InvalidReplicates(replicates));
        }
        Ok(())
    }

    /// Validate the interval level.
    pub fn validate_interval_level<T: Float>(level: T) -> Result<(), LoessError> {
        if !level.is_finite() || level <= T::zero() || level >= T::one() {
            return Err(LoessError::InvalidIntervalLevel(
                level.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate K-fold cross-validation against `n` training points.
    pub fn validate_folds(folds: usize, n: usize) -> Result<(), LoessError> {
        if folds < 2 || folds > n {
            return Err(LoessError::InvalidFolds { folds, n });
        }
        Ok(())
    }

    /// Validate candidate spans for cross-validation.
    pub fn validate_candidates<T: Float>(candidates: &[T]) -> Result<(), LoessError> {
        if candidates.is_empty() {
            return Err(LoessError::EmptyCandidates);
        }
        candidates.iter().try_for_each(|&s| Self::validate_span(s))
    }

    // ========================================================================
    // Builder Validation
    // ========================================================================

    /// Report a parameter that was configured twice.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), LoessError> {
        if let Some(parameter) = duplicate_param {
            return Err(LoessError::DuplicateParameter { parameter });
        }
        Ok(())
    }
}
