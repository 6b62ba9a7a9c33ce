//! Error types for LOESS evaluation.
//!
//! ## Purpose
//!
//! This module defines the two failure families of the engine:
//! call-level configuration/input errors (`LoessError`) that abort a call
//! before any computation, and per-point fit failures (`FitFailure`) that
//! are recorded in the output slot of a single query point.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors include the offending values.
//! * **Deferred**: Duplicate builder parameters are stored and reported at `build()`.
//! * **No-std**: Uses `alloc` for dynamic messages when `std` is disabled.
//! * **Isolation**: A `FitFailure` never becomes a `LoessError`; siblings keep their fits.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::error::Error;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Call-level Error
// ============================================================================

/// Error type for LOESS operations.
///
/// Every variant is raised before any fitting starts; no partial result is
/// ever returned alongside one.
#[derive(Debug, Clone, PartialEq)]
pub enum LoessError {
    /// Training or evaluation arrays are empty.
    EmptyInput,

    /// `x` and `y` training arrays must have the same number of elements.
    MismatchedInputs {
        /// Number of elements in the `x` array.
        x_len: usize,
        /// Number of elements in the `y` array.
        y_len: usize,
    },

    /// Input data contains NaN or infinite values.
    InvalidNumericValue(String),

    /// Span must be in the range (0, 1].
    InvalidSpan(f64),

    /// Polynomial degree must be an integer in [0, 4].
    InvalidDegree(i64),

    /// Kernel name is not one of the supported weight functions.
    UnknownKernel(String),

    /// Robustness iterations must be in [0, 1000].
    InvalidIterations(usize),

    /// Chunk size must be at least 1.
    InvalidChunkSize(usize),

    /// Bootstrap needs at least 2 replicates.
    InvalidReplicates(usize),

    /// Interval level must be strictly between 0 and 1.
    InvalidIntervalLevel(f64),

    /// K-fold cross-validation needs at least 2 folds and no more folds than points.
    InvalidFolds {
        /// Requested number of folds.
        folds: usize,
        /// Number of training points.
        n: usize,
    },

    /// Cross-validation was requested without candidate spans.
    EmptyCandidates,

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

impl Display for LoessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyInput => write!(f, "Input arrays are empty"),
            Self::MismatchedInputs { x_len, y_len } => {
                write!(f, "Length mismatch: x has {x_len} points, y has {y_len}")
            }
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::InvalidSpan(span) => write!(f, "Invalid span: {span} (must be > 0 and <= 1)"),
            Self::InvalidDegree(degree) => {
                write!(f, "Invalid degree: {degree} (must be in [0, 4])")
            }
            Self::UnknownKernel(name) => write!(f, "Unknown kernel: '{name}'"),
            Self::InvalidIterations(iter) => {
                write!(f, "Invalid iterations: {iter} (must be in [0, 1000])")
            }
            Self::InvalidChunkSize(size) => {
                write!(f, "Invalid chunk_size: {size} (must be at least 1)")
            }
            Self::InvalidReplicates(r) => {
                write!(f, "Invalid replicates: {r} (must be at least 2)")
            }
            Self::InvalidIntervalLevel(level) => {
                write!(f, "Invalid interval level: {level} (must be > 0 and < 1)")
            }
            Self::InvalidFolds { folds, n } => {
                write!(f, "Invalid folds: {folds} (must be in [2, {n}])")
            }
            Self::EmptyCandidates => write!(f, "No candidate spans for cross-validation"),
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl Error for LoessError {}

// ============================================================================
// Per-point Failure
// ============================================================================

/// Reason a single query point could not be fitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitFailure {
    /// Fewer distinct x values with nonzero weight than polynomial coefficients.
    InsufficientSupport {
        /// Distinct weighted x values in the window.
        distinct: usize,
        /// Coefficients required by the degree.
        required: usize,
    },

    /// The weighted design matrix is numerically rank deficient.
    RankDeficient {
        /// Numerical rank found by the decomposition.
        rank: usize,
        /// Coefficients required by the degree.
        required: usize,
    },

    /// The solve produced a non-finite coefficient.
    NonFinite,
}

impl Display for FitFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::InsufficientSupport { distinct, required } => write!(
                f,
                "insufficient support: {distinct} distinct weighted x values, need {required}"
            ),
            Self::RankDeficient { rank, required } => {
                write!(f, "rank deficient design: rank {rank}, need {required}")
            }
            Self::NonFinite => write!(f, "non-finite coefficients"),
        }
    }
}

#[cfg(feature = "std")]
impl Error for FitFailure {}
