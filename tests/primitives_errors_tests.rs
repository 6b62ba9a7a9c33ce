#![cfg(feature = "dev")]

use vloess::internals::primitives::errors::{FitFailure, LoessError};

#[test]
fn test_loess_error_display() {
    // EmptyInput
    let err = LoessError::EmptyInput;
    assert_eq!(format!("{}", err), "Input arrays are empty");

    // MismatchedInputs
    let err = LoessError::MismatchedInputs {
        x_len: 10,
        y_len: 5,
    };
    assert_eq!(
        format!("{}", err),
        "Length mismatch: x has 10 points, y has 5"
    );

    // InvalidNumericValue
    let err = LoessError::InvalidNumericValue("x[3]=NaN".to_string());
    assert_eq!(format!("{}", err), "Invalid numeric value: x[3]=NaN");

    // InvalidSpan
    let err = LoessError::InvalidSpan(1.5);
    assert_eq!(
        format!("{}", err),
        "Invalid span: 1.5 (must be > 0 and <= 1)"
    );

    // InvalidDegree
    let err = LoessError::InvalidDegree(-1);
    assert_eq!(format!("{}", err), "Invalid degree: -1 (must be in [0, 4])");

    // UnknownKernel
    let err = LoessError::UnknownKernel("gauss".to_string());
    assert_eq!(format!("{}", err), "Unknown kernel: 'gauss'");

    // InvalidIterations
    let err = LoessError::InvalidIterations(2000);
    assert_eq!(
        format!("{}", err),
        "Invalid iterations: 2000 (must be in [0, 1000])"
    );

    // InvalidChunkSize
    let err = LoessError::InvalidChunkSize(0);
    assert_eq!(
        format!("{}", err),
        "Invalid chunk_size: 0 (must be at least 1)"
    );

    // InvalidReplicates
    let err = LoessError::InvalidReplicates(1);
    assert_eq!(
        format!("{}", err),
        "Invalid replicates: 1 (must be at least 2)"
    );

    // InvalidIntervalLevel
    let err = LoessError::InvalidIntervalLevel(1.0);
    assert_eq!(
        format!("{}", err),
        "Invalid interval level: 1 (must be > 0 and < 1)"
    );

    // InvalidFolds
    let err = LoessError::InvalidFolds { folds: 12, n: 10 };
    assert_eq!(format!("{}", err), "Invalid folds: 12 (must be in [2, 10])");

    // EmptyCandidates
    let err = LoessError::EmptyCandidates;
    assert_eq!(
        format!("{}", err),
        "No candidate spans for cross-validation"
    );

    // DuplicateParameter
    let err = LoessError::DuplicateParameter { parameter: "span" };
    assert_eq!(
        format!("{}", err),
        "Parameter 'span' was set multiple times. Each parameter can only be configured once."
    );
}

#[test]
fn test_fit_failure_display() {
    let f = FitFailure::InsufficientSupport {
        distinct: 1,
        required: 2,
    };
    assert_eq!(
        format!("{}", f),
        "insufficient support: 1 distinct weighted x values, need 2"
    );

    let f = FitFailure::RankDeficient {
        rank: 2,
        required: 3,
    };
    assert_eq!(format!("{}", f), "rank deficient design: rank 2, need 3");

    assert_eq!(format!("{}", FitFailure::NonFinite), "non-finite coefficients");
}

#[test]
fn test_errors_implement_std_error() {
    fn takes_error(_: &dyn std::error::Error) {}
    takes_error(&LoessError::EmptyInput);
    takes_error(&FitFailure::NonFinite);
}
