#![cfg(feature = "dev")]
//! Tests for cross-validated span selection.
//!
//! ## Test Organization
//!
//! 1. **Configuration** - Constructors and accessors
//! 2. **Scoring** - K-fold and LOOCV scores with a mock predictor
//! 3. **Selection** - Best span, ties, degenerate predictions
//! 4. **Engine** - CV driven by the real evaluator

use approx::assert_relative_eq;
use core::cell::Cell;

use vloess::internals::algorithms::regression::PolynomialDegree;
use vloess::internals::engine::executor::{LoessExecutor, PassOptions};
use vloess::internals::evaluation::cv::{CVKind, KFold, LOOCV};

/// Predicts the mean of the training responses, ignoring the span.
fn mean_predictor(_tx: &[f64], ty: &[f64], test_x: &[f64], _span: f64) -> Vec<f64> {
    let mean = ty.iter().sum::<f64>() / ty.len() as f64;
    vec![mean; test_x.len()]
}

// ============================================================================
// Configuration Tests
// ============================================================================

#[test]
fn test_cv_config_constructors() {
    let kfold = KFold(5, &[0.3f64, 0.5]).seed(7);
    assert_eq!(kfold.kind(), CVKind::KFold(5));
    assert_eq!(kfold.spans(), &[0.3, 0.5]);

    let loocv = LOOCV(&[0.4f64]);
    assert_eq!(loocv.kind(), CVKind::LOOCV);
    assert_eq!(loocv.spans(), &[0.4]);
}

// ============================================================================
// Scoring Tests
// ============================================================================

/// LOOCV pools all held-out errors into one RMSE.
#[test]
fn test_loocv_pooled_rmse() {
    let x = [0.0, 1.0, 2.0];
    let y = [1.0, 2.0, 3.0];

    let (_, scores) = CVKind::LOOCV.run(&x, &y, &[0.5], None, mean_predictor);

    // held-out errors: -1.5, 0, 1.5
    assert_relative_eq!(scores[0], 1.5f64.sqrt(), epsilon = 1e-12);
}

/// K-fold averages per-fold RMSEs over contiguous folds without a seed.
#[test]
fn test_kfold_mean_of_fold_rmse() {
    let x = [0.0, 1.0, 2.0];
    let y = [1.0, 2.0, 3.0];

    let (_, scores) = CVKind::KFold(3).run(&x, &y, &[0.5], None, mean_predictor);

    // fold RMSEs: 1.5, 0, 1.5
    assert_relative_eq!(scores[0], 1.0, epsilon = 1e-12);
}

#[test]
fn test_kfold_last_fold_takes_remainder() {
    let x: Vec<f64> = (0..7).map(f64::from).collect();
    let y = x.clone();
    let sizes = core::cell::RefCell::new(Vec::new());

    let predictor = |tx: &[f64], _ty: &[f64], test_x: &[f64], _span: f64| {
        sizes.borrow_mut().push((tx.len(), test_x.len()));
        test_x.to_vec()
    };
    CVKind::KFold(3).run(&x, &y, &[0.5], None, predictor);

    assert_eq!(*sizes.borrow(), vec![(5, 2), (5, 2), (4, 3)]);
}

#[test]
fn test_kfold_seed_is_reproducible() {
    let x: Vec<f64> = (0..20).map(|i| i as f64 * 0.5).collect();
    let y: Vec<f64> = x.iter().map(|&v| (v * 1.3).sin()).collect();

    let a = CVKind::KFold(4).run(&x, &y, &[0.5], Some(11), mean_predictor);
    let b = CVKind::KFold(4).run(&x, &y, &[0.5], Some(11), mean_predictor);
    assert_eq!(a, b);
}

// ============================================================================
// Selection Tests
// ============================================================================

#[test]
fn test_best_span_minimizes_score() {
    let x: Vec<f64> = (1..=10).map(f64::from).collect();
    let y: Vec<f64> = x.iter().map(|&v| 0.5 * v).collect();

    // prediction x * span is exact for span = 0.5
    let predictor = |_tx: &[f64], _ty: &[f64], test_x: &[f64], span: f64| {
        test_x.iter().map(|&t| t * span).collect::<Vec<_>>()
    };

    let (best, scores) = CVKind::LOOCV.run(&x, &y, &[0.2, 0.5, 0.9], None, predictor);
    assert_eq!(best, 0.5);
    assert_eq!(scores[1], 0.0);
    assert!(scores[0] > 0.0 && scores[2] > 0.0);

    let (best, _) = CVKind::KFold(5).run(&x, &y, &[0.2, 0.5, 0.9], None, predictor);
    assert_eq!(best, 0.5);
}

/// Equal scores resolve to the earliest candidate.
#[test]
fn test_tied_scores_pick_first_candidate() {
    let x = [0.0, 1.0, 2.0, 3.0];
    let y = [1.0, 3.0, 2.0, 4.0];

    let (best, scores) = CVKind::LOOCV.run(&x, &y, &[0.9, 0.3, 0.6], None, mean_predictor);
    assert_eq!(scores[0], scores[1]);
    assert_eq!(best, 0.9);
}

#[test]
fn test_all_nan_predictions_score_infinite() {
    let x = [0.0, 1.0, 2.0, 3.0];
    let y = [0.0, 1.0, 2.0, 3.0];
    let calls = Cell::new(0usize);

    let predictor = |_tx: &[f64], _ty: &[f64], test_x: &[f64], span: f64| {
        calls.set(calls.get() + 1);
        if span < 0.5 {
            vec![f64::NAN; test_x.len()]
        } else {
            test_x.to_vec()
        }
    };

    let (best, scores) = CVKind::LOOCV.run(&x, &y, &[0.3, 0.8], None, predictor);
    assert!(scores[0].is_infinite());
    assert_eq!(scores[1], 0.0);
    assert_eq!(best, 0.8);
    assert_eq!(calls.get(), 8);
}

#[test]
fn test_too_few_points_for_folds() {
    let x = [0.0, 1.0];
    let y = [0.0, 1.0];

    let (best, scores) = CVKind::KFold(5).run(&x, &y, &[0.4, 0.7], None, mean_predictor);
    assert!(scores.iter().all(|s| s.is_infinite()));
    assert_eq!(best, 0.4);
}

// ============================================================================
// Engine Tests
// ============================================================================

/// On a curved signal a small span beats the global linear fit.
#[test]
fn test_cv_with_evaluator_prefers_local_span() {
    let x: Vec<f64> = (0..60).map(|i| i as f64 * 0.1).collect();
    let y: Vec<f64> = x.iter().map(|&v| (2.0 * v).sin()).collect();

    let predictor = |tx: &[f64], ty: &[f64], qx: &[f64], span: f64| {
        LoessExecutor::new()
            .span(span)
            .polynomial_degree(PolynomialDegree::Linear)
            .run(tx, ty, qx, PassOptions::default())
            .pass
            .values
    };

    let (best, scores) = CVKind::KFold(5)
        .run(&x, &y, &[0.15, 1.0], Some(3), predictor);
    assert_eq!(best, 0.15);
    assert!(scores[0] < scores[1]);
}
