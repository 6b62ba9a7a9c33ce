#![cfg(feature = "dev")]

use approx::assert_relative_eq;

use vloess::internals::algorithms::robustness::RobustnessMethod;

#[test]
fn test_bisquare_weight_shape() {
    // u = |r| / (6 s)
    assert_eq!(RobustnessMethod::bisquare_weight(0.0f64, 1.0, 6.0), 1.0);
    assert_relative_eq!(
        RobustnessMethod::bisquare_weight(3.0f64, 1.0, 6.0),
        (1.0f64 - 0.25).powi(2)
    );
    assert_eq!(RobustnessMethod::bisquare_weight(6.0f64, 1.0, 6.0), 0.0);
    assert_eq!(RobustnessMethod::bisquare_weight(-60.0f64, 1.0, 6.0), 0.0);
}

#[test]
fn test_huber_and_talwar_weights() {
    assert_eq!(RobustnessMethod::huber_weight(1.0f64, 1.0, 1.345), 1.0);
    assert_relative_eq!(RobustnessMethod::huber_weight(2.69f64, 1.0, 1.345), 0.5);

    assert_eq!(RobustnessMethod::talwar_weight(2.4f64, 1.0, 2.5), 1.0);
    assert_eq!(RobustnessMethod::talwar_weight(-2.6f64, 1.0, 2.5), 0.0);
}

#[test]
fn test_zero_scale_gives_unit_weights() {
    for f in [
        RobustnessMethod::bisquare_weight::<f64>,
        RobustnessMethod::huber_weight::<f64>,
        RobustnessMethod::talwar_weight::<f64>,
    ] {
        assert_eq!(f(5.0, 0.0, 2.0), 1.0);
    }
}

#[test]
fn test_compute_scale_uses_mad() {
    let residuals = [-2.0f64, -1.0, 0.0, 1.0, 2.0];
    let mut scratch = Vec::new();
    assert_relative_eq!(RobustnessMethod::compute_scale(&residuals, &mut scratch), 1.0);
}

/// A MAD of zero (most residuals exactly zero) falls back to the mean absolute residual.
#[test]
fn test_compute_scale_mar_fallback() {
    let residuals = [0.0f64, 0.0, 0.0, 0.0, 5.0];
    let mut scratch = Vec::new();
    assert_relative_eq!(RobustnessMethod::compute_scale(&residuals, &mut scratch), 1.0);
}

#[test]
fn test_compute_scale_ignores_nan() {
    let residuals = [-2.0f64, f64::NAN, -1.0, 0.0, 1.0, 2.0];
    let mut scratch = Vec::new();
    assert_relative_eq!(RobustnessMethod::compute_scale(&residuals, &mut scratch), 1.0);
}

#[test]
fn test_compute_weights_downweights_outlier() {
    let residuals = [0.1f64, -0.2, 0.15, -0.1, 0.05, 10.0, -0.15, 0.2];
    let mut weights = vec![0.0; residuals.len()];
    let mut scratch = Vec::new();

    for method in [
        RobustnessMethod::Bisquare,
        RobustnessMethod::Huber,
        RobustnessMethod::Talwar,
    ] {
        method.compute_weights(&residuals, &mut weights, &mut scratch);
        assert!(weights[5] < 0.1, "{} outlier weight {}", method.name(), weights[5]);
        for (i, &w) in weights.iter().enumerate() {
            assert!((0.0..=1.0).contains(&w));
            if i != 5 {
                assert!(w > 0.5, "{} inlier weight {}", method.name(), w);
            }
        }
    }
}

#[test]
fn test_compute_weights_nan_residual_keeps_unit_weight() {
    let residuals = [0.1f64, f64::NAN, -0.1, 0.2];
    let mut weights = vec![0.0; 4];
    let mut scratch = Vec::new();
    RobustnessMethod::Bisquare.compute_weights(&residuals, &mut weights, &mut scratch);
    assert_eq!(weights[1], 1.0);
}

#[test]
fn test_robustness_default_and_names() {
    assert_eq!(RobustnessMethod::default(), RobustnessMethod::Bisquare);
    assert_eq!(RobustnessMethod::Huber.name(), "Huber");
    assert_eq!(RobustnessMethod::Talwar.name(), "Talwar");
}
