#![cfg(feature = "dev")]
//! Tests for kernel weight functions.
//!
//! ## Test Organization
//!
//! 1. **Support** - Boundary behavior at u = 1 and beyond
//! 2. **Shape** - Known values, symmetry, monotonicity
//! 3. **Derivatives** - Analytic vs finite differences
//! 4. **Vectorized Path** - SIMD slices vs scalar weights
//! 5. **Parsing** - Names and aliases

use approx::assert_relative_eq;

use vloess::internals::math::kernel::{KernelLinalg, WeightFunction};
use vloess::internals::primitives::errors::LoessError;

// ============================================================================
// Support Tests
// ============================================================================

/// Every kernel is exactly zero at u = 1 and outside the support.
#[test]
fn test_kernel_zero_at_boundary() {
    for kernel in WeightFunction::ALL {
        assert_eq!(kernel.compute_weight(1.0f64), 0.0, "{} at u=1", kernel);
        assert_eq!(kernel.compute_weight(1.5f64), 0.0, "{} at u=1.5", kernel);
        assert_eq!(kernel.compute_weight(-1.0f64), 0.0, "{} at u=-1", kernel);
        assert_eq!(kernel.compute_weight(f64::NAN), 0.0, "{} at NaN", kernel);
    }
}

/// Weights are strictly positive and at most one inside the support.
#[test]
fn test_kernel_positive_inside_support() {
    for kernel in WeightFunction::ALL {
        for i in 0..100 {
            let u = i as f64 / 100.0;
            let w = kernel.compute_weight(u);
            assert!(w > 0.0 && w <= 1.0, "{}({}) = {}", kernel, u, w);
        }
        assert_relative_eq!(kernel.compute_weight(0.0f64), 1.0);
    }
}

// ============================================================================
// Shape Tests
// ============================================================================

#[test]
fn test_kernel_known_values() {
    let u = 0.5f64;
    assert_relative_eq!(
        WeightFunction::Tricube.compute_weight(u),
        (1.0 - 0.125f64).powi(3)
    );
    assert_relative_eq!(WeightFunction::Epanechnikov.compute_weight(u), 0.75);
    assert_relative_eq!(WeightFunction::Biweight.compute_weight(u), 0.5625);
    assert_relative_eq!(WeightFunction::Triangle.compute_weight(u), 0.5);
    assert_relative_eq!(
        WeightFunction::Cosine.compute_weight(u),
        (std::f64::consts::PI / 4.0).cos(),
        epsilon = 1e-12
    );
    assert_relative_eq!(WeightFunction::Uniform.compute_weight(u), 1.0);
}

#[test]
fn test_kernel_symmetry() {
    for kernel in WeightFunction::ALL {
        for &u in &[0.1f64, 0.33, 0.7, 0.95] {
            assert_eq!(kernel.compute_weight(u), kernel.compute_weight(-u));
        }
    }
}

#[test]
fn test_kernel_monotone_decreasing() {
    for kernel in WeightFunction::ALL {
        let mut prev = kernel.compute_weight(0.0f64);
        for i in 1..=100 {
            let w = kernel.compute_weight(i as f64 / 100.0);
            assert!(w <= prev, "{} increases at {}", kernel, i);
            prev = w;
        }
    }
}

// ============================================================================
// Derivative Tests
// ============================================================================

/// The analytic derivative matches a central finite difference.
#[test]
fn test_kernel_derivative_finite_difference() {
    let h = 1e-6f64;
    for kernel in WeightFunction::ALL {
        for &u in &[-0.8f64, -0.3, 0.2, 0.5, 0.9] {
            let numeric = (kernel.compute_weight(u + h) - kernel.compute_weight(u - h)) / (2.0 * h);
            assert_relative_eq!(
                kernel.compute_derivative(u),
                numeric,
                epsilon = 1e-5,
                max_relative = 1e-5
            );
        }
    }
}

#[test]
fn test_kernel_derivative_outside_support() {
    for kernel in WeightFunction::ALL {
        assert_eq!(kernel.compute_derivative(1.0f64), 0.0);
        assert_eq!(kernel.compute_derivative(-2.0f64), 0.0);
    }
}

// ============================================================================
// Vectorized Path Tests
// ============================================================================

/// The SIMD tricube path agrees with the scalar kernel, remainder included.
#[test]
fn test_tricube_simd_matches_scalar_f64() {
    let u: Vec<f64> = (0..23).map(|i| i as f64 / 20.0).collect();
    let mut out = vec![0.0; u.len()];
    f64::tricube_weights(&u, &mut out);

    for (&ui, &wi) in u.iter().zip(&out) {
        assert_relative_eq!(wi, WeightFunction::Tricube.compute_weight(ui), epsilon = 1e-15);
    }
    // u = 1 exactly yields zero
    assert_eq!(out[20], 0.0);
}

#[test]
fn test_tricube_simd_matches_scalar_f32() {
    let u: Vec<f32> = (0..19).map(|i| i as f32 / 16.0).collect();
    let mut out = vec![0.0f32; u.len()];
    f32::tricube_weights(&u, &mut out);

    for (&ui, &wi) in u.iter().zip(&out) {
        assert_relative_eq!(wi, WeightFunction::Tricube.compute_weight(ui), epsilon = 1e-6);
    }
    assert_eq!(out[16], 0.0);
}

#[test]
fn test_apply_matches_scalar_for_all_kernels() {
    let u: Vec<f64> = (0..11).map(|i| i as f64 / 10.0).collect();
    for kernel in WeightFunction::ALL {
        let mut out = vec![f64::NAN; u.len()];
        kernel.apply(&u, &mut out);
        for (&ui, &wi) in u.iter().zip(&out) {
            assert_relative_eq!(wi, kernel.compute_weight(ui), epsilon = 1e-15);
        }
    }
}

// ============================================================================
// Parsing Tests
// ============================================================================

#[test]
fn test_kernel_parse_names() {
    for kernel in WeightFunction::ALL {
        let parsed: WeightFunction = kernel.name().parse().unwrap();
        assert_eq!(parsed, kernel);
        let upper: WeightFunction = kernel.name().to_uppercase().parse().unwrap();
        assert_eq!(upper, kernel);
    }

    assert_eq!(
        " quartic ".parse::<WeightFunction>().unwrap(),
        WeightFunction::Biweight
    );
    assert_eq!(
        "triangular".parse::<WeightFunction>().unwrap(),
        WeightFunction::Triangle
    );
    assert_eq!(
        "rectangular".parse::<WeightFunction>().unwrap(),
        WeightFunction::Uniform
    );
}

#[test]
fn test_kernel_parse_unknown() {
    match "gaussian".parse::<WeightFunction>() {
        Err(LoessError::UnknownKernel(name)) => assert_eq!(name, "gaussian"),
        other => panic!("expected UnknownKernel, got {:?}", other),
    }
}

#[test]
fn test_kernel_default_is_tricube() {
    assert_eq!(WeightFunction::default(), WeightFunction::Tricube);
    assert_eq!(format!("{}", WeightFunction::Tricube), "Tricube");
}
