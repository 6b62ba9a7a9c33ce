//! Linear algebra backend for the local weighted least-squares solve.
//!
//! ## Purpose
//!
//! This module solves one local problem `min ‖D·β - b‖` where `D` is the
//! √w-scaled polynomial design of a window and `b` the √w-scaled responses,
//! and reports the leverage term `(DᵀD)⁻¹₀₀`.
//!
//! ## Design notes
//!
//! * Columns are equilibrated (scaled to unit norm) before decomposing, so
//!   high powers of large offsets do not dominate the rank decision.
//! * Uses Householder QR and never forms the normal equations.
//! * A QR factor with a tiny diagonal entry is confirmed with an SVD; if the
//!   SVD also finds a rank deficit the point is reported as degenerate. The
//!   degree is never silently reduced.
//! * Generic code reaches nalgebra through the `FloatLinalg` bridge trait,
//!   implemented for `f32` and `f64`.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// Internal dependencies
use crate::primitives::errors::FitFailure;

// External dependencies
use num_traits::Float;

// ============================================================================
// Local Solution
// ============================================================================

/// Solution of one local weighted least-squares problem.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalSolution<T> {
    /// Polynomial coefficients in the centered basis `(x - x_q)^j`.
    pub coefficients: Vec<T>,
    /// `(DᵀD)⁻¹₀₀`, the variance factor of the intercept.
    pub leverage: T,
    /// Numerical rank of the design.
    pub rank: usize,
}

// ============================================================================
// FloatLinalg Trait
// ============================================================================

/// Helper trait to bridge generic Float types to the nalgebra backend.
pub trait FloatLinalg: Float + 'static {
    /// Solve the weighted least-squares problem for a column-major
    /// `rows × cols` design and a right-hand side of length `rows`.
    fn solve_weighted_design(
        design: &[Self],
        rhs: &[Self],
        rows: usize,
        cols: usize,
    ) -> Result<LocalSolution<Self>, FitFailure>;
}

impl FloatLinalg for f64 {
    #[inline]
    fn solve_weighted_design(
        design: &[Self],
        rhs: &[Self],
        rows: usize,
        cols: usize,
    ) -> Result<LocalSolution<Self>, FitFailure> {
        nalgebra_backend::solve_weighted_design_f64(design, rhs, rows, cols)
    }
}

impl FloatLinalg for f32 {
    #[inline]
    fn solve_weighted_design(
        design: &[Self],
        rhs: &[Self],
        rows: usize,
        cols: usize,
    ) -> Result<LocalSolution<Self>, FitFailure> {
        nalgebra_backend::solve_weighted_design_f32(design, rhs, rows, cols)
    }
}

// ============================================================================
// Nalgebra Backend Implementation
// ============================================================================

/// Nalgebra-based least-squares solves.
pub mod nalgebra_backend {
    use super::*;
    use nalgebra::{DMatrix, DVector};

    macro_rules! weighted_design_solver {
        ($name:ident, $t:ty) => {
            /// Equilibrated QR solve with SVD rank confirmation.
            pub fn $name(
                design: &[$t],
                rhs: &[$t],
                rows: usize,
                cols: usize,
            ) -> Result<LocalSolution<$t>, FitFailure> {
                if rows < cols {
                    return Err(FitFailure::RankDeficient {
                        rank: rows,
                        required: cols,
                    });
                }

                let mut a = DMatrix::<$t>::from_column_slice(rows, cols, design);
                let b = DVector::<$t>::from_column_slice(rhs);

                let mut scales = DVector::<$t>::from_element(cols, 1.0);
                for j in 0..cols {
                    let norm = a.column(j).norm();
                    if norm > 0.0 && norm.is_finite() {
                        scales[j] = norm;
                        for v in a.column_mut(j).iter_mut() {
                            *v /= norm;
                        }
                    }
                }

                let size_factor = rows.max(cols) as $t * <$t>::EPSILON;

                let qr = a.clone().qr();
                let r = qr.r();
                let diag_max = r.diagonal().amax();
                let qr_tol = size_factor * diag_max;
                let qr_full_rank =
                    diag_max > 0.0 && r.diagonal().iter().all(|d| d.abs() > qr_tol);

                let mut solved = None;
                if qr_full_rank {
                    let qtb = qr.q().transpose() * &b;
                    let mut e0 = DVector::<$t>::zeros(cols);
                    e0[0] = 1.0;
                    if let (Some(z), Some(v)) = (
                        r.solve_upper_triangular(&qtb),
                        r.tr_solve_upper_triangular(&e0),
                    ) {
                        solved = Some((z, v.norm_squared()));
                    }
                }

                let (z, lev_scaled) = match solved {
                    Some(found) => found,
                    None => {
                        let svd = a.svd(true, true);
                        let s_max = svd.singular_values.amax();
                        let svd_tol = size_factor * s_max;
                        let rank = svd.rank(svd_tol);
                        if rank < cols {
                            return Err(FitFailure::RankDeficient {
                                rank,
                                required: cols,
                            });
                        }

                        let z = svd
                            .solve(&b, svd_tol)
                            .map_err(|_| FitFailure::RankDeficient {
                                rank,
                                required: cols,
                            })?;

                        let lev = match &svd.v_t {
                            Some(v_t) => (0..cols)
                                .map(|j| {
                                    let t = v_t[(j, 0)] / svd.singular_values[j];
                                    t * t
                                })
                                .sum::<$t>(),
                            None => <$t>::NAN,
                        };
                        (z, lev)
                    }
                };

                let coefficients: Vec<$t> =
                    z.iter().zip(scales.iter()).map(|(&zj, &sj)| zj / sj).collect();
                let leverage = lev_scaled / (scales[0] * scales[0]);

                if coefficients.iter().any(|c| !c.is_finite()) {
                    return Err(FitFailure::NonFinite);
                }

                Ok(LocalSolution {
                    coefficients,
                    leverage,
                    rank: cols,
                })
            }
        };
    }

    weighted_design_solver!(solve_weighted_design_f64, f64);
    weighted_design_solver!(solve_weighted_design_f32, f32);
}
