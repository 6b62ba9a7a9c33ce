//! Kernel (weight) functions for LOESS.
//!
//! ## Purpose
//!
//! This module provides the kernel functions that turn normalized neighbor
//! distances `u = d / h` into local regression weights, their derivatives
//! `dK/du`, and a slice form used on the flattened windows of a whole chunk.
//!
//! ## Design notes
//!
//! * **Support**: Every kernel is supported on `[0, 1)`; `u >= 1` yields exactly 0.
//! * **Vectorization**: The tricube slice form runs on `wide` lanes for `f64`
//!   and `f32`; its only branch is the clamp `min(u, 1)`.
//! * **Parsing**: Kernels are selectable by name (case-insensitive).
//!
//! ## Key concepts
//!
//! * **Tricube**: The default kernel, `(1 - u³)³`.
//! * **Normalized distance**: Distances are divided by the bandwidth before
//!   the kernel is applied; a zero bandwidth is handled by the caller.
//!
//! ## Invariants
//!
//! * Kernels are non-negative and symmetric: `K(u) = K(-u)`.
//! * `K(u) > 0` for `|u| < 1` and `K(u) = 0` for `|u| >= 1`.
//! * Kernels are monotonically non-increasing in `|u|`.
//!
//! ## Non-goals
//!
//! * This module does not normalize weights to sum to one.
//! * This module does not choose bandwidths.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::ToString;

// Internal dependencies
use crate::primitives::errors::LoessError;

// External dependencies
use core::f64::consts::FRAC_PI_2;
use core::fmt::{Display, Formatter, Result as FmtResult};
use core::str::FromStr;
use num_traits::Float;
use wide::{f32x8, f64x4};

// ============================================================================
// Weight Function Enum
// ============================================================================

/// Weight function (kernel) for LOESS.
///
/// | Kernel       | K(u), \|u\| < 1  | dK/du, 0 <= u < 1       |
/// |--------------|------------------|-------------------------|
/// | Tricube      | (1 - u³)³        | -9u²(1 - u³)²           |
/// | Epanechnikov | 1 - u²           | -2u                     |
/// | Biweight     | (1 - u²)²        | -4u(1 - u²)             |
/// | Triangle     | 1 - u            | -1                      |
/// | Cosine       | cos(πu/2)        | -(π/2)·sin(πu/2)        |
/// | Uniform      | 1                | 0                       |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WeightFunction {
    /// Tricube kernel: K(u) = (1 - |u|³)³.
    ///
    /// This is the default and recommended kernel choice.
    #[default]
    Tricube,

    /// Epanechnikov kernel: K(u) = 1 - u².
    Epanechnikov,

    /// Biweight (quartic) kernel: K(u) = (1 - u²)².
    Biweight,

    /// Triangular kernel: K(u) = 1 - |u|.
    Triangle,

    /// Cosine kernel: K(u) = cos(πu/2).
    Cosine,

    /// Uniform (rectangular) kernel: K(u) = 1.
    Uniform,
}

impl WeightFunction {
    /// Every supported kernel, in declaration order.
    pub const ALL: [WeightFunction; 6] = [
        WeightFunction::Tricube,
        WeightFunction::Epanechnikov,
        WeightFunction::Biweight,
        WeightFunction::Triangle,
        WeightFunction::Cosine,
        WeightFunction::Uniform,
    ];

    // ========================================================================
    // Metadata Methods
    // ========================================================================

    /// Get the name of the weight function.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            WeightFunction::Tricube => "Tricube",
            WeightFunction::Epanechnikov => "Epanechnikov",
            WeightFunction::Biweight => "Biweight",
            WeightFunction::Triangle => "Triangle",
            WeightFunction::Cosine => "Cosine",
            WeightFunction::Uniform => "Uniform",
        }
    }

    // ========================================================================
    // Weight Computation
    // ========================================================================

    /// Compute the unnormalized weight K(u) for a normalized distance.
    #[inline]
    pub fn compute_weight<T: Float>(&self, u: T) -> T {
        let abs_u = u.abs();
        if !(abs_u < T::one()) {
            return T::zero();
        }

        match self {
            WeightFunction::Tricube => {
                let tmp = T::one() - abs_u * abs_u * abs_u;
                tmp * tmp * tmp
            }
            WeightFunction::Epanechnikov => T::one() - abs_u * abs_u,
            WeightFunction::Biweight => {
                let tmp = T::one() - abs_u * abs_u;
                tmp * tmp
            }
            WeightFunction::Triangle => T::one() - abs_u,
            WeightFunction::Cosine => (half_pi::<T>() * abs_u).cos(),
            WeightFunction::Uniform => T::one(),
        }
    }

    /// Compute the derivative dK/du; zero outside the support.
    #[inline]
    pub fn compute_derivative<T: Float>(&self, u: T) -> T {
        let abs_u = u.abs();
        if !(abs_u < T::one()) {
            return T::zero();
        }

        let d = match self {
            WeightFunction::Tricube => {
                let u2 = abs_u * abs_u;
                let tmp = T::one() - u2 * abs_u;
                -T::from(9.0).unwrap_or_else(T::one) * u2 * tmp * tmp
            }
            WeightFunction::Epanechnikov => -(abs_u + abs_u),
            WeightFunction::Biweight => {
                let four = T::from(4.0).unwrap_or_else(T::one);
                -four * abs_u * (T::one() - abs_u * abs_u)
            }
            WeightFunction::Triangle => -T::one(),
            WeightFunction::Cosine => -half_pi::<T>() * (half_pi::<T>() * abs_u).sin(),
            WeightFunction::Uniform => T::zero(),
        };

        if u < T::zero() { -d } else { d }
    }

    /// Apply the kernel elementwise: `out[i] = K(u[i])`.
    ///
    /// Tricube dispatches to the SIMD path of the concrete float type.
    #[inline]
    pub fn apply<T: KernelLinalg>(&self, u: &[T], out: &mut [T]) {
        debug_assert_eq!(u.len(), out.len());
        match self {
            WeightFunction::Tricube => T::tricube_weights(u, out),
            _ => {
                for (o, &ui) in out.iter_mut().zip(u) {
                    *o = self.compute_weight(ui);
                }
            }
        }
    }
}

impl Display for WeightFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

impl FromStr for WeightFunction {
    type Err = LoessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kernel = match s.trim().to_ascii_lowercase().as_str() {
            "tricube" => WeightFunction::Tricube,
            "epanechnikov" => WeightFunction::Epanechnikov,
            "biweight" | "quartic" => WeightFunction::Biweight,
            "triangle" | "triangular" => WeightFunction::Triangle,
            "cosine" => WeightFunction::Cosine,
            "uniform" | "rectangular" => WeightFunction::Uniform,
            _ => return Err(LoessError::UnknownKernel(s.to_string())),
        };
        Ok(kernel)
    }
}

#[inline]
fn half_pi<T: Float>() -> T {
    T::from(FRAC_PI_2).unwrap_or_else(T::one)
}

// ============================================================================
// KernelLinalg Trait
// ============================================================================

/// Helper trait to bridge generic Float types to SIMD kernel evaluation.
pub trait KernelLinalg: Float + 'static {
    /// Write the tricube weight of `u[i]` into `out[i]` (`u` non-negative).
    fn tricube_weights(u: &[Self], out: &mut [Self]) {
        for (o, &ui) in out.iter_mut().zip(u) {
            *o = WeightFunction::Tricube.compute_weight(ui);
        }
    }
}

impl KernelLinalg for f64 {
    #[inline]
    fn tricube_weights(u: &[Self], out: &mut [Self]) {
        debug_assert_eq!(u.len(), out.len());
        let one = f64x4::splat(1.0);

        let mut u_chunks = u.chunks_exact(4);
        let mut out_chunks = out.chunks_exact_mut(4);
        for (us, os) in (&mut u_chunks).zip(&mut out_chunks) {
            let v = f64x4::new([us[0], us[1], us[2], us[3]]).min(one);
            let t = one - v * v * v;
            os.copy_from_slice(&(t * t * t).to_array());
        }

        for (o, &ui) in out_chunks
            .into_remainder()
            .iter_mut()
            .zip(u_chunks.remainder())
        {
            let v = ui.min(1.0);
            let t = 1.0 - v * v * v;
            *o = t * t * t;
        }
    }
}

impl KernelLinalg for f32 {
    #[inline]
    fn tricube_weights(u: &[Self], out: &mut [Self]) {
        debug_assert_eq!(u.len(), out.len());
        let one = f32x8::splat(1.0);

        let mut u_chunks = u.chunks_exact(8);
        let mut out_chunks = out.chunks_exact_mut(8);
        for (us, os) in (&mut u_chunks).zip(&mut out_chunks) {
            let v = f32x8::new([us[0], us[1], us[2], us[3], us[4], us[5], us[6], us[7]]).min(one);
            let t = one - v * v * v;
            os.copy_from_slice(&(t * t * t).to_array());
        }

        for (o, &ui) in out_chunks
            .into_remainder()
            .iter_mut()
            .zip(u_chunks.remainder())
        {
            let v = ui.min(1.0);
            let t = 1.0 - v * v * v;
            *o = t * t * t;
        }
    }
}
