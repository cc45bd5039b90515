//! Fixed-size linear algebra and compensated floating-point kernels for Lumen.
//!
//! # Overview
//!
//! - [`Vector`], [`Matrix`] and [`Quat`] are plain value types whose dimensions are part of the
//!   type, so shape mismatches are compile errors rather than runtime errors.
//! - [`Transform`] pairs a matrix with its inverse, so that inverting and composing transforms
//!   never has to recompute an inverse.
//! - The [`num`] module contains the scalar kernels that the rest of the library is built on. They
//!   use fused multiply-add to compute sums and differences of products, polynomials and the roots
//!   of quadratics without catastrophic cancellation.
//! - [`SquareMatrix`] provides determinants and inverses of 1x1 to 4x4 matrices, using those
//!   kernels.
//! - The [`hash`] module derives hash codes from the components of geometric values, so that they
//!   can be used as keys in hash-based collections.
//! - The [`approx`] module compares floating-point values and everything built from them for
//!   approximate equality.
//!
//! # Goals & Non-Goals
//!
//! - Don't support dynamically-sized vectors and matrices. Relying on const generics for the
//!   dimensions keeps the API small and lets the compiler check shapes.
//! - Support only a single, column-major, unpadded data layout for matrices and vectors. Both
//!   implement [`bytemuck::Pod`] when their element type does, so they can be uploaded to the GPU
//!   as-is.
//! - Be generic over the element type, but don't try to support non-[`Copy`] numeric types (eg.
//!   "big decimals").
//! - Prefer accuracy over raw speed in numerically sensitive operations. There are no
//!   SIMD-specific code paths.
//!
//! # Example
//!
//! ```
//! use lumen_linalg::*;
//!
//! let rotation = Quat::from_axis_angle(vec3(0.0, 1.0, 0.0), std::f64::consts::FRAC_PI_2);
//! let transform = Transform::<f64, 3>::from_quat(rotation);
//!
//! let v = transform.transform_vector(Vec3::X);
//! assert_approx_eq!(v, vec3(0.0, 0.0, -1.0)).abs(1e-15);
//! assert_approx_eq!(transform.inverse_transform_vector(v), Vec3::X).abs(1e-15);
//! ```

pub mod approx;
pub mod hash;
mod matrix;
pub mod num;
mod quat;
mod traits;
mod transform;
mod vector;

pub use matrix::*;
pub use quat::*;
pub use traits::*;
pub use transform::*;
pub use vector::*;
