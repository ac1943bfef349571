//! Givens rotation decompositions for fermionic state preparation.
//!
//! This crate compiles a matrix describing a linear transformation of
//! fermionic creation/annihilation operators into an ordered,
//! logically-parallel schedule of two-mode Givens rotations and single-mode
//! particle-hole flips:
//!
//! - [`givens_decomposition`] reduces an orthonormal-row matrix to diagonal
//!   form with a minimal-depth rotation schedule (the Slater determinant
//!   case).
//! - [`fermionic_gaussian_decomposition`] handles transformations that mix
//!   creation and annihilation operators, interleaving particle-hole
//!   transformations and producing a coupled pair of schedules.
//!
//! The parallelism is a property of the *output*: the rotations within one
//! [`Layer`] act on disjoint mode pairs and commute, so a downstream
//! simulator may apply them concurrently. The decomposition itself is
//! sequential and deterministic, and operates on an owned copy of the
//! caller's matrix.
//!
//! # Quick start
//!
//! ```rust
//! use ndarray::array;
//! use num_complex::Complex64;
//! use svalin_givens::givens_decomposition;
//!
//! // One particle spread evenly over two modes.
//! let s = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
//! let q = array![[s, s]];
//!
//! let decomposition = givens_decomposition(q.view()).unwrap();
//! assert_eq!(decomposition.depth(), 1);
//! assert_eq!(decomposition.layers[0].len(), 1);
//! assert!((decomposition.diagonal[0].norm() - 1.0).abs() < 1e-12);
//! ```

pub mod error;
pub mod gaussian;
pub mod givens;
pub mod layer;
pub mod rotation;

pub use error::{GivensError, GivensResult};
pub use gaussian::{
    FermionicGaussianDecomposition, fermionic_gaussian_decomposition,
    fermionic_gaussian_decomposition_with_tolerance,
};
pub use givens::{
    GivensDecomposition, givens_decomposition, givens_decomposition_with_tolerance,
};
pub use layer::{GivensRotation, Layer, LayerOp};
pub use rotation::{
    Axis, Rotation2, Side, double_rotate, rotate, swap_columns, zeroing_rotation,
};

/// Default numeric tolerance gating every "effectively zero" decision.
///
/// Marginal inputs near machine precision are common in this domain, so
/// every entry point has a `_with_tolerance` variant accepting an explicit
/// value instead.
pub const DEFAULT_TOLERANCE: f64 = 1e-7;
