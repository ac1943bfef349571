//! Error types for the decomposition crate.

use crate::rotation::Axis;
use thiserror::Error;

/// Errors produced by the rotation primitive and the decomposers.
///
/// Every condition is detected eagerly at entry; a failed call leaves no
/// partial mutation observable to the caller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GivensError {
    /// The rectangular decomposer requires an m x n matrix with m <= n.
    #[error("expected an m x n matrix with m <= n, got {rows} x {cols}")]
    WideMatrixRequired {
        /// Number of rows of the offending matrix.
        rows: usize,
        /// Number of columns of the offending matrix.
        cols: usize,
    },

    /// The fermionic Gaussian decomposer requires an n x 2n matrix.
    #[error("expected an n x 2n matrix, got {rows} x {cols}")]
    BlockShapeRequired {
        /// Number of rows of the offending matrix.
        rows: usize,
        /// Number of columns of the offending matrix.
        cols: usize,
    },

    /// A double rotation splits the relevant dimension in half, so that
    /// dimension must be even.
    #[error("cannot apply a double rotation along {axis:?}: dimension {len} is odd")]
    OddDimension {
        /// The axis along which the rotation was requested.
        axis: Axis,
        /// The offending dimension size.
        len: usize,
    },

    /// The input blocks fail the structure required for the transformed
    /// ladder operators to obey the fermionic anticommutation relations.
    #[error(
        "input violates the fermionic block constraints: \
         max deviation {deviation:.3e} exceeds tolerance {tolerance:.3e}"
    )]
    ConstraintViolation {
        /// Largest entrywise deviation from the required block identities.
        deviation: f64,
        /// The tolerance the deviation was checked against.
        tolerance: f64,
    },
}

/// Result type for decomposition operations.
pub type GivensResult<T> = Result<T, GivensError>;
