//! Error types for the state-preparation crate.

use thiserror::Error;

/// Errors produced while compiling a state-preparation circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PrepError {
    /// The Hamiltonian descriptor returned structurally inconsistent data.
    #[error("invalid Hamiltonian descriptor: {0}")]
    InvalidDescriptor(String),

    /// An occupied orbital index is outside the mode range.
    #[error("occupied orbital {orbital} is out of range for {n_modes} modes")]
    OrbitalOutOfRange {
        /// The offending orbital index.
        orbital: usize,
        /// Number of fermionic modes.
        n_modes: usize,
    },

    /// An eigensolver failed to converge.
    #[error("eigensolver did not converge within {iterations} iterations")]
    ConvergenceFailure {
        /// Number of iterations performed before giving up.
        iterations: usize,
    },

    /// The underlying decomposition failed.
    #[error("decomposition error: {0}")]
    Decomposition(#[from] svalin_givens::GivensError),
}

/// Result type for state-preparation operations.
pub type PrepResult<T> = Result<T, PrepError>;
