//! The quadratic-Hamiltonian descriptor consumed by the compiler.
//!
//! The compiler never builds Hamiltonians itself; callers provide a type
//! describing one, and the compiler only queries the projections it needs
//! to pick and run a diagonalization strategy.

use ndarray::{Array1, Array2};
use num_complex::Complex64;

/// A Hamiltonian that is quadratic in the fermionic ladder operators.
///
/// The shape contract: `combined_hermitian_part` is
/// `n_modes x n_modes`, `majorana_form` returns a real antisymmetric
/// `2·n_modes x 2·n_modes` matrix plus a constant offset, and
/// `orbital_energies` returns `n_modes` single-particle energies plus a
/// constant. Violations surface as
/// [`PrepError::InvalidDescriptor`](crate::PrepError::InvalidDescriptor)
/// when the compiler validates the descriptor.
pub trait QuadraticHamiltonian {
    /// Number of fermionic modes the Hamiltonian acts on.
    fn n_modes(&self) -> usize;

    /// True if the Hamiltonian commutes with the total number operator,
    /// i.e. it has no pairing (creation-creation) terms.
    fn conserves_particle_number(&self) -> bool;

    /// The Hermitian coefficient matrix of the particle-conserving part,
    /// with the chemical potential folded in.
    fn combined_hermitian_part(&self) -> Array2<Complex64>;

    /// The Hamiltonian rewritten in the Majorana basis: a real
    /// antisymmetric matrix and a constant offset.
    fn majorana_form(&self) -> (Array2<f64>, f64);

    /// Single-particle orbital energies and the constant offset, so that
    /// eigenvalues are sums of energies over occupied orbitals plus the
    /// constant.
    fn orbital_energies(&self) -> (Array1<f64>, f64);
}
