//! Compilation of fermionic Gaussian state-preparation circuits.
//!
//! Fermionic Gaussian states are eigenstates of quadratic Hamiltonians;
//! when the Hamiltonian conserves particle number they are Slater
//! determinants. This crate resolves a caller-supplied Hamiltonian
//! descriptor into its diagonalizing transformation, feeds the matching
//! matrix to the [`svalin_givens`] decomposers, and assembles the layers
//! into an application-order [`CircuitDescription`]: the schedule of Givens
//! rotations and particle-hole flips that prepares the target state from a
//! simple occupation-basis reference state.
//!
//! # Quick start
//!
//! ```rust
//! use ndarray::{Array1, Array2, ArrayView2, array};
//! use num_complex::Complex64;
//! use svalin_prep::{
//!     GaussianStateCircuit, JacobiEigenSolver, MajoranaDiagonalizer, PrepResult,
//!     QuadraticHamiltonian,
//! };
//!
//! // Two decoupled modes with energies -1 and +1.
//! struct TwoMode;
//!
//! impl QuadraticHamiltonian for TwoMode {
//!     fn n_modes(&self) -> usize {
//!         2
//!     }
//!     fn conserves_particle_number(&self) -> bool {
//!         true
//!     }
//!     fn combined_hermitian_part(&self) -> Array2<Complex64> {
//!         array![
//!             [Complex64::new(-1.0, 0.0), Complex64::new(0.0, 0.0)],
//!             [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
//!         ]
//!     }
//!     fn majorana_form(&self) -> (Array2<f64>, f64) {
//!         (Array2::zeros((4, 4)), 0.0)
//!     }
//!     fn orbital_energies(&self) -> (Array1<f64>, f64) {
//!         (array![-1.0, 1.0], 0.0)
//!     }
//! }
//!
//! // Particle-conserving Hamiltonians never reach the Majorana path.
//! struct NoPairing;
//!
//! impl MajoranaDiagonalizer for NoPairing {
//!     fn diagonalizing_unitary(&self, _: ArrayView2<'_, f64>) -> PrepResult<Array2<Complex64>> {
//!         unreachable!()
//!     }
//! }
//!
//! let circuit = GaussianStateCircuit::new(&TwoMode)
//!     .compile(&JacobiEigenSolver::new(), &NoPairing)
//!     .unwrap();
//!
//! // The ground state fills the single negative-energy orbital; the
//! // eigenbasis is already the computational basis, so no rotations.
//! assert_eq!(circuit.start_orbitals, vec![0]);
//! assert_eq!(circuit.depth(), 1);
//! assert_eq!(circuit.n_rotations(), 0);
//! ```

pub mod circuit;
pub mod error;
pub mod hamiltonian;
pub mod solvers;

pub use circuit::{CircuitDescription, DiagonalizingTransform, GaussianStateCircuit, preparation_circuit};
pub use error::{PrepError, PrepResult};
pub use hamiltonian::QuadraticHamiltonian;
pub use solvers::{HermitianEigenSolver, JacobiEigenSolver, MajoranaDiagonalizer};
