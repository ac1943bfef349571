//! Circuit assembly for Slater-determinant and Gaussian state preparation.
//!
//! The compiler runs in two stages. First the Hamiltonian descriptor is
//! resolved into a [`DiagonalizingTransform`]: the particle-conserving and
//! general branches need different collaborators and different matrix
//! shapes, so the branch is decided once, up front. Second,
//! [`preparation_circuit`] turns the resolved transform and a start
//! occupation into a [`CircuitDescription`] by running the matching
//! decomposition and reversing its layers into application order.

use ndarray::{Array1, Array2, s};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use svalin_givens::{
    DEFAULT_TOLERANCE, Layer, fermionic_gaussian_decomposition_with_tolerance,
    givens_decomposition_with_tolerance,
};
use tracing::debug;

use crate::error::{PrepError, PrepResult};
use crate::hamiltonian::QuadraticHamiltonian;
use crate::solvers::{HermitianEigenSolver, MajoranaDiagonalizer};

/// A compiled state-preparation circuit.
///
/// Layers are in application order: apply `layers[0]` first to a reference
/// state with exactly `start_orbitals` occupied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitDescription {
    /// Rotation/particle-hole layers in application order.
    pub layers: Vec<Layer>,
    /// Modes occupied in the reference state the circuit acts on.
    pub start_orbitals: Vec<usize>,
}

impl CircuitDescription {
    /// Circuit depth (number of layers, empty layers included).
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Total number of Givens rotations across all layers.
    pub fn n_rotations(&self) -> usize {
        self.layers
            .iter()
            .map(|layer| layer.rotations().count())
            .sum()
    }
}

/// The diagonalizing transformation of a quadratic Hamiltonian, resolved
/// into the branch the circuit compiler needs.
#[derive(Debug, Clone)]
pub enum DiagonalizingTransform {
    /// The Hamiltonian conserves particle number: its eigenstates are
    /// Slater determinants over the eigenbasis of the Hermitian part.
    NumberConserving {
        /// Orbital energies, ascending.
        energies: Array1<f64>,
        /// Orthonormal eigenvectors as columns, matching `energies`.
        basis: Array2<Complex64>,
    },
    /// The general case: the `n x 2n` lower block of the fermionic unitary
    /// diagonalizing the Majorana form.
    Gaussian {
        /// The Gaussian transformation matrix `W = [W₁ | W₂]`.
        transform: Array2<Complex64>,
    },
}

impl DiagonalizingTransform {
    /// Resolve a Hamiltonian descriptor into its diagonalizing transform.
    ///
    /// Validates the descriptor's shape contract before calling a
    /// collaborator: the Hermitian part must be `n x n` and Hermitian
    /// within `tolerance`, the Majorana form `2n x 2n` and antisymmetric
    /// within `tolerance`, and the diagonalizer's output `2n x 2n`.
    /// Violations fail with [`PrepError::InvalidDescriptor`].
    pub fn resolve<H, E, M>(
        hamiltonian: &H,
        eigensolver: &E,
        diagonalizer: &M,
        tolerance: f64,
    ) -> PrepResult<Self>
    where
        H: QuadraticHamiltonian,
        E: HermitianEigenSolver,
        M: MajoranaDiagonalizer,
    {
        let n = hamiltonian.n_modes();
        if hamiltonian.conserves_particle_number() {
            let hermitian = hamiltonian.combined_hermitian_part();
            if hermitian.dim() != (n, n) {
                return Err(PrepError::InvalidDescriptor(format!(
                    "combined Hermitian part is {} x {}, expected {n} x {n}",
                    hermitian.nrows(),
                    hermitian.ncols()
                )));
            }
            for r in 0..n {
                for c in r..n {
                    let deviation = (hermitian[[r, c]] - hermitian[[c, r]].conj()).norm();
                    if deviation > tolerance {
                        return Err(PrepError::InvalidDescriptor(format!(
                            "combined Hermitian part is not Hermitian at ({r}, {c}): \
                             deviation {deviation}"
                        )));
                    }
                }
            }
            let (energies, basis) = eigensolver.eigh(hermitian.view())?;
            if energies.len() != n || basis.dim() != (n, n) {
                return Err(PrepError::InvalidDescriptor(format!(
                    "eigensolver returned {} energies and a {} x {} basis for {n} modes",
                    energies.len(),
                    basis.nrows(),
                    basis.ncols()
                )));
            }
            debug!(n, "resolved number-conserving diagonalizing transform");
            Ok(Self::NumberConserving { energies, basis })
        } else {
            let (majorana, _constant) = hamiltonian.majorana_form();
            if majorana.dim() != (2 * n, 2 * n) {
                return Err(PrepError::InvalidDescriptor(format!(
                    "Majorana form is {} x {}, expected {} x {}",
                    majorana.nrows(),
                    majorana.ncols(),
                    2 * n,
                    2 * n
                )));
            }
            for r in 0..2 * n {
                for c in r..2 * n {
                    let deviation = (majorana[[r, c]] + majorana[[c, r]]).abs();
                    if deviation > tolerance {
                        return Err(PrepError::InvalidDescriptor(format!(
                            "Majorana form is not antisymmetric at ({r}, {c}): \
                             deviation {deviation}"
                        )));
                    }
                }
            }
            let unitary = diagonalizer.diagonalizing_unitary(majorana.view())?;
            if unitary.dim() != (2 * n, 2 * n) {
                return Err(PrepError::InvalidDescriptor(format!(
                    "diagonalizer returned a {} x {} unitary, expected {} x {}",
                    unitary.nrows(),
                    unitary.ncols(),
                    2 * n,
                    2 * n
                )));
            }
            // The lower n rows form the Gaussian transformation matrix.
            let transform = unitary.slice(s![n.., ..]).to_owned();
            debug!(n, "resolved Gaussian diagonalizing transform");
            Ok(Self::Gaussian { transform })
        }
    }

    /// Number of fermionic modes the transform acts on.
    pub fn n_modes(&self) -> usize {
        match self {
            Self::NumberConserving { basis, .. } => basis.nrows(),
            Self::Gaussian { transform } => transform.nrows(),
        }
    }
}

/// Compile a state-preparation circuit from a resolved transform.
///
/// For a number-conserving transform, `occupied = None` selects the ground
/// state (every orbital with energy below `-tolerance` filled); otherwise
/// exactly the listed orbitals are filled. The circuit starts from the
/// first `k` modes occupied.
///
/// For a Gaussian transform, `occupied = None` prepares the ground state
/// from the vacuum using the primary layer sequence alone; `Some(orbs)`
/// (even empty) starts from exactly `orbs` occupied and needs both layer
/// sequences.
///
/// Occupied orbitals outside `0..n_modes` fail with
/// [`PrepError::OrbitalOutOfRange`] before any decomposition runs.
pub fn preparation_circuit(
    transform: &DiagonalizingTransform,
    occupied: Option<&[usize]>,
    tolerance: f64,
) -> PrepResult<CircuitDescription> {
    let n = transform.n_modes();
    if let Some(orbitals) = occupied {
        for &orbital in orbitals {
            if orbital >= n {
                return Err(PrepError::OrbitalOutOfRange {
                    orbital,
                    n_modes: n,
                });
            }
        }
    }

    match transform {
        DiagonalizingTransform::NumberConserving { energies, basis } => {
            let occupied: Vec<usize> = match occupied {
                Some(orbitals) => orbitals.to_vec(),
                // Ground state: energies are ascending, so the negative
                // ones are the first k.
                None => {
                    let k = energies.iter().filter(|&&e| e < -tolerance).count();
                    (0..k).collect()
                }
            };

            // Rows of the Slater determinant matrix are the occupied
            // eigenvectors.
            let mut slater = Array2::<Complex64>::zeros((occupied.len(), n));
            for (row, &orbital) in occupied.iter().enumerate() {
                for c in 0..n {
                    slater[[row, c]] = basis[[c, orbital]];
                }
            }
            let decomposition = givens_decomposition_with_tolerance(slater.view(), tolerance)?;

            let mut layers = decomposition.layers;
            layers.reverse();
            let circuit = CircuitDescription {
                layers,
                start_orbitals: (0..occupied.len()).collect(),
            };
            debug!(
                n,
                n_occupied = occupied.len(),
                depth = circuit.depth(),
                "compiled Slater determinant preparation circuit"
            );
            Ok(circuit)
        }
        DiagonalizingTransform::Gaussian { transform } => {
            let decomposition =
                fermionic_gaussian_decomposition_with_tolerance(transform.view(), tolerance)?;

            let (layers, start_orbitals) = match occupied {
                // Ground state from the vacuum: primary layers only.
                None => {
                    let mut layers = decomposition.layers;
                    layers.reverse();
                    (layers, Vec::new())
                }
                // Arbitrary start occupation: the left layer sequence
                // re-expresses the absorbed left unitary, so the full
                // circuit is the reversed concatenation of both.
                Some(orbitals) => {
                    let mut layers: Vec<Layer> = decomposition
                        .layers
                        .into_iter()
                        .chain(decomposition.left_layers)
                        .collect();
                    layers.reverse();
                    (layers, orbitals.to_vec())
                }
            };
            let circuit = CircuitDescription {
                layers,
                start_orbitals,
            };
            debug!(
                n,
                depth = circuit.depth(),
                "compiled Gaussian state preparation circuit"
            );
            Ok(circuit)
        }
    }
}

/// Builder for compiling a Gaussian state-preparation circuit from a
/// Hamiltonian descriptor.
pub struct GaussianStateCircuit<'a, H> {
    hamiltonian: &'a H,
    occupied_orbitals: Option<Vec<usize>>,
    tolerance: f64,
}

impl<'a, H: QuadraticHamiltonian> GaussianStateCircuit<'a, H> {
    /// Target the ground state of `hamiltonian` with the default
    /// tolerance.
    pub fn new(hamiltonian: &'a H) -> Self {
        Self {
            hamiltonian,
            occupied_orbitals: None,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Target the eigenstate with exactly these orbitals occupied instead
    /// of the ground state.
    #[must_use]
    pub fn with_occupied_orbitals(mut self, orbitals: Vec<usize>) -> Self {
        self.occupied_orbitals = Some(orbitals);
        self
    }

    /// Override the numeric tolerance used for validation and
    /// decomposition.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Resolve the Hamiltonian and compile the preparation circuit.
    pub fn compile<E, M>(&self, eigensolver: &E, diagonalizer: &M) -> PrepResult<CircuitDescription>
    where
        E: HermitianEigenSolver,
        M: MajoranaDiagonalizer,
    {
        let transform = DiagonalizingTransform::resolve(
            self.hamiltonian,
            eigensolver,
            diagonalizer,
            self.tolerance,
        )?;
        preparation_circuit(&transform, self.occupied_orbitals.as_deref(), self.tolerance)
    }
}
