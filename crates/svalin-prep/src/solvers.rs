//! Diagonalization collaborators.
//!
//! The compiler consumes two solver interfaces: a Hermitian eigensolver for
//! particle-conserving Hamiltonians and a Majorana diagonalizer for the
//! general case. A stock Jacobi eigensolver is provided so the
//! particle-conserving path works without an external linear-algebra
//! backend; the Majorana diagonalizer has no stock implementation (it needs
//! a real Schur decomposition) and must be supplied by the caller.

use ndarray::{Array1, Array2, ArrayView2};
use num_complex::Complex64;
use tracing::debug;

use crate::error::{PrepError, PrepResult};

/// Computes the spectral decomposition of a Hermitian matrix.
pub trait HermitianEigenSolver {
    /// Eigenvalues in ascending order, paired with orthonormal
    /// eigenvectors as the columns of the returned matrix.
    fn eigh(
        &self,
        matrix: ArrayView2<'_, Complex64>,
    ) -> PrepResult<(Array1<f64>, Array2<Complex64>)>;
}

/// Computes the fermionic unitary diagonalizing a Majorana-form
/// Hamiltonian.
pub trait MajoranaDiagonalizer {
    /// For a real antisymmetric `2n x 2n` input, the `2n x 2n` unitary
    /// whose lower `n` rows form the Gaussian transformation matrix
    /// `W = [W₁ | W₂]`.
    fn diagonalizing_unitary(
        &self,
        majorana: ArrayView2<'_, f64>,
    ) -> PrepResult<Array2<Complex64>>;
}

/// A cyclic largest-pivot Jacobi eigensolver for Hermitian matrices.
///
/// Each sweep zeroes the largest off-diagonal element with a complex plane
/// rotation `G` (so `A ← G†·A·G` stays Hermitian) until every off-diagonal
/// magnitude falls below the convergence threshold. Adequate for the small
/// mode counts state-preparation circuits target; swap in a LAPACK-backed
/// [`HermitianEigenSolver`] for large problems.
#[derive(Debug, Clone)]
pub struct JacobiEigenSolver {
    convergence: f64,
}

impl Default for JacobiEigenSolver {
    fn default() -> Self {
        Self { convergence: 1e-12 }
    }
}

impl JacobiEigenSolver {
    /// Create a solver with the default convergence threshold (1e-12).
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the off-diagonal magnitude below which iteration stops.
    #[must_use]
    pub fn with_convergence(mut self, convergence: f64) -> Self {
        self.convergence = convergence;
        self
    }
}

impl HermitianEigenSolver for JacobiEigenSolver {
    fn eigh(
        &self,
        matrix: ArrayView2<'_, Complex64>,
    ) -> PrepResult<(Array1<f64>, Array2<Complex64>)> {
        let (n, cols) = matrix.dim();
        if n != cols {
            return Err(PrepError::InvalidDescriptor(format!(
                "eigensolver requires a square matrix, got {n} x {cols}"
            )));
        }
        let mut a = matrix.to_owned();
        let mut v = Array2::<Complex64>::eye(n);
        let max_iterations = 100 * n * n;
        let mut converged = n < 2;

        for iteration in 0..max_iterations {
            // Largest off-diagonal pivot.
            let (mut p, mut q, mut best) = (0, 1, 0.0_f64);
            for r in 0..n {
                for c in (r + 1)..n {
                    let magnitude = a[[r, c]].norm();
                    if magnitude > best {
                        (p, q, best) = (r, c, magnitude);
                    }
                }
            }
            if best <= self.convergence {
                debug!(n, iteration, "Jacobi eigensolver converged");
                converged = true;
                break;
            }

            // Plane rotation G with G[p,p] = cos, G[p,q] = -sin·u,
            // G[q,p] = sin·u*, G[q,q] = cos, where u is the unit phase of
            // the pivot; this choice zeroes A[p,q] under A ← G†·A·G.
            let u = a[[p, q]] / best;
            let theta = 0.5 * (2.0 * best).atan2(a[[p, p]].re - a[[q, q]].re);
            let (cos, sin) = (theta.cos(), theta.sin());

            for r in 0..n {
                let arp = a[[r, p]];
                let arq = a[[r, q]];
                a[[r, p]] = cos * arp + sin * u.conj() * arq;
                a[[r, q]] = -sin * u * arp + cos * arq;
            }
            for c in 0..n {
                let apc = a[[p, c]];
                let aqc = a[[q, c]];
                a[[p, c]] = cos * apc + sin * u * aqc;
                a[[q, c]] = -sin * u.conj() * apc + cos * aqc;
            }
            for r in 0..n {
                let vrp = v[[r, p]];
                let vrq = v[[r, q]];
                v[[r, p]] = cos * vrp + sin * u.conj() * vrq;
                v[[r, q]] = -sin * u * vrp + cos * vrq;
            }
        }

        if !converged {
            return Err(PrepError::ConvergenceFailure {
                iterations: max_iterations,
            });
        }

        // Sort eigenpairs ascending by eigenvalue.
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&i, &j| a[[i, i]].re.total_cmp(&a[[j, j]].re));
        let energies = Array1::from_iter(order.iter().map(|&i| a[[i, i]].re));
        let mut basis = Array2::<Complex64>::zeros((n, n));
        for (new_col, &old_col) in order.iter().enumerate() {
            for r in 0..n {
                basis[[r, new_col]] = v[[r, old_col]];
            }
        }
        Ok((energies, basis))
    }
}
