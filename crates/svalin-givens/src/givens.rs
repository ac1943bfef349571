//! Rectangular Givens decomposition.
//!
//! Decomposes an m x n matrix Q (m <= n) with orthonormal rows as
//!
//!   V · Q · U† = D
//!
//! where V and U are unitary and D is diagonal in its first m columns and
//! zero elsewhere. U is produced as an ordered sequence of layers of
//! two-mode Givens rotations; rotations within one layer act on disjoint
//! adjacent column pairs and can be applied in parallel, so the layer count
//! is the circuit depth.

use ndarray::{Array1, Array2, ArrayView2};
use num_complex::Complex64;
use tracing::debug;

use crate::DEFAULT_TOLERANCE;
use crate::error::{GivensError, GivensResult};
use crate::layer::{GivensRotation, Layer, LayerOp};
use crate::rotation::{Axis, Side, rotate, zeroing_rotation};

/// The result of a rectangular Givens decomposition.
#[derive(Debug, Clone)]
pub struct GivensDecomposition {
    /// Rotation layers in decomposition order; the layer count is the
    /// circuit depth. Layers where every candidate entry was already zero
    /// are kept (empty), preserving the fixed depth of the schedule.
    pub layers: Vec<Layer>,
    /// The accumulated m x m left unitary V.
    pub left_unitary: Array2<Complex64>,
    /// The m nonzero entries of the reduced diagonal D.
    pub diagonal: Array1<Complex64>,
}

impl GivensDecomposition {
    /// Circuit depth of the rotation schedule.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }
}

/// Decompose a matrix with orthonormal rows using the default tolerance.
///
/// See [`givens_decomposition_with_tolerance`].
pub fn givens_decomposition(q: ArrayView2<'_, Complex64>) -> GivensResult<GivensDecomposition> {
    givens_decomposition_with_tolerance(q, DEFAULT_TOLERANCE)
}

/// Decompose an m x n matrix Q with orthonormal rows (m <= n) into a
/// minimal-depth schedule of Givens rotations.
///
/// Entries whose magnitude is already within `tolerance` are skipped, so no
/// near-identity rotations are emitted. Fails with
/// [`GivensError::WideMatrixRequired`] when `m > n`. The caller's matrix is
/// never mutated; the routine works on an owned copy.
pub fn givens_decomposition_with_tolerance(
    q: ArrayView2<'_, Complex64>,
    tolerance: f64,
) -> GivensResult<GivensDecomposition> {
    let (m, n) = q.dim();
    if m > n {
        return Err(GivensError::WideMatrixRequired { rows: m, cols: n });
    }
    let mut current = q.to_owned();
    debug!(m, n, "computing rectangular Givens decomposition");

    // Pre-clearing sweep: zero the sub-diagonal entries of the rightmost
    // n - m + 1 columns with adjacent-row rotations, accumulating the left
    // unitary V. This isolates the m x m unitary block that the main phase
    // reduces with column rotations.
    let mut left_unitary = Array2::<Complex64>::eye(m);
    for k in ((n - m + 1)..n).rev() {
        for l in 0..(m + k - n) {
            if current[[l, k]].norm() > tolerance {
                let g = zeroing_rotation(current[[l, k]], current[[l + 1, k]], Side::Left, tolerance);
                rotate(current.view_mut(), &g, l, l + 1, Axis::Row);
                rotate(left_unitary.view_mut(), &g, l, l + 1, Axis::Row);
            }
        }
    }

    // Main annihilation phase: n - 1 steps of an anti-diagonal staircase
    // sweep. A square input is already diagonal after pre-clearing, so no
    // rotations are needed at all.
    let mut layers = Vec::new();
    if m != n {
        let max_simul = m.min(n - m);
        for k in 0..(n - 1) {
            // Closed-form (row, column) ranges of the entries that can be
            // zeroed in parallel this step. Three regimes: the staircase
            // growing from the corner, shrinking into the opposite corner,
            // or running at full width in between.
            let (start_row, end_row, start_column) = if k + 1 < max_simul {
                (0, k + 1, n - m - k)
            } else if k + max_simul > n - 1 {
                let count = n - 1 - k;
                (m - count, m, m - count + 1)
            } else if max_simul == m {
                (0, m, n - m - k)
            } else {
                (k + 1 - max_simul, k + 1, k + 2 - max_simul)
            };
            let end_column = start_column + 2 * (end_row - start_row);

            let mut layer = Layer::new();
            for (i, j) in (start_row..end_row).zip((start_column..end_column).step_by(2)) {
                let right = current[[i, j]].conj();
                if right.norm() > tolerance {
                    let left = current[[i, j - 1]].conj();
                    let g = zeroing_rotation(left, right, Side::Right, tolerance);
                    let (theta, phi) = g.angles();
                    layer.push(LayerOp::Rotation(GivensRotation::new(j - 1, j, theta, phi)));
                    rotate(current.view_mut(), &g, j - 1, j, Axis::Col);
                }
            }
            layers.push(layer);
        }
    }

    let diagonal = Array1::from_iter((0..m).map(|i| current[[i, i]]));
    debug!(depth = layers.len(), "rectangular Givens decomposition complete");
    Ok(GivensDecomposition {
        layers,
        left_unitary,
        diagonal,
    })
}
