//! Fermionic Gaussian decomposition.
//!
//! Decomposes an n x 2n matrix W with orthonormal rows and the block form
//!
//!   W = [ W₁ | W₂ ]
//!
//! where the blocks satisfy the fermionic anticommutation constraints
//!
//!   W₁·W₁† + W₂·W₂† = I
//!   W₁·W₂ᵗ + W₂·W₁ᵗ = 0
//!
//! as  V · W · U† = [ 0 | D ]  with V, U unitary and D diagonal unitary.
//!
//! U is emitted as layers of Givens rotations interleaved with
//! particle-hole transformations on the last fermionic mode; the
//! particle-hole steps expose the occupation degree of freedom a
//! non-particle-conserving transformation requires. A second, coupled
//! decomposition of Vᵗ·D* into plain rotation layers is produced alongside:
//! the primary layers alone prepare the vacuum-referenced state, while both
//! together prepare a state with an arbitrary start occupation.

use ndarray::{Array1, Array2, ArrayView2, s};
use num_complex::Complex64;
use tracing::debug;

use crate::DEFAULT_TOLERANCE;
use crate::error::{GivensError, GivensResult};
use crate::layer::{GivensRotation, Layer, LayerOp};
use crate::rotation::{Axis, Side, double_rotate, rotate, swap_columns, zeroing_rotation};

/// The pair of coupled decompositions of a fermionic Gaussian
/// transformation.
#[derive(Debug, Clone)]
pub struct FermionicGaussianDecomposition {
    /// Primary layers (rotations and particle-hole markers), decomposition
    /// order. 2n - 1 layers.
    pub layers: Vec<Layer>,
    /// Layers of the coupled left decomposition (rotations only),
    /// decomposition order. 2(n - 1) - 1 layers.
    pub left_layers: Vec<Layer>,
    /// The n diagonal entries of D, straddling the block boundary.
    pub diagonal: Array1<Complex64>,
    /// The n diagonal entries remaining from the left decomposition.
    pub left_diagonal: Array1<Complex64>,
}

impl FermionicGaussianDecomposition {
    /// Circuit depth of the primary schedule.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }
}

/// Decompose a fermionic Gaussian transformation using the default
/// tolerance.
///
/// See [`fermionic_gaussian_decomposition_with_tolerance`].
pub fn fermionic_gaussian_decomposition(
    w: ArrayView2<'_, Complex64>,
) -> GivensResult<FermionicGaussianDecomposition> {
    fermionic_gaussian_decomposition_with_tolerance(w, DEFAULT_TOLERANCE)
}

/// Decompose an n x 2n matrix with the fermionic block structure into the
/// coupled pair of rotation/particle-hole schedules.
///
/// Fails with [`GivensError::BlockShapeRequired`] if the column count is
/// not twice the row count, and with [`GivensError::ConstraintViolation`]
/// if the block constraints are violated beyond `tolerance` — both checked
/// before any work happens. The caller's matrix is never mutated.
pub fn fermionic_gaussian_decomposition_with_tolerance(
    w: ArrayView2<'_, Complex64>,
    tolerance: f64,
) -> GivensResult<FermionicGaussianDecomposition> {
    let (n, p) = w.dim();
    if p != 2 * n {
        return Err(GivensError::BlockShapeRequired { rows: n, cols: p });
    }
    check_block_constraints(&w, n, tolerance)?;

    let mut current = w.to_owned();
    debug!(n, "computing fermionic Gaussian decomposition");

    // Pre-clearing sweep on the left block, accumulating U₀.
    let mut left_unitary = Array2::<Complex64>::eye(n);
    for k in 0..n.saturating_sub(1) {
        for l in 0..(n - 1 - k) {
            if current[[l, k]].norm() > tolerance {
                let g = zeroing_rotation(current[[l, k]], current[[l + 1, k]], Side::Left, tolerance);
                rotate(current.view_mut(), &g, l, l + 1, Axis::Row);
                rotate(left_unitary.view_mut(), &g, l, l + 1, Axis::Row);
            }
        }
    }

    // Main phase: 2n - 1 steps (the circuit depth).
    let mut layers = Vec::new();
    for k in 0..(2 * n).saturating_sub(1) {
        let mut layer = Layer::new();

        // Even steps probe the hole column. A non-negligible entry there
        // means the transformation mixes this mode's particle and hole
        // sectors: flip the last mode and swap its paired columns before
        // rotating.
        if k % 2 == 0 && current[[k / 2, n - 1]].norm() > tolerance {
            layer.push(LayerOp::ParticleHole);
            swap_columns(&mut current, n - 1, 2 * n - 1);
        }

        // (row, column) pairs that can be zeroed in parallel this step.
        let (end_row, end_column) = if k < n {
            (k, n - 1 - k)
        } else {
            (n - 1, k - (n - 1))
        };
        let columns: Vec<usize> = (end_column..n - 1).step_by(2).collect();
        for (offset, &j) in columns.iter().enumerate() {
            let i = end_row - offset;
            let left = current[[i, j]].conj();
            if left.norm() > tolerance {
                let right = current[[i, j + 1]].conj();
                let g = zeroing_rotation(left, right, Side::Left, tolerance);
                let (theta, phi) = g.angles();
                layer.push(LayerOp::Rotation(GivensRotation::new(j, j + 1, theta, phi)));
                // The double form keeps the two blocks antisymmetry-
                // consistent across the rotation.
                double_rotate(&mut current, &g, j, j + 1, Axis::Col)?;
            }
        }
        layers.push(layer);
    }

    // The n diagonal entries straddle the block boundary.
    let diagonal = Array1::from_iter((0..n).map(|i| current[[i, n + i]]));

    // Left decomposition: reduce M = U₀ᵗ scaled column-wise by D* with
    // plain column rotations.
    let mut left_matrix = left_unitary.t().to_owned();
    for k in 0..n {
        let scale = diagonal[k].conj();
        left_matrix.column_mut(k).mapv_inplace(|z| z * scale);
    }

    let mut left_layers = Vec::new();
    for k in 0..(2 * n).saturating_sub(3) {
        let mut layer = Layer::new();

        let (start_row, start_column) = if k < n - 1 {
            (0, n - 1 - k)
        } else {
            (k + 2 - n, k + 3 - n)
        };
        for (offset, j) in (start_column..n).step_by(2).enumerate() {
            let i = start_row + offset;
            let right = left_matrix[[i, j]].conj();
            if right.norm() > tolerance {
                let left = left_matrix[[i, j - 1]].conj();
                let g = zeroing_rotation(left, right, Side::Right, tolerance);
                let (theta, phi) = g.angles();
                layer.push(LayerOp::Rotation(GivensRotation::new(j - 1, j, theta, phi)));
                rotate(left_matrix.view_mut(), &g, j - 1, j, Axis::Col);
            }
        }
        left_layers.push(layer);
    }

    let left_diagonal = Array1::from_iter((0..n).map(|i| left_matrix[[i, i]]));
    debug!(
        depth = layers.len(),
        left_depth = left_layers.len(),
        "fermionic Gaussian decomposition complete"
    );
    Ok(FermionicGaussianDecomposition {
        layers,
        left_layers,
        diagonal,
        left_diagonal,
    })
}

/// Verify the block identities required for the transformed ladder
/// operators to obey the fermionic anticommutation relations.
fn check_block_constraints(
    w: &ArrayView2<'_, Complex64>,
    n: usize,
    tolerance: f64,
) -> GivensResult<()> {
    let left = w.slice(s![.., ..n]);
    let right = w.slice(s![.., n..]);
    let left_dagger = left.t().mapv(|z| z.conj());
    let right_dagger = right.t().mapv(|z| z.conj());

    let mut deviation = 0.0f64;
    let unit = left.dot(&left_dagger) + right.dot(&right_dagger);
    for ((r, c), z) in unit.indexed_iter() {
        let expected = if r == c {
            Complex64::new(1.0, 0.0)
        } else {
            Complex64::new(0.0, 0.0)
        };
        deviation = deviation.max((z - expected).norm());
    }
    let cross = left.dot(&right.t()) + right.dot(&left.t());
    for z in &cross {
        deviation = deviation.max(z.norm());
    }

    if deviation > tolerance {
        return Err(GivensError::ConstraintViolation {
            deviation,
            tolerance,
        });
    }
    Ok(())
}
