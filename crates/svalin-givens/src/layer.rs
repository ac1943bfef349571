//! Schedule value types: rotations, particle-hole markers, and layers.
//!
//! A decomposition is an ordered sequence of [`Layer`]s. Layer order is the
//! circuit depth and must be respected; the operations *within* one layer
//! act on pairwise-disjoint mode pairs, commute, and may be executed in any
//! order or concurrently by a downstream simulator.

use serde::{Deserialize, Serialize};

use crate::rotation::Rotation2;

/// A Givens rotation of adjacent modes `i` and `j = i + 1` by angles
/// `(theta, phi)`, parameterizing the 2x2 unitary
///
///   [ cos(theta)   -e^{i phi} sin(theta) ]
///   [ sin(theta)    e^{i phi} cos(theta) ]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GivensRotation {
    /// First mode index.
    pub i: usize,
    /// Second mode index; always `i + 1`.
    pub j: usize,
    /// Mixing angle.
    pub theta: f64,
    /// Relative phase.
    pub phi: f64,
}

impl GivensRotation {
    /// Create a new rotation description.
    pub fn new(i: usize, j: usize, theta: f64, phi: f64) -> Self {
        Self { i, j, theta, phi }
    }

    /// Rebuild the 2x2 unitary this description parameterizes.
    pub fn matrix(&self) -> Rotation2 {
        Rotation2::from_angles(self.theta, self.phi)
    }
}

/// One elementary operation within a layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LayerOp {
    /// A two-mode Givens rotation.
    Rotation(GivensRotation),
    /// The particle-hole transformation on the last fermionic mode,
    /// exchanging the occupied/unoccupied role of that mode.
    ParticleHole,
}

/// A set of mutually commuting operations forming one circuit depth step.
///
/// Contains at most one particle-hole marker; all operations touch
/// pairwise-disjoint mode indices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    ops: Vec<LayerOp>,
}

impl Layer {
    /// Create an empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation to the layer.
    pub fn push(&mut self, op: LayerOp) {
        self.ops.push(op);
    }

    /// The operations in this layer.
    pub fn ops(&self) -> &[LayerOp] {
        &self.ops
    }

    /// Number of operations in this layer.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// True if the layer carries no operations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The rotations in this layer, skipping any particle-hole marker.
    pub fn rotations(&self) -> impl Iterator<Item = &GivensRotation> {
        self.ops.iter().filter_map(|op| match op {
            LayerOp::Rotation(rotation) => Some(rotation),
            LayerOp::ParticleHole => None,
        })
    }

    /// True if the layer contains a particle-hole marker.
    pub fn has_particle_hole(&self) -> bool {
        self.ops.iter().any(|op| matches!(op, LayerOp::ParticleHole))
    }

    /// The mode indices touched by this layer's operations, given the total
    /// number of modes (the particle-hole marker acts on the last mode).
    pub fn modes(&self, n_modes: usize) -> Vec<usize> {
        let mut modes = Vec::with_capacity(2 * self.ops.len());
        for op in &self.ops {
            match op {
                LayerOp::Rotation(rotation) => {
                    modes.push(rotation.i);
                    modes.push(rotation.j);
                }
                LayerOp::ParticleHole => modes.push(n_modes - 1),
            }
        }
        modes
    }
}

impl FromIterator<LayerOp> for Layer {
    fn from_iter<T: IntoIterator<Item = LayerOp>>(iter: T) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}
