//! Shared helpers for the decomposition integration tests.
#![allow(dead_code)]

use ndarray::Array2;
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use svalin_givens::{GivensRotation, Layer};

pub fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

/// A random matrix with orthonormal rows (Gram-Schmidt on random entries).
pub fn random_orthonormal_rows(m: usize, n: usize, seed: u64) -> Array2<Complex64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut q = Array2::from_shape_fn((m, n), |_| {
        c(rng.r#gen::<f64>() - 0.5, rng.r#gen::<f64>() - 0.5)
    });
    for r in 0..m {
        for s in 0..r {
            // overlap = <row_s, row_r>
            let mut overlap = c(0.0, 0.0);
            for k in 0..n {
                overlap += q[[s, k]].conj() * q[[r, k]];
            }
            for k in 0..n {
                let prev = q[[s, k]];
                q[[r, k]] -= overlap * prev;
            }
        }
        let norm: f64 = (0..n).map(|k| q[[r, k]].norm_sqr()).sum::<f64>().sqrt();
        for k in 0..n {
            q[[r, k]] /= norm;
        }
    }
    q
}

/// Embed a rotation's 2x2 unitary into an n x n identity at `(i, j)`.
pub fn embed(rotation: &GivensRotation, n: usize) -> Array2<Complex64> {
    let g = rotation.matrix();
    let mut e = Array2::<Complex64>::eye(n);
    e[[rotation.i, rotation.i]] = g.data[0];
    e[[rotation.i, rotation.j]] = g.data[1];
    e[[rotation.j, rotation.i]] = g.data[2];
    e[[rotation.j, rotation.j]] = g.data[3];
    e
}

/// Assert every layer touches pairwise-disjoint mode indices.
pub fn assert_layers_disjoint(layers: &[Layer], n_modes: usize) {
    for (depth, layer) in layers.iter().enumerate() {
        let mut modes = layer.modes(n_modes);
        modes.sort_unstable();
        let before = modes.len();
        modes.dedup();
        assert_eq!(
            before,
            modes.len(),
            "layer {depth} touches a mode twice: {modes:?}"
        );
    }
}

/// Largest entrywise magnitude of the difference of two matrices.
pub fn max_deviation(a: &Array2<Complex64>, b: &Array2<Complex64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).norm())
        .fold(0.0, f64::max)
}
