//! Tests for the rectangular Givens decomposition.

mod common;

use common::{assert_layers_disjoint, c, embed, max_deviation, random_orthonormal_rows};
use ndarray::{Array2, array};
use num_complex::Complex64;
use svalin_givens::{GivensDecomposition, GivensError, givens_decomposition};

/// Replay a decomposition forward: V · Q · G₁† ··· G_k† should equal the
/// reduced form D (diagonal in the first m columns, zero elsewhere).
fn replay(q: &Array2<Complex64>, decomposition: &GivensDecomposition) -> Array2<Complex64> {
    let n = q.ncols();
    let mut m = decomposition.left_unitary.dot(q);
    for layer in &decomposition.layers {
        for rotation in layer.rotations() {
            // Column rotation by G is right-multiplication by G†.
            let e = embed(rotation, n);
            let e_dagger = e.t().mapv(|z| z.conj());
            m = m.dot(&e_dagger);
        }
    }
    m
}

/// The reduced form as a dense matrix: diagonal entries, zero elsewhere.
fn reduced_form(decomposition: &GivensDecomposition, m: usize, n: usize) -> Array2<Complex64> {
    let mut d = Array2::<Complex64>::zeros((m, n));
    for i in 0..m {
        d[[i, i]] = decomposition.diagonal[i];
    }
    d
}

// ---------------------------------------------------------------------------
// Shape handling
// ---------------------------------------------------------------------------

#[test]
fn rejects_more_rows_than_columns() {
    let q = Array2::<Complex64>::zeros((3, 2));
    let err = givens_decomposition(q.view()).unwrap_err();
    assert!(matches!(
        err,
        GivensError::WideMatrixRequired { rows: 3, cols: 2 }
    ));
}

#[test]
fn square_matrix_needs_no_rotations() {
    let q = random_orthonormal_rows(4, 4, 7);
    let decomposition = givens_decomposition(q.view()).unwrap();
    assert!(decomposition.layers.is_empty());
    // Pre-clearing alone diagonalizes a square input: V · Q = D.
    let d = reduced_form(&decomposition, 4, 4);
    assert!(max_deviation(&decomposition.left_unitary.dot(&q), &d) < 1e-6);
}

#[test]
fn depth_is_n_minus_one_for_rectangular_input() {
    let q = random_orthonormal_rows(2, 5, 11);
    let decomposition = givens_decomposition(q.view()).unwrap();
    assert_eq!(decomposition.depth(), 4);
}

// ---------------------------------------------------------------------------
// Degenerate inputs
// ---------------------------------------------------------------------------

#[test]
fn already_diagonal_input_emits_no_rotations() {
    let q = array![
        [c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0)],
        [c(0.0, 0.0), c(1.0, 0.0), c(0.0, 0.0)],
    ];
    let decomposition = givens_decomposition(q.view()).unwrap();
    let total: usize = decomposition
        .layers
        .iter()
        .map(|layer| layer.rotations().count())
        .sum();
    assert_eq!(total, 0);
}

#[test]
fn one_particle_two_modes() {
    let s = std::f64::consts::FRAC_1_SQRT_2;
    let q = array![[c(s, 0.0), c(s, 0.0)]];
    let decomposition = givens_decomposition(q.view()).unwrap();
    assert_eq!(decomposition.depth(), 1);
    assert_eq!(decomposition.layers[0].len(), 1);
    let rotation = decomposition.layers[0].rotations().next().unwrap();
    assert_eq!((rotation.i, rotation.j), (0, 1));
    assert!((decomposition.diagonal[0].norm() - 1.0).abs() < 1e-12);
    let d = reduced_form(&decomposition, 1, 2);
    assert!(max_deviation(&replay(&q, &decomposition), &d) < 1e-9);
}

// ---------------------------------------------------------------------------
// Structural properties
// ---------------------------------------------------------------------------

#[test]
fn rotations_act_on_adjacent_pairs() {
    let q = random_orthonormal_rows(3, 7, 23);
    let decomposition = givens_decomposition(q.view()).unwrap();
    for layer in &decomposition.layers {
        for rotation in layer.rotations() {
            assert_eq!(rotation.j, rotation.i + 1);
        }
    }
}

#[test]
fn layers_touch_disjoint_modes() {
    for (m, n, seed) in [(2, 4, 1), (3, 6, 2), (4, 6, 3), (3, 8, 4)] {
        let q = random_orthonormal_rows(m, n, seed);
        let decomposition = givens_decomposition(q.view()).unwrap();
        assert_layers_disjoint(&decomposition.layers, n);
    }
}

#[test]
fn left_unitary_is_unitary() {
    let q = random_orthonormal_rows(3, 6, 31);
    let decomposition = givens_decomposition(q.view()).unwrap();
    let v = &decomposition.left_unitary;
    let v_dagger = v.t().mapv(|z| z.conj());
    assert!(max_deviation(&v.dot(&v_dagger), &Array2::eye(3)) < 1e-9);
}

// ---------------------------------------------------------------------------
// Reconstruction
// ---------------------------------------------------------------------------

#[test]
fn reduces_to_diagonal_form() {
    for (m, n, seed) in [(1, 2, 5), (2, 4, 6), (3, 6, 7), (4, 6, 8), (2, 7, 9)] {
        let q = random_orthonormal_rows(m, n, seed);
        let decomposition = givens_decomposition(q.view()).unwrap();
        let d = reduced_form(&decomposition, m, n);
        let deviation = max_deviation(&replay(&q, &decomposition), &d);
        assert!(deviation < 1e-6, "{m}x{n} seed {seed}: deviation {deviation}");
        // The diagonal of a unitary reduction has unit-modulus entries.
        for entry in &decomposition.diagonal {
            assert!((entry.norm() - 1.0).abs() < 1e-6);
        }
    }
}

#[test]
fn round_trip_recovers_input() {
    // Rebuild Q from the diagonal output: Q = V† · D · G_k ··· G_1.
    for (m, n, seed) in [(2, 4, 13), (3, 5, 17), (4, 8, 19)] {
        let q = random_orthonormal_rows(m, n, seed);
        let decomposition = givens_decomposition(q.view()).unwrap();
        let mut rebuilt = reduced_form(&decomposition, m, n);
        for layer in decomposition.layers.iter().rev() {
            for rotation in layer.rotations() {
                rebuilt = rebuilt.dot(&embed(rotation, n));
            }
        }
        let v_dagger = decomposition.left_unitary.t().mapv(|z| z.conj());
        let rebuilt = v_dagger.dot(&rebuilt);
        let deviation = max_deviation(&rebuilt, &q);
        assert!(deviation < 1e-6, "{m}x{n} seed {seed}: deviation {deviation}");
    }
}
