//! The two-mode rotation primitive.
//!
//! A Givens rotation is a unitary acting nontrivially on exactly two
//! coordinates, chosen here so that it zeroes one of two complex scalars:
//!
//!   G · [a  b]ᵗ = [0  r]ᵗ      (zero the left element)
//!   G · [a  b]ᵗ = [r  0]ᵗ      (zero the right element)
//!
//! with |r| = sqrt(|a|² + |b|²). The entries in the first column of G are
//! real by construction, which the in-place column application relies on.

use ndarray::{Array2, ArrayViewMut2, s};
use num_complex::Complex64;

use crate::error::{GivensError, GivensResult};

/// Which of the two scalars the zeroing rotation eliminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Zero the first (upper) element.
    Left,
    /// Zero the second (lower) element.
    Right,
}

/// Whether a rotation acts on two rows or two columns of a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Rotate rows `i` and `j`.
    Row,
    /// Rotate columns `i` and `j` (entries act on the dual basis).
    Col,
}

/// A 2x2 complex rotation in row-major order.
#[derive(Debug, Clone, Copy)]
pub struct Rotation2 {
    /// The matrix elements in row-major order: [[a, b], [c, d]].
    pub data: [Complex64; 4],
}

impl Rotation2 {
    /// Create a new 2x2 rotation.
    pub fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { data: [a, b, c, d] }
    }

    /// The identity rotation.
    pub fn identity() -> Self {
        Self::new(
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(1.0, 0.0),
        )
    }

    /// Rebuild the unit-determinant rotation parameterized by two angles:
    ///
    ///   [ cos(theta)   -e^{i phi} sin(theta) ]
    ///   [ sin(theta)    e^{i phi} cos(theta) ]
    pub fn from_angles(theta: f64, phi: f64) -> Self {
        let c = theta.cos();
        let s = theta.sin();
        let phase = Complex64::from_polar(1.0, phi);
        Self::new(
            Complex64::new(c, 0.0),
            -phase * s,
            Complex64::new(s, 0.0),
            phase * c,
        )
    }

    /// Extract the `(theta, phi)` angle pair of the parameterization above.
    ///
    /// Valid for rotations whose lower-left entry is real, which holds for
    /// every rotation produced by [`zeroing_rotation`].
    pub fn angles(&self) -> (f64, f64) {
        let theta = self.data[2].re.clamp(-1.0, 1.0).asin();
        let phi = self.data[3].arg();
        (theta, phi)
    }

    /// The entrywise complex conjugate (not the adjoint).
    pub fn conj(&self) -> Self {
        let [a, b, c, d] = self.data;
        Self::new(a.conj(), b.conj(), c.conj(), d.conj())
    }
}

/// Compute the rotation that zeroes one of two complex scalars.
///
/// For [`Side::Left`] the returned `G` satisfies `G·[a, b]ᵗ = [0, r]ᵗ`;
/// for [`Side::Right`] it satisfies `G·[a, b]ᵗ = [r, 0]ᵗ`, in both cases
/// with `|r| = sqrt(|a|² + |b|²)`.
///
/// Degenerate inputs short-circuit: a negligible `a` yields the identity
/// form, a negligible `b` (with non-negligible `a`) yields the swap form.
/// When both inputs are real the rotation is real-orthogonal.
pub fn zeroing_rotation(a: Complex64, b: Complex64, side: Side, tolerance: f64) -> Rotation2 {
    let (cosine, sine, phase) = if a.norm() < tolerance {
        (1.0, 0.0, Complex64::new(1.0, 0.0))
    } else if b.norm() < tolerance {
        (0.0, 1.0, Complex64::new(1.0, 0.0))
    } else {
        let denominator = (a.norm_sqr() + b.norm_sqr()).sqrt();
        let cosine = b.norm() / denominator;
        let sine = a.norm() / denominator;
        let sign_a = a / a.norm();
        let sign_b = b / b.norm();
        let mut phase = sign_a * sign_b.conj();
        // Strip a spurious imaginary residue when the phase is real.
        if phase.im.abs() < tolerance {
            phase = Complex64::new(phase.re, 0.0);
        }
        (cosine, sine, phase)
    };

    let both_real = a.im == 0.0 && b.im == 0.0;
    let c = Complex64::new(cosine, 0.0);
    let s = Complex64::new(sine, 0.0);
    match (side, both_real) {
        // Real inputs admit a real-orthogonal rotation (antisymmetric signs).
        (Side::Left, true) => Rotation2::new(c, -phase * s, phase * s, c),
        (Side::Left, false) => Rotation2::new(c, -phase * s, s, phase * c),
        (Side::Right, true) => Rotation2::new(s, phase * c, -phase * c, s),
        (Side::Right, false) => Rotation2::new(s, phase * c, c, -phase * s),
    }
}

/// Apply a rotation in place to rows or columns `i` and `j` of a matrix.
///
/// The column form conjugates the second-column entries of `G`, reflecting
/// that column operations act on the dual basis; the first-column entries
/// are real for every rotation produced by [`zeroing_rotation`].
pub fn rotate(mut matrix: ArrayViewMut2<'_, Complex64>, g: &Rotation2, i: usize, j: usize, axis: Axis) {
    let [g00, g01, g10, g11] = g.data;
    match axis {
        Axis::Row => {
            for c in 0..matrix.ncols() {
                let row_i = matrix[[i, c]];
                let row_j = matrix[[j, c]];
                matrix[[i, c]] = g00 * row_i + g01 * row_j;
                matrix[[j, c]] = g10 * row_i + g11 * row_j;
            }
        }
        Axis::Col => {
            for r in 0..matrix.nrows() {
                let col_i = matrix[[r, i]];
                let col_j = matrix[[r, j]];
                matrix[[r, i]] = g00 * col_i + g01.conj() * col_j;
                matrix[[r, j]] = g10 * col_i + g11.conj() * col_j;
            }
        }
    }
}

/// Apply a rotation to indices `(i, j)` within the first half of the given
/// axis and its complex conjugate to `(i, j)` within the second half.
///
/// The mirrored-conjugate form keeps the two blocks of a fermionic
/// transformation matrix antisymmetry-consistent. Fails with
/// [`GivensError::OddDimension`] if the relevant dimension is odd.
pub fn double_rotate(
    matrix: &mut Array2<Complex64>,
    g: &Rotation2,
    i: usize,
    j: usize,
    axis: Axis,
) -> GivensResult<()> {
    match axis {
        Axis::Row => {
            let rows = matrix.nrows();
            if rows % 2 != 0 {
                return Err(GivensError::OddDimension { axis, len: rows });
            }
            let half = rows / 2;
            rotate(matrix.slice_mut(s![..half, ..]), g, i, j, Axis::Row);
            rotate(matrix.slice_mut(s![half.., ..]), &g.conj(), i, j, Axis::Row);
        }
        Axis::Col => {
            let cols = matrix.ncols();
            if cols % 2 != 0 {
                return Err(GivensError::OddDimension { axis, len: cols });
            }
            let half = cols / 2;
            rotate(matrix.slice_mut(s![.., ..half]), g, i, j, Axis::Col);
            rotate(matrix.slice_mut(s![.., half..]), &g.conj(), i, j, Axis::Col);
        }
    }
    Ok(())
}

/// Swap two columns of a matrix in place.
pub fn swap_columns(matrix: &mut Array2<Complex64>, a: usize, b: usize) {
    for r in 0..matrix.nrows() {
        matrix.swap([r, a], [r, b]);
    }
}
