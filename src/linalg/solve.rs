//! Direct linear solve via Gaussian elimination with partial pivoting
//!
//! Solves `A * x = b` for the Lagrange multipliers each sub-step. The
//! constraint-space matrix `A = J W Jt` is symmetric positive semi-definite;
//! redundant constraints (two pins on one particle, a rod between coincident
//! points) make it singular. A singular system is a defined degenerate
//! outcome, not an error: the solver logs a warning and returns the zero
//! vector, so the degenerate constraints simply contribute no corrective
//! force that sub-step.

use tracing::warn;

use super::dense::{DMat, DVec};

/// Solve `a * x = b`, consuming both since elimination is done in place.
///
/// `a` must be square with `a.rows() == b.len()`; violating this is a
/// precondition failure and panics.
pub fn solve(mut a: DMat, mut b: DVec) -> DVec {
    assert_eq!(a.rows(), a.cols(), "solve requires a square matrix");
    assert_eq!(a.rows(), b.len(), "solve requires rows(A) == len(b)");

    let n = a.rows();

    // Forward elimination with row pivoting
    for col in 0..n {
        // Largest-magnitude entry in this column among remaining rows
        let mut best_row = col;
        let mut best = a[(col, col)].abs();
        for row in (col + 1)..n {
            if a[(row, col)].abs() > best {
                best_row = row;
                best = a[(row, col)].abs();
            }
        }

        // An exactly-zero pivot means the matrix is singular; fall back
        // to the zero multiplier vector and keep stepping
        if a[(best_row, col)] == 0.0 {
            warn!(n, col, "singular constraint matrix, using zero multipliers");
            return DVec::new(n);
        }

        if best_row != col {
            swap_rows(&mut a, col, best_row);
            let tmp = b[col];
            b[col] = b[best_row];
            b[best_row] = tmp;
        }

        for row in (col + 1)..n {
            let factor = a[(row, col)] / a[(col, col)];
            for k in 0..n {
                a[(row, k)] -= a[(col, k)] * factor;
            }
            b[row] -= b[col] * factor;
        }
    }

    // Back substitution. Row pivoting permutes equations, not unknowns,
    // so x comes out in the right order and no swap undo is needed.
    let mut x = DVec::new(n);
    for row in (0..n).rev() {
        let mut v = b[row];
        for k in (row + 1)..n {
            v -= a[(row, k)] * x[k];
        }
        x[row] = v / a[(row, row)];
    }

    x
}

fn swap_rows(a: &mut DMat, i: usize, j: usize) {
    for k in 0..a.cols() {
        let tmp = a[(i, k)];
        a[(i, k)] = a[(j, k)];
        a[(j, k)] = tmp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_solve() {
        let mut a = DMat::new(2, 2);
        a[(0, 0)] = 1.0;
        a[(1, 1)] = 1.0;
        let b = DVec::from_slice(&[3.0, -7.0]);

        let x = solve(a, b);
        assert_eq!(x.as_slice(), &[3.0, -7.0]);
    }

    #[test]
    fn pivot_swap_yields_analytic_solution() {
        // Zero in the (0,0) position forces a row swap before elimination.
        // System: 0x + 2y = 4, 3x + 1y = 5  =>  x = 4/3, y = 2
        let mut a = DMat::new(2, 2);
        a[(0, 0)] = 0.0;
        a[(0, 1)] = 2.0;
        a[(1, 0)] = 3.0;
        a[(1, 1)] = 1.0;
        let b = DVec::from_slice(&[4.0, 5.0]);

        let x = solve(a, b);
        assert!((x[0] - 4.0 / 3.0).abs() < 1e-12);
        assert!((x[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn singular_matrix_returns_zero_vector() {
        let a = DMat::new(3, 3);
        let b = DVec::from_slice(&[1.0, 2.0, 3.0]);

        let x = solve(a, b);
        assert_eq!(x.as_slice(), &[0.0, 0.0, 0.0]);
    }
}
