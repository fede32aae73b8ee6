//! Dense vector and matrix containers for the constraint solve
//!
//! `DVec` and `DMat` are fixed-size, row-major, f64 containers with the
//! element-wise arithmetic the stepper needs. Sizes are fixed at
//! construction; every binary operation asserts matching dimensions
//! (a mismatch is a programmer error, not a runtime condition).
//!
//! Most Jacobian rows are sparse (a constraint touches at most two
//! particles) but no sparsity is exploited here; the systems are small.

use std::ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign};

/// Fixed-length dense vector of f64
#[derive(Debug, Clone, PartialEq)]
pub struct DVec {
    buf: Vec<f64>,
}

impl DVec {
    /// A zeroed vector of length `len`
    pub fn new(len: usize) -> Self {
        Self { buf: vec![0.0; len] }
    }

    pub fn from_slice(vals: &[f64]) -> Self {
        Self { buf: vals.to_vec() }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.buf
    }

    /// Reset every element to 0.0 in place
    pub fn zero(&mut self) {
        for v in self.buf.iter_mut() {
            *v = 0.0;
        }
    }
}

impl Index<usize> for DVec {
    type Output = f64;
    fn index(&self, i: usize) -> &f64 {
        &self.buf[i]
    }
}

impl IndexMut<usize> for DVec {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.buf[i]
    }
}

impl AddAssign<&DVec> for DVec {
    fn add_assign(&mut self, rhs: &DVec) {
        assert_eq!(self.len(), rhs.len(), "vector length mismatch in +=");
        for (a, b) in self.buf.iter_mut().zip(rhs.buf.iter()) {
            *a += b;
        }
    }
}

impl Add<&DVec> for DVec {
    type Output = DVec;
    fn add(mut self, rhs: &DVec) -> DVec {
        self += rhs;
        self
    }
}

/// Scalar multiply
impl MulAssign<f64> for DVec {
    fn mul_assign(&mut self, c: f64) {
        for a in self.buf.iter_mut() {
            *a *= c;
        }
    }
}

impl Mul<f64> for DVec {
    type Output = DVec;
    fn mul(mut self, c: f64) -> DVec {
        self *= c;
        self
    }
}

impl Mul<DVec> for f64 {
    type Output = DVec;
    fn mul(self, rhs: DVec) -> DVec {
        rhs * self
    }
}

/// Element-wise (Hadamard) multiply, used for force * massInv
impl MulAssign<&DVec> for DVec {
    fn mul_assign(&mut self, rhs: &DVec) {
        assert_eq!(self.len(), rhs.len(), "vector length mismatch in *=");
        for (a, b) in self.buf.iter_mut().zip(rhs.buf.iter()) {
            *a *= b;
        }
    }
}

impl Mul<&DVec> for DVec {
    type Output = DVec;
    fn mul(mut self, rhs: &DVec) -> DVec {
        self *= rhs;
        self
    }
}

/// Fixed-size row-major dense matrix of f64
#[derive(Debug, Clone, PartialEq)]
pub struct DMat {
    r: usize,
    c: usize,
    buf: Vec<f64>,
}

impl DMat {
    /// A zeroed `rows` x `cols` matrix
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            r: rows,
            c: cols,
            buf: vec![0.0; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.r
    }

    pub fn cols(&self) -> usize {
        self.c
    }

    /// Reset every element to 0.0 in place
    pub fn zero(&mut self) {
        for v in self.buf.iter_mut() {
            *v = 0.0;
        }
    }

    /// Transposed copy; row/column counts swap.
    /// Rebuilds the full buffer rather than returning a view.
    pub fn transposed(&self) -> DMat {
        let mut out = DMat::new(self.c, self.r);
        for i in 0..self.r {
            for j in 0..self.c {
                out[(j, i)] = self[(i, j)];
            }
        }
        out
    }
}

impl Index<(usize, usize)> for DMat {
    type Output = f64;
    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.buf[col + self.c * row]
    }
}

impl IndexMut<(usize, usize)> for DMat {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.buf[col + self.c * row]
    }
}

/// Matrix-vector product
impl Mul<&DVec> for &DMat {
    type Output = DVec;
    fn mul(self, vec: &DVec) -> DVec {
        assert_eq!(self.c, vec.len(), "matrix-vector dimension mismatch");

        let mut res = DVec::new(self.r);
        for i in 0..self.r {
            let mut sum = 0.0;
            for j in 0..self.c {
                sum += self[(i, j)] * vec[j];
            }
            res[i] = sum;
        }
        res
    }
}

/// Matrix-matrix product; walks a transposed copy of `rhs` so the
/// inner loop reads both operands row-contiguously
impl Mul<&DMat> for &DMat {
    type Output = DMat;
    fn mul(self, rhs: &DMat) -> DMat {
        assert_eq!(self.c, rhs.r, "matrix-matrix dimension mismatch");

        let rhs_t = rhs.transposed();
        let inner = self.c;

        let mut out = DMat::new(self.r, rhs.c);
        for i in 0..out.r {
            for j in 0..out.c {
                let mut sum = 0.0;
                for k in 0..inner {
                    sum += self[(i, k)] * rhs_t[(j, k)];
                }
                out[(i, j)] = sum;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transpose_swaps_dims_and_entries() {
        let mut m = DMat::new(2, 3);
        m[(0, 0)] = 1.0;
        m[(0, 2)] = 5.0;
        m[(1, 1)] = -2.0;

        let t = m.transposed();
        assert_eq!(t.rows(), 3);
        assert_eq!(t.cols(), 2);
        assert_eq!(t[(0, 0)], 1.0);
        assert_eq!(t[(2, 0)], 5.0);
        assert_eq!(t[(1, 1)], -2.0);
    }

    #[test]
    fn elementwise_multiply() {
        let a = DVec::from_slice(&[1.0, 2.0, 3.0]);
        let b = DVec::from_slice(&[2.0, 0.5, -1.0]);
        let c = a * &b;
        assert_eq!(c.as_slice(), &[2.0, 1.0, -3.0]);
    }

    #[test]
    #[should_panic]
    fn mismatched_add_panics() {
        let a = DVec::new(3);
        let b = DVec::new(4);
        let _ = a + &b;
    }
}
