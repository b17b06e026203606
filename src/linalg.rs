//! Matrices over a [`Field`], and the Gauss-Jordan inversion the codec's
//! reconstruction path depends on.

use crate::error::{Error, Result};
use crate::field::Field;

/// A dense row-major matrix of field elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<u8>,
}

impl Matrix {
    /// Build a matrix from row-major data. Panics if `data.len() != rows*cols`;
    /// this is an internal invariant, never an operator-facing condition.
    pub fn from_rows(rows: usize, cols: usize, data: Vec<u8>) -> Self {
        assert_eq!(data.len(), rows * cols, "row-major data length mismatch");
        Matrix { rows, cols, data }
    }

    /// A `rows x cols` matrix of zeroes.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix {
            rows,
            cols,
            data: vec![0u8; rows * cols],
        }
    }

    /// The `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Matrix::zeros(n, n);
        for i in 0..n {
            m.set(i, i, 1);
        }
        m
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, r: usize, c: usize) -> u8 {
        self.data[r * self.cols + c]
    }

    #[inline]
    pub fn set(&mut self, r: usize, c: usize, v: u8) {
        self.data[r * self.cols + c] = v;
    }

    pub fn row(&self, r: usize) -> &[u8] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// Row-by-row transpose.
    pub fn transpose(&self) -> Matrix {
        let mut out = Matrix::zeros(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                out.set(c, r, self.get(r, c));
            }
        }
        out
    }

    /// Build a matrix by stacking `keep` rows of `self` in order, dropping every
    /// row index present in `drop`.
    pub fn without_rows(&self, drop: &[usize]) -> Matrix {
        let mut out_data = Vec::with_capacity((self.rows - drop.len()) * self.cols);
        let mut kept = 0;
        for r in 0..self.rows {
            if !drop.contains(&r) {
                out_data.extend_from_slice(self.row(r));
                kept += 1;
            }
        }
        Matrix::from_rows(kept, self.cols, out_data)
    }

    /// Vertically concatenate `self` on top of `other`, which must share `cols`.
    pub fn vstack(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.cols {
            return Err(Error::DimensionMismatch {
                expected: self.cols,
                actual: other.cols,
            });
        }
        let mut data = self.data.clone();
        data.extend_from_slice(&other.data);
        Ok(Matrix::from_rows(self.rows + other.rows, self.cols, data))
    }
}

/// Standard row*column multiplication using `field.dot`.
pub fn matmul(field: &Field, a: &Matrix, b: &Matrix) -> Result<Matrix> {
    if a.cols() != b.rows() {
        return Err(Error::DimensionMismatch {
            expected: a.cols(),
            actual: b.rows(),
        });
    }
    let bt = b.transpose();
    let mut out = Matrix::zeros(a.rows(), b.cols());
    for i in 0..a.rows() {
        for j in 0..b.cols() {
            let v = field.dot(a.row(i), bt.row(j))?;
            out.set(i, j, v);
        }
    }
    Ok(out)
}

/// The left inverse of `a`.
///
/// Square matrices are inverted directly via Gauss-Jordan elimination on the
/// field. A tall matrix (more rows than columns) is inverted via the normal
/// equations `(aT a)^-1 aT`; this crate's reconstruction path always presents
/// a square matrix, so the tall branch exists for the over-determined case the
/// base spec calls out but does not exercise in the core encode/repair loop.
pub fn inverse(field: &Field, a: &Matrix) -> Result<Matrix> {
    if a.rows() == a.cols() {
        gauss_jordan_inverse(field, a)
    } else if a.rows() > a.cols() {
        let at = a.transpose();
        let ata = matmul(field, &at, a)?;
        let ata_inv = gauss_jordan_inverse(field, &ata)?;
        matmul(field, &ata_inv, &at)
    } else {
        Err(Error::DimensionMismatch {
            expected: a.cols(),
            actual: a.rows(),
        })
    }
}

fn gauss_jordan_inverse(field: &Field, a: &Matrix) -> Result<Matrix> {
    let n = a.rows();
    debug_assert_eq!(a.cols(), n);

    // Augmented (a | I), 2n columns wide.
    let mut aug = Matrix::zeros(n, 2 * n);
    for r in 0..n {
        for c in 0..n {
            aug.set(r, c, a.get(r, c));
        }
        aug.set(r, n + r, 1);
    }

    for i in 0..n {
        if aug.get(i, i) == 0 {
            let pivot_row = (i + 1..n).find(|&k| aug.get(k, i) != 0);
            match pivot_row {
                Some(k) => {
                    for c in 0..2 * n {
                        let v = field.add(aug.get(i, c), aug.get(k, c));
                        aug.set(i, c, v);
                    }
                }
                None => return Err(Error::Singular { column: i }),
            }
        }

        let pivot = aug.get(i, i);
        for c in 0..2 * n {
            let v = field.div(aug.get(i, c), pivot)?;
            aug.set(i, c, v);
        }

        for j in (i + 1)..n {
            let factor = aug.get(j, i);
            if factor == 0 {
                continue;
            }
            for c in 0..2 * n {
                let v = field.add(aug.get(j, c), field.mul(factor, aug.get(i, c)));
                aug.set(j, c, v);
            }
        }
    }

    for i in (0..n).rev() {
        for j in 0..i {
            let factor = aug.get(j, i);
            if factor == 0 {
                continue;
            }
            for c in 0..2 * n {
                let v = field.add(aug.get(j, c), field.mul(factor, aug.get(i, c)));
                aug.set(j, c, v);
            }
        }
    }

    let mut inv = Matrix::zeros(n, n);
    for r in 0..n {
        for c in 0..n {
            inv.set(r, c, aug.get(r, n + c));
        }
    }
    Ok(inv)
}
