//! Reed-Solomon encode/reconstruct over a Vandermonde generator matrix.

use crate::config::CodecParams;
use crate::error::{Error, Result};
use crate::field::Field;
use crate::linalg::{self, Matrix};
use crate::striper::Stripes;

/// Owns the immutable Vandermonde generator `F` (`m x n`, `F[i][j] = (j+1)^i`)
/// derived from a [`CodecParams`] and [`Field`]. Cheap to build; this crate
/// rebuilds one per CLI invocation rather than persisting codec state.
#[derive(Debug, Clone)]
pub struct Codec {
    field: Field,
    params: CodecParams,
    /// Vandermonde generator, `m` rows by `n` columns.
    f: Matrix,
    /// `(I_n ; F)`, the full `(n+m) x n` system used by reconstruction.
    full: Matrix,
}

impl Codec {
    pub fn new(params: CodecParams) -> Self {
        let field = Field::new(params.w, params.modulus);
        let f = vandermonde(&field, params.m, params.n);
        let full = Matrix::identity(params.n)
            .vstack(&f)
            .expect("identity and generator share n columns");
        Codec {
            field,
            params,
            f,
            full,
        }
    }

    pub fn params(&self) -> &CodecParams {
        &self.params
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// The `m x n` generator matrix, exposed for the locator's P/Q recompute.
    pub fn generator(&self) -> &Matrix {
        &self.f
    }

    /// Extend an `n`-row data block with `m` parity rows, stripe-wise and
    /// byte-column-wise: for each (stripe, byte offset) compute
    /// `C[:,s,k] = F . D[:,s,k]`.
    pub fn encode(&self, data: &Stripes) -> Result<Stripes> {
        let n = self.params.n;
        let m = self.params.m;
        if data.rows() != n {
            return Err(Error::DimensionMismatch {
                expected: n,
                actual: data.rows(),
            });
        }
        let k = data.chunk_size();
        let s = data.stripe_count();
        let mut parity = Stripes::new(m, s, k);
        for stripe in 0..s {
            for byte in 0..k {
                let column: Vec<u8> = (0..n).map(|row| data.chunk(row, stripe)[byte]).collect();
                for pi in 0..m {
                    let v = self.field.dot(self.f.row(pi), &column)?;
                    let mut chunk = parity.chunk(pi, stripe).to_vec();
                    chunk[byte] = v;
                    parity.set_chunk(pi, stripe, &chunk);
                }
            }
        }
        Ok(data.vstack(&parity))
    }

    /// Reconstruct the rows named in `erased` from `n` surviving `(row index,
    /// chunk bytes)` pairs for a single stripe.
    ///
    /// `rows` must contain exactly `n` entries with distinct indices in
    /// `[0, n+m)`, and `erased` the remaining `(n+m) - n` indices (a subset of
    /// size at most `m`).
    pub fn reconstruct(&self, rows: &[(usize, Vec<u8>)], erased: &[usize]) -> Result<Vec<Vec<u8>>> {
        let n = self.params.n;
        let m = self.params.m;
        if erased.len() > m {
            return Err(Error::TooManyErasures {
                erased: erased.len(),
                max: m,
            });
        }
        if rows.len() != n {
            return Err(Error::DimensionMismatch {
                expected: n,
                actual: rows.len(),
            });
        }
        let k = rows.first().map(|(_, b)| b.len()).unwrap_or(self.params.chunk_size);

        let mut a_data = Vec::with_capacity(n * n);
        let mut e_data = Vec::with_capacity(n * k);
        for (idx, bytes) in rows {
            if bytes.len() != k {
                return Err(Error::DimensionMismatch {
                    expected: k,
                    actual: bytes.len(),
                });
            }
            a_data.extend_from_slice(self.full.row(*idx));
            e_data.extend_from_slice(bytes);
        }
        let a_prime = Matrix::from_rows(n, n, a_data);
        let e = Matrix::from_rows(n, k, e_data);

        let a_inv = linalg::inverse(&self.field, &a_prime)?;
        let d = linalg::matmul(&self.field, &a_inv, &e)?;
        let c = linalg::matmul(&self.field, &self.f, &d)?;
        let combined = d.vstack(&c)?;

        Ok(erased.iter().map(|&idx| combined.row(idx).to_vec()).collect())
    }
}

/// Vandermonde generator `F[i][j] = (j+1)^i` for `i in [0,m)`, `j in [0,n)`.
/// Row 0 is all ones (base^0); row 1 equals the bases `1..=n` directly, which
/// is the convention the single-symbol locator's P/Q classification assumes.
fn vandermonde(field: &Field, m: usize, n: usize) -> Matrix {
    let mut out = Matrix::zeros(m, n);
    for i in 0..m {
        for j in 0..n {
            let base = (j + 1) as u8;
            out.set(i, j, field.pow(base, i as u32));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CodecParams;

    fn codec() -> Codec {
        Codec::new(CodecParams::default())
    }

    #[test]
    fn vandermonde_rows_zero_and_one_match_locator_convention() {
        let c = codec();
        let f = c.generator();
        for j in 0..f.cols() {
            assert_eq!(f.get(0, j), 1, "row 0 must be all ones");
            assert_eq!(f.get(1, j), (j + 1) as u8, "row 1 must equal the base");
        }
    }

    #[test]
    fn encode_then_recompute_parity_matches() {
        let c = codec();
        let mut data = Stripes::new(6, 1, 4);
        for row in 0..6 {
            data.set_chunk(row, 0, &[row as u8, row as u8 + 1, row as u8 + 2, row as u8 + 3]);
        }
        let encoded = c.encode(&data).unwrap();
        assert_eq!(encoded.rows(), 8);
        for pi in 0..2 {
            for byte in 0..4 {
                let column: Vec<u8> = (0..6).map(|row| data.chunk(row, 0)[byte]).collect();
                let expected = c.field().dot(c.generator().row(pi), &column).unwrap();
                assert_eq!(encoded.chunk(6 + pi, 0)[byte], expected);
            }
        }
    }

    #[test]
    fn reconstruct_recovers_any_erasure_up_to_m() {
        let c = codec();
        let mut data = Stripes::new(6, 1, 4);
        for row in 0..6 {
            data.set_chunk(row, 0, &[row as u8 * 7, row as u8 * 3, row as u8 + 9, row as u8]);
        }
        let encoded = c.encode(&data).unwrap();

        for erase_a in 0..8usize {
            for erase_b in (erase_a + 1)..8usize {
                let erased = vec![erase_a, erase_b];
                let rows: Vec<(usize, Vec<u8>)> = (0..8)
                    .filter(|i| !erased.contains(i))
                    .map(|i| (i, encoded.chunk(i, 0).to_vec()))
                    .collect();
                let recovered = c.reconstruct(&rows, &erased).unwrap();
                for (pos, &idx) in erased.iter().enumerate() {
                    assert_eq!(recovered[pos], encoded.chunk(idx, 0), "erased={erased:?}");
                }
            }
        }
    }

    #[test]
    fn reconstruct_rejects_over_erasure() {
        let c = codec();
        let rows: Vec<(usize, Vec<u8>)> = (0..6).map(|i| (i, vec![0u8; 4])).collect();
        let err = c.reconstruct(&rows, &[0, 1, 2]).unwrap_err();
        assert!(matches!(err, Error::TooManyErasures { erased: 3, max: 2 }));
    }
}
