//! Immutable codec parameters and the `meta.json` sidecar that lets `read`,
//! `scrub` and `repair` invocations recover them without an operator having to
//! remember the original data length.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::field::{DEFAULT_MODULUS, FIELD_WIDTH};

/// Default data-disk count, matching the reference implementation.
pub const DEFAULT_N: usize = 6;
/// Default parity-disk count, matching the reference implementation.
pub const DEFAULT_M: usize = 2;
/// Default chunk size in bytes, matching the reference implementation.
pub const DEFAULT_CHUNK_SIZE: usize = 16;

/// The parameters that define one codec configuration: how many data and
/// parity disks, what field, and what chunk size. Built once and never
/// mutated; a fresh `Codec`/`Field` is constructed from these for every CLI
/// invocation rather than threading global mutable state through the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecParams {
    pub n: usize,
    pub m: usize,
    pub w: u32,
    pub modulus: u32,
    pub chunk_size: usize,
}

impl CodecParams {
    /// Validate and construct. Fails if the code would need more distinct
    /// nonzero field elements than the field provides, or if `chunk_size` is
    /// degenerate.
    pub fn new(n: usize, m: usize, w: u32, modulus: u32, chunk_size: usize) -> Result<Self> {
        let q = 1u64 << w;
        if (n + m) as u64 > q - 1 {
            return Err(Error::ParamOutOfRange(format!(
                "n+m ({}) exceeds q-1 ({}) for field width {}",
                n + m,
                q - 1,
                w
            )));
        }
        if chunk_size < 1 {
            return Err(Error::ParamOutOfRange("chunk_size must be at least 1".into()));
        }
        Ok(CodecParams {
            n,
            m,
            w,
            modulus,
            chunk_size,
        })
    }
}

impl Default for CodecParams {
    fn default() -> Self {
        CodecParams::new(DEFAULT_N, DEFAULT_M, FIELD_WIDTH, DEFAULT_MODULUS, DEFAULT_CHUNK_SIZE)
            .expect("default codec parameters are always in range")
    }
}

/// Sidecar metadata persisted at the root of a `Store`, recording everything
/// needed to read an encoded tree back without re-deriving it from context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    pub params: CodecParams,
    /// Original, unpadded data length in bytes.
    pub data_len: u64,
}

impl Meta {
    pub const FILE_NAME: &'static str = "meta.json";

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}
