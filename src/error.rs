//! Error types for the erasure-coding core and its store/CLI collaborators.

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur anywhere in the erasure-coding core or its store/CLI shell.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    // =========================================================================
    // Field / LinAlg errors
    // =========================================================================
    /// Field division by zero.
    #[error("division by zero in the field")]
    DivideByZero,

    /// Vector/matrix dimensions did not agree.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Gauss-Jordan elimination hit a column with no usable pivot.
    #[error("matrix is singular: no pivot available for column {column}")]
    Singular { column: usize },

    // =========================================================================
    // Codec errors
    // =========================================================================
    /// More indices were erased than the code can tolerate.
    #[error("too many erasures: {erased} erased, code tolerates at most {max}")]
    TooManyErasures { erased: usize, max: usize },

    /// The single-symbol locator found a column outside the valid disk range.
    #[error("corruption in stripe {stripe} could not be located to a valid disk")]
    Unlocatable { stripe: usize },

    // =========================================================================
    // Store errors
    // =========================================================================
    /// A requested (disk, stripe) chunk does not exist.
    #[error("chunk missing: disk {disk}, stripe {stripe}")]
    Missing { disk: usize, stripe: usize },

    /// A chunk existed but was not exactly `chunk_size` bytes.
    #[error("short read: disk {disk}, stripe {stripe}, expected {expected} bytes, got {actual}")]
    ShortRead {
        disk: usize,
        stripe: usize,
        expected: usize,
        actual: usize,
    },

    // =========================================================================
    // Configuration errors
    // =========================================================================
    /// Codec parameters are out of range for the requested field width.
    #[error("parameter out of range: {0}")]
    ParamOutOfRange(String),

    // =========================================================================
    // Ambient errors
    // =========================================================================
    /// I/O error from the filesystem store or sidecar metadata file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Sidecar metadata (de)serialization error.
    #[error("metadata error: {0}")]
    Json(#[from] serde_json::Error),
}
