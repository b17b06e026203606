//! raid6ec - a RAID-6-style erasure-coded block store.
//!
//! GF(2^w) finite-field arithmetic and a Vandermonde Reed-Solomon generator
//! turn `n` data disks into `n+m` disks tolerant of up to `m` simultaneous
//! erasures, with a single-symbol locator that can pin a silent corruption to
//! the one disk that caused it.
//!
//! # Architecture
//!
//! ```text
//! bytes -> Striper::pad -> Codec::encode -> Store::write   (encode)
//! Store::read -> Codec::reconstruct -> Striper::unpad -> bytes   (read/repair)
//! Store::read x2 -> Locator::locate_stripe -> (disk, stripe)   (scrub)
//! ```
//!
//! # Modules
//!
//! - [`field`] - GF(2^w) log/antilog tables and primitive operations
//! - [`linalg`] - matrices over a [`field::Field`], Gauss-Jordan inversion
//! - [`codec`] - Vandermonde Reed-Solomon encode/reconstruct
//! - [`striper`] - byte stream <-> stripe matrix padding and reshaping
//! - [`locator`] - single-symbol P/Q corruption locator
//! - [`store`] - the `Store` trait and its directory-backed implementation
//! - [`config`] - immutable codec parameters and the `meta.json` sidecar
//! - [`error`] - the crate's error taxonomy

pub mod codec;
pub mod config;
pub mod error;
pub mod field;
pub mod linalg;
pub mod locator;
pub mod striper;
pub mod store;

pub use codec::Codec;
pub use config::{CodecParams, Meta};
pub use error::{Error, Result};
pub use field::Field;
pub use locator::{Locator, StripeHealth};
pub use store::{FsStore, Store};
pub use striper::Stripes;
