//! The `Store` boundary: the only place this crate talks to a filesystem.

mod fs;

use std::collections::BTreeSet;

pub use fs::FsStore;

use crate::error::Result;

/// A disk array: `n+m` independently addressable disks, each holding some
/// subset of stripes. All operations are synchronous and blocking - the core
/// codec never calls back into a `Store` concurrently with itself.
pub trait Store {
    /// Write `bytes` (exactly `chunk_size` long) to `(disk, stripe)`, creating
    /// or overwriting as needed.
    fn write(&self, disk: usize, stripe: usize, bytes: &[u8]) -> Result<()>;

    /// Read the chunk at `(disk, stripe)`. Fails with `Error::Missing` if
    /// absent, `Error::ShortRead` if present but the wrong length.
    fn read(&self, disk: usize, stripe: usize) -> Result<Vec<u8>>;

    /// Which disks currently have at least one stripe present.
    fn list_present_disks(&self) -> Result<BTreeSet<usize>>;

    /// Remove every stripe of `disk`, simulating total disk loss.
    fn erase(&self, disk: usize) -> Result<()>;
}
