use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::instrument;

use crate::error::{Error, Result};

use super::Store;

/// A directory-backed `Store`: `root/Disk<i>/chunk<i><stripe>`, matching the
/// reference implementation's on-disk naming so operators migrating from the
/// original tool recognize the layout.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
    chunk_size: usize,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>, chunk_size: usize) -> Self {
        FsStore {
            root: root.into(),
            chunk_size,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn disk_dir(&self, disk: usize) -> PathBuf {
        self.root.join(format!("Disk{disk}"))
    }

    fn chunk_path(&self, disk: usize, stripe: usize) -> PathBuf {
        self.disk_dir(disk).join(format!("chunk{disk}{stripe}"))
    }
}

impl Store for FsStore {
    #[instrument(skip(self, bytes), fields(disk, stripe, len = bytes.len()))]
    fn write(&self, disk: usize, stripe: usize, bytes: &[u8]) -> Result<()> {
        let dir = self.disk_dir(disk);
        fs::create_dir_all(&dir)?;
        fs::write(self.chunk_path(disk, stripe), bytes)?;
        Ok(())
    }

    #[instrument(skip(self), fields(disk, stripe))]
    fn read(&self, disk: usize, stripe: usize) -> Result<Vec<u8>> {
        let path = self.chunk_path(disk, stripe);
        let bytes = fs::read(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Missing { disk, stripe }
            } else {
                Error::Io(e)
            }
        })?;
        if bytes.len() != self.chunk_size {
            return Err(Error::ShortRead {
                disk,
                stripe,
                expected: self.chunk_size,
                actual: bytes.len(),
            });
        }
        Ok(bytes)
    }

    fn list_present_disks(&self) -> Result<BTreeSet<usize>> {
        let mut present = BTreeSet::new();
        if !self.root.exists() {
            return Ok(present);
        }
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if let Some(rest) = name.strip_prefix("Disk") {
                if let Ok(i) = rest.parse::<usize>() {
                    let has_chunks = fs::read_dir(entry.path())?.next().is_some();
                    if has_chunks {
                        present.insert(i);
                    }
                }
            }
        }
        Ok(present)
    }

    #[instrument(skip(self), fields(disk))]
    fn erase(&self, disk: usize) -> Result<()> {
        let dir = self.disk_dir(disk);
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
        }
        Ok(())
    }
}
