//! Blob storage for VDRIVE.
//!
//! Node records live in the database; their byte content lives here. Each
//! blob is keyed by the UUID of the entity that owns it and stored under a
//! per-user subdirectory:
//!
//! ```text
//! {base_path}/
//! ├── 1/
//! │   └── ab12cd34-5678-90ab-cdef-123456789012
//! ├── 2/
//! │   └── cd90ab12-3456-7890-abcd-ef1234567890
//! └── ...
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::{Result, VdriveError};

/// Blob store for file and page content.
#[derive(Debug, Clone)]
pub struct BlobStore {
    /// Base directory for blob storage.
    base_path: PathBuf,
}

impl BlobStore {
    /// Create a new BlobStore rooted at the given base path.
    ///
    /// Directories are created lazily on the first `put`, not here.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Get the base path of this store.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Write blob content, creating the subdirectory if needed.
    pub fn put(&self, subdir: &str, key: &str, content: &[u8]) -> Result<()> {
        let blob_path = self.blob_path(subdir, key);

        if let Some(parent) = blob_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&blob_path, content)?;
        Ok(())
    }

    /// Read blob content.
    pub fn get(&self, subdir: &str, key: &str) -> Result<Vec<u8>> {
        let blob_path = self.blob_path(subdir, key);

        match fs::read(&blob_path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(VdriveError::NotFound(format!("blob {key}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a blob.
    ///
    /// Returns `true` if the blob was deleted, `false` if it did not exist.
    pub fn delete(&self, subdir: &str, key: &str) -> Result<bool> {
        let blob_path = self.blob_path(subdir, key);

        match fs::remove_file(&blob_path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Check whether a blob exists.
    pub fn exists(&self, subdir: &str, key: &str) -> bool {
        self.blob_path(subdir, key).exists()
    }

    /// Get the size of a stored blob in bytes.
    pub fn size(&self, subdir: &str, key: &str) -> Result<u64> {
        let blob_path = self.blob_path(subdir, key);

        match fs::metadata(&blob_path) {
            Ok(m) => Ok(m.len()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(VdriveError::NotFound(format!("blob {key}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Full on-disk path for a blob.
    pub fn blob_path(&self, subdir: &str, key: &str) -> PathBuf {
        self.base_path.join(subdir).join(key)
    }
}
