//! Sandboxed file I/O with atomic replacement.

use crate::builder::StorageBuilder;
use crate::error::{StorageError, StorageErrorExt};
use crate::maintenance;
use crate::security;
use std::io::ErrorKind;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

pub(crate) const TMP_MARKER: &str = ".ksynctmp.";

/// The internal shared state of a [`Storage`] instance.
#[derive(Debug)]
pub struct StorageInner {
    /// Canonical physical root of the sandbox.
    pub(crate) root: PathBuf,
    pub(crate) tmp_grace: Duration,
    pub(crate) tmp_counter: AtomicU64,
}

/// A cloneable handle to a sandboxed directory.
///
/// Every path is validated against the root before it touches the disk, and writes
/// are atomic: readers observe either the previous content or the new one.
#[derive(Debug, Clone)]
pub struct Storage {
    pub(crate) inner: Arc<StorageInner>,
}

impl Deref for Storage {
    type Target = StorageInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Storage {
    #[must_use = "The storage is not opened until you call .connect()"]
    pub fn builder() -> StorageBuilder {
        StorageBuilder::new()
    }

    /// Returns the canonical root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a relative path to a physical path inside the sandbox.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::PathTraversalAttempt`] if the path is absolute or escapes the root.
    /// Returns [`StorageError::Io`] if an existing ancestor cannot be verified.
    pub fn resolve(&self, path: impl AsRef<Path>) -> Result<PathBuf, StorageError> {
        security::resolve_path(&self.root, path)
    }

    /// Reads a whole file.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::FileNotFound`] if the path does not exist.
    pub async fn read(&self, path: impl AsRef<Path>) -> Result<Vec<u8>, StorageError> {
        let resolved = self.resolve(path)?;

        match fs::read(&resolved).await {
            Ok(data) => Ok(data),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(StorageError::FileNotFound {
                message: resolved.display().to_string().into(),
                context: None,
            }),
            Err(err) => Err(StorageError::Io {
                source: err,
                context: Some(format!("Read failed: {}", resolved.display()).into()),
            }),
        }
    }

    /// Reads a whole file, mapping a missing file to `None`.
    ///
    /// # Errors
    ///
    /// Fails on sandbox violations and I/O errors other than "not found".
    pub async fn read_optional(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<Option<Vec<u8>>, StorageError> {
        match self.read(path).await {
            Ok(data) => Ok(Some(data)),
            Err(StorageError::FileNotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Writes a file atomically.
    ///
    /// Data goes to a unique `<name>.ksynctmp.<n>` sibling, is synced, and is then
    /// renamed over the target. Parent directories are created on demand. Where the
    /// platform refuses to rename over an existing file, the target is removed first.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::PathTraversalAttempt`] if the path escapes the sandbox.
    /// Returns [`StorageError::Io`] on disk failures.
    pub async fn write(&self, path: impl AsRef<Path>, data: &[u8]) -> Result<(), StorageError> {
        let resolved = self.resolve(path)?;

        if let Some(parent) = resolved.parent() {
            fs::create_dir_all(parent)
                .await
                .context(format!("Failed to create parent of {}", resolved.display()))?;
        }

        let temp = unique_tmp_path(&resolved, &self.tmp_counter);

        {
            let mut file = fs::OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(&temp)
                .await
                .context(format!("Temp creation failed: {}", temp.display()))?;
            file.write_all(data).await.context("Write failed")?;
            file.sync_all().await.context("Hardware sync failed")?;
        }

        if let Err(err) = fs::rename(&temp, &resolved).await {
            if err.kind() != ErrorKind::AlreadyExists {
                if let Err(e) = fs::remove_file(&temp).await {
                    warn!(path = %temp.display(), error = %e, "Failed to drop temp file");
                }
                return Err(StorageError::Io {
                    source: err,
                    context: Some(
                        format!("Atomic swap failed: {} -> {}", temp.display(), resolved.display())
                            .into(),
                    ),
                });
            }
            fs::remove_file(&resolved)
                .await
                .context(format!("Failed to replace existing file: {}", resolved.display()))?;
            fs::rename(&temp, &resolved).await.context(format!(
                "Atomic swap failed: {} -> {}",
                temp.display(),
                resolved.display()
            ))?;
        }

        if let Some(parent) = resolved.parent() {
            Self::sync_dir(parent).await;
        }

        debug!(path = %resolved.display(), bytes = data.len(), "File saved atomically");
        Ok(())
    }

    /// Deletes a file.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::FileNotFound`] if there is nothing to delete.
    pub async fn delete(&self, path: impl AsRef<Path>) -> Result<(), StorageError> {
        let resolved = self.resolve(path)?;
        match fs::remove_file(&resolved).await {
            Ok(()) => {
                debug!(path = %resolved.display(), "File deleted");
                Ok(())
            },
            Err(err) if err.kind() == ErrorKind::NotFound => Err(StorageError::FileNotFound {
                message: resolved.display().to_string().into(),
                context: None,
            }),
            Err(err) => Err(StorageError::Io {
                source: err,
                context: Some(format!("Failed to delete: {}", resolved.display()).into()),
            }),
        }
    }

    /// Checks whether a file exists inside the sandbox.
    ///
    /// # Errors
    ///
    /// Fails only when the path itself is rejected by the sandbox.
    pub fn exists(&self, path: impl AsRef<Path>) -> Result<bool, StorageError> {
        Ok(self.resolve(path)?.exists())
    }

    /// Filesystem metadata for a file inside the sandbox.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::FileNotFound`] if the target does not exist.
    pub async fn metadata(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<std::fs::Metadata, StorageError> {
        let resolved = self.resolve(path)?;
        match fs::metadata(&resolved).await {
            Ok(meta) => Ok(meta),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(StorageError::FileNotFound {
                message: resolved.display().to_string().into(),
                context: None,
            }),
            Err(err) => Err(StorageError::Io {
                source: err,
                context: Some(format!("Failed to get metadata: {}", resolved.display()).into()),
            }),
        }
    }

    /// Removes orphaned temporary files older than the configured grace period.
    pub async fn purge_tmp(&self) {
        maintenance::purge_tmp(&self.root, self.tmp_grace).await;
    }

    async fn sync_dir(path: &Path) {
        match fs::File::open(path).await {
            Ok(dir) => {
                if let Err(err) = dir.sync_all().await {
                    warn!(path = %path.display(), error = %err, "Directory sync failed");
                }
            },
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Directory open failed");
            },
        }
    }
}

fn unique_tmp_path(target: &Path, counter: &AtomicU64) -> PathBuf {
    let counter = counter.fetch_add(1, Ordering::Relaxed);
    let file_name = target.file_name().and_then(|s| s.to_str()).unwrap_or("storage");
    target.with_file_name(format!("{file_name}{TMP_MARKER}{counter}"))
}
