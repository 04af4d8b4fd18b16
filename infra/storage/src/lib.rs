//! Sandboxed file storage used to persist the bridge's configuration store.
//!
//! All paths are resolved relative to a canonical root and rejected if they try to
//! escape it. Writes go through a unique temporary file, `fsync` and `rename`, so a
//! crash never leaves a half-written settings file behind. Stale temporaries from
//! earlier crashes are purged when the storage connects.
//!
//! ```rust
//! use ksync_storage::{Storage, StorageError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), StorageError> {
//!     # let tmp = tempfile::tempdir().unwrap();
//!     # let root = tmp.path().join("data");
//!     let storage = Storage::builder().root(&root).create(true).connect().await?;
//!
//!     storage.write("settings.json", b"{}").await?;
//!     assert_eq!(storage.read("settings.json").await?, b"{}");
//!     assert!(storage.read_optional("missing.json").await?.is_none());
//!     Ok(())
//! }
//! ```

mod builder;
mod engine;
mod error;
mod maintenance;
mod security;

pub use builder::StorageBuilder;
pub use engine::Storage;
pub use error::{StorageError, StorageErrorExt};
