//! # Settings
//!
//! The bridge's configuration store: API key, site name and identifier, per-entity
//! settings and field mappings. Values are JSON documents addressed by a typed
//! [`SettingKey`], so per-entity entries can never collide through string joining.
//!
//! Reads are synchronous and served from memory. Writes are async because the file
//! backend persists every change before returning.
//!
//! ```rust
//! use ksync_settings::{MemorySettingsStore, SettingKey, SettingsStore, SettingsStoreExt};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), ksync_settings::SettingsError> {
//! let store = MemorySettingsStore::new();
//! store.set(SettingKey::SiteName, json!("Acme")).await?;
//! assert_eq!(store.site_name().as_deref(), Some("Acme"));
//! # Ok(())
//! # }
//! ```

mod backend;
mod error;
mod file;
mod key;
mod memory;
mod store;

pub use backend::SettingsBackend;
pub use error::{SettingsError, SettingsErrorExt};
pub use file::FileSettingsStore;
pub use key::SettingKey;
pub use memory::MemorySettingsStore;
pub use store::{SettingsStore, SettingsStoreExt};
