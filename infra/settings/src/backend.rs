use crate::error::SettingsError;
use crate::file::FileSettingsStore;
use crate::key::SettingKey;
use crate::memory::MemorySettingsStore;
use crate::store::SettingsStore;
use serde_json::Value;
use std::path::Path;

/// Store selected at runtime: on disk when a data directory is configured, in memory otherwise.
#[derive(Debug, Clone)]
pub enum SettingsBackend {
    Memory(MemorySettingsStore),
    File(FileSettingsStore),
}

impl SettingsBackend {
    /// Opens a file store under `data_dir`, or an empty memory store without one.
    ///
    /// # Errors
    /// Propagates [`FileSettingsStore::open`] failures.
    pub async fn open(data_dir: Option<&Path>) -> Result<Self, SettingsError> {
        match data_dir {
            Some(dir) => Ok(Self::File(FileSettingsStore::open(dir).await?)),
            None => Ok(Self::Memory(MemorySettingsStore::new())),
        }
    }
}

impl From<MemorySettingsStore> for SettingsBackend {
    fn from(store: MemorySettingsStore) -> Self {
        Self::Memory(store)
    }
}

impl From<FileSettingsStore> for SettingsBackend {
    fn from(store: FileSettingsStore) -> Self {
        Self::File(store)
    }
}

impl SettingsStore for SettingsBackend {
    fn get(&self, key: &SettingKey) -> Option<Value> {
        match self {
            Self::Memory(store) => store.get(key),
            Self::File(store) => store.get(key),
        }
    }

    async fn set(&self, key: SettingKey, value: Value) -> Result<(), SettingsError> {
        match self {
            Self::Memory(store) => store.set(key, value).await,
            Self::File(store) => store.set(key, value).await,
        }
    }

    async fn remove(&self, key: &SettingKey) -> Result<(), SettingsError> {
        match self {
            Self::Memory(store) => store.remove(key).await,
            Self::File(store) => store.remove(key).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SettingsStoreExt;
    use serde_json::json;

    #[tokio::test]
    async fn memory_backend_without_data_dir() {
        let backend = SettingsBackend::open(None).await.unwrap();
        assert!(matches!(backend, SettingsBackend::Memory(_)));

        backend.set(SettingKey::SiteName, json!("Acme")).await.unwrap();
        assert_eq!(backend.site_name().as_deref(), Some("Acme"));
    }

    #[tokio::test]
    async fn file_backend_with_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let backend = SettingsBackend::open(Some(dir.path())).await.unwrap();
        assert!(matches!(backend, SettingsBackend::File(_)));

        backend.set(SettingKey::ApiKey, json!("pk_live")).await.unwrap();
        assert!(dir.path().join("settings.json").exists());
    }
}
