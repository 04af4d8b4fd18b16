use crate::error::{SettingsError, SettingsErrorExt};
use crate::key::SettingKey;
use crate::store::SettingsStore;
use fxhash::FxHashMap;
use ksync_storage::Storage;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

const SETTINGS_FILE: &str = "settings.json";

/// Configuration store persisted as one JSON object in a sandboxed directory.
///
/// Every write rewrites the file atomically before returning. Reads never touch disk.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    storage: Storage,
    values: Arc<RwLock<FxHashMap<SettingKey, Value>>>,
    write_lock: Arc<Mutex<()>>,
}

impl FileSettingsStore {
    /// Opens (creating if needed) the store under `data_dir` and loads current values.
    ///
    /// Unknown keys in the file are skipped with a warning.
    ///
    /// # Errors
    /// Returns [`SettingsError::Storage`] if the directory cannot be opened and
    /// [`SettingsError::Serialization`] if the file is not a JSON object.
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let data_dir = data_dir.as_ref();
        let storage = Storage::builder()
            .root(data_dir)
            .create(true)
            .connect()
            .await
            .context("Failed to open settings directory")?;

        let values = match storage.read_optional(SETTINGS_FILE).await? {
            Some(bytes) => decode(&bytes)?,
            None => FxHashMap::default(),
        };

        info!(path = %data_dir.display(), entries = values.len(), "Settings store opened");

        Ok(Self {
            storage,
            values: Arc::new(RwLock::new(values)),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Writes `next` to disk, then makes it the visible state.
    ///
    /// On failure the in-memory values are left as they were.
    async fn commit(&self, next: FxHashMap<SettingKey, Value>) -> Result<(), SettingsError> {
        let snapshot = encode(&next)?;
        self.storage.write(SETTINGS_FILE, &snapshot).await.context("Failed to persist settings")?;
        *self.values.write() = next;
        Ok(())
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, key: &SettingKey) -> Option<Value> {
        self.values.read().get(key).cloned()
    }

    async fn set(&self, key: SettingKey, value: Value) -> Result<(), SettingsError> {
        let _guard = self.write_lock.lock().await;
        debug!(key = %key, "Persisting setting");
        let mut next = self.values.read().clone();
        next.insert(key, value);
        self.commit(next).await
    }

    async fn remove(&self, key: &SettingKey) -> Result<(), SettingsError> {
        let _guard = self.write_lock.lock().await;
        let mut next = self.values.read().clone();
        if next.remove(key).is_none() {
            return Ok(());
        }
        debug!(key = %key, "Removing setting");
        self.commit(next).await
    }
}

fn decode(bytes: &[u8]) -> Result<FxHashMap<SettingKey, Value>, SettingsError> {
    let raw: Map<String, Value> =
        serde_json::from_slice(bytes).context("Settings file is not a JSON object")?;

    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| match key.parse::<SettingKey>() {
            Ok(key) => Some((key, value)),
            Err(e) => {
                warn!(key = %key, error = %e, "Skipping unknown setting");
                None
            },
        })
        .collect())
}

fn encode(values: &FxHashMap<SettingKey, Value>) -> Result<Vec<u8>, SettingsError> {
    let ordered: Map<String, Value> =
        values.iter().map(|(key, value)| (key.to_string(), value.clone())).collect();
    serde_json::to_vec_pretty(&ordered).context("Failed to encode settings")
}
