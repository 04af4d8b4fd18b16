use crate::error::SettingsError;
use crate::key::SettingKey;
use crate::store::SettingsStore;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;
use tracing::trace;

/// Process-local configuration store.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    values: Arc<RwLock<FxHashMap<SettingKey, Value>>>,
}

impl MemorySettingsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a value synchronously; for wiring and tests.
    #[must_use]
    pub fn with(self, key: SettingKey, value: Value) -> Self {
        self.values.write().insert(key, value);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.read().len()
    }
}

impl FromIterator<(SettingKey, Value)> for MemorySettingsStore {
    fn from_iter<T: IntoIterator<Item = (SettingKey, Value)>>(iter: T) -> Self {
        Self { values: Arc::new(RwLock::new(iter.into_iter().collect())) }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &SettingKey) -> Option<Value> {
        self.values.read().get(key).cloned()
    }

    async fn set(&self, key: SettingKey, value: Value) -> Result<(), SettingsError> {
        trace!(key = %key, "Setting stored");
        self.values.write().insert(key, value);
        Ok(())
    }

    async fn remove(&self, key: &SettingKey) -> Result<(), SettingsError> {
        self.values.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SettingsStoreExt;
    use ksync_domain::{EntityKey, EntitySettings};
    use serde_json::json;

    #[tokio::test]
    async fn values_round_trip_through_typed_accessors() {
        let store = MemorySettingsStore::new();
        let key = EntityKey::with_bundle("user", "staff");

        store
            .set_as(
                SettingKey::EntitySettings(key.clone()),
                &EntitySettings { enabled: true, list: "list:42".to_owned() },
            )
            .await
            .unwrap();

        let settings = store.entity_settings(&key).unwrap();
        assert!(settings.enabled);
        assert_eq!(settings.list, "list:42");
        assert!(store.entity_settings(&key.type_level()).is_none());
    }

    #[tokio::test]
    async fn malformed_and_blank_values_read_as_absent() {
        let store = MemorySettingsStore::new()
            .with(SettingKey::SiteId, json!(""))
            .with(SettingKey::EntitySettings(EntityKey::new("user")), json!("oops"));

        assert!(store.site_id().is_none());
        assert!(store.entity_settings(&EntityKey::new("user")).is_none());

        store.remove(&SettingKey::SiteId).await.unwrap();
        store.remove(&SettingKey::SiteId).await.unwrap();
        assert_eq!(store.len(), 1);
    }
}
