use crate::error::{SettingsError, SettingsErrorExt};
use crate::key::SettingKey;
use ksync_domain::{AttributeMapping, EntityKey, EntitySettings};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use tracing::warn;

/// A key-value configuration store.
///
/// Concurrent writers follow last-write-wins.
pub trait SettingsStore: Send + Sync {
    /// Current value of `key`, if any.
    fn get(&self, key: &SettingKey) -> Option<Value>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(
        &self,
        key: SettingKey,
        value: Value,
    ) -> impl Future<Output = Result<(), SettingsError>> + Send;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &SettingKey) -> impl Future<Output = Result<(), SettingsError>> + Send;
}

/// Typed accessors over any [`SettingsStore`].
///
/// Values that do not deserialize into the expected shape read as absent.
pub trait SettingsStoreExt: SettingsStore {
    fn get_as<T: DeserializeOwned>(&self, key: &SettingKey) -> Option<T> {
        let value = self.get(key)?;
        match serde_json::from_value(value) {
            Ok(typed) => Some(typed),
            Err(e) => {
                warn!(key = %key, error = %e, "Ignoring malformed setting");
                None
            },
        }
    }

    fn set_as<T: Serialize + Sync>(
        &self,
        key: SettingKey,
        value: &T,
    ) -> impl Future<Output = Result<(), SettingsError>> + Send {
        let encoded = serde_json::to_value(value);
        async move { self.set(key, encoded.context("Failed to encode setting")?).await }
    }

    /// Non-empty text value.
    fn get_text(&self, key: &SettingKey) -> Option<String> {
        self.get_as::<String>(key).filter(|s| !s.is_empty())
    }

    fn api_key(&self) -> Option<String> {
        self.get_text(&SettingKey::ApiKey)
    }

    fn site_name(&self) -> Option<String> {
        self.get_text(&SettingKey::SiteName)
    }

    fn site_id(&self) -> Option<String> {
        self.get_text(&SettingKey::SiteId)
    }

    /// Settings stored under exactly `key`, without fallback.
    fn entity_settings(&self, key: &EntityKey) -> Option<EntitySettings> {
        self.get_as(&SettingKey::EntitySettings(key.clone()))
    }

    /// Mapping stored under exactly `key`, without fallback.
    fn attribute_mapping(&self, key: &EntityKey) -> Option<AttributeMapping> {
        self.get_as(&SettingKey::PersonAttributes(key.clone()))
    }
}

impl<S: SettingsStore + ?Sized> SettingsStoreExt for S {}
