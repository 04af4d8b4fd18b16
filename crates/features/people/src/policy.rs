use ksync_domain::constants::{MAPPABLE_FIELD_TYPES, USER};
use ksync_domain::{AttributeMapping, EntityKey, EntitySettings};
use ksync_settings::{SettingsStore, SettingsStoreExt};
use std::sync::Arc;

/// Predicates deciding which entities and fields take part in person sync.
///
/// Only reads stored configuration. Settings are looked up under exactly the
/// requested key: a bundle does not inherit the type-level settings.
#[derive(Debug)]
pub struct FieldMappingPolicy<S> {
    settings: Arc<S>,
}

impl<S> Clone for FieldMappingPolicy<S> {
    fn clone(&self) -> Self {
        Self { settings: Arc::clone(&self.settings) }
    }
}

impl<S: SettingsStore> FieldMappingPolicy<S> {
    pub const fn new(settings: Arc<S>) -> Self {
        Self { settings }
    }

    /// Only user accounts can be synchronized.
    #[must_use]
    pub fn is_compatible_entity(entity_type: &str) -> bool {
        entity_type == USER
    }

    /// Stored settings, or disabled with no list.
    #[must_use]
    pub fn entity_settings(&self, entity_type: &str, bundle: Option<&str>) -> EntitySettings {
        self.settings.entity_settings(&key(entity_type, bundle)).unwrap_or_default()
    }

    #[must_use]
    pub fn is_enabled_on_entity(&self, entity_type: &str, bundle: Option<&str>) -> bool {
        Self::is_compatible_entity(entity_type) && self.entity_settings(entity_type, bundle).enabled
    }

    /// Whether fields of `field_type` may be mapped on an enabled entity.
    #[must_use]
    pub fn is_field_mappable(&self, entity_type: &str, bundle: Option<&str>, field_type: &str) -> bool {
        self.is_enabled_on_entity(entity_type, bundle) && MAPPABLE_FIELD_TYPES.contains(&field_type)
    }

    /// Whether `field_name` currently maps to a non-empty attribute.
    ///
    /// Takes the field name rather than the field type: a type cannot identify a
    /// mapping entry.
    #[must_use]
    pub fn is_field_mapped(&self, entity_type: &str, bundle: Option<&str>, field_name: &str) -> bool {
        self.is_enabled_on_entity(entity_type, bundle)
            && self.mapping(entity_type, bundle).attribute_for(field_name).is_some()
    }

    /// Attribute keys `field_name` may be mapped to: `model_keys` minus those taken by
    /// other fields, plus the field's own current attribute.
    #[must_use]
    pub fn mappable_attribute_keys(
        &self,
        entity_type: &str,
        bundle: Option<&str>,
        field_name: &str,
        model_keys: &[String],
    ) -> Vec<String> {
        let mapping = self.mapping(entity_type, bundle);
        let current = mapping.attribute_for(field_name);

        let mut keys: Vec<String> = model_keys
            .iter()
            .filter(|key| !mapping.iter().any(|(_, attr)| attr == key.as_str()))
            .cloned()
            .collect();
        if let Some(current) = current
            && !keys.iter().any(|k| k == current)
        {
            keys.push(current.to_owned());
        }
        keys
    }

    fn mapping(&self, entity_type: &str, bundle: Option<&str>) -> AttributeMapping {
        self.settings.attribute_mapping(&key(entity_type, bundle)).unwrap_or_default()
    }
}

fn key(entity_type: &str, bundle: Option<&str>) -> EntityKey {
    bundle.map_or_else(|| EntityKey::new(entity_type), |b| EntityKey::with_bundle(entity_type, b))
}
