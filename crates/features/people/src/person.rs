use crate::entity::SyncEntity;
use crate::site::SiteIdProvider;
use ksync_domain::config::MissingValuePolicy;
use ksync_domain::constants::{
    EMAIL, FIRST_NAME, MAIL_FIELD, META_ENTITY_BUNDLE, META_ENTITY_ID, META_ENTITY_TYPE,
    META_SITE_ID, PERSON_ID, USER,
};
use ksync_domain::{AttributeMapping, EntityKey, PersonConfiguration, Scalar};
use ksync_settings::{SettingsStore, SettingsStoreExt};
use std::sync::Arc;
use tracing::trace;

/// Turns an entity into the flat attribute configuration sent to "save person".
#[derive(Debug)]
pub struct PersonConfigurationBuilder<S> {
    settings: Arc<S>,
    site: Arc<SiteIdProvider<S>>,
    missing_values: MissingValuePolicy,
}

impl<S> Clone for PersonConfigurationBuilder<S> {
    fn clone(&self) -> Self {
        Self {
            settings: Arc::clone(&self.settings),
            site: Arc::clone(&self.site),
            missing_values: self.missing_values,
        }
    }
}

impl<S: SettingsStore> PersonConfigurationBuilder<S> {
    pub const fn new(
        settings: Arc<S>,
        site: Arc<SiteIdProvider<S>>,
        missing_values: MissingValuePolicy,
    ) -> Self {
        Self { settings, site, missing_values }
    }

    /// Builds the configuration for `entity`.
    ///
    /// Mapped fields with a truthy value become attributes; the rest follow the
    /// [`MissingValuePolicy`]. CMS metadata is added only when the mapping produced
    /// something. User accounts default `$email` and `$first_name` from the account.
    pub async fn prepare<E: SyncEntity + Sync>(&self, entity: &E) -> PersonConfiguration {
        let mut config = PersonConfiguration::new();

        if let Some(mapping) = self.mapping_for(&entity.entity_key()) {
            self.apply_mapping(&mapping, entity, &mut config);
        }

        if !config.is_empty() {
            let site_id = self.site.site_id().await;
            config.set(META_SITE_ID, site_id);
            config.set(META_ENTITY_TYPE, entity.entity_type());
            config.set(META_ENTITY_BUNDLE, entity.bundle().unwrap_or(entity.entity_type()));
            config.set(META_ENTITY_ID, entity.identifier());
        }

        if let Some(id) = entity.remote_person_id().filter(|id| !id.is_empty()) {
            config.set(PERSON_ID, id);
        }

        if entity.entity_type() == USER {
            if let Some(mail) = entity.value(MAIL_FIELD) {
                config.set_if_blank(EMAIL, mail);
            }
            let label = entity.label();
            if !label.is_empty() {
                config.set_if_blank(FIRST_NAME, label);
            }
        }

        config
    }

    /// Bundle-scoped mapping, falling back to the type-level one.
    fn mapping_for(&self, key: &EntityKey) -> Option<AttributeMapping> {
        key.bundle()
            .and_then(|_| self.settings.attribute_mapping(key))
            .or_else(|| self.settings.attribute_mapping(&key.type_level()))
    }

    fn apply_mapping<E: SyncEntity>(
        &self,
        mapping: &AttributeMapping,
        entity: &E,
        config: &mut PersonConfiguration,
    ) {
        for (field, attribute) in mapping.iter().filter(|(_, attr)| !attr.is_empty()) {
            let value = entity
                .has_field(field)
                .then(|| entity.value(field))
                .flatten()
                .filter(Scalar::is_truthy);

            match (value, self.missing_values) {
                (Some(value), _) => config.set(attribute, value),
                (None, MissingValuePolicy::Unset) => config.push_unset(attribute),
                (None, MissingValuePolicy::Skip) => {
                    trace!(field, attribute, "Skipping empty mapped field");
                },
            }
        }
    }
}
