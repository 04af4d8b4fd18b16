use crate::client::KlaviyoClient;
use crate::entity::SyncEntity;
use crate::error::{FailureReason, SyncError};
use crate::lists::ListCache;
use crate::person::PersonConfigurationBuilder;
use crate::policy::FieldMappingPolicy;
use ksync_cache::CacheStore;
use ksync_domain::constants::UNSET;
use ksync_domain::{EntityKey, Person, PersonConfiguration, Scalar};
use ksync_klaviyo::MarketingApi;
use ksync_settings::SettingsStore;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Location of per-save overrides inside the save payload.
const OVERRIDES_POINTER: &str = "/data/klaviyo";

/// Result of [`EntitySaveHook::save_entity`].
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Sync is not enabled for the entity type, or there was nothing to send.
    Skipped,
    Synced(Person),
    /// The remote call failed. The entity save itself is unaffected.
    Failed { reason: FailureReason, notice: String },
}

/// Pushes saved entities to the remote API.
#[derive(Debug)]
pub struct EntitySaveHook<A, S, C> {
    client: KlaviyoClient<A>,
    builder: PersonConfigurationBuilder<S>,
    policy: FieldMappingPolicy<S>,
    lists: ListCache<A, C>,
}

impl<A, S, C> EntitySaveHook<A, S, C>
where
    A: MarketingApi,
    S: SettingsStore,
    C: CacheStore,
{
    pub const fn new(
        client: KlaviyoClient<A>,
        builder: PersonConfigurationBuilder<S>,
        policy: FieldMappingPolicy<S>,
        lists: ListCache<A, C>,
    ) -> Self {
        Self { client, builder, policy, lists }
    }

    /// Syncs one saved entity with at most one "save person" call.
    ///
    /// Overrides found at `data.klaviyo` in `payload` are merged underneath the built
    /// configuration: keys the configuration already has are kept. Failures are
    /// reported through [`SaveOutcome::Failed`] and never propagate.
    pub async fn save_entity<E: SyncEntity + Sync>(&self, entity: &E, payload: &Value) -> SaveOutcome {
        if !self.policy.is_enabled_on_entity(entity.entity_type(), None) {
            debug!(entity_type = entity.entity_type(), "Person sync disabled for entity type");
            return SaveOutcome::Skipped;
        }

        let mut config = self.builder.prepare(entity).await;
        if let Some(overrides) = overrides(payload) {
            config.union(overrides);
        }

        if config.is_empty() {
            return SaveOutcome::Skipped;
        }

        match self.client.save_person(&config).await {
            Ok(person) => {
                info!(
                    entity_type = entity.entity_type(),
                    entity_id = %entity.identifier(),
                    "Person synced"
                );
                SaveOutcome::Synced(person)
            },
            Err(e) => SaveOutcome::Failed { reason: e.reason(), notice: e.user_notice() },
        }
    }

    /// Subscribes `person` to the list named in the entity settings of `key`.
    ///
    /// Returns `false` when no list is configured or the list is unknown remotely.
    ///
    /// # Errors
    /// Returns [`SyncError::Remote`] if the lists cannot be loaded or the subscription fails.
    pub async fn subscribe_to_configured_list(
        &self,
        key: &EntityKey,
        person: &Person,
    ) -> Result<bool, SyncError> {
        let settings = self.policy.entity_settings(&key.entity_type, key.bundle());
        if settings.list.is_empty() {
            return Ok(false);
        }

        let Some(list) = self.lists.resolve_list(&settings.list).await? else {
            warn!(entity = %key, list = %settings.list, "Configured list not found");
            return Ok(false);
        };

        self.client.add_person_to_list(person, &list).await?;
        info!(entity = %key, list = %settings.list, "Person subscribed to list");
        Ok(true)
    }
}

/// Reads the override object, keeping every scalar entry and a well-formed `$unset` list.
fn overrides(payload: &Value) -> Option<PersonConfiguration> {
    let raw = payload.pointer(OVERRIDES_POINTER)?;
    let Some(entries) = raw.as_object() else {
        warn!("Ignoring person overrides that are not an object");
        return None;
    };

    let mut overrides = PersonConfiguration::new();
    for (key, value) in entries {
        if key == UNSET {
            match serde_json::from_value::<Vec<String>>(value.clone()) {
                Ok(keys) => keys.into_iter().for_each(|k| overrides.push_unset(k)),
                Err(e) => warn!(error = %e, "Ignoring malformed override unset list"),
            }
            continue;
        }
        match serde_json::from_value::<Option<Scalar>>(value.clone()) {
            Ok(Some(value)) => overrides.set(key.as_str(), value),
            Ok(None) => {},
            Err(_) => warn!(key = %key, "Ignoring non-scalar person override"),
        }
    }
    Some(overrides)
}
