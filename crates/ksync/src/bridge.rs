use crate::error::{BridgeError, BridgeErrorExt};
use ksync_cache::{CacheStore, MokaCacheStore};
use ksync_domain::config::SyncConfig;
use ksync_domain::{EntityKey, Person};
use ksync_kernel::config::load_config;
use ksync_klaviyo::{KlaviyoHttpApi, MarketingApi};
use ksync_people::{
    EntitySaveHook, FieldMappingPolicy, KlaviyoClient, ListCache, PersonConfigurationBuilder,
    SaveOutcome, SiteIdProvider, SyncEntity, SyncError,
};
use ksync_settings::{SettingsBackend, SettingsStore, SettingsStoreExt};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// The bridge as deployed: HTTP client, runtime-selected settings store, moka cache.
pub type HttpBridge = Bridge<KlaviyoHttpApi, SettingsBackend, MokaCacheStore>;

/// Composition root.
///
/// Owns the one remote API client of the deployment and hands clones of it to every
/// component that needs it.
#[derive(Debug)]
pub struct Bridge<A, S, C> {
    config: SyncConfig,
    settings: Arc<S>,
    cache: Arc<C>,
    client: KlaviyoClient<A>,
    site: Arc<SiteIdProvider<S>>,
    lists: ListCache<A, C>,
    policy: FieldMappingPolicy<S>,
    builder: PersonConfigurationBuilder<S>,
    hook: EntitySaveHook<A, S, C>,
}

impl HttpBridge {
    /// Loads [`SyncConfig`] through [`load_config`] and connects.
    ///
    /// # Errors
    /// Returns [`BridgeError::Config`] for unreadable configuration, otherwise as [`Bridge::connect`].
    pub async fn load(path: Option<&Path>) -> Result<Self, BridgeError> {
        let config: SyncConfig = load_config(path).context("Failed to load bridge configuration")?;
        Self::connect(config).await
    }

    /// Builds the deployed stack from `config`.
    ///
    /// The settings store lives under `settings.data_dir` when set and in memory
    /// otherwise. An API key held by the settings store replaces `klaviyo.api_key`.
    ///
    /// # Errors
    /// Returns [`BridgeError::Settings`] if the settings file cannot be opened and
    /// [`BridgeError::Api`] if the HTTP client cannot be built.
    pub async fn connect(config: SyncConfig) -> Result<Self, BridgeError> {
        let settings = SettingsBackend::open(config.settings.data_dir.as_deref())
            .await
            .context("Failed to open settings store")?;

        let mut api = KlaviyoHttpApi::new(&config.klaviyo).context("Failed to build Klaviyo client")?;
        if let Some(key) = settings.api_key() {
            api = api.with_api_key(key);
        }

        let cache = MokaCacheStore::builder()
            .capacity(config.cache.capacity)
            .temporary_ttl(Duration::from_secs(config.cache.temporary_ttl_seconds))
            .build();

        Ok(Self::new(api, settings, cache, config))
    }
}

impl<A, S, C> Bridge<A, S, C>
where
    A: MarketingApi,
    S: SettingsStore,
    C: CacheStore,
{
    pub fn new(api: A, settings: S, cache: C, config: SyncConfig) -> Self {
        let settings = Arc::new(settings);
        let cache = Arc::new(cache);
        let client = KlaviyoClient::new(api);

        let site = Arc::new(SiteIdProvider::new(Arc::clone(&settings), config.site.name.clone()));
        let lists = ListCache::new(client.clone(), Arc::clone(&cache));
        let policy = FieldMappingPolicy::new(Arc::clone(&settings));
        let builder = PersonConfigurationBuilder::new(
            Arc::clone(&settings),
            Arc::clone(&site),
            config.mapping.missing_value_policy,
        );
        let hook = EntitySaveHook::new(client.clone(), builder.clone(), policy.clone(), lists.clone());

        info!(
            site = %config.site.name,
            missing_values = ?config.mapping.missing_value_policy,
            "Sync bridge assembled"
        );

        Self { config, settings, cache, client, site, lists, policy, builder, hook }
    }

    #[must_use]
    pub const fn config(&self) -> &SyncConfig {
        &self.config
    }

    #[must_use]
    pub fn settings(&self) -> &S {
        &self.settings
    }

    #[must_use]
    pub fn cache(&self) -> &C {
        &self.cache
    }

    #[must_use]
    pub const fn client(&self) -> &KlaviyoClient<A> {
        &self.client
    }

    #[must_use]
    pub fn site(&self) -> &SiteIdProvider<S> {
        &self.site
    }

    #[must_use]
    pub const fn lists(&self) -> &ListCache<A, C> {
        &self.lists
    }

    #[must_use]
    pub const fn policy(&self) -> &FieldMappingPolicy<S> {
        &self.policy
    }

    #[must_use]
    pub const fn builder(&self) -> &PersonConfigurationBuilder<S> {
        &self.builder
    }

    #[must_use]
    pub const fn hook(&self) -> &EntitySaveHook<A, S, C> {
        &self.hook
    }

    /// See [`EntitySaveHook::save_entity`].
    pub async fn save_entity<E: SyncEntity + Sync>(&self, entity: &E, payload: &Value) -> SaveOutcome {
        self.hook.save_entity(entity, payload).await
    }

    /// See [`EntitySaveHook::subscribe_to_configured_list`].
    ///
    /// # Errors
    /// Returns [`SyncError::Remote`] when the lists cannot be loaded or the subscription fails.
    pub async fn subscribe_to_configured_list(
        &self,
        key: &EntityKey,
        person: &Person,
    ) -> Result<bool, SyncError> {
        self.hook.subscribe_to_configured_list(key, person).await
    }
}
