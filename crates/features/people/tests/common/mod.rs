#![allow(dead_code)]

use ksync_cache::MokaCacheStore;
use ksync_domain::config::MissingValuePolicy;
use ksync_domain::{MarketingList, Person, PersonConfiguration};
use ksync_klaviyo::{ApiError, MarketingApi};
use ksync_people::{
    EntitySaveHook, FieldMappingPolicy, KlaviyoClient, ListCache, PersonConfigurationBuilder,
    SiteIdProvider,
};
use ksync_settings::MemorySettingsStore;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-process stand-in for the remote API that records every call.
#[derive(Debug, Default)]
pub struct FakeApi {
    pub lists: Mutex<Vec<MarketingList>>,
    pub saved: Mutex<Vec<PersonConfiguration>>,
    pub subscriptions: Mutex<Vec<(Person, MarketingList)>>,
    pub list_calls: AtomicUsize,
    pub save_calls: AtomicUsize,
    pub fail: AtomicBool,
}

impl FakeApi {
    pub fn with_lists(lists: &[(&str, &str, &str)]) -> Self {
        let api = Self::default();
        *api.lists.lock() = lists
            .iter()
            .map(|(list_type, id, name)| MarketingList {
                id: (*id).to_owned(),
                list_type: (*list_type).to_owned(),
                name: (*name).to_owned(),
            })
            .collect();
        api
    }

    pub fn failing() -> Self {
        let api = Self::default();
        api.fail.store(true, Ordering::SeqCst);
        api
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), ApiError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                status: 500,
                message: "upstream unavailable".into(),
                context: None,
            });
        }
        Ok(())
    }
}

impl MarketingApi for FakeApi {
    async fn all_lists(&self) -> Result<Vec<MarketingList>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.lists.lock().clone())
    }

    async fn create_list(&self, name: &str) -> Result<MarketingList, ApiError> {
        self.check()?;
        let mut lists = self.lists.lock();
        let list = MarketingList {
            id: format!("new{}", lists.len() + 1),
            list_type: "list".to_owned(),
            name: name.to_owned(),
        };
        lists.push(list.clone());
        Ok(list)
    }

    async fn save_person(&self, config: &PersonConfiguration) -> Result<Person, ApiError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.saved.lock().push(config.clone());
        let mut person = Person::from(config);
        person.id.get_or_insert_with(|| "P1".to_owned());
        Ok(person)
    }

    async fn add_person_to_list(&self, person: &Person, list: &MarketingList) -> Result<(), ApiError> {
        self.check()?;
        self.subscriptions.lock().push((person.clone(), list.clone()));
        Ok(())
    }
}

/// Components wired the way the bridge wires them, around a fake API.
pub struct Harness {
    pub api: KlaviyoClient<FakeApi>,
    pub settings: Arc<MemorySettingsStore>,
    pub cache: Arc<MokaCacheStore>,
}

impl Harness {
    pub fn new(api: FakeApi, settings: MemorySettingsStore) -> Self {
        Self {
            api: KlaviyoClient::new(api),
            settings: Arc::new(settings),
            cache: Arc::new(MokaCacheStore::builder().capacity(100).build()),
        }
    }

    pub fn fake(&self) -> &FakeApi {
        self.api.api()
    }

    pub fn lists(&self) -> ListCache<FakeApi, MokaCacheStore> {
        ListCache::new(self.api.clone(), Arc::clone(&self.cache))
    }

    pub fn policy(&self) -> FieldMappingPolicy<MemorySettingsStore> {
        FieldMappingPolicy::new(Arc::clone(&self.settings))
    }

    pub fn builder(&self, policy: MissingValuePolicy) -> PersonConfigurationBuilder<MemorySettingsStore> {
        let site = Arc::new(SiteIdProvider::new(Arc::clone(&self.settings), "Test site"));
        PersonConfigurationBuilder::new(Arc::clone(&self.settings), site, policy)
    }

    pub fn hook(&self) -> EntitySaveHook<FakeApi, MemorySettingsStore, MokaCacheStore> {
        EntitySaveHook::new(
            self.api.clone(),
            self.builder(MissingValuePolicy::Unset),
            self.policy(),
            self.lists(),
        )
    }
}
