use crate::{CacheStore, CacheTtl};
use moka::Expiry;
use moka::sync::Cache;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, trace};

const DEFAULT_CAPACITY: u64 = 1_000;
const DEFAULT_TEMPORARY_TTL: Duration = Duration::from_secs(300);

type EntryKey = (String, String);

#[derive(Debug)]
struct Entry {
    value: Value,
    ttl: CacheTtl,
}

#[derive(Debug, Clone, Copy)]
struct EntryExpiry {
    temporary: Duration,
}

impl EntryExpiry {
    const fn lifetime(&self, ttl: CacheTtl) -> Option<Duration> {
        match ttl {
            CacheTtl::Permanent => None,
            CacheTtl::Temporary => Some(self.temporary),
            CacheTtl::Expire(ttl) => Some(ttl),
        }
    }
}

impl Expiry<EntryKey, Arc<Entry>> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &EntryKey,
        value: &Arc<Entry>,
        _created_at: Instant,
    ) -> Option<Duration> {
        self.lifetime(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &EntryKey,
        value: &Arc<Entry>,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        self.lifetime(value.ttl)
    }
}

/// Builder for [`MokaCacheStore`].
#[derive(Debug, Clone)]
pub struct MokaCacheStoreBuilder {
    capacity: u64,
    temporary_ttl: Duration,
}

impl MokaCacheStoreBuilder {
    /// Maximum number of entries across all buckets.
    #[must_use]
    pub const fn capacity(mut self, capacity: u64) -> Self {
        self.capacity = capacity;
        self
    }

    /// Lifetime of [`CacheTtl::Temporary`] entries.
    #[must_use]
    pub const fn temporary_ttl(mut self, ttl: Duration) -> Self {
        self.temporary_ttl = ttl;
        self
    }

    #[must_use]
    pub fn build(self) -> MokaCacheStore {
        let cache = Cache::builder()
            .max_capacity(self.capacity)
            .expire_after(EntryExpiry { temporary: self.temporary_ttl })
            .build();
        info!(
            capacity = self.capacity,
            temporary_ttl_secs = self.temporary_ttl.as_secs(),
            "Cache store ready"
        );
        MokaCacheStore { cache }
    }
}

/// In-process [`CacheStore`] backed by `moka`.
#[derive(Debug, Clone)]
pub struct MokaCacheStore {
    cache: Cache<EntryKey, Arc<Entry>>,
}

impl MokaCacheStore {
    #[must_use]
    pub const fn builder() -> MokaCacheStoreBuilder {
        MokaCacheStoreBuilder { capacity: DEFAULT_CAPACITY, temporary_ttl: DEFAULT_TEMPORARY_TTL }
    }
}

impl Default for MokaCacheStore {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl CacheStore for MokaCacheStore {
    fn get(&self, key: &str, bucket: &str) -> Option<Value> {
        let entry = self.cache.get(&(bucket.to_owned(), key.to_owned()));
        trace!(bucket, key, hit = entry.is_some(), "Cache lookup");
        entry.map(|e| e.value.clone())
    }

    fn set(&self, key: &str, value: Value, bucket: &str, ttl: CacheTtl) {
        trace!(bucket, key, ?ttl, "Cache store");
        self.cache.insert((bucket.to_owned(), key.to_owned()), Arc::new(Entry { value, ttl }));
    }

    fn clear(&self, key: &str, bucket: &str) {
        trace!(bucket, key, "Cache clear");
        self.cache.invalidate(&(bucket.to_owned(), key.to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn buckets_are_isolated() {
        let store = MokaCacheStore::default();
        store.set("k", json!(1), "cache", CacheTtl::Permanent);
        store.set("k", json!(2), "cache_page", CacheTtl::Permanent);

        store.clear("k", "cache_page");

        assert_eq!(store.get("k", "cache"), Some(json!(1)));
        assert_eq!(store.get("k", "cache_page"), None);
    }

    #[test]
    fn lifetimes_follow_the_policy() {
        let expiry = EntryExpiry { temporary: Duration::from_secs(30) };
        assert_eq!(expiry.lifetime(CacheTtl::Permanent), None);
        assert_eq!(expiry.lifetime(CacheTtl::Temporary), Some(Duration::from_secs(30)));
        assert_eq!(
            expiry.lifetime(CacheTtl::Expire(Duration::from_secs(5))),
            Some(Duration::from_secs(5))
        );
    }
}
