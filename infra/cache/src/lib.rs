//! # Cache
//!
//! Derived views (such as the remote list options) are kept in a [`CacheStore`].
//! Entries live in named buckets and carry their own [`CacheTtl`] policy. A miss is
//! never an error: callers recompute and store again.
//!
//! ```rust
//! use ksync_cache::{CacheStore, CacheTtl, DEFAULT_BUCKET, MokaCacheStore};
//! use serde_json::json;
//!
//! let cache = MokaCacheStore::builder().capacity(100).build();
//! cache.set("klaviyo:list_options", json!({"list:1": "News"}), DEFAULT_BUCKET, CacheTtl::Temporary);
//! assert!(cache.get("klaviyo:list_options", DEFAULT_BUCKET).is_some());
//! cache.clear("klaviyo:list_options", DEFAULT_BUCKET);
//! assert!(cache.get("klaviyo:list_options", DEFAULT_BUCKET).is_none());
//! ```

mod moka_store;

pub use moka_store::{MokaCacheStore, MokaCacheStoreBuilder};

use serde_json::Value;
use std::time::Duration;

/// The general-purpose bucket.
pub const DEFAULT_BUCKET: &str = "cache";

/// Lifetime policy of a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheTtl {
    /// Kept until cleared or evicted for capacity.
    Permanent,
    /// Short-lived; expires after the store's temporary lifetime.
    #[default]
    Temporary,
    /// Expires after the given duration.
    Expire(Duration),
}

/// A bucketed key-value cache.
///
/// Last write wins; there is no ordering between concurrent writers of one key.
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str, bucket: &str) -> Option<Value>;

    fn set(&self, key: &str, value: Value, bucket: &str, ttl: CacheTtl);

    /// Drops one entry. Clearing an absent entry is a no-op.
    fn clear(&self, key: &str, bucket: &str);
}
