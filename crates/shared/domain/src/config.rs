use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level bridge configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SyncConfigInner {
    pub klaviyo: KlaviyoConfig,
    pub site: SiteConfig,
    pub cache: CacheConfig,
    pub mapping: MappingConfig,
    pub settings: SettingsConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct SyncConfig {
    #[serde(flatten, default)]
    inner: Arc<SyncConfigInner>,
}

impl Deref for SyncConfig {
    type Target = SyncConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for SyncConfig {
    fn deref_mut(&mut self) -> &mut SyncConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Remote API client settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KlaviyoConfig {
    /// Private API key. A key held by the settings store takes precedence.
    pub api_key: String,
    pub base_url: String,
    pub timeout_seconds: u64,
    pub page_size: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub name: String,
}

/// List-options cache.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub capacity: u64,
    /// Lifetime of entries stored with the temporary policy.
    pub temporary_ttl_seconds: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    pub missing_value_policy: MissingValuePolicy,
}

/// What to do with a mapped field that has no truthy value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingValuePolicy {
    /// List the attribute under `$unset` so the remote value is cleared.
    #[default]
    Unset,
    /// Leave the attribute out.
    Skip,
}

/// Configuration store location. Without a data directory the store lives in memory.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    pub data_dir: Option<PathBuf>,
}

/// Process logging.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `trace`, `debug`, `info`, `warn`, `error` or `off`.
    pub level: String,
    pub console: bool,
    /// Directory for daily log files; none disables file output.
    pub directory: Option<PathBuf>,
    /// Write file records as JSON lines.
    pub json: bool,
    /// Directives such as `ksync_people=debug,reqwest=warn`; `RUST_LOG` applies when unset.
    pub filter: Option<String>,
}

// --- Default ---

impl Default for KlaviyoConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://a.klaviyo.com".to_owned(),
            timeout_seconds: 10,
            page_size: 100,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { capacity: 1_000, temporary_ttl_seconds: 300 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), console: true, directory: None, json: false, filter: None }
    }
}
