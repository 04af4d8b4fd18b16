use ksync_domain::config::{
    CacheConfig, KlaviyoConfig, LoggingConfig, MappingConfig, MissingValuePolicy, SyncConfig,
};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let klaviyo = KlaviyoConfig::default();
    assert_eq!(klaviyo.base_url, "https://a.klaviyo.com");
    assert_eq!(klaviyo.timeout_seconds, 10);
    assert_eq!(klaviyo.page_size, 100);
    assert!(klaviyo.api_key.is_empty());

    let cache = CacheConfig::default();
    assert_eq!(cache.capacity, 1_000);
    assert_eq!(cache.temporary_ttl_seconds, 300);

    assert_eq!(MappingConfig::default().missing_value_policy, MissingValuePolicy::Unset);

    let logging = LoggingConfig::default();
    assert_eq!(logging.level, "info");
    assert!(logging.console);
    assert!(logging.directory.is_none());
}

#[test]
fn sync_config_deserializes() {
    let raw = json!({
        "klaviyo": { "api_key": "pk_test", "timeout_seconds": 3 },
        "site": { "name": "Acme" },
        "mapping": { "missing_value_policy": "skip" },
        "settings": { "data_dir": "/tmp/ksync" },
        "logging": { "level": "debug", "directory": "/var/log/ksync", "json": true }
    });

    let cfg: SyncConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.klaviyo.api_key, "pk_test");
    assert_eq!(cfg.klaviyo.timeout_seconds, 3);
    assert_eq!(cfg.klaviyo.base_url, "https://a.klaviyo.com");
    assert_eq!(cfg.site.name, "Acme");
    assert_eq!(cfg.mapping.missing_value_policy, MissingValuePolicy::Skip);
    assert_eq!(cfg.settings.data_dir, Some(std::path::PathBuf::from("/tmp/ksync")));
    assert_eq!(cfg.cache.capacity, 1_000);
    assert_eq!(cfg.logging.level, "debug");
    assert!(cfg.logging.json && cfg.logging.console);
    assert_eq!(cfg.logging.directory, Some(std::path::PathBuf::from("/var/log/ksync")));
}

#[test]
fn clones_share_until_mutated() {
    let base = SyncConfig::default();
    let mut changed = base.clone();
    changed.site.name = "Changed".to_owned();

    assert!(base.site.name.is_empty());
    assert_eq!(changed.site.name, "Changed");
}
