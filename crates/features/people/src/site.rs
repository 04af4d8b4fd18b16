use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use ksync_settings::{SettingKey, SettingsStore, SettingsStoreExt};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};

/// Stable per-installation identifier, attached to every synced person.
///
/// The first identifier ever produced is persisted under [`SettingKey::SiteId`] and
/// reused from then on.
#[derive(Debug)]
pub struct SiteIdProvider<S> {
    settings: Arc<S>,
    fallback_site_name: String,
    site_id: OnceCell<String>,
}

impl<S: SettingsStore> SiteIdProvider<S> {
    /// `fallback_site_name` is used when the store holds no site name.
    pub fn new(settings: Arc<S>, fallback_site_name: impl Into<String>) -> Self {
        Self { settings, fallback_site_name: fallback_site_name.into(), site_id: OnceCell::new() }
    }

    /// The installation's identifier, generating and persisting it on first use.
    ///
    /// A failed write is logged; the generated value is still used for the lifetime
    /// of this provider.
    pub async fn site_id(&self) -> String {
        self.site_id.get_or_init(|| self.load_or_generate()).await.clone()
    }

    async fn load_or_generate(&self) -> String {
        if let Some(stored) = self.settings.site_id() {
            return stored;
        }

        let site_name = self.settings.site_name().unwrap_or_else(|| self.fallback_site_name.clone());
        let generated = generate_site_id(&site_name, chrono::Utc::now().timestamp());

        match self.settings.set(SettingKey::SiteId, Value::String(generated.clone())).await {
            Ok(()) => info!(site_id = %generated, "Generated site identifier"),
            Err(e) => warn!(error = %e, "Failed to persist generated site identifier"),
        }
        generated
    }
}

/// `base64(site_name + ":" + timestamp)` with the standard padded alphabet.
#[must_use]
pub fn generate_site_id(site_name: &str, timestamp: i64) -> String {
    STANDARD.encode(format!("{site_name}:{timestamp}"))
}
