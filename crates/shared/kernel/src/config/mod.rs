use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable prefix; nested keys use `__` (`KSYNC__KLAVIYO__API_KEY`).
pub const ENV_PREFIX: &str = "KSYNC";

const DEFAULT_CONFIG_FILE: &str = "ksync";

/// Custom error type for config loading.
#[ksync_derive::ksync_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration from a file overlaid with `KSYNC__`-prefixed environment variables.
///
/// An explicit `path` must exist. Without one, an optional `ksync.*` file in the
/// working directory is used (any format the `config` crate recognizes by extension),
/// so environment variables and defaults alone are enough to run.
///
/// # Errors
/// Returns [`ConfigError::Config`] if an explicit file is missing, a source is
/// malformed, or the merged values do not deserialize into `T`.
///
/// # Example
/// ```rust
/// use ksync_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let (effective_path, required) = path.map_or_else(
        || (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        |p| (p.as_ref().to_path_buf(), true),
    );

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake),
        );

    info!(path = %effective_path.display(), required, "Loading configuration");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
