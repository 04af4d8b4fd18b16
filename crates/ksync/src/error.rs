use ksync_kernel::config::ConfigError;
use ksync_klaviyo::ApiError;
use ksync_logger::LoggerError;
use ksync_settings::SettingsError;
use std::borrow::Cow;

/// Failures while assembling a [`crate::Bridge`].
#[ksync_derive::ksync_error]
pub enum BridgeError {
    #[error("Configuration error{}: {source}", format_context(.context))]
    Config { source: ConfigError, context: Option<Cow<'static, str>> },

    #[error("Settings store error{}: {source}", format_context(.context))]
    Settings { source: SettingsError, context: Option<Cow<'static, str>> },

    #[error("Remote API setup error{}: {source}", format_context(.context))]
    Api { source: ApiError, context: Option<Cow<'static, str>> },

    #[error("Logging setup error{}: {source}", format_context(.context))]
    Logger { source: LoggerError, context: Option<Cow<'static, str>> },

    #[error("Internal bridge error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
