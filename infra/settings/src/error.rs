use std::borrow::Cow;

/// Errors raised by configuration stores.
#[ksync_derive::ksync_error]
pub enum SettingsError {
    #[error("Settings storage error{}: {source}", format_context(.context))]
    Storage { source: ksync_storage::StorageError, context: Option<Cow<'static, str>> },

    #[error("Settings serialization error{}: {source}", format_context(.context))]
    Serialization { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// A textual key that does not name a known setting.
    #[error("Invalid setting key{}: {message}", format_context(.context))]
    InvalidKey { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal settings error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
