use std::borrow::Cow;

/// Failures of the remote marketing API. [`ApiError::kind`] is the reason code.
#[ksync_derive::ksync_error]
pub enum ApiError {
    /// The request never produced a response (DNS, TLS, timeout).
    #[error("Transport error{}: {source}", format_context(.context))]
    Transport { source: reqwest::Error, context: Option<Cow<'static, str>> },

    /// Missing or rejected API key.
    #[error("Unauthorized{}: {message}", format_context(.context))]
    Unauthorized { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Rate limited{}: {message}", format_context(.context))]
    RateLimited { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Any other non-success status.
    #[error("Remote error ({status}){}: {message}", format_context(.context))]
    Status { status: u16, message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The request was accepted but the API reported it was not applied.
    #[error("Request rejected{}: {message}", format_context(.context))]
    Rejected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The request could not be built from the given input.
    #[error("Invalid request{}: {message}", format_context(.context))]
    InvalidRequest { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid response{}: {source}", format_context(.context))]
    InvalidResponse { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Internal API error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
