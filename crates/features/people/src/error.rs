use ksync_klaviyo::ApiError;
use std::borrow::Cow;
use std::fmt;

const DEFAULT_NOTICE: &str = "Unable to reach Klaviyo";

/// Errors surfaced by the people slice.
///
/// Remote failures carry the operation that failed as context; see [`SyncError::user_notice`].
#[ksync_derive::ksync_error]
pub enum SyncError {
    #[error("Remote API failure{}: {source}", format_context(.context))]
    Remote { source: ApiError, context: Option<Cow<'static, str>> },

    #[error("Internal sync error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl SyncError {
    /// Machine-readable failure reason.
    #[must_use]
    pub const fn reason(&self) -> FailureReason {
        match self {
            Self::Remote { source, .. } => FailureReason::from_api(source),
            Self::Internal { .. } => FailureReason::Internal,
        }
    }

    /// Generic message suitable for an end user, e.g.
    /// "Unable to retrieve lists from Klaviyo. Please try again later."
    #[must_use]
    pub fn user_notice(&self) -> String {
        let operation = match self {
            Self::Remote { context, .. } => context.as_deref(),
            Self::Internal { .. } => None,
        };
        format!("{}. Please try again later.", operation.unwrap_or(DEFAULT_NOTICE))
    }
}

/// Why a sync operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureReason {
    Transport,
    Unauthorized,
    NotFound,
    RateLimited,
    RemoteStatus,
    Rejected,
    InvalidRequest,
    InvalidResponse,
    Internal,
}

impl FailureReason {
    const fn from_api(error: &ApiError) -> Self {
        match error {
            ApiError::Transport { .. } => Self::Transport,
            ApiError::Unauthorized { .. } => Self::Unauthorized,
            ApiError::NotFound { .. } => Self::NotFound,
            ApiError::RateLimited { .. } => Self::RateLimited,
            ApiError::Status { .. } => Self::RemoteStatus,
            ApiError::Rejected { .. } => Self::Rejected,
            ApiError::InvalidRequest { .. } => Self::InvalidRequest,
            ApiError::InvalidResponse { .. } => Self::InvalidResponse,
            ApiError::Internal { .. } => Self::Internal,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Unauthorized => "unauthorized",
            Self::NotFound => "not_found",
            Self::RateLimited => "rate_limited",
            Self::RemoteStatus => "remote_status",
            Self::Rejected => "rejected",
            Self::InvalidRequest => "invalid_request",
            Self::InvalidResponse => "invalid_response",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
