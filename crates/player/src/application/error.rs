//! Error taxonomy for game service and session operations.
//!
//! `Display` is the exact text the UI shows. Transport failures arrive as
//! [`ApiError`] values and are mapped here; nothing in this layer is
//! surfaced as a panic.

use crate::application::GameOperation;
use crate::messages;
use crate::ports::outbound::{ApiError, ApiErrorKind};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// No token was available; no request was made
    #[error("{}", messages::LOGIN_REQUIRED)]
    LocalAuthMissing,

    #[error("{0}")]
    NetworkFailure(String),

    #[error("{0}")]
    TimeoutFailure(String),

    /// HTTP 401. The transport has already started session teardown.
    #[error("{}", messages::RELOGIN_REQUIRED)]
    Unauthorized,

    /// Any other non-2xx response
    #[error("{message}")]
    ServerError { status: u16, message: String },

    /// `/loadinfo` succeeded without a payload
    #[error("{}", messages::NO_SAVED_DATA)]
    NoSavedData,

    /// A choice was made without an active game; no request was made
    #[error("{}", messages::NO_ACTIVE_GAME)]
    NoActiveGame,

    /// A 2xx response without the payload the operation requires
    #[error("{}", .0.failure_message())]
    EmptyPayload(GameOperation),

    #[error("{0}")]
    UnknownError(String),
}

impl ServiceError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    pub fn is_no_saved_data(&self) -> bool {
        matches!(self, Self::NoSavedData)
    }

    /// Failures decided locally, before any request was sent.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::LocalAuthMissing | Self::NoActiveGame)
    }
}

impl From<ApiError> for ServiceError {
    fn from(err: ApiError) -> Self {
        match err.kind {
            ApiErrorKind::Unauthorized => Self::Unauthorized,
            ApiErrorKind::Network => Self::NetworkFailure(err.message),
            ApiErrorKind::Timeout => Self::TimeoutFailure(err.message),
            ApiErrorKind::Forbidden
            | ApiErrorKind::NotFound
            | ApiErrorKind::Server
            | ApiErrorKind::Rejected => Self::ServerError {
                status: err.status,
                message: err.message,
            },
            ApiErrorKind::Unknown => Self::UnknownError(err.message),
        }
    }
}
