//! Failure half of the transport envelope.

use crate::messages;

/// Envelope status used for failures classified locally (no HTTP status).
pub const LOCAL_FAILURE_STATUS: u16 = 400;
/// Envelope status used for failures that could not be classified.
pub const UNKNOWN_FAILURE_STATUS: u16 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// DNS failure, refused connection, reset mid-request
    Network,
    /// No response within the configured timeout
    Timeout,
    Unauthorized,
    Forbidden,
    NotFound,
    /// 5xx
    Server,
    /// Any other non-2xx status
    Rejected,
    Unknown,
}

impl ApiErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            500..=599 => Self::Server,
            _ => Self::Rejected,
        }
    }

    /// Catalog message for this kind; `None` for kinds that only carry a status.
    pub fn catalog_message(&self) -> Option<&'static str> {
        match self {
            Self::Network => Some(messages::NETWORK_ERROR),
            Self::Timeout => Some(messages::TIMEOUT_ERROR),
            Self::Unauthorized => Some(messages::UNAUTHORIZED),
            Self::Forbidden => Some(messages::FORBIDDEN),
            Self::NotFound => Some(messages::NOT_FOUND),
            Self::Server => Some(messages::INTERNAL_ERROR),
            Self::Rejected => None,
            Self::Unknown => Some(messages::UNKNOWN_ERROR),
        }
    }
}

/// `{ status, message }` plus the classification the client derived it from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: u16,
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(status: u16, kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            status,
            kind,
            message: message.into(),
        }
    }

    pub fn network() -> Self {
        Self::new(
            LOCAL_FAILURE_STATUS,
            ApiErrorKind::Network,
            messages::NETWORK_ERROR,
        )
    }

    pub fn timeout() -> Self {
        Self::new(
            LOCAL_FAILURE_STATUS,
            ApiErrorKind::Timeout,
            messages::TIMEOUT_ERROR,
        )
    }

    pub fn unauthorized() -> Self {
        Self::new(401, ApiErrorKind::Unauthorized, messages::UNAUTHORIZED)
    }

    pub fn unknown() -> Self {
        Self::new(
            UNKNOWN_FAILURE_STATUS,
            ApiErrorKind::Unknown,
            messages::UNKNOWN_ERROR,
        )
    }

    /// Failure for a non-2xx status. `body_message` is whatever the engine put
    /// in its JSON error body; without one the catalog (or `HTTP <status>`) is used.
    pub fn from_status(status: u16, body_message: Option<String>) -> Self {
        let kind = ApiErrorKind::from_status(status);
        let message = body_message
            .filter(|m| !m.trim().is_empty())
            .or_else(|| kind.catalog_message().map(str::to_string))
            .unwrap_or_else(|| format!("HTTP {status}"));
        Self::new(status, kind, message)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == ApiErrorKind::Timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert_eq!(ApiErrorKind::from_status(401), ApiErrorKind::Unauthorized);
        assert_eq!(ApiErrorKind::from_status(403), ApiErrorKind::Forbidden);
        assert_eq!(ApiErrorKind::from_status(404), ApiErrorKind::NotFound);
        assert_eq!(ApiErrorKind::from_status(502), ApiErrorKind::Server);
        assert_eq!(ApiErrorKind::from_status(422), ApiErrorKind::Rejected);
    }

    #[test]
    fn body_message_wins_over_catalog() {
        let err = ApiError::from_status(500, Some("LLM backend unavailable".into()));
        assert_eq!(err.message, "LLM backend unavailable");
        assert_eq!(err.kind, ApiErrorKind::Server);
    }

    #[test]
    fn blank_body_message_falls_back_to_catalog() {
        let err = ApiError::from_status(403, Some("  ".into()));
        assert_eq!(err.message, messages::FORBIDDEN);
    }

    #[test]
    fn uncatalogued_status_uses_generic_message() {
        let err = ApiError::from_status(418, None);
        assert_eq!(err.to_string(), "HTTP 418");
        assert_eq!(err.status, 418);
    }

    #[test]
    fn timeout_and_network_messages_differ() {
        let timeout = ApiError::timeout();
        let network = ApiError::network();
        assert_ne!(timeout.message, network.message);
        assert_eq!(timeout.status, network.status);
        assert!(timeout.is_timeout());
        assert!(!network.is_timeout());
    }
}
