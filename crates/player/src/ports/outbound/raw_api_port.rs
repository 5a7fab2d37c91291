//! Raw API Port - Object-safe HTTP boundary
//!
//! `RawApiPort` is the object-safe boundary implemented by the transport
//! adapter. It deals only in `serde_json::Value`; the application layer
//! provides a typed wrapper (`Api`) on top.
//!
//! A successful response may carry no payload at all (`Ok(None)`): the engine
//! answers some calls with an empty or unparsable body, and that is not an
//! error at this layer.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::ApiError;

/// Invoked by the transport on every HTTP 401, before the failure is returned.
pub type UnauthorizedHandler = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single outbound call against the engine.
///
/// Owned fields keep the port mockable and the request cheap to move into
/// async tasks.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Endpoint path appended to the configured base URL, e.g. `/newgame`
    pub path: String,
    pub body: Option<Value>,
    /// Bearer token; `None` sends the request unauthenticated
    pub token: Option<String>,
}

impl ApiRequest {
    fn new(method: HttpMethod, path: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method,
            path: path.into(),
            body,
            token: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path, None)
    }

    pub fn post(path: impl Into<String>, body: Option<Value>) -> Self {
        Self::new(HttpMethod::Post, path, body)
    }

    pub fn put(path: impl Into<String>, body: Option<Value>) -> Self {
        Self::new(HttpMethod::Put, path, body)
    }

    pub fn patch(path: impl Into<String>, body: Option<Value>) -> Self {
        Self::new(HttpMethod::Patch, path, body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path, None)
    }

    pub fn with_token(mut self, token: Option<&str>) -> Self {
        self.token = token.map(str::to_string);
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait::async_trait]
pub trait RawApiPort: Send + Sync {
    /// Perform the request and classify the outcome.
    ///
    /// Never panics and never surfaces transport errors other than as
    /// `ApiError` values.
    async fn send(&self, request: ApiRequest) -> Result<Option<Value>, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_has_no_body_or_token() {
        let req = ApiRequest::get("/loadgame");
        assert_eq!(req.method, HttpMethod::Get);
        assert!(req.body.is_none());
        assert!(!req.is_authenticated());
    }

    #[test]
    fn with_token_sets_bearer_credential() {
        let req = ApiRequest::post("/selectchoice", Some(serde_json::json!({ "select": 0 })))
            .with_token(Some("abc"));
        assert_eq!(req.token.as_deref(), Some("abc"));
        assert_eq!(req.method.to_string(), "POST");
    }

    #[test]
    fn body_verbs_carry_their_payload() {
        let body = serde_json::json!({ "select": 1 });
        let put = ApiRequest::put("/save", Some(body.clone()));
        let patch = ApiRequest::patch("/save", Some(body.clone()));
        assert_eq!((put.method, patch.method), (HttpMethod::Put, HttpMethod::Patch));
        assert_eq!(put.body.as_ref(), Some(&body));
        assert_eq!(patch.body, Some(body));
        assert_eq!(patch.method.to_string(), "PATCH");
    }

    #[test]
    fn with_token_none_stays_unauthenticated() {
        let req = ApiRequest::delete("/save").with_token(None);
        assert!(!req.is_authenticated());
    }
}
