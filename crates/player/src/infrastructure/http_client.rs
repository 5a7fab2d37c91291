//! HTTP transport for the game engine API.
//!
//! Implements [`RawApiPort`] on top of `reqwest`. Every outcome is folded into
//! `Result<Option<Value>, ApiError>`; nothing here panics or leaks a
//! `reqwest::Error` past the port.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::infrastructure::config::ApiConfig;
use crate::ports::outbound::{ApiError, ApiRequest, HttpMethod, RawApiPort, UnauthorizedHandler};

const JSON: &str = "application/json";

/// Client for the engine's REST endpoints
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    on_unauthorized: Option<UnauthorizedHandler>,
}

impl HttpClient {
    pub fn new(config: &ApiConfig) -> Self {
        // The timeout is also applied per request, so a fallback client still honours it.
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to default HTTP client");
                Client::new()
            });

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
            on_unauthorized: None,
        }
    }

    /// Install the handler run on every 401. Replaces any previous handler.
    pub fn with_unauthorized_handler(mut self, handler: UnauthorizedHandler) -> Self {
        self.on_unauthorized = Some(handler);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn request(&self, request: ApiRequest) -> Result<Option<Value>, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &url)
            .timeout(self.timeout)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON);

        if let Some(token) = request.token.as_deref() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::debug!(method = %request.method, endpoint = %request.path, "Sending engine request");

        let response = builder
            .send()
            .await
            .map_err(|e| classify_transport_error(&request, &e))?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(endpoint = %request.path, "Engine rejected credentials (401)");
            if let Some(handler) = &self.on_unauthorized {
                handler();
            }
            return Err(ApiError::unauthorized());
        }

        if !status.is_success() {
            // An unreadable error body only costs us the server's message.
            let body = response.text().await.unwrap_or_default();
            let error = ApiError::from_status(status.as_u16(), error_body_message(&body));
            tracing::warn!(
                endpoint = %request.path,
                status = status.as_u16(),
                error = %error,
                "Engine request failed"
            );
            return Err(error);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| classify_transport_error(&request, &e))?;

        Ok(parse_success_body(&request.path, &bytes))
    }
}

#[async_trait]
impl RawApiPort for HttpClient {
    async fn send(&self, request: ApiRequest) -> Result<Option<Value>, ApiError> {
        self.request(request).await
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn classify_transport_error(request: &ApiRequest, err: &reqwest::Error) -> ApiError {
    // A connect timeout reports both; it is a timeout.
    let error = if err.is_timeout() {
        ApiError::timeout()
    } else if err.is_connect() || err.is_request() || err.is_body() {
        ApiError::network()
    } else {
        ApiError::unknown()
    };
    tracing::warn!(
        endpoint = %request.path,
        kind = ?error.kind,
        error = %err,
        "Engine request did not complete"
    );
    error
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    detail: Option<Value>,
}

/// Pull a human-readable message out of a JSON error body, if there is one.
fn error_body_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed.message.or_else(|| match parsed.detail {
        Some(Value::String(detail)) => Some(detail),
        _ => None,
    })
}

/// Empty, `null` and unparsable 2xx bodies are all "no payload".
fn parse_success_body(endpoint: &str, bytes: &[u8]) -> Option<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Null) => None,
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(endpoint, error = %e, "Unparsable success body, treating as empty");
            None
        }
    }
}
