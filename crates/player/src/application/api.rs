//! Typed API wrapper for application services.
//!
//! `Api` wraps an `Arc<dyn RawApiPort>` and converts the untyped JSON the
//! transport hands back into domain types. An empty payload stays `None` so
//! callers can decide what an empty success means for their endpoint.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::ports::outbound::{ApiError, ApiRequest, RawApiPort};

#[derive(Clone)]
pub struct Api {
    raw: Arc<dyn RawApiPort>,
}

impl Api {
    pub fn new(raw: Arc<dyn RawApiPort>) -> Self {
        Self { raw }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<Option<T>, ApiError> {
        self.send(ApiRequest::get(path).with_token(token)).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + Send + Sync>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<Option<T>, ApiError> {
        let body = encode_body(body)?;
        self.send(ApiRequest::post(path, body).with_token(token))
            .await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<(), ApiError> {
        self.raw
            .send(ApiRequest::delete(path).with_token(token))
            .await
            .map(|_| ())
    }

    async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<Option<T>, ApiError> {
        let path = request.path.clone();
        let value = self.raw.send(request).await?;
        decode_payload(&path, value)
    }
}

/// `null` serializes to no body at all.
fn encode_body<B: Serialize>(body: &B) -> Result<Option<Value>, ApiError> {
    match serde_json::to_value(body) {
        Ok(Value::Null) => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize request body");
            Err(ApiError::unknown())
        }
    }
}

/// `null` and `{}` are empty payloads; anything else must match `T`.
fn decode_payload<T: DeserializeOwned>(
    path: &str,
    value: Option<Value>,
) -> Result<Option<T>, ApiError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) if map.is_empty() => Ok(None),
        Some(value) => serde_json::from_value(value).map(Some).map_err(|e| {
            tracing::warn!(endpoint = path, error = %e, "Engine payload did not match expected shape");
            ApiError::unknown()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::{ApiErrorKind, HttpMethod, MockRawApiPort};
    use serde_json::json;
    use udh_domain::GameData;

    fn api_returning(value: Option<Value>) -> Api {
        let mut raw = MockRawApiPort::new();
        raw.expect_send()
            .returning(move |_| Ok(value.clone()));
        Api::new(Arc::new(raw))
    }

    #[tokio::test]
    async fn get_decodes_payload() {
        let api = api_returning(Some(json!({ "id": "g1", "content": "...", "choices": ["a"] })));
        let data: Option<GameData> = api.get("/newgame", Some("tok")).await.unwrap();
        assert_eq!(data.unwrap().id, "g1");
    }

    #[tokio::test]
    async fn empty_object_and_null_are_empty_payloads() {
        let api = api_returning(Some(json!({})));
        let data: Option<GameData> = api.get("/loadgame", None).await.unwrap();
        assert!(data.is_none());

        let api = api_returning(Some(Value::Null));
        let data: Option<GameData> = api.get("/loadgame", None).await.unwrap();
        assert!(data.is_none());
    }

    #[tokio::test]
    async fn shape_mismatch_is_unknown_error() {
        let api = api_returning(Some(json!([1, 2, 3])));
        let err = api.get::<GameData>("/newgame", None).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Unknown);
    }

    #[tokio::test]
    async fn post_forwards_body_and_token() {
        let mut raw = MockRawApiPort::new();
        raw.expect_send()
            .withf(|req| {
                req.method == HttpMethod::Post
                    && req.path == "/selectchoice"
                    && req.body == Some(json!({ "select": 1 }))
                    && req.token.as_deref() == Some("tok")
            })
            .times(1)
            .returning(|_| Ok(Some(json!({ "id": "g1" }))));
        let api = Api::new(Arc::new(raw));

        let data: Option<GameData> = api
            .post("/selectchoice", &json!({ "select": 1 }), Some("tok"))
            .await
            .unwrap();
        assert!(data.is_some());
    }

    #[tokio::test]
    async fn transport_errors_pass_through() {
        let mut raw = MockRawApiPort::new();
        raw.expect_send()
            .returning(|_| Err(ApiError::timeout()));
        let api = Api::new(Arc::new(raw));

        let err = api.delete("/save", Some("tok")).await.unwrap_err();
        assert!(err.is_timeout());
    }
}
