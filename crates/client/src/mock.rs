//! Mock Transport Implementation
//!
//! Answers scripted replies keyed by `(method, path)` and records every
//! request for test assertions. Query requests are matched on
//! `path?key=value&...` in parameter order. Unscripted requests get a 404.
//! Thread-safe via `Arc<Mutex<>>`.

use reqwest::header::HeaderMap;
use reqwest::Method;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::transport::{ApiRequest, ApiResponse, RequestBody, Transport, TransportError};

/// Scripted reply for one route
#[derive(Debug, Clone, PartialEq)]
pub enum MockReply {
    /// 200 with a JSON body, sent as is
    Json(serde_json::Value),
    /// 200 with a raw body
    Bytes {
        body: Vec<u8>,
        content_type: Option<String>,
    },
    /// Non-2xx status with a raw body
    Status { status: u16, body: Vec<u8> },
    NetworkError(String),
}

impl MockReply {
    /// Successful API envelope wrapping `data`
    pub fn ok(data: serde_json::Value) -> Self {
        MockReply::Json(serde_json::json!({ "ok": true, "data": data }))
    }

    /// 200 envelope reporting an API-level failure
    pub fn api_error(message: &str) -> Self {
        MockReply::Json(serde_json::json!({ "ok": false, "data": null, "error": message }))
    }

    pub fn status(status: u16, body: impl Into<Vec<u8>>) -> Self {
        MockReply::Status {
            status,
            body: body.into(),
        }
    }

    pub fn bytes(body: impl Into<Vec<u8>>, content_type: Option<&str>) -> Self {
        MockReply::Bytes {
            body: body.into(),
            content_type: content_type.map(str::to_string),
        }
    }
}

/// A request as the mock received it
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub path: String,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

fn route_key(path: &str, body: &RequestBody) -> String {
    match body {
        RequestBody::Query(pairs) if !pairs.is_empty() => {
            let query: Vec<String> = pairs
                .iter()
                .map(|(key, value)| format!("{}={}", key, value))
                .collect();
            format!("{}?{}", path, query.join("&"))
        }
        _ => path.to_string(),
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    routes: Arc<Mutex<HashMap<(Method, String), MockReply>>>,
    history: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the reply for `method path`, replacing any earlier one.
    pub fn respond(&self, method: Method, path: &str, reply: MockReply) -> &Self {
        self.routes
            .lock()
            .expect("routes lock poisoned")
            .insert((method, path.to_string()), reply);
        self
    }

    /// Return all recorded requests in the order they were sent.
    pub fn recorded_requests(&self) -> Vec<RecordedRequest> {
        self.history.lock().expect("history lock poisoned").clone()
    }

    /// Recorded requests for one `method path`
    pub fn requests_to(&self, method: &Method, path: &str) -> Vec<RecordedRequest> {
        self.recorded_requests()
            .into_iter()
            .filter(|request| &request.method == method && request.path == path)
            .collect()
    }

    /// Clear scripted replies and recorded requests.
    pub fn reset(&self) {
        self.routes.lock().expect("routes lock poisoned").clear();
        self.history.lock().expect("history lock poisoned").clear();
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        tracing::debug!(method = %request.method, path = %request.path, "Mock transport: recording request");

        let reply = self
            .routes
            .lock()
            .map_err(|e| TransportError::network(format!("routes lock poisoned: {e}")))?
            .get(&(request.method.clone(), route_key(&request.path, &request.body)))
            .cloned();

        self.history
            .lock()
            .map_err(|e| TransportError::network(format!("history lock poisoned: {e}")))?
            .push(RecordedRequest {
                method: request.method,
                url: request.url,
                path: request.path,
                headers: request.headers,
                body: request.body,
            });

        match reply {
            Some(MockReply::Json(value)) => Ok(ApiResponse {
                status: 200,
                content_type: Some("application/json".to_string()),
                body: serde_json::to_vec(&value)
                    .map_err(|e| TransportError::network(e.to_string()))?,
            }),
            Some(MockReply::Bytes { body, content_type }) => Ok(ApiResponse {
                status: 200,
                content_type,
                body,
            }),
            Some(MockReply::Status { status, body }) => {
                Err(TransportError::from_status(status, body))
            }
            Some(MockReply::NetworkError(message)) => Err(TransportError::network(message)),
            None => Err(TransportError::from_status(404, b"Not Found".to_vec())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_replies_and_records() {
        let mock = MockTransport::new();
        mock.respond(Method::GET, "/rarities", MockReply::ok(serde_json::json!([])));

        let response = mock
            .send(ApiRequest::new(Method::GET, "http://x/v1/rarities", "/rarities"))
            .await
            .unwrap();
        assert_eq!(response.status, 200);

        let missing = mock
            .send(ApiRequest::new(Method::GET, "http://x/v1/nope", "/nope"))
            .await
            .unwrap_err();
        assert_eq!(missing.status, Some(404));

        assert_eq!(mock.recorded_requests().len(), 2);
        assert_eq!(mock.recorded_requests()[1].path, "/nope");
        assert_eq!(mock.requests_to(&Method::GET, "/rarities").len(), 1);

        mock.respond(
            Method::GET,
            "/assetPacks?owner=default",
            MockReply::ok(serde_json::json!([])),
        );
        let query = ApiRequest::new(Method::GET, "http://x/v1/assetPacks", "/assetPacks")
            .with_body(RequestBody::Query(vec![(
                "owner".to_string(),
                "default".to_string(),
            )]));
        assert!(mock.send(query).await.is_ok());

        mock.reset();
        assert!(mock.recorded_requests().is_empty());
    }
}
