//! Mock Authorization Implementation
//!
//! Records every `(method, path)` it is asked to sign and answers with
//! deterministic headers for test assertions.
//! Thread-safe via `Arc<Mutex<>>`.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use std::sync::{Arc, Mutex};

use crate::Authorization;

/// Header carrying the signed method and path
pub const MOCK_AUTH_HEADER: &str = "x-mock-auth";

/// A recorded header request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedAuthRequest {
    pub method: Method,
    pub path: String,
}

/// Mock authorization that signs `"{METHOD} {path}"` into `x-mock-auth`
#[derive(Debug, Clone, Default)]
pub struct MockAuthorization {
    history: Arc<Mutex<Vec<RecordedAuthRequest>>>,
}

impl MockAuthorization {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return all recorded header requests.
    pub fn recorded_requests(&self) -> Vec<RecordedAuthRequest> {
        self.history
            .lock()
            .expect("auth history lock poisoned")
            .clone()
    }
}

impl Authorization for MockAuthorization {
    fn create_auth_headers(&self, method: &Method, path: &str) -> HeaderMap {
        if let Ok(mut history) = self.history.lock() {
            history.push(RecordedAuthRequest {
                method: method.clone(),
                path: path.to_string(),
            });
        }

        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&format!("{} {}", method, path)) {
            headers.insert(HeaderName::from_static(MOCK_AUTH_HEADER), value);
        }
        headers
    }
}
