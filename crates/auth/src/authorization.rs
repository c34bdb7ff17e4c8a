//! Authorization header providers

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Method;

use crate::AuthError;

/// Computes the authorization headers for one request.
///
/// Implementations receive the HTTP method and the service-relative path
/// (e.g. `/items/{id}`), never the absolute URL.
pub trait Authorization: Send + Sync {
    fn create_auth_headers(&self, method: &Method, path: &str) -> HeaderMap;
}

/// Sends no authorization headers
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuthorization;

impl Authorization for NoAuthorization {
    fn create_auth_headers(&self, _method: &Method, _path: &str) -> HeaderMap {
        HeaderMap::new()
    }
}

/// Static bearer token, identical for every request
#[derive(Clone)]
pub struct BearerAuthorization {
    header: HeaderValue,
}

impl std::fmt::Debug for BearerAuthorization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerAuthorization")
            .field("header", &"[REDACTED]")
            .finish()
    }
}

impl BearerAuthorization {
    pub fn new(token: &str) -> Result<Self, AuthError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::EmptyToken);
        }

        let mut header = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| AuthError::InvalidHeaderValue)?;
        header.set_sensitive(true);

        Ok(Self { header })
    }
}

impl Authorization for BearerAuthorization {
    fn create_auth_headers(&self, method: &Method, path: &str) -> HeaderMap {
        tracing::trace!(method = %method, path = %path, "Attaching bearer authorization");
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.header.clone());
        headers
    }
}
