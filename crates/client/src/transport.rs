//! HTTP transport stack
//!
//! A [`Transport`] sends one [`ApiRequest`] and returns the raw response.
//! [`HttpTransport`] does the network I/O with reqwest; [`AuthorizedTransport`]
//! decorates any transport with per-request authorization headers.

use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use std::sync::Arc;
use thiserror::Error;

use builder_auth::Authorization;
use builder_domain::Blob;

/// One named multipart field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub blob: Arc<Blob>,
}

impl FormPart {
    pub fn new(name: impl Into<String>, blob: Arc<Blob>) -> Self {
        Self {
            name: name.into(),
            blob,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    /// Query string pairs, for GET requests
    Query(Vec<(String, String)>),
    Multipart(Vec<FormPart>),
}

#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute URL
    pub url: String,
    /// Service-relative path, used to compute authorization headers
    pub path: String,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            path: path.into(),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }
}

/// A successful (2xx) response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    /// HTTP status, absent for network failures
    pub status: Option<u16>,
    pub message: String,
    /// Raw response body, when a response was received
    pub body: Option<Vec<u8>>,
}

impl TransportError {
    pub fn from_status(status: u16, body: Vec<u8>) -> Self {
        Self {
            status: Some(status),
            message: format!("Request failed with status code {}", status),
            body: Some(body),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
            body: None,
        }
    }

    pub fn body_text(&self) -> Option<String> {
        self.body
            .as_deref()
            .map(|body| String::from_utf8_lossy(body).into_owned())
    }
}

#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

#[async_trait::async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        (**self).send(request).await
    }
}

/// Real HTTP transport backed by a shared reqwest client
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

fn multipart_form(parts: Vec<FormPart>) -> Result<Form, TransportError> {
    let mut form = Form::new();
    for FormPart { name, blob } in parts {
        let mut part = Part::bytes(blob.data.clone()).file_name(name.clone());
        if let Some(mime_type) = blob.mime_type.as_deref() {
            part = part
                .mime_str(mime_type)
                .map_err(|e| TransportError::network(format!("Invalid media type: {e}")))?;
        }
        form = form.part(name, part);
    }
    Ok(form)
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let ApiRequest {
            method,
            url,
            headers,
            body,
            ..
        } = request;

        let builder = self.http.request(method, &url).headers(headers);
        let builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Query(pairs) => builder.query(&pairs),
            RequestBody::Multipart(parts) => builder.multipart(multipart_form(parts)?),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::network(e.to_string()))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::network(e.to_string()))?
            .to_vec();

        if !status.is_success() {
            return Err(TransportError::from_status(status.as_u16(), body));
        }

        Ok(ApiResponse {
            status: status.as_u16(),
            content_type,
            body,
        })
    }
}

/// Transport decorator that merges authorization headers into every request
pub struct AuthorizedTransport<T> {
    inner: T,
    authorization: Arc<dyn Authorization>,
}

impl<T> AuthorizedTransport<T> {
    pub fn new(inner: T, authorization: Arc<dyn Authorization>) -> Self {
        Self {
            inner,
            authorization,
        }
    }
}

#[async_trait::async_trait]
impl<T: Transport> Transport for AuthorizedTransport<T> {
    async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let auth_headers = self
            .authorization
            .create_auth_headers(&request.method, &request.path);
        request.headers.extend(auth_headers);
        self.inner.send(request).await
    }
}

/// Wrap `inner` so every request carries the headers `authorization` computes
pub fn with_authorization<T: Transport>(
    inner: T,
    authorization: Arc<dyn Authorization>,
) -> AuthorizedTransport<T> {
    AuthorizedTransport::new(inner, authorization)
}
