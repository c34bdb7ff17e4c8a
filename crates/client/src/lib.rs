//! Builder API Client
//!
//! Talks to the Builder server on behalf of the editor:
//! - Wire/domain translation for projects, pools, asset packs, items, collections and curations
//! - Authorized HTTP transport built by wrapping a base transport with an `Authorization`
//! - Content fetching with per-batch request deduplication
//! - Mock transport with scripted replies and request recording for tests

pub mod client;
pub mod inflight;
pub mod migrations;
pub mod mock;
pub mod translate;
pub mod transport;
pub mod wire;

use builder_common::ConfigError;
use thiserror::Error;

pub use client::{BuilderClient, MediaShots, PublishedCollection, ThirdPartyPublication};
pub use inflight::InflightRequests;
pub use migrations::{ManifestMigrations, NoMigrations};
pub use translate::{FromRemote, ToRemote};
pub use transport::{
    with_authorization, ApiRequest, ApiResponse, AuthorizedTransport, FormPart, HttpTransport,
    RequestBody, Transport, TransportError,
};

pub type Result<T> = std::result::Result<T, BuilderError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// Network or HTTP failure. The message is the server-supplied error text
    /// when the response carried one.
    #[error("{message}")]
    Transport { status: Option<u16>, message: String },

    #[error("Invalid thumbnail")]
    InvalidThumbnail,

    #[error("Builder response error: {0}")]
    Decode(String),

    #[error("Builder configuration error: {0}")]
    Configuration(String),
}

impl BuilderError {
    /// HTTP status of a transport failure, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            BuilderError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<ConfigError> for BuilderError {
    fn from(err: ConfigError) -> Self {
        BuilderError::Configuration(err.to_string())
    }
}

impl From<serde_json::Error> for BuilderError {
    fn from(err: serde_json::Error) -> Self {
        BuilderError::Decode(err.to_string())
    }
}
