//! Shared configuration and storage URL derivation for the Builder client
//!
//! This crate provides common functionality used across the workspace:
//! - Configuration management following 12-factor principles
//! - Pure derivation of content, asset pack and project media URLs

pub mod config;
pub mod urls;

pub use config::{Config, ConfigError};
pub use urls::StorageUrls;
