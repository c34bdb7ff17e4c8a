//! Per-request authorization for Builder API calls
//!
//! Header computation is an external capability: callers hand the client an
//! `Authorization` implementation and the transport asks it for headers on
//! every request, keyed by HTTP method and service-relative path.

mod authorization;
mod error;
pub mod mock;

pub use authorization::{Authorization, BearerAuthorization, NoAuthorization};
pub use error::AuthError;
