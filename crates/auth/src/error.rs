//! Authorization errors

use thiserror::Error;

/// Authorization error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authorization token is empty")]
    EmptyToken,

    #[error("Authorization token is not a valid header value")]
    InvalidHeaderValue,
}
