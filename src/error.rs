//! Error types for the Ipregistry client

use serde::Deserialize;
use thiserror::Error;

/// Result type alias for Ipregistry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the library
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Structured rejection returned by the Ipregistry API.
///
/// Carried on non-success HTTP statuses. `code` is the machine-readable
/// identifier, for example `INVALID_IP_ADDRESS` or `INVALID_ASN`.
#[derive(Debug, Error, Clone, Deserialize)]
#[error("API error {code}: {message}")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable description of what went wrong
    #[serde(default)]
    pub message: String,

    /// Suggested fix reported by the service
    #[serde(default)]
    pub resolution: String,
}

/// Client-side failures: the request never produced a usable response
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Client(ClientError::Network(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Client(ClientError::Decode(err))
    }
}
