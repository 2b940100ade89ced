//! Response envelope, credit metadata, and batch elements

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ApiError;

/// Metadata and payload for one API call
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    /// Credit accounting reported by the service
    pub credits: ApiResponseCredits,

    /// Throttling counters, absent when the server sent none
    pub throttling: Option<ApiResponseThrottling>,

    /// The decoded payload
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Envelope for data served without a network call: zero credits
    /// consumed, nothing fresh known about throttling.
    pub(crate) fn cached(data: T) -> Self {
        Self {
            credits: ApiResponseCredits {
                consumed: Some(0),
                remaining: None,
            },
            throttling: None,
            data,
        }
    }
}

/// Credit accounting for one call.
///
/// Values mirror the response headers; a header the server did not send
/// (or sent unparseable) stays `None`, which is distinct from zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiResponseCredits {
    /// Credits the call consumed. `Some(0)` when data came from the cache.
    pub consumed: Option<u64>,

    /// Credits left on the account
    pub remaining: Option<u64>,
}

/// Server-side throttling counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiResponseThrottling {
    /// Requests allowed in the current window
    pub limit: Option<u64>,

    /// Requests left in the current window
    pub remaining: Option<u64>,

    /// Seconds until the window resets
    pub reset: Option<u64>,
}

/// One element of a batch response: a record, or the error that kept the
/// service from producing one.
///
/// Untagged decoding tries variants in declaration order, so the error
/// variant must stay first. An object carrying `code` is always an error;
/// records never have that field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LookupResult<T> {
    Error(LookupError),
    Record(T),
}

impl<T> LookupResult<T> {
    /// The record, if this element succeeded.
    pub fn record(&self) -> Option<&T> {
        match self {
            LookupResult::Record(record) => Some(record),
            LookupResult::Error(_) => None,
        }
    }

    /// The error, if this element failed.
    pub fn error(&self) -> Option<&LookupError> {
        match self {
            LookupResult::Error(err) => Some(err),
            LookupResult::Record(_) => None,
        }
    }

    pub fn is_record(&self) -> bool {
        matches!(self, LookupResult::Record(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LookupResult::Error(_))
    }
}

/// Per-target failure inside an otherwise successful batch response.
///
/// This is data, not a call failure: the surrounding call succeeds and the
/// sentinel occupies the failed target's slot in the result sequence.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct LookupError {
    /// Machine-readable error code, for example `INVALID_IP_ADDRESS`
    pub code: String,

    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub resolution: String,
}

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        ApiError {
            code: err.code,
            message: err.message,
            resolution: err.resolution,
        }
    }
}
