//! Error Types
//!
//! Two layers of errors:
//!
//! - [`ApiError`] is raised by a [`RemoteApi`](crate::traits::RemoteApi)
//!   collaborator when a remote call fails.
//! - [`ReconcileError`] is the reconciliation taxonomy. `UserNotFound`,
//!   `DeviceNotFound` and `RemoteCallFailed` are per-entry and end up as a
//!   `Failed` outcome; the remaining variants abort the whole run.

use crate::models::DeviceSelector;
use thiserror::Error;

/// Error raised by a remote API collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The bearer token was rejected (HTTP 401/403).
    #[error("authentication failed: {0}")]
    Unauthorized(String),

    /// The addressed resource does not exist (HTTP 404).
    #[error("resource not found: {0}")]
    NotFound(String),

    /// The API throttled the caller (HTTP 429).
    #[error("rate limited (retry after {retry_after_secs:?}s)")]
    RateLimited { retry_after_secs: Option<u64> },

    /// Any other non-success status.
    #[error("API error (HTTP {status}): {message}")]
    Status { status: u16, message: String },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether the error is a 5xx response.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, ApiError::Status { status, .. } if *status >= 500)
    }
}

/// Result alias for remote calls.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Reconciliation error taxonomy.
#[derive(Debug, Clone, Error)]
pub enum ReconcileError {
    /// No user with this email exists in the snapshot.
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// Neither the alternate identifier nor the display name matched a device.
    #[error("device not found: {0}")]
    DeviceNotFound(DeviceSelector),

    /// A mutating remote call failed.
    #[error("{operation} failed: {source}")]
    RemoteCallFailed {
        operation: String,
        #[source]
        source: ApiError,
    },

    /// The configured source group does not exist. Fatal, checked before processing.
    #[error("source group not found: {0}")]
    SourceGroupMissing(String),

    /// Fetching the initial snapshot failed. Fatal.
    #[error("failed to fetch {resource}: {source}")]
    Fetch {
        resource: &'static str,
        #[source]
        source: ApiError,
    },

    /// Destructive work is pending, no force flag was given and nobody can be asked.
    #[error("confirmation required but no interactive terminal is available")]
    ConfirmationUnavailable,
}

impl ReconcileError {
    /// Wrap a collaborator error raised by `operation`.
    pub fn remote(operation: impl Into<String>, source: ApiError) -> Self {
        ReconcileError::RemoteCallFailed {
            operation: operation.into(),
            source,
        }
    }
}

/// Result alias for reconciliation runs.
pub type ReconcileResult<T> = std::result::Result<T, ReconcileError>;
