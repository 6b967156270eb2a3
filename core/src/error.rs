//! Error types for the todo client and synchronizer.
//!
//! # Design
//! `ApiError` covers one remote call: the transport failed, or the server
//! answered with something other than a usable 2xx. `NotFound` gets its own
//! variant so callers can tell "that record is gone" apart from other
//! rejections. `SyncError` wraps `ApiError` and adds the failures that only
//! exist at the synchronizer level.

use thiserror::Error;

use crate::types::TodoId;

/// Errors from building, executing or parsing a single API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, timeout).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),
}

impl ApiError {
    /// HTTP status carried by this error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound => Some(404),
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors returned by `TodoSynchronizer` operations.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A local-only operation referenced an id the store does not hold.
    #[error("no todo with id {0}")]
    UnknownTodo(TodoId),

    /// The worker task has stopped.
    #[error("synchronizer is closed")]
    Closed,
}
