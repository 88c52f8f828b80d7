//! Error types and RPC status-code mapping.
//!
//! Tether distinguishes four failure classes the caller can branch on:
//! deadline expiry, precondition failures, configuration errors detected at
//! client construction, and transport-level failures surfaced unmodified.
//! Nothing in this crate swallows or retries a failure; retry policy belongs
//! to the caller or an external scheduler.

use thiserror::Error;

/// Failure conditions surfaced by the coordination layer.
#[derive(Debug, Error)]
pub enum Error {
    /// The call did not complete within its effective deadline.
    ///
    /// Raised for expired per-call budgets, including a budget of zero,
    /// and for lock acquisitions that time out while waiting.
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// The operation is invalid given current server state.
    ///
    /// Example: `authenticate` while authentication is disabled.
    #[error("failed precondition: {message}")]
    FailedPrecondition { message: String },

    /// The configured namespace cannot produce a valid key range.
    ///
    /// Detected once at construction, never per-call.
    #[error("invalid namespace: {reason}")]
    InvalidNamespace { reason: String },

    /// Lease not found.
    #[error("lease {lease_id} not found")]
    LeaseNotFound { lease_id: i64 },

    /// The call required a valid identity token and none was accepted.
    #[error("unauthenticated: {message}")]
    Unauthenticated { message: String },

    /// The authenticated identity may not perform this operation.
    #[error("permission denied: {message}")]
    PermissionDenied { message: String },

    /// The request is malformed (unknown sort symbol, bad field value).
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    /// Connection-level failure reported by the transport, unmodified.
    #[error("transport error: {message}")]
    Transport { message: String },
}

impl Error {
    /// Create a precondition failure.
    pub fn failed_precondition(message: impl Into<String>) -> Self {
        Self::FailedPrecondition {
            message: message.into(),
        }
    }

    /// Create an invalid-request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create an unauthenticated error.
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            message: message.into(),
        }
    }

    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Check whether this failure is a deadline expiry.
    pub fn is_deadline_exceeded(&self) -> bool {
        matches!(self, Self::DeadlineExceeded)
    }

    /// Map this error to its RPC status code.
    pub fn code(&self) -> RpcCode {
        match self {
            Self::DeadlineExceeded => RpcCode::DeadlineExceeded,
            Self::FailedPrecondition { .. } => RpcCode::FailedPrecondition,
            Self::InvalidNamespace { .. } => RpcCode::InvalidArgument,
            Self::LeaseNotFound { .. } => RpcCode::NotFound,
            Self::Unauthenticated { .. } => RpcCode::Unauthenticated,
            Self::PermissionDenied { .. } => RpcCode::PermissionDenied,
            Self::InvalidRequest { .. } => RpcCode::InvalidArgument,
            Self::Transport { .. } => RpcCode::Unavailable,
        }
    }
}

/// Result type using the crate error.
pub type Result<T> = std::result::Result<T, Error>;

/// RPC status codes used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcCode {
    Ok = 0,
    Cancelled = 1,
    Unknown = 2,
    InvalidArgument = 3,
    DeadlineExceeded = 4,
    NotFound = 5,
    AlreadyExists = 6,
    PermissionDenied = 7,
    ResourceExhausted = 8,
    FailedPrecondition = 9,
    Aborted = 10,
    OutOfRange = 11,
    Unimplemented = 12,
    Internal = 13,
    Unavailable = 14,
    DataLoss = 15,
    Unauthenticated = 16,
}
