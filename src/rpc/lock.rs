//! Lock wire messages: blocking acquire and release.

use super::kv::ResponseHeader;
use serde::{Deserialize, Serialize};

/// Lock acquire request.
///
/// Blocks server-side until the named lock can be held or the call deadline
/// passes. The name is already namespace-translated by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LockRequest {
    /// Lock name; holders of the same name exclude each other.
    pub name: Vec<u8>,
    /// Lease backing the lock; its expiry or revocation releases the lock.
    pub lease: i64,
}

/// Lock acquire response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LockResponse {
    /// Response header.
    pub header: ResponseHeader,
    /// The lock key actually created, with the server-generated suffix.
    ///
    /// The key identifies this acquisition and must be presented verbatim
    /// to release it.
    pub key: Vec<u8>,
}

/// Lock release request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnlockRequest {
    /// The key returned by the acquire that is being released.
    pub key: Vec<u8>,
}

/// Lock release response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnlockResponse {
    /// Response header.
    pub header: ResponseHeader,
}
