//! Lease wire messages: grant, revoke, keepalive, and time-to-live.

use super::kv::ResponseHeader;
use serde::{Deserialize, Serialize};

/// Lease grant request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaseGrantRequest {
    /// Requested TTL in seconds.
    pub ttl: i64,
    /// Requested lease ID (0 for server-assigned).
    pub id: i64,
}

/// Lease grant response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaseGrantResponse {
    /// Response header.
    pub header: ResponseHeader,
    /// Assigned lease ID.
    pub id: i64,
    /// Granted TTL in seconds.
    pub ttl: i64,
}

/// Lease revoke request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaseRevokeRequest {
    /// Lease ID to revoke.
    pub id: i64,
}

/// Lease revoke response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaseRevokeResponse {
    /// Response header.
    pub header: ResponseHeader,
}

/// Single lease keepalive heartbeat.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaseKeepAliveRequest {
    /// Lease ID to keep alive.
    pub id: i64,
}

/// Keepalive response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaseKeepAliveResponse {
    /// Response header.
    pub header: ResponseHeader,
    /// Lease ID.
    pub id: i64,
    /// TTL after the heartbeat, in seconds.
    pub ttl: i64,
}

/// Lease time-to-live query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaseTimeToLiveRequest {
    /// Lease ID to query.
    pub id: i64,
    /// Include attached keys in the response.
    pub keys: bool,
}

/// Time-to-live response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaseTimeToLiveResponse {
    /// Response header.
    pub header: ResponseHeader,
    /// Lease ID.
    pub id: i64,
    /// Remaining TTL in seconds.
    pub ttl: i64,
    /// Originally granted TTL in seconds.
    pub granted_ttl: i64,
    /// Attached keys (if requested).
    pub keys: Vec<Vec<u8>>,
}
