//! Lease lifecycle coordination.
//!
//! Grant, revoke, time-to-live, and single-heartbeat keepalive over the
//! transport. Every operation is a deadline-bounded call; failures surface
//! verbatim and nothing retries internally. Keep-alive scheduling belongs to
//! the caller or an external heartbeat loop: swallowing a failed heartbeat
//! here could mask lease loss that lock semantics depend on.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::core::error::Result;
use crate::rpc::lease::{
    LeaseGrantRequest, LeaseGrantResponse, LeaseKeepAliveRequest, LeaseKeepAliveResponse,
    LeaseRevokeRequest, LeaseRevokeResponse, LeaseTimeToLiveRequest, LeaseTimeToLiveResponse,
};
use crate::session::Session;

/// A granted lease.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lease {
    /// Server-assigned lease ID.
    pub id: i64,
    /// Granted TTL in seconds.
    pub ttl: i64,
}

/// Coordinates the lease lifecycle. Namespace-independent.
pub struct LeaseCoordinator {
    session: Arc<Session>,
}

impl LeaseCoordinator {
    pub(crate) fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Grant a lease with the given TTL in seconds.
    pub fn grant(&self, ttl_seconds: i64, timeout: Option<Duration>) -> Result<Lease> {
        let ctx = self.session.context(timeout);
        let resp: LeaseGrantResponse = self.session.transport().lease_grant(
            &ctx,
            LeaseGrantRequest {
                ttl: ttl_seconds,
                id: 0,
            },
        )?;
        debug!(lease_id = resp.id, ttl = resp.ttl, "lease granted");
        Ok(Lease {
            id: resp.id,
            ttl: resp.ttl,
        })
    }

    /// Revoke a lease, destroying it and every key attached to it.
    pub fn revoke(&self, lease_id: i64, timeout: Option<Duration>) -> Result<LeaseRevokeResponse> {
        let ctx = self.session.context(timeout);
        let resp = self
            .session
            .transport()
            .lease_revoke(&ctx, LeaseRevokeRequest { id: lease_id })?;
        debug!(lease_id, "lease revoked");
        Ok(resp)
    }

    /// Query a lease's remaining time to live.
    pub fn time_to_live(
        &self,
        lease_id: i64,
        keys: bool,
        timeout: Option<Duration>,
    ) -> Result<LeaseTimeToLiveResponse> {
        let ctx = self.session.context(timeout);
        self.session
            .transport()
            .lease_time_to_live(&ctx, LeaseTimeToLiveRequest { id: lease_id, keys })
    }

    /// Issue a single heartbeat, extending the lease back to its full TTL.
    pub fn keep_alive_once(
        &self,
        lease_id: i64,
        timeout: Option<Duration>,
    ) -> Result<LeaseKeepAliveResponse> {
        let ctx = self.session.context(timeout);
        self.session
            .transport()
            .lease_keep_alive(&ctx, LeaseKeepAliveRequest { id: lease_id })
    }
}
