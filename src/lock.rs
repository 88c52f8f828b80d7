//! Namespace-scoped distributed mutual exclusion, backed by leases.
//!
//! Acquiring a lock creates a key under the namespaced lock name, attached
//! to the caller's lease; the key vanishes with the lease, so a crashed
//! holder cannot wedge the lock. Acquisition blocks until the name is free
//! or the call deadline passes. Exclusivity is per namespaced name: the same
//! logical name under two different namespaces never contends.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::core::error::Result;
use crate::kv::RequestFactory;
use crate::rpc::lock::{LockRequest, UnlockRequest};
use crate::session::Session;

/// Proof of a held lock.
///
/// `key` is the fully namespaced lock key actually created, including the
/// server-generated suffix distinguishing this acquisition. It is valid only
/// while the backing lease is live, and must be presented verbatim to
/// release the lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockHandle {
    /// The lock key created for this acquisition.
    pub key: Vec<u8>,
    /// The lease backing the lock.
    pub lease_id: i64,
}

/// Coordinates lock acquisition and release within the namespace.
pub struct LockCoordinator {
    session: Arc<Session>,
    factory: RequestFactory,
}

impl LockCoordinator {
    pub(crate) fn new(session: Arc<Session>, factory: RequestFactory) -> Self {
        Self { session, factory }
    }

    /// Acquire the named lock, blocking until it is held or the deadline
    /// passes (deadline-exceeded).
    pub fn lock(
        &self,
        name: &[u8],
        lease_id: i64,
        timeout: Option<Duration>,
    ) -> Result<LockHandle> {
        let scoped_name = self.factory.key(name);
        let ctx = self.session.context(timeout);
        let resp = self.session.transport().lock(
            &ctx,
            LockRequest {
                name: scoped_name,
                lease: lease_id,
            },
        )?;
        debug!(
            key = %String::from_utf8_lossy(&resp.key),
            lease_id,
            "lock acquired"
        );
        Ok(LockHandle {
            key: resp.key,
            lease_id,
        })
    }

    /// Release a previously acquired lock.
    pub fn unlock(&self, key: &[u8], timeout: Option<Duration>) -> Result<()> {
        let ctx = self.session.context(timeout);
        self.session
            .transport()
            .unlock(&ctx, UnlockRequest { key: key.to_vec() })?;
        debug!(key = %String::from_utf8_lossy(key), "lock released");
        Ok(())
    }

    /// Scoped acquisition: acquire, run the block, release on every exit
    /// path, then surface the block's outcome.
    ///
    /// The release after a completed block is explicit so its errors
    /// propagate; a drop guard covers unwinds out of the block.
    pub fn with_lock<T>(
        &self,
        name: &[u8],
        lease_id: i64,
        timeout: Option<Duration>,
        f: impl FnOnce(&LockHandle) -> Result<T>,
    ) -> Result<T> {
        let handle = self.lock(name, lease_id, timeout)?;
        let mut guard = ReleaseGuard {
            coordinator: self,
            key: &handle.key,
            armed: true,
        };

        let outcome = f(&handle);

        guard.armed = false;
        self.unlock(&handle.key, None)?;
        outcome
    }
}

/// Unwind-only release backstop for [`LockCoordinator::with_lock`].
struct ReleaseGuard<'a> {
    coordinator: &'a LockCoordinator,
    key: &'a [u8],
    armed: bool,
}

impl Drop for ReleaseGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            // Runs only when the block unwound; the lease still reclaims
            // the lock if this release cannot reach the store.
            let _ = self.coordinator.unlock(self.key, None);
        }
    }
}
