//! Client facade.
//!
//! Composes the request factory, transaction builder, lease and lock
//! coordinators, and the session into the single entry point callers use.
//! Namespace translation applies to every key-bearing operation (get, put,
//! delete, transaction, lock, watch); lease, auth, user/role, and
//! maintenance calls are namespace-independent. The administrative surface
//! is plain request/response marshaling with deadline and token attachment.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::core::config::ClientConfig;
use crate::core::error::Result;
use crate::kv::{DeleteOptions, GetOptions, PutOptions, RequestFactory};
use crate::lease::{Lease, LeaseCoordinator};
use crate::lock::{LockCoordinator, LockHandle};
use crate::namespace::Namespace;
use crate::rpc::auth::{
    Permission, RoleAddRequest, RoleDeleteRequest, RoleGetRequest, RoleGetResponse,
    RoleGrantPermissionRequest, RoleListRequest, RoleListResponse, RoleRevokePermissionRequest,
    UserAddRequest, UserChangePasswordRequest, UserDeleteRequest, UserGetRequest, UserGetResponse,
    UserGrantRoleRequest, UserListRequest, UserListResponse, UserRevokeRoleRequest,
};
use crate::rpc::kv::{DeleteRangeResponse, PutResponse, RangeResponse};
use crate::rpc::lease::{LeaseKeepAliveResponse, LeaseRevokeResponse, LeaseTimeToLiveResponse};
use crate::rpc::maintenance::{
    AlarmDeactivateRequest, AlarmListRequest, AlarmResponse, StatusRequest, StatusResponse,
    WatchRequest, WatchResponse,
};
use crate::rpc::transport::Transport;
use crate::rpc::txn::TxnResponse;
use crate::session::Session;
use crate::txn::TxnBuilder;

/// Coordination-layer client over a replicated key-value store.
///
/// Cheap to share across threads behind an `Arc`; concurrent callers may
/// issue independent calls in parallel. Session state (the token) is the
/// only shared mutable resource and is serialized internally.
pub struct Client {
    session: Arc<Session>,
    factory: RequestFactory,
    leases: LeaseCoordinator,
    locks: LockCoordinator,
}

impl Client {
    /// Construct a client over the given transport.
    ///
    /// Validates the configuration (a malformed namespace fails here, not
    /// per-call) and authenticates immediately when initial credentials are
    /// configured.
    pub fn connect(transport: Arc<dyn Transport>, config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let namespace = match &config.namespace {
            Some(prefix) => Some(Namespace::new(prefix.as_bytes().to_vec())?),
            None => None,
        };
        let factory = RequestFactory::new(namespace);
        let session = Arc::new(Session::new(transport, config.default_timeout()));

        let client = Self {
            leases: LeaseCoordinator::new(Arc::clone(&session)),
            locks: LockCoordinator::new(Arc::clone(&session), factory.clone()),
            session,
            factory,
        };

        if let Some(auth) = &config.auth {
            client.authenticate(&auth.user, &auth.password, None)?;
        }

        debug!(namespace = ?client.factory.namespace(), "client connected");
        Ok(client)
    }

    /// The configured namespace, if any.
    pub fn namespace(&self) -> Option<&Namespace> {
        self.factory.namespace()
    }

    /// The current identity token, if authenticated.
    pub fn token(&self) -> Option<String> {
        self.session.token()
    }

    /// The user that last authenticated.
    pub fn user(&self) -> Option<String> {
        self.session.user()
    }

    /// The password that last authenticated.
    pub fn password(&self) -> Option<String> {
        self.session.password()
    }

    // ------------------------------------------------------------------
    // Key-value
    // ------------------------------------------------------------------

    /// Range read confined to the namespace.
    pub fn get(&self, key: impl AsRef<[u8]>, opts: GetOptions) -> Result<RangeResponse> {
        let ctx = self.session.context(opts.timeout);
        let req = self.factory.range_request(key.as_ref(), &opts);
        self.session.transport().range(&ctx, req)
    }

    /// Put a key, optionally attached to a lease.
    pub fn put(
        &self,
        key: impl AsRef<[u8]>,
        value: impl AsRef<[u8]>,
        opts: PutOptions,
    ) -> Result<PutResponse> {
        let ctx = self.session.context(opts.timeout);
        let req = self.factory.put_request(key.as_ref(), value.as_ref(), &opts);
        self.session.transport().put(&ctx, req)
    }

    /// Delete one key, or a range when a range end is given.
    pub fn del(&self, key: impl AsRef<[u8]>, opts: DeleteOptions) -> Result<DeleteRangeResponse> {
        let ctx = self.session.context(opts.timeout);
        let req = self.factory.delete_request(key.as_ref(), &opts);
        self.session.transport().delete_range(&ctx, req)
    }

    // ------------------------------------------------------------------
    // Transactions
    // ------------------------------------------------------------------

    /// Execute an atomic compare-and-branch transaction.
    ///
    /// The closure assembles compare clauses and branch operations on a
    /// builder already wired to this client's namespace; the assembled unit
    /// executes atomically server-side and exactly one branch runs.
    pub fn transaction(&self, build: impl FnOnce(&mut TxnBuilder)) -> Result<TxnResponse> {
        self.transaction_opt(None, build)
    }

    /// [`transaction`](Self::transaction) with an explicit timeout.
    pub fn transaction_opt(
        &self,
        timeout: Option<Duration>,
        build: impl FnOnce(&mut TxnBuilder),
    ) -> Result<TxnResponse> {
        let mut builder = TxnBuilder::new(self.factory.clone());
        build(&mut builder);
        let ctx = self.session.context(timeout);
        self.session.transport().txn(&ctx, builder.into_request())
    }

    // ------------------------------------------------------------------
    // Leases
    // ------------------------------------------------------------------

    /// Grant a lease with the given TTL in seconds.
    pub fn lease_grant(&self, ttl_seconds: i64, timeout: Option<Duration>) -> Result<Lease> {
        self.leases.grant(ttl_seconds, timeout)
    }

    /// Revoke a lease, destroying everything attached to it.
    pub fn lease_revoke(
        &self,
        lease_id: i64,
        timeout: Option<Duration>,
    ) -> Result<LeaseRevokeResponse> {
        self.leases.revoke(lease_id, timeout)
    }

    /// Query a lease's remaining time to live.
    pub fn lease_time_to_live(
        &self,
        lease_id: i64,
        keys: bool,
        timeout: Option<Duration>,
    ) -> Result<LeaseTimeToLiveResponse> {
        self.leases.time_to_live(lease_id, keys, timeout)
    }

    /// Issue a single keepalive heartbeat for a lease.
    pub fn lease_keep_alive_once(
        &self,
        lease_id: i64,
        timeout: Option<Duration>,
    ) -> Result<LeaseKeepAliveResponse> {
        self.leases.keep_alive_once(lease_id, timeout)
    }

    // ------------------------------------------------------------------
    // Locks
    // ------------------------------------------------------------------

    /// Acquire the named lock, blocking until held or deadline expiry.
    pub fn lock(
        &self,
        name: impl AsRef<[u8]>,
        lease_id: i64,
        timeout: Option<Duration>,
    ) -> Result<LockHandle> {
        self.locks.lock(name.as_ref(), lease_id, timeout)
    }

    /// Release a lock by the key its acquisition returned.
    pub fn unlock(&self, key: impl AsRef<[u8]>, timeout: Option<Duration>) -> Result<()> {
        self.locks.unlock(key.as_ref(), timeout)
    }

    /// Acquire the named lock, run the block, and release on every exit
    /// path before surfacing the block's outcome.
    pub fn with_lock<T>(
        &self,
        name: impl AsRef<[u8]>,
        lease_id: i64,
        timeout: Option<Duration>,
        f: impl FnOnce(&LockHandle) -> Result<T>,
    ) -> Result<T> {
        self.locks.with_lock(name.as_ref(), lease_id, timeout, f)
    }

    // ------------------------------------------------------------------
    // Authentication
    // ------------------------------------------------------------------

    /// Authenticate, storing the identity token for subsequent calls.
    pub fn authenticate(
        &self,
        user: &str,
        password: &str,
        timeout: Option<Duration>,
    ) -> Result<()> {
        self.session.authenticate(user, password, timeout)
    }

    /// Refresh the identity token using the stored credentials.
    pub fn reauthenticate(&self, timeout: Option<Duration>) -> Result<()> {
        self.session.reauthenticate(timeout)
    }

    /// Enable authentication enforcement.
    pub fn auth_enable(&self, timeout: Option<Duration>) -> Result<()> {
        self.session.auth_enable(timeout)
    }

    /// Disable authentication enforcement, invalidating the stored token.
    pub fn auth_disable(&self, timeout: Option<Duration>) -> Result<()> {
        self.session.auth_disable(timeout)
    }

    // ------------------------------------------------------------------
    // User administration (pass-through)
    // ------------------------------------------------------------------

    pub fn user_add(&self, name: &str, password: &str, timeout: Option<Duration>) -> Result<()> {
        let ctx = self.session.context(timeout);
        self.session
            .transport()
            .user_add(
                &ctx,
                UserAddRequest {
                    name: name.to_string(),
                    password: password.to_string(),
                },
            )
            .map(|_| ())
    }

    pub fn user_get(&self, name: &str, timeout: Option<Duration>) -> Result<UserGetResponse> {
        let ctx = self.session.context(timeout);
        self.session.transport().user_get(
            &ctx,
            UserGetRequest {
                name: name.to_string(),
            },
        )
    }

    pub fn user_delete(&self, name: &str, timeout: Option<Duration>) -> Result<()> {
        let ctx = self.session.context(timeout);
        self.session
            .transport()
            .user_delete(
                &ctx,
                UserDeleteRequest {
                    name: name.to_string(),
                },
            )
            .map(|_| ())
    }

    pub fn user_change_password(
        &self,
        name: &str,
        new_password: &str,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let ctx = self.session.context(timeout);
        self.session
            .transport()
            .user_change_password(
                &ctx,
                UserChangePasswordRequest {
                    name: name.to_string(),
                    password: new_password.to_string(),
                },
            )
            .map(|_| ())
    }

    pub fn user_list(&self, timeout: Option<Duration>) -> Result<UserListResponse> {
        let ctx = self.session.context(timeout);
        self.session.transport().user_list(&ctx, UserListRequest {})
    }

    pub fn user_grant_role(
        &self,
        user: &str,
        role: &str,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let ctx = self.session.context(timeout);
        self.session
            .transport()
            .user_grant_role(
                &ctx,
                UserGrantRoleRequest {
                    user: user.to_string(),
                    role: role.to_string(),
                },
            )
            .map(|_| ())
    }

    pub fn user_revoke_role(
        &self,
        user: &str,
        role: &str,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let ctx = self.session.context(timeout);
        self.session
            .transport()
            .user_revoke_role(
                &ctx,
                UserRevokeRoleRequest {
                    user: user.to_string(),
                    role: role.to_string(),
                },
            )
            .map(|_| ())
    }

    // ------------------------------------------------------------------
    // Role administration (pass-through)
    // ------------------------------------------------------------------

    pub fn role_add(&self, name: &str, timeout: Option<Duration>) -> Result<()> {
        let ctx = self.session.context(timeout);
        self.session
            .transport()
            .role_add(
                &ctx,
                RoleAddRequest {
                    name: name.to_string(),
                },
            )
            .map(|_| ())
    }

    pub fn role_get(&self, name: &str, timeout: Option<Duration>) -> Result<RoleGetResponse> {
        let ctx = self.session.context(timeout);
        self.session.transport().role_get(
            &ctx,
            RoleGetRequest {
                name: name.to_string(),
            },
        )
    }

    pub fn role_delete(&self, name: &str, timeout: Option<Duration>) -> Result<()> {
        let ctx = self.session.context(timeout);
        self.session
            .transport()
            .role_delete(
                &ctx,
                RoleDeleteRequest {
                    name: name.to_string(),
                },
            )
            .map(|_| ())
    }

    pub fn role_list(&self, timeout: Option<Duration>) -> Result<RoleListResponse> {
        let ctx = self.session.context(timeout);
        self.session.transport().role_list(&ctx, RoleListRequest {})
    }

    pub fn role_grant_permission(
        &self,
        role: &str,
        permission: Permission,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let ctx = self.session.context(timeout);
        self.session
            .transport()
            .role_grant_permission(
                &ctx,
                RoleGrantPermissionRequest {
                    role: role.to_string(),
                    permission,
                },
            )
            .map(|_| ())
    }

    pub fn role_revoke_permission(
        &self,
        role: &str,
        key: impl Into<Vec<u8>>,
        range_end: impl Into<Vec<u8>>,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let ctx = self.session.context(timeout);
        self.session
            .transport()
            .role_revoke_permission(
                &ctx,
                RoleRevokePermissionRequest {
                    role: role.to_string(),
                    key: key.into(),
                    range_end: range_end.into(),
                },
            )
            .map(|_| ())
    }

    // ------------------------------------------------------------------
    // Maintenance (pass-through)
    // ------------------------------------------------------------------

    /// Server status: version, database size, current leader.
    pub fn status(&self, timeout: Option<Duration>) -> Result<StatusResponse> {
        let ctx = self.session.context(timeout);
        self.session.transport().status(&ctx, StatusRequest {})
    }

    /// List active alarms.
    pub fn alarm_list(&self, timeout: Option<Duration>) -> Result<AlarmResponse> {
        let ctx = self.session.context(timeout);
        self.session.transport().alarm_list(&ctx, AlarmListRequest {})
    }

    /// Deactivate all active alarms.
    pub fn alarm_deactivate(&self, timeout: Option<Duration>) -> Result<AlarmResponse> {
        let ctx = self.session.context(timeout);
        self.session
            .transport()
            .alarm_deactivate(&ctx, AlarmDeactivateRequest {})
    }

    // ------------------------------------------------------------------
    // Watch (pass-through)
    // ------------------------------------------------------------------

    /// Observe events for a namespaced key at or after a revision,
    /// blocking until at least one exists or the deadline passes.
    pub fn watch(
        &self,
        key: impl AsRef<[u8]>,
        start_revision: i64,
        timeout: Option<Duration>,
    ) -> Result<WatchResponse> {
        let ctx = self.session.context(timeout);
        self.session.transport().watch(
            &ctx,
            WatchRequest {
                key: self.factory.key(key.as_ref()),
                start_revision,
            },
        )
    }
}
