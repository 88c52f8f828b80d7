//! The transport seam.
//!
//! A [`Transport`] performs one request/response exchange per call, bounded
//! by the context deadline. The trait is the boundary to the remote store:
//! implementations own connection handling and must raise
//! [`Error::DeadlineExceeded`](crate::Error::DeadlineExceeded) when the
//! deadline passes before a response arrives, including when the deadline is
//! already expired on entry. Connection-level failures surface as
//! [`Error::Transport`](crate::Error::Transport), unmodified and unretried.

use crate::core::deadline::Deadline;
use crate::core::error::Result;
use crate::rpc::auth::*;
use crate::rpc::kv::*;
use crate::rpc::lease::*;
use crate::rpc::lock::*;
use crate::rpc::maintenance::*;
use crate::rpc::txn::*;

/// Per-call context attached to every outgoing request.
#[derive(Debug, Clone)]
pub struct CallContext {
    /// Deadline by which the call must complete.
    pub deadline: Deadline,
    /// Identity token, when a session has authenticated.
    pub token: Option<String>,
}

impl CallContext {
    /// Create a context with the given deadline and no token.
    pub fn new(deadline: Deadline) -> Self {
        Self {
            deadline,
            token: None,
        }
    }

    /// Attach an identity token.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }
}

/// Request/response call surface of the remote store.
///
/// Every method is synchronous and deadline-bounded. The lock acquire is the
/// only inherently long-running call; it blocks until acquisition or
/// deadline expiry.
pub trait Transport: Send + Sync {
    // Key-value
    fn range(&self, ctx: &CallContext, req: RangeRequest) -> Result<RangeResponse>;
    fn put(&self, ctx: &CallContext, req: PutRequest) -> Result<PutResponse>;
    fn delete_range(&self, ctx: &CallContext, req: DeleteRangeRequest)
        -> Result<DeleteRangeResponse>;
    fn txn(&self, ctx: &CallContext, req: TxnRequest) -> Result<TxnResponse>;

    // Leases
    fn lease_grant(&self, ctx: &CallContext, req: LeaseGrantRequest) -> Result<LeaseGrantResponse>;
    fn lease_revoke(&self, ctx: &CallContext, req: LeaseRevokeRequest)
        -> Result<LeaseRevokeResponse>;
    fn lease_keep_alive(
        &self,
        ctx: &CallContext,
        req: LeaseKeepAliveRequest,
    ) -> Result<LeaseKeepAliveResponse>;
    fn lease_time_to_live(
        &self,
        ctx: &CallContext,
        req: LeaseTimeToLiveRequest,
    ) -> Result<LeaseTimeToLiveResponse>;

    // Locks
    fn lock(&self, ctx: &CallContext, req: LockRequest) -> Result<LockResponse>;
    fn unlock(&self, ctx: &CallContext, req: UnlockRequest) -> Result<UnlockResponse>;

    // Authentication
    fn authenticate(
        &self,
        ctx: &CallContext,
        req: AuthenticateRequest,
    ) -> Result<AuthenticateResponse>;
    fn auth_enable(&self, ctx: &CallContext, req: AuthEnableRequest) -> Result<AuthEnableResponse>;
    fn auth_disable(
        &self,
        ctx: &CallContext,
        req: AuthDisableRequest,
    ) -> Result<AuthDisableResponse>;

    // User administration
    fn user_add(&self, ctx: &CallContext, req: UserAddRequest) -> Result<AuthAdminResponse>;
    fn user_get(&self, ctx: &CallContext, req: UserGetRequest) -> Result<UserGetResponse>;
    fn user_delete(&self, ctx: &CallContext, req: UserDeleteRequest) -> Result<AuthAdminResponse>;
    fn user_change_password(
        &self,
        ctx: &CallContext,
        req: UserChangePasswordRequest,
    ) -> Result<AuthAdminResponse>;
    fn user_list(&self, ctx: &CallContext, req: UserListRequest) -> Result<UserListResponse>;
    fn user_grant_role(
        &self,
        ctx: &CallContext,
        req: UserGrantRoleRequest,
    ) -> Result<AuthAdminResponse>;
    fn user_revoke_role(
        &self,
        ctx: &CallContext,
        req: UserRevokeRoleRequest,
    ) -> Result<AuthAdminResponse>;

    // Role administration
    fn role_add(&self, ctx: &CallContext, req: RoleAddRequest) -> Result<AuthAdminResponse>;
    fn role_get(&self, ctx: &CallContext, req: RoleGetRequest) -> Result<RoleGetResponse>;
    fn role_delete(&self, ctx: &CallContext, req: RoleDeleteRequest) -> Result<AuthAdminResponse>;
    fn role_list(&self, ctx: &CallContext, req: RoleListRequest) -> Result<RoleListResponse>;
    fn role_grant_permission(
        &self,
        ctx: &CallContext,
        req: RoleGrantPermissionRequest,
    ) -> Result<AuthAdminResponse>;
    fn role_revoke_permission(
        &self,
        ctx: &CallContext,
        req: RoleRevokePermissionRequest,
    ) -> Result<AuthAdminResponse>;

    // Maintenance
    fn status(&self, ctx: &CallContext, req: StatusRequest) -> Result<StatusResponse>;
    fn alarm_list(&self, ctx: &CallContext, req: AlarmListRequest) -> Result<AlarmResponse>;
    fn alarm_deactivate(
        &self,
        ctx: &CallContext,
        req: AlarmDeactivateRequest,
    ) -> Result<AlarmResponse>;

    // Watch
    fn watch(&self, ctx: &CallContext, req: WatchRequest) -> Result<WatchResponse>;
}
