//! In-memory reference store.
//!
//! [`MemoryStore`] implements the full [`Transport`] surface with remote
//! store semantics: MVCC revision bookkeeping, atomic compare-and-branch
//! transactions, lease expiry with cascade deletion, blocking lock
//! acquisition, token-based authentication, and watchable key events. The
//! test-suite runs against it; embedders can use it as a process-local
//! backend.
//!
//! Every entry point enforces the call deadline: a call whose deadline has
//! already passed fails with deadline-exceeded before any work, and the
//! blocking calls (lock, watch) wait no longer than the deadline allows.

pub mod auth;
pub mod compare;
pub mod leases;
pub mod state;

use std::sync::Arc;
use std::time::Instant;

use parking_lot::{Condvar, Mutex, MutexGuard};
use tracing::trace;

use crate::core::error::{Error, Result};
use crate::rpc::auth::*;
use crate::rpc::kv::*;
use crate::rpc::lease::*;
use crate::rpc::lock::*;
use crate::rpc::maintenance::*;
use crate::rpc::transport::{CallContext, Transport};
use crate::rpc::txn::*;

use auth::AuthState;
use leases::LeaseTable;
use state::{KvState, Span};

const CLUSTER_ID: u64 = 0xcafe;
const MEMBER_ID: u64 = 1;

/// A currently held lock.
#[derive(Debug, Clone)]
struct LockHolder {
    key: Vec<u8>,
    lease: i64,
}

#[derive(Default)]
struct StoreInner {
    kv: KvState,
    leases: LeaseTable,
    locks: std::collections::HashMap<Vec<u8>, LockHolder>,
    auth: AuthState,
    alarms: Vec<AlarmMember>,
}

/// In-memory store speaking the transport protocol.
pub struct MemoryStore {
    inner: Mutex<StoreInner>,
    wakeup: Condvar,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                kv: KvState::new(),
                leases: LeaseTable::new(),
                locks: std::collections::HashMap::new(),
                auth: AuthState::new(),
                alarms: Vec::new(),
            }),
            wakeup: Condvar::new(),
        }
    }

    /// A store ready to share between clients.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Admit a call: reject expired deadlines, expire due leases, and
    /// enforce token auth. `authenticate` itself uses [`Self::admit_open`].
    fn admit(&self, ctx: &CallContext) -> Result<MutexGuard<'_, StoreInner>> {
        let inner = self.admit_open(ctx)?;
        inner.auth.check_token(ctx.token.as_deref())?;
        Ok(inner)
    }

    /// Admit without the token check.
    fn admit_open(&self, ctx: &CallContext) -> Result<MutexGuard<'_, StoreInner>> {
        if ctx.deadline.expired() {
            return Err(Error::DeadlineExceeded);
        }
        let mut inner = self.inner.lock();
        if self.expire_leases(&mut inner) {
            self.wakeup.notify_all();
        }
        Ok(inner)
    }

    /// Remove expired leases and everything attached to them.
    ///
    /// Returns true when a lock holder was removed, so waiters get woken.
    fn expire_leases(&self, inner: &mut StoreInner) -> bool {
        let now = Instant::now();
        let expired = inner.leases.purge_expired(now);
        if expired.is_empty() {
            return false;
        }

        let mut released_lock = false;
        for lease in expired {
            trace!(lease_id = lease.id, "lease expired");
            for key in &lease.attached_keys {
                let revision = inner.kv.next_revision();
                inner.kv.delete_range(key, Span::Single, revision);
            }
            let before = inner.locks.len();
            inner.locks.retain(|_, holder| holder.lease != lease.id);
            released_lock |= inner.locks.len() != before;
        }
        released_lock
    }

    fn header(inner: &StoreInner) -> ResponseHeader {
        ResponseHeader {
            cluster_id: CLUSTER_ID,
            member_id: MEMBER_ID,
            revision: inner.kv.revision(),
        }
    }

    /// Validate a branch operation before anything mutates, so a rejected
    /// operation cannot leave a branch half-applied.
    fn validate_op(inner: &StoreInner, op: &RequestOp) -> Result<()> {
        match op {
            RequestOp::Put(req) if req.lease != 0 && !inner.leases.exists(req.lease) => {
                Err(Error::LeaseNotFound {
                    lease_id: req.lease,
                })
            }
            RequestOp::Range(req) => {
                SortOrder::from_wire(req.sort_order)?;
                SortTarget::from_wire(req.sort_target)?;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Apply one branch operation at the transaction's revision fence.
    fn apply_op(inner: &mut StoreInner, op: &RequestOp, revision: i64) -> Result<ResponseOp> {
        match op {
            RequestOp::Range(req) => {
                let resp = Self::eval_range(inner, req)?;
                Ok(ResponseOp::Range(resp))
            }
            RequestOp::Put(req) => {
                let prev = Self::apply_put(inner, req, revision)?;
                Ok(ResponseOp::Put(PutResponse {
                    header: Self::header(inner),
                    prev_kv: prev,
                }))
            }
            RequestOp::DeleteRange(req) => {
                let removed = Self::apply_delete(inner, req, revision);
                Ok(ResponseOp::DeleteRange(DeleteRangeResponse {
                    header: Self::header(inner),
                    deleted: removed.deleted,
                    prev_kvs: removed.prev_kvs,
                }))
            }
        }
    }

    fn apply_put(
        inner: &mut StoreInner,
        req: &PutRequest,
        revision: i64,
    ) -> Result<Option<KeyValue>> {
        if req.lease != 0 && !inner.leases.exists(req.lease) {
            return Err(Error::LeaseNotFound {
                lease_id: req.lease,
            });
        }

        let prev = inner
            .kv
            .put(req.key.clone(), req.value.clone(), revision, req.lease);

        // Lease attachment follows the record: a put with a different lease
        // (or none) detaches the previous one.
        if let Some(prev) = &prev {
            if prev.lease != 0 && prev.lease != req.lease {
                inner.leases.detach_key(prev.lease, &req.key);
            }
        }
        if req.lease != 0 {
            inner.leases.attach_key(req.lease, req.key.clone());
        }

        Ok(prev.filter(|_| req.prev_kv).map(|r| r.to_key_value()))
    }

    fn apply_delete(inner: &mut StoreInner, req: &DeleteRangeRequest, revision: i64) -> Deleted {
        let span = Span::from_range_end(&req.range_end);
        let removed = inner.kv.delete_range(&req.key, span, revision);
        for record in &removed {
            if record.lease != 0 {
                inner.leases.detach_key(record.lease, &record.key);
            }
        }
        Deleted {
            deleted: removed.len() as i64,
            prev_kvs: if req.prev_kv {
                removed.iter().map(|r| r.to_key_value()).collect()
            } else {
                Vec::new()
            },
        }
    }

    fn eval_range(inner: &StoreInner, req: &RangeRequest) -> Result<RangeResponse> {
        // Unknown wire codes fail fast rather than defaulting.
        let order = SortOrder::from_wire(req.sort_order)?;
        let target = SortTarget::from_wire(req.sort_target)?;

        let span = Span::from_range_end(&req.range_end);
        let mut kvs: Vec<KeyValue> = inner
            .kv
            .range(&req.key, span)
            .into_iter()
            .map(|r| r.to_key_value())
            .collect();

        if order != SortOrder::None {
            kvs.sort_by(|a, b| {
                let ordering = match target {
                    SortTarget::Key => a.key.cmp(&b.key),
                    SortTarget::Version => a.version.cmp(&b.version),
                    SortTarget::Create => a.create_revision.cmp(&b.create_revision),
                    SortTarget::Mod => a.mod_revision.cmp(&b.mod_revision),
                    SortTarget::Value => a.value.cmp(&b.value),
                };
                match order {
                    SortOrder::Descend => ordering.reverse(),
                    _ => ordering,
                }
            });
        }

        let count = kvs.len() as i64;
        let mut more = false;
        if req.limit > 0 && kvs.len() > req.limit as usize {
            kvs.truncate(req.limit as usize);
            more = true;
        }
        if req.keys_only {
            for kv in &mut kvs {
                kv.value.clear();
            }
        }
        if req.count_only {
            kvs.clear();
        }

        Ok(RangeResponse {
            header: Self::header(inner),
            kvs,
            more,
            count,
        })
    }
}

struct Deleted {
    deleted: i64,
    prev_kvs: Vec<KeyValue>,
}

impl Transport for MemoryStore {
    fn range(&self, ctx: &CallContext, req: RangeRequest) -> Result<RangeResponse> {
        let inner = self.admit(ctx)?;
        Self::eval_range(&inner, &req)
    }

    fn put(&self, ctx: &CallContext, req: PutRequest) -> Result<PutResponse> {
        let mut inner = self.admit(ctx)?;
        if req.lease != 0 && !inner.leases.exists(req.lease) {
            return Err(Error::LeaseNotFound {
                lease_id: req.lease,
            });
        }
        let revision = inner.kv.next_revision();
        let prev_kv = Self::apply_put(&mut inner, &req, revision)?;
        self.wakeup.notify_all();
        Ok(PutResponse {
            header: Self::header(&inner),
            prev_kv,
        })
    }

    fn delete_range(
        &self,
        ctx: &CallContext,
        req: DeleteRangeRequest,
    ) -> Result<DeleteRangeResponse> {
        let mut inner = self.admit(ctx)?;
        let revision = inner.kv.next_revision();
        let removed = Self::apply_delete(&mut inner, &req, revision);
        self.wakeup.notify_all();
        Ok(DeleteRangeResponse {
            header: Self::header(&inner),
            deleted: removed.deleted,
            prev_kvs: removed.prev_kvs,
        })
    }

    fn txn(&self, ctx: &CallContext, req: TxnRequest) -> Result<TxnResponse> {
        let mut inner = self.admit(ctx)?;

        // All compares evaluate at one fence, before any branch op runs.
        let succeeded = req
            .compare
            .iter()
            .all(|c| compare::evaluate(c, inner.kv.get(&c.key)));
        let branch = if succeeded { &req.success } else { &req.failure };

        for op in branch {
            Self::validate_op(&inner, op)?;
        }

        let has_mutation = branch
            .iter()
            .any(|op| matches!(op, RequestOp::Put(_) | RequestOp::DeleteRange(_)));
        let revision = if has_mutation {
            inner.kv.next_revision()
        } else {
            inner.kv.revision()
        };

        let mut responses = Vec::with_capacity(branch.len());
        for op in branch {
            responses.push(Self::apply_op(&mut inner, op, revision)?);
        }
        if has_mutation {
            self.wakeup.notify_all();
        }

        Ok(TxnResponse {
            header: Self::header(&inner),
            succeeded,
            responses,
        })
    }

    fn lease_grant(&self, ctx: &CallContext, req: LeaseGrantRequest) -> Result<LeaseGrantResponse> {
        let mut inner = self.admit(ctx)?;
        if req.ttl <= 0 {
            return Err(Error::invalid_request("lease TTL must be positive"));
        }
        let id = inner
            .leases
            .grant(std::time::Duration::from_secs(req.ttl as u64), Instant::now());
        Ok(LeaseGrantResponse {
            header: Self::header(&inner),
            id,
            ttl: req.ttl,
        })
    }

    fn lease_revoke(
        &self,
        ctx: &CallContext,
        req: LeaseRevokeRequest,
    ) -> Result<LeaseRevokeResponse> {
        let mut inner = self.admit(ctx)?;
        let lease = inner
            .leases
            .revoke(req.id)
            .ok_or(Error::LeaseNotFound { lease_id: req.id })?;

        // Revocation destroys everything attached: keys and held locks.
        for key in &lease.attached_keys {
            let revision = inner.kv.next_revision();
            inner.kv.delete_range(key, Span::Single, revision);
        }
        inner.locks.retain(|_, holder| holder.lease != req.id);
        self.wakeup.notify_all();

        Ok(LeaseRevokeResponse {
            header: Self::header(&inner),
        })
    }

    fn lease_keep_alive(
        &self,
        ctx: &CallContext,
        req: LeaseKeepAliveRequest,
    ) -> Result<LeaseKeepAliveResponse> {
        let mut inner = self.admit(ctx)?;
        let ttl = inner
            .leases
            .keepalive(req.id, Instant::now())
            .ok_or(Error::LeaseNotFound { lease_id: req.id })?;
        Ok(LeaseKeepAliveResponse {
            header: Self::header(&inner),
            id: req.id,
            ttl,
        })
    }

    fn lease_time_to_live(
        &self,
        ctx: &CallContext,
        req: LeaseTimeToLiveRequest,
    ) -> Result<LeaseTimeToLiveResponse> {
        let inner = self.admit(ctx)?;
        let lease = inner
            .leases
            .get(req.id)
            .ok_or(Error::LeaseNotFound { lease_id: req.id })?;

        let mut keys: Vec<Vec<u8>> = if req.keys {
            lease.attached_keys.iter().cloned().collect()
        } else {
            Vec::new()
        };
        keys.sort();

        Ok(LeaseTimeToLiveResponse {
            header: Self::header(&inner),
            id: req.id,
            ttl: lease.remaining_seconds(Instant::now()),
            granted_ttl: lease.ttl.as_secs() as i64,
            keys,
        })
    }

    fn lock(&self, ctx: &CallContext, req: LockRequest) -> Result<LockResponse> {
        let mut inner = self.admit(ctx)?;

        loop {
            if ctx.deadline.expired() {
                return Err(Error::DeadlineExceeded);
            }
            if self.expire_leases(&mut inner) {
                self.wakeup.notify_all();
            }

            let holder = inner.locks.get(&req.name).cloned();
            if let Some(holder) = holder {
                // Same lease re-acquiring its own lock observes the
                // existing acquisition.
                if holder.lease == req.lease {
                    return Ok(LockResponse {
                        header: Self::header(&inner),
                        key: holder.key,
                    });
                }
                let _ = self.wakeup.wait_until(&mut inner, ctx.deadline.instant());
                continue;
            }

            if !inner.leases.exists(req.lease) {
                return Err(Error::LeaseNotFound {
                    lease_id: req.lease,
                });
            }

            // The lock key is the name plus a suffix distinguishing this
            // acquisition; it lives and dies with the lease.
            let mut key = req.name.clone();
            key.push(b'/');
            key.extend_from_slice(format!("{:x}", req.lease).as_bytes());

            let revision = inner.kv.next_revision();
            inner.kv.put(key.clone(), Vec::new(), revision, req.lease);
            inner.leases.attach_key(req.lease, key.clone());
            inner.locks.insert(
                req.name.clone(),
                LockHolder {
                    key: key.clone(),
                    lease: req.lease,
                },
            );

            return Ok(LockResponse {
                header: Self::header(&inner),
                key,
            });
        }
    }

    fn unlock(&self, ctx: &CallContext, req: UnlockRequest) -> Result<UnlockResponse> {
        let mut inner = self.admit(ctx)?;

        let name = inner
            .locks
            .iter()
            .find(|(_, holder)| holder.key == req.key)
            .map(|(name, _)| name.clone());
        let holder = match name.and_then(|name| inner.locks.remove(&name)) {
            Some(holder) => holder,
            None => return Err(Error::invalid_request("key is not held as a lock")),
        };
        let revision = inner.kv.next_revision();
        inner.kv.delete_range(&holder.key, Span::Single, revision);
        inner.leases.detach_key(holder.lease, &holder.key);
        self.wakeup.notify_all();

        Ok(UnlockResponse {
            header: Self::header(&inner),
        })
    }

    fn authenticate(
        &self,
        ctx: &CallContext,
        req: AuthenticateRequest,
    ) -> Result<AuthenticateResponse> {
        let mut inner = self.admit_open(ctx)?;
        let token = inner.auth.authenticate(&req.user, &req.password)?;
        Ok(AuthenticateResponse {
            header: Self::header(&inner),
            token,
        })
    }

    fn auth_enable(&self, ctx: &CallContext, req: AuthEnableRequest) -> Result<AuthEnableResponse> {
        let AuthEnableRequest {} = req;
        let mut inner = self.admit(ctx)?;
        inner.auth.enable()?;
        Ok(AuthEnableResponse {
            header: Self::header(&inner),
        })
    }

    fn auth_disable(
        &self,
        ctx: &CallContext,
        req: AuthDisableRequest,
    ) -> Result<AuthDisableResponse> {
        let AuthDisableRequest {} = req;
        let mut inner = self.admit(ctx)?;
        inner.auth.disable();
        Ok(AuthDisableResponse {
            header: Self::header(&inner),
        })
    }

    fn user_add(&self, ctx: &CallContext, req: UserAddRequest) -> Result<AuthAdminResponse> {
        let mut inner = self.admit(ctx)?;
        inner.auth.user_add(&req.name, &req.password)?;
        Ok(AuthAdminResponse {
            header: Self::header(&inner),
        })
    }

    fn user_get(&self, ctx: &CallContext, req: UserGetRequest) -> Result<UserGetResponse> {
        let inner = self.admit(ctx)?;
        let roles = inner.auth.user_get(&req.name)?;
        Ok(UserGetResponse {
            header: Self::header(&inner),
            roles,
        })
    }

    fn user_delete(&self, ctx: &CallContext, req: UserDeleteRequest) -> Result<AuthAdminResponse> {
        let mut inner = self.admit(ctx)?;
        inner.auth.user_delete(&req.name)?;
        Ok(AuthAdminResponse {
            header: Self::header(&inner),
        })
    }

    fn user_change_password(
        &self,
        ctx: &CallContext,
        req: UserChangePasswordRequest,
    ) -> Result<AuthAdminResponse> {
        let mut inner = self.admit(ctx)?;
        inner.auth.user_change_password(&req.name, &req.password)?;
        Ok(AuthAdminResponse {
            header: Self::header(&inner),
        })
    }

    fn user_list(&self, ctx: &CallContext, req: UserListRequest) -> Result<UserListResponse> {
        let UserListRequest {} = req;
        let inner = self.admit(ctx)?;
        Ok(UserListResponse {
            header: Self::header(&inner),
            users: inner.auth.user_list(),
        })
    }

    fn user_grant_role(
        &self,
        ctx: &CallContext,
        req: UserGrantRoleRequest,
    ) -> Result<AuthAdminResponse> {
        let mut inner = self.admit(ctx)?;
        inner.auth.user_grant_role(&req.user, &req.role)?;
        Ok(AuthAdminResponse {
            header: Self::header(&inner),
        })
    }

    fn user_revoke_role(
        &self,
        ctx: &CallContext,
        req: UserRevokeRoleRequest,
    ) -> Result<AuthAdminResponse> {
        let mut inner = self.admit(ctx)?;
        inner.auth.user_revoke_role(&req.user, &req.role)?;
        Ok(AuthAdminResponse {
            header: Self::header(&inner),
        })
    }

    fn role_add(&self, ctx: &CallContext, req: RoleAddRequest) -> Result<AuthAdminResponse> {
        let mut inner = self.admit(ctx)?;
        inner.auth.role_add(&req.name)?;
        Ok(AuthAdminResponse {
            header: Self::header(&inner),
        })
    }

    fn role_get(&self, ctx: &CallContext, req: RoleGetRequest) -> Result<RoleGetResponse> {
        let inner = self.admit(ctx)?;
        let permissions = inner.auth.role_get(&req.name)?;
        Ok(RoleGetResponse {
            header: Self::header(&inner),
            permissions,
        })
    }

    fn role_delete(&self, ctx: &CallContext, req: RoleDeleteRequest) -> Result<AuthAdminResponse> {
        let mut inner = self.admit(ctx)?;
        inner.auth.role_delete(&req.name)?;
        Ok(AuthAdminResponse {
            header: Self::header(&inner),
        })
    }

    fn role_list(&self, ctx: &CallContext, req: RoleListRequest) -> Result<RoleListResponse> {
        let RoleListRequest {} = req;
        let inner = self.admit(ctx)?;
        Ok(RoleListResponse {
            header: Self::header(&inner),
            roles: inner.auth.role_list(),
        })
    }

    fn role_grant_permission(
        &self,
        ctx: &CallContext,
        req: RoleGrantPermissionRequest,
    ) -> Result<AuthAdminResponse> {
        let mut inner = self.admit(ctx)?;
        inner.auth.role_grant_permission(&req.role, req.permission)?;
        Ok(AuthAdminResponse {
            header: Self::header(&inner),
        })
    }

    fn role_revoke_permission(
        &self,
        ctx: &CallContext,
        req: RoleRevokePermissionRequest,
    ) -> Result<AuthAdminResponse> {
        let mut inner = self.admit(ctx)?;
        inner
            .auth
            .role_revoke_permission(&req.role, &req.key, &req.range_end)?;
        Ok(AuthAdminResponse {
            header: Self::header(&inner),
        })
    }

    fn status(&self, ctx: &CallContext, req: StatusRequest) -> Result<StatusResponse> {
        let StatusRequest {} = req;
        let inner = self.admit(ctx)?;
        Ok(StatusResponse {
            header: Self::header(&inner),
            version: env!("CARGO_PKG_VERSION").to_string(),
            db_size: inner.kv.total_bytes(),
            leader: MEMBER_ID,
        })
    }

    fn alarm_list(&self, ctx: &CallContext, req: AlarmListRequest) -> Result<AlarmResponse> {
        let AlarmListRequest {} = req;
        let inner = self.admit(ctx)?;
        Ok(AlarmResponse {
            header: Self::header(&inner),
            alarms: inner.alarms.clone(),
        })
    }

    fn alarm_deactivate(
        &self,
        ctx: &CallContext,
        req: AlarmDeactivateRequest,
    ) -> Result<AlarmResponse> {
        let AlarmDeactivateRequest {} = req;
        let mut inner = self.admit(ctx)?;
        inner.alarms.clear();
        Ok(AlarmResponse {
            header: Self::header(&inner),
            alarms: Vec::new(),
        })
    }

    fn watch(&self, ctx: &CallContext, req: WatchRequest) -> Result<WatchResponse> {
        let mut inner = self.admit(ctx)?;

        // start_revision 0 means "events from now on".
        let start_revision = if req.start_revision == 0 {
            inner.kv.revision() + 1
        } else {
            req.start_revision
        };

        loop {
            if ctx.deadline.expired() {
                return Err(Error::DeadlineExceeded);
            }

            let events = inner.kv.events_for(&req.key, start_revision);
            if !events.is_empty() {
                return Ok(WatchResponse {
                    header: Self::header(&inner),
                    events,
                });
            }

            let result = self.wakeup.wait_until(&mut inner, ctx.deadline.instant());
            if result.timed_out() && ctx.deadline.expired() {
                return Err(Error::DeadlineExceeded);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::deadline::Deadline;
    use std::time::Duration;

    fn ctx() -> CallContext {
        CallContext::new(Deadline::after(Duration::from_secs(5)))
    }

    fn expired_ctx() -> CallContext {
        CallContext::new(Deadline::after(Duration::ZERO))
    }

    #[test]
    fn expired_deadline_fails_before_any_work() {
        let store = MemoryStore::new();
        let err = store
            .put(
                &expired_ctx(),
                PutRequest {
                    key: b"k".to_vec(),
                    value: b"v".to_vec(),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_deadline_exceeded());

        // The same call with budget succeeds.
        store
            .put(
                &ctx(),
                PutRequest {
                    key: b"k".to_vec(),
                    value: b"v".to_vec(),
                    ..Default::default()
                },
            )
            .expect("should put");
    }

    #[test]
    fn put_with_unknown_lease_is_rejected() {
        let store = MemoryStore::new();
        let err = store
            .put(
                &ctx(),
                PutRequest {
                    key: b"k".to_vec(),
                    value: b"v".to_vec(),
                    lease: 42,
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, Error::LeaseNotFound { lease_id: 42 }));
    }

    #[test]
    fn lease_revoke_cascades_to_attached_keys() {
        let store = MemoryStore::new();
        let lease = store
            .lease_grant(&ctx(), LeaseGrantRequest { ttl: 60, id: 0 })
            .unwrap();

        store
            .put(
                &ctx(),
                PutRequest {
                    key: b"ephemeral".to_vec(),
                    value: b"v".to_vec(),
                    lease: lease.id,
                    ..Default::default()
                },
            )
            .unwrap();

        store
            .lease_revoke(&ctx(), LeaseRevokeRequest { id: lease.id })
            .unwrap();

        let resp = store
            .range(
                &ctx(),
                RangeRequest {
                    key: b"ephemeral".to_vec(),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(resp.kvs.is_empty());
    }

    #[test]
    fn range_rejects_unknown_sort_codes() {
        let store = MemoryStore::new();
        let err = store
            .range(
                &ctx(),
                RangeRequest {
                    key: b"k".to_vec(),
                    sort_order: 7,
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest { .. }));
    }

    #[test]
    fn lock_conflict_times_out_and_release_unblocks() {
        let store = MemoryStore::new();
        let a = store
            .lease_grant(&ctx(), LeaseGrantRequest { ttl: 60, id: 0 })
            .unwrap();
        let b = store
            .lease_grant(&ctx(), LeaseGrantRequest { ttl: 60, id: 0 })
            .unwrap();

        let held = store
            .lock(
                &ctx(),
                LockRequest {
                    name: b"mu".to_vec(),
                    lease: a.id,
                },
            )
            .unwrap();

        let short = CallContext::new(Deadline::after(Duration::from_millis(50)));
        let err = store
            .lock(
                &short,
                LockRequest {
                    name: b"mu".to_vec(),
                    lease: b.id,
                },
            )
            .unwrap_err();
        assert!(err.is_deadline_exceeded());

        store
            .unlock(&ctx(), UnlockRequest { key: held.key })
            .unwrap();

        store
            .lock(
                &ctx(),
                LockRequest {
                    name: b"mu".to_vec(),
                    lease: b.id,
                },
            )
            .expect("lock should be free after release");
    }
}
