//! Wire-level message types and the transport seam.
//!
//! These types mirror the remote store's protocol shapes. They carry no
//! behavior beyond construction; all namespace translation happens before a
//! message reaches this layer, and responses flow back with keys exactly as
//! stored.

pub mod auth;
pub mod kv;
pub mod lease;
pub mod lock;
pub mod maintenance;
pub mod transport;
pub mod txn;

pub use kv::{
    DeleteRangeRequest, DeleteRangeResponse, KeyValue, PutRequest, PutResponse, RangeRequest,
    RangeResponse, ResponseHeader, SortOrder, SortTarget,
};
pub use lease::{
    LeaseGrantRequest, LeaseGrantResponse, LeaseKeepAliveRequest, LeaseKeepAliveResponse,
    LeaseRevokeRequest, LeaseRevokeResponse, LeaseTimeToLiveRequest, LeaseTimeToLiveResponse,
};
pub use lock::{LockRequest, LockResponse, UnlockRequest, UnlockResponse};
pub use maintenance::{
    AlarmMember, AlarmResponse, AlarmType, Event, EventType, StatusResponse, WatchRequest,
    WatchResponse,
};
pub use transport::{CallContext, Transport};
pub use txn::{
    Compare, CompareResult, CompareTarget, CompareTargetUnion, RequestOp, ResponseOp, TxnRequest,
    TxnResponse,
};
