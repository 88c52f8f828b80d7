//! Tether - client-side coordination layer for a replicated key-value store.
//!
//! Tether sits on top of a linearizable KV store reached over
//! request/response RPCs and gives callers namespace isolation,
//! compare-and-swap transactions, and lease-backed distributed mutual
//! exclusion. Wire transport, consensus, and storage stay with the remote
//! store, behind the [`rpc::Transport`] seam.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                           Client                                │
//! │   get/put/del │ transaction │ lease │ lock │ auth │ admin       │
//! └─────────────────────────────────────────────────────────────────┘
//!                                  │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Coordination Layer                          │
//! │  RequestFactory │ TxnBuilder │ LeaseCoordinator │ LockCoordinator│
//! │                  Session (token + deadlines)                    │
//! └─────────────────────────────────────────────────────────────────┘
//!                                  │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Transport Seam                            │
//! │        deadline-bounded request/response exchanges              │
//! └─────────────────────────────────────────────────────────────────┘
//!                                  │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │              Remote Store (or in-memory reference)              │
//! │      MVCC KV │ Txn │ Leases │ Locks │ Auth │ Watch events       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Module Organization
//!
//! ## Core
//! - [`core::config`] - Client configuration parsing and validation
//! - [`core::deadline`] - Per-call time budgets
//! - [`core::error`] - Error taxonomy and RPC status-code mapping
//!
//! ## Coordination
//! - [`namespace`] - Byte-prefix codec and range-boundary arithmetic
//! - [`kv`] - Request translation and symbolic options
//! - [`txn`] - Atomic compare-and-branch builder
//! - [`lease`] - Lease lifecycle coordination
//! - [`lock`] - Lease-backed mutual exclusion
//! - [`session`] - Identity token and per-call deadlines
//! - [`client`] - The facade composing all of the above
//!
//! ## Wire
//! - [`rpc`] - Message types and the [`rpc::Transport`] trait
//!
//! ## Reference store
//! - [`store`] - In-memory [`rpc::Transport`] implementation with full
//!   remote-store semantics, used by the test-suite and for embedding
//!
//! # Key Invariants
//!
//! - A configured namespace applies to every key-bearing operation; no
//!   operation bypasses translation, and responses are never stripped.
//! - Exactly one transaction branch executes, atomically, based on the
//!   AND of all compare clauses.
//! - A lock handle is valid only while its backing lease is live.
//! - A zero timeout deterministically fails with deadline-exceeded.

// Core infrastructure
pub mod core;

// Wire messages and the transport seam
pub mod rpc;

// Coordination layer
pub mod client;
pub mod kv;
pub mod lease;
pub mod lock;
pub mod namespace;
pub mod session;
pub mod txn;

// In-memory reference store
pub mod store;

// Re-exports for convenience
pub use crate::core::config::{AuthConfig, ClientConfig};
pub use crate::core::deadline::Deadline;
pub use crate::core::error::{Error, Result, RpcCode};
pub use client::Client;
pub use kv::{DeleteOptions, GetOptions, PutOptions, RequestFactory};
pub use lease::{Lease, LeaseCoordinator};
pub use lock::{LockCoordinator, LockHandle};
pub use namespace::{Namespace, OPEN_RANGE_END};
pub use rpc::{CompareResult, SortOrder, SortTarget, Transport};
pub use session::Session;
pub use store::MemoryStore;
pub use txn::TxnBuilder;
