//! Common test utilities.
//!
//! Shared helpers for integration tests. Import with `mod common;` in test
//! files. Clients constructed here share one in-memory store, so a
//! namespaced client and a plain view observe the same keyspace.

use std::sync::Arc;
use std::time::Duration;

use tether::store::MemoryStore;
use tether::{Client, ClientConfig, Error};

/// Install a test subscriber honoring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(EnvFilter::from_default_env())
        .try_init();
}

/// A fresh shared store.
pub fn store() -> Arc<MemoryStore> {
    init_tracing();
    MemoryStore::shared()
}

/// A plain (un-namespaced) client over the store.
pub fn plain_client(store: &Arc<MemoryStore>) -> Client {
    Client::connect(store.clone(), ClientConfig::default()).expect("connect plain client")
}

/// A client confined to the given namespace.
pub fn namespaced_client(store: &Arc<MemoryStore>, namespace: &str) -> Client {
    Client::connect(store.clone(), ClientConfig::with_namespace(namespace))
        .expect("connect namespaced client")
}

/// First value returned for a key, as bytes.
#[track_caller]
pub fn value_of(client: &Client, key: &str) -> Vec<u8> {
    let resp = client
        .get(key, Default::default())
        .expect("get should succeed");
    resp.kvs
        .first()
        .unwrap_or_else(|| panic!("no value for key {:?}", key))
        .value
        .clone()
}

/// Assert that a result failed with deadline-exceeded.
#[track_caller]
pub fn assert_deadline_exceeded<T: std::fmt::Debug>(result: Result<T, Error>) {
    match result {
        Err(e) if e.is_deadline_exceeded() => {}
        other => panic!("expected deadline-exceeded, got {:?}", other),
    }
}

/// A zero timeout, the canonical "always times out" fixture.
pub fn zero_timeout() -> Option<Duration> {
    Some(Duration::ZERO)
}

/// A timeout generous enough for any in-memory call.
pub fn ample_timeout() -> Option<Duration> {
    Some(Duration::from_secs(10))
}
