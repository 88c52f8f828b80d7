//! Tests for lease lifecycle and lease-backed mutual exclusion.

mod common;

use common::*;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tether::{Error, GetOptions};

// ============================================================================
// Lease lifecycle
// ============================================================================

#[test]
fn lease_grant_assigns_id_and_ttl() {
    let store = store();
    let conn = plain_client(&store);

    let lease = conn.lease_grant(2, None).unwrap();
    assert!(lease.id > 0);
    assert_eq!(lease.ttl, 2);
}

#[test]
fn lease_revoke() {
    let store = store();
    let conn = plain_client(&store);

    let lease = conn.lease_grant(2, None).unwrap();
    conn.lease_revoke(lease.id, None).unwrap();

    // A second revoke finds nothing.
    assert!(matches!(
        conn.lease_revoke(lease.id, None),
        Err(Error::LeaseNotFound { .. })
    ));
}

#[test]
fn lease_revoke_timeouts() {
    let store = store();
    let conn = plain_client(&store);
    let lease = conn.lease_grant(2, None).unwrap();

    assert_deadline_exceeded(conn.lease_revoke(lease.id, zero_timeout()));
    conn.lease_revoke(lease.id, ample_timeout()).unwrap();
}

#[test]
fn lease_time_to_live_reports_remaining_and_keys() {
    let store = store();
    let conn = plain_client(&store);
    let lease = conn.lease_grant(60, None).unwrap();

    conn.put(
        "ephemeral",
        "v",
        tether::PutOptions::default().lease(lease.id),
    )
    .unwrap();

    let ttl = conn.lease_time_to_live(lease.id, true, None).unwrap();
    assert_eq!(ttl.id, lease.id);
    assert_eq!(ttl.granted_ttl, 60);
    assert!(ttl.ttl > 0 && ttl.ttl <= 60);
    assert_eq!(ttl.keys, vec![b"ephemeral".to_vec()]);
}

#[test]
fn lease_ttl_timeouts() {
    let store = store();
    let conn = plain_client(&store);
    let lease = conn.lease_grant(2, None).unwrap();

    assert_deadline_exceeded(conn.lease_time_to_live(lease.id, false, zero_timeout()));
    conn.lease_time_to_live(lease.id, false, ample_timeout())
        .unwrap();
}

#[test]
fn lease_keep_alive_once_restores_full_ttl() {
    let store = store();
    let conn = plain_client(&store);
    let lease = conn.lease_grant(30, None).unwrap();

    let resp = conn.lease_keep_alive_once(lease.id, None).unwrap();
    assert_eq!(resp.id, lease.id);
    assert_eq!(resp.ttl, 30);
}

#[test]
fn lease_keep_alive_timeouts() {
    let store = store();
    let conn = plain_client(&store);
    let lease = conn.lease_grant(2, None).unwrap();

    assert_deadline_exceeded(conn.lease_keep_alive_once(lease.id, zero_timeout()));
    conn.lease_keep_alive_once(lease.id, ample_timeout())
        .unwrap();
}

#[test]
fn operations_on_unknown_lease_surface_verbatim() {
    let store = store();
    let conn = plain_client(&store);

    assert!(matches!(
        conn.lease_keep_alive_once(999, None),
        Err(Error::LeaseNotFound { lease_id: 999 })
    ));
    assert!(matches!(
        conn.lease_time_to_live(999, false, None),
        Err(Error::LeaseNotFound { .. })
    ));
}

#[test]
fn expired_lease_deletes_attached_keys() {
    let store = store();
    let conn = plain_client(&store);
    let lease = conn.lease_grant(1, None).unwrap();

    conn.put(
        "ephemeral",
        "v",
        tether::PutOptions::default().lease(lease.id),
    )
    .unwrap();

    thread::sleep(Duration::from_millis(1100));
    assert!(conn
        .get("ephemeral", GetOptions::default())
        .unwrap()
        .kvs
        .is_empty());
}

// ============================================================================
// Locks
// ============================================================================

#[test]
fn lock_returns_namespaced_key_observable_by_plain_read() {
    let store = store();
    let plain = plain_client(&store);
    let scoped = namespaced_client(&store, "/namespace/");
    let lease = scoped.lease_grant(10, None).unwrap();

    let handle = scoped.lock("mylocklock", lease.id, None).unwrap();

    assert!(handle.key.starts_with(b"/namespace/mylocklock"));
    assert_eq!(handle.lease_id, lease.id);
    // The handle's key resolves directly, without any unwrapping.
    assert!(!plain.get(&handle.key, GetOptions::default()).unwrap().kvs.is_empty());
}

#[test]
fn with_lock_enforces_mutual_exclusion() {
    let store = store();
    let conn = plain_client(&store);
    let lease_a = conn.lease_grant(10, None).unwrap();
    let lease_b = conn.lease_grant(15, None).unwrap();

    conn.with_lock("foobar", lease_a.id, None, |_| {
        let second = conn.lock("foobar", lease_b.id, Some(Duration::from_millis(100)));
        assert_deadline_exceeded(second);
        Ok(())
    })
    .unwrap();
}

#[test]
fn lock_succeeds_after_release() {
    let store = store();
    let conn = plain_client(&store);
    let lease_a = conn.lease_grant(10, None).unwrap();
    let lease_b = conn.lease_grant(10, None).unwrap();

    conn.with_lock("handoff", lease_a.id, None, |_| Ok(()))
        .unwrap();

    // The first holder released on exit, so this acquires immediately.
    let handle = conn
        .lock("handoff", lease_b.id, Some(Duration::from_millis(100)))
        .unwrap();
    conn.unlock(&handle.key, None).unwrap();
}

#[test]
fn with_lock_releases_then_propagates_block_error() {
    let store = store();
    let conn = plain_client(&store);
    let lease_a = conn.lease_grant(10, None).unwrap();
    let lease_b = conn.lease_grant(10, None).unwrap();

    let result: Result<(), Error> = conn.with_lock("errlock", lease_a.id, None, |_| {
        Err(Error::invalid_request("boom"))
    });
    assert!(matches!(result, Err(Error::InvalidRequest { .. })));

    // The lock was still released before the error surfaced.
    conn.lock("errlock", lease_b.id, Some(Duration::from_millis(100)))
        .expect("lock should be free after failed block");
}

#[test]
fn lock_blocks_until_holder_releases() {
    let store = store();
    let conn = Arc::new(plain_client(&store));
    let lease_a = conn.lease_grant(10, None).unwrap();
    let lease_b = conn.lease_grant(10, None).unwrap();

    let held = conn.lock("contended", lease_a.id, None).unwrap();

    let waiter = {
        let conn = Arc::clone(&conn);
        thread::spawn(move || conn.lock("contended", lease_b.id, Some(Duration::from_secs(5))))
    };

    thread::sleep(Duration::from_millis(150));
    conn.unlock(&held.key, None).unwrap();

    let handle = waiter.join().unwrap().expect("waiter should acquire");
    assert_eq!(handle.lease_id, lease_b.id);
}

#[test]
fn lock_names_do_not_contend_across_namespaces() {
    let store = store();
    let left = namespaced_client(&store, "/left/");
    let right = namespaced_client(&store, "/right/");
    let lease_l = left.lease_grant(10, None).unwrap();
    let lease_r = right.lease_grant(10, None).unwrap();

    let held = left.lock("mylock", lease_l.id, None).unwrap();
    // Same logical name, different namespace: no contention.
    right
        .lock("mylock", lease_r.id, Some(Duration::from_millis(100)))
        .expect("different namespaces must not contend");
    left.unlock(&held.key, None).unwrap();
}

#[test]
fn revoking_the_backing_lease_frees_the_lock() {
    let store = store();
    let conn = plain_client(&store);
    let lease_a = conn.lease_grant(10, None).unwrap();
    let lease_b = conn.lease_grant(10, None).unwrap();

    let handle = conn.lock("leased-away", lease_a.id, None).unwrap();
    conn.lease_revoke(lease_a.id, None).unwrap();

    // The lock key vanished with the lease.
    assert!(conn
        .get(&handle.key, GetOptions::default())
        .unwrap()
        .kvs
        .is_empty());
    conn.lock("leased-away", lease_b.id, Some(Duration::from_millis(100)))
        .expect("lock should be free after lease revocation");
}

#[test]
fn lock_with_unknown_lease_is_rejected() {
    let store = store();
    let conn = plain_client(&store);
    assert!(matches!(
        conn.lock("nolease", 12345, None),
        Err(Error::LeaseNotFound { lease_id: 12345 })
    ));
}

#[test]
fn lock_zero_timeout_fails_deterministically() {
    let store = store();
    let conn = plain_client(&store);
    let lease = conn.lease_grant(10, None).unwrap();
    assert_deadline_exceeded(conn.lock("zero", lease.id, Some(Duration::ZERO)));
}
