//! Lease table: time-bounded handles with attached keys.
//!
//! A lease expires when its deadline passes without a keepalive; expiry and
//! revocation both cascade to every attached key. Expiry is evaluated
//! lazily, on access, against the wall clock.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

/// One active lease.
#[derive(Debug, Clone)]
pub struct LeaseRecord {
    pub id: i64,
    pub ttl: Duration,
    pub expires_at: Instant,
    pub attached_keys: HashSet<Vec<u8>>,
}

impl LeaseRecord {
    fn new(id: i64, ttl: Duration, now: Instant) -> Self {
        Self {
            id,
            ttl,
            expires_at: now + ttl,
            attached_keys: HashSet::new(),
        }
    }

    /// Whether the lease has expired at the given instant.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Remaining TTL in whole seconds at the given instant.
    pub fn remaining_seconds(&self, now: Instant) -> i64 {
        self.expires_at.saturating_duration_since(now).as_secs() as i64
    }
}

/// Active leases indexed by id.
#[derive(Debug, Default)]
pub struct LeaseTable {
    leases: HashMap<i64, LeaseRecord>,
    next_id: i64,
}

impl LeaseTable {
    pub fn new() -> Self {
        Self {
            leases: HashMap::new(),
            next_id: 1,
        }
    }

    /// Grant a lease, assigning the next id.
    pub fn grant(&mut self, ttl: Duration, now: Instant) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        self.leases.insert(id, LeaseRecord::new(id, ttl, now));
        id
    }

    /// Look up a live lease.
    pub fn get(&self, id: i64) -> Option<&LeaseRecord> {
        self.leases.get(&id)
    }

    /// Whether a lease exists.
    pub fn exists(&self, id: i64) -> bool {
        self.leases.contains_key(&id)
    }

    /// Remove a lease, returning it (with its attached keys) if present.
    pub fn revoke(&mut self, id: i64) -> Option<LeaseRecord> {
        self.leases.remove(&id)
    }

    /// Reset a lease's deadline to its full TTL from now.
    pub fn keepalive(&mut self, id: i64, now: Instant) -> Option<i64> {
        let lease = self.leases.get_mut(&id)?;
        lease.expires_at = now + lease.ttl;
        Some(lease.ttl.as_secs() as i64)
    }

    /// Attach a key to a lease.
    pub fn attach_key(&mut self, id: i64, key: Vec<u8>) {
        if let Some(lease) = self.leases.get_mut(&id) {
            lease.attached_keys.insert(key);
        }
    }

    /// Detach a key from a lease.
    pub fn detach_key(&mut self, id: i64, key: &[u8]) {
        if let Some(lease) = self.leases.get_mut(&id) {
            lease.attached_keys.remove(key);
        }
    }

    /// Remove every lease expired at `now`, returning them for cascade
    /// deletion of their attached keys.
    pub fn purge_expired(&mut self, now: Instant) -> Vec<LeaseRecord> {
        let expired: Vec<i64> = self
            .leases
            .values()
            .filter(|l| l.is_expired_at(now))
            .map(|l| l.id)
            .collect();

        expired
            .into_iter()
            .filter_map(|id| self.leases.remove(&id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grant_assigns_increasing_ids() {
        let mut table = LeaseTable::new();
        let now = Instant::now();
        let a = table.grant(Duration::from_secs(10), now);
        let b = table.grant(Duration::from_secs(10), now);
        assert!(b > a);
        assert!(table.exists(a));
    }

    #[test]
    fn keepalive_resets_full_ttl() {
        let mut table = LeaseTable::new();
        let now = Instant::now();
        let id = table.grant(Duration::from_secs(10), now);

        let later = now + Duration::from_secs(6);
        let ttl = table.keepalive(id, later).unwrap();
        assert_eq!(ttl, 10);
        assert!(!table.get(id).unwrap().is_expired_at(later + Duration::from_secs(9)));
    }

    #[test]
    fn purge_removes_only_expired() {
        let mut table = LeaseTable::new();
        let now = Instant::now();
        let short = table.grant(Duration::from_secs(1), now);
        let long = table.grant(Duration::from_secs(60), now);
        table.attach_key(short, b"held".to_vec());

        let expired = table.purge_expired(now + Duration::from_secs(2));
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].id, short);
        assert!(expired[0].attached_keys.contains(b"held".as_slice()));
        assert!(table.exists(long));
    }

    #[test]
    fn detach_removes_attachment() {
        let mut table = LeaseTable::new();
        let now = Instant::now();
        let id = table.grant(Duration::from_secs(10), now);
        table.attach_key(id, b"k".to_vec());
        table.detach_key(id, b"k");
        assert!(table.get(id).unwrap().attached_keys.is_empty());
    }
}
