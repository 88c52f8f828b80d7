//! In-memory key-value state with MVCC bookkeeping.
//!
//! Keeps the current record per key: create revision, mod revision, and a
//! version counter that resets when a deleted key is recreated. A global
//! revision advances once per mutation batch; a transaction's branch applies
//! entirely at one revision. Every mutation appends an event for watches.

use std::collections::BTreeMap;

use crate::rpc::kv::KeyValue;
use crate::rpc::maintenance::{Event, EventType};

/// Current state of one key.
#[derive(Debug, Clone)]
pub struct KvRecord {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
    pub create_revision: i64,
    pub mod_revision: i64,
    pub version: i64,
    pub lease: i64,
}

impl KvRecord {
    /// Wire representation of this record.
    pub fn to_key_value(&self) -> KeyValue {
        KeyValue {
            key: self.key.clone(),
            create_revision: self.create_revision,
            mod_revision: self.mod_revision,
            version: self.version,
            value: self.value.clone(),
            lease: self.lease,
        }
    }
}

/// How a request addresses keys relative to its start key.
///
/// The wire encodes this in `range_end`: empty means the single key, the
/// lone zero byte means everything from the key onward, anything else is an
/// exclusive upper bound.
#[derive(Debug, Clone, Copy)]
pub enum Span<'a> {
    /// Exactly the start key.
    Single,
    /// Keys in `[start, end)`.
    Until(&'a [u8]),
    /// Every key at or after start.
    Open,
}

impl<'a> Span<'a> {
    /// Decode a wire-level range end.
    pub fn from_range_end(range_end: &'a [u8]) -> Self {
        if range_end.is_empty() {
            Self::Single
        } else if crate::namespace::is_open_range_end(range_end) {
            Self::Open
        } else {
            Self::Until(range_end)
        }
    }
}

/// The key index plus the revision counter and event log.
#[derive(Debug, Default)]
pub struct KvState {
    revision: i64,
    index: BTreeMap<Vec<u8>, KvRecord>,
    events: Vec<Event>,
}

impl KvState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current store revision.
    pub fn revision(&self) -> i64 {
        self.revision
    }

    /// Advance and return the next revision.
    pub fn next_revision(&mut self) -> i64 {
        self.revision += 1;
        self.revision
    }

    /// Get a key's current record.
    pub fn get(&self, key: &[u8]) -> Option<&KvRecord> {
        self.index.get(key)
    }

    /// Records addressed by a start key and span.
    pub fn range(&self, start: &[u8], span: Span<'_>) -> Vec<&KvRecord> {
        match span {
            Span::Single => self.index.get(start).into_iter().collect(),
            Span::Until(end) => self
                .index
                .range(start.to_vec()..end.to_vec())
                .map(|(_, r)| r)
                .collect(),
            Span::Open => self.index.range(start.to_vec()..).map(|(_, r)| r).collect(),
        }
    }

    /// Put a key at the given revision.
    ///
    /// An update preserves the create revision and increments the version;
    /// a fresh key (including one recreated after deletion) starts over.
    pub fn put(
        &mut self,
        key: Vec<u8>,
        value: Vec<u8>,
        revision: i64,
        lease: i64,
    ) -> Option<KvRecord> {
        let prev = self.index.get(&key).cloned();

        let (create_revision, version) = match &prev {
            Some(p) => (p.create_revision, p.version + 1),
            None => (revision, 1),
        };

        let record = KvRecord {
            key: key.clone(),
            value,
            create_revision,
            mod_revision: revision,
            version,
            lease,
        };

        self.events.push(Event {
            event_type: EventType::Put,
            kv: record.to_key_value(),
        });
        self.index.insert(key, record);
        prev
    }

    /// Delete the records addressed by a start key and span at the given
    /// revision. Returns the removed records.
    pub fn delete_range(&mut self, start: &[u8], span: Span<'_>, revision: i64) -> Vec<KvRecord> {
        let keys: Vec<Vec<u8>> = self
            .range(start, span)
            .iter()
            .map(|r| r.key.clone())
            .collect();

        let mut removed = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(record) = self.index.remove(&key) {
                let mut kv = record.to_key_value();
                kv.mod_revision = revision;
                self.events.push(Event {
                    event_type: EventType::Delete,
                    kv,
                });
                removed.push(record);
            }
        }
        removed
    }

    /// Approximate store size: the sum of live key and value bytes.
    pub fn total_bytes(&self) -> i64 {
        self.index
            .values()
            .map(|r| (r.key.len() + r.value.len()) as i64)
            .sum()
    }

    /// Events for one key at or after a revision, in order.
    pub fn events_for(&self, key: &[u8], start_revision: i64) -> Vec<Event> {
        self.events
            .iter()
            .filter(|e| e.kv.key == key && e.kv.mod_revision >= start_revision)
            .cloned()
            .collect()
    }
}
