//! Maintenance wire messages: status and alarm queries, plus the
//! single-shot watch used to observe key history.

use super::kv::{KeyValue, ResponseHeader};
use serde::{Deserialize, Serialize};

/// Status query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusRequest {}

/// Status response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusResponse {
    pub header: ResponseHeader,
    /// Server version string.
    pub version: String,
    /// Backend database size in bytes.
    pub db_size: i64,
    /// Current leader member ID.
    pub leader: u64,
}

/// Alarm kinds the store can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmType {
    None,
    Nospace,
    Corrupt,
}

/// An active alarm on a member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlarmMember {
    pub member_id: u64,
    pub alarm: AlarmType,
}

/// Alarm list query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlarmListRequest {}

/// Deactivate all active alarms.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlarmDeactivateRequest {}

/// Alarm response (shared by list and deactivate).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlarmResponse {
    pub header: ResponseHeader,
    /// Alarms still active after the operation.
    pub alarms: Vec<AlarmMember>,
}

/// Event type for watch notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    /// Key was created or updated.
    Put,
    /// Key was deleted.
    Delete,
}

/// A key event observed by a watch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Type of event.
    pub event_type: EventType,
    /// The key-value after the event (previous state for deletes).
    pub kv: KeyValue,
}

/// Watch request: events for one key at or after a revision.
///
/// The call blocks until at least one matching event exists or the deadline
/// passes. Streaming delivery beyond this single shot belongs to the
/// transport.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WatchRequest {
    /// Key to watch (already namespace-translated by the caller).
    pub key: Vec<u8>,
    /// First revision of interest (0 = next event from now).
    pub start_revision: i64,
}

/// Watch response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WatchResponse {
    pub header: ResponseHeader,
    /// Matching events, in revision order.
    pub events: Vec<Event>,
}
