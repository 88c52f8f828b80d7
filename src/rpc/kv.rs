//! Key-value wire messages: range (get), put, and delete-range.
//!
//! Field layout mirrors the remote store's protocol. Sort options travel as
//! small integer codes; the symbolic enums here are a total bijection with
//! those codes, and unknown codes or symbol names fail fast rather than
//! defaulting.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::error::{Error, Result};

/// Range request (get).
///
/// `sort_order` and `sort_target` carry wire codes; zero means unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RangeRequest {
    /// Key to get, or start of range.
    pub key: Vec<u8>,
    /// End of range (exclusive). Empty for single key.
    pub range_end: Vec<u8>,
    /// Maximum number of keys to return (0 = no limit).
    pub limit: i64,
    /// Sort order wire code.
    pub sort_order: i32,
    /// Sort target wire code.
    pub sort_target: i32,
    /// Only return keys, not values.
    pub keys_only: bool,
    /// Only return the count of keys.
    pub count_only: bool,
}

/// Range response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RangeResponse {
    /// Response header.
    pub header: ResponseHeader,
    /// Key-value pairs, keys exactly as stored (prefixes are not stripped).
    pub kvs: Vec<KeyValue>,
    /// More results available beyond the limit.
    pub more: bool,
    /// Total count of keys matching the range.
    pub count: i64,
}

/// Put request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PutRequest {
    /// Key to put.
    pub key: Vec<u8>,
    /// Value to put.
    pub value: Vec<u8>,
    /// Lease ID to attach; zero means no lease.
    pub lease: i64,
    /// Return the previous key-value.
    pub prev_kv: bool,
}

/// Put response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PutResponse {
    /// Response header.
    pub header: ResponseHeader,
    /// Previous key-value (if requested).
    pub prev_kv: Option<KeyValue>,
}

/// Delete request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteRangeRequest {
    /// Key to delete, or start of range.
    pub key: Vec<u8>,
    /// End of range (exclusive). Empty for single key.
    pub range_end: Vec<u8>,
    /// Return the previous key-values.
    pub prev_kv: bool,
}

/// Delete response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteRangeResponse {
    /// Response header.
    pub header: ResponseHeader,
    /// Number of keys deleted.
    pub deleted: i64,
    /// Previous key-values (if requested).
    pub prev_kvs: Vec<KeyValue>,
}

/// Response header included in every store response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseHeader {
    /// Cluster ID.
    pub cluster_id: u64,
    /// Member ID.
    pub member_id: u64,
    /// Revision at which the operation was performed.
    pub revision: i64,
}

/// Key-value pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyValue {
    /// Key.
    pub key: Vec<u8>,
    /// Revision when created.
    pub create_revision: i64,
    /// Revision of the last modification.
    pub mod_revision: i64,
    /// Version (number of modifications since creation).
    pub version: i64,
    /// Value.
    pub value: Vec<u8>,
    /// Attached lease ID (zero when none).
    pub lease: i64,
}

/// Sort order for range results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    None = 0,
    Ascend = 1,
    Descend = 2,
}

impl SortOrder {
    /// The fixed wire code for this order.
    pub fn wire_code(self) -> i32 {
        self as i32
    }

    /// Decode a wire code. Unknown codes are rejected.
    pub fn from_wire(code: i32) -> Result<Self> {
        match code {
            0 => Ok(Self::None),
            1 => Ok(Self::Ascend),
            2 => Ok(Self::Descend),
            other => Err(Error::invalid_request(format!(
                "unknown sort order code {}",
                other
            ))),
        }
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(Self::None),
            "ascend" => Ok(Self::Ascend),
            "descend" => Ok(Self::Descend),
            other => Err(Error::invalid_request(format!(
                "unknown sort order {:?}",
                other
            ))),
        }
    }
}

/// Sort target for range results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortTarget {
    #[default]
    Key = 0,
    Version = 1,
    Create = 2,
    Mod = 3,
    Value = 4,
}

impl SortTarget {
    /// The fixed wire code for this target.
    pub fn wire_code(self) -> i32 {
        self as i32
    }

    /// Decode a wire code. Unknown codes are rejected.
    pub fn from_wire(code: i32) -> Result<Self> {
        match code {
            0 => Ok(Self::Key),
            1 => Ok(Self::Version),
            2 => Ok(Self::Create),
            3 => Ok(Self::Mod),
            4 => Ok(Self::Value),
            other => Err(Error::invalid_request(format!(
                "unknown sort target code {}",
                other
            ))),
        }
    }
}

impl FromStr for SortTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "key" => Ok(Self::Key),
            "version" => Ok(Self::Version),
            "create" => Ok(Self::Create),
            "mod" => Ok(Self::Mod),
            "value" => Ok(Self::Value),
            other => Err(Error::invalid_request(format!(
                "unknown sort target {:?}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_target_wire_table() {
        assert_eq!(SortTarget::Key.wire_code(), 0);
        assert_eq!(SortTarget::Version.wire_code(), 1);
        assert_eq!(SortTarget::Create.wire_code(), 2);
        assert_eq!(SortTarget::Mod.wire_code(), 3);
        assert_eq!(SortTarget::Value.wire_code(), 4);
    }

    #[test]
    fn sort_order_wire_table() {
        assert_eq!(SortOrder::None.wire_code(), 0);
        assert_eq!(SortOrder::Ascend.wire_code(), 1);
        assert_eq!(SortOrder::Descend.wire_code(), 2);
    }

    #[test]
    fn wire_codes_round_trip() {
        for target in [
            SortTarget::Key,
            SortTarget::Version,
            SortTarget::Create,
            SortTarget::Mod,
            SortTarget::Value,
        ] {
            assert_eq!(SortTarget::from_wire(target.wire_code()).unwrap(), target);
        }
        for order in [SortOrder::None, SortOrder::Ascend, SortOrder::Descend] {
            assert_eq!(SortOrder::from_wire(order.wire_code()).unwrap(), order);
        }
    }

    #[test]
    fn unknown_codes_fail_fast() {
        assert!(SortTarget::from_wire(5).is_err());
        assert!(SortOrder::from_wire(3).is_err());
        assert!(SortOrder::from_wire(-1).is_err());
    }

    #[test]
    fn unknown_symbols_fail_fast() {
        assert!("keyy".parse::<SortTarget>().is_err());
        assert!("ASCEND".parse::<SortOrder>().is_err());
        assert_eq!("mod".parse::<SortTarget>().unwrap(), SortTarget::Mod);
        assert_eq!("descend".parse::<SortOrder>().unwrap(), SortOrder::Descend);
    }
}
