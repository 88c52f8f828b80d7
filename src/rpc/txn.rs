//! Transaction wire messages: compare clauses and branch operations.
//!
//! A transaction is a single atomic compare-and-branch unit. The remote
//! store evaluates all compare clauses as a logical AND at one revision
//! fence, then executes exactly one of the two branches; there is never a
//! "neither" outcome. The client performs no local evaluation.

use super::kv::{
    DeleteRangeRequest, DeleteRangeResponse, PutRequest, PutResponse, RangeRequest, RangeResponse,
    ResponseHeader,
};
use serde::{Deserialize, Serialize};

/// Transaction request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TxnRequest {
    /// Compare predicates; all must hold for the success branch to run.
    pub compare: Vec<Compare>,
    /// Operations executed atomically when every compare holds.
    pub success: Vec<RequestOp>,
    /// Operations executed atomically when any compare fails.
    pub failure: Vec<RequestOp>,
}

/// Compare predicate for transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Compare {
    /// Comparison operator.
    pub result: CompareResult,
    /// Attribute of the key being compared.
    pub target: CompareTarget,
    /// Key to compare (already namespace-translated by the caller).
    pub key: Vec<u8>,
    /// Expected value, typed by target.
    pub target_union: CompareTargetUnion,
}

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareResult {
    Equal,
    Greater,
    Less,
}

/// Attribute of a key a compare clause inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareTarget {
    Version,
    Create,
    Mod,
    Value,
}

/// Expected value for a compare clause, typed by its target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CompareTargetUnion {
    /// Version to compare.
    Version(i64),
    /// Create revision to compare.
    CreateRevision(i64),
    /// Mod revision to compare.
    ModRevision(i64),
    /// Value to compare.
    Value(Vec<u8>),
}

/// Request operation within a transaction branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RequestOp {
    /// Range (get) operation.
    Range(RangeRequest),
    /// Put operation.
    Put(PutRequest),
    /// Delete operation.
    DeleteRange(DeleteRangeRequest),
}

/// Response operation from an executed branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ResponseOp {
    /// Range response.
    Range(RangeResponse),
    /// Put response.
    Put(PutResponse),
    /// Delete response.
    DeleteRange(DeleteRangeResponse),
}

/// Transaction response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TxnResponse {
    /// Response header.
    pub header: ResponseHeader,
    /// Whether every compare clause held (success branch ran).
    pub succeeded: bool,
    /// Results from the branch that executed, in order.
    pub responses: Vec<ResponseOp>,
}

impl TxnRequest {
    /// Check whether the transaction carries nothing to do.
    pub fn is_empty(&self) -> bool {
        self.compare.is_empty() && self.success.is_empty() && self.failure.is_empty()
    }
}
