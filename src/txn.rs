//! Transaction builder.
//!
//! Describes one atomic compare-and-branch unit without wiring the three
//! lists by hand. Compare constructors and branch operations route every key
//! through the request factory, so embedded keys are namespaced exactly as a
//! standalone get/put/delete would be. The builder only packages; the remote
//! store evaluates.

use crate::kv::{DeleteOptions, GetOptions, PutOptions, RequestFactory};
use crate::rpc::txn::{Compare, CompareResult, CompareTarget, CompareTargetUnion, RequestOp};

/// Builder for an atomic compare-and-branch transaction.
///
/// Assign the ordered `compare`, `success`, and `failure` lists; helper
/// methods construct properly namespaced clauses and operations. All compare
/// clauses are evaluated server-side as a logical AND; exactly one branch
/// executes atomically.
#[derive(Debug)]
pub struct TxnBuilder {
    /// Compare predicates; all must hold for `success` to run.
    pub compare: Vec<Compare>,
    /// Operations executed atomically when every compare holds.
    pub success: Vec<RequestOp>,
    /// Operations executed atomically when any compare fails.
    pub failure: Vec<RequestOp>,

    factory: RequestFactory,
}

impl TxnBuilder {
    pub(crate) fn new(factory: RequestFactory) -> Self {
        Self {
            compare: Vec::new(),
            success: Vec::new(),
            failure: Vec::new(),
            factory,
        }
    }

    fn compare_clause(
        &self,
        key: &[u8],
        result: CompareResult,
        target: CompareTarget,
        target_union: CompareTargetUnion,
    ) -> Compare {
        Compare {
            result,
            target,
            key: self.factory.key(key),
            target_union,
        }
    }

    /// Compare a key's value.
    pub fn value(&self, key: &[u8], op: CompareResult, expected: impl Into<Vec<u8>>) -> Compare {
        self.compare_clause(
            key,
            op,
            CompareTarget::Value,
            CompareTargetUnion::Value(expected.into()),
        )
    }

    /// Compare a key's version counter.
    pub fn version(&self, key: &[u8], op: CompareResult, expected: i64) -> Compare {
        self.compare_clause(
            key,
            op,
            CompareTarget::Version,
            CompareTargetUnion::Version(expected),
        )
    }

    /// Compare the revision at which a key was created.
    pub fn create_revision(&self, key: &[u8], op: CompareResult, expected: i64) -> Compare {
        self.compare_clause(
            key,
            op,
            CompareTarget::Create,
            CompareTargetUnion::CreateRevision(expected),
        )
    }

    /// Compare the revision of a key's last modification.
    pub fn mod_revision(&self, key: &[u8], op: CompareResult, expected: i64) -> Compare {
        self.compare_clause(
            key,
            op,
            CompareTarget::Mod,
            CompareTargetUnion::ModRevision(expected),
        )
    }

    /// A put operation for a branch; lease id attached only when provided.
    pub fn put(&self, key: &[u8], value: &[u8], lease: Option<i64>) -> RequestOp {
        let opts = PutOptions {
            lease,
            ..Default::default()
        };
        RequestOp::Put(self.factory.put_request(key, value, &opts))
    }

    /// A range read operation for a branch.
    pub fn get(&self, key: &[u8], opts: GetOptions) -> RequestOp {
        RequestOp::Range(self.factory.range_request(key, &opts))
    }

    /// A delete operation for a branch.
    pub fn del(&self, key: &[u8], opts: DeleteOptions) -> RequestOp {
        RequestOp::DeleteRange(self.factory.delete_request(key, &opts))
    }

    /// Package the assigned lists into a wire request.
    pub(crate) fn into_request(self) -> crate::rpc::txn::TxnRequest {
        crate::rpc::txn::TxnRequest {
            compare: self.compare,
            success: self.success,
            failure: self.failure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::Namespace;

    fn builder() -> TxnBuilder {
        let ns = Namespace::new(b"/ns/".to_vec()).unwrap();
        TxnBuilder::new(RequestFactory::new(Some(ns)))
    }

    #[test]
    fn compare_clauses_are_namespaced() {
        let txn = builder();
        let clause = txn.value(b"txn", CompareResult::Equal, b"value".to_vec());
        assert_eq!(clause.key, b"/ns/txn");
        assert!(matches!(clause.target, CompareTarget::Value));

        let clause = txn.create_revision(b"txn", CompareResult::Greater, 1);
        assert_eq!(clause.key, b"/ns/txn");
        assert!(matches!(
            clause.target_union,
            CompareTargetUnion::CreateRevision(1)
        ));
    }

    #[test]
    fn branch_operations_are_namespaced() {
        let txn = builder();
        match txn.put(b"txn-test", b"success", None) {
            RequestOp::Put(req) => {
                assert_eq!(req.key, b"/ns/txn-test");
                assert_eq!(req.lease, 0);
            }
            other => panic!("expected put, got {:?}", other),
        }

        match txn.put(b"txn-test", b"success", Some(9)) {
            RequestOp::Put(req) => assert_eq!(req.lease, 9),
            other => panic!("expected put, got {:?}", other),
        }
    }

    #[test]
    fn assigned_lists_package_in_order() {
        let mut txn = builder();
        txn.compare = vec![txn.value(b"a", CompareResult::Equal, b"1".to_vec())];
        txn.success = vec![
            txn.put(b"s1", b"v", None),
            txn.put(b"s2", b"v", None),
        ];
        txn.failure = vec![txn.put(b"f1", b"v", None)];

        let req = txn.into_request();
        assert_eq!(req.compare.len(), 1);
        assert_eq!(req.success.len(), 2);
        assert_eq!(req.failure.len(), 1);
    }
}
