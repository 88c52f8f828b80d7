//! Compare-clause evaluation.
//!
//! All clauses of a transaction are evaluated against the state visible at
//! one revision fence and combined with logical AND. A missing key compares
//! as a zeroed record: revisions and version are 0 and the value is empty.

use super::state::KvRecord;
use crate::rpc::txn::{Compare, CompareResult, CompareTarget, CompareTargetUnion};

/// Evaluate one compare clause against a key's current record.
pub fn evaluate(compare: &Compare, record: Option<&KvRecord>) -> bool {
    match (&compare.target, &compare.target_union) {
        (CompareTarget::Version, CompareTargetUnion::Version(expected)) => {
            let actual = record.map(|r| r.version).unwrap_or(0);
            compare_values(actual, *expected, compare.result)
        }
        (CompareTarget::Create, CompareTargetUnion::CreateRevision(expected)) => {
            let actual = record.map(|r| r.create_revision).unwrap_or(0);
            compare_values(actual, *expected, compare.result)
        }
        (CompareTarget::Mod, CompareTargetUnion::ModRevision(expected)) => {
            let actual = record.map(|r| r.mod_revision).unwrap_or(0);
            compare_values(actual, *expected, compare.result)
        }
        (CompareTarget::Value, CompareTargetUnion::Value(expected)) => {
            let actual = record.map(|r| r.value.as_slice()).unwrap_or(&[]);
            compare_bytes(actual, expected, compare.result)
        }
        // Mismatched target and expected-value type.
        _ => false,
    }
}

fn compare_values(actual: i64, expected: i64, result: CompareResult) -> bool {
    match result {
        CompareResult::Equal => actual == expected,
        CompareResult::Greater => actual > expected,
        CompareResult::Less => actual < expected,
    }
}

fn compare_bytes(actual: &[u8], expected: &[u8], result: CompareResult) -> bool {
    match result {
        CompareResult::Equal => actual == expected,
        CompareResult::Greater => actual > expected,
        CompareResult::Less => actual < expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(value: &[u8], version: i64, create_rev: i64, mod_rev: i64) -> KvRecord {
        KvRecord {
            key: b"k".to_vec(),
            value: value.to_vec(),
            create_revision: create_rev,
            mod_revision: mod_rev,
            version,
            lease: 0,
        }
    }

    fn clause(target: CompareTarget, union: CompareTargetUnion, result: CompareResult) -> Compare {
        Compare {
            result,
            target,
            key: b"k".to_vec(),
            target_union: union,
        }
    }

    #[test]
    fn value_equal() {
        let rec = record(b"value", 1, 1, 1);
        let c = clause(
            CompareTarget::Value,
            CompareTargetUnion::Value(b"value".to_vec()),
            CompareResult::Equal,
        );
        assert!(evaluate(&c, Some(&rec)));

        let c = clause(
            CompareTarget::Value,
            CompareTargetUnion::Value(b"notright".to_vec()),
            CompareResult::Equal,
        );
        assert!(!evaluate(&c, Some(&rec)));
    }

    #[test]
    fn revision_ordering() {
        let rec = record(b"v", 3, 5, 9);
        let greater = clause(
            CompareTarget::Mod,
            CompareTargetUnion::ModRevision(1000),
            CompareResult::Less,
        );
        assert!(evaluate(&greater, Some(&rec)));

        let c = clause(
            CompareTarget::Create,
            CompareTargetUnion::CreateRevision(1),
            CompareResult::Greater,
        );
        assert!(evaluate(&c, Some(&rec)));

        let c = clause(
            CompareTarget::Version,
            CompareTargetUnion::Version(100),
            CompareResult::Equal,
        );
        assert!(!evaluate(&c, Some(&rec)));
    }

    #[test]
    fn missing_key_compares_as_zeroed() {
        let c = clause(
            CompareTarget::Version,
            CompareTargetUnion::Version(0),
            CompareResult::Equal,
        );
        assert!(evaluate(&c, None));

        let c = clause(
            CompareTarget::Value,
            CompareTargetUnion::Value(b"x".to_vec()),
            CompareResult::Equal,
        );
        assert!(!evaluate(&c, None));
    }

    #[test]
    fn mismatched_union_never_passes() {
        let rec = record(b"v", 1, 1, 1);
        let c = clause(
            CompareTarget::Version,
            CompareTargetUnion::Value(b"v".to_vec()),
            CompareResult::Equal,
        );
        assert!(!evaluate(&c, Some(&rec)));
    }
}
