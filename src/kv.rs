//! Request translation: keys, range boundaries, and symbolic options.
//!
//! The [`RequestFactory`] deterministically rewrites every key and range
//! boundary so operations are confined to the configured namespace, and
//! converts symbolic sort options into wire codes. It constructs outgoing
//! request values only; it performs no I/O.

use std::time::Duration;

use crate::namespace::{is_open_range_end, Namespace};
use crate::rpc::kv::{DeleteRangeRequest, PutRequest, RangeRequest, SortOrder, SortTarget};

/// Options for a range read.
#[derive(Debug, Clone, Default)]
pub struct GetOptions {
    /// End of range (exclusive). The single zero byte is the open-range
    /// sentinel; absent means single-key addressing.
    pub range_end: Option<Vec<u8>>,
    /// Sort order; left unset on the wire when absent.
    pub sort_order: Option<SortOrder>,
    /// Sort target; left unset on the wire when absent.
    pub sort_target: Option<SortTarget>,
    /// Only return the count of keys.
    pub count_only: bool,
    /// Only return keys, not values.
    pub keys_only: bool,
    /// Maximum number of keys to return (0 = no limit).
    pub limit: i64,
    /// Per-call timeout; the session default applies when absent.
    pub timeout: Option<Duration>,
}

impl GetOptions {
    pub fn range_end(mut self, range_end: impl Into<Vec<u8>>) -> Self {
        self.range_end = Some(range_end.into());
        self
    }

    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = Some(order);
        self
    }

    pub fn sort_target(mut self, target: SortTarget) -> Self {
        self.sort_target = Some(target);
        self
    }

    pub fn count_only(mut self) -> Self {
        self.count_only = true;
        self
    }

    pub fn keys_only(mut self) -> Self {
        self.keys_only = true;
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Options for a delete.
#[derive(Debug, Clone, Default)]
pub struct DeleteOptions {
    /// End of range (exclusive). Absent and empty both mean exactly one
    /// key; the single zero byte means everything under the namespace.
    pub range_end: Option<Vec<u8>>,
    /// Return the previous key-values.
    pub prev_kv: bool,
    /// Per-call timeout; the session default applies when absent.
    pub timeout: Option<Duration>,
}

impl DeleteOptions {
    pub fn range_end(mut self, range_end: impl Into<Vec<u8>>) -> Self {
        self.range_end = Some(range_end.into());
        self
    }

    pub fn prev_kv(mut self) -> Self {
        self.prev_kv = true;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Options for a put.
#[derive(Debug, Clone, Default)]
pub struct PutOptions {
    /// Lease to attach. Absent is distinguishable from "no lease" on the
    /// wire only as the zero id, so absent and zero are equivalent here.
    pub lease: Option<i64>,
    /// Return the previous key-value.
    pub prev_kv: bool,
    /// Per-call timeout; the session default applies when absent.
    pub timeout: Option<Duration>,
}

impl PutOptions {
    pub fn lease(mut self, lease_id: i64) -> Self {
        self.lease = Some(lease_id);
        self
    }

    pub fn prev_kv(mut self) -> Self {
        self.prev_kv = true;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Builds wire requests, confining every key to the configured namespace.
///
/// Without a namespace the factory is the identity on keys and boundaries:
/// the plain view used to observe raw, prefixed keys.
#[derive(Debug, Clone)]
pub struct RequestFactory {
    namespace: Option<Namespace>,
}

impl RequestFactory {
    /// Create a factory for the given namespace (or the plain view).
    pub fn new(namespace: Option<Namespace>) -> Self {
        Self { namespace }
    }

    /// The configured namespace, if any.
    pub fn namespace(&self) -> Option<&Namespace> {
        self.namespace.as_ref()
    }

    /// Prepend the namespace to a key.
    pub fn key(&self, key: &[u8]) -> Vec<u8> {
        match &self.namespace {
            Some(ns) => ns.prefixed(key),
            None => key.to_vec(),
        }
    }

    /// Translate a range end: the open-range sentinel is re-targeted to the
    /// namespace's own upper bound so an open-ended query means "every key
    /// in this namespace" rather than "every key in the store".
    fn range_end(&self, range_end: &[u8]) -> Vec<u8> {
        match &self.namespace {
            Some(ns) => ns.translate_range_end(range_end),
            None => range_end.to_vec(),
        }
    }

    /// Build a range read request.
    pub fn range_request(&self, key: &[u8], opts: &GetOptions) -> RangeRequest {
        RangeRequest {
            key: self.key(key),
            range_end: opts
                .range_end
                .as_deref()
                .map(|end| self.range_end(end))
                .unwrap_or_default(),
            limit: opts.limit,
            sort_order: opts.sort_order.map(SortOrder::wire_code).unwrap_or(0),
            sort_target: opts.sort_target.map(SortTarget::wire_code).unwrap_or(0),
            keys_only: opts.keys_only,
            count_only: opts.count_only,
        }
    }

    /// Build a delete request.
    ///
    /// An absent or empty range end deletes exactly one key; the sentinel
    /// and any other non-empty value delete a range.
    pub fn delete_request(&self, key: &[u8], opts: &DeleteOptions) -> DeleteRangeRequest {
        let range_end = match opts.range_end.as_deref() {
            Some(end) if is_open_range_end(end) || !end.is_empty() => self.range_end(end),
            _ => Vec::new(),
        };
        DeleteRangeRequest {
            key: self.key(key),
            range_end,
            prev_kv: opts.prev_kv,
        }
    }

    /// Build a put request. The lease id is attached only when provided.
    pub fn put_request(&self, key: &[u8], value: &[u8], opts: &PutOptions) -> PutRequest {
        PutRequest {
            key: self.key(key),
            value: value.to_vec(),
            lease: opts.lease.unwrap_or(0),
            prev_kv: opts.prev_kv,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::OPEN_RANGE_END;

    fn namespaced(prefix: &[u8]) -> RequestFactory {
        RequestFactory::new(Some(Namespace::new(prefix.to_vec()).unwrap()))
    }

    fn plain() -> RequestFactory {
        RequestFactory::new(None)
    }

    #[test]
    fn get_prefixes_key_and_range_end() {
        let factory = namespaced(b"/ns/");
        let req = factory.range_request(b"apple", &GetOptions::default().range_end("appleeee"));
        assert_eq!(req.key, b"/ns/apple");
        assert_eq!(req.range_end, b"/ns/appleeee");
    }

    #[test]
    fn get_sentinel_covers_exactly_the_namespace() {
        let factory = namespaced(b"/ns/");
        let req = factory.range_request(b"", &GetOptions::default().range_end(OPEN_RANGE_END));
        assert_eq!(req.key, b"/ns/");
        assert_eq!(req.range_end, b"/ns0");
    }

    #[test]
    fn get_without_range_end_is_single_key() {
        let factory = namespaced(b"/ns/");
        let req = factory.range_request(b"apple", &GetOptions::default());
        assert_eq!(req.key, b"/ns/apple");
        assert!(req.range_end.is_empty());
    }

    #[test]
    fn absent_sort_options_stay_unset() {
        let factory = namespaced(b"/ns/");
        let req = factory.range_request(b"k", &GetOptions::default());
        assert_eq!(req.sort_order, 0);
        assert_eq!(req.sort_target, 0);
    }

    #[test]
    fn sort_symbols_translate_through_fixed_tables() {
        let factory = namespaced(b"/ns/");
        let req = factory.range_request(
            b"k",
            &GetOptions::default()
                .sort_order(SortOrder::Descend)
                .sort_target(SortTarget::Mod),
        );
        assert_eq!(req.sort_order, 2);
        assert_eq!(req.sort_target, 3);
    }

    #[test]
    fn delete_distinguishes_single_key_from_ranges() {
        let factory = namespaced(b"/ns/");

        let single = factory.delete_request(b"test", &DeleteOptions::default());
        assert!(single.range_end.is_empty());

        let empty_end = factory.delete_request(b"test", &DeleteOptions::default().range_end(""));
        assert!(empty_end.range_end.is_empty());

        let ranged = factory.delete_request(b"test", &DeleteOptions::default().range_end("testtt"));
        assert_eq!(ranged.range_end, b"/ns/testtt");

        let open = factory.delete_request(b"", &DeleteOptions::default().range_end(OPEN_RANGE_END));
        assert_eq!(open.key, b"/ns/");
        assert_eq!(open.range_end, b"/ns0");
    }

    #[test]
    fn put_attaches_lease_only_when_provided() {
        let factory = namespaced(b"/ns/");

        let bare = factory.put_request(b"k", b"v", &PutOptions::default());
        assert_eq!(bare.key, b"/ns/k");
        assert_eq!(bare.lease, 0);

        let leased = factory.put_request(b"k", b"v", &PutOptions::default().lease(77));
        assert_eq!(leased.lease, 77);
    }

    #[test]
    fn plain_view_translates_nothing() {
        let factory = plain();
        let req = factory.range_request(b"apple", &GetOptions::default().range_end(OPEN_RANGE_END));
        assert_eq!(req.key, b"apple");
        assert_eq!(req.range_end, OPEN_RANGE_END);
    }
}
