//! Per-call time budgets.
//!
//! Every outgoing call carries a deadline computed once at the call site.
//! A zero budget produces a deadline that is already expired, so the call
//! fails deterministically before any work is attempted. Blocking waits
//! (lock acquisition, watch) are bounded by the same deadline.

use std::time::{Duration, Instant};

/// An absolute point in time by which a call must complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    /// Create a deadline the given duration from now.
    ///
    /// A zero duration yields a deadline that is already expired.
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now() + budget,
        }
    }

    /// The absolute expiry instant.
    pub fn instant(&self) -> Instant {
        self.at
    }

    /// Check whether the deadline has passed.
    pub fn expired(&self) -> bool {
        Instant::now() >= self.at
    }

    /// Time remaining until expiry.
    ///
    /// Returns zero if the deadline has already passed.
    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }
}
