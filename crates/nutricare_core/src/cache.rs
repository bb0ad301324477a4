//! Time-bounded snapshot cache.
//!
//! Holds one value for a fixed TTL. Callers pass the current `Instant`, so
//! expiry is deterministic under test and no global clock or state is read.

use std::time::{Duration, Instant};

/// Single-slot cache whose entry expires `ttl` after it was stored.
#[derive(Debug, Clone)]
pub struct SnapshotCache<T> {
    ttl: Duration,
    entry: Option<(Instant, T)>,
}

impl<T> SnapshotCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Stores `value`, replacing any previous entry.
    pub fn put(&mut self, value: T, now: Instant) {
        self.entry = Some((now, value));
    }

    /// Returns the entry while `now - stored_at < ttl`.
    pub fn get(&self, now: Instant) -> Option<&T> {
        let (stored_at, value) = self.entry.as_ref()?;
        (now.saturating_duration_since(*stored_at) < self.ttl).then_some(value)
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }
}
