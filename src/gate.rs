//! Per-key token bucket admission gate.
//!
//! Each principal gets its own bucket holding up to `capacity` tokens; one
//! token is restored per full `refill_interval` elapsed since the bucket's
//! last top-up, and admitting an action consumes one. Buckets are created
//! full on first sight and live for the life of the process unless the
//! idle sweeper is enabled.

use dashmap::DashMap;
use std::time::{Duration, Instant};

/// Default bucket capacity.
pub const DEFAULT_CAPACITY: u32 = 3;
/// Default refill interval in seconds: one token back every 3 minutes.
pub const DEFAULT_REFILL_SECS: u64 = 180;

// Per-key admission state, owned exclusively by the gate's registry.
#[derive(Debug, Clone)]
struct Bucket {
    tokens: u32,
    last_refill: Instant,
}

/// Registry of per-key buckets plus the shared policy knobs.
///
/// [`try_admit`](AdmissionGate::try_admit) refills, consumes and answers in
/// one step under the key's shard lock, so concurrent calls for the same key
/// cannot lose updates. Calls for different keys never interfere.
pub struct AdmissionGate {
    buckets: DashMap<String, Bucket>,
    capacity: u32,
    refill_interval: Duration,
}

impl AdmissionGate {
    /// Create an empty registry. `capacity` is clamped to at least 1 token
    /// and `refill_interval` to at least 1 ms so decisions stay total.
    pub fn new(capacity: u32, refill_interval: Duration) -> Self {
        Self {
            buckets: DashMap::new(),
            capacity: capacity.max(1),
            refill_interval: refill_interval.max(Duration::from_millis(1)),
        }
    }

    /// Decide whether one action for `key` may proceed at `now`.
    ///
    /// Unseen keys start with a full bucket, so the first call always
    /// admits. Refill restores one token per whole `refill_interval`
    /// elapsed (clamped at capacity) and jumps `last_refill` to `now`:
    /// fractional progress toward the next token is discarded, so after any
    /// refill the next token needs a full interval from that instant. A
    /// `now` earlier than the last refill (clock rollback) refills nothing
    /// and is otherwise harmless.
    pub fn try_admit(&self, key: &str, now: Instant) -> bool {
        let capacity = self.capacity;
        let mut bucket = self
            .buckets
            .entry(key.to_string())
            .or_insert_with(|| Bucket {
                tokens: capacity,
                last_refill: now,
            });

        let elapsed = now.saturating_duration_since(bucket.last_refill);
        let intervals = elapsed.as_nanos() / self.refill_interval.as_nanos();
        if intervals > 0 {
            let add = intervals.min(u128::from(capacity)) as u32;
            bucket.tokens = bucket.tokens.saturating_add(add).min(capacity);
            bucket.last_refill = now;
        }

        if bucket.tokens > 0 {
            bucket.tokens -= 1;
            true
        } else {
            false
        }
    }

    /// Tokens currently stored for `key`, without refilling. `None` when
    /// the key has never been seen. Monitoring only.
    pub fn remaining(&self, key: &str) -> Option<u32> {
        self.buckets.get(key).map(|bucket| bucket.tokens)
    }

    /// Number of live buckets.
    pub fn tracked_keys(&self) -> usize {
        self.buckets.len()
    }

    /// Drop every bucket whose last top-up is `idle_after` or more in the
    /// past, returning how many were evicted. Idleness is measured from
    /// `last_refill`, the only timestamp a bucket carries.
    pub fn sweep_idle(&self, idle_after: Duration, now: Instant) -> usize {
        let before = self.buckets.len();
        self.buckets
            .retain(|_, bucket| now.saturating_duration_since(bucket.last_refill) < idle_after);
        before.saturating_sub(self.buckets.len())
    }
}
