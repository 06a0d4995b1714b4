//! Short-lived in-memory cache keyed by PIN.
//!
//! Entries are never mutated: a `put` replaces the whole entry with a fresh
//! timestamp. Stale entries read as misses and are only dropped by the sweep
//! that runs once the map grows past [`SWEEP_THRESHOLD`] entries. The sweep is
//! a cleanup, not a size bound; a cache full of fresh entries may keep
//! growing.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Lifetime of a cached payload.
pub const CACHE_TTL: Duration = Duration::from_secs(300);

/// Entry count above which a `put` sweeps out expired entries.
pub const SWEEP_THRESHOLD: usize = 200;

struct CacheEntry<V> {
    stored_at: Instant,
    payload: V,
}

/// Thread-safe TTL cache.
///
/// Designed to be wrapped in `Arc` and shared across request handlers. The
/// lock is held only for the map operation itself.
pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    ttl: Duration,
    sweep_threshold: usize,
}

impl<V: Clone> TtlCache<V> {
    /// Create an empty cache with the standard TTL and sweep threshold.
    pub fn new() -> Self {
        Self::with_limits(CACHE_TTL, SWEEP_THRESHOLD)
    }

    pub fn with_limits(ttl: Duration, sweep_threshold: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            sweep_threshold,
        }
    }

    /// Look up a fresh payload.
    pub fn get(&self, key: &str) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    /// Store a payload, replacing any previous entry for `key`.
    pub fn put(&self, key: impl Into<String>, payload: V) {
        self.put_at(key, payload, Instant::now());
    }

    /// [`get`](Self::get) against an explicit clock reading.
    pub fn get_at(&self, key: &str, now: Instant) -> Option<V> {
        let entries = self.lock();
        let entry = entries.get(key)?;
        if now.saturating_duration_since(entry.stored_at) < self.ttl {
            Some(entry.payload.clone())
        } else {
            None
        }
    }

    /// [`put`](Self::put) against an explicit clock reading.
    pub fn put_at(&self, key: impl Into<String>, payload: V, now: Instant) {
        let mut entries = self.lock();
        entries.insert(
            key.into(),
            CacheEntry {
                stored_at: now,
                payload,
            },
        );

        if entries.len() > self.sweep_threshold {
            let before = entries.len();
            let ttl = self.ttl;
            entries.retain(|_, e| now.saturating_duration_since(e.stored_at) < ttl);
            tracing::debug!(
                removed = before - entries.len(),
                remaining = entries.len(),
                "Swept expired cache entries",
            );
        }
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<V>>> {
        // Entries are replaced whole, so a poisoned map is still consistent.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
