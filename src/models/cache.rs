//! TTL-bounded cache for resolved domain models.
//!
//! One mutex owns both the entry map and the hit/miss/size counters, so
//! statistics are always consistent with map contents at the instant of any
//! single operation. Expiry is computed on read; there is no background
//! sweep.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use super::metadata::DomainModel;

struct CacheEntry {
    model: Arc<DomainModel>,
    cached_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.cached_at.elapsed() > self.ttl
    }
}

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CacheStatistics {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

impl CacheStatistics {
    /// Hits over total lookups, or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    stats: CacheStatistics,
}

/// In-memory TTL cache keyed by `domain_id`.
pub struct ModelCache {
    inner: Mutex<CacheInner>,
    default_ttl: Duration,
}

impl ModelCache {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                stats: CacheStatistics::default(),
            }),
            default_ttl,
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Look up a model, counting a hit or miss.
    ///
    /// An expired entry is evicted on the spot and counts as a miss.
    pub fn get(&self, domain_id: &str) -> Option<Arc<DomainModel>> {
        let mut inner = self.inner.lock();

        let expired = match inner.entries.get(domain_id) {
            None => {
                inner.stats.misses += 1;
                return None;
            }
            Some(entry) => entry.is_expired(),
        };

        if expired {
            inner.entries.remove(domain_id);
            inner.stats.size = inner.entries.len();
            inner.stats.misses += 1;
            return None;
        }

        inner.stats.hits += 1;
        inner.entries.get(domain_id).map(|e| e.model.clone())
    }

    /// Insert or overwrite an entry, stamping `cached_at` now.
    pub fn put(&self, domain_id: &str, model: Arc<DomainModel>, ttl: Option<Duration>) {
        let mut inner = self.inner.lock();
        inner.entries.insert(
            domain_id.to_string(),
            CacheEntry {
                model,
                cached_at: Instant::now(),
                ttl: ttl.unwrap_or(self.default_ttl),
            },
        );
        inner.stats.size = inner.entries.len();
    }

    /// Remove one entry, if present.
    pub fn invalidate(&self, domain_id: &str) {
        let mut inner = self.inner.lock();
        inner.entries.remove(domain_id);
        inner.stats.size = inner.entries.len();
    }

    /// Remove every entry.
    pub fn invalidate_all(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.stats.size = 0;
    }

    pub fn statistics(&self) -> CacheStatistics {
        self.inner.lock().stats
    }
}
