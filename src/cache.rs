use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use sha2::{Digest, Sha256};

use crate::config::CacheConfig;

/// Derive the cache key for a `(kind, prompt)` pair.
///
/// Full-content SHA-256 digest, namespaced by analysis kind. Two prompts
/// differing anywhere in their text get distinct keys.
pub fn cache_key(kind: &str, prompt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(kind.as_bytes());
    hasher.update([0u8]);
    hasher.update(prompt.as_bytes());
    format!("{kind}:{:x}", hasher.finalize())
}

struct CacheEntry {
    response: String,
    stored_at: Instant,
}

/// Time-bounded memoized store for oracle responses.
///
/// Backed by `RwLock<HashMap>`. Entries expire after the configured TTL,
/// checked at read time; `cleanup` additionally drops expired entries and
/// enforces the entry bound. There is no eviction on insert.
pub struct AnalysisCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
    max_entries: usize,
}

impl AnalysisCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: Duration::from_millis(config.ttl_ms),
            max_entries: config.max_entries,
        }
    }

    /// Return the cached response for `key` if present and still live.
    pub fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.response.clone())
    }

    /// Store a response. Overwrites any existing entry for the key.
    pub fn insert(&self, key: String, response: String) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(
            key,
            CacheEntry {
                response,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drop expired entries, then enforce the entry bound by evicting the
    /// oldest survivors. Intended to be called periodically, not on insert.
    pub fn cleanup(&self) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);

        if entries.len() > self.max_entries {
            let excess = entries.len() - self.max_entries;
            let mut oldest: Vec<(String, Instant)> = entries
                .iter()
                .map(|(k, v)| (k.clone(), v.stored_at))
                .collect();
            oldest.sort_by_key(|(_, stored_at)| *stored_at);
            for (key, _) in oldest.into_iter().take(excess) {
                entries.remove(&key);
            }
        }
    }

    /// Number of entries currently held, live or expired.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
