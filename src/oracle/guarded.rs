use serde::Serialize;
use tracing::debug;

use crate::cache::{AnalysisCache, cache_key};
use crate::config::{CacheConfig, RateLimitConfig};
use crate::error::Error;
use crate::limiter::SlidingWindowLimiter;
use crate::oracle::{AnalysisKind, TextOracle};

/// Whether the limiter would currently admit another call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateLimitStatus {
    Available,
    Limited,
}

/// Operational counters for monitoring endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OracleStats {
    pub cache_size: usize,
    pub recent_requests: usize,
    pub rate_limit_status: RateLimitStatus,
}

/// Wraps any `TextOracle` with response caching and sliding-window admission
/// control.
///
/// Call order per request:
/// 1. Cache lookup. A live entry is returned verbatim; cache hits perform no
///    external call and spend no rate budget.
/// 2. Admission check. Denial fails fast with `Error::RateLimited` — no
///    retry, no queuing; the caller decides whether to try again later.
/// 3. Inner oracle invocation; the response is cached before it is returned.
pub struct AnalysisOracle<O> {
    inner: O,
    cache: AnalysisCache,
    limiter: SlidingWindowLimiter,
}

impl<O: TextOracle> AnalysisOracle<O> {
    pub fn new(inner: O, cache: &CacheConfig, rate_limit: &RateLimitConfig) -> Self {
        Self {
            inner,
            cache: AnalysisCache::new(cache),
            limiter: SlidingWindowLimiter::new(rate_limit),
        }
    }

    /// Generate a response for `prompt`, memoized under `(kind, prompt)`.
    pub async fn generate(&self, prompt: &str, kind: AnalysisKind) -> Result<String, Error> {
        let key = cache_key(kind.as_str(), prompt);
        if let Some(cached) = self.cache.get(&key) {
            debug!(kind = %kind, "cache hit");
            return Ok(cached);
        }

        if !self.limiter.try_admit() {
            return Err(Error::RateLimited);
        }

        let response = self.inner.generate(prompt).await?;
        self.cache.insert(key, response.clone());
        Ok(response)
    }

    /// Drop expired cache entries and enforce the entry bound.
    pub fn cleanup_cache(&self) {
        self.cache.cleanup();
    }

    pub fn stats(&self) -> OracleStats {
        OracleStats {
            cache_size: self.cache.len(),
            recent_requests: self.limiter.recent_count(),
            rate_limit_status: if self.limiter.at_capacity() {
                RateLimitStatus::Limited
            } else {
                RateLimitStatus::Available
            },
        }
    }
}
