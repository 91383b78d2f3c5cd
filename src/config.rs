use serde::Deserialize;

use crate::error::Error;
use crate::scoring::ScoringWeights;

/// Top-level configuration, loadable from `mailtriage.toml`.
///
/// Every section and field has a default, so an empty file (or no file at
/// all) yields a fully usable configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TriageConfig {
    #[serde(default)]
    pub oracle: OracleConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub scoring: ScoringWeights,
}

/// Model endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OracleConfig {
    /// Model identifier sent to the generation endpoint.
    #[serde(default = "default_model")]
    pub model: String,
    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in milliseconds. A call past this deadline is
    /// abandoned and treated as a failure.
    #[serde(default = "default_oracle_timeout_ms")]
    pub timeout_ms: u64,
}

/// Response cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Time-to-live for cached responses in milliseconds (default: 5 minutes).
    #[serde(default = "default_cache_ttl_ms")]
    pub ttl_ms: u64,
    /// Upper bound on total entries, enforced by `cleanup`, not on insert.
    #[serde(default = "default_cache_max_entries")]
    pub max_entries: usize,
}

/// Sliding-window admission control configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Window width in milliseconds (default: 1 minute).
    #[serde(default = "default_rate_window_ms")]
    pub window_ms: u64,
    /// Maximum model invocations per window (default: 60).
    #[serde(default = "default_rate_max_requests")]
    pub max_requests: usize,
}

/// Batch processing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchConfig {
    /// Number of emails analyzed concurrently per chunk (default: 3).
    #[serde(default = "default_concurrent_processing")]
    pub concurrent_processing: usize,
    /// Pause between chunks in milliseconds, a coarse throttle to stay
    /// under the rate-limit window (default: 1000).
    #[serde(default = "default_chunk_delay_ms")]
    pub chunk_delay_ms: u64,
}

/// Content normalization limits.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    /// Cleaned body text is truncated to this many characters before it is
    /// embedded in a prompt (default: 4000).
    #[serde(default = "default_max_content_length")]
    pub max_content_length: usize,
    /// Raw bodies above this length are rejected outright instead of being
    /// cleaned (default: 100_000).
    #[serde(default = "default_max_raw_length")]
    pub max_raw_length: usize,
}

fn default_model() -> String {
    "gemini-2.5-flash".into()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".into()
}

fn default_oracle_timeout_ms() -> u64 {
    30_000
}

fn default_cache_ttl_ms() -> u64 {
    5 * 60 * 1000
}

fn default_cache_max_entries() -> usize {
    1000
}

fn default_rate_window_ms() -> u64 {
    60_000
}

fn default_rate_max_requests() -> usize {
    60
}

fn default_concurrent_processing() -> usize {
    3
}

fn default_chunk_delay_ms() -> u64 {
    1000
}

fn default_max_content_length() -> usize {
    4000
}

fn default_max_raw_length() -> usize {
    100_000
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            timeout_ms: default_oracle_timeout_ms(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_ms: default_cache_ttl_ms(),
            max_entries: default_cache_max_entries(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_ms: default_rate_window_ms(),
            max_requests: default_rate_max_requests(),
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrent_processing: default_concurrent_processing(),
            chunk_delay_ms: default_chunk_delay_ms(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            max_content_length: default_max_content_length(),
            max_raw_length: default_max_raw_length(),
        }
    }
}

impl TriageConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, Error> {
        let config: Self = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| Error::Config(format!("failed to read config file: {e}")))?;
        Self::from_toml(&content)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.batch.concurrent_processing == 0 {
            return Err(Error::Config(
                "batch.concurrent_processing must be at least 1".into(),
            ));
        }
        if self.rate_limit.max_requests == 0 {
            return Err(Error::Config(
                "rate_limit.max_requests must be at least 1".into(),
            ));
        }
        if self.content.max_content_length == 0 {
            return Err(Error::Config(
                "content.max_content_length must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = TriageConfig::from_toml("").unwrap();
        assert_eq!(config.oracle.model, "gemini-2.5-flash");
        assert_eq!(config.oracle.timeout_ms, 30_000);
        assert_eq!(config.cache.ttl_ms, 300_000);
        assert_eq!(config.cache.max_entries, 1000);
        assert_eq!(config.rate_limit.window_ms, 60_000);
        assert_eq!(config.rate_limit.max_requests, 60);
        assert_eq!(config.batch.concurrent_processing, 3);
        assert_eq!(config.batch.chunk_delay_ms, 1000);
        assert_eq!(config.content.max_content_length, 4000);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let toml = r#"
            [rate_limit]
            max_requests = 10

            [batch]
            concurrent_processing = 5
        "#;
        let config = TriageConfig::from_toml(toml).unwrap();
        assert_eq!(config.rate_limit.max_requests, 10);
        assert_eq!(config.rate_limit.window_ms, 60_000);
        assert_eq!(config.batch.concurrent_processing, 5);
        assert_eq!(config.batch.chunk_delay_ms, 1000);
    }

    #[test]
    fn zero_concurrency_rejected() {
        let toml = r#"
            [batch]
            concurrent_processing = 0
        "#;
        let err = TriageConfig::from_toml(toml).unwrap_err();
        assert!(err.to_string().contains("concurrent_processing"));
    }

    #[test]
    fn zero_rate_capacity_rejected() {
        let toml = r#"
            [rate_limit]
            max_requests = 0
        "#;
        let err = TriageConfig::from_toml(toml).unwrap_err();
        assert!(err.to_string().contains("max_requests"));
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = TriageConfig::from_toml("not = [valid").unwrap_err();
        assert_eq!(err.kind(), "config");
    }

    #[test]
    fn scoring_weights_overridable() {
        let toml = r#"
            [scoring]
            deadline_bonus = 40.0
        "#;
        let config = TriageConfig::from_toml(toml).unwrap();
        assert_eq!(config.scoring.deadline_bonus, 40.0);
        // Untouched weights keep their defaults
        assert_eq!(config.scoring.complaint_bonus, 30.0);
    }
}
