pub mod analysis;
pub mod analyzer;
pub mod batch;
pub mod cache;
pub mod config;
pub mod email;
pub mod error;
pub mod filter;
pub mod insights;
pub mod limiter;
pub mod oracle;
pub mod prompts;
pub mod scoring;

pub use analysis::{
    ActionItem, ActionItemAnalysis, Category, ClassificationAnalysis, CompositeAnalysis, Emotion,
    ImportanceAnalysis, Relevance, ScoredEmail, Sentiment, SentimentAnalysis, SummaryAnalysis,
    TaskPriority, Tone, Urgency,
};
pub use analyzer::EmailAnalyzer;
pub use batch::{BatchError, BatchProcessor, BatchResult, BatchStatistics};
pub use cache::AnalysisCache;
pub use config::{
    BatchConfig, CacheConfig, ContentConfig, OracleConfig, RateLimitConfig, TriageConfig,
};
pub use email::Email;
pub use error::Error;
pub use filter::{FilterResult, FilterSpec, SmartFilter};
pub use insights::{Insights, Mood, Recommendation, RecommendationKind, summarize};
pub use limiter::SlidingWindowLimiter;
pub use oracle::gemini::GeminiOracle;
pub use oracle::guarded::{AnalysisOracle, OracleStats, RateLimitStatus};
pub use oracle::{AnalysisKind, TextOracle};
pub use scoring::{ScoringWeights, needs_attention, priority_score};
