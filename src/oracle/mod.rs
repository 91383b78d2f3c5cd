pub mod gemini;
pub mod guarded;

use crate::error::Error;

/// Trait for text-generation oracles: one prompt in, one text blob out.
///
/// Implementors must be thread-safe (`Send + Sync`) to allow shared usage
/// across concurrent analysis tasks. The oracle is treated as an unreliable
/// black box; output-format enforcement happens in the callers.
pub trait TextOracle: Send + Sync {
    fn generate(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, Error>> + Send;
}

/// The analysis kinds the pipeline asks the oracle to perform.
///
/// Also namespaces cache keys, so identical prompts for different kinds
/// never share a cached response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisKind {
    Importance,
    Summary,
    ActionItems,
    Sentiment,
    Classification,
    Filter,
}

impl AnalysisKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisKind::Importance => "importance",
            AnalysisKind::Summary => "summary",
            AnalysisKind::ActionItems => "actions",
            AnalysisKind::Sentiment => "sentiment",
            AnalysisKind::Classification => "classification",
            AnalysisKind::Filter => "filter",
        }
    }
}

impl std::fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
