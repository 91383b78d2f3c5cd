use chrono::Utc;
use tracing::warn;

use crate::analysis::{
    ActionItemAnalysis, ClassificationAnalysis, CompositeAnalysis, ImportanceAnalysis,
    SentimentAnalysis, SummaryAnalysis, parse_oracle_json,
};
use crate::config::ContentConfig;
use crate::email::{Email, prepare_for_analysis};
use crate::error::Error;
use crate::oracle::guarded::AnalysisOracle;
use crate::oracle::{AnalysisKind, TextOracle};
use crate::prompts;

/// Runs the five analysis kinds for one email and assembles the composite
/// result.
///
/// The five oracle calls are independent and issued concurrently, bounding
/// total latency to roughly the slowest single call. Each kind is guarded on
/// its own: an oracle failure or unparsable response yields that kind's
/// default record, logged but never propagated. The only whole-email failure
/// is content validation, before any prompt is built.
pub struct EmailAnalyzer<O> {
    oracle: AnalysisOracle<O>,
    content: ContentConfig,
}

impl<O: TextOracle> EmailAnalyzer<O> {
    pub fn new(oracle: AnalysisOracle<O>, content: ContentConfig) -> Self {
        Self { oracle, content }
    }

    pub fn oracle(&self) -> &AnalysisOracle<O> {
        &self.oracle
    }

    pub fn content_config(&self) -> &ContentConfig {
        &self.content
    }

    /// Analyze one email across all five kinds.
    pub async fn analyze(&self, email: &Email) -> Result<CompositeAnalysis, Error> {
        let prepared = prepare_for_analysis(email, &self.content)?;
        let content = prepared.analysis_text();

        let (importance, summary, action_items, sentiment, classification) = tokio::join!(
            self.analyze_kind::<ImportanceAnalysis>(
                AnalysisKind::Importance,
                prompts::importance(&content),
                &prepared.id,
            ),
            self.analyze_kind::<SummaryAnalysis>(
                AnalysisKind::Summary,
                prompts::summary(&content),
                &prepared.id,
            ),
            self.analyze_kind::<ActionItemAnalysis>(
                AnalysisKind::ActionItems,
                prompts::action_items(&content),
                &prepared.id,
            ),
            self.analyze_kind::<SentimentAnalysis>(
                AnalysisKind::Sentiment,
                prompts::sentiment(&content),
                &prepared.id,
            ),
            self.analyze_kind::<ClassificationAnalysis>(
                AnalysisKind::Classification,
                prompts::classification(&content, &prepared.subject),
                &prepared.id,
            ),
        );

        Ok(CompositeAnalysis {
            email_id: prepared.id,
            timestamp: prepared.timestamp,
            analyzed_at: Utc::now(),
            importance,
            summary,
            action_items,
            sentiment,
            classification,
        })
    }

    /// Run one analysis kind, absorbing every failure into the default
    /// record for that kind.
    async fn analyze_kind<T>(&self, kind: AnalysisKind, prompt: String, email_id: &str) -> T
    where
        T: serde::de::DeserializeOwned + Default,
    {
        let response = match self.oracle.generate(&prompt, kind).await {
            Ok(response) => response,
            Err(e) => {
                warn!(email_id, kind = %kind, error = %e, "analysis kind failed, using default");
                return T::default();
            }
        };
        match parse_oracle_json(&response) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(
                    email_id,
                    kind = %kind,
                    error = %e,
                    "unparsable oracle response, using default"
                );
                T::default()
            }
        }
    }
}
