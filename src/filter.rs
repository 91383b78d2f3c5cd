use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::EmailAnalyzer;
use crate::analysis::parse_oracle_json;
use crate::email::{Email, prepare_for_analysis};
use crate::oracle::{AnalysisKind, TextOracle};
use crate::prompts;

/// Caller-supplied matching criteria, forwarded to the oracle verbatim as
/// JSON. Empty fields are omitted from the serialized criteria.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importance_threshold: Option<u8>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub senders: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

/// The oracle's verdict for one email against one `FilterSpec`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterResult {
    pub matches: bool,
    pub matched_criteria: Vec<String>,
    pub confidence: f64,
    pub filter_reason: String,
    pub suggested_folder: String,
    pub auto_actions: Vec<String>,
}

impl Default for FilterResult {
    /// Safe fallback: no match, zero confidence, file to the inbox.
    fn default() -> Self {
        Self {
            matches: false,
            matched_criteria: Vec::new(),
            confidence: 0.0,
            filter_reason: "Error during filtering".into(),
            suggested_folder: "Inbox".into(),
            auto_actions: Vec::new(),
        }
    }
}

/// Matches emails against free-form criteria with a single oracle call.
///
/// Shares the analyzer's guarded oracle, so filter calls draw on the same
/// cache and rate budget as analysis. Filtering is infallible: validation,
/// oracle, and parse failures all collapse into the default non-match.
pub struct SmartFilter<O> {
    analyzer: Arc<EmailAnalyzer<O>>,
}

impl<O: TextOracle> SmartFilter<O> {
    pub fn new(analyzer: Arc<EmailAnalyzer<O>>) -> Self {
        Self { analyzer }
    }

    pub async fn filter_email(&self, email: &Email, spec: &FilterSpec) -> FilterResult {
        let prepared = match prepare_for_analysis(email, self.analyzer.content_config()) {
            Ok(prepared) => prepared,
            Err(e) => {
                warn!(email_id = %email.id, error = %e, "filter input rejected");
                return FilterResult::default();
            }
        };

        let prompt = prompts::smart_filter(&prepared.analysis_text(), spec);
        let response = match self
            .analyzer
            .oracle()
            .generate(&prompt, AnalysisKind::Filter)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(email_id = %email.id, error = %e, "filter oracle call failed");
                return FilterResult::default();
            }
        };

        match parse_oracle_json(&response) {
            Ok(result) => result,
            Err(e) => {
                warn!(email_id = %email.id, error = %e, "unparsable filter response");
                FilterResult::default()
            }
        }
    }
}
