use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Urgency level reported by the importance analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

/// Writing tone reported by the summary analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Professional,
    Casual,
    Urgent,
    Friendly,
    Formal,
    Neutral,
}

/// Priority of a single extracted action item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Angry,
    Frustrated,
    Excited,
    Worried,
    Satisfied,
    Neutral,
}

impl Emotion {
    /// Emotions that add the urgent-emotion bonus during scoring.
    pub fn is_urgent(self) -> bool {
        matches!(self, Emotion::Angry | Emotion::Frustrated)
    }
}

/// Primary email category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Work,
    Personal,
    Finance,
    Travel,
    Shopping,
    Social,
    News,
    Marketing,
    Spam,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Work => "work",
            Category::Personal => "personal",
            Category::Finance => "finance",
            Category::Travel => "travel",
            Category::Shopping => "shopping",
            Category::Social => "social",
            Category::News => "news",
            Category::Marketing => "marketing",
            Category::Spam => "spam",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relevance {
    Low,
    Medium,
    High,
}

/// Importance analysis: 1-10 scale with reasoning and urgency.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportanceAnalysis {
    pub importance: u8,
    pub reasoning: String,
    pub urgency: Urgency,
}

impl Default for ImportanceAnalysis {
    fn default() -> Self {
        Self {
            importance: 5,
            reasoning: "importance analysis unavailable".into(),
            urgency: Urgency::Medium,
        }
    }
}

/// Summary analysis: short summary, key points, tone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryAnalysis {
    pub summary: String,
    pub key_points: Vec<String>,
    pub tone: Tone,
}

impl Default for SummaryAnalysis {
    fn default() -> Self {
        Self {
            summary: "Unable to generate summary".into(),
            key_points: Vec::new(),
            tone: Tone::Neutral,
        }
    }
}

/// A single extracted task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub task: String,
    /// ISO date or the `"no deadline"` sentinel.
    pub deadline: String,
    pub priority: TaskPriority,
    pub assignee: String,
    /// Optional grouping key; ungrouped items aggregate under "general".
    #[serde(default)]
    pub category: Option<String>,
}

impl ActionItem {
    pub const NO_DEADLINE: &'static str = "no deadline";

    pub fn has_real_deadline(&self) -> bool {
        self.deadline != Self::NO_DEADLINE
    }
}

/// Action-item extraction result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItemAnalysis {
    pub action_items: Vec<ActionItem>,
    pub has_deadlines: bool,
    pub requires_response: bool,
}

/// Sentiment analysis result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentAnalysis {
    pub sentiment: Sentiment,
    pub emotion: Emotion,
    pub confidence: f64,
    pub is_complaint: bool,
    pub is_praise: bool,
}

impl Default for SentimentAnalysis {
    fn default() -> Self {
        Self {
            sentiment: Sentiment::Neutral,
            emotion: Emotion::Neutral,
            confidence: 0.5,
            is_complaint: false,
            is_praise: false,
        }
    }
}

/// Classification result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationAnalysis {
    pub primary_category: Category,
    pub secondary_categories: Vec<String>,
    pub is_automated: bool,
    pub is_newsletter: bool,
    pub is_promotion: bool,
    pub business_relevance: Relevance,
}

impl Default for ClassificationAnalysis {
    fn default() -> Self {
        Self {
            primary_category: Category::Work,
            secondary_categories: Vec::new(),
            is_automated: false,
            is_newsletter: false,
            is_promotion: false,
            business_relevance: Relevance::Medium,
        }
    }
}

/// The bundle of all five per-email analysis kinds for one message.
///
/// Assembled once per email and never mutated afterward.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeAnalysis {
    pub email_id: String,
    pub timestamp: DateTime<Utc>,
    pub analyzed_at: DateTime<Utc>,
    pub importance: ImportanceAnalysis,
    pub summary: SummaryAnalysis,
    pub action_items: ActionItemAnalysis,
    pub sentiment: SentimentAnalysis,
    pub classification: ClassificationAnalysis,
}

/// A composite analysis with its derived priority ranking.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredEmail {
    #[serde(flatten)]
    pub analysis: CompositeAnalysis,
    /// Derived priority, clamped to `0..=100`.
    pub priority_score: u8,
    pub needs_attention: bool,
    pub processing_time_ms: u64,
}

/// Strip a surrounding markdown code fence from oracle output, if present.
///
/// Models regularly wrap JSON in ``` fences despite instructions not to.
/// Anything else non-JSON remains a parse failure for the caller to absorb.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = inner.strip_suffix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the opening fence line.
    match inner.find('\n') {
        Some(newline) if inner[..newline].trim().chars().all(char::is_alphanumeric) => {
            inner[newline + 1..].trim()
        }
        _ => inner.trim(),
    }
}

/// Parse oracle output strictly into a typed record.
///
/// The oracle is treated as unreliable: any missing or mistyped field fails
/// the whole parse, and the caller substitutes the kind's default record.
pub fn parse_oracle_json<T: serde::de::DeserializeOwned>(text: &str) -> Result<T, crate::Error> {
    Ok(serde_json::from_str(strip_code_fence(text))?)
}
