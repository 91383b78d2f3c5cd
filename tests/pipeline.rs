//! Triage pipeline end-to-end tests.
//!
//! These tests exercise the full pipeline against a scripted oracle:
//!   Email → content cleaning → five concurrent analyses → scoring →
//!   batch statistics → insights → smart filtering
//!
//! No network access is required; the oracle dispatches canned JSON by
//! inspecting the prompt scaffolding and the embedded email content.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::Utc;

use mailtriage::config::{BatchConfig, CacheConfig, ContentConfig, RateLimitConfig};
use mailtriage::insights::{self, Mood, RecommendationKind};
use mailtriage::oracle::guarded::AnalysisOracle;
use mailtriage::{
    BatchProcessor, Email, EmailAnalyzer, Error, FilterSpec, ScoringWeights, SmartFilter,
    TextOracle,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Scripted oracle: picks the response from the analysis-kind scaffolding in
/// the prompt, then specializes it on markers in the embedded email content.
struct ScriptedOracle {
    call_count: Arc<AtomicU32>,
}

impl ScriptedOracle {
    fn new() -> (Self, Arc<AtomicU32>) {
        let count = Arc::new(AtomicU32::new(0));
        (
            Self {
                call_count: count.clone(),
            },
            count,
        )
    }
}

impl TextOracle for ScriptedOracle {
    async fn generate(&self, prompt: &str) -> Result<String, Error> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let urgent = prompt.contains("server is down");
        let newsletter = prompt.contains("weekly digest");

        let response = if prompt.contains("prioritization assistant") {
            if urgent {
                r#"{"importance": 9, "reasoning": "outage", "urgency": "critical"}"#
            } else if newsletter {
                r#"{"importance": 2, "reasoning": "digest", "urgency": "low"}"#
            } else {
                r#"{"importance": 5, "reasoning": "routine", "urgency": "medium"}"#
            }
        } else if prompt.contains("summarization assistant") {
            r#"{"summary": "s", "keyPoints": [], "tone": "neutral"}"#
        } else if prompt.contains("task extraction specialist") {
            if urgent {
                r#"{"actionItems": [{"task": "Restart the server", "deadline": "2026-09-01", "priority": "high", "assignee": "me"}], "hasDeadlines": true, "requiresResponse": true}"#
            } else {
                r#"{"actionItems": [], "hasDeadlines": false, "requiresResponse": false}"#
            }
        } else if prompt.contains("emotional intelligence expert") {
            if urgent {
                r#"{"sentiment": "negative", "emotion": "angry", "confidence": 0.9, "isComplaint": true, "isPraise": false}"#
            } else if newsletter {
                r#"{"sentiment": "neutral", "emotion": "neutral", "confidence": 0.7, "isComplaint": false, "isPraise": false}"#
            } else {
                r#"{"sentiment": "positive", "emotion": "happy", "confidence": 0.8, "isComplaint": false, "isPraise": true}"#
            }
        } else if prompt.contains("categorization system") {
            if newsletter {
                r#"{"primaryCategory": "news", "secondaryCategories": [], "isAutomated": true, "isNewsletter": true, "isPromotion": false, "businessRelevance": "low"}"#
            } else if urgent {
                r#"{"primaryCategory": "work", "secondaryCategories": ["requests"], "isAutomated": false, "isNewsletter": false, "isPromotion": false, "businessRelevance": "high"}"#
            } else {
                r#"{"primaryCategory": "work", "secondaryCategories": [], "isAutomated": false, "isNewsletter": false, "isPromotion": false, "businessRelevance": "medium"}"#
            }
        } else if prompt.contains("filtering system") {
            r#"{"matches": true, "matchedCriteria": ["urgent"], "confidence": 0.95, "filterReason": "Production outage", "suggestedFolder": "Priority Inbox", "autoActions": ["mark_important"]}"#
        } else {
            return Err(Error::Oracle(format!("unexpected prompt: {prompt}")));
        };
        Ok(response.to_string())
    }
}

fn email(id: &str, subject: &str, body: &str) -> Email {
    Email {
        id: id.into(),
        subject: subject.into(),
        body: body.into(),
        sender: "someone@example.com".into(),
        timestamp: Utc::now(),
    }
}

fn inbox() -> Vec<Email> {
    let mut emails = vec![
        email("e0", "Outage", "The server is down and customers are furious"),
        email("e1", "Standup notes", "Everything on track, nothing blocking"),
    ];
    for i in 0..4 {
        emails.push(email(
            &format!("n{i}"),
            &format!("Digest #{i}"),
            &format!("Here is your weekly digest number {i}"),
        ));
    }
    emails
}

fn analyzer(
    oracle: ScriptedOracle,
    rate_limit: &RateLimitConfig,
) -> Arc<EmailAnalyzer<ScriptedOracle>> {
    Arc::new(EmailAnalyzer::new(
        AnalysisOracle::new(oracle, &CacheConfig::default(), rate_limit),
        ContentConfig::default(),
    ))
}

fn processor(
    analyzer: Arc<EmailAnalyzer<ScriptedOracle>>,
    concurrent_processing: usize,
) -> BatchProcessor<ScriptedOracle> {
    BatchProcessor::new(
        analyzer,
        BatchConfig {
            concurrent_processing,
            chunk_delay_ms: 0,
        },
        ScoringWeights::default(),
    )
}

// ---------------------------------------------------------------------------
// Batch → scoring → insights
// ---------------------------------------------------------------------------

#[tokio::test]
async fn batch_scores_and_insights_end_to_end() {
    let (oracle, count) = ScriptedOracle::new();
    let analyzer = analyzer(oracle, &RateLimitConfig::default());
    let processor = processor(analyzer, 3);

    let batch = processor.process_batch(inbox()).await;

    // Six distinct emails, five analyses each, nothing cached yet.
    assert_eq!(count.load(Ordering::SeqCst), 30);
    assert_eq!(batch.statistics.total_emails, 6);
    assert_eq!(batch.statistics.processed_emails, 6);
    assert_eq!(batch.statistics.failed_emails, 0);
    assert!(batch.errors.is_empty());

    let ids: Vec<&str> = batch
        .results
        .iter()
        .map(|r| r.analysis.email_id.as_str())
        .collect();
    assert_eq!(ids, ["e0", "e1", "n0", "n1", "n2", "n3"]);

    // Outage: 90 + 5 + 20 + 15 + 25 + 30 + 20 caps out.
    let outage = &batch.results[0];
    assert_eq!(outage.priority_score, 100);
    assert!(outage.needs_attention);

    // Routine: 50 + medium relevance 10.
    let routine = &batch.results[1];
    assert_eq!(routine.priority_score, 60);
    assert!(!routine.needs_attention);

    // Newsletters: 20 * 0.3 * 0.2 = 1.2, rounded.
    for newsletter in &batch.results[2..] {
        assert_eq!(newsletter.priority_score, 1);
        assert!(!newsletter.needs_attention);
    }

    let weights = ScoringWeights::default();
    let insights = insights::summarize(&batch.results, &weights);

    assert_eq!(insights.total_emails, 6);
    assert_eq!(insights.needs_attention, 1);
    assert_eq!(insights.high_priority, 1);
    assert_eq!(insights.medium_priority, 1);
    assert_eq!(insights.low_priority, 4);
    assert_eq!(insights.categories["work"], 2);
    assert_eq!(insights.categories["news"], 4);
    assert_eq!(insights.action_items.total_action_items, 1);
    assert_eq!(insights.action_items.with_deadlines, 1);
    assert_eq!(insights.action_items.high_priority, 1);
    assert_eq!(insights.sentiment_overview.complaints, 1);
    assert_eq!(insights.sentiment_overview.praise, 1);
    assert_eq!(insights.sentiment_overview.overall_mood, Mood::Neutral);

    let kinds: Vec<RecommendationKind> = insights.recommendations.iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        [
            RecommendationKind::Priority,
            RecommendationKind::Deadline,
            RecommendationKind::Complaint,
            RecommendationKind::Batch,
        ]
    );
}

#[tokio::test]
async fn repeated_batch_is_served_entirely_from_cache() {
    let (oracle, count) = ScriptedOracle::new();
    let analyzer = analyzer(oracle, &RateLimitConfig::default());
    let processor = processor(analyzer.clone(), 3);

    let first = processor.process_batch(inbox()).await;
    let after_first = count.load(Ordering::SeqCst);
    assert_eq!(after_first, 30);

    let second = processor.process_batch(inbox()).await;

    // Identical content within the TTL: no new oracle calls, same scores.
    assert_eq!(count.load(Ordering::SeqCst), after_first);
    assert_eq!(second.statistics.processed_emails, 6);
    for (a, b) in first.results.iter().zip(&second.results) {
        assert_eq!(a.priority_score, b.priority_score);
    }
    assert_eq!(analyzer.oracle().stats().cache_size, 30);
}

#[tokio::test]
async fn rate_limited_emails_degrade_to_defaults_without_failing() {
    let (oracle, count) = ScriptedOracle::new();
    // Budget for exactly one email's five analyses; process serially so the
    // first email spends it all.
    let analyzer = analyzer(
        oracle,
        &RateLimitConfig {
            window_ms: 60_000,
            max_requests: 5,
        },
    );
    let processor = processor(analyzer.clone(), 1);

    let emails = vec![
        email("e0", "Standup notes", "Everything on track"),
        email("e1", "Outage", "The server is down and customers are furious"),
    ];
    let batch = processor.process_batch(emails).await;

    assert_eq!(count.load(Ordering::SeqCst), 5);
    assert_eq!(batch.statistics.processed_emails, 2);
    assert_eq!(batch.statistics.failed_emails, 0);

    // The second email would have scored 100; every kind was denied, so it
    // carries the default records instead (importance 5, medium relevance).
    let degraded = &batch.results[1];
    assert_eq!(degraded.priority_score, 60);
    assert!(!degraded.needs_attention);

    let stats = analyzer.oracle().stats();
    assert_eq!(stats.recent_requests, 5);
}

// ---------------------------------------------------------------------------
// Smart filter sharing the guarded oracle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn filter_shares_cache_and_budget_with_analysis() {
    let (oracle, count) = ScriptedOracle::new();
    let analyzer = analyzer(oracle, &RateLimitConfig::default());
    let filter = SmartFilter::new(analyzer.clone());

    let outage = email("e0", "Outage", "The server is down and customers are furious");
    let spec = FilterSpec {
        keywords: vec!["urgent".into()],
        ..FilterSpec::default()
    };

    let verdict = filter.filter_email(&outage, &spec).await;
    assert!(verdict.matches);
    assert_eq!(verdict.suggested_folder, "Priority Inbox");
    assert_eq!(count.load(Ordering::SeqCst), 1);

    // The same spec against the same email is a cache hit.
    filter.filter_email(&outage, &spec).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);

    // Analysis prompts live in different cache namespaces.
    analyzer.analyze(&outage).await.unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 6);
    assert_eq!(analyzer.oracle().stats().cache_size, 6);
}
