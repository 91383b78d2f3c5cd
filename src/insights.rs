use std::collections::HashMap;

use serde::Serialize;

use crate::analysis::{Emotion, ScoredEmail, Sentiment, TaskPriority};
use crate::scoring::ScoringWeights;

/// Machine-checkable tag for a recommendation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Priority,
    Deadline,
    Complaint,
    Batch,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub message: String,
    pub action: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItemsSummary {
    pub total_action_items: usize,
    /// Items whose deadline is a real date, not the "no deadline" sentinel.
    pub with_deadlines: usize,
    pub high_priority: usize,
    /// Item counts per category; ungrouped items fall under "general".
    pub categories: HashMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentOverview {
    pub sentiment_distribution: HashMap<String, usize>,
    pub emotion_distribution: HashMap<String, usize>,
    pub complaints: usize,
    pub praise: usize,
    /// "positive" above a 0.6 positive ratio, "negative" above a 0.4
    /// negative ratio, otherwise "neutral" (including the empty batch).
    pub overall_mood: Mood,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Positive,
    Negative,
    Neutral,
}

/// Cross-email summaries over a completed batch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub total_emails: usize,
    pub needs_attention: usize,
    pub high_priority: usize,
    pub medium_priority: usize,
    pub low_priority: usize,
    pub categories: HashMap<String, usize>,
    pub action_items: ActionItemsSummary,
    pub sentiment_overview: SentimentOverview,
    pub recommendations: Vec<Recommendation>,
}

fn sentiment_name(s: Sentiment) -> &'static str {
    match s {
        Sentiment::Positive => "positive",
        Sentiment::Negative => "negative",
        Sentiment::Neutral => "neutral",
    }
}

fn emotion_name(e: Emotion) -> &'static str {
    match e {
        Emotion::Happy => "happy",
        Emotion::Angry => "angry",
        Emotion::Frustrated => "frustrated",
        Emotion::Excited => "excited",
        Emotion::Worried => "worried",
        Emotion::Satisfied => "satisfied",
        Emotion::Neutral => "neutral",
    }
}

fn overall_mood(positive: usize, negative: usize, total: usize) -> Mood {
    if total == 0 {
        return Mood::Neutral;
    }
    let positive_ratio = positive as f64 / total as f64;
    let negative_ratio = negative as f64 / total as f64;
    if positive_ratio > 0.6 {
        Mood::Positive
    } else if negative_ratio > 0.4 {
        Mood::Negative
    } else {
        Mood::Neutral
    }
}

/// Aggregate a batch's scored emails into dashboard insights.
///
/// Pure function; an empty batch yields zeroed counts and a neutral mood.
pub fn summarize(results: &[ScoredEmail], weights: &ScoringWeights) -> Insights {
    let high_cutoff = weights.high_priority_cutoff;
    let medium_cutoff = weights.medium_priority_cutoff;

    let mut categories: HashMap<String, usize> = HashMap::new();
    let mut action_items = ActionItemsSummary::default();
    let mut sentiment_distribution: HashMap<String, usize> = HashMap::new();
    let mut emotion_distribution: HashMap<String, usize> = HashMap::new();
    let mut positive = 0;
    let mut negative = 0;
    let mut complaints = 0;
    let mut praise = 0;
    let mut newsletters = 0;
    let mut with_deadlines = 0;

    for scored in results {
        let analysis = &scored.analysis;

        *categories
            .entry(analysis.classification.primary_category.as_str().to_string())
            .or_insert(0) += 1;
        if analysis.classification.is_newsletter {
            newsletters += 1;
        }
        if analysis.action_items.has_deadlines {
            with_deadlines += 1;
        }

        for item in &analysis.action_items.action_items {
            action_items.total_action_items += 1;
            if item.has_real_deadline() {
                action_items.with_deadlines += 1;
            }
            if item.priority == TaskPriority::High {
                action_items.high_priority += 1;
            }
            let category = item.category.clone().unwrap_or_else(|| "general".to_string());
            *action_items.categories.entry(category).or_insert(0) += 1;
        }

        let sentiment = &analysis.sentiment;
        *sentiment_distribution
            .entry(sentiment_name(sentiment.sentiment).to_string())
            .or_insert(0) += 1;
        *emotion_distribution
            .entry(emotion_name(sentiment.emotion).to_string())
            .or_insert(0) += 1;
        match sentiment.sentiment {
            Sentiment::Positive => positive += 1,
            Sentiment::Negative => negative += 1,
            Sentiment::Neutral => {}
        }
        if sentiment.is_complaint {
            complaints += 1;
        }
        if sentiment.is_praise {
            praise += 1;
        }
    }

    let high_priority = results
        .iter()
        .filter(|r| r.priority_score >= high_cutoff)
        .count();
    let medium_priority = results
        .iter()
        .filter(|r| r.priority_score >= medium_cutoff && r.priority_score < high_cutoff)
        .count();
    let low_priority = results
        .iter()
        .filter(|r| r.priority_score < medium_cutoff)
        .count();

    let mut recommendations = Vec::new();
    if high_priority > 0 {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Priority,
            message: format!(
                "You have {high_priority} high-priority emails that need immediate attention."
            ),
            action: "Review high-priority emails first".into(),
        });
    }
    if with_deadlines > 0 {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Deadline,
            message: format!("{with_deadlines} emails contain deadlines or time-sensitive tasks."),
            action: "Check deadlines and add to calendar".into(),
        });
    }
    if complaints > 0 {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Complaint,
            message: format!("{complaints} emails contain complaints that need attention."),
            action: "Address complaints promptly".into(),
        });
    }
    if newsletters > 3 {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Batch,
            message: format!("{newsletters} newsletters can be processed together."),
            action: "Batch process newsletters during downtime".into(),
        });
    }

    Insights {
        total_emails: results.len(),
        needs_attention: results.iter().filter(|r| r.needs_attention).count(),
        high_priority,
        medium_priority,
        low_priority,
        categories,
        action_items,
        sentiment_overview: SentimentOverview {
            sentiment_distribution,
            emotion_distribution,
            complaints,
            praise,
            overall_mood: overall_mood(positive, negative, results.len()),
        },
        recommendations,
    }
}
