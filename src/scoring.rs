use serde::Deserialize;

use crate::analysis::{CompositeAnalysis, Relevance, Urgency};

/// Weights for the deterministic priority score.
///
/// Additive bonuses accumulate on top of the importance baseline, then the
/// multiplicative penalties dampen the subtotal, then complaint/emotion
/// bonuses apply, then the result is clamped to `[0, 100]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Multiplier on the 1-10 importance score (default: 10).
    pub base_importance_weight: f64,
    /// Per action item, uncapped (default: 5).
    pub action_item_weight: f64,
    pub deadline_bonus: f64,
    pub response_required_bonus: f64,
    pub business_relevance_high_bonus: f64,
    pub business_relevance_medium_bonus: f64,
    /// Multiplicative factor applied when the email is automated or
    /// promotional (default: 0.3).
    pub automated_penalty: f64,
    /// Multiplicative factor for newsletters, compounding with the
    /// automated/promotion penalty (default: 0.2).
    pub newsletter_penalty: f64,
    pub complaint_bonus: f64,
    pub urgent_emotion_bonus: f64,
    /// Importance at or above this always needs attention (default: 8).
    pub attention_importance_cutoff: u8,
    /// Tier boundary: scores at or above are "high" (default: 70).
    pub high_priority_cutoff: u8,
    /// Tier boundary: scores at or above (and below high) are "medium"
    /// (default: 40).
    pub medium_priority_cutoff: u8,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base_importance_weight: 10.0,
            action_item_weight: 5.0,
            deadline_bonus: 20.0,
            response_required_bonus: 15.0,
            business_relevance_high_bonus: 25.0,
            business_relevance_medium_bonus: 10.0,
            automated_penalty: 0.3,
            newsletter_penalty: 0.2,
            complaint_bonus: 30.0,
            urgent_emotion_bonus: 20.0,
            attention_importance_cutoff: 8,
            high_priority_cutoff: 70,
            medium_priority_cutoff: 40,
        }
    }
}

/// Priority score for a composite analysis, clamped to `0..=100`.
///
/// Pure and deterministic; no side effects.
pub fn priority_score(analysis: &CompositeAnalysis, weights: &ScoringWeights) -> u8 {
    let mut score = analysis.importance.importance as f64 * weights.base_importance_weight;

    score += analysis.action_items.action_items.len() as f64 * weights.action_item_weight;

    if analysis.action_items.has_deadlines {
        score += weights.deadline_bonus;
    }
    if analysis.action_items.requires_response {
        score += weights.response_required_bonus;
    }

    score += match analysis.classification.business_relevance {
        Relevance::High => weights.business_relevance_high_bonus,
        Relevance::Medium => weights.business_relevance_medium_bonus,
        Relevance::Low => 0.0,
    };

    // Penalties dampen the whole subtotal and compound with each other.
    if analysis.classification.is_automated || analysis.classification.is_promotion {
        score *= weights.automated_penalty;
    }
    if analysis.classification.is_newsletter {
        score *= weights.newsletter_penalty;
    }

    if analysis.sentiment.is_complaint {
        score += weights.complaint_bonus;
    }
    if analysis.sentiment.emotion.is_urgent() {
        score += weights.urgent_emotion_bonus;
    }

    score.clamp(0.0, 100.0).round() as u8
}

/// Whether the email needs immediate attention.
///
/// Evaluated independently of the priority score: a heavily dampened email
/// can still require attention, and vice versa.
pub fn needs_attention(analysis: &CompositeAnalysis, weights: &ScoringWeights) -> bool {
    analysis.importance.importance >= weights.attention_importance_cutoff
        || matches!(
            analysis.importance.urgency,
            Urgency::Critical | Urgency::High
        )
        || analysis.action_items.has_deadlines
        || analysis.action_items.requires_response
        || analysis.sentiment.is_complaint
        || analysis.classification.business_relevance == Relevance::High
}
