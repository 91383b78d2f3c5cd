use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::analysis::ScoredEmail;
use crate::config::BatchConfig;
use crate::email::Email;
use crate::oracle::TextOracle;
use crate::scoring::{ScoringWeights, needs_attention, priority_score};
use crate::{EmailAnalyzer, Error};

/// One email that failed analysis inside a batch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchError {
    pub email_id: String,
    /// Stable error kind tag plus a human-readable message; raw oracle or
    /// network text stays in the diagnostic logs.
    pub error: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStatistics {
    pub total_emails: usize,
    pub processed_emails: usize,
    pub failed_emails: usize,
    pub processing_time_ms: u64,
    /// Averaged over processed emails only; zero when nothing succeeded.
    pub average_time_per_email_ms: u64,
}

/// The outcome of one batch run: successes in input order, failures
/// recorded separately, and aggregate statistics.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub results: Vec<ScoredEmail>,
    pub errors: Vec<BatchError>,
    pub statistics: BatchStatistics,
}

/// Drives the analyzer over a collection of emails in fixed-size concurrent
/// chunks with a pause between chunks.
///
/// The pause is a coarse throttle to stay under the rate-limit window; it is
/// applied between chunks regardless of whether anything was actually denied.
/// Per-email failures never abort the chunk or the batch.
pub struct BatchProcessor<O> {
    analyzer: Arc<EmailAnalyzer<O>>,
    config: BatchConfig,
    scoring: ScoringWeights,
}

impl<O: TextOracle + 'static> BatchProcessor<O> {
    pub fn new(analyzer: Arc<EmailAnalyzer<O>>, config: BatchConfig, scoring: ScoringWeights) -> Self {
        Self {
            analyzer,
            config,
            scoring,
        }
    }

    /// Analyze and score every email, preserving input order among the
    /// successes.
    pub async fn process_batch(&self, emails: Vec<Email>) -> BatchResult {
        let total_emails = emails.len();
        let batch_start = Instant::now();
        let chunk_size = self.config.concurrent_processing.max(1);

        info!(total_emails, chunk_size, "processing batch");

        // (input index, outcome) pairs, later sorted back to input order.
        let mut indexed: Vec<(usize, Result<ScoredEmail, BatchError>)> =
            Vec::with_capacity(total_emails);

        let chunks: Vec<Vec<Email>> = emails
            .chunks(chunk_size)
            .map(|chunk| chunk.to_vec())
            .collect();
        let chunk_count = chunks.len();

        for (chunk_idx, chunk) in chunks.into_iter().enumerate() {
            let mut join_set = JoinSet::new();

            for (offset, email) in chunk.into_iter().enumerate() {
                let idx = chunk_idx * chunk_size + offset;
                let analyzer = self.analyzer.clone();
                let scoring = self.scoring.clone();

                join_set.spawn(async move {
                    let start = Instant::now();
                    let outcome = analyzer.analyze(&email).await.map(|analysis| {
                        let score = priority_score(&analysis, &scoring);
                        let attention = needs_attention(&analysis, &scoring);
                        ScoredEmail {
                            analysis,
                            priority_score: score,
                            needs_attention: attention,
                            processing_time_ms: start.elapsed().as_millis() as u64,
                        }
                    });
                    (idx, email.id, outcome)
                });
            }

            while let Some(joined) = join_set.join_next().await {
                match joined {
                    Ok((idx, _, Ok(scored))) => indexed.push((idx, Ok(scored))),
                    Ok((idx, email_id, Err(e))) => {
                        warn!(email_id = %email_id, error = %e, "email analysis failed");
                        indexed.push((
                            idx,
                            Err(BatchError {
                                email_id,
                                error: format!("{}: {e}", e.kind()),
                                timestamp: Utc::now(),
                            }),
                        ));
                    }
                    Err(e) => {
                        // A panicked task loses its index; the email is
                        // accounted for in failed_emails via the count delta.
                        warn!(error = %e, "analysis task panicked");
                    }
                }
            }

            if chunk_idx + 1 < chunk_count && self.config.chunk_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.config.chunk_delay_ms)).await;
            }
        }

        indexed.sort_by_key(|(idx, _)| *idx);

        let mut results = Vec::new();
        let mut errors = Vec::new();
        for (_, outcome) in indexed {
            match outcome {
                Ok(scored) => results.push(scored),
                Err(err) => errors.push(err),
            }
        }

        let processing_time_ms = batch_start.elapsed().as_millis() as u64;
        let processed_emails = results.len();
        let average_time_per_email_ms = if processed_emails > 0 {
            processing_time_ms / processed_emails as u64
        } else {
            0
        };

        info!(
            processed = processed_emails,
            failed = total_emails - processed_emails,
            elapsed_ms = processing_time_ms,
            "batch complete"
        );

        BatchResult {
            results,
            errors,
            statistics: BatchStatistics {
                total_emails,
                processed_emails,
                failed_emails: total_emails - processed_emails,
                processing_time_ms,
                average_time_per_email_ms,
            },
        }
    }
}
