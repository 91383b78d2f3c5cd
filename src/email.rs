use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ContentConfig;
use crate::error::Error;

/// A raw email as handed over by the mailbox-fetching layer.
///
/// Immutable for the duration of analysis. The body may be arbitrarily long
/// raw text; normalization happens here before any prompt is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Email {
    pub id: String,
    pub subject: String,
    pub body: String,
    pub sender: String,
    pub timestamp: DateTime<Utc>,
}

/// Truncate at a char boundary at or below `max`.
fn floor_char_boundary(s: &str, max: usize) -> usize {
    if max >= s.len() {
        return s.len();
    }
    let mut idx = max;
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

/// Normalize email body text before it is embedded in a prompt.
///
/// Collapses whitespace runs to single spaces, strips trailing signature
/// blocks, and truncates to `max_len` bytes (never splitting a char) with a
/// `...` marker.
pub fn clean_content(body: &str, max_len: usize) -> String {
    let mut cleaned: String = body.split_whitespace().collect::<Vec<_>>().join(" ");

    // Whitespace collapse flattens newlines, so the dash-dash signature
    // separator is matched in its collapsed form. Everything from the first
    // marker to the end of the text is dropped.
    for marker in ["-- ", "Sent from my iPhone", "Best regards"] {
        if let Some(pos) = cleaned.find(marker) {
            cleaned.truncate(pos);
        }
    }
    let cleaned = cleaned.trim_end();

    if cleaned.len() > max_len {
        let boundary = floor_char_boundary(cleaned, max_len);
        format!("{}...", &cleaned[..boundary])
    } else {
        cleaned.to_string()
    }
}

/// Reject inputs that violate size constraints before a prompt is built,
/// and strip angle brackets that would confuse the prompt scaffolding.
pub fn validate_prompt_input(input: &str, max_raw_len: usize) -> Result<String, Error> {
    if input.len() > max_raw_len {
        return Err(Error::InvalidContent(format!(
            "content length {} exceeds maximum {}",
            input.len(),
            max_raw_len
        )));
    }
    Ok(input.replace(['<', '>'], ""))
}

/// An email with normalized fields, ready for prompt construction.
#[derive(Debug, Clone)]
pub struct PreparedEmail {
    pub id: String,
    pub subject: String,
    pub content: String,
    pub sender: String,
    pub timestamp: DateTime<Utc>,
}

impl PreparedEmail {
    /// The combined text submitted to the oracle for the five analysis kinds.
    pub fn analysis_text(&self) -> String {
        format!(
            "Subject: {}\nFrom: {}\nContent: {}",
            self.subject, self.sender, self.content
        )
    }
}

/// Normalize an email for analysis, filling in fallbacks for missing fields.
///
/// Fails with `Error::InvalidContent` when the raw body exceeds the hard cap;
/// an empty body is allowed (upstream substitutes a short preview string).
pub fn prepare_for_analysis(email: &Email, config: &ContentConfig) -> Result<PreparedEmail, Error> {
    let body = validate_prompt_input(&email.body, config.max_raw_length)?;
    let subject = if email.subject.trim().is_empty() {
        "No Subject".to_string()
    } else {
        email.subject.clone()
    };
    let sender = if email.sender.trim().is_empty() {
        "Unknown Sender".to_string()
    } else {
        email.sender.clone()
    };
    Ok(PreparedEmail {
        id: email.id.clone(),
        subject,
        content: clean_content(&body, config.max_content_length),
        sender,
        timestamp: email.timestamp,
    })
}
