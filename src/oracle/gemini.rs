use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::OracleConfig;
use crate::error::Error;
use crate::oracle::TextOracle;

/// Text-generation oracle backed by the Gemini `generateContent` REST API.
///
/// Requests carry a hard timeout; a call past the deadline is abandoned by
/// the HTTP client and surfaces as `Error::Http`.
pub struct GeminiOracle {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiOracle {
    pub fn new(api_key: impl Into<String>, config: &OracleConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

fn build_request_body(prompt: &str) -> serde_json::Value {
    serde_json::json!({
        "contents": [{ "parts": [{ "text": prompt }] }]
    })
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

fn extract_text(response: GenerateResponse) -> Result<String, Error> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .map(|c| {
            c.content
                .parts
                .into_iter()
                .map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(Error::Oracle("model returned an empty response".into()));
    }
    Ok(text)
}

impl TextOracle for GeminiOracle {
    async fn generate(&self, prompt: &str) -> Result<String, Error> {
        debug!(model = %self.model, prompt_len = prompt.len(), "oracle call");

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .header("content-type", "application/json")
            .json(&build_request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let api_response: GenerateResponse = response.json().await?;
        extract_text(api_response)
    }
}
