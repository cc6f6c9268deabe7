//! Typed client for the APIs behind the edge.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::envelope::Envelope;

/// Matches the frontend's HTTP client timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors returned by [`MoodLensClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("{0}")]
    Api(String),

    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Rewrite tone accepted by the model service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Neutral,
    Positive,
    Polite,
}

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct RewriteRequest<'a> {
    text: &'a str,
    tone: Tone,
}

/// One emotion label with its probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    results: Vec<LabelScore>,
}

pub struct MoodLensClient {
    client: Client,
    base_url: String,
}

impl MoodLensClient {
    /// Client against an edge base URL such as `https://moodlens.example.com`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Emotion classification via the model origin.
    pub async fn classify(&self, text: &str) -> Result<Vec<LabelScore>, ClientError> {
        let resp = self
            .client
            .post(self.url("/api/gemini-classify"))
            .json(&ClassifyRequest { text })
            .send()
            .await?;
        let value = decode(resp).await?;
        let parsed: ClassifyResponse = serde_json::from_value(value)?;
        Ok(parsed.results)
    }

    /// Tone rewrite via the model origin; returns the trimmed text.
    pub async fn rewrite(&self, text: &str, tone: Tone) -> Result<String, ClientError> {
        let resp = self
            .client
            .post(self.url("/api/gemini-rewrite"))
            .json(&RewriteRequest { text, tone })
            .send()
            .await?;
        let value = decode(resp).await?;
        Ok(value
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string())
    }

    /// Self-assessment questionnaire for a mode.
    pub async fn questionnaire(&self, mode: &str) -> Result<Value, ClientError> {
        self.get_with_query("/api/emotion/questionnaire", &[("mode", mode.to_string())])
            .await
    }

    /// Feedback text for an emotional level (1-4).
    pub async fn level_feedback(&self, level: u8) -> Result<Value, ClientError> {
        self.get_with_query("/api/emotion/level-feedback", &[("level", level.to_string())])
            .await
    }

    /// GET any path through the edge, decoding the envelope.
    pub async fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.get_with_query(path, &[]).await
    }

    async fn get_with_query(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Value, ClientError> {
        let resp = self.client.get(self.url(path)).query(query).send().await?;
        decode(resp).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Check the status, parse JSON and unwrap the envelope.
async fn decode(resp: Response) -> Result<Value, ClientError> {
    let status = resp.status();
    let text = resp.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
            .unwrap_or(text);
        return Err(ClientError::Status { status, message });
    }

    let value: Value = serde_json::from_str(&text)?;
    Envelope::decode(value).into_result().map_err(ClientError::Api)
}
