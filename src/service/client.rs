//! HTTP client for the ask endpoint
//!
//! Sends the question with the session's source tag and auth token, and
//! normalizes the reply: a response without usable answer text yields a
//! fixed sentinel instead of an error, so it flows through the normal
//! reveal path. Transport problems surface as typed errors.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::config::ServiceConfig;

/// Sentinel shown when the service responds without answer text.
pub const NO_ANSWER_FALLBACK: &str = "No answer available.";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("network error: {0}")]
    Network(String),

    #[error("server returned {code}: {message}")]
    Api { code: u16, message: String },

    #[error("malformed response: {0}")]
    Parse(String),

    #[error("request cancelled")]
    Cancelled,
}

#[derive(Debug, Serialize)]
struct AskBody<'a> {
    question: &'a str,
    source: &'a str,
    token: &'a str,
}

#[derive(Debug, Deserialize)]
struct AskReply {
    answer: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AskClient {
    client: Client,
    base_url: String,
    source: String,
    token: String,
}

impl AskClient {
    pub fn new(base_url: String, source: String, token: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            source,
            token,
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(
            config.base_url.clone(),
            config.source.clone(),
            config.token.clone(),
        )
    }

    /// Asks the service for an answer, racing the request against the
    /// cancellation token.
    pub async fn ask_with_cancel(
        &self,
        question: &str,
        cancel_token: &CancellationToken,
    ) -> Result<String, ServiceError> {
        if cancel_token.is_cancelled() {
            return Err(ServiceError::Cancelled);
        }

        let url = format!("{}/ask", self.base_url.trim_end_matches('/'));
        let body = AskBody {
            question,
            source: &self.source,
            token: &self.token,
        };

        let request = self.client.post(&url).json(&body).send();
        let response = tokio::select! {
            biased;

            _ = cancel_token.cancelled() => {
                return Err(ServiceError::Cancelled);
            }

            result = request => {
                result.map_err(|e| ServiceError::Network(e.to_string()))?
            }
        };

        if !response.status().is_success() {
            let code = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ServiceError::Api { code, message });
        }

        let payload = tokio::select! {
            biased;

            _ = cancel_token.cancelled() => {
                return Err(ServiceError::Cancelled);
            }

            result = response.text() => {
                result.map_err(|e| ServiceError::Network(e.to_string()))?
            }
        };

        parse_answer(&payload)
    }
}

/// Extracts the answer text from a reply body. Absent or empty answer
/// text maps to the sentinel, not an error.
fn parse_answer(body: &str) -> Result<String, ServiceError> {
    let reply: AskReply =
        serde_json::from_str(body).map_err(|e| ServiceError::Parse(e.to_string()))?;
    Ok(reply
        .answer
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| NO_ANSWER_FALLBACK.to_string()))
}
