use std::sync::OnceLock;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{OracleError, TextOracle};

/// Ollama HTTP client for the assistant.
///
/// The blocking reqwest client is built on first use, which always happens
/// on a blocking worker thread.
pub struct OllamaOracle {
    base_url: String,
    model: String,
    timeout: Duration,
    client: OnceLock<reqwest::blocking::Client>,
}

impl OllamaOracle {
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            timeout,
            client: OnceLock::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn client(&self) -> Result<&reqwest::blocking::Client, OracleError> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let built = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| OracleError::HttpClient(e.to_string()))?;
        Ok(self.client.get_or_init(|| built))
    }
}

/// Request body for Ollama /api/generate
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
}

/// Response body from Ollama /api/generate
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

impl TextOracle for OllamaOracle {
    fn generate(&self, system: &str, prompt: &str) -> Result<String, OracleError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = OllamaGenerateRequest {
            model: &self.model,
            prompt,
            system,
            stream: false,
        };

        let response = self.client()?.post(&url).json(&body).send().map_err(|e| {
            if e.is_connect() {
                OracleError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                OracleError::HttpClient(format!(
                    "Request timed out after {}s",
                    self.timeout.as_secs()
                ))
            } else {
                OracleError::HttpClient(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(OracleError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: OllamaGenerateResponse = response
            .json()
            .map_err(|e| OracleError::ResponseParsing(e.to_string()))?;

        if parsed.response.trim().is_empty() {
            return Err(OracleError::EmptyResponse);
        }
        tracing::debug!(model = %self.model, chars = parsed.response.len(), "Assistant reply received");
        Ok(parsed.response)
    }
}
