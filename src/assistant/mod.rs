//! AI health assistant backed by an external text-generation oracle.
//!
//! The oracle is opaque: a prompt goes in, text comes out. Every failure
//! (unconfigured endpoint, connection error, bad status, empty reply) is
//! caught here and replaced by `FALLBACK_RESPONSE`, so callers always get
//! text that ends with `ASSISTANT_DISCLAIMER`. No retries.

pub mod ollama;
pub mod prompt;

use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::config::AppConfig;

pub use ollama::OllamaOracle;

/// Closing sentence of every assistant reply.
pub const ASSISTANT_DISCLAIMER: &str =
    "Remember, I am an AI assistant. Please consult a healthcare professional for medical advice.";

/// Reply used whenever the oracle cannot answer.
pub const FALLBACK_RESPONSE: &str = "I'm sorry, I'm having trouble connecting right now. Please try again later. Remember, I am an AI assistant. Please consult a healthcare professional for medical advice.";

/// First assistant turn of every report conversation.
pub const ASSISTANT_GREETING: &str =
    "Hello! I'm your AI Health Assistant. How can I help you understand your report?";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("Text generation endpoint is not configured")]
    NotConfigured,

    #[error("Oracle is not reachable at {0}")]
    Connection(String),

    #[error("Oracle returned error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Oracle returned an empty response")]
    EmptyResponse,

    #[error("Oracle task failed: {0}")]
    TaskFailed(String),
}

/// Opaque text generator. Implementations block; call through
/// `generate_with_fallback` from async code.
pub trait TextOracle: Send + Sync {
    fn generate(&self, system: &str, prompt: &str) -> Result<String, OracleError>;
}

/// Build the oracle described by `config`.
pub fn oracle_from_config(config: &AppConfig) -> Arc<dyn TextOracle> {
    match &config.ollama_url {
        Some(url) => {
            let oracle = OllamaOracle::new(url, &config.model, config.oracle_timeout);
            tracing::info!(
                url = oracle.base_url(),
                model = oracle.model(),
                "Assistant oracle: Ollama"
            );
            Arc::new(oracle)
        }
        None => {
            tracing::warn!("Assistant oracle not configured, replies will use the fallback");
            Arc::new(UnconfiguredOracle)
        }
    }
}

/// Append the disclaimer unless the text already ends with it.
pub fn ensure_disclaimer(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.ends_with(ASSISTANT_DISCLAIMER) {
        trimmed.to_string()
    } else {
        format!("{trimmed}\n\n{ASSISTANT_DISCLAIMER}")
    }
}

/// Turn an oracle result into user-visible text.
pub fn reply_or_fallback(result: Result<String, OracleError>) -> String {
    match result {
        Ok(text) if !text.trim().is_empty() => ensure_disclaimer(&text),
        Ok(_) => {
            tracing::warn!(error = %OracleError::EmptyResponse, "Assistant fallback");
            FALLBACK_RESPONSE.to_string()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Assistant fallback");
            FALLBACK_RESPONSE.to_string()
        }
    }
}

/// Run the blocking oracle call off the async executor and never fail.
pub async fn generate_with_fallback(
    oracle: Arc<dyn TextOracle>,
    system: String,
    prompt: String,
) -> String {
    let result = tokio::task::spawn_blocking(move || oracle.generate(&system, &prompt))
        .await
        .unwrap_or_else(|e| Err(OracleError::TaskFailed(e.to_string())));
    reply_or_fallback(result)
}

/// Oracle used when no endpoint is configured (the "missing credential" case).
pub struct UnconfiguredOracle;

impl TextOracle for UnconfiguredOracle {
    fn generate(&self, _system: &str, _prompt: &str) -> Result<String, OracleError> {
        Err(OracleError::NotConfigured)
    }
}

/// Mock oracle for testing: returns a configurable result and records prompts.
pub struct MockOracle {
    result: Result<String, OracleError>,
    prompts: Mutex<Vec<String>>,
}

impl MockOracle {
    pub fn replying(text: &str) -> Self {
        Self {
            result: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: OracleError) -> Self {
        Self {
            result: Err(error),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().ok().and_then(|p| p.last().cloned())
    }
}

impl TextOracle for MockOracle {
    fn generate(&self, _system: &str, prompt: &str) -> Result<String, OracleError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        self.result.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disclaimer_appended_once() {
        let text = ensure_disclaimer("Your BMI is 29.");
        assert!(text.ends_with(ASSISTANT_DISCLAIMER));
        assert_eq!(ensure_disclaimer(&text), text);
    }

    #[test]
    fn fallback_carries_disclaimer() {
        assert!(FALLBACK_RESPONSE.ends_with(ASSISTANT_DISCLAIMER));
    }

    #[test]
    fn errors_become_fallback() {
        assert_eq!(
            reply_or_fallback(Err(OracleError::Connection("http://x".into()))),
            FALLBACK_RESPONSE
        );
        assert_eq!(reply_or_fallback(Ok("   ".into())), FALLBACK_RESPONSE);
    }

    #[test]
    fn unconfigured_oracle_reports_not_configured() {
        assert_eq!(
            UnconfiguredOracle.generate("s", "p"),
            Err(OracleError::NotConfigured)
        );
    }

    #[test]
    fn oracle_from_config_without_url_is_unconfigured() {
        let oracle = oracle_from_config(&AppConfig::default());
        assert_eq!(oracle.generate("s", "p"), Err(OracleError::NotConfigured));
    }

    #[tokio::test]
    async fn generate_with_fallback_uses_oracle_text() {
        let oracle = Arc::new(MockOracle::replying("Keep walking daily."));
        let reply =
            generate_with_fallback(oracle.clone(), "system".into(), "prompt".into()).await;
        assert!(reply.starts_with("Keep walking daily."));
        assert!(reply.ends_with(ASSISTANT_DISCLAIMER));
        assert_eq!(oracle.last_prompt().as_deref(), Some("prompt"));
    }

    #[tokio::test]
    async fn generate_with_fallback_never_fails() {
        let oracle = Arc::new(MockOracle::failing(OracleError::Status {
            status: 500,
            body: "boom".into(),
        }));
        let reply = generate_with_fallback(oracle, String::new(), String::new()).await;
        assert_eq!(reply, FALLBACK_RESPONSE);
    }
}
