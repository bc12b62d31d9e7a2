//! AI content-generation collaborator
//!
//! The trait takes a prompt and returns generated text. The HTTP
//! implementation is endpoint-agnostic: it posts a small JSON body and
//! accepts the first of a few common response fields. Calls carry the
//! configured timeout; failed calls are never retried automatically.

use crate::models::AiConfig;
use crate::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Whether the collaborator is configured at all; unconfigured
    /// generators are skipped rather than surfaced as failures
    fn is_configured(&self) -> bool {
        true
    }
}

/// Generic JSON-over-HTTP text generation client
pub struct HttpGenerator {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl HttpGenerator {
    pub fn from_config(config: &AiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .context("Failed to build AI HTTP client")?;

        let api_key = if config.api_key_env.is_empty() {
            None
        } else {
            std::env::var(&config.api_key_env).ok()
        };

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl ContentGenerator for HttpGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        if self.endpoint.is_empty() {
            anyhow::bail!("AI endpoint is not configured (set [ai].endpoint in nacplan.toml)");
        }

        let body = serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
        });

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .context("AI generation request failed")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!("AI endpoint returned {}: {}", status, detail.trim());
        }

        let payload: Value = response
            .json()
            .await
            .context("AI endpoint returned a non-JSON body")?;
        extract_text(&payload)
            .ok_or_else(|| anyhow::anyhow!("AI endpoint response carried no text field"))
    }

    fn is_configured(&self) -> bool {
        !self.endpoint.is_empty()
    }
}

/// Pull generated text out of the common response shapes:
/// `{"text": ...}`, `{"response": ...}`, `{"output": ...}`,
/// `{"choices": [{"text": ...}]}`
fn extract_text(payload: &Value) -> Option<String> {
    for field in ["text", "response", "output"] {
        if let Some(text) = payload.get(field).and_then(Value::as_str) {
            return Some(text.trim().to_string());
        }
    }
    payload
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("text"))
        .and_then(Value::as_str)
        .map(|text| text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_text_shapes() {
        assert_eq!(
            extract_text(&json!({"text": " summary "})),
            Some("summary".to_string())
        );
        assert_eq!(
            extract_text(&json!({"response": "from ollama"})),
            Some("from ollama".to_string())
        );
        assert_eq!(
            extract_text(&json!({"choices": [{"text": "first"}, {"text": "second"}]})),
            Some("first".to_string())
        );
        assert_eq!(extract_text(&json!({"usage": {"tokens": 12}})), None);
    }

    #[test]
    fn test_unconfigured_generator_is_flagged() {
        let config = AiConfig {
            endpoint: String::new(),
            ..Default::default()
        };
        let generator = HttpGenerator::from_config(&config).unwrap();
        assert!(!generator.is_configured());
    }

    #[tokio::test]
    async fn test_unconfigured_generate_fails_fast() {
        let config = AiConfig::default();
        let generator = HttpGenerator::from_config(&config).unwrap();

        let err = generator.generate("prompt").await.unwrap_err();
        assert!(err.to_string().contains("not configured"));
    }
}
