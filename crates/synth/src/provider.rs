//! Transport to the external text-generation service.

use async_trait::async_trait;
use slidesmith_core::{Error, Result};

/// A text-generation backend: prompt in, raw model text out.
///
/// The model is non-deterministic; identical prompts may yield different
/// decks, which is expected and not a defect.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// OpenAI-compatible chat-completions transport.
///
/// Works against any service exposing the `/v1/chat/completions` shape,
/// which covers the hosted providers and local runtimes alike.
pub struct HttpGenerator {
    base_url: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl HttpGenerator {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key: None,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

#[async_trait]
impl TextGenerator for HttpGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let key = self.api_key.as_deref().ok_or_else(|| {
            Error::Credential("no API key configured (set SLIDESMITH_API_KEY)".to_string())
        })?;

        let url = format!(
            "{}/v1/chat/completions",
            self.base_url.trim_end_matches('/')
        );

        let request = serde_json::json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": 0.7,
        });

        log::debug!("requesting generation from {} (model {})", url, self.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("failed to reach generation service: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(Error::Credential(format!(
                "generation service rejected the API key ({})",
                status
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "generation service returned {}: {}",
                status, body
            )));
        }

        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("failed to read generation response: {}", e)))?;

        let text = value["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                Error::Format("generation response carried no message content".to_string())
            })?;

        Ok(text.to_string())
    }
}
