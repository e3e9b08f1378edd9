// libs/faq-cell/src/services/assistant.rs
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;

use crate::models::FaqError;

/// The fixed system prompt every fallback completion runs under.
pub const RECEPTIONIST_PROMPT: &str =
    "You are a polite, professional hospital receptionist. Answer short, helpful, and factual.";

/// Client for the OpenAI-style chat completion endpoint used when no FAQ
/// matches. One blocking call per question, no retries.
#[derive(Debug)]
pub struct AssistantService {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl AssistantService {
    pub fn new(config: &AppConfig) -> Result<Self, FaqError> {
        if !config.is_assistant_configured() {
            return Err(FaqError::NotConfigured);
        }

        Ok(Self {
            client: Client::new(),
            base_url: config.assistant_base_url.clone(),
            api_key: config.assistant_api_key.clone(),
            model: config.assistant_model.clone(),
        })
    }

    pub async fn complete(&self, user_input: &str) -> Result<String, FaqError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!("Requesting completion from {}", url);

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": RECEPTIONIST_PROMPT },
                { "role": "user", "content": user_input }
            ]
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| FaqError::ExternalService(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(FaqError::ExternalService(format!("HTTP {}: {}", status, text)));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| FaqError::ExternalService(e.to_string()))?;

        payload
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .map(|s| s.trim().to_string())
            .ok_or_else(|| {
                FaqError::ExternalService("Missing choices[0].message.content".to_string())
            })
    }
}
