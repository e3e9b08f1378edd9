// libs/notification-cell/src/services/mailer.rs
use anyhow::{anyhow, Result};
use reqwest::Client;
use serde_json::json;
use tracing::debug;

use shared_config::AppConfig;

/// Thin client for a transactional mail API: one JSON POST per message.
#[derive(Clone)]
pub struct Mailer {
    client: Client,
    base_url: String,
    api_token: String,
    sender: String,
}

impl Mailer {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.mail_api_url.clone(),
            api_token: config.mail_api_token.clone(),
            sender: config.mail_sender.clone(),
        }
    }

    pub async fn send(&self, to: &str, subject: &str, text: &str) -> Result<()> {
        let url = format!("{}/messages", self.base_url);
        debug!("Sending mail to {} via {}", to, url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .json(&json!({
                "from": self.sender,
                "to": to,
                "subject": subject,
                "text": text,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Mail API error ({}): {}", status, body));
        }

        Ok(())
    }
}
