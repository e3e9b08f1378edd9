use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: String,
    pub port: u16,
    pub mail_api_url: String,
    pub mail_api_token: String,
    pub mail_sender: String,
    pub assistant_base_url: String,
    pub assistant_api_key: String,
    pub assistant_model: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            data_dir: env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            mail_api_url: env::var("MAIL_API_URL").unwrap_or_else(|_| {
                warn!("MAIL_API_URL not set, email notifications disabled");
                String::new()
            }),
            mail_api_token: env::var("MAIL_API_TOKEN").unwrap_or_else(|_| {
                warn!("MAIL_API_TOKEN not set, using empty value");
                String::new()
            }),
            mail_sender: env::var("MAIL_SENDER").unwrap_or_else(|_| {
                warn!("MAIL_SENDER not set, using empty value");
                String::new()
            }),
            assistant_base_url: env::var("OPENROUTER_BASE_URL")
                .unwrap_or_else(|_| "https://openrouter.ai/api/v1".to_string()),
            assistant_api_key: env::var("OPENROUTER_API_KEY").unwrap_or_else(|_| {
                warn!("OPENROUTER_API_KEY not set, FAQ fallback disabled");
                String::new()
            }),
            assistant_model: env::var("OPENROUTER_MODEL")
                .unwrap_or_else(|_| "deepseek/deepseek-chat-v3-0324:free".to_string()),
        };

        if !config.is_mail_configured() {
            warn!("Mail delivery not fully configured - notifications will be skipped");
        }

        config
    }

    pub fn is_mail_configured(&self) -> bool {
        !self.mail_api_url.is_empty()
            && !self.mail_api_token.is_empty()
            && !self.mail_sender.is_empty()
    }

    pub fn is_assistant_configured(&self) -> bool {
        !self.assistant_base_url.is_empty() && !self.assistant_api_key.is_empty()
    }
}
