// libs/faq-cell/src/models.rs
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct FaqRequest {
    pub question: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AiQueryRequest {
    pub query: Option<String>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum FaqError {
    #[error("Assistant service not configured")]
    NotConfigured,

    #[error("Assistant service error: {0}")]
    ExternalService(String),
}
