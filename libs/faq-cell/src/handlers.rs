// libs/faq-cell/src/handlers.rs
use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::debug;

use shared_database::AppState;
use shared_models::error::{required, AppError};

use crate::models::{AiQueryRequest, FaqError, FaqRequest};
use crate::services::{AssistantService, FaqService};

fn map_assistant_error(err: FaqError) -> AppError {
    AppError::ExternalService(err.to_string())
}

/// Answer from the FAQ list, falling back to the assistant on a miss. The
/// fallback answer is marked with `"source": "ai"`.
#[axum::debug_handler]
pub async fn faq(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FaqRequest>,
) -> Result<Json<Value>, AppError> {
    let question = required(request.question, "question")?;

    let service = FaqService::new(&state);
    if let Some(answer) = service.answer(&question) {
        return Ok(Json(json!({
            "success": true,
            "answer": answer
        })));
    }

    debug!("No FAQ match, falling back to assistant");
    let assistant = AssistantService::new(&state.config).map_err(map_assistant_error)?;
    let answer = assistant
        .complete(&question)
        .await
        .map_err(map_assistant_error)?;

    Ok(Json(json!({
        "success": true,
        "answer": answer,
        "source": "ai"
    })))
}

/// Direct line to the assistant, bypassing the FAQ list.
#[axum::debug_handler]
pub async fn ai_query(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AiQueryRequest>,
) -> Result<Json<Value>, AppError> {
    let query = required(request.query, "query")?;

    let assistant = AssistantService::new(&state.config).map_err(map_assistant_error)?;
    let response = assistant
        .complete(&query)
        .await
        .map_err(map_assistant_error)?;

    Ok(Json(json!({
        "success": true,
        "response": response
    })))
}
