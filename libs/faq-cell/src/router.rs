use std::sync::Arc;

use axum::{routing::post, Router};

use shared_database::AppState;

use crate::handlers;

pub fn faq_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/faq", post(handlers::faq))
        .route("/ai-query", post(handlers::ai_query))
        .with_state(state)
}
