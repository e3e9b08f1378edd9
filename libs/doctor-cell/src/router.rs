use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_database::AppState;

use crate::handlers;

pub fn doctor_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/doctor-suggestion", post(handlers::suggest_doctor))
        .route("/doctors", get(handlers::list_doctors))
        .with_state(state)
}
