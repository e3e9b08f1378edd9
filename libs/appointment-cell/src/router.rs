use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_database::AppState;

use crate::handlers;

pub fn appointment_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/available-slots", get(handlers::available_slots))
        .route("/book-appointment", post(handlers::book_appointment))
        .route("/cancel-appointment", post(handlers::cancel_appointment))
        .route("/reschedule-slots", post(handlers::reschedule_slots))
        .route("/reschedule-appointment", post(handlers::reschedule_appointment))
        .route("/appointments/{name}", get(handlers::patient_appointments))
        .with_state(state)
}
