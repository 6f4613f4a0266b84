// Presentation layer - HTTP routing
pub mod app_state;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    forecast, get_dashboard, health_check, list_records, project_availability, stream_dashboard,
    submit_record,
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/records", get(list_records).post(submit_record))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/stream", get(stream_dashboard))
        .route("/forecast", post(forecast))
        .route("/projections/availability", post(project_availability))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
