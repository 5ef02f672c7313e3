// Router wiring
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_dashboard, get_pet, get_stats, health_check, list_alerts, list_pets, stream_dashboard,
};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

// Compression is done in the response builders, so no CompressionLayer here
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/pets", get(list_pets))
        .route("/pets/:id", get(get_pet))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/stream", get(stream_dashboard))
        .route("/alerts", get(list_alerts))
        .route("/stats", get(get_stats))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
