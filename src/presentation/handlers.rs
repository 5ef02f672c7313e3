// HTTP request handlers
use crate::application::alert_service::AlertFilter;
use crate::domain::status::Severity;
use crate::infrastructure::chunked_json::stream_from_receiver;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub pet: Option<String>,
    pub hours: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct AlertQuery {
    pub pet: Option<String>,
    pub severity: Option<String>,
    pub limit: Option<usize>,
}

async fn respond<T: Serialize>(headers: &HeaderMap, data: &T) -> Result<Response, ApiError> {
    json_response(StatusCode::OK, data, accepts_brotli(headers))
        .await
        .map_err(|_| ApiError::Encoding)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List all pets with their latest vitals
pub async fn list_pets(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let pets = state.pet_service.list_pets().await?;
    respond(&headers, &pets).await
}

pub async fn get_pet(
    Path(id): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    match state.pet_service.get_pet(&id).await? {
        Some(pet) => respond(&headers, &pet).await,
        None => Err(ApiError::PetNotFound(id)),
    }
}

/// Dashboard view for the selected pet (first pet when unset or unknown)
pub async fn get_dashboard(
    Query(query): Query<DashboardQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let hours = query.hours.unwrap_or(state.default_hours);
    let view = state
        .dashboard_service
        .get_dashboard(query.pet.as_deref(), hours)
        .await?;
    respond(&headers, &view).await
}

/// Stream dashboard for the selected pet (progressive loading)
pub async fn stream_dashboard(
    Query(query): Query<DashboardQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let hours = query.hours.unwrap_or(state.default_hours);
    let rx = state
        .streaming_service
        .stream_dashboard(query.pet.as_deref(), hours)
        .await;
    stream_from_receiver(rx, accepts_brotli(&headers)).await
}

pub async fn list_alerts(
    Query(query): Query<AlertQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let severity = query
        .severity
        .map(|s| s.parse::<Severity>().map_err(ApiError::InvalidSeverity))
        .transpose()?;
    let filter = AlertFilter {
        pet_id: query.pet,
        severity,
        limit: query.limit,
    };

    let alerts = state.alert_service.list_alerts(&filter).await?;
    respond(&headers, &alerts).await
}

pub async fn get_stats(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let stats = state.alert_service.stats().await?;
    respond(&headers, &stats).await
}
