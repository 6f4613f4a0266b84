// HTTP request handlers
use crate::application::error::ServiceError;
use crate::domain::error::KpiError;
use crate::domain::forecast::ForecastStrategy;
use crate::domain::gauge::ColorTag;
use crate::domain::kpi::projected_availability;
use crate::domain::production::ProductionRecord;
use crate::infrastructure::chunked_json::stream_from_receiver;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct DashboardQuery {
    pub color: Option<String>,
}

impl DashboardQuery {
    fn color_override(&self) -> Option<ColorTag> {
        self.color
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .map(ColorTag::new)
    }
}

#[derive(Deserialize, Default)]
pub struct ForecastRequest {
    /// Explicit history; stored `units_produced` when absent.
    pub series: Option<Vec<f64>>,
    pub strategy: Option<ForecastStrategy>,
}

#[derive(Deserialize)]
pub struct AvailabilityRequest {
    pub production_hours: f64,
    pub downtime_hours: f64,
}

#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub availability_percent: f64,
}

/// Request failure rendered as `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    Service(ServiceError),
    BadBody(String),
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        Self::Service(e)
    }
}

impl From<KpiError> for ApiError {
    fn from(e: KpiError) -> Self {
        Self::Service(ServiceError::Kpi(e))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadBody(message) => (StatusCode::UNPROCESSABLE_ENTITY, message),
            Self::Service(ServiceError::Kpi(e)) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            Self::Service(e @ ServiceError::Timeout(_)) => (StatusCode::GATEWAY_TIMEOUT, e.to_string()),
            Self::Service(e) => {
                tracing::error!("Request failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List stored production records
pub async fn list_records(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let records = state.kpi_service.list_records().await?;
    Ok(Json(records).into_response())
}

/// Validate and store one production record
pub async fn submit_record(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ProductionRecord>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(record) = body?;
    let stored = state.kpi_service.submit_record(record).await?;
    Ok((StatusCode::CREATED, Json(stored)).into_response())
}

/// Full dashboard: totals, KPIs and gauges
pub async fn get_dashboard(
    Query(query): Query<DashboardQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let dashboard = state
        .kpi_service
        .get_dashboard(query.color_override())
        .await?;

    match json_response(StatusCode::OK, &dashboard, accepts_brotli(&headers)).await {
        Ok(response) => Ok(response),
        Err(status) => Ok(status.into_response()),
    }
}

/// Stream the dashboard progressively
pub async fn stream_dashboard(
    Query(query): Query<DashboardQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let compress = accepts_brotli(&headers);
    let rx = state
        .streaming_service
        .stream_dashboard(query.color_override())
        .await;
    stream_from_receiver(rx, compress).await
}

/// One-step-ahead forecast of units produced.
///
/// An empty body forecasts stored history; anything else must parse.
pub async fn forecast(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request: ForecastRequest = if body.iter().all(u8::is_ascii_whitespace) {
        ForecastRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::BadBody(format!("Invalid forecast request: {}", e)))?
    };

    let point = match request.series {
        Some(series) => {
            state
                .forecast_service
                .forecast_series(series, request.strategy)
                .await?
        }
        None => state.forecast_service.forecast_units(request.strategy).await?,
    };

    Ok(Json(point).into_response())
}

/// Projected availability for a planned production/downtime split
pub async fn project_availability(
    body: Result<Json<AvailabilityRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = body?;

    for (name, value) in [
        ("production_hours", request.production_hours),
        ("downtime_hours", request.downtime_hours),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(KpiError::validation(format!("{} must be non-negative", name)).into());
        }
    }

    let availability_percent = projected_availability(request.production_hours, request.downtime_hours);
    Ok(Json(AvailabilityResponse {
        availability_percent,
    })
    .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (
                ApiError::Service(ServiceError::Timeout(Duration::from_millis(10))),
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (
                ApiError::from(KpiError::InsufficientData {
                    required: 2,
                    actual: 1,
                }),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::BadBody("bad".to_string()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::Service(ServiceError::Storage(anyhow::anyhow!("disk gone"))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }
}
