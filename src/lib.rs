//! Production KPI engine and dashboard service.
//!
//! `domain` holds the pure core: record aggregation, KPI formulas, gauge
//! normalization and the forecast adapter. The other layers wrap it in an
//! HTTP service with an injected record store.
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

use std::sync::Arc;

use crate::application::forecast_service::ForecastService;
use crate::application::kpi_service::KpiService;
use crate::application::production_repository::ProductionRepository;
use crate::application::streaming_service::StreamingDashboardService;
use crate::domain::error::KpiError;
use crate::infrastructure::config::AppConfig;
use crate::presentation::app_state::AppState;

/// Wire services around `repository` according to `config`.
pub fn build_state(
    config: &AppConfig,
    repository: Arc<dyn ProductionRepository>,
) -> Result<Arc<AppState>, KpiError> {
    let kpi_service = KpiService::new(repository.clone(), config.dashboard_settings()?);
    let forecast_service = ForecastService::new(repository, config.forecast.clone());
    let streaming_service = StreamingDashboardService::new(kpi_service.clone());

    Ok(Arc::new(AppState {
        kpi_service,
        forecast_service,
        streaming_service,
    }))
}
