// Application state for HTTP handlers
use crate::application::forecast_service::ForecastService;
use crate::application::kpi_service::KpiService;
use crate::application::streaming_service::StreamingDashboardService;

#[derive(Clone)]
pub struct AppState {
    pub kpi_service: KpiService,
    pub forecast_service: ForecastService,
    pub streaming_service: StreamingDashboardService,
}
