// Forecast service - One-step-ahead output forecast with a bounded fit time
use crate::application::error::ServiceError;
use crate::application::production_repository::ProductionRepository;
use crate::domain::forecast::{forecast_next, ForecastPoint, ForecastStrategy, TrendFitter};
use crate::infrastructure::config::ForecastSettings;
use std::sync::Arc;

#[derive(Clone)]
pub struct ForecastService {
    repository: Arc<dyn ProductionRepository>,
    settings: ForecastSettings,
}

impl ForecastService {
    pub fn new(repository: Arc<dyn ProductionRepository>, settings: ForecastSettings) -> Self {
        Self {
            repository,
            settings,
        }
    }

    /// Forecast the next `units_produced` value from stored history.
    pub async fn forecast_units(
        &self,
        strategy: Option<ForecastStrategy>,
    ) -> Result<ForecastPoint, ServiceError> {
        let series: Vec<f64> = self
            .repository
            .list()
            .await?
            .iter()
            .map(|s| s.record.units_produced())
            .collect();

        self.forecast_series(series, strategy).await
    }

    /// Forecast the point after `series` with the configured or requested strategy.
    pub async fn forecast_series(
        &self,
        series: Vec<f64>,
        strategy: Option<ForecastStrategy>,
    ) -> Result<ForecastPoint, ServiceError> {
        let strategy = strategy.unwrap_or(self.settings.strategy);
        tracing::debug!(?strategy, points = series.len(), "forecast requested");

        let fitter: Arc<dyn TrendFitter> = Arc::from(strategy.fitter(self.settings.season_length));
        self.forecast_with(series, fitter).await
    }

    /// Fit on a blocking thread, cut off at the configured timeout.
    pub async fn forecast_with(
        &self,
        series: Vec<f64>,
        fitter: Arc<dyn TrendFitter>,
    ) -> Result<ForecastPoint, ServiceError> {
        let timeout = self.settings.timeout();
        let points = series.len();

        let task = tokio::task::spawn_blocking(move || forecast_next(&series, &*fitter));

        match tokio::time::timeout(timeout, task).await {
            Ok(Ok(result)) => {
                let point = result?;
                tracing::info!(
                    points,
                    index = point.index,
                    predicted = point.predicted_value,
                    "forecast computed"
                );
                Ok(point)
            }
            Ok(Err(join_err)) => Err(join_err.into()),
            Err(_) => {
                tracing::warn!(points, "forecast timed out after {:?}", timeout);
                Err(ServiceError::Timeout(timeout))
            }
        }
    }
}
