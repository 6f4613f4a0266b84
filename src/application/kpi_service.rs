// KPI service - Use cases for recording production and building dashboards
use crate::application::error::ServiceError;
use crate::application::production_repository::{ProductionRepository, StoredRecord};
use crate::domain::dashboard::Dashboard;
use crate::domain::gauge::{kpi_gauges, ColorTag, GaugeObjectives};
use crate::domain::kpi::{compute_kpis, RateMode};
use crate::domain::production::{aggregate, ProductionRecord};
use std::sync::Arc;

/// Resolved settings the dashboard is built with.
#[derive(Debug, Clone)]
pub struct DashboardSettings {
    pub title: String,
    pub rate_mode: RateMode,
    pub objectives: GaugeObjectives,
    pub bar_color: ColorTag,
}

#[derive(Clone)]
pub struct KpiService {
    repository: Arc<dyn ProductionRepository>,
    settings: DashboardSettings,
}

impl KpiService {
    pub fn new(repository: Arc<dyn ProductionRepository>, settings: DashboardSettings) -> Self {
        Self {
            repository,
            settings,
        }
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    pub async fn submit_record(&self, record: ProductionRecord) -> Result<StoredRecord, ServiceError> {
        let stored = self.repository.append(record).await?;
        tracing::info!(
            id = stored.id,
            production_hours = record.production_hours(),
            units_produced = record.units_produced(),
            "production record stored"
        );
        Ok(stored)
    }

    pub async fn list_records(&self) -> Result<Vec<StoredRecord>, ServiceError> {
        Ok(self.repository.list().await?)
    }

    pub async fn history(&self) -> Result<Vec<ProductionRecord>, ServiceError> {
        let stored = self.repository.list().await?;
        Ok(stored.into_iter().map(|s| s.record).collect())
    }

    pub async fn get_dashboard(&self, color_override: Option<ColorTag>) -> Result<Dashboard, ServiceError> {
        let records = self.history().await?;
        Ok(self.build_dashboard(&records, color_override))
    }

    /// Aggregate, compute and normalize in one pass over `records`.
    pub fn build_dashboard(&self, records: &[ProductionRecord], color_override: Option<ColorTag>) -> Dashboard {
        let totals = aggregate(records);
        let kpis = compute_kpis(&totals, self.settings.rate_mode);
        let bar_color = color_override.unwrap_or_else(|| self.settings.bar_color.clone());
        let gauges = kpi_gauges(&kpis, records, &self.settings.objectives, Some(bar_color));

        tracing::debug!(
            records = records.len(),
            production_rate = kpis.production_rate,
            mtbf = kpis.mtbf,
            mttr = kpis.mttr,
            "dashboard computed"
        );

        Dashboard::new(self.settings.title.clone(), records.len(), totals, kpis, gauges)
    }
}
