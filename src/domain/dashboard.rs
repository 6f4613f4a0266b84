// Dashboard domain model
use super::gauge::GaugeSpec;
use super::kpi::KpiResult;
use super::production::Totals;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub record_count: usize,
    pub totals: Totals,
    pub kpis: KpiResult,
    pub gauges: Vec<GaugeSpec>,
}

impl Dashboard {
    pub fn new(
        title: String,
        record_count: usize,
        totals: Totals,
        kpis: KpiResult,
        gauges: Vec<GaugeSpec>,
    ) -> Self {
        Self {
            title,
            record_count,
            totals,
            kpis,
            gauges,
        }
    }
}
