use crate::application::kpi_service::DashboardSettings;
use crate::domain::error::KpiError;
use crate::domain::forecast::ForecastStrategy;
use crate::domain::gauge::{ColorTag, GaugeObjectives};
use crate::domain::kpi::{RateMode, RateModeKind};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub kpi: KpiSettings,
    #[serde(default)]
    pub objectives: GaugeObjectives,
    #[serde(default)]
    pub gauge: GaugeSettings,
    #[serde(default)]
    pub forecast: ForecastSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct KpiSettings {
    /// Unset: normalized when `max_capacity` is positive, capacity-free otherwise.
    pub mode: Option<RateModeKind>,
    pub max_capacity: Option<f64>,
    pub title: Option<String>,
}

impl KpiSettings {
    pub fn rate_mode(&self) -> Result<RateMode, KpiError> {
        match self.mode {
            Some(kind) => RateMode::from_settings(kind, self.max_capacity),
            None => Ok(RateMode::from_max_capacity(self.max_capacity)),
        }
    }

    pub fn title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| "Production performance".to_string())
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct GaugeSettings {
    #[serde(default)]
    pub bar_color: ColorTag,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ForecastSettings {
    #[serde(default)]
    pub strategy: ForecastStrategy,
    #[serde(default = "default_season_length")]
    pub season_length: usize,
    #[serde(default = "default_forecast_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            strategy: ForecastStrategy::default(),
            season_length: default_season_length(),
            timeout_ms: default_forecast_timeout_ms(),
        }
    }
}

impl ForecastSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_season_length() -> usize {
    7
}

fn default_forecast_timeout_ms() -> u64 {
    2_000
}

impl AppConfig {
    /// Reject settings the KPI engine cannot run with.
    pub fn validate(&self) -> Result<(), KpiError> {
        self.kpi.rate_mode()?;
        if self.forecast.timeout_ms == 0 {
            return Err(KpiError::validation("forecast.timeout_ms must be positive"));
        }
        if !self.objectives.mttr_hours.is_finite() || self.objectives.mttr_hours < 0.0 {
            return Err(KpiError::validation(
                "objectives.mttr_hours must be a non-negative number",
            ));
        }
        Ok(())
    }

    pub fn dashboard_settings(&self) -> Result<DashboardSettings, KpiError> {
        Ok(DashboardSettings {
            title: self.kpi.title(),
            rate_mode: self.kpi.rate_mode()?,
            objectives: self.objectives,
            bar_color: self.gauge.bar_color.clone(),
        })
    }
}

/// Load `config/kpi.*` (optional) overlaid with `KPI__SECTION__KEY` env vars.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/kpi").required(false))
        .add_source(
            config::Environment::with_prefix("KPI")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    let app_config: AppConfig = settings.try_deserialize()?;
    app_config.validate()?;
    Ok(app_config)
}
