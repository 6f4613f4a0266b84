// Gauge presentation model - thermometer gauges for each KPI
use super::kpi::KpiResult;
use super::production::ProductionRecord;
use serde::{Deserialize, Serialize};

/// Axis ceiling used when the objective is zero, negative or not finite.
pub const MIN_AXIS_MAX: f64 = 1.0;

pub const DEFAULT_BAR_COLOR: &str = "lightblue";
const ACHIEVED_COLOR: &str = "green";
const REMAINING_COLOR: &str = "red";
const THRESHOLD_COLOR: &str = "red";
const THRESHOLD_WIDTH: u32 = 4;
const THRESHOLD_THICKNESS: f64 = 0.75;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorTag(String);

impl ColorTag {
    pub fn new(color: impl Into<String>) -> Self {
        Self(color.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ColorTag {
    fn default() -> Self {
        Self::new(DEFAULT_BAR_COLOR)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BandTag {
    Achieved,
    Remaining,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeBand {
    pub start: f64,
    pub end: f64,
    pub tag: BandTag,
    pub color: ColorTag,
}

impl GaugeBand {
    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Threshold {
    pub value: f64,
    pub color: ColorTag,
    pub width: u32,
    pub thickness: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeSpec {
    pub label: String,
    pub value: f64,
    pub axis_min: f64,
    pub axis_max: f64,
    pub bar_color: ColorTag,
    pub bands: Vec<GaugeBand>,
    pub threshold: Threshold,
}

/// Build a thermometer gauge for `value` against `objective`.
///
/// The axis spans `[0, objective]`, floored at [`MIN_AXIS_MAX`]. Two bands
/// split at `value`: achieved then remaining. When `value` reaches or passes
/// the axis ceiling the remaining band has zero width but is still returned.
/// `color_override` changes only the bar color.
pub fn build_gauge(
    value: f64,
    objective: f64,
    label: &str,
    color_override: Option<ColorTag>,
) -> GaugeSpec {
    let value = if value.is_finite() && value > 0.0 { value } else { 0.0 };
    let axis_max = if objective.is_finite() && objective > 0.0 {
        objective
    } else {
        MIN_AXIS_MAX
    };

    let bands = vec![
        GaugeBand {
            start: 0.0,
            end: value,
            tag: BandTag::Achieved,
            color: ColorTag::new(ACHIEVED_COLOR),
        },
        GaugeBand {
            start: value,
            end: value.max(axis_max),
            tag: BandTag::Remaining,
            color: ColorTag::new(REMAINING_COLOR),
        },
    ];

    GaugeSpec {
        label: label.to_string(),
        value,
        axis_min: 0.0,
        axis_max,
        bar_color: color_override.unwrap_or_default(),
        bands,
        threshold: Threshold {
            value,
            color: ColorTag::new(THRESHOLD_COLOR),
            width: THRESHOLD_WIDTH,
            thickness: THRESHOLD_THICKNESS,
        },
    }
}

/// Where the MTBF gauge puts its ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum MtbfObjective {
    /// Total production time of the period: no failure at all.
    #[default]
    TotalProductionTime,
    /// Longest single-record production time.
    LongestRecord,
    Fixed { hours: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct GaugeObjectives {
    #[serde(default = "default_production_rate_objective")]
    pub production_rate: f64,
    #[serde(default)]
    pub mtbf: MtbfObjective,
    #[serde(default = "default_mttr_objective")]
    pub mttr_hours: f64,
}

fn default_production_rate_objective() -> f64 {
    100.0
}

fn default_mttr_objective() -> f64 {
    2.0
}

impl Default for GaugeObjectives {
    fn default() -> Self {
        Self {
            production_rate: default_production_rate_objective(),
            mtbf: MtbfObjective::default(),
            mttr_hours: default_mttr_objective(),
        }
    }
}

impl GaugeObjectives {
    /// Turn the MTBF policy into hours for this record set.
    pub fn mtbf_hours(&self, records: &[ProductionRecord]) -> f64 {
        match self.mtbf {
            MtbfObjective::TotalProductionTime => {
                records.iter().map(|r| r.production_hours()).sum()
            }
            MtbfObjective::LongestRecord => records
                .iter()
                .map(|r| r.production_hours())
                .fold(0.0, f64::max),
            MtbfObjective::Fixed { hours } => hours,
        }
    }
}

pub const PRODUCTION_RATE_LABEL: &str = "Production rate (%)";
pub const MTBF_LABEL: &str = "Mean time between failures (h)";
pub const MTTR_LABEL: &str = "Mean time to repair (h)";

/// One gauge per KPI, in the order production rate, MTBF, MTTR.
pub fn kpi_gauges(
    kpis: &KpiResult,
    records: &[ProductionRecord],
    objectives: &GaugeObjectives,
    color_override: Option<ColorTag>,
) -> Vec<GaugeSpec> {
    vec![
        build_gauge(
            kpis.production_rate,
            objectives.production_rate,
            PRODUCTION_RATE_LABEL,
            color_override.clone(),
        ),
        build_gauge(
            kpis.mtbf,
            objectives.mtbf_hours(records),
            MTBF_LABEL,
            color_override.clone(),
        ),
        build_gauge(kpis.mttr, objectives.mttr_hours, MTTR_LABEL, color_override),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands_split_at_value() {
        let gauge = build_gauge(40.0, 100.0, "rate", None);

        assert_eq!(gauge.axis_min, 0.0);
        assert_eq!(gauge.axis_max, 100.0);
        assert_eq!(gauge.bands.len(), 2);
        assert_eq!((gauge.bands[0].start, gauge.bands[0].end), (0.0, 40.0));
        assert_eq!(gauge.bands[0].tag, BandTag::Achieved);
        assert_eq!(gauge.bands[0].color.as_str(), "green");
        assert_eq!((gauge.bands[1].start, gauge.bands[1].end), (40.0, 100.0));
        assert_eq!(gauge.bands[1].tag, BandTag::Remaining);
        assert_eq!(gauge.bands[1].color.as_str(), "red");
    }

    #[test]
    fn test_overshoot_keeps_empty_remaining_band() {
        let gauge = build_gauge(120.0, 100.0, "rate", None);

        assert_eq!(gauge.value, 120.0);
        assert_eq!(gauge.axis_max, 100.0);
        assert_eq!(gauge.bands.len(), 2);
        assert_eq!(gauge.bands[1].tag, BandTag::Remaining);
        assert_eq!(gauge.bands[1].width(), 0.0);
        assert_eq!(gauge.bands[0].end, gauge.bands[1].start);
    }

    #[test]
    fn test_degenerate_objective_uses_floor() {
        for objective in [0.0, -3.0, f64::NAN] {
            let gauge = build_gauge(0.0, objective, "mtbf", None);
            assert_eq!(gauge.axis_max, MIN_AXIS_MAX);
            assert!(gauge.axis_max > gauge.axis_min);
        }
    }

    #[test]
    fn test_color_override_only_touches_bar() {
        let gauge = build_gauge(1.0, 2.0, "mttr", Some(ColorTag::new("#00f900")));

        assert_eq!(gauge.bar_color.as_str(), "#00f900");
        assert_eq!(gauge.bands[0].color.as_str(), "green");
        assert_eq!(gauge.bands[1].color.as_str(), "red");
        assert_eq!(gauge.threshold.color.as_str(), "red");
    }

    #[test]
    fn test_threshold_sits_on_value() {
        let gauge = build_gauge(0.5, 2.0, "mttr", None);

        assert_eq!(gauge.threshold.value, 0.5);
        assert_eq!(gauge.threshold.width, 4);
        assert_eq!(gauge.threshold.thickness, 0.75);
        assert_eq!(gauge.bar_color.as_str(), DEFAULT_BAR_COLOR);
    }

    #[test]
    fn test_mtbf_objective_policies() {
        let records = [
            ProductionRecord::new(10.0, 1.0, 0.0, 0.0).unwrap(),
            ProductionRecord::new(4.0, 1.0, 0.0, 0.0).unwrap(),
        ];
        let mut objectives = GaugeObjectives::default();
        assert_eq!(objectives.mtbf_hours(&records), 14.0);

        objectives.mtbf = MtbfObjective::LongestRecord;
        assert_eq!(objectives.mtbf_hours(&records), 10.0);

        objectives.mtbf = MtbfObjective::Fixed { hours: 24.0 };
        assert_eq!(objectives.mtbf_hours(&records), 24.0);
    }

    #[test]
    fn test_kpi_gauges_use_objectives() {
        let records = [ProductionRecord::new(10.0, 50.0, 1.0, 2.0).unwrap()];
        let kpis = KpiResult {
            production_rate: 50.0,
            mtbf: 5.0,
            mttr: 0.5,
        };
        let gauges = kpi_gauges(&kpis, &records, &GaugeObjectives::default(), None);

        assert_eq!(gauges.len(), 3);
        assert_eq!(gauges[0].axis_max, 100.0);
        assert_eq!(gauges[1].axis_max, 10.0);
        assert_eq!(gauges[2].axis_max, 2.0);
        assert_eq!(gauges[2].label, MTTR_LABEL);
    }
}
