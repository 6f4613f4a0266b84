// KPI calculator - production rate, MTBF, MTTR
use super::error::KpiError;
use super::production::Totals;
use serde::{Deserialize, Serialize};

/// How production rate is normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RateMode {
    /// `(units / hours) / max_capacity * 100`
    CapacityNormalized { max_capacity: f64 },
    /// `(units / hours) * 100`
    CapacityFree,
}

/// Configured name of a [`RateMode`], before the capacity is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateModeKind {
    CapacityNormalized,
    CapacityFree,
}

impl RateMode {
    /// Resolve a configured mode. Normalized mode needs a positive capacity.
    pub fn from_settings(kind: RateModeKind, max_capacity: Option<f64>) -> Result<Self, KpiError> {
        match kind {
            RateModeKind::CapacityFree => Ok(Self::CapacityFree),
            RateModeKind::CapacityNormalized => match max_capacity {
                Some(c) if c.is_finite() && c > 0.0 => {
                    Ok(Self::CapacityNormalized { max_capacity: c })
                }
                Some(c) => Err(KpiError::validation(format!(
                    "max_capacity must be positive in capacity_normalized mode, got {}",
                    c
                ))),
                None => Err(KpiError::validation(
                    "max_capacity is required in capacity_normalized mode",
                )),
            },
        }
    }

    /// Capacity-free when the capacity is absent or zero.
    pub fn from_max_capacity(max_capacity: Option<f64>) -> Self {
        match max_capacity {
            Some(c) if c > 0.0 => Self::CapacityNormalized { max_capacity: c },
            _ => Self::CapacityFree,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct KpiResult {
    /// Percent of capacity achieved.
    pub production_rate: f64,
    /// Hours.
    pub mtbf: f64,
    /// Hours.
    pub mttr: f64,
}

/// Derive the three KPIs from aggregated totals.
///
/// Any KPI whose denominator is zero, or whose result would be negative or
/// non-finite, is reported as 0 so the dashboard always has something to draw.
pub fn compute_kpis(totals: &Totals, mode: RateMode) -> KpiResult {
    let production_rate = if totals.production_hours > 0.0 {
        let per_hour = totals.units_produced / totals.production_hours;
        match mode {
            RateMode::CapacityNormalized { max_capacity } if max_capacity > 0.0 => {
                per_hour / max_capacity * 100.0
            }
            RateMode::CapacityNormalized { .. } => 0.0,
            RateMode::CapacityFree => per_hour * 100.0,
        }
    } else {
        0.0
    };

    let (mtbf, mttr) = if totals.failures > 0.0 {
        (
            totals.production_hours / totals.failures,
            totals.downtime_hours / totals.failures,
        )
    } else {
        (0.0, 0.0)
    };

    KpiResult {
        production_rate: display_safe(production_rate),
        mtbf: display_safe(mtbf),
        mttr: display_safe(mttr),
    }
}

/// Share of scheduled hours that are productive, in percent.
pub fn projected_availability(production_hours: f64, downtime_hours: f64) -> f64 {
    if production_hours <= 0.0 {
        return 0.0;
    }
    display_safe(production_hours / (production_hours + downtime_hours) * 100.0)
}

fn display_safe(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::production::{aggregate, ProductionRecord};

    fn totals(time: f64, units: f64, downtime: f64, failures: f64) -> Totals {
        Totals {
            production_hours: time,
            units_produced: units,
            downtime_hours: downtime,
            failures,
        }
    }

    #[test]
    fn test_single_record_scenario() {
        let records = [ProductionRecord::new(10.0, 50.0, 1.0, 2.0).unwrap()];
        let kpis = compute_kpis(
            &aggregate(&records),
            RateMode::CapacityNormalized { max_capacity: 10.0 },
        );

        assert_eq!(kpis.production_rate, 50.0);
        assert_eq!(kpis.mtbf, 5.0);
        assert_eq!(kpis.mttr, 0.5);
    }

    #[test]
    fn test_empty_records_give_zeros() {
        let kpis = compute_kpis(&aggregate(&[]), RateMode::CapacityFree);
        assert_eq!(kpis, KpiResult::default());
    }

    #[test]
    fn test_capacity_free_formula() {
        let kpis = compute_kpis(&totals(8.0, 4.0, 0.0, 0.0), RateMode::CapacityFree);
        assert_eq!(kpis.production_rate, 50.0);
    }

    #[test]
    fn test_normalized_formula_matches_definition() {
        let t = totals(7.0, 123.0, 2.0, 3.0);
        let kpis = compute_kpis(&t, RateMode::CapacityNormalized { max_capacity: 4.5 });
        assert_eq!(kpis.production_rate, (123.0 / 7.0) / 4.5 * 100.0);
    }

    #[test]
    fn test_zero_failures_zero_mtbf_and_mttr() {
        for t in [totals(10.0, 5.0, 3.0, 0.0), totals(0.0, 0.0, 9.0, 0.0)] {
            let kpis = compute_kpis(&t, RateMode::CapacityFree);
            assert_eq!(kpis.mtbf, 0.0);
            assert_eq!(kpis.mttr, 0.0);
        }
    }

    #[test]
    fn test_zero_time_zero_rate() {
        let kpis = compute_kpis(
            &totals(0.0, 100.0, 1.0, 1.0),
            RateMode::CapacityNormalized { max_capacity: 10.0 },
        );
        assert_eq!(kpis.production_rate, 0.0);
        assert_eq!(kpis.mttr, 1.0);
    }

    #[test]
    fn test_zero_capacity_in_normalized_mode_is_zero_rate() {
        let kpis = compute_kpis(
            &totals(10.0, 50.0, 1.0, 2.0),
            RateMode::CapacityNormalized { max_capacity: 0.0 },
        );
        assert_eq!(kpis.production_rate, 0.0);
        assert_eq!(kpis.mtbf, 5.0);
    }

    #[test]
    fn test_compute_is_deterministic() {
        let t = totals(3.3, 17.1, 0.7, 3.0);
        let mode = RateMode::CapacityNormalized { max_capacity: 1.9 };
        let a = compute_kpis(&t, mode);
        let b = compute_kpis(&t, mode);
        assert_eq!(a.production_rate.to_bits(), b.production_rate.to_bits());
        assert_eq!(a.mtbf.to_bits(), b.mtbf.to_bits());
        assert_eq!(a.mttr.to_bits(), b.mttr.to_bits());
    }

    #[test]
    fn test_rate_mode_from_settings() {
        assert_eq!(
            RateMode::from_settings(RateModeKind::CapacityNormalized, Some(12.0)).unwrap(),
            RateMode::CapacityNormalized { max_capacity: 12.0 }
        );
        assert!(RateMode::from_settings(RateModeKind::CapacityNormalized, None).is_err());
        assert!(RateMode::from_settings(RateModeKind::CapacityNormalized, Some(0.0)).is_err());
        assert_eq!(
            RateMode::from_settings(RateModeKind::CapacityFree, None).unwrap(),
            RateMode::CapacityFree
        );
    }

    #[test]
    fn test_rate_mode_from_max_capacity() {
        assert_eq!(RateMode::from_max_capacity(Some(0.0)), RateMode::CapacityFree);
        assert_eq!(RateMode::from_max_capacity(None), RateMode::CapacityFree);
        assert_eq!(
            RateMode::from_max_capacity(Some(2.0)),
            RateMode::CapacityNormalized { max_capacity: 2.0 }
        );
    }

    #[test]
    fn test_projected_availability() {
        assert_eq!(projected_availability(6.0, 2.0), 75.0);
        assert_eq!(projected_availability(0.0, 2.0), 0.0);
        assert_eq!(projected_availability(5.0, 0.0), 100.0);
    }
}
