// Production record domain model and aggregation
use super::error::KpiError;
use serde::{Deserialize, Serialize};

/// One observation of a production run.
///
/// All four fields are non-negative and finite. The only way to build a
/// record is through [`ProductionRecord::new`], which deserialization also
/// goes through, so a record in hand is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRecord")]
pub struct ProductionRecord {
    production_hours: f64,
    units_produced: f64,
    downtime_hours: f64,
    failures: f64,
}

#[derive(Deserialize)]
struct RawRecord {
    production_hours: f64,
    units_produced: f64,
    downtime_hours: f64,
    failures: f64,
}

impl TryFrom<RawRecord> for ProductionRecord {
    type Error = KpiError;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        Self::new(
            raw.production_hours,
            raw.units_produced,
            raw.downtime_hours,
            raw.failures,
        )
    }
}

impl ProductionRecord {
    pub fn new(
        production_hours: f64,
        units_produced: f64,
        downtime_hours: f64,
        failures: f64,
    ) -> Result<Self, KpiError> {
        check_field("production_hours", production_hours)?;
        check_field("units_produced", units_produced)?;
        check_field("downtime_hours", downtime_hours)?;
        check_field("failures", failures)?;

        Ok(Self {
            production_hours,
            units_produced,
            downtime_hours,
            failures,
        })
    }

    pub fn production_hours(&self) -> f64 {
        self.production_hours
    }

    pub fn units_produced(&self) -> f64 {
        self.units_produced
    }

    pub fn downtime_hours(&self) -> f64 {
        self.downtime_hours
    }

    pub fn failures(&self) -> f64 {
        self.failures
    }
}

fn check_field(name: &str, value: f64) -> Result<(), KpiError> {
    if !value.is_finite() {
        return Err(KpiError::validation(format!("{} must be a finite number", name)));
    }
    if value < 0.0 {
        return Err(KpiError::validation(format!(
            "{} must be non-negative, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Field-wise sums over a record sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub production_hours: f64,
    pub units_produced: f64,
    pub downtime_hours: f64,
    pub failures: f64,
}

/// Sum every field across `records`. An empty slice yields all zeros.
pub fn aggregate(records: &[ProductionRecord]) -> Totals {
    records.iter().fold(Totals::default(), |acc, r| Totals {
        production_hours: acc.production_hours + r.production_hours,
        units_produced: acc.units_produced + r.units_produced,
        downtime_hours: acc.downtime_hours + r.downtime_hours,
        failures: acc.failures + r.failures,
    })
}
