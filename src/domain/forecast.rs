// Forecast adapter - one-step-ahead estimate over a pluggable trend fitter
use super::error::KpiError;
use serde::{Deserialize, Serialize};

pub const MIN_FORECAST_POINTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub index: usize,
    pub predicted_value: f64,
}

/// A fitted model that can be evaluated at any index.
pub trait TrendModel: Send + Sync {
    fn predict(&self, index: usize) -> f64;
}

/// A fitting capability: `fit(series) -> model`.
pub trait TrendFitter: Send + Sync {
    fn fit(&self, series: &[f64]) -> Result<Box<dyn TrendModel>, KpiError>;
}

/// Fit `series` (indexed `0..N`) and predict at index `N`.
pub fn forecast_next(series: &[f64], fitter: &dyn TrendFitter) -> Result<ForecastPoint, KpiError> {
    if series.len() < MIN_FORECAST_POINTS {
        return Err(KpiError::InsufficientData {
            required: MIN_FORECAST_POINTS,
            actual: series.len(),
        });
    }
    if let Some(pos) = series.iter().position(|v| !v.is_finite()) {
        return Err(KpiError::validation(format!(
            "series value at index {} is not finite",
            pos
        )));
    }

    let model = fitter.fit(series)?;
    let index = series.len();
    let predicted_value = model.predict(index);

    if !predicted_value.is_finite() {
        return Err(KpiError::validation("trend fit produced a non-finite prediction"));
    }

    Ok(ForecastPoint {
        index,
        predicted_value,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastStrategy {
    #[default]
    LinearTrend,
    Seasonal,
}

impl ForecastStrategy {
    pub fn fitter(self, season_length: usize) -> Box<dyn TrendFitter> {
        match self {
            Self::LinearTrend => Box::new(LinearTrend),
            Self::Seasonal => Box::new(SeasonalTrend::new(season_length)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Line {
    intercept: f64,
    slope: f64,
}

impl Line {
    /// Ordinary least squares of value on index.
    fn fit(values: &[f64]) -> Self {
        let n = values.len() as f64;
        let sum_x: f64 = (0..values.len()).map(|i| i as f64).sum();
        let sum_y: f64 = values.iter().sum();
        let sum_xy: f64 = values.iter().enumerate().map(|(i, y)| i as f64 * y).sum();
        let sum_x2: f64 = (0..values.len()).map(|i| (i as f64).powi(2)).sum();
        let denom = n * sum_x2 - sum_x.powi(2);

        let slope = if denom.abs() < f64::EPSILON {
            0.0
        } else {
            (n * sum_xy - sum_x * sum_y) / denom
        };
        let intercept = if n > 0.0 { (sum_y - slope * sum_x) / n } else { 0.0 };

        Self { intercept, slope }
    }

    fn at(&self, index: usize) -> f64 {
        self.intercept + self.slope * index as f64
    }
}

impl TrendModel for Line {
    fn predict(&self, index: usize) -> f64 {
        self.at(index)
    }
}

/// Straight-line trend over the index.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearTrend;

impl TrendFitter for LinearTrend {
    fn fit(&self, series: &[f64]) -> Result<Box<dyn TrendModel>, KpiError> {
        Ok(Box::new(Line::fit(series)))
    }
}

/// Additive decomposition: linear trend plus the mean residual of each phase
/// of a repeating season.
#[derive(Debug, Clone, Copy)]
pub struct SeasonalTrend {
    season_length: usize,
}

impl SeasonalTrend {
    pub fn new(season_length: usize) -> Self {
        Self { season_length }
    }
}

struct SeasonalModel {
    trend: Line,
    seasonal: Vec<f64>,
}

impl TrendModel for SeasonalModel {
    fn predict(&self, index: usize) -> f64 {
        let offset = if self.seasonal.is_empty() {
            0.0
        } else {
            self.seasonal[index % self.seasonal.len()]
        };
        self.trend.at(index) + offset
    }
}

impl TrendFitter for SeasonalTrend {
    fn fit(&self, series: &[f64]) -> Result<Box<dyn TrendModel>, KpiError> {
        let trend = Line::fit(series);

        // Fewer than two full seasons: the phase means would just echo the data.
        if self.season_length < 2 || series.len() < 2 * self.season_length {
            tracing::debug!(
                season_length = self.season_length,
                points = series.len(),
                "not enough data for seasonal component, using trend only"
            );
            return Ok(Box::new(SeasonalModel {
                trend,
                seasonal: Vec::new(),
            }));
        }

        let mut sums = vec![0.0; self.season_length];
        let mut counts = vec![0usize; self.season_length];
        for (i, value) in series.iter().enumerate() {
            let phase = i % self.season_length;
            sums[phase] += value - trend.at(i);
            counts[phase] += 1;
        }
        let seasonal = sums
            .iter()
            .zip(&counts)
            .map(|(sum, &count)| sum / count as f64)
            .collect();

        Ok(Box::new(SeasonalModel { trend, seasonal }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_point_is_insufficient() {
        let err = forecast_next(&[10.0], &LinearTrend).unwrap_err();
        assert_eq!(
            err,
            KpiError::InsufficientData {
                required: 2,
                actual: 1
            }
        );
        assert!(forecast_next(&[], &LinearTrend).is_err());
    }

    #[test]
    fn test_two_points_linear() {
        let point = forecast_next(&[10.0, 12.0], &LinearTrend).unwrap();
        assert_eq!(point.index, 2);
        assert!((point.predicted_value - 14.0).abs() < 1e-9);
    }

    #[test]
    fn test_two_points_seasonal_is_finite() {
        let point = forecast_next(&[10.0, 12.0], &SeasonalTrend::new(4)).unwrap();
        assert_eq!(point.index, 2);
        assert!(point.predicted_value.is_finite());
    }

    #[test]
    fn test_flat_series_predicts_flat() {
        let point = forecast_next(&[5.0, 5.0, 5.0, 5.0], &LinearTrend).unwrap();
        assert!((point.predicted_value - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_seasonal_recovers_pattern() {
        // Period-2 zigzag on a flat level.
        let series = [10.0, 20.0, 10.0, 20.0, 10.0, 20.0];
        let linear = forecast_next(&series, &LinearTrend).unwrap();
        let seasonal = forecast_next(&series, &SeasonalTrend::new(2)).unwrap();

        assert_eq!(seasonal.index, 6);
        assert!((seasonal.predicted_value - 10.0).abs() < (linear.predicted_value - 10.0).abs());
    }

    #[test]
    fn test_non_finite_input_rejected() {
        let err = forecast_next(&[1.0, f64::NAN, 3.0], &LinearTrend).unwrap_err();
        assert!(matches!(err, KpiError::Validation(_)));
    }

    #[test]
    fn test_strategy_selects_fitter() {
        let series = [1.0, 2.0, 3.0];
        let a = forecast_next(&series, ForecastStrategy::LinearTrend.fitter(0).as_ref()).unwrap();
        let b = forecast_next(&series, ForecastStrategy::Seasonal.fitter(7).as_ref()).unwrap();
        assert!((a.predicted_value - 4.0).abs() < 1e-9);
        // Not enough data for a 7-step season, so it matches the trend.
        assert!((b.predicted_value - 4.0).abs() < 1e-9);
    }
}
