//! Summary statistics for derived series
//!
//! Shown in the Statistics pane next to the chart. The coefficient of
//! variation follows the backend's rule: sample standard deviation over the
//! mean, in percent, and zero for fewer than two values or a zero mean.

use crate::chart::series::SeriesDescriptor;
use crate::types::{ParameterId, RepeatabilityDataset};

/// Statistics for one plotted series
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesStatistics {
    pub parameter: Option<ParameterId>,
    /// Number of present values
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Sample standard deviation
    pub std_dev: f64,
    /// Coefficient of variation in percent
    pub cv_percent: f64,
    /// Value of the most recent row that has one
    pub latest: Option<f64>,
    /// Points below the alert threshold
    pub alert_count: usize,
    /// CV of the most recent day, as reported by the backend
    pub reported_cv: Option<f64>,
}

impl SeriesStatistics {
    /// Calculate statistics for a derived series
    pub fn from_series(series: &SeriesDescriptor, dataset: &RepeatabilityDataset) -> Self {
        let values = series.values();
        let mut stats = Self::from_values(&values);
        stats.parameter = Some(series.parameter.clone());
        stats.alert_count = series.alert_points().count();
        stats.reported_cv = dataset.latest_cv(&series.parameter);
        stats
    }

    /// Calculate statistics from a slice of values
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let count = values.len();
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / count as f64;

        let std_dev = if count > 1 {
            let variance =
                values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            variance.sqrt()
        } else {
            0.0
        };

        let cv_percent = if count > 1 && mean != 0.0 {
            std_dev / mean * 100.0
        } else {
            0.0
        };

        Self {
            parameter: None,
            count,
            min,
            max,
            mean,
            std_dev,
            cv_percent,
            latest: values.last().copied(),
            alert_count: 0,
            reported_cv: None,
        }
    }

    /// Get the peak-to-peak range
    pub fn peak_to_peak(&self) -> f64 {
        self.max - self.min
    }

    /// Check if this is a valid (non-empty) statistics
    pub fn is_valid(&self) -> bool {
        self.count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::selection::SelectionState;
    use crate::chart::series::{derive_series, ChartThresholds};
    use crate::types::TimeSeriesRow;

    #[test]
    fn test_statistics_empty() {
        let stats = SeriesStatistics::from_values(&[]);
        assert!(!stats.is_valid());
        assert_eq!(stats.latest, None);
    }

    #[test]
    fn test_statistics_single_value_has_zero_cv() {
        let stats = SeriesStatistics::from_values(&[12.0]);
        assert_eq!(stats.count, 1);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.cv_percent, 0.0);
    }

    #[test]
    fn test_statistics_values() {
        let stats = SeriesStatistics::from_values(&[10.0, 12.0, 14.0]);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 14.0);
        assert!((stats.mean - 12.0).abs() < 1e-9);
        assert!((stats.std_dev - 2.0).abs() < 1e-9);
        assert!((stats.cv_percent - 16.666_666).abs() < 1e-3);
        assert_eq!(stats.latest, Some(14.0));
        assert_eq!(stats.peak_to_peak(), 4.0);
    }

    #[test]
    fn test_statistics_zero_mean() {
        let stats = SeriesStatistics::from_values(&[-1.0, 1.0]);
        assert_eq!(stats.cv_percent, 0.0);
    }

    #[test]
    fn test_statistics_from_series() {
        let rows = vec![
            TimeSeriesRow::new("2024-05-01")
                .with_value("PCE_avg", 10.2)
                .with_value("PCE_cv", 2.5),
            TimeSeriesRow::new("2024-05-02")
                .with_value("PCE_avg", 12.0)
                .with_value("PCE_cv", 1.1),
        ];
        let dataset = RepeatabilityDataset::new(rows, vec![ParameterId::primary()]);
        let series = derive_series(
            &SelectionState::default(),
            &dataset,
            &ChartThresholds::default(),
        );

        let stats = SeriesStatistics::from_series(&series[0], &dataset);
        assert_eq!(stats.parameter, Some(ParameterId::primary()));
        assert_eq!(stats.count, 2);
        assert_eq!(stats.alert_count, 1);
        assert_eq!(stats.reported_cv, Some(1.1));
        assert_eq!(stats.latest, Some(12.0));
    }
}
