//! Test data builders for creating test objects

use passdown_vis::types::{ParameterId, ParameterMeta, RepeatabilityDataset, TimeSeriesRow};

/// Builder for creating test repeatability datasets
///
/// Dates are generated as consecutive days in May 2024.
pub struct DatasetBuilder {
    parameters: Vec<ParameterId>,
    rows: Vec<TimeSeriesRow>,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self {
            parameters: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Offer every known parameter, in backend order
    pub fn all_known_parameters(mut self) -> Self {
        self.parameters = ParameterMeta::known_ids().collect();
        self
    }

    pub fn parameter(mut self, id: &str) -> Self {
        self.parameters.push(ParameterId::new(id));
        self
    }

    /// Add a row with `(parameter, average)` pairs
    pub fn row(mut self, values: &[(&str, f64)]) -> Self {
        let day = self.rows.len() + 1;
        let mut row = TimeSeriesRow::new(format!("2024-05-{:02}", day));
        row.date_short = Some(format!("05/{:02}", day));
        for (id, value) in values {
            row = row.with_value(ParameterId::new(*id).avg_key(), *value);
        }
        self.rows.push(row);
        self
    }

    pub fn build(self) -> RepeatabilityDataset {
        RepeatabilityDataset::new(self.rows, self.parameters)
    }
}

impl Default for DatasetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Dataset with all known parameters and two PCE rows, one of them below the alert threshold
pub fn sample_dataset() -> RepeatabilityDataset {
    DatasetBuilder::new()
        .all_known_parameters()
        .row(&[("PCE", 10.2), ("FF", 78.0)])
        .row(&[("PCE", 12.0), ("FF", 79.5)])
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_builder() {
        let dataset = DatasetBuilder::new()
            .parameter("PCE")
            .row(&[("PCE", 11.0)])
            .build();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.rows[0].value("PCE_avg"), Some(11.0));
        assert_eq!(dataset.dates, vec!["2024-05-01".to_string()]);
    }
}
