//! Series derivation for the repeatability chart
//!
//! Maps the current [`SelectionState`] onto renderable [`SeriesDescriptor`]s.
//! Each point carries its own color: values strictly below the global alert
//! threshold take the alert color no matter which parameter they belong to.
//! Reference lines are independent of the selection and always present.

use crate::chart::selection::SelectionState;
use crate::types::{ParameterId, RepeatabilityDataset};
use serde::{Deserialize, Serialize};

/// Values strictly below this are drawn in the alert color
pub const DEFAULT_ALERT_THRESHOLD: f64 = 10.5;

/// Lower acceptance bound of the primary metric
pub const DEFAULT_LOWER_REFERENCE: f64 = 11.18;

/// Upper acceptance bound of the primary metric
pub const DEFAULT_UPPER_REFERENCE: f64 = 12.35;

/// Alert point color (RGBA)
pub const DEFAULT_ALERT_COLOR: [u8; 4] = [239, 68, 68, 255];

/// Line color for parameters without metadata (RGBA)
pub const DEFAULT_FALLBACK_COLOR: [u8; 4] = [148, 163, 184, 255];

/// A fixed horizontal line drawn on the chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLine {
    pub value: f64,
    pub label: String,
    pub color: [u8; 4],
}

impl ReferenceLine {
    pub fn new(value: f64, label: impl Into<String>, color: [u8; 4]) -> Self {
        Self {
            value,
            label: label.into(),
            color,
        }
    }
}

/// Default acceptance bounds for PCE
pub fn default_reference_lines() -> Vec<ReferenceLine> {
    vec![
        ReferenceLine::new(DEFAULT_LOWER_REFERENCE, "Lower bound", [234, 179, 8, 255]),
        ReferenceLine::new(DEFAULT_UPPER_REFERENCE, "Upper bound", [34, 197, 94, 255]),
    ]
}

/// Thresholds and colors applied while deriving series
#[derive(Debug, Clone, PartialEq)]
pub struct ChartThresholds {
    pub alert_threshold: f64,
    pub alert_color: [u8; 4],
    pub fallback_color: [u8; 4],
    pub reference_lines: Vec<ReferenceLine>,
}

impl Default for ChartThresholds {
    fn default() -> Self {
        Self {
            alert_threshold: DEFAULT_ALERT_THRESHOLD,
            alert_color: DEFAULT_ALERT_COLOR,
            fallback_color: DEFAULT_FALLBACK_COLOR,
            reference_lines: default_reference_lines(),
        }
    }
}

impl ChartThresholds {
    /// Whether a raw value is below the alert threshold
    pub fn is_alert(&self, value: f64) -> bool {
        value < self.alert_threshold
    }
}

/// A single plotted value
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    /// Row index in the dataset (X coordinate)
    pub index: usize,
    pub value: f64,
    pub color: [u8; 4],
    pub alert: bool,
}

impl SeriesPoint {
    pub fn as_plot_point(&self) -> [f64; 2] {
        [self.index as f64, self.value]
    }
}

/// Everything the presentation layer needs to draw one parameter
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesDescriptor {
    /// Row key the values come from (`"PCE_avg"`)
    pub key: String,
    pub parameter: ParameterId,
    pub label: String,
    pub unit: Option<String>,
    pub color: [u8; 4],
    /// Present values only, in row order
    pub points: Vec<SeriesPoint>,
}

impl SeriesDescriptor {
    /// Legend name, e.g. `"PCE (%)"`
    pub fn display_name(&self) -> String {
        match &self.unit {
            Some(unit) => format!("{} ({})", self.label, unit),
            None => self.label.clone(),
        }
    }

    /// Runs of points on consecutive rows; a missing row breaks the line
    pub fn segments(&self) -> Vec<Vec<[f64; 2]>> {
        let mut segments: Vec<Vec<[f64; 2]>> = Vec::new();
        let mut last_index: Option<usize> = None;

        for point in &self.points {
            let contiguous = matches!(last_index, Some(prev) if point.index == prev + 1);
            last_index = Some(point.index);

            match segments.last_mut() {
                Some(current) if contiguous => current.push(point.as_plot_point()),
                _ => segments.push(vec![point.as_plot_point()]),
            }
        }

        segments
    }

    /// Points drawn in the alert color
    pub fn alert_points(&self) -> impl Iterator<Item = &SeriesPoint> {
        self.points.iter().filter(|p| p.alert)
    }

    /// Raw values, in row order
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}

/// Derive one series per selected parameter, in selection order.
///
/// The dataset is only read.
pub fn derive_series(
    selection: &SelectionState,
    dataset: &RepeatabilityDataset,
    thresholds: &ChartThresholds,
) -> Vec<SeriesDescriptor> {
    selection
        .iter()
        .map(|id| derive_one(id, dataset, thresholds))
        .collect()
}

fn derive_one(
    id: &ParameterId,
    dataset: &RepeatabilityDataset,
    thresholds: &ChartThresholds,
) -> SeriesDescriptor {
    let key = id.avg_key();
    let (label, unit, color) = match id.meta() {
        Some(meta) => (meta.label.to_string(), Some(meta.unit.to_string()), meta.color),
        None => (id.as_str().to_string(), None, thresholds.fallback_color),
    };

    let points = dataset
        .rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let value = row.value(&key)?;
            let alert = thresholds.is_alert(value);
            Some(SeriesPoint {
                index,
                value,
                color: if alert { thresholds.alert_color } else { color },
                alert,
            })
        })
        .collect();

    SeriesDescriptor {
        key,
        parameter: id.clone(),
        label,
        unit,
        color,
        points,
    }
}

/// Reference lines to draw, independent of the selection
pub fn reference_lines(thresholds: &ChartThresholds) -> &[ReferenceLine] {
    &thresholds.reference_lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ParameterMeta, TimeSeriesRow};

    fn dataset() -> RepeatabilityDataset {
        let rows = vec![
            TimeSeriesRow::new("2024-05-01")
                .with_value("PCE_avg", 10.2)
                .with_value("FF_avg", 78.0)
                .with_value("Jsc_raw_avg", 9.0),
            TimeSeriesRow::new("2024-05-02").with_value("PCE_avg", 12.0),
            TimeSeriesRow::new("2024-05-03")
                .with_value("PCE_avg", 11.5)
                .with_value("FF_avg", 10.0),
        ];
        let mut params: Vec<ParameterId> = ParameterMeta::known_ids().collect();
        params.push(ParameterId::new("Jsc_raw"));
        RepeatabilityDataset::new(rows, params)
    }

    #[test]
    fn test_series_follow_selection_order() {
        let mut sel = SelectionState::default();
        sel.toggle(&ParameterId::new("FF"));
        sel.toggle(&ParameterId::new("HI"));

        let series = derive_series(&sel, &dataset(), &ChartThresholds::default());
        let keys: Vec<&str> = series.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["PCE_avg", "FF_avg", "HI_avg"]);
    }

    #[test]
    fn test_alert_color_below_threshold() {
        let thresholds = ChartThresholds::default();
        let series = derive_series(&SelectionState::default(), &dataset(), &thresholds);
        let pce = &series[0];

        assert_eq!(pce.points[0].value, 10.2);
        assert!(pce.points[0].alert);
        assert_eq!(pce.points[0].color, thresholds.alert_color);

        assert_eq!(pce.points[1].value, 12.0);
        assert!(!pce.points[1].alert);
        assert_eq!(pce.points[1].color, pce.color);
    }

    #[test]
    fn test_alert_independent_of_parameter() {
        let mut sel = SelectionState::new(ParameterId::new("FF"));
        sel.toggle(&ParameterId::new("Jsc_raw"));
        let thresholds = ChartThresholds::default();
        let series = derive_series(&sel, &dataset(), &thresholds);

        // FF: 78.0 normal, 10.0 alert
        assert!(!series[0].points[0].alert);
        assert!(series[0].points[1].alert);
        // Unknown parameter still checked against the same threshold
        assert!(series[1].points[0].alert);
        assert_eq!(series[1].points[0].color, thresholds.alert_color);
    }

    #[test]
    fn test_threshold_is_strict() {
        let thresholds = ChartThresholds::default();
        assert!(!thresholds.is_alert(DEFAULT_ALERT_THRESHOLD));
        assert!(thresholds.is_alert(DEFAULT_ALERT_THRESHOLD - 0.001));
    }

    #[test]
    fn test_missing_meta_falls_back_to_raw_id() {
        let sel = SelectionState::new(ParameterId::new("Jsc_raw"));
        let thresholds = ChartThresholds::default();
        let series = derive_series(&sel, &dataset(), &thresholds);

        assert_eq!(series[0].label, "Jsc_raw");
        assert_eq!(series[0].unit, None);
        assert_eq!(series[0].color, thresholds.fallback_color);
        assert_eq!(series[0].display_name(), "Jsc_raw");
    }

    #[test]
    fn test_missing_values_leave_gaps() {
        let sel = SelectionState::new(ParameterId::new("FF"));
        let series = derive_series(&sel, &dataset(), &ChartThresholds::default());
        let ff = &series[0];

        assert_eq!(ff.points.len(), 2);
        assert_eq!(ff.segments(), vec![vec![[0.0, 78.0]], vec![[2.0, 10.0]]]);
    }

    #[test]
    fn test_contiguous_points_form_one_segment() {
        let series = derive_series(
            &SelectionState::default(),
            &dataset(),
            &ChartThresholds::default(),
        );
        assert_eq!(series[0].segments().len(), 1);
        assert_eq!(series[0].display_name(), "PCE (%)");
    }

    #[test]
    fn test_reference_lines_without_data() {
        let thresholds = ChartThresholds::default();
        let lines = reference_lines(&thresholds);
        let values: Vec<f64> = lines.iter().map(|l| l.value).collect();
        assert_eq!(values, vec![11.18, 12.35]);
    }

    #[test]
    fn test_dataset_is_not_mutated() {
        let data = dataset();
        let before = data.clone();
        let _ = derive_series(&SelectionState::default(), &data, &ChartThresholds::default());
        assert_eq!(data, before);
    }
}
