//! Repeatability chart rendering using egui_plot
//!
//! The X axis is the row index of the dataset, labelled with the row's short
//! date. Each selected parameter is drawn as a line (split at missing values)
//! with a marker per point. Points below the alert threshold are always marked
//! in the alert color, even when the other markers are hidden. Reference lines
//! are always drawn as dashed horizontal lines inside the visible Y range.

use egui::Ui;
use egui_plot::{Corner, GridMark, HLine, Legend, Line, LineStyle, Plot, PlotPoints, Points};

use crate::chart::{ReferenceLine, SeriesDescriptor};
use crate::config::settings::ChartViewSettings;
use crate::frontend::widgets::rgba;
use crate::types::RepeatabilityDataset;

/// Extra space above and below the data in autoscaled mode, as a fraction of the span
const Y_PADDING_FRACTION: f64 = 0.08;

/// Borrowed inputs for one frame of the chart
pub struct RepeatabilityPlot<'a> {
    series: &'a [SeriesDescriptor],
    reference_lines: &'a [ReferenceLine],
    dataset: &'a RepeatabilityDataset,
    view: &'a ChartViewSettings,
}

impl<'a> RepeatabilityPlot<'a> {
    pub fn new(
        series: &'a [SeriesDescriptor],
        reference_lines: &'a [ReferenceLine],
        dataset: &'a RepeatabilityDataset,
        view: &'a ChartViewSettings,
    ) -> Self {
        Self {
            series,
            reference_lines,
            dataset,
            view,
        }
    }

    /// Render the chart into `ui`
    pub fn show(self, ui: &mut Ui) {
        let labels: Vec<String> = (0..self.dataset.len())
            .map(|i| self.dataset.axis_label(i).unwrap_or_default().to_string())
            .collect();

        let can_interact_y = self.view.can_interact_y();
        let mut plot = Plot::new("repeatability_plot")
            .show_grid(self.view.show_grid)
            .x_axis_label("Date")
            .y_axis_label("Daily average")
            .allow_zoom([true, can_interact_y])
            .allow_drag([true, can_interact_y])
            .allow_scroll([true, can_interact_y])
            .auto_bounds([true, self.view.autoscale_y])
            .x_grid_spacer(egui_plot::uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
            .x_axis_formatter(move |mark: GridMark, _range| tick_label(mark.value, &labels));

        if self.view.show_legend {
            plot = plot.legend(
                Legend::default()
                    .position(Corner::RightTop)
                    .background_alpha(0.8),
            );
        }

        match self.view.manual_y_bounds() {
            Some((min, max)) if !self.view.autoscale_y => {
                plot = plot.include_y(min).include_y(max);
            }
            _ => {
                if let Some((min, max)) = y_bounds(self.series, self.reference_lines) {
                    plot = plot.include_y(min).include_y(max);
                }
            }
        }

        let line_width = self.view.line_width;
        let marker_radius = self.view.marker_radius;
        let show_markers = self.view.show_markers;

        plot.show(ui, |plot_ui| {
            for series in self.series {
                let name = series.display_name();
                let color = rgba(series.color);

                for segment in series.segments() {
                    plot_ui.line(
                        Line::new(name.clone(), PlotPoints::from(segment))
                            .color(color)
                            .width(line_width),
                    );
                }

                let markers = MarkerSets::split(series, show_markers);
                if !markers.normal.is_empty() {
                    plot_ui.points(
                        Points::new(name.clone(), PlotPoints::from(markers.normal))
                            .color(color)
                            .radius(marker_radius)
                            .filled(true),
                    );
                }
                if let Some(alert_color) = markers.alert_color {
                    plot_ui.points(
                        Points::new(name.clone(), PlotPoints::from(markers.alert))
                            .color(rgba(alert_color))
                            .radius(marker_radius * 1.25)
                            .filled(true),
                    );
                }
            }

            for reference in self.reference_lines {
                plot_ui.hline(
                    HLine::new(
                        format!("{} ({})", reference.label, reference.value),
                        reference.value,
                    )
                    .color(rgba(reference.color))
                    .width(1.5)
                    .style(LineStyle::dashed_loose()),
                );
            }
        });
    }
}

/// Marker positions for one series, split by color
#[derive(Debug, Default, PartialEq)]
pub struct MarkerSets {
    /// Points drawn in the series color; empty when markers are hidden
    pub normal: Vec<[f64; 2]>,
    /// Points below the alert threshold, drawn regardless of the markers toggle
    pub alert: Vec<[f64; 2]>,
    /// Color of the alert points, if there are any
    pub alert_color: Option<[u8; 4]>,
}

impl MarkerSets {
    pub fn split(series: &SeriesDescriptor, show_markers: bool) -> Self {
        let mut sets = Self::default();
        for point in &series.points {
            if point.alert {
                sets.alert.push(point.as_plot_point());
                sets.alert_color.get_or_insert(point.color);
            } else if show_markers {
                sets.normal.push(point.as_plot_point());
            }
        }
        sets
    }
}

/// Axis label for a grid mark: the row's date at integer positions, blank elsewhere
pub fn tick_label(value: f64, labels: &[String]) -> String {
    if value < 0.0 || value.fract().abs() > f64::EPSILON {
        return String::new();
    }
    labels.get(value as usize).cloned().unwrap_or_default()
}

/// Y range covering every series point and every reference line, with padding
pub fn y_bounds(series: &[SeriesDescriptor], reference_lines: &[ReferenceLine]) -> Option<(f64, f64)> {
    let values = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.value))
        .chain(reference_lines.iter().map(|r| r.value))
        .filter(|v| v.is_finite());

    let (min, max) = values.fold(None, |acc: Option<(f64, f64)>, v| match acc {
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        None => Some((v, v)),
    })?;

    let span = max - min;
    let padding = if span > 0.0 {
        span * Y_PADDING_FRACTION
    } else {
        min.abs().max(1.0) * Y_PADDING_FRACTION
    };
    Some((min - padding, max + padding))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::series::default_reference_lines;
    use crate::chart::SeriesPoint;
    use crate::types::ParameterId;

    fn series_with(values: &[f64]) -> SeriesDescriptor {
        SeriesDescriptor {
            key: "PCE_avg".to_string(),
            parameter: ParameterId::primary(),
            label: "PCE".to_string(),
            unit: Some("%".to_string()),
            color: [59, 130, 246, 255],
            points: values
                .iter()
                .enumerate()
                .map(|(index, &value)| SeriesPoint {
                    index,
                    value,
                    color: [59, 130, 246, 255],
                    alert: false,
                })
                .collect(),
        }
    }

    #[test]
    fn test_tick_label_integer_positions() {
        let labels = vec!["05/01".to_string(), "05/02".to_string()];
        assert_eq!(tick_label(0.0, &labels), "05/01");
        assert_eq!(tick_label(1.0, &labels), "05/02");
        assert_eq!(tick_label(0.5, &labels), "");
        assert_eq!(tick_label(2.0, &labels), "");
        assert_eq!(tick_label(-1.0, &labels), "");
    }

    #[test]
    fn test_y_bounds_include_reference_lines() {
        let series = vec![series_with(&[9.0, 10.0])];
        let refs = default_reference_lines();
        let (min, max) = y_bounds(&series, &refs).unwrap();
        assert!(min < 9.0);
        assert!(max > 12.35);
    }

    #[test]
    fn test_alert_points_kept_when_markers_hidden() {
        let mut series = series_with(&[12.4, 11.9, 12.6]);
        series.points[1].alert = true;
        series.points[1].color = [239, 68, 68, 255];

        let hidden = MarkerSets::split(&series, false);
        assert!(hidden.normal.is_empty());
        assert_eq!(hidden.alert, vec![[1.0, 11.9]]);
        assert_eq!(hidden.alert_color, Some([239, 68, 68, 255]));

        let shown = MarkerSets::split(&series, true);
        assert_eq!(shown.normal, vec![[0.0, 12.4], [2.0, 12.6]]);
        assert_eq!(shown.alert, hidden.alert);
    }

    #[test]
    fn test_no_alert_markers_without_alerts() {
        let sets = MarkerSets::split(&series_with(&[12.4, 12.5]), false);
        assert_eq!(sets, MarkerSets::default());
    }

    #[test]
    fn test_y_bounds_keep_reference_lines_far_from_data() {
        let series = vec![series_with(&[20.0, 21.0])];
        let refs = default_reference_lines();
        let (min, _) = y_bounds(&series, &refs).unwrap();
        assert!(refs.iter().all(|r| r.value > min));
    }

    #[test]
    fn test_y_bounds_single_value() {
        let series = vec![series_with(&[12.0])];
        let (min, max) = y_bounds(&series, &[]).unwrap();
        assert!(min < 12.0 && max > 12.0);
    }

    #[test]
    fn test_y_bounds_empty() {
        assert_eq!(y_bounds(&[], &[]), None);
    }
}
