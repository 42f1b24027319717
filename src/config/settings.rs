//! Runtime settings that can be modified during application execution
//!
//! These settings control how the repeatability chart is drawn. They start
//! from the persistent [`UiConfig`](super::UiConfig) and are changed from the
//! chart toolbar; they are not written back unless the user saves the config.
//!
//! # Axis Control
//!
//! - **Autoscale Y**: fit the Y axis to the visible series and reference lines
//! - **Manual bounds**: explicit Y min/max
//! - **Lock Y**: prevent the user from zooming/panning vertically

use super::UiConfig;
use serde::{Deserialize, Serialize};

/// Runtime view settings for the repeatability chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartViewSettings {
    /// Show legend on the chart
    pub show_legend: bool,

    /// Show grid lines
    pub show_grid: bool,

    /// Draw a colored marker at each data point
    pub show_markers: bool,

    /// Line width in pixels
    pub line_width: f32,

    /// Marker radius in pixels
    pub marker_radius: f32,

    /// Whether to auto-scale the Y axis
    pub autoscale_y: bool,

    /// Whether the Y axis is locked (user cannot zoom/pan)
    pub lock_y: bool,

    /// Y-axis minimum (if manual scaling)
    pub y_min: Option<f64>,

    /// Y-axis maximum (if manual scaling)
    pub y_max: Option<f64>,
}

impl Default for ChartViewSettings {
    fn default() -> Self {
        Self::from_config(&UiConfig::default())
    }
}

impl ChartViewSettings {
    /// Create view settings from the persistent UI config
    pub fn from_config(config: &UiConfig) -> Self {
        Self {
            show_legend: config.show_legend,
            show_grid: config.show_grid,
            show_markers: config.show_markers,
            line_width: config.line_width,
            marker_radius: config.marker_radius,
            autoscale_y: true,
            lock_y: false,
            y_min: None,
            y_max: None,
        }
    }

    /// Write the persistent parts back into a UI config
    pub fn apply_to_config(&self, config: &mut UiConfig) {
        config.show_legend = self.show_legend;
        config.show_grid = self.show_grid;
        config.show_markers = self.show_markers;
        config.line_width = self.line_width;
        config.marker_radius = self.marker_radius;
    }

    /// Pick up display defaults after the config changed; axis state is kept
    pub fn sync_from_config(&mut self, config: &UiConfig) {
        self.show_legend = config.show_legend;
        self.show_grid = config.show_grid;
        self.show_markers = config.show_markers;
        self.line_width = config.line_width;
        self.marker_radius = config.marker_radius;
    }

    /// Set manual Y-axis range
    pub fn set_y_range(&mut self, min: f64, max: f64) {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        self.y_min = Some(min);
        self.y_max = Some(max);
        self.autoscale_y = false;
    }

    /// Clear manual Y-axis range (enable auto-scaling)
    pub fn clear_y_range(&mut self) {
        self.y_min = None;
        self.y_max = None;
        self.autoscale_y = true;
    }

    /// Manual Y bounds, if both ends are set
    pub fn manual_y_bounds(&self) -> Option<(f64, f64)> {
        match (self.y_min, self.y_max) {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        }
    }

    /// Toggle Y axis autoscale
    pub fn toggle_autoscale_y(&mut self) {
        self.autoscale_y = !self.autoscale_y;
        if self.autoscale_y {
            self.y_min = None;
            self.y_max = None;
        }
    }

    /// Toggle Y axis lock
    pub fn toggle_lock_y(&mut self) {
        self.lock_y = !self.lock_y;
    }

    /// Check if Y axis allows user interaction (zoom/pan)
    pub fn can_interact_y(&self) -> bool {
        !self.lock_y && !self.autoscale_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_ui_config() {
        let config = UiConfig {
            show_legend: false,
            line_width: 3.0,
            ..Default::default()
        };
        let settings = ChartViewSettings::from_config(&config);
        assert!(!settings.show_legend);
        assert_eq!(settings.line_width, 3.0);
        assert!(settings.autoscale_y);
    }

    #[test]
    fn test_y_range() {
        let mut settings = ChartViewSettings::default();
        settings.set_y_range(14.0, 9.0);
        assert_eq!(settings.manual_y_bounds(), Some((9.0, 14.0)));
        assert!(!settings.autoscale_y);

        settings.clear_y_range();
        assert_eq!(settings.manual_y_bounds(), None);
        assert!(settings.autoscale_y);
    }

    #[test]
    fn test_autoscale_toggle_clears_bounds() {
        let mut settings = ChartViewSettings::default();
        settings.set_y_range(9.0, 14.0);
        settings.toggle_autoscale_y();
        assert!(settings.autoscale_y);
        assert_eq!(settings.manual_y_bounds(), None);
    }

    #[test]
    fn test_interaction_checks() {
        let mut settings = ChartViewSettings::default();
        assert!(!settings.can_interact_y());
        settings.toggle_autoscale_y();
        assert!(settings.can_interact_y());
        settings.toggle_lock_y();
        assert!(!settings.can_interact_y());
    }

    #[test]
    fn test_sync_keeps_axis_state() {
        let mut settings = ChartViewSettings::default();
        settings.set_y_range(9.0, 14.0);
        let config = UiConfig {
            show_grid: false,
            ..Default::default()
        };
        settings.sync_from_config(&config);
        assert!(!settings.show_grid);
        assert_eq!(settings.manual_y_bounds(), Some((9.0, 14.0)));
    }

    #[test]
    fn test_apply_to_config() {
        let mut settings = ChartViewSettings::default();
        settings.show_markers = false;
        let mut config = UiConfig::default();
        settings.apply_to_config(&mut config);
        assert!(!config.show_markers);
    }
}
