//! Preferences dialog
//!
//! App-wide settings: dark mode, font scale, chart display defaults and the
//! alert threshold.

use egui::Ui;

use crate::config::{ChartConfig, UiConfig, UiPreferences};
use crate::frontend::dialogs::{Dialog, DialogAction, DialogState, DialogWindowConfig};

/// State for the preferences dialog
#[derive(Debug, Clone, PartialEq)]
pub struct PreferencesState {
    // App-wide (from UiPreferences)
    pub dark_mode: bool,
    pub font_scale: f32,

    // Display defaults (from UiConfig)
    pub show_grid: bool,
    pub show_legend: bool,
    pub show_markers: bool,
    pub line_width: f32,
    pub marker_radius: f32,

    // Chart (from ChartConfig)
    pub alert_threshold: f64,
}

impl Default for PreferencesState {
    fn default() -> Self {
        Self::from_config(&UiConfig::default(), &ChartConfig::default(), &UiPreferences::default())
    }
}

impl PreferencesState {
    /// Create from current config and preferences
    pub fn from_config(ui_config: &UiConfig, chart: &ChartConfig, ui_prefs: &UiPreferences) -> Self {
        Self {
            dark_mode: ui_prefs.dark_mode,
            font_scale: ui_prefs.font_scale,
            show_grid: ui_config.show_grid,
            show_legend: ui_config.show_legend,
            show_markers: ui_config.show_markers,
            line_width: ui_config.line_width,
            marker_radius: ui_config.marker_radius,
            alert_threshold: chart.alert_threshold,
        }
    }

    /// Write the edited values back
    pub fn apply(&self, ui_config: &mut UiConfig, chart: &mut ChartConfig, ui_prefs: &mut UiPreferences) {
        ui_prefs.dark_mode = self.dark_mode;
        ui_prefs.font_scale = self.font_scale;
        ui_config.show_grid = self.show_grid;
        ui_config.show_legend = self.show_legend;
        ui_config.show_markers = self.show_markers;
        ui_config.line_width = self.line_width;
        ui_config.marker_radius = self.marker_radius;
        chart.alert_threshold = self.alert_threshold;
    }
}

impl DialogState for PreferencesState {
    fn is_valid(&self) -> bool {
        self.alert_threshold.is_finite() && self.font_scale > 0.0
    }
}

/// Actions produced by the preferences dialog
#[derive(Debug, Clone)]
pub enum PreferencesAction {
    /// Apply preferences
    Apply(PreferencesState),
}

/// Context for rendering
pub struct PreferencesContext;

/// The preferences dialog
pub struct PreferencesDialog;

impl Dialog for PreferencesDialog {
    type State = PreferencesState;
    type Action = PreferencesAction;
    type Context<'a> = PreferencesContext;

    fn title(_state: &Self::State) -> &'static str {
        "Preferences"
    }

    fn window_config() -> DialogWindowConfig {
        DialogWindowConfig {
            default_width: 400.0,
            ..Default::default()
        }
    }

    fn render(
        state: &mut Self::State,
        _ctx: Self::Context<'_>,
        ui: &mut Ui,
    ) -> DialogAction<Self::Action> {
        // === Appearance ===
        ui.heading("Appearance");
        ui.add_space(4.0);

        egui::Grid::new("prefs_appearance_grid")
            .num_columns(2)
            .spacing([10.0, 8.0])
            .show(ui, |ui| {
                ui.label("Dark mode:");
                ui.checkbox(&mut state.dark_mode, "");
                ui.end_row();

                ui.label("Font scale:");
                ui.add(egui::Slider::new(&mut state.font_scale, 0.5..=2.0).step_by(0.1));
                ui.end_row();
            });

        ui.add_space(8.0);

        // === Chart Defaults ===
        ui.heading("Chart");
        ui.add_space(4.0);

        egui::Grid::new("prefs_chart_grid")
            .num_columns(2)
            .spacing([10.0, 8.0])
            .show(ui, |ui| {
                ui.label("Grid:");
                ui.checkbox(&mut state.show_grid, "");
                ui.end_row();

                ui.label("Legend:");
                ui.checkbox(&mut state.show_legend, "");
                ui.end_row();

                ui.label("Point markers:");
                ui.checkbox(&mut state.show_markers, "");
                ui.end_row();

                ui.label("Line width:");
                ui.add(egui::Slider::new(&mut state.line_width, 0.5..=5.0));
                ui.end_row();

                ui.label("Marker radius:");
                ui.add(egui::Slider::new(&mut state.marker_radius, 1.0..=10.0));
                ui.end_row();

                ui.label("Alert below:");
                ui.add(egui::DragValue::new(&mut state.alert_threshold).speed(0.01));
                ui.end_row();
            });

        ui.add_space(8.0);
        ui.separator();
        ui.horizontal(|ui| {
            let apply = ui.add_enabled(state.is_valid(), egui::Button::new("Apply"));
            if apply.clicked() {
                return DialogAction::CloseWithAction(PreferencesAction::Apply(state.clone()));
            }
            if ui.button("Cancel").clicked() {
                return DialogAction::Close;
            }
            DialogAction::None
        })
        .inner
    }
}
