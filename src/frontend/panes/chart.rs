//! Repeatability chart pane
//!
//! Toolbar with reload and display toggles above the plot. Shows a spinner
//! until the first dataset arrives and the generic error message when the
//! fetch failed.

use egui::{Color32, RichText, Ui};

use crate::frontend::pane_trait::Pane;
use crate::frontend::plot::RepeatabilityPlot;
use crate::frontend::state::{AppAction, LoadStatus, SharedState};
use crate::frontend::workspace::PaneKind;

/// State for the chart pane
#[derive(Default)]
pub struct ChartPaneState {
    /// Y range being edited while autoscale is off
    y_range_input: Option<(f64, f64)>,
}

/// Render the chart pane
pub fn render(
    state: &mut ChartPaneState,
    shared: &mut SharedState<'_>,
    ui: &mut Ui,
) -> Vec<AppAction> {
    let mut actions = Vec::new();

    render_toolbar(state, shared, ui, &mut actions);
    ui.separator();

    let chart = shared.chart;
    match (chart.dataset(), chart.status()) {
        (_, LoadStatus::Failed { message }) => {
            ui.vertical_centered(|ui| {
                ui.add_space(24.0);
                ui.label(RichText::new(message).color(Color32::from_rgb(239, 68, 68)));
                if let Some(detail) = chart.last_error() {
                    ui.label(RichText::new(detail).small().weak());
                }
                ui.add_space(8.0);
                if ui.button("Retry").clicked() {
                    actions.push(AppAction::Reload);
                }
            });
        }
        (Some(dataset), _) => {
            RepeatabilityPlot::new(
                chart.series(),
                &chart.thresholds().reference_lines,
                dataset,
                &*shared.view,
            )
            .show(ui);
        }
        (None, LoadStatus::Loading { .. }) => {
            ui.vertical_centered(|ui| {
                ui.add_space(24.0);
                ui.spinner();
                ui.label("Loading repeatability data...");
            });
        }
        (None, _) => {
            ui.vertical_centered(|ui| {
                ui.add_space(24.0);
                ui.colored_label(Color32::GRAY, "No data loaded");
                if ui.button("Load").clicked() {
                    actions.push(AppAction::Reload);
                }
            });
        }
    }

    actions
}

fn render_toolbar(
    state: &mut ChartPaneState,
    shared: &mut SharedState<'_>,
    ui: &mut Ui,
    actions: &mut Vec<AppAction>,
) {
    ui.horizontal_wrapped(|ui| {
        let loading = shared.chart.is_loading();
        if ui
            .add_enabled(!loading, egui::Button::new("⟳ Reload"))
            .on_hover_text("Fetch the repeatability data again")
            .clicked()
        {
            actions.push(AppAction::Reload);
        }
        if loading {
            ui.spinner();
        }

        ui.separator();

        let view = &mut *shared.view;
        ui.checkbox(&mut view.show_legend, "Legend");
        ui.checkbox(&mut view.show_grid, "Grid");
        ui.checkbox(&mut view.show_markers, "Markers")
            .on_hover_text("Points below the alert threshold are always marked");

        ui.separator();

        let mut autoscale = view.autoscale_y;
        if ui.checkbox(&mut autoscale, "Auto Y").changed() {
            view.toggle_autoscale_y();
            state.y_range_input = None;
        }

        if !view.autoscale_y {
            let (mut min, mut max) = state
                .y_range_input
                .or(view.manual_y_bounds())
                .unwrap_or((9.0, 14.0));
            ui.label("Y:");
            let min_changed = ui.add(egui::DragValue::new(&mut min).speed(0.05)).changed();
            ui.label("to");
            let max_changed = ui.add(egui::DragValue::new(&mut max).speed(0.05)).changed();
            state.y_range_input = Some((min, max));
            if min_changed || max_changed || view.manual_y_bounds().is_none() {
                view.set_y_range(min, max);
            }

            let lock_label = if view.lock_y { "🔒" } else { "🔓" };
            if ui
                .button(lock_label)
                .on_hover_text("Lock the Y axis against zoom and pan")
                .clicked()
            {
                view.toggle_lock_y();
            }
        }
    });
}

impl Pane for ChartPaneState {
    fn kind(&self) -> PaneKind { PaneKind::RepeatabilityChart }

    fn render(&mut self, shared: &mut SharedState, ui: &mut Ui) -> Vec<AppAction> {
        render(self, shared, ui)
    }

    fn as_any(&self) -> &dyn std::any::Any { self }
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any { self }
}
