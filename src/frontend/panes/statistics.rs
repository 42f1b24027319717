//! Statistics pane - summary table for the plotted series

use egui::{Color32, RichText, Ui};

use crate::frontend::pane_trait::Pane;
use crate::frontend::state::{AppAction, SharedState};
use crate::frontend::widgets::{rgba, ColorSwatch};
use crate::frontend::workspace::PaneKind;

/// State for the Statistics pane
#[derive(Default)]
pub struct StatisticsPaneState {
    /// Whether to show the spread columns (std dev, peak-to-peak)
    pub show_spread: bool,
}

/// Render the statistics pane
pub fn render(
    state: &mut StatisticsPaneState,
    shared: &mut SharedState<'_>,
    ui: &mut Ui,
) -> Vec<AppAction> {
    let thresholds = shared.chart.thresholds();

    ui.horizontal(|ui| {
        ui.heading("Statistics");
        ui.separator();
        ui.checkbox(&mut state.show_spread, "Spread");
        ui.separator();
        ui.label(
            RichText::new(format!("Alert below {}", thresholds.alert_threshold))
                .small()
                .color(rgba(thresholds.alert_color)),
        );
    });
    ui.separator();

    let stats = shared.chart.statistics();
    if stats.is_empty() {
        ui.colored_label(Color32::GRAY, "No data loaded");
        return Vec::new();
    }

    let num_cols = if state.show_spread { 10 } else { 8 };
    let series = shared.chart.series();

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            egui::Grid::new("statistics_grid")
                .num_columns(num_cols)
                .striped(true)
                .min_col_width(56.0)
                .spacing([8.0, 4.0])
                .show(ui, |ui| {
                    ui.strong("Parameter");
                    ui.strong("Points");
                    ui.strong("Latest");
                    ui.strong("Mean");
                    ui.strong("Min");
                    ui.strong("Max");
                    if state.show_spread {
                        ui.strong("Std Dev");
                        ui.strong("P-P");
                    }
                    ui.strong("CV %");
                    ui.strong("Alerts");
                    ui.end_row();

                    for (series, stat) in series.iter().zip(&stats) {
                        ui.horizontal(|ui| {
                            ui.add(ColorSwatch::new(rgba(series.color)).size(10.0));
                            ui.label(series.display_name());
                        });
                        ui.label(stat.count.to_string());

                        if !stat.is_valid() {
                            for _ in 0..(num_cols - 2) {
                                ui.label("—");
                            }
                            ui.end_row();
                            continue;
                        }

                        match stat.latest {
                            Some(latest) if thresholds.is_alert(latest) => {
                                ui.label(
                                    RichText::new(format!("{:.3}", latest))
                                        .monospace()
                                        .color(rgba(thresholds.alert_color)),
                                );
                            }
                            Some(latest) => {
                                ui.monospace(format!("{:.3}", latest));
                            }
                            None => {
                                ui.label("—");
                            }
                        }
                        ui.monospace(format!("{:.3}", stat.mean));
                        ui.monospace(format!("{:.3}", stat.min));
                        ui.monospace(format!("{:.3}", stat.max));
                        if state.show_spread {
                            ui.monospace(format!("{:.4}", stat.std_dev));
                            ui.monospace(format!("{:.3}", stat.peak_to_peak()));
                        }

                        let cv = ui.monospace(format!("{:.2}", stat.cv_percent));
                        if let Some(reported) = stat.reported_cv {
                            cv.on_hover_text(format!("Latest day CV reported by backend: {:.2}%", reported));
                        }

                        let alert_text = RichText::new(stat.alert_count.to_string());
                        if stat.alert_count > 0 {
                            ui.label(alert_text.color(rgba(thresholds.alert_color)).strong());
                        } else {
                            ui.label(alert_text);
                        }
                        ui.end_row();
                    }
                });
        });

    Vec::new()
}

impl Pane for StatisticsPaneState {
    fn kind(&self) -> PaneKind { PaneKind::Statistics }

    fn render(&mut self, shared: &mut SharedState, ui: &mut Ui) -> Vec<AppAction> {
        render(self, shared, ui)
    }

    fn as_any(&self) -> &dyn std::any::Any { self }
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any { self }
}
