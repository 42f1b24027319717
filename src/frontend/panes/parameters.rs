//! Parameter picker pane
//!
//! One chip per available parameter. Selecting is bounded: the last selected
//! chip cannot be removed and no chip can be added once the selection is full.

use egui::{Color32, RichText, Ui};

use crate::chart::MAX_SELECTED_PARAMETERS;
use crate::frontend::pane_trait::Pane;
use crate::frontend::state::{AppAction, SharedState};
use crate::frontend::widgets::{rgba, ColorSwatch, ParameterChip};
use crate::frontend::workspace::PaneKind;
use crate::types::{ParameterId, ParameterMeta};

/// State for the parameters pane
#[derive(Default)]
pub struct ParametersPaneState {
    /// Show the selection order below the chips
    pub show_order: bool,
}

/// Render the parameters pane
pub fn render(
    state: &mut ParametersPaneState,
    shared: &mut SharedState<'_>,
    ui: &mut Ui,
) -> Vec<AppAction> {
    let mut actions = Vec::new();
    let selection = shared.chart.selection();
    let dataset = shared.chart.dataset();

    ui.horizontal(|ui| {
        ui.heading("Parameters");
        ui.label(
            RichText::new(format!("{}/{}", selection.len(), MAX_SELECTED_PARAMETERS))
                .small()
                .weak(),
        );
    });

    ui.horizontal(|ui| {
        if ui
            .add_enabled(
                dataset.is_some(),
                egui::Button::new(format!("Select first {}", MAX_SELECTED_PARAMETERS)),
            )
            .clicked()
        {
            actions.push(AppAction::SelectFirstParameters(MAX_SELECTED_PARAMETERS));
        }
        if ui
            .button("Clear")
            .on_hover_text(format!("Show only {}", selection.default_parameter().label()))
            .clicked()
        {
            actions.push(AppAction::ClearSelection);
        }
    });
    ui.separator();

    // Before the first load, offer the known parameters so the picker is not empty
    let available: Vec<ParameterId> = match dataset {
        Some(dataset) => dataset.available_parameters().to_vec(),
        None => ParameterMeta::known_ids().collect(),
    };

    if available.is_empty() {
        ui.colored_label(Color32::GRAY, "No parameters available");
        return actions;
    }

    let fallback = shared.chart.thresholds().fallback_color;
    ui.horizontal_wrapped(|ui| {
        for id in &available {
            let selected = selection.contains(id);
            let (enabled, tooltip) = if selected && selection.len() <= 1 {
                (false, "At least one parameter must stay selected".to_string())
            } else if !selected && selection.is_full() {
                (
                    false,
                    format!("At most {} parameters can be shown", MAX_SELECTED_PARAMETERS),
                )
            } else {
                (true, chip_tooltip(id))
            };

            let color = id.meta().map(|m| m.color).unwrap_or(fallback);
            let chip = ParameterChip::new(id.label(), rgba(color), selected)
                .enabled(enabled)
                .with_tooltip(tooltip);
            if ui.add(chip).clicked() {
                actions.push(AppAction::ToggleParameter(id.clone()));
            }
        }
    });

    ui.add_space(8.0);
    ui.checkbox(&mut state.show_order, "Show selection order");
    if state.show_order {
        for (i, id) in selection.iter().enumerate() {
            ui.horizontal(|ui| {
                let color = id.meta().map(|m| m.color).unwrap_or(fallback);
                ui.add(ColorSwatch::new(rgba(color)));
                ui.label(format!("{}. {}", i + 1, id.label()));
                ui.label(RichText::new(id.avg_key()).small().weak().monospace());
            });
        }
    }

    actions
}

fn chip_tooltip(id: &ParameterId) -> String {
    match id.meta() {
        Some(meta) if !meta.unit.is_empty() => format!("{} ({})", meta.label, meta.unit),
        Some(meta) => meta.label.to_string(),
        None => id.as_str().to_string(),
    }
}

impl Pane for ParametersPaneState {
    fn kind(&self) -> PaneKind { PaneKind::Parameters }

    fn render(&mut self, shared: &mut SharedState, ui: &mut Ui) -> Vec<AppAction> {
        render(self, shared, ui)
    }

    fn as_any(&self) -> &dyn std::any::Any { self }
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any { self }
}
