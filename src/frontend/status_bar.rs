//! Status bar panel: bottom bar showing fetch status, row count, and downloads.
//!
//! Sits below the dock workspace area.

use egui::{Color32, RichText, Ui};

use crate::chart::MAX_SELECTED_PARAMETERS;
use crate::frontend::state::{ChartState, DownloadState, LoadStatus};
use crate::frontend::widgets::StatusIndicator;

/// Context needed to render the status bar.
pub struct StatusBarContext<'a> {
    pub chart: &'a ChartState,
    pub downloads: &'a DownloadState,
    pub base_url: &'a str,
}

/// Render the status bar.
pub fn render_status_bar(ui: &mut Ui, ctx: &StatusBarContext<'_>) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        // === Fetch status ===
        let indicator = match ctx.chart.status() {
            LoadStatus::Idle => StatusIndicator::idle(),
            LoadStatus::Loading { started_at, .. } => StatusIndicator::loading()
                .with_tooltip(format!("Started {}", started_at.format("%H:%M:%S"))),
            LoadStatus::Loaded { fetched_at } => StatusIndicator::loaded()
                .with_tooltip(format!("Fetched {}", fetched_at.format("%Y-%m-%d %H:%M:%S"))),
            LoadStatus::Failed { message } => StatusIndicator::error().with_tooltip(message.clone()),
        };
        ui.add(indicator);
        ui.label(RichText::new(ctx.base_url).small().weak());

        ui.separator();

        // === Dataset size ===
        let rows = ctx.chart.dataset().map(|d| d.len()).unwrap_or(0);
        ui.label(RichText::new(format!("Days: {}", rows)).small());

        ui.separator();

        // === Selection ===
        ui.label(
            RichText::new(format!(
                "Selected: {}/{}",
                ctx.chart.selection().len(),
                MAX_SELECTED_PARAMETERS
            ))
            .small(),
        );

        ui.separator();

        // === Alert count ===
        let alerts: usize = ctx
            .chart
            .series()
            .iter()
            .map(|s| s.alert_points().count())
            .sum();
        let alert_color = if alerts > 0 {
            Color32::LIGHT_RED
        } else {
            Color32::GRAY
        };
        ui.colored_label(alert_color, RichText::new(format!("Alerts: {}", alerts)).small());

        // === Download / error (right-aligned) ===
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if let Some(file) = ctx.downloads.busy_file() {
                ui.label(RichText::new(format!("Downloading {}", file)).small());
                ui.spinner();
            } else if let Some(error) = ctx.chart.last_error() {
                ui.colored_label(Color32::RED, RichText::new(error).small());
            } else if let Some(last) = ctx.downloads.last_completed() {
                ui.label(
                    RichText::new(format!("Saved {}", last.path.display()))
                        .small()
                        .weak(),
                );
            }
        });
    });
}
