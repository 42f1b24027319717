//! Downloads pane
//!
//! Lists the files the backend offers. Only one download runs at a time; the
//! buttons are disabled until it finishes. Failures open the alert dialog.

use egui::{Color32, RichText, Ui};

use crate::config::format_file_size;
use crate::frontend::pane_trait::Pane;
use crate::frontend::state::{AppAction, SharedState};
use crate::frontend::workspace::PaneKind;

/// State for the downloads pane
#[derive(Default)]
pub struct DownloadsPaneState {
    /// Name typed into the custom file field
    pub custom_filename: String,
}

/// Render the downloads pane
pub fn render(
    state: &mut DownloadsPaneState,
    shared: &mut SharedState<'_>,
    ui: &mut Ui,
) -> Vec<AppAction> {
    let mut actions = Vec::new();
    let downloads = shared.downloads;
    let busy = downloads.is_busy();

    ui.heading("Downloads");
    match shared.config.downloads.target_dir() {
        Ok(dir) => {
            ui.label(RichText::new(format!("Saving to {}", dir.display())).small().weak());
        }
        Err(e) => {
            ui.colored_label(Color32::LIGHT_RED, RichText::new(e.to_string()).small());
        }
    }
    ui.separator();

    for filename in &shared.config.downloads.files {
        ui.horizontal(|ui| {
            let downloading = downloads.busy_file() == Some(filename.as_str());
            let label = if downloading {
                format!("Downloading {}...", filename)
            } else {
                format!("⬇ {}", filename)
            };
            if ui.add_enabled(!busy, egui::Button::new(label)).clicked() {
                actions.push(AppAction::Download(filename.clone()));
            }
            if downloading {
                ui.spinner();
            }
        });
    }

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        ui.add(
            egui::TextEdit::singleline(&mut state.custom_filename)
                .hint_text("Other file name")
                .desired_width(160.0),
        );
        let name = state.custom_filename.trim();
        let can_request = !busy && !name.is_empty();
        if ui.add_enabled(can_request, egui::Button::new("Download")).clicked() {
            actions.push(AppAction::Download(name.to_string()));
        }
    });

    if busy {
        if let Some(file) = downloads.busy_file() {
            ui.label(RichText::new(format!("{} in progress", file)).small());
        }
    }

    if !downloads.history().is_empty() {
        ui.add_space(8.0);
        ui.label(RichText::new("Recent").strong());
        egui::ScrollArea::vertical()
            .max_height(160.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for record in downloads.history().iter().rev() {
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(record.completed_at.format("%H:%M:%S").to_string())
                                .small()
                                .monospace(),
                        );
                        ui.label(&record.filename);
                        ui.label(RichText::new(format_file_size(record.size)).small().weak());
                    })
                    .response
                    .on_hover_text(record.path.display().to_string());
                }
            });
    }

    actions
}

impl Pane for DownloadsPaneState {
    fn kind(&self) -> PaneKind { PaneKind::Downloads }

    fn render(&mut self, shared: &mut SharedState, ui: &mut Ui) -> Vec<AppAction> {
        render(self, shared, ui)
    }

    fn as_any(&self) -> &dyn std::any::Any { self }
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any { self }
}
