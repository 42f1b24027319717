//! Blocking alert dialog
//!
//! Shown when a download fails. The rest of the UI is dimmed until the user
//! dismisses it.

use super::{Dialog, DialogAction, DialogState, DialogWindowConfig};
use egui::{Color32, RichText, Ui};

/// State for the alert dialog
#[derive(Debug, Default, Clone)]
pub struct AlertState {
    /// Message shown to the user
    pub message: String,
    /// Optional secondary detail line
    pub detail: Option<String>,
}

impl DialogState for AlertState {
    fn is_valid(&self) -> bool {
        !self.message.is_empty()
    }
}

impl AlertState {
    /// Create alert state with a message
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: None,
        }
    }

    /// Attach a detail line
    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Action from the alert dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertAction {
    /// User acknowledged the alert
    Acknowledged,
}

/// Context for rendering (none needed)
pub struct AlertContext;

/// The alert dialog
pub struct AlertDialog;

impl Dialog for AlertDialog {
    type State = AlertState;
    type Action = AlertAction;
    type Context<'a> = AlertContext;

    fn title(_state: &Self::State) -> &'static str {
        "Error"
    }

    fn window_config() -> DialogWindowConfig {
        DialogWindowConfig::centered_modal(360.0)
    }

    fn render(
        state: &mut Self::State,
        _ctx: Self::Context<'_>,
        ui: &mut Ui,
    ) -> DialogAction<Self::Action> {
        if !state.is_valid() {
            return DialogAction::Close;
        }

        ui.label(RichText::new(&state.message).color(Color32::from_rgb(239, 68, 68)));
        if let Some(detail) = &state.detail {
            ui.add_space(4.0);
            ui.label(RichText::new(detail).small().weak());
        }

        ui.add_space(8.0);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("OK").clicked() {
                return DialogAction::CloseWithAction(AlertAction::Acknowledged);
            }
            DialogAction::None
        })
        .inner
    }
}
