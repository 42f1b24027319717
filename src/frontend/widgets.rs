//! Custom widgets for the dashboard UI
//!
//! # Widgets
//!
//! - [`StatusIndicator`] - Colored status dot with label (loading, loaded, error)
//! - [`ColorSwatch`] - Small colored square for color preview
//! - [`ParameterChip`] - Selectable parameter button with its series color

use egui::{Color32, Response, RichText, Ui, Widget};

/// Convert an RGBA array from config/types into an egui color
pub fn rgba(color: [u8; 4]) -> Color32 {
    Color32::from_rgba_unmultiplied(color[0], color[1], color[2], color[3])
}

/// A widget that displays a colored status indicator
pub struct StatusIndicator {
    color: Color32,
    label: String,
    tooltip: Option<String>,
}

impl StatusIndicator {
    /// Create a new status indicator with the given color and label
    pub fn new(color: Color32, label: impl Into<String>) -> Self {
        Self {
            color,
            label: label.into(),
            tooltip: None,
        }
    }

    pub fn idle() -> Self {
        Self::new(Color32::GRAY, "Idle")
    }

    pub fn loading() -> Self {
        Self::new(Color32::YELLOW, "Loading...")
    }

    pub fn loaded() -> Self {
        Self::new(Color32::GREEN, "Loaded")
    }

    pub fn error() -> Self {
        Self::new(Color32::RED, "Error")
    }

    /// Add a tooltip to the indicator
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

impl Widget for StatusIndicator {
    fn ui(self, ui: &mut Ui) -> Response {
        let response = ui
            .horizontal(|ui| {
                ui.colored_label(self.color, "●");
                ui.label(RichText::new(&self.label).small());
            })
            .response;

        if let Some(tooltip) = self.tooltip {
            response.on_hover_text(tooltip)
        } else {
            response
        }
    }
}

/// A small colored square
pub struct ColorSwatch {
    color: Color32,
    size: f32,
}

impl ColorSwatch {
    pub fn new(color: Color32) -> Self {
        Self { color, size: 12.0 }
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }
}

impl Widget for ColorSwatch {
    fn ui(self, ui: &mut Ui) -> Response {
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(self.size, self.size), egui::Sense::hover());

        if ui.is_rect_visible(rect) {
            ui.painter().rect_filled(rect, 2.0, self.color);
            ui.painter().rect_stroke(
                rect,
                2.0,
                egui::Stroke::new(1.0, Color32::GRAY),
                egui::StrokeKind::Outside,
            );
        }

        response
    }
}

/// Toggle button for one parameter.
///
/// Disabled chips still render so the user sees why they cannot be added.
pub struct ParameterChip {
    label: String,
    color: Color32,
    selected: bool,
    enabled: bool,
    tooltip: Option<String>,
}

impl ParameterChip {
    pub fn new(label: impl Into<String>, color: Color32, selected: bool) -> Self {
        Self {
            label: label.into(),
            color,
            selected,
            enabled: true,
            tooltip: None,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

impl Widget for ParameterChip {
    fn ui(self, ui: &mut Ui) -> Response {
        let text = if self.selected {
            RichText::new(&self.label).strong().color(Color32::WHITE)
        } else {
            RichText::new(&self.label)
        };

        let mut button = egui::Button::new(text).corner_radius(12.0);
        if self.selected {
            button = button.fill(self.color);
        } else {
            button = button.stroke(egui::Stroke::new(1.0, self.color));
        }

        let response = ui.add_enabled(self.enabled, button);
        match self.tooltip {
            Some(tooltip) if self.enabled => response.on_hover_text(tooltip),
            Some(tooltip) => response.on_disabled_hover_text(tooltip),
            None => response,
        }
    }
}
