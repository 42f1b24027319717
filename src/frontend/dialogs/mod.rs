//! Dialog trait system for unified dialog management
//!
//! This module provides a generic trait-based system for dialogs in the application.
//! Each dialog implements the `Dialog` trait, encapsulating its state, actions, and rendering.
//! Modal dialogs are shown through [`egui::Modal`], which dims the rest of the UI.

use egui::{Align2, Context, Ui};

/// Actions that a dialog can return after rendering
#[derive(Debug, Clone, Default)]
pub enum DialogAction<A> {
    /// Keep the dialog open, no action needed
    #[default]
    None,
    /// Close the dialog without performing any action
    Close,
    /// Close the dialog and perform the specified action
    CloseWithAction(A),
    /// Keep the dialog open but perform the specified action
    Action(A),
}

impl<A> DialogAction<A> {
    /// Check if the action indicates the dialog should close
    pub fn should_close(&self) -> bool {
        matches!(self, DialogAction::Close | DialogAction::CloseWithAction(_))
    }

    /// Extract the action if present
    pub fn into_action(self) -> Option<A> {
        match self {
            DialogAction::CloseWithAction(a) | DialogAction::Action(a) => Some(a),
            _ => None,
        }
    }
}

/// Trait for dialog state management
///
/// Dialog state structs should implement this trait to enable
/// proper lifecycle management (reset on close, validation, etc.)
pub trait DialogState: Default {
    /// Reset the dialog state to its default values
    fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check if the dialog has valid data to proceed with its action
    fn is_valid(&self) -> bool {
        true
    }
}

/// Configuration for dialog window appearance and behavior
#[derive(Debug, Clone)]
pub struct DialogWindowConfig {
    /// Default width of the dialog window
    pub default_width: f32,
    /// Default height of the dialog window (None for auto)
    pub default_height: Option<f32>,
    /// Whether the dialog can be resized
    pub resizable: bool,
    /// Whether the dialog can be collapsed
    pub collapsible: bool,
    /// Optional anchor position (alignment and offset)
    pub anchor: Option<(Align2, [f32; 2])>,
    /// Whether the dialog should be modal (dim background)
    pub modal: bool,
}

impl Default for DialogWindowConfig {
    fn default() -> Self {
        Self {
            default_width: 400.0,
            default_height: None,
            resizable: true,
            collapsible: false,
            anchor: None,
            modal: false,
        }
    }
}

impl DialogWindowConfig {
    /// Create a centered modal dialog configuration
    pub fn centered_modal(width: f32) -> Self {
        Self {
            default_width: width,
            default_height: None,
            resizable: false,
            collapsible: false,
            anchor: Some((Align2::CENTER_CENTER, [0.0, 0.0])),
            modal: true,
        }
    }
}

/// Main dialog trait for implementing dialogs
///
/// Each dialog in the application should implement this trait.
/// The trait uses associated types for type-safe state, actions, and context.
///
/// # Example
///
/// ```ignore
/// pub struct MyDialogState { /* ... */ }
/// impl DialogState for MyDialogState { /* ... */ }
///
/// pub enum MyDialogAction { Save, Cancel }
///
/// pub struct MyDialog;
///
/// impl Dialog for MyDialog {
///     type State = MyDialogState;
///     type Action = MyDialogAction;
///     type Context<'a> = &'a SomeData;
///
///     fn title(_state: &Self::State) -> &'static str { "My Dialog" }
///
///     fn render(
///         state: &mut Self::State,
///         ctx: Self::Context<'_>,
///         ui: &mut Ui,
///     ) -> DialogAction<Self::Action> {
///         // Render dialog content...
///         DialogAction::None
///     }
/// }
/// ```
pub trait Dialog {
    /// The state type for this dialog
    type State: DialogState;

    /// The action type this dialog can produce
    type Action;

    /// The context type needed to render this dialog
    type Context<'a>;

    /// Get the window title for this dialog
    fn title(state: &Self::State) -> &'static str;

    /// Get the window configuration for this dialog
    fn window_config() -> DialogWindowConfig {
        DialogWindowConfig::default()
    }

    /// Render the dialog content
    ///
    /// This method should render the dialog's UI and return an action
    /// indicating what should happen (close, perform action, etc.)
    fn render(
        state: &mut Self::State,
        ctx: Self::Context<'_>,
        ui: &mut Ui,
    ) -> DialogAction<Self::Action>;
}

/// Show a dialog using the Dialog trait
///
/// This helper function handles the common dialog lifecycle:
/// - Only renders if `is_open` is true
/// - Creates the window (or modal) with the dialog's configuration
/// - Calls the dialog's render method
/// - Handles closing and state reset
///
/// Returns `Some(action)` if the dialog produced an action, `None` otherwise.
///
/// # Example
///
/// ```ignore
/// if let Some(action) = show_dialog::<MyDialog>(
///     ctx,
///     &mut self.my_dialog_open,
///     &mut self.my_dialog_state,
///     &my_context_data,
/// ) {
///     match action {
///         MyDialogAction::Save => { /* handle save */ }
///         MyDialogAction::Cancel => { /* handle cancel */ }
///     }
/// }
/// ```
pub fn show_dialog<D: Dialog>(
    ctx: &Context,
    is_open: &mut bool,
    state: &mut D::State,
    dialog_ctx: D::Context<'_>,
) -> Option<D::Action> {
    let title = D::title(state);
    show_dialog_with_title::<D>(ctx, title, is_open, state, dialog_ctx)
}

/// A variant of show_dialog that takes a dynamic title
///
/// Useful when the title depends on runtime data that can't be known
/// at compile time from the state alone.
pub fn show_dialog_with_title<D: Dialog>(
    ctx: &Context,
    title: &str,
    is_open: &mut bool,
    state: &mut D::State,
    dialog_ctx: D::Context<'_>,
) -> Option<D::Action> {
    if !*is_open {
        return None;
    }

    let config = D::window_config();

    let action = if config.modal {
        let response = egui::Modal::new(egui::Id::new(("dialog_modal", title))).show(ctx, |ui| {
            ui.set_width(config.default_width);
            ui.heading(title);
            ui.separator();
            D::render(state, dialog_ctx, ui)
        });
        // Escape or a click outside dismisses the modal
        if response.should_close() && matches!(response.inner, DialogAction::None) {
            DialogAction::Close
        } else {
            response.inner
        }
    } else {
        let mut window = egui::Window::new(title)
            .collapsible(config.collapsible)
            .resizable(config.resizable)
            .default_width(config.default_width);

        if let Some(height) = config.default_height {
            window = window.default_height(height);
        }

        if let Some((align, offset)) = config.anchor {
            window = window.anchor(align, offset);
        }

        window
            .show(ctx, |ui| D::render(state, dialog_ctx, ui))
            .and_then(|response| response.inner)
            .unwrap_or(DialogAction::None)
    };

    // Handle closing
    if action.should_close() {
        *is_open = false;
        state.reset();
    }

    action.into_action()
}

// Re-export dialog implementations
pub mod alert;
pub mod preferences;

pub use alert::{AlertAction, AlertContext, AlertDialog, AlertState};
pub use preferences::{PreferencesAction, PreferencesContext, PreferencesDialog, PreferencesState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialog_action_close() {
        assert!(!DialogAction::<()>::None.should_close());
        assert!(DialogAction::<()>::Close.should_close());
        assert!(DialogAction::CloseWithAction(1).should_close());
        assert!(!DialogAction::Action(1).should_close());
    }

    #[test]
    fn test_dialog_action_into_action() {
        assert_eq!(DialogAction::CloseWithAction(3).into_action(), Some(3));
        assert_eq!(DialogAction::Action(4).into_action(), Some(4));
        assert_eq!(DialogAction::<i32>::Close.into_action(), None);
    }

    #[test]
    fn test_centered_modal_config() {
        let config = DialogWindowConfig::centered_modal(320.0);
        assert!(config.modal);
        assert!(!config.resizable);
        assert_eq!(config.default_width, 320.0);
    }
}
