//! Frontend module for egui UI
//!
//! This module provides the main UI components using eframe/egui.
//! It receives results from the backend worker through crossbeam channels
//! and renders the repeatability dashboard.
//!
//! # Architecture
//!
//! The frontend uses an egui_dock workspace where every UI element is a pane:
//! repeatability chart, parameter picker, statistics table, downloads.
//! Panes can be rearranged via drag-and-drop docking.
//!
//! # Main Types
//!
//! - [`DashboardApp`] - Main application state implementing [`eframe::App`]
//! - [`Workspace`](workspace::Workspace) - Dock state and pane management
//! - [`RepeatabilityPlot`] - Chart rendering
//!
//! # Submodules
//!
//! - `workspace` - Dock workspace, tab viewer, default layout
//! - `panes` - Individual pane render functions
//! - `dialogs` - Alert and preferences dialogs
//! - `plot` - Plot rendering with egui_plot
//! - `widgets` - Custom UI widgets (status indicators, parameter chips, etc.)

pub mod dialogs;
pub mod pane_registry;
pub mod pane_trait;
pub mod panes;
pub mod plot;
pub mod state;
pub mod status_bar;
pub mod widgets;
pub mod workspace;

pub use plot::RepeatabilityPlot;
pub use state::{AppAction, ChartState, DownloadState, LoadStatus, SharedState};
pub use widgets::*;

use dialogs::{
    show_dialog, AlertAction, AlertContext, AlertDialog, AlertState, PreferencesAction,
    PreferencesContext, PreferencesDialog, PreferencesState,
};
use status_bar::{render_status_bar, StatusBarContext};
use workspace::tab_viewer::WorkspaceTabViewer;
use workspace::{PaneId, Workspace};

use crate::backend::{BackendMessage, FrontendReceiver};
use crate::config::settings::ChartViewSettings;
use crate::config::{AppConfig, AppState, UiPreferences};
use std::time::Duration;

/// Repaint interval while a fetch or download is pending
const PENDING_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

/// Message shown when a command cannot reach the worker thread
const BACKEND_GONE_MESSAGE: &str = "Backend worker is not running";

/// Main application state for the repeatability dashboard
pub struct DashboardApp {
    // === Communication ===
    frontend: FrontendReceiver,
    backend_alive: bool,

    // === Shared State ===
    config: AppConfig,
    app_state: AppState,
    view: ChartViewSettings,
    chart: ChartState,
    downloads: DownloadState,

    // === Workspace ===
    workspace: Workspace,

    // === Global Dialogs ===
    alert_open: bool,
    alert_state: AlertState,
    preferences_open: bool,
    preferences_state: PreferencesState,

    /// Visuals or font scale changed and must be pushed to the egui context
    appearance_dirty: bool,
}

impl DashboardApp {
    /// Create a new application instance and start the initial fetch
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        frontend: FrontendReceiver,
        config: AppConfig,
        app_state: AppState,
    ) -> Self {
        apply_appearance(&cc.egui_ctx, &app_state.ui_preferences);
        Self::with_frontend(frontend, config, app_state)
    }

    /// Create the application without an egui context.
    ///
    /// Builds the default workspace and sends the mount-time fetch.
    pub fn with_frontend(frontend: FrontendReceiver, config: AppConfig, app_state: AppState) -> Self {
        let mut workspace = Workspace::new();
        let dock_state = workspace::default_layout::build_default_layout(&mut workspace);
        workspace.dock_state = dock_state;

        let chart = ChartState::new(config.chart.default_parameter.clone(), config.chart.thresholds());
        let view = ChartViewSettings::from_config(&config.ui);

        let mut app = Self {
            frontend,
            backend_alive: true,
            config,
            app_state,
            view,
            chart,
            downloads: DownloadState::default(),
            workspace,
            alert_open: false,
            alert_state: AlertState::default(),
            preferences_open: false,
            preferences_state: PreferencesState::default(),
            appearance_dirty: false,
        };
        app.start_fetch();
        app
    }

    pub fn chart(&self) -> &ChartState {
        &self.chart
    }

    pub fn downloads(&self) -> &DownloadState {
        &self.downloads
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Message of the open alert, if any
    pub fn alert_message(&self) -> Option<&str> {
        self.alert_open.then_some(self.alert_state.message.as_str())
    }

    /// Dismiss the alert as if the user acknowledged it
    pub fn acknowledge_alert(&mut self) {
        self.alert_open = false;
        self.alert_state = AlertState::default();
    }

    /// Drain the message channel. Returns `true` if anything arrived.
    pub fn process_backend_messages(&mut self) -> bool {
        let messages = self.frontend.drain();
        let had_messages = !messages.is_empty();

        for msg in messages {
            match msg {
                BackendMessage::RepeatabilityLoaded { request_id, dataset } => {
                    tracing::debug!("Fetch {} returned {} rows", request_id, dataset.len());
                    self.chart.complete_fetch(request_id, Ok(dataset));
                }
                BackendMessage::RepeatabilityFailed { request_id, error } => {
                    self.chart.complete_fetch(request_id, Err(error));
                }
                BackendMessage::DownloadComplete {
                    filename,
                    path,
                    size,
                } => {
                    tracing::info!("Saved {} to {:?} ({} bytes)", filename, path, size);
                    self.downloads.complete(filename, path, size);
                }
                BackendMessage::DownloadFailed { filename, error } => {
                    tracing::warn!("Download of {} failed: {}", filename, error);
                    self.downloads.fail();
                    self.show_alert(AlertState::with_message(error).detail(filename));
                }
                BackendMessage::Shutdown => {
                    tracing::info!("Backend worker shut down");
                    self.backend_alive = false;
                }
            }
        }

        had_messages
    }

    /// Handle an action emitted by a pane, menu or shortcut
    pub fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::ToggleParameter(id) => {
                if !self.chart.toggle_parameter(&id) {
                    tracing::debug!("Toggle of {} refused by selection bounds", id);
                }
            }
            AppAction::SelectFirstParameters(n) => {
                self.chart.select_first(n);
            }
            AppAction::ClearSelection => {
                self.chart.clear_selection();
            }
            AppAction::Reload => self.start_fetch(),
            AppAction::Download(filename) => self.start_download(filename),
            AppAction::SetDarkMode(dark_mode) => {
                self.app_state.ui_preferences.dark_mode = dark_mode;
                self.appearance_dirty = true;
            }
            AppAction::SaveConfig => {
                self.view.apply_to_config(&mut self.config.ui);
                if let Err(e) = self.config.save() {
                    tracing::warn!("Failed to save config: {}", e);
                    self.show_alert(AlertState::with_message(e.to_string()));
                }
            }
            AppAction::OpenPane(kind) => {
                if self.workspace.open_pane(kind).is_none() {
                    tracing::warn!("Could not open pane {:?}", kind);
                }
            }
            AppAction::ClosePane(pane_id) => {
                self.workspace.remove_pane(pane_id);
            }
        }
    }

    fn start_fetch(&mut self) {
        let Some(request_id) = self.chart.begin_fetch() else {
            tracing::debug!("Fetch already in progress");
            return;
        };

        tracing::info!("Fetching repeatability data ({})", request_id);
        if !self.frontend.fetch_repeatability(request_id) {
            self.chart
                .complete_fetch(request_id, Err(BACKEND_GONE_MESSAGE.to_string()));
        }
    }

    fn start_download(&mut self, filename: String) {
        let filename = filename.trim().to_string();
        if filename.is_empty() {
            return;
        }
        if !self.downloads.begin(&filename) {
            tracing::debug!("Download of {} ignored, another one is busy", filename);
            return;
        }

        tracing::info!("Downloading {}", filename);
        if !self.frontend.download(filename.clone()) {
            self.downloads.fail();
            self.show_alert(AlertState::with_message(BACKEND_GONE_MESSAGE).detail(filename));
        }
    }

    fn show_alert(&mut self, state: AlertState) {
        self.alert_state = state;
        self.alert_open = true;
    }

    fn open_preferences(&mut self) {
        self.preferences_state = PreferencesState::from_config(
            &self.config.ui,
            &self.config.chart,
            &self.app_state.ui_preferences,
        );
        self.preferences_open = true;
    }

    fn apply_preferences(&mut self, prefs: PreferencesState) {
        prefs.apply(
            &mut self.config.ui,
            &mut self.config.chart,
            &mut self.app_state.ui_preferences,
        );
        self.view.sync_from_config(&self.config.ui);
        self.chart.set_thresholds(self.config.chart.thresholds());
        self.appearance_dirty = true;

        if let Err(e) = self.app_state.save() {
            tracing::warn!("Failed to save app state: {}", e);
        }
    }

    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        use egui::Key;

        let mut reload = false;
        let mut save_config = false;

        ctx.input(|i| {
            if i.key_pressed(Key::F5) || (i.key_pressed(Key::R) && i.modifiers.command_only()) {
                reload = true;
            }

            if i.key_pressed(Key::S) && i.modifiers.command_only() {
                save_config = true;
            }
        });

        // The alert blocks everything else
        if self.alert_open {
            return;
        }

        if reload {
            self.handle_action(AppAction::Reload);
        }
        if save_config {
            self.handle_action(AppAction::SaveConfig);
        }
    }

    fn render_menu_bar(&mut self, ctx: &egui::Context) {
        let mut actions = Vec::new();
        let mut open_preferences = false;

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Save Config").clicked() {
                        actions.push(AppAction::SaveConfig);
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        ui.close();
                    }
                });

                ui.menu_button("Data", |ui| {
                    if ui
                        .add_enabled(!self.chart.is_loading(), egui::Button::new("Reload"))
                        .clicked()
                    {
                        actions.push(AppAction::Reload);
                        ui.close();
                    }
                    ui.separator();
                    if ui
                        .add_enabled(
                            self.chart.dataset().is_some(),
                            egui::Button::new(format!(
                                "Select first {}",
                                crate::chart::MAX_SELECTED_PARAMETERS
                            )),
                        )
                        .clicked()
                    {
                        actions.push(AppAction::SelectFirstParameters(
                            crate::chart::MAX_SELECTED_PARAMETERS,
                        ));
                        ui.close();
                    }
                    if ui.button("Clear selection").clicked() {
                        actions.push(AppAction::ClearSelection);
                        ui.close();
                    }
                });

                ui.menu_button("View", |ui| {
                    // Generated from the pane registry
                    for info in self.workspace.registry() {
                        if ui.button(info.display_name).clicked() {
                            actions.push(AppAction::OpenPane(info.kind));
                            ui.close();
                        }
                    }

                    ui.separator();

                    let mut dark_mode = self.app_state.ui_preferences.dark_mode;
                    if ui.checkbox(&mut dark_mode, "Dark mode").changed() {
                        actions.push(AppAction::SetDarkMode(dark_mode));
                    }
                });

                ui.menu_button("Edit", |ui| {
                    if ui.button("Preferences...").clicked() {
                        open_preferences = true;
                        ui.close();
                    }
                });

                // Right-aligned: fetch status
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let indicator = match self.chart.status() {
                        LoadStatus::Idle => StatusIndicator::idle(),
                        LoadStatus::Loading { .. } => StatusIndicator::loading(),
                        LoadStatus::Loaded { .. } => StatusIndicator::loaded(),
                        LoadStatus::Failed { message } => {
                            StatusIndicator::error().with_tooltip(message.clone())
                        }
                    };
                    ui.add(indicator);

                    if !self.backend_alive {
                        ui.colored_label(egui::Color32::RED, "Backend stopped");
                    }
                });
            });
        });

        if open_preferences {
            self.open_preferences();
        }
        for action in actions {
            self.handle_action(action);
        }
    }

    /// Render pane dialogs that need &Context (called after dock area renders)
    fn render_pane_dialogs(&mut self, ctx: &egui::Context) {
        let mut actions = Vec::new();
        let pane_ids: Vec<PaneId> = self.workspace.pane_states.keys().copied().collect();

        for pane_id in pane_ids {
            if let Some(pane) = self.workspace.pane_states.get_mut(&pane_id) {
                let mut shared = SharedState {
                    config: &mut self.config,
                    app_state: &mut self.app_state,
                    view: &mut self.view,
                    chart: &self.chart,
                    downloads: &self.downloads,
                };

                actions.extend(pane.render_dialogs(&mut shared, ctx));
            }
        }

        for action in actions {
            self.handle_action(action);
        }
    }

    fn render_global_dialogs(&mut self, ctx: &egui::Context) {
        if let Some(action) = show_dialog::<PreferencesDialog>(
            ctx,
            &mut self.preferences_open,
            &mut self.preferences_state,
            PreferencesContext,
        ) {
            match action {
                PreferencesAction::Apply(prefs) => self.apply_preferences(prefs),
            }
        }

        // Rendered last so the modal sits above every other window
        if let Some(action) = show_dialog::<AlertDialog>(
            ctx,
            &mut self.alert_open,
            &mut self.alert_state,
            AlertContext,
        ) {
            match action {
                AlertAction::Acknowledged => tracing::debug!("Alert acknowledged"),
            }
        }
    }
}

/// Push dark/light visuals and the font scale into the egui context
fn apply_appearance(ctx: &egui::Context, prefs: &UiPreferences) {
    let mut style = egui::Style::default();
    style.visuals = if prefs.dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };
    style.visuals.window_shadow.offset = [0, 0];
    style.text_styles.iter_mut().for_each(|(_, font_id)| {
        font_id.size *= prefs.font_scale;
    });
    ctx.set_style(style);
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let had_messages = self.process_backend_messages();
        self.handle_keyboard_shortcuts(ctx);

        if self.appearance_dirty {
            apply_appearance(ctx, &self.app_state.ui_preferences);
            self.appearance_dirty = false;
        }

        if had_messages {
            ctx.request_repaint();
        } else if self.chart.is_loading() || self.downloads.is_busy() {
            ctx.request_repaint_after(PENDING_REPAINT_INTERVAL);
        }

        self.render_menu_bar(ctx);

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            render_status_bar(
                ui,
                &StatusBarContext {
                    chart: &self.chart,
                    downloads: &self.downloads,
                    base_url: &self.config.api.base_url,
                },
            );
        });

        // Dock workspace
        {
            let mut viewer = WorkspaceTabViewer {
                config: &mut self.config,
                app_state: &mut self.app_state,
                view: &mut self.view,
                chart: &self.chart,
                downloads: &self.downloads,
                pane_states: &mut self.workspace.pane_states,
                pane_entries: &self.workspace.pane_entries,
                actions: Vec::new(),
            };

            egui_dock::DockArea::new(&mut self.workspace.dock_state)
                .style(egui_dock::Style::from_egui(ctx.style().as_ref()))
                .show(ctx, &mut viewer);

            let actions = viewer.actions;
            for action in actions {
                self.handle_action(action);
            }
        }

        self.render_pane_dialogs(ctx);
        self.render_global_dialogs(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.frontend.shutdown();

        if let Err(e) = self.app_state.save() {
            tracing::warn!("Failed to save app state: {}", e);
        }
    }
}
