//! Integration tests for frontend state management
//!
//! Drives [`DashboardApp`] against a real backend thread and checks the
//! fetch lifecycle, stale result handling and download alerts.

mod common;

use common::builders::{sample_dataset, DatasetBuilder};
use common::mock_helpers::FakeApi;
use common::test_timeout;
use passdown_vis::backend::{DashboardBackend, RequestId};
use passdown_vis::chart::ChartThresholds;
use passdown_vis::config::{AppConfig, AppState};
use passdown_vis::frontend::state::{ChartState, LoadStatus, FETCH_ERROR_MESSAGE};
use passdown_vis::frontend::{AppAction, DashboardApp};
use passdown_vis::types::{ParameterId, RepeatabilityDataset};
use std::sync::Arc;
use std::time::Instant;

fn start_app(api: FakeApi, config: AppConfig) -> DashboardApp {
    let (backend, frontend) = DashboardBackend::with_api(config.clone(), Arc::new(api));
    std::thread::spawn(move || backend.run());
    DashboardApp::with_frontend(frontend, config, AppState::default())
}

/// Pump backend messages until `done` holds or the timeout expires
fn pump_until(app: &mut DashboardApp, done: impl Fn(&DashboardApp) -> bool) {
    let deadline = Instant::now() + test_timeout();
    while !done(app) {
        assert!(Instant::now() < deadline, "timed out waiting for backend");
        app.process_backend_messages();
        std::thread::sleep(std::time::Duration::from_millis(5));
    }
}

#[test]
fn test_mount_fetch_loads_dataset() {
    let mut app = start_app(FakeApi::with_dataset(sample_dataset()), AppConfig::default());
    assert!(app.chart().is_loading());

    pump_until(&mut app, |a| !a.chart().is_loading());

    assert!(matches!(app.chart().status(), LoadStatus::Loaded { .. }));
    assert_eq!(app.chart().dataset().map(|d| d.len()), Some(2));
    assert_eq!(app.chart().series().len(), 1);
    assert_eq!(app.chart().error_message(), None);
}

#[test]
fn test_fetch_failure_shows_generic_message() {
    let mut app = start_app(FakeApi::failing(), AppConfig::default());
    pump_until(&mut app, |a| !a.chart().is_loading());

    assert_eq!(app.chart().error_message(), Some(FETCH_ERROR_MESSAGE));
    assert!(app.chart().dataset().is_none());
    assert!(app.chart().series().is_empty());
}

#[test]
fn test_empty_dataset_treated_as_failure() {
    let empty = DatasetBuilder::new().parameter("PCE").build();
    let mut app = start_app(FakeApi::with_dataset(empty), AppConfig::default());
    pump_until(&mut app, |a| !a.chart().is_loading());

    assert_eq!(app.chart().error_message(), Some(FETCH_ERROR_MESSAGE));
    assert!(app.chart().dataset().is_none());
}

#[test]
fn test_selection_actions_update_series() {
    let mut app = start_app(FakeApi::with_dataset(sample_dataset()), AppConfig::default());
    pump_until(&mut app, |a| !a.chart().is_loading());

    app.handle_action(AppAction::SelectFirstParameters(6));
    assert_eq!(app.chart().selection().len(), 6);
    assert_eq!(app.chart().series().len(), 6);

    // Full: a seventh parameter is refused
    app.handle_action(AppAction::ToggleParameter(ParameterId::new("R_shunt")));
    assert_eq!(app.chart().selection().len(), 6);

    app.handle_action(AppAction::ClearSelection);
    assert_eq!(
        app.chart().selection().selected(),
        &[ParameterId::primary()]
    );

    // The last parameter cannot be removed
    app.handle_action(AppAction::ToggleParameter(ParameterId::primary()));
    assert_eq!(app.chart().selection().len(), 1);
}

#[test]
fn test_download_failure_alert_keeps_chart() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.downloads.directory = Some(dir.path().to_path_buf());

    let mut app = start_app(FakeApi::with_dataset(sample_dataset()), config);
    pump_until(&mut app, |a| !a.chart().is_loading());

    app.handle_action(AppAction::Download("missing.xlsx".to_string()));
    assert!(app.downloads().is_busy());
    pump_until(&mut app, |a| !a.downloads().is_busy());

    let alert = app.alert_message().map(str::to_string);
    assert!(alert.is_some_and(|m| m.contains("404")));
    assert!(matches!(app.chart().status(), LoadStatus::Loaded { .. }));
}

#[test]
fn test_download_success_recorded() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.downloads.directory = Some(dir.path().to_path_buf());

    let api = FakeApi::with_dataset(sample_dataset()).with_file("data.xlsx", b"xlsx");
    let mut app = start_app(api, config);
    app.handle_action(AppAction::Download("data.xlsx".to_string()));
    pump_until(&mut app, |a| !a.downloads().is_busy());

    let record = app.downloads().last_completed().cloned().unwrap();
    assert_eq!(record.path, dir.path().join("data.xlsx"));
    assert_eq!(record.size, 4);
    assert_eq!(app.alert_message(), None);
}

#[test]
fn test_stale_fetch_result_discarded() {
    let mut chart = ChartState::new(ParameterId::primary(), ChartThresholds::default());

    let first = chart.begin_fetch().unwrap();
    assert!(chart.begin_fetch().is_none());
    assert!(chart.complete_fetch(first, Err("timeout".to_string())));

    let second = chart.begin_fetch().unwrap();
    assert_ne!(first, second);

    // A late answer to the first request must not replace the pending one
    assert!(!chart.complete_fetch(first, Ok(sample_dataset())));
    assert!(chart.is_loading());

    assert!(chart.complete_fetch(second, Ok(sample_dataset())));
    assert!(chart.dataset().is_some());
    assert!(!chart.complete_fetch(RequestId(99), Ok(RepeatabilityDataset::default())));
    assert!(chart.dataset().is_some());
}
