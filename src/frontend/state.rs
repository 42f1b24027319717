//! Shared state types for the frontend
//!
//! This module defines the shared state container and action types used by
//! the workspace-based architecture. Panes receive `SharedState` via borrowing
//! and return `AppAction`s instead of mutating state directly.
//!
//! [`ChartState`] owns the fetched dataset, the parameter selection and the
//! derived series. [`DownloadState`] tracks the single in-progress download.

use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::backend::RequestId;
use crate::chart::{derive_series, ChartThresholds, SelectionState, SeriesDescriptor, SeriesStatistics};
use crate::config::settings::ChartViewSettings;
use crate::config::{AppConfig, AppState};
use crate::types::{ParameterId, RepeatabilityDataset};

use super::workspace::{PaneId, PaneKind};

/// Message shown for any failed or empty repeatability fetch
pub const FETCH_ERROR_MESSAGE: &str = "Failed to load IV repeatability data";

/// Shared state accessible by all panes (borrowed, not owned).
pub struct SharedState<'a> {
    // Configuration (read-write by panes)
    pub config: &'a mut AppConfig,
    pub app_state: &'a mut AppState,
    pub view: &'a mut ChartViewSettings,

    // Chart data and selection (mutated through actions)
    pub chart: &'a ChartState,

    // Download progress
    pub downloads: &'a DownloadState,
}

/// Actions that any pane can emit
///
/// Panes return `Vec<AppAction>` instead of mutating state directly.
#[derive(Debug, Clone)]
pub enum AppAction {
    // Selection
    /// Add or remove a parameter from the chart
    ToggleParameter(ParameterId),
    /// Select the first `n` available parameters
    SelectFirstParameters(usize),
    /// Reset the selection to the default parameter
    ClearSelection,

    // Backend commands
    /// Fetch the repeatability dataset again
    Reload,
    /// Download a file by name
    Download(String),

    // Preferences
    /// Switch between dark and light visuals
    SetDarkMode(bool),
    /// Persist the current config to disk
    SaveConfig,

    // Workspace actions
    /// Open/focus a singleton pane, or create if not exists
    OpenPane(PaneKind),
    /// Close a pane (remove from dock and clean up state)
    ClosePane(PaneId),
}

/// Lifecycle of the repeatability fetch
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    /// Nothing requested yet
    Idle,
    /// A fetch is pending
    Loading {
        request_id: RequestId,
        started_at: DateTime<Local>,
    },
    /// The dataset is available
    Loaded { fetched_at: DateTime<Local> },
    /// The last fetch failed; holds the user-facing message
    Failed { message: String },
}

/// Dataset, selection and derived series for the repeatability chart
#[derive(Debug)]
pub struct ChartState {
    selection: SelectionState,
    thresholds: ChartThresholds,
    dataset: Option<RepeatabilityDataset>,
    status: LoadStatus,
    last_request: RequestId,
    /// Last failure detail, for the status bar and logs
    last_error: Option<String>,
    series: Vec<SeriesDescriptor>,
}

impl ChartState {
    /// Create chart state with the given default parameter and thresholds
    pub fn new(default_parameter: ParameterId, thresholds: ChartThresholds) -> Self {
        Self {
            selection: SelectionState::new(default_parameter),
            thresholds,
            dataset: None,
            status: LoadStatus::Idle,
            last_request: RequestId(0),
            last_error: None,
            series: Vec::new(),
        }
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn thresholds(&self) -> &ChartThresholds {
        &self.thresholds
    }

    pub fn dataset(&self) -> Option<&RepeatabilityDataset> {
        self.dataset.as_ref()
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, LoadStatus::Loading { .. })
    }

    /// User-facing error, if the last fetch failed
    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            LoadStatus::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Underlying cause of the last failure
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn fetched_at(&self) -> Option<DateTime<Local>> {
        match self.status {
            LoadStatus::Loaded { fetched_at } => Some(fetched_at),
            _ => None,
        }
    }

    /// Series for the current selection, in selection order
    pub fn series(&self) -> &[SeriesDescriptor] {
        &self.series
    }

    /// Statistics for every derived series
    pub fn statistics(&self) -> Vec<SeriesStatistics> {
        match &self.dataset {
            Some(dataset) => self
                .series
                .iter()
                .map(|s| SeriesStatistics::from_series(s, dataset))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Start a new fetch.
    ///
    /// Returns the id to send with the command, or `None` when a fetch is
    /// already pending.
    pub fn begin_fetch(&mut self) -> Option<RequestId> {
        if self.is_loading() {
            return None;
        }

        let request_id = self.last_request.next();
        self.last_request = request_id;
        self.status = LoadStatus::Loading {
            request_id,
            started_at: Local::now(),
        };
        Some(request_id)
    }

    /// Apply a fetch result.
    ///
    /// Results for any request other than the pending one are discarded.
    /// Returns `true` if the result was applied.
    pub fn complete_fetch(
        &mut self,
        request_id: RequestId,
        result: std::result::Result<RepeatabilityDataset, String>,
    ) -> bool {
        match self.status {
            LoadStatus::Loading { request_id: pending, .. } if pending == request_id => {}
            _ => {
                tracing::debug!("Discarding stale fetch result {}", request_id);
                return false;
            }
        }

        match result {
            Ok(dataset) if !dataset.is_empty() => {
                self.dataset = Some(dataset);
                self.last_error = None;
                self.status = LoadStatus::Loaded {
                    fetched_at: Local::now(),
                };
            }
            Ok(_) => self.fail(crate::error::PassdownError::EmptyDataset.to_string()),
            Err(error) => self.fail(error),
        }

        self.refresh_series();
        true
    }

    fn fail(&mut self, error: String) {
        tracing::error!("Repeatability fetch failed: {}", error);
        self.dataset = None;
        self.last_error = Some(error);
        self.status = LoadStatus::Failed {
            message: FETCH_ERROR_MESSAGE.to_string(),
        };
    }

    /// Toggle a parameter in the selection
    pub fn toggle_parameter(&mut self, id: &ParameterId) -> bool {
        let changed = self.selection.toggle(id);
        if changed {
            self.refresh_series();
        }
        changed
    }

    /// Select the first `n` available parameters
    pub fn select_first(&mut self, n: usize) -> bool {
        let Some(dataset) = &self.dataset else {
            return false;
        };
        let changed = self.selection.select_first_n(dataset, n);
        if changed {
            self.refresh_series();
        }
        changed
    }

    /// Reset the selection to the default parameter
    pub fn clear_selection(&mut self) -> bool {
        let changed = self.selection.clear();
        if changed {
            self.refresh_series();
        }
        changed
    }

    /// Replace the thresholds (after a config change)
    pub fn set_thresholds(&mut self, thresholds: ChartThresholds) {
        self.thresholds = thresholds;
        self.refresh_series();
    }

    fn refresh_series(&mut self) {
        self.series = match &self.dataset {
            Some(dataset) => derive_series(&self.selection, dataset, &self.thresholds),
            None => Vec::new(),
        };
    }
}

/// A file saved by a completed download
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadRecord {
    pub filename: String,
    pub path: PathBuf,
    pub size: u64,
    pub completed_at: DateTime<Local>,
}

/// Tracks the single in-progress download and recent results
#[derive(Debug, Default)]
pub struct DownloadState {
    busy: Option<String>,
    history: Vec<DownloadRecord>,
}

impl DownloadState {
    /// Mark a download as started. Returns `false` if one is already busy.
    pub fn begin(&mut self, filename: &str) -> bool {
        if self.busy.is_some() {
            return false;
        }
        self.busy = Some(filename.to_string());
        true
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_some()
    }

    /// File currently downloading
    pub fn busy_file(&self) -> Option<&str> {
        self.busy.as_deref()
    }

    /// Record a saved file and release the busy flag
    pub fn complete(&mut self, filename: String, path: PathBuf, size: u64) {
        self.busy = None;
        self.history.push(DownloadRecord {
            filename,
            path,
            size,
            completed_at: Local::now(),
        });
    }

    /// Release the busy flag after a failure
    pub fn fail(&mut self) {
        self.busy = None;
    }

    /// Completed downloads, oldest first
    pub fn history(&self) -> &[DownloadRecord] {
        &self.history
    }

    pub fn last_completed(&self) -> Option<&DownloadRecord> {
        self.history.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TimeSeriesRow;

    fn dataset() -> RepeatabilityDataset {
        RepeatabilityDataset::new(
            vec![
                TimeSeriesRow::new("2024-05-01")
                    .with_value("PCE_avg", 12.0)
                    .with_value("FF_avg", 80.0),
                TimeSeriesRow::new("2024-05-02")
                    .with_value("PCE_avg", 10.0)
                    .with_value("FF_avg", 79.0),
            ],
            vec![ParameterId::new("PCE"), ParameterId::new("FF")],
        )
    }

    fn chart() -> ChartState {
        ChartState::new(ParameterId::primary(), ChartThresholds::default())
    }

    #[test]
    fn test_fetch_lifecycle() {
        let mut state = chart();
        assert_eq!(state.status(), &LoadStatus::Idle);

        let id = state.begin_fetch().unwrap();
        assert!(state.is_loading());
        assert!(state.complete_fetch(id, Ok(dataset())));
        assert!(state.fetched_at().is_some());
        assert_eq!(state.series().len(), 1);
        assert_eq!(state.series()[0].key, "PCE_avg");
    }

    #[test]
    fn test_reload_while_pending_refused() {
        let mut state = chart();
        let first = state.begin_fetch();
        assert!(first.is_some());
        assert!(state.begin_fetch().is_none());
    }

    #[test]
    fn test_stale_result_ignored() {
        let mut state = chart();
        let id = state.begin_fetch().unwrap();
        assert!(!state.complete_fetch(RequestId(id.0 + 5), Ok(dataset())));
        assert!(state.is_loading());
        assert!(state.dataset().is_none());
    }

    #[test]
    fn test_result_after_completion_ignored() {
        let mut state = chart();
        let id = state.begin_fetch().unwrap();
        assert!(state.complete_fetch(id, Ok(dataset())));
        assert!(!state.complete_fetch(id, Err("late".to_string())));
        assert!(state.dataset().is_some());
    }

    #[test]
    fn test_failure_shows_generic_message() {
        let mut state = chart();
        let id = state.begin_fetch().unwrap();
        state.complete_fetch(id, Err("connection refused".to_string()));

        assert_eq!(state.error_message(), Some(FETCH_ERROR_MESSAGE));
        assert_eq!(state.last_error(), Some("connection refused"));
        assert!(state.series().is_empty());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_empty_dataset_is_failure() {
        let mut state = chart();
        let id = state.begin_fetch().unwrap();
        let empty = RepeatabilityDataset::new(Vec::new(), vec![ParameterId::primary()]);
        state.complete_fetch(id, Ok(empty));
        assert_eq!(state.error_message(), Some(FETCH_ERROR_MESSAGE));
    }

    #[test]
    fn test_selection_changes_rederive_series() {
        let mut state = chart();
        let id = state.begin_fetch().unwrap();
        state.complete_fetch(id, Ok(dataset()));

        assert!(state.toggle_parameter(&ParameterId::new("FF")));
        let keys: Vec<_> = state.series().iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["PCE_avg", "FF_avg"]);

        assert!(state.clear_selection());
        assert_eq!(state.series().len(), 1);

        assert!(state.select_first(6));
        assert_eq!(state.series().len(), 2);
        assert_eq!(state.statistics().len(), 2);
    }

    #[test]
    fn test_select_first_without_data_is_noop() {
        let mut state = chart();
        assert!(!state.select_first(6));
        assert_eq!(state.selection().len(), 1);
    }

    #[test]
    fn test_download_busy_flag() {
        let mut downloads = DownloadState::default();
        assert!(downloads.begin("BaseLine.xlsx"));
        assert!(!downloads.begin("data.xlsx"));
        assert_eq!(downloads.busy_file(), Some("BaseLine.xlsx"));

        downloads.complete("BaseLine.xlsx".to_string(), PathBuf::from("/tmp/BaseLine.xlsx"), 10);
        assert!(!downloads.is_busy());
        assert_eq!(downloads.history().len(), 1);

        assert!(downloads.begin("data.xlsx"));
        downloads.fail();
        assert!(!downloads.is_busy());
        assert_eq!(downloads.last_completed().unwrap().filename, "BaseLine.xlsx");
    }
}
