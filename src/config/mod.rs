//! Configuration module for the passdown dashboard
//!
//! This module handles application configuration including:
//! - Application state persistence (UI preferences)
//! - The TOML application config (backend API, chart thresholds, downloads)
//! - Runtime view settings during execution
//!
//! # App Data Location
//!
//! Application data is stored in the platform-appropriate location:
//! - **Linux**: `~/.local/share/dev.hxyulin.passdown-vis/`
//! - **macOS**: `~/Library/Application Support/dev.hxyulin.passdown-vis/`
//! - **Windows**: `%APPDATA%\dev.hxyulin.passdown-vis\`
//!
//! # Files
//!
//! - `config.toml` - Backend URL, chart thresholds, download list
//! - `app_state.json` - UI preferences
//! - `logs/` - Daily rolling log files
//!
//! # Example
//!
//! ```ignore
//! use passdown_vis::config::{AppConfig, AppState};
//!
//! let config = AppConfig::load_or_default().with_env_overrides();
//! let mut state = AppState::load_or_default();
//! state.ui_preferences.dark_mode = false;
//! state.save()?;
//! ```

pub mod settings;

pub use settings::*;

use crate::chart::series::{
    default_reference_lines, ChartThresholds, ReferenceLine, DEFAULT_ALERT_COLOR,
    DEFAULT_ALERT_THRESHOLD, DEFAULT_FALLBACK_COLOR,
};
use crate::error::{PassdownError, Result};
use crate::types::ParameterId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application identifier for data directories
pub const APP_ID: &str = "dev.hxyulin.passdown-vis";

/// App state filename
pub const APP_STATE_FILE: &str = "app_state.json";

/// Application config filename
pub const CONFIG_FILE: &str = "config.toml";

/// Log directory name inside the app data directory
pub const LOG_DIR: &str = "logs";

/// Environment variable overriding `api.base_url`
pub const API_URL_ENV: &str = "PASSDOWN_API_URL";

/// Default backend address
pub const DEFAULT_BASE_URL: &str = "http://localhost:7071";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ==================== App Data Directory ====================

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Ensure the app data directory exists
pub fn ensure_app_data_dir() -> Result<PathBuf> {
    let dir = app_data_dir().ok_or_else(|| {
        PassdownError::Config("Could not determine app data directory".to_string())
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| {
            PassdownError::Config(format!("Failed to create app data directory: {}", e))
        })?;
    }

    Ok(dir)
}

/// Get the path to the app state file
pub fn app_state_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(APP_STATE_FILE))
}

/// Get the path to the application config file
pub fn config_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(CONFIG_FILE))
}

/// Get the log directory
pub fn log_dir() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(LOG_DIR))
}

// ==================== App State ====================

/// Persistent application state
///
/// Stores user preferences that persist across sessions, separate from
/// the application config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppState {
    /// Version for future migration support
    #[serde(default = "default_app_state_version")]
    pub version: u32,

    /// UI preferences
    #[serde(default)]
    pub ui_preferences: UiPreferences,
}

fn default_app_state_version() -> u32 {
    1
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            version: 1,
            ui_preferences: UiPreferences::default(),
        }
    }
}

impl AppState {
    /// Load app state from the default location
    pub fn load() -> Result<Self> {
        let path = app_state_path().ok_or_else(|| {
            PassdownError::Config("Could not determine app state path".to_string())
        })?;
        Self::load_from(&path)
    }

    /// Load app state from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| PassdownError::Config(format!("Failed to read app state: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| PassdownError::Config(format!("Failed to parse app state: {}", e)))
    }

    /// Load app state, returning defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load app state, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save app state to the default location
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        self.save_to(&dir.join(APP_STATE_FILE))
    }

    /// Save app state to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| PassdownError::Config(format!("Failed to serialize app state: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| PassdownError::Config(format!("Failed to write app state: {}", e)))
    }
}

/// UI preferences that persist across sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiPreferences {
    /// Enable dark mode
    #[serde(default = "default_true")]
    pub dark_mode: bool,

    /// Font scale factor
    #[serde(default = "default_font_scale")]
    pub font_scale: f32,
}

fn default_true() -> bool {
    true
}

fn default_font_scale() -> f32 {
    1.0
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            dark_mode: true,
            font_scale: 1.0,
        }
    }
}

// ==================== App Config ====================

/// Complete application configuration (`config.toml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Chart thresholds and defaults
    #[serde(default)]
    pub chart: ChartConfig,

    /// Download destination and offered files
    #[serde(default)]
    pub downloads: DownloadConfig,

    /// Plot display settings
    #[serde(default)]
    pub ui: UiConfig,
}

impl AppConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the config from the default location
    pub fn load() -> Result<Self> {
        let path = config_path().ok_or_else(|| {
            PassdownError::Config("Could not determine config path".to_string())
        })?;
        Self::load_from(&path)
    }

    /// Load the config from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| PassdownError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_toml(&content)
    }

    /// Parse a config from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| PassdownError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load the config, returning defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save the config to the default location
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        self.save_to(&dir.join(CONFIG_FILE))
    }

    /// Save the config to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PassdownError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| PassdownError::Config(format!("Failed to write config: {}", e)))
    }

    /// Apply environment overrides (`PASSDOWN_API_URL`)
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            let url = url.trim();
            if !url.is_empty() {
                tracing::info!("Using backend URL from {}: {}", API_URL_ENV, url);
                self.api.base_url = url.to_string();
            }
        }
        self
    }
}

// ==================== API Config ====================

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the passdown backend
    pub base_url: String,

    /// Path of the IV repeatability endpoint
    pub repeatability_path: String,

    /// Path of the file download endpoint
    pub download_path: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            repeatability_path: "/api/charts/iv-repeatability".to_string(),
            download_path: "/api/download-azure-file".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    /// Join the base URL and an endpoint path with exactly one slash
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Full URL of the repeatability endpoint
    pub fn repeatability_url(&self) -> String {
        self.endpoint(&self.repeatability_path)
    }

    /// Full URL of the download endpoint (without query)
    pub fn download_url(&self) -> String {
        self.endpoint(&self.download_path)
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

// ==================== Chart Config ====================

/// Chart thresholds and default selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Parameter selected at startup and after clearing
    pub default_parameter: ParameterId,

    /// Values strictly below this are drawn in the alert color
    pub alert_threshold: f64,

    /// Alert point color (RGBA)
    pub alert_color: [u8; 4],

    /// Line color for parameters without metadata (RGBA)
    pub fallback_color: [u8; 4],

    /// Horizontal acceptance lines, drawn regardless of selection
    pub reference_lines: Vec<ReferenceLine>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            default_parameter: ParameterId::primary(),
            alert_threshold: DEFAULT_ALERT_THRESHOLD,
            alert_color: DEFAULT_ALERT_COLOR,
            fallback_color: DEFAULT_FALLBACK_COLOR,
            reference_lines: default_reference_lines(),
        }
    }
}

impl ChartConfig {
    /// Thresholds used by the series deriver
    pub fn thresholds(&self) -> ChartThresholds {
        ChartThresholds {
            alert_threshold: self.alert_threshold,
            alert_color: self.alert_color,
            fallback_color: self.fallback_color,
            reference_lines: self.reference_lines.clone(),
        }
    }
}

// ==================== Download Config ====================

/// Download destination and the files offered in the Downloads pane
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Target directory (defaults to the user's Downloads folder)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,

    /// File names offered as download buttons
    pub files: Vec<String>,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            directory: None,
            files: vec!["BaseLine.xlsx".to_string(), "data.xlsx".to_string()],
        }
    }
}

impl DownloadConfig {
    /// Resolve the directory downloads are written to
    pub fn target_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.directory {
            return Ok(dir.clone());
        }
        dirs_next::download_dir()
            .or_else(dirs_next::home_dir)
            .ok_or_else(|| {
                PassdownError::Config("Could not determine download directory".to_string())
            })
    }
}

// ==================== UI Config ====================

/// UI configuration for plotting and display
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Show grid on plots
    pub show_grid: bool,

    /// Show legend on plots
    pub show_legend: bool,

    /// Draw a marker at every data point
    pub show_markers: bool,

    /// Plot line width in pixels
    pub line_width: f32,

    /// Radius of the per-point markers
    pub marker_radius: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_grid: true,
            show_legend: true,
            show_markers: true,
            line_width: 2.0,
            marker_radius: 4.0,
        }
    }
}

// ==================== Utilities ====================

/// Helper to format bytes as human-readable size
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_default() {
        let state = AppState::default();
        assert_eq!(state.version, 1);
        assert!(state.ui_preferences.dark_mode);
    }

    #[test]
    fn test_app_state_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(APP_STATE_FILE);

        let mut state = AppState::default();
        state.ui_preferences.dark_mode = false;
        state.save_to(&path).unwrap();

        let loaded = AppState::load_from(&path).unwrap();
        assert!(!loaded.ui_preferences.dark_mode);
    }

    #[test]
    fn test_missing_files_yield_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(state.version, 1);
        let config = AppConfig::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_config_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let mut config = AppConfig::default();
        config.api.base_url = "https://passdown.example.com".to_string();
        config.chart.alert_threshold = 9.75;
        config.downloads.directory = Some(dir.path().to_path_buf());
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.api.base_url, "https://passdown.example.com");
        assert_eq!(loaded.chart.alert_threshold, 9.75);
        assert_eq!(loaded.chart.reference_lines.len(), 2);
        assert_eq!(loaded.downloads.directory, Some(dir.path().to_path_buf()));
    }

    #[test]
    fn test_partial_toml_takes_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [api]
            base_url = "http://10.0.0.5:7071"
            repeatability_path = "/api/charts/iv-repeatability"
            download_path = "/api/download-azure-file"
            timeout_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.api.timeout(), Duration::from_secs(5));
        assert_eq!(config.chart.alert_threshold, DEFAULT_ALERT_THRESHOLD);
        assert_eq!(config.chart.default_parameter, ParameterId::primary());
        assert!(config.ui.show_legend);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml("[api\nbase_url = 1").unwrap_err();
        assert!(matches!(err, PassdownError::Config(_)));
    }

    #[test]
    fn test_endpoint_join() {
        let mut api = ApiConfig::default();
        api.base_url = "http://localhost:7071/".to_string();
        assert_eq!(
            api.repeatability_url(),
            "http://localhost:7071/api/charts/iv-repeatability"
        );
        assert_eq!(
            api.download_url(),
            "http://localhost:7071/api/download-azure-file"
        );
    }

    #[test]
    fn test_chart_thresholds_from_config() {
        let mut chart = ChartConfig::default();
        chart.alert_threshold = 11.0;
        let thresholds = chart.thresholds();
        assert!(thresholds.is_alert(10.9));
        assert!(!thresholds.is_alert(11.0));
        assert_eq!(thresholds.reference_lines, default_reference_lines());
    }

    #[test]
    fn test_download_dir_override() {
        let config = DownloadConfig {
            directory: Some(PathBuf::from("/tmp/passdown")),
            files: Vec::new(),
        };
        assert_eq!(config.target_dir().unwrap(), PathBuf::from("/tmp/passdown"));
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(500), "500 bytes");
        assert_eq!(format_file_size(1024), "1.00 KB");
        assert_eq!(format_file_size(1024 * 1024), "1.00 MB");
        assert_eq!(format_file_size(2 * 1024 * 1024 * 1024), "2.00 GB");
    }
}
