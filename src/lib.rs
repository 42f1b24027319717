//! # Passdown-Vis: Daily Passdown Dashboard
//!
//! A desktop dashboard for the daily IV repeatability check. It fetches the
//! per-day averages from the passdown backend, plots up to six parameters
//! against the acceptance reference lines and highlights points below the
//! alert threshold. Workbooks produced by the backend can be downloaded to
//! the local Downloads directory.
//!
//! ## Architecture
//!
//! - **Backend**: HTTP requests run on a worker thread, one short-lived
//!   thread per request, so the UI never blocks
//! - **Chart**: Pure selection and series derivation logic, no UI types
//! - **Frontend**: Renders the UI using eframe/egui with egui_plot for the chart
//! - **Communication**: Crossbeam channels for thread-safe data transfer
//!
//! ## Configuration
//!
//! The config file and application state are stored in the platform-appropriate
//! data directory under `dev.hxyulin.passdown-vis`:
//!
//! - **Linux**: `~/.local/share/dev.hxyulin.passdown-vis/`
//! - **macOS**: `~/Library/Application Support/dev.hxyulin.passdown-vis/`
//! - **Windows**: `%APPDATA%\dev.hxyulin.passdown-vis\`
//!
//! ## Example
//!
//! ```ignore
//! use passdown_vis::{
//!     backend::DashboardBackend,
//!     config::{AppConfig, AppState},
//!     frontend::DashboardApp,
//! };
//!
//! fn main() -> eframe::Result<()> {
//!     let config = AppConfig::load_or_default().with_env_overrides();
//!     let app_state = AppState::load_or_default();
//!
//!     let (backend, frontend_receiver) =
//!         DashboardBackend::new(config.clone()).expect("http client");
//!
//!     std::thread::spawn(move || backend.run());
//!
//!     eframe::run_native(
//!         "Passdown Visualizer",
//!         eframe::NativeOptions::default(),
//!         Box::new(|cc| {
//!             Ok(Box::new(DashboardApp::new(cc, frontend_receiver, config, app_state)))
//!         }),
//!     )
//! }
//! ```

pub mod app;
pub mod backend;
pub mod chart;
pub mod config;
pub mod error;
pub mod frontend;
pub mod types;

// Re-export commonly used types
pub use app::DashboardApp;
pub use backend::{BackendCommand, BackendMessage, DashboardBackend};
pub use chart::{derive_series, ChartThresholds, SelectionState, SeriesDescriptor};
pub use config::{AppConfig, AppState};
pub use error::{PassdownError, Result};
pub use types::{ParameterId, RepeatabilityDataset, TimeSeriesRow};
