//! Pane modules for the workspace
//!
//! Each pane provides a render function that takes its own state, SharedState, and &mut Ui.
//! Panes return Vec<AppAction> instead of mutating state directly.

pub mod chart;
pub mod downloads;
pub mod parameters;
pub mod statistics;

pub use chart::ChartPaneState;
pub use downloads::DownloadsPaneState;
pub use parameters::ParametersPaneState;
pub use statistics::StatisticsPaneState;
