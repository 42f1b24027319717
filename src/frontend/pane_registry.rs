//! Pane registry: data-driven pane registration.
//!
//! The registry is the single source of truth for all pane kinds:
//! display names, singleton flags, and factory functions.
//! The View menu and workspace pane creation are driven from this data.

use crate::frontend::pane_trait::Pane;
use crate::frontend::panes::{ChartPaneState, DownloadsPaneState, ParametersPaneState, StatisticsPaneState};
use crate::frontend::workspace::PaneKind;

/// Metadata for a pane kind, including its factory function.
pub struct PaneKindInfo {
    pub kind: PaneKind,
    pub display_name: &'static str,
    pub is_singleton: bool,
    pub factory: fn() -> Box<dyn Pane>,
}

/// Build the pane registry with all known pane kinds, in View menu order.
pub fn build_registry() -> Vec<PaneKindInfo> {
    vec![
        PaneKindInfo {
            kind: PaneKind::RepeatabilityChart,
            display_name: "Repeatability Chart",
            is_singleton: true,
            factory: || Box::new(ChartPaneState::default()),
        },
        PaneKindInfo {
            kind: PaneKind::Parameters,
            display_name: "Parameters",
            is_singleton: true,
            factory: || Box::new(ParametersPaneState::default()),
        },
        PaneKindInfo {
            kind: PaneKind::Statistics,
            display_name: "Statistics",
            is_singleton: true,
            factory: || Box::new(StatisticsPaneState::default()),
        },
        PaneKindInfo {
            kind: PaneKind::Downloads,
            display_name: "Downloads",
            is_singleton: true,
            factory: || Box::new(DownloadsPaneState::default()),
        },
    ]
}
