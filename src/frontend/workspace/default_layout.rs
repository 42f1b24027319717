//! Default workspace layout
//!
//! Builds the initial dock layout with the parameter picker on the left,
//! the chart in the centre and statistics/downloads below it.

use egui_dock::{DockState, NodeIndex};

use super::{PaneId, PaneKind, Workspace};

/// Build the default dock layout and return the DockState.
///
/// Layout:
/// ```text
/// ┌──────────────┬────────────────────────────────┐
/// │  Parameters  │     Repeatability Chart        │
/// │              │                                │
/// │              ├────────────────────────────────┤
/// │              │ [Statistics]  [Downloads]      │
/// └──────────────┴────────────────────────────────┘
/// ```
pub fn build_default_layout(workspace: &mut Workspace) -> DockState<PaneId> {
    let ids = [
        PaneKind::RepeatabilityChart,
        PaneKind::Parameters,
        PaneKind::Statistics,
        PaneKind::Downloads,
    ]
    .map(|kind| {
        let name = workspace.display_name(kind);
        workspace.register_pane(kind, name)
    });

    let [Some(chart_id), Some(params_id), Some(stats_id), Some(downloads_id)] = ids else {
        tracing::error!("Pane registry is incomplete, starting with an empty layout");
        return DockState::new(Vec::new());
    };

    let mut dock = DockState::new(vec![chart_id]);

    // Bottom 30% for statistics and downloads as tabs
    let [_chart, _bottom] = dock.main_surface_mut().split_below(
        NodeIndex::root(),
        0.7,
        vec![stats_id, downloads_id],
    );

    // Left 22% for the parameter picker
    dock.main_surface_mut()
        .split_left(NodeIndex::root(), 0.22, vec![params_id]);

    dock
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_registers_all_panes() {
        let mut workspace = Workspace::new();
        let dock = build_default_layout(&mut workspace);
        assert_eq!(workspace.pane_entries.len(), 4);
        assert_eq!(dock.iter_all_tabs().count(), 4);
    }
}
