//! Workspace module for dockable pane management
//!
//! Provides the core workspace types: PaneId, PaneKind, Workspace.
//! Uses egui_dock for drag-and-drop docking, tabs, and splits.

pub mod default_layout;
pub mod tab_viewer;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::frontend::pane_registry::{self, PaneKindInfo};
use crate::frontend::pane_trait::Pane;

/// Unique identifier for a pane instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaneId(pub u64);

static NEXT_PANE_ID: AtomicU64 = AtomicU64::new(1);

impl PaneId {
    pub fn next() -> Self {
        Self(NEXT_PANE_ID.fetch_add(1, Ordering::SeqCst))
    }
}

/// Kind of pane (used for dispatch and menu display)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaneKind {
    RepeatabilityChart,
    Parameters,
    Statistics,
    Downloads,
}

/// Metadata entry for a pane
pub struct PaneEntry {
    pub id: PaneId,
    pub kind: PaneKind,
    pub title: String,
}

/// The workspace holds all dock state, pane data, and the pane registry.
pub struct Workspace {
    pub dock_state: egui_dock::DockState<PaneId>,
    pub pane_states: HashMap<PaneId, Box<dyn Pane>>,
    pub pane_entries: HashMap<PaneId, PaneEntry>,
    registry: Vec<PaneKindInfo>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    /// Create a new workspace with the pane registry.
    pub fn new() -> Self {
        Self {
            dock_state: egui_dock::DockState::new(vec![]),
            pane_states: HashMap::new(),
            pane_entries: HashMap::new(),
            registry: pane_registry::build_registry(),
        }
    }

    fn info(&self, kind: PaneKind) -> Option<&PaneKindInfo> {
        self.registry.iter().find(|info| info.kind == kind)
    }

    /// Register a new pane and return its ID.
    ///
    /// Returns `None` if the kind is missing from the registry.
    pub fn register_pane(&mut self, kind: PaneKind, title: impl Into<String>) -> Option<PaneId> {
        let state = (self.info(kind)?.factory)();
        let id = PaneId::next();

        self.pane_states.insert(id, state);
        self.pane_entries.insert(
            id,
            PaneEntry {
                id,
                kind,
                title: title.into(),
            },
        );

        Some(id)
    }

    /// Look up the display name for a pane kind from the registry.
    pub fn display_name(&self, kind: PaneKind) -> &'static str {
        self.info(kind)
            .map(|info| info.display_name)
            .unwrap_or("Unknown")
    }

    /// Check whether a pane kind is a singleton.
    pub fn is_singleton(&self, kind: PaneKind) -> bool {
        self.info(kind).map(|info| info.is_singleton).unwrap_or(false)
    }

    /// Iterate all pane kinds in registry order.
    pub fn registry(&self) -> impl Iterator<Item = &PaneKindInfo> {
        self.registry.iter()
    }

    /// Find an existing pane of the given kind.
    pub fn find_singleton(&self, kind: PaneKind) -> Option<PaneId> {
        self.pane_entries
            .values()
            .find(|e| e.kind == kind)
            .map(|e| e.id)
    }

    /// Open a pane, or focus it if it is a singleton that already exists.
    pub fn open_pane(&mut self, kind: PaneKind) -> Option<PaneId> {
        if self.is_singleton(kind) {
            if let Some(id) = self.find_singleton(kind) {
                if let Some(location) = self.dock_state.find_tab(&id) {
                    self.dock_state.set_active_tab(location);
                }
                return Some(id);
            }
        }

        let name = self.display_name(kind);
        let id = self.register_pane(kind, name)?;
        self.dock_state.push_to_first_leaf(id);
        Some(id)
    }

    /// Remove a pane by ID.
    pub fn remove_pane(&mut self, id: PaneId) {
        self.pane_states.remove(&id);
        self.pane_entries.remove(&id);
    }
}
