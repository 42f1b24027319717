//! Parameter selection for the repeatability chart
//!
//! [`SelectionState`] is an ordered set of [`ParameterId`] that always holds
//! between one and [`MAX_SELECTED_PARAMETERS`] distinct members. Every
//! transition is total: requests that would break the bounds are no-ops.

use crate::types::{ParameterId, RepeatabilityDataset};

/// Maximum number of parameters plotted at once
pub const MAX_SELECTED_PARAMETERS: usize = 6;

/// Ordered, bounded, duplicate-free set of selected parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    selected: Vec<ParameterId>,
    default: ParameterId,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(ParameterId::primary())
    }
}

impl SelectionState {
    /// Create a selection holding only `default`
    pub fn new(default: ParameterId) -> Self {
        Self {
            selected: vec![default.clone()],
            default,
        }
    }

    /// Selected parameters in selection order
    pub fn selected(&self) -> &[ParameterId] {
        &self.selected
    }

    /// Iterate selected parameters in selection order
    pub fn iter(&self) -> impl Iterator<Item = &ParameterId> {
        self.selected.iter()
    }

    /// Number of selected parameters (always at least one)
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Always false; present for API symmetry with collections
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Whether `id` is selected
    pub fn contains(&self, id: &ParameterId) -> bool {
        self.selected.contains(id)
    }

    /// Whether another parameter can be added
    pub fn is_full(&self) -> bool {
        self.selected.len() >= MAX_SELECTED_PARAMETERS
    }

    /// The parameter restored by [`clear`](Self::clear)
    pub fn default_parameter(&self) -> &ParameterId {
        &self.default
    }

    /// Add or remove `id`.
    ///
    /// A selected id is removed unless it is the last one; an unselected id
    /// is appended unless the selection is full. Returns whether the
    /// selection changed.
    pub fn toggle(&mut self, id: &ParameterId) -> bool {
        if let Some(pos) = self.selected.iter().position(|p| p == id) {
            if self.selected.len() > 1 {
                self.selected.remove(pos);
                return true;
            }
            return false;
        }

        if self.is_full() {
            return false;
        }
        self.selected.push(id.clone());
        true
    }

    /// Replace the selection with the first `n` parameters the dataset offers.
    ///
    /// `n` is capped at [`MAX_SELECTED_PARAMETERS`] and dataset order is kept.
    /// Repeated ids count once. When the dataset offers nothing (or `n` is 0)
    /// the selection is left untouched.
    pub fn select_first_n(&mut self, dataset: &RepeatabilityDataset, n: usize) -> bool {
        let limit = n.min(MAX_SELECTED_PARAMETERS);
        let mut next: Vec<ParameterId> = Vec::with_capacity(limit);
        for id in dataset.available_parameters() {
            if next.len() >= limit {
                break;
            }
            if !next.contains(id) {
                next.push(id.clone());
            }
        }

        if next.is_empty() || next == self.selected {
            return false;
        }
        self.selected = next;
        true
    }

    /// Select as many dataset parameters as allowed
    pub fn select_all(&mut self, dataset: &RepeatabilityDataset) -> bool {
        self.select_first_n(dataset, MAX_SELECTED_PARAMETERS)
    }

    /// Reset to the single default parameter
    pub fn clear(&mut self) -> bool {
        if self.selected.len() == 1 && self.selected[0] == self.default {
            return false;
        }
        self.selected.clear();
        self.selected.push(self.default.clone());
        true
    }
}
