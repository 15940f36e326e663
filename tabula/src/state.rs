//! Caller-owned interaction state.

use serde::{Deserialize, Serialize};

use crate::expansion::ExpansionState;
use crate::sort::SortState;
use crate::visibility::VisibilityState;

/// Sort, visibility and expansion state for one table.
///
/// Every mutation that changes the state bumps [`revision`](Self::revision);
/// mutations that leave it unchanged do not.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableState {
    sorting: SortState,
    column_visibility: VisibilityState,
    expanded: ExpansionState,
    #[serde(skip)]
    revision: u64,
}

impl PartialEq for TableState {
    fn eq(&self, other: &Self) -> bool {
        self.sorting == other.sorting
            && self.column_visibility == other.column_visibility
            && self.expanded == other.expanded
    }
}

impl TableState {
    /// Empty state: unsorted, all visible, nothing expanded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the sort state.
    pub fn with_sort(mut self, sort: SortState) -> Self {
        self.sorting = sort;
        self
    }

    /// Seed the visibility state.
    pub fn with_visibility(mut self, visibility: VisibilityState) -> Self {
        self.column_visibility = visibility;
        self
    }

    /// Seed the expansion state.
    pub fn with_expanded(mut self, expanded: ExpansionState) -> Self {
        self.expanded = expanded;
        self
    }

    /// Current sort keys.
    pub fn sort(&self) -> &SortState {
        &self.sorting
    }

    /// Current column visibility.
    pub fn visibility(&self) -> &VisibilityState {
        &self.column_visibility
    }

    /// Currently expanded rows.
    pub fn expanded(&self) -> &ExpansionState {
        &self.expanded
    }

    /// Change counter; moves only when the state actually changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the sort keys.
    pub fn set_sort(&mut self, sort: SortState) -> bool {
        if self.sorting == sort {
            return false;
        }
        self.sorting = sort;
        self.bump()
    }

    /// Drop every sort key.
    pub fn clear_sort(&mut self) -> bool {
        self.sorting.clear() && self.bump()
    }

    /// Set a column's visibility. Returns true if it changed.
    pub fn set_visibility(&mut self, column_id: impl Into<String>, visible: bool) -> bool {
        self.column_visibility.set_visibility(column_id, visible) && self.bump()
    }

    /// Flip a column's visibility. Returns the new visibility.
    pub fn toggle_visibility(&mut self, column_id: impl Into<String>) -> bool {
        let visible = self.column_visibility.toggle(column_id);
        self.bump();
        visible
    }

    /// Show every column.
    pub fn reset_visibility(&mut self) -> bool {
        self.column_visibility.reset() && self.bump()
    }

    /// Collapse every row.
    pub fn collapse_all(&mut self) -> bool {
        self.expanded.clear() && self.bump()
    }

    /// Record a visibility flag without counting it as a change.
    pub(crate) fn record_visibility(&mut self, column_id: impl Into<String>, visible: bool) {
        self.column_visibility.set_visibility(column_id, visible);
    }

    /// Mutate the sort keys; bumps the revision if they changed.
    pub(crate) fn update_sort<R>(&mut self, f: impl FnOnce(&mut SortState) -> R) -> R {
        let before = self.sorting.clone();
        let result = f(&mut self.sorting);
        if self.sorting != before {
            self.bump();
        }
        result
    }

    /// Mutate the expansion set; bumps the revision if it changed.
    pub(crate) fn update_expanded<R>(&mut self, f: impl FnOnce(&mut ExpansionState) -> R) -> R {
        let before = self.expanded.clone();
        let result = f(&mut self.expanded);
        if self.expanded != before {
            self.bump();
        }
        result
    }

    fn bump(&mut self) -> bool {
        self.revision = self.revision.wrapping_add(1);
        true
    }
}
