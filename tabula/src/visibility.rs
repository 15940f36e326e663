//! Column visibility state.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Per-column visibility flags.
///
/// Columns without an entry are visible. Ids that match no column are
/// stored but have no effect on the derived model. Two states are equal
/// when they hide the same columns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisibilityState {
    columns: HashMap<String, bool>,
}

impl VisibilityState {
    /// Every column visible.
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective visibility of a column (default visible).
    pub fn effective_visibility(&self, column_id: &str) -> bool {
        self.columns.get(column_id).copied().unwrap_or(true)
    }

    /// Whether the column has an explicit flag.
    pub fn contains(&self, column_id: &str) -> bool {
        self.columns.contains_key(column_id)
    }

    /// Set a column's visibility.
    ///
    /// Returns true if the effective visibility changed.
    pub fn set_visibility(&mut self, column_id: impl Into<String>, visible: bool) -> bool {
        let column_id = column_id.into();
        let before = self.effective_visibility(&column_id);
        self.columns.insert(column_id, visible);
        before != visible
    }

    /// Flip a column's visibility. Returns the new visibility.
    pub fn toggle(&mut self, column_id: impl Into<String>) -> bool {
        let column_id = column_id.into();
        let visible = !self.effective_visibility(&column_id);
        self.columns.insert(column_id, visible);
        visible
    }

    /// Ids explicitly marked hidden.
    pub fn hidden(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .filter(|(_, visible)| !**visible)
            .map(|(id, _)| id.as_str())
    }

    /// Drop every explicit flag. Returns true if any column was hidden.
    pub fn reset(&mut self) -> bool {
        let changed = self.hidden().next().is_some();
        self.columns.clear();
        changed
    }
}

impl PartialEq for VisibilityState {
    fn eq(&self, other: &Self) -> bool {
        self.hidden().collect::<HashSet<_>>() == other.hidden().collect::<HashSet<_>>()
    }
}

impl Eq for VisibilityState {}

impl<K: Into<String>> FromIterator<(K, bool)> for VisibilityState {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
