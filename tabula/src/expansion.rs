//! Row expansion: tracked state plus the caller's expansion hooks.

use std::collections::HashSet;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::panic_message;

/// Row predicate hook (`can expand`, `is expanded`).
pub type RowPredicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Produces the content of an expanded row's detail entry.
pub type DetailProvider<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Set of expanded row ids.
///
/// Keyed by stable row id, so expansion survives re-sorting and
/// re-deriving the row model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpansionState {
    expanded: HashSet<String>,
}

impl ExpansionState {
    /// No rows expanded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a row expanded. Returns true if it was collapsed.
    pub fn expand(&mut self, row_id: impl Into<String>) -> bool {
        self.expanded.insert(row_id.into())
    }

    /// Mark a row collapsed. Returns true if it was expanded.
    pub fn collapse(&mut self, row_id: &str) -> bool {
        self.expanded.remove(row_id)
    }

    /// Flip a row. Returns true if it is now expanded.
    pub fn toggle(&mut self, row_id: &str) -> bool {
        if self.expanded.remove(row_id) {
            false
        } else {
            self.expanded.insert(row_id.to_string());
            true
        }
    }

    /// Whether a row id is tracked as expanded.
    pub fn contains(&self, row_id: &str) -> bool {
        self.expanded.contains(row_id)
    }

    /// Number of expanded rows.
    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    /// Whether no row is expanded.
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Collapse every row. Returns true if any row was expanded.
    pub fn clear(&mut self) -> bool {
        let changed = !self.expanded.is_empty();
        self.expanded.clear();
        changed
    }

    /// Expanded row ids, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.expanded.iter().map(String::as_str)
    }
}

/// Expansion hooks supplied by the caller.
///
/// Without a `can_expand` predicate no row can expand. When an `is_expanded`
/// hook is set it overrides the tracked [`ExpansionState`] for reads.
pub struct ExpansionController<T> {
    can_expand: Option<RowPredicate<T>>,
    is_expanded: Option<RowPredicate<T>>,
    detail: Option<DetailProvider<T>>,
}

impl<T> Default for ExpansionController<T> {
    fn default() -> Self {
        Self {
            can_expand: None,
            is_expanded: None,
            detail: None,
        }
    }
}

impl<T> ExpansionController<T> {
    /// Controller with no hooks: nothing expands.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `can expand` predicate.
    pub fn can_expand_with<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.can_expand = Some(Arc::new(predicate));
        self
    }

    /// Set the `is expanded` override.
    pub fn is_expanded_with<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.is_expanded = Some(Arc::new(predicate));
        self
    }

    /// Set the expanded content provider.
    pub fn detail_with<F>(mut self, provider: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.detail = Some(Arc::new(provider));
        self
    }

    /// Whether a content provider is configured.
    pub fn has_detail(&self) -> bool {
        self.detail.is_some()
    }

    /// Whether a row may expand (false when no predicate is set).
    pub fn can_expand(&self, row: &T) -> bool {
        match &self.can_expand {
            Some(predicate) => guarded("can_expand", false, || predicate(row)),
            None => false,
        }
    }

    /// Whether a row is expanded.
    pub fn is_expanded(&self, row: &T, row_id: &str, state: &ExpansionState) -> bool {
        match &self.is_expanded {
            Some(predicate) => guarded("is_expanded", false, || predicate(row)),
            None => state.contains(row_id),
        }
    }

    /// Flip a row's expansion if it can expand.
    ///
    /// The new value is the opposite of what [`is_expanded`](Self::is_expanded)
    /// currently reports, and is written to the tracked state. With an
    /// `is_expanded` hook the rendered value stays under the hook's control;
    /// the returned value is the requested one.
    ///
    /// Returns the new expansion, or `None` when the row cannot expand.
    pub fn toggle(&self, row: &T, row_id: &str, state: &mut ExpansionState) -> Option<bool> {
        if !self.can_expand(row) {
            log::debug!("Row '{}' cannot expand, toggle ignored", row_id);
            return None;
        }
        let expand = !self.is_expanded(row, row_id, state);
        if expand {
            state.expand(row_id);
        } else {
            state.collapse(row_id);
        }
        Some(expand)
    }

    /// Detail content for an expanded row, if a provider is configured.
    pub fn detail(&self, row: &T) -> Option<String> {
        let provider = self.detail.as_ref()?;
        Some(guarded("detail", String::new(), || provider(row)))
    }
}

impl<T> Clone for ExpansionController<T> {
    fn clone(&self) -> Self {
        Self {
            can_expand: self.can_expand.clone(),
            is_expanded: self.is_expanded.clone(),
            detail: self.detail.clone(),
        }
    }
}

impl<T> fmt::Debug for ExpansionController<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpansionController")
            .field("can_expand", &self.can_expand.is_some())
            .field("is_expanded", &self.is_expanded.is_some())
            .field("detail", &self.detail.is_some())
            .finish()
    }
}

/// Run a caller hook, falling back when it panics.
fn guarded<R>(hook: &str, fallback: R, f: impl FnOnce() -> R) -> R {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(panic) => {
            log::warn!("Expansion hook '{}' panicked: {}", hook, panic_message(&*panic));
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_toggle() {
        let mut state = ExpansionState::new();
        assert!(state.toggle("a"));
        assert!(state.contains("a"));
        assert!(!state.toggle("a"));
        assert!(state.is_empty());
    }

    #[test]
    fn test_controller_toggle_requires_can_expand() {
        let controller = ExpansionController::new().can_expand_with(|n: &i32| *n > 0);
        let mut state = ExpansionState::new();
        assert_eq!(controller.toggle(&0, "0", &mut state), None);
        assert_eq!(controller.toggle(&1, "1", &mut state), Some(true));
        assert_eq!(controller.toggle(&1, "1", &mut state), Some(false));
        assert!(state.is_empty());
    }

    #[test]
    fn test_controller_toggle_flips_hook_value() {
        let controller = ExpansionController::new()
            .can_expand_with(|_: &i32| true)
            .is_expanded_with(|n: &i32| *n % 2 == 0);
        let mut state = ExpansionState::new();

        assert_eq!(controller.toggle(&2, "2", &mut state), Some(false));
        assert!(!state.contains("2"));
        assert_eq!(controller.toggle(&3, "3", &mut state), Some(true));
        assert!(state.contains("3"));
    }
}
