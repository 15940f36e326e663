//! Interaction dispatch: raw UI events to state transitions.
//!
//! The UI layer reports what happened (a header was clicked, a row was
//! clicked) and the table decides what changes. Each handled event yields
//! the actions the host may want to react to, in the order they happened.

use crate::sort::{SortDirection, SortMode};
use crate::state::TableState;
use crate::table::Table;

/// A raw interaction reported by the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// A header was clicked. `multi` is the add-to-sort modifier (shift).
    HeaderClick { column_id: String, multi: bool },
    /// A data row was clicked.
    RowClick { row_id: String },
    /// The row's expander control was activated.
    ToggleExpand { row_id: String },
    /// A column was shown or hidden explicitly.
    SetVisibility { column_id: String, visible: bool },
    /// A column's visibility was flipped.
    ToggleVisibility { column_id: String },
}

impl TableEvent {
    /// Plain header click.
    pub fn header_click(column_id: impl Into<String>) -> Self {
        TableEvent::HeaderClick {
            column_id: column_id.into(),
            multi: false,
        }
    }

    /// Row click.
    pub fn row_click(row_id: impl Into<String>) -> Self {
        TableEvent::RowClick {
            row_id: row_id.into(),
        }
    }
}

/// What a handled event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    /// A column's sort changed; `None` means it is no longer sorted.
    Sort {
        column_id: String,
        direction: Option<SortDirection>,
    },
    /// A row was activated (clicked).
    Activate { row_id: String },
    /// A row was expanded.
    Expand { row_id: String },
    /// A row was collapsed.
    Collapse { row_id: String },
    /// A column was shown or hidden.
    VisibilityChange { column_id: String, visible: bool },
}

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored (no-op).
    Ignored,
    /// Event was consumed.
    Consumed,
}

impl EventResult {
    /// Check if the event was handled.
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}

/// Outcome of [`Table::handle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub result: EventResult,
    pub actions: Vec<TableAction>,
}

impl Dispatch {
    fn ignored() -> Self {
        Self {
            result: EventResult::Ignored,
            actions: Vec::new(),
        }
    }

    fn consumed(actions: Vec<TableAction>) -> Self {
        Self {
            result: EventResult::Consumed,
            actions,
        }
    }

    /// Check if the event was handled.
    pub fn is_handled(&self) -> bool {
        self.result.is_handled()
    }
}

impl<T> Table<T> {
    /// Handle a raw UI event, mutating `state` as needed.
    pub fn handle(&self, rows: &[T], state: &mut TableState, event: &TableEvent) -> Dispatch {
        log::trace!("Handling {:?}", event);
        match event {
            TableEvent::HeaderClick { column_id, multi } => {
                self.on_header_click(state, column_id, *multi)
            }
            TableEvent::RowClick { row_id } => self.on_row_click(rows, state, row_id),
            TableEvent::ToggleExpand { row_id } => self.on_toggle_expand(rows, state, row_id),
            TableEvent::SetVisibility { column_id, visible } => {
                self.on_set_visibility(state, column_id, *visible)
            }
            TableEvent::ToggleVisibility { column_id } => {
                let visible = !state.visibility().effective_visibility(column_id);
                self.on_set_visibility(state, column_id, visible)
            }
        }
    }

    /// Handle header click for sorting.
    fn on_header_click(&self, state: &mut TableState, column_id: &str, multi: bool) -> Dispatch {
        let mode = if multi {
            SortMode::Multi
        } else {
            self.options().sort_mode
        };
        if !self.toggle_sort_with(state, column_id, mode).is_handled() {
            return Dispatch::ignored();
        }
        Dispatch::consumed(vec![TableAction::Sort {
            column_id: column_id.to_string(),
            direction: state.sort().direction(column_id),
        }])
    }

    /// Handle click on a data row.
    fn on_row_click(&self, rows: &[T], state: &mut TableState, row_id: &str) -> Dispatch {
        if self.find_row(rows, row_id).is_none() {
            return Dispatch::ignored();
        }
        let mut actions = vec![TableAction::Activate {
            row_id: row_id.to_string(),
        }];
        if self.options().expand_on_row_click {
            actions.extend(self.on_toggle_expand(rows, state, row_id).actions);
        }
        Dispatch::consumed(actions)
    }

    fn on_toggle_expand(&self, rows: &[T], state: &mut TableState, row_id: &str) -> Dispatch {
        let Some(expanded) = self.flip_expansion(rows, state, row_id) else {
            return Dispatch::ignored();
        };
        let row_id = row_id.to_string();
        let action = if expanded {
            TableAction::Expand { row_id }
        } else {
            TableAction::Collapse { row_id }
        };
        Dispatch::consumed(vec![action])
    }

    fn on_set_visibility(
        &self,
        state: &mut TableState,
        column_id: &str,
        visible: bool,
    ) -> Dispatch {
        if !self.set_visibility(state, column_id, visible).is_handled() {
            return Dispatch::ignored();
        }
        Dispatch::consumed(vec![TableAction::VisibilityChange {
            column_id: column_id.to_string(),
            visible,
        }])
    }
}
