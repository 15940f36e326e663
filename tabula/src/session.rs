//! A table bound to its rows and state, with rebuild tracking.

use crate::dispatch::{Dispatch, EventResult, TableEvent};
use crate::expansion::ExpansionState;
use crate::sort::SortState;
use crate::state::TableState;
use crate::table::{Table, TableModel};

/// Cached derivation and the inputs it was computed from.
///
/// Visibility is compared through `visible`, so flags on ids outside the
/// schema never invalidate the cache.
#[derive(Debug)]
struct Derived {
    rows_revision: u64,
    sort: SortState,
    expanded: ExpansionState,
    order: Vec<usize>,
    visible: Vec<usize>,
}

/// A table together with its dataset and interaction state.
///
/// The row model (row order and visible columns) is derived lazily on
/// [`model`](Self::model). It is rebuilt once after each change to the
/// state or the rows, and never when nothing changed: a state that was
/// mutated and then restored to what the cache was built from does not
/// trigger a rebuild.
pub struct TableSession<T> {
    table: Table<T>,
    rows: Vec<T>,
    rows_revision: u64,
    state: TableState,
    derived: Option<Derived>,
    rebuilds: usize,
}

impl<T> TableSession<T> {
    /// Bind a table to rows, seeding state from the table options.
    pub fn new(table: Table<T>, rows: Vec<T>) -> Self {
        let state = table.initial_state();
        Self::with_state(table, rows, state)
    }

    /// Bind a table to rows with caller-provided state.
    pub fn with_state(table: Table<T>, rows: Vec<T>, state: TableState) -> Self {
        Self {
            table,
            rows,
            rows_revision: 0,
            state,
            derived: None,
            rebuilds: 0,
        }
    }

    /// The table configuration.
    pub fn table(&self) -> &Table<T> {
        &self.table
    }

    /// The dataset.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Replace the dataset.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.rows_revision = self.rows_revision.wrapping_add(1);
    }

    /// The interaction state.
    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// Mutable access to the interaction state.
    ///
    /// Changes made through it are picked up by the next [`model`](Self::model).
    pub fn state_mut(&mut self) -> &mut TableState {
        &mut self.state
    }

    /// Number of derivation passes run so far.
    pub fn rebuild_count(&self) -> usize {
        self.rebuilds
    }

    /// Whether the next [`model`](Self::model) call will rebuild.
    pub fn is_stale(&self) -> bool {
        !self.derived.as_ref().is_some_and(|d| self.is_current(d))
    }

    /// Toggle sort on a column.
    pub fn toggle_sort(&mut self, column_id: &str) -> EventResult {
        self.table.toggle_sort(&mut self.state, column_id)
    }

    /// Toggle expansion of a row.
    pub fn toggle_expand(&mut self, row_id: &str) -> EventResult {
        self.table.toggle_expand(&self.rows, &mut self.state, row_id)
    }

    /// Show or hide a column.
    pub fn set_visibility(&mut self, column_id: &str, visible: bool) -> EventResult {
        self.table.set_visibility(&mut self.state, column_id, visible)
    }

    /// Handle a raw UI event.
    pub fn handle(&mut self, event: &TableEvent) -> Dispatch {
        self.table.handle(&self.rows, &mut self.state, event)
    }

    /// The current render model, rebuilding the row model if stale.
    pub fn model(&mut self) -> TableModel<'_, T> {
        self.refresh();
        let (order, visible) = match &self.derived {
            Some(d) => (d.order.as_slice(), d.visible.as_slice()),
            None => (&[][..], &[][..]),
        };
        self.table.assemble(&self.rows, &self.state, order, visible)
    }

    fn is_current(&self, derived: &Derived) -> bool {
        derived.rows_revision == self.rows_revision
            && derived.sort == *self.state.sort()
            && derived.expanded == *self.state.expanded()
            && derived.visible == self.visible_indices()
    }

    fn visible_indices(&self) -> Vec<usize> {
        self.table.schema().visible_indices(self.state.visibility())
    }

    fn refresh(&mut self) {
        if !self.is_stale() {
            return;
        }
        let order = self.table.row_order(&self.rows, &self.state);
        let visible = self.visible_indices();
        self.rebuilds += 1;
        log::debug!(
            "Row model rebuilt (pass {}): {} rows, {} visible columns",
            self.rebuilds,
            order.len(),
            visible.len()
        );
        self.derived = Some(Derived {
            rows_revision: self.rows_revision,
            sort: self.state.sort().clone(),
            expanded: self.state.expanded().clone(),
            order,
            visible,
        });
    }
}
