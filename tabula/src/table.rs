//! The table engine: schema, options and hooks, plus derivation.

use std::fmt;
use std::sync::Arc;

use crate::column::{Column, ColumnSchema};
use crate::dispatch::EventResult;
use crate::error::TableError;
use crate::expansion::ExpansionController;
use crate::header::{HeaderGroup, SortIndicator, header_groups};
use crate::options::{TableOptions, TableVariant};
use crate::row_model::{self, RenderItem, RowHooks, RowView};
use crate::sort::{SortDirection, SortMode, SortState};
use crate::state::TableState;

/// A headless table.
///
/// Holds the immutable configuration: the validated column schema, the
/// table options and the per-row hooks. Interaction state lives in a
/// caller-owned [`TableState`] passed to every call.
///
/// # Example
///
/// ```
/// use tabula::{Column, SortDirection, Table};
///
/// struct Person {
///     name: &'static str,
///     age: u32,
/// }
///
/// let rows = vec![
///     Person { name: "Bob", age: 30 },
///     Person { name: "Amy", age: 30 },
///     Person { name: "Cid", age: 25 },
/// ];
/// let table = Table::new(vec![
///     Column::new("name", |p: &Person| p.name.into()).sortable(),
///     Column::new("age", |p: &Person| p.age.into()).numeric(),
/// ])
/// .unwrap();
///
/// let mut state = table.initial_state();
/// table.toggle_sort(&mut state, "age");
/// assert_eq!(table.direction(&state, "age"), Some(SortDirection::Ascending));
///
/// let model = table.derive(&rows, &state);
/// let names: Vec<&str> = model.rows().map(|r| r.original.name).collect();
/// assert_eq!(names, ["Cid", "Bob", "Amy"]);
/// ```
pub struct Table<T> {
    schema: ColumnSchema<T>,
    options: TableOptions,
    hooks: RowHooks<T>,
}

impl<T> fmt::Debug for Table<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("schema", &self.schema)
            .field("options", &self.options)
            .field("hooks", &self.hooks)
            .finish()
    }
}

impl<T> Table<T> {
    /// Create a table with default options.
    pub fn new(columns: Vec<Column<T>>) -> Result<Self, TableError> {
        Self::builder(columns).build()
    }

    /// Start building a table.
    pub fn builder(columns: Vec<Column<T>>) -> TableBuilder<T> {
        TableBuilder {
            columns,
            options: TableOptions::default(),
            hooks: RowHooks::default(),
        }
    }

    /// The column schema.
    pub fn schema(&self) -> &ColumnSchema<T> {
        &self.schema
    }

    /// The table options.
    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// The row hooks.
    pub fn hooks(&self) -> &RowHooks<T> {
        &self.hooks
    }

    /// The expansion hooks.
    pub fn expansion(&self) -> &ExpansionController<T> {
        &self.hooks.expansion
    }

    /// Look up a column by id.
    pub fn column(&self, id: &str) -> Option<&Column<T>> {
        self.schema.get(id)
    }

    /// Whether header clicks can sort by this column.
    pub fn can_sort(&self, column_id: &str) -> bool {
        self.options.sorting && self.column(column_id).is_some_and(|c| c.sortable)
    }

    /// State seeded from the options and the column defaults.
    ///
    /// Initial sort entries naming unknown or unsortable columns are
    /// dropped, as are repeated columns. Columns declared hidden start
    /// hidden unless the options say otherwise.
    pub fn initial_state(&self) -> TableState {
        let entries = self.options.initial_sort.iter().filter(|entry| {
            let keep = self.column(&entry.column_id).is_some_and(|c| c.sortable);
            if !keep {
                log::warn!(
                    "Dropping initial sort on '{}': unknown or unsortable column",
                    entry.column_id
                );
            }
            keep
        });
        let mut visibility = self.options.column_visibility.clone();
        for column in self.schema.columns() {
            if !column.visible && !visibility.contains(&column.id) {
                visibility.set_visibility(column.id.as_str(), false);
            }
        }
        TableState::new()
            .with_sort(SortState::from_entries(entries.cloned()))
            .with_visibility(visibility)
    }

    /// Sort indicator for a column.
    pub fn sort_indicator(&self, state: &TableState, column_id: &str) -> SortIndicator {
        SortIndicator::for_column(
            state.sort(),
            column_id,
            self.can_sort(column_id),
            self.options.sorting,
        )
    }

    /// Whether this column is an active sort key.
    pub fn is_sorted(&self, state: &TableState, column_id: &str) -> bool {
        self.sort_indicator(state, column_id).is_active()
    }

    /// Advance a column's sort using the configured sort mode.
    pub fn toggle_sort(&self, state: &mut TableState, column_id: &str) -> EventResult {
        self.toggle_sort_with(state, column_id, self.options.sort_mode)
    }

    /// Advance a column's sort using an explicit sort mode.
    ///
    /// Ignored for unknown or unsortable columns and when sorting is off.
    pub fn toggle_sort_with(
        &self,
        state: &mut TableState,
        column_id: &str,
        mode: SortMode,
    ) -> EventResult {
        let Some(column) = self.column(column_id) else {
            log::debug!("Sort toggle on unknown column '{}' ignored", column_id);
            return EventResult::Ignored;
        };
        if !self.can_sort(column_id) {
            log::debug!("Sort toggle on unsortable column '{}' ignored", column_id);
            return EventResult::Ignored;
        }

        let direction =
            state.update_sort(|sort| sort.toggle(column_id, column.sort_desc_first, mode));
        log::debug!("Column '{}' sort is now {:?}", column_id, direction);
        EventResult::Consumed
    }

    /// Current sort direction of a column, `None` when unsorted.
    pub fn direction(&self, state: &TableState, column_id: &str) -> Option<SortDirection> {
        self.sort_indicator(state, column_id).direction
    }

    /// Set a column's visibility.
    ///
    /// Unknown ids are recorded but ignored: the revision does not move and
    /// the model is unaffected.
    pub fn set_visibility(
        &self,
        state: &mut TableState,
        column_id: &str,
        visible: bool,
    ) -> EventResult {
        if self.column(column_id).is_none() {
            log::debug!("Visibility set on unknown column '{}' ignored", column_id);
            state.record_visibility(column_id, visible);
            return EventResult::Ignored;
        }
        if state.set_visibility(column_id, visible) {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }

    /// Find a row by its stable id.
    pub fn find_row<'a>(&self, rows: &'a [T], row_id: &str) -> Option<(usize, &'a T)> {
        rows.iter()
            .enumerate()
            .find(|(index, row)| self.hooks.row_id(row, *index) == row_id)
    }

    /// Flip a row's expansion.
    ///
    /// Ignored for unknown rows and rows that cannot expand.
    pub fn toggle_expand(&self, rows: &[T], state: &mut TableState, row_id: &str) -> EventResult {
        match self.flip_expansion(rows, state, row_id) {
            Some(_) => EventResult::Consumed,
            None => EventResult::Ignored,
        }
    }

    /// Flip a row's expansion, returning its requested value.
    pub(crate) fn flip_expansion(
        &self,
        rows: &[T],
        state: &mut TableState,
        row_id: &str,
    ) -> Option<bool> {
        let Some((_, row)) = self.find_row(rows, row_id) else {
            log::debug!("Expand toggle on unknown row '{}' ignored", row_id);
            return None;
        };
        let expansion = &self.hooks.expansion;
        let expanded = state.update_expanded(|set| expansion.toggle(row, row_id, set))?;
        log::debug!("Row '{}' expanded: {}", row_id, expanded);
        Some(expanded)
    }

    /// Row order for the current state (input order when sorting is off).
    pub fn row_order(&self, rows: &[T], state: &TableState) -> Vec<usize> {
        if self.options.sorting {
            row_model::sort_order(rows, &self.schema, state.sort())
        } else {
            (0..rows.len()).collect()
        }
    }

    /// Derive the full render model for the given rows and state.
    pub fn derive<'a>(&'a self, rows: &'a [T], state: &TableState) -> TableModel<'a, T> {
        let order = self.row_order(rows, state);
        let visible = self.schema.visible_indices(state.visibility());
        self.assemble(rows, state, &order, &visible)
    }

    /// Build a model from a precomputed order and visible column set.
    pub(crate) fn assemble<'a>(
        &'a self,
        rows: &'a [T],
        state: &TableState,
        order: &[usize],
        visible: &[usize],
    ) -> TableModel<'a, T> {
        log::trace!(
            "Assembling model: {} rows, {} visible columns",
            order.len(),
            visible.len()
        );
        let views = row_model::materialize(
            rows,
            &self.schema,
            order,
            visible,
            &self.hooks,
            state.expanded(),
        );
        TableModel {
            variant: self.options.variant,
            test_id: self.options.test_id.as_deref(),
            class_name: self.options.class_name.as_deref(),
            header_groups: header_groups(&self.schema, visible, state.sort(), self.options.sorting),
            items: row_model::flatten(views, &self.hooks.expansion),
        }
    }
}

/// Builder for [`Table`].
pub struct TableBuilder<T> {
    columns: Vec<Column<T>>,
    options: TableOptions,
    hooks: RowHooks<T>,
}

impl<T> TableBuilder<T> {
    /// Use the given options.
    pub fn options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    /// Derive row ids from rows instead of input positions.
    pub fn row_id<F>(mut self, f: F) -> Self
    where
        F: Fn(&T, usize) -> String + Send + Sync + 'static,
    {
        self.hooks.row_id = Some(Arc::new(f));
        self
    }

    /// Attach a class name to rows.
    pub fn row_class<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> Option<String> + Send + Sync + 'static,
    {
        self.hooks.row_class = Some(Arc::new(f));
        self
    }

    /// Use the given expansion hooks.
    pub fn expansion(mut self, expansion: ExpansionController<T>) -> Self {
        self.hooks.expansion = expansion;
        self
    }

    /// Validate the schema and build the table.
    pub fn build(self) -> Result<Table<T>, TableError> {
        let schema = ColumnSchema::new(self.columns)?;
        log::debug!(
            "Table built: {} columns, sorting {}",
            schema.len(),
            if self.options.sorting { "on" } else { "off" }
        );
        Ok(Table {
            schema,
            options: self.options,
            hooks: self.hooks,
        })
    }
}

/// The derived render model.
///
/// Recomputed on every pass; borrows the rows and the table.
#[derive(Debug, PartialEq)]
pub struct TableModel<'a, T> {
    pub variant: TableVariant,
    pub test_id: Option<&'a str>,
    pub class_name: Option<&'a str>,
    pub header_groups: Vec<HeaderGroup<'a>>,
    /// Data rows interleaved with detail entries.
    pub items: Vec<RenderItem<'a, T>>,
}

impl<'a, T> TableModel<'a, T> {
    /// Data rows in render order.
    pub fn rows(&self) -> impl Iterator<Item = &RowView<'a, T>> {
        self.items.iter().filter_map(RenderItem::as_row)
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows().count()
    }

    /// Ids of the visible columns, in order.
    pub fn visible_column_ids(&self) -> Vec<&'a str> {
        self.header_groups
            .first()
            .map(|group| group.headers.iter().map(|h| h.id).collect())
            .unwrap_or_default()
    }

    /// Row ids in render order.
    pub fn row_ids(&self) -> Vec<&str> {
        self.rows().map(|r| r.id.as_str()).collect()
    }
}
