//! Column definitions and the validated column schema.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{TableError, panic_message};
use crate::value::{Value, compare_numeric, compare_values};
use crate::visibility::VisibilityState;

/// Reads a cell value from a row.
pub type Accessor<T> = Arc<dyn Fn(&T) -> Value + Send + Sync>;

/// Orders two cell values of the same column.
pub type Comparator = Arc<dyn Fn(&Value, &Value) -> Ordering + Send + Sync>;

/// Turns a cell value into display text.
pub type CellFormatter<T> = Arc<dyn Fn(&Value, &T) -> String + Send + Sync>;

/// Styling and layout hints carried to the renderer untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnMeta {
    /// Cells of this column should adapt to narrow layouts.
    pub responsive: bool,
    /// Extra class for the header cell.
    pub th_class_name: Option<String>,
    /// Extra class for body cells.
    pub td_class_name: Option<String>,
}

/// Column configuration.
///
/// A column reads a [`Value`] out of each row through its accessor. Sorting
/// uses the column comparator when one is set and [`compare_values`]
/// otherwise.
///
/// # Examples
///
/// ```
/// use tabula::Column;
///
/// struct Person {
///     name: String,
///     age: u32,
/// }
///
/// let columns: Vec<Column<Person>> = vec![
///     Column::new("name", |p: &Person| p.name.as_str().into()).sortable(),
///     Column::new("age", |p: &Person| p.age.into()).header("Age").numeric(),
///     Column::display("actions"),
/// ];
/// assert_eq!(columns[1].header, "Age");
/// ```
pub struct Column<T> {
    /// Unique identifier for this column.
    pub id: String,
    /// Header label.
    pub header: String,
    /// Whether the column starts out visible.
    pub visible: bool,
    /// Whether header clicks may sort by this column.
    pub sortable: bool,
    /// Start the sort cycle with descending instead of ascending.
    pub sort_desc_first: bool,
    /// Renderer hints.
    pub meta: ColumnMeta,
    accessor: Accessor<T>,
    comparator: Option<Comparator>,
    formatter: Option<CellFormatter<T>>,
}

impl<T> Column<T> {
    /// Create a column with the given id and accessor.
    ///
    /// The header label defaults to the id.
    pub fn new<F>(id: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        let id = id.into();
        Self {
            header: id.clone(),
            id,
            visible: true,
            sortable: false,
            sort_desc_first: false,
            meta: ColumnMeta::default(),
            accessor: Arc::new(accessor),
            comparator: None,
            formatter: None,
        }
    }

    /// Create a column that reads no data (action buttons, expanders).
    ///
    /// Every cell of a display column holds [`Value::Null`].
    pub fn display(id: impl Into<String>) -> Self
    where
        T: 'static,
    {
        Self::new(id, |_: &T| Value::Null)
    }

    /// Set the header label.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Start the column hidden.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Make the column sortable with an explicit comparator.
    pub fn comparator<F>(mut self, comparator: F) -> Self
    where
        F: Fn(&Value, &Value) -> Ordering + Send + Sync + 'static,
    {
        self.sortable = true;
        self.comparator = Some(Arc::new(comparator));
        self
    }

    /// Make the column sortable with a numeric comparator.
    pub fn numeric(self) -> Self {
        self.comparator(compare_numeric)
    }

    /// Cycle descending first when this column is toggled.
    pub fn sort_desc_first(mut self) -> Self {
        self.sort_desc_first = true;
        self
    }

    /// Set the cell formatter.
    pub fn cell<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&Value, &T) -> String + Send + Sync + 'static,
    {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// Mark cells as responsive.
    pub fn responsive(mut self) -> Self {
        self.meta.responsive = true;
        self
    }

    /// Set the header cell class.
    pub fn th_class(mut self, class: impl Into<String>) -> Self {
        self.meta.th_class_name = Some(class.into());
        self
    }

    /// Set the body cell class.
    pub fn td_class(mut self, class: impl Into<String>) -> Self {
        self.meta.td_class_name = Some(class.into());
        self
    }

    /// Replace all renderer hints at once.
    pub fn meta(mut self, meta: ColumnMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Whether a custom comparator is configured.
    pub fn has_comparator(&self) -> bool {
        self.comparator.is_some()
    }

    /// Read this column's value from a row.
    ///
    /// A panicking accessor yields [`Value::Null`].
    pub fn value(&self, row: &T) -> Value {
        match catch_unwind(AssertUnwindSafe(|| (self.accessor)(row))) {
            Ok(value) => value,
            Err(panic) => {
                log::warn!(
                    "Accessor for column '{}' panicked: {}",
                    self.id,
                    panic_message(&*panic)
                );
                Value::Null
            }
        }
    }

    /// Compare two values of this column in ascending order.
    ///
    /// A panicking comparator treats the pair as equal.
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        let Some(comparator) = &self.comparator else {
            return compare_values(a, b);
        };
        match catch_unwind(AssertUnwindSafe(|| comparator(a, b))) {
            Ok(ordering) => ordering,
            Err(panic) => {
                log::warn!(
                    "Comparator for column '{}' panicked: {}",
                    self.id,
                    panic_message(&*panic)
                );
                Ordering::Equal
            }
        }
    }

    /// Display text for a cell of this column.
    ///
    /// Without a formatter the value's `Display` form is used. A panicking
    /// formatter renders as an empty string.
    pub fn render(&self, value: &Value, row: &T) -> String {
        let Some(formatter) = &self.formatter else {
            return value.to_string();
        };
        match catch_unwind(AssertUnwindSafe(|| formatter(value, row))) {
            Ok(text) => text,
            Err(panic) => {
                log::warn!(
                    "Cell formatter for column '{}' panicked: {}",
                    self.id,
                    panic_message(&*panic)
                );
                String::new()
            }
        }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            visible: self.visible,
            sortable: self.sortable,
            sort_desc_first: self.sort_desc_first,
            meta: self.meta.clone(),
            accessor: Arc::clone(&self.accessor),
            comparator: self.comparator.clone(),
            formatter: self.formatter.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("visible", &self.visible)
            .field("sortable", &self.sortable)
            .field("sort_desc_first", &self.sort_desc_first)
            .field("has_comparator", &self.comparator.is_some())
            .field("has_formatter", &self.formatter.is_some())
            .field("meta", &self.meta)
            .finish()
    }
}

/// An ordered, validated set of columns.
///
/// Column ids are unique and non-empty. The schema never changes after
/// construction.
pub struct ColumnSchema<T> {
    columns: Vec<Column<T>>,
}

impl<T> ColumnSchema<T> {
    /// Validate and wrap the given columns.
    pub fn new(columns: Vec<Column<T>>) -> Result<Self, TableError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for (index, column) in columns.iter().enumerate() {
            if column.id.is_empty() {
                return Err(TableError::EmptyColumnId { index });
            }
            if !seen.insert(column.id.as_str()) {
                return Err(TableError::DuplicateColumn {
                    id: column.id.clone(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// All columns in declaration order.
    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Look up a column by id.
    pub fn get(&self, id: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Position of a column by id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Indices of the columns that are currently visible, in schema order.
    pub fn visible_indices(&self, visibility: &VisibilityState) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| visibility.effective_visibility(&c.id))
            .map(|(i, _)| i)
            .collect()
    }
}

impl<T> Clone for ColumnSchema<T> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
        }
    }
}

impl<T> fmt::Debug for ColumnSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.columns).finish()
    }
}
