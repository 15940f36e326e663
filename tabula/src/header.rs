//! Header model: one flat group of headers for the visible columns.

use crate::column::{ColumnMeta, ColumnSchema};
use crate::sort::{SortDirection, SortState};

/// Sort indicator state of a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortIndicator {
    /// Whether header clicks can sort this column.
    pub can_sort: bool,
    /// Current direction, `None` when unsorted.
    pub direction: Option<SortDirection>,
    /// Priority among the sort keys (0 = primary).
    pub index: Option<usize>,
}

impl SortIndicator {
    /// Whether this column is an active sort key.
    pub fn is_active(&self) -> bool {
        self.direction.is_some()
    }

    /// Whether the column is sorted ascending.
    pub fn is_ascending(&self) -> bool {
        self.direction == Some(SortDirection::Ascending)
    }

    /// Indicator for a column under a sort state.
    ///
    /// When sorting is disabled the indicator is always inactive.
    pub fn for_column(sort: &SortState, column_id: &str, can_sort: bool, enabled: bool) -> Self {
        if !enabled {
            return Self::default();
        }
        Self {
            can_sort,
            direction: sort.direction(column_id),
            index: sort.index_of(column_id),
        }
    }
}

/// A header cell.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderView<'a> {
    /// Header id (the column id).
    pub id: &'a str,
    /// Render key: `table-column-{group}-{header}`.
    pub key: String,
    pub label: &'a str,
    /// Always 1 for flat headers.
    pub col_span: usize,
    pub sort: SortIndicator,
    pub meta: &'a ColumnMeta,
}

/// A row of headers.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderGroup<'a> {
    pub id: String,
    pub headers: Vec<HeaderView<'a>>,
}

impl HeaderGroup<'_> {
    /// Render key for the header row.
    pub fn key(&self) -> String {
        format!("table-header-{}", self.id)
    }
}

/// Build the header groups for the visible columns.
///
/// Flat schemas produce exactly one group with id `"0"`.
pub fn header_groups<'a, T>(
    schema: &'a ColumnSchema<T>,
    visible: &[usize],
    sort: &SortState,
    sorting_enabled: bool,
) -> Vec<HeaderGroup<'a>> {
    let group_id = "0";
    let headers = visible
        .iter()
        .filter_map(|&i| schema.columns().get(i))
        .map(|column| HeaderView {
            id: &column.id,
            key: format!("table-column-{}-{}", group_id, column.id),
            label: &column.header,
            col_span: 1,
            sort: SortIndicator::for_column(
                sort,
                &column.id,
                column.sortable && sorting_enabled,
                sorting_enabled,
            ),
            meta: &column.meta,
        })
        .collect();

    vec![HeaderGroup {
        id: group_id.to_string(),
        headers,
    }]
}
