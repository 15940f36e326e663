//! Row model derivation.
//!
//! Turns (rows, schema, sort, visibility) into an ordered sequence of
//! [`RowView`]s exposing only visible cells. Every function here is pure:
//! identical inputs give structurally identical output, and nothing is
//! carried between passes.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::column::{Column, ColumnMeta, ColumnSchema};
use crate::expansion::{ExpansionController, ExpansionState};
use crate::sort::{SortDirection, SortState};
use crate::value::Value;
use crate::visibility::VisibilityState;

/// Derives a stable row id from a row and its input index.
pub type RowIdFn<T> = Arc<dyn Fn(&T, usize) -> String + Send + Sync>;

/// Derives an optional class name for a row.
pub type RowClassFn<T> = Arc<dyn Fn(&T) -> Option<String> + Send + Sync>;

/// Per-row hooks used while materializing row views.
pub struct RowHooks<T> {
    /// Row id hook; input index when unset.
    pub row_id: Option<RowIdFn<T>>,
    /// Row class hook.
    pub row_class: Option<RowClassFn<T>>,
    /// Expansion hooks.
    pub expansion: ExpansionController<T>,
}

impl<T> Default for RowHooks<T> {
    fn default() -> Self {
        Self {
            row_id: None,
            row_class: None,
            expansion: ExpansionController::default(),
        }
    }
}

impl<T> Clone for RowHooks<T> {
    fn clone(&self) -> Self {
        Self {
            row_id: self.row_id.clone(),
            row_class: self.row_class.clone(),
            expansion: self.expansion.clone(),
        }
    }
}

impl<T> fmt::Debug for RowHooks<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowHooks")
            .field("row_id", &self.row_id.is_some())
            .field("row_class", &self.row_class.is_some())
            .field("expansion", &self.expansion)
            .finish()
    }
}

impl<T> RowHooks<T> {
    /// Stable id of the row at `index` in the input.
    pub fn row_id(&self, row: &T, index: usize) -> String {
        match &self.row_id {
            Some(f) => f(row, index),
            None => index.to_string(),
        }
    }

    /// Class name for a row.
    pub fn row_class(&self, row: &T) -> Option<String> {
        self.row_class.as_ref().and_then(|f| f(row))
    }
}

/// A visible cell of a row.
#[derive(Debug, Clone, PartialEq)]
pub struct CellView<'a> {
    /// Render key: `{row_id}_{column_id}`.
    pub id: String,
    pub column_id: &'a str,
    pub value: Value,
    /// Formatted text for the cell.
    pub display: String,
    /// Renderer hints from the column.
    pub hint: &'a ColumnMeta,
}

/// A derived, ephemeral view of one input row.
pub struct RowView<'a, T> {
    pub original: &'a T,
    /// Position of the row in the input slice.
    pub index: usize,
    /// Stable id, usable as a render key across passes.
    pub id: String,
    /// Visible cells in schema order.
    pub cells: Vec<CellView<'a>>,
    pub can_expand: bool,
    pub is_expanded: bool,
    pub class_name: Option<String>,
}

impl<T> RowView<'_, T> {
    /// Render key for the row element.
    pub fn key(&self) -> String {
        format!("table-row-{}", self.id)
    }

    /// Cell for a column id, if visible.
    pub fn cell(&self, column_id: &str) -> Option<&CellView<'_>> {
        self.cells.iter().find(|c| c.column_id == column_id)
    }

    /// Ids of the visible cells, in order.
    pub fn column_ids(&self) -> Vec<&str> {
        self.cells.iter().map(|c| c.column_id).collect()
    }
}

impl<T> Clone for RowView<'_, T> {
    fn clone(&self) -> Self {
        Self {
            original: self.original,
            index: self.index,
            id: self.id.clone(),
            cells: self.cells.clone(),
            can_expand: self.can_expand,
            is_expanded: self.is_expanded,
            class_name: self.class_name.clone(),
        }
    }
}

impl<T> PartialEq for RowView<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.original, other.original)
            && self.index == other.index
            && self.id == other.id
            && self.cells == other.cells
            && self.can_expand == other.can_expand
            && self.is_expanded == other.is_expanded
            && self.class_name == other.class_name
    }
}

impl<T> fmt::Debug for RowView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowView")
            .field("index", &self.index)
            .field("id", &self.id)
            .field("cells", &self.cells)
            .field("can_expand", &self.can_expand)
            .field("is_expanded", &self.is_expanded)
            .field("class_name", &self.class_name)
            .finish()
    }
}

/// Full-width detail entry following an expanded row.
pub struct DetailView<'a, T> {
    pub row_id: String,
    pub original: &'a T,
    /// Number of visible cells of the owning row.
    pub col_span: usize,
    pub content: String,
}

impl<T> PartialEq for DetailView<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.original, other.original)
            && self.row_id == other.row_id
            && self.col_span == other.col_span
            && self.content == other.content
    }
}

impl<T> fmt::Debug for DetailView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetailView")
            .field("row_id", &self.row_id)
            .field("col_span", &self.col_span)
            .field("content", &self.content)
            .finish()
    }
}

/// One entry of the render sequence.
pub enum RenderItem<'a, T> {
    /// A data row.
    Data(RowView<'a, T>),
    /// Detail content of the preceding expanded row.
    Detail(DetailView<'a, T>),
}

impl<T> PartialEq for RenderItem<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RenderItem::Data(a), RenderItem::Data(b)) => a == b,
            (RenderItem::Detail(a), RenderItem::Detail(b)) => a == b,
            _ => false,
        }
    }
}

impl<T> fmt::Debug for RenderItem<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderItem::Data(row) => f.debug_tuple("Data").field(row).finish(),
            RenderItem::Detail(detail) => f.debug_tuple("Detail").field(detail).finish(),
        }
    }
}

impl<'a, T> RenderItem<'a, T> {
    /// The row view, for data entries.
    pub fn as_row(&self) -> Option<&RowView<'a, T>> {
        match self {
            RenderItem::Data(row) => Some(row),
            RenderItem::Detail(_) => None,
        }
    }

    /// The id of the row this entry belongs to.
    pub fn row_id(&self) -> &str {
        match self {
            RenderItem::Data(row) => &row.id,
            RenderItem::Detail(detail) => &detail.row_id,
        }
    }
}

/// Derive row views with default hooks and nothing expanded.
pub fn build<'a, T>(
    rows: &'a [T],
    schema: &'a ColumnSchema<T>,
    sort: &SortState,
    visibility: &VisibilityState,
) -> Vec<RowView<'a, T>> {
    build_with(
        rows,
        schema,
        sort,
        visibility,
        &RowHooks::default(),
        &ExpansionState::default(),
    )
}

/// Derive row views using the given hooks and expansion state.
pub fn build_with<'a, T>(
    rows: &'a [T],
    schema: &'a ColumnSchema<T>,
    sort: &SortState,
    visibility: &VisibilityState,
    hooks: &RowHooks<T>,
    expanded: &ExpansionState,
) -> Vec<RowView<'a, T>> {
    let order = sort_order(rows, schema, sort);
    let visible = schema.visible_indices(visibility);
    materialize(rows, schema, &order, &visible, hooks, expanded)
}

/// Stable order of row indices under a sort state.
///
/// Entries naming unknown or unsortable columns are skipped. Rows whose
/// keys compare equal on every entry keep their input order.
pub fn sort_order<T>(rows: &[T], schema: &ColumnSchema<T>, sort: &SortState) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();

    let keys: Vec<(&Column<T>, SortDirection)> = sort
        .entries()
        .iter()
        .filter_map(|entry| match schema.get(&entry.column_id).filter(|c| c.sortable) {
            Some(column) => Some((column, entry.direction)),
            None => {
                log::trace!(
                    "Skipping sort on unknown or unsortable column '{}'",
                    entry.column_id
                );
                None
            }
        })
        .collect();

    if keys.is_empty() || rows.len() < 2 {
        return order;
    }

    // Read each sort value once instead of once per comparison.
    let values: Vec<Vec<Value>> = rows
        .iter()
        .map(|row| keys.iter().map(|(column, _)| column.value(row)).collect())
        .collect();

    merge_sort_by(&mut order, |&a, &b| {
        for (k, (column, direction)) in keys.iter().enumerate() {
            let ordering = direction.apply(column.compare(&values[a][k], &values[b][k]));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });

    order
}

/// Build row views for a precomputed row order and visible column set.
pub fn materialize<'a, T>(
    rows: &'a [T],
    schema: &'a ColumnSchema<T>,
    order: &[usize],
    visible: &[usize],
    hooks: &RowHooks<T>,
    expanded: &ExpansionState,
) -> Vec<RowView<'a, T>> {
    let columns = schema.columns();
    order
        .iter()
        .filter_map(|&index| rows.get(index).map(|row| (index, row)))
        .map(|(index, row)| {
            let id = hooks.row_id(row, index);
            let cells = visible
                .iter()
                .filter_map(|&c| columns.get(c))
                .map(|column| {
                    let value = column.value(row);
                    CellView {
                        id: format!("{}_{}", id, column.id),
                        column_id: &column.id,
                        display: column.render(&value, row),
                        value,
                        hint: &column.meta,
                    }
                })
                .collect();
            RowView {
                original: row,
                index,
                can_expand: hooks.expansion.can_expand(row),
                is_expanded: hooks.expansion.is_expanded(row, &id, expanded),
                class_name: hooks.row_class(row),
                id,
                cells,
            }
        })
        .collect()
}

/// Interleave detail entries after expanded rows.
///
/// A detail entry is emitted only when the row is expanded and the
/// expansion hooks carry a content provider.
pub fn flatten<'a, T>(
    rows: Vec<RowView<'a, T>>,
    expansion: &ExpansionController<T>,
) -> Vec<RenderItem<'a, T>> {
    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        let detail = if row.is_expanded {
            expansion.detail(row.original).map(|content| DetailView {
                row_id: row.id.clone(),
                original: row.original,
                col_span: row.cells.len(),
                content,
            })
        } else {
            None
        };
        items.push(RenderItem::Data(row));
        if let Some(detail) = detail {
            items.push(RenderItem::Detail(detail));
        }
    }
    items
}

/// Stable bottom-up merge sort.
///
/// Unlike `slice::sort_by`, this tolerates comparators that are not a
/// total order (mixed-kind columns compare equal to everything) without
/// panicking; the result is still deterministic.
fn merge_sort_by<F>(items: &mut Vec<usize>, mut compare: F)
where
    F: FnMut(&usize, &usize) -> Ordering,
{
    let len = items.len();
    let mut buf = items.clone();
    let mut width = 1;

    while width < len {
        let mut start = 0;
        while start < len {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            let (mut i, mut j, mut k) = (start, mid, start);

            while i < mid && j < end {
                // Take from the right run only when strictly smaller.
                if compare(&items[j], &items[i]) == Ordering::Less {
                    buf[k] = items[j];
                    j += 1;
                } else {
                    buf[k] = items[i];
                    i += 1;
                }
                k += 1;
            }
            buf[k..k + (mid - i)].copy_from_slice(&items[i..mid]);
            k += mid - i;
            buf[k..k + (end - j)].copy_from_slice(&items[j..end]);

            start = end;
        }
        std::mem::swap(items, &mut buf);
        width *= 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::SortEntry;

    #[test]
    fn test_merge_sort_is_stable() {
        let keys = [3, 1, 3, 2, 1, 3];
        let mut order: Vec<usize> = (0..keys.len()).collect();
        merge_sort_by(&mut order, |&a, &b| keys[a].cmp(&keys[b]));
        assert_eq!(order, vec![1, 4, 3, 0, 2, 5]);
    }

    #[test]
    fn test_merge_sort_tolerates_non_total_order() {
        // 0 is "equal" to everything, others compare normally.
        let keys = [5, 0, 1, 0, 3, 2, 0, 4];
        let mut order: Vec<usize> = (0..keys.len()).collect();
        merge_sort_by(&mut order, |&a, &b| {
            if keys[a] == 0 || keys[b] == 0 {
                Ordering::Equal
            } else {
                keys[a].cmp(&keys[b])
            }
        });
        let mut seen = order.clone();
        seen.sort_unstable();
        assert_eq!(seen, (0..keys.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_sort_order_skips_unsortable_columns() {
        let rows = [3, 1, 2];
        let schema = ColumnSchema::new(vec![
            Column::new("plain", |n: &i32| Value::from(*n)),
            Column::new("ranked", |n: &i32| Value::from(*n)).numeric(),
        ])
        .unwrap();

        let plain = SortState::from_entries([SortEntry::asc("plain")]);
        assert_eq!(sort_order(&rows, &schema, &plain), vec![0, 1, 2]);

        let ranked = SortState::from_entries([SortEntry::asc("plain"), SortEntry::asc("ranked")]);
        assert_eq!(sort_order(&rows, &schema, &ranked), vec![1, 2, 0]);
    }

    #[test]
    fn test_merge_sort_small_inputs() {
        let mut empty: Vec<usize> = Vec::new();
        merge_sort_by(&mut empty, |a, b| a.cmp(b));
        assert!(empty.is_empty());

        let mut one = vec![0];
        merge_sort_by(&mut one, |a, b| a.cmp(b));
        assert_eq!(one, vec![0]);
    }
}
