//! Tests for row expansion and detail entries.

mod common;

use common::{Person, columns, expandable_table, people, table};
use tabula::{EventResult, ExpansionController, ExpansionState, RenderItem, Table, TableState};

/// Compact description of the render sequence.
fn layout(table: &Table<Person>, rows: &[Person], state: &TableState) -> Vec<String> {
    table
        .derive(rows, state)
        .items
        .iter()
        .map(|item| match item {
            RenderItem::Data(row) => row.original.name.to_string(),
            RenderItem::Detail(detail) => format!("[{}]", detail.content),
        })
        .collect()
}

#[test]
fn test_rows_cannot_expand_by_default() {
    let table = table();
    let rows = people();
    let mut state = TableState::new();

    assert_eq!(table.toggle_expand(&rows, &mut state, "0"), EventResult::Ignored);
    assert!(state.expanded().is_empty());

    let model = table.derive(&rows, &state);
    assert!(model.rows().all(|r| !r.can_expand && !r.is_expanded));
    assert_eq!(model.items.len(), 3);
}

#[test]
fn test_expanded_row_is_followed_by_detail() {
    let table = expandable_table();
    let rows = people();
    let mut state = TableState::new();

    assert_eq!(
        table.toggle_expand(&rows, &mut state, "person-1"),
        EventResult::Consumed
    );
    assert_eq!(
        layout(&table, &rows, &state),
        ["Bob", "[details for Bob]", "Amy", "Cid"]
    );

    let model = table.derive(&rows, &state);
    let RenderItem::Detail(detail) = &model.items[1] else {
        panic!("expected a detail entry");
    };
    assert_eq!(detail.row_id, "person-1");
    assert_eq!(detail.col_span, 3);
    assert_eq!(model.items[1].row_id(), "person-1");
}

#[test]
fn test_toggle_twice_collapses() {
    let table = expandable_table();
    let rows = people();
    let mut state = TableState::new();

    table.toggle_expand(&rows, &mut state, "person-2");
    table.toggle_expand(&rows, &mut state, "person-2");
    assert!(state.expanded().is_empty());
    assert_eq!(layout(&table, &rows, &state), ["Bob", "Amy", "Cid"]);
}

#[test]
fn test_row_that_cannot_expand_is_ignored() {
    let table = expandable_table();
    let rows = people();
    let mut state = TableState::new();

    assert_eq!(
        table.toggle_expand(&rows, &mut state, "person-3"),
        EventResult::Ignored
    );
    assert!(state.expanded().is_empty());

    let model = table.derive(&rows, &state);
    let flags: Vec<bool> = model.rows().map(|r| r.can_expand).collect();
    assert_eq!(flags, [true, true, false]);
}

#[test]
fn test_unknown_row_is_ignored() {
    let table = expandable_table();
    let rows = people();
    let mut state = TableState::new();
    assert_eq!(
        table.toggle_expand(&rows, &mut state, "person-99"),
        EventResult::Ignored
    );
}

#[test]
fn test_expansion_follows_row_across_sort() {
    let table = expandable_table();
    let rows = people();
    let mut state = TableState::new();

    table.toggle_expand(&rows, &mut state, "person-1");
    table.toggle_sort(&mut state, "age");

    assert_eq!(
        layout(&table, &rows, &state),
        ["Cid", "Bob", "[details for Bob]", "Amy"]
    );
    let expanded: Vec<&str> = table
        .derive(&rows, &state)
        .rows()
        .filter(|r| r.is_expanded)
        .map(|r| r.original.name)
        .collect();
    assert_eq!(expanded, ["Bob"]);
}

#[test]
fn test_detail_span_follows_visible_columns() {
    let table = expandable_table();
    let rows = people();
    let mut state = TableState::new();
    table.toggle_expand(&rows, &mut state, "person-2");
    table.set_visibility(&mut state, "city", false);

    let model = table.derive(&rows, &state);
    let spans: Vec<usize> = model
        .items
        .iter()
        .filter_map(|item| match item {
            RenderItem::Detail(detail) => Some(detail.col_span),
            RenderItem::Data(_) => None,
        })
        .collect();
    assert_eq!(spans, [2]);
}

#[test]
fn test_no_detail_without_provider() {
    let table = Table::builder(columns())
        .expansion(ExpansionController::new().can_expand_with(|_: &Person| true))
        .build()
        .unwrap();
    let rows = people();
    let mut state = TableState::new();

    table.toggle_expand(&rows, &mut state, "1");
    let model = table.derive(&rows, &state);
    assert_eq!(model.items.len(), 3);
    assert!(model.rows().nth(1).unwrap().is_expanded);
}

#[test]
fn test_is_expanded_hook_overrides_state() {
    let table = Table::builder(columns())
        .expansion(
            ExpansionController::new()
                .can_expand_with(|_: &Person| true)
                .is_expanded_with(|p: &Person| p.city == "Oslo")
                .detail_with(|p: &Person| p.city.to_string()),
        )
        .build()
        .unwrap();
    let rows = people();
    let state = TableState::new().with_expanded({
        let mut expanded = ExpansionState::new();
        expanded.expand("1");
        expanded
    });

    assert_eq!(
        layout(&table, &rows, &state),
        ["Bob", "[Oslo]", "Amy", "Cid", "[Oslo]"]
    );
}

#[test]
fn test_expansion_uses_index_ids_by_default() {
    let table = Table::builder(columns())
        .expansion(
            ExpansionController::new()
                .can_expand_with(|_: &Person| true)
                .detail_with(|p: &Person| p.name.to_lowercase()),
        )
        .build()
        .unwrap();
    let rows = people();
    let mut state = TableState::new();

    table.toggle_expand(&rows, &mut state, "2");
    assert!(state.expanded().contains("2"));
    assert_eq!(layout(&table, &rows, &state), ["Bob", "Amy", "Cid", "[cid]"]);
}

#[test]
fn test_collapse_all() {
    let table = expandable_table();
    let rows = people();
    let mut state = TableState::new();
    table.toggle_expand(&rows, &mut state, "person-1");
    table.toggle_expand(&rows, &mut state, "person-2");
    assert_eq!(state.expanded().len(), 2);

    assert!(state.collapse_all());
    assert!(!state.collapse_all());
    assert_eq!(layout(&table, &rows, &state), ["Bob", "Amy", "Cid"]);
}
