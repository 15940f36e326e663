//! Tests for options, schema validation and state serialization.

mod common;

use common::{Person, columns, people, table, table_with};
use tabula::{
    Column, SortEntry, SortMode, Table, TableError, TableOptions, TableState, TableVariant,
};

#[test]
fn test_default_options() {
    let options = TableOptions::default();
    assert_eq!(options.variant, TableVariant::Default);
    assert!(options.sorting);
    assert_eq!(options.sort_mode, SortMode::Single);
    assert!(options.initial_sort.is_empty());
    assert!(!options.expand_on_row_click);
    assert_eq!(options, TableOptions::from_json("{}").unwrap());
}

#[test]
fn test_options_from_json() {
    let options = TableOptions::from_json(
        r#"{
            "variant": "light",
            "sorting": false,
            "sortMode": "multi",
            "initialSort": [{ "id": "age", "desc": true }, { "id": "name" }],
            "columnVisibility": { "city": false },
            "expandOnRowClick": true,
            "testId": "people-table",
            "className": "table--compact"
        }"#,
    )
    .unwrap();

    assert_eq!(options.variant, TableVariant::Light);
    assert!(!options.sorting);
    assert_eq!(options.sort_mode, SortMode::Multi);
    assert_eq!(
        options.initial_sort,
        [SortEntry::desc("age"), SortEntry::asc("name")]
    );
    assert!(!options.column_visibility.effective_visibility("city"));
    assert!(options.expand_on_row_click);
    assert_eq!(options.test_id.as_deref(), Some("people-table"));
    assert_eq!(options.class_name.as_deref(), Some("table--compact"));
}

#[test]
fn test_initial_sort_by_alias() {
    let options = TableOptions::from_json(r#"{ "initialSortBy": [{ "id": "age" }] }"#).unwrap();
    assert_eq!(options.initial_sort, [SortEntry::asc("age")]);
}

#[test]
fn test_invalid_options() {
    let result = TableOptions::from_json(r#"{ "variant": "neon" }"#);
    assert!(matches!(result, Err(TableError::InvalidOptions(_))));

    let result = TableOptions::from_json("not json");
    assert!(matches!(result, Err(TableError::InvalidOptions(_))));
}

#[test]
fn test_model_carries_presentation_options() {
    let table = table_with(
        TableOptions::new()
            .variant(TableVariant::InBlock)
            .test_id("people")
            .class_name("wide"),
    );
    let rows = people();
    let model = table.derive(&rows, &TableState::new());
    assert_eq!(model.variant, TableVariant::InBlock);
    assert_eq!(model.test_id, Some("people"));
    assert_eq!(model.class_name, Some("wide"));
}

#[test]
fn test_variant_does_not_affect_rows() {
    let rows = people();
    let state = TableState::new();
    let plain = table();
    let white = table_with(TableOptions::new().variant(TableVariant::White));
    assert_eq!(
        plain.derive(&rows, &state).row_ids(),
        white.derive(&rows, &state).row_ids()
    );
}

#[test]
fn test_duplicate_column_id_is_rejected() {
    let mut cols = columns();
    cols.push(Column::new("age", |p: &Person| p.id.into()));
    let err = Table::new(cols).unwrap_err();
    assert!(matches!(err, TableError::DuplicateColumn { ref id } if id == "age"));
    assert_eq!(err.to_string(), "duplicate column id 'age'");
}

#[test]
fn test_empty_column_id_is_rejected() {
    let cols = vec![
        Column::new("name", |p: &Person| p.name.into()),
        Column::new("", |p: &Person| p.id.into()),
    ];
    let err = Table::new(cols).unwrap_err();
    assert!(matches!(err, TableError::EmptyColumnId { index: 1 }));
}

#[test]
fn test_state_serialization() {
    let table = table();
    let mut state = TableState::new();
    table.toggle_sort(&mut state, "age");
    table.toggle_sort(&mut state, "age");

    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "sorting": [{ "id": "age", "desc": true }],
            "columnVisibility": {},
            "expanded": [],
        })
    );

    let restored: TableState = serde_json::from_value(json).unwrap();
    assert_eq!(restored, state);
}
