//! Tests for session rebuild tracking.

mod common;

use common::{Person, expandable_table, people, table, table_with};
use tabula::{
    EventResult, SortEntry, SortState, TableEvent, TableOptions, TableSession, TableState,
};

fn session() -> TableSession<Person> {
    TableSession::new(table(), people())
}

fn names(session: &mut TableSession<Person>) -> Vec<&'static str> {
    session.model().rows().map(|r| r.original.name).collect()
}

#[test]
fn test_model_builds_once_until_changed() {
    let mut session = session();
    assert!(session.is_stale());
    assert_eq!(session.rebuild_count(), 0);

    session.model();
    session.model();
    assert_eq!(session.rebuild_count(), 1);
    assert!(!session.is_stale());
}

#[test]
fn test_each_change_rebuilds_once() {
    let mut session = session();
    session.model();

    session.toggle_sort("age");
    assert_eq!(names(&mut session), ["Cid", "Bob", "Amy"]);
    session.model();
    assert_eq!(session.rebuild_count(), 2);

    session.set_visibility("city", false);
    assert_eq!(session.model().visible_column_ids(), ["name", "age"]);
    assert_eq!(session.rebuild_count(), 3);
}

#[test]
fn test_ignored_changes_do_not_rebuild() {
    let mut session = session();
    session.model();

    session.toggle_sort("city");
    session.toggle_sort("ghost");
    session.set_visibility("age", true);
    session.toggle_expand("0");
    assert!(!session.is_stale());
    session.model();
    assert_eq!(session.rebuild_count(), 1);
}

#[test]
fn test_unknown_column_visibility_does_not_rebuild() {
    let mut session = session();
    session.model();

    let dispatch = session.handle(&TableEvent::SetVisibility {
        column_id: "ghost".into(),
        visible: false,
    });
    assert_eq!(dispatch.result, EventResult::Ignored);
    assert!(dispatch.actions.is_empty());

    session.state_mut().set_visibility("phantom", false);
    assert!(!session.is_stale());
    session.model();
    assert_eq!(session.rebuild_count(), 1);
}

#[test]
fn test_several_changes_between_reads_rebuild_once() {
    let mut session = session();
    session.model();

    session.toggle_sort("age");
    session.toggle_sort("age");
    session.set_visibility("name", false);
    session.model();
    assert_eq!(session.rebuild_count(), 2);
}

#[test]
fn test_restored_state_does_not_rebuild() {
    let mut session = session();
    session.model();

    for _ in 0..3 {
        session.toggle_sort("age");
    }
    session.set_visibility("city", false);
    session.set_visibility("city", true);

    assert!(!session.is_stale());
    session.model();
    assert_eq!(session.rebuild_count(), 1);
}

#[test]
fn test_set_rows_rebuilds() {
    let mut session = session();
    session.toggle_sort("age");
    session.model();

    let mut rows = people();
    rows.push(Person::new(4, "Ann", 20, "Oslo"));
    session.set_rows(rows);
    assert!(session.is_stale());
    assert_eq!(names(&mut session), ["Ann", "Cid", "Bob", "Amy"]);
    assert_eq!(session.rebuild_count(), 2);
}

#[test]
fn test_state_replaced_wholesale_rebuilds() {
    let mut session = session();
    session.model();

    let sort = SortState::from_entries([SortEntry::desc("name")]);
    *session.state_mut() = TableState::new().with_sort(sort);
    assert_eq!(names(&mut session), ["Cid", "Bob", "Amy"]);
    assert_eq!(session.rebuild_count(), 2);
}

#[test]
fn test_session_seeds_initial_state() {
    let options = TableOptions::new().initial_sort([SortEntry::asc("age")]);
    let mut session = TableSession::new(table_with(options), people());
    assert_eq!(names(&mut session), ["Cid", "Bob", "Amy"]);
}

#[test]
fn test_session_handles_events() {
    let mut session = TableSession::new(expandable_table(), people());
    session.model();

    let dispatch = session.handle(&TableEvent::ToggleExpand {
        row_id: "person-2".into(),
    });
    assert!(dispatch.is_handled());
    session.handle(&TableEvent::header_click("age"));

    let ids: Vec<String> = session
        .model()
        .items
        .iter()
        .map(|item| item.row_id().to_string())
        .collect();
    assert_eq!(ids, ["person-3", "person-1", "person-2", "person-2"]);
    assert_eq!(session.rebuild_count(), 2);
}

#[test]
fn test_model_matches_direct_derivation() {
    let mut session = session();
    session.toggle_sort("name");
    session.set_visibility("age", false);

    let table = table();
    let rows = people();
    let direct = table.derive(&rows, session.state());
    let cached = session.model();
    assert_eq!(cached.visible_column_ids(), direct.visible_column_ids());
    assert_eq!(cached.row_ids(), direct.row_ids());
    assert_eq!(cached.items.len(), direct.items.len());
}
