//! Shared fixtures for tabula integration tests.

#![allow(dead_code)]

use tabula::{Column, ExpansionController, Table, TableOptions, TableState};

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id: u32,
    pub name: &'static str,
    pub age: Option<u32>,
    pub city: &'static str,
}

impl Person {
    pub fn new(id: u32, name: &'static str, age: u32, city: &'static str) -> Self {
        Self {
            id,
            name,
            age: Some(age),
            city,
        }
    }
}

/// Bob 30, Amy 30, Cid 25.
pub fn people() -> Vec<Person> {
    vec![
        Person::new(1, "Bob", 30, "Oslo"),
        Person::new(2, "Amy", 30, "Bergen"),
        Person::new(3, "Cid", 25, "Oslo"),
    ]
}

pub fn more_people() -> Vec<Person> {
    vec![
        Person::new(1, "Bob", 30, "Oslo"),
        Person::new(2, "amy", 41, "Bergen"),
        Person::new(3, "Cid", 25, "Oslo"),
        Person::new(4, "Dee", 30, "Tromsø"),
        Person::new(5, "Eve", 25, "Bergen"),
        Person::new(6, "Ada", 41, "Oslo"),
    ]
}

pub fn columns() -> Vec<Column<Person>> {
    vec![
        Column::new("name", |p: &Person| p.name.into()).sortable(),
        Column::new("age", |p: &Person| p.age.into()).numeric(),
        Column::new("city", |p: &Person| p.city.into()),
    ]
}

pub fn table() -> Table<Person> {
    Table::new(columns()).unwrap()
}

pub fn table_with(options: TableOptions) -> Table<Person> {
    Table::builder(columns()).options(options).build().unwrap()
}

/// Table keyed by person id where people over 26 can expand.
pub fn expandable_table() -> Table<Person> {
    Table::builder(columns())
        .row_id(|p: &Person, _| format!("person-{}", p.id))
        .expansion(
            ExpansionController::new()
                .can_expand_with(|p: &Person| p.age.is_some_and(|a| a > 26))
                .detail_with(|p: &Person| format!("details for {}", p.name)),
        )
        .build()
        .unwrap()
}

/// Names in the order the model renders them.
pub fn names(table: &Table<Person>, rows: &[Person], state: &TableState) -> Vec<&'static str> {
    table
        .derive(rows, state)
        .rows()
        .map(|r| r.original.name)
        .collect()
}
