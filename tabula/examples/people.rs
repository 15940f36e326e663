//! People Table Example
//!
//! Builds a table over a small dataset, replays a few clicks and prints
//! the resulting render model as plain text.

use std::fs::File;

use simplelog::{Config, LevelFilter, WriteLogger};
use tabula::prelude::*;

#[derive(Clone, Debug)]
struct Person {
    id: u32,
    name: &'static str,
    age: Option<u32>,
    city: &'static str,
}

impl Person {
    fn new(id: u32, name: &'static str, age: Option<u32>, city: &'static str) -> Self {
        Self {
            id,
            name,
            age,
            city,
        }
    }
}

fn people() -> Vec<Person> {
    vec![
        Person::new(1, "Bob", Some(30), "Oslo"),
        Person::new(2, "Amy", Some(30), "Bergen"),
        Person::new(3, "Cid", Some(25), "Oslo"),
        Person::new(4, "Dee", None, "Tromsø"),
    ]
}

fn age_text(value: &Value, _: &Person) -> String {
    match value {
        Value::Null => "-".to_string(),
        value => value.to_string(),
    }
}

fn print_model(title: &str, session: &mut TableSession<Person>) {
    println!("== {} ==", title);
    let model = session.model();
    for header in &model.header_groups[0].headers {
        let arrow = match header.sort.direction {
            Some(SortDirection::Ascending) => " ^",
            Some(SortDirection::Descending) => " v",
            None => "",
        };
        print!("{:<12}", format!("{}{}", header.label, arrow));
    }
    println!();
    for item in &model.items {
        match item {
            RenderItem::Data(row) => {
                for cell in &row.cells {
                    print!("{:<12}", cell.display);
                }
                println!();
            }
            RenderItem::Detail(detail) => println!("  > {}", detail.content),
        }
    }
    println!();
}

fn main() {
    // Set up file logging
    let log_file = File::create("people.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let table = Table::builder(vec![
        Column::new("name", |p: &Person| p.name.into())
            .header("Name")
            .sortable(),
        Column::new("age", |p: &Person| p.age.into())
            .header("Age")
            .numeric()
            .cell(age_text),
        Column::new("city", |p: &Person| p.city.into())
            .header("City")
            .responsive(),
    ])
    .options(
        TableOptions::new()
            .variant(TableVariant::Light)
            .expand_on_row_click(),
    )
    .row_id(|p: &Person, _| format!("person-{}", p.id))
    .expansion(
        ExpansionController::new()
            .can_expand_with(|p: &Person| p.age.is_some())
            .detail_with(|p: &Person| format!("{} lives in {}", p.name, p.city)),
    )
    .build()
    .expect("Failed to build table");

    let mut session = TableSession::new(table, people());
    print_model("Initial", &mut session);

    session.handle(&TableEvent::header_click("age"));
    print_model("Age ascending", &mut session);

    let dispatch = session.handle(&TableEvent::row_click("person-1"));
    println!("Row click actions: {:?}\n", dispatch.actions);
    print_model("Bob expanded", &mut session);

    session.handle(&TableEvent::ToggleVisibility {
        column_id: "city".into(),
    });
    print_model("City hidden", &mut session);

    println!("Row model rebuilt {} times", session.rebuild_count());
}
