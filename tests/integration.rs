//! Integration tests for the record store.

use rowdb::{ColumnMeta, ColumnQuery, ColumnType, EventKind, Loader, Result, Store, StoreEvent};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Toy {
    name: String,
    price: u32,
}

fn toy(name: &str, price: u32) -> Toy {
    Toy {
        name: name.into(),
        price,
    }
}

fn toy_store() -> Store<Toy> {
    Store::with_rows(
        "toys",
        vec![
            toy("Toy Bear", 1000),
            toy("Toy Dog", 2000),
            toy("Toy Cat", 3000),
            toy("Doll Monkey", 4000),
            toy("Doll Wolf", 5000),
        ],
    )
}

// --- Realistic Workflow Tests ---

#[test]
fn test_catalog_cleanup_workflow() {
    // A scraped catalog arrives with duplicated entries; keep the cheapest
    // of each duplicate group, then report on what is left.
    let mut store = Store::with_rows(
        "catalog",
        vec![
            toy("Bear", 1200),
            toy("Bear", 1000),
            toy("Dog", 2000),
            toy("Cat", 3000),
            toy("Cat", 2800),
        ],
    );

    let name = ColumnQuery::new("name").unwrap();
    let price = ColumnQuery::new("price").unwrap();

    let duplicates = store.analytics().duplicates(Some(&name));
    assert_eq!(duplicates.len(), 4);

    let result = store.remove_duplicates_by(
        |group| {
            let cheapest = group.iter().min_by_key(|toy| toy.price).unwrap();
            vec![cheapest.clone()]
        },
        &name,
        true,
    );

    assert!(result.success);
    assert_eq!(
        store.raw(),
        &[toy("Bear", 1000), toy("Dog", 2000), toy("Cat", 2800)]
    );
    assert_eq!(store.analytics().sum(Some(&price)), 5800.0);
}

#[test]
fn test_pricing_report_workflow() {
    let store = toy_store();
    let price = ColumnQuery::new("price").unwrap();
    let name = ColumnQuery::new("name").unwrap();

    let analytics = store.analytics();
    assert_eq!(analytics.min(Some(&price)), 1000.0);
    assert_eq!(analytics.max(Some(&price)), 5000.0);
    assert_eq!(analytics.median(Some(&price)), 3000.0);
    assert_eq!(analytics.average(Some(&price)), 3000.0);
    assert_eq!(
        analytics.count(
            |value| value.as_str().is_some_and(|s| s.starts_with("Toy")),
            Some(&name),
        ),
        3
    );
}

#[test]
fn test_merge_two_inventories() {
    let mut main = toy_store();
    let incoming = Store::with_rows(
        "incoming",
        vec![
            toy("Toy Bear", 1001),
            toy("Toy Dog", 2002),
            toy("Toy Cat", 3003),
            toy("Doll Monkey", 4004),
            toy("Doll Wolf", 5005),
            toy("Doll Tiger", 6006),
        ],
    );

    // Unconditional merge keeps everything.
    let result = main.merge(&incoming, |_, _| true, false);
    assert_eq!(result.rows().len(), 11);

    // The committed merge only takes names we don't know yet.
    let result = main.merge(
        &incoming,
        |rows, candidate| !rows.iter().any(|row| row.name == candidate.name),
        true,
    );
    assert!(result.success);
    assert_eq!(main.len(), 6);
    assert_eq!(main.raw().last().unwrap().name, "Doll Tiger");
}

#[test]
fn test_event_audit_trail() {
    // Listeners observe every mutation in order, synchronously.
    let mut store: Store<i32> = Store::new("audited");
    let trail = Rc::new(RefCell::new(Vec::new()));

    for kind in [
        EventKind::Insert,
        EventKind::Remove,
        EventKind::Sort,
        EventKind::RemoveDuplicates,
    ] {
        let trail = Rc::clone(&trail);
        store.when(kind, move |event: &StoreEvent<i32>| {
            trail.borrow_mut().push(event.kind().as_str());
        });
    }

    store.insert_many(vec![3, 1, 3, 2]);
    store.sort(|a, b| a.cmp(b), true);
    store.remove_duplicates(true);
    store.remove(|row| *row > 2, true);

    assert_eq!(
        *trail.borrow(),
        vec!["insert", "sort", "remove_duplicates", "remove"]
    );
    assert_eq!(store.raw(), &[1, 2]);
}

#[test]
fn test_chain_builds_and_commits_once() {
    let mut store: Store<i32> = Store::new("chained");
    let chain_events = Rc::new(RefCell::new(0));
    let insert_events = Rc::new(RefCell::new(0));

    let counter = Rc::clone(&chain_events);
    store.when(EventKind::Chain, move |_| *counter.borrow_mut() += 1);
    let counter = Rc::clone(&insert_events);
    store.when(EventKind::Insert, move |_| *counter.borrow_mut() += 1);

    let result = store.chain(
        vec![
            Box::new(|step: &mut Store<i32>| step.insert_many(vec![5, 3, 1, 3])),
            Box::new(|step: &mut Store<i32>| step.remove_duplicates(true)),
            Box::new(|step: &mut Store<i32>| step.sort(|a, b| a.cmp(b), true)),
        ],
        true,
    );

    assert!(result.success);
    assert_eq!(store.raw(), &[1, 3, 5]);

    // Intermediate steps ran on scratch stores: the real store fired one
    // chain event and nothing else.
    assert_eq!(*chain_events.borrow(), 1);
    assert_eq!(*insert_events.borrow(), 0);
}

#[test]
fn test_chunked_processing() {
    let store = Store::with_rows("batch", (1..=10).collect::<Vec<i32>>());

    let chunks = store.chunks(4);
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[2].raw(), &[9, 10]);

    // Chunks are independent stores with their own analytics.
    assert_eq!(chunks[0].analytics().sum(None), 10.0);

    let rejoined: Vec<i32> = chunks
        .iter()
        .flat_map(|chunk| chunk.raw().iter().copied())
        .collect();
    assert_eq!(rejoined, store.raw());
}

#[test]
fn test_paginated_browsing() {
    let store = Store::with_rows("pages", (1..=120).collect::<Vec<i32>>());

    let first = store.list_paginated(1, rowdb::DEFAULT_PER_PAGE);
    assert_eq!(first.rows().len(), 50);
    assert_eq!(first.rows()[0], 1);

    let third = store.list_paginated(3, rowdb::DEFAULT_PER_PAGE);
    assert_eq!(third.rows().len(), 20);

    let beyond = store.list_paginated(4, rowdb::DEFAULT_PER_PAGE);
    assert!(beyond.success);
    assert!(beyond.rows().is_empty());
}

// --- Loader Pass-Through ---

/// Line-oriented JSON test double for the serialization contract.
struct JsonLines;

impl<T: Serialize + for<'de> Deserialize<'de>> Loader<T> for JsonLines {
    fn load(&self, input: &str) -> Result<Vec<T>> {
        input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line)
                    .map_err(|e| rowdb::StoreError::Deserialization(e.to_string()))
            })
            .collect()
    }

    fn save(&self, rows: &[T]) -> Result<String> {
        let lines: Result<Vec<String>> = rows
            .iter()
            .map(|row| {
                serde_json::to_string(row)
                    .map_err(|e| rowdb::StoreError::Serialization(e.to_string()))
            })
            .collect();
        Ok(lines?.join("\n"))
    }
}

#[test]
fn test_load_inserts_adapter_rows() {
    let mut store: Store<Toy> = Store::new("loaded");

    let input = "{\"name\":\"Toy Bear\",\"price\":1000}\n{\"name\":\"Toy Dog\",\"price\":2000}";
    let result = store.load(&JsonLines, input);

    assert!(result.success);
    assert_eq!(store.raw(), &[toy("Toy Bear", 1000), toy("Toy Dog", 2000)]);
}

#[test]
fn test_save_serializes_current_rows() {
    let store = Store::with_rows("saved", vec![toy("Toy Bear", 1000)]);

    let output = store.save(&JsonLines).unwrap();
    assert_eq!(output, "{\"name\":\"Toy Bear\",\"price\":1000}");
}

#[test]
fn test_load_save_roundtrip() {
    let original = toy_store();
    let serialized = original.save(&JsonLines).unwrap();

    let mut restored: Store<Toy> = Store::new("restored");
    assert!(restored.load(&JsonLines, &serialized).success);
    assert_eq!(restored.raw(), original.raw());
}

// --- Metadata ---

#[test]
fn test_described_store_column_lifecycle() {
    let mut store: Store<serde_json::Value> = Store::with_rows(
        "described",
        vec![
            json!({"name": "Bear", "price": 1000}),
            json!({"name": "Wolf", "price": 5000}),
        ],
    );

    store
        .describe(vec![
            ColumnMeta::new("name", ColumnType::String, false, "Toy names"),
            ColumnMeta::new("price", ColumnType::Number, false, "Unit prices"),
        ])
        .unwrap();
    assert_eq!(store.columns().unwrap().len(), 2);

    // Dropping the column removes both the field and its descriptor.
    store.remove_column("price", true);
    assert_eq!(store.columns().unwrap().len(), 1);
    assert_eq!(store.raw()[0], json!({"name": "Bear"}));
}
