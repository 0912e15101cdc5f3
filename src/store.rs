//! Main Store struct tying rows, metadata, events, and analytics together.

use std::cmp::Ordering;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::adapters::Loader;
use crate::analytics::Analytics;
use crate::column::{ColumnMeta, ColumnQuery};
use crate::error::{Result, StoreError};
use crate::events::{EventBus, EventKind, StoreEvent};
use crate::result::OpResult;

/// Page size used when callers have no opinion.
pub const DEFAULT_PER_PAGE: usize = 50;

/// One step of a [`Store::chain`] call.
///
/// Each step receives a scratch store seeded with the previous step's
/// result rows and reports its outcome like any other operation.
pub type ChainOp<T> = Box<dyn Fn(&mut Store<T>) -> OpResult<T>>;

/// An ordered, mutable, process-local collection of typed rows.
///
/// The store owns its row sequence and optional column metadata, and fires
/// a typed event through its bus after every successful operation.
/// Insertion order is significant and preserved by every non-sorting
/// operation.
///
/// Transforming operations take a `save` flag: `true` commits the result
/// and fires the operation's event, `false` is a dry-run that returns the
/// would-be result while leaving state untouched and firing nothing.
pub struct Store<T> {
    /// Identifying name. Not required to be unique across stores.
    name: String,

    /// The row sequence.
    rows: Vec<T>,

    /// Column metadata, empty until described.
    metadata: Vec<ColumnMeta>,

    /// Per-instance event bus.
    events: EventBus<T>,
}

impl<T: Clone> Store<T> {
    /// Create an empty store.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_rows(name, Vec::new())
    }

    /// Create a store seeded with rows.
    pub fn with_rows(name: impl Into<String>, rows: Vec<T>) -> Self {
        Self {
            name: name.into(),
            rows,
            metadata: Vec::new(),
            events: EventBus::new(),
        }
    }

    /// The store's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw row sequence.
    pub fn raw(&self) -> &[T] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the store holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn emit(&self, event: StoreEvent<T>) {
        self.events.emit(&event);
    }

    // --- Events ---

    /// Register a listener for an event kind.
    ///
    /// Listeners run synchronously and in registration order when the
    /// event fires; a panicking listener propagates to the caller of the
    /// triggering operation. Registering or emitting from inside a
    /// listener panics. There is no de-registration.
    pub fn when<F>(&self, kind: EventKind, listener: F)
    where
        F: FnMut(&StoreEvent<T>) + 'static,
    {
        self.events.on(kind, Box::new(listener));
    }

    // --- Metadata ---

    /// Describe columns in bulk.
    ///
    /// Names must be unique across the store's metadata; a duplicate
    /// (within the batch or against earlier descriptions) rejects the
    /// offending column and leaves it un-described.
    pub fn describe(&mut self, columns: Vec<ColumnMeta>) -> Result<()> {
        for column in columns {
            if self.metadata.iter().any(|meta| meta.name == column.name) {
                return Err(StoreError::DuplicateColumn(column.name));
            }
            self.metadata.push(column);
        }
        Ok(())
    }

    /// All described columns, or `None` when nothing was described yet.
    pub fn columns(&self) -> Option<&[ColumnMeta]> {
        if self.metadata.is_empty() {
            None
        } else {
            Some(&self.metadata)
        }
    }

    /// Look up one described column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnMeta> {
        self.metadata.iter().find(|meta| meta.name == name)
    }

    // --- Inserting ---

    /// Append a single value.
    pub fn insert(&mut self, value: T) -> OpResult<T> {
        self.rows.push(value.clone());

        debug!(store = %self.name, rows = self.rows.len(), "insert");
        self.emit(StoreEvent::Insert {
            values: vec![value],
        });

        OpResult::ok_rows(self.rows.clone())
    }

    /// Append a batch of values, preserving input order.
    pub fn insert_many(&mut self, values: Vec<T>) -> OpResult<T> {
        self.rows.extend(values.iter().cloned());

        debug!(store = %self.name, rows = self.rows.len(), "insert");
        self.emit(StoreEvent::Insert { values });

        OpResult::ok_rows(self.rows.clone())
    }

    // --- Finding ---

    /// Snapshot the full row sequence.
    pub fn list(&self) -> OpResult<T> {
        let data = self.rows.clone();

        debug!(store = %self.name, "list");
        self.emit(StoreEvent::List { rows: data.clone() });

        OpResult::ok_rows(data)
    }

    /// Snapshot one 1-based page of rows.
    ///
    /// Out-of-range pages (including page 0) are a successful empty
    /// result, not an error.
    pub fn list_paginated(&self, page: usize, per_page: usize) -> OpResult<T> {
        let data: Vec<T> = if page == 0 {
            Vec::new()
        } else {
            let start = (page - 1).saturating_mul(per_page);
            self.rows.iter().skip(start).take(per_page).cloned().collect()
        };

        debug!(store = %self.name, page, per_page, "list_paginated");
        self.emit(StoreEvent::ListPaginated {
            page,
            rows: data.clone(),
        });

        OpResult::ok_rows(data)
    }

    /// First row satisfying the predicate, if any.
    pub fn find<F>(&self, mut predicate: F) -> OpResult<T>
    where
        F: FnMut(&T) -> bool,
    {
        let row = self.rows.iter().find(|row| predicate(row)).cloned();

        debug!(store = %self.name, found = row.is_some(), "find");
        self.emit(StoreEvent::Find { row: row.clone() });

        OpResult::ok_maybe(row)
    }

    /// All rows satisfying the predicate, in order.
    pub fn search<F>(&self, mut predicate: F) -> OpResult<T>
    where
        F: FnMut(&T) -> bool,
    {
        let data: Vec<T> = self.rows.iter().filter(|row| predicate(row)).cloned().collect();

        debug!(store = %self.name, matches = data.len(), "search");
        self.emit(StoreEvent::Search { rows: data.clone() });

        OpResult::ok_rows(data)
    }

    // --- Manipulations ---

    /// Reorder rows by a comparator.
    ///
    /// A preview (`save == false`) sorts a working copy, leaves the store
    /// untouched, fires nothing, and reports a bare success without row
    /// data.
    pub fn sort<F>(&mut self, compare: F, save: bool) -> OpResult<T>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut data = self.rows.clone();
        data.sort_by(compare);

        if !save {
            return OpResult::ok();
        }

        self.rows = data.clone();
        debug!(store = %self.name, "sort");
        self.emit(StoreEvent::Sort { rows: data.clone() });

        OpResult::ok_rows(data)
    }

    /// Pass every row through a transform, preserving length and order.
    pub fn map<F>(&mut self, mut transform: F, save: bool) -> OpResult<T>
    where
        F: FnMut(&T) -> T,
    {
        let data: Vec<T> = self.rows.iter().map(|row| transform(row)).collect();

        if save {
            self.rows = data.clone();
            debug!(store = %self.name, "update");
            self.emit(StoreEvent::Update { rows: data.clone() });
        }

        OpResult::ok_rows(data)
    }

    /// Drop every row the predicate matches, preserving the rest in order.
    pub fn remove<F>(&mut self, mut predicate: F, save: bool) -> OpResult<T>
    where
        F: FnMut(&T) -> bool,
    {
        let data: Vec<T> = self.rows.iter().filter(|row| !predicate(row)).cloned().collect();

        if save {
            self.rows = data.clone();
            debug!(store = %self.name, rows = self.rows.len(), "remove");
            self.emit(StoreEvent::Remove { rows: data.clone() });
        }

        OpResult::ok_rows(data)
    }

    /// Remove all rows.
    pub fn clear(&mut self, save: bool) -> OpResult<T> {
        if save {
            self.rows.clear();
            debug!(store = %self.name, "clear");
            self.emit(StoreEvent::Remove { rows: Vec::new() });
        }

        OpResult::ok_rows(Vec::new())
    }

    /// Merge another store's rows into this one.
    ///
    /// The other store is snapshotted first; a failed read fails the merge
    /// with no mutation and no event. Candidate rows are appended when
    /// `decide(current_rows, candidate)` accepts them.
    pub fn merge<F>(&mut self, other: &Store<T>, decide: F, save: bool) -> OpResult<T>
    where
        F: Fn(&[T], &T) -> bool,
    {
        let source = other.list();
        if !source.success {
            let reason = source.error.unwrap_or_else(|| "unknown error".into());
            return OpResult::fail(StoreError::MergeSource(reason).to_string());
        }
        let candidates = match source.into_sequence() {
            Some(rows) => rows,
            None => {
                return OpResult::fail(
                    StoreError::MergeSource("source returned no row sequence".into()).to_string(),
                )
            }
        };

        let accepted: Vec<T> = candidates
            .into_iter()
            .filter(|row| decide(&self.rows, row))
            .collect();

        let mut data = self.rows.clone();
        data.extend(accepted);

        if save {
            self.rows = data.clone();
            debug!(store = %self.name, from = %other.name, rows = self.rows.len(), "merge");
            self.emit(StoreEvent::Merge { rows: data.clone() });
        }

        OpResult::ok_rows(data)
    }

    /// Apply operations in order, threading the row sequence through each.
    ///
    /// Every step runs against a scratch store seeded with the previous
    /// step's result rows, so steps never alias each other's state. The
    /// chain fails fast at the first unsuccessful result or non-sequence
    /// payload, discarding all intermediate changes; only a fully
    /// successful chain replaces this store's rows and fires a single
    /// `Chain` event.
    pub fn chain(&mut self, operations: Vec<ChainOp<T>>, save: bool) -> OpResult<T> {
        let mut rows = self.rows.clone();

        for (index, operation) in operations.iter().enumerate() {
            let mut step = Store::with_rows(self.name.clone(), rows);
            let result = operation(&mut step);

            if !result.success {
                let reason = result.error.unwrap_or_else(|| "unknown error".into());
                return OpResult::fail(format!("chain step {index} failed: {reason}"));
            }
            rows = match result.into_sequence() {
                Some(next) => next,
                None => {
                    return OpResult::fail(format!(
                        "chain step {index} did not produce a row sequence"
                    ))
                }
            };
        }

        if save {
            self.rows = rows.clone();
            debug!(store = %self.name, steps = operations.len(), "chain");
            self.emit(StoreEvent::Chain { rows: rows.clone() });
        }

        OpResult::ok_rows(rows)
    }

    /// Partition rows into consecutive chunks of at most `size` rows.
    ///
    /// Each chunk is an independent store named after the parent and the
    /// chunk index. The parent is left untouched and fires no event.
    /// `size == 0` yields no chunks.
    pub fn chunks(&self, size: usize) -> Vec<Store<T>> {
        if size == 0 {
            return Vec::new();
        }

        self.rows
            .chunks(size)
            .enumerate()
            .map(|(index, rows)| {
                Store::with_rows(format!("{}.chunk{}", self.name, index), rows.to_vec())
            })
            .collect()
    }

    // --- Load/Save ---

    /// Insert whatever the adapter produces from `input`.
    ///
    /// Adapter failure surfaces as a failed envelope; nothing is inserted
    /// and no event fires.
    pub fn load<L>(&mut self, loader: &L, input: &str) -> OpResult<T>
    where
        L: Loader<T>,
    {
        match loader.load(input) {
            Ok(values) => self.insert_many(values),
            Err(e) => OpResult::fail(format!("load failed: {e}")),
        }
    }

    /// Serialize the current raw row sequence through the adapter.
    pub fn save<L>(&self, loader: &L) -> Result<String>
    where
        L: Loader<T>,
    {
        loader.save(&self.rows)
    }
}

impl<T: Clone + PartialEq> Store<T> {
    /// Keep one representative per distinct value, in first-occurrence
    /// order. Idempotent.
    pub fn remove_duplicates(&mut self, save: bool) -> OpResult<T> {
        let mut data: Vec<T> = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            if !data.contains(row) {
                data.push(row.clone());
            }
        }

        if save {
            self.rows = data.clone();
            debug!(store = %self.name, rows = self.rows.len(), "remove_duplicates");
            self.emit(StoreEvent::RemoveDuplicates { rows: data.clone() });
        }

        OpResult::ok_rows(data)
    }
}

impl<T: Clone + PartialEq + Serialize> Store<T> {
    /// Resolve duplicate groups through a choose predicate.
    ///
    /// Rows are grouped by their extracted `column` value; every group
    /// with more than one member is passed to `choose`, and only the rows
    /// it returns survive. Rows outside any duplicate group are always
    /// kept.
    pub fn remove_duplicates_by<F>(
        &mut self,
        choose: F,
        column: &ColumnQuery,
        save: bool,
    ) -> OpResult<T>
    where
        F: Fn(&[T]) -> Vec<T>,
    {
        let keys: Vec<Option<Value>> = self.rows.iter().map(|row| column.extract(row)).collect();

        // Group row indices by extracted value, preserving first-seen order.
        let mut groups: Vec<(&Option<Value>, Vec<usize>)> = Vec::new();
        for (index, key) in keys.iter().enumerate() {
            match groups.iter_mut().find(|(existing, _)| *existing == key) {
                Some((_, members)) => members.push(index),
                None => groups.push((key, vec![index])),
            }
        }

        let mut keep = vec![true; self.rows.len()];
        for (_, members) in groups.iter().filter(|(_, members)| members.len() > 1) {
            let group: Vec<T> = members.iter().map(|&i| self.rows[i].clone()).collect();
            let chosen = choose(&group);
            for &index in members {
                keep[index] = chosen.contains(&self.rows[index]);
            }
        }

        let data: Vec<T> = self
            .rows
            .iter()
            .zip(&keep)
            .filter(|(_, keep)| **keep)
            .map(|(row, _)| row.clone())
            .collect();

        if save {
            self.rows = data.clone();
            debug!(store = %self.name, rows = self.rows.len(), "remove_duplicates");
            self.emit(StoreEvent::RemoveDuplicates { rows: data.clone() });
        }

        OpResult::ok_rows(data)
    }
}

impl<T: Clone + Serialize + DeserializeOwned> Store<T> {
    /// Strip a named field from every row and drop its descriptor.
    ///
    /// Rows that are not keyed structures, or whose stripped form no
    /// longer deserializes to the row type, are kept unchanged — the
    /// operation never fails on shape.
    pub fn remove_column(&mut self, name: &str, save: bool) -> OpResult<T> {
        let data: Vec<T> = self
            .rows
            .iter()
            .map(|row| Self::strip_column(row, name).unwrap_or_else(|| row.clone()))
            .collect();

        if save {
            self.rows = data.clone();
            self.metadata.retain(|meta| meta.name != name);
            debug!(store = %self.name, column = name, "remove_column");
            self.emit(StoreEvent::RemoveColumn {
                column: name.to_string(),
                rows: data.clone(),
            });
        }

        OpResult::ok_rows(data)
    }

    fn strip_column(row: &T, name: &str) -> Option<T> {
        let mut value = serde_json::to_value(row).ok()?;
        value.as_object_mut()?.remove(name);
        serde_json::from_value(value).ok()
    }
}

impl<T: Clone + Serialize> Store<T> {
    /// Derived computations over the store's current snapshot.
    pub fn analytics(&self) -> Analytics<'_, T> {
        Analytics::new(self)
    }
}
