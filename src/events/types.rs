//! Event kinds and payloads.

/// Kinds of events a store can fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    // Change operations
    Insert,
    Update,
    Remove,
    RemoveColumn,
    RemoveDuplicates,
    Sort,
    Merge,
    Chain,

    // Read operations
    List,
    ListPaginated,
    Search,
    Find,
}

impl EventKind {
    /// Stable lowercase name, for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Insert => "insert",
            EventKind::Update => "update",
            EventKind::Remove => "remove",
            EventKind::RemoveColumn => "remove_column",
            EventKind::RemoveDuplicates => "remove_duplicates",
            EventKind::Sort => "sort",
            EventKind::Merge => "merge",
            EventKind::Chain => "chain",
            EventKind::List => "list",
            EventKind::ListPaginated => "list_paginated",
            EventKind::Search => "search",
            EventKind::Find => "find",
        }
    }
}

/// Events fired by store operations, carrying the post-operation payload.
#[derive(Clone, Debug)]
pub enum StoreEvent<T> {
    /// Rows were appended.
    Insert {
        /// The inserted values, in input order.
        values: Vec<T>,
    },

    /// Every row was passed through a transform.
    Update { rows: Vec<T> },

    /// Rows were removed (also fired by `clear`, with an empty payload).
    Remove { rows: Vec<T> },

    /// A column was stripped from every row.
    RemoveColumn { column: String, rows: Vec<T> },

    /// Duplicate rows were collapsed.
    RemoveDuplicates { rows: Vec<T> },

    /// The row sequence was reordered.
    Sort { rows: Vec<T> },

    /// Rows from another store were merged in.
    Merge { rows: Vec<T> },

    /// A chain of operations committed.
    Chain { rows: Vec<T> },

    /// The full row sequence was read.
    List { rows: Vec<T> },

    /// One page of rows was read.
    ListPaginated { page: usize, rows: Vec<T> },

    /// Rows matching a predicate were read.
    Search { rows: Vec<T> },

    /// The first row matching a predicate was looked up.
    Find { row: Option<T> },
}

impl<T> StoreEvent<T> {
    /// The kind this event fans out under.
    pub fn kind(&self) -> EventKind {
        match self {
            StoreEvent::Insert { .. } => EventKind::Insert,
            StoreEvent::Update { .. } => EventKind::Update,
            StoreEvent::Remove { .. } => EventKind::Remove,
            StoreEvent::RemoveColumn { .. } => EventKind::RemoveColumn,
            StoreEvent::RemoveDuplicates { .. } => EventKind::RemoveDuplicates,
            StoreEvent::Sort { .. } => EventKind::Sort,
            StoreEvent::Merge { .. } => EventKind::Merge,
            StoreEvent::Chain { .. } => EventKind::Chain,
            StoreEvent::List { .. } => EventKind::List,
            StoreEvent::ListPaginated { .. } => EventKind::ListPaginated,
            StoreEvent::Search { .. } => EventKind::Search,
            StoreEvent::Find { .. } => EventKind::Find,
        }
    }
}
