//! Dotted-path column queries.

use crate::error::{Result, StoreError};
use serde::Serialize;
use serde_json::Value;

/// A validated dotted-path accessor into a structured row.
///
/// Construction validates the path; resolution is total — a missing key or
/// a non-object intermediate yields `None` rather than an error, so the
/// same query can be reused across rows of uneven shape.
///
/// # Example
///
/// ```
/// use rowdb::ColumnQuery;
/// use serde_json::json;
///
/// let query = ColumnQuery::new("a.b").unwrap();
/// assert_eq!(query.lookup(&json!({"a": {"b": 100}})), Some(&json!(100)));
/// assert_eq!(query.lookup(&json!({"a": 1})), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColumnQuery {
    path: String,
}

impl ColumnQuery {
    /// Validate and build a query from a dotted path.
    ///
    /// Paths are word-character segments joined by single dots
    /// (`name`, `a.b.c`). Anything else is rejected with
    /// [`StoreError::InvalidColumnQuery`].
    pub fn new(path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        if !Self::is_valid(&path) {
            return Err(StoreError::InvalidColumnQuery(path));
        }
        Ok(Self { path })
    }

    fn is_valid(path: &str) -> bool {
        !path.is_empty()
            && path.split('.').all(|segment| {
                !segment.is_empty()
                    && segment
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_')
            })
    }

    /// The validated path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Resolve the query against an already-serialized value.
    pub fn lookup<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        let mut current = value;
        for segment in self.path.split('.') {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Resolve the query against a record of any serializable type.
    ///
    /// Non-keyed records (primitives, sequences) resolve to `None`.
    pub fn extract<T: Serialize>(&self, record: &T) -> Option<Value> {
        let value = serde_json::to_value(record).ok()?;
        self.lookup(&value).cloned()
    }
}
