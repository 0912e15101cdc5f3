//! Column descriptors for structured rows.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type tag of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Number,
    String,
    Boolean,
    Json,
    Date,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            ColumnType::Number => "number",
            ColumnType::String => "string",
            ColumnType::Boolean => "boolean",
            ColumnType::Json => "json",
            ColumnType::Date => "date",
        };
        write!(f, "{}", tag)
    }
}

/// Descriptor for one column of a structured row.
///
/// Added in bulk via [`crate::Store::describe`]; the name must match a key
/// of the row type and is unique within a store's metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnMeta {
    /// Column name (a key of the row type).
    pub name: String,

    /// Declared type tag.
    pub column_type: ColumnType,

    /// Whether the column may hold null/absent values.
    pub nullable: bool,

    /// Human-readable description.
    pub description: String,
}

impl ColumnMeta {
    /// Convenience constructor.
    pub fn new(
        name: impl Into<String>,
        column_type: ColumnType,
        nullable: bool,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable,
            description: description.into(),
        }
    }
}
