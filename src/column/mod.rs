//! Column access and description.
//!
//! Rows are opaque to the store itself; everything that needs to look
//! inside one goes through a [`ColumnQuery`], a validated dotted path
//! resolved against the row's serialized form. Column metadata describes
//! the declared shape of structured rows for external consumers.

mod metadata;
mod query;

pub use metadata::{ColumnMeta, ColumnType};
pub use query::ColumnQuery;
