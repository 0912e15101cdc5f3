//! Comparator constructors for column-ordered sorting.
//!
//! Convenience builders for the common case of ordering structured rows by
//! one numeric column. Rows where the column is absent or non-numeric
//! order as 0.

use std::cmp::Ordering;

use serde::Serialize;

use crate::column::ColumnQuery;

fn numeric<T: Serialize>(column: &ColumnQuery, row: &T) -> f64 {
    column.extract(row).and_then(|v| v.as_f64()).unwrap_or(0.0)
}

/// Comparator ordering rows by a column's numeric value, ascending.
pub fn ascending<T: Serialize>(column: &ColumnQuery) -> impl FnMut(&T, &T) -> Ordering + '_ {
    move |a, b| numeric(column, a).total_cmp(&numeric(column, b))
}

/// Comparator ordering rows by a column's numeric value, descending.
pub fn descending<T: Serialize>(column: &ColumnQuery) -> impl FnMut(&T, &T) -> Ordering + '_ {
    move |a, b| numeric(column, b).total_cmp(&numeric(column, a))
}
