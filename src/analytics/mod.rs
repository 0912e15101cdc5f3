//! Derived analytics over a store snapshot.
//!
//! [`Analytics`] is a stateless view obtained from a store
//! ([`crate::Store::analytics`]). Every call re-reads the store through its
//! `list()` path, so results always reflect the latest state and `List`
//! events fire for analytics reads like any other read.
//!
//! Aggregates never fail: degenerate inputs map to defined sentinels. An
//! empty store short-circuits every aggregate to its sentinel (`NaN` for
//! numeric aggregates, `0` for counts) instead of attempting the
//! computation.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::column::ColumnQuery;
use crate::store::Store;

/// Read-only derived computations over a bound store.
pub struct Analytics<'a, T> {
    store: &'a Store<T>,
}

impl<'a, T: Clone + Serialize> Analytics<'a, T> {
    pub(crate) fn new(store: &'a Store<T>) -> Self {
        Self { store }
    }

    /// Snapshot the store through its read path.
    ///
    /// Panics when the underlying read fails — that indicates a broken
    /// store implementation, not a data condition.
    fn rows(&self) -> Vec<T> {
        let result = self.store.list();
        if !result.success {
            panic!("analytics read failed: store list() was unsuccessful");
        }
        match result.into_sequence() {
            Some(rows) => rows,
            None => panic!("analytics read failed: store list() returned no row sequence"),
        }
    }

    /// Extract the value a computation works on: the named column, or the
    /// whole row serialized when no column is given.
    fn extract(&self, row: &T, column: Option<&ColumnQuery>) -> Option<Value> {
        match column {
            Some(query) => query.extract(row),
            None => serde_json::to_value(row).ok(),
        }
    }

    /// Numeric view of an extracted value; absent or non-numeric is NaN.
    fn numeric(value: Option<Value>) -> f64 {
        value.and_then(|v| v.as_f64()).unwrap_or(f64::NAN)
    }

    // --- Mathematical ---

    /// Minimum numeric value. NaN on an empty store; non-numeric values
    /// never win the comparison.
    pub fn min(&self, column: Option<&ColumnQuery>) -> f64 {
        if self.store.is_empty() {
            return f64::NAN;
        }

        self.rows()
            .iter()
            .map(|row| Self::numeric(self.extract(row, column)))
            .fold(f64::NAN, f64::min)
    }

    /// Maximum numeric value. NaN on an empty store; non-numeric values
    /// never win the comparison.
    pub fn max(&self, column: Option<&ColumnQuery>) -> f64 {
        if self.store.is_empty() {
            return f64::NAN;
        }

        self.rows()
            .iter()
            .map(|row| Self::numeric(self.extract(row, column)))
            .fold(f64::NAN, f64::max)
    }

    /// Count of extracted values satisfying the predicate. 0 on an empty
    /// store.
    pub fn count<F>(&self, mut predicate: F, column: Option<&ColumnQuery>) -> usize
    where
        F: FnMut(&Value) -> bool,
    {
        if self.store.is_empty() {
            return 0;
        }

        self.rows()
            .iter()
            .filter_map(|row| self.extract(row, column))
            .filter(|value| predicate(value))
            .count()
    }

    /// Count of rows whose extracted value is present and non-null. 0 on
    /// an empty store.
    pub fn len(&self, column: Option<&ColumnQuery>) -> usize {
        if self.store.is_empty() {
            return 0;
        }

        self.rows()
            .iter()
            .filter(|row| !matches!(self.extract(row, column), None | Some(Value::Null)))
            .count()
    }

    /// Sum of numeric values, treating non-numeric as 0. NaN on an empty
    /// store.
    pub fn sum(&self, column: Option<&ColumnQuery>) -> f64 {
        if self.store.is_empty() {
            return f64::NAN;
        }

        self.rows()
            .iter()
            .map(|row| {
                self.extract(row, column)
                    .and_then(|v| v.as_f64())
                    .unwrap_or(0.0)
            })
            .sum()
    }

    /// Median of extracted values, ordering missing values as 0.
    ///
    /// Odd lengths yield the middle value; even lengths yield the mean of
    /// the two middle values. NaN on an empty store.
    pub fn median(&self, column: Option<&ColumnQuery>) -> f64 {
        if self.store.is_empty() {
            return f64::NAN;
        }

        let mut values: Vec<Option<f64>> = self
            .rows()
            .iter()
            .map(|row| self.extract(row, column).and_then(|v| v.as_f64()))
            .collect();
        values.sort_by(|a, b| a.unwrap_or(0.0).total_cmp(&b.unwrap_or(0.0)));

        let half = values.len() / 2;
        if values.len() % 2 == 1 {
            values[half].unwrap_or(f64::NAN)
        } else {
            (values[half - 1].unwrap_or(f64::NAN) + values[half].unwrap_or(f64::NAN)) / 2.0
        }
    }

    /// `sum / row count`. NaN on an empty store, consistent with `sum`.
    pub fn average(&self, column: Option<&ColumnQuery>) -> f64 {
        self.sum(column) / self.store.len() as f64
    }

    /// Occurrence counts per distinct extracted value, keyed by its
    /// stringified form. With `as_percentage`, counts become
    /// `100 * count / total`.
    pub fn occurrences(&self, column: &ColumnQuery, as_percentage: bool) -> HashMap<String, f64> {
        let rows = self.rows();
        let total = rows.len();

        let mut counts: HashMap<String, f64> = HashMap::new();
        for row in &rows {
            let key = value_key(self.extract(row, Some(column)));
            *counts.entry(key).or_insert(0.0) += 1.0;
        }

        if as_percentage && total > 0 {
            for count in counts.values_mut() {
                *count = 100.0 * *count / total as f64;
            }
        }

        counts
    }

    // --- Finding ---

    /// Rows whose extracted column value is absent or null.
    pub fn missing(&self, column: &ColumnQuery) -> Vec<T> {
        self.rows()
            .into_iter()
            .filter(|row| matches!(column.extract(row), None | Some(Value::Null)))
            .collect()
    }

    /// Rows whose extracted value occurs more than once, in original
    /// order. Without a column, whole rows are compared by value.
    pub fn duplicates(&self, column: Option<&ColumnQuery>) -> Vec<T> {
        let rows = self.rows();
        let keys: Vec<String> = rows
            .iter()
            .map(|row| value_key(self.extract(row, column)))
            .collect();

        let mut counts: HashMap<&String, usize> = HashMap::new();
        for key in &keys {
            *counts.entry(key).or_insert(0) += 1;
        }

        rows.into_iter()
            .zip(&keys)
            .filter(|(_, key)| counts[key] > 1)
            .map(|(row, _)| row)
            .collect()
    }
}

/// Stringify an extracted value for keying: strings keep their raw
/// content, everything else renders as JSON, absent values key as
/// `"undefined"`.
fn value_key(value: Option<Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    }
}
