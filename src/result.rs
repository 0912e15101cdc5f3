//! Uniform result envelope returned by store operations.
//!
//! Every store operation reports its outcome as an [`OpResult`] instead of a
//! `Result`: expected conditions like "nothing matched" are successful-empty
//! envelopes, and callers branch on [`OpResult::success`] without paying for
//! error control flow.

/// Row payload of an operation outcome.
#[derive(Clone, Debug, PartialEq)]
pub enum Rows<T> {
    /// No row payload.
    None,
    /// A single row (e.g. the result of `find`).
    One(T),
    /// A row sequence (most operations).
    Many(Vec<T>),
}

impl<T> Rows<T> {
    /// View the payload as a slice, whatever its shape.
    pub fn as_slice(&self) -> &[T] {
        match self {
            Rows::None => &[],
            Rows::One(row) => std::slice::from_ref(row),
            Rows::Many(rows) => rows,
        }
    }

    /// True when there is no payload at all.
    pub fn is_none(&self) -> bool {
        matches!(self, Rows::None)
    }
}

/// Outcome of a store operation.
///
/// Invariant: when `success` is false, `data` must not be trusted.
#[derive(Clone, Debug, PartialEq)]
pub struct OpResult<T> {
    /// Whether the operation succeeded.
    pub success: bool,

    /// Payload produced by the operation.
    pub data: Rows<T>,

    /// Diagnostic message for failed operations.
    pub error: Option<String>,
}

impl<T> OpResult<T> {
    /// Successful outcome with no payload.
    pub fn ok() -> Self {
        Self {
            success: true,
            data: Rows::None,
            error: None,
        }
    }

    /// Successful outcome carrying one row.
    pub fn ok_row(row: T) -> Self {
        Self {
            success: true,
            data: Rows::One(row),
            error: None,
        }
    }

    /// Successful outcome carrying an optional row (`find`-shaped results).
    pub fn ok_maybe(row: Option<T>) -> Self {
        match row {
            Some(row) => Self::ok_row(row),
            None => Self::ok(),
        }
    }

    /// Successful outcome carrying a row sequence.
    pub fn ok_rows(rows: Vec<T>) -> Self {
        Self {
            success: true,
            data: Rows::Many(rows),
            error: None,
        }
    }

    /// Failed outcome with a diagnostic.
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Rows::None,
            error: Some(error.into()),
        }
    }

    /// Payload as a slice (empty for `None` payloads).
    pub fn rows(&self) -> &[T] {
        self.data.as_slice()
    }

    /// The single-row payload, if any.
    pub fn row(&self) -> Option<&T> {
        match &self.data {
            Rows::One(row) => Some(row),
            _ => None,
        }
    }

    /// Consume the outcome, yielding the payload only if it is a sequence.
    ///
    /// `chain` uses this to decide whether a step's result can feed the
    /// next step.
    pub fn into_sequence(self) -> Option<Vec<T>> {
        match self.data {
            Rows::Many(rows) => Some(rows),
            _ => None,
        }
    }
}
