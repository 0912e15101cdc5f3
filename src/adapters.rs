//! Boundary contracts for external adapters.
//!
//! The core store is format-agnostic and dispatch-agnostic: converting
//! rows to and from external text formats, re-executing store contents
//! through a relational engine, and mapping command names onto store
//! operations all live outside this crate. These traits pin down the
//! contracts those collaborators implement; the store itself only
//! consumes [`Loader`] (through [`crate::Store::load`] and
//! [`crate::Store::save`]).

use serde_json::Value;

use crate::column::ColumnMeta;
use crate::error::Result;
use crate::store::Store;

/// Serialization adapter: converts between the store's in-memory rows and
/// an external text representation.
///
/// The store's `load`/`save` operations are thin pass-throughs over this
/// contract. Implementations are synchronous; async-capable hosts adapt
/// at their own boundary.
pub trait Loader<T> {
    /// Parse rows out of serialized input.
    fn load(&self, input: &str) -> Result<Vec<T>>;

    /// Serialize a row sequence.
    fn save(&self, rows: &[T]) -> Result<String>;
}

/// Relational-query adapter: re-executes store contents through an
/// external relational engine.
///
/// `init` creates one external table per store — column names and
/// declared [`ColumnMeta`] type tags map to the engine's types — and
/// bulk-inserts each store's current rows. `query` accepts free-form
/// query text with bound parameters.
///
/// Calling `query` before a successful `init` is a programming error and
/// must yield [`crate::StoreError::NotInitialized`].
pub trait Relational<T> {
    /// Create and populate one external table per store.
    fn init(&mut self, stores: &[&Store<T>]) -> Result<()>;

    /// Execute query text with bound parameters against the initialized
    /// tables.
    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Value>>;
}

/// Sentinel returned by [`CommandDispatch::execute`] for unknown command
/// names.
pub const COMMAND_UNKNOWN: &str = "Command unknown";

/// One entry of a command-dispatch catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct CommandSpec {
    /// Operation name used for dispatch.
    pub name: String,

    /// Human-readable description of what the operation does.
    pub description: String,

    /// Description of the expected string-encoded input, if any.
    pub input: Option<String>,

    /// Description of the string-encoded output.
    pub output: String,
}

/// Command-dispatch adapter: exposes a fixed catalog of named store
/// operations (column introspection, column deletion) to a caller that
/// speaks strings.
pub trait CommandDispatch {
    /// The fixed catalog of supported operations.
    fn commands(&self) -> Vec<CommandSpec>;

    /// Execute a named operation on a string-encoded input, returning a
    /// string-encoded output, or [`COMMAND_UNKNOWN`] for names outside
    /// the catalog.
    fn execute(&mut self, name: &str, input: &str) -> String;
}

/// Render a column catalog the way dispatch adapters present it:
/// `"name": type` pairs joined by commas.
pub fn describe_columns(columns: &[ColumnMeta]) -> String {
    columns
        .iter()
        .map(|meta| format!("{:?}: {}", meta.name, meta.column_type))
        .collect::<Vec<_>>()
        .join(", ")
}
