//! # rowdb
//!
//! An embeddable, process-local record store: an ordered, mutable
//! collection of typed rows with event notifications, path-based column
//! access, and derived analytics.
//!
//! ## Core Concepts
//!
//! - **Store**: owns an ordered row sequence and fires a typed event after
//!   every successful operation
//! - **OpResult**: uniform success/data/error envelope returned by every
//!   operation — expected conditions are successful-empty results, not
//!   errors
//! - **ColumnQuery**: validated dotted-path accessor into structured rows
//! - **Analytics**: stateless aggregates recomputed from the store's
//!   latest snapshot on every call
//!
//! ## Example
//!
//! ```
//! use rowdb::{ColumnQuery, Store};
//! use serde_json::json;
//!
//! let mut store = Store::new("toys");
//! store.insert_many(vec![
//!     json!({"name": "Toy Bear", "price": 1000}),
//!     json!({"name": "Toy Dog", "price": 2000}),
//!     json!({"name": "Toy Cat", "price": 3000}),
//! ]);
//!
//! let price = ColumnQuery::new("price").unwrap();
//! assert_eq!(store.analytics().median(Some(&price)), 2000.0);
//!
//! let cheap = store.search(|row| row["price"].as_i64().unwrap() < 2500);
//! assert_eq!(cheap.rows().len(), 2);
//! ```

pub mod adapters;
pub mod analytics;
pub mod column;
pub mod error;
pub mod events;
pub mod result;
pub mod sorting;
pub mod store;

// Re-exports
pub use adapters::{CommandDispatch, CommandSpec, Loader, Relational, COMMAND_UNKNOWN};
pub use analytics::Analytics;
pub use column::{ColumnMeta, ColumnQuery, ColumnType};
pub use error::{Result, StoreError};
pub use events::{EventBus, EventKind, Listener, StoreEvent};
pub use result::{OpResult, Rows};
pub use store::{ChainOp, Store, DEFAULT_PER_PAGE};
