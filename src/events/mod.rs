//! Mutation-event notifications.
//!
//! Every store instance owns an [`EventBus`]: a mapping from event kind to
//! an ordered list of listeners. Successful operations fire one typed
//! [`StoreEvent`] carrying the post-operation payload; fan-out is
//! synchronous and in-line with the triggering operation, in registration
//! order.
//!
//! # Example
//!
//! ```
//! use rowdb::{EventKind, Store, StoreEvent};
//!
//! let mut store: Store<i32> = Store::new("numbers");
//! store.when(EventKind::Insert, |event| {
//!     if let StoreEvent::Insert { values } = event {
//!         println!("inserted {} row(s)", values.len());
//!     }
//! });
//! store.insert(1);
//! ```

mod bus;
mod types;

pub use bus::{EventBus, Listener};
pub use types::{EventKind, StoreEvent};
