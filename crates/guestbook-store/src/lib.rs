//! Embedded store for events and their guests.
//!
//! The whole store lives in memory and is mirrored to a single JSON file.
//! Each mutation rewrites the complete snapshot; if that write fails the
//! in-memory change is undone and the caller gets a `WRITE ERROR`.
//!
//! # Architecture
//!
//! ```text
//! Caller
//!     |
//!     +-- Store::events() --> EventStore  (create, get, filter, update)
//!     +-- Store::guests() --> GuestStore  (add, list, filter, update, remove)
//!             |
//!             +-- StoreState (maps + counters, behind one lock)
//!                     |
//!                     +-- Backend::persist --> <data_dir>/db.json  (or nothing, if volatile)
//! ```
//!
//! # Modules
//!
//! - [`config`] -- Data directory selection, environment loading
//! - [`persistence`] -- Snapshot file load and full rewrite
//! - [`snapshot`] -- The persisted document shape
//! - [`store`] -- Store handle, lifecycle, and the optional process-wide instance
//! - [`event_store`] -- Event operations and filtering
//! - [`guest_store`] -- Guest operations scoped by event
//! - [`error`] -- Shared error types

pub mod config;
pub mod error;
pub mod event_store;
pub mod guest_store;
pub mod persistence;
pub mod snapshot;
pub mod store;

// Re-export primary types for convenience.
pub use config::{ConfigError, StorageLocation, StoreConfig};
pub use error::{ErrorCode, StoreError};
pub use event_store::{EventFilter, EventStore};
pub use guest_store::GuestStore;
pub use persistence::Backend;
pub use snapshot::Snapshot;
pub use store::{Store, install_shared_in_memory, shared, shared_handle};
