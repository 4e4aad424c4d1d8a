//! Record types shared by the guestbook store and its callers.
//!
//! These are plain data shapes with no behaviour beyond construction and
//! partial-update application. Entity types derive `ts-rs` so a web front
//! end can consume the same definitions.
//!
//! # Modules
//!
//! - [`ids`] -- Integer newtypes for event and guest identifiers
//! - [`enums`] -- Event status, guest presence status, and sex
//! - [`structs`] -- `Event` and `Guest` records and their creation payloads
//! - [`patch`] -- Partial-update payloads with explicit field presence

pub mod enums;
pub mod ids;
pub mod patch;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{EventStatus, GuestStatus, Sex};
pub use ids::{EventId, GuestId};
pub use patch::{EventPatch, GuestPatch};
pub use structs::{Event, Guest, NewEvent, NewGuest};
