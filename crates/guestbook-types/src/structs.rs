//! Event and guest records, plus the payloads used to create them.
//!
//! Field names on the wire follow the snapshot file format: events keep the
//! historical `venu` spelling and guests reference their event as `eventId`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{EventStatus, GuestStatus, Sex};
use crate::ids::{EventId, GuestId};

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// An event that guests can be registered for.
///
/// The `id` is assigned by the store at creation and never changes. Events
/// are updated in place and are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Event {
    /// Store-assigned identifier.
    pub id: EventId,
    /// Display title. Keyword filters match against this field.
    pub title: String,
    /// Person or organisation running the event.
    pub organizer: String,
    /// Where the event takes place.
    #[serde(rename = "venu")]
    pub venue: String,
    /// Free-text description.
    pub description: String,
    /// Scheduled start.
    pub start: DateTime<Utc>,
    /// Scheduled end.
    pub end: DateTime<Utc>,
    /// Current lifecycle status.
    pub status: EventStatus,
}

/// Fields supplied by a caller creating an event. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    /// Display title.
    pub title: String,
    /// Person or organisation running the event.
    pub organizer: String,
    /// Where the event takes place.
    #[serde(rename = "venu")]
    pub venue: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Scheduled start.
    pub start: DateTime<Utc>,
    /// Scheduled end.
    pub end: DateTime<Utc>,
    /// Initial status, `PENDING` when omitted.
    #[serde(default)]
    pub status: EventStatus,
}

impl NewEvent {
    /// Build the stored record for this payload under `id`.
    pub fn into_event(self, id: EventId) -> Event {
        Event {
            id,
            title: self.title,
            organizer: self.organizer,
            venue: self.venue,
            description: self.description,
            start: self.start,
            end: self.end,
            status: self.status,
        }
    }
}

// ---------------------------------------------------------------------------
// Guest
// ---------------------------------------------------------------------------

/// A guest registered for exactly one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Guest {
    /// Store-assigned identifier, unique across all events.
    pub id: GuestId,
    /// The event this guest belongs to. Fixed at creation.
    #[serde(rename = "eventId")]
    pub event_id: EventId,
    /// Given name.
    pub firstname: String,
    /// Family name.
    pub lastname: String,
    /// Age in years.
    pub age: u32,
    /// Recorded sex.
    pub sex: Sex,
    /// Path or reference to a photo of the guest.
    #[serde(default)]
    pub guest_image_path: Option<String>,
    /// When the guest arrived.
    #[serde(default)]
    pub enter: Option<DateTime<Utc>>,
    /// When the guest left.
    #[serde(default)]
    pub exit: Option<DateTime<Utc>>,
    /// Presence status.
    #[serde(default)]
    pub is_present: GuestStatus,
}

/// Fields supplied by a caller registering a guest.
///
/// The owning event is passed separately to the store, so it is not part of
/// the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGuest {
    /// Given name.
    pub firstname: String,
    /// Family name.
    pub lastname: String,
    /// Age in years.
    pub age: u32,
    /// Recorded sex.
    pub sex: Sex,
    /// Path or reference to a photo of the guest.
    #[serde(default)]
    pub guest_image_path: Option<String>,
    /// When the guest arrived.
    #[serde(default)]
    pub enter: Option<DateTime<Utc>>,
    /// When the guest left.
    #[serde(default)]
    pub exit: Option<DateTime<Utc>>,
    /// Presence status, `NOTSET` when omitted.
    #[serde(default)]
    pub is_present: GuestStatus,
}

impl NewGuest {
    /// Build the stored record for this payload under `id`, owned by `event_id`.
    pub fn into_guest(self, id: GuestId, event_id: EventId) -> Guest {
        Guest {
            id,
            event_id,
            firstname: self.firstname,
            lastname: self.lastname,
            age: self.age,
            sex: self.sex,
            guest_image_path: self.guest_image_path,
            enter: self.enter,
            exit: self.exit,
            is_present: self.is_present,
        }
    }
}
