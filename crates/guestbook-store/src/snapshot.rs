//! The persisted unit of the store and its in-memory counterpart.
//!
//! [`Snapshot`] is the owned JSON document: both counters plus every event
//! and guest as arrays. [`StoreState`] holds the same data keyed by id. It
//! serializes to exactly the [`Snapshot`] shape without cloning records, so
//! each persist writes straight from the live maps.

use std::collections::BTreeMap;

use guestbook_types::{Event, EventId, Guest, GuestId};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::StoreError;

/// Complete store contents as stored on disk.
///
/// Invariant: each counter is at least the largest id of its collection.
/// Loading repairs files that violate it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Last event id handed out.
    #[serde(default)]
    pub event_counter: u64,
    /// Last guest id handed out.
    #[serde(default)]
    pub guest_counter: u64,
    /// All events.
    #[serde(default)]
    pub events: Vec<Event>,
    /// All guests.
    #[serde(default)]
    pub guests: Vec<Guest>,
}

/// Live store contents, exclusively owned by the store handle.
#[derive(Debug, Default)]
pub(crate) struct StoreState {
    pub(crate) events: BTreeMap<EventId, Event>,
    pub(crate) guests: BTreeMap<GuestId, Guest>,
    pub(crate) event_counter: u64,
    pub(crate) guest_counter: u64,
}

impl StoreState {
    /// Index a loaded snapshot by id, raising counters that lag behind the
    /// ids actually present.
    pub(crate) fn from_snapshot(snapshot: Snapshot) -> Self {
        let events: BTreeMap<EventId, Event> =
            snapshot.events.into_iter().map(|e| (e.id, e)).collect();
        let guests: BTreeMap<GuestId, Guest> =
            snapshot.guests.into_iter().map(|g| (g.id, g)).collect();

        let max_event = events.keys().next_back().map_or(0, |id| id.into_inner());
        let max_guest = guests.keys().next_back().map_or(0, |id| id.into_inner());

        if snapshot.event_counter < max_event {
            tracing::warn!(
                counter = snapshot.event_counter,
                max_id = max_event,
                "event counter behind stored ids, raising it"
            );
        }
        if snapshot.guest_counter < max_guest {
            tracing::warn!(
                counter = snapshot.guest_counter,
                max_id = max_guest,
                "guest counter behind stored ids, raising it"
            );
        }

        let orphans = guests
            .values()
            .filter(|g| !events.contains_key(&g.event_id))
            .count();
        if orphans > 0 {
            tracing::warn!(orphans, "loaded guests whose event does not exist");
        }

        Self {
            event_counter: snapshot.event_counter.max(max_event),
            guest_counter: snapshot.guest_counter.max(max_guest),
            events,
            guests,
        }
    }

    /// Copy the live contents into an owned [`Snapshot`].
    pub(crate) fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            event_counter: self.event_counter,
            guest_counter: self.guest_counter,
            events: self.events.values().cloned().collect(),
            guests: self.guests.values().cloned().collect(),
        }
    }

    /// Advance the event counter and return the new id.
    pub(crate) fn next_event_id(&mut self) -> Result<EventId, StoreError> {
        let next = self
            .event_counter
            .checked_add(1)
            .ok_or(StoreError::IdExhausted("event"))?;
        self.event_counter = next;
        Ok(EventId::new(next))
    }

    /// Advance the guest counter and return the new id.
    pub(crate) fn next_guest_id(&mut self) -> Result<GuestId, StoreError> {
        let next = self
            .guest_counter
            .checked_add(1)
            .ok_or(StoreError::IdExhausted("guest"))?;
        self.guest_counter = next;
        Ok(GuestId::new(next))
    }
}

impl Serialize for StoreState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut doc = serializer.serialize_struct("Snapshot", 4)?;
        doc.serialize_field("eventCounter", &self.event_counter)?;
        doc.serialize_field("guestCounter", &self.guest_counter)?;
        doc.serialize_field("events", &Values(&self.events))?;
        doc.serialize_field("guests", &Values(&self.guests))?;
        doc.end()
    }
}

/// Serializes the values of a map as a JSON array.
struct Values<'a, K, V>(&'a BTreeMap<K, V>);

impl<K, V: Serialize> Serialize for Values<'_, K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.values())
    }
}
