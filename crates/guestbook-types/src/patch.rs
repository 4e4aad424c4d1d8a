//! Partial-update payloads for events and guests.
//!
//! A field is changed only when it is present in the patch. Presence is
//! explicit: an empty string, `0`, or `NOTSET` supplied by the caller is a
//! real value and is written. Nullable guest fields use a nested `Option`
//! so that "leave unchanged" (`None`) and "clear" (`Some(None)`) differ.
//!
//! When deserializing, a missing key means "not provided" and an explicit
//! `null` on a nullable field means "clear".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::enums::{EventStatus, GuestStatus, Sex};
use crate::structs::{Event, Guest};

/// Fields to change on an existing event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPatch {
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New organizer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    /// New venue.
    #[serde(default, rename = "venu", skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
    /// New start time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    /// New end time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
}

impl EventPatch {
    /// Returns `true` if the patch changes nothing.
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.organizer.is_none()
            && self.venue.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.start.is_none()
            && self.end.is_none()
    }

    /// Build the updated copy of `current`. The id is never changed.
    pub fn apply(self, current: &Event) -> Event {
        Event {
            id: current.id,
            title: self.title.unwrap_or_else(|| current.title.clone()),
            organizer: self.organizer.unwrap_or_else(|| current.organizer.clone()),
            venue: self.venue.unwrap_or_else(|| current.venue.clone()),
            description: self
                .description
                .unwrap_or_else(|| current.description.clone()),
            start: self.start.unwrap_or(current.start),
            end: self.end.unwrap_or(current.end),
            status: self.status.unwrap_or(current.status),
        }
    }
}

/// Fields to change on an existing guest. The owning event cannot be changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestPatch {
    /// New given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    /// New family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    /// New age.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// New sex.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    /// New image path; `Some(None)` clears it.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub guest_image_path: Option<Option<String>>,
    /// New arrival time; `Some(None)` clears it.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub enter: Option<Option<DateTime<Utc>>>,
    /// New departure time; `Some(None)` clears it.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub exit: Option<Option<DateTime<Utc>>>,
    /// New presence status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_present: Option<GuestStatus>,
}

impl GuestPatch {
    /// Returns `true` if the patch changes nothing.
    pub const fn is_empty(&self) -> bool {
        self.firstname.is_none()
            && self.lastname.is_none()
            && self.age.is_none()
            && self.sex.is_none()
            && self.guest_image_path.is_none()
            && self.enter.is_none()
            && self.exit.is_none()
            && self.is_present.is_none()
    }

    /// Build the updated copy of `current`. Id and event are never changed.
    pub fn apply(self, current: &Guest) -> Guest {
        Guest {
            id: current.id,
            event_id: current.event_id,
            firstname: self.firstname.unwrap_or_else(|| current.firstname.clone()),
            lastname: self.lastname.unwrap_or_else(|| current.lastname.clone()),
            age: self.age.unwrap_or(current.age),
            sex: self.sex.unwrap_or(current.sex),
            guest_image_path: self
                .guest_image_path
                .unwrap_or_else(|| current.guest_image_path.clone()),
            enter: self.enter.unwrap_or(current.enter),
            exit: self.exit.unwrap_or(current.exit),
            is_present: self.is_present.unwrap_or(current.is_present),
        }
    }
}

/// Maps a present key to `Some`, so that `null` becomes `Some(None)`.
///
/// Paired with `#[serde(default)]`, a missing key stays `None`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{EventId, GuestId};

    fn event() -> Event {
        let at = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap_or_default();
        Event {
            id: EventId::new(4),
            title: "Gala".to_owned(),
            organizer: "Org".to_owned(),
            venue: "Hall A".to_owned(),
            description: "Black tie".to_owned(),
            start: at,
            end: at,
            status: EventStatus::Pending,
        }
    }

    fn guest() -> Guest {
        Guest {
            id: GuestId::new(9),
            event_id: EventId::new(4),
            firstname: "Grace".to_owned(),
            lastname: "Hopper".to_owned(),
            age: 40,
            sex: Sex::Female,
            guest_image_path: Some("img/grace.png".to_owned()),
            enter: DateTime::<Utc>::from_timestamp(1_700_000_100, 0),
            exit: None,
            is_present: GuestStatus::Present,
        }
    }

    #[test]
    fn status_only_patch_keeps_other_fields() {
        let before = event();
        let patch = EventPatch {
            status: Some(EventStatus::Running),
            ..EventPatch::default()
        };
        let after = patch.apply(&before);
        assert_eq!(after.status, EventStatus::Running);
        assert_eq!(after.title, before.title);
        assert_eq!(after.organizer, before.organizer);
        assert_eq!(after.venue, before.venue);
        assert_eq!(after.description, before.description);
        assert_eq!(after.start, before.start);
        assert_eq!(after.end, before.end);
    }

    #[test]
    fn empty_string_is_a_real_value() {
        let patch = EventPatch {
            description: Some(String::new()),
            ..EventPatch::default()
        };
        assert_eq!(patch.apply(&event()).description, "");
    }

    #[test]
    fn falsy_guest_values_are_applied() {
        let patch = GuestPatch {
            age: Some(0),
            is_present: Some(GuestStatus::NotSet),
            guest_image_path: Some(None),
            ..GuestPatch::default()
        };
        let after = patch.apply(&guest());
        assert_eq!(after.age, 0);
        assert_eq!(after.is_present, GuestStatus::NotSet);
        assert_eq!(after.guest_image_path, None);
        assert!(after.enter.is_some());
    }

    #[test]
    fn missing_key_and_null_differ() {
        let absent: GuestPatch = serde_json::from_str(r#"{"firstname":"G"}"#).unwrap_or_default();
        assert_eq!(absent.firstname.as_deref(), Some("G"));
        assert_eq!(absent.enter, None);

        let cleared: GuestPatch = serde_json::from_str(r#"{"enter":null}"#).unwrap_or_default();
        assert_eq!(cleared.enter, Some(None));
        assert!(!cleared.is_empty());
    }

    #[test]
    fn event_patch_reads_venu_key() {
        let patch: EventPatch = serde_json::from_str(r#"{"venu":"Hall B"}"#).unwrap_or_default();
        assert_eq!(patch.venue.as_deref(), Some("Hall B"));
        assert!(EventPatch::default().is_empty());
    }
}
