//! Event operations.
//!
//! Events are created, read, filtered, and updated. There is no delete.
//! Results that return several events are ordered by ascending id.

use guestbook_types::{Event, EventId, EventPatch, EventStatus, NewEvent};
use serde::Deserialize;

use crate::error::StoreError;
use crate::store::Store;

/// Conditions for [`EventStore::filter_events`].
///
/// Every condition that is set must hold. Unset conditions, and text
/// conditions set to an empty string, match every event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EventFilter {
    /// Case-sensitive substring of the title.
    #[serde(default)]
    pub keyword: Option<String>,
    /// Exact status.
    #[serde(default)]
    pub status: Option<EventStatus>,
    /// Exact venue.
    #[serde(default, alias = "venu")]
    pub venue: Option<String>,
    /// Exact organizer.
    #[serde(default)]
    pub organizer: Option<String>,
}

impl EventFilter {
    /// A filter that matches every event.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `keyword` to appear in the title.
    #[must_use]
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// Require this status.
    #[must_use]
    pub const fn status(mut self, status: EventStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Require this venue.
    #[must_use]
    pub fn venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = Some(venue.into());
        self
    }

    /// Require this organizer.
    #[must_use]
    pub fn organizer(mut self, organizer: impl Into<String>) -> Self {
        self.organizer = Some(organizer.into());
        self
    }

    /// Returns `true` if `event` satisfies every active condition.
    pub fn matches(&self, event: &Event) -> bool {
        active(self.keyword.as_ref()).is_none_or(|k| event.title.contains(k))
            && self.status.is_none_or(|s| event.status == s)
            && active(self.venue.as_ref()).is_none_or(|v| event.venue == v)
            && active(self.organizer.as_ref()).is_none_or(|o| event.organizer == o)
    }
}

/// An empty text condition is treated as unset.
fn active(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

/// Event operations on a [`Store`].
pub struct EventStore<'a> {
    store: &'a Store,
}

impl<'a> EventStore<'a> {
    /// Bind event operations to a store.
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Create an event with the next event id.
    ///
    /// # Errors
    ///
    /// Returns a `WRITE ERROR` if the snapshot cannot be persisted; the
    /// event is then absent and the counter unchanged.
    pub async fn create_event(&self, new: NewEvent) -> Result<Event, StoreError> {
        let mut state = self.store.lock().await;

        let previous_counter = state.event_counter;
        let id = state.next_event_id()?;
        let event = new.into_event(id);
        state.events.insert(id, event.clone());

        self.store
            .commit(&mut state, |s| {
                s.events.remove(&id);
                s.event_counter = previous_counter;
            })
            .await?;

        tracing::debug!(event_id = %id, title = %event.title, "created event");
        Ok(event)
    }

    /// All events.
    pub async fn get_all_events(&self) -> Vec<Event> {
        self.store.lock().await.events.values().cloned().collect()
    }

    /// Events satisfying `filter`.
    pub async fn filter_events(&self, filter: &EventFilter) -> Vec<Event> {
        self.store
            .lock()
            .await
            .events
            .values()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect()
    }

    /// The event with this id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EventNotFound`] if there is none.
    pub async fn get_event_by_id(&self, id: EventId) -> Result<Event, StoreError> {
        self.store
            .lock()
            .await
            .events
            .get(&id)
            .cloned()
            .ok_or(StoreError::EventNotFound(id))
    }

    /// Apply `patch` to the event with this id and return the result.
    ///
    /// Only fields present in the patch change. An empty patch returns the
    /// event without writing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EventNotFound`] if there is no such event, or a
    /// `WRITE ERROR` if the snapshot cannot be persisted; the previous record
    /// is then restored.
    pub async fn update_event(&self, id: EventId, patch: EventPatch) -> Result<Event, StoreError> {
        let mut state = self.store.lock().await;

        let current = state.events.get(&id).ok_or(StoreError::EventNotFound(id))?;
        if patch.is_empty() {
            return Ok(current.clone());
        }

        let updated = patch.apply(current);
        let previous = state.events.insert(id, updated.clone());

        self.store
            .commit(&mut state, move |s| {
                if let Some(previous) = previous {
                    s.events.insert(id, previous);
                }
            })
            .await?;

        tracing::debug!(event_id = %id, status = %updated.status, "updated event");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;

    fn event(title: &str, status: EventStatus, venue: &str) -> Event {
        Event {
            id: EventId::new(1),
            title: title.to_owned(),
            organizer: "Org".to_owned(),
            venue: venue.to_owned(),
            description: String::new(),
            start: DateTime::<Utc>::default(),
            end: DateTime::<Utc>::default(),
            status,
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let e = event("Gala", EventStatus::Pending, "Hall A");
        assert!(EventFilter::new().matches(&e));
        assert!(EventFilter::new().keyword("").venue("").matches(&e));
    }

    #[test]
    fn keyword_is_case_sensitive_substring() {
        let e = event("Gala Night", EventStatus::Running, "Hall A");
        assert!(EventFilter::new().keyword("la Ni").matches(&e));
        assert!(!EventFilter::new().keyword("gala").matches(&e));
    }

    #[test]
    fn conditions_are_combined_with_and() {
        let e = event("Gala", EventStatus::Pending, "Hall A");
        assert!(EventFilter::new().keyword("Gala").venue("Hall A").matches(&e));
        assert!(!EventFilter::new()
            .keyword("Gala")
            .status(EventStatus::Running)
            .matches(&e));
        assert!(!EventFilter::new().venue("Hall").matches(&e));
        assert!(!EventFilter::new().organizer("Someone").matches(&e));
    }

    #[test]
    fn filter_deserializes_query_shape() {
        let filter: EventFilter =
            serde_json::from_str(r#"{"keyword":"Gala","status":"RUNNING","venu":"Hall A"}"#)
                .unwrap_or_default();
        assert_eq!(
            filter,
            EventFilter::new()
                .keyword("Gala")
                .status(EventStatus::Running)
                .venue("Hall A")
        );
    }
}
