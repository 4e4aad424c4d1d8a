//! Guest operations.
//!
//! Guests are keyed by a store-wide id and belong to one event. Listing by
//! event is a linear scan over all guests. Every operation that names an
//! event, including registration, checks that the event exists.

use guestbook_types::{EventId, Guest, GuestId, GuestPatch, NewGuest};

use crate::error::StoreError;
use crate::store::Store;

/// Guest operations on a [`Store`].
pub struct GuestStore<'a> {
    store: &'a Store,
}

impl<'a> GuestStore<'a> {
    /// Bind guest operations to a store.
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Register a guest for an existing event with the next guest id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EventNotFound`] if the event does not exist, or
    /// a `WRITE ERROR` if the snapshot cannot be persisted; the guest is then
    /// absent and the counter unchanged.
    pub async fn add_guest_for_event(
        &self,
        event_id: EventId,
        new: NewGuest,
    ) -> Result<Guest, StoreError> {
        let mut state = self.store.lock().await;

        if !state.events.contains_key(&event_id) {
            return Err(StoreError::EventNotFound(event_id));
        }

        let previous_counter = state.guest_counter;
        let id = state.next_guest_id()?;
        let guest = new.into_guest(id, event_id);
        state.guests.insert(id, guest.clone());

        self.store
            .commit(&mut state, |s| {
                s.guests.remove(&id);
                s.guest_counter = previous_counter;
            })
            .await?;

        tracing::debug!(guest_id = %id, event_id = %event_id, "added guest");
        Ok(guest)
    }

    /// All guests of an event, in ascending id order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EventNotFound`] if the event does not exist. An
    /// existing event without guests yields an empty list.
    pub async fn get_all_guests_for_event(
        &self,
        event_id: EventId,
    ) -> Result<Vec<Guest>, StoreError> {
        self.guests_matching(event_id, |_| true).await
    }

    /// The guest with this id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::GuestNotFound`] if there is none.
    pub async fn get_guest_by_id(&self, id: GuestId) -> Result<Guest, StoreError> {
        self.store
            .lock()
            .await
            .guests
            .get(&id)
            .cloned()
            .ok_or(StoreError::GuestNotFound(id))
    }

    /// Guests of an event whose first or last name contains `keyword`.
    ///
    /// Matching is a case-sensitive substring test without trimming.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EventNotFound`] if the event does not exist.
    pub async fn filter_guests_for_event(
        &self,
        event_id: EventId,
        keyword: &str,
    ) -> Result<Vec<Guest>, StoreError> {
        self.guests_matching(event_id, |g| {
            g.firstname.contains(keyword) || g.lastname.contains(keyword)
        })
        .await
    }

    /// Apply `patch` to the guest with this id and return the result.
    ///
    /// Only fields present in the patch change. An empty patch returns the
    /// guest without writing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::GuestNotFound`] if there is no such guest, or a
    /// `WRITE ERROR` if the snapshot cannot be persisted; the previous record
    /// is then restored.
    pub async fn update_guest(&self, id: GuestId, patch: GuestPatch) -> Result<Guest, StoreError> {
        let mut state = self.store.lock().await;

        let current = state.guests.get(&id).ok_or(StoreError::GuestNotFound(id))?;
        if patch.is_empty() {
            return Ok(current.clone());
        }

        let updated = patch.apply(current);
        let previous = state.guests.insert(id, updated.clone());

        self.store
            .commit(&mut state, move |s| {
                if let Some(previous) = previous {
                    s.guests.insert(id, previous);
                }
            })
            .await?;

        tracing::debug!(guest_id = %id, is_present = %updated.is_present, "updated guest");
        Ok(updated)
    }

    /// Delete the guest with this id and return the removed record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::GuestNotFound`] if there is no such guest, or a
    /// `WRITE ERROR` if the snapshot cannot be persisted; the guest is then
    /// reinserted.
    pub async fn remove_guest(&self, id: GuestId) -> Result<Guest, StoreError> {
        let mut state = self.store.lock().await;

        let removed = state
            .guests
            .remove(&id)
            .ok_or(StoreError::GuestNotFound(id))?;

        let restore = removed.clone();
        self.store
            .commit(&mut state, move |s| {
                s.guests.insert(id, restore);
            })
            .await?;

        tracing::debug!(guest_id = %id, event_id = %removed.event_id, "removed guest");
        Ok(removed)
    }

    async fn guests_matching(
        &self,
        event_id: EventId,
        keep: impl Fn(&Guest) -> bool,
    ) -> Result<Vec<Guest>, StoreError> {
        let state = self.store.lock().await;

        if !state.events.contains_key(&event_id) {
            return Err(StoreError::EventNotFound(event_id));
        }

        Ok(state
            .guests
            .values()
            .filter(|&g| g.event_id == event_id && keep(g))
            .cloned()
            .collect())
    }
}
