//! The store handle and its lifecycle.
//!
//! A [`Store`] owns the in-memory maps and counters and the [`Backend`]
//! they are mirrored to. Handles are cheap to clone and all clones share
//! one state.
//!
//! # Write discipline
//!
//! Every mutation runs under the state lock:
//!
//! ```text
//! lock -> apply to maps -> persist whole snapshot -+-> ok: unlock, return record
//!                                                  +-> err: undo change, unlock, WRITE ERROR
//! ```
//!
//! The lock is held across the write, so mutations are serialized and the
//! in-memory view always equals the last snapshot that was persisted.
//!
//! # Construction
//!
//! [`Store::open`] returns only after the snapshot has been loaded, so a
//! handle is never observed before it is ready. [`Store::in_memory`] builds
//! an isolated volatile store from explicit contents. [`shared`] and
//! [`install_shared_in_memory`] manage an optional process-wide handle.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard, OnceCell};

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::event_store::EventStore;
use crate::guest_store::GuestStore;
use crate::persistence::Backend;
use crate::snapshot::{Snapshot, StoreState};

/// Process-wide handle, set at most once.
static SHARED: OnceCell<Store> = OnceCell::const_new();

/// Handle to an event and guest store.
#[derive(Clone)]
pub struct Store {
    inner: Arc<Inner>,
}

struct Inner {
    backend: Backend,
    state: Mutex<StoreState>,
}

impl Store {
    /// Open the store described by `config`.
    ///
    /// For a file-backed store this creates the data directory if needed and
    /// loads the snapshot file when present. A missing or empty file yields
    /// an empty store.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] with code `READ ERROR` if the directory
    /// cannot be created or the file cannot be read or decoded.
    pub async fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        let backend = Backend::from_config(config);

        let state = match backend.initialize().await {
            Ok(Some(snapshot)) => StoreState::from_snapshot(snapshot),
            Ok(None) => StoreState::default(),
            Err(e) => {
                tracing::error!(error = %e, code = %e.code(), "failed to load store");
                return Err(e);
            }
        };

        tracing::info!(
            path = ?backend.path(),
            events = state.events.len(),
            guests = state.guests.len(),
            "store opened"
        );

        Ok(Self::from_parts(backend, state))
    }

    /// Open the store, terminating the process if it cannot be loaded.
    ///
    /// This is the startup path for applications: a store that cannot be
    /// read is not run in a degraded mode.
    pub async fn open_or_exit(config: &StoreConfig) -> Self {
        match Self::open(config).await {
            Ok(store) => store,
            Err(e) => {
                tracing::error!(error = %e, "cannot start with an unreadable store, exiting");
                std::process::exit(1)
            }
        }
    }

    /// An empty volatile store.
    pub fn volatile() -> Self {
        Self::from_parts(Backend::Volatile, StoreState::default())
    }

    /// A volatile store seeded with explicit contents.
    ///
    /// Nothing is read from or written to disk. Counters below the largest
    /// seeded id are raised to it.
    pub fn in_memory(seed: Snapshot) -> Self {
        Self::from_parts(Backend::Volatile, StoreState::from_snapshot(seed))
    }

    fn from_parts(backend: Backend, state: StoreState) -> Self {
        Self {
            inner: Arc::new(Inner {
                backend,
                state: Mutex::new(state),
            }),
        }
    }

    /// Event operations on this store.
    pub const fn events(&self) -> EventStore<'_> {
        EventStore::new(self)
    }

    /// Guest operations on this store.
    pub const fn guests(&self) -> GuestStore<'_> {
        GuestStore::new(self)
    }

    /// Copy of the current contents.
    pub async fn snapshot(&self) -> Snapshot {
        self.lock().await.to_snapshot()
    }

    /// Returns `true` if this store never touches disk.
    pub fn is_volatile(&self) -> bool {
        self.inner.backend.is_volatile()
    }

    /// Path of the snapshot file, or `None` for a volatile store.
    pub fn path(&self) -> Option<&Path> {
        self.inner.backend.path()
    }

    /// Returns `true` if both handles refer to the same store.
    pub fn same_store(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) async fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.inner.state.lock().await
    }

    /// Persist `state`, or run `undo` on it and return the write error.
    ///
    /// Callers hold the state lock and have already applied their change.
    pub(crate) async fn commit(
        &self,
        state: &mut StoreState,
        undo: impl FnOnce(&mut StoreState),
    ) -> Result<(), StoreError> {
        match self.inner.backend.persist(&*state).await {
            Ok(()) => Ok(()),
            Err(e) => {
                undo(state);
                tracing::error!(error = %e, "persist failed, in-memory change rolled back");
                Err(e)
            }
        }
    }
}

impl core::fmt::Debug for Store {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Store")
            .field("backend", &self.inner.backend)
            .finish_non_exhaustive()
    }
}

/// The process-wide store, opening it from `config` on first use.
///
/// Later calls return the same handle and ignore `config`. Concurrent first
/// calls wait for the single initialization, and no caller receives the
/// handle before loading has finished.
///
/// # Errors
///
/// Returns the [`StoreError`] from [`Store::open`]. The global stays unset
/// so a later call may retry.
pub async fn shared(config: &StoreConfig) -> Result<Store, StoreError> {
    SHARED
        .get_or_try_init(|| Store::open(config))
        .await
        .cloned()
}

/// Install a seeded volatile store as the process-wide store.
///
/// Has no effect if a process-wide store already exists; the existing
/// handle is returned in that case.
pub async fn install_shared_in_memory(seed: Snapshot) -> Store {
    SHARED
        .get_or_init(|| async { Store::in_memory(seed) })
        .await
        .clone()
}

/// The process-wide store, if one has been initialized.
pub fn shared_handle() -> Option<Store> {
    SHARED.get().cloned()
}
