//! Tests for the process-wide store handle.
//!
//! The global can be set only once per process, so everything that depends
//! on it runs in this single test binary, in one test.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use guestbook_store::{
    Snapshot, Store, StoreConfig, install_shared_in_memory, shared, shared_handle,
};
use guestbook_types::EventId;

#[tokio::test]
async fn first_initialization_wins() {
    assert!(shared_handle().is_none());

    let seed = Snapshot {
        event_counter: 41,
        ..Snapshot::default()
    };
    let installed = install_shared_in_memory(seed).await;
    assert!(installed.is_volatile());

    // Opening with a file-backed config now returns the existing handle.
    let tmp = tempfile::TempDir::new().unwrap();
    let opened = shared(&StoreConfig::new(tmp.path())).await.unwrap();
    assert!(opened.same_store(&installed));
    assert!(opened.is_volatile());
    assert!(!tmp.path().join("db.json").exists());

    // A second install is ignored.
    let again = install_shared_in_memory(Snapshot::default()).await;
    assert!(again.same_store(&installed));

    let event = again
        .events()
        .create_event(guestbook_types::NewEvent {
            title: "Launch".to_owned(),
            organizer: "Ops".to_owned(),
            venue: "Dock".to_owned(),
            description: String::new(),
            start: chrono::DateTime::default(),
            end: chrono::DateTime::default(),
            status: guestbook_types::EventStatus::Pending,
        })
        .await
        .unwrap();
    assert_eq!(event.id, EventId::new(42));

    let handle = shared_handle().expect("global is set");
    assert!(handle.same_store(&installed));

    // Isolated stores are unaffected by the global.
    let isolated = Store::volatile();
    assert!(!isolated.same_store(&handle));
    assert!(isolated.events().get_all_events().await.is_empty());
}
