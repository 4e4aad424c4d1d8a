//! Type-safe identifier wrappers around store-assigned integers.
//!
//! Events and guests are numbered by independent monotonic counters held by
//! the store. Wrapping the raw integers keeps an event id from being passed
//! where a guest id is expected. On the wire both serialize as bare numbers.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a newtype wrapper around [`u64`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub u64);

        impl $name {
            /// Wrap a raw integer identifier.
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Return the inner integer value.
            pub const fn into_inner(self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Identifier of an event, unique across the store.
    EventId
}

define_id! {
    /// Identifier of a guest, unique across all events (not per event).
    GuestId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_bare_numbers() {
        let json = serde_json::to_string(&EventId::new(7)).ok();
        assert_eq!(json.as_deref(), Some("7"));

        let restored: Option<GuestId> = serde_json::from_str("42").ok();
        assert_eq!(restored, Some(GuestId::new(42)));
    }

    #[test]
    fn id_display_matches_inner() {
        let id = GuestId::from(13);
        assert_eq!(id.to_string(), "13");
        assert_eq!(u64::from(id), 13);
    }
}
