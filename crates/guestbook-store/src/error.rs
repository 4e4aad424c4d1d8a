//! Error types for the store.
//!
//! Every failure surfaced to callers is a [`StoreError`]. Its `Display`
//! output is the human-readable message and [`StoreError::code`] gives the
//! coarse [`ErrorCode`] a transport layer can report.

use std::path::PathBuf;

use guestbook_types::{EventId, GuestId};

/// Coarse failure class carried by every [`StoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The snapshot could not be read or decoded.
    ReadError,
    /// A mutation could not be persisted and was rolled back.
    WriteError,
    /// No record exists with the requested id.
    NotFound,
}

impl ErrorCode {
    /// The code as reported to callers.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReadError => "READ ERROR",
            Self::WriteError => "WRITE ERROR",
            Self::NotFound => "NOT FOUND",
        }
    }
}

impl core::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur in the store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The data directory could not be created.
    #[error("failed to create data directory {}: {source}", path.display())]
    CreateDir {
        /// Directory that was being created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The snapshot file exists but could not be read.
    #[error("failed to read store file {}: {source}", path.display())]
    Read {
        /// Snapshot file path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The snapshot file is not valid snapshot JSON.
    #[error("store file {} is not a valid snapshot: {source}", path.display())]
    Decode {
        /// Snapshot file path.
        path: PathBuf,
        /// The underlying parse error.
        source: serde_json::Error,
    },

    /// Writing the snapshot file failed.
    #[error("failed to write store file {}: {source}", path.display())]
    Write {
        /// File that was being written or renamed into place.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The in-memory state could not be serialized.
    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    /// No event exists with this id.
    #[error("event {0} not found")]
    EventNotFound(EventId),

    /// No guest exists with this id.
    #[error("guest {0} not found")]
    GuestNotFound(GuestId),

    /// An id counter reached its maximum value.
    #[error("{0} id counter exhausted")]
    IdExhausted(&'static str),
}

impl StoreError {
    /// The failure class of this error.
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::CreateDir { .. } | Self::Read { .. } | Self::Decode { .. } => {
                ErrorCode::ReadError
            }
            Self::Write { .. } | Self::Encode(_) | Self::IdExhausted(_) => ErrorCode::WriteError,
            Self::EventNotFound(_) | Self::GuestNotFound(_) => ErrorCode::NotFound,
        }
    }

    /// Returns `true` if this is a lookup miss.
    pub const fn is_not_found(&self) -> bool {
        matches!(self.code(), ErrorCode::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_render_with_spaces() {
        assert_eq!(ErrorCode::ReadError.to_string(), "READ ERROR");
        assert_eq!(ErrorCode::WriteError.to_string(), "WRITE ERROR");
        assert_eq!(ErrorCode::NotFound.to_string(), "NOT FOUND");
    }

    #[test]
    fn variants_map_to_codes() {
        let missing = StoreError::EventNotFound(EventId::new(3));
        assert_eq!(missing.code(), ErrorCode::NotFound);
        assert!(missing.is_not_found());
        assert_eq!(missing.to_string(), "event 3 not found");

        let write = StoreError::Write {
            path: PathBuf::from("data/db.json"),
            source: std::io::Error::other("disk full"),
        };
        assert_eq!(write.code(), ErrorCode::WriteError);

        let read = StoreError::Read {
            path: PathBuf::from("data/db.json"),
            source: std::io::Error::other("denied"),
        };
        assert_eq!(read.code(), ErrorCode::ReadError);
    }
}
