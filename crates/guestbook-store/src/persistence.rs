//! File I/O boundary between the store and its snapshot file.
//!
//! A [`Backend`] is either file-backed or volatile. It keeps no state
//! between calls: the store hands it the whole snapshot on every write and
//! receives the whole snapshot on load.
//!
//! Writes always replace the entire file. The new document is written and
//! synced to a sibling `.tmp` file, then renamed over the snapshot, so the
//! file on disk is always the last snapshot that was fully written.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::io::AsyncWriteExt;

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::snapshot::Snapshot;

/// Where snapshots are read from and written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    /// A JSON snapshot file on disk.
    File {
        /// Path of the snapshot file.
        path: PathBuf,
    },
    /// No storage. Loads find nothing and persists always succeed.
    Volatile,
}

impl Backend {
    /// Build the backend selected by `config`.
    pub fn from_config(config: &StoreConfig) -> Self {
        config
            .file_path()
            .map_or(Self::Volatile, |path| Self::File { path })
    }

    /// Path of the snapshot file, or `None` when volatile.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File { path } => Some(path),
            Self::Volatile => None,
        }
    }

    /// Returns `true` if this backend never touches disk.
    pub const fn is_volatile(&self) -> bool {
        matches!(self, Self::Volatile)
    }

    /// Prepare storage and load any existing snapshot.
    ///
    /// Creates the containing directory (recursively) when missing, then
    /// loads the file. Volatile backends do nothing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CreateDir`] if the directory cannot be created,
    /// or any error from [`Backend::load`].
    pub async fn initialize(&self) -> Result<Option<Snapshot>, StoreError> {
        let Self::File { path } = self else {
            return Ok(None);
        };

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|source| StoreError::CreateDir {
                    path: dir.to_path_buf(),
                    source,
                })?;
        }

        self.load().await
    }

    /// Read the snapshot file.
    ///
    /// Returns `Ok(None)` when there is no prior data: the backend is
    /// volatile, the file does not exist, or the file is empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] if the file cannot be read, or
    /// [`StoreError::Decode`] if its content is not a valid snapshot.
    pub async fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        let Self::File { path } = self else {
            return Ok(None);
        };

        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no store file yet");
                return Ok(None);
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: path.clone(),
                    source,
                });
            }
        };

        if text.trim().is_empty() {
            tracing::debug!(path = %path.display(), "store file is empty");
            return Ok(None);
        }

        let snapshot: Snapshot =
            serde_json::from_str(&text).map_err(|source| StoreError::Decode {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(
            path = %path.display(),
            events = snapshot.events.len(),
            guests = snapshot.guests.len(),
            "loaded store file"
        );
        Ok(Some(snapshot))
    }

    /// Replace the snapshot file with `snapshot`.
    ///
    /// Volatile backends do nothing and always succeed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Encode`] if serialization fails, or
    /// [`StoreError::Write`] if the file cannot be written or moved into place.
    pub async fn persist<S: Serialize + Sync>(&self, snapshot: &S) -> Result<(), StoreError> {
        let Self::File { path } = self else {
            return Ok(());
        };

        let bytes = serde_json::to_vec_pretty(snapshot).map_err(StoreError::Encode)?;
        let tmp = temp_path(path);

        if let Err(source) = write_synced(&tmp, &bytes).await {
            discard(&tmp).await;
            return Err(StoreError::Write { path: tmp, source });
        }

        if let Err(source) = tokio::fs::rename(&tmp, path).await {
            discard(&tmp).await;
            return Err(StoreError::Write {
                path: path.clone(),
                source,
            });
        }

        tracing::debug!(path = %path.display(), bytes = bytes.len(), "persisted snapshot");
        Ok(())
    }
}

/// Write `bytes` to a fresh file at `path` and flush it to disk.
async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

/// Best-effort removal of a leftover temp file.
async fn discard(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), error = %e, "could not remove temp file");
        }
        _ => {}
    }
}

/// `db.json` -> `db.json.tmp`, in the same directory.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(OsString::new, std::ffi::OsStr::to_os_string);
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_is_a_sibling() {
        let tmp = temp_path(Path::new("data/db.json"));
        assert_eq!(tmp, PathBuf::from("data/db.json.tmp"));
    }

    #[test]
    fn config_selects_backend() {
        let file = Backend::from_config(&StoreConfig::new("data"));
        assert_eq!(file.path(), Some(Path::new("data/db.json")));
        assert!(!file.is_volatile());

        let volatile = Backend::from_config(&StoreConfig::in_memory());
        assert!(volatile.is_volatile());
        assert_eq!(volatile.path(), None);
    }

    #[tokio::test]
    async fn volatile_backend_skips_io() {
        let backend = Backend::Volatile;
        assert!(matches!(backend.initialize().await, Ok(None)));
        assert!(backend.persist(&Snapshot::default()).await.is_ok());
    }
}
