//! Store configuration.
//!
//! The only setting is where the snapshot lives: a directory that will hold
//! [`STORE_FILE_NAME`], or the [`IN_MEMORY_SENTINEL`] value selecting a
//! volatile store that never touches disk.
//!
//! Hosts either build a [`StoreConfig`] directly, load it from the
//! environment with [`StoreConfig::from_env`], or embed it in their own
//! serde-deserialized configuration file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// File name of the snapshot inside the data directory.
pub const STORE_FILE_NAME: &str = "db.json";

/// Data directory value that selects a volatile, in-memory store.
pub const IN_MEMORY_SENTINEL: &str = ":memory:";

/// Environment variable read by [`StoreConfig::from_env`].
pub const DATA_DIR_ENV: &str = "GUESTBOOK_DATA_DIR";

/// Data directory used when none is configured.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Errors that can occur when building configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The data directory value is unusable.
    #[error("invalid data directory {value:?}: {reason}")]
    InvalidDataDir {
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

/// Where the snapshot is kept.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum StorageLocation {
    /// A directory holding [`STORE_FILE_NAME`]. Created on open if absent.
    Directory(PathBuf),
    /// No backing file; every persist is a no-op.
    InMemory,
}

impl StorageLocation {
    /// Parse a configured data directory value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDataDir`] for an empty or blank value.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(ConfigError::InvalidDataDir {
                value: raw.to_owned(),
                reason: "must not be empty",
            });
        }
        if value == IN_MEMORY_SENTINEL {
            return Ok(Self::InMemory);
        }
        Ok(Self::Directory(PathBuf::from(value)))
    }
}

impl TryFrom<String> for StorageLocation {
    type Error = ConfigError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

/// Complete store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    /// Where the snapshot is kept.
    #[serde(default = "default_location")]
    pub data_dir: StorageLocation,
}

impl StoreConfig {
    /// A file-backed store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: StorageLocation::Directory(dir.into()),
        }
    }

    /// A volatile store with no backing file.
    pub const fn in_memory() -> Self {
        Self {
            data_dir: StorageLocation::InMemory,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Optional variables:
    /// - `GUESTBOOK_DATA_DIR` -- data directory, or `:memory:` (default `data`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDataDir`] if the variable is set but blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDataDir`] if the data directory is blank.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw = lookup(DATA_DIR_ENV).unwrap_or_else(|| DEFAULT_DATA_DIR.to_owned());
        Ok(Self {
            data_dir: StorageLocation::parse(&raw)?,
        })
    }

    /// Full path of the snapshot file, or `None` for a volatile store.
    pub fn file_path(&self) -> Option<PathBuf> {
        match &self.data_dir {
            StorageLocation::Directory(dir) => Some(dir.join(STORE_FILE_NAME)),
            StorageLocation::InMemory => None,
        }
    }

    /// The data directory, or `None` for a volatile store.
    pub fn dir(&self) -> Option<&Path> {
        match &self.data_dir {
            StorageLocation::Directory(dir) => Some(dir),
            StorageLocation::InMemory => None,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

fn default_location() -> StorageLocation {
    StorageLocation::Directory(PathBuf::from(DEFAULT_DATA_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_defaults_to_data_dir() {
        let config = StoreConfig::from_lookup(|_| None).ok();
        assert_eq!(config, Some(StoreConfig::default()));
        assert_eq!(
            StoreConfig::default().file_path(),
            Some(PathBuf::from("data").join("db.json"))
        );
    }

    #[test]
    fn sentinel_selects_in_memory() {
        let config = StoreConfig::from_lookup(|_| Some(":memory:".to_owned())).ok();
        assert_eq!(config, Some(StoreConfig::in_memory()));
        assert_eq!(StoreConfig::in_memory().file_path(), None);
    }

    #[test]
    fn blank_dir_is_rejected() {
        let result = StoreConfig::from_lookup(|_| Some("  ".to_owned()));
        assert!(matches!(result, Err(ConfigError::InvalidDataDir { .. })));
    }

    #[test]
    fn deserializes_from_json() {
        let config: Option<StoreConfig> =
            serde_json::from_str(r#"{"data_dir":"/var/lib/guestbook"}"#).ok();
        assert_eq!(config, Some(StoreConfig::new("/var/lib/guestbook")));

        let config: Option<StoreConfig> = serde_json::from_str("{}").ok();
        assert_eq!(config, Some(StoreConfig::default()));
    }
}
