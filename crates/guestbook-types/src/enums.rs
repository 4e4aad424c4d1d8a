//! Enumerated status and category values.
//!
//! All three enums serialize as upper-case strings (`PENDING`, `MALE`,
//! `NOTSET`), which is the form stored in the snapshot file.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Lifecycle status of an event.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export, export_to = "bindings/")]
pub enum EventStatus {
    /// Scheduled but not started.
    #[default]
    Pending,
    /// Currently taking place.
    Running,
    /// Called off before it finished.
    Canceled,
    /// Took place and ended.
    Finished,
}

impl EventStatus {
    /// The wire name of this status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Running => "RUNNING",
            Self::Canceled => "CANCELED",
            Self::Finished => "FINISHED",
        }
    }
}

/// Whether a guest has been seen at the event.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export, export_to = "bindings/")]
pub enum GuestStatus {
    /// Not checked in or out yet.
    #[default]
    NotSet,
    /// Checked in.
    Present,
    /// Marked as not attending.
    Absent,
}

impl GuestStatus {
    /// The wire name of this status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotSet => "NOTSET",
            Self::Present => "PRESENT",
            Self::Absent => "ABSENT",
        }
    }
}

/// Sex recorded for a guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export, export_to = "bindings/")]
pub enum Sex {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Any other value, or not disclosed.
    Other,
}

impl Sex {
    /// The wire name of this value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
            Self::Other => "OTHER",
        }
    }
}

impl core::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::fmt::Display for GuestStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::fmt::Display for Sex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_display() {
        for status in [
            EventStatus::Pending,
            EventStatus::Running,
            EventStatus::Canceled,
            EventStatus::Finished,
        ] {
            let json = serde_json::to_string(&status).ok();
            assert_eq!(json, Some(format!("\"{status}\"")));
        }

        let json = serde_json::to_string(&GuestStatus::NotSet).ok();
        assert_eq!(json.as_deref(), Some("\"NOTSET\""));
    }

    #[test]
    fn parses_upper_case_values() {
        let sex: Option<Sex> = serde_json::from_str("\"FEMALE\"").ok();
        assert_eq!(sex, Some(Sex::Female));

        let bad: Result<Sex, _> = serde_json::from_str("\"female\"");
        assert!(bad.is_err());
    }

    #[test]
    fn defaults() {
        assert_eq!(EventStatus::default(), EventStatus::Pending);
        assert_eq!(GuestStatus::default(), GuestStatus::NotSet);
    }
}
