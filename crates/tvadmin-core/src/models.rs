//! Snapshot entities fetched from the remote management API.
//!
//! Every optional property is an explicit `Option`; nothing in the
//! reconciliation code checks for missing keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a device is currently reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnlineState {
    Online,
    Offline,
}

/// A managed device, as seen at the start of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Opaque device identifier used by mutating calls.
    pub id: String,
    /// Display name (alias). Natural key within a run.
    pub name: String,
    /// Alternate identifier (TeamViewer ID), preferred over the name when matching.
    pub teamviewer_id: Option<String>,
    /// Group the device currently belongs to.
    pub group_id: Option<String>,
    pub online: OnlineState,
    pub last_seen: Option<DateTime<Utc>>,
    /// Whether the device is assigned to the calling account.
    pub assigned_to_caller: bool,
}

impl Device {
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.online == OnlineState::Online
    }
}

/// Permission level granted when a group is shared with a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SharePermission {
    Read,
    #[serde(rename = "readwrite")]
    ReadWrite,
    Full,
    Owned,
}

impl SharePermission {
    /// Wire representation used by the remote API.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SharePermission::Read => "read",
            SharePermission::ReadWrite => "readwrite",
            SharePermission::Full => "full",
            SharePermission::Owned => "owned",
        }
    }
}

impl fmt::Display for SharePermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SharePermission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "read" => Ok(SharePermission::Read),
            "readwrite" => Ok(SharePermission::ReadWrite),
            "full" => Ok(SharePermission::Full),
            "owned" => Ok(SharePermission::Owned),
            other => Err(format!("unknown share permission '{other}'")),
        }
    }
}

/// One user a group is shared with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupShare {
    pub user_id: String,
    pub permission: SharePermission,
}

/// A device group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    /// Natural key within a run.
    pub name: String,
    #[serde(default)]
    pub shares: Vec<GroupShare>,
}

impl Group {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            shares: Vec::new(),
        }
    }

    /// Whether `user_id` already appears among the group's shares.
    #[must_use]
    pub fn is_shared_with(&self, user_id: &str) -> bool {
        self.shares.iter().any(|s| s.user_id == user_id)
    }
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    /// Natural key within a run.
    pub email: String,
    pub name: String,
}

/// How a mapping entry names its device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSelector {
    pub name: String,
    pub teamviewer_id: Option<String>,
}

impl DeviceSelector {
    #[must_use]
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            teamviewer_id: None,
        }
    }

    #[must_use]
    pub fn with_teamviewer_id(mut self, teamviewer_id: impl Into<String>) -> Self {
        self.teamviewer_id = Some(teamviewer_id.into());
        self
    }
}

impl fmt::Display for DeviceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.teamviewer_id {
            Some(tv_id) => write!(f, "{} (TeamViewer ID {tv_id})", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// One desired-state assertion: `email` should be able to reach `device`
/// through its personal device group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub email: String,
    pub device: DeviceSelector,
}

impl MappingEntry {
    #[must_use]
    pub fn new(email: impl Into<String>, device: DeviceSelector) -> Self {
        Self {
            email: email.into(),
            device,
        }
    }
}
