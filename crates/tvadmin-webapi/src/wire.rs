//! JSON shapes of the Web API v1 and their conversion into the domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tvadmin_core::{Device, Group, GroupShare, OnlineState, SharePermission, User};

/// `GET /devices`
#[derive(Debug, Deserialize)]
pub struct DeviceList {
    #[serde(default)]
    pub devices: Vec<WireDevice>,
}

#[derive(Debug, Deserialize)]
pub struct WireDevice {
    pub device_id: String,
    #[serde(default)]
    pub alias: String,
    /// `r` followed by the TeamViewer ID, e.g. `r123456789`.
    #[serde(default)]
    pub remotecontrol_id: Option<String>,
    #[serde(default)]
    pub groupid: Option<String>,
    #[serde(default)]
    pub online_state: Option<String>,
    #[serde(default)]
    pub assigned_to: bool,
    #[serde(default)]
    pub last_seen: Option<DateTime<Utc>>,
}

impl From<WireDevice> for Device {
    fn from(wire: WireDevice) -> Self {
        let online = match wire.online_state.as_deref() {
            Some(state) if state.eq_ignore_ascii_case("online") => OnlineState::Online,
            _ => OnlineState::Offline,
        };
        let teamviewer_id = wire
            .remotecontrol_id
            .map(|id| id.trim_start_matches('r').to_string())
            .filter(|id| !id.is_empty());
        Device {
            id: wire.device_id,
            name: wire.alias,
            teamviewer_id,
            group_id: wire.groupid.filter(|g| !g.is_empty()),
            online,
            last_seen: wire.last_seen,
            assigned_to_caller: wire.assigned_to,
        }
    }
}

/// `GET /groups`
#[derive(Debug, Deserialize)]
pub struct GroupList {
    #[serde(default)]
    pub groups: Vec<WireGroup>,
}

#[derive(Debug, Deserialize)]
pub struct WireGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub shared_with: Vec<WireShare>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WireShare {
    pub userid: String,
    #[serde(default)]
    pub permissions: String,
}

impl From<WireGroup> for Group {
    fn from(wire: WireGroup) -> Self {
        let shares = wire
            .shared_with
            .into_iter()
            .map(|share| GroupShare {
                // Unknown permission strings still mark the group as shared.
                permission: share.permissions.parse().unwrap_or(SharePermission::Read),
                user_id: share.userid,
            })
            .collect();
        Group {
            id: wire.id,
            name: wire.name,
            shares,
        }
    }
}

/// `GET /users`
#[derive(Debug, Deserialize)]
pub struct UserList {
    #[serde(default)]
    pub users: Vec<WireUser>,
}

#[derive(Debug, Deserialize)]
pub struct WireUser {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub email: String,
}

impl From<WireUser> for User {
    fn from(wire: WireUser) -> Self {
        User {
            id: wire.id,
            email: wire.email,
            name: wire.name,
        }
    }
}

/// `POST /groups` request.
#[derive(Debug, Serialize)]
pub struct CreateGroupRequest<'a> {
    pub name: &'a str,
}

/// `POST /groups` response.
#[derive(Debug, Deserialize)]
pub struct CreatedGroup {
    pub id: String,
    pub name: String,
}

/// `PUT /devices/{id}` request.
#[derive(Debug, Serialize)]
pub struct UpdateDeviceRequest<'a> {
    pub groupid: &'a str,
}

/// `POST /groups/{id}/share_group` request.
#[derive(Debug, Serialize)]
pub struct ShareGroupRequest {
    pub users: Vec<WireShare>,
}
