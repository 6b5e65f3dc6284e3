//! In-memory lookup maps over one run's snapshot.
//!
//! Devices and users are last-write-wins on duplicate keys. Groups keep the
//! first group seen for a name, so a remotely duplicated group name always
//! resolves to the same group for the whole run.

use std::collections::HashMap;

use tvadmin_core::{Device, Group, GroupShare, User};

/// Lookup maps built from flat collections.
///
/// The group half is the run-local cache: groups created (or shared) during
/// the run are written back here so later entries see them.
#[derive(Debug, Clone, Default)]
pub struct ResourceIndex {
    devices_by_name: HashMap<String, Device>,
    devices_by_teamviewer_id: HashMap<String, Device>,
    users_by_email: HashMap<String, User>,
    groups: Vec<Group>,
    group_by_name: HashMap<String, usize>,
    group_by_id: HashMap<String, usize>,
}

impl ResourceIndex {
    /// Build an index from snapshot collections, in input order.
    #[must_use]
    pub fn build(devices: Vec<Device>, groups: Vec<Group>, users: Vec<User>) -> Self {
        let mut index = Self::default();
        for device in devices {
            if let Some(tv_id) = &device.teamviewer_id {
                index
                    .devices_by_teamviewer_id
                    .insert(tv_id.clone(), device.clone());
            }
            index.devices_by_name.insert(device.name.clone(), device);
        }
        for user in users {
            index.users_by_email.insert(user.email.clone(), user);
        }
        for group in groups {
            index.insert_group(group);
        }
        index
    }

    #[must_use]
    pub fn device_by_name(&self, name: &str) -> Option<&Device> {
        self.devices_by_name.get(name)
    }

    #[must_use]
    pub fn device_by_teamviewer_id(&self, teamviewer_id: &str) -> Option<&Device> {
        self.devices_by_teamviewer_id.get(teamviewer_id)
    }

    #[must_use]
    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users_by_email.get(email)
    }

    #[must_use]
    pub fn group_by_name(&self, name: &str) -> Option<&Group> {
        self.group_by_name.get(name).map(|&i| &self.groups[i])
    }

    #[must_use]
    pub fn group_by_id(&self, id: &str) -> Option<&Group> {
        self.group_by_id.get(id).map(|&i| &self.groups[i])
    }

    /// Add a group to the snapshot. An existing name keeps pointing at the
    /// group that was inserted first.
    pub fn insert_group(&mut self, group: Group) {
        let slot = self.groups.len();
        self.group_by_name.entry(group.name.clone()).or_insert(slot);
        self.group_by_id.insert(group.id.clone(), slot);
        self.groups.push(group);
    }

    /// Record that `group_id` is now shared with `share.user_id`.
    ///
    /// Returns `false` if the group is unknown.
    pub fn record_share(&mut self, group_id: &str, share: GroupShare) -> bool {
        let Some(&slot) = self.group_by_id.get(group_id) else {
            return false;
        };
        let group = &mut self.groups[slot];
        if !group.is_shared_with(&share.user_id) {
            group.shares.push(share);
        }
        true
    }

    /// Number of distinct device names.
    #[must_use]
    pub fn device_count(&self) -> usize {
        self.devices_by_name.len()
    }

    /// Number of distinct user emails.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.users_by_email.len()
    }

    /// Number of groups held, duplicates included.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}
