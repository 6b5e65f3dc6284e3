//! Convergence planner for group-per-user sync.
//!
//! For each resolved (user, device) pair the planner walks a fixed sequence
//! of steps and stops at the first failing remote call. Earlier successful
//! steps are not rolled back; a later run picks up where this one stopped.
//!
//! 1. Ensure the target group `Devices of {email}` exists.
//! 2. Source-group filter (when configured).
//! 3. Device must be assigned to the caller.
//! 4. Move the device into the target group.
//! 5. Share the target group with the user.

use std::fmt;

use tracing::{info, warn};
use tvadmin_core::{
    Device, Group, GroupShare, MappingEntry, ReconcileError, RemoteApi, SharePermission, User,
};

use crate::index::ResourceIndex;
use crate::report::{ItemResult, Outcome};
use crate::resolver::resolve;

/// Id prefix of groups that only exist in a dry-run snapshot.
pub const DRY_RUN_GROUP_PREFIX: &str = "dry-run:";

/// Name of the personal device group for `email`.
#[must_use]
pub fn target_group_name(email: &str) -> String {
    format!("Devices of {email}")
}

/// A mutation performed (or simulated) while converging an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CreateGroup {
        name: String,
    },
    MoveDevice {
        device_id: String,
        group_id: String,
    },
    ShareGroup {
        group_id: String,
        user_id: String,
        permission: SharePermission,
    },
    DeleteDevice {
        device_id: String,
    },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::CreateGroup { name } => write!(f, "create group '{name}'"),
            Action::MoveDevice {
                device_id,
                group_id,
            } => write!(f, "move device {device_id} to group {group_id}"),
            Action::ShareGroup {
                group_id,
                user_id,
                permission,
            } => write!(f, "share group {group_id} with user {user_id} ({permission})"),
            Action::DeleteDevice { device_id } => write!(f, "delete device {device_id}"),
        }
    }
}

/// Outcome of one mapping entry.
#[derive(Debug, Clone)]
pub struct EntryOutcome {
    pub outcome: Outcome,
    pub actions: Vec<Action>,
    /// Set for `Failed`.
    pub error: Option<ReconcileError>,
    /// Set for `Skipped`.
    pub skip_reason: Option<String>,
}

impl EntryOutcome {
    fn converged(actions: Vec<Action>) -> Self {
        let outcome = if actions.is_empty() {
            Outcome::Unchanged
        } else {
            Outcome::Updated
        };
        Self {
            outcome,
            actions,
            error: None,
            skip_reason: None,
        }
    }

    fn skipped(actions: Vec<Action>, reason: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Skipped,
            actions,
            error: None,
            skip_reason: Some(reason.into()),
        }
    }

    fn failed(actions: Vec<Action>, error: ReconcileError) -> Self {
        Self {
            outcome: Outcome::Failed,
            actions,
            error: Some(error),
            skip_reason: None,
        }
    }

    /// Convert into a report item.
    #[must_use]
    pub fn into_item(self, index: usize, subject: String) -> ItemResult {
        let detail = self
            .error
            .map(|e| e.to_string())
            .or(self.skip_reason);
        ItemResult {
            index,
            subject,
            outcome: self.outcome,
            actions: self.actions.iter().map(ToString::to_string).collect(),
            detail,
        }
    }
}

/// Planner settings.
#[derive(Debug, Clone)]
pub struct PlannerOptions {
    /// Only devices currently in this group (by id) are moved.
    pub source_group_id: Option<String>,
    /// Permission granted when sharing the target group.
    pub permission: SharePermission,
    /// Simulate mutations instead of calling the API.
    pub dry_run: bool,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            source_group_id: None,
            permission: SharePermission::ReadWrite,
            dry_run: false,
        }
    }
}

/// Group-per-user convergence planner.
pub struct GroupSyncPlanner<'a, A: RemoteApi + ?Sized> {
    api: &'a A,
    options: PlannerOptions,
}

impl<'a, A: RemoteApi + ?Sized> GroupSyncPlanner<'a, A> {
    #[must_use]
    pub fn new(api: &'a A, options: PlannerOptions) -> Self {
        Self { api, options }
    }

    /// Converge a single entry. Always yields exactly one outcome.
    ///
    /// Groups created here are inserted into `index` so later entries of the
    /// same run reuse them.
    pub async fn plan_entry(&self, index: &mut ResourceIndex, entry: &MappingEntry) -> EntryOutcome {
        let (user, device) = match resolve(index, entry) {
            Ok(resolved) => (resolved.user.clone(), resolved.device.clone()),
            Err(e) => {
                warn!(email = %entry.email, device = %entry.device, error = %e, "Mapping entry could not be resolved");
                return EntryOutcome::failed(Vec::new(), e);
            }
        };

        let mut actions = Vec::new();

        let group = match self.ensure_group(index, &user, &mut actions).await {
            Ok(group) => group,
            Err(e) => return EntryOutcome::failed(actions, e),
        };

        if let Some(source_id) = &self.options.source_group_id {
            let current = device.group_id.as_deref();
            if current != Some(source_id.as_str()) && current != Some(group.id.as_str()) {
                return EntryOutcome::skipped(actions, "device is not in the source group");
            }
        }

        if !device.assigned_to_caller {
            info!(device_id = %device.id, device = %device.name, "Device not assigned to caller, skipping");
            return EntryOutcome::skipped(actions, "device is not assigned to the caller");
        }

        if let Err(e) = self.ensure_membership(&device, &group, &mut actions).await {
            return EntryOutcome::failed(actions, e);
        }

        if let Err(e) = self.ensure_share(index, &user, &group, &mut actions).await {
            return EntryOutcome::failed(actions, e);
        }

        EntryOutcome::converged(actions)
    }

    async fn ensure_group(
        &self,
        index: &mut ResourceIndex,
        user: &User,
        actions: &mut Vec<Action>,
    ) -> Result<Group, ReconcileError> {
        let name = target_group_name(&user.email);
        if let Some(existing) = index.group_by_name(&name) {
            return Ok(existing.clone());
        }

        let group = if self.options.dry_run {
            Group::new(format!("{DRY_RUN_GROUP_PREFIX}{name}"), name.clone())
        } else {
            let created = self.api.create_group(&name).await.map_err(|e| {
                warn!(group = %name, error = %e, "Failed to create group");
                ReconcileError::remote(format!("create group '{name}'"), e)
            })?;
            info!(group_id = %created.id, group = %created.name, "Created group");
            created
        };

        actions.push(Action::CreateGroup { name });
        index.insert_group(group.clone());
        Ok(group)
    }

    /// Moves are not written back to the index; the device snapshot stays as
    /// fetched for the whole run.
    async fn ensure_membership(
        &self,
        device: &Device,
        group: &Group,
        actions: &mut Vec<Action>,
    ) -> Result<(), ReconcileError> {
        if device.group_id.as_deref() == Some(group.id.as_str()) {
            return Ok(());
        }

        if !self.options.dry_run {
            self.api
                .move_device_to_group(&device.id, &group.id)
                .await
                .map_err(|e| {
                    warn!(device_id = %device.id, group_id = %group.id, error = %e, "Failed to move device");
                    ReconcileError::remote(format!("move device {}", device.id), e)
                })?;
            info!(device_id = %device.id, device = %device.name, group_id = %group.id, "Moved device into group");
        }

        actions.push(Action::MoveDevice {
            device_id: device.id.clone(),
            group_id: group.id.clone(),
        });
        Ok(())
    }

    async fn ensure_share(
        &self,
        index: &mut ResourceIndex,
        user: &User,
        group: &Group,
        actions: &mut Vec<Action>,
    ) -> Result<(), ReconcileError> {
        // The cached copy may be stale if an earlier entry shared the group.
        let already_shared = index
            .group_by_id(&group.id)
            .unwrap_or(group)
            .is_shared_with(&user.id);
        if already_shared {
            return Ok(());
        }

        let permission = self.options.permission;
        if !self.options.dry_run {
            self.api
                .share_group(&group.id, &user.id, permission)
                .await
                .map_err(|e| {
                    warn!(group_id = %group.id, user_id = %user.id, error = %e, "Failed to share group");
                    ReconcileError::remote(format!("share group {}", group.id), e)
                })?;
            info!(group_id = %group.id, user = %user.email, %permission, "Shared group with user");
        }

        index.record_share(
            &group.id,
            GroupShare {
                user_id: user.id.clone(),
                permission,
            },
        );
        actions.push(Action::ShareGroup {
            group_id: group.id.clone(),
            user_id: user.id.clone(),
            permission,
        });
        Ok(())
    }
}
