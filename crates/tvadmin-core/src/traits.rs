//! Collaborator seams.
//!
//! The reconciliation crates never talk HTTP or read a terminal directly;
//! they go through these traits so tests can substitute recording mocks.

use async_trait::async_trait;

use crate::error::{ApiResult, ReconcileResult};
use crate::models::{Device, Group, SharePermission, User};

/// Remote management API, as consumed by the reconciliation engine.
///
/// Implementations are expected to be blocking from the caller's point of
/// view: the engine awaits every call before issuing the next one.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// Fetch all devices visible to the caller.
    async fn fetch_devices(&self) -> ApiResult<Vec<Device>>;

    /// Fetch all groups, including their current shares.
    async fn fetch_groups(&self) -> ApiResult<Vec<Group>>;

    /// Fetch all users of the company account.
    async fn fetch_users(&self) -> ApiResult<Vec<User>>;

    /// Create a group named `name` and return it.
    async fn create_group(&self, name: &str) -> ApiResult<Group>;

    /// Move a device into a group.
    async fn move_device_to_group(&self, device_id: &str, group_id: &str) -> ApiResult<()>;

    /// Share a group with a user.
    async fn share_group(
        &self,
        group_id: &str,
        user_id: &str,
        permission: SharePermission,
    ) -> ApiResult<()>;

    /// Delete a device.
    async fn delete_device(&self, device_id: &str) -> ApiResult<()>;
}

/// Interactive human gate.
pub trait Confirm {
    /// Ask `prompt`; `Ok(true)` means the operator agreed.
    ///
    /// Returns [`ReconcileError::ConfirmationUnavailable`](crate::ReconcileError::ConfirmationUnavailable)
    /// when nobody can be asked.
    fn confirm(&self, prompt: &str) -> ReconcileResult<bool>;
}
