//! Resolve a mapping entry against the resource index.

use tvadmin_core::{Device, MappingEntry, ReconcileError, ReconcileResult, User};

use crate::index::ResourceIndex;

/// A mapping entry whose user and device both exist.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    pub user: &'a User,
    pub device: &'a Device,
}

/// Resolve `entry` by exact key equality.
///
/// The device is looked up by TeamViewer ID when the entry carries one and
/// that ID is indexed, by display name otherwise.
pub fn resolve<'a>(index: &'a ResourceIndex, entry: &MappingEntry) -> ReconcileResult<Resolved<'a>> {
    let user = index
        .user_by_email(&entry.email)
        .ok_or_else(|| ReconcileError::UserNotFound(entry.email.clone()))?;

    let device = entry
        .device
        .teamviewer_id
        .as_deref()
        .and_then(|tv_id| index.device_by_teamviewer_id(tv_id))
        .or_else(|| index.device_by_name(&entry.device.name))
        .ok_or_else(|| ReconcileError::DeviceNotFound(entry.device.clone()))?;

    Ok(Resolved { user, device })
}
