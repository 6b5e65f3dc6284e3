//! Duplicate-device pruning.
//!
//! Devices sharing a display name are treated as copies of one machine.
//! If any copy is online, every offline copy is a removal candidate. If all
//! copies are offline, all but the most recently seen one are candidates.
//! Devices without a last-seen timestamp are never candidates, and devices
//! without a display name are never grouped with anything.

use std::collections::HashMap;

use tracing::{info, warn};
use tvadmin_core::{Device, GateDecision, ReconcileError, RemoteApi};

use crate::planner::Action;
use crate::report::{ItemResult, Outcome};

/// Select removal candidates from `devices`.
///
/// Name groups are visited in order of first appearance. Within an all-offline
/// group candidates come out oldest first; equal timestamps keep input order,
/// so among equally recent devices the last one in the input is kept.
#[must_use]
pub fn removal_candidates(devices: &[Device]) -> Vec<&Device> {
    let mut order: Vec<&str> = Vec::new();
    let mut by_name: HashMap<&str, Vec<&Device>> = HashMap::new();
    for device in devices.iter().filter(|d| !d.name.trim().is_empty()) {
        by_name
            .entry(device.name.as_str())
            .or_insert_with(|| {
                order.push(device.name.as_str());
                Vec::new()
            })
            .push(device);
    }

    let mut candidates = Vec::new();
    for name in order {
        let copies = &by_name[name];
        if copies.len() < 2 {
            continue;
        }

        let mut offline: Vec<&Device> = copies
            .iter()
            .copied()
            .filter(|d| !d.is_online() && d.last_seen.is_some())
            .collect();

        if copies.iter().any(|d| d.is_online()) {
            candidates.extend(offline);
        } else {
            // Stable sort: ties keep input order.
            offline.sort_by_key(|d| d.last_seen);
            offline.pop();
            candidates.extend(offline);
        }
    }
    candidates
}

/// Human-readable subject for a device item.
#[must_use]
pub fn device_subject(device: &Device) -> String {
    match device.last_seen {
        Some(seen) => format!("{} ({}, last seen {})", device.name, device.id, seen.to_rfc3339()),
        None => format!("{} ({})", device.name, device.id),
    }
}

/// Deletes removal candidates according to a resolved gate decision.
pub struct DuplicateRemover<'a, A: RemoteApi + ?Sized> {
    api: &'a A,
    decision: GateDecision,
}

impl<'a, A: RemoteApi + ?Sized> DuplicateRemover<'a, A> {
    #[must_use]
    pub fn new(api: &'a A, decision: GateDecision) -> Self {
        Self { api, decision }
    }

    /// Action one candidate. Always yields exactly one item.
    pub async fn remove(&self, index: usize, device: &Device) -> ItemResult {
        let subject = device_subject(device);
        let action = Action::DeleteDevice {
            device_id: device.id.clone(),
        };

        if !device.assigned_to_caller {
            return ItemResult {
                index,
                subject,
                outcome: Outcome::Skipped,
                actions: Vec::new(),
                detail: Some("device is not assigned to the caller".to_string()),
            };
        }

        match self.decision {
            GateDecision::Declined => ItemResult {
                index,
                subject,
                outcome: Outcome::Unchanged,
                actions: Vec::new(),
                detail: Some("deletion not confirmed".to_string()),
            },
            GateDecision::Simulate => ItemResult {
                index,
                subject,
                outcome: Outcome::Removed,
                actions: vec![action.to_string()],
                detail: None,
            },
            GateDecision::Proceed => match self.api.delete_device(&device.id).await {
                Ok(()) => {
                    info!(device_id = %device.id, device = %device.name, "Removed duplicate device");
                    ItemResult {
                        index,
                        subject,
                        outcome: Outcome::Removed,
                        actions: vec![action.to_string()],
                        detail: None,
                    }
                }
                Err(e) => {
                    warn!(device_id = %device.id, device = %device.name, error = %e, "Failed to remove device");
                    let error = ReconcileError::remote(format!("delete device {}", device.id), e);
                    ItemResult {
                        index,
                        subject,
                        outcome: Outcome::Failed,
                        actions: Vec::new(),
                        detail: Some(error.to_string()),
                    }
                }
            },
        }
    }
}
