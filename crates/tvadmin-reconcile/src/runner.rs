//! Run drivers: fetch a snapshot, process items strictly in order, report.

use tracing::{debug, info, warn};
use tvadmin_core::{
    resolve_gate, Confirm, GateDecision, MappingEntry, ReconcileError, ReconcileResult, RemoteApi,
    SharePermission,
};

use crate::duplicates::{removal_candidates, DuplicateRemover};
use crate::index::ResourceIndex;
use crate::planner::{GroupSyncPlanner, PlannerOptions};
use crate::report::{RunReport, RunReporter};

/// Options for [`run_group_sync`].
#[derive(Debug, Clone)]
pub struct GroupSyncOptions {
    /// Restrict moves to devices currently in the group with this name.
    pub source_group: Option<String>,
    pub permission: SharePermission,
    pub dry_run: bool,
}

impl Default for GroupSyncOptions {
    fn default() -> Self {
        Self {
            source_group: None,
            permission: SharePermission::ReadWrite,
            dry_run: false,
        }
    }
}

/// Options for [`run_remove_duplicates`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateOptions {
    pub dry_run: bool,
    /// Skip the confirmation prompt.
    pub force: bool,
}

/// Converge every mapping entry, in input order.
///
/// Fails only for run-level errors (snapshot fetch, missing source group);
/// per-entry problems are reported as `Failed` items.
pub async fn run_group_sync<A: RemoteApi + ?Sized>(
    api: &A,
    entries: &[MappingEntry],
    options: &GroupSyncOptions,
) -> ReconcileResult<RunReport> {
    let mut reporter = RunReporter::start("group_sync", options.dry_run);
    info!(run_id = %reporter.run_id(), entries = entries.len(), dry_run = options.dry_run, "Starting group sync");

    let devices = api
        .fetch_devices()
        .await
        .map_err(|source| ReconcileError::Fetch { resource: "devices", source })?;
    let groups = api
        .fetch_groups()
        .await
        .map_err(|source| ReconcileError::Fetch { resource: "groups", source })?;
    let users = api
        .fetch_users()
        .await
        .map_err(|source| ReconcileError::Fetch { resource: "users", source })?;

    let mut index = ResourceIndex::build(devices, groups, users);
    debug!(
        devices = index.device_count(),
        groups = index.group_count(),
        users = index.user_count(),
        "Snapshot indexed"
    );

    let source_group_id = match &options.source_group {
        Some(name) => {
            let group = index
                .group_by_name(name)
                .ok_or_else(|| ReconcileError::SourceGroupMissing(name.clone()))?;
            Some(group.id.clone())
        }
        None => None,
    };

    let planner = GroupSyncPlanner::new(
        api,
        PlannerOptions {
            source_group_id,
            permission: options.permission,
            dry_run: options.dry_run,
        },
    );

    for (i, entry) in entries.iter().enumerate() {
        let outcome = planner.plan_entry(&mut index, entry).await;
        let subject = format!("{} -> {}", entry.email, entry.device);
        reporter.record(outcome.into_item(i, subject));
    }

    let report = reporter.finish();
    log_summary(&report);
    Ok(report)
}

/// Find duplicate devices and delete the stale copies.
///
/// The confirmation gate is resolved once, before the first deletion.
pub async fn run_remove_duplicates<A: RemoteApi + ?Sized>(
    api: &A,
    confirm: &dyn Confirm,
    options: DuplicateOptions,
) -> ReconcileResult<RunReport> {
    let mut reporter = RunReporter::start("remove_duplicates", options.dry_run);
    info!(run_id = %reporter.run_id(), dry_run = options.dry_run, "Starting duplicate removal");

    let devices = api
        .fetch_devices()
        .await
        .map_err(|source| ReconcileError::Fetch { resource: "devices", source })?;

    let candidates = removal_candidates(&devices);
    let pending = candidates.iter().filter(|d| d.assigned_to_caller).count();
    info!(devices = devices.len(), candidates = candidates.len(), pending, "Duplicate candidates selected");

    let prompt = format!("Remove {pending} duplicate device(s)?");
    let decision = resolve_gate(options.dry_run, options.force, pending, &prompt, confirm)?;
    if decision == GateDecision::Declined {
        warn!("Duplicate removal not confirmed, no device will be removed");
        reporter.set_aborted();
    }

    let remover = DuplicateRemover::new(api, decision);
    for (i, device) in candidates.into_iter().enumerate() {
        reporter.record(remover.remove(i, device).await);
    }

    let report = reporter.finish();
    log_summary(&report);
    Ok(report)
}

fn log_summary(report: &RunReport) {
    let stats = &report.statistics;
    info!(
        run_id = %report.run_id,
        operation = %report.operation,
        updated = stats.updated,
        removed = stats.removed,
        unchanged = stats.unchanged,
        skipped = stats.skipped,
        failed = stats.failed,
        duration_ms = stats.duration_ms,
        "Run finished"
    );
}
