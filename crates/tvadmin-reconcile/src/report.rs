//! Run reporting.
//!
//! Accumulates one [`ItemResult`] per processed entry and produces an
//! immutable [`RunReport`] with counters and wall-clock duration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use uuid::Uuid;

/// Per-item classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// At least one mutation was performed (or would have been, in dry-run).
    Updated,
    /// Already converged; nothing to do.
    Unchanged,
    /// Excluded by a filter or not assigned to the caller.
    Skipped,
    /// Resolution failed or a remote call errored.
    Failed,
    /// A duplicate device was deleted (or would have been, in dry-run).
    Removed,
}

impl Outcome {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Updated => "updated",
            Outcome::Unchanged => "unchanged",
            Outcome::Skipped => "skipped",
            Outcome::Failed => "failed",
            Outcome::Removed => "removed",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result for a single processed entry or device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemResult {
    /// Position in processing order (0-based).
    pub index: usize,
    /// What was processed, e.g. `u@x.test -> Dev1`.
    pub subject: String,
    pub outcome: Outcome,
    /// Mutations performed or simulated, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<String>,
    /// Failure reason or skip reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Counters of a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatistics {
    pub updated: u32,
    pub failed: u32,
    pub unchanged: u32,
    pub skipped: u32,
    pub removed: u32,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl RunStatistics {
    fn count(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Updated => self.updated += 1,
            Outcome::Unchanged => self.unchanged += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::Failed => self.failed += 1,
            Outcome::Removed => self.removed += 1,
        }
    }

    /// Number of items counted.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.updated + self.failed + self.unchanged + self.skipped + self.removed
    }
}

/// Immutable snapshot of a finished run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub operation: String,
    pub dry_run: bool,
    /// The operator declined the confirmation gate; nothing was mutated.
    pub aborted: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub statistics: RunStatistics,
    pub items: Vec<ItemResult>,
}

impl RunReport {
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.statistics.failed > 0
    }

    /// Items with the given outcome.
    pub fn items_with(&self, outcome: Outcome) -> impl Iterator<Item = &ItemResult> {
        self.items.iter().filter(move |i| i.outcome == outcome)
    }
}

/// Accumulator for a run in progress.
#[derive(Debug)]
pub struct RunReporter {
    run_id: Uuid,
    operation: String,
    dry_run: bool,
    aborted: bool,
    started_at: DateTime<Utc>,
    start: Instant,
    statistics: RunStatistics,
    items: Vec<ItemResult>,
}

impl RunReporter {
    /// Start the clock for a new run.
    #[must_use]
    pub fn start(operation: &str, dry_run: bool) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            operation: operation.to_string(),
            dry_run,
            aborted: false,
            started_at: Utc::now(),
            start: Instant::now(),
            statistics: RunStatistics::default(),
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn set_aborted(&mut self) {
        self.aborted = true;
    }

    /// Record one item.
    pub fn record(&mut self, item: ItemResult) {
        self.statistics.count(item.outcome);
        self.items.push(item);
    }

    /// Stop the clock and freeze the report.
    #[must_use]
    pub fn finish(self) -> RunReport {
        let mut statistics = self.statistics;
        statistics.duration_ms = u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX);
        RunReport {
            run_id: self.run_id,
            operation: self.operation,
            dry_run: self.dry_run,
            aborted: self.aborted,
            started_at: self.started_at,
            finished_at: Utc::now(),
            statistics,
            items: self.items,
        }
    }
}
