//! # Reconciliation
//!
//! Converges remote device/group/user state towards a desired mapping and
//! prunes duplicate devices.
//!
//! ```text
//!  snapshot ──► ResourceIndex ──► resolve ──► GroupSyncPlanner ──► RunReporter
//!  devices  ──► removal_candidates ──► gate ──► DuplicateRemover ──► RunReporter
//! ```
//!
//! Processing is strictly sequential: every remote call is awaited before
//! the next item starts. The only state shared across items is the group
//! half of [`ResourceIndex`], which receives groups created mid-run.

pub mod duplicates;
pub mod index;
pub mod planner;
pub mod report;
pub mod resolver;
pub mod runner;

pub use duplicates::{removal_candidates, DuplicateRemover};
pub use index::ResourceIndex;
pub use planner::{target_group_name, Action, EntryOutcome, GroupSyncPlanner, PlannerOptions};
pub use report::{ItemResult, Outcome, RunReport, RunReporter, RunStatistics};
pub use resolver::{resolve, Resolved};
pub use runner::{run_group_sync, run_remove_duplicates, DuplicateOptions, GroupSyncOptions};
