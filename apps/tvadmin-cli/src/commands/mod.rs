//! Subcommand implementations.

pub mod group_sync;
pub mod remove_duplicates;

use tvadmin_reconcile::RunReport;

use crate::error::{CliError, CliResult};

/// Map a finished run onto the process result.
pub fn check_report(report: &RunReport) -> CliResult<()> {
    if report.has_failures() {
        return Err(CliError::ItemsFailed {
            failed: report.statistics.failed,
            total: report.statistics.total(),
        });
    }
    Ok(())
}
