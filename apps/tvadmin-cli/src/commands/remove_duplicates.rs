//! `tvadmin remove-duplicates`: delete stale copies of same-named devices.

use clap::Args;
use tvadmin_core::{Confirm, RemoteApi};
use tvadmin_reconcile::{run_remove_duplicates, DuplicateOptions, RunReport};

use crate::error::CliResult;
use crate::output::print_report;

#[derive(Debug, Args)]
pub struct RemoveDuplicatesArgs {
    /// Show which devices would be removed without removing them
    #[arg(long)]
    pub dry_run: bool,

    /// Remove without asking for confirmation
    #[arg(long)]
    pub force: bool,

    /// Output the run report as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run<A: RemoteApi + ?Sized>(
    api: &A,
    confirm: &dyn Confirm,
    args: &RemoveDuplicatesArgs,
) -> CliResult<RunReport> {
    let options = DuplicateOptions {
        dry_run: args.dry_run,
        force: args.force,
    };
    Ok(run_remove_duplicates(api, confirm, options).await?)
}

pub async fn execute<A: RemoteApi + ?Sized>(
    api: &A,
    confirm: &dyn Confirm,
    args: RemoveDuplicatesArgs,
) -> CliResult<()> {
    let report = run(api, confirm, &args).await?;
    print_report(&report, args.json)?;
    super::check_report(&report)
}
