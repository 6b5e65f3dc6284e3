//! `tvadmin group-sync`: give every mapped user a personal device group.

use std::path::PathBuf;

use clap::Args;
use tvadmin_core::{RemoteApi, SharePermission};
use tvadmin_reconcile::{run_group_sync, GroupSyncOptions, RunReport};

use crate::error::CliResult;
use crate::mapping::{parse_delimiter, read_mapping_file};
use crate::output::print_report;

#[derive(Debug, Args)]
pub struct GroupSyncArgs {
    /// CSV file with `email` and `device` columns (optional `teamviewerid`)
    #[arg(long, short = 'm')]
    pub mapping_file: PathBuf,

    /// Field delimiter of the mapping file
    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Only move devices that currently sit in this group
    #[arg(long)]
    pub source_group: Option<String>,

    /// Permission granted to the user on their group
    #[arg(long, default_value = "readwrite", value_parser = parse_share_permission)]
    pub permission: SharePermission,

    /// Show what would change without changing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Output the run report as JSON
    #[arg(long)]
    pub json: bool,
}

fn parse_share_permission(value: &str) -> Result<SharePermission, String> {
    match value.parse::<SharePermission>()? {
        SharePermission::Owned => Err("permission 'owned' cannot be granted".to_string()),
        permission => Ok(permission),
    }
}

/// Validate the mapping file and run the sync. Returns the finished report.
pub async fn run<A: RemoteApi + ?Sized>(api: &A, args: &GroupSyncArgs) -> CliResult<RunReport> {
    let entries = read_mapping_file(&args.mapping_file, args.delimiter)?;
    let options = GroupSyncOptions {
        source_group: args.source_group.clone(),
        permission: args.permission,
        dry_run: args.dry_run,
    };
    Ok(run_group_sync(api, &entries, &options).await?)
}

pub async fn execute<A: RemoteApi + ?Sized>(api: &A, args: GroupSyncArgs) -> CliResult<()> {
    let report = run(api, &args).await?;
    print_report(&report, args.json)?;
    super::check_report(&report)
}
