//! Run report rendering.

use std::fmt::Write as _;

use tvadmin_reconcile::{Outcome, RunReport};

use crate::error::CliResult;

/// Print the report to stdout, as pretty JSON or as a human summary.
pub fn print_report(report: &RunReport, json: bool) -> CliResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", format_report(report));
    }
    Ok(())
}

pub fn format_report(report: &RunReport) -> String {
    let mut out = String::new();
    let title = match report.operation.as_str() {
        "group_sync" => "Group sync",
        "remove_duplicates" => "Duplicate removal",
        other => other,
    };

    if report.dry_run {
        let _ = writeln!(out, "{title} (dry run, no changes were made)");
    } else {
        let _ = writeln!(out, "{title}");
    }
    let _ = writeln!(out, "Run: {}\n", report.run_id);

    for item in &report.items {
        let marker = format!("[{}]", item.outcome);
        let _ = writeln!(out, "  {marker:<11} {}", item.subject);
        for action in &item.actions {
            let _ = writeln!(out, "              - {action}");
        }
        if let Some(detail) = &item.detail {
            let _ = writeln!(out, "              ! {detail}");
        }
    }
    if !report.items.is_empty() {
        out.push('\n');
    }

    let failures: Vec<_> = report.items_with(Outcome::Failed).collect();
    if !failures.is_empty() {
        let _ = writeln!(out, "Failures:");
        for item in failures {
            let detail = item.detail.as_deref().unwrap_or("no detail");
            let _ = writeln!(out, "  #{} {}: {detail}", item.index + 1, item.subject);
        }
        out.push('\n');
    }

    if report.aborted {
        out.push_str("Aborted: nothing was changed.\n\n");
    }

    let stats = &report.statistics;
    let _ = writeln!(out, "Summary:");
    if report.operation == "remove_duplicates" {
        let _ = writeln!(out, "  Removed:   {}", stats.removed);
    } else {
        let _ = writeln!(out, "  Updated:   {}", stats.updated);
    }
    let _ = writeln!(out, "  Unchanged: {}", stats.unchanged);
    if stats.skipped > 0 {
        let _ = writeln!(out, "  Skipped:   {}", stats.skipped);
    }
    if stats.failed > 0 {
        let _ = writeln!(out, "  Failed:    {}", stats.failed);
    }
    let _ = writeln!(out, "  Duration:  {}ms", stats.duration_ms);
    out
}
