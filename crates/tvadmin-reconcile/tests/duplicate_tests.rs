//! Duplicate device removal tests
//!
//! Covers:
//! - Candidate selection against the remote snapshot
//! - Confirmation gate (force, yes, no, unavailable, dry-run)
//! - Per-device failure isolation
//! - Ownership exclusion

mod common;

use common::{day, device, offline, FixedConfirm, MockApi};
use std::sync::atomic::Ordering;
use tvadmin_core::{Device, ReconcileError};
use tvadmin_reconcile::{run_remove_duplicates, DuplicateOptions, Outcome};

/// Group A: one online copy plus two offline copies.
/// Group B: three offline copies, b2 most recently seen.
/// Group C: a single device.
fn fleet() -> Vec<Device> {
    vec![
        device("a2", "A"),
        offline("a1", "A", Some(day(1))),
        offline("a3", "A", Some(day(3))),
        offline("b1", "B", Some(day(1))),
        offline("b2", "B", Some(day(5))),
        offline("b3", "B", None),
        offline("c1", "C", Some(day(2))),
    ]
}

fn api() -> MockApi {
    MockApi::new(fleet(), vec![], vec![])
}

fn forced() -> DuplicateOptions {
    DuplicateOptions {
        dry_run: false,
        force: true,
    }
}

#[tokio::test]
async fn test_force_removes_stale_copies() {
    let api = api();
    let confirm = FixedConfirm::no();

    let report = run_remove_duplicates(&api, &confirm, forced()).await.unwrap();

    assert_eq!(confirm.times_asked(), 0);
    assert_eq!(report.statistics.removed, 3);
    assert!(!report.aborted);
    assert_eq!(api.delete_calls.load(Ordering::SeqCst), 3);
    assert_eq!(api.device_ids(), vec!["a2", "b2", "b3", "c1"]);
}

#[tokio::test]
async fn test_report_subjects_in_candidate_order() {
    let api = api();

    let report = run_remove_duplicates(&api, &FixedConfirm::yes(), forced())
        .await
        .unwrap();

    let subjects: Vec<&str> = report.items.iter().map(|i| i.subject.as_str()).collect();
    assert!(subjects[0].starts_with("A (a1"));
    assert!(subjects[1].starts_with("A (a3"));
    assert!(subjects[2].starts_with("B (b1"));
    assert_eq!(report.items[0].actions, vec!["delete device a1"]);
}

#[tokio::test]
async fn test_confirmed_prompt_deletes() {
    let api = api();
    let confirm = FixedConfirm::yes();

    let report = run_remove_duplicates(&api, &confirm, DuplicateOptions::default())
        .await
        .unwrap();

    assert_eq!(confirm.times_asked(), 1);
    assert_eq!(report.statistics.removed, 3);
}

#[tokio::test]
async fn test_declined_prompt_removes_nothing() {
    let api = api();
    let confirm = FixedConfirm::no();

    let report = run_remove_duplicates(&api, &confirm, DuplicateOptions::default())
        .await
        .unwrap();

    assert!(report.aborted);
    assert_eq!(report.statistics.removed, 0);
    assert_eq!(report.statistics.unchanged, 3);
    assert!(report
        .items
        .iter()
        .all(|i| i.detail.as_deref() == Some("deletion not confirmed")));
    assert_eq!(api.delete_calls.load(Ordering::SeqCst), 0);
    assert_eq!(api.device_ids().len(), 7);
}

#[tokio::test]
async fn test_no_terminal_without_force_is_an_error() {
    let api = api();

    let err = run_remove_duplicates(&api, &FixedConfirm::unavailable(), DuplicateOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ReconcileError::ConfirmationUnavailable));
    assert_eq!(api.delete_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_dry_run_reports_without_deleting() {
    let api = api();
    let confirm = FixedConfirm::unavailable();
    let options = DuplicateOptions {
        dry_run: true,
        force: false,
    };

    let report = run_remove_duplicates(&api, &confirm, options).await.unwrap();

    assert!(report.dry_run);
    assert_eq!(report.statistics.removed, 3);
    assert_eq!(confirm.times_asked(), 0);
    assert_eq!(api.mutating_calls(), 0);
}

#[tokio::test]
async fn test_delete_failure_does_not_stop_run() {
    let api = api().with_delete_error("a3");

    let report = run_remove_duplicates(&api, &FixedConfirm::yes(), forced())
        .await
        .unwrap();

    assert_eq!(report.statistics.removed, 2);
    assert_eq!(report.statistics.failed, 1);
    assert!(report.has_failures());
    assert_eq!(report.items[1].outcome, Outcome::Failed);
    assert!(report.items[1]
        .detail
        .as_deref()
        .unwrap()
        .starts_with("delete device a3 failed"));
    assert_eq!(report.items[2].outcome, Outcome::Removed);
}

#[tokio::test]
async fn test_unassigned_copy_is_skipped() {
    let mut foreign = offline("x1", "X", Some(day(1)));
    foreign.assigned_to_caller = false;
    let devices = vec![foreign, offline("x2", "X", Some(day(4)))];
    let api = MockApi::new(devices, vec![], vec![]);
    let confirm = FixedConfirm::yes();

    let report = run_remove_duplicates(&api, &confirm, DuplicateOptions::default())
        .await
        .unwrap();

    // Nothing deletable, so nobody is asked.
    assert_eq!(confirm.times_asked(), 0);
    assert_eq!(report.items.len(), 1);
    assert_eq!(report.items[0].outcome, Outcome::Skipped);
    assert_eq!(api.delete_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_no_duplicates_is_empty_run() {
    let api = MockApi::new(vec![device("d1", "Solo")], vec![], vec![]);

    let report = run_remove_duplicates(&api, &FixedConfirm::unavailable(), DuplicateOptions::default())
        .await
        .unwrap();

    assert!(report.items.is_empty());
    assert_eq!(report.statistics.total(), 0);
}

#[tokio::test]
async fn test_devices_without_alias_are_left_alone() {
    let api = MockApi::new(
        vec![
            offline("n1", "", Some(day(1))),
            offline("n2", "", Some(day(4))),
            device("n3", ""),
        ],
        vec![],
        vec![],
    );
    let confirm = FixedConfirm::yes();

    let report = run_remove_duplicates(&api, &confirm, forced()).await.unwrap();

    assert!(report.items.is_empty());
    assert_eq!(confirm.times_asked(), 0);
    assert_eq!(api.delete_calls.load(Ordering::SeqCst), 0);
    assert_eq!(api.device_ids(), vec!["n1", "n2", "n3"]);
}
