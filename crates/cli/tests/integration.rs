//! Integration tests for the Synergos CLI layer
//!
//! These tests drive the context the same way the binary does: load config
//! and dataset from disk, run workflow actions, export and reload.

use rust_decimal_macros::dec;
use std::fs;
use synergos_cli::{commands, script, AppContext, ConfigError, SynergosConfig};
use synergos_core::{Dataset, GroupStatus, TransactionStatus};
use tempfile::TempDir;

fn demo_ctx() -> AppContext {
    AppContext::from_dataset(Dataset::demo(), SynergosConfig::default()).unwrap()
}

/// Test: propose → approve → export → reload
#[test]
fn test_export_and_reload() {
    let temp_dir = TempDir::new().unwrap();
    let export_path = temp_dir.path().join("state.json");

    let mut ctx = demo_ctx();
    commands::propose_group(
        &mut ctx,
        "Souk Savings",
        "",
        &["user1".to_string(), "user4".to_string()],
        "user1",
    )
    .unwrap();
    let group = ctx
        .workflow
        .pending_groups("user4")
        .unwrap()
        .pop()
        .unwrap();
    commands::approve_group(&mut ctx, &group.id, "user4").unwrap();
    ctx.export(&export_path).unwrap();

    let reloaded = AppContext::new(Some(export_path.as_path()), SynergosConfig::default()).unwrap();
    let stored = reloaded.workflow.group(&group.id).unwrap();
    assert_eq!(stored.status, GroupStatus::Active);
    assert_eq!(reloaded.dataset(), ctx.dataset());
}

/// Test: a malformed dataset file is reported, not panicked on
#[test]
fn test_malformed_dataset() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(AppContext::new(Some(path.as_path()), SynergosConfig::default()).is_err());
}

/// Test: duplicate ids in a dataset are refused at load
#[test]
fn test_inconsistent_dataset() {
    let mut dataset = Dataset::demo();
    dataset.users.push(dataset.users[0].clone());

    assert!(AppContext::from_dataset(dataset, SynergosConfig::default()).is_err());
}

/// Test: config file values reach the workflow
#[test]
fn test_config_file_enables_cashin_credit() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("synergos.json");
    fs::write(
        &path,
        r#"{"currency": "MAD", "workflow": {"cashin_credits_on_approval": true}}"#,
    )
    .unwrap();

    let config = SynergosConfig::from_file(&path).unwrap();
    assert_eq!(config.analytics.trend_window_days, 7);

    let mut ctx = AppContext::from_dataset(Dataset::demo(), config).unwrap();
    let before = ctx.workflow.group("group2").unwrap().balance;

    commands::add_transaction(&mut ctx, "group2", "cashin", "200", None, "user4", None, None).unwrap();
    let txn = ctx
        .workflow
        .pending_transactions("user1")
        .unwrap()
        .into_iter()
        .find(|t| t.group_id == "group2")
        .unwrap();
    commands::approve_transaction(&mut ctx, &txn.id, "user1").unwrap();
    commands::approve_transaction(&mut ctx, &txn.id, "user5").unwrap();

    assert_eq!(ctx.workflow.group("group2").unwrap().balance, before + dec!(200));
}

/// Test: unreadable config file
#[test]
fn test_missing_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = SynergosConfig::from_file(&temp_dir.path().join("absent.json"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

/// Test: labels created by one step are usable by later steps
#[test]
fn test_script_with_labels() {
    let mut ctx = demo_ctx();
    let actions = script::parse(
        r#"[
            {"action": "proposeGroup", "label": "trip", "name": "Chefchaouen Trip",
             "members": ["user1", "user2", "user3"], "proposedBy": "user1"},
            {"action": "approveGroup", "group": "trip", "user": "user2"},
            {"action": "approveGroup", "group": "trip", "user": "user3"},
            {"action": "addTransaction", "label": "riad", "groupId": "trip", "type": "payment",
             "amount": "900", "fees": "15", "proposedBy": "user3", "beneficiary": "Riad Blue"},
            {"action": "approveTransaction", "transaction": "riad", "user": "user1"},
            {"action": "approveTransaction", "transaction": "riad", "user": "user2"}
        ]"#,
    )
    .unwrap();

    let report = script::run(&mut ctx, actions, false);
    assert_eq!(report.failures(), 0);
    assert_eq!(report.steps[2].status.as_deref(), Some("active"));
    assert_eq!(report.steps[5].status.as_deref(), Some("completed"));

    let group_id = report.steps[0].id.clone().unwrap();
    let group = ctx.workflow.group(&group_id).unwrap();
    assert_eq!(group.balance, dec!(-915));
}

/// Test: refused steps are reported and the run continues
#[test]
fn test_script_records_refusals() {
    let mut ctx = demo_ctx();
    let actions = script::parse(
        r#"[
            {"action": "approveTransaction", "transaction": "txn2", "user": "user2"},
            {"action": "approveTransaction", "transaction": "txn2", "user": "user9"},
            {"action": "rejectTransaction", "transaction": "txn2", "user": "user3"},
            {"action": "approveTransaction", "transaction": "txn2", "user": "user1"}
        ]"#,
    )
    .unwrap();

    let report = script::run(&mut ctx, actions, false);
    assert_eq!(report.steps.len(), 4);
    assert!(!report.steps[0].ok);
    assert!(!report.steps[1].ok);
    assert!(report.steps[2].ok);
    assert!(!report.steps[3].ok);
    assert_eq!(
        ctx.workflow.transaction("txn2").unwrap().status,
        TransactionStatus::Rejected
    );
}

/// Test: stop_on_error halts at the first refusal
#[test]
fn test_script_stop_on_error() {
    let mut ctx = demo_ctx();
    let actions = script::parse(
        r#"[
            {"action": "rejectGroup", "group": "group9", "user": "user1"},
            {"action": "rejectTransaction", "transaction": "txn2", "user": "user3"}
        ]"#,
    )
    .unwrap();

    let report = script::run(&mut ctx, actions, true);
    assert_eq!(report.steps.len(), 1);
    assert_eq!(
        ctx.workflow.transaction("txn2").unwrap().status,
        TransactionStatus::Pending
    );
}

/// Test: command-level input errors surface as errors
#[test]
fn test_add_transaction_input_errors() {
    let mut ctx = demo_ctx();
    assert!(commands::add_transaction(&mut ctx, "group1", "barter", "10", None, "user1", None, None).is_err());
    assert!(commands::add_transaction(&mut ctx, "group1", "payment", "-10", None, "user1", None, None).is_err());
    assert!(commands::add_transaction(&mut ctx, "group1", "payment", "10", None, "user5", None, None).is_err());
    assert_eq!(ctx.workflow.group_transactions("group1").unwrap().len(), 2);
}
