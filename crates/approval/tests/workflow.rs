//! End-to-end approval scenarios over the demo dataset

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeSet;

use synergos_approval::{
    ApprovalError, ApprovalWorkflow, GroupProposal, TransactionRequest, WorkflowConfig,
};
use synergos_core::{Amount, Dataset, GroupStatus, TransactionStatus, TransactionType};

fn workflow() -> ApprovalWorkflow {
    ApprovalWorkflow::in_memory(Dataset::demo(), WorkflowConfig::default()).unwrap()
}

fn amount(val: Decimal) -> Amount {
    Amount::new(val).unwrap()
}

/// Every group is active exactly when its approvals cover its members
fn assert_group_invariant(wf: &ApprovalWorkflow) {
    for group in wf.groups().unwrap() {
        let approved: BTreeSet<&String> = group.approved_by.iter().collect();
        let members: BTreeSet<&String> = group.members.iter().collect();
        assert_eq!(
            group.status == GroupStatus::Active,
            approved == members,
            "group {} violates the activation invariant",
            group.id
        );
    }
}

/// Every workflow-created transaction is completed exactly when fully approved
fn assert_transaction_invariant(wf: &ApprovalWorkflow) {
    for txn in wf.transactions().unwrap() {
        if txn.status == TransactionStatus::Approved {
            continue;
        }
        assert_eq!(
            txn.status == TransactionStatus::Completed,
            txn.approved_by.len() == txn.required_approvals && txn.rejected_by.is_empty(),
            "transaction {} violates the completion invariant",
            txn.id
        );
    }
}

#[test]
fn test_three_member_group_becomes_active() {
    let mut wf = workflow();

    let group = wf
        .propose_group(GroupProposal::new(
            "Essaouira Weekend",
            "Surf trip",
            ["user1", "user2", "user3"],
            "user1",
        ))
        .unwrap();
    assert_eq!(group.status, GroupStatus::Pending);
    assert_eq!(wf.pending_groups("user2").unwrap().len(), 1);

    let group = wf.approve_group(&group.id, "user2").unwrap();
    assert_eq!(group.status, GroupStatus::Pending);
    assert_group_invariant(&wf);

    let group = wf.approve_group(&group.id, "user3").unwrap();
    assert_eq!(group.status, GroupStatus::Active);
    assert_group_invariant(&wf);

    assert!(wf.pending_groups("user2").unwrap().is_empty());
    assert!(wf
        .user_groups("user3")
        .unwrap()
        .iter()
        .any(|g| g.id == group.id));
}

#[test]
fn test_single_rejection_deletes_group() {
    let mut wf = workflow();

    let group = wf
        .propose_group(GroupProposal::new("Gym", "", ["user4", "user5", "user1"], "user4"))
        .unwrap();
    wf.approve_group(&group.id, "user5").unwrap();

    wf.reject_group(&group.id, "user1").unwrap();

    assert!(matches!(wf.group(&group.id), Err(ApprovalError::NotFound { .. })));
    assert!(wf.groups().unwrap().iter().all(|g| g.id != group.id));
    for user in ["user1", "user4", "user5"] {
        assert!(wf.pending_groups(user).unwrap().is_empty());
        assert!(wf.user_groups(user).unwrap().iter().all(|g| g.id != group.id));
    }
    assert_group_invariant(&wf);
}

#[test]
fn test_duplicate_approval_is_refused() {
    let mut wf = workflow();
    let group = wf
        .propose_group(GroupProposal::new("Trip", "", ["user1", "user2", "user3"], "user1"))
        .unwrap();

    wf.approve_group(&group.id, "user2").unwrap();
    let result = wf.approve_group(&group.id, "user2");
    assert!(matches!(result, Err(ApprovalError::DuplicateAction { .. })));
    assert_eq!(wf.group(&group.id).unwrap().approved_by.len(), 2);

    let result = wf.approve_transaction("txn2", "user2");
    assert!(matches!(result, Err(ApprovalError::DuplicateAction { .. })));
    assert_eq!(wf.transaction("txn2").unwrap().approved_by.len(), 1);
}

#[test]
fn test_single_member_cashin_completes_immediately() {
    let mut wf = workflow();

    let solo = wf
        .propose_group(GroupProposal::new("Savings", "Personal pot", ["user3"], "user3"))
        .unwrap();
    assert_eq!(solo.status, GroupStatus::Active);

    let txn = wf
        .add_transaction(
            TransactionRequest::new(&solo.id, TransactionType::CashIn, amount(dec!(100)), "user3")
                .with_description("Contribution to Savings"),
        )
        .unwrap();

    assert_eq!(txn.status, TransactionStatus::Completed);
    assert_eq!(txn.required_approvals, 1);
    assert_eq!(wf.group(&solo.id).unwrap().balance, dec!(100));
    assert_transaction_invariant(&wf);
}

#[test]
fn test_three_member_payment_debits_amount_plus_fees() {
    let mut wf = workflow();
    let before = wf.group("group2").unwrap().balance;

    let txn = wf
        .add_transaction(
            TransactionRequest::new("group2", TransactionType::Payment, amount(dec!(500)), "user1")
                .with_fees(amount(dec!(10)))
                .with_beneficiary("Cafe Hafa"),
        )
        .unwrap();
    assert_eq!(txn.status, TransactionStatus::Pending);
    assert_eq!(txn.required_approvals, 3);

    let txn = wf.approve_transaction(&txn.id, "user4").unwrap();
    assert_eq!(txn.status, TransactionStatus::Pending);
    assert_eq!(wf.group("group2").unwrap().balance, before);

    let txn = wf.approve_transaction(&txn.id, "user5").unwrap();
    assert_eq!(txn.status, TransactionStatus::Completed);
    assert_eq!(wf.group("group2").unwrap().balance, before - dec!(510));
    assert_transaction_invariant(&wf);
}

#[test]
fn test_multi_member_cashin_is_debited_by_default() {
    let mut wf = workflow();
    let before = wf.group("group2").unwrap().balance;

    let txn = wf
        .add_transaction(TransactionRequest::new("group2", TransactionType::CashIn, amount(dec!(200)), "user4"))
        .unwrap();
    wf.approve_transaction(&txn.id, "user1").unwrap();
    wf.approve_transaction(&txn.id, "user5").unwrap();

    assert_eq!(wf.group("group2").unwrap().balance, before - dec!(200));
}

#[test]
fn test_rejected_transaction_stays_rejected() {
    let mut wf = workflow();
    let before = wf.group("group3").unwrap().balance;

    let txn = wf
        .add_transaction(
            TransactionRequest::new("group3", TransactionType::CashOut, amount(dec!(1000)), "user2")
                .with_fees(amount(dec!(5))),
        )
        .unwrap();
    wf.approve_transaction(&txn.id, "user3").unwrap();

    let rejected = wf.reject_transaction(&txn.id, "user5").unwrap();
    assert_eq!(rejected.status, TransactionStatus::Rejected);

    for user in ["user4", "user5"] {
        assert!(matches!(
            wf.approve_transaction(&txn.id, user),
            Err(ApprovalError::InvalidState { .. })
        ));
    }
    assert!(matches!(
        wf.reject_transaction(&txn.id, "user5"),
        Err(ApprovalError::InvalidState { .. })
    ));

    let stored = wf.transaction(&txn.id).unwrap();
    assert_eq!(stored.status, TransactionStatus::Rejected);
    assert_eq!(stored.approved_by.len(), 2);
    assert_eq!(wf.group("group3").unwrap().balance, before);
    assert_transaction_invariant(&wf);
}

#[test]
fn test_required_approvals_fixed_at_creation() {
    let mut wf = workflow();

    let txn = wf
        .add_transaction(TransactionRequest::new("group3", TransactionType::Payment, amount(dec!(50)), "user2"))
        .unwrap();
    assert_eq!(txn.required_approvals, 4);
    assert_eq!(wf.group_transactions("group3").unwrap().len(), 2);
}

#[test]
fn test_group_transactions_unknown_group() {
    let wf = workflow();
    assert!(matches!(
        wf.group_transactions("group9"),
        Err(ApprovalError::NotFound { kind: "group", .. })
    ));
}

#[test]
fn test_single_member_payment_completes_immediately() {
    let mut wf = workflow();

    let solo = wf
        .propose_group(GroupProposal::new("Pocket", "", ["user5"], "user5"))
        .unwrap();

    let txn = wf
        .add_transaction(
            TransactionRequest::new(&solo.id, TransactionType::Payment, amount(dec!(50)), "user5")
                .with_fees(amount(dec!(5))),
        )
        .unwrap();

    assert_eq!(txn.status, TransactionStatus::Completed);
    assert_eq!(wf.group(&solo.id).unwrap().balance, dec!(-55));
    assert!(wf.pending_transactions("user5").unwrap().is_empty());
    assert_transaction_invariant(&wf);
}

#[test]
fn test_pending_group_refuses_transactions() {
    let mut wf = workflow();
    let group = wf
        .propose_group(GroupProposal::new("Trip", "", ["user1", "user2"], "user1"))
        .unwrap();

    let result = wf.add_transaction(TransactionRequest::new(
        &group.id,
        TransactionType::Payment,
        amount(dec!(10)),
        "user1",
    ));
    assert!(matches!(result, Err(ApprovalError::InvalidState { kind: "group", .. })));

    wf.reject_group(&group.id, "user2").unwrap();
    assert!(wf
        .transactions()
        .unwrap()
        .iter()
        .all(|t| t.group_id != group.id));
    assert_transaction_invariant(&wf);
}
