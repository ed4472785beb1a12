//! Approval workflow logic
//!
//! Groups and transactions both need every member's approval. A single
//! rejection ends a proposal: a group is deleted, a transaction is kept with
//! status `rejected`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use synergos_core::{
    Group, GroupStatus, Transaction, TransactionStatus, TransactionType, User,
};
use thiserror::Error;

use crate::request::{GroupProposal, TransactionRequest};
use crate::store::{MemoryStore, StoreError, WorkflowStore};

/// Configuration for the approval workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Credit (instead of debit) a cash-in that completes through approvals.
    ///
    /// Off by default: every approval-completed transaction debits
    /// `amount + fees`, cash-ins included.
    #[serde(default)]
    pub cashin_credits_on_approval: bool,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            cashin_credits_on_approval: false,
        }
    }
}

/// Errors from the approval workflow
#[derive(Debug, Error)]
pub enum ApprovalError {
    #[error("Store error: {0}")]
    Store(StoreError),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("{kind} {id} cannot be changed: {reason}")]
    InvalidState {
        kind: &'static str,
        id: String,
        reason: String,
    },

    #[error("{user_id} already {action} {kind} {id}")]
    DuplicateAction {
        kind: &'static str,
        id: String,
        user_id: String,
        action: &'static str,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{user_id} is not a member of group {group_id}")]
    NotMember { group_id: String, user_id: String },
}

impl From<StoreError> for ApprovalError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { kind, id } => ApprovalError::NotFound { kind, id },
            other => ApprovalError::Store(other),
        }
    }
}

/// Unanimous-approval workflow over a [`WorkflowStore`]
pub struct ApprovalWorkflow<S: WorkflowStore = MemoryStore> {
    store: S,
    config: WorkflowConfig,
}

impl<S: WorkflowStore> ApprovalWorkflow<S> {
    /// Create a new workflow with the given store and config
    pub fn new(store: S, config: WorkflowConfig) -> Self {
        Self { store, config }
    }

    /// Create a new workflow with default config
    pub fn with_store(store: S) -> Self {
        Self::new(store, WorkflowConfig::default())
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // === Groups ===

    /// Propose a new group. The proposer is recorded as the first approval.
    pub fn propose_group(&mut self, proposal: GroupProposal) -> Result<Group, ApprovalError> {
        if proposal.name.trim().is_empty() {
            return Err(ApprovalError::InvalidInput("group name is required".to_string()));
        }

        let members = proposal.unique_members();
        if members.is_empty() {
            return Err(ApprovalError::InvalidInput(
                "a group needs at least one member".to_string(),
            ));
        }
        if !members.contains(&proposal.proposed_by) {
            return Err(ApprovalError::InvalidInput(format!(
                "proposer {} must be one of the members",
                proposal.proposed_by
            )));
        }
        for member in &members {
            self.store.user(member)?;
        }

        let group = Group::propose(
            proposal.name,
            proposal.description,
            members,
            proposal.proposed_by,
        );
        self.store.insert_group(group.clone())?;

        tracing::debug!(
            group_id = %group.id,
            proposed_by = %group.proposed_by,
            members = group.members.len(),
            status = %group.status,
            "Group proposed"
        );

        Ok(group)
    }

    /// Approve a pending group. Returns the group, `active` once every member approved.
    pub fn approve_group(&mut self, group_id: &str, user_id: &str) -> Result<Group, ApprovalError> {
        let mut group = self.store.group(group_id)?;

        if group.status != GroupStatus::Pending {
            return Err(invalid_state("group", group_id, format!("group is {}", group.status)));
        }
        if group.has_approved(user_id) {
            return Err(duplicate("group", group_id, user_id, "approved"));
        }
        if !group.rejected_by.is_empty() {
            return Err(invalid_state("group", group_id, "a rejection is recorded".to_string()));
        }
        ensure_member(&group, user_id)?;

        group.add_approval(user_id);
        self.store.update_group(&group)?;

        tracing::debug!(
            group_id,
            user_id,
            approvals = group.approved_by.len(),
            members = group.members.len(),
            status = %group.status,
            "Group approved by member"
        );

        Ok(group)
    }

    /// Reject a pending group. The group is removed immediately; the removed
    /// group is returned with the rejection recorded.
    pub fn reject_group(&mut self, group_id: &str, user_id: &str) -> Result<Group, ApprovalError> {
        let mut group = self.store.group(group_id)?;

        if group.status != GroupStatus::Pending {
            return Err(invalid_state("group", group_id, format!("group is {}", group.status)));
        }
        if group.has_rejected(user_id) {
            return Err(duplicate("group", group_id, user_id, "rejected"));
        }
        ensure_member(&group, user_id)?;

        group.add_rejection(user_id);
        self.store.remove_group(group_id)?;

        tracing::info!(group_id, user_id, "Group proposal rejected and removed");

        Ok(group)
    }

    // === Transactions ===

    /// Propose a transaction on an active group.
    ///
    /// A transaction needs approval from every member of the group as it is
    /// now. When the proposer is the only member it completes at once: a
    /// cash-in is credited, anything else debits `amount + fees`.
    pub fn add_transaction(&mut self, request: TransactionRequest) -> Result<Transaction, ApprovalError> {
        let mut group = self.store.group(&request.group_id)?;

        ensure_member(&group, &request.proposed_by)?;
        if group.status != GroupStatus::Active {
            return Err(invalid_state("group", &group.id, format!("group is {}", group.status)));
        }
        if request.amount.is_zero() {
            return Err(ApprovalError::InvalidInput("amount must be positive".to_string()));
        }

        let mut txn = Transaction::propose(
            request.group_id,
            request.kind,
            request.amount,
            request.fees,
            request.proposed_by,
            group.members.len(),
            request.description,
            request.beneficiary,
        );

        let completes = txn.has_enough_approvals();
        if completes {
            txn.status = TransactionStatus::Completed;
            settle(&mut group, single_member_effect(&txn)?)?;
        }

        self.store.insert_transaction(txn.clone())?;
        if completes {
            self.store.update_group(&group)?;
        }

        tracing::debug!(
            txn_id = %txn.id,
            group_id = %txn.group_id,
            kind = %txn.kind,
            amount = %txn.amount,
            required_approvals = txn.required_approvals,
            status = %txn.status,
            "Transaction proposed"
        );

        Ok(txn)
    }

    /// Approve a pending transaction. On the last required approval the
    /// transaction completes and the group balance is updated.
    pub fn approve_transaction(&mut self, txn_id: &str, user_id: &str) -> Result<Transaction, ApprovalError> {
        let mut txn = self.store.transaction(txn_id)?;

        if txn.status != TransactionStatus::Pending {
            return Err(invalid_state("transaction", txn_id, format!("transaction is {}", txn.status)));
        }
        if txn.has_approved(user_id) {
            return Err(duplicate("transaction", txn_id, user_id, "approved"));
        }
        if !txn.rejected_by.is_empty() {
            return Err(invalid_state("transaction", txn_id, "a rejection is recorded".to_string()));
        }
        let mut group = self.store.group(&txn.group_id)?;
        ensure_member(&group, user_id)?;

        txn.approved_by.push(user_id.to_string());

        if !txn.has_enough_approvals() {
            self.store.update_transaction(&txn)?;
        } else {
            txn.status = TransactionStatus::Completed;
            let effect = self.approval_effect(&txn)?;
            settle(&mut group, effect)?;
            self.store.update_transaction(&txn)?;
            self.store.update_group(&group)?;

            tracing::info!(
                txn_id,
                group_id = %group.id,
                effect = %effect,
                balance = %group.balance,
                "Transaction completed"
            );
        }

        tracing::debug!(
            txn_id,
            user_id,
            remaining = txn.approvals_remaining(),
            "Transaction approved by member"
        );

        Ok(txn)
    }

    /// Reject a pending transaction. Terminal; the balance is untouched.
    pub fn reject_transaction(&mut self, txn_id: &str, user_id: &str) -> Result<Transaction, ApprovalError> {
        let mut txn = self.store.transaction(txn_id)?;

        if txn.status != TransactionStatus::Pending {
            return Err(invalid_state("transaction", txn_id, format!("transaction is {}", txn.status)));
        }
        if txn.has_rejected(user_id) {
            return Err(duplicate("transaction", txn_id, user_id, "rejected"));
        }
        let group = self.store.group(&txn.group_id)?;
        ensure_member(&group, user_id)?;

        txn.rejected_by.push(user_id.to_string());
        txn.status = TransactionStatus::Rejected;
        self.store.update_transaction(&txn)?;

        tracing::info!(txn_id, user_id, "Transaction rejected");

        Ok(txn)
    }

    /// Signed change to the group balance when approvals complete a transaction
    fn approval_effect(&self, txn: &Transaction) -> Result<Decimal, ApprovalError> {
        if txn.kind == TransactionType::CashIn && self.config.cashin_credits_on_approval {
            Ok(txn.amount.value())
        } else {
            debit(txn)
        }
    }

    // === Queries ===

    pub fn user(&self, id: &str) -> Result<User, ApprovalError> {
        Ok(self.store.user(id)?)
    }

    pub fn users(&self) -> Result<Vec<User>, ApprovalError> {
        Ok(self.store.users()?)
    }

    pub fn group(&self, id: &str) -> Result<Group, ApprovalError> {
        Ok(self.store.group(id)?)
    }

    pub fn groups(&self) -> Result<Vec<Group>, ApprovalError> {
        Ok(self.store.groups()?)
    }

    /// Active groups the user belongs to
    pub fn user_groups(&self, user_id: &str) -> Result<Vec<Group>, ApprovalError> {
        Ok(self
            .store
            .groups()?
            .into_iter()
            .filter(|g| g.status == GroupStatus::Active && g.is_member(user_id))
            .collect())
    }

    /// Pending group proposals that include the user
    pub fn pending_groups(&self, user_id: &str) -> Result<Vec<Group>, ApprovalError> {
        Ok(self
            .store
            .groups()?
            .into_iter()
            .filter(|g| g.status == GroupStatus::Pending && g.is_member(user_id))
            .collect())
    }

    pub fn transaction(&self, id: &str) -> Result<Transaction, ApprovalError> {
        Ok(self.store.transaction(id)?)
    }

    pub fn transactions(&self) -> Result<Vec<Transaction>, ApprovalError> {
        Ok(self.store.transactions()?)
    }

    pub fn group_transactions(&self, group_id: &str) -> Result<Vec<Transaction>, ApprovalError> {
        self.store.group(group_id)?;
        Ok(self
            .store
            .transactions()?
            .into_iter()
            .filter(|t| t.group_id == group_id)
            .collect())
    }

    /// Pending transactions in the user's groups that still need their approval
    pub fn pending_transactions(&self, user_id: &str) -> Result<Vec<Transaction>, ApprovalError> {
        let groups: Vec<String> = self
            .store
            .groups()?
            .into_iter()
            .filter(|g| g.is_member(user_id))
            .map(|g| g.id)
            .collect();

        Ok(self
            .store
            .transactions()?
            .into_iter()
            .filter(|t| {
                t.status == TransactionStatus::Pending
                    && groups.contains(&t.group_id)
                    && !t.has_approved(user_id)
            })
            .collect())
    }

    /// Counts by lifecycle state
    pub fn stats(&self) -> Result<WorkflowStats, ApprovalError> {
        let groups = self.store.groups()?;
        let transactions = self.store.transactions()?;
        let count = |status: TransactionStatus| transactions.iter().filter(|t| t.status == status).count();

        Ok(WorkflowStats {
            pending_groups: groups.iter().filter(|g| g.status == GroupStatus::Pending).count(),
            active_groups: groups.iter().filter(|g| g.status == GroupStatus::Active).count(),
            pending_transactions: count(TransactionStatus::Pending),
            completed_transactions: count(TransactionStatus::Completed),
            rejected_transactions: count(TransactionStatus::Rejected),
        })
    }
}

impl ApprovalWorkflow<MemoryStore> {
    /// Workflow over an in-memory copy of `dataset`
    pub fn in_memory(
        dataset: synergos_core::Dataset,
        config: WorkflowConfig,
    ) -> Result<Self, ApprovalError> {
        Ok(Self::new(MemoryStore::from_dataset(dataset)?, config))
    }

    pub fn snapshot(&self) -> synergos_core::Dataset {
        self.store.snapshot()
    }
}

/// Statistics about groups and transactions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowStats {
    pub pending_groups: usize,
    pub active_groups: usize,
    pub pending_transactions: usize,
    pub completed_transactions: usize,
    pub rejected_transactions: usize,
}

fn single_member_effect(txn: &Transaction) -> Result<Decimal, ApprovalError> {
    if txn.kind == TransactionType::CashIn {
        Ok(txn.amount.value())
    } else {
        debit(txn)
    }
}

/// `-(amount + fees)`
fn debit(txn: &Transaction) -> Result<Decimal, ApprovalError> {
    txn.total()
        .map(|total| -total.value())
        .ok_or_else(|| ApprovalError::InvalidInput(format!("amount + fees of {} overflows", txn.id)))
}

/// Apply `effect` to the group balance, refusing on overflow
fn settle(group: &mut Group, effect: Decimal) -> Result<(), ApprovalError> {
    group.balance = group.balance.checked_add(effect).ok_or_else(|| {
        ApprovalError::InvalidInput(format!("balance of group {} would overflow", group.id))
    })?;
    Ok(())
}

fn ensure_member(group: &Group, user_id: &str) -> Result<(), ApprovalError> {
    if group.is_member(user_id) {
        Ok(())
    } else {
        tracing::warn!(group_id = %group.id, user_id, "Action refused: not a member");
        Err(ApprovalError::NotMember {
            group_id: group.id.clone(),
            user_id: user_id.to_string(),
        })
    }
}

fn invalid_state(kind: &'static str, id: &str, reason: String) -> ApprovalError {
    ApprovalError::InvalidState {
        kind,
        id: id.to_string(),
        reason,
    }
}

fn duplicate(kind: &'static str, id: &str, user_id: &str, action: &'static str) -> ApprovalError {
    ApprovalError::DuplicateAction {
        kind,
        id: id.to_string(),
        user_id: user_id.to_string(),
        action,
    }
}
