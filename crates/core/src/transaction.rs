//! Group transactions awaiting member approval

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::amount::Amount;

/// What a transaction does to the group wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Money coming into the group wallet
    #[serde(rename = "cashin")]
    CashIn,
    /// Withdrawal to cash
    #[serde(rename = "cashout")]
    CashOut,
    /// Wallet-to-wallet transfer
    #[serde(rename = "w2w", alias = "wallet-transfer")]
    WalletTransfer,
    /// Payment to a merchant or beneficiary
    #[serde(rename = "payment")]
    Payment,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::CashIn => "cashin",
            TransactionType::CashOut => "cashout",
            TransactionType::WalletTransfer => "w2w",
            TransactionType::Payment => "payment",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cashin" => Some(TransactionType::CashIn),
            "cashout" => Some(TransactionType::CashOut),
            "w2w" | "wallet-transfer" => Some(TransactionType::WalletTransfer),
            "payment" => Some(TransactionType::Payment),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a group transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Awaiting approvals
    Pending,
    /// Legacy state found in older datasets; never produced by the workflow
    Approved,
    /// Rejected by a member (terminal)
    Rejected,
    /// Every member approved and the balance effect was applied (terminal)
    Completed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Approved => "approved",
            TransactionStatus::Rejected => "rejected",
            TransactionStatus::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(TransactionStatus::Pending),
            "approved" => Some(TransactionStatus::Approved),
            "rejected" => Some(TransactionStatus::Rejected),
            "completed" => Some(TransactionStatus::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A proposed movement of group funds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub group_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Amount,
    pub fees: Amount,
    pub status: TransactionStatus,
    pub proposed_by: String,
    pub approved_by: Vec<String>,
    #[serde(default)]
    pub rejected_by: Vec<String>,
    /// Member count of the group when the transaction was proposed
    pub required_approvals: usize,
    pub description: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beneficiary: Option<String>,
}

impl Transaction {
    /// Create a pending transaction. The proposer counts as the first approval.
    #[allow(clippy::too_many_arguments)]
    pub fn propose(
        group_id: impl Into<String>,
        kind: TransactionType,
        amount: Amount,
        fees: Amount,
        proposed_by: impl Into<String>,
        required_approvals: usize,
        description: impl Into<String>,
        beneficiary: Option<String>,
    ) -> Self {
        let proposed_by = proposed_by.into();
        let id = format!("txn-{}", &uuid::Uuid::new_v4().simple().to_string()[..8]);

        Self {
            id,
            group_id: group_id.into(),
            kind,
            amount,
            fees,
            status: TransactionStatus::Pending,
            proposed_by: proposed_by.clone(),
            approved_by: vec![proposed_by],
            rejected_by: Vec::new(),
            required_approvals,
            description: description.into(),
            created_at: Utc::now(),
            beneficiary,
        }
    }

    pub fn has_approved(&self, user_id: &str) -> bool {
        self.approved_by.iter().any(|u| u == user_id)
    }

    pub fn has_rejected(&self, user_id: &str) -> bool {
        self.rejected_by.iter().any(|u| u == user_id)
    }

    pub fn has_enough_approvals(&self) -> bool {
        self.approved_by.len() >= self.required_approvals
    }

    pub fn approvals_remaining(&self) -> usize {
        self.required_approvals.saturating_sub(self.approved_by.len())
    }

    /// `amount + fees`, the total leaving the group on completion.
    /// Returns None on overflow.
    pub fn total(&self) -> Option<Amount> {
        self.amount.checked_add(&self.fees)
    }
}
