//! Wallet groups and their proposal lifecycle

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a wallet group.
///
/// There is no `Rejected` state: a rejected proposal is removed outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupStatus {
    /// Proposed, waiting for every member to approve
    Pending,
    /// Every member approved
    Active,
}

impl GroupStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupStatus::Pending => "pending",
            GroupStatus::Active => "active",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(GroupStatus::Pending),
            "active" => Some(GroupStatus::Active),
            _ => None,
        }
    }
}

impl fmt::Display for GroupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A shared wallet owned by several users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Member user ids, in proposal order
    pub members: Vec<String>,
    pub balance: Decimal,
    /// Provider contract id
    #[serde(default)]
    pub contract_id: String,
    pub created_at: DateTime<Utc>,
    pub status: GroupStatus,
    pub proposed_by: String,
    #[serde(default)]
    pub approved_by: Vec<String>,
    #[serde(default)]
    pub rejected_by: Vec<String>,
}

impl Group {
    /// Create a pending proposal. The proposer counts as the first approval.
    pub fn propose(
        name: impl Into<String>,
        description: impl Into<String>,
        members: Vec<String>,
        proposed_by: impl Into<String>,
    ) -> Self {
        let proposed_by = proposed_by.into();
        let id = format!("grp-{}", &uuid::Uuid::new_v4().simple().to_string()[..8]);

        let mut group = Self {
            id,
            name: name.into(),
            description: description.into(),
            members,
            balance: Decimal::ZERO,
            contract_id: String::new(),
            created_at: Utc::now(),
            status: GroupStatus::Pending,
            proposed_by: proposed_by.clone(),
            approved_by: vec![proposed_by],
            rejected_by: Vec::new(),
        };
        group.refresh_status();
        group
    }

    pub fn is_member(&self, user_id: &str) -> bool {
        self.members.iter().any(|m| m == user_id)
    }

    pub fn has_approved(&self, user_id: &str) -> bool {
        self.approved_by.iter().any(|u| u == user_id)
    }

    pub fn has_rejected(&self, user_id: &str) -> bool {
        self.rejected_by.iter().any(|u| u == user_id)
    }

    /// True when every member appears in `approved_by`
    pub fn is_fully_approved(&self) -> bool {
        self.members.iter().all(|m| self.has_approved(m))
    }

    /// Members that still have to approve
    pub fn awaiting(&self) -> Vec<&str> {
        self.members
            .iter()
            .filter(|m| !self.has_approved(m))
            .map(String::as_str)
            .collect()
    }

    /// Record an approval. Returns false if this user already approved.
    pub fn add_approval(&mut self, user_id: &str) -> bool {
        if self.has_approved(user_id) {
            return false;
        }
        self.approved_by.push(user_id.to_string());
        self.refresh_status();
        true
    }

    /// Record a rejection. Returns false if this user already rejected.
    pub fn add_rejection(&mut self, user_id: &str) -> bool {
        if self.has_rejected(user_id) {
            return false;
        }
        self.rejected_by.push(user_id.to_string());
        true
    }

    fn refresh_status(&mut self) {
        if self.status == GroupStatus::Pending && self.is_fully_approved() {
            self.status = GroupStatus::Active;
        }
    }
}
