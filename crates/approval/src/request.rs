//! Inputs for new proposals

use serde::{Deserialize, Serialize};
use synergos_core::{Amount, TransactionType};

/// A request to create a wallet group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupProposal {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub members: Vec<String>,
    pub proposed_by: String,
}

impl GroupProposal {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        members: impl IntoIterator<Item = impl Into<String>>,
        proposed_by: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            members: members.into_iter().map(Into::into).collect(),
            proposed_by: proposed_by.into(),
        }
    }

    /// Members with duplicates dropped, first occurrence kept
    pub fn unique_members(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::with_capacity(self.members.len());
        for member in &self.members {
            if !seen.contains(member) {
                seen.push(member.clone());
            }
        }
        seen
    }
}

/// A request to move group funds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub group_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Amount,
    #[serde(default)]
    pub fees: Amount,
    pub proposed_by: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub beneficiary: Option<String>,
}

impl TransactionRequest {
    pub fn new(
        group_id: impl Into<String>,
        kind: TransactionType,
        amount: Amount,
        proposed_by: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            kind,
            amount,
            fees: Amount::ZERO,
            proposed_by: proposed_by.into(),
            description: String::new(),
            beneficiary: None,
        }
    }

    pub fn with_fees(mut self, fees: Amount) -> Self {
        self.fees = fees;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_beneficiary(mut self, beneficiary: impl Into<String>) -> Self {
        self.beneficiary = Some(beneficiary.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_members_keeps_first_occurrence() {
        let proposal = GroupProposal::new("Trip", "", ["user2", "user1", "user2", "user3"], "user1");
        assert_eq!(proposal.unique_members(), vec!["user2", "user1", "user3"]);
    }

    #[test]
    fn test_transaction_request_from_json() {
        let json = r#"{
            "groupId": "group1",
            "type": "payment",
            "amount": "500",
            "fees": "10",
            "proposedBy": "user1",
            "beneficiary": "Hotel Atlas"
        }"#;
        let request: TransactionRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.kind, TransactionType::Payment);
        assert_eq!(request.fees.to_fixed2(), "10.00");
        assert_eq!(request.description, "");
        assert_eq!(request.beneficiary.as_deref(), Some("Hotel Atlas"));
    }
}
