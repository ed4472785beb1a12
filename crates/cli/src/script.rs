//! Scripted workflow runs
//!
//! A script is a JSON list of actions executed in order against one context.
//! `proposeGroup` and `addTransaction` may carry a `label`; later actions can
//! use that label wherever they take a group or transaction id.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use synergos_approval::{ApprovalError, GroupProposal, TransactionRequest};

use crate::context::AppContext;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Action {
    ProposeGroup {
        #[serde(default)]
        label: Option<String>,
        #[serde(flatten)]
        proposal: GroupProposal,
    },
    ApproveGroup {
        group: String,
        user: String,
    },
    RejectGroup {
        group: String,
        user: String,
    },
    AddTransaction {
        #[serde(default)]
        label: Option<String>,
        #[serde(flatten)]
        request: TransactionRequest,
    },
    ApproveTransaction {
        transaction: String,
        user: String,
    },
    RejectTransaction {
        transaction: String,
        user: String,
    },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::ProposeGroup { .. } => "proposeGroup",
            Action::ApproveGroup { .. } => "approveGroup",
            Action::RejectGroup { .. } => "rejectGroup",
            Action::AddTransaction { .. } => "addTransaction",
            Action::ApproveTransaction { .. } => "approveTransaction",
            Action::RejectTransaction { .. } => "rejectTransaction",
        }
    }
}

/// What happened at one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    pub step: usize,
    pub action: &'static str,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScriptReport {
    pub steps: Vec<StepOutcome>,
}

impl ScriptReport {
    pub fn failures(&self) -> usize {
        self.steps.iter().filter(|s| !s.ok).count()
    }
}

pub fn parse(raw: &str) -> Result<Vec<Action>, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Run every action. Refused actions are recorded and the run continues,
/// unless `stop_on_error` is set.
pub fn run(ctx: &mut AppContext, actions: Vec<Action>, stop_on_error: bool) -> ScriptReport {
    let mut labels: HashMap<String, String> = HashMap::new();
    let mut report = ScriptReport::default();

    for (index, action) in actions.into_iter().enumerate() {
        let step = index + 1;
        let name = action.name();

        let outcome = match execute(ctx, action, &mut labels) {
            Ok((id, status)) => StepOutcome {
                step,
                action: name,
                ok: true,
                id: Some(id),
                status: Some(status),
                error: None,
            },
            Err(e) => {
                tracing::warn!(step, action = name, error = %e, "Script step refused");
                StepOutcome {
                    step,
                    action: name,
                    ok: false,
                    id: None,
                    status: None,
                    error: Some(e.to_string()),
                }
            }
        };

        let failed = !outcome.ok;
        report.steps.push(outcome);
        if failed && stop_on_error {
            break;
        }
    }

    report
}

fn execute(
    ctx: &mut AppContext,
    action: Action,
    labels: &mut HashMap<String, String>,
) -> Result<(String, String), ApprovalError> {
    let resolve = |labels: &HashMap<String, String>, reference: &str| {
        labels
            .get(reference)
            .cloned()
            .unwrap_or_else(|| reference.to_string())
    };

    match action {
        Action::ProposeGroup { label, proposal } => {
            let group = ctx.workflow.propose_group(proposal)?;
            if let Some(label) = label {
                labels.insert(label, group.id.clone());
            }
            Ok((group.id, group.status.to_string()))
        }
        Action::ApproveGroup { group, user } => {
            let group = ctx.workflow.approve_group(&resolve(labels, &group), &user)?;
            Ok((group.id, group.status.to_string()))
        }
        Action::RejectGroup { group, user } => {
            let group = ctx.workflow.reject_group(&resolve(labels, &group), &user)?;
            Ok((group.id, "deleted".to_string()))
        }
        Action::AddTransaction { label, mut request } => {
            request.group_id = resolve(labels, &request.group_id);
            let txn = ctx.workflow.add_transaction(request)?;
            if let Some(label) = label {
                labels.insert(label, txn.id.clone());
            }
            Ok((txn.id, txn.status.to_string()))
        }
        Action::ApproveTransaction { transaction, user } => {
            let txn = ctx
                .workflow
                .approve_transaction(&resolve(labels, &transaction), &user)?;
            Ok((txn.id, txn.status.to_string()))
        }
        Action::RejectTransaction { transaction, user } => {
            let txn = ctx
                .workflow
                .reject_transaction(&resolve(labels, &transaction), &user)?;
            Ok((txn.id, txn.status.to_string()))
        }
    }
}
