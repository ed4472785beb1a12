//! CLI commands

use chrono::Utc;
use serde::Serialize;
use synergos_approval::{GroupProposal, TransactionRequest};
use synergos_core::{Amount, TransactionType};
use synergos_provider::{
    CashinConfirmRequest, CashinSimulateRequest, PrecreateRequest, TransferConfirmRequest,
    TransferSimulateRequest,
};

use crate::context::AppContext;
use crate::script;

fn print_json<T: Serialize>(value: &T) -> Result<(), anyhow::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// === Queries ===

pub fn users(ctx: &AppContext) -> Result<(), anyhow::Error> {
    print_json(&ctx.workflow.users()?)
}

/// All groups, or the active groups of one user
pub fn groups(ctx: &AppContext, user_id: Option<&str>) -> Result<(), anyhow::Error> {
    let groups = match user_id {
        Some(user_id) => ctx.workflow.user_groups(user_id)?,
        None => ctx.workflow.groups()?,
    };
    print_json(&groups)
}

pub fn pending_groups(ctx: &AppContext, user_id: &str) -> Result<(), anyhow::Error> {
    print_json(&ctx.workflow.pending_groups(user_id)?)
}

/// All transactions, or those of one group
pub fn transactions(ctx: &AppContext, group_id: Option<&str>) -> Result<(), anyhow::Error> {
    let txns = match group_id {
        Some(group_id) => ctx.workflow.group_transactions(group_id)?,
        None => ctx.workflow.transactions()?,
    };
    print_json(&txns)
}

pub fn pending_transactions(ctx: &AppContext, user_id: &str) -> Result<(), anyhow::Error> {
    print_json(&ctx.workflow.pending_transactions(user_id)?)
}

/// Workflow counters
pub fn summary(ctx: &AppContext) -> Result<(), anyhow::Error> {
    let stats = ctx.workflow.stats()?;

    println!("Groups:       {} active, {} pending", stats.active_groups, stats.pending_groups);
    println!(
        "Transactions: {} pending, {} completed, {} rejected",
        stats.pending_transactions, stats.completed_transactions, stats.rejected_transactions
    );
    Ok(())
}

// === Group workflow ===

pub fn propose_group(
    ctx: &mut AppContext,
    name: &str,
    description: &str,
    members: &[String],
    proposed_by: &str,
) -> Result<(), anyhow::Error> {
    let group = ctx.workflow.propose_group(GroupProposal::new(
        name,
        description,
        members.iter().cloned(),
        proposed_by,
    ))?;

    println!(
        "✅ Proposed group {} '{}' ({}, {}/{} approvals)",
        group.id,
        group.name,
        group.status,
        group.approved_by.len(),
        group.members.len()
    );
    Ok(())
}

pub fn approve_group(ctx: &mut AppContext, group_id: &str, user_id: &str) -> Result<(), anyhow::Error> {
    let group = ctx.workflow.approve_group(group_id, user_id)?;

    println!(
        "✅ {} approved group {} ({}, {}/{} approvals)",
        user_id,
        group.id,
        group.status,
        group.approved_by.len(),
        group.members.len()
    );
    Ok(())
}

pub fn reject_group(ctx: &mut AppContext, group_id: &str, user_id: &str) -> Result<(), anyhow::Error> {
    let group = ctx.workflow.reject_group(group_id, user_id)?;

    println!("✅ {} rejected group {}; group deleted", user_id, group.id);
    Ok(())
}

// === Transaction workflow ===

#[allow(clippy::too_many_arguments)]
pub fn add_transaction(
    ctx: &mut AppContext,
    group_id: &str,
    kind: &str,
    amount: &str,
    fees: Option<&str>,
    proposed_by: &str,
    description: Option<&str>,
    beneficiary: Option<&str>,
) -> Result<(), anyhow::Error> {
    let Some(kind) = TransactionType::from_str(kind) else {
        anyhow::bail!("Unknown transaction type: {}", kind);
    };
    let amount: Amount = amount.parse()?;

    let mut request = TransactionRequest::new(group_id, kind, amount, proposed_by);
    if let Some(fees) = fees {
        request = request.with_fees(fees.parse()?);
    }
    if let Some(description) = description {
        request = request.with_description(description);
    }
    if let Some(beneficiary) = beneficiary {
        request = request.with_beneficiary(beneficiary);
    }

    let txn = ctx.workflow.add_transaction(request)?;

    println!(
        "✅ Added {} {} {} to group {} as {} ({}, {}/{} approvals)",
        txn.kind,
        txn.amount,
        ctx.config.currency,
        txn.group_id,
        txn.id,
        txn.status,
        txn.approved_by.len(),
        txn.required_approvals
    );
    Ok(())
}

pub fn approve_transaction(ctx: &mut AppContext, txn_id: &str, user_id: &str) -> Result<(), anyhow::Error> {
    let txn = ctx.workflow.approve_transaction(txn_id, user_id)?;

    println!(
        "✅ {} approved transaction {} ({}, {}/{} approvals)",
        user_id,
        txn.id,
        txn.status,
        txn.approved_by.len(),
        txn.required_approvals
    );
    Ok(())
}

pub fn reject_transaction(ctx: &mut AppContext, txn_id: &str, user_id: &str) -> Result<(), anyhow::Error> {
    let txn = ctx.workflow.reject_transaction(txn_id, user_id)?;

    println!("✅ {} rejected transaction {} ({})", user_id, txn.id, txn.status);
    Ok(())
}

/// Execute a JSON script of workflow actions
pub fn run_script(ctx: &mut AppContext, raw: &str, stop_on_error: bool) -> Result<(), anyhow::Error> {
    let actions = script::parse(raw)?;
    let report = script::run(ctx, actions, stop_on_error);

    print_json(&report)?;
    let failures = report.failures();
    if failures > 0 {
        println!("⚠️  {} of {} steps refused", failures, report.steps.len());
    } else {
        println!("✅ {} steps applied", report.steps.len());
    }
    Ok(())
}

// === Analytics ===

pub fn stats(ctx: &AppContext) -> Result<(), anyhow::Error> {
    let dataset = ctx.dataset();
    print_json(&synergos_analytics::stats(&dataset, Utc::now(), &ctx.config.analytics))
}

pub fn locations(ctx: &AppContext) -> Result<(), anyhow::Error> {
    print_json(&synergos_analytics::locations(&ctx.workflow.users()?))
}

pub fn graph(ctx: &AppContext) -> Result<(), anyhow::Error> {
    print_json(&synergos_analytics::graph(&ctx.dataset()))
}

// === Provider simulator ===

pub fn provider_otp(ctx: &mut AppContext) -> Result<(), anyhow::Error> {
    print_json(&ctx.provider.transfer_otp())
}

pub fn provider_precreate(ctx: &mut AppContext, req: &PrecreateRequest) -> Result<(), anyhow::Error> {
    print_json(&ctx.provider.precreate(req))
}

pub fn provider_activate(ctx: &mut AppContext) -> Result<(), anyhow::Error> {
    print_json(&ctx.provider.activate())
}

pub fn provider_balance(ctx: &AppContext, contract_id: Option<&str>) -> Result<(), anyhow::Error> {
    print_json(&ctx.provider.balance(&ctx.dataset(), contract_id)?)
}

pub fn provider_client_info(ctx: &mut AppContext, phone_number: &str) -> Result<(), anyhow::Error> {
    let dataset = ctx.dataset();
    print_json(&ctx.provider.client_info(&dataset, phone_number)?)
}

pub fn provider_history(ctx: &AppContext, contract_id: Option<&str>) -> Result<(), anyhow::Error> {
    print_json(&ctx.provider.history(&ctx.dataset(), contract_id)?)
}

pub fn provider_cashin_simulate(ctx: &mut AppContext, req: &CashinSimulateRequest) -> Result<(), anyhow::Error> {
    print_json(&ctx.provider.cashin_simulate(req)?)
}

pub fn provider_cashin_confirm(ctx: &mut AppContext, req: &CashinConfirmRequest) -> Result<(), anyhow::Error> {
    print_json(&ctx.provider.cashin_confirm(req)?)
}

pub fn provider_transfer_simulate(ctx: &mut AppContext, req: &TransferSimulateRequest) -> Result<(), anyhow::Error> {
    let dataset = ctx.dataset();
    print_json(&ctx.provider.transfer_simulate(&dataset, req)?)
}

pub fn provider_transfer_confirm(ctx: &AppContext, req: &TransferConfirmRequest) -> Result<(), anyhow::Error> {
    print_json(&ctx.provider.transfer_confirm(req)?)
}
