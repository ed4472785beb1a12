//! Dashboard KPIs

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use synergos_core::{Dataset, TransactionStatus};

/// Analytics settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Width of the "recent activity" window
    #[serde(default = "default_trend_window_days")]
    pub trend_window_days: u32,
}

fn default_trend_window_days() -> u32 {
    7
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            trend_window_days: default_trend_window_days(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_users: usize,
    pub total_groups: usize,
    pub total_transactions: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_volume: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_transaction_size: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_group_balance: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_group_balance: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_transactions_per_user: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub completed: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trends {
    pub window_days: u32,
    pub recent_transactions: usize,
    /// Share of all transactions that fall inside the window, as a percentage
    pub growth_rate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupActivity {
    pub id: String,
    pub name: String,
    pub members: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEngagement {
    pub user_id: String,
    pub name: String,
    pub transaction_count: usize,
}

/// Full KPI report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub overview: Overview,
    pub transaction_status: StatusCounts,
    pub trends: Trends,
    pub group_activity: Vec<GroupActivity>,
    pub user_engagement: Vec<UserEngagement>,
}

/// Compute the dashboard KPIs as of `now`
pub fn stats(dataset: &Dataset, now: DateTime<Utc>, config: &AnalyticsConfig) -> DashboardStats {
    let txns = &dataset.transactions;

    let total_volume: Decimal = txns.iter().map(|t| t.amount.value()).sum();
    let total_group_balance: Decimal = dataset.groups.iter().map(|g| g.balance).sum();

    let mut transaction_status = StatusCounts::default();
    for txn in txns {
        match txn.status {
            TransactionStatus::Completed => transaction_status.completed += 1,
            TransactionStatus::Pending => transaction_status.pending += 1,
            TransactionStatus::Approved => transaction_status.approved += 1,
            TransactionStatus::Rejected => transaction_status.rejected += 1,
        }
    }

    let cutoff = now
        .checked_sub_signed(Duration::days(i64::from(config.trend_window_days)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let recent = txns.iter().filter(|t| t.created_at > cutoff).count();
    let growth = ratio(Decimal::from(recent), Decimal::from(txns.len())) * Decimal::ONE_HUNDRED;

    let group_activity = dataset
        .groups
        .iter()
        .map(|group| GroupActivity {
            id: group.id.clone(),
            name: group.name.clone(),
            members: group.members.len(),
            balance: group.balance,
            transaction_count: txns.iter().filter(|t| t.group_id == group.id).count(),
        })
        .collect();

    // First-seen order, so ties keep the order of the transaction log
    let mut per_user: Vec<(&str, usize)> = Vec::new();
    for txn in txns {
        match per_user.iter_mut().find(|(id, _)| *id == txn.proposed_by) {
            Some((_, count)) => *count += 1,
            None => per_user.push((txn.proposed_by.as_str(), 1)),
        }
    }
    let mut user_engagement: Vec<UserEngagement> = per_user
        .into_iter()
        .map(|(user_id, count)| UserEngagement {
            user_id: user_id.to_string(),
            name: dataset
                .user(user_id)
                .map(|u| u.full_name())
                .unwrap_or_else(|| "Unknown".to_string()),
            transaction_count: count,
        })
        .collect();
    user_engagement.sort_by(|a, b| b.transaction_count.cmp(&a.transaction_count));

    tracing::debug!(
        transactions = txns.len(),
        recent = recent,
        window_days = config.trend_window_days,
        "Computed dashboard stats"
    );

    DashboardStats {
        overview: Overview {
            total_users: dataset.users.len(),
            total_groups: dataset.groups.len(),
            total_transactions: txns.len(),
            total_volume,
            avg_transaction_size: ratio(total_volume, Decimal::from(txns.len())),
            total_group_balance,
            avg_group_balance: ratio(total_group_balance, Decimal::from(dataset.groups.len())),
            avg_transactions_per_user: ratio(
                Decimal::from(txns.len()),
                Decimal::from(dataset.users.len()),
            ),
        },
        transaction_status,
        trends: Trends {
            window_days: config.trend_window_days,
            recent_transactions: recent,
            growth_rate: format!("{:.2}", growth.round_dp(2)),
        },
        group_activity,
        user_engagement,
    }
}

/// `num / den`, or zero when there is nothing to divide by
fn ratio(num: Decimal, den: Decimal) -> Decimal {
    num.checked_div(den).unwrap_or(Decimal::ZERO)
}
