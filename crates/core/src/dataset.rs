//! Dataset - the full set of users, groups and transactions loaded at start-up

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::group::{Group, GroupStatus};
use crate::transaction::{Transaction, TransactionStatus, TransactionType};
use crate::user::{Location, User};

/// Everything the store holds, in load order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Dataset {
    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Demo data: five users, three active groups, four transactions.
    pub fn demo() -> Self {
        Self {
            users: demo_users(),
            groups: demo_groups(),
            transactions: demo_transactions(),
        }
    }
}

fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, 0)
        .single()
        .unwrap_or_default()
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn user(
    id: &str,
    phone: &str,
    first: &str,
    last: &str,
    contract_id: &str,
    balance: Decimal,
    lat: f64,
    lng: f64,
    city: &str,
) -> User {
    User {
        id: id.to_string(),
        phone_number: phone.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
        contract_id: contract_id.to_string(),
        balance,
        location: Some(Location {
            lat,
            lng,
            city: city.to_string(),
        }),
    }
}

fn demo_users() -> Vec<User> {
    vec![
        user("user1", "212700446631", "Ahmed", "Benali", "LAN240478508299911", dec!(5000), 33.5731, -7.5898, "Casablanca"),
        user("user2", "212700446211", "Fatima", "Zahra", "LAN233460579578271", dec!(3200), 34.0209, -6.8416, "Rabat"),
        user("user3", "212755123456", "Youssef", "Idrissi", "LAN193541347060001", dec!(7500), 31.6295, -7.9811, "Marrakech"),
        user("user4", "212666233333", "Samira", "Tazi", "LAN252387936812761", dec!(4100), 35.7595, -5.8340, "Tangier"),
        user("user5", "212669268097", "Karim", "Alami", "LAN251276004694521", dec!(6800), 33.9716, -6.8498, "Sale"),
    ]
}

fn active_group(
    id: &str,
    name: &str,
    description: &str,
    members: &[&str],
    balance: Decimal,
    contract_id: &str,
    created_at: DateTime<Utc>,
) -> Group {
    Group {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        members: ids(members),
        balance,
        contract_id: contract_id.to_string(),
        created_at,
        status: GroupStatus::Active,
        proposed_by: members[0].to_string(),
        approved_by: ids(members),
        rejected_by: Vec::new(),
    }
}

fn demo_groups() -> Vec<Group> {
    vec![
        active_group(
            "group1",
            "Weekend Trip Fund",
            "Save for our annual trip to Essaouira",
            &["user1", "user2", "user3"],
            dec!(12000),
            "LAN250383003224941",
            at(2025, 1, 15, 10, 0),
        ),
        active_group(
            "group2",
            "Office Lunch Pool",
            "Shared lunch budget for the team",
            &["user1", "user4", "user5"],
            dec!(3500),
            "LAN251996372325421",
            at(2025, 2, 1, 9, 0),
        ),
        active_group(
            "group3",
            "Family Emergency Fund",
            "Shared emergency savings",
            &["user2", "user3", "user4", "user5"],
            dec!(25000),
            "LAN251114678086481",
            at(2024, 12, 1, 8, 0),
        ),
    ]
}

fn demo_transactions() -> Vec<Transaction> {
    let txn = |id: &str,
               group_id: &str,
               kind: TransactionType,
               amount: Decimal,
               fees: Decimal,
               status: TransactionStatus,
               approved_by: &[&str],
               required_approvals: usize,
               description: &str,
               created_at: DateTime<Utc>| Transaction {
        id: id.to_string(),
        group_id: group_id.to_string(),
        kind,
        amount: Amount::new(amount).unwrap_or_default(),
        fees: Amount::new(fees).unwrap_or_default(),
        status,
        proposed_by: approved_by[0].to_string(),
        approved_by: ids(approved_by),
        rejected_by: Vec::new(),
        required_approvals,
        description: description.to_string(),
        created_at,
        beneficiary: None,
    };

    let mut hotel = txn(
        "txn2",
        "group1",
        TransactionType::Payment,
        dec!(3500),
        dec!(10),
        TransactionStatus::Pending,
        &["user2"],
        2,
        "Hotel booking payment",
        at(2025, 11, 15, 16, 45),
    );
    hotel.beneficiary = Some("Hotel Atlas".to_string());

    vec![
        txn(
            "txn1",
            "group1",
            TransactionType::CashIn,
            dec!(2000),
            Decimal::ZERO,
            TransactionStatus::Completed,
            &["user1", "user2"],
            2,
            "Monthly contribution",
            at(2025, 11, 1, 14, 30),
        ),
        hotel,
        txn(
            "txn3",
            "group2",
            TransactionType::CashOut,
            dec!(500),
            dec!(5),
            TransactionStatus::Approved,
            &["user4", "user1"],
            2,
            "Restaurant payment",
            at(2025, 11, 20, 12, 0),
        ),
        txn(
            "txn4",
            "group3",
            TransactionType::CashIn,
            dec!(5000),
            Decimal::ZERO,
            TransactionStatus::Completed,
            &["user3", "user2", "user4"],
            3,
            "Emergency fund contribution",
            at(2025, 11, 10, 9, 0),
        ),
    ]
}
