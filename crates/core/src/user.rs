//! Wallet users

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Where a user is based; feeds the geographic analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub city: String,
}

/// A wallet holder.
///
/// Users are created when a dataset is loaded. Groups and transactions refer
/// to them by `id` only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub phone_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Provider contract id
    pub contract_id: String,
    pub balance: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
