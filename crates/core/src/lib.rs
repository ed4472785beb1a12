//! Synergos Core - Domain types
//!
//! This crate contains the entities shared across Synergos:
//! - `Amount`: Non-negative decimal wrapper for transaction amounts and fees
//! - `User`, `Group`, `Transaction`: the group-wallet data model
//! - `Dataset`: the collections loaded into a store

pub mod amount;
pub mod dataset;
pub mod group;
pub mod transaction;
pub mod user;

pub use amount::{Amount, AmountError};
pub use dataset::Dataset;
pub use group::{Group, GroupStatus};
pub use transaction::{Transaction, TransactionStatus, TransactionType};
pub use user::{Location, User};
