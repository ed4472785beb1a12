//! # Synergos Approval Module
//!
//! Multi-member approval workflow for wallet groups and group transactions.
//!
//! ## Rules
//! - The proposer counts as the first approval
//! - A group becomes `active` once every member approved
//! - A transaction completes once `required_approvals` members approved,
//!   and the group balance is updated at that moment
//! - The first rejection is terminal: a group is deleted, a transaction is
//!   marked `rejected`
//!
//! ## Storage
//! The workflow runs over any [`WorkflowStore`]; [`MemoryStore`] keeps the
//! collections in process memory.

mod request;
mod store;
mod workflow;

pub use request::{GroupProposal, TransactionRequest};
pub use store::{MemoryStore, StoreError, WorkflowStore};
pub use workflow::{ApprovalError, ApprovalWorkflow, WorkflowConfig, WorkflowStats};
