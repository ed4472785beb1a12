//! Storage seam for the approval workflow
//!
//! The workflow only talks to a [`WorkflowStore`]. [`MemoryStore`] keeps
//! everything in insertion-ordered vectors and is what the CLI and tests use.

use synergos_core::{Dataset, Group, Transaction, User};
use thiserror::Error;

/// Errors from a workflow store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("{kind} already exists: {id}")]
    Duplicate { kind: &'static str, id: String },

    #[error("Backend error: {0}")]
    Backend(String),
}

impl StoreError {
    fn not_found(kind: &'static str, id: &str) -> Self {
        StoreError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    fn duplicate(kind: &'static str, id: &str) -> Self {
        StoreError::Duplicate {
            kind,
            id: id.to_string(),
        }
    }
}

/// Insert/find/update by id for the three collections.
///
/// Lookups return owned values; callers write changes back with the
/// matching `update_*` method.
pub trait WorkflowStore {
    fn insert_user(&mut self, user: User) -> Result<(), StoreError>;
    fn user(&self, id: &str) -> Result<User, StoreError>;
    fn users(&self) -> Result<Vec<User>, StoreError>;

    fn insert_group(&mut self, group: Group) -> Result<(), StoreError>;
    fn group(&self, id: &str) -> Result<Group, StoreError>;
    fn groups(&self) -> Result<Vec<Group>, StoreError>;
    fn update_group(&mut self, group: &Group) -> Result<(), StoreError>;
    /// Physically remove a group, returning what was stored
    fn remove_group(&mut self, id: &str) -> Result<Group, StoreError>;

    fn insert_transaction(&mut self, txn: Transaction) -> Result<(), StoreError>;
    fn transaction(&self, id: &str) -> Result<Transaction, StoreError>;
    fn transactions(&self) -> Result<Vec<Transaction>, StoreError>;
    fn update_transaction(&mut self, txn: &Transaction) -> Result<(), StoreError>;
}

/// In-process store backed by vectors (load order preserved)
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    users: Vec<User>,
    groups: Vec<Group>,
    transactions: Vec<Transaction>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a dataset, rejecting duplicate ids
    pub fn from_dataset(dataset: Dataset) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for user in dataset.users {
            store.insert_user(user)?;
        }
        for group in dataset.groups {
            store.insert_group(group)?;
        }
        for txn in dataset.transactions {
            store.insert_transaction(txn)?;
        }
        Ok(store)
    }

    /// Copy of the current contents
    pub fn snapshot(&self) -> Dataset {
        Dataset {
            users: self.users.clone(),
            groups: self.groups.clone(),
            transactions: self.transactions.clone(),
        }
    }
}

impl WorkflowStore for MemoryStore {
    fn insert_user(&mut self, user: User) -> Result<(), StoreError> {
        if self.users.iter().any(|u| u.id == user.id) {
            return Err(StoreError::duplicate("user", &user.id));
        }
        self.users.push(user);
        Ok(())
    }

    fn user(&self, id: &str) -> Result<User, StoreError> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("user", id))
    }

    fn users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.clone())
    }

    fn insert_group(&mut self, group: Group) -> Result<(), StoreError> {
        if self.groups.iter().any(|g| g.id == group.id) {
            return Err(StoreError::duplicate("group", &group.id));
        }
        self.groups.push(group);
        Ok(())
    }

    fn group(&self, id: &str) -> Result<Group, StoreError> {
        self.groups
            .iter()
            .find(|g| g.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("group", id))
    }

    fn groups(&self) -> Result<Vec<Group>, StoreError> {
        Ok(self.groups.clone())
    }

    fn update_group(&mut self, group: &Group) -> Result<(), StoreError> {
        let slot = self
            .groups
            .iter_mut()
            .find(|g| g.id == group.id)
            .ok_or_else(|| StoreError::not_found("group", &group.id))?;
        *slot = group.clone();
        Ok(())
    }

    fn remove_group(&mut self, id: &str) -> Result<Group, StoreError> {
        let index = self
            .groups
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| StoreError::not_found("group", id))?;
        Ok(self.groups.remove(index))
    }

    fn insert_transaction(&mut self, txn: Transaction) -> Result<(), StoreError> {
        if self.transactions.iter().any(|t| t.id == txn.id) {
            return Err(StoreError::duplicate("transaction", &txn.id));
        }
        self.transactions.push(txn);
        Ok(())
    }

    fn transaction(&self, id: &str) -> Result<Transaction, StoreError> {
        self.transactions
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("transaction", id))
    }

    fn transactions(&self) -> Result<Vec<Transaction>, StoreError> {
        Ok(self.transactions.clone())
    }

    fn update_transaction(&mut self, txn: &Transaction) -> Result<(), StoreError> {
        let slot = self
            .transactions
            .iter_mut()
            .find(|t| t.id == txn.id)
            .ok_or_else(|| StoreError::not_found("transaction", &txn.id))?;
        *slot = txn.clone();
        Ok(())
    }
}
