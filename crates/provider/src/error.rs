//! Provider errors

use thiserror::Error;

/// Errors returned by the simulated wallet provider
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Contract ID is required")]
    MissingContractId,

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

impl ProviderError {
    /// HTTP status the provider answers with
    pub fn status_code(&self) -> u16 {
        match self {
            ProviderError::MissingContractId => 400,
            ProviderError::UserNotFound(_) => 404,
            ProviderError::InvalidAmount(_) => 400,
        }
    }
}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;
