//! Synergos wallet provider simulator
//!
//! Stands in for the mobile-wallet provider during development:
//! - Wallet creation (pre-create with OTP, activation with contract id)
//! - Balance, client profile and history lookups against a dataset
//! - Cash-in and wallet-to-wallet transfer simulate/confirm pairs
//!
//! Randomness comes from an injected generator so runs can be reproduced.

pub mod codes;
pub mod error;
pub mod messages;
pub mod simulator;

pub use error::{ProviderError, ProviderResult};
pub use messages::*;
pub use simulator::WalletProvider;
