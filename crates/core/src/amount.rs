//! Amount - Non-negative decimal wrapper for transaction amounts and fees
//!
//! Group and user balances are plain `Decimal` because a completed outgoing
//! transaction may take a group below zero. What a member *proposes* to move,
//! however, is never negative.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when working with amounts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    #[error("Invalid amount: {0}")]
    Unparseable(String),
}

/// A non-negative decimal amount.
///
/// # Invariant
/// The inner value is always >= 0. This is enforced by the constructor.
///
/// # Example
/// ```
/// use synergos_core::Amount;
/// use rust_decimal::Decimal;
///
/// let amount = Amount::new(Decimal::new(500, 0)).unwrap();
/// assert_eq!(amount.value(), Decimal::new(500, 0));
///
/// let negative = Amount::new(Decimal::new(-10, 0));
/// assert!(negative.is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Zero amount constant
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new Amount from a Decimal.
    ///
    /// Returns an error if the value is negative.
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value < Decimal::ZERO {
            Err(AmountError::NegativeAmount(value))
        } else {
            Ok(Self(value))
        }
    }

    /// Get the inner Decimal value
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns None on overflow
    pub fn checked_add(&self, other: &Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Two-decimal rendering used by the wallet provider ("3500.00")
    pub fn to_fixed2(&self) -> String {
        format!("{:.2}", self.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim())
            .map_err(|_| AmountError::Unparseable(s.to_string()))?;
        Self::new(value)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_positive() {
        let amount = Amount::new(dec!(100)).unwrap();
        assert_eq!(amount.value(), dec!(100));
    }

    #[test]
    fn test_amount_negative_rejected() {
        let result = Amount::new(dec!(-100));
        assert!(matches!(result, Err(AmountError::NegativeAmount(_))));
    }

    #[test]
    fn test_parse_from_str() {
        let amount: Amount = " 250.50 ".parse().unwrap();
        assert_eq!(amount.value(), dec!(250.50));

        assert!(matches!("abc".parse::<Amount>(), Err(AmountError::Unparseable(_))));
        assert!(matches!("-5".parse::<Amount>(), Err(AmountError::NegativeAmount(_))));
    }

    #[test]
    fn test_to_fixed2() {
        assert_eq!(Amount::new(dec!(3500)).unwrap().to_fixed2(), "3500.00");
        assert_eq!(Amount::new(dec!(10.5)).unwrap().to_fixed2(), "10.50");
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        let parsed: Result<Amount, _> = serde_json::from_str("\"-1\"");
        assert!(parsed.is_err());

        let parsed: Amount = serde_json::from_str("\"12.34\"").unwrap();
        assert_eq!(parsed.value(), dec!(12.34));
    }
}
