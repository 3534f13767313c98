//! Monetary value objects.
//!
//! Amounts are never bare numbers: every amount travels with its ISO 4217
//! currency code. Arithmetic across currencies is an invariant violation,
//! not a silent coercion.

use core::str::FromStr;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// ISO 4217 currency code: exactly three ASCII uppercase letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> DomainResult<Self> {
        let code = code.into();
        if !Self::is_valid(&code) {
            return Err(DomainError::validation(format!(
                "invalid currency code: {code:?}"
            )));
        }
        Ok(Self(code))
    }

    /// Shape check shared with the bulk validation layer.
    pub fn is_valid(code: &str) -> bool {
        code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CurrencyCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl core::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl ValueObject for CurrencyCode {}

/// An amount in a specific currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: Decimal,
    pub currency: CurrencyCode,
}

impl Money {
    pub fn new(amount: Decimal, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }

    pub fn zero(currency: CurrencyCode) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Sum two amounts of the same currency.
    pub fn checked_add(&self, other: &Money) -> DomainResult<Money> {
        if self.currency != other.currency {
            return Err(DomainError::invariant(format!(
                "currency mismatch: {} vs {}",
                self.currency, other.currency
            )));
        }
        Ok(Money::new(self.amount + other.amount, self.currency.clone()))
    }

    /// Multiply by a unit count (line total = unit price x quantity).
    pub fn times(&self, quantity: u32) -> Money {
        Money::new(self.amount * Decimal::from(quantity), self.currency.clone())
    }
}

impl core::fmt::Display for Money {
    /// Bare decimal rendering; the currency travels in its own column/field.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.amount, f)
    }
}

impl ValueObject for Money {}
