//! Money type with decimal precision and currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a monetary amount with currency.
///
/// Uses `Decimal` internally to avoid floating-point precision errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    /// The amount in major units (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code (e.g., "USD", "MMK").
    pub currency: Currency,
}

/// ISO 4217 currency codes reported by activity records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar
    Usd,
    /// Euro
    Eur,
    /// British Pound
    Gbp,
    /// Myanmar Kyat
    Mmk,
    /// Japanese Yen
    Jpy,
    /// Chinese Yuan
    Cny,
    /// Thai Baht
    Thb,
    /// Indonesian Rupiah
    Idr,
    /// Singapore Dollar
    Sgd,
}

impl Currency {
    /// Returns true for the reporting currency every series is expressed in.
    #[must_use]
    pub const fn is_usd(self) -> bool {
        matches!(self, Self::Usd)
    }
}

impl Money {
    /// Creates a new Money instance.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Creates a US dollar amount.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self::new(amount, Currency::Usd)
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Mmk => "MMK",
            Self::Jpy => "JPY",
            Self::Cny => "CNY",
            Self::Thb => "THB",
            Self::Idr => "IDR",
            Self::Sgd => "SGD",
        };
        f.write_str(code)
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "GBP" => Ok(Self::Gbp),
            "MMK" => Ok(Self::Mmk),
            "JPY" => Ok(Self::Jpy),
            "CNY" => Ok(Self::Cny),
            "THB" => Ok(Self::Thb),
            "IDR" => Ok(Self::Idr),
            "SGD" => Ok(Self::Sgd),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}
