//! Amount selection policy.

use aidflow_shared::types::{Currency, Money};

use crate::records::FinancialRecord;

/// Picks the USD amount a record contributes.
///
/// Uses `amount_usd` when present and non-zero, falls back to `amount` only when the
/// record is already in USD, and otherwise returns `None` (zero contribution).
#[must_use]
pub fn select_amount(record: &FinancialRecord) -> Option<Money> {
    match record.amount_usd {
        Some(usd) if !usd.is_zero() => Some(Money::usd(usd)),
        _ if record.currency.is_some_and(Currency::is_usd) && !record.amount.is_zero() => {
            Some(Money::usd(record.amount))
        }
        _ => None,
    }
}
