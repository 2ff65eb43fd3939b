//! Weighted amount splitting with a last-slot residual.
//!
//! The split guarantees that the emitted amounts sum EXACTLY to the total rounded
//! to the target precision (no cents lost or gained):
//! 1. Compute each exact share `total * (weight / sum(weights))`
//! 2. Round each share once to the target precision
//! 3. Add the residual `rounded_total - sum(rounded_shares)` to the last share

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

/// Splitting utility for distributing an amount over weighted slots.
pub struct SplitUtil;

impl SplitUtil {
    /// Rounds an amount the way every emitted amount is rounded.
    #[must_use]
    pub fn round(amount: Decimal, decimal_places: u32) -> Decimal {
        amount.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
    }

    /// Splits `total` proportionally to `weights`.
    ///
    /// Non-positive weights receive nothing. If every weight is non-positive the
    /// whole amount lands in the last slot.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use aidflow_core::allocation::SplitUtil;
    ///
    /// // 100000 over 184 and 182 days
    /// let result = SplitUtil::split_by_weights(dec!(100000), &[184, 182], 2);
    /// assert_eq!(result, vec![dec!(50273.22), dec!(49726.78)]);
    /// ```
    #[must_use]
    pub fn split_by_weights(total: Decimal, weights: &[i64], decimal_places: u32) -> Vec<Decimal> {
        if weights.is_empty() {
            return vec![];
        }

        let total_rounded = Self::round(total, decimal_places);
        let weight_sum: i64 = weights.iter().copied().filter(|w| *w > 0).sum();

        let mut shares: Vec<Decimal> = if weight_sum == 0 {
            vec![Decimal::ZERO; weights.len()]
        } else {
            let denominator = Decimal::from(weight_sum);
            weights
                .iter()
                .map(|w| {
                    if *w > 0 {
                        Self::round(total * (Decimal::from(*w) / denominator), decimal_places)
                    } else {
                        Decimal::ZERO
                    }
                })
                .collect()
        };

        let allocated: Decimal = shares.iter().copied().sum();
        let residual = total_rounded - allocated;
        if let Some(last) = shares.last_mut() {
            *last += residual;
        }

        shares
    }
}
