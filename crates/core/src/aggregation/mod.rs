//! Year-by-category bucket aggregation.
//!
//! Sums allocations into `(year, category)` buckets. Summation is exact decimal
//! addition, so the result does not depend on input order. Large inputs are folded
//! in parallel into per-worker maps that are merged at the end.

use std::collections::{BTreeMap, BTreeSet};

use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::allocation::YearAllocation;
use crate::records::Category;

#[cfg(test)]
mod tests;

/// Below this many allocations the fold runs on the calling thread.
const PARALLEL_THRESHOLD: usize = 4096;

/// Adds two sums, saturating at the decimal range instead of panicking.
///
/// The engine rejects records that would push the total magnitude past
/// `Decimal::MAX`, so saturation is only reachable through direct API use.
pub(crate) fn bounded_add(left: Decimal, right: Decimal) -> Decimal {
    left.checked_add(right).unwrap_or_else(|| {
        tracing::warn!(%left, %right, "Decimal sum overflowed, saturating");
        if right.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    })
}

/// An allocation tagged with the category it sums into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizedAllocation {
    /// Target category.
    pub category: Category,
    /// Year and amount.
    pub allocation: YearAllocation,
}

/// Running sums keyed by `(year, category)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearBuckets {
    buckets: BTreeMap<(i32, Category), Decimal>,
}

impl YearBuckets {
    /// Creates an empty set of buckets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` to the bucket, creating it on first use.
    pub fn add(&mut self, year: i32, category: Category, amount: Decimal) {
        let bucket = self.buckets.entry((year, category)).or_insert(Decimal::ZERO);
        *bucket = bounded_add(*bucket, amount);
    }

    /// Folds another set of buckets into this one.
    pub fn merge(&mut self, other: Self) {
        for ((year, category), amount) in other.buckets {
            self.add(year, category, amount);
        }
    }

    /// Bucket sum, if any allocation landed on it.
    #[must_use]
    pub fn get(&self, year: i32, category: &Category) -> Option<Decimal> {
        self.buckets.get(&(year, category.clone())).copied()
    }

    /// Sorted distinct years that have at least one bucket.
    #[must_use]
    pub fn years(&self) -> Vec<i32> {
        let years: BTreeSet<i32> = self.buckets.keys().map(|(year, _)| *year).collect();
        years.into_iter().collect()
    }

    /// Distinct categories that have at least one bucket.
    #[must_use]
    pub fn categories(&self) -> BTreeSet<Category> {
        self.buckets.keys().map(|(_, c)| c.clone()).collect()
    }

    /// Buckets in `(year, category)` order.
    pub fn iter(&self) -> impl Iterator<Item = (&(i32, Category), &Decimal)> {
        self.buckets.iter()
    }

    /// Number of buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Returns true if no allocation landed anywhere.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl FromIterator<CategorizedAllocation> for YearBuckets {
    fn from_iter<I: IntoIterator<Item = CategorizedAllocation>>(iter: I) -> Self {
        let mut buckets = Self::new();
        for item in iter {
            buckets.add(item.allocation.year, item.category, item.allocation.amount);
        }
        buckets
    }
}

/// Stateless bucket aggregator.
pub struct BucketAggregator;

impl BucketAggregator {
    /// Sums allocations into year buckets.
    #[must_use]
    pub fn aggregate(allocations: &[CategorizedAllocation]) -> YearBuckets {
        if allocations.len() < PARALLEL_THRESHOLD {
            return allocations.iter().cloned().collect();
        }

        allocations
            .par_iter()
            .fold(YearBuckets::new, |mut acc, item| {
                acc.add(
                    item.allocation.year,
                    item.category.clone(),
                    item.allocation.amount,
                );
                acc
            })
            .reduce(YearBuckets::new, |mut left, right| {
                left.merge(right);
                left
            })
    }
}
