//! Property-based tests for bucket aggregation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::{BucketAggregator, CategorizedAllocation};
use crate::allocation::YearAllocation;
use crate::records::Category;

const LABELS: [&str; 4] = ["Disbursement", "Expenditure", "Budgets", "Planned Disbursements"];

fn allocation_strategy() -> impl Strategy<Value = CategorizedAllocation> {
    (0usize..LABELS.len(), 2015i32..2030, -1_000_000_000i64..1_000_000_000).prop_map(
        |(label, year, cents)| CategorizedAllocation {
            category: Category::new(LABELS[label]),
            allocation: YearAllocation {
                year,
                amount: Decimal::new(cents, 2),
            },
        },
    )
}

proptest! {
    /// Aggregation is independent of input order.
    #[test]
    fn test_aggregation_order_independent(
        allocations in prop::collection::vec(allocation_strategy(), 0..200),
    ) {
        let forward = BucketAggregator::aggregate(&allocations);

        let mut reversed = allocations.clone();
        reversed.reverse();
        prop_assert_eq!(&forward, &BucketAggregator::aggregate(&reversed));
    }

    /// Bucket sums add up to the total of all allocations.
    #[test]
    fn test_aggregation_preserves_total(
        allocations in prop::collection::vec(allocation_strategy(), 0..200),
    ) {
        let buckets = BucketAggregator::aggregate(&allocations);

        let expected: Decimal = allocations.iter().map(|a| a.allocation.amount).sum();
        let actual: Decimal = buckets.iter().map(|(_, amount)| *amount).sum();
        prop_assert_eq!(actual, expected);
    }
}

#[test]
fn test_parallel_fold_matches_sequential() {
    let allocations: Vec<CategorizedAllocation> = (0..10_000)
        .map(|i| CategorizedAllocation {
            category: Category::new(LABELS[i % LABELS.len()]),
            allocation: YearAllocation {
                year: 2015 + i32::try_from(i % 9).unwrap(),
                amount: Decimal::new(i64::try_from(i).unwrap() * 7 + 1, 2),
            },
        })
        .collect();

    let parallel = BucketAggregator::aggregate(&allocations);
    let sequential: super::YearBuckets = allocations.iter().cloned().collect();

    assert_eq!(parallel, sequential);
    assert_eq!(parallel.years(), (2015..2024).collect::<Vec<_>>());
    assert_eq!(parallel.categories().len(), LABELS.len());
}

#[test]
fn test_buckets_created_lazily() {
    let buckets = BucketAggregator::aggregate(&[CategorizedAllocation {
        category: Category::budgets(),
        allocation: YearAllocation {
            year: 2023,
            amount: Decimal::new(300, 0),
        },
    }]);

    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets.get(2023, &Category::budgets()), Some(Decimal::new(300, 0)));
    assert_eq!(buckets.get(2022, &Category::budgets()), None);
    assert!(BucketAggregator::aggregate(&[]).is_empty());
}

#[test]
fn test_bucket_sum_saturates_at_decimal_range() {
    let mut buckets = super::YearBuckets::new();
    buckets.add(2023, Category::budgets(), Decimal::MAX);
    buckets.add(2023, Category::budgets(), Decimal::MAX);
    buckets.add(2024, Category::budgets(), Decimal::MIN);
    buckets.add(2024, Category::budgets(), Decimal::new(-1, 0));

    assert_eq!(buckets.get(2023, &Category::budgets()), Some(Decimal::MAX));
    assert_eq!(buckets.get(2024, &Category::budgets()), Some(Decimal::MIN));
}
