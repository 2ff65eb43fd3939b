//! Property-based tests for period allocation.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use aidflow_shared::types::Currency;

use super::{AllocationMethod, PeriodAllocator, SplitUtil};
use crate::calendar::CalendarDef;
use crate::records::{Category, FinancialRecord, RecordClass};

fn budget(start: NaiveDate, end: NaiveDate, cents: i64) -> FinancialRecord {
    FinancialRecord {
        id: None,
        class: RecordClass::Budget,
        amount: Decimal::new(cents, 2),
        amount_usd: Some(Decimal::new(cents, 2)),
        currency: Some(Currency::Usd),
        category: Category::budgets(),
        period_start: Some(start),
        period_end: Some(end),
    }
}

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2015, 1, 1).unwrap()
}

fn calendar_strategy() -> impl Strategy<Value = CalendarDef> {
    prop_oneof![
        Just(CalendarDef::Calendar),
        (1u32..=12).prop_map(|start_month| CalendarDef::Fiscal { start_month }),
    ]
}

proptest! {
    /// Proportional allocations sum exactly to the rounded amount.
    #[test]
    fn test_proportional_sum_invariant(
        calendar in calendar_strategy(),
        offset in 0i64..3650,
        length in 1i64..2000,
        cents in 1i64..10_000_000_000,
    ) {
        let start = base_date() + Duration::days(offset);
        let end = start + Duration::days(length);
        let record = budget(start, end, cents);

        let allocations = PeriodAllocator::new(calendar, 2)
            .unwrap()
            .allocate(&record, AllocationMethod::Proportional)
            .unwrap();

        let sum: Decimal = allocations.iter().map(|a| a.amount).sum();
        prop_assert_eq!(sum, Decimal::new(cents, 2));
    }

    /// Allocations cover consecutive ascending years from the start year to the end year.
    #[test]
    fn test_proportional_years_are_contiguous(
        calendar in calendar_strategy(),
        offset in 0i64..3650,
        length in 1i64..2000,
    ) {
        let start = base_date() + Duration::days(offset);
        let end = start + Duration::days(length);

        let allocations = PeriodAllocator::new(calendar, 2)
            .unwrap()
            .allocate(&budget(start, end, 100_000), AllocationMethod::Proportional)
            .unwrap();

        let years: Vec<i32> = allocations.iter().map(|a| a.year).collect();
        let expected: Vec<i32> = (calendar.year_of(start)..=calendar.year_of(end)).collect();
        prop_assert_eq!(years, expected);
    }

    /// Period-start allocation always yields one allocation in the start year.
    #[test]
    fn test_period_start_single_allocation(
        calendar in calendar_strategy(),
        offset in 0i64..3650,
        length in 0i64..2000,
        cents in 1i64..10_000_000_000,
    ) {
        let start = base_date() + Duration::days(offset);
        let record = budget(start, start + Duration::days(length), cents);

        let allocations = PeriodAllocator::new(calendar, 2)
            .unwrap()
            .allocate(&record, AllocationMethod::PeriodStart)
            .unwrap();

        prop_assert_eq!(allocations.len(), 1);
        prop_assert_eq!(allocations[0].year, calendar.year_of(start));
        prop_assert_eq!(allocations[0].amount, Decimal::new(cents, 2));
    }

    /// Weighted splits never lose or gain a minor unit.
    #[test]
    fn test_split_by_weights_sum(
        cents in -10_000_000_000i64..10_000_000_000,
        weights in prop::collection::vec(0i64..400, 1..12),
    ) {
        let total = Decimal::new(cents, 2);
        let shares = SplitUtil::split_by_weights(total, &weights, 2);

        prop_assert_eq!(shares.len(), weights.len());
        prop_assert_eq!(shares.iter().copied().sum::<Decimal>(), total);
    }
}
