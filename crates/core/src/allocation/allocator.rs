//! Period allocator: one record to per-year amounts.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use aidflow_shared::types::AllocationMethod;

use super::amount::select_amount;
use super::split::SplitUtil;
use crate::calendar::CalendarDef;
use crate::error::{SeriesError, SeriesResult};
use crate::records::{DateProblem, FinancialRecord, RecordIssue, RecordSpan};

/// Amount landing in one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearAllocation {
    /// Year label.
    pub year: i32,
    /// Allocated amount (USD, rounded to the minor unit).
    pub amount: Decimal,
}

/// Splits record amounts across calendar-resolved years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodAllocator {
    calendar: CalendarDef,
    decimal_places: u32,
}

impl PeriodAllocator {
    /// Creates an allocator.
    ///
    /// # Errors
    ///
    /// Returns `SeriesError::InvalidConfiguration` for a malformed calendar.
    pub fn new(calendar: CalendarDef, decimal_places: u32) -> SeriesResult<Self> {
        calendar.validate()?;
        Ok(Self {
            calendar,
            decimal_places,
        })
    }

    /// Calendar years are resolved under.
    #[must_use]
    pub const fn calendar(&self) -> CalendarDef {
        self.calendar
    }

    /// Allocates one record with `method`.
    ///
    /// Date problems take precedence over a zero amount when both apply.
    ///
    /// # Errors
    ///
    /// Returns `RecordIssue::UnparsableDate` for a missing start or reversed range
    /// and `RecordIssue::ZeroValue` when the selected amount is zero or missing.
    /// Amounts are rounded only once, per emitted year.
    pub fn allocate(
        &self,
        record: &FinancialRecord,
        method: AllocationMethod,
    ) -> Result<Vec<YearAllocation>, RecordIssue> {
        let span = record.span()?;
        let total = select_amount(record)
            .map(|money| money.amount)
            .ok_or(RecordIssue::ZeroValue)?;

        match (method, span) {
            (AllocationMethod::Proportional, RecordSpan::Period { start, end }) => {
                self.split_period(total, start, end)
            }
            (_, RecordSpan::Point(start) | RecordSpan::Period { start, .. }) => {
                Ok(vec![YearAllocation {
                    year: self.calendar.year_of(start),
                    amount: SplitUtil::round(total, self.decimal_places),
                }])
            }
        }
    }

    /// Proportional split of `[start, end]` (end inclusive) by whole-day overlap.
    fn split_period(
        &self,
        total: Decimal,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<YearAllocation>, RecordIssue> {
        let unusable = RecordIssue::date(DateProblem::Unparsable);
        let end_exclusive = end.succ_opt().ok_or(unusable)?;

        let mut years = Vec::new();
        let mut weights = Vec::new();
        for year in self.calendar.year_of(start)..=self.calendar.year_of(end) {
            let resolved = self.calendar.resolve(year).map_err(|_| unusable)?;
            let overlap = resolved.overlap_days(start, end_exclusive);
            if overlap > 0 {
                years.push(year);
                weights.push(overlap);
            }
        }

        let amounts = SplitUtil::split_by_weights(total, &weights, self.decimal_places);
        Ok(years
            .into_iter()
            .zip(amounts)
            .map(|(year, amount)| YearAllocation { year, amount })
            .collect())
    }
}

impl TryFrom<&crate::pipeline::SeriesParams> for PeriodAllocator {
    type Error = SeriesError;

    fn try_from(params: &crate::pipeline::SeriesParams) -> SeriesResult<Self> {
        Self::new(params.calendar, params.decimal_places)
    }
}
