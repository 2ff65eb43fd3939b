//! The series pipeline: normalize, allocate, aggregate, build, fill.

use std::borrow::Cow;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use aidflow_shared::config::CategoryConfig;
use aidflow_shared::types::AllocationMethod;

use super::diagnostics::Diagnostics;
use super::params::SeriesParams;
use crate::aggregation::{BucketAggregator, CategorizedAllocation};
use crate::allocation::PeriodAllocator;
use crate::calendar::CalendarDef;
use crate::error::SeriesResult;
use crate::records::{Category, CategoryMap, IssueEntry, Normalizer, RecordIssue, RecordSet};
use crate::series::{CumulativeSeriesBuilder, GapFiller, SeriesPoint};

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesOutput {
    /// Year definition the points are labelled under.
    pub calendar: CalendarDef,
    /// Allocation method used.
    pub method: AllocationMethod,
    /// Column order of the categories.
    pub categories: Vec<Category>,
    /// Contiguous ascending points.
    pub points: Vec<SeriesPoint>,
    /// Records that were skipped and why.
    pub diagnostics: Diagnostics,
}

impl SeriesOutput {
    /// Cumulative value of each category at the last point, in column order.
    #[must_use]
    pub fn totals(&self) -> Vec<(Category, Option<Decimal>)> {
        let last = self.points.last();
        self.categories
            .iter()
            .map(|category| {
                (
                    category.clone(),
                    last.and_then(|point| point.cumulative_of(category)),
                )
            })
            .collect()
    }

    /// Returns true if there are no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Runs the pipeline over immutable record sets.
#[derive(Debug, Clone, Default)]
pub struct SeriesEngine {
    categories: CategoryMap,
}

impl SeriesEngine {
    /// Creates an engine using `categories` for transaction labels.
    #[must_use]
    pub const fn new(categories: CategoryMap) -> Self {
        Self { categories }
    }

    /// Creates an engine from category configuration.
    #[must_use]
    pub fn from_config(config: &CategoryConfig) -> Self {
        Self::new(CategoryMap::from_config(config))
    }

    /// Category map in use.
    #[must_use]
    pub const fn categories(&self) -> &CategoryMap {
        &self.categories
    }

    /// Computes the series for `records` under `params`.
    ///
    /// Per-record problems are collected in the output's diagnostics and never
    /// fail the run. A record that would push the absolute sum of all allocated
    /// amounts past `Decimal::MAX` is skipped as `RecordIssue::AmountOverflow`.
    /// The result depends only on the inputs.
    ///
    /// # Errors
    ///
    /// Returns `SeriesError::InvalidConfiguration` for a malformed calendar or
    /// precision.
    pub fn run(&self, records: &RecordSet, params: &SeriesParams) -> SeriesResult<SeriesOutput> {
        params.validate()?;
        let allocator = PeriodAllocator::try_from(params)?;

        let categories = if self.categories.dimension() == params.dimension {
            Cow::Borrowed(&self.categories)
        } else {
            Cow::Owned(self.categories.clone().with_dimension(params.dimension))
        };

        let mut diagnostics = Diagnostics::new(records.len());
        let normalized = Normalizer::new(&categories).normalize_all(records);
        for entry in normalized.issues {
            diagnostics.record(entry);
        }

        // Sum of absolute allocated amounts; bounds every bucket, running total,
        // and periodic difference.
        let mut magnitude = Decimal::ZERO;
        let mut allocations = Vec::with_capacity(normalized.records.len());
        for (origin, record) in &normalized.records {
            let allocated = allocator.allocate(record, params.method).and_then(|years| {
                magnitude = years
                    .iter()
                    .try_fold(magnitude, |sum, year| sum.checked_add(year.amount.abs()))
                    .ok_or(RecordIssue::AmountOverflow)?;
                Ok(years)
            });
            match allocated {
                Ok(years) => {
                    diagnostics.records_allocated += 1;
                    allocations.extend(years.into_iter().map(|allocation| CategorizedAllocation {
                        category: record.category.clone(),
                        allocation,
                    }));
                }
                Err(issue) => {
                    tracing::trace!(class = ?origin.class, index = origin.index, %issue, "Record skipped");
                    diagnostics.record(IssueEntry {
                        class: origin.class,
                        index: origin.index,
                        id: record.id,
                        issue,
                    });
                }
            }
        }
        diagnostics.sort();

        let buckets = BucketAggregator::aggregate(&allocations);
        let series = CumulativeSeriesBuilder::build(&buckets, &params.roles, params.calendar);
        let points = GapFiller::fill(&series, params.range, &params.roles, params.calendar);
        let columns = params.roles.columns(&buckets.categories());

        tracing::debug!(
            records_seen = diagnostics.records_seen,
            records_allocated = diagnostics.records_allocated,
            skipped = diagnostics.skipped(),
            buckets = buckets.len(),
            points = points.len(),
            method = %params.method,
            "Series computed"
        );
        if diagnostics.mostly_skipped() {
            tracing::warn!(
                records_seen = diagnostics.records_seen,
                unparsable_dates = diagnostics.unparsable_dates,
                zero_values = diagnostics.zero_values,
                amount_overflows = diagnostics.amount_overflows,
                "More than half of the records were skipped"
            );
        }

        Ok(SeriesOutput {
            calendar: params.calendar,
            method: params.method,
            categories: columns,
            points,
            diagnostics,
        })
    }
}
