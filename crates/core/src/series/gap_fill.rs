//! Densification of a computed series over a contiguous year range.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;

use super::builder::derive_periodic;
use super::types::{SeriesPoint, YearRange};
use crate::calendar::CalendarDef;
use crate::records::{Category, CategoryRoles};

/// Fills missing years of a computed series.
pub struct GapFiller;

impl GapFiller {
    /// Emits exactly one point per year of `range`.
    ///
    /// Without a range the span of `series` is used; an empty series without a range
    /// yields no points. Computed points before the range are folded into the first
    /// emitted point and points after it are dropped. Carry-forward categories repeat
    /// the latest known cumulative (zero before any data); snapshot categories are
    /// `None` in years without a computed value. Periodic values are re-derived for
    /// the emitted sequence.
    #[must_use]
    pub fn fill(
        series: &[SeriesPoint],
        range: Option<YearRange>,
        roles: &CategoryRoles,
        calendar: CalendarDef,
    ) -> Vec<SeriesPoint> {
        let Some(range) = range.or_else(|| span_of(series)) else {
            return Vec::new();
        };

        let observed: BTreeSet<&Category> = series.iter().flat_map(|p| p.cumulative.keys()).collect();
        let columns = roles.columns(observed);

        let mut computed = series.iter().peekable();
        let mut latest: Option<&SeriesPoint> = None;

        let mut points: Vec<SeriesPoint> = range
            .years()
            .map(|year| {
                while let Some(point) = computed.next_if(|p| p.year <= year) {
                    latest = Some(point);
                }
                let exact = latest.filter(|p| p.year == year);

                let cumulative: BTreeMap<Category, Option<Decimal>> = columns
                    .iter()
                    .map(|category| {
                        let value = if roles.is_snapshot(category) {
                            exact.and_then(|p| p.cumulative_of(category))
                        } else {
                            Some(
                                latest
                                    .and_then(|p| p.cumulative_of(category))
                                    .unwrap_or(Decimal::ZERO),
                            )
                        };
                        (category.clone(), value)
                    })
                    .collect();

                SeriesPoint::new(year, calendar.display_label(year), cumulative)
            })
            .collect();

        derive_periodic(&mut points);
        points
    }
}

fn span_of(series: &[SeriesPoint]) -> Option<YearRange> {
    let first = series.first()?.year;
    let last = series.last()?.year;
    YearRange::new(first, last).ok()
}
