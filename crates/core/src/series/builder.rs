//! Cumulative series construction from year buckets.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::types::SeriesPoint;
use crate::aggregation::{YearBuckets, bounded_add};
use crate::calendar::CalendarDef;
use crate::records::{Category, CategoryRoles};

/// Builds running totals over the years that have data.
pub struct CumulativeSeriesBuilder;

impl CumulativeSeriesBuilder {
    /// Builds one point per data year, ascending, with periodic values derived.
    ///
    /// Carry-forward categories add zero in years without a bucket. Snapshot
    /// categories emit `None` there and keep their hidden running total unchanged.
    #[must_use]
    pub fn build(
        buckets: &YearBuckets,
        roles: &CategoryRoles,
        calendar: CalendarDef,
    ) -> Vec<SeriesPoint> {
        let columns = roles.columns(&buckets.categories());
        let mut running: BTreeMap<&Category, Decimal> =
            columns.iter().map(|c| (c, Decimal::ZERO)).collect();

        let mut points: Vec<SeriesPoint> = buckets
            .years()
            .into_iter()
            .map(|year| {
                let cumulative = columns
                    .iter()
                    .map(|category| {
                        let bucket = buckets.get(year, category);
                        let total = running.entry(category).or_insert(Decimal::ZERO);
                        let value = match bucket {
                            Some(amount) => {
                                *total = bounded_add(*total, amount);
                                Some(*total)
                            }
                            None if roles.is_snapshot(category) => None,
                            None => Some(*total),
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

/// Recomputes every periodic value from the cumulative values of `points`.
///
/// `periodic[i] = cumulative[i] - previous`, where `previous` is the latest non-null
/// cumulative before `i` (zero when there is none). A null cumulative has a null
/// periodic.
pub fn derive_periodic(points: &mut [SeriesPoint]) {
    let mut previous: BTreeMap<Category, Decimal> = BTreeMap::new();

    for point in points.iter_mut() {
        point.periodic = point
            .cumulative
            .iter()
            .map(|(category, cumulative)| {
                let periodic = cumulative.map(|value| {
                    let last = previous
                        .insert(category.clone(), value)
                        .unwrap_or(Decimal::ZERO);
                    bounded_add(value, -last)
                });
                (category.clone(), periodic)
            })
            .collect();
    }
}
