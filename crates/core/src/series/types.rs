//! Series point and year range types.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{SeriesError, SeriesResult};
use crate::records::Category;

/// One year of the output series.
///
/// `None` marks a snapshot category with nothing declared for the year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Year label.
    pub year: i32,
    /// Display label ("2023" or "FY2023/24").
    pub display_label: String,
    /// Running total per category.
    pub cumulative: BTreeMap<Category, Option<Decimal>>,
    /// Year-over-year change per category.
    pub periodic: BTreeMap<Category, Option<Decimal>>,
}

impl SeriesPoint {
    /// Creates a point without periodic values.
    #[must_use]
    pub fn new(
        year: i32,
        display_label: String,
        cumulative: BTreeMap<Category, Option<Decimal>>,
    ) -> Self {
        Self {
            year,
            display_label,
            cumulative,
            periodic: BTreeMap::new(),
        }
    }

    /// Cumulative value of a category.
    #[must_use]
    pub fn cumulative_of(&self, category: &Category) -> Option<Decimal> {
        self.cumulative.get(category).copied().flatten()
    }

    /// Periodic value of a category.
    #[must_use]
    pub fn periodic_of(&self, category: &Category) -> Option<Decimal> {
        self.periodic.get(category).copied().flatten()
    }
}

/// Inclusive range of year labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearRange {
    start: i32,
    end: i32,
}

impl YearRange {
    /// Creates a range.
    ///
    /// # Errors
    ///
    /// Returns `SeriesError::InvalidYearRange` if `start > end`.
    pub fn new(start: i32, end: i32) -> SeriesResult<Self> {
        if start > end {
            return Err(SeriesError::InvalidYearRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// First year.
    #[must_use]
    pub const fn start(&self) -> i32 {
        self.start
    }

    /// Last year.
    #[must_use]
    pub const fn end(&self) -> i32 {
        self.end
    }

    /// Years in ascending order.
    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.start..=self.end
    }

    /// Number of years.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::try_from(i64::from(self.end) - i64::from(self.start) + 1).unwrap_or(0)
    }

    /// Always false; a range holds at least one year.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Returns true if `year` is within the range.
    #[must_use]
    pub const fn contains(&self, year: i32) -> bool {
        year >= self.start && year <= self.end
    }
}
