//! Year definitions and their resolved date intervals.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use aidflow_shared::config::EngineConfig;

use crate::error::{SeriesError, SeriesResult};

/// A logical "year" definition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalendarDef {
    /// January 1 to December 31.
    #[default]
    Calendar,
    /// Twelve months starting on the first day of `start_month`.
    Fiscal {
        /// First month of the fiscal year (1-12).
        start_month: u32,
    },
}

/// A year label with its resolved half-open `[start, end)` interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarYear {
    /// Year label.
    pub year: i32,
    /// First day of the year (inclusive).
    pub start: NaiveDate,
    /// First day of the following year (exclusive).
    pub end: NaiveDate,
}

impl CalendarDef {
    /// Creates a validated fiscal-year definition.
    ///
    /// # Errors
    ///
    /// Returns `SeriesError::InvalidConfiguration` if `start_month` is outside 1-12.
    pub fn fiscal(start_month: u32) -> SeriesResult<Self> {
        let def = Self::Fiscal { start_month };
        def.validate()?;
        Ok(def)
    }

    /// Builds the default definition from engine configuration.
    ///
    /// # Errors
    ///
    /// Returns `SeriesError::InvalidConfiguration` for a bad fiscal start month.
    pub fn from_config(config: &EngineConfig) -> SeriesResult<Self> {
        config
            .fiscal_start_month
            .map_or(Ok(Self::Calendar), Self::fiscal)
    }

    /// Checks the start month.
    ///
    /// # Errors
    ///
    /// Returns `SeriesError::InvalidConfiguration` if `start_month` is outside 1-12.
    pub fn validate(&self) -> SeriesResult<()> {
        match self {
            Self::Calendar => Ok(()),
            Self::Fiscal { start_month } if (1..=12).contains(start_month) => Ok(()),
            Self::Fiscal { start_month } => Err(SeriesError::InvalidConfiguration(format!(
                "fiscal year start month must be between 1 and 12, got {start_month}"
            ))),
        }
    }

    /// First month of every year under this definition.
    #[must_use]
    pub const fn start_month(&self) -> u32 {
        match self {
            Self::Calendar => 1,
            Self::Fiscal { start_month } => *start_month,
        }
    }

    /// Resolves a year label to its date interval.
    ///
    /// # Errors
    ///
    /// Returns `SeriesError::InvalidConfiguration` for an invalid start month or a
    /// year outside the supported date range.
    pub fn resolve(&self, year: i32) -> SeriesResult<CalendarYear> {
        self.validate()?;
        let month = self.start_month();
        let start = first_of_month(year, month)?;
        let next = year.checked_add(1).ok_or_else(|| {
            SeriesError::InvalidConfiguration(format!("no year follows {year}"))
        })?;
        let end = first_of_month(next, month)?;
        Ok(CalendarYear { year, start, end })
    }

    /// Returns the year label a date belongs to.
    ///
    /// For fiscal years starting after January, dates before the start month belong
    /// to the previous label.
    #[must_use]
    pub fn year_of(&self, date: NaiveDate) -> i32 {
        if date.month() >= self.start_month() {
            date.year()
        } else {
            date.year() - 1
        }
    }

    /// Human-readable label of a year ("2023" or "FY2023/24").
    #[must_use]
    pub fn display_label(&self, year: i32) -> String {
        if self.start_month() == 1 {
            year.to_string()
        } else {
            format!("FY{year}/{:02}", (year.rem_euclid(100) + 1) % 100)
        }
    }
}

fn first_of_month(year: i32, month: u32) -> SeriesResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        SeriesError::InvalidConfiguration(format!("no date for year {year}, month {month}"))
    })
}

impl CalendarYear {
    /// Number of days in the year.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Returns true if the date falls within this year.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    /// Whole days shared with the half-open interval `[start, end)`.
    #[must_use]
    pub fn overlap_days(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        let from = self.start.max(start);
        let to = self.end.min(end);
        (to - from).num_days().max(0)
    }
}
