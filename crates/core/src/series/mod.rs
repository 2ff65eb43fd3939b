//! Cumulative and periodic year series.
//!
//! - [`CumulativeSeriesBuilder`] turns year buckets into running totals
//! - [`derive_periodic`] derives year-over-year changes from running totals
//! - [`GapFiller`] densifies the result over a contiguous year range

pub mod builder;
pub mod gap_fill;
pub mod types;


pub use builder::{CumulativeSeriesBuilder, derive_periodic};
pub use gap_fill::GapFiller;
pub use types::{SeriesPoint, YearRange};
