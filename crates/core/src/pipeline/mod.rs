//! End-to-end series computation.
//!
//! A [`SeriesEngine`] is a pure function of the record set and [`SeriesParams`].
//! [`SeriesCache`] memoizes it per parameter combination and [`LatestSeries`]
//! keeps only the output of the most recent request.

pub mod cache;
pub mod diagnostics;
pub mod engine;
pub mod latest;
pub mod params;


pub use cache::{CachedSeries, SeriesCache};
pub use diagnostics::Diagnostics;
pub use engine::{SeriesEngine, SeriesOutput};
pub use latest::{LatestSeries, Ticket};
pub use params::SeriesParams;
