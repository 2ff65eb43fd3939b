//! Core computation for Aidflow.
//!
//! This crate turns irregular, period-bound financial records of aid activities
//! into a gap-free per-year series of cumulative and periodic totals. It has ZERO
//! web or database dependencies: records arrive already fetched.
//!
//! # Modules
//!
//! - `calendar` - Calendar and fiscal-year resolution
//! - `records` - Raw records, normalization, and categories
//! - `allocation` - Splitting record amounts across years
//! - `aggregation` - Year-by-category buckets
//! - `series` - Cumulative series building and gap filling
//! - `pipeline` - End-to-end runs, caching, and latest-result tracking
//! - `format` - Amount formatting for display

pub mod aggregation;
pub mod allocation;
pub mod calendar;
pub mod error;
pub mod format;
pub mod pipeline;
pub mod records;
pub mod series;

pub use error::{SeriesError, SeriesResult};
pub use pipeline::{SeriesCache, SeriesEngine, SeriesOutput, SeriesParams};
