//! Period allocation of record amounts to year labels.
//!
//! Supports:
//! - Period-start allocation (whole amount to the start year)
//! - Proportional allocation by whole-day overlap, end date inclusive
//! - Exact rounding with the residual placed in the last year

pub mod allocator;
pub mod amount;
pub mod split;

#[cfg(test)]
mod tests;

pub use aidflow_shared::types::AllocationMethod;
pub use allocator::{PeriodAllocator, YearAllocation};
pub use amount::select_amount;
pub use split::SplitUtil;
