//! Common types used across the application.

pub mod id;
pub mod method;
pub mod money;

pub use id::*;
pub use method::{AllocationMethod, CategoryDimension, ScaleUnit};
pub use money::{Currency, Money};
