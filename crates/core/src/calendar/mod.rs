//! Calendar and fiscal-year resolution.
//!
//! Maps integer year labels to concrete date intervals and dates back to labels.

pub mod definition;
pub mod registry;

pub use definition::{CalendarDef, CalendarYear};
pub use registry::{CalendarRegistry, CustomCalendar};
