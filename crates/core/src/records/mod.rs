//! Financial records consumed from the query layer.
//!
//! This module covers:
//! - Raw record shapes of transactions, planned disbursements, and budgets
//! - Normalization into a single [`FinancialRecord`] view
//! - Category label sets and carry-forward/snapshot roles
//! - Per-record issues that drop a contribution without failing a run

pub mod category;
pub mod issue;
pub mod normalize;
pub mod types;

pub use category::{Category, CategoryMap, CategoryRoles, flow_type_label};
pub use issue::{DateProblem, IssueEntry, RecordClass, RecordIssue};
pub use normalize::{Normalized, Normalizer, RecordOrigin, parse_date};
pub use types::{
    BudgetRecord, FinancialRecord, PlannedDisbursementRecord, RecordSet, RecordSpan,
    TransactionRecord,
};
