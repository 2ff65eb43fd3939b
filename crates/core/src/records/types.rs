//! Raw collaborator records and their normalized form.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use aidflow_shared::types::{Currency, RecordId};

use super::category::Category;
use super::issue::{DateProblem, RecordClass, RecordIssue};
use crate::error::SeriesResult;

/// Transaction as returned by the query layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Record id.
    #[serde(default)]
    pub id: Option<RecordId>,
    /// Value date (`YYYY-MM-DD` or timestamp).
    #[serde(default, alias = "date")]
    pub transaction_date: Option<String>,
    /// Transaction type code.
    #[serde(alias = "type_code")]
    pub transaction_type: String,
    /// Flow type code or name.
    #[serde(default)]
    pub flow_type: Option<String>,
    /// Amount in `currency`.
    pub amount: Decimal,
    /// Precomputed USD amount.
    #[serde(default)]
    pub amount_usd: Option<Decimal>,
    /// ISO currency code of `amount`.
    #[serde(default)]
    pub currency: Option<String>,
}

/// Planned disbursement as returned by the query layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlannedDisbursementRecord {
    /// Record id.
    #[serde(default)]
    pub id: Option<RecordId>,
    /// Period start.
    #[serde(default)]
    pub period_start: Option<String>,
    /// Period end (inclusive).
    #[serde(default)]
    pub period_end: Option<String>,
    /// Amount in `currency`.
    pub amount: Decimal,
    /// Precomputed USD amount.
    #[serde(default)]
    pub usd_amount: Option<Decimal>,
    /// ISO currency code of `amount`.
    #[serde(default)]
    pub currency: Option<String>,
}

/// Budget as returned by the query layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BudgetRecord {
    /// Record id.
    #[serde(default)]
    pub id: Option<RecordId>,
    /// Period start.
    #[serde(default)]
    pub period_start: Option<String>,
    /// Period end (inclusive).
    #[serde(default)]
    pub period_end: Option<String>,
    /// Budget value in `currency`.
    pub value: Decimal,
    /// Precomputed USD value.
    #[serde(default)]
    pub usd_value: Option<Decimal>,
    /// ISO currency code of `value`.
    #[serde(default)]
    pub currency: Option<String>,
}

/// Raw records fetched once and reused across recomputations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordSet {
    /// Transactions.
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
    /// Planned disbursements.
    #[serde(default)]
    pub planned_disbursements: Vec<PlannedDisbursementRecord>,
    /// Budgets.
    #[serde(default)]
    pub budgets: Vec<BudgetRecord>,
}

impl RecordSet {
    /// Decodes a record set from the query layer's JSON payload.
    ///
    /// # Errors
    ///
    /// Returns `SeriesError::Decode` if the payload does not match the record shapes.
    pub fn from_json(payload: &str) -> SeriesResult<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Total number of records across all classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transactions.len() + self.planned_disbursements.len() + self.budgets.len()
    }

    /// Returns true if there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Content hash used as a cache key.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

/// Normalized view of any record class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialRecord {
    /// Record id.
    pub id: Option<RecordId>,
    /// Source record class.
    pub class: RecordClass,
    /// Amount in `currency`.
    pub amount: Decimal,
    /// Precomputed USD amount.
    pub amount_usd: Option<Decimal>,
    /// Currency of `amount`; `None` when unknown.
    pub currency: Option<Currency>,
    /// Series category.
    pub category: Category,
    /// Period start, or the single date of a point record.
    pub period_start: Option<NaiveDate>,
    /// Period end (inclusive).
    pub period_end: Option<NaiveDate>,
}

/// Dates a record applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSpan {
    /// A single date.
    Point(NaiveDate),
    /// An inclusive date range with `end > start`.
    Period {
        /// First day.
        start: NaiveDate,
        /// Last day (inclusive).
        end: NaiveDate,
    },
}

impl FinancialRecord {
    /// Classifies the record's dates.
    ///
    /// # Errors
    ///
    /// Returns `RecordIssue::UnparsableDate` when the start is missing or the range
    /// is reversed.
    pub fn span(&self) -> Result<RecordSpan, RecordIssue> {
        let start = self
            .period_start
            .ok_or(RecordIssue::date(DateProblem::Missing))?;

        match self.period_end {
            Some(end) if end > start => Ok(RecordSpan::Period { start, end }),
            Some(end) if end < start => Err(RecordIssue::date(DateProblem::MalformedRange)),
            _ => Ok(RecordSpan::Point(start)),
        }
    }

    /// Returns true if the record spans more than one day.
    #[must_use]
    pub fn is_period_bound(&self) -> bool {
        matches!(self.span(), Ok(RecordSpan::Period { .. }))
    }
}
