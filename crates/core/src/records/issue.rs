//! Per-record problems that drop a record's contribution without failing the run.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use aidflow_shared::types::RecordId;

/// Source record class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordClass {
    /// Actual financial transaction.
    Transaction,
    /// Planned disbursement.
    PlannedDisbursement,
    /// Budget.
    Budget,
}

/// Why a record's date could not be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateProblem {
    /// No date was supplied.
    Missing,
    /// A date was supplied but could not be parsed.
    Unparsable,
    /// The period ends before it starts.
    MalformedRange,
}

impl std::fmt::Display for DateProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => f.write_str("missing"),
            Self::Unparsable => f.write_str("unparsable"),
            Self::MalformedRange => f.write_str("period ends before it starts"),
        }
    }
}

/// A recoverable per-record problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordIssue {
    /// The record's date is unusable; it contributes nothing.
    #[error("Unusable date: {problem}")]
    UnparsableDate {
        /// What was wrong with the date.
        problem: DateProblem,
    },

    /// The record resolves to a zero or missing amount; it contributes nothing.
    #[error("Record resolves to a zero amount")]
    ZeroValue,

    /// Adding the record would push the run's totals past the decimal range.
    #[error("Record amount exceeds the supported range")]
    AmountOverflow,
}

impl RecordIssue {
    /// Shorthand for an unusable date.
    #[must_use]
    pub const fn date(problem: DateProblem) -> Self {
        Self::UnparsableDate { problem }
    }
}

/// Where an issue was found.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueEntry {
    /// Record class.
    pub class: RecordClass,
    /// Position within its class in the record set.
    pub index: usize,
    /// Record id, if the collaborator supplied one.
    pub id: Option<RecordId>,
    /// The problem.
    pub issue: RecordIssue,
}
