//! Per-run counts of skipped records.

use serde::{Deserialize, Serialize};

use crate::records::{DateProblem, IssueEntry, RecordIssue};

/// Diagnostics returned with every output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Records in the input set.
    pub records_seen: usize,
    /// Records that contributed at least one allocation.
    pub records_allocated: usize,
    /// Records dropped for an unusable date, malformed ranges included.
    pub unparsable_dates: usize,
    /// Records dropped because their period ends before it starts.
    pub malformed_ranges: usize,
    /// Records that resolved to a zero amount.
    pub zero_values: usize,
    /// Records whose amount would overflow the run's totals.
    #[serde(default)]
    pub amount_overflows: usize,
    /// Every dropped record, ordered by class then position.
    pub issues: Vec<IssueEntry>,
}

impl Diagnostics {
    /// Creates diagnostics for a run over `records_seen` records.
    #[must_use]
    pub fn new(records_seen: usize) -> Self {
        Self {
            records_seen,
            ..Self::default()
        }
    }

    /// Counts one dropped record.
    pub fn record(&mut self, entry: IssueEntry) {
        match entry.issue {
            RecordIssue::UnparsableDate { problem } => {
                self.unparsable_dates += 1;
                if problem == DateProblem::MalformedRange {
                    self.malformed_ranges += 1;
                }
            }
            RecordIssue::ZeroValue => self.zero_values += 1,
            RecordIssue::AmountOverflow => self.amount_overflows += 1,
        }
        self.issues.push(entry);
    }

    /// Number of records that contributed nothing.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.issues.len()
    }

    /// Returns true if more than half of the records were skipped.
    #[must_use]
    pub fn mostly_skipped(&self) -> bool {
        self.skipped() * 2 > self.records_seen
    }

    pub(crate) fn sort(&mut self) {
        self.issues.sort_by_key(|entry| (entry.class, entry.index));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::RecordClass;

    fn entry(index: usize, issue: RecordIssue) -> IssueEntry {
        IssueEntry {
            class: RecordClass::Budget,
            index,
            id: None,
            issue,
        }
    }

    #[test]
    fn test_counts() {
        let mut diagnostics = Diagnostics::new(5);
        diagnostics.record(entry(0, RecordIssue::date(DateProblem::Missing)));
        diagnostics.record(entry(1, RecordIssue::date(DateProblem::MalformedRange)));
        diagnostics.record(entry(2, RecordIssue::ZeroValue));
        diagnostics.record(entry(3, RecordIssue::AmountOverflow));

        assert_eq!(diagnostics.unparsable_dates, 2);
        assert_eq!(diagnostics.malformed_ranges, 1);
        assert_eq!(diagnostics.zero_values, 1);
        assert_eq!(diagnostics.amount_overflows, 1);
        assert_eq!(diagnostics.skipped(), 4);
        assert!(diagnostics.mostly_skipped());
    }

    #[test]
    fn test_empty_run_is_not_mostly_skipped() {
        assert!(!Diagnostics::new(0).mostly_skipped());
    }
}
