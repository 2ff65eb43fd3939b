//! Conversion of raw collaborator records into [`FinancialRecord`]s.

use chrono::{DateTime, NaiveDate};

use aidflow_shared::types::{Currency, RecordId};

use super::category::{Category, CategoryMap};
use super::issue::{DateProblem, IssueEntry, RecordClass, RecordIssue};
use super::types::{
    BudgetRecord, FinancialRecord, PlannedDisbursementRecord, RecordSet, TransactionRecord,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a collaborator date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps, and `YYYY-MM-DD` followed by a `T` or
/// space separated time. Blank input is treated as absent.
///
/// # Errors
///
/// Returns `RecordIssue::UnparsableDate` for anything else.
pub fn parse_date(raw: Option<&str>) -> Result<Option<NaiveDate>, RecordIssue> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };

    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Ok(Some(date));
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(timestamp.date_naive()));
    }

    let date_part = raw
        .split_once(['T', ' '])
        .map(|(date, _)| date)
        .ok_or(RecordIssue::date(DateProblem::Unparsable))?;
    NaiveDate::parse_from_str(date_part, DATE_FORMAT)
        .map(Some)
        .map_err(|_| RecordIssue::date(DateProblem::Unparsable))
}

/// Normalized records plus the issues found while normalizing.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    /// Records with usable dates, with their origin.
    pub records: Vec<(RecordOrigin, FinancialRecord)>,
    /// Records dropped during normalization.
    pub issues: Vec<IssueEntry>,
}

/// Position of a record in its [`RecordSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordOrigin {
    /// Record class.
    pub class: RecordClass,
    /// Position within the class.
    pub index: usize,
}

/// Turns raw records into categorized [`FinancialRecord`]s.
pub struct Normalizer<'a> {
    categories: &'a CategoryMap,
}

impl<'a> Normalizer<'a> {
    /// Creates a normalizer using `categories` for transaction labels.
    #[must_use]
    pub const fn new(categories: &'a CategoryMap) -> Self {
        Self { categories }
    }

    /// Normalizes a transaction; its date becomes a point `period_start`.
    ///
    /// # Errors
    ///
    /// Returns `RecordIssue::UnparsableDate` for a missing or unparsable date.
    pub fn transaction(&self, record: &TransactionRecord) -> Result<FinancialRecord, RecordIssue> {
        let date = parse_date(record.transaction_date.as_deref())?
            .ok_or(RecordIssue::date(DateProblem::Missing))?;

        Ok(FinancialRecord {
            id: record.id,
            class: RecordClass::Transaction,
            amount: record.amount,
            amount_usd: record.amount_usd,
            currency: parse_currency(record.currency.as_deref()),
            category: self
                .categories
                .transaction_category(&record.transaction_type, record.flow_type.as_deref()),
            period_start: Some(date),
            period_end: None,
        })
    }

    /// Normalizes a planned disbursement.
    ///
    /// # Errors
    ///
    /// Returns `RecordIssue::UnparsableDate` if either period bound is unparsable.
    pub fn planned_disbursement(
        &self,
        record: &PlannedDisbursementRecord,
    ) -> Result<FinancialRecord, RecordIssue> {
        Ok(FinancialRecord {
            id: record.id,
            class: RecordClass::PlannedDisbursement,
            amount: record.amount,
            amount_usd: record.usd_amount,
            currency: parse_currency(record.currency.as_deref()),
            category: Category::planned_disbursements(),
            period_start: parse_date(record.period_start.as_deref())?,
            period_end: parse_date(record.period_end.as_deref())?,
        })
    }

    /// Normalizes a budget.
    ///
    /// # Errors
    ///
    /// Returns `RecordIssue::UnparsableDate` if either period bound is unparsable.
    pub fn budget(&self, record: &BudgetRecord) -> Result<FinancialRecord, RecordIssue> {
        Ok(FinancialRecord {
            id: record.id,
            class: RecordClass::Budget,
            amount: record.value,
            amount_usd: record.usd_value,
            currency: parse_currency(record.currency.as_deref()),
            category: Category::budgets(),
            period_start: parse_date(record.period_start.as_deref())?,
            period_end: parse_date(record.period_end.as_deref())?,
        })
    }

    /// Normalizes every record of the set, collecting issues instead of failing.
    #[must_use]
    pub fn normalize_all(&self, set: &RecordSet) -> Normalized {
        let mut out = Normalized::default();

        let transactions = set
            .transactions
            .iter()
            .map(|r| (r.id, self.transaction(r)));
        collect(&mut out, RecordClass::Transaction, transactions);

        let planned = set
            .planned_disbursements
            .iter()
            .map(|r| (r.id, self.planned_disbursement(r)));
        collect(&mut out, RecordClass::PlannedDisbursement, planned);

        let budgets = set.budgets.iter().map(|r| (r.id, self.budget(r)));
        collect(&mut out, RecordClass::Budget, budgets);

        out
    }
}

fn collect<I>(out: &mut Normalized, class: RecordClass, results: I)
where
    I: Iterator<Item = (Option<RecordId>, Result<FinancialRecord, RecordIssue>)>,
{
    for (index, (id, result)) in results.enumerate() {
        match result {
            Ok(record) => out.records.push((RecordOrigin { class, index }, record)),
            Err(issue) => {
                tracing::trace!(?class, index, %issue, "Record dropped during normalization");
                out.issues.push(IssueEntry {
                    class,
                    index,
                    id,
                    issue,
                });
            }
        }
    }
}

fn parse_currency(raw: Option<&str>) -> Option<Currency> {
    raw.and_then(|code| code.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(Some("2023-06-15"), Some(date(2023, 6, 15)))]
    #[case(Some(" 2023-06-15 "), Some(date(2023, 6, 15)))]
    #[case(Some("2023-06-15T10:30:00"), Some(date(2023, 6, 15)))]
    #[case(Some("2023-06-15T23:30:00+02:00"), Some(date(2023, 6, 15)))]
    #[case(Some("2023-06-15 00:00:00"), Some(date(2023, 6, 15)))]
    #[case(Some(""), None)]
    #[case(None, None)]
    fn test_parse_date_accepts(#[case] raw: Option<&str>, #[case] expected: Option<NaiveDate>) {
        assert_eq!(parse_date(raw), Ok(expected));
    }

    #[rstest]
    #[case("15/06/2023")]
    #[case("2023-13-01")]
    #[case("2023-02-30")]
    #[case("not a date")]
    fn test_parse_date_rejects(#[case] raw: &str) {
        assert_eq!(
            parse_date(Some(raw)),
            Err(RecordIssue::date(DateProblem::Unparsable))
        );
    }

    fn transaction(date: Option<&str>, code: &str) -> TransactionRecord {
        TransactionRecord {
            id: None,
            transaction_date: date.map(str::to_string),
            transaction_type: code.to_string(),
            flow_type: Some("10".to_string()),
            amount: dec!(1000),
            amount_usd: Some(dec!(1000)),
            currency: Some("usd".to_string()),
        }
    }

    #[test]
    fn test_transaction_normalization() {
        let map = CategoryMap::default();
        let normalizer = Normalizer::new(&map);

        let record = normalizer
            .transaction(&transaction(Some("2023-06-15"), "3"))
            .unwrap();
        assert_eq!(record.class, RecordClass::Transaction);
        assert_eq!(record.category, Category::new("Disbursement"));
        assert_eq!(record.currency, Some(Currency::Usd));
        assert_eq!(record.period_start, Some(date(2023, 6, 15)));
        assert_eq!(record.period_end, None);

        assert_eq!(
            normalizer.transaction(&transaction(None, "3")),
            Err(RecordIssue::date(DateProblem::Missing))
        );
        assert_eq!(
            normalizer.transaction(&transaction(Some("June"), "3")),
            Err(RecordIssue::date(DateProblem::Unparsable))
        );
    }

    #[test]
    fn test_unknown_currency_normalizes_to_none() {
        let map = CategoryMap::default();
        let mut raw = transaction(Some("2023-06-15"), "4");
        raw.currency = Some("XYZ".to_string());

        let record = Normalizer::new(&map).transaction(&raw).unwrap();
        assert_eq!(record.currency, None);
    }

    #[test]
    fn test_normalize_all_collects_issues() {
        let map = CategoryMap::default();
        let set = RecordSet {
            transactions: vec![
                transaction(Some("2023-06-15"), "3"),
                transaction(Some("bad"), "3"),
            ],
            planned_disbursements: vec![PlannedDisbursementRecord {
                id: None,
                period_start: Some("2023-01-01".into()),
                period_end: Some("2023-12-31".into()),
                amount: dec!(10),
                usd_amount: Some(dec!(10)),
                currency: Some("USD".into()),
            }],
            budgets: vec![BudgetRecord {
                id: None,
                period_start: Some("2023-01-01".into()),
                period_end: Some("31.12.2023".into()),
                value: dec!(10),
                usd_value: None,
                currency: Some("USD".into()),
            }],
        };

        let normalized = Normalizer::new(&map).normalize_all(&set);
        assert_eq!(normalized.records.len(), 2);
        assert_eq!(normalized.issues.len(), 2);
        assert_eq!(normalized.issues[0].class, RecordClass::Transaction);
        assert_eq!(normalized.issues[0].index, 1);
        assert_eq!(normalized.issues[1].class, RecordClass::Budget);
        assert_eq!(normalized.issues[1].index, 0);
        assert_eq!(
            normalized.records[1].1.category,
            Category::planned_disbursements()
        );
    }
}
