//! Vocabulary shared by configuration and the series engine.

use serde::{Deserialize, Serialize};

/// How a record's amount is spread across the years its period covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationMethod {
    /// Split by the number of days the period overlaps each year.
    #[default]
    Proportional,
    /// Assign the whole amount to the year containing the period start.
    PeriodStart,
}

/// Which attribute of a transaction becomes its series category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryDimension {
    /// Transaction type code (disbursement, expenditure, ...).
    #[default]
    TransactionType,
    /// Flow type (ODA, OOF, ...).
    FlowType,
}

/// Unit scale applied when rendering amounts for charts and tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleUnit {
    /// Pick the largest scale that keeps the value at or above one unit.
    #[default]
    Auto,
    /// No scaling.
    Units,
    /// Thousands ("K").
    Thousands,
    /// Millions ("M").
    Millions,
    /// Billions ("B").
    Billions,
}

impl std::fmt::Display for AllocationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Proportional => f.write_str("proportional"),
            Self::PeriodStart => f.write_str("period_start"),
        }
    }
}

impl std::str::FromStr for AllocationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "proportional" => Ok(Self::Proportional),
            "period_start" | "start" => Ok(Self::PeriodStart),
            _ => Err(format!("Unknown allocation method: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case("proportional", AllocationMethod::Proportional)]
    #[case("PERIOD_START", AllocationMethod::PeriodStart)]
    #[case("period-start", AllocationMethod::PeriodStart)]
    #[case("start", AllocationMethod::PeriodStart)]
    fn test_allocation_method_from_str(#[case] input: &str, #[case] expected: AllocationMethod) {
        assert_eq!(AllocationMethod::from_str(input).unwrap(), expected);
    }

    #[test]
    fn test_allocation_method_rejects_unknown() {
        assert!(AllocationMethod::from_str("monthly").is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(AllocationMethod::default(), AllocationMethod::Proportional);
        assert_eq!(
            CategoryDimension::default(),
            CategoryDimension::TransactionType
        );
        assert_eq!(ScaleUnit::default(), ScaleUnit::Auto);
    }
}
