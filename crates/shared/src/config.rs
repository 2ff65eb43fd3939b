//! Application configuration management.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::types::{AllocationMethod, CategoryDimension, ScaleUnit};

/// Largest precision accepted for emitted and displayed amounts.
pub const MAX_DECIMAL_PLACES: u32 = 10;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Series engine defaults.
    #[serde(default)]
    pub engine: EngineConfig,
    /// Category label sets.
    #[serde(default)]
    pub categories: CategoryConfig,
    /// Result cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Amount formatting for presentation.
    #[serde(default)]
    pub format: FormatConfig,
}

/// Series engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Default allocation method.
    #[serde(default)]
    pub allocation_method: AllocationMethod,
    /// Start month of the default fiscal year; `None` means the plain calendar year.
    #[serde(default)]
    pub fiscal_start_month: Option<u32>,
    /// Decimal places of emitted amounts (USD minor unit).
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
}

fn default_decimal_places() -> u32 {
    2
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            allocation_method: AllocationMethod::default(),
            fiscal_start_month: None,
            decimal_places: default_decimal_places(),
        }
    }
}

/// Category label configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryConfig {
    /// Transaction type code to display label.
    #[serde(default = "default_transaction_types")]
    pub transaction_types: BTreeMap<String, String>,
    /// Alternate label to canonical label.
    #[serde(default = "default_aliases")]
    pub aliases: BTreeMap<String, String>,
    /// Categories whose absence means "not declared" rather than zero.
    #[serde(default = "default_snapshot")]
    pub snapshot: Vec<String>,
    /// Attribute transactions are broken out by.
    #[serde(default)]
    pub dimension: CategoryDimension,
}

fn default_transaction_types() -> BTreeMap<String, String> {
    [
        ("1", "Incoming Funds"),
        ("2", "Outgoing Commitment"),
        ("3", "Disbursement"),
        ("4", "Expenditure"),
        ("5", "Interest Payment"),
        ("6", "Loan Repayment"),
        ("7", "Reimbursement"),
        ("8", "Purchase of Equity"),
        ("9", "Sale of Equity"),
        ("10", "Credit Guarantee"),
        ("11", "Incoming Commitment"),
        ("12", "Outgoing Pledge"),
        ("13", "Incoming Pledge"),
        ("incoming_funds", "Incoming Funds"),
        ("commitment", "Outgoing Commitment"),
        ("disbursement", "Disbursement"),
        ("expenditure", "Expenditure"),
        ("interest_payment", "Interest Payment"),
        ("loan_repayment", "Loan Repayment"),
    ]
    .into_iter()
    .map(|(code, label)| (code.to_string(), label.to_string()))
    .collect()
}

fn default_aliases() -> BTreeMap<String, String> {
    BTreeMap::from([(
        "Commitments".to_string(),
        "Outgoing Commitment".to_string(),
    )])
}

fn default_snapshot() -> Vec<String> {
    vec!["Budgets".to_string()]
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            transaction_types: default_transaction_types(),
            aliases: default_aliases(),
            snapshot: default_snapshot(),
            dimension: CategoryDimension::default(),
        }
    }
}

/// Result cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached series.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    /// Time-to-live of a cached series in seconds.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_max_capacity() -> u64 {
    100
}

fn default_ttl_secs() -> u64 {
    300 // 5 minutes
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_max_capacity(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

/// Amount formatting configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FormatConfig {
    /// Locale name used for digit grouping (e.g., "en", "de").
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Symbol prefixed to formatted amounts.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Unit scale.
    #[serde(default)]
    pub scale: ScaleUnit,
    /// Fraction digits of scaled amounts.
    #[serde(default = "default_format_decimals")]
    pub decimals: u32,
    /// Text rendered for a missing value.
    #[serde(default = "default_missing")]
    pub missing: String,
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_format_decimals() -> u32 {
    1
}

fn default_missing() -> String {
    "-".to_string()
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            currency_symbol: default_currency_symbol(),
            scale: ScaleUnit::default(),
            decimals: default_format_decimals(),
            missing: default_missing(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from `.env`, config files, and environment.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or fails validation.
    pub fn load() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("AIDFLOW")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Checks values the type system cannot express.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Configuration` describing the first invalid value.
    pub fn validate(&self) -> AppResult<()> {
        if let Some(month) = self.engine.fiscal_start_month {
            if !(1..=12).contains(&month) {
                return Err(AppError::Configuration(format!(
                    "fiscal_start_month must be between 1 and 12, got {month}"
                )));
            }
        }

        if self.engine.decimal_places > MAX_DECIMAL_PLACES {
            return Err(AppError::Configuration(format!(
                "decimal_places must be at most {MAX_DECIMAL_PLACES}, got {}",
                self.engine.decimal_places
            )));
        }

        if self.format.decimals > MAX_DECIMAL_PLACES {
            return Err(AppError::Configuration(format!(
                "format decimals must be at most {MAX_DECIMAL_PLACES}, got {}",
                self.format.decimals
            )));
        }

        if self.cache.max_capacity == 0 {
            return Err(AppError::Configuration(
                "cache max_capacity must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
