//! Display formatting of series amounts for charts and tables.
//!
//! Pure helpers: nothing here feeds back into the computation.

use num_format::{Locale, ToFormattedString as _};
use rust_decimal::{Decimal, RoundingStrategy};

use aidflow_shared::config::{FormatConfig, MAX_DECIMAL_PLACES};
use aidflow_shared::types::ScaleUnit;

use crate::error::{SeriesError, SeriesResult};

const THOUSAND: Decimal = Decimal::from_parts(1_000, 0, 0, false, 0);
const MILLION: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
const BILLION: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// How amounts are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    locale: Locale,
    symbol: String,
    scale: ScaleUnit,
    decimals: u32,
    missing: String,
}

impl FormatOptions {
    /// Options from configuration.
    ///
    /// # Errors
    ///
    /// Returns `SeriesError::InvalidConfiguration` for an unknown locale name or
    /// more than `MAX_DECIMAL_PLACES` fraction digits.
    pub fn from_config(config: &FormatConfig) -> SeriesResult<Self> {
        if config.decimals > MAX_DECIMAL_PLACES {
            return Err(SeriesError::InvalidConfiguration(format!(
                "format decimals must be at most {MAX_DECIMAL_PLACES}, got {}",
                config.decimals
            )));
        }

        let locale = Locale::from_name(config.locale.as_str()).map_err(|e| {
            SeriesError::InvalidConfiguration(format!("unknown locale '{}': {e}", config.locale))
        })?;

        Ok(Self {
            locale,
            symbol: config.currency_symbol.clone(),
            scale: config.scale,
            decimals: config.decimals,
            missing: config.missing.clone(),
        })
    }

    /// Same options with another unit scale.
    #[must_use]
    pub fn with_scale(mut self, scale: ScaleUnit) -> Self {
        self.scale = scale;
        self
    }

    /// Same options with another number of fraction digits, capped at
    /// `MAX_DECIMAL_PLACES`.
    #[must_use]
    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals.min(MAX_DECIMAL_PLACES);
        self
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            locale: Locale::en,
            symbol: "$".to_string(),
            scale: ScaleUnit::Auto,
            decimals: 1,
            missing: "-".to_string(),
        }
    }
}

/// Concrete scale for `amount`; `Auto` picks the largest unit not exceeding it.
#[must_use]
pub fn resolve_scale(amount: Decimal, scale: ScaleUnit) -> ScaleUnit {
    if scale != ScaleUnit::Auto {
        return scale;
    }

    let magnitude = amount.abs();
    if magnitude >= BILLION {
        ScaleUnit::Billions
    } else if magnitude >= MILLION {
        ScaleUnit::Millions
    } else if magnitude >= THOUSAND {
        ScaleUnit::Thousands
    } else {
        ScaleUnit::Units
    }
}

fn divisor(scale: ScaleUnit) -> Decimal {
    match scale {
        ScaleUnit::Auto | ScaleUnit::Units => Decimal::ONE,
        ScaleUnit::Thousands => THOUSAND,
        ScaleUnit::Millions => MILLION,
        ScaleUnit::Billions => BILLION,
    }
}

fn suffix(scale: ScaleUnit) -> &'static str {
    match scale {
        ScaleUnit::Auto | ScaleUnit::Units => "",
        ScaleUnit::Thousands => "K",
        ScaleUnit::Millions => "M",
        ScaleUnit::Billions => "B",
    }
}

/// Formats an amount, e.g. `$50.3K` or `$1,234,567.00`.
#[must_use]
pub fn format_amount(amount: Decimal, options: &FormatOptions) -> String {
    let scale = resolve_scale(amount, options.scale);
    let scaled = (amount.abs() / divisor(scale))
        .round_dp_with_strategy(options.decimals, RoundingStrategy::MidpointAwayFromZero);

    let mut integer = scaled.trunc();
    integer.rescale(0);
    let grouped = integer
        .mantissa()
        .unsigned_abs()
        .to_formatted_string(&options.locale);

    let sign = if amount.is_sign_negative() && !scaled.is_zero() {
        "-"
    } else {
        ""
    };

    let mut out = format!("{sign}{}{grouped}", options.symbol);
    if options.decimals > 0 {
        let mut fraction = scaled.fract();
        fraction.rescale(options.decimals);
        let width = options.decimals as usize;
        out.push_str(options.locale.decimal());
        out.push_str(&format!("{:0width$}", fraction.mantissa().unsigned_abs()));
    }
    out.push_str(suffix(scale));
    out
}

/// Formats an optional amount; `None` renders as the configured missing text.
#[must_use]
pub fn format_optional(amount: Option<Decimal>, options: &FormatOptions) -> String {
    amount.map_or_else(|| options.missing.clone(), |a| format_amount(a, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(999), ScaleUnit::Units)]
    #[case(dec!(1000), ScaleUnit::Thousands)]
    #[case(dec!(-2500000), ScaleUnit::Millions)]
    #[case(dec!(1000000000), ScaleUnit::Billions)]
    fn test_auto_scale(#[case] amount: Decimal, #[case] expected: ScaleUnit) {
        assert_eq!(resolve_scale(amount, ScaleUnit::Auto), expected);
    }

    #[rstest]
    #[case(dec!(50273.22), ScaleUnit::Auto, 1, "$50.3K")]
    #[case(dec!(1234567), ScaleUnit::Units, 2, "$1,234,567.00")]
    #[case(dec!(1234567), ScaleUnit::Millions, 2, "$1.23M")]
    #[case(dec!(-1500), ScaleUnit::Auto, 1, "-$1.5K")]
    #[case(dec!(2500000000), ScaleUnit::Auto, 0, "$3B")]
    #[case(dec!(0), ScaleUnit::Auto, 1, "$0.0")]
    #[case(dec!(0.04), ScaleUnit::Units, 1, "$0.0")]
    fn test_format_amount(
        #[case] amount: Decimal,
        #[case] scale: ScaleUnit,
        #[case] decimals: u32,
        #[case] expected: &str,
    ) {
        let options = FormatOptions::default()
            .with_scale(scale)
            .with_decimals(decimals);
        assert_eq!(format_amount(amount, &options), expected);
    }

    #[test]
    fn test_missing_value() {
        let options = FormatOptions::default();
        assert_eq!(format_optional(None, &options), "-");
        assert_eq!(format_optional(Some(dec!(12)), &options), "$12.0");
    }

    #[test]
    fn test_from_config() {
        let config = FormatConfig {
            locale: "de".to_string(),
            currency_symbol: "US$ ".to_string(),
            scale: ScaleUnit::Units,
            decimals: 2,
            missing: "n/a".to_string(),
        };
        let options = FormatOptions::from_config(&config).unwrap();

        assert_eq!(format_amount(dec!(1234567.5), &options), "US$ 1.234.567,50");
        assert_eq!(format_optional(None, &options), "n/a");
    }

    #[test]
    fn test_excess_decimals_rejected_or_capped() {
        let config = FormatConfig {
            decimals: 29,
            ..FormatConfig::default()
        };
        assert!(matches!(
            FormatOptions::from_config(&config),
            Err(SeriesError::InvalidConfiguration(_))
        ));

        let options = FormatOptions::default()
            .with_scale(ScaleUnit::Units)
            .with_decimals(40);
        assert_eq!(format_amount(dec!(1.5), &options), "$1.5000000000");
    }

    #[test]
    fn test_unknown_locale_rejected() {
        let config = FormatConfig {
            locale: "xx-nowhere".to_string(),
            ..FormatConfig::default()
        };
        assert!(matches!(
            FormatOptions::from_config(&config),
            Err(SeriesError::InvalidConfiguration(_))
        ));
    }
}
