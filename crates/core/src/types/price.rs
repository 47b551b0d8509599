//! Money formatting with a fixed locale and currency.
//!
//! Catalog prices are plain [`Decimal`] amounts with no currency attached. The
//! storefront shows every amount through one [`MoneyFormatter`], configured
//! once at start-up:
//!
//! ```
//! use legumechanics_core::{CurrencyCode, Locale, MoneyFormatter};
//! use rust_decimal::Decimal;
//!
//! let eur = MoneyFormatter::new(Locale::EsEs, CurrencyCode::EUR);
//! assert_eq!(eur.format(Decimal::new(2990, 2)), "29,90\u{a0}€");
//!
//! let usd = MoneyFormatter::new(Locale::EnUs, CurrencyCode::USD);
//! assert_eq!(usd.format(Decimal::new(123_450, 2)), "$1,234.50");
//! ```

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a locale or currency code.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("unsupported locale: {0}")]
    UnsupportedLocale(String),
    #[error("unsupported currency: {0}")]
    UnsupportedCurrency(String),
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    EUR,
    USD,
    GBP,
}

impl CurrencyCode {
    /// Display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::EUR => "€",
            Self::USD => "$",
            Self::GBP => "£",
        }
    }

    /// ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::EUR => "EUR",
            Self::USD => "USD",
            Self::GBP => "GBP",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EUR" => Ok(Self::EUR),
            "USD" => Ok(Self::USD),
            "GBP" => Ok(Self::GBP),
            _ => Err(FormatError::UnsupportedCurrency(s.to_string())),
        }
    }
}

/// Number formatting conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Locale {
    /// Spanish (Spain): `12.345,00 €`.
    #[default]
    EsEs,
    /// English (United States): `€12,345.00`.
    EnUs,
}

impl Locale {
    /// BCP 47 tag.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::EsEs => "es-ES",
            Self::EnUs => "en-US",
        }
    }

    const fn decimal_separator(self) -> char {
        match self {
            Self::EsEs => ',',
            Self::EnUs => '.',
        }
    }

    const fn group_separator(self) -> char {
        match self {
            Self::EsEs => '.',
            Self::EnUs => ',',
        }
    }

    /// Spanish only groups thousands once the integer part has five digits.
    const fn min_grouping_digits(self) -> usize {
        match self {
            Self::EsEs => 5,
            Self::EnUs => 4,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace('_', "-").to_ascii_lowercase().as_str() {
            "es-es" | "es" => Ok(Self::EsEs),
            "en-us" | "en" => Ok(Self::EnUs),
            _ => Err(FormatError::UnsupportedLocale(s.to_string())),
        }
    }
}

/// Formats amounts as two-decimal currency strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoneyFormatter {
    locale: Locale,
    currency: CurrencyCode,
}

impl MoneyFormatter {
    /// Create a formatter for a locale and currency.
    #[must_use]
    pub const fn new(locale: Locale, currency: CurrencyCode) -> Self {
        Self { locale, currency }
    }

    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Format an amount, rounding half away from zero to two decimals.
    #[must_use]
    pub fn format(&self, amount: Decimal) -> String {
        let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        rounded.set_sign_positive(true);
        rounded.rescale(2);

        let plain = rounded.to_string();
        let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
        let int_part = self.group(int_part);
        let sign = if negative { "-" } else { "" };
        let decimal = self.locale.decimal_separator();
        let symbol = self.currency.symbol();

        match self.locale {
            Locale::EsEs => format!("{sign}{int_part}{decimal}{frac_part}\u{a0}{symbol}"),
            Locale::EnUs => format!("{sign}{symbol}{int_part}{decimal}{frac_part}"),
        }
    }

    fn group(&self, digits: &str) -> String {
        if digits.len() < self.locale.min_grouping_digits() {
            return digits.to_string();
        }

        let separator = self.locale.group_separator();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(separator);
            }
            out.push(c);
        }
        out
    }
}
