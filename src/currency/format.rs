//! en-US style currency formatting

use bigdecimal::{BigDecimal, RoundingMode};
use serde::{Deserialize, Serialize};

use crate::types::*;

/// Display rules for a single currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyStyle {
    /// Upper-case ISO 4217 code
    pub code: String,
    /// Prefix shown before the amount
    pub symbol: String,
    /// Digits shown after the decimal point
    pub minor_units: i64,
}

impl CurrencyStyle {
    /// Look up the display rules for `code`.
    ///
    /// Codes without a known symbol are shown as the code followed by a
    /// non-breaking space.
    pub fn for_code(code: &str) -> SettleResult<Self> {
        let code = normalize_currency_code(code)?;
        let (symbol, minor_units) = match code.as_str() {
            "USD" => ("$".to_string(), 2),
            "EUR" => ("€".to_string(), 2),
            "GBP" => ("£".to_string(), 2),
            "INR" => ("₹".to_string(), 2),
            "JPY" => ("¥".to_string(), 0),
            "CAD" => ("CA$".to_string(), 2),
            "AUD" => ("A$".to_string(), 2),
            other => (format!("{}\u{a0}", other), 2),
        };

        Ok(Self {
            code,
            symbol,
            minor_units,
        })
    }

    /// Format `amount` using these rules
    pub fn format(&self, amount: &BigDecimal) -> String {
        let rounded = amount.with_scale_round(self.minor_units, RoundingMode::HalfUp);
        let negative = rounded < BigDecimal::from(0);
        let digits = rounded.abs().to_plain_string();

        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (digits.as_str(), None),
        };

        let mut out = String::with_capacity(digits.len() + self.symbol.len() + 4);
        if negative {
            out.push('-');
        }
        out.push_str(&self.symbol);
        out.push_str(&group_thousands(whole));
        if let Some(fraction) = fraction {
            out.push('.');
            out.push_str(fraction);
        }
        out
    }
}

/// Validate and upper-case a three-letter currency code
pub fn normalize_currency_code(code: &str) -> SettleResult<String> {
    let trimmed = code.trim();
    if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(SettleError::InvalidCurrency(code.to_string()));
    }
    Ok(trimmed.to_ascii_uppercase())
}

/// Format `amount` in `currency_code` with en-US conventions, e.g. `$1,234.50`
pub fn format_currency(amount: &BigDecimal, currency_code: &str) -> SettleResult<String> {
    Ok(CurrencyStyle::for_code(currency_code)?.format(amount))
}

/// Format `amount` in US dollars
pub fn format_usd(amount: &BigDecimal) -> String {
    CurrencyStyle {
        code: "USD".to_string(),
        symbol: "$".to_string(),
        minor_units: 2,
    }
    .format(amount)
}

fn group_thousands(whole: &str) -> String {
    let len = whole.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
