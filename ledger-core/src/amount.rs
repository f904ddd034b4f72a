//! Currency string normalization.
//!
//! Wallet history cells look like `CHF 2.30`, `-CHF 2,30`, `+CHF 1.50` or
//! `CHF 5,--` and may carry line breaks from the scraped HTML.

use crate::error::ParseError;

pub const DEFAULT_CURRENCY: &str = "CHF";

/// Placeholder the wallet page uses for "no cents".
const EMPTY_CENTS: &str = "--";

/// Turns currency-formatted text into a signed amount for one currency code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountNormalizer {
    currency: String,
}

impl Default for AmountNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY)
    }
}

impl AmountNormalizer {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Strict variant. Empty input is `Ok(0.0)`; anything that does not
    /// reduce to a number is an error carrying the cleaned text.
    pub fn try_parse(&self, raw: &str) -> Result<f64, ParseError> {
        if raw.is_empty() {
            return Ok(0.0);
        }

        let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        let compact = compact.replace(&self.currency, "").replace(',', ".");
        let compact = compact.replace(EMPTY_CENTS, "00");
        let numeric: String = compact
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
            .collect();

        numeric
            .parse::<f64>()
            .map_err(|_| ParseError::Amount(numeric))
    }

    /// Total variant: a malformed amount becomes `0.0` and is logged.
    pub fn parse(&self, raw: &str) -> f64 {
        match self.try_parse(raw) {
            Ok(amount) => amount,
            Err(err) => {
                tracing::warn!("{err}");
                0.0
            }
        }
    }
}

/// Parse with the default currency code.
pub fn parse_amount(raw: &str) -> f64 {
    AmountNormalizer::default().parse(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chf() -> AmountNormalizer {
        AmountNormalizer::default()
    }

    #[test]
    fn test_signed_amounts() {
        assert_eq!(chf().try_parse("-CHF 2,30"), Ok(-2.30));
        assert_eq!(chf().try_parse("+CHF 1.50"), Ok(1.50));
        assert_eq!(chf().try_parse("CHF 12.00"), Ok(12.0));
    }

    #[test]
    fn test_embedded_whitespace_is_ignored() {
        assert_eq!(chf().try_parse("\n\t-CHF\n 4,\t95 "), Ok(-4.95));
    }

    #[test]
    fn test_empty_cents_placeholder() {
        assert_eq!(chf().try_parse("CHF 5,--"), Ok(5.0));
        assert_eq!(chf().try_parse("-CHF 20.--"), Ok(-20.0));
    }

    #[test]
    fn test_empty_input_is_zero_without_error() {
        assert_eq!(chf().try_parse(""), Ok(0.0));
        assert_eq!(chf().parse(""), 0.0);
    }

    #[test]
    fn test_garbage_is_an_error_and_zero() {
        assert_eq!(
            chf().try_parse("Pending"),
            Err(ParseError::Amount(String::new()))
        );
        assert!(chf().try_parse("   ").is_err());
        assert_eq!(chf().parse("Pending"), 0.0);
    }

    #[test]
    fn test_thousands_separator_is_rejected() {
        // comma becomes a second decimal point
        assert!(chf().try_parse("CHF 1,234.50").is_err());
        assert_eq!(chf().parse("CHF 1,234.50"), 0.0);
    }

    #[test]
    fn test_other_currency_code() {
        let eur = AmountNormalizer::new("EUR");
        assert_eq!(eur.currency(), "EUR");
        assert_eq!(eur.try_parse("-EUR 3,10"), Ok(-3.10));
    }

    #[test]
    fn test_sign_follows_marker() {
        for (raw, negative) in [("CHF 1.00", false), ("+CHF 1.00", false), ("-CHF 1.00", true)] {
            let value = parse_amount(raw);
            assert_eq!(value < 0.0, negative, "{raw}");
        }
    }
}
