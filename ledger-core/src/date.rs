//! Parsing of wallet date labels such as `12 Jan, 2023`.

use chrono::NaiveDate;

use crate::error::ParseError;

const DATE_FORMAT: &str = "%d %b, %Y";

/// Sorts before every real date.
pub const UNKNOWN_DATE: NaiveDate = NaiveDate::MIN;

/// Strict variant. Surrounding quotes and whitespace are ignored.
pub fn try_parse_date(raw: &str) -> Result<NaiveDate, ParseError> {
    let label = raw.trim().trim_matches('"');
    NaiveDate::parse_from_str(label, DATE_FORMAT).map_err(|_| ParseError::Date(raw.to_string()))
}

/// Total variant: an unreadable label becomes [`UNKNOWN_DATE`] and is logged.
pub fn parse_date(raw: &str) -> NaiveDate {
    try_parse_date(raw).unwrap_or_else(|err| {
        tracing::warn!("{err}");
        UNKNOWN_DATE
    })
}
