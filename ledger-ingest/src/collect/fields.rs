//! Split scraped cell text into the table's Type/Source/Total/Credit columns.

use anyhow::Result;
use ledger_core::RawTransaction;
use regex::Regex;
use std::sync::OnceLock;

use super::page::ScrapedRow;

fn line_break_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\n\t]+").expect("invalid line break regex"))
}

/// "Purchase\n\tPayPal" -> ("Purchase", "PayPal"). Without a break the
/// whole text is the type and the source is empty.
pub fn split_type(text: &str) -> (String, String) {
    let parts: Vec<&str> = line_break_re().split(text).collect();
    match parts.split_first() {
        Some((kind, rest)) if !rest.is_empty() => {
            (kind.trim().to_string(), rest.join(" ").trim().to_string())
        }
        _ => (text.trim().to_string(), String::new()),
    }
}

/// Reads the running-total cell.
#[derive(Debug, Clone)]
pub struct TotalParser {
    amount_re: Regex,
}

impl TotalParser {
    pub fn new(currency: &str) -> Result<Self> {
        let amount_re = Regex::new(&format!(r"{}\s*([\d.,]+)", regex::escape(currency)))?;
        Ok(Self { amount_re })
    }

    /// Returns the bare total and whether the row is marked as credit. A cell
    /// without a readable amount is never a credit.
    pub fn parse(&self, text: &str) -> (String, bool) {
        match self.amount_re.captures(text) {
            Some(caps) => (caps[1].to_string(), text.contains("Credit")),
            None => (String::new(), false),
        }
    }
}

/// Shape a scraped row into a history table row.
pub fn to_table_row(row: &ScrapedRow, totals: &TotalParser) -> RawTransaction {
    let (kind, source) = split_type(&row.kind);
    let (total, credit) = totals.parse(&row.total);
    RawTransaction {
        date: row.date.clone(),
        kind,
        source,
        description: row.description.lines().next().unwrap_or("").trim().to_string(),
        change: row.change.clone(),
        total,
        credit,
    }
}
