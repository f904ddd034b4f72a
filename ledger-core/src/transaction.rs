//! Wallet transaction types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::amount::AmountNormalizer;
use crate::classify;
use crate::date::try_parse_date;
use crate::error::ParseError;

/// One row of the wallet history table, still as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub date: String,
    /// Transaction type as shown on the page ("Purchase", "Market Transaction", ...)
    pub kind: String,
    /// Payment method ("PayPal", "MasterCard", "Wallet", ...)
    pub source: String,
    pub description: String,
    pub change: String,
    pub total: String,
    pub credit: bool,
}

/// A normalized, read-only wallet transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    date_label: String,
    date: NaiveDate,
    kind: String,
    source: String,
    description: String,
    amount: f64,
    credit: bool,
}

impl Transaction {
    /// Normalize a raw row. Never fails: unreadable fields fall back to their
    /// defaults and the problems are returned alongside the transaction.
    pub fn from_raw(raw: &RawTransaction, amounts: &AmountNormalizer) -> (Self, Vec<ParseError>) {
        let mut issues = Vec::new();

        let amount = amounts.try_parse(&raw.change).unwrap_or_else(|err| {
            tracing::warn!("{err}");
            issues.push(err);
            0.0
        });
        let date = try_parse_date(&raw.date).unwrap_or_else(|err| {
            tracing::warn!("{err}");
            issues.push(err);
            crate::date::UNKNOWN_DATE
        });

        let txn = Self {
            date_label: raw.date.clone(),
            date,
            kind: raw.kind.clone(),
            source: raw.source.clone(),
            description: first_line(&raw.description).to_string(),
            amount,
            credit: raw.credit,
        };
        (txn, issues)
    }

    /// Build directly from already-normalized values.
    pub fn new(
        date_label: impl Into<String>,
        date: NaiveDate,
        description: impl Into<String>,
        amount: f64,
    ) -> Self {
        let description = description.into();
        Self {
            date_label: date_label.into(),
            date,
            kind: String::new(),
            source: String::new(),
            description: first_line(&description).to_string(),
            amount,
            credit: false,
        }
    }

    pub fn with_source(mut self, kind: impl Into<String>, source: impl Into<String>) -> Self {
        self.kind = kind.into();
        self.source = source.into();
        self
    }

    /// Date text exactly as captured
    pub fn date_label(&self) -> &str {
        &self.date_label
    }

    /// Parsed date, for ordering only
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Positive = money in, negative = money out
    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn absolute_amount(&self) -> f64 {
        self.amount.abs()
    }

    pub fn is_credit(&self) -> bool {
        self.credit
    }

    pub fn is_market(&self) -> bool {
        classify::is_market(&self.description)
    }

    pub fn is_expense(&self) -> bool {
        classify::is_expense(self.amount)
    }

    pub fn is_external_payment(&self) -> bool {
        classify::is_external_payment(&self.source, &self.description)
    }

    pub fn is_game_purchase(&self) -> bool {
        classify::is_game_purchase(&self.description)
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("").trim()
}
