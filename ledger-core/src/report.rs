//! Plain-text analysis report.

use std::fmt::Write;

use crate::summary::{Summary, summarize};
use crate::transaction::Transaction;
use crate::views::{by_date, top_transactions};

/// Everything the text report shows, computed from one history.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis<'a> {
    pub currency: String,
    pub summary: Summary,
    /// Raw date labels of the first and last transaction in date order
    pub period: Option<(&'a str, &'a str)>,
    pub top_n: usize,
    pub top: Vec<&'a Transaction>,
}

impl<'a> Analysis<'a> {
    pub fn new(txns: &'a [Transaction], currency: impl Into<String>, top_n: usize) -> Self {
        let sorted = by_date(txns);
        let period = match (sorted.first().copied(), sorted.last().copied()) {
            (Some(first), Some(last)) => Some((first.date_label(), last.date_label())),
            _ => None,
        };

        Self {
            currency: currency.into(),
            summary: summarize(txns),
            period,
            top_n,
            top: top_transactions(txns, top_n),
        }
    }

    pub fn render(&self) -> String {
        let cur = &self.currency;
        let s = &self.summary;
        let mut out = String::new();

        let period = match self.period {
            Some((first, last)) => format!("{first} to {last}"),
            None => "n/a".to_string(),
        };

        // writing to a String cannot fail
        let _ = write!(
            out,
            "=== Steam Transaction Analysis ===\n\
             Period: {period}\n\
             \n\
             === Market Transactions ===\n\
             Market earnings: {cur} {:.2}\n\
             Market expenses: {cur} {:.2}\n\
             Market balance: {cur} {:.2}\n\
             \n\
             === Other Transactions ===\n\
             Total expenses: {cur} {:.2}\n\
             \n\
             === Overall Summary ===\n\
             Total earnings (Market only): {cur} {:.2}\n\
             Total expenses (all): {cur} {:.2}\n\
             Net balance: {cur} {:.2}\n\
             \n\
             Top {} largest transactions (excluding Market):\n",
            s.market_earned,
            s.market_spent,
            s.market_balance(),
            s.other_spent,
            s.market_earned,
            s.total_spent(),
            s.net_balance(),
            self.top_n,
        );

        // every entry is tagged EXPENSE, refunds included
        for (i, txn) in self.top.iter().enumerate() {
            let _ = writeln!(
                out,
                "{}. [EXPENSE] {}: {cur} {:.2}",
                i + 1,
                txn.description(),
                txn.absolute_amount()
            );
        }
        out
    }
}
