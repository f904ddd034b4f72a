//! Sorted and filtered views over a loaded history. Nothing here mutates or
//! caches: calling a view twice gives the same answer.

use crate::transaction::Transaction;

pub const DEFAULT_TOP_N: usize = 5;

/// Transactions in date order; equal dates keep their input order.
pub fn by_date(txns: &[Transaction]) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = txns.iter().collect();
    sorted.sort_by_key(|t| t.date());
    sorted
}

/// Non-market expenses in date order with their absolute total.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseExport<'a> {
    pub rows: Vec<&'a Transaction>,
    pub total: f64,
}

impl<'a> ExpenseExport<'a> {
    pub fn build(txns: &'a [Transaction]) -> Self {
        let rows: Vec<&Transaction> = by_date(txns)
            .into_iter()
            .filter(|t| !t.is_market() && t.is_expense())
            .collect();
        let total = rows.iter().map(|t| t.absolute_amount()).sum();
        Self { rows, total }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The `n` largest non-market transactions by absolute amount. Ties keep
/// date order.
pub fn top_transactions(txns: &[Transaction], n: usize) -> Vec<&Transaction> {
    let mut ranked: Vec<&Transaction> = by_date(txns)
        .into_iter()
        .filter(|t| !t.is_market())
        .collect();
    ranked.sort_by(|a, b| b.absolute_amount().total_cmp(&a.absolute_amount()));
    ranked.truncate(n);
    ranked
}
