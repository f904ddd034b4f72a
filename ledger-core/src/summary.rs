//! Running totals over a wallet history.
//!
//! Positive non-market amounts (refunds, gifts, wallet top-ups) are not
//! counted anywhere, so "Total earnings" only ever reflects market sales.

use serde::Serialize;

use crate::transaction::Transaction;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    /// Sum of positive market amounts
    pub market_earned: f64,
    /// Sum of |amount| for non-positive market amounts
    pub market_spent: f64,
    /// Sum of |amount| for negative non-market amounts
    pub other_spent: f64,
    pub transaction_count: usize,
}

impl Summary {
    /// Fold step: the accumulator after seeing `txn`.
    pub fn record(self, txn: &Transaction) -> Self {
        let mut next = Self {
            transaction_count: self.transaction_count + 1,
            ..self
        };
        let amount = txn.amount();

        if txn.is_market() {
            if amount > 0.0 {
                next.market_earned += amount;
            } else {
                next.market_spent += amount.abs();
            }
        } else if txn.is_expense() {
            next.other_spent += amount.abs();
        }
        next
    }

    pub fn market_balance(&self) -> f64 {
        self.market_earned - self.market_spent
    }

    /// Market and non-market expenses together
    pub fn total_spent(&self) -> f64 {
        self.other_spent + self.market_spent
    }

    pub fn net_balance(&self) -> f64 {
        self.market_earned - self.total_spent()
    }
}

pub fn summarize<'a>(txns: impl IntoIterator<Item = &'a Transaction>) -> Summary {
    txns.into_iter().fold(Summary::default(), Summary::record)
}
