//! ledger-core: wallet transaction model, normalizers, classification,
//! aggregation and the text report.

pub mod amount;
pub mod classify;
pub mod date;
pub mod error;
pub mod report;
pub mod summary;
pub mod transaction;
pub mod views;

pub use amount::{AmountNormalizer, DEFAULT_CURRENCY, parse_amount};
pub use date::{UNKNOWN_DATE, parse_date, try_parse_date};
pub use error::{Diagnostic, ParseError};
pub use report::Analysis;
pub use summary::{Summary, summarize};
pub use transaction::{RawTransaction, Transaction};
pub use views::{DEFAULT_TOP_N, ExpenseExport, by_date, top_transactions};
