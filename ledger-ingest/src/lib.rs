//! ledger-ingest: getting wallet history in. Scrapes the history page into
//! the CSV table and loads that table back as transactions.

pub mod collect;
pub mod history;

pub use history::{HISTORY_HEADER, History, load_history, read_history};
