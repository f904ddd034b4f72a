//! Collector: turns the wallet history page into the history table.

pub mod fields;
pub mod page;
pub mod poll;
pub mod session;
pub mod table;

pub use fields::{TotalParser, split_type, to_table_row};
pub use page::{ScrapedRow, extract_rows};
pub use poll::{Clock, PollError, Poller, SystemClock};
pub use session::{Collector, CollectorConfig, HistoryBrowser, Operator, SavedPage};
pub use table::{save_history, write_history};
