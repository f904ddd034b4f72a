//! ledger-report: writes the expense spreadsheet and the text analysis.

pub mod text;
pub mod xlsx;

pub use text::save_report;
pub use xlsx::{SHEET_NAME, build_workbook, column_widths, save_workbook};
