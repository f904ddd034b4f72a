//! Spreadsheet of non-market expenses.

use anyhow::{Context, Result};
use ledger_core::ExpenseExport;
use rust_xlsxwriter::{Color, Format, Workbook};
use std::path::Path;

pub const SHEET_NAME: &str = "Non-Market Expenses";

const HEADER_FILL: u32 = 0xCCCCCC;
const TOTAL_FILL: u32 = 0xE0E0E0;

fn headers(currency: &str) -> [String; 3] {
    [
        "Date".to_string(),
        "Description".to_string(),
        format!("Amount ({currency})"),
    ]
}

/// Shortest round-trip text of an amount, keeping `.0` on whole numbers.
fn amount_text(amount: f64) -> String {
    format!("{amount:?}")
}

/// Width per column: the longest cell text plus two.
pub fn column_widths(export: &ExpenseExport<'_>, currency: &str) -> [usize; 3] {
    let mut widths = headers(currency).map(|h| h.chars().count());

    let mut widen = |col: usize, text: &str| {
        widths[col] = widths[col].max(text.chars().count());
    };
    for txn in &export.rows {
        widen(0, txn.date_label());
        widen(1, txn.description());
        widen(2, &amount_text(txn.absolute_amount()));
    }
    widen(0, "TOTAL");
    widen(2, &amount_text(export.total));

    widths.map(|w| w + 2)
}

pub fn build_workbook(export: &ExpenseExport<'_>, currency: &str) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(HEADER_FILL));
    let total_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(TOTAL_FILL));

    for (col, header) in headers(currency).iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, header, &header_format)?;
    }

    let mut row: u32 = 1;
    for txn in &export.rows {
        sheet.write_string(row, 0, txn.date_label())?;
        sheet.write_string(row, 1, txn.description())?;
        sheet.write_number(row, 2, txn.absolute_amount())?;
        row += 1;
    }

    sheet.write_string_with_format(row, 0, "TOTAL", &total_format)?;
    sheet.write_string_with_format(row, 1, "", &total_format)?;
    sheet.write_number_with_format(row, 2, export.total, &total_format)?;

    for (col, width) in column_widths(export, currency).into_iter().enumerate() {
        sheet.set_column_width(col as u16, width as f64)?;
    }

    Ok(workbook)
}

pub fn save_workbook(path: impl AsRef<Path>, export: &ExpenseExport<'_>, currency: &str) -> Result<()> {
    let path = path.as_ref();
    if export.is_empty() {
        tracing::warn!("no non-market expenses, {} gets only the TOTAL row", path.display());
    }
    let mut workbook = build_workbook(export, currency)?;
    workbook
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!("saved {} expense rows to {}", export.rows.len(), path.display());
    Ok(())
}
