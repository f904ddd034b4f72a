//! Read the wallet history table written by the collector.
//!
//! Columns: Date, Type, Source, Description, Change, Total, Credit. Tables
//! written by older collectors use `Datum` and `Beschreibung` for the date and
//! description headers; both load.

use anyhow::{Context, Result};
use csv::StringRecord;
use ledger_core::{AmountNormalizer, Diagnostic, ParseError, RawTransaction, Transaction};
use std::io::Read;
use std::path::Path;

pub const HISTORY_HEADER: [&str; 7] =
    ["Date", "Type", "Source", "Description", "Change", "Total", "Credit"];

/// Column positions found in the header row. Absent columns read as empty.
#[derive(Debug, Clone, Copy)]
struct Columns {
    date: Option<usize>,
    kind: Option<usize>,
    source: Option<usize>,
    description: Option<usize>,
    change: Option<usize>,
    total: Option<usize>,
    credit: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Self {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.contains(&h.trim_start_matches('\u{feff}').trim()))
        };
        Self {
            date: find(&["Date", "Datum"]),
            kind: find(&["Type"]),
            source: find(&["Source"]),
            description: find(&["Description", "Beschreibung"]),
            change: find(&["Change"]),
            total: find(&["Total"]),
            credit: find(&["Credit"]),
        }
    }

    fn raw(&self, record: &StringRecord) -> RawTransaction {
        let get = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or("").to_string();
        RawTransaction {
            date: get(self.date),
            kind: get(self.kind),
            source: get(self.source),
            description: get(self.description),
            change: get(self.change),
            total: get(self.total),
            credit: parse_credit_flag(&get(self.credit)),
        }
    }
}

/// Everything loaded from one table, in file order.
#[derive(Debug, Clone, Default)]
pub struct History {
    pub transactions: Vec<Transaction>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Load a history table from disk. Only failing to open or read the file is
/// an error; bad rows end up in `diagnostics`.
pub fn load_history(path: impl AsRef<Path>, amounts: &AmountNormalizer) -> Result<History> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let history =
        read_history(file, amounts).with_context(|| format!("reading {}", path.display()))?;
    tracing::info!(
        "loaded {} transactions from {} ({} diagnostics)",
        history.transactions.len(),
        path.display(),
        history.diagnostics.len()
    );
    Ok(history)
}

pub fn read_history<R: Read>(mut reader: R, amounts: &AmountNormalizer) -> Result<History> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data).context("reading history table")?;
    let mut lines = LineCounter::new(&data);

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(data.as_slice());
    let columns = Columns::locate(rdr.headers().context("reading header row")?);
    if columns.date.is_none() || columns.change.is_none() {
        tracing::warn!("history table has no Date or Change column");
    }

    let mut history = History::default();

    for result in rdr.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                let line = err.position().map_or(0, |p| lines.line_at(p.byte()));
                reject(&mut history, line, err.to_string());
                continue;
            }
        };
        let line = record.position().map_or(0, |p| lines.line_at(p.byte()));

        // rows of blank cells (e.g. ",,,,,,") carry nothing
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let raw = columns.raw(&record);
        tracing::debug!("line {line}: {} | {} | {}", raw.date, raw.description, raw.change);
        let (txn, issues) = Transaction::from_raw(&raw, amounts);
        history
            .diagnostics
            .extend(issues.into_iter().map(|error| Diagnostic::new(line, error)));
        history.transactions.push(txn);
    }

    Ok(history)
}

/// Maps record byte offsets to 1-based physical lines.
///
/// csv counts a line when it consumes `\n`, which for `\r\n` tables happens
/// after the next record has already started, so its own line numbers lag by
/// one. Counting from the byte offset works for either terminator.
struct LineCounter<'a> {
    data: &'a [u8],
    offset: usize,
    line: u64,
}

impl<'a> LineCounter<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0, line: 1 }
    }

    fn line_at(&mut self, byte: u64) -> u64 {
        let mut start = usize::try_from(byte).unwrap_or(usize::MAX).min(self.data.len());
        // a record offset may still point at the previous terminator
        while matches!(self.data.get(start), Some(b'\r' | b'\n')) {
            start += 1;
        }
        if start < self.offset {
            self.offset = 0;
            self.line = 1;
        }
        self.line += self.data[self.offset..start]
            .iter()
            .filter(|&&b| b == b'\n')
            .count() as u64;
        self.offset = start;
        self.line
    }
}

fn reject(history: &mut History, line: u64, reason: String) {
    let error = ParseError::Row { line, reason };
    tracing::warn!("{error}");
    history.diagnostics.push(Diagnostic::new(line, error));
}

fn parse_credit_flag(text: &str) -> bool {
    matches!(
        text.trim().to_ascii_lowercase().as_str(),
        "yes" | "ja" | "true"
    )
}
