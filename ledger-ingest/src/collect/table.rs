//! Write the wallet history table (CRLF line endings on every platform).

use anyhow::{Context, Result};
use ledger_core::RawTransaction;
use std::io::Write;
use std::path::Path;

use crate::history::HISTORY_HEADER;

pub fn write_history<W: Write>(writer: W, rows: &[RawTransaction]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    wtr.write_record(HISTORY_HEADER)?;
    for row in rows {
        wtr.write_record([
            row.date.as_str(),
            row.kind.as_str(),
            row.source.as_str(),
            row.description.as_str(),
            row.change.as_str(),
            row.total.as_str(),
            if row.credit { "Yes" } else { "No" },
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn save_history(path: impl AsRef<Path>, rows: &[RawTransaction]) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_history(file, rows).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!("wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}
