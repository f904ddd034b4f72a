use anyhow::{Context, Result};
use ledger_ingest::collect::Operator;
use std::io::{BufRead, Write};

/// Asks on stderr and waits for Enter on stdin.
pub struct ConsoleOperator;

impl Operator for ConsoleOperator {
    fn await_login(&mut self) -> Result<()> {
        eprint!("Please log in and press Enter when done...");
        std::io::stderr().flush().ok();
        let mut line = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut line)
            .context("reading confirmation from stdin")?;
        Ok(())
    }
}
