use ledger_core::AmountNormalizer;
use ledger_ingest::collect::{
    Clock, Collector, CollectorConfig, Operator, SavedPage, TotalParser, to_table_row,
    write_history,
};
use ledger_ingest::read_history;
use std::cell::Cell;
use std::path::PathBuf;
use std::time::Duration;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("fixtures")
        .join(name)
}

#[derive(Default)]
struct InstantClock {
    now: Cell<Duration>,
}

impl Clock for InstantClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn sleep(&self, duration: Duration) {
        self.now.set(self.now.get() + duration);
    }
}

struct NoLogin;

impl Operator for NoLogin {
    fn await_login(&mut self) -> anyhow::Result<()> {
        panic!("saved pages never ask for a login");
    }
}

/// Saved page -> table -> transactions, the same path `steam-ledger collect`
/// followed by `steam-ledger analyze` takes.
#[test]
fn test_saved_page_round_trips_through_table() {
    let mut page = SavedPage::open(fixture("wallet_history.html")).unwrap();
    let clock = InstantClock::default();
    let scraped = Collector::new(CollectorConfig::default())
        .run(&mut page, &mut NoLogin, &clock)
        .unwrap();
    assert_eq!(scraped.len(), 3, "placeholder row is skipped");
    assert_eq!(clock.now(), Duration::ZERO, "saved page is not polled");

    let totals = TotalParser::new("CHF").unwrap();
    let rows: Vec<_> = scraped.iter().map(|r| to_table_row(r, &totals)).collect();
    assert_eq!(rows[0].source, "PayPal");
    assert_eq!(rows[0].description, "Portal 2");
    assert_eq!(rows[1].total, "11.40");
    assert!(rows[1].credit);
    assert_eq!(rows[2].kind, "In-Game Purchase");
    assert_eq!(rows[2].source, "MasterCard");

    let mut buf = Vec::new();
    write_history(&mut buf, &rows).unwrap();
    assert!(String::from_utf8_lossy(&buf).ends_with("\r\n"));

    let history = read_history(buf.as_slice(), &AmountNormalizer::default()).unwrap();
    assert!(history.diagnostics.is_empty());
    let amounts: Vec<f64> = history.transactions.iter().map(|t| t.amount()).collect();
    assert_eq!(amounts, vec![-2.30, 1.50, -9.00]);
    assert!(history.transactions[0].is_external_payment());
    assert!(history.transactions[1].is_market());
    assert!(history.transactions[2].is_game_purchase());
}
