//! Drive a history page until every row is loaded, then scrape it.
//!
//! The page needs a human to log in and only shows a slice of the history
//! until "Load More" has been clicked enough times. Both waits are bounded
//! polls against a [`Clock`], and the page itself sits behind
//! [`HistoryBrowser`] so the sequence runs against a driver or a fake. A
//! static page, such as one saved to disk, is scraped without waiting.

use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;

use super::page::{ScrapedRow, extract_rows};
use super::poll::{Clock, PollError, Poller};

/// The live history page.
pub trait HistoryBrowser {
    /// Whether the page is showing a login form instead of the history
    fn login_required(&mut self) -> Result<bool>;
    /// Number of history rows currently rendered
    fn row_count(&mut self) -> Result<usize>;
    /// Click "Load More". `false` when the button is not available.
    fn click_load_more(&mut self) -> Result<bool>;
    fn page_source(&mut self) -> Result<String>;

    /// A page that never changes, so there is nothing to wait for.
    fn is_static(&self) -> bool {
        false
    }
}

/// The human in the loop.
pub trait Operator {
    /// Block until the operator reports that they have logged in.
    fn await_login(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectorConfig {
    /// Pause after the operator confirms the login
    pub login_settle: Duration,
    /// How long to wait for the first history rows
    pub table_timeout: Duration,
    /// How long to wait for a clickable "Load More" button
    pub load_more_timeout: Duration,
    /// Pause after each click before counting rows
    pub load_more_settle: Duration,
    pub poll_interval: Duration,
    pub max_expansions: usize,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            login_settle: Duration::from_secs(10),
            table_timeout: Duration::from_secs(60),
            load_more_timeout: Duration::from_secs(5),
            load_more_settle: Duration::from_secs(3),
            poll_interval: Duration::from_millis(500),
            max_expansions: 500,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Collector {
    config: CollectorConfig,
}

impl Collector {
    pub fn new(config: CollectorConfig) -> Self {
        Self { config }
    }

    pub fn run(
        &self,
        browser: &mut dyn HistoryBrowser,
        operator: &mut dyn Operator,
        clock: &dyn Clock,
    ) -> Result<Vec<ScrapedRow>> {
        let cfg = &self.config;

        if browser.is_static() {
            return scrape(browser);
        }

        if browser.login_required()? {
            tracing::info!("login form found, waiting for the operator");
            operator.await_login()?;
            clock.sleep(cfg.login_settle);
        }

        let table = Poller::new(cfg.table_timeout, cfg.poll_interval);
        let mut count = match table.poll(clock, || Ok(Some(browser.row_count()?).filter(|&n| n > 0))) {
            Ok(n) => n,
            Err(PollError::Timeout(waited)) => {
                tracing::warn!("no transaction rows after {waited:?}");
                0
            }
            Err(PollError::Probe(err)) => return Err(err),
        };
        tracing::info!("history table has {count} rows");

        let load_more = Poller::new(cfg.load_more_timeout, cfg.poll_interval);
        for _ in 0..cfg.max_expansions {
            match load_more.poll(clock, || Ok(browser.click_load_more()?.then_some(()))) {
                Ok(()) => {}
                Err(PollError::Timeout(_)) => {
                    tracing::info!("no further transactions available");
                    break;
                }
                Err(PollError::Probe(err)) => return Err(err),
            }

            clock.sleep(cfg.load_more_settle);
            let now = browser.row_count()?;
            if now <= count {
                tracing::info!("load more produced no new rows");
                break;
            }
            tracing::debug!("loaded {} more rows", now - count);
            count = now;
        }

        scrape(browser)
    }
}

fn scrape(browser: &mut dyn HistoryBrowser) -> Result<Vec<ScrapedRow>> {
    let html = browser.page_source()?;
    let rows = extract_rows(&html);
    if rows.is_empty() {
        tracing::warn!("page has no transaction rows");
    }
    tracing::info!("extracted {} transactions", rows.len());
    Ok(rows)
}

/// A history page saved from the browser after everything was loaded.
#[derive(Debug, Clone)]
pub struct SavedPage {
    html: String,
}

impl SavedPage {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let html =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Ok(Self::new(html))
    }
}

impl HistoryBrowser for SavedPage {
    fn login_required(&mut self) -> Result<bool> {
        Ok(false)
    }

    fn row_count(&mut self) -> Result<usize> {
        Ok(extract_rows(&self.html).len())
    }

    fn click_load_more(&mut self) -> Result<bool> {
        Ok(false)
    }

    fn page_source(&mut self) -> Result<String> {
        Ok(self.html.clone())
    }

    fn is_static(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::poll::tests::FakeClock;

    fn page(rows: usize) -> String {
        let mut html = String::from("<table class=\"wallet_history_table\">");
        for i in 0..rows {
            html.push_str(&format!(
                "<tr class=\"wallet_history_row\">\
                 <td class=\"wallet_history_date\">{} Jan, 2023</td>\
                 <td class=\"wallet_history_description\">Item {i}</td>\
                 <td class=\"wallet_history_type\">Purchase</td>\
                 <td class=\"wallet_history_total\">CHF 1.00</td>\
                 <td class=\"wallet_history_amount\">-CHF 1.00</td></tr>",
                i + 1
            ));
        }
        html.push_str("</table>");
        html
    }

    /// Shows `batches[i]` rows after `i` clicks. The first `empty_polls` row
    /// counts come back empty.
    struct ScriptedBrowser {
        needs_login: bool,
        batches: Vec<usize>,
        clicks: usize,
        empty_polls: usize,
    }

    impl HistoryBrowser for ScriptedBrowser {
        fn login_required(&mut self) -> Result<bool> {
            Ok(self.needs_login)
        }

        fn row_count(&mut self) -> Result<usize> {
            if self.empty_polls > 0 {
                self.empty_polls -= 1;
                return Ok(0);
            }
            Ok(self.batches[self.clicks.min(self.batches.len() - 1)])
        }

        fn click_load_more(&mut self) -> Result<bool> {
            if self.clicks + 1 < self.batches.len() {
                self.clicks += 1;
                Ok(true)
            } else {
                Ok(false)
            }
        }

        fn page_source(&mut self) -> Result<String> {
            let n = self.batches[self.clicks.min(self.batches.len() - 1)];
            Ok(page(n))
        }
    }

    #[derive(Default)]
    struct CountingOperator {
        logins: usize,
    }

    impl Operator for CountingOperator {
        fn await_login(&mut self) -> Result<()> {
            self.logins += 1;
            Ok(())
        }
    }

    #[test]
    fn test_expands_until_button_disappears() {
        let mut browser = ScriptedBrowser {
            needs_login: true,
            batches: vec![2, 4, 5],
            clicks: 0,
            empty_polls: 3,
        };
        let mut operator = CountingOperator::default();
        let clock = FakeClock::default();

        let rows = Collector::new(CollectorConfig::default())
            .run(&mut browser, &mut operator, &clock)
            .unwrap();

        assert_eq!(operator.logins, 1);
        assert_eq!(browser.clicks, 2);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[4].description, "Item 4");
    }

    #[test]
    fn test_stops_when_click_adds_nothing() {
        let mut browser = ScriptedBrowser {
            needs_login: false,
            batches: vec![3, 3, 9],
            clicks: 0,
            empty_polls: 0,
        };
        let mut operator = CountingOperator::default();
        let clock = FakeClock::default();

        let rows = Collector::new(CollectorConfig::default())
            .run(&mut browser, &mut operator, &clock)
            .unwrap();

        assert_eq!(operator.logins, 0);
        assert_eq!(browser.clicks, 1);
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_respects_expansion_cap() {
        let mut browser = ScriptedBrowser {
            needs_login: false,
            batches: vec![1, 2, 3, 4, 5],
            clicks: 0,
            empty_polls: 0,
        };
        let config = CollectorConfig {
            max_expansions: 2,
            ..Default::default()
        };
        let rows = Collector::new(config)
            .run(&mut browser, &mut CountingOperator::default(), &FakeClock::default())
            .unwrap();
        assert_eq!(browser.clicks, 2);
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_empty_table_times_out_gracefully() {
        let mut browser = ScriptedBrowser {
            needs_login: false,
            batches: vec![0],
            clicks: 0,
            empty_polls: 0,
        };
        let clock = FakeClock::default();
        let rows = Collector::new(CollectorConfig::default())
            .run(&mut browser, &mut CountingOperator::default(), &clock)
            .unwrap();
        assert!(rows.is_empty());
        assert!(clock.now() >= Duration::from_secs(60));
    }

    #[test]
    fn test_saved_page() {
        let mut saved = SavedPage::new(page(4));
        let clock = FakeClock::default();
        let rows = Collector::new(CollectorConfig::default())
            .run(&mut saved, &mut CountingOperator::default(), &clock)
            .unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].date, "1 Jan, 2023");
        assert_eq!(clock.now(), Duration::ZERO);
        assert_eq!(clock.sleeps.get(), 0);
    }

    #[test]
    fn test_saved_page_without_rows_returns_at_once() {
        let mut saved = SavedPage::new("<p>Sign in</p>");
        let mut operator = CountingOperator::default();
        let clock = FakeClock::default();
        let rows = Collector::new(CollectorConfig::default())
            .run(&mut saved, &mut operator, &clock)
            .unwrap();
        assert!(rows.is_empty());
        assert_eq!(operator.logins, 0);
        assert_eq!(clock.now(), Duration::ZERO);
    }
}
