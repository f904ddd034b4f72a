//! Pull wallet history rows out of the history page HTML.
//!
//! The page has changed markup over time, so every lookup has a positional
//! fallback:
//!
//!   <tr class="wallet_history_row">
//!     <td class="wallet_history_date">12 Jan, 2023</td>
//!     <td class="wallet_history_description">Portal 2</td>
//!     <td class="wallet_history_type">Purchase\n\tPayPal</td>
//!     <td class="wallet_history_total">CHF 10.00</td>
//!     <td class="wallet_history_amount">-CHF 2,30</td>
//!   </tr>

use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

/// Cell texts of one history row, trimmed but otherwise untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapedRow {
    pub date: String,
    /// Type cell; holds the payment method after a line break
    pub kind: String,
    pub description: String,
    pub change: String,
    pub total: String,
}

struct RowSelectors {
    rows: [Selector; 3],
    date: [Selector; 2],
    description: [Selector; 2],
    kind: [Selector; 2],
    total: [Selector; 2],
    change: [Selector; 2],
}

fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("invalid wallet history selector")
}

fn selectors() -> &'static RowSelectors {
    static SEL: OnceLock<RowSelectors> = OnceLock::new();
    SEL.get_or_init(|| RowSelectors {
        rows: [
            sel(".wallet_history_row"),
            sel("table.wallet_history_table tr"),
            sel("table tr"),
        ],
        date: [sel(".wallet_history_date"), sel("td:nth-child(1)")],
        description: [sel(".wallet_history_description"), sel("td:nth-child(2)")],
        kind: [sel(".wallet_history_type"), sel("td:nth-child(3)")],
        total: [sel(".wallet_history_total"), sel("td:nth-child(4)")],
        change: [sel(".wallet_history_amount"), sel("td:nth-child(5)")],
    })
}

fn cell_text(row: ElementRef<'_>, candidates: &[Selector]) -> String {
    candidates
        .iter()
        .find_map(|s| row.select(s).next())
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Every complete history row on the page, in page order.
pub fn extract_rows(html: &str) -> Vec<ScrapedRow> {
    let doc = Html::parse_document(html);
    let sels = selectors();

    let rows: Vec<ElementRef<'_>> = sels
        .rows
        .iter()
        .map(|s| doc.select(s).collect::<Vec<_>>())
        .find(|found| !found.is_empty())
        .unwrap_or_default();

    if rows.is_empty() {
        tracing::warn!("no transaction rows found in page ({} bytes)", html.len());
        return Vec::new();
    }
    tracing::info!("found {} candidate rows", rows.len());

    let mut out = Vec::new();
    for row in rows {
        let scraped = ScrapedRow {
            date: cell_text(row, &sels.date),
            kind: cell_text(row, &sels.kind),
            description: cell_text(row, &sels.description),
            change: cell_text(row, &sels.change),
            total: cell_text(row, &sels.total),
        };

        if scraped.date.is_empty()
            || scraped.description.is_empty()
            || scraped.change.is_empty()
            || scraped.total.is_empty()
        {
            let text: String = row.text().collect();
            tracing::warn!("incomplete transaction row: {}", text.trim());
            continue;
        }

        tracing::debug!(
            "row: {} - {} - {} - {} - {}",
            scraped.date,
            scraped.kind,
            scraped.description,
            scraped.change,
            scraped.total
        );
        out.push(scraped);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_classed_rows() {
        let html = r#"
<table class="wallet_history_table">
  <tr class="wallet_history_row">
    <td class="wallet_history_date">12 Jan, 2023</td>
    <td class="wallet_history_description">Portal 2
        Valve</td>
    <td class="wallet_history_type">Purchase
	PayPal</td>
    <td class="wallet_history_total">CHF 10.00</td>
    <td class="wallet_history_amount">-CHF 2,30</td>
  </tr>
  <tr class="wallet_history_row">
    <td class="wallet_history_date">13 Jan, 2023</td>
    <td class="wallet_history_description"></td>
    <td class="wallet_history_type">Gift</td>
    <td class="wallet_history_total">CHF 10.00</td>
    <td class="wallet_history_amount">CHF 1.00</td>
  </tr>
</table>"#;
        let rows = extract_rows(html);
        assert_eq!(rows.len(), 1, "row without description is dropped");
        assert_eq!(rows[0].date, "12 Jan, 2023");
        assert!(rows[0].description.starts_with("Portal 2\n"));
        assert_eq!(rows[0].kind, "Purchase\n\tPayPal");
        assert_eq!(rows[0].change, "-CHF 2,30");
        assert_eq!(rows[0].total, "CHF 10.00");
    }

    #[test]
    fn test_positional_fallback() {
        let html = r#"
<table>
  <tr><th>Date</th><th>Items</th><th>Type</th><th>Total</th><th>Change</th></tr>
  <tr><td>1 Feb, 2023</td><td>Half-Life</td><td>Purchase</td><td>CHF 5.00</td><td>-CHF 9.90</td></tr>
</table>"#;
        let rows = extract_rows(html);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "Half-Life");
        assert_eq!(rows[0].change, "-CHF 9.90");
    }

    #[test]
    fn test_no_rows() {
        assert!(extract_rows("<html><body><p>Sign in</p></body></html>").is_empty());
    }
}
