use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ledger_core::{AmountNormalizer, Analysis, Diagnostic, ExpenseExport, Summary};
use ledger_ingest::collect::{
    Collector, SavedPage, SystemClock, TotalParser, save_history, to_table_row,
};
use ledger_ingest::load_history;
use ledger_report::{save_report, save_workbook};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod operator;

use config::{Config, load_config};
use operator::ConsoleOperator;

#[derive(Parser, Debug)]
#[command(name = "steam-ledger", version, about = "Steam wallet history analysis")]
struct Cli {
    /// Config file (default: ./steam-ledger.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape a saved wallet history page into the history table
    Collect {
        /// HTML of the history page, saved after loading every row
        #[arg(long)]
        html: PathBuf,

        /// Output table (default from config)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Summarize the history table and write the spreadsheet and report
    Analyze {
        /// History table (default from config)
        #[arg(long)]
        csv: Option<PathBuf>,

        #[arg(long)]
        xlsx: Option<PathBuf>,

        #[arg(long)]
        report: Option<PathBuf>,

        /// Print the summary as JSON instead of the report text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}=info,ledger_core=info,ledger_ingest=info,ledger_report=info",
                    env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Collect { html, out } => {
            let out = out.unwrap_or_else(|| cfg.files.history.clone());
            collect(&cfg, &html, &out)?;
        }
        Command::Analyze {
            csv,
            xlsx,
            report,
            json,
        } => {
            let csv = csv.unwrap_or_else(|| cfg.files.history.clone());
            let xlsx = xlsx.unwrap_or_else(|| cfg.files.spreadsheet.clone());
            let report = report.unwrap_or_else(|| cfg.files.report.clone());
            analyze(&cfg, &csv, &xlsx, &report, json)?;
        }
    }

    Ok(())
}

fn collect(cfg: &Config, html: &Path, out: &Path) -> Result<()> {
    let mut page = SavedPage::open(html)?;
    let collector = Collector::new(cfg.collector.to_collector_config());
    let scraped = collector.run(&mut page, &mut ConsoleOperator, &SystemClock::default())?;

    let totals = TotalParser::new(&cfg.analysis.currency)?;
    let rows: Vec<_> = scraped.iter().map(|r| to_table_row(r, &totals)).collect();
    save_history(out, &rows)?;

    println!("Saved {} transactions to {}", rows.len(), out.display());
    Ok(())
}

#[derive(Serialize)]
struct AnalyzeOutput<'a> {
    summary: &'a Summary,
    market_balance: f64,
    total_spent: f64,
    net_balance: f64,
    expense_export_total: f64,
    diagnostics: &'a [Diagnostic],
}

impl<'a> AnalyzeOutput<'a> {
    fn new(analysis: &'a Analysis<'_>, export: &ExpenseExport<'_>, diagnostics: &'a [Diagnostic]) -> Self {
        let summary = &analysis.summary;
        Self {
            summary,
            market_balance: summary.market_balance(),
            total_spent: summary.total_spent(),
            net_balance: summary.net_balance(),
            expense_export_total: export.total,
            diagnostics,
        }
    }
}

fn analyze(cfg: &Config, csv: &Path, xlsx: &Path, report: &Path, json: bool) -> Result<()> {
    let amounts = AmountNormalizer::new(cfg.analysis.currency.as_str());
    let history = load_history(csv, &amounts)
        .with_context(|| format!("loading history {}", csv.display()))?;
    let txns = &history.transactions;

    let export = ExpenseExport::build(txns);
    let analysis = Analysis::new(txns, amounts.currency(), cfg.analysis.top_n);
    let text = analysis.render();

    save_workbook(xlsx, &export, amounts.currency())?;
    save_report(report, &text)?;

    if json {
        let out = AnalyzeOutput::new(&analysis, &export, &history.diagnostics);
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{text}");
        println!("\nExpenses have been saved to '{}'", xlsx.display());
        println!("Analysis has been saved to '{}'", report.display());
    }
    Ok(())
}
