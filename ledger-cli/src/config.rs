use anyhow::{Context, Result, bail};
use ledger_core::{DEFAULT_CURRENCY, DEFAULT_TOP_N};
use ledger_ingest::collect::CollectorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "steam-ledger.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub files: FilesSection,
    pub analysis: AnalysisSection,
    pub collector: CollectorSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesSection {
    /// Table written by `collect` and read by `analyze`
    pub history: PathBuf,
    pub spreadsheet: PathBuf,
    pub report: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSection {
    pub currency: String,
    pub top_n: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorSection {
    pub login_settle_secs: u64,
    pub table_timeout_secs: u64,
    pub load_more_timeout_secs: u64,
    pub load_more_settle_secs: u64,
    pub poll_interval_ms: u64,
    pub max_expansions: usize,
}

impl Default for FilesSection {
    fn default() -> Self {
        Self {
            history: PathBuf::from("steam_wallet_transactions.csv"),
            spreadsheet: PathBuf::from("steam_expenses.xlsx"),
            report: PathBuf::from("steam_analysis.txt"),
        }
    }
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl Default for CollectorSection {
    fn default() -> Self {
        let d = CollectorConfig::default();
        Self {
            login_settle_secs: d.login_settle.as_secs(),
            table_timeout_secs: d.table_timeout.as_secs(),
            load_more_timeout_secs: d.load_more_timeout.as_secs(),
            load_more_settle_secs: d.load_more_settle.as_secs(),
            poll_interval_ms: d.poll_interval.as_millis() as u64,
            max_expansions: d.max_expansions,
        }
    }
}

impl CollectorSection {
    pub fn to_collector_config(&self) -> CollectorConfig {
        CollectorConfig {
            login_settle: Duration::from_secs(self.login_settle_secs),
            table_timeout: Duration::from_secs(self.table_timeout_secs),
            load_more_timeout: Duration::from_secs(self.load_more_timeout_secs),
            load_more_settle: Duration::from_secs(self.load_more_settle_secs),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            max_expansions: self.max_expansions,
        }
    }
}

/// Load the config. An explicit path must exist; the default file in the
/// working directory is optional.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let p = match explicit {
        Some(p) => {
            if !p.exists() {
                bail!("config not found: {}", p.display());
            }
            p.to_path_buf()
        }
        None => {
            let p = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !p.exists() {
                return Ok(Config::default());
            }
            p
        }
    };
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    let cfg: Config = toml::from_str(s)?;
    if cfg.analysis.currency.trim().is_empty() {
        bail!("analysis.currency must not be empty");
    }
    Ok(cfg)
}
