use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::store::StoreOptions;

const CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "POCKETLEDGER";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Backend {
    Sqlite,
    Json,
    /// Nothing is kept between runs.
    Memory,
}

#[derive(Debug, Parser)]
#[command(name = "pocketledger", version, about = "Local-only expense and budget tracker")]
pub(crate) struct Cli {
    /// Config file path (TOML). Defaults to config.toml in the data directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Directory holding the ledger.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
    /// Storage backend.
    #[arg(long, global = true, value_enum)]
    pub backend: Option<Backend>,
    /// Start with an empty ledger instead of demo data on first run.
    #[arg(long, global = true)]
    pub no_seed: bool,
    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Default, Subcommand)]
pub(crate) enum Command {
    /// Totals, budget status and recent transactions (default)
    #[default]
    Summary,
    /// List transactions, most recent first
    List {
        /// Maximum number of rows
        #[arg(long, short = 'n', default_value_t = 20)]
        limit: usize,
        /// Only show one type (expense or income)
        #[arg(long = "type", short = 't')]
        kind: Option<String>,
    },
    /// Record a transaction dated now
    Add {
        amount: String,
        category: String,
        /// expense or income
        #[arg(long = "type", short = 't', default_value = "expense")]
        kind: String,
        #[arg(long)]
        note: Option<String>,
    },
    /// Delete a transaction by id
    Delete { id: String },
    /// Show the monthly budget, or set it
    Budget { amount: Option<String> },
    /// Spending by category, by period, and the recent daily trend
    Report {
        /// daily, weekly or monthly
        #[arg(long, default_value = "weekly")]
        by: String,
        /// Days in the trend window
        #[arg(
            long,
            default_value_t = crate::stats::DEFAULT_TREND_DAYS,
            value_parser = clap::value_parser!(u32).range(1..=i64::from(crate::stats::MAX_TREND_DAYS))
        )]
        days: u32,
    },
    /// List categories with their colors
    Categories,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Settings {
    pub backend: Backend,
    pub data_dir: Option<PathBuf>,
    pub seed_demo_data: bool,
    pub log_level: String,
    pub default_budget: Decimal,
}

impl Settings {
    /// Defaults, then the TOML file, then `POCKETLEDGER_*` environment
    /// variables, then command-line flags.
    pub(crate) fn load(cli: &Cli) -> Result<Self> {
        let config_path = match (&cli.config, &cli.data_dir) {
            (Some(path), _) => path.clone(),
            (None, Some(dir)) => dir.join(CONFIG_FILE),
            (None, None) => default_data_dir()?.join(CONFIG_FILE),
        };

        let mut settings: Settings = config::Config::builder()
            .set_default("backend", "sqlite")?
            .set_default("seed_demo_data", true)?
            .set_default("log_level", "warn")?
            .set_default("default_budget", 2000_i64)?
            .add_source(config::File::from(config_path.as_path()).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .with_context(|| format!("Failed to read settings from {}", config_path.display()))?
            .try_deserialize()
            .context("Invalid settings")?;

        if let Some(dir) = &cli.data_dir {
            settings.data_dir = Some(dir.clone());
        }
        if let Some(backend) = cli.backend {
            settings.backend = backend;
        }
        if cli.no_seed {
            settings.seed_demo_data = false;
        }
        if let Some(level) = &cli.log_level {
            settings.log_level = level.clone();
        }

        Ok(settings)
    }

    pub(crate) fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }

    pub(crate) fn store_options(&self) -> StoreOptions {
        StoreOptions {
            seed_demo_data: self.seed_demo_data,
            default_budget: self.default_budget,
        }
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "pocketledger", "PocketLedger")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use rust_decimal_macros::dec;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("pocketledger").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_without_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let cli = parse(&["--data-dir", dir.path().to_str().unwrap()]);
        let settings = Settings::load(&cli).unwrap();
        assert_eq!(settings.backend, Backend::Sqlite);
        assert!(settings.seed_demo_data);
        assert_eq!(settings.default_budget, dec!(2000));
        assert_eq!(settings.data_dir().unwrap(), dir.path());
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_config_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "backend = \"json\"\nseed_demo_data = false\ndefault_budget = 1500.5\nlog_level = \"info\"\n",
        )
        .unwrap();

        let cli = parse(&["--data-dir", dir.path().to_str().unwrap()]);
        let settings = Settings::load(&cli).unwrap();
        assert_eq!(settings.backend, Backend::Json);
        assert!(!settings.seed_demo_data);
        assert_eq!(settings.default_budget, dec!(1500.5));
        assert_eq!(settings.log_level, "info");

        let cli = parse(&[
            "--data-dir",
            dir.path().to_str().unwrap(),
            "--backend",
            "sqlite",
            "--log-level",
            "debug",
        ]);
        let settings = Settings::load(&cli).unwrap();
        assert_eq!(settings.backend, Backend::Sqlite);
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn test_store_options_follow_settings() {
        let dir = tempfile::tempdir().unwrap();
        let cli = parse(&["--data-dir", dir.path().to_str().unwrap(), "--no-seed"]);
        let options = Settings::load(&cli).unwrap().store_options();
        assert!(!options.seed_demo_data);
        assert_eq!(options.default_budget, dec!(2000));
    }

    #[test]
    fn test_report_days_bounds() {
        match parse(&["report", "--days", "30"]).command {
            Some(Command::Report { days, .. }) => assert_eq!(days, 30),
            other => panic!("unexpected command: {other:?}"),
        }
        let argv = |days: &'static str| ["pocketledger", "report", "--days", days];
        assert!(Cli::try_parse_from(argv("200000000")).is_err());
        assert!(Cli::try_parse_from(argv("3661")).is_err());
        assert!(Cli::try_parse_from(argv("0")).is_err());
        assert!(Cli::try_parse_from(argv("3660")).is_ok());
    }

    #[test]
    fn test_parse_add_command() {
        let cli = parse(&["add", "45.99", "food", "--note", "Lunch"]);
        match cli.command {
            Some(Command::Add {
                amount,
                category,
                kind,
                note,
            }) => {
                assert_eq!(amount, "45.99");
                assert_eq!(category, "food");
                assert_eq!(kind, "expense");
                assert_eq!(note.as_deref(), Some("Lunch"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
