mod models;
mod run;
mod settings;
mod stats;
mod storage;
mod store;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use settings::{Backend, Cli, Settings};
use storage::{JsonFileStorage, MemoryStorage, SqliteStorage, Storage};
use store::{ExpenseStore, LoadSource};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(&cli)?;
    init_tracing(&settings.log_level);

    let storage = open_storage(&settings)?;
    let (mut store, loaded) = ExpenseStore::open(storage, settings.store_options());
    match loaded {
        Ok(committed) => {
            if committed.value == LoadSource::Seeded {
                eprintln!("No saved data found; loaded a sample ledger. Delete entries or run with --no-seed.");
            }
            if let Some(err) = committed.persistence.error() {
                eprintln!("Warning: {err}. Changes are kept for this session only.");
            }
        }
        Err(err) => eprintln!("Error: {err}. Starting with an empty ledger."),
    }
    tracing::debug!(
        state = ?store.state(),
        transactions = store.transactions().len(),
        "store ready"
    );

    run::as_cli(cli.command.unwrap_or_default(), &mut store)
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pocketledger={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_storage(settings: &Settings) -> Result<Box<dyn Storage>> {
    let data_dir = settings.data_dir()?;
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

    let storage: Box<dyn Storage> = match settings.backend {
        Backend::Sqlite => {
            let path = data_dir.join("pocketledger.db");
            Box::new(
                SqliteStorage::open(&path)
                    .with_context(|| format!("Failed to open database: {}", path.display()))?,
            )
        }
        Backend::Json => {
            let storage = JsonFileStorage::new(&data_dir);
            tracing::debug!(dir = %storage.dir().display(), "using json file storage");
            Box::new(storage)
        }
        Backend::Memory => Box::new(MemoryStorage::default()),
    };
    Ok(storage)
}
