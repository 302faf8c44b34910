//! Daily Quotes - a motivational quote of the day
//!
//! Shows one quote per day from a local SQLite library and lets the user
//! add, edit, delete, search, import and export quotes.

mod config;
mod dashboard;
mod storage;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::{AppConfig, ThemeMode};
use crate::storage::transfer::{export_csv, import_csv};
use crate::storage::QuoteStore;

/// Daily Quotes - motivational quote of the day
#[derive(Parser, Debug)]
#[command(name = "daily-quotes")]
#[command(about = "Browse and manage a local library of motivational quotes")]
struct Args {
    /// Quote database file (overrides the configured path)
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Theme for this session
    #[arg(short, long, value_enum)]
    theme: Option<ThemeMode>,

    /// Print all quotes and exit
    #[arg(long)]
    list: bool,

    /// Export all quotes to a CSV file and exit
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,

    /// Import quotes from a CSV file and exit
    #[arg(long, value_name = "PATH")]
    import: Option<PathBuf>,
}

impl Args {
    fn is_headless(&self) -> bool {
        self.list || self.export.is_some() || self.import.is_some()
    }
}

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let config_path = config_file_path();
    let mut config = load_or_create_config(config_path.as_deref());
    if let Some(theme) = args.theme {
        config.appearance.theme = theme;
    }

    let database_path = match args.database.clone().or_else(|| config.general.database_path.clone()) {
        Some(path) => path,
        None => storage::default_database_path()?,
    };
    let store = QuoteStore::new(database_path).with_seed_samples(config.general.seed_samples);
    info!("Using quote database {:?}", store.path());

    if args.is_headless() {
        store
            .initialize()
            .with_context(|| format!("Failed to open {}", store.path().display()))?;
        return run_headless(&args, &store);
    }

    // The dashboard reports an unusable database itself
    if let Err(e) = store.initialize() {
        error!("Quote store initialization failed: {}", e);
    }

    if let Err(e) = dashboard::run_dashboard(store, config, config_path) {
        error!("Dashboard error: {}", e);
    }

    info!("Daily Quotes shutdown complete");

    Ok(())
}

/// Run the command line operations selected in `args`
fn run_headless(args: &Args, store: &QuoteStore) -> Result<()> {
    if let Some(path) = &args.import {
        let summary = import_csv(store, path)?;
        println!(
            "Imported {} quotes from {} ({} skipped)",
            summary.imported,
            path.display(),
            summary.skipped
        );
    }

    if let Some(path) = &args.export {
        let count = export_csv(store, path)?;
        println!("Exported {} quotes to {}", count, path.display());
    }

    if args.list {
        let quotes = store.list_all()?;
        if quotes.is_empty() {
            println!("There are no quotes in the database.");
        }
        for quote in &quotes {
            println!("[{}] {} — {}", quote.id, quote.text, quote.author_or_unknown());
        }
    }

    Ok(())
}

/// Location of the config file, if a config directory is available
fn config_file_path() -> Option<PathBuf> {
    match storage::get_config_dir() {
        Ok(dir) => Some(dir.join(config::CONFIG_FILE)),
        Err(e) => {
            error!("No configuration directory: {}", e);
            None
        }
    }
}

/// Load configuration from file or create default
fn load_or_create_config(path: Option<&Path>) -> AppConfig {
    if let Some(path) = path {
        if path.exists() {
            match config::load_config(path) {
                Ok(config) => {
                    info!("Loaded configuration from {:?}", path);
                    return config;
                }
                Err(e) => error!("Ignoring unreadable configuration {:?}: {}", path, e),
            }
        }
    }
    info!("Using default configuration");
    AppConfig::default()
}
