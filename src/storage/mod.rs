//! Storage Layer
//!
//! Persistence of quotes in SQLite plus CSV import/export.

pub mod database;
pub mod error;
pub mod quotes;
pub mod selection;
pub mod transfer;

pub use database::QuoteStore;
pub use error::StoreError;
pub use quotes::Quote;

use anyhow::Result;
use std::path::PathBuf;

/// Database file name inside the data directory
pub const DATABASE_FILE: &str = "quotes.db";

fn project_dirs() -> Result<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "dailyquotes", "DailyQuotes")
        .ok_or_else(|| anyhow::anyhow!("Could not determine application directories"))
}

/// Get the application data directory
pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = project_dirs()?.data_dir().to_path_buf();
    std::fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = project_dirs()?.config_dir().to_path_buf();
    std::fs::create_dir_all(&config_dir)?;

    Ok(config_dir)
}

/// Default location of the quotes database
pub fn default_database_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join(DATABASE_FILE))
}
