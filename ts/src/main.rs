use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::path::PathBuf;

use tripstore::Store;
use tripstore::cli::{Cli, Command};

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();
    Ok(())
}

fn default_store_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("haulplan")
        .join("store")
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let store_dir = cli.store.unwrap_or_else(default_store_dir);

    info!("tripstore opening {}", store_dir.display());
    let mut store = Store::open(&store_dir).context("Failed to open store")?;

    match cli.command {
        Command::Collections => {
            let names = store.collection_names();
            if names.is_empty() {
                println!("No collections found");
            } else {
                for name in names {
                    println!("{}", name);
                }
            }
        }
        Command::Dump { collection } => {
            for value in store.raw_records(&collection) {
                println!("{}", serde_json::to_string(&value)?);
            }
        }
        Command::Stats => {
            println!("Store: {}", store_dir.display().to_string().cyan());
            for stat in store.stats()? {
                println!(
                    "  {}: {} records, {} bytes",
                    stat.name.yellow(),
                    stat.record_count,
                    stat.file_bytes
                );
            }
        }
        Command::Remove { collection, id } => {
            if store.delete_raw(&collection, &id)? {
                println!("{} Removed {}/{}", "✓".green(), collection, id);
            } else {
                println!("Record not found: {}/{}", collection, id);
            }
        }
    }

    Ok(())
}
