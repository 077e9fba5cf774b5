//! CLI argument parsing for tripstore

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ts")]
#[command(author, version, about = "Inspect JSONL trip record collections", long_about = None)]
pub struct Cli {
    /// Path to the store directory (default: platform data dir)
    #[arg(short, long)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List collections in the store
    Collections,

    /// Dump records of a collection as JSON lines
    Dump {
        /// Collection name (e.g. trips, stops, log_sheets)
        #[arg(required = true)]
        collection: String,
    },

    /// Show per-collection record counts and file sizes
    Stats,

    /// Delete one record from a collection by id
    Remove {
        /// Collection name
        #[arg(required = true)]
        collection: String,

        /// Record id to delete
        #[arg(required = true)]
        id: String,
    },
}
