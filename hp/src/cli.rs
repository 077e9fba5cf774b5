//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// HaulPlan - HOS-compliant trip planning for truck drivers
#[derive(Parser)]
#[command(
    name = "hp",
    about = "Plan Hours-of-Service compliant trips with stops and daily log sheets",
    version,
    after_help = "Logs are written to: ~/.local/share/haulplan/logs/haulplan.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Plan a trip: route it, derive required stops and daily log sheets
    Plan {
        /// Driver's current location
        #[arg(long)]
        from: String,

        /// Cargo pickup location
        #[arg(long)]
        pickup: String,

        /// Cargo dropoff location
        #[arg(long)]
        dropoff: String,

        /// Hours already used in the rolling 70-hour cycle
        #[arg(long, default_value = "0")]
        cycle_hours: f64,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List persisted trips
    Trips {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a trip with its stops and log sheets
    Show {
        /// Trip ID, unique prefix, or slug fragment
        #[arg(value_name = "TRIP_ID")]
        trip_id: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Delete a trip and everything it owns
    Delete {
        /// Trip ID, unique prefix, or slug fragment
        #[arg(value_name = "TRIP_ID")]
        trip_id: String,
    },
}

/// Output format for display commands
#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}
