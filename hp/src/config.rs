//! HaulPlan configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main HaulPlan configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Route provider configuration
    pub routing: RoutingConfig,

    /// Planner behavior configuration
    pub planner: PlannerConfig,

    /// Storage configuration
    pub storage: StorageConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Checks that required environment variables are set. Call this early
    /// in startup to fail fast with clear error messages.
    pub fn validate(&self) -> Result<()> {
        // The fixture provider needs no credentials
        if self.routing.provider != "fixture" && std::env::var(&self.routing.api_key_env).is_err() {
            return Err(eyre::eyre!(
                "Routing API key not found. Set the {} environment variable.",
                self.routing.api_key_env
            ));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .haulplan.yml
        let local_config = PathBuf::from(".haulplan.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/haulplan/haulplan.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("haulplan").join("haulplan.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Route provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Provider name ("openrouteservice" or "fixture")
    pub provider: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl RoutingConfig {
    /// Read the API key from the configured environment variable
    pub fn get_api_key(&self) -> Result<String> {
        std::env::var(&self.api_key_env).map_err(|_| {
            eyre::eyre!(
                "API key environment variable {} is not set",
                self.api_key_env
            )
        })
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            provider: "openrouteservice".to_string(),
            api_key_env: "OPENROUTE_API_KEY".to_string(),
            base_url: "https://api.openrouteservice.org".to_string(),
            timeout_ms: 30_000,
        }
    }
}

/// Planner behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Schedule strategy for daily activities (currently only "templated")
    pub strategy: String,

    /// Insert fueling stops along the route
    #[serde(rename = "fuel-stops")]
    pub fuel_stops: bool,

    /// Miles between fueling stops
    #[serde(rename = "fuel-interval-miles")]
    pub fuel_interval_miles: f64,

    /// Average speed used to place fuel stops on the trip clock
    #[serde(rename = "average-speed-mph")]
    pub average_speed_mph: f64,

    /// Carrier name printed on log sheets
    pub carrier: String,

    /// Shipping document reference printed on log sheets
    #[serde(rename = "shipping-documents")]
    pub shipping_documents: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            strategy: "templated".to_string(),
            fuel_stops: false,
            fuel_interval_miles: 500.0,
            average_speed_mph: 55.0,
            carrier: "ABC Trucking Co.".to_string(),
            shipping_documents: "BOL #12345".to_string(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for TripStore data
    #[serde(rename = "store-dir")]
    pub store_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        // Use XDG data directory (~/.local/share/haulplan on Linux)
        let store_dir = dirs::data_dir()
            .map(|d| d.join("haulplan"))
            .unwrap_or_else(|| PathBuf::from(".tripstore"))
            .to_string_lossy()
            .into_owned();

        Self { store_dir }
    }
}
