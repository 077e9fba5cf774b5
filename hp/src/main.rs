//! HaulPlan - HOS-compliant trip planning
//!
//! CLI entry point for planning trips and inspecting persisted plans.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::info;

use haulplan::cli::{Cli, Command, OutputFormat};
use haulplan::config::Config;
use haulplan::planner::{TripPlan, TripPlanner};
use haulplan::routing::create_provider;
use haulplan::state::StateManager;
use haulplan::validation::TripRequest;

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("haulplan")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Setup tracing subscriber - write to log file, not stdout/stderr
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("haulplan.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.validate()?;

    info!(
        "HaulPlan loaded config: provider={}, strategy={}",
        config.routing.provider, config.planner.strategy
    );

    let planner = build_planner(&config)?;

    match cli.command {
        Command::Plan {
            from,
            pickup,
            dropoff,
            cycle_hours,
            format,
        } => cmd_plan(&planner, &from, &pickup, &dropoff, cycle_hours, format).await,
        Command::Trips { format } => cmd_trips(&planner, format).await,
        Command::Show { trip_id, format } => cmd_show(&planner, &trip_id, format).await,
        Command::Delete { trip_id } => cmd_delete(&planner, &trip_id).await,
    }
}

fn build_planner(config: &Config) -> Result<TripPlanner> {
    let provider = create_provider(&config.routing).map_err(|e| eyre::eyre!(e.to_string()))?;
    let state = StateManager::spawn(&config.storage.store_dir)?;
    TripPlanner::from_config(provider, state, &config.planner).map_err(|e| eyre::eyre!(e.to_string()))
}

/// Plan a trip and render the result
async fn cmd_plan(
    planner: &TripPlanner,
    from: &str,
    pickup: &str,
    dropoff: &str,
    cycle_hours: f64,
    format: OutputFormat,
) -> Result<()> {
    let request = TripRequest::new(from, pickup, dropoff, cycle_hours);

    let plan = match planner.plan_trip(&request).await {
        Ok(plan) => plan,
        Err(e) => {
            // Field-level errors are worth itemizing for the caller
            if let Some(fields) = e.field_errors() {
                eprintln!("{} Invalid trip request:", "✗".red());
                for field in fields {
                    eprintln!("  {}: {}", field.field.yellow(), field.message);
                }
                std::process::exit(1);
            }
            return Err(eyre::eyre!(e.to_string()));
        }
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
        OutputFormat::Text => render_plan(&plan),
    }
    Ok(())
}

/// List persisted trips
async fn cmd_trips(planner: &TripPlanner, format: OutputFormat) -> Result<()> {
    let trips = planner.list_trips().await.map_err(|e| eyre::eyre!(e.to_string()))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&trips)?),
        OutputFormat::Text => {
            if trips.is_empty() {
                println!("No trips found");
                return Ok(());
            }
            for trip in trips {
                let totals = match (trip.total_distance, trip.total_drive_time) {
                    (Some(d), Some(t)) => format!("{:.0} mi, {:.1} h", d, t),
                    _ => "unrouted".to_string(),
                };
                println!(
                    "{}  {} -> {}  ({})",
                    trip.id.cyan(),
                    trip.pickup_location,
                    trip.dropoff_location,
                    totals.dimmed()
                );
            }
        }
    }
    Ok(())
}

/// Show one trip with its stops and log sheets
async fn cmd_show(planner: &TripPlanner, trip_ref: &str, format: OutputFormat) -> Result<()> {
    let trip_id = planner
        .resolve_trip_id(trip_ref)
        .await
        .map_err(|e| eyre::eyre!(e.to_string()))?;
    let plan = planner.load_trip(&trip_id).await.map_err(|e| eyre::eyre!(e.to_string()))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
        OutputFormat::Text => render_plan(&plan),
    }
    Ok(())
}

/// Delete a trip and everything it owns
async fn cmd_delete(planner: &TripPlanner, trip_ref: &str) -> Result<()> {
    let trip_id = planner
        .resolve_trip_id(trip_ref)
        .await
        .map_err(|e| eyre::eyre!(e.to_string()))?;
    planner.delete_trip(&trip_id).await.map_err(|e| eyre::eyre!(e.to_string()))?;
    println!("{} Deleted trip: {}", "✓".green(), trip_id);
    Ok(())
}

fn render_plan(plan: &TripPlan) {
    let trip = &plan.trip;
    println!("{}", "Trip".bold());
    println!("  ID:        {}", trip.id.cyan());
    println!("  Route:     {} -> {} -> {}", trip.current_location, trip.pickup_location, trip.dropoff_location);
    if let (Some(distance), Some(drive_time)) = (trip.total_distance, trip.total_drive_time) {
        println!("  Distance:  {:.0} miles", distance);
        println!("  Driving:   {:.1} hours", drive_time);
    }
    println!("  Cycle:     {:.1} hours used of 70", trip.current_cycle_hours);
    println!(
        "  Required:  {} break(s), {} rest period(s)",
        plan.required.breaks, plan.required.rest_periods
    );

    println!();
    println!("{}", "Stops".bold());
    for stop in &plan.stops {
        println!(
            "  {}. {:<22} {:<9} {:>5.1}h  {}",
            stop.sequence + 1,
            stop.kind.to_string(),
            stop.arrival_time.yellow(),
            stop.duration_hours,
            stop.location
        );
    }

    for sheet in &plan.log_sheets {
        println!();
        println!(
            "{}  {} -> {}  ({} mi)  {}",
            sheet.date.bold(),
            sheet.from_location,
            sheet.to_location,
            sheet.total_miles,
            sheet.remarks.dimmed()
        );
        for activity in &sheet.activities {
            let label = if activity.remarks.is_empty() {
                activity.location.clone()
            } else {
                format!("{} - {}", activity.location, activity.remarks)
            };
            println!(
                "  {:>5.1} - {:>5.1}  {:<13} {}",
                activity.start_hours,
                activity.end_hours,
                activity.status.to_string(),
                label
            );
        }
    }
}
