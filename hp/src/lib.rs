//! HaulPlan - Hours-of-Service compliant trip planning
//!
//! Given a start location, pickup, dropoff and the hours a driver has
//! already used in the rolling 70-hour cycle, HaulPlan routes the trip,
//! derives the mandated break/rest/fuel stops and produces one duty-status
//! log sheet per trip day.
//!
//! # Core Concepts
//!
//! - **Pure planning core**: required-stop counts, stop sequencing and log
//!   sheet generation are deterministic functions with no I/O
//! - **Collaborators behind traits**: road routing is a [`routing::RouteProvider`],
//!   persistence is the [`state::StateManager`] actor owning a TripStore
//! - **All-or-nothing trips**: a routing or persistence failure after the
//!   trip record exists rolls the whole trip back
//!
//! # Modules
//!
//! - [`domain`] - Trip, PlannedStop, LogSheet records and route types
//! - [`hos`] - the HOS compliance calculator
//! - [`routing`] - route provider trait and implementations
//! - [`state`] - persistence actor over TripStore
//! - [`validation`] - trip request input contract
//! - [`planner`] - orchestration of the above into one plan call
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod config;
pub mod domain;
pub mod hos;
pub mod planner;
pub mod routing;
pub mod state;
pub mod validation;

// Re-export commonly used types
pub use config::{Config, PlannerConfig, RoutingConfig, StorageConfig};
pub use domain::{
    DutyActivity, DutyStatus, LogSheet, PlannedStop, RouteSummary, StopKind, Trip, Waypoint, WaypointRole,
};
pub use hos::{HosError, RequiredStopCounts, ScheduleStrategy, required_stops};
pub use planner::{PlanError, TripPlan, TripPlanner};
pub use routing::{RouteProvider, RoutingError, create_provider};
pub use state::{StateCommand, StateError, StateManager, StateResponse};
pub use validation::{FieldError, TripRequest};
