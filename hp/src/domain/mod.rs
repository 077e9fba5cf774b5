//! Domain types for HaulPlan
//!
//! Persisted records: Trip, PlannedStop, LogSheet.
//! All implement the Record trait for TripStore persistence.
//! Route types are transient collaborator output and are never stored.

mod id;
mod logsheet;
mod route;
mod stop;
mod trip;

pub use id::{generate_id, id_matches};
pub use logsheet::{DutyActivity, DutyStatus, LogSheet};
pub use route::{RouteSummary, Waypoint, WaypointRole};
pub use stop::{PlannedStop, StopKind};
pub use trip::Trip;

// Re-export tripstore types for convenience
pub use tripstore::{Filter, FilterOp, IndexValue, Record, Store};
