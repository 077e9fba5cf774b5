//! Trip aggregate record
//!
//! A Trip captures one planning request and its routing result. Distance
//! and drive time stay unset until routing succeeds; a trip whose children
//! failed to persist is deleted, never left partial.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tripstore::{IndexValue, Record, now_ms};

use super::id::generate_id;

/// A planned trip from the driver's current position through pickup to dropoff
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    /// Unique identifier
    pub id: String,

    /// Where the driver currently is
    pub current_location: String,

    /// Cargo pickup location
    pub pickup_location: String,

    /// Cargo dropoff location
    pub dropoff_location: String,

    /// Hours already used in the rolling 70-hour/8-day cycle
    pub current_cycle_hours: f64,

    /// Route distance in miles, set once routing succeeds
    pub total_distance: Option<f64>,

    /// Route drive time in hours, set once routing succeeds
    pub total_drive_time: Option<f64>,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,

    /// Last update timestamp (Unix milliseconds)
    pub updated_at: i64,
}

impl Trip {
    /// Create a new Trip with generated ID
    pub fn new(
        current_location: impl Into<String>,
        pickup_location: impl Into<String>,
        dropoff_location: impl Into<String>,
        current_cycle_hours: f64,
    ) -> Self {
        let current_location = current_location.into();
        let pickup_location = pickup_location.into();
        let dropoff_location = dropoff_location.into();
        let now = now_ms();
        Self {
            id: generate_id("trip", &format!("{} to {}", pickup_location, dropoff_location)),
            current_location,
            pickup_location,
            dropoff_location,
            current_cycle_hours,
            total_distance: None,
            total_drive_time: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a Trip with a specific ID (for testing or recovery)
    pub fn with_id(
        id: impl Into<String>,
        current_location: impl Into<String>,
        pickup_location: impl Into<String>,
        dropoff_location: impl Into<String>,
        current_cycle_hours: f64,
    ) -> Self {
        let now = now_ms();
        Self {
            id: id.into(),
            current_location: current_location.into(),
            pickup_location: pickup_location.into(),
            dropoff_location: dropoff_location.into(),
            current_cycle_hours,
            total_distance: None,
            total_drive_time: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record the routing result
    pub fn set_route_totals(&mut self, distance_miles: f64, drive_time_hours: f64) {
        self.total_distance = Some(distance_miles);
        self.total_drive_time = Some(drive_time_hours);
        self.updated_at = now_ms();
    }

    /// Whether routing has populated this trip
    pub fn is_routed(&self) -> bool {
        self.total_distance.is_some() && self.total_drive_time.is_some()
    }
}

impl Record for Trip {
    fn id(&self) -> &str {
        &self.id
    }

    fn updated_at(&self) -> i64 {
        self.updated_at
    }

    fn collection_name() -> &'static str {
        "trips"
    }

    fn indexed_fields(&self) -> HashMap<String, IndexValue> {
        let mut fields = HashMap::new();
        fields.insert(
            "dropoff".to_string(),
            IndexValue::String(self.dropoff_location.clone()),
        );
        fields
    }
}
