//! Planned stop record

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tripstore::{IndexValue, Record, now_ms};

use super::id::generate_id;
use crate::hos::format_clock_label;

/// Category of a planned stop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopKind {
    Pickup,
    Dropoff,
    Fueling,
    RequiredBreak,
    RequiredRestPeriod,
}

impl std::fmt::Display for StopKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pickup => write!(f, "Pickup"),
            Self::Dropoff => write!(f, "Dropoff"),
            Self::Fueling => write!(f, "Fueling"),
            Self::RequiredBreak => write!(f, "Required Break"),
            Self::RequiredRestPeriod => write!(f, "Required Rest Period"),
        }
    }
}

/// One stop in a trip's planned sequence, immutable once created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedStop {
    /// Unique identifier
    pub id: String,

    /// Parent trip ID
    pub trip: String,

    /// Stop location name
    pub location: String,

    /// Stop category
    pub kind: StopKind,

    /// Time spent at the stop, in hours
    pub duration_hours: f64,

    /// Arrival offset on the trip clock, in hours after midnight of day one
    pub arrival_hours: f64,

    /// Display label for the arrival time ("8:00 AM")
    pub arrival_time: String,

    /// Position in the stop sequence (0-based)
    pub sequence: u32,

    /// Interpolated latitude, when coordinates are known
    pub lat: Option<f64>,

    /// Interpolated longitude, when coordinates are known
    pub lon: Option<f64>,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,

    /// Last update timestamp (Unix milliseconds)
    pub updated_at: i64,
}

impl PlannedStop {
    /// Create a new stop; the arrival label is derived from `arrival_hours`
    pub fn new(
        trip: impl Into<String>,
        location: impl Into<String>,
        kind: StopKind,
        duration_hours: f64,
        arrival_hours: f64,
        sequence: u32,
    ) -> Self {
        let location = location.into();
        let now = now_ms();
        Self {
            id: generate_id("stop", &location),
            trip: trip.into(),
            location,
            kind,
            duration_hours,
            arrival_hours,
            arrival_time: format_clock_label(arrival_hours),
            sequence,
            lat: None,
            lon: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach interpolated coordinates
    pub fn with_coordinates(mut self, lat: f64, lon: f64) -> Self {
        self.lat = Some(lat);
        self.lon = Some(lon);
        self.updated_at = now_ms();
        self
    }
}

impl Record for PlannedStop {
    fn id(&self) -> &str {
        &self.id
    }

    fn updated_at(&self) -> i64 {
        self.updated_at
    }

    fn collection_name() -> &'static str {
        "stops"
    }

    fn indexed_fields(&self) -> HashMap<String, IndexValue> {
        let mut fields = HashMap::new();
        fields.insert("trip".to_string(), IndexValue::String(self.trip.clone()));
        fields.insert("kind".to_string(), IndexValue::String(format!("{:?}", self.kind)));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_new_derives_arrival_label() {
        let stop = PlannedStop::new("t-1", "Detroit, MI", StopKind::Pickup, 1.0, 8.0, 0);
        assert!(stop.id.contains("-stop-"));
        assert_eq!(stop.trip, "t-1");
        assert_eq!(stop.arrival_time, "8:00 AM");
        assert!(stop.lat.is_none());
    }

    #[test]
    fn test_stop_with_coordinates() {
        let stop = PlannedStop::new("t-1", "Stop 1", StopKind::RequiredBreak, 0.5, 12.5, 1)
            .with_coordinates(42.0, -83.5);
        assert_eq!(stop.lat, Some(42.0));
        assert_eq!(stop.lon, Some(-83.5));
        assert_eq!(stop.arrival_time, "12:30 PM");
    }

    #[test]
    fn test_stop_kind_labels() {
        assert_eq!(StopKind::RequiredBreak.to_string(), "Required Break");
        assert_eq!(StopKind::RequiredRestPeriod.to_string(), "Required Rest Period");
        assert_eq!(StopKind::Fueling.to_string(), "Fueling");
    }

    #[test]
    fn test_stop_kind_wire_names() {
        let json = serde_json::to_string(&StopKind::RequiredRestPeriod).unwrap();
        assert_eq!(json, "\"required_rest_period\"");
    }
}
