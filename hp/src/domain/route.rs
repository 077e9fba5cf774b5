//! Transient routing output types
//!
//! Produced by a route provider, consumed by the planning core. Not
//! persisted; the trip record keeps only the distance and drive-time totals.

use serde::{Deserialize, Serialize};

/// Role a waypoint plays in the routed trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaypointRole {
    Start,
    Pickup,
    Dropoff,
    Waypoint,
}

/// A named point on the routed path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Waypoint {
    pub lat: f64,
    pub lon: f64,
    pub name: String,
    pub role: WaypointRole,
}

impl Waypoint {
    pub fn new(lat: f64, lon: f64, name: impl Into<String>, role: WaypointRole) -> Self {
        Self {
            lat,
            lon,
            name: name.into(),
            role,
        }
    }
}

/// Summary of a routed trip as returned by a route provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Total route distance in miles
    pub total_distance_miles: f64,

    /// Total drive time in hours
    pub total_drive_time_hours: f64,

    /// Ordered waypoints from trip start to dropoff
    pub waypoints: Vec<Waypoint>,
}

impl RouteSummary {
    /// First waypoint of the route, if any
    pub fn start(&self) -> Option<&Waypoint> {
        self.waypoints.first()
    }

    /// Last waypoint of the route, if any
    pub fn end(&self) -> Option<&Waypoint> {
        self.waypoints.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_endpoints() {
        let route = RouteSummary {
            total_distance_miles: 800.0,
            total_drive_time_hours: 14.0,
            waypoints: vec![
                Waypoint::new(41.88, -87.63, "Chicago, IL", WaypointRole::Start),
                Waypoint::new(42.33, -83.05, "Detroit, MI", WaypointRole::Pickup),
                Waypoint::new(42.36, -71.06, "Boston, MA", WaypointRole::Dropoff),
            ],
        };
        assert_eq!(route.start().map(|w| w.name.as_str()), Some("Chicago, IL"));
        assert_eq!(route.end().map(|w| w.name.as_str()), Some("Boston, MA"));
    }

    #[test]
    fn test_waypoint_role_wire_names() {
        assert_eq!(serde_json::to_string(&WaypointRole::Start).unwrap(), "\"start\"");
        assert_eq!(serde_json::to_string(&WaypointRole::Waypoint).unwrap(), "\"waypoint\"");
    }
}
