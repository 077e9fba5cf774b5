//! Fixture route provider
//!
//! A table of simulated city coordinates with a fixed distance and drive
//! time, for development and tests without an API key. The defaults
//! (473 miles, 8.6 hours) keep a trip under every HOS threshold except
//! the 8-hour break rule, which makes plans easy to eyeball.

use async_trait::async_trait;
use tracing::debug;

use super::{RouteProvider, RoutingError};
use crate::domain::{RouteSummary, Waypoint, WaypointRole};

/// Default fixture distance in miles
const DEFAULT_DISTANCE_MILES: f64 = 473.0;

/// Default fixture drive time in hours
const DEFAULT_DRIVE_TIME_HOURS: f64 = 8.6;

/// Simulated city table: name, lat, lon
const CITIES: &[(&str, f64, f64)] = &[
    ("Chicago, IL", 41.8781, -87.6298),
    ("Detroit, MI", 42.3314, -83.0458),
    ("Boston, MA", 42.3601, -71.0589),
    ("New York, NY", 40.7128, -74.0060),
    ("Philadelphia, PA", 39.9526, -75.1652),
    ("Cleveland, OH", 41.4993, -81.6944),
    ("Pittsburgh, PA", 40.4406, -79.9959),
    ("Indianapolis, IN", 39.7684, -86.1581),
    ("Columbus, OH", 39.9612, -82.9988),
    ("Milwaukee, WI", 43.0389, -87.9065),
];

/// Offline provider backed by the simulated city table
#[derive(Debug)]
pub struct FixtureRouteProvider {
    distance_miles: f64,
    drive_time_hours: f64,
}

impl FixtureRouteProvider {
    pub fn new() -> Self {
        Self {
            distance_miles: DEFAULT_DISTANCE_MILES,
            drive_time_hours: DEFAULT_DRIVE_TIME_HOURS,
        }
    }

    /// Override the fixed distance and drive time
    pub fn with_totals(distance_miles: f64, drive_time_hours: f64) -> Self {
        Self {
            distance_miles,
            drive_time_hours,
        }
    }

    fn lookup(&self, location: &str) -> Result<(f64, f64, String), RoutingError> {
        let wanted = location.trim().to_lowercase();
        CITIES
            .iter()
            .find(|(name, _, _)| {
                let name = name.to_lowercase();
                name == wanted || name.starts_with(wanted.trim_end_matches(|c: char| c == ','))
            })
            .map(|(name, lat, lon)| (*lat, *lon, name.to_string()))
            .ok_or_else(|| RoutingError::Geocoding {
                location: location.to_string(),
            })
    }
}

impl Default for FixtureRouteProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RouteProvider for FixtureRouteProvider {
    async fn route(&self, origin: &str, pickup: &str, dropoff: &str) -> Result<RouteSummary, RoutingError> {
        debug!(%origin, %pickup, %dropoff, "FixtureRouteProvider::route: called");

        let (origin_lat, origin_lon, origin_name) = self.lookup(origin)?;
        let (pickup_lat, pickup_lon, pickup_name) = self.lookup(pickup)?;
        let (dropoff_lat, dropoff_lon, dropoff_name) = self.lookup(dropoff)?;

        Ok(RouteSummary {
            total_distance_miles: self.distance_miles,
            total_drive_time_hours: self.drive_time_hours,
            waypoints: vec![
                Waypoint::new(origin_lat, origin_lon, origin_name, WaypointRole::Start),
                Waypoint::new(pickup_lat, pickup_lon, pickup_name, WaypointRole::Pickup),
                Waypoint::new(dropoff_lat, dropoff_lon, dropoff_name, WaypointRole::Dropoff),
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixture_routes_known_cities() {
        let provider = FixtureRouteProvider::new();
        let route = provider.route("Chicago, IL", "Detroit, MI", "Boston, MA").await.unwrap();

        assert_eq!(route.total_distance_miles, 473.0);
        assert_eq!(route.total_drive_time_hours, 8.6);
        assert_eq!(route.waypoints.len(), 3);
        assert_eq!(route.waypoints[0].name, "Chicago, IL");
        assert_eq!(route.waypoints[0].role, WaypointRole::Start);
        assert_eq!(route.waypoints[2].name, "Boston, MA");
        assert_eq!(route.waypoints[2].role, WaypointRole::Dropoff);
    }

    #[tokio::test]
    async fn test_fixture_lookup_is_case_insensitive() {
        let provider = FixtureRouteProvider::new();
        let route = provider.route("chicago, il", "DETROIT, MI", "boston, ma").await.unwrap();
        assert_eq!(route.waypoints[1].name, "Detroit, MI");
    }

    #[tokio::test]
    async fn test_fixture_unknown_city_is_geocoding_error() {
        let provider = FixtureRouteProvider::new();
        let result = provider.route("Chicago, IL", "Atlantis", "Boston, MA").await;
        match result {
            Err(RoutingError::Geocoding { location }) => assert_eq!(location, "Atlantis"),
            other => panic!("Expected geocoding error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_fixture_with_totals() {
        let provider = FixtureRouteProvider::with_totals(800.0, 14.0);
        let route = provider.route("Chicago, IL", "Detroit, MI", "Boston, MA").await.unwrap();
        assert_eq!(route.total_distance_miles, 800.0);
        assert_eq!(route.total_drive_time_hours, 14.0);
    }
}
