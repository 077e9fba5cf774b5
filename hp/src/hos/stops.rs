//! Stop sequencing along a routed trip
//!
//! Planned stops are spaced by fractional trip progress, not road
//! geometry: intermediate stops sit at evenly spaced positions between
//! the start and end waypoints, with coordinates linearly interpolated.

use tracing::debug;

use super::clock::TRIP_START_HOUR;
use super::rules::{BREAK_DURATION_HOURS, REST_DURATION_HOURS, RequiredStopCounts};
use crate::domain::{PlannedStop, RouteSummary, StopKind};

/// Time spent loading at the pickup stop
pub const PICKUP_DURATION_HOURS: f64 = 1.0;

/// Time spent unloading at the dropoff stop
pub const DROPOFF_DURATION_HOURS: f64 = 1.0;

/// Time spent at a fueling stop
pub const FUEL_DURATION_HOURS: f64 = 0.5;

/// Knobs for the stop planning pass
#[derive(Debug, Clone)]
pub struct StopOptions {
    /// Insert fueling stops along the route
    pub fuel_stops: bool,

    /// Miles between fueling stops
    pub fuel_interval_miles: f64,

    /// Average speed used to place fuel stops on the trip clock
    pub average_speed_mph: f64,
}

impl Default for StopOptions {
    fn default() -> Self {
        Self {
            fuel_stops: false,
            fuel_interval_miles: 500.0,
            average_speed_mph: 55.0,
        }
    }
}

/// Plan the ordered stop sequence for a routed trip.
///
/// Emits the pickup stop first, then `counts.total()` intermediate break
/// and rest stops at evenly spaced positions, then the dropoff stop.
/// A route with fewer than two waypoints yields no stops at all.
pub fn plan_stops(
    trip_id: &str,
    route: &RouteSummary,
    counts: &RequiredStopCounts,
    options: &StopOptions,
) -> Vec<PlannedStop> {
    debug!(
        trip_id,
        breaks = counts.breaks,
        rest_periods = counts.rest_periods,
        "plan_stops: called"
    );

    if route.waypoints.len() < 2 {
        debug!("plan_stops: route has fewer than two waypoints, no stops");
        return Vec::new();
    }
    // Guarded by the length check above
    let Some(start) = route.start() else {
        return Vec::new();
    };
    let Some(end) = route.end() else {
        return Vec::new();
    };

    let mut stops = Vec::new();

    stops.push(
        PlannedStop::new(
            trip_id,
            &start.name,
            StopKind::Pickup,
            PICKUP_DURATION_HOURS,
            TRIP_START_HOUR,
            0,
        )
        .with_coordinates(start.lat, start.lon),
    );

    let total = counts.total();
    for i in 0..total {
        let position = (i + 1) as f64 / (total + 1) as f64;
        let (kind, duration) = if i < counts.breaks {
            (StopKind::RequiredBreak, BREAK_DURATION_HOURS)
        } else {
            (StopKind::RequiredRestPeriod, REST_DURATION_HOURS)
        };
        let arrival = TRIP_START_HOUR + position * route.total_drive_time_hours;
        let lat = start.lat + (end.lat - start.lat) * position;
        let lon = start.lon + (end.lon - start.lon) * position;

        stops.push(
            PlannedStop::new(trip_id, format!("Stop {}", i + 1), kind, duration, arrival, i + 1)
                .with_coordinates(lat, lon),
        );
    }

    stops.push(
        PlannedStop::new(
            trip_id,
            &end.name,
            StopKind::Dropoff,
            DROPOFF_DURATION_HOURS,
            TRIP_START_HOUR + route.total_drive_time_hours,
            total + 1,
        )
        .with_coordinates(end.lat, end.lon),
    );

    if options.fuel_stops {
        debug!(
            interval = options.fuel_interval_miles,
            "plan_stops: inserting fuel stops"
        );
        insert_fuel_stops(trip_id, route, &mut stops, options);
    }

    stops
}

/// Insert a fueling stop every `fuel_interval_miles` of cumulative distance.
///
/// Fuel stops are keyed to the trip clock at the configured average speed
/// and slotted among the intermediates by arrival hour; pickup stays first
/// and dropoff stays last. Sequences are reassigned afterwards.
fn insert_fuel_stops(
    trip_id: &str,
    route: &RouteSummary,
    stops: &mut Vec<PlannedStop>,
    options: &StopOptions,
) {
    let distance = route.total_distance_miles;
    if distance <= options.fuel_interval_miles || options.fuel_interval_miles <= 0.0 {
        return;
    }
    let Some(start) = route.start() else {
        return;
    };
    let Some(end) = route.end() else {
        return;
    };

    let count = (distance / options.fuel_interval_miles).floor() as u32;
    let mut fuel_stops = Vec::new();

    for k in 1..=count {
        let miles = k as f64 * options.fuel_interval_miles;
        // A fueling stop at the destination itself is pointless
        if miles >= distance {
            break;
        }
        let fraction = miles / distance;
        let arrival = TRIP_START_HOUR + miles / options.average_speed_mph;
        let lat = start.lat + (end.lat - start.lat) * fraction;
        let lon = start.lon + (end.lon - start.lon) * fraction;

        fuel_stops.push(
            PlannedStop::new(
                trip_id,
                format!("Fuel Stop {}", k),
                StopKind::Fueling,
                FUEL_DURATION_HOURS,
                arrival,
                0,
            )
            .with_coordinates(lat, lon),
        );
    }

    for fuel in fuel_stops {
        let insert_at = stops
            .iter()
            .position(|s| s.kind != StopKind::Pickup && s.arrival_hours > fuel.arrival_hours)
            .unwrap_or(stops.len() - 1);
        stops.insert(insert_at, fuel);
    }

    for (i, stop) in stops.iter_mut().enumerate() {
        stop.sequence = i as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Waypoint, WaypointRole};

    fn chicago_boston_route() -> RouteSummary {
        RouteSummary {
            total_distance_miles: 800.0,
            total_drive_time_hours: 14.0,
            waypoints: vec![
                Waypoint::new(41.8781, -87.6298, "Chicago, IL", WaypointRole::Start),
                Waypoint::new(42.3314, -83.0458, "Detroit, MI", WaypointRole::Pickup),
                Waypoint::new(42.3601, -71.0589, "Boston, MA", WaypointRole::Dropoff),
            ],
        }
    }

    fn counts(breaks: u32, rest_periods: u32) -> RequiredStopCounts {
        RequiredStopCounts { breaks, rest_periods }
    }

    #[test]
    fn test_stop_count_is_two_plus_intermediates() {
        let stops = plan_stops("t-1", &chicago_boston_route(), &counts(1, 1), &StopOptions::default());
        assert_eq!(stops.len(), 4);
        assert_eq!(stops[0].kind, StopKind::Pickup);
        assert_eq!(stops[1].kind, StopKind::RequiredBreak);
        assert_eq!(stops[2].kind, StopKind::RequiredRestPeriod);
        assert_eq!(stops[3].kind, StopKind::Dropoff);
    }

    #[test]
    fn test_endpoint_stops_use_waypoint_names() {
        let stops = plan_stops("t-1", &chicago_boston_route(), &counts(1, 1), &StopOptions::default());
        assert_eq!(stops[0].location, "Chicago, IL");
        assert_eq!(stops[0].arrival_time, "8:00 AM");
        assert_eq!(stops[0].duration_hours, 1.0);
        assert_eq!(stops[3].location, "Boston, MA");
        assert_eq!(stops[3].arrival_time, "10:00 PM");
    }

    #[test]
    fn test_intermediate_stops_are_evenly_spaced() {
        let stops = plan_stops("t-1", &chicago_boston_route(), &counts(1, 1), &StopOptions::default());
        // Positions 1/3 and 2/3 along a 14h drive starting at 8
        let expected_1 = 8.0 + 14.0 / 3.0;
        let expected_2 = 8.0 + 14.0 * 2.0 / 3.0;
        assert!((stops[1].arrival_hours - expected_1).abs() < 1e-9);
        assert!((stops[2].arrival_hours - expected_2).abs() < 1e-9);
        assert_eq!(stops[1].location, "Stop 1");
        assert_eq!(stops[2].location, "Stop 2");
        assert_eq!(stops[1].duration_hours, 0.5);
        assert_eq!(stops[2].duration_hours, 10.0);
    }

    #[test]
    fn test_interpolated_positions_are_monotone() {
        let stops = plan_stops("t-1", &chicago_boston_route(), &counts(2, 1), &StopOptions::default());
        // Chicago -> Boston moves east: lon strictly increases stop to stop
        for pair in stops.windows(2) {
            assert!(pair[1].lon.unwrap() > pair[0].lon.unwrap());
            assert!(pair[1].arrival_hours >= pair[0].arrival_hours);
        }
    }

    #[test]
    fn test_sequences_are_emission_order() {
        let stops = plan_stops("t-1", &chicago_boston_route(), &counts(2, 2), &StopOptions::default());
        for (i, stop) in stops.iter().enumerate() {
            assert_eq!(stop.sequence, i as u32);
        }
    }

    #[test]
    fn test_no_intermediates_yields_pickup_and_dropoff_only() {
        let stops = plan_stops("t-1", &chicago_boston_route(), &counts(0, 0), &StopOptions::default());
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].kind, StopKind::Pickup);
        assert_eq!(stops[1].kind, StopKind::Dropoff);
    }

    #[test]
    fn test_degenerate_route_yields_no_stops() {
        let route = RouteSummary {
            total_distance_miles: 0.0,
            total_drive_time_hours: 0.0,
            waypoints: vec![Waypoint::new(41.88, -87.63, "Chicago, IL", WaypointRole::Start)],
        };
        let stops = plan_stops("t-1", &route, &counts(1, 0), &StopOptions::default());
        assert!(stops.is_empty());
    }

    #[test]
    fn test_fuel_stops_disabled_by_default() {
        let stops = plan_stops("t-1", &chicago_boston_route(), &counts(1, 1), &StopOptions::default());
        assert!(stops.iter().all(|s| s.kind != StopKind::Fueling));
    }

    #[test]
    fn test_fuel_stops_inserted_in_order() {
        let options = StopOptions {
            fuel_stops: true,
            ..StopOptions::default()
        };
        let stops = plan_stops("t-1", &chicago_boston_route(), &counts(1, 1), &options);

        // 800 miles at a 500-mile interval: one fuel stop at mile 500
        let fuel: Vec<&PlannedStop> = stops.iter().filter(|s| s.kind == StopKind::Fueling).collect();
        assert_eq!(fuel.len(), 1);
        assert_eq!(fuel[0].duration_hours, FUEL_DURATION_HOURS);
        // 500 miles at 55 mph puts it on the clock at 8 + 9.09h
        assert!((fuel[0].arrival_hours - (8.0 + 500.0 / 55.0)).abs() < 1e-9);

        // Pickup stays first, dropoff stays last, arrivals stay sorted
        assert_eq!(stops.first().map(|s| s.kind), Some(StopKind::Pickup));
        assert_eq!(stops.last().map(|s| s.kind), Some(StopKind::Dropoff));
        for pair in stops.windows(2) {
            assert!(pair[1].arrival_hours >= pair[0].arrival_hours);
        }
        for (i, stop) in stops.iter().enumerate() {
            assert_eq!(stop.sequence, i as u32);
        }
    }

    #[test]
    fn test_short_route_gets_no_fuel_stops() {
        let mut route = chicago_boston_route();
        route.total_distance_miles = 300.0;
        let options = StopOptions {
            fuel_stops: true,
            ..StopOptions::default()
        };
        let stops = plan_stops("t-1", &route, &counts(0, 0), &options);
        assert!(stops.iter().all(|s| s.kind != StopKind::Fueling));
    }
}
