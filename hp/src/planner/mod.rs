//! Trip plan orchestration
//!
//! Composes validation, routing, the HOS core and persistence into one
//! `plan_trip` call. Creation is all-or-nothing: once the trip record
//! exists, any downstream failure deletes it and everything it owns
//! before the error is surfaced.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::PlannerConfig;
use crate::domain::{LogSheet, PlannedStop, RouteSummary, Trip, id_matches};
use crate::hos::{
    RequiredStopCounts, ScheduleStrategy, SheetOptions, StopOptions, create_strategy, generate_log_sheets,
    plan_stops, required_stops,
};
use crate::routing::RouteProvider;
use crate::state::StateManager;
use crate::validation::TripRequest;

mod error;

pub use error::PlanError;

/// A fully planned trip, ready for display or serialization
#[derive(Debug, Serialize)]
pub struct TripPlan {
    pub trip: Trip,
    pub required: RequiredStopCounts,
    pub stops: Vec<PlannedStop>,
    pub log_sheets: Vec<LogSheet>,
}

/// Knobs the planner carries into stop and sheet generation
#[derive(Debug, Clone, Default)]
pub struct PlannerOptions {
    pub stops: StopOptions,
    pub sheets: SheetOptions,
}

impl PlannerOptions {
    /// Build options from configuration
    pub fn from_config(config: &PlannerConfig) -> Self {
        Self {
            stops: StopOptions {
                fuel_stops: config.fuel_stops,
                fuel_interval_miles: config.fuel_interval_miles,
                average_speed_mph: config.average_speed_mph,
            },
            sheets: SheetOptions {
                carrier: config.carrier.clone(),
                shipping_documents: config.shipping_documents.clone(),
            },
        }
    }
}

/// Orchestrates routing, HOS computation and persistence for one trip
pub struct TripPlanner {
    provider: Arc<dyn RouteProvider>,
    state: StateManager,
    strategy: Arc<dyn ScheduleStrategy>,
    options: PlannerOptions,
}

impl TripPlanner {
    pub fn new(
        provider: Arc<dyn RouteProvider>,
        state: StateManager,
        strategy: Arc<dyn ScheduleStrategy>,
        options: PlannerOptions,
    ) -> Self {
        Self {
            provider,
            state,
            strategy,
            options,
        }
    }

    /// Build a planner from configuration, resolving the schedule strategy
    pub fn from_config(
        provider: Arc<dyn RouteProvider>,
        state: StateManager,
        config: &PlannerConfig,
    ) -> Result<Self, PlanError> {
        let strategy = create_strategy(&config.strategy)?;
        Ok(Self::new(provider, state, strategy, PlannerOptions::from_config(config)))
    }

    /// Plan a trip end to end: validate, route, compute stops and sheets,
    /// persist everything.
    pub async fn plan_trip(&self, request: &TripRequest) -> Result<TripPlan, PlanError> {
        debug!(
            origin = %request.current_location,
            pickup = %request.pickup_location,
            dropoff = %request.dropoff_location,
            cycle_hours = request.current_cycle_hours,
            "plan_trip: called"
        );

        // Reject bad input before any side effect
        request.validate().map_err(PlanError::Validation)?;

        let trip = Trip::new(
            &request.current_location,
            &request.pickup_location,
            &request.dropoff_location,
            request.current_cycle_hours,
        );
        let trip_id = self.state.create_trip(trip).await?;
        debug!(%trip_id, "plan_trip: trip record created");

        // Everything past this point must roll the trip back on failure
        match self.plan_routed(&trip_id, request).await {
            Ok(plan) => {
                info!(
                    %trip_id,
                    stops = plan.stops.len(),
                    days = plan.log_sheets.len(),
                    "Trip planned"
                );
                Ok(plan)
            }
            Err(e) => {
                warn!(%trip_id, error = %e, "plan_trip: failed, rolling back trip");
                if let Err(rollback_err) = self.state.delete_trip(&trip_id).await {
                    warn!(%trip_id, error = %rollback_err, "plan_trip: rollback failed");
                }
                Err(e)
            }
        }
    }

    /// The fallible middle of plan_trip, separated so the caller can roll
    /// back the trip on any error
    async fn plan_routed(&self, trip_id: &str, request: &TripRequest) -> Result<TripPlan, PlanError> {
        let route: RouteSummary = self
            .provider
            .route(
                &request.current_location,
                &request.pickup_location,
                &request.dropoff_location,
            )
            .await?;
        debug!(
            distance = route.total_distance_miles,
            drive_time = route.total_drive_time_hours,
            "plan_routed: route resolved"
        );

        let mut trip = self.state.get_trip_required(trip_id).await?;
        trip.set_route_totals(route.total_distance_miles, route.total_drive_time_hours);
        self.state.update_trip(trip.clone()).await?;

        let required = required_stops(route.total_drive_time_hours, request.current_cycle_hours)?;
        debug!(
            breaks = required.breaks,
            rest_periods = required.rest_periods,
            "plan_routed: required stops computed"
        );

        let stops = plan_stops(trip_id, &route, &required, &self.options.stops);
        self.state.create_stops(stops.clone()).await?;

        let log_sheets = generate_log_sheets(
            trip_id,
            &route,
            &required,
            &stops,
            self.strategy.as_ref(),
            &self.options.sheets,
        );
        self.state.create_log_sheets(log_sheets.clone()).await?;

        Ok(TripPlan {
            trip,
            required,
            stops,
            log_sheets,
        })
    }

    /// Re-assemble a persisted trip for display
    pub async fn load_trip(&self, trip_id: &str) -> Result<TripPlan, PlanError> {
        debug!(%trip_id, "load_trip: called");
        let trip = self.state.get_trip_required(trip_id).await?;
        let stops = self.state.stops_for_trip(trip_id).await?;
        let log_sheets = self.state.log_sheets_for_trip(trip_id).await?;

        let required = required_stops(trip.total_drive_time.unwrap_or(0.0), trip.current_cycle_hours)?;

        Ok(TripPlan {
            trip,
            required,
            stops,
            log_sheets,
        })
    }

    /// List all persisted trips
    pub async fn list_trips(&self) -> Result<Vec<Trip>, PlanError> {
        debug!("list_trips: called");
        Ok(self.state.list_trips().await?)
    }

    /// Resolve a user-supplied trip reference to a full trip id.
    ///
    /// Accepts the exact id, a unique hex prefix, or a fragment of the
    /// kind-and-slug portion ("boston" finds `...-trip-detroit-mi-to-boston-ma`).
    pub async fn resolve_trip_id(&self, reference: &str) -> Result<String, PlanError> {
        debug!(%reference, "resolve_trip_id: called");
        let trips = self.state.list_trips().await?;
        let mut matched: Vec<&Trip> = trips.iter().filter(|t| id_matches(&t.id, reference)).collect();

        match matched.len() {
            1 => Ok(matched.remove(0).id.clone()),
            0 => Err(PlanError::State(crate::state::StateError::NotFound(format!(
                "Trip {}",
                reference
            )))),
            n => Err(PlanError::State(crate::state::StateError::StoreError(format!(
                "Trip reference '{}' is ambiguous ({} matches)",
                reference, n
            )))),
        }
    }

    /// Delete a trip and everything it owns
    pub async fn delete_trip(&self, trip_id: &str) -> Result<(), PlanError> {
        debug!(%trip_id, "delete_trip: called");
        Ok(self.state.delete_trip(trip_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{StopKind, Waypoint, WaypointRole};
    use crate::hos::TemplatedSchedule;
    use crate::routing::RoutingError;
    use crate::routing::provider::mock::MockRouteProvider;
    use tempfile::tempdir;

    fn chicago_boston_summary() -> RouteSummary {
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

    fn planner(provider: MockRouteProvider, state: StateManager) -> TripPlanner {
        TripPlanner::new(
            Arc::new(provider),
            state,
            Arc::new(TemplatedSchedule),
            PlannerOptions::default(),
        )
    }

    fn request() -> TripRequest {
        TripRequest::new("Chicago, IL", "Detroit, MI", "Boston, MA", 20.0)
    }

    #[tokio::test]
    async fn test_plan_trip_persists_everything() {
        let temp = tempdir().unwrap();
        let state = StateManager::spawn(temp.path()).unwrap();
        let planner = planner(MockRouteProvider::new(vec![Ok(chicago_boston_summary())]), state.clone());

        let plan = planner.plan_trip(&request()).await.unwrap();

        assert_eq!(plan.required.breaks, 1);
        assert_eq!(plan.required.rest_periods, 1);
        assert_eq!(plan.stops.len(), 4);
        assert_eq!(plan.log_sheets.len(), 2);
        assert_eq!(plan.trip.total_distance, Some(800.0));

        // Persisted children match the returned plan
        let stops = state.stops_for_trip(&plan.trip.id).await.unwrap();
        assert_eq!(stops.len(), 4);
        assert_eq!(stops[0].kind, StopKind::Pickup);
        let sheets = state.log_sheets_for_trip(&plan.trip.id).await.unwrap();
        assert_eq!(sheets.len(), 2);

        state.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_validation_failure_persists_nothing() {
        let temp = tempdir().unwrap();
        let state = StateManager::spawn(temp.path()).unwrap();
        let provider = MockRouteProvider::new(vec![Ok(chicago_boston_summary())]);
        let planner = planner(provider, state.clone());

        let bad = TripRequest::new("", "Detroit, MI", "Boston, MA", 99.0);
        let err = planner.plan_trip(&bad).await.unwrap_err();

        let fields: Vec<&str> = err.field_errors().unwrap().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["current_location", "current_cycle_hours"]);
        assert!(state.list_trips().await.unwrap().is_empty());

        state.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_routing_failure_rolls_back_trip() {
        let temp = tempdir().unwrap();
        let state = StateManager::spawn(temp.path()).unwrap();
        let provider = MockRouteProvider::new(vec![Err(RoutingError::Geocoding {
            location: "Detroit, MI".to_string(),
        })]);
        let planner = planner(provider, state.clone());

        let err = planner.plan_trip(&request()).await.unwrap_err();
        assert!(matches!(err, PlanError::Routing(RoutingError::Geocoding { .. })));

        // All-or-nothing: the trip created before routing is gone
        assert!(state.list_trips().await.unwrap().is_empty());

        state.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_load_trip_round_trip() {
        let temp = tempdir().unwrap();
        let state = StateManager::spawn(temp.path()).unwrap();
        let planner = planner(MockRouteProvider::new(vec![Ok(chicago_boston_summary())]), state.clone());

        let plan = planner.plan_trip(&request()).await.unwrap();
        let loaded = planner.load_trip(&plan.trip.id).await.unwrap();

        assert_eq!(loaded.trip.id, plan.trip.id);
        assert_eq!(loaded.stops.len(), plan.stops.len());
        assert_eq!(loaded.log_sheets.len(), plan.log_sheets.len());
        assert_eq!(loaded.required, plan.required);

        state.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_load_missing_trip_is_not_found() {
        let temp = tempdir().unwrap();
        let state = StateManager::spawn(temp.path()).unwrap();
        let planner = planner(MockRouteProvider::new(vec![]), state.clone());

        let err = planner.load_trip("ghost").await.unwrap_err();
        assert!(matches!(err, PlanError::State(crate::state::StateError::NotFound(_))));

        state.shutdown().await.unwrap();
    }
}
