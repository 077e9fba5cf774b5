//! StateManager - actor that owns TripStore
//!
//! Processes commands via channels for thread-safe access to persistent
//! state. Deleting a trip cascades to its stops and log sheets; the
//! planner uses that cascade as its rollback primitive.

use std::path::Path;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::domain::{Filter, FilterOp, IndexValue, LogSheet, PlannedStop, Store, Trip};

use super::messages::{StateCommand, StateError, StateResponse};

/// Handle to send commands to the StateManager
#[derive(Clone)]
pub struct StateManager {
    tx: mpsc::Sender<StateCommand>,
}

impl StateManager {
    /// Spawn a new StateManager actor
    pub fn spawn(store_path: impl AsRef<Path>) -> eyre::Result<Self> {
        debug!(store_path = %store_path.as_ref().display(), "spawn: called");
        let store = Store::open(store_path.as_ref())?;

        let (tx, rx) = mpsc::channel(256);

        // Spawn the actor task
        tokio::spawn(actor_loop(store, rx));

        info!("StateManager spawned");

        Ok(Self { tx })
    }

    // === Trip operations ===

    /// Create a new Trip record
    pub async fn create_trip(&self, trip: Trip) -> StateResponse<String> {
        debug!(trip_id = %trip.id, "create_trip: called");
        let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
        self.tx
            .send(StateCommand::CreateTrip { trip, reply: reply_tx })
            .await
            .map_err(|_| StateError::ChannelError)?;
        reply_rx.await.map_err(|_| StateError::ChannelError)?
    }

    /// Get a Trip by ID
    pub async fn get_trip(&self, id: &str) -> StateResponse<Option<Trip>> {
        debug!(%id, "get_trip: called");
        let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
        self.tx
            .send(StateCommand::GetTrip {
                id: id.to_string(),
                reply: reply_tx,
            })
            .await
            .map_err(|_| StateError::ChannelError)?;
        reply_rx.await.map_err(|_| StateError::ChannelError)?
    }

    /// Get a Trip by ID, returning error if not found
    pub async fn get_trip_required(&self, id: &str) -> Result<Trip, StateError> {
        debug!(%id, "get_trip_required: called");
        self.get_trip(id)
            .await?
            .ok_or_else(|| StateError::NotFound(format!("Trip {}", id)))
    }

    /// Update a Trip record
    pub async fn update_trip(&self, trip: Trip) -> StateResponse<()> {
        debug!(trip_id = %trip.id, "update_trip: called");
        let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
        self.tx
            .send(StateCommand::UpdateTrip { trip, reply: reply_tx })
            .await
            .map_err(|_| StateError::ChannelError)?;
        reply_rx.await.map_err(|_| StateError::ChannelError)?
    }

    /// List all Trip records
    pub async fn list_trips(&self) -> StateResponse<Vec<Trip>> {
        debug!("list_trips: called");
        let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
        self.tx
            .send(StateCommand::ListTrips { reply: reply_tx })
            .await
            .map_err(|_| StateError::ChannelError)?;
        reply_rx.await.map_err(|_| StateError::ChannelError)?
    }

    /// Delete a Trip and everything it owns (stops, log sheets)
    pub async fn delete_trip(&self, id: &str) -> StateResponse<()> {
        debug!(%id, "delete_trip: called");
        let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
        self.tx
            .send(StateCommand::DeleteTrip {
                id: id.to_string(),
                reply: reply_tx,
            })
            .await
            .map_err(|_| StateError::ChannelError)?;
        reply_rx.await.map_err(|_| StateError::ChannelError)?
    }

    // === Stop operations ===

    /// Persist a batch of planned stops
    pub async fn create_stops(&self, stops: Vec<PlannedStop>) -> StateResponse<()> {
        debug!(stop_count = stops.len(), "create_stops: called");
        let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
        self.tx
            .send(StateCommand::CreateStops { stops, reply: reply_tx })
            .await
            .map_err(|_| StateError::ChannelError)?;
        reply_rx.await.map_err(|_| StateError::ChannelError)?
    }

    /// List a trip's stops, ordered by sequence
    pub async fn stops_for_trip(&self, trip_id: &str) -> StateResponse<Vec<PlannedStop>> {
        debug!(%trip_id, "stops_for_trip: called");
        let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
        self.tx
            .send(StateCommand::StopsForTrip {
                trip_id: trip_id.to_string(),
                reply: reply_tx,
            })
            .await
            .map_err(|_| StateError::ChannelError)?;
        reply_rx.await.map_err(|_| StateError::ChannelError)?
    }

    // === Log sheet operations ===

    /// Persist a batch of daily log sheets
    pub async fn create_log_sheets(&self, sheets: Vec<LogSheet>) -> StateResponse<()> {
        debug!(sheet_count = sheets.len(), "create_log_sheets: called");
        let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
        self.tx
            .send(StateCommand::CreateLogSheets { sheets, reply: reply_tx })
            .await
            .map_err(|_| StateError::ChannelError)?;
        reply_rx.await.map_err(|_| StateError::ChannelError)?
    }

    /// List a trip's log sheets, ordered by day
    pub async fn log_sheets_for_trip(&self, trip_id: &str) -> StateResponse<Vec<LogSheet>> {
        debug!(%trip_id, "log_sheets_for_trip: called");
        let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
        self.tx
            .send(StateCommand::LogSheetsForTrip {
                trip_id: trip_id.to_string(),
                reply: reply_tx,
            })
            .await
            .map_err(|_| StateError::ChannelError)?;
        reply_rx.await.map_err(|_| StateError::ChannelError)?
    }

    /// Sync the store from JSONL files
    pub async fn sync(&self) -> StateResponse<()> {
        debug!("sync: called");
        let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
        self.tx
            .send(StateCommand::Sync { reply: reply_tx })
            .await
            .map_err(|_| StateError::ChannelError)?;
        reply_rx.await.map_err(|_| StateError::ChannelError)?
    }

    /// Shutdown the StateManager
    pub async fn shutdown(&self) -> Result<(), StateError> {
        debug!("shutdown: called");
        self.tx
            .send(StateCommand::Shutdown)
            .await
            .map_err(|_| StateError::ChannelError)
    }
}

/// Filter matching records whose `trip` field equals the given id
fn trip_filter(trip_id: &str) -> Vec<Filter> {
    vec![Filter {
        field: "trip".to_string(),
        op: FilterOp::Eq,
        value: IndexValue::String(trip_id.to_string()),
    }]
}

/// Day number from a "Day N" label, for ordering sheets
fn day_number(date: &str) -> u32 {
    date.strip_prefix("Day ").and_then(|n| n.parse().ok()).unwrap_or(0)
}

/// The actor loop that owns the Store and processes commands
async fn actor_loop(mut store: Store, mut rx: mpsc::Receiver<StateCommand>) {
    debug!("StateManager actor started");

    while let Some(cmd) = rx.recv().await {
        match cmd {
            StateCommand::CreateTrip { trip, reply } => {
                debug!(trip_id = %trip.id, "actor_loop: CreateTrip command");
                let result = store.create(trip).map_err(|e| StateError::StoreError(e.to_string()));
                let _ = reply.send(result);
            }

            StateCommand::GetTrip { id, reply } => {
                debug!(%id, "actor_loop: GetTrip command");
                let result: StateResponse<Option<Trip>> =
                    store.get(&id).map_err(|e| StateError::StoreError(e.to_string()));
                let _ = reply.send(result);
            }

            StateCommand::UpdateTrip { trip, reply } => {
                debug!(trip_id = %trip.id, "actor_loop: UpdateTrip command");
                let result = store.update(trip).map_err(|e| StateError::StoreError(e.to_string()));
                let _ = reply.send(result);
            }

            StateCommand::ListTrips { reply } => {
                debug!("actor_loop: ListTrips command");
                let result: StateResponse<Vec<Trip>> = store
                    .list(&[])
                    .map(|mut trips: Vec<Trip>| {
                        trips.sort_by_key(|t| t.created_at);
                        trips
                    })
                    .map_err(|e| StateError::StoreError(e.to_string()));
                let _ = reply.send(result);
            }

            StateCommand::DeleteTrip { id, reply } => {
                debug!(%id, "actor_loop: DeleteTrip command");
                let result = cascade_delete(&mut store, &id);
                let _ = reply.send(result);
            }

            StateCommand::CreateStops { stops, reply } => {
                debug!(stop_count = stops.len(), "actor_loop: CreateStops command");
                let mut result = Ok(());
                for stop in stops {
                    if let Err(e) = store.create(stop) {
                        result = Err(StateError::StoreError(e.to_string()));
                        break;
                    }
                }
                let _ = reply.send(result);
            }

            StateCommand::StopsForTrip { trip_id, reply } => {
                debug!(%trip_id, "actor_loop: StopsForTrip command");
                let result: StateResponse<Vec<PlannedStop>> = store
                    .list(&trip_filter(&trip_id))
                    .map(|mut stops: Vec<PlannedStop>| {
                        stops.sort_by_key(|s| s.sequence);
                        stops
                    })
                    .map_err(|e| StateError::StoreError(e.to_string()));
                let _ = reply.send(result);
            }

            StateCommand::CreateLogSheets { sheets, reply } => {
                debug!(sheet_count = sheets.len(), "actor_loop: CreateLogSheets command");
                let mut result = Ok(());
                for sheet in sheets {
                    if let Err(e) = store.create(sheet) {
                        result = Err(StateError::StoreError(e.to_string()));
                        break;
                    }
                }
                let _ = reply.send(result);
            }

            StateCommand::LogSheetsForTrip { trip_id, reply } => {
                debug!(%trip_id, "actor_loop: LogSheetsForTrip command");
                let result: StateResponse<Vec<LogSheet>> = store
                    .list(&trip_filter(&trip_id))
                    .map(|mut sheets: Vec<LogSheet>| {
                        sheets.sort_by_key(|s| day_number(&s.date));
                        sheets
                    })
                    .map_err(|e| StateError::StoreError(e.to_string()));
                let _ = reply.send(result);
            }

            StateCommand::Sync { reply } => {
                debug!("actor_loop: Sync command");
                let result = store.sync().map_err(|e| StateError::StoreError(e.to_string()));
                let _ = reply.send(result);
            }

            StateCommand::Shutdown => {
                debug!("actor_loop: Shutdown command");
                info!("StateManager shutting down");
                break;
            }
        }
    }

    debug!("StateManager actor stopped");
}

/// Delete a trip and all records that reference it
fn cascade_delete(store: &mut Store, trip_id: &str) -> StateResponse<()> {
    let filters = trip_filter(trip_id);

    let stops: Vec<PlannedStop> = store.list(&filters).map_err(|e| StateError::StoreError(e.to_string()))?;
    for stop in &stops {
        store
            .delete::<PlannedStop>(&stop.id)
            .map_err(|e| StateError::StoreError(e.to_string()))?;
    }

    let sheets: Vec<LogSheet> = store.list(&filters).map_err(|e| StateError::StoreError(e.to_string()))?;
    for sheet in &sheets {
        store
            .delete::<LogSheet>(&sheet.id)
            .map_err(|e| StateError::StoreError(e.to_string()))?;
    }

    let removed = store
        .delete::<Trip>(trip_id)
        .map_err(|e| StateError::StoreError(e.to_string()))?;
    debug!(
        %trip_id,
        removed,
        stop_count = stops.len(),
        sheet_count = sheets.len(),
        "cascade_delete: done"
    );
    if !removed {
        return Err(StateError::NotFound(format!("Trip {}", trip_id)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StopKind;
    use tempfile::tempdir;

    fn trip() -> Trip {
        Trip::with_id("t-1", "Chicago, IL", "Detroit, MI", "Boston, MA", 20.0)
    }

    #[tokio::test]
    async fn test_state_manager_trip_crud() {
        let temp = tempdir().unwrap();
        let manager = StateManager::spawn(temp.path()).unwrap();

        // Create
        let id = manager.create_trip(trip()).await.unwrap();
        assert_eq!(id, "t-1");

        // Get
        let retrieved = manager.get_trip("t-1").await.unwrap().unwrap();
        assert_eq!(retrieved.pickup_location, "Detroit, MI");
        assert!(!retrieved.is_routed());

        // Update
        let mut updated = retrieved;
        updated.set_route_totals(800.0, 14.0);
        manager.update_trip(updated).await.unwrap();

        let retrieved = manager.get_trip("t-1").await.unwrap().unwrap();
        assert_eq!(retrieved.total_distance, Some(800.0));

        // List
        let trips = manager.list_trips().await.unwrap();
        assert_eq!(trips.len(), 1);

        manager.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_state_manager_get_nonexistent() {
        let temp = tempdir().unwrap();
        let manager = StateManager::spawn(temp.path()).unwrap();

        let result = manager.get_trip("nonexistent").await.unwrap();
        assert!(result.is_none());

        let err = manager.get_trip_required("nonexistent").await.unwrap_err();
        assert!(matches!(err, StateError::NotFound(_)));

        manager.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_stops_for_trip_sorted_and_filtered() {
        let temp = tempdir().unwrap();
        let manager = StateManager::spawn(temp.path()).unwrap();

        manager.create_trip(trip()).await.unwrap();
        manager
            .create_stops(vec![
                PlannedStop::new("t-1", "Boston, MA", StopKind::Dropoff, 1.0, 22.0, 2),
                PlannedStop::new("t-1", "Chicago, IL", StopKind::Pickup, 1.0, 8.0, 0),
                PlannedStop::new("t-1", "Stop 1", StopKind::RequiredBreak, 0.5, 15.0, 1),
                PlannedStop::new("t-other", "Milwaukee, WI", StopKind::Pickup, 1.0, 8.0, 0),
            ])
            .await
            .unwrap();

        let stops = manager.stops_for_trip("t-1").await.unwrap();
        assert_eq!(stops.len(), 3);
        assert_eq!(stops[0].kind, StopKind::Pickup);
        assert_eq!(stops[1].kind, StopKind::RequiredBreak);
        assert_eq!(stops[2].kind, StopKind::Dropoff);

        manager.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_log_sheets_for_trip_ordered_by_day() {
        let temp = tempdir().unwrap();
        let manager = StateManager::spawn(temp.path()).unwrap();

        manager.create_trip(trip()).await.unwrap();
        let sheet = |day: &str| LogSheet::new("t-1", day, "En route", "En route", 100, "C", "En route", "B", vec![]);
        manager
            .create_log_sheets(vec![sheet("Day 2"), sheet("Day 10"), sheet("Day 1")])
            .await
            .unwrap();

        let sheets = manager.log_sheets_for_trip("t-1").await.unwrap();
        let days: Vec<&str> = sheets.iter().map(|s| s.date.as_str()).collect();
        assert_eq!(days, vec!["Day 1", "Day 2", "Day 10"]);

        manager.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_trip_cascades() {
        let temp = tempdir().unwrap();
        let manager = StateManager::spawn(temp.path()).unwrap();

        manager.create_trip(trip()).await.unwrap();
        manager
            .create_stops(vec![PlannedStop::new("t-1", "Chicago, IL", StopKind::Pickup, 1.0, 8.0, 0)])
            .await
            .unwrap();
        manager
            .create_log_sheets(vec![LogSheet::new(
                "t-1",
                "Day 1",
                "Chicago, IL",
                "Boston, MA",
                400,
                "C",
                "Trip started",
                "B",
                vec![],
            )])
            .await
            .unwrap();

        manager.delete_trip("t-1").await.unwrap();

        assert!(manager.get_trip("t-1").await.unwrap().is_none());
        assert!(manager.stops_for_trip("t-1").await.unwrap().is_empty());
        assert!(manager.log_sheets_for_trip("t-1").await.unwrap().is_empty());

        manager.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_nonexistent_trip_is_not_found() {
        let temp = tempdir().unwrap();
        let manager = StateManager::spawn(temp.path()).unwrap();

        let err = manager.delete_trip("nope").await.unwrap_err();
        assert!(matches!(err, StateError::NotFound(_)));

        manager.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_duplicate_trip_rejected() {
        let temp = tempdir().unwrap();
        let manager = StateManager::spawn(temp.path()).unwrap();

        manager.create_trip(trip()).await.unwrap();
        let result = manager.create_trip(trip()).await;
        assert!(matches!(result, Err(StateError::StoreError(_))));

        manager.shutdown().await.unwrap();
    }
}
