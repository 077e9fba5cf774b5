//! State manager messages
//!
//! Commands and responses for the actor pattern.

use thiserror::Error;
use tokio::sync::oneshot;

use crate::domain::{LogSheet, PlannedStop, Trip};

/// Errors from state operations
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Channel error")]
    ChannelError,
}

/// Response from state operations
pub type StateResponse<T> = Result<T, StateError>;

/// Commands sent to the StateManager actor
#[derive(Debug)]
pub enum StateCommand {
    // Trip operations
    CreateTrip {
        trip: Trip,
        reply: oneshot::Sender<StateResponse<String>>,
    },
    GetTrip {
        id: String,
        reply: oneshot::Sender<StateResponse<Option<Trip>>>,
    },
    UpdateTrip {
        trip: Trip,
        reply: oneshot::Sender<StateResponse<()>>,
    },
    ListTrips {
        reply: oneshot::Sender<StateResponse<Vec<Trip>>>,
    },
    DeleteTrip {
        id: String,
        reply: oneshot::Sender<StateResponse<()>>,
    },

    // Stop operations
    CreateStops {
        stops: Vec<PlannedStop>,
        reply: oneshot::Sender<StateResponse<()>>,
    },
    StopsForTrip {
        trip_id: String,
        reply: oneshot::Sender<StateResponse<Vec<PlannedStop>>>,
    },

    // Log sheet operations
    CreateLogSheets {
        sheets: Vec<LogSheet>,
        reply: oneshot::Sender<StateResponse<()>>,
    },
    LogSheetsForTrip {
        trip_id: String,
        reply: oneshot::Sender<StateResponse<Vec<LogSheet>>>,
    },

    // Sync operations
    Sync {
        reply: oneshot::Sender<StateResponse<()>>,
    },

    // Shutdown
    Shutdown,
}
