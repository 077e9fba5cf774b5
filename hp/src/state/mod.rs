//! Persistent state management
//!
//! The [`StateManager`] actor owns the TripStore and serializes all
//! access behind an mpsc channel.

mod manager;
mod messages;

pub use manager::StateManager;
pub use messages::{StateCommand, StateError, StateResponse};
