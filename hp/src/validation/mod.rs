//! Trip request input validation

mod trip_request;

pub use trip_request::{FieldError, TripRequest};
