//! Trip request contract
//!
//! Validates the planning request before any side effect. Violations are
//! reported per field, all at once, so a caller can surface every problem
//! in a single round trip.

use serde::{Deserialize, Serialize};

use crate::hos::CYCLE_LIMIT_HOURS;

/// Longest accepted location string
const MAX_LOCATION_LEN: usize = 255;

/// One field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the offending field
    pub field: String,

    /// Human-readable description of the violation
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Input to a trip planning request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRequest {
    /// Where the driver currently is
    pub current_location: String,

    /// Cargo pickup location
    pub pickup_location: String,

    /// Cargo dropoff location
    pub dropoff_location: String,

    /// Hours already used in the rolling 70-hour cycle
    pub current_cycle_hours: f64,
}

impl TripRequest {
    pub fn new(
        current_location: impl Into<String>,
        pickup_location: impl Into<String>,
        dropoff_location: impl Into<String>,
        current_cycle_hours: f64,
    ) -> Self {
        Self {
            current_location: current_location.into(),
            pickup_location: pickup_location.into(),
            dropoff_location: dropoff_location.into(),
            current_cycle_hours,
        }
    }

    /// Validate every field, collecting all violations
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        Self::check_location(&mut errors, "current_location", &self.current_location);
        Self::check_location(&mut errors, "pickup_location", &self.pickup_location);
        Self::check_location(&mut errors, "dropoff_location", &self.dropoff_location);

        if !self.current_cycle_hours.is_finite() {
            errors.push(FieldError::new("current_cycle_hours", "must be a number"));
        } else if !(0.0..=CYCLE_LIMIT_HOURS).contains(&self.current_cycle_hours) {
            errors.push(FieldError::new(
                "current_cycle_hours",
                format!("must be between 0 and {}", CYCLE_LIMIT_HOURS),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    fn check_location(errors: &mut Vec<FieldError>, field: &str, value: &str) {
        if value.trim().is_empty() {
            errors.push(FieldError::new(field, "must not be empty"));
        } else if value.len() > MAX_LOCATION_LEN {
            errors.push(FieldError::new(
                field,
                format!("must be at most {} characters", MAX_LOCATION_LEN),
            ));
        }
    }
}
