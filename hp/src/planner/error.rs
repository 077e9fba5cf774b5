//! Trip planning error taxonomy

use thiserror::Error;

use crate::hos::HosError;
use crate::routing::RoutingError;
use crate::state::StateError;
use crate::validation::FieldError;

/// Errors surfaced by the trip planner
#[derive(Debug, Error)]
pub enum PlanError {
    /// Bad input shape or range, reported per field; nothing was persisted
    #[error("Invalid trip request: {}", format_field_errors(.0))]
    Validation(Vec<FieldError>),

    /// Geocoding or routing failed; any partially created trip was rolled back
    #[error("Routing failed: {0}")]
    Routing(#[from] RoutingError),

    /// The planning arithmetic rejected its input; signals a programming
    /// error since requests are validated first
    #[error("Computation failed: {0}")]
    Computation(#[from] HosError),

    /// The persistence layer failed
    #[error("State error: {0}")]
    State(#[from] StateError),
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl PlanError {
    /// Field-level details when this is a validation failure
    pub fn field_errors(&self) -> Option<&[FieldError]> {
        match self {
            PlanError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_every_field() {
        let err = PlanError::Validation(vec![
            FieldError {
                field: "pickup_location".to_string(),
                message: "must not be empty".to_string(),
            },
            FieldError {
                field: "current_cycle_hours".to_string(),
                message: "must be between 0 and 70".to_string(),
            },
        ]);
        let text = err.to_string();
        assert!(text.contains("pickup_location"));
        assert!(text.contains("current_cycle_hours"));
        assert_eq!(err.field_errors().unwrap().len(), 2);
    }

    #[test]
    fn test_routing_error_converts() {
        let err: PlanError = RoutingError::Geocoding {
            location: "Atlantis".to_string(),
        }
        .into();
        assert!(matches!(err, PlanError::Routing(_)));
        assert!(err.field_errors().is_none());
    }
}
