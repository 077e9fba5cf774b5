//! Routing error types

use thiserror::Error;

/// Errors that can occur while resolving locations or routing a trip
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("Could not geocode location: {location}")]
    Geocoding { location: String },

    #[error("No drivable route found from {from} to {to}")]
    NoRoute { from: String, to: String },

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RoutingError {
    /// Check if this error blames the caller's input rather than the service
    pub fn is_input_error(&self) -> bool {
        matches!(self, RoutingError::Geocoding { .. } | RoutingError::NoRoute { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_input_error() {
        let err = RoutingError::Geocoding {
            location: "Nowhere, ZZ".to_string(),
        };
        assert!(err.is_input_error());

        let err = RoutingError::NoRoute {
            from: "Honolulu, HI".to_string(),
            to: "Boston, MA".to_string(),
        };
        assert!(err.is_input_error());

        let err = RoutingError::Api {
            status: 500,
            message: "Server error".to_string(),
        };
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_error_messages_name_locations() {
        let err = RoutingError::Geocoding {
            location: "Atlantis".to_string(),
        };
        assert!(err.to_string().contains("Atlantis"));
    }
}
