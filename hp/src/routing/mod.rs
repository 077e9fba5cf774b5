//! Route provider module for HaulPlan
//!
//! Resolves locations and routes trips via an external mapping service.

use std::sync::Arc;

use tracing::debug;

mod error;
mod fixtures;
mod ors;
pub mod provider;

pub use error::RoutingError;
pub use fixtures::FixtureRouteProvider;
pub use ors::OrsClient;
pub use provider::RouteProvider;

use crate::config::RoutingConfig;

/// Create a route provider based on the provider specified in config
///
/// Supports "openrouteservice" and "fixture" providers.
pub fn create_provider(config: &RoutingConfig) -> Result<Arc<dyn RouteProvider>, RoutingError> {
    debug!(provider = %config.provider, "create_provider: called");
    match config.provider.as_str() {
        "openrouteservice" => {
            debug!("create_provider: creating OpenRouteService client");
            Ok(Arc::new(OrsClient::from_config(config)?))
        }
        "fixture" => {
            debug!("create_provider: creating fixture provider");
            Ok(Arc::new(FixtureRouteProvider::new()))
        }
        other => {
            debug!(provider = %other, "create_provider: unknown provider");
            Err(RoutingError::InvalidResponse(format!(
                "Unknown route provider: '{}'. Supported: openrouteservice, fixture",
                other
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider_fixture() {
        let config = RoutingConfig {
            provider: "fixture".to_string(),
            ..RoutingConfig::default()
        };
        assert!(create_provider(&config).is_ok());
    }

    #[test]
    fn test_create_provider_unknown() {
        let config = RoutingConfig {
            provider: "carrier-pigeon".to_string(),
            ..RoutingConfig::default()
        };
        let err = create_provider(&config).unwrap_err();
        assert!(err.to_string().contains("carrier-pigeon"));
    }
}
