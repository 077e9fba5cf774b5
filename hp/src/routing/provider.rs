//! RouteProvider trait definition

use async_trait::async_trait;

use super::RoutingError;
use crate::domain::RouteSummary;

/// Stateless route provider - each call is independent
///
/// Resolves three locations and routes a drivable path through them.
/// Implementations carry their own HTTP client and credentials; callers
/// hold the provider behind an `Arc<dyn RouteProvider>`.
#[async_trait]
pub trait RouteProvider: Send + Sync + std::fmt::Debug {
    /// Route from the driver's current position through pickup to dropoff
    ///
    /// Fails with [`RoutingError::Geocoding`] when a location cannot be
    /// resolved and [`RoutingError::NoRoute`] when no path connects them.
    async fn route(&self, origin: &str, pickup: &str, dropoff: &str) -> Result<RouteSummary, RoutingError>;
}
