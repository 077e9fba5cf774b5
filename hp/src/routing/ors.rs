//! OpenRouteService route provider
//!
//! Geocodes each location, then requests a heavy-goods-vehicle route
//! through the three coordinates. Routing calls are not retried: a trip
//! plan is a user-interactive request and a failed call aborts it.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{RouteProvider, RoutingError};
use crate::config::RoutingConfig;
use crate::domain::{RouteSummary, Waypoint, WaypointRole};

/// Meters per statute mile
const METERS_PER_MILE: f64 = 1609.34;

/// Seconds per hour
const SECONDS_PER_HOUR: f64 = 3600.0;

/// OpenRouteService API client
#[derive(Debug)]
pub struct OrsClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OrsClient {
    /// Create a new client from configuration
    ///
    /// Reads the API key from the environment variable named in config.
    pub fn from_config(config: &RoutingConfig) -> Result<Self, RoutingError> {
        debug!(?config, "from_config: called");
        let api_key = config
            .get_api_key()
            .map_err(|e| RoutingError::InvalidResponse(e.to_string()))?;

        let timeout = Duration::from_millis(config.timeout_ms);
        let http = Client::builder().timeout(timeout).build().map_err(RoutingError::Network)?;

        Ok(Self {
            api_key,
            base_url: config.base_url.clone(),
            http,
        })
    }

    /// Resolve a location name to coordinates and a canonical label
    async fn geocode(&self, location: &str) -> Result<GeocodedPlace, RoutingError> {
        debug!(%location, "geocode: called");
        let url = format!("{}/geocode/search", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("text", location), ("size", "1")])
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            debug!(%status, "geocode: API error");
            let text = response.text().await.unwrap_or_default();
            return Err(RoutingError::Api { status, message: text });
        }

        let body: GeocodeResponse = response.json().await?;
        let Some(feature) = body.features.into_iter().next() else {
            debug!(%location, "geocode: no features in response");
            return Err(RoutingError::Geocoding {
                location: location.to_string(),
            });
        };

        let [lon, lat] = feature.geometry.coordinates;
        debug!(%location, lat, lon, "geocode: resolved");
        Ok(GeocodedPlace {
            lat,
            lon,
            label: feature.properties.label.unwrap_or_else(|| location.to_string()),
        })
    }

    /// Request a driving-hgv route through the given places, in order
    async fn directions(&self, places: &[GeocodedPlace]) -> Result<DirectionsSummary, RoutingError> {
        debug!(place_count = places.len(), "directions: called");
        let url = format!("{}/v2/directions/driving-hgv", self.base_url);

        let coordinates: Vec<[f64; 2]> = places.iter().map(|p| [p.lon, p.lat]).collect();
        let body = serde_json::json!({ "coordinates": coordinates });

        let response = self
            .http
            .post(&url)
            .header("Authorization", self.api_key.clone())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            debug!(%status, "directions: API error");
            let text = response.text().await.unwrap_or_default();
            return Err(RoutingError::Api { status, message: text });
        }

        let parsed: DirectionsResponse = response.json().await?;
        let Some(route) = parsed.routes.into_iter().next() else {
            debug!("directions: no routes in response");
            return Err(RoutingError::NoRoute {
                from: places.first().map(|p| p.label.clone()).unwrap_or_default(),
                to: places.last().map(|p| p.label.clone()).unwrap_or_default(),
            });
        };

        debug!(
            distance_m = route.summary.distance,
            duration_s = route.summary.duration,
            "directions: routed"
        );
        Ok(route.summary)
    }
}

#[async_trait]
impl RouteProvider for OrsClient {
    async fn route(&self, origin: &str, pickup: &str, dropoff: &str) -> Result<RouteSummary, RoutingError> {
        debug!(%origin, %pickup, %dropoff, "route: called");

        let origin_place = self.geocode(origin).await?;
        let pickup_place = self.geocode(pickup).await?;
        let dropoff_place = self.geocode(dropoff).await?;

        let places = [origin_place, pickup_place, dropoff_place];
        let summary = self.directions(&places).await?;

        let [origin_place, pickup_place, dropoff_place] = places;
        debug!("route: success");
        Ok(RouteSummary {
            total_distance_miles: summary.distance / METERS_PER_MILE,
            total_drive_time_hours: summary.duration / SECONDS_PER_HOUR,
            waypoints: vec![
                Waypoint::new(origin_place.lat, origin_place.lon, origin_place.label, WaypointRole::Start),
                Waypoint::new(pickup_place.lat, pickup_place.lon, pickup_place.label, WaypointRole::Pickup),
                Waypoint::new(
                    dropoff_place.lat,
                    dropoff_place.lon,
                    dropoff_place.label,
                    WaypointRole::Dropoff,
                ),
            ],
        })
    }
}

/// A geocoded location
#[derive(Debug, Clone)]
struct GeocodedPlace {
    lat: f64,
    lon: f64,
    label: String,
}

// OpenRouteService API response types

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    features: Vec<GeocodeFeature>,
}

#[derive(Debug, Deserialize)]
struct GeocodeFeature {
    geometry: GeocodeGeometry,
    properties: GeocodeProperties,
}

#[derive(Debug, Deserialize)]
struct GeocodeGeometry {
    /// [lon, lat] per the GeoJSON convention
    coordinates: [f64; 2],
}

#[derive(Debug, Deserialize)]
struct GeocodeProperties {
    label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    summary: DirectionsSummary,
}

#[derive(Debug, Deserialize)]
struct DirectionsSummary {
    /// Route distance in meters
    distance: f64,
    /// Route duration in seconds
    duration: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geocode_response_parses_geojson() {
        let json = r#"{
            "features": [{
                "geometry": { "type": "Point", "coordinates": [-87.6298, 41.8781] },
                "properties": { "label": "Chicago, IL, USA" }
            }]
        }"#;
        let parsed: GeocodeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.features.len(), 1);
        let [lon, lat] = parsed.features[0].geometry.coordinates;
        assert_eq!(lon, -87.6298);
        assert_eq!(lat, 41.8781);
        assert_eq!(parsed.features[0].properties.label.as_deref(), Some("Chicago, IL, USA"));
    }

    #[test]
    fn test_geocode_response_tolerates_no_features() {
        let parsed: GeocodeResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.features.is_empty());
    }

    #[test]
    fn test_directions_response_parses_summary() {
        let json = r#"{
            "routes": [{
                "summary": { "distance": 1287472.0, "duration": 50400.0 }
            }]
        }"#;
        let parsed: DirectionsResponse = serde_json::from_str(json).unwrap();
        let summary = &parsed.routes[0].summary;
        // 1,287,472 m is 800 miles; 50,400 s is 14 hours
        assert!((summary.distance / METERS_PER_MILE - 800.0).abs() < 0.1);
        assert!((summary.duration / SECONDS_PER_HOUR - 14.0).abs() < 1e-9);
    }
}
