//! Routing-engine (OSRM) client and wire types.

use anyhow::{Context, Result};
use cleanroute_core::Coordinate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const ROUTING_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP client for an OSRM `route` service.
pub struct OsrmClient {
    client: Client,
    base_url: String,
}

/// Top-level OSRM route response.
#[derive(Debug, Deserialize)]
pub struct OsrmResponse {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
    pub geometry: OsrmGeometry,
    #[serde(default)]
    pub legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
pub struct OsrmGeometry {
    // GeoJSON LineString: [[lon, lat], ...]
    #[serde(default)]
    pub coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
pub struct OsrmLeg {
    #[serde(default)]
    pub steps: Vec<OsrmStep>,
}

#[derive(Debug, Deserialize)]
pub struct OsrmStep {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
    pub maneuver: OsrmManeuver,
}

#[derive(Debug, Default, Deserialize)]
pub struct OsrmManeuver {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub modifier: Option<String>,
    #[serde(default)]
    pub exit: Option<u32>,
    // [lon, lat]
    #[serde(default)]
    pub location: Option<[f64; 2]>,
}

impl OsrmManeuver {
    /// Maneuver location as a coordinate, when present and in range.
    pub fn coordinate(&self) -> Option<Coordinate> {
        self.location.and_then(Coordinate::from_lon_lat)
    }
}

impl OsrmClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(ROUTING_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.into(),
        }
    }

    /// Fetch route alternatives between two coordinates for a profile.
    ///
    /// `continue_straight=false` nudges the engine into producing genuine
    /// alternatives instead of near-duplicates.
    pub async fn fetch_routes(
        &self,
        start: Coordinate,
        end: Coordinate,
        profile: &str,
        alternatives: bool,
    ) -> Result<OsrmResponse> {
        let url = format!(
            "{}/{}/{},{};{},{}",
            self.base_url, profile, start.lon, start.lat, end.lon, end.lat
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("overview", "simplified"),
                ("geometries", "geojson"),
                ("steps", "true"),
                ("alternatives", if alternatives { "true" } else { "false" }),
                ("continue_straight", "false"),
            ])
            .send()
            .await
            .context("Failed to query routing engine")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Routing engine request failed: {} {}",
                status,
                body
            ));
        }

        let payload: OsrmResponse = response
            .json()
            .await
            .context("Failed to parse routing engine response")?;

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_route_response() {
        let payload: OsrmResponse = serde_json::from_str(
            r#"{
                "code": "Ok",
                "routes": [{
                    "distance": 1523.4,
                    "duration": 210.7,
                    "geometry": {"type": "LineString", "coordinates": [[77.2, 28.6], [77.21, 28.61]]},
                    "legs": [{
                        "steps": [{
                            "name": "Rajpath",
                            "distance": 900.0,
                            "duration": 120.0,
                            "maneuver": {"type": "depart", "location": [77.2, 28.6]}
                        }, {
                            "name": "",
                            "distance": 623.4,
                            "duration": 90.7,
                            "maneuver": {"type": "turn", "modifier": "left", "exit": null}
                        }]
                    }]
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(payload.code, "Ok");
        let route = &payload.routes[0];
        assert_eq!(route.geometry.coordinates.len(), 2);
        let steps = &route.legs[0].steps;
        assert_eq!(steps[0].maneuver.kind, "depart");
        let loc = steps[0].maneuver.coordinate().unwrap();
        assert_eq!(loc.lat, 28.6);
        assert_eq!(steps[1].maneuver.modifier.as_deref(), Some("left"));
        assert!(steps[1].maneuver.coordinate().is_none());
    }

    #[test]
    fn parses_no_route_response() {
        let payload: OsrmResponse =
            serde_json::from_str(r#"{"code": "NoRoute", "message": "Impossible route."}"#).unwrap();
        assert_eq!(payload.code, "NoRoute");
        assert!(payload.routes.is_empty());
    }
}
