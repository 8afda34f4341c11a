//! Geocoding clients: Nominatim (primary) and Photon (fallback).

use anyhow::{Context, Result};
use cleanroute_core::Coordinate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const GEOCODE_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the Nominatim search API.
pub struct NominatimClient {
    client: Client,
    base_url: String,
    user_agent: String,
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    // Nominatim serializes coordinates as strings.
    lat: String,
    lon: String,
}

impl NominatimClient {
    pub fn new(base_url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(GEOCODE_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.into(),
            user_agent: user_agent.into(),
        }
    }

    /// Resolve free text to a coordinate. `Ok(None)` means the service
    /// answered but found nothing.
    pub async fn search(&self, query: &str) -> Result<Option<Coordinate>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .header("User-Agent", &self.user_agent)
            .header("Referer", "http://localhost")
            .header("Accept-Language", "en")
            .send()
            .await
            .context("Failed to query Nominatim")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Nominatim request failed: {} {}", status, body));
        }

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .context("Failed to parse Nominatim response")?;

        let Some(place) = places.first() else {
            return Ok(None);
        };

        let lat: f64 = place
            .lat
            .parse()
            .with_context(|| format!("Nominatim returned non-numeric lat: {}", place.lat))?;
        let lon: f64 = place
            .lon
            .parse()
            .with_context(|| format!("Nominatim returned non-numeric lon: {}", place.lon))?;

        let coord = Coordinate::new(lat, lon)
            .ok_or_else(|| anyhow::anyhow!("Nominatim returned out-of-range coordinate: {lat},{lon}"))?;
        Ok(Some(coord))
    }
}

/// HTTP client for the Photon geocoding API.
pub struct PhotonClient {
    client: Client,
    base_url: String,
    user_agent: String,
}

#[derive(Debug, Deserialize)]
struct PhotonResponse {
    #[serde(default)]
    features: Vec<PhotonFeature>,
}

#[derive(Debug, Deserialize)]
struct PhotonFeature {
    geometry: PhotonGeometry,
}

#[derive(Debug, Deserialize)]
struct PhotonGeometry {
    // GeoJSON order: [lon, lat]
    coordinates: [f64; 2],
}

impl PhotonClient {
    pub fn new(base_url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(GEOCODE_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.into(),
            user_agent: user_agent.into(),
        }
    }

    pub async fn search(&self, query: &str) -> Result<Option<Coordinate>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", query), ("limit", "1")])
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .context("Failed to query Photon")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Photon request failed: {} {}", status, body));
        }

        let payload: PhotonResponse = response
            .json()
            .await
            .context("Failed to parse Photon response")?;

        let Some(feature) = payload.features.first() else {
            return Ok(None);
        };

        let pair = feature.geometry.coordinates;
        let coord = Coordinate::from_lon_lat(pair).ok_or_else(|| {
            anyhow::anyhow!("Photon returned out-of-range coordinate: {},{}", pair[0], pair[1])
        })?;
        Ok(Some(coord))
    }
}
