//! Air-quality provider (WAQI) client.

use anyhow::{Context, Result};
use cleanroute_core::Coordinate;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

const AQI_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the WAQI geo feed.
pub struct WaqiClient {
    client: Client,
    base_url: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct WaqiResponse {
    #[serde(default)]
    status: String,
    // Object on success, bare error string otherwise; the feed also reports
    // "-" for stations without an index, so `aqi` is not a plain number.
    #[serde(default)]
    data: Value,
}

impl WaqiResponse {
    fn reading(&self) -> Option<f64> {
        if self.status != "ok" {
            return None;
        }
        self.data.get("aqi").and_then(Value::as_f64)
    }
}

impl WaqiClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(AQI_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Fetch the air-quality index nearest to a coordinate.
    ///
    /// `Ok(None)` means the provider answered but has no usable reading
    /// (unknown station, "-" placeholder, or an error status payload).
    pub async fn fetch_aqi(&self, coord: Coordinate) -> Result<Option<f64>> {
        let url = format!("{}/feed/geo:{};{}/", self.base_url, coord.lat, coord.lon);

        let response = self
            .client
            .get(&url)
            .query(&[("token", self.token.as_str())])
            .send()
            .await
            .context("Failed to query air-quality provider")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Air-quality request failed: {} {}",
                status,
                body
            ));
        }

        let payload: WaqiResponse = response
            .json()
            .await
            .context("Failed to parse air-quality response")?;

        if payload.status != "ok" {
            tracing::debug!(status = %payload.status, "air-quality provider returned non-ok status");
        }

        Ok(payload.reading())
    }
}
