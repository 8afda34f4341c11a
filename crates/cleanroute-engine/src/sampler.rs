//! Air-quality sampling along routes and their segments.

use crate::cache::TtlCache;
use crate::config::{Config, AQI_TTL, SEGMENT_COUNT, SEGMENT_SAMPLE_POINTS};
use cleanroute_core::{
    sample_points, segment_polyline, AqiBand, Coordinate, QualitySummary, RouteSegment,
};
use cleanroute_providers::WaqiClient;
use futures::future::join_all;

/// Resolves air-quality readings for coordinates, with a shared cache and
/// concurrent fan-out over sampled points.
pub struct AirQualitySampler {
    client: WaqiClient,
    cache: TtlCache<String, f64>,
}

/// Nearby points share a reading: the cache key collapses coordinates to
/// four decimal places (roughly 11 m).
fn cache_key(coord: Coordinate) -> String {
    format!("{:.4},{:.4}", coord.lat, coord.lon)
}

impl AirQualitySampler {
    pub fn new(config: &Config) -> Self {
        Self {
            client: WaqiClient::new(config.waqi_url.clone(), config.waqi_token.clone()),
            cache: TtlCache::new(AQI_TTL),
        }
    }

    /// Reading at one coordinate; cache first, provider on miss. A failed
    /// or empty lookup is absorbed to `None` and never retried within the
    /// call.
    pub async fn point_quality(&self, coord: Coordinate) -> Option<f64> {
        let key = cache_key(coord);
        if let Some(value) = self.cache.get(&key) {
            return Some(value);
        }

        match self.client.fetch_aqi(coord).await {
            Ok(Some(value)) => {
                self.cache.insert(key, value);
                Some(value)
            }
            Ok(None) => None,
            Err(err) => {
                tracing::debug!(lat = coord.lat, lon = coord.lon, error = %err, "air-quality lookup failed");
                None
            }
        }
    }

    /// Aggregate reading over up to `max_points` samples of a polyline.
    ///
    /// All lookups run concurrently and are recombined in input order;
    /// failures shrink the sample set rather than failing the aggregate.
    pub async fn route_quality(&self, coords: &[Coordinate], max_points: usize) -> QualitySummary {
        let sampled = sample_points(coords, max_points);
        let readings = join_all(sampled.into_iter().map(|c| self.point_quality(c))).await;
        QualitySummary::from_values(readings.into_iter().flatten())
    }

    /// Per-segment readings for a route polyline, all segments concurrent.
    pub async fn segment_qualities(&self, coords: &[Coordinate]) -> Vec<RouteSegment> {
        let segments = segment_polyline(coords, SEGMENT_COUNT);
        join_all(segments.into_iter().map(|geometry| async move {
            let summary = self
                .route_quality(&geometry, SEGMENT_SAMPLE_POINTS)
                .await;
            RouteSegment {
                geometry,
                avg_aqi: summary.avg,
                aqi_band: AqiBand::from_aqi(summary.worst()),
            }
        }))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_rounds_to_four_decimals() {
        let a = Coordinate {
            lat: 28.613901,
            lon: 77.209012,
        };
        let b = Coordinate {
            lat: 28.613944,
            lon: 77.208976,
        };
        assert_eq!(cache_key(a), "28.6139,77.2090");
        assert_eq!(cache_key(a), cache_key(b));
    }
}
