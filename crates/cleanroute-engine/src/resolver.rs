//! Place resolution: literal coordinate pairs, cache, then the
//! primary/fallback geocoder chain.

use crate::cache::TtlCache;
use crate::config::{Config, GEOCODE_TTL};
use cleanroute_core::Coordinate;
use cleanroute_providers::{NominatimClient, PhotonClient};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// Neither geocoder could resolve the query. Callers surface this as
    /// "location not found" and must not retry automatically.
    #[error("location not found: {query}")]
    NotFound { query: String },
}

/// Parse a literal `"a,b"` coordinate pair.
///
/// The first number is preferred as latitude; the swapped reading is used
/// only when the first fails range validation. Anything that is not a
/// plain two-number pair, or valid under neither ordering, returns `None`.
pub fn parse_coordinate_pair(text: &str) -> Option<Coordinate> {
    let parts: Vec<&str> = text.split(',').collect();
    if parts.len() != 2 {
        return None;
    }
    let a: f64 = parts[0].trim().parse().ok()?;
    let b: f64 = parts[1].trim().parse().ok()?;
    Coordinate::new(a, b).or_else(|| Coordinate::new(b, a))
}

/// Resolves free-text place descriptions to coordinates.
pub struct PlaceResolver {
    nominatim: NominatimClient,
    photon: PhotonClient,
    cache: TtlCache<String, Coordinate>,
}

impl PlaceResolver {
    pub fn new(config: &Config) -> Self {
        Self {
            nominatim: NominatimClient::new(
                config.nominatim_url.clone(),
                config.user_agent.clone(),
            ),
            photon: PhotonClient::new(config.photon_url.clone(), config.user_agent.clone()),
            cache: TtlCache::new(GEOCODE_TTL),
        }
    }

    /// Resolve text to a coordinate, short-circuiting on the first success:
    /// literal pair, cache, primary geocoder, fallback geocoder.
    pub async fn resolve(&self, text: &str) -> Result<Coordinate, ResolveError> {
        if let Some(coord) = parse_coordinate_pair(text) {
            return Ok(coord);
        }

        let key = text.trim().to_lowercase();
        if let Some(coord) = self.cache.get(&key) {
            tracing::debug!(query = %key, "geocode cache hit");
            return Ok(coord);
        }

        match self.nominatim.search(text).await {
            Ok(Some(coord)) => {
                self.cache.insert(key, coord);
                return Ok(coord);
            }
            Ok(None) => tracing::debug!(query = %text, "primary geocoder found nothing"),
            Err(err) => tracing::warn!(query = %text, error = %err, "primary geocoder failed"),
        }

        match self.photon.search(text).await {
            Ok(Some(coord)) => {
                self.cache.insert(key, coord);
                Ok(coord)
            }
            Ok(None) => Err(ResolveError::NotFound {
                query: text.to_string(),
            }),
            Err(err) => {
                tracing::warn!(query = %text, error = %err, "fallback geocoder failed");
                Err(ResolveError::NotFound {
                    query: text.to_string(),
                })
            }
        }
    }
}
