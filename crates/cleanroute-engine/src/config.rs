//! Pipeline configuration from environment.

use std::env;
use std::time::Duration;

/// Alternatives returned by each flow.
pub const MAX_ALTERNATIVES: usize = 3;
/// Air-quality samples taken along a whole route.
pub const ROUTE_SAMPLE_POINTS: usize = 6;
/// Segments a route polyline is split into for per-segment coloring.
pub const SEGMENT_COUNT: usize = 8;
/// Air-quality samples taken within one segment.
pub const SEGMENT_SAMPLE_POINTS: usize = 2;

pub const GEOCODE_TTL: Duration = Duration::from_secs(24 * 3600);
pub const ROUTE_TTL: Duration = Duration::from_secs(15 * 60);
pub const AQI_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Clone)]
pub struct Config {
    pub nominatim_url: String,
    pub photon_url: String,
    pub osrm_url: String,
    pub waqi_url: String,
    pub waqi_token: String,
    pub user_agent: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            nominatim_url: env::var("CLEANROUTE_NOMINATIM_URL")
                .unwrap_or_else(|_| "https://nominatim.openstreetmap.org/search".to_string()),
            photon_url: env::var("CLEANROUTE_PHOTON_URL")
                .unwrap_or_else(|_| "https://photon.komoot.io/api".to_string()),
            osrm_url: env::var("CLEANROUTE_OSRM_URL")
                .unwrap_or_else(|_| "http://router.project-osrm.org/route/v1".to_string()),
            waqi_url: env::var("CLEANROUTE_WAQI_URL")
                .unwrap_or_else(|_| "https://api.waqi.info".to_string()),
            waqi_token: env::var("CLEANROUTE_WAQI_TOKEN").unwrap_or_default(),
            user_agent: env::var("CLEANROUTE_USER_AGENT")
                .unwrap_or_else(|_| "cleanroute/0.2".to_string()),
        }
    }
}
