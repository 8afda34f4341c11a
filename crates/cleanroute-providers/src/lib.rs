//! HTTP clients for the external collaborators: primary and fallback
//! geocoders, the routing engine, and the air-quality provider.
//!
//! Clients return `anyhow::Result`; the engine decides which failures are
//! surfaced and which degrade to empty results.

pub mod air_quality;
pub mod geocode;
pub mod routing;

pub use air_quality::WaqiClient;
pub use geocode::{NominatimClient, PhotonClient};
pub use routing::{OsrmClient, OsrmManeuver, OsrmResponse, OsrmRoute, OsrmStep};
