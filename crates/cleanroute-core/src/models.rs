//! Core data models for the route enrichment pipeline.

use crate::aqi::{AqiBand, QualitySummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting out-of-range values.
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) {
            Some(Self { lat, lon })
        } else {
            None
        }
    }

    /// Build from a GeoJSON-style `[lon, lat]` pair.
    pub fn from_lon_lat(pair: [f64; 2]) -> Option<Self> {
        Self::new(pair[1], pair[0])
    }
}

/// Travel-mode profile understood by the routing engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Car,
    Bike,
    Walk,
}

impl TravelMode {
    /// Lenient name parsing; anything unrecognized falls back to driving.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "bike" | "bicycle" | "cycling" => Self::Bike,
            "walk" | "walking" | "foot" => Self::Walk,
            _ => Self::Car,
        }
    }

    /// Profile path segment in the routing engine's URL scheme.
    pub fn profile(&self) -> &'static str {
        match self {
            Self::Car => "driving",
            Self::Bike => "cycling",
            Self::Walk => "walking",
        }
    }
}

/// One turn-by-turn navigation instruction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    pub instruction: String,
    pub distance_m: f64,
    pub duration_s: f64,
    pub maneuver_type: String,
    #[serde(default)]
    pub maneuver_modifier: Option<String>,
    #[serde(default)]
    pub road_name: String,
    #[serde(default)]
    pub location: Option<Coordinate>,
}

/// A contiguous slice of a route's polyline with its own air-quality reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSegment {
    pub geometry: Vec<Coordinate>,
    #[serde(default)]
    pub avg_aqi: Option<f64>,
    #[serde(default)]
    pub aqi_band: AqiBand,
}

/// One route alternative, as returned by the retriever and later enriched
/// with air-quality data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteCandidate {
    pub distance_m: f64,
    pub duration_s: f64,
    pub geometry: Vec<Coordinate>,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub avg_aqi: Option<f64>,
    #[serde(default)]
    pub max_aqi: Option<f64>,
    #[serde(default)]
    pub aqi_band: AqiBand,
    #[serde(default)]
    pub segments: Vec<RouteSegment>,
}

impl RouteCandidate {
    /// Produce an enriched copy carrying the aggregated quality data.
    pub fn with_quality(mut self, summary: &QualitySummary, segments: Vec<RouteSegment>) -> Self {
        self.avg_aqi = summary.avg;
        self.max_aqi = summary.max;
        self.aqi_band = AqiBand::from_aqi(summary.worst());
        self.segments = segments;
        self
    }
}

/// Ranked route alternatives for one start/end request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePlan {
    pub start: Coordinate,
    pub end: Coordinate,
    pub recommended_index: usize,
    pub routes: Vec<RouteCandidate>,
    pub computed_at: DateTime<Utc>,
}
