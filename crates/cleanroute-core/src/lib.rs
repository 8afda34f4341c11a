pub mod aqi;
pub mod geometry;
pub mod models;
pub mod ranking;

pub use aqi::{AqiBand, QualitySummary};
pub use geometry::{haversine_distance_m, sample_points, segment_polyline};
pub use models::{Coordinate, RouteCandidate, RoutePlan, RouteSegment, Step, TravelMode};
pub use ranking::{rank_routes, rank_routes_safety_first};
