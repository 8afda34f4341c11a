//! Live pipeline integration tests.
//!
//! These hit the public Nominatim, Photon, OSRM, and WAQI endpoints, so
//! they are ignored by default.
//!
//! Run with: cargo test -p cleanroute-engine --test pipeline_test -- --ignored
//! Set CLEANROUTE_WAQI_TOKEN for the enrichment assertions to see readings.

use cleanroute_core::TravelMode;
use cleanroute_engine::{Config, RoutePlanner};

fn planner() -> RoutePlanner {
    RoutePlanner::new(&Config::from_env())
}

#[tokio::test]
#[ignore]
async fn fast_routes_returns_time_ranked_alternatives() {
    let planner = planner();
    let plan = planner
        .fast_routes("28.6139,77.2090", "28.5355,77.3910", TravelMode::Car)
        .await
        .unwrap();

    assert!(!plan.routes.is_empty(), "expected at least one alternative");
    assert!(plan.routes.len() <= 3);
    assert_eq!(plan.recommended_index, 0);

    for pair in plan.routes.windows(2) {
        assert!(pair[0].duration_s <= pair[1].duration_s);
    }
    for route in &plan.routes {
        assert!(route.avg_aqi.is_none(), "fast flow must not fetch quality");
        assert!(route.geometry.len() >= 2);
        assert!(!route.steps.is_empty());
        assert!(route.distance_m > 0.0);
    }
}

#[tokio::test]
#[ignore]
async fn full_route_enriches_and_segments_alternatives() {
    let planner = planner();
    let plan = planner
        .full_route("28.6139,77.2090", "28.5355,77.3910", TravelMode::Car)
        .await
        .unwrap();

    assert!(!plan.routes.is_empty());
    for route in &plan.routes {
        assert!(route.segments.len() <= 8);
        for segment in &route.segments {
            assert!(segment.geometry.len() >= 2);
        }
        // Without a provider token every sample fails and the aggregate
        // degrades to absent rather than erroring.
        if route.avg_aqi.is_none() {
            assert!(route.max_aqi.is_none());
        }
    }
}

#[tokio::test]
#[ignore]
async fn second_fast_request_is_served_from_cache() {
    let planner = planner();
    let first = planner
        .fast_routes("28.6139,77.2090", "28.5355,77.3910", TravelMode::Car)
        .await
        .unwrap();

    let started = std::time::Instant::now();
    let second = planner
        .fast_routes("28.6139,77.2090", "28.5355,77.3910", TravelMode::Car)
        .await
        .unwrap();

    assert_eq!(first.routes.len(), second.routes.len());
    assert!(
        started.elapsed() < std::time::Duration::from_millis(100),
        "cached retrieval should not hit the network"
    );
}

#[tokio::test]
#[ignore]
async fn geocodes_free_text_place() {
    let planner = planner();
    let coord = planner.resolver().resolve("New Delhi").await.unwrap();
    assert!((coord.lat - 28.6).abs() < 0.5);
    assert!((coord.lon - 77.2).abs() < 0.5);
}

#[tokio::test]
#[ignore]
async fn unresolvable_place_is_a_named_error() {
    let planner = planner();
    let err = planner
        .fast_routes("zzzzqqqq-no-such-place-xyzzy", "28.5355,77.3910", TravelMode::Car)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("start location not found"));
}
