//! Route retrieval from the routing engine and turn-by-turn instruction
//! building.

use crate::cache::TtlCache;
use crate::config::{Config, ROUTE_TTL};
use cleanroute_core::{AqiBand, Coordinate, RouteCandidate, Step, TravelMode};
use cleanroute_providers::{OsrmClient, OsrmRoute, OsrmStep};

/// Fetches route alternatives and converts them into typed candidates.
pub struct RouteRetriever {
    client: OsrmClient,
    cache: TtlCache<String, Vec<RouteCandidate>>,
}

impl RouteRetriever {
    pub fn new(config: &Config) -> Self {
        Self {
            client: OsrmClient::new(config.osrm_url.clone()),
            cache: TtlCache::new(ROUTE_TTL),
        }
    }

    /// Route alternatives between two points for a travel mode.
    ///
    /// Any engine failure (transport, non-success code, malformed payload)
    /// degrades to an empty list; the orchestrator reads empty as
    /// "no route found".
    pub async fn get_routes(
        &self,
        start: Coordinate,
        end: Coordinate,
        mode: TravelMode,
        alternatives: bool,
    ) -> Vec<RouteCandidate> {
        let profile = mode.profile();
        let key = format!(
            "{profile}|{:.6},{:.6};{:.6},{:.6}|alt={alternatives}|steps=true",
            start.lon, start.lat, end.lon, end.lat
        );

        if let Some(routes) = self.cache.get(&key) {
            tracing::debug!(key = %key, "route cache hit");
            return routes;
        }

        let response = match self.client.fetch_routes(start, end, profile, alternatives).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "routing engine unavailable");
                return Vec::new();
            }
        };

        if response.code != "Ok" {
            tracing::warn!(code = %response.code, "routing engine returned no routes");
            return Vec::new();
        }

        let routes: Vec<RouteCandidate> = response
            .routes
            .iter()
            .filter_map(build_candidate)
            .collect();
        self.cache.insert(key, routes.clone());
        routes
    }
}

fn build_candidate(route: &OsrmRoute) -> Option<RouteCandidate> {
    let geometry: Option<Vec<Coordinate>> = route
        .geometry
        .coordinates
        .iter()
        .map(|&pair| Coordinate::from_lon_lat(pair))
        .collect();
    let Some(geometry) = geometry else {
        tracing::warn!("dropping route alternative with out-of-range geometry");
        return None;
    };

    let steps: Vec<Step> = route
        .legs
        .iter()
        .flat_map(|leg| leg.steps.iter())
        .map(build_step)
        .collect();

    Some(RouteCandidate {
        distance_m: route.distance,
        duration_s: route.duration,
        geometry,
        steps,
        avg_aqi: None,
        max_aqi: None,
        aqi_band: AqiBand::Gray,
        segments: Vec::new(),
    })
}

fn build_step(step: &OsrmStep) -> Step {
    Step {
        instruction: build_instruction(step),
        distance_m: step.distance,
        duration_s: step.duration,
        maneuver_type: step.maneuver.kind.clone(),
        maneuver_modifier: step.maneuver.modifier.clone(),
        road_name: step.name.trim().to_string(),
        location: step.maneuver.coordinate(),
    }
}

/// Deterministic instruction text from maneuver metadata. The routing
/// engine ships no prose, so the text is generated here.
fn build_instruction(step: &OsrmStep) -> String {
    let kind = step.maneuver.kind.to_lowercase();
    let modifier = step
        .maneuver
        .modifier
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_default();
    let road = step.name.trim();

    let onto_road = |text: String| -> String {
        if road.is_empty() {
            text
        } else {
            format!("{text} onto {road}")
        }
    };
    let with_modifier = |base: &str| -> String {
        if modifier.is_empty() {
            base.to_string()
        } else {
            format!("{base} {modifier}")
        }
    };

    match kind.as_str() {
        "depart" => onto_road("Start".to_string()),
        "arrive" => "You have arrived at your destination".to_string(),
        "turn" => onto_road(with_modifier("Turn")),
        "new name" => onto_road("Continue".to_string()),
        "continue" => {
            if modifier.is_empty() {
                onto_road("Continue straight".to_string())
            } else {
                onto_road(format!("Continue {modifier}"))
            }
        }
        "merge" => onto_road(with_modifier("Merge")),
        "on ramp" => onto_road(with_modifier("Take the ramp")),
        "off ramp" => onto_road(with_modifier("Take the exit")),
        "fork" => {
            if modifier.is_empty() {
                onto_road("Keep at the fork".to_string())
            } else {
                onto_road(format!("Keep {modifier} at the fork"))
            }
        }
        "end of road" => onto_road(with_modifier("At the end of the road, turn")),
        "roundabout" => match step.maneuver.exit {
            Some(exit) => format!("At the roundabout, take exit {exit}"),
            None => "Enter the roundabout".to_string(),
        },
        "rotary" => match step.maneuver.exit {
            Some(exit) => format!("At the rotary, take exit {exit}"),
            None => "Enter the rotary".to_string(),
        },
        _ => {
            if road.is_empty() {
                "Continue".to_string()
            } else {
                format!("Continue on {road}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cleanroute_providers::OsrmManeuver;

    fn step(kind: &str, modifier: Option<&str>, name: &str, exit: Option<u32>) -> OsrmStep {
        OsrmStep {
            name: name.to_string(),
            distance: 120.0,
            duration: 30.0,
            maneuver: OsrmManeuver {
                kind: kind.to_string(),
                modifier: modifier.map(str::to_string),
                exit,
                location: None,
            },
        }
    }

    #[test]
    fn instruction_table() {
        let cases = [
            (step("depart", None, "MG Road", None), "Start onto MG Road"),
            (step("depart", None, "", None), "Start"),
            (
                step("arrive", Some("right"), "MG Road", None),
                "You have arrived at your destination",
            ),
            (
                step("turn", Some("left"), "Ring Road", None),
                "Turn left onto Ring Road",
            ),
            (step("turn", None, "", None), "Turn"),
            (step("new name", None, "NH 48", None), "Continue onto NH 48"),
            (step("continue", None, "", None), "Continue straight"),
            (
                step("continue", Some("slight left"), "NH 48", None),
                "Continue slight left onto NH 48",
            ),
            (
                step("merge", Some("left"), "Outer Ring Road", None),
                "Merge left onto Outer Ring Road",
            ),
            (
                step("on ramp", Some("right"), "", None),
                "Take the ramp right",
            ),
            (
                step("off ramp", Some("right"), "Service Road", None),
                "Take the exit right onto Service Road",
            ),
            (
                step("fork", Some("left"), "", None),
                "Keep left at the fork",
            ),
            (
                step("end of road", Some("right"), "Main Street", None),
                "At the end of the road, turn right onto Main Street",
            ),
            (
                step("roundabout", None, "", Some(2)),
                "At the roundabout, take exit 2",
            ),
            (step("roundabout", None, "", None), "Enter the roundabout"),
            (
                step("rotary", Some("straight"), "", Some(3)),
                "At the rotary, take exit 3",
            ),
            (step("rotary", None, "", None), "Enter the rotary"),
            (
                step("exit roundabout", None, "Park Street", None),
                "Continue on Park Street",
            ),
            (step("unknown", None, "", None), "Continue"),
        ];

        for (input, expected) in cases {
            assert_eq!(build_instruction(&input), expected, "type={}", input.maneuver.kind);
        }
    }

    #[test]
    fn modifier_case_is_normalized() {
        let input = step("turn", Some("Sharp Right"), "", None);
        assert_eq!(build_instruction(&input), "Turn sharp right");
    }
}
