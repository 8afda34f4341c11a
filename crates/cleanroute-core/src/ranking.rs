//! Multi-criteria ranking of route alternatives.

use crate::models::RouteCandidate;
use std::cmp::Ordering;

const TIME_WEIGHT: f64 = 0.65;
const AQI_WEIGHT: f64 = 0.35;

const SAFETY_TIME_WEIGHT: f64 = 0.3;
const SAFETY_AQI_WEIGHT: f64 = 0.7;
/// Quality score assigned to a candidate with no reading at all.
const MISSING_AQI_SCORE: f64 = 1.5;

/// Rank candidates by a combined time/air-quality score, best first.
///
/// Each candidate's score is `0.65 * duration/min_duration + 0.35 *
/// avg_aqi/min_aqi`. Candidates without a reading (or when no candidate has
/// one) fall back to the time ratio alone, so an unenriched set is ordered
/// purely by duration. Lower scores are better; ties keep their original
/// order.
pub fn rank_routes(candidates: Vec<RouteCandidate>, limit: usize) -> Vec<RouteCandidate> {
    if candidates.is_empty() {
        return candidates;
    }

    let min_duration = candidates
        .iter()
        .map(|r| r.duration_s)
        .fold(f64::INFINITY, f64::min);
    let min_duration = if min_duration.is_finite() && min_duration > 0.0 {
        min_duration
    } else {
        1.0
    };

    let min_aqi = candidates
        .iter()
        .filter_map(|r| r.avg_aqi)
        .fold(f64::INFINITY, f64::min);
    let min_aqi = (min_aqi.is_finite() && min_aqi > 0.0).then_some(min_aqi);

    let mut scored: Vec<(f64, RouteCandidate)> = candidates
        .into_iter()
        .map(|route| {
            let time_ratio = route.duration_s / min_duration;
            let score = match (route.avg_aqi, min_aqi) {
                (Some(aqi), Some(min_aqi)) => {
                    TIME_WEIGHT * time_ratio + AQI_WEIGHT * (aqi / min_aqi)
                }
                _ => time_ratio,
            };
            (score, route)
        })
        .collect();

    scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    scored.into_iter().take(limit).map(|(_, r)| r).collect()
}

/// Rank candidates with air quality weighted above travel time.
///
/// Duration and the worse of `{max, avg}` AQI are min-max normalized to
/// [0, 1] independently (a degenerate range normalizes to 0) and combined
/// as `0.3 * time + 0.7 * quality`. A candidate without any reading takes a
/// fixed quality score of 1.5. When no candidate has a reading the set is
/// ordered by duration alone.
pub fn rank_routes_safety_first(
    candidates: Vec<RouteCandidate>,
    limit: usize,
) -> Vec<RouteCandidate> {
    if candidates.is_empty() {
        return candidates;
    }

    let durations: Vec<f64> = candidates.iter().map(|r| r.duration_s).collect();
    let min_t = durations.iter().copied().fold(f64::INFINITY, f64::min);
    let max_t = durations.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let qualities: Vec<Option<f64>> = candidates
        .iter()
        .map(|r| r.max_aqi.or(r.avg_aqi))
        .collect();
    let present: Vec<f64> = qualities.iter().flatten().copied().collect();

    let mut scored: Vec<(f64, RouteCandidate)> = if present.is_empty() {
        candidates.into_iter().map(|r| (r.duration_s, r)).collect()
    } else {
        let min_a = present.iter().copied().fold(f64::INFINITY, f64::min);
        let max_a = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        candidates
            .into_iter()
            .zip(qualities)
            .map(|(route, quality)| {
                let time_score = min_max_normalize(route.duration_s, min_t, max_t);
                let quality_score = quality
                    .map(|q| min_max_normalize(q, min_a, max_a))
                    .unwrap_or(MISSING_AQI_SCORE);
                let score = SAFETY_TIME_WEIGHT * time_score + SAFETY_AQI_WEIGHT * quality_score;
                (score, route)
            })
            .collect()
    };

    scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    scored.into_iter().take(limit).map(|(_, r)| r).collect()
}

fn min_max_normalize(value: f64, min: f64, max: f64) -> f64 {
    if max <= min {
        return 0.0;
    }
    (value - min) / (max - min)
}
