//! Pure geometry helpers: polyline sampling, segmentation, and distance.

use crate::models::Coordinate;

pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two coordinates in meters (Haversine).
pub fn haversine_distance_m(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let dphi = (b.lat - a.lat).to_radians();
    let dlambda = (b.lon - a.lon).to_radians();
    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Pick up to `max_points` roughly evenly spaced points from a polyline.
///
/// Short inputs are returned unchanged. Otherwise points are taken at a
/// fixed stride from index 0, the true endpoint is appended when the stride
/// misses it, and the result is truncated to `max_points` afterwards. The
/// truncation can cut the appended endpoint again; endpoint inclusion is
/// best-effort only.
pub fn sample_points(coords: &[Coordinate], max_points: usize) -> Vec<Coordinate> {
    if max_points == 0 {
        return Vec::new();
    }
    if coords.len() <= max_points {
        return coords.to_vec();
    }

    let stride = (coords.len() / max_points).max(1);
    let mut sampled: Vec<Coordinate> = coords.iter().copied().step_by(stride).collect();

    if sampled.last() != coords.last() {
        if let Some(&last) = coords.last() {
            sampled.push(last);
        }
    }

    sampled.truncate(max_points);
    sampled
}

/// Split a polyline into up to `segment_count` contiguous runs of points.
///
/// Segment `i` covers the index range `[i*(n-1)/count, (i+1)*(n-1)/count]`;
/// a degenerate range is extended by one index (clamped to the end), and
/// runs that still hold fewer than two points are dropped. Adjacent
/// segments share their boundary coordinate.
pub fn segment_polyline(coords: &[Coordinate], segment_count: usize) -> Vec<Vec<Coordinate>> {
    let n = coords.len();
    if n < 2 || segment_count == 0 {
        return Vec::new();
    }

    let mut segments = Vec::with_capacity(segment_count);
    for i in 0..segment_count {
        let start = i * (n - 1) / segment_count;
        let mut end = (i + 1) * (n - 1) / segment_count;
        if end == start {
            end = (start + 1).min(n - 1);
        }
        if end <= start {
            continue;
        }
        segments.push(coords[start..=end].to_vec());
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Coordinates whose latitude encodes the point index.
    fn indexed(n: usize) -> Vec<Coordinate> {
        (0..n)
            .map(|i| Coordinate {
                lat: i as f64,
                lon: 0.0,
            })
            .collect()
    }

    fn index_of(c: &Coordinate) -> usize {
        c.lat as usize
    }

    #[test]
    fn haversine_one_degree_latitude() {
        let a = Coordinate { lat: 0.0, lon: 0.0 };
        let b = Coordinate { lat: 1.0, lon: 0.0 };
        let dist = haversine_distance_m(a, b);
        assert!((dist - 111_194.0).abs() < 100.0);
    }

    #[test]
    fn sample_short_input_is_identity() {
        for n in 0..=6 {
            let coords = indexed(n);
            assert_eq!(sample_points(&coords, 6), coords);
        }
    }

    #[test]
    fn sample_uses_fixed_stride_from_start() {
        let coords = indexed(30);
        let sampled = sample_points(&coords, 6);
        // stride = 30 / 6 = 5
        let picked: Vec<usize> = sampled.iter().map(index_of).collect();
        assert_eq!(picked, vec![0, 5, 10, 15, 20, 25]);
    }

    #[test]
    fn sample_truncation_can_drop_endpoint() {
        // stride 2 picks 7 points ending exactly on the final coordinate,
        // but truncating back to 6 cuts it again.
        let coords = indexed(13);
        let sampled = sample_points(&coords, 6);
        assert_eq!(sampled.len(), 6);
        let picked: Vec<usize> = sampled.iter().map(index_of).collect();
        assert_eq!(picked, vec![0, 2, 4, 6, 8, 10]);
        assert_ne!(sampled.last(), coords.last());
    }

    #[test]
    fn sample_always_starts_at_first_point() {
        for n in [7, 12, 25, 100, 1000] {
            let coords = indexed(n);
            let sampled = sample_points(&coords, 6);
            assert_eq!(sampled.len(), 6);
            assert_eq!(index_of(&sampled[0]), 0);
        }
    }

    #[test]
    fn sample_zero_budget_is_empty() {
        assert!(sample_points(&indexed(10), 0).is_empty());
    }

    #[test]
    fn segment_exact_index_ranges() {
        // n = 9, 4 segments over index range 0..=8
        let coords = indexed(9);
        let segments = segment_polyline(&coords, 4);
        assert_eq!(segments.len(), 4);
        let ranges: Vec<(usize, usize)> = segments
            .iter()
            .map(|s| (index_of(s.first().unwrap()), index_of(s.last().unwrap())))
            .collect();
        assert_eq!(ranges, vec![(0, 2), (2, 4), (4, 6), (6, 8)]);
    }

    #[test]
    fn segment_covers_full_range() {
        for n in [2, 3, 5, 9, 17, 100] {
            for count in [1, 2, 4, 8] {
                let coords = indexed(n);
                let segments = segment_polyline(&coords, count);
                assert!(!segments.is_empty(), "n={n} count={count}");
                assert!(segments.len() <= count, "n={n} count={count}");
                for seg in &segments {
                    assert!(seg.len() >= 2, "n={n} count={count}");
                }
                assert_eq!(index_of(segments[0].first().unwrap()), 0);
                assert_eq!(index_of(segments.last().unwrap().last().unwrap()), n - 1);
                for pair in segments.windows(2) {
                    let prev_end = index_of(pair[0].last().unwrap());
                    let next_start = index_of(pair[1].first().unwrap());
                    assert!(next_start <= prev_end, "gap at n={n} count={count}");
                }
            }
        }
    }

    #[test]
    fn segment_boundaries_are_shared() {
        let coords = indexed(17);
        let segments = segment_polyline(&coords, 8);
        for pair in segments.windows(2) {
            assert_eq!(pair[0].last(), pair[1].first());
        }
    }

    #[test]
    fn segment_degenerate_inputs() {
        assert!(segment_polyline(&indexed(0), 8).is_empty());
        assert!(segment_polyline(&indexed(1), 8).is_empty());
        assert!(segment_polyline(&indexed(10), 0).is_empty());
    }
}
