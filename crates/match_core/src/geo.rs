//! Geographic primitives: WGS84 points, haversine distance, polyline scans.
//!
//! Everything here works on raw lat/lng degrees; no projection, no spatial
//! index. The closest-vertex scan is the hot path of the matcher and is kept
//! allocation-free.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres (same constant as the haversine helpers
/// used elsewhere in the pack).
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True when both components are finite and within WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Great-circle distance between two points in kilometres.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let (lat1, lon1) = (a.lat.to_radians(), a.lng.to_radians());
    let (lat2, lon2) = (b.lat.to_radians(), b.lng.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let sin_dlat = (dlat * 0.5).sin();
    let sin_dlon = (dlon * 0.5).sin();
    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Great-circle distance in metres.
pub fn haversine_m(a: GeoPoint, b: GeoPoint) -> f64 {
    haversine_km(a, b) * 1000.0
}

/// Total length of a polyline in kilometres. Empty or single-point
/// polylines have length zero.
pub fn polyline_length_km(points: &[GeoPoint]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    points.windows(2).map(|w| haversine_km(w[0], w[1])).sum()
}

/// Find the polyline vertex closest to `point` by great-circle distance.
///
/// Linear scan over every vertex, no early termination. Returns the vertex
/// index and the distance to it in metres, or `None` for an empty polyline.
/// Ties resolve to the lowest index: the comparison is strict, so a later
/// vertex at the same distance never replaces an earlier one.
pub fn closest_vertex(polyline: &[GeoPoint], point: GeoPoint) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, vertex) in polyline.iter().enumerate() {
        let dist_m = haversine_m(*vertex, point);
        match best {
            Some((_, best_m)) if dist_m >= best_m => {}
            _ => best = Some((index, dist_m)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_known_distance() {
        // One degree of latitude is ~111.2 km anywhere on the sphere.
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(1.0, 0.0);
        let d = haversine_km(a, b);
        assert!((d - 111.2).abs() < 0.5, "got {d}");
    }

    #[test]
    fn haversine_zero_for_same_point() {
        let p = GeoPoint::new(52.52, 13.4);
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn polyline_length_sums_segments() {
        let line = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 0.5),
            GeoPoint::new(0.0, 1.0),
        ];
        let total = polyline_length_km(&line);
        let direct = haversine_km(line[0], line[2]);
        assert!((total - direct).abs() < 0.01);
    }

    #[test]
    fn polyline_length_degenerate() {
        assert_eq!(polyline_length_km(&[]), 0.0);
        assert_eq!(polyline_length_km(&[GeoPoint::new(1.0, 1.0)]), 0.0);
    }

    #[test]
    fn closest_vertex_picks_minimum() {
        let line = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 0.1),
            GeoPoint::new(0.0, 0.2),
        ];
        let (index, dist_m) = closest_vertex(&line, GeoPoint::new(0.01, 0.1)).expect("vertex");
        assert_eq!(index, 1);
        assert!(dist_m < 2_000.0);
    }

    #[test]
    fn closest_vertex_tie_keeps_lowest_index() {
        // Query point equidistant from vertices 0 and 2.
        let line = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 0.1),
            GeoPoint::new(0.0, 0.2),
        ];
        let (index, _) = closest_vertex(&line, GeoPoint::new(0.0, 0.1)).expect("vertex");
        assert_eq!(index, 0);
    }

    #[test]
    fn closest_vertex_empty_polyline() {
        assert!(closest_vertex(&[], GeoPoint::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn point_validity() {
        assert!(GeoPoint::new(52.52, 13.4).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 13.4).is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, 181.0).is_valid());
    }
}
