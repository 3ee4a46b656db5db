//! Trip-length-scaled proximity tolerance.
//!
//! Short trips need tight proximity but must still absorb GPS/geocoding
//! noise; long-haul routes legitimately pass "near" a rider while staying on
//! a highway, so they get a fixed extended tolerance and a higher
//! false-positive rate is accepted.

use serde::{Deserialize, Serialize};

/// Tolerance policy parameters. Defaults implement the documented curve:
/// `clamp(length_km * 50, 500, 3000)` metres up to 50 km, 30 km beyond.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToleranceConfig {
    /// Metres of tolerance granted per kilometre of route length.
    pub meters_per_km: f64,
    /// Lower clamp in metres (noise floor for very short trips).
    pub floor_m: f64,
    /// Upper clamp in metres for short trips.
    pub cap_m: f64,
    /// Route lengths above this threshold (km) use the extended tolerance.
    pub long_trip_threshold_km: f64,
    /// Fixed tolerance in metres for long-haul routes.
    pub long_trip_tolerance_m: f64,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            meters_per_km: 50.0,
            floor_m: 500.0,
            cap_m: 3000.0,
            long_trip_threshold_km: 50.0,
            long_trip_tolerance_m: 30_000.0,
        }
    }
}

impl ToleranceConfig {
    /// Maximum allowed distance in metres between a tested point and the
    /// nearest route vertex, for a route of the given length.
    pub fn tolerance_m(&self, length_km: f64) -> f64 {
        if length_km > self.long_trip_threshold_km {
            return self.long_trip_tolerance_m;
        }
        (length_km * self.meters_per_km).clamp(self.floor_m, self.cap_m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_trip_is_floored() {
        let cfg = ToleranceConfig::default();
        assert_eq!(cfg.tolerance_m(0.0), 500.0);
        assert_eq!(cfg.tolerance_m(5.0), 500.0);
    }

    #[test]
    fn linear_band_between_floor_and_cap() {
        let cfg = ToleranceConfig::default();
        assert_eq!(cfg.tolerance_m(20.0), 1000.0);
        assert_eq!(cfg.tolerance_m(40.0), 2000.0);
    }

    #[test]
    fn capped_at_three_km_for_short_trips() {
        let cfg = ToleranceConfig::default();
        assert_eq!(cfg.tolerance_m(50.0), 2500.0);
        // 60 * 50 would be 3000 but 60km is already on the long-trip branch
        assert_eq!(cfg.tolerance_m(60.0), 30_000.0);
    }

    #[test]
    fn long_trips_use_extended_tolerance() {
        let cfg = ToleranceConfig::default();
        assert_eq!(cfg.tolerance_m(50.1), 30_000.0);
        assert_eq!(cfg.tolerance_m(500.0), 30_000.0);
    }

    #[test]
    fn monotonic_and_bounded_on_short_branch() {
        let cfg = ToleranceConfig::default();
        let mut previous = 0.0;
        for step in 0..=500 {
            let length_km = step as f64 * 0.1;
            let tol = cfg.tolerance_m(length_km);
            assert!(tol >= previous, "tolerance decreased at {length_km} km");
            assert!((500.0..=3000.0).contains(&tol));
            previous = tol;
        }
    }
}
