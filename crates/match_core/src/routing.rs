//! Pluggable route providers: trait abstraction for routing backends.
//!
//! Two implementations, selectable via [`RouteProviderKind`]:
//!
//! - **`GreatCircleRouteProvider`**: straight-line polyline sampled along the
//!   great circle. Zero dependencies; baseline for tests and offline use.
//! - **`osrm::OsrmRouteProvider`** (feature `osrm`): calls a local/remote
//!   OSRM HTTP endpoint.
//!
//! "No route" is modelled as an empty polyline rather than an error so that
//! provider failures, timeouts and genuinely unroutable pairs all hit the
//! matcher's single skip-on-empty path.

use serde::{Deserialize, Serialize};

use crate::geo::{haversine_km, GeoPoint};

// ---------------------------------------------------------------------------
// Core types
// ---------------------------------------------------------------------------

/// Result of a route query between two coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteGeometry {
    /// Ordered road-path vertices from start to end. Empty means no route.
    pub polyline: Vec<GeoPoint>,
    /// Road-network path length in kilometres. Used only to size the
    /// matching tolerance.
    pub length_km: f64,
}

impl RouteGeometry {
    /// The uniform "no route" value.
    pub fn empty() -> Self {
        Self {
            polyline: Vec::new(),
            length_km: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.polyline.is_empty()
    }
}

/// Which routing backend to use. Serializable so a caller's configuration
/// layer can carry it.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub enum RouteProviderKind {
    /// Sampled great-circle line, zero external dependencies.
    #[default]
    GreatCircle,
    /// OSRM HTTP endpoint (e.g. `"http://localhost:5000"`).
    #[cfg(feature = "osrm")]
    Osrm { endpoint: String },
}

/// Trait for routing backends. Implementations must be `Send + Sync` so the
/// provider can be shared across a parallel candidate fan-out.
pub trait RouteProvider: Send + Sync {
    /// Compute a driving route between two coordinates. Returns
    /// [`RouteGeometry::empty`] when no route can be produced.
    fn route(&self, from: GeoPoint, to: GeoPoint) -> RouteGeometry;
}

// ---------------------------------------------------------------------------
// Great-circle provider (always available)
// ---------------------------------------------------------------------------

/// Target spacing between sampled vertices, in kilometres.
const SAMPLE_SPACING_KM: f64 = 1.0;

/// Hard cap on sampled vertices so intercontinental pairs stay cheap.
const MAX_SAMPLES: usize = 512;

/// Straight-line route sampled along the great circle at roughly 1 km
/// intervals. Not a road route; suitable for fixtures, demos and offline
/// smoke tests where an OSRM instance is unavailable.
pub struct GreatCircleRouteProvider;

impl RouteProvider for GreatCircleRouteProvider {
    fn route(&self, from: GeoPoint, to: GeoPoint) -> RouteGeometry {
        if !from.is_valid() || !to.is_valid() {
            return RouteGeometry::empty();
        }
        let length_km = haversine_km(from, to);
        let segments = ((length_km / SAMPLE_SPACING_KM).ceil() as usize).clamp(1, MAX_SAMPLES);

        let mut polyline = Vec::with_capacity(segments + 1);
        for step in 0..=segments {
            let t = step as f64 / segments as f64;
            polyline.push(GeoPoint::new(
                from.lat + (to.lat - from.lat) * t,
                from.lng + (to.lng - from.lng) * t,
            ));
        }

        RouteGeometry {
            polyline,
            length_km,
        }
    }
}

// ---------------------------------------------------------------------------
// OSRM provider (behind `osrm` feature)
// ---------------------------------------------------------------------------

#[cfg(feature = "osrm")]
pub mod osrm {
    use super::*;
    use crate::error::MatchError;
    use reqwest::blocking::Client;
    use std::time::Duration;

    /// Routes via an OSRM HTTP endpoint.
    ///
    /// Per-request timeout is 5 s; a timeout is indistinguishable from "no
    /// route" at the trait boundary, which is what the matcher's skip policy
    /// wants.
    pub struct OsrmRouteProvider {
        client: Client,
        endpoint: String,
    }

    impl OsrmRouteProvider {
        pub fn new(endpoint: &str) -> Self {
            let client = Client::builder()
                .timeout(Duration::from_secs(5))
                .build()
                .expect("failed to build HTTP client");
            Self {
                client,
                endpoint: endpoint.trim_end_matches('/').to_string(),
            }
        }

        fn fetch(&self, from: GeoPoint, to: GeoPoint) -> Result<RouteGeometry, MatchError> {
            let url = format!(
                "{}/route/v1/driving/{},{};{},{}?overview=full&geometries=geojson",
                self.endpoint, from.lng, from.lat, to.lng, to.lat,
            );

            let resp: OsrmResponse = self
                .client
                .get(&url)
                .send()
                .and_then(|r| r.json())
                .map_err(|e| MatchError::ProviderUnavailable {
                    reason: e.to_string(),
                })?;

            if resp.code != "Ok" {
                return Err(MatchError::EmptyRoute);
            }
            let route = resp
                .routes
                .and_then(|routes| routes.into_iter().next())
                .ok_or(MatchError::EmptyRoute)?;

            // OSRM returns [lng, lat]; we store (lat, lng)
            let polyline: Vec<GeoPoint> = route
                .geometry
                .coordinates
                .iter()
                .filter(|c| c.len() >= 2)
                .map(|c| GeoPoint::new(c[1], c[0]))
                .collect();

            if polyline.is_empty() {
                return Err(MatchError::EmptyRoute);
            }

            Ok(RouteGeometry {
                polyline,
                length_km: route.distance / 1000.0,
            })
        }
    }

    /// Minimal OSRM JSON response structures.
    #[derive(Deserialize)]
    struct OsrmResponse {
        code: String,
        routes: Option<Vec<OsrmRoute>>,
    }

    #[derive(Deserialize)]
    struct OsrmRoute {
        distance: f64, // metres
        geometry: OsrmGeometry,
    }

    #[derive(Deserialize)]
    struct OsrmGeometry {
        coordinates: Vec<Vec<f64>>, // [lng, lat]
    }

    impl RouteProvider for OsrmRouteProvider {
        fn route(&self, from: GeoPoint, to: GeoPoint) -> RouteGeometry {
            match self.fetch(from, to) {
                Ok(geometry) => geometry,
                Err(error) => {
                    log::warn!(
                        "osrm lookup ({:.5},{:.5})->({:.5},{:.5}) failed: {error}",
                        from.lat,
                        from.lng,
                        to.lat,
                        to.lng
                    );
                    RouteGeometry::empty()
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Caching wrapper
// ---------------------------------------------------------------------------

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Mutex;

/// Cache key: coordinates quantized to ~0.1 m so float noise from repeated
/// geocoding of the same place still hits the cache.
type QuantizedPair = (i64, i64, i64, i64);

fn quantize(from: GeoPoint, to: GeoPoint) -> QuantizedPair {
    const SCALE: f64 = 1e6;
    (
        (from.lat * SCALE).round() as i64,
        (from.lng * SCALE).round() as i64,
        (to.lat * SCALE).round() as i64,
        (to.lng * SCALE).round() as i64,
    )
}

/// LRU-cached wrapper around any [`RouteProvider`].
///
/// The key is directional. On cache miss the inner provider is queried; on
/// inner failure the optional fallback (`GreatCircleRouteProvider`) is tried
/// before returning the empty geometry. Empty results are not cached, so a
/// transient provider outage does not poison subsequent passes.
pub struct CachedRouteProvider {
    inner: Box<dyn RouteProvider>,
    cache: Mutex<LruCache<QuantizedPair, RouteGeometry>>,
    fallback_to_great_circle: bool,
}

impl CachedRouteProvider {
    pub fn new(
        inner: Box<dyn RouteProvider>,
        capacity: usize,
        fallback_to_great_circle: bool,
    ) -> Self {
        Self {
            inner,
            cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(capacity.max(1)).expect("cache capacity must be > 0"),
            )),
            fallback_to_great_circle,
        }
    }
}

impl RouteProvider for CachedRouteProvider {
    fn route(&self, from: GeoPoint, to: GeoPoint) -> RouteGeometry {
        let key = quantize(from, to);

        // Fast path: cache hit
        {
            let mut cache = match self.cache.lock() {
                Ok(guard) => guard,
                Err(_) => return self.inner.route(from, to),
            };
            if let Some(cached) = cache.get(&key) {
                return cached.clone();
            }
        }

        // Slow path: query inner provider
        let mut result = self.inner.route(from, to);
        if result.is_empty() && self.fallback_to_great_circle {
            result = GreatCircleRouteProvider.route(from, to);
        }

        if !result.is_empty() {
            if let Ok(mut cache) = self.cache.lock() {
                cache.put(key, result.clone());
            }
        }

        result
    }
}

// ---------------------------------------------------------------------------
// Factory: build a provider from RouteProviderKind
// ---------------------------------------------------------------------------

/// Default route cache capacity for network-backed providers.
#[cfg(feature = "osrm")]
const DEFAULT_ROUTE_CACHE_CAPACITY: usize = 20_000;

/// Construct a boxed [`RouteProvider`] from a [`RouteProviderKind`]
/// descriptor.
///
/// - `GreatCircle` is returned without caching (it is pure arithmetic).
/// - `Osrm` is wrapped in a [`CachedRouteProvider`]. The great-circle
///   fallback stays off: a synthetic line is not a road route, and matching
///   against it would produce proximity decisions the provider never made.
pub fn build_route_provider(kind: &RouteProviderKind) -> Box<dyn RouteProvider> {
    match kind {
        RouteProviderKind::GreatCircle => Box::new(GreatCircleRouteProvider),

        #[cfg(feature = "osrm")]
        RouteProviderKind::Osrm { endpoint } => {
            let inner = Box::new(osrm::OsrmRouteProvider::new(endpoint));
            Box::new(CachedRouteProvider::new(
                inner,
                DEFAULT_ROUTE_CACHE_CAPACITY,
                false,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn great_circle_route_spans_endpoints() {
        let from = GeoPoint::new(0.0, 0.0);
        let to = GeoPoint::new(0.0, 0.1);
        let route = GreatCircleRouteProvider.route(from, to);

        assert!(!route.is_empty());
        assert_eq!(route.polyline.first(), Some(&from));
        assert_eq!(route.polyline.last(), Some(&to));
        assert!(route.length_km > 10.0 && route.length_km < 12.0);
    }

    #[test]
    fn great_circle_same_point_is_degenerate_but_nonempty() {
        let p = GeoPoint::new(52.52, 13.4);
        let route = GreatCircleRouteProvider.route(p, p);
        assert!(!route.is_empty());
        assert_eq!(route.length_km, 0.0);
    }

    #[test]
    fn great_circle_rejects_invalid_coordinates() {
        let route =
            GreatCircleRouteProvider.route(GeoPoint::new(f64::NAN, 0.0), GeoPoint::new(0.0, 0.0));
        assert!(route.is_empty());
    }

    #[test]
    fn great_circle_sampling_is_bounded() {
        // Antipodal-ish pair: spacing would want ~20k samples, cap applies.
        let route =
            GreatCircleRouteProvider.route(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 179.0));
        assert!(route.polyline.len() <= MAX_SAMPLES + 1);
    }

    #[test]
    fn quantize_is_stable_under_float_noise() {
        let a = GeoPoint::new(52.5200001, 13.4050001);
        let b = GeoPoint::new(52.52, 13.405);
        let to = GeoPoint::new(52.55, 13.45);
        assert_eq!(quantize(a, to), quantize(b, to));
    }
}
