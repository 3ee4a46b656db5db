//! Test helpers for common fixtures and stub providers.
//!
//! This module provides shared test utilities to reduce duplication across
//! test files.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::geo::GeoPoint;
use crate::model::{Role, RouteRequest};
use crate::routing::{RouteGeometry, RouteProvider};

/// Build a route request from `(lat, lng)` tuples.
pub fn route_request(id: &str, role: Role, start: (f64, f64), end: (f64, f64)) -> RouteRequest {
    RouteRequest {
        user_id: id.to_string(),
        role,
        start: GeoPoint::new(start.0, start.1),
        end: GeoPoint::new(end.0, end.1),
        requested_at_ms: 0,
    }
}

/// The canonical fixture route: a straight line from (0, 0) to (0, 1)
/// sampled at 0.1 degree intervals (11 vertices), about 111 km long, which
/// puts it on the extended-tolerance branch.
pub fn straight_route() -> RouteGeometry {
    let polyline: Vec<GeoPoint> = (0..=10)
        .map(|i| GeoPoint::new(0.0, i as f64 * 0.1))
        .collect();
    let length_km = crate::geo::polyline_length_km(&polyline);
    RouteGeometry {
        polyline,
        length_km,
    }
}

/// Provider that returns the same geometry for every query.
pub struct FixedRouteProvider {
    geometry: RouteGeometry,
}

impl FixedRouteProvider {
    pub fn new(geometry: RouteGeometry) -> Self {
        Self { geometry }
    }
}

impl RouteProvider for FixedRouteProvider {
    fn route(&self, _from: GeoPoint, _to: GeoPoint) -> RouteGeometry {
        self.geometry.clone()
    }
}

/// Provider that never finds a route.
pub struct EmptyRouteProvider;

impl RouteProvider for EmptyRouteProvider {
    fn route(&self, _from: GeoPoint, _to: GeoPoint) -> RouteGeometry {
        RouteGeometry::empty()
    }
}

/// Wrapper counting how often the inner provider is queried; used to assert
/// cache behavior.
pub struct CountingRouteProvider<P> {
    inner: P,
    calls: Arc<AtomicUsize>,
}

impl<P> CountingRouteProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Shared handle to the call counter, usable after the provider has been
    /// boxed and moved into a wrapper.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl<P: RouteProvider> RouteProvider for CountingRouteProvider<P> {
    fn route(&self, from: GeoPoint, to: GeoPoint) -> RouteGeometry {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.route(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_route_shape() {
        let route = straight_route();
        assert_eq!(route.polyline.len(), 11);
        assert!(route.length_km > 100.0);
    }

    #[test]
    fn counting_provider_counts() {
        let provider = CountingRouteProvider::new(EmptyRouteProvider);
        let p = GeoPoint::new(0.0, 0.0);
        provider.route(p, p);
        provider.route(p, p);
        assert_eq!(provider.calls(), 2);
    }
}
