use std::sync::atomic::Ordering;

use match_core::geo::GeoPoint;
use match_core::routing::{
    build_route_provider, CachedRouteProvider, GreatCircleRouteProvider, RouteProvider,
    RouteProviderKind,
};
use match_core::test_helpers::{
    straight_route, CountingRouteProvider, EmptyRouteProvider, FixedRouteProvider,
};

#[test]
fn great_circle_provider_returns_route() {
    let provider = GreatCircleRouteProvider;
    let route = provider.route(GeoPoint::new(52.50, 13.40), GeoPoint::new(52.55, 13.45));

    assert!(!route.is_empty());
    assert!(route.length_km > 0.0);
    assert!(route.polyline.len() >= 2);
}

#[test]
fn great_circle_vertices_are_roughly_evenly_spaced() {
    let provider = GreatCircleRouteProvider;
    let route = provider.route(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.1));

    for window in route.polyline.windows(2) {
        let step_km = match_core::geo::haversine_km(window[0], window[1]);
        assert!(step_km <= 1.05, "vertex spacing {step_km} km exceeds target");
    }
}

#[test]
fn route_provider_kind_default_is_great_circle() {
    assert_eq!(RouteProviderKind::default(), RouteProviderKind::GreatCircle);
}

#[test]
fn build_route_provider_great_circle() {
    let provider = build_route_provider(&RouteProviderKind::GreatCircle);
    let route = provider.route(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.5));
    assert!(!route.is_empty());
}

#[test]
fn cached_provider_hits_inner_once_per_pair() {
    let counting = CountingRouteProvider::new(FixedRouteProvider::new(straight_route()));
    let calls = counting.counter();
    let cached = CachedRouteProvider::new(Box::new(counting), 16, false);

    let from = GeoPoint::new(0.0, 0.0);
    let to = GeoPoint::new(0.0, 1.0);

    cached.route(from, to);
    cached.route(from, to);
    cached.route(from, to);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // A different pair is a distinct key (the cache is directional).
    cached.route(to, from);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn cached_provider_does_not_cache_empty_results() {
    let counting = CountingRouteProvider::new(EmptyRouteProvider);
    let calls = counting.counter();
    let cached = CachedRouteProvider::new(Box::new(counting), 16, false);

    let from = GeoPoint::new(0.0, 0.0);
    let to = GeoPoint::new(0.0, 1.0);

    assert!(cached.route(from, to).is_empty());
    assert!(cached.route(from, to).is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn cached_provider_great_circle_fallback() {
    let cached = CachedRouteProvider::new(Box::new(EmptyRouteProvider), 16, true);
    let route = cached.route(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.5));
    assert!(!route.is_empty());
}
