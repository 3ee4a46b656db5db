//! Performance benchmarks for match_core using Criterion.rs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use match_core::geo::{closest_vertex, GeoPoint};
use match_core::model::{Role, RouteRequest};
use match_core::routing::{GreatCircleRouteProvider, RouteProvider};
use match_core::test_helpers::{route_request, FixedRouteProvider};
use match_core::{MatcherConfig, RouteMatcher};

fn bench_closest_vertex(c: &mut Criterion) {
    let mut group = c.benchmark_group("closest_vertex");
    for vertices in [100usize, 1_000, 10_000] {
        let polyline: Vec<GeoPoint> = (0..vertices)
            .map(|i| GeoPoint::new(0.0, i as f64 * 0.0001))
            .collect();
        let query = GeoPoint::new(0.05, 0.3);

        group.bench_with_input(
            BenchmarkId::from_parameter(vertices),
            &polyline,
            |b, polyline| {
                b.iter(|| black_box(closest_vertex(polyline, query)));
            },
        );
    }
    group.finish();
}

fn bench_find_matches(c: &mut Criterion) {
    // Shared 111 km owner route; riders scattered near and far from it.
    let owner_route = GreatCircleRouteProvider.route(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0));
    let driver = route_request("d1", Role::Driver, (0.0, 0.0), (0.0, 1.0));

    let candidates: Vec<RouteRequest> = (0..100)
        .map(|i| {
            let offset = (i % 10) as f64 * 0.05;
            route_request(
                &format!("r{i}"),
                Role::Rider,
                (offset, 0.3),
                (offset, 0.8),
            )
        })
        .collect();

    let mut group = c.benchmark_group("find_matches");

    let serial = RouteMatcher::with_config(
        Box::new(FixedRouteProvider::new(owner_route.clone())),
        MatcherConfig::default().with_parallel(false),
    );
    group.bench_function("serial_100_riders", |b| {
        b.iter(|| black_box(serial.find_matches(&driver, &candidates)));
    });

    let parallel = RouteMatcher::with_config(
        Box::new(FixedRouteProvider::new(owner_route.clone())),
        MatcherConfig::default().with_parallel(true),
    );
    group.bench_function("parallel_100_riders", |b| {
        b.iter(|| black_box(parallel.find_matches(&driver, &candidates)));
    });

    group.finish();
}

criterion_group!(benches, bench_closest_vertex, bench_find_matches);
criterion_main!(benches);
