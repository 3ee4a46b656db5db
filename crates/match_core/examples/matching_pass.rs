//! Run one publish/find pass over a small in-memory pool and print the result.
//!
//! Run with: cargo run -p match_core --example matching_pass

use match_core::engine::run_matching_pass;
use match_core::model::{Role, RouteRequest};
use match_core::pool::InMemoryCandidatePool;
use match_core::routing::{build_route_provider, RouteProviderKind};
use match_core::sink::InMemoryMatchSink;
use match_core::{GeoPoint, RouteMatcher};

fn request(id: &str, role: Role, start: (f64, f64), end: (f64, f64), at_ms: u64) -> RouteRequest {
    RouteRequest {
        user_id: id.to_string(),
        role,
        start: GeoPoint::new(start.0, start.1),
        end: GeoPoint::new(end.0, end.1),
        requested_at_ms: at_ms,
    }
}

fn main() {
    // Berlin-ish coordinates: two drivers heading roughly north-east across
    // town, one of them passing near the rider's pickup and drop-off.
    let mut pool = InMemoryCandidatePool::new();
    pool.add(request(
        "driver-alex",
        Role::Driver,
        (52.45, 13.30),
        (52.55, 13.50),
        1_000,
    ));
    pool.add(request(
        "driver-kim",
        Role::Driver,
        (52.40, 13.70),
        (52.41, 13.75),
        2_000,
    ));

    let rider = request(
        "rider-sam",
        Role::Rider,
        (52.48, 13.36),
        (52.53, 13.46),
        3_000,
    );

    let provider = build_route_provider(&RouteProviderKind::GreatCircle);
    let matcher = RouteMatcher::new(provider);
    let sink = InMemoryMatchSink::new();

    println!(
        "--- Matching pass: {} against {} pending driver(s) ---",
        rider.user_id,
        pool.len()
    );

    match run_matching_pass(&rider, &pool, &matcher, &sink, 4_000) {
        Ok(Some(record)) => {
            println!(
                "matched {} with {} at t={} ms",
                record.rider_id, record.driver_id, record.matched_at_ms
            );
            println!(
                "  driver route: ({:.2}, {:.2}) -> ({:.2}, {:.2})",
                record.driver_start.lat,
                record.driver_start.lng,
                record.driver_end.lat,
                record.driver_end.lng
            );
            println!(
                "  rider trip:   ({:.2}, {:.2}) -> ({:.2}, {:.2})",
                record.rider_start.lat,
                record.rider_start.lng,
                record.rider_end.lat,
                record.rider_end.lng
            );
            println!("sink now holds {} record(s)", sink.records().len());
        }
        Ok(None) => println!("no match found yet"),
        Err(error) => println!("pass failed: {error}"),
    }
}
