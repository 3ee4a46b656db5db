pub mod engine;
pub mod error;
pub mod geo;
pub mod location;
pub mod matcher;
pub mod model;
pub mod pool;
pub mod routing;
pub mod sink;
pub mod tolerance;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use engine::run_matching_pass;
pub use error::MatchError;
pub use geo::GeoPoint;
pub use matcher::{MatcherConfig, RouteMatcher};
pub use model::{MatchCandidate, MatchRecord, Role, RouteRequest};
pub use pool::{CandidatePool, InMemoryCandidatePool};
pub use routing::{build_route_provider, RouteGeometry, RouteProvider, RouteProviderKind};
pub use sink::{InMemoryMatchSink, MatchSink};
pub use tolerance::ToleranceConfig;
