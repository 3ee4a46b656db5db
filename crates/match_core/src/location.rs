//! Injected location broadcast seam for live tracking around a match.
//!
//! The matcher itself never touches this; features built on top of an
//! accepted match (driver-on-the-way display, shared-trip tracking) publish
//! and subscribe through an injected bus instead of a module-level channel
//! singleton.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::geo::GeoPoint;

/// Callback invoked with each published position for a subscribed actor.
pub type PositionHandler = Box<dyn Fn(GeoPoint) + Send + Sync>;

/// Ad-hoc per-actor position broadcast.
pub trait LocationBus: Send + Sync {
    fn publish(&self, actor_id: &str, position: GeoPoint);
    fn subscribe(&self, actor_id: &str, handler: PositionHandler);
}

/// Process-local bus backed by a handler registry.
#[derive(Default)]
pub struct InMemoryLocationBus {
    handlers: Mutex<HashMap<String, Vec<PositionHandler>>>,
}

impl InMemoryLocationBus {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocationBus for InMemoryLocationBus {
    fn publish(&self, actor_id: &str, position: GeoPoint) {
        let handlers = match self.handlers.lock() {
            Ok(guard) => guard,
            Err(_) => return,
        };
        if let Some(subscribers) = handlers.get(actor_id) {
            for handler in subscribers {
                handler(position);
            }
        }
    }

    fn subscribe(&self, actor_id: &str, handler: PositionHandler) {
        if let Ok(mut handlers) = self.handlers.lock() {
            handlers.entry(actor_id.to_string()).or_default().push(handler);
        }
    }
}
