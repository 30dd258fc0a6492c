//! Change notifications for views.
//!
//! Every successful command publishes a [`CatalogEvent`]; views subscribe
//! and re-read whatever they display.

use serde::Serialize;
use tokio::sync::broadcast;

use fishpedia_shared::FishId;

pub const EVENT_FISH_ADDED: &str = "fish-added";
pub const EVENT_FISH_UPDATED: &str = "fish-updated";
pub const EVENT_FAVORITES_CHANGED: &str = "favorites-changed";
pub const EVENT_SESSION_CHANGED: &str = "session-changed";

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum CatalogEvent {
    FishAdded { fish_id: FishId },
    FishUpdated { fish_id: FishId },
    FavoritesChanged { fish_id: FishId, favorite: bool },
    SessionChanged { user: Option<String> },
}

impl CatalogEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FishAdded { .. } => EVENT_FISH_ADDED,
            Self::FishUpdated { .. } => EVENT_FISH_UPDATED,
            Self::FavoritesChanged { .. } => EVENT_FAVORITES_CHANGED,
            Self::SessionChanged { .. } => EVENT_SESSION_CHANGED,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<CatalogEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.tx.subscribe()
    }

    /// Publish to current subscribers. Having none is fine.
    pub fn emit(&self, event: CatalogEvent) {
        let name = event.name();
        match self.tx.send(event) {
            Ok(receivers) => tracing::trace!(event = name, receivers, "Event emitted"),
            Err(_) => tracing::trace!(event = name, "Event dropped, no subscribers"),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
