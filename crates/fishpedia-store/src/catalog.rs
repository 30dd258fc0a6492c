//! The catalog handle.
//!
//! [`Catalog`] is a plain owned value; callers that share it across threads
//! wrap it the same way they wrap the rest of their state.  Typed helpers
//! live in [`crate::fish`] and [`crate::favorites`].

use std::collections::HashSet;

use fishpedia_shared::{Fish, FishId, IdClock};

use crate::media::MediaRegistry;
use crate::seed;

#[derive(Debug, Default)]
pub struct Catalog {
    /// Display order, newest additions first.
    pub(crate) fish: Vec<Fish>,
    pub(crate) favorites: HashSet<FishId>,
    pub(crate) media: MediaRegistry,
    pub(crate) ids: IdClock,
}

impl Catalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog loaded with the built-in seed entries.
    pub fn seeded() -> Self {
        let catalog = Self::with_fish(seed::seed_fish());
        tracing::info!(count = catalog.len(), "Catalog seeded");
        catalog
    }

    pub fn with_fish(fish: Vec<Fish>) -> Self {
        Self {
            fish,
            ..Self::default()
        }
    }

    pub fn with_media_registry(mut self, media: MediaRegistry) -> Self {
        self.media = media;
        self
    }

    pub fn len(&self) -> usize {
        self.fish.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fish.is_empty()
    }

    pub fn media(&self) -> &MediaRegistry {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut MediaRegistry {
        &mut self.media
    }

    /// Next time-derived stamp, for ids minted outside the catalog
    /// (edit-flow media and comments).
    pub fn next_stamp(&mut self) -> i64 {
        self.ids.next_stamp()
    }

    pub(crate) fn contains(&self, id: &FishId) -> bool {
        self.fish.iter().any(|f| &f.id == id)
    }
}
