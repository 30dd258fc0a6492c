use std::collections::HashSet;

use tracing::{debug, info};

use fishpedia_shared::{Fish, FishDraft, FishId, IdClock, LocalHandle};

use crate::catalog::Catalog;
use crate::error::Result;

impl Catalog {
    /// Validate a draft, mint its ids and put it at the front of the list.
    ///
    /// Nothing changes unless every field and every file is acceptable.
    pub fn add_fish(&mut self, draft: FishDraft) -> Result<Fish> {
        draft.validate()?;
        for m in &draft.media {
            self.media.check_size(m)?;
        }

        let mut stamp = self.ids.next_stamp();
        while self.contains(&IdClock::fish_id(stamp)) {
            stamp = self.ids.next_stamp();
        }

        let mut media = Vec::with_capacity(draft.media.len());
        for (index, file) in draft.media.into_iter().enumerate() {
            media.push(self.media.attach(IdClock::media_id(stamp, index), file)?);
        }

        let fish = Fish {
            id: IdClock::fish_id(stamp),
            name: draft.name,
            name_en: draft.name_en,
            scientific_name: draft.scientific_name,
            description: draft.description,
            description_en: draft.description_en,
            habitat: draft.habitat,
            media,
            comments: Vec::new(),
        };

        self.fish.insert(0, fish.clone());
        info!(fish_id = %fish.id, media = fish.media.len(), "Fish added");
        Ok(fish)
    }

    /// Replace the entry with the same id, keeping its position.
    ///
    /// Returns `false` and changes nothing when no entry matches.  Local
    /// media dropped by the new record is released from the registry.
    pub fn update_fish(&mut self, fish: Fish) -> Result<bool> {
        fish.check_ids()?;

        let Some(slot) = self.fish.iter_mut().find(|f| f.id == fish.id) else {
            debug!(fish_id = %fish.id, "Update ignored, no such fish");
            return Ok(false);
        };

        let kept: HashSet<LocalHandle> = fish.local_handles().collect();
        let dropped: Vec<LocalHandle> = slot
            .local_handles()
            .filter(|handle| !kept.contains(handle))
            .collect();

        *slot = fish;
        let released = self.media.release_all(dropped);
        info!(fish_id = %slot.id, released, "Fish updated");
        Ok(true)
    }

    pub fn get(&self, id: &FishId) -> Option<&Fish> {
        self.fish.iter().find(|f| &f.id == id)
    }

    pub fn list(&self) -> &[Fish] {
        &self.fish
    }

    /// Entries whose display name contains `term`, ignoring case.
    pub fn search(&self, term: &str) -> Vec<&Fish> {
        self.fish.iter().filter(|f| f.matches(term)).collect()
    }
}
