//! Edit flow.
//!
//! Editing works on an [`EditDraft`], a private copy of one fish.  Media
//! and comments can be added and removed on the draft freely; nothing is
//! visible in the catalog until [`commit_edit`].  Files attached during the
//! edit are registered immediately so they can be previewed, and
//! [`cancel_edit`] releases them again.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info};

use fishpedia_shared::{
    Comment, CommentId, Fish, FishId, IdClock, LocalHandle, Media, MediaId, NewMedia,
    ValidationError,
};

use crate::error::CommandError;
use crate::events::CatalogEvent;
use crate::state::{lock, SharedState};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditDraft {
    fish: Fish,
    #[serde(skip)]
    attached: Vec<LocalHandle>,
    #[serde(skip)]
    ids: IdClock,
}

impl EditDraft {
    fn new(fish: Fish) -> Self {
        Self {
            fish,
            attached: Vec::new(),
            ids: IdClock::new(),
        }
    }

    pub fn fish(&self) -> &Fish {
        &self.fish
    }

    pub fn id(&self) -> &FishId {
        &self.fish.id
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.fish.name = name.into();
    }

    pub fn set_name_en(&mut self, name_en: Option<String>) {
        self.fish.name_en = name_en.filter(|s| !s.is_empty());
    }

    pub fn set_scientific_name(&mut self, scientific_name: impl Into<String>) {
        self.fish.scientific_name = scientific_name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.fish.description = description.into();
    }

    pub fn set_description_en(&mut self, description_en: Option<String>) {
        self.fish.description_en = description_en.filter(|s| !s.is_empty());
    }

    pub fn set_habitat(&mut self, habitat: impl Into<String>) {
        self.fish.habitat = habitat.into();
    }

    /// Remove a photo or video from the draft. Returns `false` if absent.
    pub fn remove_media(&mut self, id: &MediaId) -> bool {
        let before = self.fish.media.len();
        self.fish.media.retain(|m| &m.id != id);
        before != self.fish.media.len()
    }

    /// Append a comment signed with `author_name`.
    pub fn add_comment(
        &mut self,
        author_name: &str,
        text: &str,
    ) -> Result<&Comment, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyComment);
        }

        let existing: HashSet<CommentId> =
            self.fish.comments.iter().map(|c| c.id.clone()).collect();
        let mut id = IdClock::comment_id(self.ids.next_stamp());
        while existing.contains(&id) {
            id = IdClock::comment_id(self.ids.next_stamp());
        }

        self.fish.comments.push(Comment {
            id,
            author_name: author_name.to_string(),
            text: text.to_string(),
        });
        Ok(&self.fish.comments[self.fish.comments.len() - 1])
    }

    /// Remove a comment from the draft. Returns `false` if absent.
    pub fn remove_comment(&mut self, id: &CommentId) -> bool {
        let before = self.fish.comments.len();
        self.fish.comments.retain(|c| &c.id != id);
        before != self.fish.comments.len()
    }

    fn next_media_id(&mut self, file_name: &str) -> MediaId {
        let existing: HashSet<MediaId> = self.fish.media.iter().map(|m| m.id.clone()).collect();
        let mut id = IdClock::edit_media_id(self.ids.next_stamp(), file_name);
        while existing.contains(&id) {
            id = IdClock::edit_media_id(self.ids.next_stamp(), file_name);
        }
        id
    }

    /// Handles attached during this edit that the final record no longer uses.
    fn orphaned(&self) -> Vec<LocalHandle> {
        let used: HashSet<LocalHandle> = self.fish.local_handles().collect();
        self.attached
            .iter()
            .filter(|handle| !used.contains(handle))
            .copied()
            .collect()
    }
}

/// Open an edit draft for `id`. Requires a session.
pub fn begin_edit(state: &SharedState, id: &FishId) -> Result<EditDraft, CommandError> {
    let guard = lock(state)?;
    guard.require_session()?;
    let fish = guard
        .catalog
        .get(id)
        .cloned()
        .ok_or_else(|| CommandError::NotFound(id.clone()))?;

    debug!(fish_id = %id, "Edit started");
    Ok(EditDraft::new(fish))
}

/// Attach a new file to the draft.
pub fn attach_media(
    state: &SharedState,
    draft: &mut EditDraft,
    file: NewMedia,
) -> Result<Media, CommandError> {
    let id = draft.next_media_id(&file.file_name);
    let mut guard = lock(state)?;
    let media = guard.catalog.media_mut().attach(id, file)?;

    if let Some(handle) = media.locator.local_handle() {
        draft.attached.push(handle);
    }
    draft.fish.media.push(media.clone());
    Ok(media)
}

/// Comment on the draft as the logged-in user.
pub fn add_comment(
    state: &SharedState,
    draft: &mut EditDraft,
    text: &str,
) -> Result<Comment, CommandError> {
    let author = lock(state)?.require_session()?.name.clone();
    Ok(draft.add_comment(&author, text)?.clone())
}

/// Write the draft back to the catalog. Requires a session.
///
/// On success the stored fish owns every file attached so far, so a later
/// [`cancel_edit`] on the same draft releases nothing it references.
pub fn commit_edit(state: &SharedState, draft: &mut EditDraft) -> Result<Fish, CommandError> {
    draft.fish.check_required()?;

    let mut guard = lock(state)?;
    guard.require_session()?;

    if !guard.catalog.update_fish(draft.fish.clone())? {
        return Err(CommandError::NotFound(draft.fish.id.clone()));
    }
    let released = guard.catalog.media_mut().release_all(draft.orphaned());
    draft.attached.clear();
    guard.events.emit(CatalogEvent::FishUpdated {
        fish_id: draft.fish.id.clone(),
    });

    info!(fish_id = %draft.fish.id, released, "Edit committed");
    Ok(draft.fish.clone())
}

/// Abandon the draft and release every file attached during the edit.
pub fn cancel_edit(state: &SharedState, draft: EditDraft) -> Result<usize, CommandError> {
    let released = lock(state)?.catalog.media_mut().release_all(draft.attached);
    debug!(fish_id = %draft.fish.id, released, "Edit cancelled");
    Ok(released)
}
