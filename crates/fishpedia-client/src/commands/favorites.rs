use tracing::{info, warn};

use fishpedia_shared::{Fish, FishId};

use crate::error::CommandError;
use crate::events::CatalogEvent;
use crate::state::{lock, SharedState};

/// Flip `id` in the favorites set. Requires a session.
///
/// Returns whether the fish is a favorite afterwards.
pub fn toggle_favorite(state: &SharedState, id: &FishId) -> Result<bool, CommandError> {
    let mut guard = lock(state)?;
    if !guard.is_logged_in() {
        warn!(fish_id = %id, "Favorite refused, login required");
        return Err(CommandError::LoginRequired);
    }

    let favorite = guard.catalog.toggle_favorite(id);
    guard.events.emit(CatalogEvent::FavoritesChanged {
        fish_id: id.clone(),
        favorite,
    });

    info!(fish_id = %id, favorite, "Favorites changed");
    Ok(favorite)
}

pub fn is_favorite(state: &SharedState, id: &FishId) -> Result<bool, CommandError> {
    Ok(lock(state)?.catalog.is_favorite(id))
}

/// Favorited fish in catalog order.
pub fn list_favorites(state: &SharedState) -> Result<Vec<Fish>, CommandError> {
    Ok(lock(state)?
        .catalog
        .list_favorites()
        .into_iter()
        .cloned()
        .collect())
}
