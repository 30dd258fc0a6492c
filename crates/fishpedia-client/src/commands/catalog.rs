use tracing::{info, warn};

use fishpedia_shared::{Fish, FishDraft, FishId};

use crate::error::CommandError;
use crate::events::CatalogEvent;
use crate::state::{lock, SharedState};

/// Add a new entry to the front of the catalog.
pub fn add_fish(state: &SharedState, draft: FishDraft) -> Result<Fish, CommandError> {
    let mut guard = lock(state)?;
    let fish = guard.catalog.add_fish(draft).map_err(|e| {
        warn!(error = %e, "Add fish rejected");
        CommandError::from(e)
    })?;

    guard.events.emit(CatalogEvent::FishAdded {
        fish_id: fish.id.clone(),
    });
    Ok(fish)
}

/// Replace an existing entry wholesale. Requires a session.
///
/// Returns `Ok(false)` without changes when the id is unknown.
pub fn update_fish(state: &SharedState, fish: Fish) -> Result<bool, CommandError> {
    let mut guard = lock(state)?;
    guard.require_session()?;

    let fish_id = fish.id.clone();
    let updated = guard.catalog.update_fish(fish)?;
    if updated {
        guard.events.emit(CatalogEvent::FishUpdated { fish_id });
    }
    Ok(updated)
}

pub fn get_fish(state: &SharedState, id: &FishId) -> Result<Fish, CommandError> {
    lock(state)?
        .catalog
        .get(id)
        .cloned()
        .ok_or_else(|| CommandError::NotFound(id.clone()))
}

/// Catalog listing, optionally filtered by display name.
pub fn list_fish(state: &SharedState, filter: Option<&str>) -> Result<Vec<Fish>, CommandError> {
    let guard = lock(state)?;
    let fish: Vec<Fish> = match filter {
        Some(term) => guard.catalog.search(term).into_iter().cloned().collect(),
        None => guard.catalog.list().to_vec(),
    };
    info!(count = fish.len(), filtered = filter.is_some(), "Catalog listed");
    Ok(fish)
}

#[cfg(test)]
mod tests {
    use fishpedia_shared::{NewMedia, ValidationError};

    use super::*;
    use crate::commands::session::login;
    use crate::state::AppState;

    fn draft(media: usize) -> FishDraft {
        FishDraft {
            name: "Mandarinfish".into(),
            name_en: Some("Mandarin dragonet".into()),
            scientific_name: "Synchiropus splendidus".into(),
            description: "Brightly coloured".into(),
            description_en: None,
            habitat: "Western Pacific".into(),
            media: (0..media)
                .map(|i| NewMedia::new(format!("m{i}.mov"), "video/quicktime", vec![7u8; 8]))
                .collect(),
        }
    }

    #[test]
    fn test_add_fish_goes_first() {
        let state = AppState::seeded().into_shared();
        let fish = add_fish(&state, draft(1)).unwrap();

        let list = list_fish(&state, None).unwrap();
        assert_eq!(list.len(), 4);
        assert_eq!(list[0].id, fish.id);
        assert_eq!(list[0].media[0].kind, fishpedia_shared::MediaKind::Video);
    }

    #[test]
    fn test_add_fish_without_media_rejected() {
        let state = AppState::seeded().into_shared();
        assert_eq!(
            add_fish(&state, draft(0)),
            Err(CommandError::Validation(ValidationError::NoMedia))
        );
        assert_eq!(list_fish(&state, None).unwrap().len(), 3);
    }

    #[test]
    fn test_update_requires_session() {
        let state = AppState::seeded().into_shared();
        let mut fish = get_fish(&state, &FishId::from("1")).unwrap();
        fish.habitat = "Changed".into();

        assert_eq!(
            update_fish(&state, fish.clone()),
            Err(CommandError::LoginRequired)
        );
        assert_ne!(get_fish(&state, &FishId::from("1")).unwrap().habitat, "Changed");

        login(&state, "editor@example.com").unwrap();
        assert_eq!(update_fish(&state, fish), Ok(true));
        assert_eq!(get_fish(&state, &FishId::from("1")).unwrap().habitat, "Changed");
    }

    #[test]
    fn test_update_unknown_id_is_ignored() {
        let state = AppState::seeded().into_shared();
        login(&state, "editor@example.com").unwrap();
        let before = list_fish(&state, None).unwrap();

        let mut ghost = before[2].clone();
        ghost.id = FishId::from("nope");
        assert_eq!(update_fish(&state, ghost), Ok(false));
        assert_eq!(list_fish(&state, None).unwrap(), before);
    }

    #[test]
    fn test_get_unknown_fish() {
        let state = AppState::seeded().into_shared();
        assert_eq!(
            get_fish(&state, &FishId::from("42")),
            Err(CommandError::NotFound(FishId::from("42")))
        );
    }

    #[test]
    fn test_list_with_filter() {
        let state = AppState::seeded().into_shared();
        let hits = list_fish(&state, Some("CLOWN")).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, FishId::from("1"));
    }
}
