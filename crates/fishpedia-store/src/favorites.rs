use tracing::debug;

use fishpedia_shared::{Fish, FishId};

use crate::catalog::Catalog;

impl Catalog {
    /// Flip membership of `id` in the favorites set.
    ///
    /// Returns the new membership. The id is not checked against the
    /// collection; stale ids are filtered out by [`Catalog::list_favorites`].
    pub fn toggle_favorite(&mut self, id: &FishId) -> bool {
        let now_favorite = if self.favorites.remove(id) {
            false
        } else {
            self.favorites.insert(id.clone());
            true
        };
        debug!(fish_id = %id, favorite = now_favorite, "Favorite toggled");
        now_favorite
    }

    pub fn is_favorite(&self, id: &FishId) -> bool {
        self.favorites.contains(id)
    }

    /// Favorited entries in collection order.
    pub fn list_favorites(&self) -> Vec<&Fish> {
        self.fish
            .iter()
            .filter(|f| self.favorites.contains(&f.id))
            .collect()
    }

    pub fn favorite_count(&self) -> usize {
        self.favorites.len()
    }
}

#[cfg(test)]
mod tests {
    use fishpedia_shared::{FishDraft, NewMedia};

    use super::*;

    fn ids(fish: &[&Fish]) -> Vec<String> {
        fish.iter().map(|f| f.id.to_string()).collect()
    }

    #[test]
    fn test_toggle_twice_is_noop() {
        let mut catalog = Catalog::seeded();
        let id = FishId::from("1");

        assert!(catalog.toggle_favorite(&id));
        assert!(catalog.is_favorite(&id));
        assert!(!catalog.toggle_favorite(&id));
        assert!(!catalog.is_favorite(&id));
        assert_eq!(catalog.favorite_count(), 0);
    }

    #[test]
    fn test_list_favorites_follows_collection_order() {
        let mut catalog = Catalog::seeded();
        let extra = catalog
            .add_fish(FishDraft {
                name: "Lionfish".into(),
                scientific_name: "Pterois".into(),
                description: "Striped".into(),
                habitat: "Reefs".into(),
                media: vec![NewMedia::new("l.jpg", "image/jpeg", vec![1u8])],
                ..FishDraft::default()
            })
            .unwrap();
        // Collection is now [extra, 1, 2, 3]; favorite 3 first, then extra.
        catalog.toggle_favorite(&FishId::from("3"));
        catalog.toggle_favorite(&extra.id);

        assert_eq!(
            ids(&catalog.list_favorites()),
            vec![extra.id.to_string(), "3".to_string()]
        );
    }

    #[test]
    fn test_stale_favorite_not_listed() {
        let mut catalog = Catalog::seeded();
        catalog.toggle_favorite(&FishId::from("999"));
        assert!(catalog.is_favorite(&FishId::from("999")));
        assert!(catalog.list_favorites().is_empty());
    }
}
