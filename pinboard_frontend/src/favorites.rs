use log::{error, warn};

use crate::catalog::ImageCatalog;
use crate::error::Result;
use crate::models::ImageRecord;
use crate::storage::KeyValueStore;

pub const FAVORITES_KEY: &str = "favourites";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
}

impl ToggleOutcome {
    pub fn is_favorite(self) -> bool {
        matches!(self, ToggleOutcome::Added)
    }

    pub fn message(self) -> &'static str {
        match self {
            ToggleOutcome::Added => "Added to favorites",
            ToggleOutcome::Removed => "Removed from favorites",
        }
    }
}

/// Persisted, duplicate-free list of favorite image ids.
///
/// All writes to the favorites key go through [`FavoritesStore::toggle`].
pub struct FavoritesStore {
    ids: Vec<String>,
    store: Box<dyn KeyValueStore>,
}

impl FavoritesStore {
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let ids = match store.get(FAVORITES_KEY) {
            Some(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(ids) => dedup_preserving_order(ids),
                Err(err) => {
                    warn!("stored favorites are malformed, starting empty: {err}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        Self { ids, store }
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.ids.iter().any(|fav| fav == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Flips membership of `id` and persists before returning. On a
    /// persistence failure the in-memory set is left unchanged.
    pub fn toggle(&mut self, id: &str) -> Result<ToggleOutcome> {
        let previous = self.ids.clone();
        let outcome = if let Some(pos) = self.ids.iter().position(|fav| fav == id) {
            self.ids.remove(pos);
            ToggleOutcome::Removed
        } else {
            self.ids.push(id.to_string());
            ToggleOutcome::Added
        };

        let encoded = serde_json::to_string(&self.ids)?;
        if let Err(err) = self.store.set(FAVORITES_KEY, encoded) {
            error!("failed to persist favorites: {err}");
            self.ids = previous;
            return Err(err);
        }
        Ok(outcome)
    }

    /// Favorite records present in the catalog, in catalog order.
    pub fn favorites_in<'a>(&self, catalog: &'a ImageCatalog) -> Vec<&'a ImageRecord> {
        catalog
            .records()
            .iter()
            .filter(|record| self.is_favorite(&record.id))
            .collect()
    }
}

fn dedup_preserving_order(ids: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GalleryError;
    use crate::storage::MemoryStore;
    use pretty_assertions::assert_eq;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: String) -> Result<()> {
            Err(GalleryError::Storage(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    fn empty_store() -> FavoritesStore {
        FavoritesStore::load(Box::new(MemoryStore::new()))
    }

    #[test]
    fn toggle_twice_restores_membership() {
        let mut favorites = empty_store();
        assert!(!favorites.is_favorite("a"));
        assert_eq!(favorites.toggle("a").expect("toggle"), ToggleOutcome::Added);
        assert!(favorites.is_favorite("a"));
        assert_eq!(favorites.toggle("a").expect("toggle"), ToggleOutcome::Removed);
        assert!(!favorites.is_favorite("a"));
    }

    #[test]
    fn load_drops_duplicates() {
        let mut store = MemoryStore::new();
        store
            .set(FAVORITES_KEY, r#"["b","a","b"]"#.into())
            .expect("seed");
        let favorites = FavoritesStore::load(Box::new(store));
        assert_eq!(favorites.ids().to_vec(), vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn malformed_value_starts_empty() {
        let mut store = MemoryStore::new();
        store.set(FAVORITES_KEY, "{oops".into()).expect("seed");
        assert!(FavoritesStore::load(Box::new(store)).is_empty());
    }

    #[test]
    fn failed_persist_rolls_back() {
        let mut favorites = FavoritesStore::load(Box::new(BrokenStore));
        assert!(favorites.toggle("a").is_err());
        assert!(!favorites.is_favorite("a"));
    }

    #[test]
    fn favorites_follow_catalog_order() {
        let catalog = ImageCatalog::from_records(vec![
            ImageRecord::new("a", "", "u", &[]),
            ImageRecord::new("b", "", "u", &[]),
            ImageRecord::new("c", "", "u", &[]),
        ]);
        let mut favorites = empty_store();
        favorites.toggle("c").expect("toggle");
        favorites.toggle("gone").expect("toggle");
        favorites.toggle("a").expect("toggle");
        let shown: Vec<&str> = favorites
            .favorites_in(&catalog)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(shown, vec!["a", "c"]);
    }

    #[test]
    fn outcome_messages() {
        assert_eq!(ToggleOutcome::Added.message(), "Added to favorites");
        assert!(!ToggleOutcome::Removed.is_favorite());
    }
}
