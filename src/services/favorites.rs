use serde_json::Value;
use std::collections::HashSet;

use crate::{
    db::{PersistentStore, StoreKey},
    models::{FavoriteEntry, MovieSummary},
};

/// In-memory list of favorites, written through to the store on every change
///
/// Entries are unique by id and keep insertion order so the favorites row does
/// not reshuffle as the user adds and removes titles.
pub struct FavoriteSet {
    entries: Vec<FavoriteEntry>,
    store: PersistentStore,
}

impl FavoriteSet {
    /// Creates an empty set; call [`FavoriteSet::hydrate`] to load persisted entries
    pub fn new(store: PersistentStore) -> Self {
        Self {
            entries: Vec::new(),
            store,
        }
    }

    /// Replaces the in-memory list with whatever the store holds
    ///
    /// Absent or non-list data yields an empty set. Entries that fail to parse
    /// are skipped and repeated ids keep their first occurrence.
    pub fn hydrate(&mut self) {
        let raw: Vec<Value> = self.store.get(&StoreKey::Favorites).unwrap_or_default();

        let mut seen = HashSet::new();
        let mut skipped = 0;
        self.entries = raw
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<FavoriteEntry>(value) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping malformed favorite entry");
                    skipped += 1;
                    None
                }
            })
            .filter(|entry| seen.insert(entry.id.clone()))
            .collect();

        tracing::info!(
            favorites = self.entries.len(),
            skipped = skipped,
            "Favorites hydrated"
        );
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Adds the title if absent, removes it if present, and persists the result
    ///
    /// Returns the new membership.
    pub fn toggle(&mut self, summary: &MovieSummary) -> bool {
        let now_favorite = match self.entries.iter().position(|e| e.id == summary.id) {
            Some(index) => {
                self.entries.remove(index);
                false
            }
            None => {
                self.entries.push(FavoriteEntry::from(summary));
                true
            }
        };

        self.store.set(&StoreKey::Favorites, &self.entries);

        tracing::debug!(
            imdb_id = %summary.id,
            favorite = now_favorite,
            favorites = self.entries.len(),
            "Favorite toggled"
        );

        now_favorite
    }

    /// Current favorites in insertion order
    pub fn entries(&self) -> &[FavoriteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryBackend;
    use proptest::prelude::*;
    use proptest::proptest;
    use proptest::sample::Index;
    use serde_json::json;
    use std::sync::Arc;

    fn memory_store() -> PersistentStore {
        PersistentStore::new(Arc::new(MemoryBackend::new()))
    }

    fn movie(id: &str) -> MovieSummary {
        MovieSummary::new(id, format!("Title {}", id), "2001", None)
    }

    fn persisted(store: &PersistentStore) -> Value {
        store.get(&StoreKey::Favorites).unwrap()
    }

    #[test]
    fn test_toggle_add_then_remove() {
        let store = memory_store();
        let mut favorites = FavoriteSet::new(store.clone());
        let summary = MovieSummary::new("tt1", "A", "2001", Some("u".to_string()));

        assert!(favorites.toggle(&summary));
        assert!(favorites.is_favorite("tt1"));
        assert_eq!(
            persisted(&store),
            json!([{"imdbID": "tt1", "Title": "A", "Year": "2001", "Poster": "u"}])
        );

        assert!(!favorites.toggle(&summary));
        assert!(!favorites.is_favorite("tt1"));
        assert_eq!(persisted(&store), json!([]));
    }

    #[test]
    fn test_toggle_is_self_inverse() {
        let store = memory_store();
        let mut favorites = FavoriteSet::new(store.clone());
        favorites.toggle(&movie("tt1"));
        favorites.toggle(&movie("tt2"));
        let before = favorites.entries().to_vec();

        for id in ["tt1", "tt3"] {
            let was = favorites.is_favorite(id);
            favorites.toggle(&movie(id));
            favorites.toggle(&movie(id));
            assert_eq!(favorites.is_favorite(id), was);
            assert_eq!(favorites.entries(), before.as_slice());
        }
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut favorites = FavoriteSet::new(memory_store());
        for id in ["tt1", "tt2", "tt3"] {
            favorites.toggle(&movie(id));
        }

        favorites.toggle(&movie("tt2"));

        let ids: Vec<_> = favorites.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["tt1", "tt3"]);
    }

    #[test]
    fn test_memory_and_store_never_diverge() {
        let store = memory_store();
        let mut favorites = FavoriteSet::new(store.clone());

        for id in ["tt1", "tt2", "tt1", "tt3", "tt2"] {
            favorites.toggle(&movie(id));
            let stored: Vec<FavoriteEntry> = store.get(&StoreKey::Favorites).unwrap();
            assert_eq!(stored.as_slice(), favorites.entries());
        }
    }

    #[test]
    fn test_hydrate_absent_is_empty() {
        let mut favorites = FavoriteSet::new(memory_store());
        favorites.hydrate();
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_hydrate_non_list_is_empty() {
        let store = memory_store();
        store.set(&StoreKey::Favorites, &json!({"imdbID": "tt1"}));

        let mut favorites = FavoriteSet::new(store);
        favorites.hydrate();
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_hydrate_matches_persisted_ids() {
        let store = memory_store();
        store.set(
            &StoreKey::Favorites,
            &json!([
                {"imdbID": "tt1", "Title": "A", "Year": "2001", "Poster": "u"},
                {"imdbID": "tt2", "Title": "B", "Year": "2002", "Poster": "N/A"},
                {"imdbID": "tt1", "Title": "A again", "Year": "2001"},
                {"Title": "no id"}
            ]),
        );

        let mut favorites = FavoriteSet::new(store);
        favorites.hydrate();

        assert_eq!(favorites.len(), 2);
        assert!(favorites.is_favorite("tt1"));
        assert!(favorites.is_favorite("tt2"));
        assert!(!favorites.is_favorite("tt3"));
        assert_eq!(favorites.entries()[0].title, "A");
    }

    #[test]
    fn test_hydrate_then_toggle_survives_reload() {
        let store = memory_store();
        let mut first = FavoriteSet::new(store.clone());
        first.toggle(&movie("tt9"));

        let mut second = FavoriteSet::new(store);
        second.hydrate();
        assert!(second.is_favorite("tt9"));
    }

    fn arb_summary() -> impl Strategy<Value = MovieSummary> {
        (
            "tt[0-9]{1,2}",
            "[A-Za-z][A-Za-z ]{0,11}",
            "(19|20)[0-9]{2}",
            proptest::option::of("https://img\\.example/[a-z]{1,8}\\.jpg"),
        )
            .prop_map(|(id, title, year, poster)| MovieSummary::new(id, title, year, poster))
    }

    fn sorted(entries: &[FavoriteEntry]) -> Vec<FavoriteEntry> {
        let mut entries = entries.to_vec();
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        entries
    }

    proptest! {
        #[test]
        fn toggling_twice_restores_favorites(
            prior in proptest::collection::vec(arb_summary(), 0..8),
            candidate in arb_summary(),
            reuse_existing in any::<bool>(),
            pick in any::<Index>(),
        ) {
            let store = memory_store();
            let prior: Vec<FavoriteEntry> = prior.iter().map(FavoriteEntry::from).collect();
            store.set(&StoreKey::Favorites, &prior);

            let mut favorites = FavoriteSet::new(store.clone());
            favorites.hydrate();
            let before = favorites.entries().to_vec();
            let before_persisted = serde_json::to_value(&before).unwrap();

            let target = if reuse_existing && !before.is_empty() {
                MovieSummary::from(&before[pick.index(before.len())])
            } else {
                prop_assume!(!favorites.is_favorite(&candidate.id));
                candidate
            };
            let was_favorite = favorites.is_favorite(&target.id);

            prop_assert_eq!(favorites.toggle(&target), !was_favorite);
            prop_assert_eq!(favorites.toggle(&target), was_favorite);

            prop_assert_eq!(favorites.is_favorite(&target.id), was_favorite);
            prop_assert_eq!(sorted(favorites.entries()), sorted(&before));
            prop_assert_eq!(persisted(&store), serde_json::to_value(favorites.entries()).unwrap());
            if !was_favorite {
                prop_assert_eq!(favorites.entries(), before.as_slice());
                prop_assert_eq!(persisted(&store), before_persisted);
            }
        }

        #[test]
        fn hydrate_reflects_exactly_the_persisted_ids(
            listed in proptest::collection::vec(arb_summary(), 0..16),
        ) {
            let store = memory_store();
            let listed: Vec<FavoriteEntry> = listed.iter().map(FavoriteEntry::from).collect();
            store.set(&StoreKey::Favorites, &listed);

            let mut favorites = FavoriteSet::new(store);
            favorites.hydrate();

            let mut seen = HashSet::new();
            let expected: Vec<FavoriteEntry> = listed
                .iter()
                .filter(|entry| seen.insert(entry.id.clone()))
                .cloned()
                .collect();

            prop_assert_eq!(favorites.entries(), expected.as_slice());
            prop_assert_eq!(favorites.len(), seen.len());
            for entry in &listed {
                prop_assert!(favorites.is_favorite(&entry.id));
            }
            prop_assert!(!favorites.is_favorite("nm0000001"));
        }
    }
}
