use crate::{
    db::{PersistentStore, StoreKey},
    models::ThemeMode,
};

/// Light/dark preference mirrored to the store
pub struct ThemePreference {
    mode: ThemeMode,
    store: PersistentStore,
}

impl ThemePreference {
    /// Reads the persisted mode, falling back to light
    pub fn hydrate(store: PersistentStore) -> Self {
        let mode: ThemeMode = store.get(&StoreKey::Theme).unwrap_or_default();
        tracing::debug!(theme = %mode, "Theme hydrated");
        Self { mode, store }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Flips the mode and persists it before returning
    pub fn toggle(&mut self) -> ThemeMode {
        self.mode = self.mode.toggled();
        self.store.set(&StoreKey::Theme, &self.mode);
        tracing::info!(theme = %self.mode, "Theme toggled");
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryBackend;
    use std::sync::Arc;

    #[test]
    fn test_toggle_persists_and_survives_restart() {
        let store = PersistentStore::new(Arc::new(MemoryBackend::new()));

        let mut theme = ThemePreference::hydrate(store.clone());
        assert_eq!(theme.mode(), ThemeMode::Light);

        assert_eq!(theme.toggle(), ThemeMode::Dark);
        assert_eq!(store.get::<String>(&StoreKey::Theme).as_deref(), Some("dark"));

        let restarted = ThemePreference::hydrate(store);
        assert_eq!(restarted.mode(), ThemeMode::Dark);
    }

    #[test]
    fn test_unknown_persisted_value_defaults_to_light() {
        let store = PersistentStore::new(Arc::new(MemoryBackend::new()));
        store.set(&StoreKey::Theme, "solarized");

        assert_eq!(ThemePreference::hydrate(store).mode(), ThemeMode::Light);
    }

    #[test]
    fn test_double_toggle_restores_light() {
        let store = PersistentStore::new(Arc::new(MemoryBackend::new()));
        let mut theme = ThemePreference::hydrate(store.clone());

        theme.toggle();
        theme.toggle();

        assert_eq!(theme.mode(), ThemeMode::Light);
        assert_eq!(store.get::<String>(&StoreKey::Theme).as_deref(), Some("light"));
    }
}
