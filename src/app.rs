use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    config::{Config, StoreBackendKind},
    db::{
        create_redis_client, FileBackend, MemoryBackend, PersistentStore, RedisBackend,
        StorageBackend,
    },
    models::{MovieSummary, ThemeMode},
    services::{
        CatalogClient, CatalogSession, FavoriteSet, NoticeReceiver, OmdbClient, ThemePreference,
    },
};

/// Everything the presentation layer binds to
///
/// Each facet has a single owner: the session owns results and selection, the
/// favorite set owns favorites, the theme preference owns the mode.
pub struct App {
    pub session: CatalogSession,
    pub favorites: FavoriteSet,
    pub theme: ThemePreference,
    pub notices: NoticeReceiver,
}

impl App {
    /// Hydrates persisted state and creates the session
    ///
    /// Does not fetch anything; see [`App::start`].
    pub fn new(
        client: Arc<dyn CatalogClient>,
        store: PersistentStore,
        featured_count: usize,
    ) -> Self {
        let mut favorites = FavoriteSet::new(store.clone());
        favorites.hydrate();
        let theme = ThemePreference::hydrate(store);
        let (session, notices) = CatalogSession::new(client, featured_count);

        Self {
            session,
            favorites,
            theme,
            notices,
        }
    }

    /// Builds the app from configuration and loads the featured set
    pub async fn start(config: &Config) -> anyhow::Result<Self> {
        let client = OmdbClient::from_config(config)?;
        let store = create_store(config)?;

        let app = Self::new(Arc::new(client), store, config.featured_count);
        app.session.load_featured().await;

        Ok(app)
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.is_favorite(id)
    }

    pub fn toggle_favorite(&mut self, summary: &MovieSummary) -> bool {
        self.favorites.toggle(summary)
    }

    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.theme.toggle()
    }
}

/// Creates the persistent store for the configured backend
pub fn create_store(config: &Config) -> anyhow::Result<PersistentStore> {
    let backend: Arc<dyn StorageBackend> = match config.store_backend {
        StoreBackendKind::File => Arc::new(FileBackend::new(Path::new(&config.store_path))),
        StoreBackendKind::Redis => Arc::new(RedisBackend::new(
            create_redis_client(&config.redis_url)?,
            Duration::from_millis(config.redis_timeout_ms),
        )),
        StoreBackendKind::Memory => Arc::new(MemoryBackend::new()),
    };

    tracing::info!(backend = backend.name(), "Persistent store ready");

    Ok(PersistentStore::new(backend))
}
